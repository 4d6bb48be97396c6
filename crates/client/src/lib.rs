//! # Smile Client
//!
//! `reqwest`-backed implementation of [`smile_core::RemoteResources`] talking to the clinic's
//! Django REST API.

pub mod http;

pub use http::HttpResources;
