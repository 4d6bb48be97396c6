//! # Smile CLI
//!
//! Terminal front-end shared by the `smile` command and the `smile-run` dashboard: process
//! bootstrap (dotenv, tracing, configuration) and plain-text rendering of the view-models.

pub mod bootstrap;
pub mod render;

pub use bootstrap::{config_from_env, init_tracing, login_hint, parse_assignment};
