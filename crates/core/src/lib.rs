//! # Smile Core
//!
//! View-model layer of the Bright Smile Dental admin client.
//!
//! This crate contains the client-side state and reconciliation logic:
//! - Static configuration of each resource type (fields, paths, messages)
//! - The generic resource-list view-model and its form drafts
//! - Read-only lookup lists for reference and procedure fields
//! - Explicit sessions and the file-backed token store
//!
//! **No transport concerns**: the HTTP implementation of [`RemoteResources`] lives in
//! `smile-client`; rendering lives in `smile-cli`.

pub mod appointments;
pub mod config;
pub mod constants;
pub mod controller;
pub mod dashboard;
pub mod draft;
pub mod error;
pub mod lookups;
pub mod record;
pub mod remote;
pub mod resource;
pub mod session;
pub mod validation;
pub mod view_state;

#[cfg(test)]
mod testing;

pub use appointments::{appointment_board, AppointmentBoard, AppointmentDetails};
pub use config::CoreConfig;
pub use controller::{ListView, LoadState, ResourceList};
pub use dashboard::{logout, AfterLogout, Dashboard};
pub use draft::Draft;
pub use error::{ClientError, ClientResult};
pub use lookups::{LookupOption, Lookups};
pub use record::{Procedure, Record, RecordId};
pub use remote::RemoteResources;
pub use resource::{FieldKind, FieldSpec, LookupSource, ResourceKind, ResourceSpec};
pub use session::{Session, TokenStore};
pub use view_state::ViewState;
