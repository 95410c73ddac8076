//! Editor for a single manager record held by the user service.
//!
//! [`ManagerForm`] loads the record, applies field edits, validates and
//! submits the update, reporting back to its host through [`Effect`]s.

pub mod config;
pub mod form;
pub mod io;
pub mod models;
pub mod repository;

pub use config::ApiConfig;
pub use form::{Effect, FormEvent, FormHandle, FormPhase, FormSnapshot, ManagerForm, Notice};
pub use models::{Field, ManagerRecord, ManagerType, Route, RouteId};
pub use repository::{ApiError, HttpRepository, ManagerApi};
