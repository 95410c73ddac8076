pub mod manager;
pub mod route;

pub use manager::{Field, FieldError, ManagerRecord, ManagerType};
pub use route::{Route, RouteId, RouteIdError};
