//! HTTP presentation layer for the signup service
//!
//! Routes, handlers, API error mapping, and the fault-injection middleware.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use middleware::{FaultInjectionLayer, REQUEST_ID_HEADER, RequestId};
pub use routes::create_router;
pub use state::AppState;
