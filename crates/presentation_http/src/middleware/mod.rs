//! HTTP middleware

pub mod fault_injection;
pub mod request_id;

pub use fault_injection::{FaultInjectionLayer, fault_response};
pub use request_id::{REQUEST_ID_HEADER, RequestId};
