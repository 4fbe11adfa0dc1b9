//! Chaos tooling for resilience testing.
//!
//! Two independent pieces:
//! - `FaultProfile`: the process-wide, immutable probability profile the HTTP
//!   fault-injection middleware draws from (overall rate + weighted error
//!   kinds).
//! - manual injection helpers (`maybe_database_error`,
//!   `maybe_processing_delay`, `maybe_corrupt_registration`): stateless
//!   decision points business logic can call explicitly to simulate organic
//!   failures. They are not wired into the middleware chain.

mod fault_profile;
mod injection;

pub use fault_profile::{ErrorKind, FaultProfile, FaultProfileError};
pub use injection::{
    InjectedFaultError, maybe_corrupt_registration, maybe_database_error, maybe_processing_delay,
};
