//! Manual fault-injection helpers
//!
//! Stateless probability gates meant to be dropped into business logic to
//! simulate organic failures. Unlike the HTTP middleware they are not tied
//! to a request, an allow-list, or a correlation id; calling code opts in
//! explicitly.

use std::time::Duration;

use domain::commands::RegisterUser;
use rand::Rng;
use thiserror::Error;
use tracing::{error, warn};

/// Probability that `maybe_database_error` raises
const DATABASE_ERROR_RATE: f64 = 0.10;

/// Probability that `maybe_processing_delay` suspends the caller
const PROCESSING_DELAY_RATE: f64 = 0.20;

/// Probability that `maybe_corrupt_registration` corrupts its input
const CORRUPTION_RATE: f64 = 0.10;

/// Delay bounds for `maybe_processing_delay`, in seconds
const PROCESSING_DELAY_SECS: (f64, f64) = (0.5, 2.0);

/// Email replacement used when corrupting a registration record
const INVALID_EMAIL: &str = "invalid_email_format";

/// Error raised by the manual injection helpers
#[derive(Debug, Error)]
pub enum InjectedFaultError {
    /// Simulated loss of the database connection
    #[error("Database connection lost - simulated error")]
    DatabaseConnectionLost,
}

/// With 10% probability, fail as if the database connection dropped
///
/// # Errors
///
/// Returns `InjectedFaultError::DatabaseConnectionLost` when the gate fires.
pub fn maybe_database_error() -> Result<(), InjectedFaultError> {
    if rand::rng().random::<f64>() < DATABASE_ERROR_RATE {
        error!("Simulated database connection failure");
        return Err(InjectedFaultError::DatabaseConnectionLost);
    }
    Ok(())
}

/// With 20% probability, suspend the calling task for 0.5-2.0 seconds
///
/// The sleep is cooperative (`tokio::time::sleep`); concurrent requests on
/// the same runtime keep being served while this task waits.
pub async fn maybe_processing_delay() {
    let (fired, delay) = {
        let mut rng = rand::rng();
        if rng.random::<f64>() < PROCESSING_DELAY_RATE {
            let (min, max) = PROCESSING_DELAY_SECS;
            (true, Duration::from_secs_f64(rng.random_range(min..=max)))
        } else {
            (false, Duration::ZERO)
        }
    };

    if fired {
        warn!(delay_ms = delay.as_millis() as u64, "Simulated processing delay");
        tokio::time::sleep(delay).await;
    }
}

/// With 10% probability, return a corrupted copy of a registration record
///
/// When the gate fires, each corruption applies independently with
/// probability 0.5: the email is replaced with a syntactically invalid
/// literal, and/or a non-empty username is cleared. When the gate does not
/// fire the input is returned unchanged.
#[must_use]
pub fn maybe_corrupt_registration(cmd: RegisterUser) -> RegisterUser {
    let mut rng = rand::rng();
    if rng.random::<f64>() >= CORRUPTION_RATE {
        return cmd;
    }

    error!("Simulating registration data corruption");
    let mut corrupted = cmd;
    if rng.random::<bool>() {
        corrupted.email = INVALID_EMAIL.to_string();
    }
    if rng.random::<bool>() && !corrupted.username.is_empty() {
        corrupted.username = String::new();
    }
    corrupted
}
