//! Fault profile: injection rate and weighted error-kind selection.
//!
//! The profile is built once at startup, validated, and shared immutably for
//! the process lifetime. Both random draws (inject? which kind?) are
//! independent and uniform in [0, 1).

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tolerance when checking that kind weights sum to 1.0
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Kinds of synthetic failures the injector can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Simulated database timeout (slow 503)
    DatabaseTimeout,
    /// Simulated validation failure (422 with a field error)
    ValidationError,
    /// Simulated expired/invalid credentials (401)
    AuthError,
    /// Simulated rate limiting (429)
    RateLimit,
    /// Simulated unexpected server error (500); also the selection fallback
    InternalServer,
    /// Simulated upstream outage (slow 502)
    NetworkError,
}

impl ErrorKind {
    /// Snake-case label used in log records
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DatabaseTimeout => "database_timeout",
            Self::ValidationError => "validation_error",
            Self::AuthError => "auth_error",
            Self::RateLimit => "rate_limit",
            Self::InternalServer => "internal_server",
            Self::NetworkError => "network_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors detected when validating a profile at startup
#[derive(Debug, Error)]
pub enum FaultProfileError {
    /// Rate outside [0, 1]
    #[error("Injection rate must be within [0, 1], got {0}")]
    InvalidRate(f64),

    /// No kinds to select from
    #[error("Fault profile must contain at least one error kind")]
    EmptyWeights,

    /// Negative weight
    #[error("Weight for {kind} must be non-negative, got {weight}")]
    NegativeWeight { kind: ErrorKind, weight: f64 },

    /// Weights describe the conditional distribution and must sum to 1.0
    #[error("Error kind weights must sum to 1.0, got {0}")]
    WeightSumMismatch(f64),
}

/// Immutable injection probability profile
///
/// `weights` is an ordered list of `(kind, weight)` pairs; the weights are
/// relative proportions of the conditional kind distribution and must sum to
/// 1.0. Selection walks the list accumulating weight and returns the first
/// kind whose cumulative weight reaches the draw, with an explicit fallback
/// for floating-point rounding instead of relying on loop fallthrough.
#[derive(Debug, Clone, PartialEq)]
pub struct FaultProfile {
    rate: f64,
    weights: Vec<(ErrorKind, f64)>,
}

/// Default overall injection rate
const DEFAULT_RATE: f64 = 0.15;

/// Kind returned when rounding leaves a draw unmatched
const FALLBACK_KIND: ErrorKind = ErrorKind::InternalServer;

fn default_weights() -> Vec<(ErrorKind, f64)> {
    vec![
        (ErrorKind::DatabaseTimeout, 0.25),
        (ErrorKind::ValidationError, 0.20),
        (ErrorKind::AuthError, 0.15),
        (ErrorKind::RateLimit, 0.15),
        (ErrorKind::InternalServer, 0.15),
        (ErrorKind::NetworkError, 0.10),
    ]
}

impl Default for FaultProfile {
    fn default() -> Self {
        Self {
            rate: DEFAULT_RATE,
            weights: default_weights(),
        }
    }
}

impl FaultProfile {
    /// Build a profile from explicit parts, validating it
    pub fn from_parts(
        rate: f64,
        weights: Vec<(ErrorKind, f64)>,
    ) -> Result<Self, FaultProfileError> {
        let profile = Self { rate, weights };
        profile.validate()?;
        Ok(profile)
    }

    /// Default weights with a custom overall rate
    pub fn with_rate(rate: f64) -> Result<Self, FaultProfileError> {
        Self::from_parts(rate, default_weights())
    }

    /// Profile that injects every request with a single kind
    #[must_use]
    pub fn always(kind: ErrorKind) -> Self {
        Self {
            rate: 1.0,
            weights: vec![(kind, 1.0)],
        }
    }

    /// Profile that never injects
    #[must_use]
    pub fn never() -> Self {
        Self {
            rate: 0.0,
            weights: default_weights(),
        }
    }

    /// Get the overall injection rate
    #[must_use]
    pub const fn rate(&self) -> f64 {
        self.rate
    }

    /// Check the profile invariants
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant: rate outside [0, 1], an empty
    /// kind table, a negative weight, or weights not summing to 1.0 within
    /// tolerance.
    pub fn validate(&self) -> Result<(), FaultProfileError> {
        if !(0.0..=1.0).contains(&self.rate) || self.rate.is_nan() {
            return Err(FaultProfileError::InvalidRate(self.rate));
        }
        if self.weights.is_empty() {
            return Err(FaultProfileError::EmptyWeights);
        }
        for (kind, weight) in &self.weights {
            if *weight < 0.0 || weight.is_nan() {
                return Err(FaultProfileError::NegativeWeight {
                    kind: *kind,
                    weight: *weight,
                });
            }
        }
        let sum: f64 = self.weights.iter().map(|(_, w)| w).sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(FaultProfileError::WeightSumMismatch(sum));
        }
        Ok(())
    }

    /// Decide whether this request gets a synthetic failure
    ///
    /// Independent uniform draw in [0, 1); injects iff the draw is below the
    /// configured rate.
    #[must_use]
    pub fn should_inject(&self) -> bool {
        if self.rate <= 0.0 {
            return false;
        }
        if self.rate >= 1.0 {
            return true;
        }
        rand::rng().random::<f64>() < self.rate
    }

    /// Select the kind of failure to inject
    ///
    /// Second independent uniform draw, mapped through the cumulative weight
    /// table.
    #[must_use]
    pub fn select_kind(&self) -> ErrorKind {
        self.kind_for_draw(rand::rng().random::<f64>())
    }

    /// Map a draw in [0, 1) to an error kind via cumulative weights
    fn kind_for_draw(&self, draw: f64) -> ErrorKind {
        let mut cumulative = 0.0;
        for (kind, weight) in &self.weights {
            cumulative += weight;
            if draw <= cumulative {
                return *kind;
            }
        }
        // Rounding can leave the final cumulative sum a hair under the draw.
        FALLBACK_KIND
    }
}
