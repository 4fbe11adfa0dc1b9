//! Request correlation identifiers
//!
//! A short random token assigned by the fault-injection middleware to every
//! request outside its allow-list, before the injection decision. The token
//! shows up in the request span, in injected internal-server bodies, and in
//! the `x-request-id` response header.

use std::fmt;

use uuid::Uuid;

/// The header echoing the correlation token back to the client
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Number of hex characters in a token
const TOKEN_LEN: usize = 8;

/// A short random correlation token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a fresh token
    ///
    /// Eight hex characters: short enough to eyeball in a log line, random
    /// enough to correlate one request's records.
    #[must_use]
    pub fn generate() -> Self {
        Self(
            Uuid::new_v4()
                .simple()
                .to_string()
                .chars()
                .take(TOKEN_LEN)
                .collect(),
        )
    }

    /// Get the token as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
