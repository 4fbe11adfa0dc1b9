//! Registration commands - raw input records before validation

use serde::{Deserialize, Serialize};

/// Raw user-registration input
///
/// Field values are unvalidated strings straight from the caller; the
/// application service converts them into value objects (and rejects bad
/// data) when handling the command. Keeping this record loose is what allows
/// the chaos corruption helper to produce invalid variants of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterUser {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Email address (unvalidated)
    pub email: String,
    /// Username (unvalidated)
    pub username: String,
    /// Plaintext credential; hashed before it reaches any entity
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RegisterUser {
        RegisterUser {
            first_name: "Alice".to_string(),
            last_name: "Smith".to_string(),
            email: "alice@example.com".to_string(),
            username: "asmith".to_string(),
            password: "correct horse battery staple".to_string(),
        }
    }

    #[test]
    fn command_roundtrips_through_json() {
        let cmd = sample();
        let json = serde_json::to_string(&cmd).unwrap();
        let parsed: RegisterUser = serde_json::from_str(&json).unwrap();
        assert_eq!(cmd, parsed);
    }

    #[test]
    fn equality_is_field_wise() {
        let a = sample();
        let mut b = sample();
        assert_eq!(a, b);
        b.username.clear();
        assert_ne!(a, b);
    }
}
