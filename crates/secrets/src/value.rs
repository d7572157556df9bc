//! Redacting wrapper for secret values.

use secrecy::{ExposeSecret, SecretString};

/// A secret value that refuses to print itself.
///
/// Wraps `secrecy::SecretString` so that:
/// - memory is zeroed when the value is dropped
/// - `Debug` and `Display` output `[REDACTED]`
/// - reading the value requires an explicit [`expose`](Self::expose) call
#[derive(Clone)]
pub struct SecureSecret {
    inner: SecretString,
}

impl SecureSecret {
    /// Wrap a string value.
    #[must_use]
    pub fn new(value: String) -> Self {
        Self {
            inner: SecretString::from(value),
        }
    }

    /// Expose the secret value for use.
    ///
    /// The caller must not log, print, or persist the exposed value; use it
    /// for the immediate operation only (building a connection, signing a
    /// request).
    #[must_use]
    pub fn expose(&self) -> &str {
        self.inner.expose_secret()
    }

    /// Length of the secret without exposing it.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.expose_secret().len()
    }

    /// Whether the secret is the empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.expose_secret().is_empty()
    }
}

impl From<&str> for SecureSecret {
    fn from(value: &str) -> Self {
        Self::new(value.to_string())
    }
}

impl std::fmt::Debug for SecureSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl std::fmt::Display for SecureSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_is_redacted() {
        let secret = SecureSecret::new("hunter2".to_string());
        let debug_output = format!("{secret:?}");
        assert_eq!(debug_output, "[REDACTED]");
        assert!(!debug_output.contains("hunter2"));
    }

    #[test]
    fn display_is_redacted() {
        let secret = SecureSecret::new("hunter2".to_string());
        assert_eq!(format!("{secret}"), "[REDACTED]");
    }

    #[test]
    fn expose_returns_value() {
        let secret = SecureSecret::from("sk-abc123");
        assert_eq!(secret.expose(), "sk-abc123");
    }

    #[test]
    fn len_and_empty() {
        assert_eq!(SecureSecret::from("12345").len(), 5);
        assert!(SecureSecret::from("").is_empty());
        assert!(!SecureSecret::from("x").is_empty());
    }
}
