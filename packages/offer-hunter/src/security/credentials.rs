//! Credential handling with secure memory.
//!
//! Uses the `secrecy` crate so API keys never end up in logs or debug output.

use secrecy::{ExposeSecret, SecretBox};
use std::fmt;

/// Number of leading characters shown by [`SecretString::masked`].
const MASK_VISIBLE: usize = 4;

/// A secret string that won't be logged or displayed.
pub struct SecretString(SecretBox<str>);

impl SecretString {
    /// Create a new secret string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(Box::from(value.into().as_str())))
    }

    /// Expose the secret value for use.
    ///
    /// Only call this when handing the secret to a client.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// Operator-facing preview: first four characters, the rest starred.
    pub fn masked(&self) -> String {
        let value = self.expose();
        let total = value.chars().count();
        let shown: String = value.chars().take(MASK_VISIBLE).collect();
        format!(
            "{}{} ({} chars)",
            shown,
            "*".repeat(total.saturating_sub(MASK_VISIBLE)),
            total
        )
    }
}

impl Clone for SecretString {
    fn clone(&self) -> Self {
        Self::new(self.expose().to_string())
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_not_in_debug() {
        let secret = SecretString::new("AIza-super-secret-key");
        let debug = format!("{:?}", secret);
        assert!(!debug.contains("super"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_secret_not_in_display() {
        let secret = SecretString::new("AIza-super-secret-key");
        assert_eq!(format!("{}", secret), "[REDACTED]");
    }

    #[test]
    fn test_expose_works() {
        let secret = SecretString::new("AIza-super-secret-key");
        assert_eq!(secret.expose(), "AIza-super-secret-key");
    }

    #[test]
    fn test_masked_shows_prefix_only() {
        let secret = SecretString::new("AIzaSyXYZ");
        assert_eq!(secret.masked(), "AIza***** (9 chars)");

        let short = SecretString::new("ab");
        assert_eq!(short.masked(), "ab (2 chars)");
    }
}
