//! Error types for the otpwalk library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when user-facing configuration is invalid
//!   (unknown OTP mode, non-numeric limit, undecodable secret). Raised
//!   before any tracking state is constructed.
//! - [`InvariantError`]: Returned when the duplicate tracker's internal
//!   invariants are violated (`check_invariants` self-checks).
//!
//! ## Example Usage
//!
//! ```
//! use otpwalk::config::WalkConfig;
//! use otpwalk::error::ConfigError;
//!
//! // Fallible parse for user-supplied parameters
//! let ok: Result<WalkConfig, ConfigError> = WalkConfig::parse("hotp", "500");
//! assert!(ok.is_ok());
//!
//! // Invalid mode is caught without panicking
//! let bad = WalkConfig::parse("motp", "500");
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when walk configuration parameters are invalid.
///
/// Produced by [`WalkConfig::parse`](crate::config::WalkConfig::parse),
/// the [`OtpMode`](crate::config::OtpMode) `FromStr` impl and the fallible
/// generator constructors. Carries a human-readable description of which
/// parameter failed validation.
///
/// # Example
///
/// ```
/// use otpwalk::config::WalkConfig;
///
/// let err = WalkConfig::parse("totp", "-5").unwrap_err();
/// assert!(err.to_string().contains("--limit"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when tracker invariants are violated.
///
/// Produced by [`DupeTracker::check_invariants`](crate::ds::DupeTracker::check_invariants).
/// Any occurrence is a programming defect, not a recoverable condition;
/// tests call the panicking wrapper `debug_validate_invariants` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- ConfigError ------------------------------------------------------

    #[test]
    fn config_display_shows_message() {
        let err = ConfigError::new("--limit must be a non-negative integer");
        assert_eq!(err.to_string(), "--limit must be a non-negative integer");
    }

    #[test]
    fn config_message_accessor() {
        let err = ConfigError::new("bad mode");
        assert_eq!(err.message(), "bad mode");
    }

    #[test]
    fn config_clone_and_eq() {
        let a = ConfigError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn config_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ConfigError>();
    }

    // -- InvariantError ---------------------------------------------------

    #[test]
    fn invariant_display_shows_message() {
        let err = InvariantError::new("bucket membership mismatch");
        assert_eq!(err.to_string(), "bucket membership mismatch");
    }

    #[test]
    fn invariant_debug_includes_message() {
        let err = InvariantError::new("stale bucket entry");
        let dbg = format!("{:?}", err);
        assert!(dbg.contains("stale bucket entry"));
    }

    #[test]
    fn invariant_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<InvariantError>();
    }
}
