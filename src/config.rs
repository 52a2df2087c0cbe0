//! Walk configuration: OTP mode selection and step limit.
//!
//! The two user-facing knobs are the mode (which counter-advance policy the
//! code generator uses) and the limit (how far the driving counter runs).
//! Both are validated here, before any generator or tracker state exists, so
//! a bad flag never leaves partial state behind.
//!
//! ## Example Usage
//!
//! ```
//! use otpwalk::config::{OtpMode, WalkConfig};
//!
//! let config = WalkConfig::parse("hotp", "5000").unwrap();
//! assert_eq!(config.mode, OtpMode::Hotp);
//! assert_eq!(config.limit, 5000);
//! assert_eq!(config.mode.stride(), 1);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Counter stride for time-like (TOTP) mode, in seconds per code window.
pub const TOTP_INTERVAL: u64 = 30;

/// Default walk limit (iterations for HOTP, elapsed seconds for TOTP).
pub const DEFAULT_LIMIT: u64 = 100_000;

/// OTP counter-advance policy.
///
/// `Hotp` advances the counter once per code; `Totp` advances it in
/// [`TOTP_INTERVAL`]-second windows. Both reduce to "next counter value,
/// next code" from the tracker's point of view; the stride only matters
/// for normalizing gaps into step units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpMode {
    /// Counter-based codes, one counter increment per code.
    Hotp,
    /// Time-based codes, one counter window per [`TOTP_INTERVAL`] seconds.
    Totp,
}

impl OtpMode {
    /// Counter units consumed per sequence step.
    ///
    /// # Example
    ///
    /// ```
    /// use otpwalk::config::OtpMode;
    ///
    /// assert_eq!(OtpMode::Hotp.stride(), 1);
    /// assert_eq!(OtpMode::Totp.stride(), 30);
    /// ```
    #[inline]
    pub fn stride(self) -> u64 {
        match self {
            OtpMode::Hotp => 1,
            OtpMode::Totp => TOTP_INTERVAL,
        }
    }
}

impl fmt::Display for OtpMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OtpMode::Hotp => f.write_str("hotp"),
            OtpMode::Totp => f.write_str("totp"),
        }
    }
}

impl FromStr for OtpMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hotp" => Ok(OtpMode::Hotp),
            "totp" => Ok(OtpMode::Totp),
            other => Err(ConfigError::new(format!(
                "--mode must be either 'totp' or 'hotp', got '{other}'"
            ))),
        }
    }
}

/// Validated walk parameters.
///
/// # Example
///
/// ```
/// use otpwalk::config::{OtpMode, WalkConfig};
///
/// let config = WalkConfig::new(OtpMode::Totp, 86_400);
/// // 86400 seconds of 30-second windows
/// assert_eq!(config.steps(), 2880);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkConfig {
    /// Counter-advance policy for the code generator.
    pub mode: OtpMode,
    /// Upper bound on the raw counter (iterations for HOTP, seconds for TOTP).
    pub limit: u64,
}

impl WalkConfig {
    /// Creates a config from already-validated parts.
    pub fn new(mode: OtpMode, limit: u64) -> Self {
        Self { mode, limit }
    }

    /// Parses and validates raw string arguments.
    ///
    /// Fails fast with a descriptive [`ConfigError`] on an unknown mode or a
    /// non-numeric/negative limit, before any walk state is created.
    ///
    /// # Example
    ///
    /// ```
    /// use otpwalk::config::WalkConfig;
    ///
    /// assert!(WalkConfig::parse("totp", "100000").is_ok());
    /// assert!(WalkConfig::parse("rotp", "100000").is_err());
    /// assert!(WalkConfig::parse("totp", "many").is_err());
    /// assert!(WalkConfig::parse("totp", "-1").is_err());
    /// ```
    pub fn parse(mode: &str, limit: &str) -> Result<Self, ConfigError> {
        let mode = OtpMode::from_str(mode)?;
        let limit: u64 = limit.trim().parse().map_err(|_| {
            ConfigError::new(format!(
                "--limit must be a non-negative integer, got '{limit}'"
            ))
        })?;
        Ok(Self { mode, limit })
    }

    /// Number of sequence steps the walk will take (`limit / stride`).
    #[inline]
    pub fn steps(&self) -> u64 {
        self.limit / self.mode.stride()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- OtpMode ----------------------------------------------------------

    #[test]
    fn mode_parses_known_names() {
        assert_eq!("hotp".parse::<OtpMode>().unwrap(), OtpMode::Hotp);
        assert_eq!("totp".parse::<OtpMode>().unwrap(), OtpMode::Totp);
    }

    #[test]
    fn mode_rejects_unknown_name() {
        let err = "motp".parse::<OtpMode>().unwrap_err();
        assert!(err.to_string().contains("'totp' or 'hotp'"));
        assert!(err.to_string().contains("motp"));
    }

    #[test]
    fn mode_is_case_sensitive() {
        assert!("TOTP".parse::<OtpMode>().is_err());
        assert!("Hotp".parse::<OtpMode>().is_err());
    }

    #[test]
    fn mode_display_round_trips() {
        for mode in [OtpMode::Hotp, OtpMode::Totp] {
            assert_eq!(mode.to_string().parse::<OtpMode>().unwrap(), mode);
        }
    }

    #[test]
    fn strides_match_policy() {
        assert_eq!(OtpMode::Hotp.stride(), 1);
        assert_eq!(OtpMode::Totp.stride(), TOTP_INTERVAL);
    }

    // -- WalkConfig -------------------------------------------------------

    #[test]
    fn parse_accepts_valid_arguments() {
        let config = WalkConfig::parse("hotp", "12345").unwrap();
        assert_eq!(config.mode, OtpMode::Hotp);
        assert_eq!(config.limit, 12345);
    }

    #[test]
    fn parse_rejects_negative_limit() {
        let err = WalkConfig::parse("totp", "-100").unwrap_err();
        assert!(err.to_string().contains("--limit"));
    }

    #[test]
    fn parse_rejects_non_numeric_limit() {
        assert!(WalkConfig::parse("totp", "1e5").is_err());
        assert!(WalkConfig::parse("totp", "").is_err());
        assert!(WalkConfig::parse("totp", "100k").is_err());
    }

    #[test]
    fn parse_accepts_zero_limit() {
        let config = WalkConfig::parse("hotp", "0").unwrap();
        assert_eq!(config.limit, 0);
        assert_eq!(config.steps(), 0);
    }

    #[test]
    fn steps_divide_by_stride() {
        assert_eq!(WalkConfig::new(OtpMode::Hotp, 100_000).steps(), 100_000);
        assert_eq!(WalkConfig::new(OtpMode::Totp, 100_000).steps(), 3333);
        assert_eq!(WalkConfig::new(OtpMode::Totp, 29).steps(), 0);
    }
}
