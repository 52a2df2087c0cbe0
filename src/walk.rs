//! The walk driver: counter loop, code generation, reporting.
//!
//! Advances the raw counter from 0 up to the configured limit in
//! stride-sized steps, asks the [`CodeGenerator`] for each code, and feeds
//! `(code, counter / stride)` into the [`DupeTracker`]. Gaps are therefore
//! always in step units, comparable across the fixed-step and time-like
//! policies. One walk per run; nothing survives it except the returned
//! report.
//!
//! ## Example Usage
//!
//! ```
//! use otpwalk::config::WalkConfig;
//! use otpwalk::walk::walk;
//!
//! let config = WalkConfig::parse("hotp", "100").unwrap();
//! let report = walk(&config).unwrap();
//! assert_eq!(report.iterations, 100);
//! ```

use std::fmt;

use tracing::{debug, info};

use crate::config::WalkConfig;
use crate::ds::{DupeSummary, DupeTracker};
use crate::error::ConfigError;
use crate::otp::{CodeGenerator, Secret};

/// Everything the reporting layer needs from a completed walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkReport {
    /// Number of sequence steps taken (`limit / stride`).
    pub iterations: u64,
    /// The secret the sequence was derived from.
    pub secret: Secret,
    /// Duplicate statistics rollup.
    pub summary: DupeSummary,
}

/// Runs a walk with a freshly generated secret.
pub fn walk(config: &WalkConfig) -> Result<WalkReport, ConfigError> {
    let secret = Secret::random();
    walk_with_secret(config, &secret)
}

/// Runs a walk with a caller-supplied secret.
///
/// For a fixed secret and config the resulting report is fully
/// deterministic, which is what tests lean on.
///
/// # Example
///
/// ```
/// use otpwalk::config::WalkConfig;
/// use otpwalk::otp::Secret;
/// use otpwalk::walk::walk_with_secret;
///
/// let config = WalkConfig::parse("totp", "3600").unwrap();
/// let secret = Secret::from_base32("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ").unwrap();
///
/// let a = walk_with_secret(&config, &secret).unwrap();
/// let b = walk_with_secret(&config, &secret).unwrap();
/// assert_eq!(a, b);
/// ```
pub fn walk_with_secret(config: &WalkConfig, secret: &Secret) -> Result<WalkReport, ConfigError> {
    let generator = CodeGenerator::for_mode(config.mode, secret)?;
    let stride = generator.stride();
    info!(mode = %config.mode, limit = config.limit, stride, "starting walk");

    let mut tracker = DupeTracker::new();
    let mut counter = 0;
    while counter < config.limit {
        tracker.observe(generator.code_at(counter), counter / stride);
        counter += stride;
    }

    let summary = tracker.summary();
    debug!(
        steps = config.steps(),
        duplicates = summary.duplicate_total,
        "walk complete"
    );

    Ok(WalkReport {
        iterations: config.steps(),
        secret: secret.clone(),
        summary,
    })
}

impl fmt::Display for WalkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "After {} iterations", self.iterations)?;
        writeln!(f, "----------------------------------")?;
        writeln!(f)?;
        writeln!(f, "Secret: {}", self.secret)?;
        writeln!(f, "Number of duplicates: {}", self.summary.duplicate_total)?;
        writeln!(f, "Dupe occurrences and values: {:?}", self.summary.buckets)?;
        writeln!(f, "Intervals between dupes: {:?}", self.summary.gaps)?;
        write!(f, "Average dupe interval: {}", self.summary.average_gap)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OtpMode, TOTP_INTERVAL};

    const TEST_SECRET: &str = "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ";

    fn test_secret() -> Secret {
        Secret::from_base32(TEST_SECRET).unwrap()
    }

    #[test]
    fn fixed_secret_walks_are_identical() {
        let config = WalkConfig::new(OtpMode::Hotp, 2_000);
        let secret = test_secret();
        let a = walk_with_secret(&config, &secret).unwrap();
        let b = walk_with_secret(&config, &secret).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn totp_walk_counts_windows_not_seconds() {
        let config = WalkConfig::new(OtpMode::Totp, 3_600);
        let report = walk_with_secret(&config, &test_secret()).unwrap();
        assert_eq!(report.iterations, 3_600 / TOTP_INTERVAL);
    }

    #[test]
    fn single_step_walk_has_no_duplicates() {
        // limit/stride <= 1 means at most one code is ever observed
        for config in [
            WalkConfig::new(OtpMode::Hotp, 0),
            WalkConfig::new(OtpMode::Hotp, 1),
            WalkConfig::new(OtpMode::Totp, TOTP_INTERVAL),
        ] {
            let report = walk_with_secret(&config, &test_secret()).unwrap();
            assert_eq!(report.summary.duplicate_total, 0, "{config:?}");
            assert!(report.summary.gaps.is_empty(), "{config:?}");
            assert_eq!(report.summary.average_gap, 0, "{config:?}");
        }
    }

    #[test]
    fn hotp_and_totp_agree_on_step_sequences() {
        // Walking N HOTP iterations and N TOTP windows visits the same
        // underlying counter sequence, so the stats must coincide.
        let secret = test_secret();
        let steps = 500;
        let hotp = walk_with_secret(&WalkConfig::new(OtpMode::Hotp, steps), &secret).unwrap();
        let totp =
            walk_with_secret(&WalkConfig::new(OtpMode::Totp, steps * TOTP_INTERVAL), &secret)
                .unwrap();
        assert_eq!(hotp.iterations, totp.iterations);
        assert_eq!(hotp.summary, totp.summary);
    }

    #[test]
    fn report_renders_original_text_shape() {
        let mut buckets = std::collections::BTreeMap::new();
        buckets.insert(2, vec![]);
        buckets.insert(3, vec![101_532]);
        let report = WalkReport {
            iterations: 3333,
            secret: test_secret(),
            summary: DupeSummary {
                duplicate_total: 2,
                buckets,
                gaps: vec![2, 1],
                average_gap: 1,
            },
        };

        let text = report.to_string();
        assert!(text.starts_with("After 3333 iterations\n"));
        assert!(text.contains(&format!("Secret: {TEST_SECRET}")));
        assert!(text.contains("Number of duplicates: 2"));
        assert!(text.contains("Dupe occurrences and values: {2: [], 3: [101532]}"));
        assert!(text.contains("Intervals between dupes: [2, 1]"));
        assert!(text.ends_with("Average dupe interval: 1"));
    }

    #[test]
    fn fresh_secret_walk_runs_to_completion() {
        let config = WalkConfig::new(OtpMode::Hotp, 50);
        let report = walk(&config).unwrap();
        assert_eq!(report.iterations, 50);
        assert_eq!(report.secret.as_str().len(), Secret::LENGTH);
    }
}
