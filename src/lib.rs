//! otpwalk: walk an OTP code sequence and track duplicate statistics.
//!
//! See `DESIGN.md` for internal architecture and invariants.

pub mod config;
pub mod ds;
pub mod error;
pub mod otp;
pub mod walk;

pub use crate::config::{DEFAULT_LIMIT, OtpMode, TOTP_INTERVAL, WalkConfig};
pub use crate::ds::{DupeSummary, DupeTracker};
pub use crate::error::{ConfigError, InvariantError};
pub use crate::otp::{CodeGenerator, Hotp, Secret, Totp};
pub use crate::walk::{WalkReport, walk, walk_with_secret};
