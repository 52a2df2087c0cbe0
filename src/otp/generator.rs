//! HMAC-based one-time-password generation (RFC 4226 / RFC 6238 family).
//!
//! [`Hotp`] is the counter-based core: HMAC-SHA1 over the big-endian
//! counter, dynamic truncation, modulo 10^digits. [`Totp`] wraps it by
//! mapping elapsed seconds onto a coarser counter, one window per interval.
//! [`CodeGenerator`] is the closed set of policies the driver selects from
//! once at configuration time; the hot loop then pays a single match per
//! code.
//!
//! Both policies are pure: for a fixed secret and counter the code is fully
//! determined, which is what makes walking the sequence meaningful.
//!
//! ## Example Usage
//!
//! ```
//! use otpwalk::config::OtpMode;
//! use otpwalk::otp::{CodeGenerator, Secret};
//!
//! let secret = Secret::random();
//! let generator = CodeGenerator::for_mode(OtpMode::Totp, &secret).unwrap();
//!
//! assert_eq!(generator.stride(), 30);
//! // Same counter, same code
//! assert_eq!(generator.code_at(60), generator.code_at(60));
//! ```

use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::config::{OtpMode, TOTP_INTERVAL};
use crate::error::ConfigError;
use crate::otp::secret::Secret;

type HmacSha1 = Hmac<Sha1>;

/// Code digit width in the reference configuration (code space 10^6).
pub const DEFAULT_DIGITS: u32 = 6;

/// Widest supported code; 10^9 still fits in a `u32`.
const MAX_DIGITS: u32 = 9;

// ---------------------------------------------------------------------------
// Hotp
// ---------------------------------------------------------------------------

/// Counter-based OTP generator (RFC 4226).
///
/// # Example
///
/// ```
/// use otpwalk::otp::{Hotp, Secret};
///
/// // RFC 4226 appendix D test secret: ASCII "12345678901234567890"
/// let secret = Secret::from_base32("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ").unwrap();
/// let hotp = Hotp::new(&secret).unwrap();
///
/// assert_eq!(hotp.at(0), 755224);
/// assert_eq!(hotp.at(1), 287082);
/// ```
#[derive(Debug, Clone)]
pub struct Hotp {
    key: Vec<u8>,
    modulus: u32,
}

impl Hotp {
    /// Creates a generator with the default 6-digit code space.
    ///
    /// Fails if the secret is not decodable base32.
    pub fn new(secret: &Secret) -> Result<Self, ConfigError> {
        Self::with_digits(secret, DEFAULT_DIGITS)
    }

    /// Creates a generator producing `digits`-wide codes (1 to 9).
    pub fn with_digits(secret: &Secret, digits: u32) -> Result<Self, ConfigError> {
        if digits == 0 || digits > MAX_DIGITS {
            return Err(ConfigError::new(format!(
                "digits must be between 1 and {MAX_DIGITS}, got {digits}"
            )));
        }
        Ok(Self {
            key: secret.key_bytes()?,
            modulus: 10u32.pow(digits),
        })
    }

    /// Code for counter position `counter`, in `[0, 10^digits)`.
    ///
    /// Deterministic; the same `(secret, counter)` always yields the same
    /// code.
    #[inline]
    pub fn at(&self, counter: u64) -> u32 {
        // HMAC-SHA1 accepts keys of any length, so construction cannot fail.
        let mut mac =
            HmacSha1::new_from_slice(&self.key).expect("HMAC-SHA1 accepts any key length");
        mac.update(&counter.to_be_bytes());
        let digest = mac.finalize().into_bytes();

        // RFC 4226 §5.3 dynamic truncation: the low nibble of the last byte
        // picks a 4-byte window, read big-endian with the sign bit cleared.
        let offset = (digest[digest.len() - 1] & 0xf) as usize;
        let binary = ((digest[offset] as u32 & 0x7f) << 24)
            | ((digest[offset + 1] as u32) << 16)
            | ((digest[offset + 2] as u32) << 8)
            | (digest[offset + 3] as u32);

        binary % self.modulus
    }
}

// ---------------------------------------------------------------------------
// Totp
// ---------------------------------------------------------------------------

/// Time-based OTP generator (RFC 6238): a HOTP core driven by elapsed
/// seconds divided into fixed windows.
///
/// # Example
///
/// ```
/// use otpwalk::otp::{Hotp, Secret, Totp};
///
/// let secret = Secret::from_base32("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ").unwrap();
/// let totp = Totp::new(&secret, 30).unwrap();
/// let hotp = Hotp::new(&secret).unwrap();
///
/// // Seconds 30..59 all fall in window 1
/// assert_eq!(totp.at(30), hotp.at(1));
/// assert_eq!(totp.at(59), hotp.at(1));
/// ```
#[derive(Debug, Clone)]
pub struct Totp {
    hotp: Hotp,
    interval: u64,
}

impl Totp {
    /// Creates a generator with the given window length in seconds.
    pub fn new(secret: &Secret, interval: u64) -> Result<Self, ConfigError> {
        if interval == 0 {
            return Err(ConfigError::new("totp interval must be at least 1 second"));
        }
        Ok(Self {
            hotp: Hotp::new(secret)?,
            interval,
        })
    }

    /// Seconds per code window.
    #[inline]
    pub fn interval(&self) -> u64 {
        self.interval
    }

    /// Code for the window containing second `seconds`.
    #[inline]
    pub fn at(&self, seconds: u64) -> u32 {
        self.hotp.at(seconds / self.interval)
    }
}

// ---------------------------------------------------------------------------
// CodeGenerator
// ---------------------------------------------------------------------------

/// Counter-advance policy selected once at configuration time.
///
/// Either variant satisfies the same contract: a pure
/// `counter → code in [0, 10^digits)` function. The only difference the
/// walk driver cares about is [`stride`](Self::stride), used to normalize
/// gaps into step units.
#[derive(Debug, Clone)]
pub enum CodeGenerator {
    /// Fixed-step policy: stride 1, counter passed through.
    Hotp(Hotp),
    /// Time-like policy: stride [`TOTP_INTERVAL`], counter in seconds.
    Totp(Totp),
}

impl CodeGenerator {
    /// Builds the generator for a configured mode.
    pub fn for_mode(mode: OtpMode, secret: &Secret) -> Result<Self, ConfigError> {
        match mode {
            OtpMode::Hotp => Ok(Self::Hotp(Hotp::new(secret)?)),
            OtpMode::Totp => Ok(Self::Totp(Totp::new(secret, TOTP_INTERVAL)?)),
        }
    }

    /// Counter units consumed per sequence step.
    #[inline]
    pub fn stride(&self) -> u64 {
        match self {
            Self::Hotp(_) => 1,
            Self::Totp(totp) => totp.interval(),
        }
    }

    /// Code for raw counter position `counter`.
    #[inline]
    pub fn code_at(&self, counter: u64) -> u32 {
        match self {
            Self::Hotp(hotp) => hotp.at(counter),
            Self::Totp(totp) => totp.at(counter),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
