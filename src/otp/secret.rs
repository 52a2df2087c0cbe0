//! Shared secrets for OTP generation.
//!
//! A [`Secret`] is the base32-encoded symmetric key a notional client and
//! server would agree on. One is generated per run, owned by the driver and
//! handed to the code generator by reference; the duplicate tracker never
//! sees it.

use std::fmt;

use rand::Rng;

use crate::error::ConfigError;

/// RFC 4648 base32 alphabet, the encoding authenticator apps expect.
const BASE32_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Base32-encoded OTP secret.
///
/// # Example
///
/// ```
/// use otpwalk::otp::Secret;
///
/// let secret = Secret::random();
/// assert_eq!(secret.as_str().len(), Secret::LENGTH);
///
/// let fixed = Secret::from_base32("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ").unwrap();
/// assert_eq!(fixed.as_str(), "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Length in base32 characters of a generated secret (160 bits).
    pub const LENGTH: usize = 32;

    /// Generates a fresh random secret from the thread RNG.
    pub fn random() -> Self {
        Self::random_with(&mut rand::thread_rng())
    }

    /// Generates a fresh random secret from the given RNG.
    ///
    /// # Example
    ///
    /// ```
    /// use otpwalk::otp::Secret;
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    ///
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let a = Secret::random_with(&mut rng);
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let b = Secret::random_with(&mut rng);
    /// assert_eq!(a, b);
    /// ```
    pub fn random_with<R: Rng>(rng: &mut R) -> Self {
        let encoded: String = (0..Self::LENGTH)
            .map(|_| BASE32_ALPHABET[rng.gen_range(0..BASE32_ALPHABET.len())] as char)
            .collect();
        Self(encoded)
    }

    /// Wraps an existing base32 string, validating that it decodes.
    pub fn from_base32(encoded: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = Self(encoded.into());
        secret.key_bytes()?;
        Ok(secret)
    }

    /// The base32 text form, as shown in reports.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decoded key material for the HMAC core.
    ///
    /// Padding is not required, matching how authenticator secrets are
    /// usually exchanged.
    pub(crate) fn key_bytes(&self) -> Result<Vec<u8>, ConfigError> {
        base32::decode(base32::Alphabet::Rfc4648 { padding: false }, &self.0)
            .ok_or_else(|| ConfigError::new(format!("secret '{}' is not valid base32", self.0)))
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
