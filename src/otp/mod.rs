pub mod generator;
pub mod secret;

pub use generator::{CodeGenerator, DEFAULT_DIGITS, Hotp, Totp};
pub use secret::Secret;
