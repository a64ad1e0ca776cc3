use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResetTokenError {
    #[error("reset token must not be empty")]
    Empty,
}

/// Opaque single-use credential issued by the verify-OTP call and consumed by
/// the reset-password call.
#[derive(Debug, Clone)]
pub struct ResetToken(Secret<String>);

impl TryFrom<Secret<String>> for ResetToken {
    type Error = ResetTokenError;

    fn try_from(raw: Secret<String>) -> Result<Self, Self::Error> {
        if raw.expose_secret().is_empty() {
            return Err(ResetTokenError::Empty);
        }
        Ok(Self(raw))
    }
}

impl AsRef<Secret<String>> for ResetToken {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}
