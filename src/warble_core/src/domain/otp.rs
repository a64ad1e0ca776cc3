use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OtpCodeError {
    #[error("verification code must not be empty")]
    Empty,
}

/// One-time code the user copies from the reset email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl TryFrom<String> for OtpCode {
    type Error = OtpCodeError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(OtpCodeError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl OtpCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_whitespace_codes() {
        assert_eq!(OtpCode::try_from(String::new()).unwrap_err(), OtpCodeError::Empty);
        assert_eq!(
            OtpCode::try_from("   ".to_string()).unwrap_err(),
            OtpCodeError::Empty
        );
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let code = OtpCode::try_from(" 493021 ".to_string()).unwrap();
        assert_eq!(code.as_str(), "493021");
    }
}
