use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("password must be at least {MIN_PASSWORD_LENGTH} characters")]
    TooShort,
}

/// A password that satisfies the minimum-length rule. The raw value stays
/// wrapped in [`Secret`] so it never lands in logs or debug output.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl TryFrom<Secret<String>> for Password {
    type Error = PasswordError;

    fn try_from(raw: Secret<String>) -> Result<Self, Self::Error> {
        if raw.expose_secret().chars().count() < MIN_PASSWORD_LENGTH {
            return Err(PasswordError::TooShort);
        }
        Ok(Self(raw))
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl Password {
    pub fn matches(&self, other: &Password) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_passwords() {
        assert_eq!(
            Password::try_from(Secret::from("short".to_string())).unwrap_err(),
            PasswordError::TooShort
        );
        assert_eq!(
            Password::try_from(Secret::from("1234567".to_string())).unwrap_err(),
            PasswordError::TooShort
        );
    }

    #[test]
    fn accepts_minimum_length() {
        assert!(Password::try_from(Secret::from("12345678".to_string())).is_ok());
        assert!(Password::try_from(Secret::from("password123".to_string())).is_ok());
    }

    #[test]
    fn length_is_counted_in_characters_not_bytes() {
        assert!(Password::try_from(Secret::from("pässwörd".to_string())).is_ok());
    }

    #[test]
    fn matches_compares_exposed_values() {
        let a = Password::try_from(Secret::from("password123".to_string())).unwrap();
        let b = Password::try_from(Secret::from("password123".to_string())).unwrap();
        let c = Password::try_from(Secret::from("different1".to_string())).unwrap();
        assert!(a.matches(&b));
        assert!(!a.matches(&c));
    }
}
