pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    identifier::{
        Identifier, IdentifierClassifier, IdentifierError, IdentifierKind, is_valid_username,
    },
    otp::{OtpCode, OtpCodeError},
    password::{MIN_PASSWORD_LENGTH, Password, PasswordError},
    phone::{LineType, NumberingPlan, PhoneNumber, PhoneParseError, Region, RegionParseError},
    reset_token::{ResetToken, ResetTokenError},
    session::{AccessToken, AuthSession, SessionHandle},
    user::UserProfile,
};

pub use ports::{
    credentials::{CredentialStore, CredentialStoreError},
    gateway::{AuthGateway, AuthGatewayError, CodeVerification},
};
