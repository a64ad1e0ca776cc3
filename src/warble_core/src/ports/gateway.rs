use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    identifier::Identifier, otp::OtpCode, password::Password, reset_token::ResetToken,
    session::AuthSession,
};

// AuthGateway port trait and errors
#[derive(Debug, Error)]
pub enum AuthGatewayError {
    /// Normalized server/transport failure, already user-displayable.
    #[error("{0}")]
    Api(String),
    /// The server rejected the stored credential; the caller must return the
    /// user to the unauthenticated entry screen.
    #[error("Session expired")]
    SessionExpired,
}

impl PartialEq for AuthGatewayError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Api(_), Self::Api(_)) => true,
            (Self::SessionExpired, Self::SessionExpired) => true,
            _ => false,
        }
    }
}

/// Outcome of the verify-OTP call.
#[derive(Debug, Clone)]
pub struct CodeVerification {
    pub is_valid: bool,
    pub reset_token: Option<ResetToken>,
}

/// Remote auth service facade. One method per REST call; every transport
/// error arrives normalized as [`AuthGatewayError::Api`]. Single attempt per
/// call - retrying is the user's job, not the gateway's.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// `POST /auth/check-identifier`: whether an account exists for the
    /// identifier.
    async fn identifier_exists(&self, identifier: &Identifier) -> Result<bool, AuthGatewayError>;

    /// `POST /auth/login`: exchange credentials for a session.
    async fn login(
        &self,
        identifier: &Identifier,
        password: &Password,
    ) -> Result<AuthSession, AuthGatewayError>;

    /// `POST /auth/signup`: register an account and receive a session.
    async fn sign_up(
        &self,
        identifier: &Identifier,
        username: &str,
        password: &Password,
    ) -> Result<AuthSession, AuthGatewayError>;

    /// `POST /auth/forget-password`: ask the server to send a reset code.
    /// `true` when the code email went out.
    async fn request_reset_code(
        &self,
        identifier: &Identifier,
    ) -> Result<bool, AuthGatewayError>;

    /// `POST /auth/password/verify-otp`: trade a code for a reset token.
    async fn verify_reset_code(
        &self,
        identifier: &Identifier,
        code: &OtpCode,
    ) -> Result<CodeVerification, AuthGatewayError>;

    /// `POST /auth/reset-password`: set the new password. `true` only when
    /// the server acknowledged with its fixed success message.
    async fn reset_password(
        &self,
        reset_token: &ResetToken,
        new_password: &Password,
        identifier: &Identifier,
    ) -> Result<bool, AuthGatewayError>;
}
