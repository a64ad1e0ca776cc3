use async_trait::async_trait;
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use warble_core::{
    AccessToken, AuthGateway, AuthGatewayError, AuthSession, CodeVerification, Identifier,
    OtpCode, Password, ResetToken, UserProfile,
};

use super::error::{error_from_response, error_from_transport};

const CHECK_IDENTIFIER_PATH: &str = "auth/check-identifier";
const LOGIN_PATH: &str = "auth/login";
const SIGNUP_PATH: &str = "auth/signup";
const FORGET_PASSWORD_PATH: &str = "auth/forget-password";
const VERIFY_OTP_PATH: &str = "auth/password/verify-otp";
const RESET_PASSWORD_PATH: &str = "auth/reset-password";

// The server acknowledges a reset with this exact literal; anything else is
// treated as a failure.
const RESET_SUCCESS_MESSAGE: &str = "Password reset successfully";

/// Reqwest-backed [`AuthGateway`]. Pure translation: one request per call,
/// DTO mapping in both directions, errors normalized to displayable strings.
#[derive(Debug, Clone)]
pub struct RestAuthGateway {
    http_client: Client,
    base_url: Url,
}

impl RestAuthGateway {
    /// `base_url` should end with a trailing slash so endpoint paths join
    /// underneath it.
    pub fn new(base_url: Url, http_client: Client) -> Self {
        Self {
            http_client,
            base_url,
        }
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, AuthGatewayError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| AuthGatewayError::Api(e.to_string()))?;

        let response = self
            .http_client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(error_from_transport)?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        response.json::<T>().await.map_err(error_from_transport)
    }
}

#[async_trait]
impl AuthGateway for RestAuthGateway {
    #[tracing::instrument(name = "Checking identifier", skip_all)]
    async fn identifier_exists(&self, identifier: &Identifier) -> Result<bool, AuthGatewayError> {
        let response: Envelope<bool> = self
            .post(
                CHECK_IDENTIFIER_PATH,
                &IdentifierRequest {
                    identifier: identifier.as_str(),
                },
            )
            .await?;
        Ok(response.data)
    }

    #[tracing::instrument(name = "Logging in", skip_all)]
    async fn login(
        &self,
        identifier: &Identifier,
        password: &Password,
    ) -> Result<AuthSession, AuthGatewayError> {
        let response: Envelope<SessionPayload> = self
            .post(
                LOGIN_PATH,
                &LoginRequest {
                    identifier: identifier.as_str(),
                    kind: identifier.wire_kind(),
                    password: password.as_ref().expose_secret(),
                },
            )
            .await?;
        Ok(response.data.into_session())
    }

    #[tracing::instrument(name = "Signing up", skip_all)]
    async fn sign_up(
        &self,
        identifier: &Identifier,
        username: &str,
        password: &Password,
    ) -> Result<AuthSession, AuthGatewayError> {
        let response: Envelope<SessionPayload> = self
            .post(
                SIGNUP_PATH,
                &SignupRequest {
                    identifier: identifier.as_str(),
                    kind: identifier.wire_kind(),
                    username,
                    password: password.as_ref().expose_secret(),
                },
            )
            .await?;
        Ok(response.data.into_session())
    }

    #[tracing::instrument(name = "Requesting reset code", skip_all)]
    async fn request_reset_code(
        &self,
        identifier: &Identifier,
    ) -> Result<bool, AuthGatewayError> {
        let response: Envelope<ForgetPasswordPayload> = self
            .post(
                FORGET_PASSWORD_PATH,
                &IdentifierRequest {
                    identifier: identifier.as_str(),
                },
            )
            .await?;
        Ok(response.data.is_email_sent)
    }

    #[tracing::instrument(name = "Verifying reset code", skip_all)]
    async fn verify_reset_code(
        &self,
        identifier: &Identifier,
        code: &OtpCode,
    ) -> Result<CodeVerification, AuthGatewayError> {
        let response: Envelope<VerifyOtpPayload> = self
            .post(
                VERIFY_OTP_PATH,
                &VerifyOtpRequest {
                    identifier: identifier.as_str(),
                    token: code.as_str(),
                },
            )
            .await?;

        Ok(CodeVerification {
            is_valid: response.data.is_valid,
            reset_token: response
                .data
                .reset_token
                .and_then(|raw| ResetToken::try_from(Secret::from(raw)).ok()),
        })
    }

    #[tracing::instrument(name = "Resetting password", skip_all)]
    async fn reset_password(
        &self,
        reset_token: &ResetToken,
        new_password: &Password,
        identifier: &Identifier,
    ) -> Result<bool, AuthGatewayError> {
        // Not enveloped: the endpoint answers with a bare message object.
        let response: MessageResponse = self
            .post(
                RESET_PASSWORD_PATH,
                &ResetPasswordRequest {
                    reset_token: reset_token.as_ref().expose_secret(),
                    new_password: new_password.as_ref().expose_secret(),
                    identifier: identifier.as_str(),
                },
            )
            .await?;
        Ok(response.message == RESET_SUCCESS_MESSAGE)
    }
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Serialize)]
struct IdentifierRequest<'a> {
    identifier: &'a str,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    identifier: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct SignupRequest<'a> {
    identifier: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct SessionPayload {
    access_token: String,
    user: Option<UserProfile>,
}

impl SessionPayload {
    fn into_session(self) -> AuthSession {
        AuthSession::new(self.user, AccessToken::new(self.access_token))
    }
}

#[derive(Debug, Deserialize)]
struct ForgetPasswordPayload {
    #[serde(rename = "isEmailSent")]
    is_email_sent: bool,
}

#[derive(Debug, Serialize)]
struct VerifyOtpRequest<'a> {
    identifier: &'a str,
    token: &'a str,
}

#[derive(Debug, Deserialize)]
struct VerifyOtpPayload {
    #[serde(rename = "isValid")]
    is_valid: bool,
    #[serde(rename = "resetToken")]
    reset_token: Option<String>,
}

#[derive(Debug, Serialize)]
struct ResetPasswordRequest<'a> {
    reset_token: &'a str,
    new_password: &'a str,
    identifier: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    message: String,
}
