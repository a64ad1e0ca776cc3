use std::sync::Arc;

use secrecy::Secret;
use warble_core::{
    AuthGateway, AuthGatewayError, Identifier, IdentifierClassifier, IdentifierKind,
    MIN_PASSWORD_LENGTH, OtpCode, Password, ResetToken,
};

/// Step positions of the password-reset flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForgotPasswordStep {
    FindAccount,
    VerifyCode,
    ResetPassword,
    Done,
}

impl ForgotPasswordStep {
    /// 1-based position, as rendered in the step indicator.
    pub fn position(self) -> u8 {
        match self {
            ForgotPasswordStep::FindAccount => 1,
            ForgotPasswordStep::VerifyCode => 2,
            ForgotPasswordStep::ResetPassword => 3,
            ForgotPasswordStep::Done => 4,
        }
    }
}

/// What pressing "Next" achieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForgotPasswordAdvance {
    /// The reset code went out; now on the verify-code step.
    CodeSent,
    /// The code checked out; now on the new-password step.
    CodeVerified,
    /// The server acknowledged the reset; the flow is complete.
    PasswordReset,
}

/// Error types for the password-reset flow
#[derive(Debug, thiserror::Error)]
pub enum ForgotPasswordError {
    #[error("Next is not available for the current input")]
    NotReady,
    #[error("We could not send a reset code to that account")]
    CodeNotSent,
    #[error("Invalid verification code")]
    InvalidCode,
    #[error("Password reset failed")]
    ResetRejected,
    #[error("the flow is already complete")]
    Completed,
    #[error("{0}")]
    Gateway(#[from] AuthGatewayError),
}

/// Observable flow state: step, field values and the per-step "Next" gate.
#[derive(Debug, Clone)]
pub struct ForgotPasswordFlowState {
    pub step: ForgotPasswordStep,
    pub identifier: String,
    pub identifier_kind: IdentifierKind,
    pub code: String,
    pub password: String,
    pub confirm_password: String,
    pub password_visible: bool,
    pub confirm_visible: bool,
    pub next_enabled: bool,
}

impl Default for ForgotPasswordFlowState {
    fn default() -> Self {
        Self {
            step: ForgotPasswordStep::FindAccount,
            identifier: String::new(),
            identifier_kind: IdentifierKind::Invalid,
            code: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            password_visible: false,
            confirm_visible: false,
            next_enabled: false,
        }
    }
}

/// Four-step password-reset controller: find the account, verify the emailed
/// code, set the new password, acknowledge.
///
/// Each of steps 1-3 gates "Next" on its own validator and performs exactly
/// one remote call per press; any failure keeps the flow on the current step.
/// "Back" decrements and is disabled on the first step.
pub struct ForgotPasswordFlow<G>
where
    G: AuthGateway,
{
    gateway: G,
    classifier: Arc<IdentifierClassifier>,
    state: ForgotPasswordFlowState,
    reset_token: Option<ResetToken>,
}

impl<G> ForgotPasswordFlow<G>
where
    G: AuthGateway,
{
    pub fn new(gateway: G, classifier: Arc<IdentifierClassifier>) -> Self {
        Self {
            gateway,
            classifier,
            state: ForgotPasswordFlowState::default(),
            reset_token: None,
        }
    }

    pub fn state(&self) -> &ForgotPasswordFlowState {
        &self.state
    }

    pub fn set_identifier(&mut self, input: &str) {
        self.state.identifier = input.to_string();
        self.state.identifier_kind = self.classifier.classify(input);
        self.refresh_gate();
    }

    pub fn set_code(&mut self, input: &str) {
        self.state.code = input.to_string();
        self.refresh_gate();
    }

    pub fn set_password(&mut self, input: &str) {
        self.state.password = input.to_string();
        self.refresh_gate();
    }

    pub fn set_confirm_password(&mut self, input: &str) {
        self.state.confirm_password = input.to_string();
        self.refresh_gate();
    }

    pub fn toggle_password_visibility(&mut self) {
        self.state.password_visible = !self.state.password_visible;
    }

    pub fn toggle_confirm_visibility(&mut self) {
        self.state.confirm_visible = !self.state.confirm_visible;
    }

    fn refresh_gate(&mut self) {
        self.state.next_enabled = match self.state.step {
            ForgotPasswordStep::FindAccount => self.state.identifier_kind.is_valid(),
            ForgotPasswordStep::VerifyCode => !self.state.code.trim().is_empty(),
            ForgotPasswordStep::ResetPassword => {
                self.state.password.chars().count() >= MIN_PASSWORD_LENGTH
                    && self.state.password == self.state.confirm_password
            }
            ForgotPasswordStep::Done => false,
        };
    }

    /// Advance the flow. Dispatches the current step's remote call; any
    /// error keeps the flow where it is.
    #[tracing::instrument(name = "ForgotPasswordFlow::next", skip(self))]
    pub async fn next(&mut self) -> Result<ForgotPasswordAdvance, ForgotPasswordError> {
        if self.state.step == ForgotPasswordStep::Done {
            return Err(ForgotPasswordError::Completed);
        }
        if !self.state.next_enabled {
            return Err(ForgotPasswordError::NotReady);
        }

        match self.state.step {
            ForgotPasswordStep::FindAccount => self.request_code().await,
            ForgotPasswordStep::VerifyCode => self.verify_code().await,
            ForgotPasswordStep::ResetPassword => self.reset_password().await,
            ForgotPasswordStep::Done => Err(ForgotPasswordError::Completed),
        }
    }

    async fn request_code(&mut self) -> Result<ForgotPasswordAdvance, ForgotPasswordError> {
        let identifier = self.identifier()?;

        if self.gateway.request_reset_code(&identifier).await? {
            self.advance_to(ForgotPasswordStep::VerifyCode);
            Ok(ForgotPasswordAdvance::CodeSent)
        } else {
            Err(ForgotPasswordError::CodeNotSent)
        }
    }

    async fn verify_code(&mut self) -> Result<ForgotPasswordAdvance, ForgotPasswordError> {
        let identifier = self.identifier()?;
        let code = OtpCode::try_from(self.state.code.clone())
            .map_err(|_| ForgotPasswordError::NotReady)?;

        let verification = self.gateway.verify_reset_code(&identifier, &code).await?;
        match verification.reset_token {
            Some(token) if verification.is_valid => {
                self.reset_token = Some(token);
                self.advance_to(ForgotPasswordStep::ResetPassword);
                Ok(ForgotPasswordAdvance::CodeVerified)
            }
            _ => Err(ForgotPasswordError::InvalidCode),
        }
    }

    async fn reset_password(&mut self) -> Result<ForgotPasswordAdvance, ForgotPasswordError> {
        let identifier = self.identifier()?;
        let password = Password::try_from(Secret::from(self.state.password.clone()))
            .map_err(|_| ForgotPasswordError::NotReady)?;
        // The gate only opens once the verify step stored a token.
        let Some(token) = self.reset_token.clone() else {
            return Err(ForgotPasswordError::NotReady);
        };

        if self
            .gateway
            .reset_password(&token, &password, &identifier)
            .await?
        {
            self.advance_to(ForgotPasswordStep::Done);
            Ok(ForgotPasswordAdvance::PasswordReset)
        } else {
            Err(ForgotPasswordError::ResetRejected)
        }
    }

    fn identifier(&self) -> Result<Identifier, ForgotPasswordError> {
        Identifier::classify(&self.classifier, &self.state.identifier)
            .map_err(|_| ForgotPasswordError::NotReady)
    }

    fn advance_to(&mut self, step: ForgotPasswordStep) {
        self.state.step = step;
        self.refresh_gate();
    }

    /// Step back. Disabled on the first step and after completion; returns
    /// whether the step changed.
    pub fn back(&mut self) -> bool {
        let previous = match self.state.step {
            ForgotPasswordStep::FindAccount | ForgotPasswordStep::Done => return false,
            ForgotPasswordStep::VerifyCode => ForgotPasswordStep::FindAccount,
            ForgotPasswordStep::ResetPassword => ForgotPasswordStep::VerifyCode,
        };
        self.state.step = previous;
        self.refresh_gate();
        true
    }

    pub fn reset(&mut self) {
        self.state = ForgotPasswordFlowState::default();
        self.reset_token = None;
    }
}
