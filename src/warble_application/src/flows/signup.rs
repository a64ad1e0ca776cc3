use std::sync::Arc;

use secrecy::Secret;
use warble_core::{
    AuthGateway, AuthGatewayError, AuthSession, CredentialStore, CredentialStoreError, Identifier,
    IdentifierClassifier, IdentifierKind, MIN_PASSWORD_LENGTH, Password, SessionHandle,
    is_valid_username,
};

/// Step positions of the sign-up flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupStep {
    IdentifyAccount,
    ChooseCredentials,
    Done,
}

/// What pressing "Next" achieved.
#[derive(Debug)]
pub enum SignupAdvance {
    /// The identifier is free; now on the credentials step.
    CredentialsStep,
    /// The account was created and a session established.
    SessionEstablished(AuthSession),
}

/// Error types for the sign-up flow
#[derive(Debug, thiserror::Error)]
pub enum SignupFlowError {
    #[error("Next is not available for the current input")]
    NotReady,
    #[error("An account with this identifier already exists")]
    IdentifierTaken,
    #[error("Please check your details")]
    InvalidDetails,
    #[error("{0}")]
    Gateway(#[from] AuthGatewayError),
    #[error("failed to persist session token: {0}")]
    Credentials(#[from] CredentialStoreError),
}

/// Observable flow state.
#[derive(Debug, Clone)]
pub struct SignupFlowState {
    pub step: SignupStep,
    pub identifier: String,
    pub identifier_kind: IdentifierKind,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub password_visible: bool,
    pub confirm_visible: bool,
    pub next_enabled: bool,
}

impl Default for SignupFlowState {
    fn default() -> Self {
        Self {
            step: SignupStep::IdentifyAccount,
            identifier: String::new(),
            identifier_kind: IdentifierKind::Invalid,
            username: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            password_visible: false,
            confirm_visible: false,
            next_enabled: false,
        }
    }
}

/// Two-step sign-up controller: claim an identifier, then choose a handle
/// and password. Mirrors the login flow's shape, with the existence check
/// inverted - a taken identifier blocks the advance.
pub struct SignupFlow<G, S>
where
    G: AuthGateway,
    S: CredentialStore,
{
    gateway: G,
    credentials: S,
    session: SessionHandle,
    classifier: Arc<IdentifierClassifier>,
    state: SignupFlowState,
}

impl<G, S> SignupFlow<G, S>
where
    G: AuthGateway,
    S: CredentialStore,
{
    pub fn new(
        gateway: G,
        credentials: S,
        session: SessionHandle,
        classifier: Arc<IdentifierClassifier>,
    ) -> Self {
        Self {
            gateway,
            credentials,
            session,
            classifier,
            state: SignupFlowState::default(),
        }
    }

    pub fn state(&self) -> &SignupFlowState {
        &self.state
    }

    pub fn set_identifier(&mut self, input: &str) {
        self.state.identifier = input.to_string();
        self.state.identifier_kind = self.classifier.classify(input);
        self.refresh_gate();
    }

    pub fn set_username(&mut self, input: &str) {
        self.state.username = input.to_string();
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
            SignupStep::IdentifyAccount => self.state.identifier_kind.is_valid(),
            SignupStep::ChooseCredentials => {
                is_valid_username(&self.state.username)
                    && self.state.password.chars().count() >= MIN_PASSWORD_LENGTH
                    && self.state.password == self.state.confirm_password
            }
            SignupStep::Done => false,
        };
    }

    /// Advance the flow. Dispatches the current step's remote call; any
    /// error keeps the flow where it is.
    #[tracing::instrument(name = "SignupFlow::next", skip(self))]
    pub async fn next(&mut self) -> Result<SignupAdvance, SignupFlowError> {
        if !self.state.next_enabled {
            return Err(SignupFlowError::NotReady);
        }

        match self.state.step {
            SignupStep::IdentifyAccount => self.claim_identifier().await,
            SignupStep::ChooseCredentials => self.register().await,
            SignupStep::Done => Err(SignupFlowError::NotReady),
        }
    }

    async fn claim_identifier(&mut self) -> Result<SignupAdvance, SignupFlowError> {
        let identifier = Identifier::classify(&self.classifier, &self.state.identifier)
            .map_err(|_| SignupFlowError::NotReady)?;

        if self.gateway.identifier_exists(&identifier).await? {
            Err(SignupFlowError::IdentifierTaken)
        } else {
            self.state.step = SignupStep::ChooseCredentials;
            self.refresh_gate();
            Ok(SignupAdvance::CredentialsStep)
        }
    }

    async fn register(&mut self) -> Result<SignupAdvance, SignupFlowError> {
        let identifier = Identifier::classify(&self.classifier, &self.state.identifier)
            .map_err(|_| SignupFlowError::InvalidDetails)?;
        let password = Password::try_from(Secret::from(self.state.password.clone()))
            .map_err(|_| SignupFlowError::InvalidDetails)?;

        let session = self
            .gateway
            .sign_up(&identifier, self.state.username.trim(), &password)
            .await?;

        self.credentials.store_token(session.token()).await?;
        self.session.establish(session.clone());
        self.state.step = SignupStep::Done;
        self.state.next_enabled = false;

        Ok(SignupAdvance::SessionEstablished(session))
    }

    /// Step back. On the credentials step this discards both password
    /// fields; disabled on the first step and after completion.
    pub fn back(&mut self) -> bool {
        match self.state.step {
            SignupStep::ChooseCredentials => {
                self.state.step = SignupStep::IdentifyAccount;
                self.state.password.clear();
                self.state.confirm_password.clear();
                self.refresh_gate();
                true
            }
            SignupStep::IdentifyAccount | SignupStep::Done => false,
        }
    }

    pub fn reset(&mut self) {
        self.state = SignupFlowState::default();
    }
}
