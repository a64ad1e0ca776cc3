use std::sync::Arc;

use secrecy::Secret;
use warble_core::{
    AuthGateway, AuthGatewayError, AuthSession, CredentialStore, CredentialStoreError, Identifier,
    IdentifierClassifier, IdentifierKind, MIN_PASSWORD_LENGTH, Password, SessionHandle,
};

/// Step positions of the login flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStep {
    IdentifyUser,
    Password,
}

/// What pressing "Next" achieved.
#[derive(Debug)]
pub enum LoginAdvance {
    /// The identifier exists; the flow moved to the password step.
    PasswordStep,
    /// Credentials accepted; the session is established and the flow is done.
    SessionEstablished(AuthSession),
}

/// What pressing "Back" achieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginRetreat {
    /// Returned to the identifier step; password input was discarded.
    IdentifyStep,
    /// "Back" on the first step leaves the flow; navigation is the caller's
    /// job.
    Cancelled,
}

/// Error types for the login flow
#[derive(Debug, thiserror::Error)]
pub enum LoginFlowError {
    #[error("Next is not available for the current input")]
    NotReady,
    #[error("User Not Found")]
    UserNotFound,
    #[error("Please check your credentials")]
    InvalidCredentials,
    #[error("{0}")]
    Gateway(#[from] AuthGatewayError),
    #[error("failed to persist session token: {0}")]
    Credentials(#[from] CredentialStoreError),
}

/// Observable flow state: current step, field values and the "Next" gate.
#[derive(Debug, Clone)]
pub struct LoginFlowState {
    pub step: LoginStep,
    pub identifier: String,
    pub identifier_kind: IdentifierKind,
    pub password: String,
    pub password_visible: bool,
    pub next_enabled: bool,
}

impl Default for LoginFlowState {
    fn default() -> Self {
        Self {
            step: LoginStep::IdentifyUser,
            identifier: String::new(),
            identifier_kind: IdentifierKind::Invalid,
            password: String::new(),
            password_visible: false,
            next_enabled: false,
        }
    }
}

/// Two-step login controller: identify the account, then authenticate.
///
/// Owns its state explicitly; the screen binds field edits to the setters and
/// renders from [`LoginFlow::state`]. One remote call per "Next" press, no
/// automatic retry - a failure leaves the flow on the current step.
pub struct LoginFlow<G, S>
where
    G: AuthGateway,
    S: CredentialStore,
{
    gateway: G,
    credentials: S,
    session: SessionHandle,
    classifier: Arc<IdentifierClassifier>,
    state: LoginFlowState,
}

impl<G, S> LoginFlow<G, S>
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
            state: LoginFlowState::default(),
        }
    }

    pub fn state(&self) -> &LoginFlowState {
        &self.state
    }

    /// Record an identifier keystroke: reclassify and recompute the gate.
    pub fn set_identifier(&mut self, input: &str) {
        self.state.identifier = input.to_string();
        self.state.identifier_kind = self.classifier.classify(input);
        if self.state.step == LoginStep::IdentifyUser {
            self.state.next_enabled = self.state.identifier_kind.is_valid();
        }
    }

    pub fn set_password(&mut self, input: &str) {
        self.state.password = input.to_string();
        if self.state.step == LoginStep::Password {
            self.state.next_enabled = input.chars().count() >= MIN_PASSWORD_LENGTH;
        }
    }

    pub fn toggle_password_visibility(&mut self) {
        self.state.password_visible = !self.state.password_visible;
    }

    /// Advance the flow. Dispatches the current step's remote call; any
    /// error keeps the flow where it is.
    #[tracing::instrument(name = "LoginFlow::next", skip(self))]
    pub async fn next(&mut self) -> Result<LoginAdvance, LoginFlowError> {
        if !self.state.next_enabled {
            return Err(LoginFlowError::NotReady);
        }

        match self.state.step {
            LoginStep::IdentifyUser => self.check_identifier().await,
            LoginStep::Password => self.login().await,
        }
    }

    async fn check_identifier(&mut self) -> Result<LoginAdvance, LoginFlowError> {
        let identifier = Identifier::classify(&self.classifier, &self.state.identifier)
            .map_err(|_| LoginFlowError::NotReady)?;

        if self.gateway.identifier_exists(&identifier).await? {
            self.state.step = LoginStep::Password;
            self.state.next_enabled = false;
            Ok(LoginAdvance::PasswordStep)
        } else {
            Err(LoginFlowError::UserNotFound)
        }
    }

    async fn login(&mut self) -> Result<LoginAdvance, LoginFlowError> {
        // Payload shape check before the wire call.
        let identifier = Identifier::classify(&self.classifier, &self.state.identifier)
            .map_err(|_| LoginFlowError::InvalidCredentials)?;
        let password = Password::try_from(Secret::from(self.state.password.clone()))
            .map_err(|_| LoginFlowError::InvalidCredentials)?;

        let session = self.gateway.login(&identifier, &password).await?;

        self.credentials.store_token(session.token()).await?;
        self.session.establish(session.clone());

        Ok(LoginAdvance::SessionEstablished(session))
    }

    /// Step back. On the password step this discards the password and
    /// recomputes the gate from the retained identifier.
    pub fn back(&mut self) -> LoginRetreat {
        match self.state.step {
            LoginStep::Password => {
                self.state.step = LoginStep::IdentifyUser;
                self.state.password.clear();
                self.state.next_enabled = self.state.identifier_kind.is_valid();
                LoginRetreat::IdentifyStep
            }
            LoginStep::IdentifyUser => LoginRetreat::Cancelled,
        }
    }

    pub fn reset(&mut self) {
        self.state = LoginFlowState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use secrecy::ExposeSecret;
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use warble_core::{
        AccessToken, CodeVerification, NumberingPlan, OtpCode, Region, ResetToken,
    };

    // Mock implementations for testing
    #[derive(Clone, Default)]
    struct MockGateway {
        exists: Option<bool>,
        login_error: Option<String>,
    }

    #[async_trait]
    impl AuthGateway for MockGateway {
        async fn identifier_exists(
            &self,
            _identifier: &Identifier,
        ) -> Result<bool, AuthGatewayError> {
            match self.exists {
                Some(exists) => Ok(exists),
                None => Err(AuthGatewayError::Api("Something went wrong".to_string())),
            }
        }

        async fn login(
            &self,
            _identifier: &Identifier,
            _password: &Password,
        ) -> Result<AuthSession, AuthGatewayError> {
            match &self.login_error {
                Some(message) => Err(AuthGatewayError::Api(message.clone())),
                None => Ok(AuthSession::new(None, AccessToken::new("tok-login"))),
            }
        }

        async fn sign_up(
            &self,
            _identifier: &Identifier,
            _username: &str,
            _password: &Password,
        ) -> Result<AuthSession, AuthGatewayError> {
            unimplemented!()
        }

        async fn request_reset_code(
            &self,
            _identifier: &Identifier,
        ) -> Result<bool, AuthGatewayError> {
            unimplemented!()
        }

        async fn verify_reset_code(
            &self,
            _identifier: &Identifier,
            _code: &OtpCode,
        ) -> Result<CodeVerification, AuthGatewayError> {
            unimplemented!()
        }

        async fn reset_password(
            &self,
            _reset_token: &ResetToken,
            _new_password: &Password,
            _identifier: &Identifier,
        ) -> Result<bool, AuthGatewayError> {
            unimplemented!()
        }
    }

    #[derive(Clone, Default)]
    struct MockCredentialStore {
        token: Arc<RwLock<Option<String>>>,
    }

    #[async_trait]
    impl CredentialStore for MockCredentialStore {
        async fn store_token(&self, token: &AccessToken) -> Result<(), CredentialStoreError> {
            *self.token.write().await = Some(token.as_ref().expose_secret().clone());
            Ok(())
        }

        async fn load_token(&self) -> Result<Option<AccessToken>, CredentialStoreError> {
            Ok(self.token.read().await.clone().map(AccessToken::new))
        }

        async fn clear_token(&self) -> Result<(), CredentialStoreError> {
            *self.token.write().await = None;
            Ok(())
        }
    }

    fn classifier() -> Arc<IdentifierClassifier> {
        Arc::new(IdentifierClassifier::new(
            NumberingPlan::bundled(),
            Region::GB,
        ))
    }

    fn flow(gateway: MockGateway) -> LoginFlow<MockGateway, MockCredentialStore> {
        LoginFlow::new(
            gateway,
            MockCredentialStore::default(),
            SessionHandle::new(),
            classifier(),
        )
    }

    #[tokio::test]
    async fn valid_email_enables_next_and_advances_to_password_step() {
        let mut flow = flow(MockGateway {
            exists: Some(true),
            ..Default::default()
        });

        flow.set_identifier("test@example.com");
        assert_eq!(flow.state().identifier_kind, IdentifierKind::Email);
        assert!(flow.state().next_enabled);

        let advance = flow.next().await.unwrap();
        assert!(matches!(advance, LoginAdvance::PasswordStep));
        assert_eq!(flow.state().step, LoginStep::Password);
        assert!(!flow.state().next_enabled);
    }

    #[tokio::test]
    async fn unknown_identifier_reports_user_not_found_and_stays() {
        let mut flow = flow(MockGateway {
            exists: Some(false),
            ..Default::default()
        });

        flow.set_identifier("test@example.com");
        let error = flow.next().await.unwrap_err();
        assert_eq!(error.to_string(), "User Not Found");
        assert_eq!(flow.state().step, LoginStep::IdentifyUser);
    }

    #[tokio::test]
    async fn gateway_failure_keeps_the_identify_step() {
        let mut flow = flow(MockGateway::default());

        flow.set_identifier("test@example.com");
        let error = flow.next().await.unwrap_err();
        assert!(matches!(error, LoginFlowError::Gateway(_)));
        assert_eq!(flow.state().step, LoginStep::IdentifyUser);
    }

    #[tokio::test]
    async fn invalid_identifier_keeps_next_disabled() {
        let mut flow = flow(MockGateway::default());

        flow.set_identifier("not@valid");
        assert!(!flow.state().next_enabled);
        assert!(matches!(
            flow.next().await.unwrap_err(),
            LoginFlowError::NotReady
        ));
    }

    #[tokio::test]
    async fn password_gate_requires_eight_characters() {
        let mut flow = flow(MockGateway {
            exists: Some(true),
            ..Default::default()
        });
        flow.set_identifier("test@example.com");
        flow.next().await.unwrap();

        flow.set_password("short");
        assert!(!flow.state().next_enabled);

        flow.set_password("password123");
        assert!(flow.state().next_enabled);
    }

    #[tokio::test]
    async fn successful_login_establishes_and_persists_the_session() {
        let credentials = MockCredentialStore::default();
        let session = SessionHandle::new();
        let mut flow = LoginFlow::new(
            MockGateway {
                exists: Some(true),
                ..Default::default()
            },
            credentials.clone(),
            session.clone(),
            classifier(),
        );

        flow.set_identifier("test@example.com");
        flow.next().await.unwrap();
        flow.set_password("password123");

        let advance = flow.next().await.unwrap();
        assert!(matches!(advance, LoginAdvance::SessionEstablished(_)));
        assert!(session.is_authenticated());
        assert_eq!(
            credentials.token.read().await.as_deref(),
            Some("tok-login")
        );
    }

    #[tokio::test]
    async fn server_rejection_surfaces_the_server_message() {
        let mut flow = flow(MockGateway {
            exists: Some(true),
            login_error: Some("Invalid credentials".to_string()),
        });

        flow.set_identifier("test@example.com");
        flow.next().await.unwrap();
        flow.set_password("password123");

        let error = flow.next().await.unwrap_err();
        assert_eq!(error.to_string(), "Invalid credentials");
        assert_eq!(flow.state().step, LoginStep::Password);
    }

    #[tokio::test]
    async fn back_from_password_step_clears_password_and_regates() {
        let mut flow = flow(MockGateway {
            exists: Some(true),
            ..Default::default()
        });

        flow.set_identifier("test@example.com");
        flow.next().await.unwrap();
        flow.set_password("password123");

        assert_eq!(flow.back(), LoginRetreat::IdentifyStep);
        assert_eq!(flow.state().step, LoginStep::IdentifyUser);
        assert!(flow.state().password.is_empty());
        // Identifier text is retained, so the gate re-enables.
        assert!(flow.state().next_enabled);
    }

    #[tokio::test]
    async fn back_on_first_step_cancels() {
        let mut flow = flow(MockGateway::default());
        assert_eq!(flow.back(), LoginRetreat::Cancelled);
    }

    #[tokio::test]
    async fn reset_returns_the_flow_to_its_initial_state() {
        let mut flow = flow(MockGateway {
            exists: Some(true),
            ..Default::default()
        });
        flow.set_identifier("test@example.com");
        flow.next().await.unwrap();
        flow.set_password("password123");

        flow.reset();
        assert_eq!(flow.state().step, LoginStep::IdentifyUser);
        assert!(flow.state().identifier.is_empty());
        assert!(!flow.state().next_enabled);
    }
}
