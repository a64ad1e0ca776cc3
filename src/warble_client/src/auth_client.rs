use std::sync::Arc;

use reqwest::Url;
use warble_adapters::config::ClientSettings;
use warble_adapters::device::detect_region;
use warble_adapters::http::{AuthorizedHttp, RestAuthGateway};
use warble_application::{
    ForgotPasswordFlow, LoginFlow, LogoutError, LogoutUseCase, SignupFlow,
};
use warble_core::{
    AuthGateway, AuthSession, CredentialStore, CredentialStoreError, IdentifierClassifier,
    NumberingPlan, Region, SessionHandle,
};

/// Entry point for the authentication surface: owns the session slot and the
/// classifier, hands out flow controllers wired to the same gateway and
/// credential store.
///
/// Stores and gateways are `Clone` over shared internals, so every flow
/// observes the same device state.
pub struct AuthClient<G, S>
where
    G: AuthGateway + Clone,
    S: CredentialStore + Clone,
{
    gateway: G,
    credentials: S,
    session: SessionHandle,
    classifier: Arc<IdentifierClassifier>,
}

impl<G, S> AuthClient<G, S>
where
    G: AuthGateway + Clone,
    S: CredentialStore + Clone,
{
    pub fn new(gateway: G, credentials: S, default_region: Region) -> Self {
        Self {
            gateway,
            credentials,
            session: SessionHandle::new(),
            classifier: Arc::new(IdentifierClassifier::new(
                NumberingPlan::bundled(),
                default_region,
            )),
        }
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub fn classifier(&self) -> Arc<IdentifierClassifier> {
        Arc::clone(&self.classifier)
    }

    pub fn login_flow(&self) -> LoginFlow<G, S> {
        LoginFlow::new(
            self.gateway.clone(),
            self.credentials.clone(),
            self.session.clone(),
            Arc::clone(&self.classifier),
        )
    }

    pub fn forgot_password_flow(&self) -> ForgotPasswordFlow<G> {
        ForgotPasswordFlow::new(self.gateway.clone(), Arc::clone(&self.classifier))
    }

    pub fn signup_flow(&self) -> SignupFlow<G, S> {
        SignupFlow::new(
            self.gateway.clone(),
            self.credentials.clone(),
            self.session.clone(),
            Arc::clone(&self.classifier),
        )
    }

    /// Rehydrate the session from the device credential store on startup.
    /// The cached profile is not persisted, so a restored session carries the
    /// token alone until the app refetches the profile.
    #[tracing::instrument(name = "AuthClient::restore_session", skip(self))]
    pub async fn restore_session(
        &self,
    ) -> Result<Option<Arc<AuthSession>>, CredentialStoreError> {
        match self.credentials.load_token().await? {
            Some(token) => {
                self.session.establish(AuthSession::new(None, token));
                Ok(self.session.current())
            }
            None => Ok(None),
        }
    }

    pub async fn logout(&self) -> Result<(), LogoutError> {
        LogoutUseCase::new(self.credentials.clone(), self.session.clone())
            .execute()
            .await
    }
}

/// Error types for client construction
#[derive(Debug, thiserror::Error)]
pub enum ClientSetupError {
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Build an [`AuthClient`] against the real REST gateway from settings: the
/// base URL and timeout come from configuration, the classifier region from
/// the device locale with the configured region as fallback.
pub fn connect<S>(
    settings: &ClientSettings,
    credentials: S,
) -> Result<AuthClient<RestAuthGateway, S>, ClientSetupError>
where
    S: CredentialStore + Clone,
{
    let base_url = parse_base_url(&settings.api.base_url)?;
    let http_client = reqwest::Client::builder()
        .timeout(settings.timeout())
        .build()?;
    let region = detect_region(settings.default_region());

    Ok(AuthClient::new(
        RestAuthGateway::new(base_url, http_client),
        credentials,
        region,
    ))
}

/// Build the bearer-authenticated HTTP client for the surfaces behind login,
/// sharing the auth client's session slot so a 401/403 purge is observed
/// everywhere at once.
pub fn authorized_http<S>(
    settings: &ClientSettings,
    credentials: S,
    session: SessionHandle,
) -> Result<AuthorizedHttp<S>, ClientSetupError>
where
    S: CredentialStore,
{
    let base_url = parse_base_url(&settings.api.base_url)?;
    let http_client = reqwest::Client::builder()
        .timeout(settings.timeout())
        .build()?;

    Ok(AuthorizedHttp::new(
        base_url,
        http_client,
        credentials,
        session,
    ))
}

fn parse_base_url(raw: &str) -> Result<Url, ClientSetupError> {
    Url::parse(raw).map_err(|err| ClientSetupError::InvalidBaseUrl(err.to_string()))
}
