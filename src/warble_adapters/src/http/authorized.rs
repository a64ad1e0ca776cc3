use reqwest::{Client, StatusCode, Url};
use secrecy::ExposeSecret;
use serde::Serialize;
use warble_core::{AccessToken, AuthGatewayError, CredentialStore, SessionHandle};

use super::error::{error_from_response, error_from_transport};

/// Bearer-authenticated HTTP access for everything that sits behind login
/// (timelines, profiles, and the rest of the app's surface). The
/// unauthenticated auth-flow endpoints go through
/// [`super::RestAuthGateway`] instead.
///
/// A 401/403 answer means the stored credential is no longer honored: the
/// token is deleted, the session slot cleared, and the caller receives
/// [`AuthGatewayError::SessionExpired`] so it can route back to the
/// unauthenticated entry screen.
pub struct AuthorizedHttp<S>
where
    S: CredentialStore,
{
    http_client: Client,
    base_url: Url,
    credentials: S,
    session: SessionHandle,
}

impl<S> AuthorizedHttp<S>
where
    S: CredentialStore,
{
    pub fn new(base_url: Url, http_client: Client, credentials: S, session: SessionHandle) -> Self {
        Self {
            http_client,
            base_url,
            credentials,
            session,
        }
    }

    #[tracing::instrument(name = "Authorized GET", skip(self))]
    pub async fn get(&self, path: &str) -> Result<reqwest::Response, AuthGatewayError> {
        let url = self.endpoint(path)?;
        self.send(self.http_client.get(url)).await
    }

    #[tracing::instrument(name = "Authorized POST", skip(self, body))]
    pub async fn post_json<B>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, AuthGatewayError>
    where
        B: Serialize + Sync,
    {
        let url = self.endpoint(path)?;
        self.send(self.http_client.post(url).json(body)).await
    }

    fn endpoint(&self, path: &str) -> Result<Url, AuthGatewayError> {
        self.base_url
            .join(path)
            .map_err(|e| AuthGatewayError::Api(e.to_string()))
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, AuthGatewayError> {
        let request = match self.bearer().await? {
            Some(token) => request.bearer_auth(token.as_ref().expose_secret()),
            None => request,
        };

        let response = request.send().await.map_err(error_from_transport)?;

        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            self.purge().await;
            return Err(AuthGatewayError::SessionExpired);
        }
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        Ok(response)
    }

    /// Current bearer: the live session wins, the stored credential covers
    /// requests made before a restore completes.
    async fn bearer(&self) -> Result<Option<AccessToken>, AuthGatewayError> {
        if let Some(session) = self.session.current() {
            return Ok(Some(session.token().clone()));
        }
        self.credentials
            .load_token()
            .await
            .map_err(|e| AuthGatewayError::Api(e.to_string()))
    }

    async fn purge(&self) {
        if let Err(error) = self.credentials.clear_token().await {
            tracing::warn!(%error, "failed to clear stored token after auth rejection");
        }
        self.session.clear();
    }
}
