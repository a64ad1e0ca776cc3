use warble_core::{CredentialStore, CredentialStoreError, SessionHandle};

/// Error types for the logout use case
#[derive(Debug, thiserror::Error)]
pub enum LogoutError {
    #[error("credential store error: {0}")]
    CredentialStoreError(#[from] CredentialStoreError),
}

/// Logout use case - discards the device-held session.
///
/// The token is opaque to the client; logging out means deleting the stored
/// credential and emptying the session slot. If the delete fails the session
/// stays live so the user can retry.
pub struct LogoutUseCase<S>
where
    S: CredentialStore,
{
    credentials: S,
    session: SessionHandle,
}

impl<S> LogoutUseCase<S>
where
    S: CredentialStore,
{
    pub fn new(credentials: S, session: SessionHandle) -> Self {
        Self {
            credentials,
            session,
        }
    }

    #[tracing::instrument(name = "LogoutUseCase::execute", skip(self))]
    pub async fn execute(&self) -> Result<(), LogoutError> {
        self.credentials.clear_token().await?;
        self.session.clear();
        Ok(())
    }
}
