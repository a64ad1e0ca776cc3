use std::sync::Arc;

use secrecy::ExposeSecret;
use tokio::sync::RwLock;
use warble_core::{AccessToken, CredentialStore, CredentialStoreError};

/// Process-local credential store for tests and ephemeral sessions.
#[derive(Default, Clone)]
pub struct InMemoryCredentialStore {
    token: Arc<RwLock<Option<String>>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl CredentialStore for InMemoryCredentialStore {
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
