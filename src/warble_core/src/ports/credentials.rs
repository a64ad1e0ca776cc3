use async_trait::async_trait;
use thiserror::Error;

use crate::domain::session::AccessToken;

// CredentialStore port trait and errors
#[derive(Debug, Error)]
pub enum CredentialStoreError {
    #[error("credential store backend failure: {0}")]
    Backend(String),
}

impl PartialEq for CredentialStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Backend(_), Self::Backend(_)) => true,
        }
    }
}

/// Device-held storage for the bearer token (the mobile client keeps it in
/// the platform's secure credential store).
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn store_token(&self, token: &AccessToken) -> Result<(), CredentialStoreError>;
    async fn load_token(&self) -> Result<Option<AccessToken>, CredentialStoreError>;
    async fn clear_token(&self) -> Result<(), CredentialStoreError>;
}
