use secrecy::ExposeSecret;
use warble_core::{AccessToken, CredentialStore, CredentialStoreError};

/// Credential store backed by the operating system keychain (Keychain,
/// Secret Service, Windows Credential Manager) via the `keyring` crate.
/// The service/account pair comes from configuration so several builds of
/// the app can coexist on one device.
#[derive(Debug, Clone)]
pub struct KeyringCredentialStore {
    service: String,
    account: String,
}

impl KeyringCredentialStore {
    pub fn new(service: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            account: account.into(),
        }
    }

    fn entry(&self) -> Result<keyring::Entry, CredentialStoreError> {
        keyring::Entry::new(&self.service, &self.account)
            .map_err(|err| CredentialStoreError::Backend(err.to_string()))
    }
}

#[async_trait::async_trait]
impl CredentialStore for KeyringCredentialStore {
    async fn store_token(&self, token: &AccessToken) -> Result<(), CredentialStoreError> {
        self.entry()?
            .set_password(token.as_ref().expose_secret())
            .map_err(|err| CredentialStoreError::Backend(err.to_string()))
    }

    async fn load_token(&self) -> Result<Option<AccessToken>, CredentialStoreError> {
        match self.entry()?.get_password() {
            Ok(raw) => Ok(Some(AccessToken::new(raw))),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(err) => Err(CredentialStoreError::Backend(err.to_string())),
        }
    }

    async fn clear_token(&self) -> Result<(), CredentialStoreError> {
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(err) => Err(CredentialStoreError::Backend(err.to_string())),
        }
    }
}
