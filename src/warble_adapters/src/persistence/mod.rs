pub mod in_memory_credential_store;
#[cfg(feature = "os-keyring")]
pub mod keyring_credential_store;

pub use in_memory_credential_store::InMemoryCredentialStore;
#[cfg(feature = "os-keyring")]
pub use keyring_credential_store::KeyringCredentialStore;
