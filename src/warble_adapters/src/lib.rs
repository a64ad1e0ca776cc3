pub mod config;
pub mod device;
pub mod http;
pub mod persistence;

pub use config::{ClientSettings, constants};
pub use device::detect_region;
pub use http::{AuthorizedHttp, FALLBACK_ERROR_MESSAGE, RestAuthGateway};
pub use persistence::InMemoryCredentialStore;
#[cfg(feature = "os-keyring")]
pub use persistence::KeyringCredentialStore;
