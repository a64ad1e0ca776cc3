pub mod auth_client;
pub mod tracing;

pub use auth_client::{AuthClient, ClientSetupError, authorized_http, connect};
pub use self::tracing::init_tracing;
