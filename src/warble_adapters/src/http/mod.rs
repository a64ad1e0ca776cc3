pub mod authorized;
pub mod error;
pub mod rest_gateway;

pub use authorized::AuthorizedHttp;
pub use error::FALLBACK_ERROR_MESSAGE;
pub use rest_gateway::RestAuthGateway;
