use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use warble_core::Region;

use super::constants;

#[derive(Debug, Clone, Deserialize)]
pub struct ClientSettings {
    pub api: ApiSettings,
    pub device: DeviceSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeviceSettings {
    pub default_region: String,
    pub credential_service: String,
    pub credential_account: String,
}

impl ClientSettings {
    /// Layered load: compiled defaults, then the optional JSON file named by
    /// `WARBLE_CLIENT_CONFIG`, then `WARBLE__`-prefixed environment
    /// variables.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config_file = std::env::var(constants::env::CLIENT_CONFIG_ENV_VAR)
            .unwrap_or_else(|_| constants::DEFAULT_CONFIG_FILE.to_string());

        Config::builder()
            .set_default("api.base_url", constants::prod::api::BASE_URL)?
            .set_default(
                "api.timeout_secs",
                constants::prod::api::TIMEOUT.as_secs() as i64,
            )?
            .set_default(
                "device.default_region",
                constants::FALLBACK_REGION.as_str(),
            )?
            .set_default("device.credential_service", constants::credential::SERVICE)?
            .set_default("device.credential_account", constants::credential::ACCOUNT)?
            .add_source(File::with_name(&config_file).required(false))
            .add_source(Environment::with_prefix("WARBLE").separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// Configured region, falling back when the value is not a region code.
    pub fn default_region(&self) -> Region {
        self.device
            .default_region
            .parse()
            .unwrap_or(constants::FALLBACK_REGION)
    }
}
