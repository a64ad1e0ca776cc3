use warble_core::Region;

pub mod env {
    pub const CLIENT_CONFIG_ENV_VAR: &str = "WARBLE_CLIENT_CONFIG";
    pub const API_BASE_URL_ENV_VAR: &str = "WARBLE__API__BASE_URL";
    pub const DEFAULT_REGION_ENV_VAR: &str = "WARBLE__DEVICE__DEFAULT_REGION";
}

/// Basename of the optional JSON settings file.
pub const DEFAULT_CONFIG_FILE: &str = "warble-client";

/// Used when neither the locale nor configuration yields a usable region.
pub const FALLBACK_REGION: Region = Region::US;

pub mod credential {
    pub const SERVICE: &str = "io.warble.app";
    pub const ACCOUNT: &str = "access_token";
}

pub mod prod {
    pub mod api {
        use std::time::Duration;

        pub const BASE_URL: &str = "https://api.warble.io/";
        pub const TIMEOUT: Duration = Duration::from_secs(10);
    }
}

pub mod test {
    pub mod api {
        use std::time::Duration;

        pub const TIMEOUT: Duration = Duration::from_millis(200);
    }
}
