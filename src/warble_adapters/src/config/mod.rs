pub mod constants;
pub mod settings;

pub use settings::{ApiSettings, ClientSettings, DeviceSettings};
