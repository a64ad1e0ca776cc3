use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Install color-eyre panic/error reports and a tracing subscriber reading
/// `RUST_LOG` (default `info`). Call once at app startup; host apps that
/// bring their own subscriber skip this.
pub fn init_tracing() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer())
        .with(ErrorLayer::default())
        .try_init()?;

    Ok(())
}
