use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "companyflow=debug,sqlx=warn";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into())
}

/// Initialize tracing with a human-readable fmt layer. `RUST_LOG` overrides
/// the default filter.
pub fn init_tracing() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))
}

/// Same as [`init_tracing`] but emits one JSON object per event.
pub fn init_json_tracing() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().json())
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))
}

/// Pick the subscriber format for the environment: JSON in production.
pub fn init_for(config: &crate::Config) -> Result<(), anyhow::Error> {
    if config.is_production() {
        init_json_tracing()
    } else {
        init_tracing()
    }
}
