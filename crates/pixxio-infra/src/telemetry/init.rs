use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset and the host passes no filter of its own
pub const DEFAULT_FILTER: &str = "pixxio=debug";

type InitResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Install a human-readable tracing subscriber.
///
/// `RUST_LOG` wins over `default_filter`. Fails if a global subscriber is
/// already installed.
pub fn init_telemetry(default_filter: &str) -> InitResult {
    tracing_subscriber::registry()
        .with(env_filter(default_filter))
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;

    tracing::debug!("Tracing initialized");
    Ok(())
}

/// Same as [`init_telemetry`] but emits one JSON object per event.
pub fn init_json_telemetry(default_filter: &str) -> InitResult {
    tracing_subscriber::registry()
        .with(env_filter(default_filter))
        .with(tracing_subscriber::fmt::layer().json())
        .try_init()?;

    tracing::debug!("Tracing initialized with JSON output");
    Ok(())
}
