//! `gptbots-relay` binary entrypoint.
//!
//! This starts the Actix Web server using configuration from environment
//! variables, or from a `relay.yml` named by `RELAY_CONFIG`.

use gptbots_relay::{serve, RelayConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Respect `RUST_LOG` if set; otherwise default to relay-friendly info.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::var("RELAY_CONFIG") {
        Ok(path) => RelayConfig::from_yaml_file(path)?,
        Err(_) => RelayConfig::default(),
    };
    if config.api_key.is_empty() {
        tracing::warn!("GPTBOTS_API_KEY is not set; upstream calls will be rejected");
    }

    serve(config).await
}
