// Framework bootstrap for the followage server runtime.

use crate::frameworks::config;
use crate::interface_adapters::clients::{HelixClient, HelixConfig};
use crate::interface_adapters::routes;
use crate::interface_adapters::state::{AppState, SystemClock};
use crate::interface_adapters::telemetry::ChannelTelemetry;
use crate::interface_adapters::token_store::TomlTokenStore;

use std::io::{Error, Result};
use std::net::SocketAddr;
use std::sync::Arc;

fn init_runtime() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub async fn run(listener: tokio::net::TcpListener, state: Arc<AppState>) -> Result<()> {
    let address = listener.local_addr()?;
    let app = routes::app(state);

    tracing::info!(%address, "listening");

    // Serve app and report errors rather than panicking
    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let state = build_state()?;
    let address = SocketAddr::from(([0, 0, 0, 0], config::http_port()));

    // Bind TCP listener with error handling
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener, state).await
}

fn build_state() -> Result<Arc<AppState>> {
    let client_id = config::twitch_client_id()
        .ok_or_else(|| Error::other("TWITCH_CLIENT_ID must be set"))?;
    let app_access_token = config::twitch_app_access_token()
        .ok_or_else(|| Error::other("TWITCH_APP_ACCESS_TOKEN must be set"))?;

    let token_file = config::token_file();
    let helix_config = HelixConfig {
        base_url: config::helix_base_url(),
        client_id,
        app_access_token,
        timeout: config::helix_timeout(),
    };
    tracing::debug!(
        helix_base_url = %helix_config.base_url,
        helix_timeout_ms = helix_config.timeout.as_millis(),
        token_file = %token_file.display(),
        "helix client configured"
    );

    let tokens = Arc::new(TomlTokenStore::new(token_file));
    let helix = Arc::new(
        HelixClient::new(helix_config, tokens)
            .map_err(|e| Error::other(format!("failed to initialize helix client: {e}")))?,
    );

    Ok(Arc::new(AppState {
        users: helix.clone(),
        follows: helix,
        telemetry: Arc::new(ChannelTelemetry::spawn(config::TELEMETRY_CHANNEL_CAPACITY)),
        clock: Arc::new(SystemClock),
    }))
}
