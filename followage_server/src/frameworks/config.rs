use std::{env, path::PathBuf, time::Duration};

// Runtime/server configuration, read from the environment.

pub fn http_port() -> u16 {
    env::var("FOLLOWAGE_SERVER_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3004)
}

pub fn helix_base_url() -> String {
    env::var("HELIX_BASE_URL").unwrap_or_else(|_| "https://api.twitch.tv/helix".to_string())
}

pub fn twitch_client_id() -> Option<String> {
    non_empty_var("TWITCH_CLIENT_ID")
}

pub fn twitch_app_access_token() -> Option<String> {
    non_empty_var("TWITCH_APP_ACCESS_TOKEN")
}

pub fn token_file() -> PathBuf {
    env::var("TWITCH_TOKEN_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("tokens.toml"))
}

pub fn helix_timeout() -> Duration {
    let millis = env::var("HELIX_TIMEOUT_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(3000);
    Duration::from_millis(millis)
}

pub const TELEMETRY_CHANNEL_CAPACITY: usize = 1024;

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}
