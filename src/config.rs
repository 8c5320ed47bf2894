use std::env;
use std::time::Duration;

const DEFAULT_API_BASE_URL: &str = "https://covid-api.mmediagroup.fr/v1";

/// Service configuration, sourced from environment variables with sane defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind: String,
    pub port: u16,
    /// Base URL of the upstream statistics API, without a trailing slash.
    pub api_base_url: String,
    /// Per-request timeout for upstream fetches.
    pub http_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        let api_base_url = env_str("COVCORR_API_BASE_URL", DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_string();
        Self {
            bind: env_str("COVCORR_BIND", "127.0.0.1"),
            port: env_u16("COVCORR_PORT", 8080),
            api_base_url,
            // A zero timeout would fail every request before it starts.
            http_timeout: Duration::from_secs(env_u64("COVCORR_HTTP_TIMEOUT_S", 10).max(1)),
        }
    }
}

fn env_str(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_u16(name: &str, default: u16) -> u16 {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}
