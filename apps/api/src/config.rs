use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub sanity_project_id: String,
    pub sanity_dataset: String,
    pub sanity_api_version: String,
    pub sanity_api_token: Option<String>,
    pub sanity_use_cdn: bool,
    /// Only the Dutch resume needs it; English exports work without a key.
    pub anthropic_api_key: Option<String>,
    pub profile_path: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            sanity_project_id: require_env("SANITY_PROJECT_ID")?,
            sanity_dataset: env_or("SANITY_DATASET", "production"),
            sanity_api_version: env_or("SANITY_API_VERSION", "2024-01-01"),
            sanity_api_token: optional_env("SANITY_API_TOKEN"),
            sanity_use_cdn: parse_flag(&env_or("SANITY_USE_CDN", "true"))
                .context("SANITY_USE_CDN must be true or false")?,
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            profile_path: env_or("PROFILE_PATH", "profile.json"),
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and blank values are both treated as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    optional_env(key).unwrap_or_else(|| default.to_string())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
