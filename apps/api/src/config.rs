use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Read once at startup; immutable afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Credential for the external suggestion service.
    /// `None` forces the rule-based suggestion path.
    pub anthropic_api_key: Option<String>,
    /// Word list backing the lexical preprocessing model.
    /// `None` (or a failed load) selects the pattern-only entity strategy.
    pub lexicon_path: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            lexicon_path: optional_env("LEXICON_PATH"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
