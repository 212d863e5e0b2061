use std::path::PathBuf;

use serde::Deserialize;

/// Environment variable prefix for all configuration keys
pub const ENV_PREFIX: &str = "NEXT_EPISODE_";

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// JSON library snapshot used to seed the in-memory catalog
    #[serde(default)]
    pub library_path: Option<PathBuf>,

    /// Number of entries returned by the continue-watching listing when the
    /// caller does not pass a limit
    #[serde(default = "default_continue_watching_limit")]
    pub continue_watching_limit: i64,

    /// When disabled, the random path picks the first in-progress series in
    /// catalog order instead of drawing one
    #[serde(default = "default_enable_random_selection")]
    pub enable_random_selection: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_continue_watching_limit() -> i64 {
    10
}

fn default_enable_random_selection() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            library_path: None,
            continue_watching_limit: default_continue_watching_limit(),
            enable_random_selection: default_enable_random_selection(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::prefixed(ENV_PREFIX)
            .from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Socket address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
