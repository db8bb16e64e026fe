use dsn_backend::module::dsn::FeedUrls;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Public base URL of this server, echoed into snapshots
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_log_directory")]
    pub log_directory: String,

    /// Directory served under /images (craft and station icons)
    #[serde(default = "default_images_directory")]
    pub images_directory: String,

    /// How long a snapshot is served from cache
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    #[serde(default = "default_enable_cors")]
    pub enable_cors: bool,

    #[serde(default)]
    pub feeds: FeedUrls,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_directory() -> String {
    "logs".to_string()
}

fn default_images_directory() -> String {
    "public/images".to_string()
}

fn default_cache_ttl_secs() -> u64 {
    60 * 60
}

fn default_enable_cors() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_url: None,
            log_level: default_log_level(),
            log_directory: default_log_directory(),
            images_directory: default_images_directory(),
            cache_ttl_secs: default_cache_ttl_secs(),
            enable_cors: default_enable_cors(),
            feeds: FeedUrls::default(),
        }
    }
}

impl ServerConfig {
    /// Load from a TOML file. A missing file means all defaults.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))
    }

    /// Load from `DSN_CONFIG` (or `config.toml`), then apply `HOST`, `PORT`
    /// and `BASE_URL` from the environment.
    pub fn from_env() -> anyhow::Result<Self> {
        let path = std::env::var("DSN_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::load(&path)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) -> anyhow::Result<()> {
        if let Some(host) = var("HOST").filter(|v| !v.is_empty()) {
            self.host = host;
        }
        if let Some(port) = var("PORT").filter(|v| !v.is_empty()) {
            self.port = port
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid PORT '{}': {}", port, e))?;
        }
        if let Some(base_url) = var("BASE_URL").filter(|v| !v.is_empty()) {
            self.base_url = Some(base_url);
        }
        Ok(())
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Configured base URL, or `http://localhost:<port>`
    pub fn base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| format!("http://localhost:{}", self.port))
    }
}
