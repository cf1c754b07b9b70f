//! Configuration file parsing for the server.
//!
//! Loads settings from TOML files including bind address, database path,
//! CORS origins, the LLM connection and the analyzer limits.

use clausecheck_analyzer::AnalyzerConfig;
use clausecheck_llm::openai::{DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Upper bound for `recent_limit`; `GET /analyses` never returns more
pub const MAX_RECENT_LIMIT: usize = 100;

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A field has an unusable value
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0")
    pub bind_address: String,

    /// Bind port (e.g., 8001)
    pub bind_port: u16,

    /// SQLite database file, or ":memory:"
    pub database_path: String,

    /// Allowed CORS origins; `["*"]` allows any origin
    pub cors_origins: Vec<String>,

    /// Largest accepted upload body in bytes
    pub max_upload_bytes: usize,

    /// How many records `GET /analyses` returns at most
    pub recent_limit: usize,

    /// Whether `/health` sends a test prompt to the LLM
    pub health_probe_llm: bool,

    /// LLM connection
    pub llm: LlmConfig,

    /// Chunking and length limits
    pub analyzer: AnalyzerConfig,
}

/// LLM connection settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Chat completions base URL
    pub endpoint: String,

    /// Model name
    pub model: String,

    /// Name of the environment variable holding the API key
    pub api_key_env: String,

    /// HTTP client timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl LlmConfig {
    /// Read the API key from the configured environment variable
    pub fn api_key(&self) -> Result<String, ConfigError> {
        std::env::var(&self.api_key_env).map_err(|_| {
            ConfigError::Invalid(format!(
                "environment variable {} is not set",
                self.api_key_env
            ))
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            bind_port: 8001,
            database_path: "clausecheck.db".to_string(),
            cors_origins: vec!["*".to_string()],
            max_upload_bytes: 20 * 1024 * 1024,
            recent_limit: MAX_RECENT_LIMIT,
            health_probe_llm: true,
            llm: LlmConfig::default(),
            analyzer: AnalyzerConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that would make the server unusable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_path.is_empty() {
            return Err(ConfigError::Invalid("database_path is empty".to_string()));
        }
        if self.recent_limit == 0 || self.recent_limit > MAX_RECENT_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "recent_limit must be between 1 and {}",
                MAX_RECENT_LIMIT
            )));
        }
        if self.llm.model.is_empty() {
            return Err(ConfigError::Invalid("llm.model is empty".to_string()));
        }
        self.analyzer.validate().map_err(ConfigError::Invalid)
    }

    /// Create a default configuration for local testing
    pub fn default_test_config() -> Self {
        ServerConfig {
            bind_address: "127.0.0.1".to_string(),
            database_path: ":memory:".to_string(),
            ..Default::default()
        }
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}
