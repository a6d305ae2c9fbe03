use std::env;

use auth::HashingAlgorithm;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub hashing: HashingConfig,
    pub token: TokenConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Persistence settings. Without a URL users are kept in memory.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum HashingAlgorithmKind {
    #[default]
    Bcrypt,
    Argon2id,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HashingConfig {
    #[serde(default)]
    pub algorithm: HashingAlgorithmKind,
    /// bcrypt work factor; ignored for Argon2id
    #[serde(default = "default_cost")]
    pub cost: u32,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            algorithm: HashingAlgorithmKind::default(),
            cost: default_cost(),
        }
    }
}

fn default_cost() -> u32 {
    auth::DEFAULT_BCRYPT_COST
}

impl HashingConfig {
    pub fn algorithm(&self) -> HashingAlgorithm {
        match self.algorithm {
            HashingAlgorithmKind::Bcrypt => HashingAlgorithm::Bcrypt { cost: self.cost },
            HashingAlgorithmKind::Argon2id => HashingAlgorithm::Argon2id,
        }
    }
}

#[derive(Clone, Deserialize)]
pub struct TokenConfig {
    pub secret: String,
    /// Token lifetime; tokens never expire when unset
    pub expiration_hours: Option<i64>,
}

impl TokenConfig {
    pub fn expiration(&self) -> Option<chrono::Duration> {
        self.expiration_hours.map(chrono::Duration::hours)
    }
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"**redacted**")
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (TOKEN__SECRET, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// No file in the repository carries `token.secret`, so loading fails
    /// unless the deployment supplies one.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        Self::load_with(&run_mode, Environment::default().separator("__"))
    }

    /// Load configuration for an explicit run mode and environment source.
    pub fn load_with(run_mode: &str, environment: Environment) -> Result<Self, ConfigError> {
        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: TOKEN__SECRET=... overrides token.secret
            .add_source(environment)
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject settings the services cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token.secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "token.secret must not be empty".to_string(),
            ));
        }

        if let Some(hours) = self.token.expiration_hours {
            if hours <= 0 {
                return Err(ConfigError::Message(
                    "token.expiration_hours must be positive".to_string(),
                ));
            }
        }

        Ok(())
    }
}
