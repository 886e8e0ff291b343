use foodlog_core::NutritionGoals;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:3001";
pub const DEFAULT_USER_ID: &str = "demo-user";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_RETRIES: u32 = 1;

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Base URL of the food log service
    pub api_url: ConfigValue<String>,
    /// Owner recorded on new entries
    pub user_id: ConfigValue<String>,
    /// Request timeout in seconds
    pub timeout_secs: ConfigValue<u64>,
    /// Automatic retries for failed loads and clears
    pub retries: ConfigValue<u32>,
    /// Daily nutrition targets
    pub goals: ConfigValue<NutritionGoals>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    api_url: Option<String>,
    user_id: Option<String>,
    timeout_secs: Option<u64>,
    retries: Option<u32>,
    goals: Option<NutritionGoals>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::load_with_env(config_path, |key| std::env::var(key).ok())
    }

    pub(crate) fn load_with_env<F>(
        config_path: Option<PathBuf>,
        env: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut api_url = ConfigValue::new(DEFAULT_API_URL.to_string(), ConfigSource::Default);
        let mut user_id = ConfigValue::new(DEFAULT_USER_ID.to_string(), ConfigSource::Default);
        let mut timeout_secs = ConfigValue::new(DEFAULT_TIMEOUT_SECS, ConfigSource::Default);
        let mut retries = ConfigValue::new(DEFAULT_RETRIES, ConfigSource::Default);
        let mut goals = ConfigValue::new(NutritionGoals::default(), ConfigSource::Default);
        let mut config_file = None;

        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(url) = file_config.api_url {
                api_url = ConfigValue::new(url, ConfigSource::File);
            }
            if let Some(user) = file_config.user_id {
                user_id = ConfigValue::new(user, ConfigSource::File);
            }
            if let Some(secs) = file_config.timeout_secs {
                timeout_secs = ConfigValue::new(secs, ConfigSource::File);
            }
            if let Some(n) = file_config.retries {
                retries = ConfigValue::new(n, ConfigSource::File);
            }
            if let Some(g) = file_config.goals {
                goals = ConfigValue::new(g, ConfigSource::File);
            }
        }

        if let Some(url) = env("FOODLOG_API_URL") {
            api_url = ConfigValue::new(url, ConfigSource::Environment);
        }
        if let Some(user) = env("FOODLOG_USER_ID") {
            user_id = ConfigValue::new(user, ConfigSource::Environment);
        }
        if let Some(raw) = env("FOODLOG_TIMEOUT_SECS") {
            let secs = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("FOODLOG_TIMEOUT_SECS", raw.clone()))?;
            timeout_secs = ConfigValue::new(secs, ConfigSource::Environment);
        }
        if let Some(raw) = env("FOODLOG_RETRIES") {
            let n = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("FOODLOG_RETRIES", raw.clone()))?;
            retries = ConfigValue::new(n, ConfigSource::Environment);
        }

        Ok(Self {
            api_url,
            user_id,
            timeout_secs,
            retries,
            goals,
            config_file,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.value)
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/foodlog/
    /// - macOS: ~/Library/Application Support/foodlog/
    /// - Windows: %APPDATA%/foodlog/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("foodlog")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    InvalidValue(&'static str, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
            ConfigError::InvalidValue(key, value) => {
                write!(f, "Invalid value for {}: '{}'", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
