use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3001;

/// Deployment environment. Only development allows deleting every log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_development(&self) -> bool {
        *self == Environment::Development
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,
    /// SQLite database file
    pub database_path: PathBuf,
    pub environment: Environment,
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = env("PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let database_path = env("FOODLOG_DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                dirs::data_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("foodlog-server")
                    .join("foodlog.db")
            });

        let environment = env("FOODLOG_ENV")
            .map(|v| Environment::parse(&v))
            .unwrap_or(Environment::Development);

        Self {
            port,
            database_path,
            environment,
        }
    }
}
