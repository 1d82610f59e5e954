//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! All configuration is loaded at startup and validated before the application runs.

use std::env;
use std::str::FromStr;
use std::sync::LazyLock;
use std::time::Duration;

use crate::constants::{
    DEFAULT_DATABASE_MAX_CONNECTIONS, DEFAULT_ENGINE_MAX_CONCURRENCY, DEFAULT_ENGINE_TIMEOUT_SECS,
    DEFAULT_ENGINE_URL, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, DEFAULT_SUBMISSION_RATE_LIMIT,
    DEFAULT_SUBMISSION_RATE_WINDOW_SECS, MAX_ENGINE_CONCURRENCY,
};

/// Global application configuration (lazily initialized)
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::from_env().expect("Failed to load configuration from environment")
});

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub jwt: JwtConfig,
    pub engine: EngineConfig,
    pub rate_limit: RateLimitConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Redis configuration
#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: String,
}

/// Bearer token verification
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
}

/// Execution engine (Judge0) configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub base_url: String,
    /// Sent as `X-RapidAPI-Key` when `api_host` is set, `X-Auth-Token` otherwise
    pub api_key: Option<String>,
    pub api_host: Option<String>,
    /// Outer timeout for one test case
    pub timeout: Duration,
    /// Engine calls in flight per submission (1 = sequential)
    pub max_concurrency: usize,
}

/// Per-user submission throttling
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub submissions_per_window: i64,
    pub window_secs: i64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            redis: RedisConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            engine: EngineConfig::from_env()?,
            rate_limit: RateLimitConfig::from_env()?,
        })
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: parse_or("SERVER_PORT", DEFAULT_SERVER_PORT)?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: required("DATABASE_URL")?,
            max_connections: parse_or("DATABASE_MAX_CONNECTIONS", DEFAULT_DATABASE_MAX_CONNECTIONS)?,
        })
    }
}

impl RedisConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
        })
    }
}

impl JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            secret: required("JWT_SECRET")?,
        })
    }
}

impl EngineConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let timeout_secs: u64 = parse_or("ENGINE_TIMEOUT_SECS", DEFAULT_ENGINE_TIMEOUT_SECS)?;
        let max_concurrency: usize =
            parse_or("ENGINE_MAX_CONCURRENCY", DEFAULT_ENGINE_MAX_CONCURRENCY)?;

        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue("ENGINE_TIMEOUT_SECS".to_string()));
        }
        if max_concurrency == 0 || max_concurrency > MAX_ENGINE_CONCURRENCY {
            return Err(ConfigError::InvalidValue("ENGINE_MAX_CONCURRENCY".to_string()));
        }

        Ok(Self {
            base_url: env::var("JUDGE0_API_URL")
                .unwrap_or_else(|_| DEFAULT_ENGINE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            api_key: optional("JUDGE0_API_KEY"),
            api_host: optional("JUDGE0_API_HOST"),
            timeout: Duration::from_secs(timeout_secs),
            max_concurrency,
        })
    }
}

impl RateLimitConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            submissions_per_window: parse_or("SUBMISSION_RATE_LIMIT", DEFAULT_SUBMISSION_RATE_LIMIT)?,
            window_secs: parse_or("SUBMISSION_RATE_WINDOW_SECS", DEFAULT_SUBMISSION_RATE_WINDOW_SECS)?,
        })
    }
}

fn required(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::Missing(key.to_string()))
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_or<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        Err(_) => Ok(default),
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}
