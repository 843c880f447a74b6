use serde::Deserialize;
use std::env;

/// Upper bound on check/amend rounds per review.
pub const MAX_REVIEW_PASSES: u32 = 10;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub review: ReviewConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Largest accepted request body, in bytes.
    pub max_body_bytes: usize,
}

/// Policy for repeated check/amend rounds. The amender itself is single-pass.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewConfig {
    /// Check/amend rounds per review, 1..=`MAX_REVIEW_PASSES`.
    pub max_passes: u32,
    /// Re-run the checker on the amended report before returning.
    pub recheck_after_amend: bool,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            max_passes: 1,
            recheck_after_amend: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown log format: {s}")),
        }
    }
}

impl LogFormat {
    /// Read `LOG_FORMAT` without logging. Used to install the subscriber before
    /// the rest of the configuration is loaded and its warnings are emitted.
    pub fn from_env() -> Self {
        env::var("LOG_FORMAT")
            .ok()
            .and_then(|val| val.parse().ok())
            .unwrap_or(Self::Text)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("REPORTGUARD_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("REPORTGUARD_PORT", 3000),
                max_body_bytes: parse_env_or("REPORTGUARD_MAX_BODY_BYTES", 2 * 1024 * 1024),
            },
            review: ReviewConfig {
                max_passes: parse_env_or("REVIEW_MAX_PASSES", 1u32).clamp(1, MAX_REVIEW_PASSES),
                recheck_after_amend: parse_env_or("REVIEW_RECHECK_AFTER_AMEND", true),
            },
            logging: LoggingConfig {
                format: parse_env_or("LOG_FORMAT", LogFormat::Text),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}
