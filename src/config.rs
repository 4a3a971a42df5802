use chrono_tz::Tz;
use std::env;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("PORT must be a number, got '{0}'")]
    InvalidPort(String),
    #[error("REPORT_TIMEZONE must be an IANA time zone, got '{0}'")]
    InvalidTimezone(String),
}

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Allowed origins for cross-origin calls; `["*"]` allows any.
    pub cors_origins: Vec<String>,
    pub report_timezone: Tz,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port_raw = env::var("PORT").unwrap_or_else(|_| "3001".to_string());
        let port = port_raw.parse().map_err(|_| ConfigError::InvalidPort(port_raw))?;

        let tz_raw = env::var("REPORT_TIMEZONE").unwrap_or_else(|_| "UTC".to_string());
        let report_timezone = tz_raw.parse::<Tz>().map_err(|_| ConfigError::InvalidTimezone(tz_raw))?;

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://attendance.db?mode=rwc".to_string()),
            port,
            cors_origins,
            report_timezone,
        })
    }
}
