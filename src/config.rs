use dotenv::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::error::ConfigError;
use crate::models::common::default_page_size;
use crate::services::time_slots::SalonHours;

const DEFAULT_API_URL: &str = "http://localhost:3000";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Settings read from the environment at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_url: String,
    pub port: u16,
    pub page_size: usize,
    pub request_timeout: Duration,
    pub hours: SalonHours,
}

fn parse_or<T, F>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => {
            value.trim().parse().map_err(|_| ConfigError::Invalid { name, value })
        }
        _ => Ok(default),
    }
}

impl AppConfig {
    /// Loads `.env` if present, then reads the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("SALON_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        reqwest::Url::parse(&api_url)
            .map_err(|e| ConfigError::ApiUrl(format!("{}: {}", api_url, e)))?;

        let page_size = parse_or(&lookup, "SEARCH_PAGE_SIZE", default_page_size())?;
        if page_size == 0 {
            return Err(ConfigError::Invalid {
                name: "SEARCH_PAGE_SIZE",
                value: "0".to_string(),
            });
        }

        let defaults = SalonHours::default();
        let hours = SalonHours {
            opens_at: parse_or(&lookup, "SALON_OPENS_AT", defaults.opens_at)?,
            closes_at: parse_or(&lookup, "SALON_CLOSES_AT", defaults.closes_at)?,
        };
        if hours.opens_at >= hours.closes_at || hours.closes_at > 24 {
            return Err(ConfigError::Invalid {
                name: "SALON_CLOSES_AT",
                value: hours.closes_at.to_string(),
            });
        }

        let config = Self {
            api_url,
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            page_size,
            request_timeout: Duration::from_secs(parse_or(
                &lookup,
                "REQUEST_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )?),
            hours,
        };

        info!(
            "Using salon API at {} with search page size {}",
            config.api_url, config.page_size
        );
        Ok(config)
    }
}
