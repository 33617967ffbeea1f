use std::{path::PathBuf, str::FromStr, time::Duration};

use crate::error::{RatesError, Result};

pub const DEFAULT_API_URL: &str = "https://api.privatbank.ua/p24api/exchange_rates";
pub const DEFAULT_LOG_PATH: &str = "exchange_log.txt";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_CONCURRENCY: usize = 10;

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub log_path: PathBuf,
    pub timeout: Duration,
    pub max_concurrency: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let api_url = lookup("PRIVAT_API_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.api_url);

        let log_path = lookup("EXCHANGE_LOG_PATH")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.log_path);

        let timeout = parse_var::<u64>(&lookup, "PRIVAT_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        let max_concurrency = match parse_var::<usize>(&lookup, "PRIVAT_MAX_CONCURRENCY")? {
            Some(0) => {
                return Err(RatesError::Config {
                    key: "PRIVAT_MAX_CONCURRENCY",
                    value: "0".to_string(),
                });
            }
            Some(n) => n,
            None => defaults.max_concurrency,
        };

        Ok(Self {
            api_url,
            log_path,
            timeout,
            max_concurrency,
        })
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>> {
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| RatesError::Config { key, value }),
    }
}
