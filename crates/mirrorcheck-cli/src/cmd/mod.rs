pub mod check;
pub mod inspect;
pub mod kinds;

use mirrorcheck_core::config::CheckConfig;
use mirrorcheck_core::fetch::HttpFetcher;
use mirrorcheck_core::CheckError;
use std::path::Path;

/// Result of a command that completed without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    Stale,
}

impl Outcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Ok => 0,
            Outcome::Stale => 1,
        }
    }
}

/// Flags that can override values from the config file.
#[derive(Debug, Default, Clone, Copy)]
pub struct Overrides {
    pub threshold_hours: Option<u32>,
    pub timeout_seconds: Option<u64>,
}

/// Resolve settings: flag > config file > built-in default.
pub fn load_config(path: Option<&Path>, overrides: Overrides) -> Result<CheckConfig, CheckError> {
    let mut config = match path {
        Some(p) => CheckConfig::load(p)?,
        None => CheckConfig::default(),
    };
    if let Some(hours) = overrides.threshold_hours {
        config.threshold_hours = hours;
    }
    if let Some(secs) = overrides.timeout_seconds {
        config.timeout_seconds = secs;
    }
    config.ensure_valid()?;
    Ok(config)
}

pub fn http_fetcher(config: &CheckConfig) -> Result<HttpFetcher, CheckError> {
    HttpFetcher::new(config.timeout(), &config.user_agent)
}
