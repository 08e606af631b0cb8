use crate::error::{CheckError, Result};
use crate::policy::{StalenessPolicy, DEFAULT_THRESHOLD_HOURS};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

const MAX_QUIET_TIMEOUT_SECONDS: u64 = 300;
const MAX_QUIET_THRESHOLD_HOURS: u32 = 7 * 24;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// CheckConfig
// ---------------------------------------------------------------------------

/// Settings shared by every invocation. Loaded from an optional YAML file;
/// command-line flags override individual fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckConfig {
    #[serde(default = "default_threshold_hours")]
    pub threshold_hours: u32,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_threshold_hours() -> u32 {
    DEFAULT_THRESHOLD_HOURS
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_user_agent() -> String {
    concat!("mirrorcheck/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            threshold_hours: default_threshold_hours(),
            timeout_seconds: default_timeout_seconds(),
            user_agent: default_user_agent(),
        }
    }
}

impl CheckConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|e| {
            CheckError::InvalidConfig(format!("cannot read {}: {e}", path.display()))
        })?;
        serde_yaml::from_str(&data)
            .map_err(|e| CheckError::InvalidConfig(format!("{}: {e}", path.display())))
    }

    pub fn policy(&self) -> StalenessPolicy {
        StalenessPolicy::from_hours(self.threshold_hours)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.threshold_hours == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "threshold_hours must be at least 1".to_string(),
            });
        } else if self.threshold_hours > MAX_QUIET_THRESHOLD_HOURS {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "threshold_hours={} (more than a week) will rarely alert",
                    self.threshold_hours
                ),
            });
        }

        if self.timeout_seconds == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "timeout_seconds must be at least 1".to_string(),
            });
        } else if self.timeout_seconds > MAX_QUIET_TIMEOUT_SECONDS {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "timeout_seconds={} (>{MAX_QUIET_TIMEOUT_SECONDS} is unusual)",
                    self.timeout_seconds
                ),
            });
        }

        if self.user_agent.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "user_agent must not be empty".to_string(),
            });
        }

        warnings
    }

    /// Log warnings and fail on the first error-level finding.
    pub fn ensure_valid(&self) -> Result<()> {
        let mut first_error = None;
        for w in self.validate() {
            match w.level {
                WarnLevel::Warning => tracing::warn!("{}", w.message),
                WarnLevel::Error => {
                    first_error.get_or_insert(w.message);
                }
            }
        }
        match first_error {
            Some(message) => Err(CheckError::InvalidConfig(message)),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
