use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CheckError;

// ---------------------------------------------------------------------------
// Endpoint
// ---------------------------------------------------------------------------

/// Locator of a mirror status resource. Compared by its string form only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Endpoint(String);

impl Endpoint {
    pub fn new(locator: impl Into<String>) -> Self {
        Self(locator.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Local path for `file://` endpoints.
    pub fn file_path(&self) -> Option<&str> {
        self.0.strip_prefix("file://")
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Endpoint {
    fn from(s: &str) -> Self {
        Endpoint::new(s)
    }
}

// ---------------------------------------------------------------------------
// ExtractorKind
// ---------------------------------------------------------------------------

/// Status page format of a mirror endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractorKind {
    /// Debian-style trace file with a single `Date: ` line.
    #[default]
    Debian,
    /// Manjaro `state` file with a single `date=` line.
    Manjaro,
    /// Epoch seconds as the first token.
    UnixTimestamp,
    /// A date-time on the first line, as printed by `date`.
    Datetime,
    /// `ls -lR` style listing; the newest entry wins.
    RecursiveLs,
}

impl ExtractorKind {
    pub fn all() -> &'static [ExtractorKind] {
        &[
            ExtractorKind::Debian,
            ExtractorKind::Manjaro,
            ExtractorKind::UnixTimestamp,
            ExtractorKind::Datetime,
            ExtractorKind::RecursiveLs,
        ]
    }

    pub fn names() -> Vec<&'static str> {
        Self::all().iter().map(|k| k.as_str()).collect()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExtractorKind::Debian => "debian",
            ExtractorKind::Manjaro => "manjaro",
            ExtractorKind::UnixTimestamp => "unix_timestamp",
            ExtractorKind::Datetime => "datetime",
            ExtractorKind::RecursiveLs => "recursive_ls",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ExtractorKind::Debian => "unique 'Date: ' line (Debian trace file)",
            ExtractorKind::Manjaro => "unique 'date=' line (Manjaro state file)",
            ExtractorKind::UnixTimestamp => "epoch seconds as the first token",
            ExtractorKind::Datetime => "date-time on the first line",
            ExtractorKind::RecursiveLs => "newest entry of an 8-column recursive listing",
        }
    }
}

impl fmt::Display for ExtractorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ExtractorKind {
    type Err = CheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "debian" => Ok(ExtractorKind::Debian),
            "manjaro" => Ok(ExtractorKind::Manjaro),
            "unix_timestamp" => Ok(ExtractorKind::UnixTimestamp),
            "datetime" => Ok(ExtractorKind::Datetime),
            "recursive_ls" => Ok(ExtractorKind::RecursiveLs),
            _ => Err(CheckError::UnknownKind(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
