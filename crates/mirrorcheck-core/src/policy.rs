use chrono::TimeDelta;
use serde::{Serialize, Serializer};

use crate::resolve::MirrorOrdering;

/// Default allowed gap between a mirror and its upstream.
pub const DEFAULT_THRESHOLD_HOURS: u32 = 24;

// ---------------------------------------------------------------------------
// StalenessPolicy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StalenessPolicy {
    pub threshold: TimeDelta,
}

impl Default for StalenessPolicy {
    fn default() -> Self {
        Self::from_hours(DEFAULT_THRESHOLD_HOURS)
    }
}

impl StalenessPolicy {
    pub fn from_hours(hours: u32) -> Self {
        Self {
            threshold: TimeDelta::hours(i64::from(hours)),
        }
    }

    /// Compare the two resolved timestamps. Only the elapsed time between
    /// them matters; the current time plays no part.
    pub fn evaluate(&self, ordering: &MirrorOrdering) -> StalenessVerdict {
        let gap = ordering.newer.synced_at.since(&ordering.older.synced_at);
        StalenessVerdict {
            gap,
            threshold: self.threshold,
            stale: gap > self.threshold,
        }
    }
}

// ---------------------------------------------------------------------------
// StalenessVerdict
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StalenessVerdict {
    #[serde(rename = "gap_seconds", serialize_with = "as_seconds")]
    pub gap: TimeDelta,
    #[serde(rename = "threshold_seconds", serialize_with = "as_seconds")]
    pub threshold: TimeDelta,
    pub stale: bool,
}

impl StalenessVerdict {
    pub fn passed(&self) -> bool {
        !self.stale
    }
}

fn as_seconds<S: Serializer>(delta: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(delta.num_seconds())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
