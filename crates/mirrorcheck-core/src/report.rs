use chrono::TimeDelta;
use serde::Serialize;
use std::fmt;

use crate::policy::StalenessVerdict;
use crate::resolve::MirrorOrdering;
use crate::types::ExtractorKind;

/// Render a duration as `1d 02h 03m 04s`, dropping the day part when zero.
pub fn format_gap(gap: TimeDelta) -> String {
    let total = gap.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let total = total.unsigned_abs();
    let (days, rem) = (total / 86_400, total % 86_400);
    let (hours, rem) = (rem / 3600, rem % 3600);
    let (minutes, seconds) = (rem / 60, rem % 60);
    if days > 0 {
        format!("{sign}{days}d {hours:02}h {minutes:02}m {seconds:02}s")
    } else {
        format!("{sign}{hours:02}h {minutes:02}m {seconds:02}s")
    }
}

// ---------------------------------------------------------------------------
// CheckReport
// ---------------------------------------------------------------------------

/// Outcome of one mirror comparison, ready for display.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub project: String,
    pub kind: ExtractorKind,
    pub mirrors: MirrorOrdering,
    pub verdict: StalenessVerdict,
}

impl CheckReport {
    pub fn is_stale(&self) -> bool {
        self.verdict.stale
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.is_stale() { "STALE" } else { "ok" };
        writeln!(
            f,
            "[{status}] {}: mirrors are {} apart (threshold {})",
            self.project,
            format_gap(self.verdict.gap),
            format_gap(self.verdict.threshold),
        )?;
        writeln!(
            f,
            "  older: {}  {}",
            self.mirrors.older.synced_at, self.mirrors.older.endpoint
        )?;
        write!(
            f,
            "  newer: {}  {}",
            self.mirrors.newer.synced_at, self.mirrors.newer.endpoint
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
