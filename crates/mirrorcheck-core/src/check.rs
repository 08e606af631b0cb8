use crate::error::{CheckError, Result};
use crate::fetch::Fetcher;
use crate::policy::StalenessPolicy;
use crate::report::CheckReport;
use crate::resolve::resolve_pair;
use crate::types::{Endpoint, ExtractorKind};

/// A validated request to compare one mirror against its upstream.
///
/// Construction rejects configurations that can never produce a useful
/// comparison, so no fetch happens for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorCheck {
    project: String,
    first: Endpoint,
    second: Endpoint,
    kind: ExtractorKind,
}

impl MirrorCheck {
    pub fn new(
        project: impl Into<String>,
        first: Endpoint,
        second: Endpoint,
        kind: ExtractorKind,
    ) -> Result<Self> {
        if first == second {
            return Err(CheckError::IdenticalEndpoints(first.to_string()));
        }
        Ok(Self {
            project: project.into(),
            first,
            second,
            kind,
        })
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn kind(&self) -> ExtractorKind {
        self.kind
    }

    pub fn run(&self, fetcher: &impl Fetcher, policy: &StalenessPolicy) -> Result<CheckReport> {
        let mirrors = resolve_pair(fetcher, &self.first, &self.second, self.kind)?;
        let verdict = policy.evaluate(&mirrors);
        tracing::debug!(
            "{}: gap {}s, threshold {}s, stale={}",
            self.project,
            verdict.gap.num_seconds(),
            verdict.threshold.num_seconds(),
            verdict.stale
        );
        Ok(CheckReport {
            project: self.project.clone(),
            kind: self.kind,
            mirrors,
            verdict,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
