use serde::Serialize;

use crate::datetime::Timestamp;
use crate::error::{CheckError, Result};
use crate::fetch::Fetcher;
use crate::types::{Endpoint, ExtractorKind};

// ---------------------------------------------------------------------------
// ResolvedMirror
// ---------------------------------------------------------------------------

/// An endpoint together with the timestamp read from its status page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedMirror {
    pub endpoint: Endpoint,
    pub synced_at: Timestamp,
}

/// Fetch one endpoint and extract its timestamp.
pub fn resolve(
    fetcher: &impl Fetcher,
    endpoint: &Endpoint,
    kind: ExtractorKind,
) -> Result<ResolvedMirror> {
    let text = fetcher.fetch(endpoint)?;
    let synced_at = kind.extract(&text).map_err(|reason| CheckError::Parse {
        endpoint: endpoint.to_string(),
        kind,
        reason,
    })?;
    tracing::debug!("{endpoint} ({kind}) last synced {synced_at}");
    Ok(ResolvedMirror {
        endpoint: endpoint.clone(),
        synced_at,
    })
}

// ---------------------------------------------------------------------------
// MirrorOrdering
// ---------------------------------------------------------------------------

/// Two resolved mirrors labeled by recency.
///
/// `older` is the copy under test, `newer` the reference. The labels come
/// from the timestamps, never from the order the endpoints were given in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MirrorOrdering {
    pub older: ResolvedMirror,
    pub newer: ResolvedMirror,
}

impl MirrorOrdering {
    /// Order two mirrors by timestamp. Equal timestamps keep argument order.
    pub fn from_pair(first: ResolvedMirror, second: ResolvedMirror) -> Self {
        if second.synced_at < first.synced_at {
            Self {
                older: second,
                newer: first,
            }
        } else {
            Self {
                older: first,
                newer: second,
            }
        }
    }
}

/// Resolve both endpoints (sequentially) and order them by recency.
///
/// The first failure aborts; there is no partial result.
pub fn resolve_pair(
    fetcher: &impl Fetcher,
    first: &Endpoint,
    second: &Endpoint,
    kind: ExtractorKind,
) -> Result<MirrorOrdering> {
    let first = resolve(fetcher, first, kind)?;
    let second = resolve(fetcher, second, kind)?;
    Ok(MirrorOrdering::from_pair(first, second))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
