//! Timestamp extractors, one per [`ExtractorKind`].
//!
//! Each extractor receives the body of a successful fetch and returns the
//! single point in time it describes.

use crate::datetime::{parse_datetime, Timestamp};
use crate::error::ParseError;
use crate::types::ExtractorKind;

const DEBIAN_MARKER: &str = "Date: ";
const MANJARO_MARKER: &str = "date=";
const LISTING_FIELDS: usize = 8;

impl ExtractorKind {
    pub fn extract(self, text: &str) -> Result<Timestamp, ParseError> {
        match self {
            ExtractorKind::Debian => debian(text),
            ExtractorKind::Manjaro => manjaro(text),
            ExtractorKind::UnixTimestamp => unix_timestamp(text),
            ExtractorKind::Datetime => datetime(text),
            ExtractorKind::RecursiveLs => recursive_ls(text),
        }
    }
}

pub fn debian(text: &str) -> Result<Timestamp, ParseError> {
    let line = unique_marker_line(text, DEBIAN_MARKER)?;
    let value = line.split_once(": ").map(|(_, v)| v).unwrap_or_default();
    parse_datetime(value)
}

pub fn manjaro(text: &str) -> Result<Timestamp, ParseError> {
    let line = unique_marker_line(text, MANJARO_MARKER)?;
    let value = line.split_once('=').map(|(_, v)| v).unwrap_or_default();
    parse_datetime(value)
}

pub fn unix_timestamp(text: &str) -> Result<Timestamp, ParseError> {
    let token = text.split_whitespace().next().ok_or(ParseError::EmptyInput)?;
    token
        .parse::<i64>()
        .ok()
        .and_then(Timestamp::from_epoch)
        .ok_or_else(|| ParseError::InvalidEpoch(token.to_string()))
}

pub fn datetime(text: &str) -> Result<Timestamp, ParseError> {
    let line = text.lines().next().ok_or(ParseError::EmptyInput)?;
    if line.trim().is_empty() {
        return Err(ParseError::EmptyInput);
    }
    parse_datetime(line)
}

/// Newest date among listing lines shaped
/// `permissions links owner group size date time name`.
pub fn recursive_ls(text: &str) -> Result<Timestamp, ParseError> {
    text.lines()
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() != LISTING_FIELDS {
                return None;
            }
            let stamp = format!("{} {}", fields[5], fields[6]);
            match parse_datetime(&stamp) {
                Ok(ts) => Some(ts),
                Err(e) => {
                    tracing::debug!("skipping listing line {line:?}: {e}");
                    None
                }
            }
        })
        .max()
        .ok_or(ParseError::NoListingCandidates)
}

fn unique_marker_line<'a>(text: &'a str, marker: &'static str) -> Result<&'a str, ParseError> {
    let matches: Vec<&str> = text
        .lines()
        .filter(|line| line.starts_with(marker))
        .collect();
    match matches.as_slice() {
        [line] => Ok(line),
        [] => Err(ParseError::MissingMarker { marker }),
        _ => Err(ParseError::DuplicateMarker {
            marker,
            count: matches.len(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
