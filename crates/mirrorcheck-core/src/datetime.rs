//! Date-time parsing for mirror status pages.
//!
//! Status pages use a handful of ad-hoc textual encodings. Each accepted
//! encoding is a [`DateShape`] with an explicit list of chrono formats; a
//! value must consume the whole input to match. Nothing outside these
//! shapes is accepted.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ParseError;

// ---------------------------------------------------------------------------
// Zone
// ---------------------------------------------------------------------------

/// What the source text said about its timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    /// Explicit UTC marker (`UTC`, `GMT`, `Z`, `+0000`) or epoch seconds.
    Utc,
    /// Explicit non-UTC offset or named zone.
    Offset,
    /// No zone in the text; the value is read as UTC.
    Unspecified,
}

impl Zone {
    pub fn as_str(self) -> &'static str {
        match self {
            Zone::Utc => "utc",
            Zone::Offset => "offset",
            Zone::Unspecified => "unspecified",
        }
    }

    fn for_offset(offset: &FixedOffset) -> Zone {
        if offset.local_minus_utc() == 0 {
            Zone::Utc
        } else {
            Zone::Offset
        }
    }
}

// ---------------------------------------------------------------------------
// Timestamp
// ---------------------------------------------------------------------------

/// A point in time read from a status page, with its zone metadata.
///
/// Equality and ordering compare the absolute instant only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Timestamp {
    pub instant: DateTime<FixedOffset>,
    pub zone: Zone,
}

impl Timestamp {
    pub fn new(instant: DateTime<FixedOffset>, zone: Zone) -> Self {
        Self { instant, zone }
    }

    /// Seconds since the Unix epoch, always UTC.
    pub fn from_epoch(secs: i64) -> Option<Self> {
        let instant = DateTime::<Utc>::from_timestamp(secs, 0)?;
        Some(Self::new(instant.fixed_offset(), Zone::Utc))
    }

    pub fn utc(&self) -> DateTime<Utc> {
        self.instant.with_timezone(&Utc)
    }

    /// `self - earlier`.
    pub fn since(&self, earlier: &Timestamp) -> TimeDelta {
        self.instant.signed_duration_since(earlier.instant)
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.instant == other.instant
    }
}

impl Eq for Timestamp {}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.instant.cmp(&other.instant)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.zone {
            Zone::Offset => write!(f, "{}", self.instant.to_rfc3339()),
            Zone::Utc => write!(f, "{}", self.utc().format("%Y-%m-%dT%H:%M:%SZ")),
            Zone::Unspecified => write!(
                f,
                "{} (no zone, read as UTC)",
                self.utc().format("%Y-%m-%dT%H:%M:%SZ")
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// DateShape
// ---------------------------------------------------------------------------

/// Accepted textual date-time encodings, tried in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateShape {
    /// `Fri, 19 Jan 2018 19:26:41 UTC`, weekday optional, named or numeric zone.
    Rfc2822,
    /// `Fri Jan 19 19:26:41 UTC 2018`, as printed by `date`; zone optional.
    Ctime,
    /// `2018-01-19T19:26:41Z`, fractional seconds and offsets allowed.
    Iso8601,
    /// `2018-01-19 19:26` or `2018-01-19 19:26:41`, no zone.
    Plain,
}

const RFC2822_NAMED: &[&str] = &["%a, %d %b %Y %H:%M:%S", "%d %b %Y %H:%M:%S"];
const RFC2822_NUMERIC: &[&str] = &["%a, %d %b %Y %H:%M:%S %z", "%d %b %Y %H:%M:%S %z"];
const CTIME: &str = "%a %b %d %H:%M:%S %Y";
const ISO8601_NAIVE: &str = "%Y-%m-%dT%H:%M:%S%.f";
const PLAIN: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

impl DateShape {
    pub fn all() -> &'static [DateShape] {
        &[
            DateShape::Rfc2822,
            DateShape::Ctime,
            DateShape::Iso8601,
            DateShape::Plain,
        ]
    }

    pub fn parse(self, text: &str) -> Option<Timestamp> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        match self {
            DateShape::Rfc2822 => parse_rfc2822(text),
            DateShape::Ctime => parse_ctime(text),
            DateShape::Iso8601 => parse_iso8601(text),
            DateShape::Plain => PLAIN
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .map(unspecified),
        }
    }
}

/// Parse `text` as any accepted [`DateShape`].
pub fn parse_datetime(text: &str) -> Result<Timestamp, ParseError> {
    DateShape::all()
        .iter()
        .find_map(|shape| shape.parse(text))
        .ok_or_else(|| ParseError::InvalidDate(text.trim().to_string()))
}

/// Offset in seconds east of UTC for the zone abbreviations status pages use.
fn named_offset(name: &str) -> Option<(i32, Zone)> {
    let hours = match name.to_ascii_uppercase().as_str() {
        "UTC" | "GMT" | "UT" | "Z" => return Some((0, Zone::Utc)),
        "EST" => -5,
        "EDT" => -4,
        "CST" => -6,
        "CDT" => -5,
        "MST" => -7,
        "MDT" => -6,
        "PST" => -8,
        "PDT" => -7,
        "CET" => 1,
        "CEST" => 2,
        _ => return None,
    };
    Some((hours * 3600, Zone::Offset))
}

fn with_offset(naive: NaiveDateTime, secs: i32, zone: Zone) -> Option<Timestamp> {
    let offset = FixedOffset::east_opt(secs)?;
    let instant = offset.from_local_datetime(&naive).single()?;
    Some(Timestamp::new(instant, zone))
}

fn unspecified(naive: NaiveDateTime) -> Timestamp {
    Timestamp::new(naive.and_utc().fixed_offset(), Zone::Unspecified)
}

fn parse_rfc2822(text: &str) -> Option<Timestamp> {
    if let Some((head, tail)) = text.rsplit_once(char::is_whitespace) {
        if let Some((secs, zone)) = named_offset(tail) {
            let head = head.trim_end();
            return RFC2822_NAMED
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(head, fmt).ok())
                .and_then(|naive| with_offset(naive, secs, zone));
        }
    }
    RFC2822_NUMERIC
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(text, fmt).ok())
        .map(|dt| Timestamp::new(dt, Zone::for_offset(dt.offset())))
}

fn parse_ctime(text: &str) -> Option<Timestamp> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    match tokens.as_slice() {
        [_, _, _, _, _] => NaiveDateTime::parse_from_str(&tokens.join(" "), CTIME)
            .ok()
            .map(unspecified),
        [weekday, month, day, time, zone, year] => {
            let head = format!("{weekday} {month} {day} {time} {year}");
            if let Some((secs, zone)) = named_offset(zone) {
                let naive = NaiveDateTime::parse_from_str(&head, CTIME).ok()?;
                return with_offset(naive, secs, zone);
            }
            let dt = DateTime::parse_from_str(&format!("{head} {zone}"), &format!("{CTIME} %z"))
                .ok()?;
            Some(Timestamp::new(dt, Zone::for_offset(dt.offset())))
        }
        _ => None,
    }
}

fn parse_iso8601(text: &str) -> Option<Timestamp> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(Timestamp::new(dt, Zone::for_offset(dt.offset())));
    }
    NaiveDateTime::parse_from_str(text, ISO8601_NAIVE)
        .ok()
        .map(unspecified)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
