use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// Layout of timestamps sent without a UTC designator or offset.
const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// An ISO-8601 date-time as delivered by the API.
///
/// Accepts both the naive form (`2020-05-12T06:31:02.2633333`) and the
/// RFC 3339 form with `Z` or an offset. The received text is kept and written
/// back verbatim on serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    raw: String,
    local: NaiveDateTime,
    offset: Option<FixedOffset>,
}

impl Timestamp {
    /// Wall-clock date and time as written, ignoring any offset.
    pub fn naive(&self) -> NaiveDateTime {
        self.local
    }

    pub fn date(&self) -> NaiveDate {
        self.local.date()
    }

    /// Offset from UTC, when the text carried one.
    pub fn offset(&self) -> Option<FixedOffset> {
        self.offset
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for Timestamp {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (local, offset) = match DateTime::parse_from_rfc3339(s) {
            Ok(dt) => (dt.naive_local(), Some(*dt.offset())),
            Err(_) => (NaiveDateTime::parse_from_str(s, NAIVE_FORMAT)?, None),
        };

        Ok(Self {
            raw: s.to_string(),
            local,
            offset,
        })
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(local: NaiveDateTime) -> Self {
        Self {
            raw: local.format(NAIVE_FORMAT).to_string(),
            local,
            offset: None,
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse()
            .map_err(|e| de::Error::custom(format!("invalid timestamp '{}': {}", raw, e)))
    }
}
