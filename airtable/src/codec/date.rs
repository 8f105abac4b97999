use std::fmt;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde_json::Value;

use super::{FieldCodec, FieldKind};
use crate::error::CodecError;

const DAY_FORMAT: &str = "%Y-%m-%d";

/// A date or date-time column.
///
/// Date-only columns arrive as `YYYY-MM-DD`; columns that include a time
/// arrive as RFC 3339 in UTC. The variant remembers which one was seen so
/// the value encodes back to the same form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Date {
    Day(NaiveDate),
    Instant(DateTime<Utc>),
}

impl Date {
    /// Parses either accepted wire form.
    pub fn parse(s: &str) -> Result<Self, CodecError> {
        if let Ok(instant) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self::Instant(instant.with_timezone(&Utc)));
        }

        NaiveDate::parse_from_str(s, DAY_FORMAT)
            .map(Self::Day)
            .map_err(|source| CodecError::InvalidDate {
                value: s.to_string(),
                source,
            })
    }

    /// The calendar day, discarding any time of day.
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::Day(day) => *day,
            Self::Instant(instant) => instant.date_naive(),
        }
    }
}

impl Default for Date {
    fn default() -> Self {
        Self::Day(NaiveDate::default())
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day(day) => write!(f, "{}", day.format(DAY_FORMAT)),
            Self::Instant(instant) => {
                f.write_str(&instant.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
        }
    }
}

impl From<NaiveDate> for Date {
    fn from(day: NaiveDate) -> Self {
        Self::Day(day)
    }
}

impl From<DateTime<Utc>> for Date {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::Instant(instant)
    }
}

impl FieldCodec for Date {
    const KIND: FieldKind = FieldKind::Date;

    fn decode(value: &Value) -> Result<Self, CodecError> {
        let s = value
            .as_str()
            .ok_or_else(|| CodecError::unexpected("date string", value))?;
        Self::parse(s)
    }

    fn encode(&self) -> Option<Value> {
        Some(Value::String(self.to_string()))
    }
}
