use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Low, Severity::Medium, Severity::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown severity '{0}'")]
pub struct UnknownSeverity(pub String);

impl FromStr for Severity {
    type Err = UnknownSeverity;

    /// Exact, case-sensitive match on the display label.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .into_iter()
            .find(|s| s.as_str() == value)
            .ok_or_else(|| UnknownSeverity(value.to_string()))
    }
}

/// One reported incident.
///
/// Records are never mutated once created: the store only hands out shared
/// references, and there is no update path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentRecord {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    /// ISO-8601 text as reported. Use [`IncidentRecord::reported_at_time`]
    /// for comparisons.
    pub reported_at: String,
}

impl IncidentRecord {
    pub fn new(
        id: u64,
        title: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
        reported_at: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            severity,
            reported_at: reported_at.into(),
        }
    }

    pub fn reported_at_time(&self) -> Option<DateTime<Utc>> {
        parse_reported_at(&self.reported_at)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("incident {id}: title is required")]
    EmptyTitle { id: u64 },
    #[error("incident {id}: reported_at '{value}' is not a valid timestamp")]
    InvalidTimestamp { id: u64, value: String },
}

pub fn validate_record(record: &IncidentRecord) -> Result<(), RecordError> {
    if record.title.trim().is_empty() {
        return Err(RecordError::EmptyTitle { id: record.id });
    }
    if record.reported_at_time().is_none() {
        return Err(RecordError::InvalidTimestamp {
            id: record.id,
            value: record.reported_at.clone(),
        });
    }
    Ok(())
}

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parses an ISO-8601 report time into UTC.
///
/// Accepts RFC 3339 with any offset, the same without seconds
/// (`2025-03-15T10:00Z`), an offset-less date-time with or without seconds
/// (read as UTC) and a bare date (UTC midnight).
pub fn parse_reported_at(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(ts) = DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M%#z") {
        return Some(ts.with_timezone(&Utc));
    }
    let naive_text = value
        .strip_suffix(|c: char| c == 'Z' || c == 'z')
        .unwrap_or(value);
    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(naive_text, format).ok())
    {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
