//! Derived views over the incident store.
//!
//! Both stages are pure: they borrow records from the store and return new
//! vectors of references, leaving the store and their input untouched.

use crate::record::{IncidentRecord, Severity};
use crate::store::IncidentStore;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("unknown severity filter '{0}'")]
    UnknownSeverity(String),
    #[error("unknown sort order '{0}'")]
    UnknownSortOrder(String),
}

// ── Filter stage ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SeveritySelector {
    #[default]
    All,
    Only(Severity),
}

impl SeveritySelector {
    pub const OPTIONS: [SeveritySelector; 4] = [
        SeveritySelector::All,
        SeveritySelector::Only(Severity::Low),
        SeveritySelector::Only(Severity::Medium),
        SeveritySelector::Only(Severity::High),
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SeveritySelector::All => "All",
            SeveritySelector::Only(severity) => severity.as_str(),
        }
    }

    pub fn matches(&self, record: &IncidentRecord) -> bool {
        match self {
            SeveritySelector::All => true,
            SeveritySelector::Only(severity) => record.severity == *severity,
        }
    }
}

impl fmt::Display for SeveritySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SeveritySelector {
    type Err = SelectorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value == "All" {
            return Ok(SeveritySelector::All);
        }
        value
            .parse::<Severity>()
            .map(SeveritySelector::Only)
            .map_err(|_| SelectorError::UnknownSeverity(value.to_string()))
    }
}

impl TryFrom<String> for SeveritySelector {
    type Error = SelectorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SeveritySelector> for String {
    fn from(selector: SeveritySelector) -> Self {
        selector.label().to_string()
    }
}

pub fn filter<'a>(
    records: impl IntoIterator<Item = &'a IncidentRecord>,
    selector: SeveritySelector,
) -> Vec<&'a IncidentRecord> {
    records
        .into_iter()
        .filter(|record| selector.matches(record))
        .collect()
}

/// Filters by a raw selector label. Labels that name no severity match
/// nothing and yield an empty view rather than an error.
pub fn filter_by_label<'a>(
    records: impl IntoIterator<Item = &'a IncidentRecord>,
    label: &str,
) -> Vec<&'a IncidentRecord> {
    match label.parse::<SeveritySelector>() {
        Ok(selector) => filter(records, selector),
        Err(_) => Vec::new(),
    }
}

// ── Sort stage ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "Newest First")]
    NewestFirst,
    #[serde(rename = "Oldest First")]
    OldestFirst,
}

impl SortOrder {
    pub const OPTIONS: [SortOrder; 2] = [SortOrder::NewestFirst, SortOrder::OldestFirst];

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::NewestFirst => "Newest First",
            SortOrder::OldestFirst => "Oldest First",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortOrder {
    type Err = SelectorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        SortOrder::OPTIONS
            .into_iter()
            .find(|order| order.label() == value)
            .ok_or_else(|| SelectorError::UnknownSortOrder(value.to_string()))
    }
}

/// Orders records by parsed report time. The sort is stable, so records
/// reported at the same instant keep their input order.
///
/// A `reported_at` that does not parse counts as earlier than any valid time:
/// such records trail a newest-first view and lead an oldest-first one.
pub fn sort<'a>(
    records: impl IntoIterator<Item = &'a IncidentRecord>,
    order: SortOrder,
) -> Vec<&'a IncidentRecord> {
    let mut sorted: Vec<&IncidentRecord> = records.into_iter().collect();
    match order {
        SortOrder::NewestFirst => sorted.sort_by_cached_key(|r| Reverse(r.reported_at_time())),
        SortOrder::OldestFirst => sorted.sort_by_cached_key(|r| r.reported_at_time()),
    }
    sorted
}

// ── View state ───────────────────────────────────────────────────────────────

/// Selector slots the presentation layer keeps and passes on every render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub severity: SeveritySelector,
    pub order: SortOrder,
}

pub fn derive_view<'a>(store: &'a IncidentStore, state: &ViewState) -> Vec<&'a IncidentRecord> {
    sort(filter(store.all(), state.severity), state.order)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, severity: Severity, reported_at: &str) -> IncidentRecord {
        IncidentRecord::new(id, format!("incident {id}"), "", severity, reported_at)
    }

    fn ids(records: &[&IncidentRecord]) -> Vec<u64> {
        records.iter().map(|r| r.id).collect()
    }

    fn sample() -> Vec<IncidentRecord> {
        vec![
            record(1, Severity::Medium, "2025-03-15T10:00:00Z"),
            record(2, Severity::High, "2025-04-01T14:30:00Z"),
            record(3, Severity::Low, "2025-03-20T09:15:00Z"),
            record(4, Severity::High, "2025-01-01T00:00:00Z"),
        ]
    }

    #[test]
    fn all_selector_returns_everything_in_order() {
        let records = sample();
        assert_eq!(ids(&filter(&records, SeveritySelector::All)), vec![1, 2, 3, 4]);
    }

    #[test]
    fn severity_selector_keeps_matching_subsequence() {
        let records = sample();
        let high = filter(&records, SeveritySelector::Only(Severity::High));
        assert_eq!(ids(&high), vec![2, 4]);
        assert!(high.iter().all(|r| r.severity == Severity::High));
    }

    #[test]
    fn unknown_label_filters_to_nothing() {
        let records = sample();
        assert!(filter_by_label(&records, "Critical").is_empty());
        assert!(filter_by_label(&records, "high").is_empty());
        assert_eq!(ids(&filter_by_label(&records, "Low")), vec![3]);
        assert_eq!(filter_by_label(&records, "All").len(), records.len());
    }

    #[test]
    fn selector_labels_parse_strictly() {
        assert_eq!("All".parse::<SeveritySelector>(), Ok(SeveritySelector::All));
        assert_eq!(
            "Medium".parse::<SeveritySelector>(),
            Ok(SeveritySelector::Only(Severity::Medium))
        );
        assert_eq!(
            "all".parse::<SeveritySelector>(),
            Err(SelectorError::UnknownSeverity("all".into()))
        );
        assert_eq!("Oldest First".parse::<SortOrder>(), Ok(SortOrder::OldestFirst));
        assert_eq!(
            "newest".parse::<SortOrder>(),
            Err(SelectorError::UnknownSortOrder("newest".into()))
        );
    }

    #[test]
    fn selectors_serialize_as_labels() {
        let state = ViewState {
            severity: SeveritySelector::Only(Severity::High),
            order: SortOrder::OldestFirst,
        };
        let json = serde_json::to_value(state).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"severity": "High", "order": "Oldest First"})
        );
        let back: ViewState = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, state);
        assert!(serde_json::from_value::<SeveritySelector>(serde_json::json!("Severe")).is_err());
    }

    #[test]
    fn sorts_chronologically_both_ways() {
        let records = sample();
        assert_eq!(ids(&sort(&records, SortOrder::NewestFirst)), vec![2, 3, 1, 4]);
        assert_eq!(ids(&sort(&records, SortOrder::OldestFirst)), vec![4, 1, 3, 2]);
    }

    #[test]
    fn compares_instants_not_strings() {
        // 10:00 at +02:00 is 08:00Z, earlier than 09:00Z despite sorting later as text.
        let records = vec![
            record(1, Severity::Low, "2025-03-15T10:00:00+02:00"),
            record(2, Severity::Low, "2025-03-15T09:00:00Z"),
        ];
        assert_eq!(ids(&sort(&records, SortOrder::OldestFirst)), vec![1, 2]);
        assert_eq!(ids(&sort(&records, SortOrder::NewestFirst)), vec![2, 1]);
    }

    #[test]
    fn minute_precision_times_sort_by_instant() {
        let records = vec![
            record(1, Severity::Low, "2025-03-15T10:00Z"),
            record(2, Severity::Low, "2025-03-14T00:00:00Z"),
            record(3, Severity::Low, "2025-03-15T09:30"),
        ];
        assert_eq!(ids(&sort(&records, SortOrder::NewestFirst)), vec![1, 3, 2]);
        assert_eq!(ids(&sort(&records, SortOrder::OldestFirst)), vec![2, 3, 1]);
    }

    #[test]
    fn equal_timestamps_keep_input_order() {
        let records = vec![
            record(1, Severity::Low, "2025-03-15T10:00:00Z"),
            record(2, Severity::High, "2025-03-16T10:00:00Z"),
            record(3, Severity::Medium, "2025-03-15T10:00:00Z"),
            record(4, Severity::High, "2025-03-15T12:00:00+02:00"),
        ];
        assert_eq!(ids(&sort(&records, SortOrder::NewestFirst)), vec![2, 1, 3, 4]);
        assert_eq!(ids(&sort(&records, SortOrder::OldestFirst)), vec![1, 3, 4, 2]);
    }

    #[test]
    fn sort_is_idempotent_and_does_not_touch_input() {
        let records = sample();
        for order in SortOrder::OPTIONS {
            let once = sort(&records, order);
            let twice = sort(once.iter().copied(), order);
            assert_eq!(once, twice);
        }
        assert_eq!(records, sample());
    }

    #[test]
    fn unparseable_times_trail_newest_first() {
        let records = vec![
            record(1, Severity::Low, "not a date"),
            record(2, Severity::Low, "2025-03-15T10:00:00Z"),
            record(3, Severity::Low, "also bad"),
        ];
        assert_eq!(ids(&sort(&records, SortOrder::NewestFirst)), vec![2, 1, 3]);
        assert_eq!(ids(&sort(&records, SortOrder::OldestFirst)), vec![1, 3, 2]);
    }

    #[test]
    fn derive_view_applies_filter_then_sort() {
        let store = IncidentStore::seeded(sample()).expect("seed");
        let state = ViewState {
            severity: SeveritySelector::Only(Severity::High),
            order: SortOrder::OldestFirst,
        };
        assert_eq!(ids(&derive_view(&store, &state)), vec![4, 2]);
        assert_eq!(ids(&derive_view(&store, &ViewState::default())), vec![2, 3, 1, 4]);
    }
}
