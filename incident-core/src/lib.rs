//! In-memory model behind the AI safety incident dashboard.
//!
//! [`store::IncidentStore`] holds records in insertion order and only grows by
//! append. Display order comes from [`view::derive_view`], which filters by
//! severity and then sorts by report time without touching the store.

pub mod record;
pub mod seed;
pub mod store;
pub mod view;

pub use record::{IncidentRecord, RecordError, Severity, validate_record};
pub use store::{IncidentStore, StoreError};
pub use view::{SelectorError, SeveritySelector, SortOrder, ViewState, derive_view, filter, sort};
