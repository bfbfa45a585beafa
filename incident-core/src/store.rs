use crate::record::IncidentRecord;
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("incident id {id} already exists")]
    DuplicateId { id: u64 },
}

/// Append-only, insertion-ordered collection of incident records.
///
/// There is no update or delete: once appended a record stays for the life
/// of the store. Reordering only ever happens in derived views.
#[derive(Clone, Debug, Default)]
pub struct IncidentStore {
    records: Vec<IncidentRecord>,
    ids: BTreeSet<u64>,
}

impl IncidentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(records: impl IntoIterator<Item = IncidentRecord>) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for record in records {
            store.append(record)?;
        }
        Ok(store)
    }

    /// Appends `record` at the end. A rejected record leaves the store untouched.
    pub fn append(&mut self, record: IncidentRecord) -> Result<(), StoreError> {
        if !self.ids.insert(record.id) {
            tracing::warn!(id = record.id, "rejected incident with duplicate id");
            return Err(StoreError::DuplicateId { id: record.id });
        }
        tracing::debug!(id = record.id, severity = %record.severity, "incident appended");
        self.records.push(record);
        Ok(())
    }

    pub fn all(&self) -> &[IncidentRecord] {
        &self.records
    }

    pub fn get(&self, id: u64) -> Option<&IncidentRecord> {
        if !self.contains(id) {
            return None;
        }
        self.records.iter().find(|r| r.id == id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Next free id: one past the largest id stored so far.
    pub fn next_id(&self) -> u64 {
        self.ids
            .last()
            .map(|max| max.saturating_add(1))
            .unwrap_or(1)
    }
}
