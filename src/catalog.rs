// 📚 Catalog - record groups keyed by (term, subject)

use crate::error::Result;
use crate::group::{AddOutcome, RecordGroup};
use crate::record::Record;
use std::collections::HashMap;

/// Catalog - one `RecordGroup` per term and subject, in first-seen order.
///
/// Continuations only ever merge within their own group.
#[derive(Debug, Default)]
pub struct Catalog {
    groups: Vec<RecordGroup>,
    index: HashMap<(String, String), usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route a record to its group, creating the group on first sight.
    ///
    /// A continuation that would open a new group fails with
    /// `OrphanContinuation` and leaves no empty group behind.
    pub fn add_record(&mut self, term: &str, subject: &str, record: Record) -> Result<AddOutcome> {
        let key = (term.to_string(), subject.to_string());

        if let Some(&position) = self.index.get(&key) {
            return self.groups[position].add_class(record);
        }

        let mut group = RecordGroup::new(term, subject);
        let outcome = group.add_class(record)?;
        self.index.insert(key, self.groups.len());
        self.groups.push(group);
        Ok(outcome)
    }

    pub fn group(&self, term: &str, subject: &str) -> Option<&RecordGroup> {
        self.index
            .get(&(term.to_string(), subject.to_string()))
            .map(|&position| &self.groups[position])
    }

    pub fn groups(&self) -> &[RecordGroup] {
        &self.groups
    }

    pub fn into_groups(self) -> Vec<RecordGroup> {
        self.groups
    }

    /// Total records across all groups
    pub fn record_count(&self) -> usize {
        self.groups.iter().map(RecordGroup::len).sum()
    }
}

// ============================================================================
// TESTS
// ============================================================================
