// 🗂️ Record Group - all courses for one (term, subject) pair
// Folds continuation rows into the course they follow

use crate::attributes::AttributeKind;
use crate::error::{CatalogError, Result};
use crate::record::{NormalizedRecord, Record};
use crate::value::RawValue;
use serde::Serialize;
use tracing::debug;

/// Outcome of `RecordGroup::add_class`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Candidate had a reference number and became a new record
    Appended,
    /// Candidate was a continuation and was folded into the last record
    Merged,
}

/// RecordGroup - ordered courses for one term and subject.
///
/// Every record in `classes` carries a reference number; continuation rows
/// never get appended.
#[derive(Debug, Clone, Serialize)]
pub struct RecordGroup {
    term: String,
    subject: String,
    classes: Vec<Record>,
}

impl RecordGroup {
    pub fn new(term: impl Into<String>, subject: impl Into<String>) -> Self {
        RecordGroup {
            term: term.into(),
            subject: subject.into(),
            classes: Vec::new(),
        }
    }

    /// Absorb a scraped record.
    ///
    /// A record without a reference number is an extra meeting pattern
    /// (days, time, location, instructor) of the most recent course and is
    /// merged into it. Otherwise the record is appended.
    ///
    /// Continuations are assumed to directly follow their course; one that
    /// arrives after an unrelated course is merged into that course.
    pub fn add_class(&mut self, candidate: Record) -> Result<AddOutcome> {
        if !candidate.is_continuation() {
            self.classes.push(candidate);
            return Ok(AddOutcome::Appended);
        }

        let Some(previous) = self.classes.last_mut() else {
            return Err(CatalogError::orphan_continuation(&self.term, &self.subject));
        };

        for kind in AttributeKind::CONTINUATION_KINDS {
            let value = candidate
                .get(kind)
                .cloned()
                .map(RawValue::from)
                .unwrap_or_default();
            previous.add_attribute(kind, value)?;
        }

        debug!(
            term = %self.term,
            subject = %self.subject,
            crn = ?previous.reference_number(),
            "merged continuation row"
        );

        Ok(AddOutcome::Merged)
    }

    pub fn classes(&self) -> &[Record] {
        &self.classes
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Normalized view of every record, in order
    pub fn export(&self) -> Vec<NormalizedRecord> {
        self.classes.iter().map(Record::export_normalized).collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{AttributeValue, Scalar};

    fn record(fields: &[(&str, &str)]) -> Record {
        Record::from_fields(fields.iter().copied()).unwrap()
    }

    fn texts(values: &[&str]) -> AttributeValue {
        AttributeValue::Multiple(values.iter().map(|v| Scalar::from(*v)).collect())
    }

    #[test]
    fn test_new_group_is_empty() {
        let group = RecordGroup::new("Fall2024", "CS");
        assert_eq!(group.term(), "Fall2024");
        assert_eq!(group.subject(), "CS");
        assert!(group.is_empty());
        assert!(group.classes().is_empty());
    }

    #[test]
    fn test_continuation_merges_into_previous() {
        let mut group = RecordGroup::new("Fall2024", "CS");

        let primary = record(&[
            ("ReferenceNumber", "10234"),
            ("ShortCourseName", "CS101"),
            ("Days", "MWF"),
            ("Time", "10:00"),
            ("Instructor", "Smith"),
        ]);
        let continuation = record(&[("Days", "T"), ("Time", "14:00"), ("Instructor", "Jones")]);

        assert_eq!(group.add_class(primary).unwrap(), AddOutcome::Appended);
        assert_eq!(group.add_class(continuation).unwrap(), AddOutcome::Merged);

        assert_eq!(group.len(), 1);
        let export = &group.export()[0];
        assert_eq!(export["Days"], texts(&["MWF", "T"]));
        assert_eq!(export["Time"], texts(&["10:00", "14:00"]));
        assert_eq!(export["Instructor"], texts(&["Smith", "Jones"]));
        assert_eq!(export["CRN"], AttributeValue::Single(Scalar::Integer(10234)));
        assert!(!export.contains_key("Location"));
    }

    #[test]
    fn test_records_with_reference_numbers_stay_distinct() {
        let mut group = RecordGroup::new("Fall2024", "CS");
        group.add_class(record(&[("CRN", "10234"), ("Course", "CS101")])).unwrap();
        group.add_class(record(&[("CRN", "10235"), ("Course", "CS102")])).unwrap();

        let crns: Vec<_> = group.classes().iter().map(Record::reference_number).collect();
        assert_eq!(crns, vec![Some(10234), Some(10235)]);
    }

    #[test]
    fn test_orphan_continuation_rejected() {
        let mut group = RecordGroup::new("Fall2024", "CS");
        let err = group
            .add_class(record(&[("Days", "T"), ("Time", "14:00")]))
            .unwrap_err();

        match err {
            CatalogError::OrphanContinuation { term, subject } => {
                assert_eq!(term, "Fall2024");
                assert_eq!(subject, "CS");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(group.is_empty());
    }

    #[test]
    fn test_continuation_merges_into_latest_only() {
        let mut group = RecordGroup::new("Spring2025", "PH");
        group.add_class(record(&[("CRN", "1"), ("Days", "MW")])).unwrap();
        group.add_class(record(&[("CRN", "2"), ("Days", "TR")])).unwrap();
        group.add_class(record(&[("Days", "F"), ("Location", "LAB 3")])).unwrap();

        let export = group.export();
        assert_eq!(export[0]["Days"], texts(&["MW"]));
        assert_eq!(export[1]["Days"], texts(&["TR", "F"]));
        assert_eq!(export[1]["Location"], texts(&["LAB 3"]));
    }

    #[test]
    fn test_continuation_ignores_non_meeting_attributes() {
        let mut group = RecordGroup::new("Fall2024", "CS");
        group.add_class(record(&[("CRN", "10234"), ("Title", "Compilers")])).unwrap();
        group
            .add_class(record(&[("Title", "Recitation"), ("Hrs", "0"), ("Days", "R")]))
            .unwrap();

        let export = &group.export()[0];
        assert_eq!(export["Title"], AttributeValue::Single(Scalar::from("Compilers")));
        assert!(!export.contains_key("Hrs"));
        assert_eq!(export["Days"], texts(&["R"]));
    }

    #[test]
    fn test_repeated_continuations_accumulate() {
        let mut group = RecordGroup::new("Fall2024", "CS");
        group.add_class(record(&[("CRN", "7"), ("Instructor", "Smith")])).unwrap();
        for name in ["Jones", "Lee", "Smith"] {
            group.add_class(record(&[("Instructor", name)])).unwrap();
        }

        assert_eq!(
            group.export()[0]["Instructor"],
            texts(&["Smith", "Jones", "Lee", "Smith"])
        );
    }

    #[test]
    fn test_serializes_term_subject_and_classes() {
        let mut group = RecordGroup::new("Fall2024", "CS");
        group.add_class(record(&[("CRN", "10234"), ("Days", "MWF")])).unwrap();

        let json = serde_json::to_value(&group).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "term": "Fall2024",
                "subject": "CS",
                "classes": [{"CRN": 10234, "Days": ["MWF"]}]
            })
        );
    }
}
