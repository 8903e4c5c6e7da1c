// 📥 Ingest - raw scraped rows in, grouped records out
// Adapters for rows already extracted to CSV or JSON

use crate::attributes::AttributeKind;
use crate::catalog::Catalog;
use crate::error::{CatalogError, Result};
use crate::group::AddOutcome;
use crate::record::Record;
use crate::value::RawValue;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Read;
use tracing::{info, warn};

// ============================================================================
// CONFIGURATION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// CSV column holding the term identifier
    pub term_column: String,

    /// CSV column holding the subject identifier
    pub subject_column: String,

    /// Skip rows with invalid values or orphan continuations instead of
    /// aborting the whole ingest
    pub skip_invalid_rows: bool,

    /// Trim CSV cells; a cell that ends up empty counts as absent
    pub trim_cells: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        IngestConfig {
            term_column: "term".to_string(),
            subject_column: "subject".to_string(),
            skip_invalid_rows: false,
            trim_cells: true,
        }
    }
}

impl IngestConfig {
    /// Load from JSON; missing keys keep their defaults
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}

// ============================================================================
// RAW ROWS
// ============================================================================

/// RawRow - one scraped catalog row plus the group it belongs to
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub term: String,
    pub subject: String,
    pub fields: Vec<(String, RawValue)>,
}

impl RawRow {
    pub fn new(term: impl Into<String>, subject: impl Into<String>) -> Self {
        RawRow {
            term: term.into(),
            subject: subject.into(),
            fields: Vec::new(),
        }
    }

    /// Builder: add a named field
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }
}

#[derive(Debug, Deserialize)]
struct JsonRow {
    term: String,
    subject: String,
    #[serde(default)]
    fields: serde_json::Map<String, serde_json::Value>,
}

/// Read CSV rows. Headers name the columns; every column (including the
/// subject column) is offered to the record as a field.
pub fn read_csv_rows<R: Read>(reader: R, config: &IngestConfig) -> Result<Vec<RawRow>> {
    let trim = if config.trim_cells { csv::Trim::All } else { csv::Trim::None };
    let mut rdr = csv::ReaderBuilder::new().trim(trim).from_reader(reader);

    let headers = rdr.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| CatalogError::MissingColumn(name.to_string()))
    };
    let term_idx = column(&config.term_column)?;
    let subject_idx = column(&config.subject_column)?;

    let mut rows = Vec::new();

    for result in rdr.records() {
        let record = result?;
        let cell = |idx: usize| record.get(idx).unwrap_or_default().to_string();

        let fields = headers
            .iter()
            .zip(record.iter())
            .map(|(name, value)| {
                let raw = if value.is_empty() {
                    RawValue::Absent
                } else {
                    RawValue::from(value)
                };
                (name.to_string(), raw)
            })
            .collect();

        rows.push(RawRow {
            term: cell(term_idx),
            subject: cell(subject_idx),
            fields,
        });
    }

    Ok(rows)
}

/// Read a JSON array of `{"term", "subject", "fields": {name: value}}`.
pub fn read_json_rows<R: Read>(reader: R) -> Result<Vec<RawRow>> {
    let rows: Vec<JsonRow> = serde_json::from_reader(reader)?;

    Ok(rows
        .into_iter()
        .map(|row| RawRow {
            term: row.term,
            subject: row.subject,
            fields: row
                .fields
                .into_iter()
                .map(|(name, value)| (name, RawValue::from(value)))
                .collect(),
        })
        .collect())
}

// ============================================================================
// INGEST
// ============================================================================

#[derive(Debug, Default)]
pub struct IngestReport {
    pub catalog: Catalog,
    pub rows_read: usize,
    pub rows_skipped: usize,
    pub continuations_merged: usize,
}

impl IngestReport {
    pub fn summary(&self) -> String {
        format!(
            "{} rows read, {} courses in {} groups, {} continuations merged, {} rows skipped",
            self.rows_read,
            self.catalog.record_count(),
            self.catalog.groups().len(),
            self.continuations_merged,
            self.rows_skipped
        )
    }
}

/// True when a row names a course (non-absent reference number), judged
/// from the raw fields so rows that fail validation are classified too.
fn carries_reference_number(fields: &[(String, RawValue)]) -> bool {
    fields.iter().any(|(name, value)| {
        AttributeKind::from_name(name) == Some(AttributeKind::ReferenceNumber)
            && match value {
                RawValue::Absent => false,
                RawValue::List(items) => items.iter().any(|item| !item.is_absent()),
                _ => true,
            }
    })
}

/// Build a record per row and group them.
///
/// With `skip_invalid_rows`, row-level errors are logged and counted;
/// otherwise the first error aborts. Once a course row is skipped, the
/// continuation rows that follow it in the same group are skipped as well
/// until the next accepted course row.
pub fn ingest_rows<I>(rows: I, config: &IngestConfig) -> Result<IngestReport>
where
    I: IntoIterator<Item = RawRow>,
{
    let mut report = IngestReport::default();
    let mut skipping_continuations: HashSet<(String, String)> = HashSet::new();

    for (index, row) in rows.into_iter().enumerate() {
        report.rows_read += 1;
        let line = index + 1;
        let key = (row.term.clone(), row.subject.clone());
        let is_primary = carries_reference_number(&row.fields);

        if !is_primary && skipping_continuations.contains(&key) {
            warn!(row = line, term = %row.term, subject = %row.subject, "skipping continuation of a skipped course");
            report.rows_skipped += 1;
            continue;
        }

        let outcome = Record::from_fields(row.fields)
            .and_then(|record| report.catalog.add_record(&row.term, &row.subject, record));

        match outcome {
            Ok(AddOutcome::Appended) => {
                skipping_continuations.remove(&key);
            }
            Ok(AddOutcome::Merged) => report.continuations_merged += 1,
            Err(err) if config.skip_invalid_rows && err.is_row_level() => {
                warn!(row = line, term = %row.term, subject = %row.subject, "skipping row: {}", err);
                report.rows_skipped += 1;
                if is_primary {
                    skipping_continuations.insert(key);
                }
            }
            Err(err) => return Err(err),
        }
    }

    info!("{}", report.summary());
    Ok(report)
}

pub fn ingest_csv<R: Read>(reader: R, config: &IngestConfig) -> Result<IngestReport> {
    let rows = read_csv_rows(reader, config)?;
    ingest_rows(rows, config)
}

pub fn ingest_json<R: Read>(reader: R, config: &IngestConfig) -> Result<IngestReport> {
    let rows = read_json_rows(reader)?;
    ingest_rows(rows, config)
}

// ============================================================================
// TESTS
// ============================================================================
