//! Error types for record building and grouping.

use crate::attributes::AttributeKind;
use thiserror::Error;

/// Catalog operation result type.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Catalog errors.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Raw value of an unsupported type, or non-numeric text for an integer kind
    #[error("Invalid value for attribute {kind}: got {found} ({reason})")]
    InvalidAttribute {
        kind: AttributeKind,
        found: &'static str,
        reason: String,
    },

    /// Continuation row with no preceding course in its group
    #[error("Continuation row has no preceding course (term {term}, subject {subject})")]
    OrphanContinuation { term: String, subject: String },

    /// Required input column missing
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// CSV error (input boundary)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON error (input boundary)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CatalogError {
    /// Create an invalid attribute error.
    pub fn invalid_attribute(kind: AttributeKind, found: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidAttribute {
            kind,
            found,
            reason: reason.into(),
        }
    }

    /// Create an orphan continuation error.
    pub fn orphan_continuation(term: impl Into<String>, subject: impl Into<String>) -> Self {
        Self::OrphanContinuation {
            term: term.into(),
            subject: subject.into(),
        }
    }

    /// Errors caused by one bad row rather than by the input stream itself
    pub fn is_row_level(&self) -> bool {
        matches!(
            self,
            CatalogError::InvalidAttribute { .. } | CatalogError::OrphanContinuation { .. }
        )
    }
}
