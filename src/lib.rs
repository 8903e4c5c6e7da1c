// Course Catalog - Core Library
// Normalizes scraped catalog rows into typed records grouped by term + subject

pub mod attributes;  // Attribute schema - kinds, display names, coercion flags
pub mod value;       // Raw input and stored value shapes
pub mod error;       // CatalogError
pub mod record;      // Record - attribute container
pub mod group;       // RecordGroup - continuation merge
pub mod catalog;     // Catalog - groups keyed by (term, subject)
pub mod ingest;      // CSV / JSON row adapters
pub mod logging;     // tracing setup for binaries

// Re-export commonly used types
pub use attributes::{AttributeDefinition, AttributeKind};
pub use value::{AttributeValue, RawValue, Scalar};
pub use error::{CatalogError, Result};
pub use record::{NormalizedRecord, Record};
pub use group::{AddOutcome, RecordGroup};
pub use catalog::Catalog;
pub use ingest::{
    IngestConfig, IngestReport, RawRow,
    read_csv_rows, read_json_rows, ingest_rows, ingest_csv, ingest_json,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
