// 📇 Record - one course offering built from scraped attributes
// Enforces integer coercion and multiplicity on every insert

use crate::attributes::AttributeKind;
use crate::error::{CatalogError, Result};
use crate::value::{AttributeValue, RawValue, Scalar};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use tracing::trace;

/// Normalized view of a record: display name → value, sorted by display name
pub type NormalizedRecord = BTreeMap<&'static str, AttributeValue>;

// ============================================================================
// RECORD
// ============================================================================

/// Record - attribute container for a single course offering.
///
/// Invariants:
/// - integer-coerced kinds only ever hold `Scalar::Integer`
/// - multiple-valued kinds only ever hold `AttributeValue::Multiple`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    attributes: BTreeMap<AttributeKind, AttributeValue>,
}

impl Record {
    pub fn new() -> Self {
        Record {
            attributes: BTreeMap::new(),
        }
    }

    /// Build a record from named raw fields.
    ///
    /// Names resolve through `AttributeKind::from_name`; unknown names are
    /// skipped (scraped tables carry columns outside the schema).
    pub fn from_fields<I, N, V>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: Into<RawValue>,
    {
        let mut record = Record::new();

        for (name, value) in fields {
            match AttributeKind::from_name(name.as_ref()) {
                Some(kind) => record.add_attribute(kind, value)?,
                None => trace!(column = name.as_ref(), "ignoring column outside the schema"),
            }
        }

        Ok(record)
    }

    /// Add a raw value for `kind`.
    ///
    /// - `Absent` (alone or inside a list) is ignored
    /// - multiple-valued kinds append, in call order
    /// - all other kinds overwrite (last write wins)
    /// - integer kinds parse text; non-numeric text is rejected
    ///
    /// The whole value is validated before anything is stored, so a rejected
    /// call leaves the record unchanged.
    pub fn add_attribute(&mut self, kind: AttributeKind, value: impl Into<RawValue>) -> Result<()> {
        let scalars = match value.into() {
            RawValue::List(items) => {
                let mut scalars = Vec::with_capacity(items.len());
                for item in items {
                    if let Some(scalar) = coerce_element(kind, item)? {
                        scalars.push(scalar);
                    }
                }
                scalars
            }
            other => coerce_element(kind, other)?.into_iter().collect(),
        };

        for scalar in scalars {
            self.store(kind, scalar);
        }

        Ok(())
    }

    fn store(&mut self, kind: AttributeKind, scalar: Scalar) {
        if kind.allows_multiple() {
            // Multiple-valued kinds never hold `Single`; first value opens the list
            match self.attributes.get_mut(&kind) {
                Some(AttributeValue::Multiple(values)) => values.push(scalar),
                _ => {
                    self.attributes.insert(kind, AttributeValue::Multiple(vec![scalar]));
                }
            }
        } else {
            self.attributes.insert(kind, AttributeValue::Single(scalar));
        }
    }

    pub fn get(&self, kind: AttributeKind) -> Option<&AttributeValue> {
        self.attributes.get(&kind)
    }

    /// Unique course reference number (CRN), if present
    pub fn reference_number(&self) -> Option<i64> {
        self.get(AttributeKind::ReferenceNumber)
            .and_then(AttributeValue::as_single)
            .and_then(Scalar::as_integer)
    }

    /// A row without a reference number continues the previous course
    pub fn is_continuation(&self) -> bool {
        !self.attributes.contains_key(&AttributeKind::ReferenceNumber)
    }

    /// Populated kinds in schema order
    pub fn kinds(&self) -> impl Iterator<Item = AttributeKind> + '_ {
        self.attributes.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Export display name → value, sorted by display name.
    pub fn export_normalized(&self) -> NormalizedRecord {
        self.attributes
            .iter()
            .map(|(kind, value)| (kind.display_name(), value.clone()))
            .collect()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.export_normalized().serialize(serializer)
    }
}

/// Validate one element against `kind`. `Ok(None)` means "absent, skip".
fn coerce_element(kind: AttributeKind, value: RawValue) -> Result<Option<Scalar>> {
    match value {
        RawValue::Absent => Ok(None),
        RawValue::Integer(n) => Ok(Some(Scalar::Integer(n))),
        RawValue::Text(text) if kind.coerce_to_integer() => match text.parse::<i64>() {
            Ok(n) => Ok(Some(Scalar::Integer(n))),
            Err(_) => Err(CatalogError::invalid_attribute(
                kind,
                "string",
                format!("{:?} is not an integer", text),
            )),
        },
        RawValue::Text(text) => Ok(Some(Scalar::Text(text))),
        other => Err(CatalogError::invalid_attribute(
            kind,
            other.type_name(),
            "expected a string, an integer, or a list of those",
        )),
    }
}

// ============================================================================
// TESTS
// ============================================================================
