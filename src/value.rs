// 🧱 Values - raw scraped input and normalized stored values

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// RAW INPUT
// ============================================================================

/// RawValue - a scraped field as handed over by the row extractor.
///
/// `Float` and `Boolean` exist so dynamically typed sources (JSON) can be
/// represented as-is; the record rejects them.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Absent,
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    List(Vec<RawValue>),
    Object(Vec<(String, RawValue)>),
}

impl RawValue {
    /// Runtime type name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            RawValue::Absent => "null",
            RawValue::Text(_) => "string",
            RawValue::Integer(_) => "integer",
            RawValue::Float(_) => "float",
            RawValue::Boolean(_) => "boolean",
            RawValue::List(_) => "list",
            RawValue::Object(_) => "object",
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, RawValue::Absent)
    }
}

impl Default for RawValue {
    fn default() -> Self {
        RawValue::Absent
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Integer(value)
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        RawValue::Integer(i64::from(value))
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Float(value)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(RawValue::Absent)
    }
}

impl<T: Into<RawValue>> From<Vec<T>> for RawValue {
    fn from(values: Vec<T>) -> Self {
        RawValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<Scalar> for RawValue {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Text(s) => RawValue::Text(s),
            Scalar::Integer(n) => RawValue::Integer(n),
        }
    }
}

impl From<AttributeValue> for RawValue {
    fn from(value: AttributeValue) -> Self {
        match value {
            AttributeValue::Single(scalar) => scalar.into(),
            AttributeValue::Multiple(scalars) => scalars.into(),
        }
    }
}

impl From<serde_json::Value> for RawValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => RawValue::Absent,
            Value::Bool(b) => RawValue::Boolean(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => RawValue::Integer(i),
                None => RawValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => RawValue::Text(s),
            Value::Array(items) => RawValue::List(items.into_iter().map(RawValue::from).collect()),
            Value::Object(map) => {
                RawValue::Object(map.into_iter().map(|(k, v)| (k, RawValue::from(v))).collect())
            }
        }
    }
}

// ============================================================================
// STORED VALUES
// ============================================================================

/// Scalar - the only shapes a record ever stores
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Integer(i64),
    Text(String),
}

impl Scalar {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Scalar::Integer(n) => Some(*n),
            Scalar::Text(_) => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Integer(n) => write!(f, "{}", n),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Integer(value)
    }
}

/// AttributeValue - what a record holds for one kind.
///
/// Multiple-valued kinds always hold `Multiple`, even with one element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Single(Scalar),
    Multiple(Vec<Scalar>),
}

impl AttributeValue {
    pub fn as_single(&self) -> Option<&Scalar> {
        match self {
            AttributeValue::Single(s) => Some(s),
            AttributeValue::Multiple(_) => None,
        }
    }

    pub fn as_multiple(&self) -> Option<&[Scalar]> {
        match self {
            AttributeValue::Multiple(values) => Some(values),
            AttributeValue::Single(_) => None,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_value() {
        assert_eq!(RawValue::from(json!(null)), RawValue::Absent);
        assert_eq!(RawValue::from(json!("MWF")), RawValue::Text("MWF".to_string()));
        assert_eq!(RawValue::from(json!(3)), RawValue::Integer(3));
        assert_eq!(RawValue::from(json!(3.5)), RawValue::Float(3.5));
        assert_eq!(RawValue::from(json!(true)), RawValue::Boolean(true));
        assert_eq!(
            RawValue::from(json!(["a", 1, null])),
            RawValue::List(vec![
                RawValue::Text("a".to_string()),
                RawValue::Integer(1),
                RawValue::Absent,
            ])
        );
    }

    #[test]
    fn test_json_object_keeps_its_type() {
        let raw = RawValue::from(json!({"a": 1}));
        assert_eq!(raw.type_name(), "object");
        assert_eq!(
            raw,
            RawValue::Object(vec![("a".to_string(), RawValue::Integer(1))])
        );
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(RawValue::from(None::<&str>), RawValue::Absent);
        assert_eq!(RawValue::from(Some("T")), RawValue::Text("T".to_string()));
    }

    #[test]
    fn test_attribute_value_serializes_untagged() {
        let single = AttributeValue::Single(Scalar::Integer(4));
        let multiple = AttributeValue::Multiple(vec!["MWF".into(), "T".into()]);

        assert_eq!(serde_json::to_value(&single).unwrap(), json!(4));
        assert_eq!(serde_json::to_value(&multiple).unwrap(), json!(["MWF", "T"]));
    }
}
