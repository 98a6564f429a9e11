//! Core data types of the execution engine.
//!
//! This module contains the two types every other component is built on:
//! - [`Value`] - the tagged value model a tuple field may hold
//! - [`Tuple`] - one input record plus its envelope metadata

use crate::sql::error::{SqlError, SqlResult};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::HashMap;

/// A value in a tuple field
///
/// This enum represents every kind of data the engine processes. Equality
/// is structural; nested maps compare key-set-wise. Cloning a value is a
/// deep copy.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Boolean value (true/false)
    Bool(bool),
    /// 64-bit signed integer
    Integer(i64),
    /// 64-bit floating point number
    Float(f64),
    /// UTF-8 string
    String(String),
    /// Raw byte sequence
    Blob(Vec<u8>),
    /// Point in time, UTC
    Timestamp(DateTime<Utc>),
    /// Ordered sequence of values
    Array(Vec<Value>),
    /// Keyed mapping from string to value
    Map(HashMap<String, Value>),
    /// Absent value
    Null,
}

impl Value {
    /// Get the kind name for error messages and debugging
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "BOOL",
            Value::Integer(_) => "INTEGER",
            Value::Float(_) => "FLOAT",
            Value::String(_) => "STRING",
            Value::Blob(_) => "BLOB",
            Value::Timestamp(_) => "TIMESTAMP",
            Value::Array(_) => "ARRAY",
            Value::Map(_) => "MAP",
            Value::Null => "NULL",
        }
    }

    /// Check whether this value takes part in arithmetic
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }

    /// Compare two values of an ordered kind
    ///
    /// Integers and floats compare numerically against each other; every
    /// other pairing must be same-kind. Maps and nulls carry no ordering.
    pub fn compare(&self, other: &Value) -> SqlResult<Ordering> {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => Ok(a.cmp(b)),
            (Value::Float(a), Value::Float(b)) => {
                Ok(a.partial_cmp(b).unwrap_or(Ordering::Equal))
            }
            (Value::Integer(a), Value::Float(b)) => Ok((*a as f64)
                .partial_cmp(b)
                .unwrap_or(Ordering::Equal)),
            (Value::Float(a), Value::Integer(b)) => Ok(a
                .partial_cmp(&(*b as f64))
                .unwrap_or(Ordering::Equal)),
            (Value::Bool(a), Value::Bool(b)) => Ok(a.cmp(b)),
            (Value::String(a), Value::String(b)) => Ok(a.cmp(b)),
            (Value::Blob(a), Value::Blob(b)) => Ok(a.cmp(b)),
            (Value::Timestamp(a), Value::Timestamp(b)) => Ok(a.cmp(b)),
            (Value::Array(a), Value::Array(b)) => {
                for (left, right) in a.iter().zip(b.iter()) {
                    match left.compare(right)? {
                        Ordering::Equal => continue,
                        unequal => return Ok(unequal),
                    }
                }
                Ok(a.len().cmp(&b.len()))
            }
            _ => Err(SqlError::type_error(
                "comparable values of one kind",
                format!("{} and {}", self.type_name(), other.type_name()),
            )),
        }
    }

    /// Structural equality with numeric promotion between integer and float
    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Float(b)) => *a as f64 == *b,
            (Value::Float(a), Value::Integer(b)) => *a == *b as f64,
            _ => self == other,
        }
    }

    /// Human-readable rendering used in error messages and logs
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Bool(b) => b.to_string(),
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::String(s) => s.clone(),
            Value::Blob(bytes) => format!("<{} bytes>", bytes.len()),
            Value::Timestamp(ts) => ts.to_rfc3339(),
            Value::Array(items) => {
                let elements: Vec<String> =
                    items.iter().map(|v| v.to_display_string()).collect();
                format!("[{}]", elements.join(", "))
            }
            Value::Map(fields) => {
                let pairs: Vec<String> = fields
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, v.to_display_string()))
                    .collect();
                format!("{{{}}}", pairs.join(", "))
            }
            Value::Null => "NULL".to_string(),
        }
    }
}

impl From<serde_json::Value> for Value {
    /// Convert a JSON document into an engine value
    ///
    /// Numbers become integers when they are losslessly integral and
    /// floats otherwise; objects and arrays convert recursively.
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Integer(i)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(fields) => Value::Map(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

/// One record of an input stream
///
/// Only `data` takes part in expression evaluation; the event timestamp
/// drives time-based windowing. Cloning a tuple deep-copies its data, so
/// admitted tuples never alias caller memory.
#[derive(Debug, Clone)]
pub struct Tuple {
    /// The user-visible field data of this record
    pub data: HashMap<String, Value>,
    /// The FROM-clause relation this record arrived on
    pub input_name: String,
    /// When the event this record describes happened
    pub event_timestamp: DateTime<Utc>,
    /// When the system first saw this record
    pub processing_timestamp: DateTime<Utc>,
    /// Identifier of the ingestion batch this record belongs to
    pub batch_id: i64,
}

impl Tuple {
    /// Create a tuple with the given data and event timestamp
    ///
    /// The processing timestamp defaults to the event timestamp and the
    /// batch id to zero.
    pub fn new(
        input_name: impl Into<String>,
        data: HashMap<String, Value>,
        event_timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            data,
            input_name: input_name.into(),
            event_timestamp,
            processing_timestamp: event_timestamp,
            batch_id: 0,
        }
    }

    /// Create a tuple with full envelope metadata
    pub fn with_metadata(
        input_name: impl Into<String>,
        data: HashMap<String, Value>,
        event_timestamp: DateTime<Utc>,
        processing_timestamp: DateTime<Utc>,
        batch_id: i64,
    ) -> Self {
        Self {
            data,
            input_name: input_name.into(),
            event_timestamp,
            processing_timestamp,
            batch_id,
        }
    }

    /// Build a tuple from a JSON object
    pub fn from_json(
        input_name: impl Into<String>,
        event_timestamp: DateTime<Utc>,
        json: &serde_json::Value,
    ) -> SqlResult<Self> {
        match Value::from(json.clone()) {
            Value::Map(data) => Ok(Tuple::new(input_name, data, event_timestamp)),
            other => Err(SqlError::type_error("MAP", other.type_name())),
        }
    }

    /// Get a field value by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }

    /// Check whether a field is present, regardless of its value
    pub fn has_field(&self, name: &str) -> bool {
        self.data.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_numeric_equality_promotes() {
        assert!(Value::Integer(2).equals(&Value::Float(2.0)));
        assert!(!Value::Integer(2).equals(&Value::Float(2.5)));
        assert!(!Value::Integer(2).equals(&Value::String("2".to_string())));
    }

    #[test]
    fn test_null_equality_is_structural() {
        assert!(Value::Null.equals(&Value::Null));
        assert!(!Value::Null.equals(&Value::Integer(0)));
    }

    #[test]
    fn test_cross_kind_ordering_fails() {
        let err = Value::Integer(1).compare(&Value::String("1".to_string()));
        assert!(matches!(err, Err(SqlError::TypeError { .. })));
    }

    #[test]
    fn test_array_ordering_is_lexicographic() {
        let short = Value::Array(vec![Value::Integer(1)]);
        let long = Value::Array(vec![Value::Integer(1), Value::Integer(2)]);
        assert_eq!(short.compare(&long).unwrap(), Ordering::Less);
    }

    #[test]
    fn test_json_conversion() {
        let json: serde_json::Value = serde_json::json!({
            "active": true,
            "count": 3,
            "score": 1.5,
            "tags": ["a", "b"],
            "inner": {"x": null}
        });
        let value = Value::from(json);
        let Value::Map(fields) = value else {
            panic!("expected a map");
        };
        assert_eq!(fields["active"], Value::Bool(true));
        assert_eq!(fields["count"], Value::Integer(3));
        assert_eq!(fields["score"], Value::Float(1.5));
        assert_eq!(
            fields["tags"],
            Value::Array(vec![
                Value::String("a".to_string()),
                Value::String("b".to_string())
            ])
        );
        let Value::Map(inner) = &fields["inner"] else {
            panic!("expected a nested map");
        };
        assert_eq!(inner["x"], Value::Null);
    }

    #[test]
    fn test_tuple_from_json_rejects_non_object() {
        let ts = Utc.with_ymd_and_hms(2015, 4, 10, 10, 23, 0).unwrap();
        let err = Tuple::from_json("src", ts, &serde_json::json!([1, 2]));
        assert!(matches!(err, Err(SqlError::TypeError { .. })));
    }

    #[test]
    fn test_tuple_clone_is_deep() {
        let ts = Utc.with_ymd_and_hms(2015, 4, 10, 10, 23, 0).unwrap();
        let mut data = HashMap::new();
        data.insert(
            "nested".to_string(),
            Value::Map(HashMap::from([("k".to_string(), Value::Integer(1))])),
        );
        let original = Tuple::new("src", data, ts);
        let mut copy = original.clone();
        copy.data.insert("nested".to_string(), Value::Null);
        assert!(matches!(original.get("nested"), Some(Value::Map(_))));
    }
}
