//! Dotted-path extraction from JSON documents.
//!
//! A path such as `user.address.city` is split on `.` and walked from the
//! root object. Every segment but the last must name a nested object; the
//! last must name a leaf (string, number, bool, null or array), which is then
//! coerced into the requested destination type.
//!
//! JSON numbers are treated as floating point. Integer destinations take the
//! exact value when the number is an integer, and otherwise truncate toward
//! zero, so `2.9` becomes `2` and `-2.9` becomes `-2`.

use std::any::{Any, type_name};
use std::fmt;

use serde_json::{Map, Value};

use crate::error::{DomainError, DomainResult};

/// A parsed JSON object used as the root of a path walk.
pub type Document = Map<String, Value>;

/// Destination kinds a leaf can be coerced into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeafKind {
    /// UTF-8 string
    String,
    /// Signed integer
    Integer,
    /// Floating point number
    Float,
    /// Boolean
    Bool,
}

impl LeafKind {
    /// Returns the kind name used in error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Bool => "bool",
        }
    }
}

impl fmt::Display for LeafKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Types a JSON leaf can be coerced into.
pub trait FromLeaf: Sized {
    /// The destination kind this type represents.
    const KIND: LeafKind;

    /// Converts the leaf, or returns `None` when its JSON kind does not match.
    fn from_leaf(value: &Value) -> Option<Self>;
}

impl FromLeaf for String {
    const KIND: LeafKind = LeafKind::String;

    fn from_leaf(value: &Value) -> Option<Self> {
        value.as_str().map(ToOwned::to_owned)
    }
}

impl FromLeaf for i64 {
    const KIND: LeafKind = LeafKind::Integer;

    #[allow(clippy::cast_possible_truncation)]
    fn from_leaf(value: &Value) -> Option<Self> {
        let number = value.as_number()?;
        // Saturates outside the i64 range.
        number
            .as_i64()
            .or_else(|| number.as_f64().map(|f| f.trunc() as Self))
    }
}

impl FromLeaf for i32 {
    const KIND: LeafKind = LeafKind::Integer;

    fn from_leaf(value: &Value) -> Option<Self> {
        i64::from_leaf(value).and_then(|n| Self::try_from(n).ok())
    }
}

impl FromLeaf for f64 {
    const KIND: LeafKind = LeafKind::Float;

    fn from_leaf(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl FromLeaf for bool {
    const KIND: LeafKind = LeafKind::Bool;

    fn from_leaf(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

/// Extracts the leaf at `path` and coerces it into `T`.
///
/// # Errors
///
/// - [`DomainError::FieldNotFound`] when a segment is missing.
/// - [`DomainError::PathNotFound`] when the path continues past a leaf.
/// - [`DomainError::PathNotLeaf`] when the path is empty or ends on an object.
/// - [`DomainError::TypeCoercion`] when the leaf's kind does not match `T`.
pub fn extract_by_path<T: FromLeaf>(document: &Document, path: &str) -> DomainResult<T> {
    let leaf = resolve_leaf(document, path)?;
    coerce(leaf, path)
}

/// Extracts the leaf at `path` into an arbitrary destination.
///
/// Supported destinations are `String`, `i64`, `i32`, `f64` and `bool`.
/// The path is resolved before the destination type is inspected, so a
/// missing field is reported even for an unsupported destination.
///
/// # Errors
///
/// Same as [`extract_by_path`], plus
/// [`DomainError::UnsupportedDestinationType`] for any other destination.
pub fn extract_into<D: Any>(
    document: &Document,
    path: &str,
    destination: &mut D,
) -> DomainResult<()> {
    let leaf = resolve_leaf(document, path)?;
    let slot: &mut dyn Any = destination;

    if let Some(slot) = slot.downcast_mut::<String>() {
        *slot = coerce(leaf, path)?;
    } else if let Some(slot) = slot.downcast_mut::<i64>() {
        *slot = coerce(leaf, path)?;
    } else if let Some(slot) = slot.downcast_mut::<i32>() {
        *slot = coerce(leaf, path)?;
    } else if let Some(slot) = slot.downcast_mut::<f64>() {
        *slot = coerce(leaf, path)?;
    } else if let Some(slot) = slot.downcast_mut::<bool>() {
        *slot = coerce(leaf, path)?;
    } else {
        return Err(DomainError::UnsupportedDestinationType {
            type_name: type_name::<D>().to_string(),
        });
    }
    Ok(())
}

fn resolve_leaf<'a>(document: &'a Document, path: &str) -> DomainResult<&'a Value> {
    if path.is_empty() {
        return Err(DomainError::PathNotLeaf {
            path: path.to_string(),
        });
    }

    let mut current = document;
    let mut segments = path.split('.').peekable();
    while let Some(segment) = segments.next() {
        let value = current
            .get(segment)
            .ok_or_else(|| DomainError::FieldNotFound {
                segment: segment.to_string(),
            })?;

        match value {
            Value::Object(nested) => current = nested,
            leaf if segments.peek().is_none() => return Ok(leaf),
            _ => {
                return Err(DomainError::PathNotFound {
                    path: path.to_string(),
                    segment: segment.to_string(),
                });
            }
        }
    }

    Err(DomainError::PathNotLeaf {
        path: path.to_string(),
    })
}

fn coerce<T: FromLeaf>(leaf: &Value, path: &str) -> DomainResult<T> {
    T::from_leaf(leaf).ok_or_else(|| DomainError::TypeCoercion {
        path: path.to_string(),
        expected: T::KIND.to_string(),
        actual: json_kind(leaf).to_string(),
    })
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic, clippy::float_cmp)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn document(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_nested_integer() {
        let doc = document(json!({"a": {"b": 5}}));
        assert_eq!(extract_by_path::<i64>(&doc, "a.b").unwrap(), 5);
    }

    #[test]
    fn test_missing_segment() {
        let doc = document(json!({"a": {"b": 5}}));
        let result = extract_by_path::<i64>(&doc, "a.c");
        assert_eq!(
            result,
            Err(DomainError::FieldNotFound {
                segment: "c".to_string()
            })
        );
    }

    #[test]
    fn test_path_ending_on_object() {
        let doc = document(json!({"a": {"b": 5}}));
        let result = extract_by_path::<i64>(&doc, "a");
        assert_eq!(
            result,
            Err(DomainError::PathNotLeaf {
                path: "a".to_string()
            })
        );
    }

    #[test]
    fn test_empty_path() {
        let doc = document(json!({"": 1}));
        assert!(matches!(
            extract_by_path::<i64>(&doc, ""),
            Err(DomainError::PathNotLeaf { .. })
        ));
    }

    #[test]
    fn test_path_past_leaf() {
        let doc = document(json!({"a": "text"}));
        let result = extract_by_path::<String>(&doc, "a.b");
        assert_eq!(
            result,
            Err(DomainError::PathNotFound {
                path: "a.b".to_string(),
                segment: "a".to_string(),
            })
        );
    }

    #[test]
    fn test_string_leaf() {
        let doc = document(json!({"a": "text"}));
        assert_eq!(extract_by_path::<String>(&doc, "a").unwrap(), "text");

        let result = extract_by_path::<i64>(&doc, "a");
        assert_eq!(
            result,
            Err(DomainError::TypeCoercion {
                path: "a".to_string(),
                expected: "integer".to_string(),
                actual: "string".to_string(),
            })
        );
    }

    #[test]
    fn test_integer_truncates_toward_zero() {
        let doc = document(json!({"up": 2.9, "down": -2.9, "big": 1e30}));
        assert_eq!(extract_by_path::<i64>(&doc, "up").unwrap(), 2);
        assert_eq!(extract_by_path::<i64>(&doc, "down").unwrap(), -2);
        assert_eq!(extract_by_path::<i64>(&doc, "big").unwrap(), i64::MAX);
        assert!(matches!(
            extract_by_path::<i32>(&doc, "big"),
            Err(DomainError::TypeCoercion { .. })
        ));
    }

    #[test]
    fn test_float_and_bool() {
        let doc = document(json!({"data": {"ratio": 0.25, "count": 3, "active": true}}));
        assert_eq!(extract_by_path::<f64>(&doc, "data.ratio").unwrap(), 0.25);
        assert_eq!(extract_by_path::<f64>(&doc, "data.count").unwrap(), 3.0);
        assert!(extract_by_path::<bool>(&doc, "data.active").unwrap());
        assert!(matches!(
            extract_by_path::<bool>(&doc, "data.count"),
            Err(DomainError::TypeCoercion { .. })
        ));
    }

    #[test]
    fn test_null_and_array_leaves_do_not_coerce() {
        let doc = document(json!({"none": null, "list": [1, 2]}));
        let err = extract_by_path::<String>(&doc, "none").unwrap_err();
        assert!(err.to_string().contains("null"));
        let err = extract_by_path::<i64>(&doc, "list").unwrap_err();
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn test_extract_into_supported_destinations() {
        let doc = document(json!({"user": {"id": 7, "name": "Ada", "score": 9.5, "admin": false}}));

        let mut id = 0_i64;
        let mut small_id = 0_i32;
        let mut name = String::new();
        let mut score = 0.0_f64;
        let mut admin = true;
        extract_into(&doc, "user.id", &mut id).unwrap();
        extract_into(&doc, "user.id", &mut small_id).unwrap();
        extract_into(&doc, "user.name", &mut name).unwrap();
        extract_into(&doc, "user.score", &mut score).unwrap();
        extract_into(&doc, "user.admin", &mut admin).unwrap();

        assert_eq!(id, 7);
        assert_eq!(small_id, 7);
        assert_eq!(name, "Ada");
        assert_eq!(score, 9.5);
        assert!(!admin);
    }

    #[test]
    fn test_extract_into_unsupported_destination() {
        let doc = document(json!({"tags": "a"}));
        let mut tags: Vec<String> = Vec::new();
        let err = extract_into(&doc, "tags", &mut tags).unwrap_err();
        assert!(matches!(
            err,
            DomainError::UnsupportedDestinationType { ref type_name } if type_name.contains("Vec")
        ));

        let err = extract_into(&doc, "missing", &mut tags).unwrap_err();
        assert!(matches!(err, DomainError::FieldNotFound { .. }));
    }

    #[test]
    fn test_failed_coercion_leaves_destination_untouched() {
        let doc = document(json!({"a": "text"}));
        let mut value = 42_i64;
        assert!(extract_into(&doc, "a", &mut value).is_err());
        assert_eq!(value, 42);
    }
}
