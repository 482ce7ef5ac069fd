//! Scalar cell values for query results.

use serde::Serialize;

/// A single cell from a query result.
///
/// Serializes untagged, so a row prints as a plain JSON array.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Value {
    /// NULL value.
    #[default]
    Null,

    /// Boolean value.
    Bool(bool),

    /// Signed integer (up to i64).
    Int(i64),

    /// Floating point number.
    Float(f64),

    /// Text/string value.
    String(String),
}

impl Value {
    /// Infers a typed value from a CSV field.
    ///
    /// Empty fields are NULL. Numbers and booleans are recognised, everything
    /// else stays a string.
    pub fn infer(field: &str) -> Self {
        if field.is_empty() {
            return Value::Null;
        }

        if field.eq_ignore_ascii_case("true") {
            return Value::Bool(true);
        }
        if field.eq_ignore_ascii_case("false") {
            return Value::Bool(false);
        }

        if let Ok(i) = field.parse::<i64>() {
            return Value::Int(i);
        }

        // "inf" and "nan" parse as f64 but are words, not numbers
        if field.bytes().any(|b| b.is_ascii_digit()) {
            if let Ok(f) = field.parse::<f64>() {
                return Value::Float(f);
            }
        }

        Value::String(field.to_string())
    }

    /// Formats the value as a CSV field.
    ///
    /// Floats keep their decimal point so that `1.0` reloads as a float.
    pub fn to_field(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => format!("{f:?}"),
            Value::String(s) => s.clone(),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
            },
            serde_json::Value::String(s) => Value::String(s),
            nested @ (serde_json::Value::Array(_) | serde_json::Value::Object(_)) => {
                Value::String(nested.to_string())
            }
        }
    }
}

// Conversion implementations for common types
impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => Value::Null,
        }
    }
}
