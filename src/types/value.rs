//! Parameter value definitions.

use std::fmt;

use serde::Serialize;

/// A value bound to one positional placeholder of a generated statement.
///
/// Serializes untagged, so a parameter list renders as plain JSON scalars.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// UTF-8 string value (strings, canonical names, dates).
    String(String),
    /// 64-bit signed integer value.
    Int64(i64),
    /// 64-bit floating point value.
    Float64(f64),
    /// Boolean value.
    Bool(bool),
}

impl Value {
    /// Returns the string value, if this is a string.
    #[must_use]
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer value, if this is an integer.
    #[must_use]
    pub fn as_int64(&self) -> Option<i64> {
        match self {
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the float value, if this is a float.
    #[must_use]
    pub fn as_float64(&self) -> Option<f64> {
        match self {
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the boolean value, if this is a boolean.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the name of the value's type.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "STRING",
            Value::Int64(_) => "INT64",
            Value::Float64(_) => "FLOAT64",
            Value::Bool(_) => "BOOL",
        }
    }

    /// Returns the value as unquoted text, the way it is looked up in tables
    /// keyed by name (e.g. the season table).
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Int64(v) => v.to_string(),
            Value::Float64(v) => v.to_string(),
            Value::Bool(v) => v.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "\"{s}\""),
            Value::Int64(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::from("Kobe Bryant").as_string(), Some("Kobe Bryant"));
        assert_eq!(Value::from(40_i64).as_int64(), Some(40));
        assert_eq!(Value::from(2.5_f64).as_float64(), Some(2.5));
        assert_eq!(Value::from(true).as_bool(), Some(true));
        assert_eq!(Value::from(40_i64).as_string(), None);
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::from("Warriors").to_string(), "\"Warriors\"");
        assert_eq!(Value::from(30_i64).to_string(), "30");
        assert_eq!(Value::from(false).to_string(), "false");
    }

    #[test]
    fn test_value_to_text_is_unquoted() {
        assert_eq!(Value::from("1996-97").to_text(), "1996-97");
        assert_eq!(Value::from(1997_i64).to_text(), "1997");
    }

    #[test]
    fn test_value_serializes_untagged() {
        let json = serde_json::to_string(&vec![Value::from("Kobe Bryant"), Value::from(40_i64)]).unwrap();
        assert_eq!(json, r#"["Kobe Bryant",40]"#);
    }
}
