//! Form field value objects

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Type-safe field values
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

/// Structural equality. A NaN float equals another NaN so a snapshot
/// holding one still equals its own copy.
impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FieldValue::Text(a), FieldValue::Text(b)) => a == b,
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a == b,
            (FieldValue::Float(a), FieldValue::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a == b,
            _ => false,
        }
    }
}

impl FieldValue {
    /// Text form of the value, as seen by validation rules.
    ///
    /// Floats use Rust's `Display`, which never switches to exponent
    /// notation: `1e-7` renders as `0.0000001`.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Text(s) => Cow::Borrowed(s),
            FieldValue::Integer(n) => Cow::Owned(n.to_string()),
            FieldValue::Float(f) => Cow::Owned(f.to_string()),
            FieldValue::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
        }
    }

    /// Whether the value is an empty text value
    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Text(s) if s.is_empty())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

/// A single form field: its value plus validation error state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub value: FieldValue,
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub error_message: String,
}

impl Field {
    /// Create a field with the given value and no error
    pub fn new(value: impl Into<FieldValue>) -> Self {
        Self {
            value: value.into(),
            error: false,
            error_message: String::new(),
        }
    }

    /// Create an empty text field
    pub fn text() -> Self {
        Self::default()
    }

    /// Mark the field as failing with the given message
    pub fn set_error(&mut self, message: &str) {
        self.error = true;
        self.error_message = message.to_string();
    }

    /// Clear any error state
    pub fn clear_error(&mut self) {
        self.error = false;
        self.error_message.clear();
    }
}
