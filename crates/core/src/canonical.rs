//! Value canonicalization for dirty-checking.
//!
//! Form values arrive as loosely-typed JSON: numbers may be numeric
//! strings, cleared inputs may be `""` or `null` or absent. The rules,
//! applied everywhere a value is compared or stored:
//!
//! - empty string, `null`, and a missing entry are all "unset"
//! - numeric strings parse as `f64`, so `"26"`, `"26.0"`, and `26`
//!   compare equal
//! - non-numeric text stays text (time strings, enum codes); rejecting
//!   non-numeric input for numeric fields is the UI boundary's job

use serde_json::Value;

/// Canonical view of a single form value.
#[derive(Debug, Clone, PartialEq)]
pub enum Canonical {
    /// Cleared or never-set: `null`, `""`, or absent.
    Unset,
    Number(f64),
    Text(String),
    Bool(bool),
    /// Arrays and objects pass through untouched.
    Json(Value),
}

impl Canonical {
    pub fn is_set(&self) -> bool {
        !matches!(self, Self::Unset)
    }

    /// Back to a JSON value (`Unset` becomes `null`).
    pub fn to_value(&self) -> Value {
        match self {
            Self::Unset => Value::Null,
            Self::Number(n) => Value::from(*n),
            Self::Text(s) => Value::String(s.clone()),
            Self::Bool(b) => Value::Bool(*b),
            Self::Json(v) => v.clone(),
        }
    }
}

/// Canonicalize a possibly-missing JSON value.
pub fn canonicalize(value: Option<&Value>) -> Canonical {
    let Some(value) = value else {
        return Canonical::Unset;
    };
    match value {
        Value::Null => Canonical::Unset,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Canonical::Unset
            } else if let Ok(n) = trimmed.parse::<f64>() {
                Canonical::Number(n)
            } else {
                Canonical::Text(s.clone())
            }
        }
        Value::Number(n) => match n.as_f64() {
            Some(f) => Canonical::Number(f),
            None => Canonical::Json(value.clone()),
        },
        Value::Bool(b) => Canonical::Bool(*b),
        Value::Array(_) | Value::Object(_) => Canonical::Json(value.clone()),
    }
}
