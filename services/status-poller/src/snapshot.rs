//! Response shapes for the status and contacts endpoints

use std::fmt;

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A scalar JSON value as the backend sends it.
///
/// The backend is loose about types: counters arrive as numbers or strings
/// and any field can be `null` when the detector has nothing to report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Bool(b) => write!(f, "{}", b),
            // integral floats print without a fraction, `1.0` as `1`
            FieldValue::Number(n) => match n.as_f64() {
                Some(x) if n.is_f64() => write!(f, "{}", x),
                _ => write!(f, "{}", n),
            },
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

/// Body of `GET /status`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    #[serde(default)]
    pub status: FieldValue,
    #[serde(default)]
    pub abnormal_detections: FieldValue,
    #[serde(default)]
    pub alerts_count: FieldValue,
    #[serde(default)]
    pub last_behavior: FieldValue,
    #[serde(default)]
    pub datetime: FieldValue,
    #[serde(default)]
    pub geo_tag: FieldValue,
}

impl StatusSnapshot {
    /// Parse the status body, which must be a JSON object
    pub fn parse(body: &str) -> crate::Result<Self> {
        from_object(serde_json::from_str(body)?)
    }

    /// Text for the live location banner
    pub fn location_line(&self) -> String {
        format!("Location: {}", self.geo_tag)
    }
}

/// One element of the `GET /contacts` array
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactEntry {
    #[serde(default)]
    pub name: FieldValue,
    #[serde(default)]
    pub phone: FieldValue,
}

impl fmt::Display for ContactEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.phone)
    }
}

/// Parse the contacts body, keeping response order
pub fn parse_contacts(body: &str) -> crate::Result<Vec<ContactEntry>> {
    let items: Vec<Value> = serde_json::from_str(body)?;
    items.into_iter().map(from_object).collect()
}

// serde accepts a sequence for a struct too, so `[]` would pass as an empty record
fn from_object<T: DeserializeOwned>(value: Value) -> crate::Result<T> {
    if !value.is_object() {
        return Err(serde_json::Error::custom(format!(
            "expected a JSON object, got {}",
            kind_of(&value)
        ))
        .into());
    }
    Ok(serde_json::from_value(value)?)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
