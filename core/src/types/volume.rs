//! Sample volume as it moves between user entry, validation and the backend.

use regex::Regex;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value as JsonValue;
use std::fmt;
use std::sync::LazyLock;

/// Leading numeric literal accepted by [`parse_float_prefix`].
static FLOAT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
        .expect("float prefix pattern is valid")
});

/// Parses the longest numeric prefix of `text`, ignoring leading whitespace.
///
/// Mirrors the lenient number parsing used by browser forms: `"2.5mL"` is
/// `2.5`, `" 3"` is `3`, and `"abc"` has no value at all.
pub fn parse_float_prefix(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let literal = FLOAT_PREFIX.find(trimmed)?.as_str();
    literal.parse::<f64>().ok()
}

/// A sample volume.
///
/// Volumes arrive as JSON numbers from the backend, as partially typed text
/// from an input field, or not at all for a freshly added sample.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum Volume {
    #[default]
    Empty,
    Text(String),
    Number(f64),
}

impl Volume {
    /// Converts an arbitrary JSON value. Never fails: shapes that are not a
    /// number, string or null keep their JSON text so validation rejects them.
    pub fn from_json(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Volume::Empty,
            JsonValue::String(s) => Volume::Text(s),
            JsonValue::Number(n) => match n.as_f64() {
                Some(f) => Volume::Number(f),
                None => Volume::Text(n.to_string()),
            },
            other => Volume::Text(other.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Volume::Empty => true,
            Volume::Text(s) => s.is_empty(),
            Volume::Number(_) => false,
        }
    }

    /// Numeric value, if any. Text is read with [`parse_float_prefix`].
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            Volume::Empty => None,
            Volume::Text(s) => parse_float_prefix(s),
            Volume::Number(n) => Some(*n),
        };
        value.filter(|v| !v.is_nan())
    }

    /// Contribution to a record's total volume.
    pub fn amount(&self) -> f64 {
        self.as_f64().unwrap_or(0.0)
    }

    /// The text the volume validator inspects.
    pub fn as_entry_text(&self) -> Option<String> {
        match self {
            Volume::Empty => None,
            Volume::Text(s) => Some(s.clone()),
            Volume::Number(n) if n.is_nan() => Some("NaN".to_string()),
            Volume::Number(n) => Some(n.to_string()),
        }
    }
}

impl PartialEq for Volume {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Volume::Empty, Volume::Empty) => true,
            (Volume::Text(a), Volume::Text(b)) => a == b,
            (Volume::Number(a), Volume::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            _ => false,
        }
    }
}

impl From<JsonValue> for Volume {
    fn from(value: JsonValue) -> Self {
        Volume::from_json(value)
    }
}

impl From<f64> for Volume {
    fn from(value: f64) -> Self {
        Volume::Number(value)
    }
}

impl From<&str> for Volume {
    fn from(value: &str) -> Self {
        Volume::Text(value.to_string())
    }
}

impl From<String> for Volume {
    fn from(value: String) -> Self {
        Volume::Text(value)
    }
}

impl<T: Into<Volume>> From<Option<T>> for Volume {
    fn from(value: Option<T>) -> Self {
        value.map_or(Volume::Empty, Into::into)
    }
}

impl Serialize for Volume {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Volume::Empty => serializer.serialize_none(),
            Volume::Text(s) => serializer.serialize_str(s),
            Volume::Number(n) => serializer.serialize_f64(*n),
        }
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Volume::Empty => Ok(()),
            Volume::Text(s) => f.write_str(s),
            Volume::Number(n) => write!(f, "{n}"),
        }
    }
}

#[cfg(test)]
mod tests;
