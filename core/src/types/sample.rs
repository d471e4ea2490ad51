//! Samples (aliquots) of a plasmid record and the input shapes they come from.
//!
//! Sample lists reach the model in several legacy shapes: bare volumes,
//! objects missing newer checkout fields, or complete objects. Every shape is
//! normalized to the full seven-field [`Sample`] before it is stored.

use super::volume::Volume;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// One physical tube of a plasmid preparation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value")]
pub struct Sample {
    pub volume: Volume,
    pub date_created: String,
    pub date_modified: String,
    pub is_checked_out: bool,
    pub checked_out_by: String,
    pub checked_out_at: String,
    pub checked_in_at: String,
}

impl Sample {
    /// A sample holding only a volume; every other field takes its default.
    pub fn with_volume(volume: impl Into<Volume>) -> Self {
        Self {
            volume: volume.into(),
            ..Self::default()
        }
    }

    /// Normalizes a single JSON element of a samples list.
    pub fn from_json(value: JsonValue) -> Self {
        SampleInput::from_json(value).normalize()
    }
}

impl From<JsonValue> for Sample {
    fn from(value: JsonValue) -> Self {
        Sample::from_json(value)
    }
}

/// A sample object with any subset of the seven fields present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialSample {
    pub volume: Option<Volume>,
    pub date_created: Option<String>,
    pub date_modified: Option<String>,
    pub is_checked_out: Option<bool>,
    pub checked_out_by: Option<String>,
    pub checked_out_at: Option<String>,
    pub checked_in_at: Option<String>,
}

impl PartialSample {
    fn from_map(map: &Map<String, JsonValue>) -> Self {
        Self {
            volume: map.get("volume").cloned().map(Volume::from_json),
            date_created: text_field(map, "date_created"),
            date_modified: text_field(map, "date_modified"),
            is_checked_out: match map.get("is_checked_out") {
                Some(JsonValue::Bool(b)) => Some(*b),
                Some(JsonValue::Null) | None => None,
                Some(_) => Some(false),
            },
            checked_out_by: text_field(map, "checked_out_by"),
            checked_out_at: text_field(map, "checked_out_at"),
            checked_in_at: text_field(map, "checked_in_at"),
        }
    }
}

impl From<Sample> for PartialSample {
    fn from(sample: Sample) -> Self {
        Self {
            volume: Some(sample.volume),
            date_created: Some(sample.date_created),
            date_modified: Some(sample.date_modified),
            is_checked_out: Some(sample.is_checked_out),
            checked_out_by: Some(sample.checked_out_by),
            checked_out_at: Some(sample.checked_out_at),
            checked_in_at: Some(sample.checked_in_at),
        }
    }
}

/// Null becomes absent, strings are kept, other scalars keep their JSON text.
fn text_field(map: &Map<String, JsonValue>, name: &str) -> Option<String> {
    match map.get(name)? {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// One element of a samples list before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleInput {
    Object(PartialSample),
    Primitive(Volume),
}

impl SampleInput {
    pub fn from_json(value: JsonValue) -> Self {
        match value {
            JsonValue::Object(map) => SampleInput::Object(PartialSample::from_map(&map)),
            // Arrays are objects without any sample fields.
            JsonValue::Array(_) => SampleInput::Object(PartialSample::default()),
            primitive => SampleInput::Primitive(Volume::from_json(primitive)),
        }
    }

    pub fn normalize(self) -> Sample {
        match self {
            SampleInput::Object(partial) => Sample {
                volume: partial.volume.unwrap_or_default(),
                date_created: partial.date_created.unwrap_or_default(),
                date_modified: partial.date_modified.unwrap_or_default(),
                is_checked_out: partial.is_checked_out.unwrap_or(false),
                checked_out_by: partial.checked_out_by.unwrap_or_default(),
                checked_out_at: partial.checked_out_at.unwrap_or_default(),
                checked_in_at: partial.checked_in_at.unwrap_or_default(),
            },
            SampleInput::Primitive(volume) => Sample::with_volume(volume),
        }
    }
}

impl From<Sample> for SampleInput {
    fn from(sample: Sample) -> Self {
        SampleInput::Object(sample.into())
    }
}

impl From<Volume> for SampleInput {
    fn from(volume: Volume) -> Self {
        SampleInput::Primitive(volume)
    }
}

/// The `samples` argument of a record before normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SamplesInput {
    /// Null, absent or an empty list.
    #[default]
    Missing,
    List(Vec<SampleInput>),
    /// A single value given where a list was expected.
    Single(Volume),
}

impl SamplesInput {
    pub fn from_json(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => SamplesInput::Missing,
            JsonValue::Array(items) if items.is_empty() => SamplesInput::Missing,
            JsonValue::Array(items) => {
                SamplesInput::List(items.into_iter().map(SampleInput::from_json).collect())
            }
            single => SamplesInput::Single(Volume::from_json(single)),
        }
    }

    /// Produces the canonical samples list. The result is never empty.
    pub fn normalize(self) -> Vec<Sample> {
        match self {
            SamplesInput::List(items) if !items.is_empty() => {
                items.into_iter().map(SampleInput::normalize).collect()
            }
            SamplesInput::Single(volume) => vec![Sample::with_volume(volume)],
            SamplesInput::List(_) | SamplesInput::Missing => {
                log::trace!("no samples given, using one empty placeholder");
                vec![Sample::default()]
            }
        }
    }
}

impl From<Vec<Sample>> for SamplesInput {
    fn from(samples: Vec<Sample>) -> Self {
        SamplesInput::List(samples.into_iter().map(SampleInput::from).collect())
    }
}

impl From<Vec<Volume>> for SamplesInput {
    fn from(volumes: Vec<Volume>) -> Self {
        SamplesInput::List(volumes.into_iter().map(SampleInput::from).collect())
    }
}

impl From<JsonValue> for SamplesInput {
    fn from(value: JsonValue) -> Self {
        SamplesInput::from_json(value)
    }
}
