//! The plasmid record model.
//!
//! A [`PlasmidRecord`] accepts any input without complaint so that a form can
//! hold a user's half-typed values. Whether the record may be persisted is a
//! separate question answered by [`PlasmidRecord::validation_errors`].

use crate::types::{BagName, RecordId, Sample, SamplesInput};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

pub(crate) mod samples;
pub(crate) mod validate;

pub use samples::{SampleError, format_volume_entry};
pub use validate::{
    Field, MIN_SAMPLE_VOLUME_ML, ValidationError, validate_bag, validate_lot, validate_samples,
    validate_sublot, validate_volume,
};

/// Named constructor arguments. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordInit {
    pub lot: String,
    pub sublot: String,
    pub bag: String,
    pub samples: SamplesInput,
    pub notes: String,
    pub date_added: String,
}

impl RecordInit {
    /// Reads constructor arguments from a loosely typed JSON object.
    ///
    /// Lot and sublot commonly arrive as JSON integers and are converted to
    /// their decimal text. Anything that is not an object yields empty
    /// arguments.
    pub fn from_json(value: JsonValue) -> Self {
        let JsonValue::Object(mut map) = value else {
            log::debug!("record input is not an object, starting from an empty record");
            return Self::default();
        };

        Self {
            lot: text_field(&map, "lot"),
            sublot: text_field(&map, "sublot"),
            bag: text_field(&map, "bag"),
            samples: map
                .remove("samples")
                .map(SamplesInput::from_json)
                .unwrap_or_default(),
            notes: text_field(&map, "notes"),
            date_added: text_field(&map, "date_added"),
        }
    }
}

fn text_field(map: &Map<String, JsonValue>, name: &str) -> String {
    match map.get(name) {
        None | Some(JsonValue::Null) => String::new(),
        Some(JsonValue::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// One physical plasmid preparation.
///
/// Fields are read through accessors and changed through the `with_*`
/// builders, which rebuild the record so `total_volume` always matches
/// `samples`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "RecordPayload")]
pub struct PlasmidRecord {
    lot: String,
    sublot: String,
    bag: String,
    samples: Vec<Sample>,
    notes: String,
    date_added: String,
    total_volume: f64,
}

impl PlasmidRecord {
    pub fn new(init: RecordInit) -> Self {
        let samples = init.samples.normalize();
        let total_volume = samples.iter().map(|s| s.volume.amount()).sum();

        Self {
            lot: init.lot,
            sublot: init.sublot,
            bag: init.bag,
            samples,
            notes: init.notes,
            date_added: init.date_added,
            total_volume,
        }
    }

    /// Builds a record from a backend payload or any other JSON value.
    pub fn from_json(value: JsonValue) -> Self {
        Self::new(RecordInit::from_json(value))
    }

    /// Returns the constructor arguments that rebuild this record.
    pub fn into_init(self) -> RecordInit {
        RecordInit {
            lot: self.lot,
            sublot: self.sublot,
            bag: self.bag,
            samples: self.samples.into(),
            notes: self.notes,
            date_added: self.date_added,
        }
    }

    pub fn lot(&self) -> &str {
        &self.lot
    }

    pub fn sublot(&self) -> &str {
        &self.sublot
    }

    pub fn bag(&self) -> &str {
        &self.bag
    }

    /// Never empty.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn date_added(&self) -> &str {
        &self.date_added
    }

    /// Sum of every sample volume that reads as a number.
    pub fn total_volume(&self) -> f64 {
        self.total_volume
    }

    /// `"{lot}-{sublot}"`, whether or not either part is valid.
    pub fn full_id(&self) -> String {
        format!("{}-{}", self.lot, self.sublot)
    }

    /// Canonical identity, available once lot and sublot validate.
    pub fn record_id(&self) -> Option<RecordId> {
        validate_lot(&self.lot).ok()?;
        validate_sublot(&self.sublot).ok()?;
        Some(RecordId::new(
            self.lot.parse().ok()?,
            self.sublot.parse().ok()?,
        ))
    }

    /// Bag name, available once the bag validates.
    pub fn bag_name(&self) -> Option<BagName> {
        validate_bag(&self.bag).ok()?;
        BagName::try_new(self.bag.clone()).ok()
    }

    /// Wire shape sent to the backend.
    pub fn to_api_payload(&self) -> RecordPayload {
        RecordPayload {
            lot: self.lot.clone(),
            sublot: self.sublot.clone(),
            bag: self.bag.clone(),
            samples: self.samples.clone(),
            notes: self.notes.clone(),
            date_added: self.date_added.clone(),
        }
    }
}

/// Copy-with-overrides builders.
impl PlasmidRecord {
    pub fn with_lot(self, lot: impl Into<String>) -> Self {
        let mut init = self.into_init();
        init.lot = lot.into();
        Self::new(init)
    }

    pub fn with_sublot(self, sublot: impl Into<String>) -> Self {
        let mut init = self.into_init();
        init.sublot = sublot.into();
        Self::new(init)
    }

    pub fn with_bag(self, bag: impl Into<String>) -> Self {
        let mut init = self.into_init();
        init.bag = bag.into();
        Self::new(init)
    }

    pub fn with_samples(self, samples: impl Into<SamplesInput>) -> Self {
        let mut init = self.into_init();
        init.samples = samples.into();
        Self::new(init)
    }

    pub fn with_notes(self, notes: impl Into<String>) -> Self {
        let mut init = self.into_init();
        init.notes = notes.into();
        Self::new(init)
    }

    pub fn with_date_added(self, date_added: impl Into<String>) -> Self {
        let mut init = self.into_init();
        init.date_added = date_added.into();
        Self::new(init)
    }
}

/// Validation.
impl PlasmidRecord {
    /// Violations in the order lot, sublot, bag, samples. At most one sample
    /// violation is reported: the first failing sample, with its position.
    pub fn validation_errors(&self) -> Vec<ValidationError> {
        [
            validate_lot(&self.lot),
            validate_sublot(&self.sublot),
            validate_bag(&self.bag),
            validate_samples(&self.samples),
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.validation_errors().is_empty()
    }
}

impl Default for PlasmidRecord {
    fn default() -> Self {
        Self::new(RecordInit::default())
    }
}

/// Structural equality over lot, sublot, bag, notes and every sample field.
/// `date_added` is not compared.
impl PartialEq for PlasmidRecord {
    fn eq(&self, other: &Self) -> bool {
        self.lot == other.lot
            && self.sublot == other.sublot
            && self.bag == other.bag
            && self.notes == other.notes
            && self.samples == other.samples
    }
}

impl RecordId {
    pub fn of(record: &PlasmidRecord) -> Option<Self> {
        record.record_id()
    }
}

impl From<JsonValue> for PlasmidRecord {
    fn from(value: JsonValue) -> Self {
        PlasmidRecord::from_json(value)
    }
}

impl From<RecordInit> for PlasmidRecord {
    fn from(init: RecordInit) -> Self {
        PlasmidRecord::new(init)
    }
}

/// The record as exchanged with the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPayload {
    pub lot: String,
    pub sublot: String,
    pub bag: String,
    pub samples: Vec<Sample>,
    pub notes: String,
    pub date_added: String,
}

impl From<PlasmidRecord> for RecordPayload {
    fn from(record: PlasmidRecord) -> Self {
        RecordPayload {
            lot: record.lot,
            sublot: record.sublot,
            bag: record.bag,
            samples: record.samples,
            notes: record.notes,
            date_added: record.date_added,
        }
    }
}

impl From<RecordPayload> for PlasmidRecord {
    fn from(payload: RecordPayload) -> Self {
        PlasmidRecord::new(RecordInit {
            lot: payload.lot,
            sublot: payload.sublot,
            bag: payload.bag,
            samples: payload.samples.into(),
            notes: payload.notes,
            date_added: payload.date_added,
        })
    }
}
