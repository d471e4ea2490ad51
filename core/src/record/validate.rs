//! Field validators.
//!
//! Validators inspect a value as the user typed it and report the first rule
//! it breaks. They never mutate or panic; an invalid value is an ordinary,
//! expected state while a form is being filled in.

use crate::types::{Sample, Volume, is_bag_name, parse_float_prefix};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

/// Samples must hold strictly more than this many millilitres.
pub const MIN_SAMPLE_VOLUME_ML: f64 = 0.5;

static DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]*\.?[0-9]*$").expect("decimal pattern is valid"));

/// The field a violation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Lot,
    Sublot,
    Bag,
    /// A sample volume, with its 1-based position when known.
    Sample(Option<usize>),
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Lot => f.write_str("Lot"),
            Field::Sublot => f.write_str("Sublot"),
            Field::Bag => f.write_str("Bag"),
            Field::Sample(None) => f.write_str("Sample"),
            Field::Sample(Some(position)) => write!(f, "Sample {position}"),
        }
    }
}

/// A broken field rule. The `Display` text is the message shown to users.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0}: this field cannot be empty")]
    Empty(Field),

    #[error("{0}: must contain only digits")]
    NotDigits(Field),

    #[error("{0}: this field cannot have leading zeros")]
    LeadingZero(Field),

    #[error("Bag: must be one letter followed by a number with no leading zeros (e.g., C20)")]
    BagFormat,

    #[error("{0}: must be an integer or decimal")]
    VolumeFormat(Field),

    #[error(
        "{0}: must be a positive number above 0.5mL. Store in microcentrifuge tube if less."
    )]
    VolumeTooSmall(Field),
}

impl ValidationError {
    pub fn field(&self) -> Field {
        match self {
            ValidationError::Empty(field)
            | ValidationError::NotDigits(field)
            | ValidationError::LeadingZero(field)
            | ValidationError::VolumeFormat(field)
            | ValidationError::VolumeTooSmall(field) => *field,
            ValidationError::BagFormat => Field::Bag,
        }
    }

    /// Attaches a 1-based sample position to a sample violation.
    pub(crate) fn at_position(self, position: usize) -> Self {
        let field = Field::Sample(Some(position));
        match self {
            ValidationError::Empty(Field::Sample(_)) => ValidationError::Empty(field),
            ValidationError::VolumeFormat(_) => ValidationError::VolumeFormat(field),
            ValidationError::VolumeTooSmall(_) => ValidationError::VolumeTooSmall(field),
            other => other,
        }
    }
}

fn validate_digits(value: &str, field: Field) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Empty(field));
    }
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::NotDigits(field));
    }
    Ok(())
}

/// A positive integer without leading zeros. A lone `0` counts as a leading
/// zero since a lot can never be zero.
pub fn validate_lot(value: &str) -> Result<(), ValidationError> {
    validate_digits(value, Field::Lot)?;
    if value.starts_with('0') {
        return Err(ValidationError::LeadingZero(Field::Lot));
    }
    Ok(())
}

/// A non-negative integer without leading zeros; `0` itself is allowed.
pub fn validate_sublot(value: &str) -> Result<(), ValidationError> {
    validate_digits(value, Field::Sublot)?;
    if value.len() > 1 && value.starts_with('0') {
        return Err(ValidationError::LeadingZero(Field::Sublot));
    }
    Ok(())
}

/// One letter followed by a positive integer without leading zero.
pub fn validate_bag(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Empty(Field::Bag));
    }
    if !is_bag_name(value) {
        return Err(ValidationError::BagFormat);
    }
    Ok(())
}

/// A plain decimal strictly above [`MIN_SAMPLE_VOLUME_ML`].
pub fn validate_volume(volume: &Volume) -> Result<(), ValidationError> {
    let field = Field::Sample(None);
    let text = match volume.as_entry_text() {
        Some(text) if !text.is_empty() => text,
        _ => return Err(ValidationError::Empty(field)),
    };
    if text == "." || !DECIMAL.is_match(&text) {
        return Err(ValidationError::VolumeFormat(field));
    }
    match parse_float_prefix(&text) {
        Some(amount) if amount > MIN_SAMPLE_VOLUME_ML => Ok(()),
        _ => Err(ValidationError::VolumeTooSmall(field)),
    }
}

/// Checks every sample in order and stops at the first failure.
pub fn validate_samples(samples: &[Sample]) -> Result<(), ValidationError> {
    for (index, sample) in samples.iter().enumerate() {
        validate_volume(&sample.volume).map_err(|e| e.at_position(index + 1))?;
    }
    Ok(())
}
