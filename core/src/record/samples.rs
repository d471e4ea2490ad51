//! Per-sample edits and checkout transitions.
//!
//! Every operation leaves `self` untouched and returns the updated record.

use super::PlasmidRecord;
use super::validate::{ValidationError, validate_volume};
use crate::types::timestamp::format_timestamp;
use crate::types::{Sample, Volume};
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SampleError {
    #[error("sample index {index} is out of range (record has {len} samples)")]
    OutOfRange { index: usize, len: usize },

    #[error("a record holds at most {max} samples")]
    LimitReached { max: usize },

    #[error("a record must keep at least one sample")]
    LastSample,

    #[error("sample {index} is already checked out by {by}")]
    AlreadyCheckedOut { index: usize, by: String },

    #[error("sample {index} is not checked out")]
    NotCheckedOut { index: usize },

    #[error("a user name is required to check out a sample")]
    MissingUser,

    #[error("{0}")]
    InvalidVolume(ValidationError),
}

/// Tidies a volume the user finished typing: whole numbers and a trailing `.`
/// gain `.0`/`0`, and a bare leading `.` gains a `0`. Text that does not
/// validate is returned as is.
pub fn format_volume_entry(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() || validate_volume(&Volume::from(trimmed)).is_err() {
        return text.to_string();
    }

    if !trimmed.contains('.') {
        format!("{trimmed}.0")
    } else if trimmed.ends_with('.') {
        format!("{trimmed}0")
    } else if trimmed.starts_with('.') {
        format!("0{trimmed}")
    } else {
        trimmed.to_string()
    }
}

fn entered(volume: Volume) -> Volume {
    if volume.is_empty() { Volume::Empty } else { volume }
}

impl PlasmidRecord {
    fn sample_at(&self, index: usize) -> Result<&Sample, SampleError> {
        self.samples.get(index).ok_or(SampleError::OutOfRange {
            index,
            len: self.samples.len(),
        })
    }

    fn replace_sample(&self, index: usize, sample: Sample) -> Self {
        let mut samples = self.samples.clone();
        samples[index] = sample;
        self.clone().with_samples(samples)
    }

    /// Indices and samples currently checked out.
    pub fn checked_out_samples(&self) -> impl Iterator<Item = (usize, &Sample)> {
        self.samples
            .iter()
            .enumerate()
            .filter(|(_, sample)| sample.is_checked_out)
    }

    pub fn has_checked_out_samples(&self) -> bool {
        self.samples.iter().any(|sample| sample.is_checked_out)
    }

    /// Sets a sample's volume and stamps `date_modified`.
    pub fn with_sample_volume(
        &self,
        index: usize,
        volume: impl Into<Volume>,
        now: DateTime<Utc>,
    ) -> Result<Self, SampleError> {
        let sample = self.sample_at(index)?;
        let updated = Sample {
            volume: volume.into(),
            date_modified: format_timestamp(now),
            ..sample.clone()
        };
        Ok(self.replace_sample(index, updated))
    }

    /// Appends an empty sample dated `now`, up to `max` samples.
    pub fn with_new_sample(&self, now: DateTime<Utc>, max: usize) -> Result<Self, SampleError> {
        if self.samples.len() >= max {
            return Err(SampleError::LimitReached { max });
        }
        let stamp = format_timestamp(now);
        let mut samples = self.samples.clone();
        samples.push(Sample {
            date_created: stamp.clone(),
            date_modified: stamp,
            ..Sample::default()
        });
        Ok(self.clone().with_samples(samples))
    }

    /// Removes a sample. The only remaining sample cannot be removed.
    pub fn without_sample(&self, index: usize) -> Result<Self, SampleError> {
        self.sample_at(index)?;
        if self.samples.len() <= 1 {
            return Err(SampleError::LastSample);
        }
        let mut samples = self.samples.clone();
        samples.remove(index);
        Ok(self.clone().with_samples(samples))
    }

    /// Marks a sample as taken out of storage by `user`.
    pub fn check_out(
        &self,
        index: usize,
        user: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, SampleError> {
        let user = user.trim();
        if user.is_empty() {
            return Err(SampleError::MissingUser);
        }
        let sample = self.sample_at(index)?;
        if sample.is_checked_out {
            return Err(SampleError::AlreadyCheckedOut {
                index,
                by: sample.checked_out_by.clone(),
            });
        }

        log::debug!("checking out sample {index} of {} for {user}", self.full_id());
        let updated = Sample {
            is_checked_out: true,
            checked_out_by: user.to_string(),
            checked_out_at: format_timestamp(now),
            checked_in_at: String::new(),
            ..sample.clone()
        };
        Ok(self.replace_sample(index, updated))
    }

    /// Returns a checked-out sample to storage with its remaining volume.
    ///
    /// An empty volume means the tube came back empty; any other volume must
    /// pass the sample volume rules. The checkout history (`checked_out_by`,
    /// `checked_out_at`) is kept.
    pub fn check_in(
        &self,
        index: usize,
        volume: impl Into<Volume>,
        now: DateTime<Utc>,
    ) -> Result<Self, SampleError> {
        let sample = self.sample_at(index)?;
        if !sample.is_checked_out {
            return Err(SampleError::NotCheckedOut { index });
        }

        let volume = entered(volume.into());
        if !volume.is_empty() {
            validate_volume(&volume)
                .map_err(|e| SampleError::InvalidVolume(e.at_position(index + 1)))?;
        }

        log::debug!("checking in sample {index} of {}", self.full_id());
        let stamp = format_timestamp(now);
        let updated = Sample {
            volume,
            date_created: if sample.date_created.is_empty() {
                stamp.clone()
            } else {
                sample.date_created.clone()
            },
            date_modified: stamp.clone(),
            is_checked_out: false,
            checked_in_at: stamp,
            ..sample.clone()
        };
        Ok(self.replace_sample(index, updated))
    }
}
