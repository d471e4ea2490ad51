pub(crate) mod config;
pub use config::{ApiConfig, AppConfig, AppConfigError, HealthConfig, RecordsConfig, UserConfig};

pub(crate) mod identity;
pub use identity::{BagName, BagNameError, RecordId, RecordIdError, is_bag_name};

pub(crate) mod sample;
pub use sample::{PartialSample, Sample, SampleInput, SamplesInput};

pub mod timestamp;

pub(crate) mod volume;
pub use volume::{Volume, parse_float_prefix};
