pub mod inventory;
pub mod record;
pub mod sort;
pub mod types;

pub use inventory::error::InventoryError;
pub use inventory::{Bag, Inventory, ReplaceOutcome};
pub use record::{
    Field, PlasmidRecord, RecordInit, RecordPayload, SampleError, ValidationError,
};
pub use sort::{SortKey, sort_records};
pub use types::{AppConfig, BagName, RecordId, Sample, Volume};
