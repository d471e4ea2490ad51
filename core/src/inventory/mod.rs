//! Records grouped by the bag that physically holds them.
//!
//! A record's `lot-sublot` identity is unique across the whole inventory, not
//! just within a bag: one id always resolves to exactly one record in one bag.

use crate::record::{PlasmidRecord, ValidationError};
use crate::types::{BagName, RecordId};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

pub mod error {
    use super::*;
    use thiserror::Error;

    #[derive(Debug, Error, PartialEq)]
    pub enum InventoryError {
        #[error("record {full_id} is not valid: {}", join_errors(.errors))]
        InvalidRecord {
            full_id: String,
            errors: Vec<ValidationError>,
        },

        #[error("record {0} has no valid lot-sublot identity")]
        InvalidIdentity(String),

        #[error("record {full_id} has an invalid bag '{bag}'")]
        InvalidBag { full_id: String, bag: String },

        #[error("record {id} already exists in bag {bag}")]
        Duplicate { id: RecordId, bag: BagName },

        #[error("record {0} not found")]
        NotFound(RecordId),

        #[error("record {0} changed since it was loaded")]
        Conflict(RecordId),
    }

    fn join_errors(errors: &[ValidationError]) -> String {
        errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

use error::InventoryError;

/// Result of [`Inventory::replace`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplaceOutcome {
    /// The update equals the stored record; nothing was written.
    Unchanged,
    Updated,
    /// The update also moved the record to another bag.
    Moved { from: BagName, to: BagName },
}

/// A bag together with its records, in natural id order.
#[derive(Debug, Clone, PartialEq)]
pub struct Bag<'a> {
    pub name: &'a BagName,
    pub records: Vec<&'a PlasmidRecord>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inventory {
    bags: BTreeMap<BagName, BTreeMap<RecordId, PlasmidRecord>>,
    index: BTreeMap<RecordId, BagName>,
}

fn identity_of(record: &PlasmidRecord) -> Result<(RecordId, BagName), InventoryError> {
    let id = record
        .record_id()
        .ok_or_else(|| InventoryError::InvalidIdentity(record.full_id()))?;
    let bag = record.bag_name().ok_or_else(|| InventoryError::InvalidBag {
        full_id: record.full_id(),
        bag: record.bag().to_string(),
    })?;
    Ok((id, bag))
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads records as grouped by the backend. Only identity and bag are
    /// checked here: stored samples may predate the current volume rules.
    ///
    /// The bag a record is filed under comes from the record itself, so a
    /// group key that disagrees with its records is ignored.
    pub fn from_bags<I, R>(groups: I) -> Result<Self, InventoryError>
    where
        I: IntoIterator<Item = (String, R)>,
        R: IntoIterator<Item = PlasmidRecord>,
    {
        let mut inventory = Self::new();
        for (group, records) in groups {
            for record in records {
                if !record.bag().eq_ignore_ascii_case(group.trim()) {
                    log::warn!(
                        "record {} listed under '{group}' but belongs to '{}'",
                        record.full_id(),
                        record.bag()
                    );
                }
                inventory.insert(record)?;
            }
        }
        log::debug!(
            "loaded {} records in {} bags",
            inventory.len(),
            inventory.bags.len()
        );
        Ok(inventory)
    }

    fn insert(&mut self, record: PlasmidRecord) -> Result<RecordId, InventoryError> {
        let (id, bag) = identity_of(&record)?;
        match self.index.entry(id) {
            Entry::Occupied(existing) => Err(InventoryError::Duplicate {
                id,
                bag: existing.get().clone(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(bag.clone());
                self.bags.entry(bag).or_default().insert(id, record);
                Ok(id)
            }
        }
    }

    fn take(&mut self, id: RecordId) -> Option<(BagName, PlasmidRecord)> {
        let bag = self.index.remove(&id)?;
        let records = self.bags.get_mut(&bag)?;
        let record = records.remove(&id)?;
        if records.is_empty() {
            self.bags.remove(&bag);
        }
        Some((bag, record))
    }
}

/// Read operations.
impl Inventory {
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&PlasmidRecord> {
        let bag = self.index.get(&id)?;
        self.bags.get(bag)?.get(&id)
    }

    pub fn bag_of(&self, id: RecordId) -> Option<&BagName> {
        self.index.get(&id)
    }

    /// Bag names in natural order. Bags without records are not kept.
    pub fn bag_names(&self) -> impl Iterator<Item = &BagName> {
        self.bags.keys()
    }

    /// Every bag with its records, bags in natural order.
    pub fn bags(&self) -> impl Iterator<Item = Bag<'_>> {
        self.bags.iter().map(|(name, records)| Bag {
            name,
            records: records.values().collect(),
        })
    }

    pub fn records(&self, bag: &BagName) -> impl Iterator<Item = &PlasmidRecord> {
        self.bags.get(bag).into_iter().flat_map(|records| records.values())
    }

    /// Every record, grouped by bag in natural order.
    pub fn iter(&self) -> impl Iterator<Item = (&BagName, &PlasmidRecord)> {
        self.bags
            .iter()
            .flat_map(|(bag, records)| records.values().map(move |record| (bag, record)))
    }

    pub fn total_volume(&self) -> f64 {
        self.iter().map(|(_, record)| record.total_volume()).sum()
    }

    /// Records that have at least one sample checked out.
    pub fn checked_out(&self) -> Inventory {
        let mut checked_out = Inventory::new();
        for (bag, records) in &self.bags {
            for (id, record) in records {
                if record.has_checked_out_samples() {
                    checked_out.index.insert(*id, bag.clone());
                    checked_out
                        .bags
                        .entry(bag.clone())
                        .or_default()
                        .insert(*id, record.clone());
                }
            }
        }
        checked_out
    }
}

/// Write operations.
impl Inventory {
    /// Adds a new record. The record must pass validation and its id must not
    /// exist in any bag.
    pub fn add(&mut self, record: PlasmidRecord) -> Result<RecordId, InventoryError> {
        let errors = record.validation_errors();
        if !errors.is_empty() {
            return Err(InventoryError::InvalidRecord {
                full_id: record.full_id(),
                errors,
            });
        }
        let id = self.insert(record)?;
        log::debug!("added record {id}");
        Ok(id)
    }

    pub fn remove(&mut self, id: RecordId) -> Result<PlasmidRecord, InventoryError> {
        let (bag, record) = self.take(id).ok_or(InventoryError::NotFound(id))?;
        log::debug!("removed record {id} from {bag}");
        Ok(record)
    }

    /// Replaces `previous` with `updated`.
    ///
    /// Fails with [`InventoryError::Conflict`] when the stored record no
    /// longer equals `previous`. The update may change the id or the bag as
    /// long as the new id is not taken by another record.
    pub fn replace(
        &mut self,
        previous: &PlasmidRecord,
        updated: PlasmidRecord,
    ) -> Result<ReplaceOutcome, InventoryError> {
        let (old_id, _) = identity_of(previous)?;
        let stored = self.get(old_id).ok_or(InventoryError::NotFound(old_id))?;
        if stored != previous {
            return Err(InventoryError::Conflict(old_id));
        }
        if &updated == previous {
            return Ok(ReplaceOutcome::Unchanged);
        }

        let errors = updated.validation_errors();
        if !errors.is_empty() {
            return Err(InventoryError::InvalidRecord {
                full_id: updated.full_id(),
                errors,
            });
        }
        let (new_id, new_bag) = identity_of(&updated)?;
        if new_id != old_id {
            if let Some(bag) = self.index.get(&new_id) {
                return Err(InventoryError::Duplicate {
                    id: new_id,
                    bag: bag.clone(),
                });
            }
        }

        let (old_bag, _) = self.take(old_id).ok_or(InventoryError::NotFound(old_id))?;
        self.insert(updated)?;
        log::debug!("replaced record {old_id} with {new_id}");

        if old_bag == new_bag {
            Ok(ReplaceOutcome::Updated)
        } else {
            Ok(ReplaceOutcome::Moved {
                from: old_bag,
                to: new_bag,
            })
        }
    }

    /// Files a record under another bag. Moving to its current bag is a no-op.
    pub fn move_record(&mut self, id: RecordId, to: BagName) -> Result<(), InventoryError> {
        let current = self.bag_of(id).ok_or(InventoryError::NotFound(id))?;
        if *current == to {
            return Ok(());
        }
        let (from, record) = self.take(id).ok_or(InventoryError::NotFound(id))?;
        let moved = record.with_bag(to.to_string());
        self.insert(moved)?;
        log::debug!("moved record {id} from {from} to {to}");
        Ok(())
    }
}
