//! Search results types.

use plasmid_core::{Bag, BagName, PlasmidRecord};

/// Matched records, borrowed from the searched inventory and grouped by bag
/// in natural bag order.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults<'a> {
    pub(crate) bags: Vec<Bag<'a>>,
}

impl<'a> SearchResults<'a> {
    pub fn bags(&self) -> impl Iterator<Item = &Bag<'a>> + '_ {
        self.bags.iter()
    }

    /// Iterates over matched records with the bag holding each.
    pub fn iter(&self) -> impl Iterator<Item = (&'a BagName, &'a PlasmidRecord)> + '_ {
        self.bags
            .iter()
            .flat_map(|bag| bag.records.iter().map(move |record| (bag.name, *record)))
    }

    /// Number of matched records.
    pub fn len(&self) -> usize {
        self.bags.iter().map(|bag| bag.records.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bags.is_empty()
    }
}
