use crate::sort::compare_bag_names;
use nutype::nutype;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

static BAG_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][1-9][0-9]*$").expect("bag pattern is valid"));

static RECORD_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<lot>[0-9]+)-(?P<sublot>[0-9]+)$").expect("record id pattern is valid")
});

/// One letter followed by a positive integer without leading zero, e.g. `C20`.
pub fn is_bag_name(name: &str) -> bool {
    BAG_NAME.is_match(name)
}

/// Name of a storage bag, normalized to uppercase.
#[nutype(
    sanitize(trim, uppercase),
    validate(predicate = |name| is_bag_name(name)),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        AsRef,
        Deref,
        TryFrom,
        Into,
        Hash,
        Display,
        Serialize,
        Deserialize,
    )
)]
pub struct BagName(String);

impl PartialOrd for BagName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BagName {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_bag_names(self.as_ref(), other.as_ref())
    }
}

/// Canonical lot-sublot identity of a record.
///
/// Ordering is numeric: `9-1` sorts before `10-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId {
    pub lot: u64,
    pub sublot: u64,
}

impl RecordId {
    pub fn new(lot: u64, sublot: u64) -> Self {
        Self { lot, sublot }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.lot, self.sublot)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid record id '{0}', expected LOT-SUBLOT such as 5317-2")]
pub struct RecordIdError(pub String);

impl FromStr for RecordId {
    type Err = RecordIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = RECORD_ID
            .captures(s.trim())
            .ok_or_else(|| RecordIdError(s.to_string()))?;
        let lot = caps["lot"]
            .parse()
            .map_err(|_| RecordIdError(s.to_string()))?;
        let sublot = caps["sublot"]
            .parse()
            .map_err(|_| RecordIdError(s.to_string()))?;
        Ok(Self { lot, sublot })
    }
}

#[cfg(test)]
mod tests;
