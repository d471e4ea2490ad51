//! Natural ordering for bag names, record ids and record listings.

use crate::record::PlasmidRecord;
use crate::types::timestamp::parse_timestamp;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static BAG_PARTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<letters>[A-Za-z]+)(?P<number>[0-9]+)$").expect("bag parts pattern is valid")
});

/// Compares two runs of ASCII digits by numeric value without parsing them.
fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Orders `C2` before `C10`. Letters compare case-insensitively. Names that
/// are not letters followed by digits fall back to plain string order.
pub fn compare_bag_names(a: &str, b: &str) -> Ordering {
    match (BAG_PARTS.captures(a), BAG_PARTS.captures(b)) {
        (Some(ca), Some(cb)) => ca["letters"]
            .to_ascii_uppercase()
            .cmp(&cb["letters"].to_ascii_uppercase())
            .then_with(|| compare_digit_runs(&ca["number"], &cb["number"])),
        _ => a.cmp(b),
    }
}

/// Splits text into alternating digit and non-digit runs.
fn chunks(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = rest
            .find(|c: char| c.is_ascii_digit() != digits)
            .unwrap_or(rest.len());
        let (chunk, tail) = rest.split_at(end);
        rest = tail;
        Some(chunk)
    })
}

/// Natural ordering of `lot-sublot` strings: `9-2` < `10-1` < `10-12`.
pub fn compare_full_ids(a: &str, b: &str) -> Ordering {
    let mut left = chunks(a);
    let mut right = chunks(b);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let both_digits = x.starts_with(|c: char| c.is_ascii_digit())
                    && y.starts_with(|c: char| c.is_ascii_digit());
                let ordering = if both_digits {
                    compare_digit_runs(x, y)
                } else {
                    x.to_lowercase().cmp(&y.to_lowercase())
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}

/// Listing order for records within a bag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Ascending natural id order.
    #[default]
    Id,
    /// Largest total volume first.
    Volume,
    /// Most recently added first. Records without a readable date follow, in
    /// their original relative order.
    DateAdded,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Id => write!(f, "id"),
            SortKey::Volume => write!(f, "volume"),
            SortKey::DateAdded => write!(f, "date"),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "id" => Ok(SortKey::Id),
            "volume" => Ok(SortKey::Volume),
            "date" => Ok(SortKey::DateAdded),
            other => Err(format!("unknown sort key '{other}', expected id, volume or date")),
        }
    }
}

fn compare_records(a: &PlasmidRecord, b: &PlasmidRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Id => compare_full_ids(&a.full_id(), &b.full_id()),
        SortKey::Volume => b.total_volume().total_cmp(&a.total_volume()),
        SortKey::DateAdded => {
            match (parse_timestamp(a.date_added()), parse_timestamp(b.date_added())) {
                (Some(da), Some(db)) => db.cmp(&da),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        }
    }
}

/// Stable sort of `records` by `key`.
pub fn sort_records(records: &mut [PlasmidRecord], key: SortKey) {
    records.sort_by(|a, b| compare_records(a, b, key));
}
