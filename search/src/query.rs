//! Classification of free-text search input.

use regex::Regex;
use std::sync::LazyLock;

static BAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][0-9]+$").expect("bag query pattern is valid"));

static FULL_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+-[0-9]+$").expect("id query pattern is valid"));

static LOT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("lot query pattern is valid"));

static DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[0-9]{1,2}[/.\s][0-9]{4}$|^[0-9]{1,2}[/.\s][0-9]{1,2}[/.\s][0-9]{4}$|^[0-9]{1,2}[/.\s][0-9]{1,2}$",
    )
    .expect("date query pattern is valid")
});

static DATE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[/.\s]").expect("date separator pattern is valid"));

static ID_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+-[0-9]+").expect("id token pattern is valid"));

/// A calendar filter. Months are 1-based. Components are kept as typed, so an
/// impossible date such as `13/40` simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateQuery {
    /// `12/2023`
    MonthYear { month: u32, year: i32 },
    /// `12/25`, any year.
    MonthDay { month: u32, day: u32 },
    /// `12/25/2023`
    Exact { month: u32, day: u32, year: i32 },
}

impl DateQuery {
    fn parse(text: &str) -> Option<Self> {
        let parts: Vec<&str> = DATE_SEPARATOR.split(text).collect();
        match parts.as_slice() {
            [first, second] => {
                let month = first.parse().ok()?;
                let second: u32 = second.parse().ok()?;
                if second > 31 {
                    Some(DateQuery::MonthYear {
                        month,
                        year: i32::try_from(second).ok()?,
                    })
                } else {
                    Some(DateQuery::MonthDay { month, day: second })
                }
            }
            [month, day, year] => Some(DateQuery::Exact {
                month: month.parse().ok()?,
                day: day.parse().ok()?,
                year: year.parse().ok()?,
            }),
            _ => None,
        }
    }
}

/// What a search box entry asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    /// Blank input: everything.
    All,
    /// A bag name, uppercased.
    Bag(String),
    /// One `lot-sublot` id, lowercased.
    FullId(String),
    /// Every sublot of a lot.
    Lot(String),
    Date(DateQuery),
    /// Several ids separated by commas, spaces or semicolons. An empty list
    /// matches nothing.
    Ids(Vec<String>),
    /// Case-insensitive substring, lowercased.
    Text(String),
}

impl SearchQuery {
    /// Classifies trimmed input. The first matching shape wins.
    pub fn parse(input: &str) -> Self {
        let term = input.trim();

        if term.is_empty() {
            SearchQuery::All
        } else if BAG.is_match(term) {
            SearchQuery::Bag(term.to_uppercase())
        } else if FULL_ID.is_match(term) {
            SearchQuery::FullId(term.to_lowercase())
        } else if LOT.is_match(term) {
            SearchQuery::Lot(term.to_string())
        } else if let Some(date) = DATE.is_match(term).then(|| DateQuery::parse(term)).flatten() {
            SearchQuery::Date(date)
        } else if term.contains([',', ' ', ';']) {
            SearchQuery::Ids(
                ID_TOKEN
                    .find_iter(term)
                    .map(|token| token.as_str().to_lowercase())
                    .collect(),
            )
        } else {
            SearchQuery::Text(term.to_lowercase())
        }
    }
}

impl From<&str> for SearchQuery {
    fn from(input: &str) -> Self {
        SearchQuery::parse(input)
    }
}
