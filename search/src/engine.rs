use crate::query::{DateQuery, SearchQuery};
use crate::results::SearchResults;
use chrono::{DateTime, Datelike, Utc};
use plasmid_core::types::timestamp::parse_timestamp;
use plasmid_core::{Bag, BagName, Inventory, PlasmidRecord};

/// Filters `inventory` down to the records matching `query`.
///
/// Matches keep the inventory's grouping; bags without a match are left out.
pub fn search<'a>(inventory: &'a Inventory, query: &SearchQuery) -> SearchResults<'a> {
    let bags: Vec<Bag<'a>> = inventory
        .bags()
        .filter_map(|bag| {
            let records: Vec<&PlasmidRecord> = bag
                .records
                .into_iter()
                .filter(|record| matches(bag.name, record, query))
                .collect();
            (!records.is_empty()).then_some(Bag {
                name: bag.name,
                records,
            })
        })
        .collect();

    log::debug!("query {query:?} matched records in {} bags", bags.len());
    SearchResults { bags }
}

fn matches(bag: &BagName, record: &PlasmidRecord, query: &SearchQuery) -> bool {
    match query {
        SearchQuery::All => true,
        SearchQuery::Bag(name) => bag.to_string() == *name,
        SearchQuery::FullId(id) => record.full_id().to_lowercase() == *id,
        SearchQuery::Lot(lot) => record.lot() == lot,
        SearchQuery::Date(date) => record_dates(record).any(|at| date_matches(date, &at)),
        SearchQuery::Ids(ids) => ids.contains(&record.full_id().to_lowercase()),
        SearchQuery::Text(text) => [
            record.full_id(),
            record.lot().to_string(),
            record.sublot().to_string(),
            bag.to_string(),
            record.notes().to_string(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(text.as_str())),
    }
}

/// `date_added` plus every sample's creation and modification dates.
fn record_dates(record: &PlasmidRecord) -> impl Iterator<Item = DateTime<Utc>> + '_ {
    std::iter::once(record.date_added())
        .chain(
            record
                .samples()
                .iter()
                .flat_map(|sample| [sample.date_created.as_str(), sample.date_modified.as_str()]),
        )
        .filter(|text| !text.is_empty())
        .filter_map(parse_timestamp)
}

fn date_matches(query: &DateQuery, at: &DateTime<Utc>) -> bool {
    match *query {
        DateQuery::MonthYear { month, year } => at.month() == month && at.year() == year,
        DateQuery::MonthDay { month, day } => at.month() == month && at.day() == day,
        DateQuery::Exact { month, day, year } => {
            at.month() == month && at.day() == day && at.year() == year
        }
    }
}
