//! Local search over a loaded plasmid inventory.
//!
//! Input is classified into one of several query shapes (bag name, single id,
//! lot, calendar date, id list, free text) and matched against every record.
//! Searching borrows from the inventory; nothing is copied.

mod engine;
mod query;
mod results;

pub use engine::search;
pub use query::{DateQuery, SearchQuery};
pub use results::SearchResults;
