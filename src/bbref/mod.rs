//! basketball-reference.com scraping: typed records, table parsing, and the
//! identity-keyed merge rules.

pub mod merge;
pub mod parse;
pub mod types;

pub use types::{PlayerKey, PlayerMap, StatMap, StatValue, TeamRecord};
