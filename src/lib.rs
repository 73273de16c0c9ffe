//! NBA Team Efficiency Scraper Library
//!
//! Scrapes basketball statistics from basketball-reference.com (player and
//! team box-score tables) and FiveThirtyEight (RAPTOR efficiency ratings),
//! reconciles records across sources, and exports one merged CSV dataset.
//!
//! ## Pipeline
//!
//! - **Fetch**: download pages into an hour-stale file cache, retrying with
//!   exponential backoff
//! - **Parse**: turn `data-stat`-keyed table cells into typed stat maps
//! - **Merge**: reconcile partial records per composite identity (first
//!   write wins for players, last write wins for team pages)
//! - **Export**: flatten the team records into `nba_team_efficiency.csv`
//!
//! The `hollinger` subcommand is an independent exporter variant that
//! scrapes ESPN's Hollinger team stats table directly.

pub mod bbref;
pub mod cli;
pub mod commands;
pub mod core;
pub mod error;
pub mod export;
pub mod raptor;

// Re-export commonly used types
pub use bbref::{PlayerKey, PlayerMap, StatMap, StatValue, TeamRecord};
pub use cli::Season;
pub use error::{EffError, Result};

/// First season we process (season-ending year).
pub const MIN_YEAR: u16 = 2010;
/// One past the last season we process.
pub const MAX_YEAR: u16 = 2026;
