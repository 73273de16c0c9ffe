//! Command implementations for the NBA efficiency CLI

pub mod hollinger;
pub mod scrape;
