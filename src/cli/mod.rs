//! Command-line interface: argument structures and typed wrappers.

pub mod args;
pub mod types;

pub use args::{Commands, NbaEff};
pub use types::Season;
