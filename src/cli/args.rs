//! CLI argument definitions and parsing structures.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::types::Season;
use crate::export::OUTPUT_FILE;

#[derive(Debug, Parser)]
#[clap(name = "nba-eff", about = "Download and merge basketball statistics")]
pub struct NbaEff {
    /// Log at debug level instead of info.
    #[clap(long, short, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scrape basketball-reference and RAPTOR data, merge, and export the
    /// team efficiency CSV.
    ///
    /// Pages are cached under the data directory and refetched when older
    /// than an hour; processing always runs over whatever is cached.
    Scrape {
        /// Do not download any data.
        #[clap(long, short = 'n')]
        no_download: bool,

        /// Download all data regardless of the cache.
        #[clap(long, short = 'f')]
        force_download: bool,

        /// Only process a particular season year (e.g. 2020).
        #[clap(long, short = 'y')]
        year_only: Option<Season>,

        /// Force reprocessing of all years.
        ///
        /// Accepted for interface compatibility; processing currently always
        /// reruns, so this flag has no effect.
        #[clap(long)]
        force_reprocess: bool,

        /// Root of the on-disk cache tree.
        #[clap(long, default_value = "data")]
        data_dir: PathBuf,
    },

    /// Scrape ESPN's Hollinger team stats page directly (no caching) and
    /// write a three-column efficiency CSV.
    Hollinger {
        /// Output CSV path.
        #[clap(long, default_value = OUTPUT_FILE)]
        out: PathBuf,
    },
}
