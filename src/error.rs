//! Error types for the NBA efficiency scraper

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EffError>;

#[derive(Error, Debug)]
pub enum EffError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Failed to parse year: {0}")]
    InvalidYear(#[from] std::num::ParseIntError),

    #[error("giving up on {url} after {retries} retries (last status {status}): {body}")]
    RetriesExhausted {
        url: String,
        retries: u32,
        status: u16,
        body: String,
    },

    #[error("missing cached page: {path}")]
    MissingPage { path: String },

    #[error("no team short code in cell: {cell}")]
    MissingShortCode { cell: String },

    #[error("player row has no data-append-csv id")]
    MissingPlayerId,

    #[error("row is missing its {missing} cell")]
    MalformedRow { missing: &'static str },

    #[error("couldn't find ({player_id}, {team}, {season}) in player data")]
    MissingIdentity {
        player_id: String,
        team: String,
        season: String,
    },

    #[error("no table matching the expected shape on {url}")]
    NoMatchingTable { url: String },
}
