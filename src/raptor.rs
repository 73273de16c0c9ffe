//! FiveThirtyEight RAPTOR ratings: CSV ingestion and merge into the player
//! map built from the box-score pages.
//!
//! Rows are keyed by the same (player_id, team, season) identity the bbref
//! pages produce, after applying the team-code alias. A rating row whose
//! identity was never seen on a box-score page aborts the run; silent drops
//! would hide join bugs.

use std::path::Path;

use log::info;
use serde::Deserialize;

use crate::bbref::merge::{merge_rating_fields, resolve_team_alias};
use crate::bbref::types::{coerce, PlayerKey, PlayerMap};
use crate::core::DataDir;
use crate::error::Result;

/// The three RAPTOR exports, in merge order. Earlier files win on conflicting
/// fields, same as earlier pages do for box-score stats.
pub const RAPTOR_FILES: [&str; 3] = ["latest_RAPTOR", "modern_RAPTOR", "historical_RAPTOR"];

/// Columns that form the row identity rather than rating stats.
const IDENTITY_COLUMNS: [&str; 5] = ["player_name", "player_id", "team", "season", "season_type"];

/// The identity half of a RAPTOR row. The rating columns vary across the
/// three exports, so they are read positionally off the record instead.
#[derive(Debug, Deserialize)]
pub struct RaptorRow {
    pub player_id: String,
    pub season: String,
    pub season_type: String,
    pub team: String,
}

/// Merge all three RAPTOR files into `players`, restricted to `years`.
pub fn merge_ratings(players: &mut PlayerMap, data: &DataDir, years: &[u16]) -> Result<()> {
    for file in RAPTOR_FILES {
        let path = data.raptor_path(file);
        info!("merging {}", path.display());
        merge_rating_file(players, &path, years)?;
    }
    Ok(())
}

/// Merge one RAPTOR CSV. Playoff rows (`season_type != "RS"`) and seasons
/// outside the requested range are skipped.
pub fn merge_rating_file(players: &mut PlayerMap, path: &Path, years: &[u16]) -> Result<()> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    for record in reader.records() {
        let record = record?;
        let row: RaptorRow = record.deserialize(Some(&headers))?;
        if row.season_type != "RS" {
            continue;
        }
        let year: u16 = row.season.parse()?;
        if !years.contains(&year) {
            continue;
        }

        let team = resolve_team_alias(&row.team, year).to_string();
        let key = PlayerKey {
            player_id: row.player_id,
            team,
            season: row.season,
        };
        let fields = headers
            .iter()
            .zip(record.iter())
            .filter(|(name, _)| !IDENTITY_COLUMNS.contains(name))
            .map(|(name, value)| (name.to_string(), coerce(value)));
        merge_rating_fields(players, &key, fields)?;
    }
    Ok(())
}
