//! Identity-keyed record merging.
//!
//! Pure functions over already-parsed records, so precedence rules are
//! testable without network or filesystem fixtures. Two different policies
//! apply and callers must not confuse them:
//!
//! - Player merges are *first write wins*: pages are processed with totals as
//!   the base, and each later page (advanced, per-minute, per-possession,
//!   per-game) only fills fields the record doesn't have yet.
//! - Team merges are *last write wins*: the advanced table's fields overwrite
//!   the totals table's on collision.

use log::warn;

use crate::bbref::types::{PlayerKey, PlayerMap, StatMap, StatValue, TeamRecord};
use crate::error::{EffError, Result};

/// Merge one parsed player row into the map. If the identity is new the row
/// is inserted whole; otherwise only previously-absent fields are filled.
pub fn merge_player_row(players: &mut PlayerMap, key: PlayerKey, stats: StatMap) {
    let record = players.entry(key).or_default();
    for (name, value) in stats {
        record.entry(name).or_insert(value);
    }
}

/// Overlay a season's advanced team rows onto the totals rows.
///
/// Fields from `advanced` overwrite wholesale on collision. A team that shows
/// up in `advanced` but was never seen in `totals` is logged and dropped;
/// only teams discovered in the totals table survive to output.
pub fn merge_team_pages(
    mut totals: Vec<TeamRecord>,
    advanced: Vec<TeamRecord>,
    year: u16,
) -> Vec<TeamRecord> {
    for adv in advanced {
        match totals.iter_mut().find(|t| t.shortname == adv.shortname) {
            Some(team) => {
                for (name, value) in adv.stats {
                    team.stats.insert(name, value);
                }
            }
            None => {
                warn!(
                    "team {} found in advanced but not totals for {}",
                    adv.shortname, year
                );
            }
        }
    }
    totals
}

/// Align 538's team naming with basketball-reference's. The one known rename:
/// Charlotte is CHA on 538 but CHO on bbref from the 2015 season on.
pub fn resolve_team_alias(team: &str, year: u16) -> &str {
    if team == "CHA" && year > 2014 {
        "CHO"
    } else {
        team
    }
}

/// Fill supplemental rating fields into an existing player record.
///
/// The identity must already exist from the box-score pages; a rating row for
/// an unknown (id, team, season) aborts the run. Fields follow the player
/// policy: already-present keys keep their value.
pub fn merge_rating_fields<I>(players: &mut PlayerMap, key: &PlayerKey, fields: I) -> Result<()>
where
    I: IntoIterator<Item = (String, StatValue)>,
{
    let record = players.get_mut(key).ok_or_else(|| EffError::MissingIdentity {
        player_id: key.player_id.clone(),
        team: key.team.clone(),
        season: key.season.clone(),
    })?;
    for (name, value) in fields {
        record.entry(name).or_insert(value);
    }
    Ok(())
}
