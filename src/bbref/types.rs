//! Record types shared by the parse and merge layers.
//!
//! Every parsed cell becomes a [`StatValue`] keyed by its `data-stat` name.
//! Players are identified by a composite [`PlayerKey`]; teams by their 2-3
//! letter short code within a season.

use std::collections::BTreeMap;
use std::fmt;

/// A single parsed cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum StatValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl StatValue {
    pub fn is_numeric(&self) -> bool {
        matches!(self, StatValue::Int(_) | StatValue::Float(_))
    }

    /// The raw string form, for `Text` values only.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            StatValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Int(n) => write!(f, "{}", n),
            StatValue::Float(x) => write!(f, "{}", x),
            StatValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Coerce a cell's text into a number if it looks like one.
///
/// Three tiers: integer, then float rounded to 4 decimal places, else the
/// original string unchanged (name/link cells keep their embedded markup and
/// are resolved separately). Surrounding whitespace is ignored for the
/// numeric attempts but preserved in the text fallback.
pub fn coerce(raw: &str) -> StatValue {
    let candidate = raw.trim();
    if let Ok(n) = candidate.parse::<i64>() {
        return StatValue::Int(n);
    }
    if let Ok(x) = candidate.parse::<f64>() {
        return StatValue::Float((x * 10_000.0).round() / 10_000.0);
    }
    StatValue::Text(raw.to_string())
}

/// Flat stat-name -> value mapping for one record.
pub type StatMap = BTreeMap<String, StatValue>;

/// Composite player identity: basketball-reference id + team code + season.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerKey {
    pub player_id: String,
    pub team: String,
    pub season: String,
}

impl fmt::Display for PlayerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.player_id, self.team, self.season)
    }
}

/// All players seen so far, keyed by composite identity.
pub type PlayerMap = BTreeMap<PlayerKey, StatMap>;

/// One team's merged season stats. Kept in the order the totals table listed
/// them so the export row order is stable.
#[derive(Debug, Clone)]
pub struct TeamRecord {
    pub shortname: String,
    pub stats: StatMap,
}
