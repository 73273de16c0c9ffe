//! Flattening merged team records into the final CSV.
//!
//! The column set is the union of every record's stat-field names, in
//! first-seen order, so new bbref columns show up without code changes.
//! Cells a record never produced stay empty; empty *strings* in otherwise
//! numeric columns become zero so downstream tooling reads clean numbers.

use std::path::Path;

use log::info;

use crate::bbref::types::{StatValue, TeamRecord};
use crate::error::Result;

/// Fixed output filename for the merged team dataset.
pub const OUTPUT_FILE: &str = "nba_team_efficiency.csv";

/// How many leading values are sampled when classifying a column as numeric.
const SAMPLE_HEAD: usize = 20;

/// One flattened cell: `None` when the record never had the field.
type Cell = Option<StatValue>;

/// Build the column union (first-seen order) and one row per team record.
pub fn flatten(teams: &[TeamRecord]) -> (Vec<String>, Vec<Vec<Cell>>) {
    let mut columns: Vec<String> = Vec::new();
    for team in teams {
        for name in team.stats.keys() {
            if !columns.iter().any(|c| c == name) {
                columns.push(name.clone());
            }
        }
    }

    let rows = teams
        .iter()
        .map(|team| {
            columns
                .iter()
                .map(|name| team.stats.get(name).cloned())
                .collect()
        })
        .collect();

    (columns, rows)
}

/// Columns whose sampled head contains a number get empty-string cells
/// replaced with zero.
fn zero_fill_numeric_columns(rows: &mut [Vec<Cell>], width: usize) {
    for col in 0..width {
        let numeric = rows
            .iter()
            .take(SAMPLE_HEAD)
            .any(|row| row[col].as_ref().is_some_and(StatValue::is_numeric));
        if !numeric {
            continue;
        }
        for row in rows.iter_mut() {
            if row[col].as_ref().and_then(|v| v.as_text()) == Some("") {
                row[col] = Some(StatValue::Int(0));
            }
        }
    }
}

/// Narrow all-integer columns from 64-bit to 32-bit before writing. Counting
/// stats never approach the i32 range; anything that does would be a parse
/// bug worth surfacing as a wrapped value.
fn narrow_int_columns(rows: &mut [Vec<Cell>], width: usize) {
    for col in 0..width {
        let all_ints = rows.iter().all(|row| {
            matches!(row[col], Some(StatValue::Int(_)) | None)
        });
        if !all_ints {
            continue;
        }
        for row in rows.iter_mut() {
            if let Some(StatValue::Int(n)) = row[col] {
                row[col] = Some(StatValue::Int((n as i32) as i64));
            }
        }
    }
}

/// Write the merged team dataset: header row, then one row per team per
/// season, no index column.
pub fn write_team_csv(teams: &[TeamRecord], out: &Path) -> Result<()> {
    let (columns, mut rows) = flatten(teams);
    zero_fill_numeric_columns(&mut rows, columns.len());
    narrow_int_columns(&mut rows, columns.len());

    let mut writer = csv::Writer::from_path(out)?;
    writer.write_record(&columns)?;
    for row in &rows {
        writer.write_record(
            row.iter()
                .map(|cell| cell.as_ref().map(StatValue::to_string).unwrap_or_default()),
        )?;
    }
    writer.flush()?;

    info!("wrote {} rows to {}", rows.len(), out.display());
    Ok(())
}
