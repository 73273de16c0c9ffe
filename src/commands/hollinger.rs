//! Alternate exporter: scrape ESPN's Hollinger team stats page directly.
//!
//! Shares no state with the primary pipeline: no cache, no merge. The page
//! has no stable ids or `data-stat` attributes, so the stats table is found
//! by shape (enough rows, enough columns) and the efficiency columns are
//! selected by fixed position.

use std::path::Path;
use std::time::Duration;

use log::info;
use scraper::{Html, Selector};
use tokio::time::sleep;

use crate::core::client;
use crate::error::{EffError, Result};

pub const HOLLINGER_URL: &str = "https://www.espn.com/nba/hollinger/teamstats";

// Column positions confirmed against the live page: team name, then the
// Hollinger offensive and defensive efficiency ratings.
const TEAM_COL: usize = 1;
const OFF_EFF_COL: usize = 10;
const DEF_EFF_COL: usize = 11;

/// A table qualifies as the stats table once it has a full league of rows.
const MIN_ROWS: usize = 30;

const POLITE_DELAY: Duration = Duration::from_secs(2);

/// One output row; values stay as the raw cell text.
#[derive(Debug, Clone, PartialEq)]
pub struct EfficiencyRow {
    pub team: String,
    pub off_rtg: String,
    pub def_rtg: String,
}

/// Handle the hollinger command: polite pause, fetch, extract, write.
pub async fn handle_hollinger(out: &Path) -> Result<()> {
    info!("starting NBA team efficiency scrape from ESPN Hollinger");
    sleep(POLITE_DELAY).await;

    let client = client()?;
    let html = client
        .get(HOLLINGER_URL)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    let rows = extract_efficiency_rows(&html, HOLLINGER_URL)?;
    write_efficiency_csv(&rows, out)?;
    info!("file created: {}", out.display());
    Ok(())
}

/// Find the main stats table by shape and pull the efficiency columns.
///
/// Repeated `Rk` header rows (ESPN re-inserts them every ten teams) and rows
/// with an empty team cell are dropped. No qualifying table is fatal.
pub fn extract_efficiency_rows(html: &str, url: &str) -> Result<Vec<EfficiencyRow>> {
    let doc = Html::parse_document(html);
    let table_sel = Selector::parse("table").expect("static selector");
    let row_sel = Selector::parse("tr").expect("static selector");
    let cell_sel = Selector::parse("td, th").expect("static selector");

    for table in doc.select(&table_sel) {
        let rows: Vec<Vec<String>> = table
            .select(&row_sel)
            .map(|row| {
                row.select(&cell_sel)
                    .map(|cell| cell.text().collect::<String>().trim().to_string())
                    .collect()
            })
            .collect();

        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        if rows.len() < MIN_ROWS || width <= DEF_EFF_COL {
            continue;
        }

        let mut out = Vec::new();
        for row in rows {
            if row.len() <= DEF_EFF_COL {
                continue;
            }
            if row[0].to_lowercase().contains("rk") {
                continue;
            }
            let team = row[TEAM_COL].clone();
            if team.is_empty() {
                continue;
            }
            out.push(EfficiencyRow {
                team,
                off_rtg: row[OFF_EFF_COL].clone(),
                def_rtg: row[DEF_EFF_COL].clone(),
            });
        }
        return Ok(out);
    }

    Err(EffError::NoMatchingTable {
        url: url.to_string(),
    })
}

/// Write the three-column efficiency CSV, no index column.
pub fn write_efficiency_csv(rows: &[EfficiencyRow], out: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(out)?;
    writer.write_record(["TEAM_NAME", "OFF_EFF_ORtg", "DEF_EFF_DRtg"])?;
    for row in rows {
        writer.write_record([&row.team, &row.off_rtg, &row.def_rtg])?;
    }
    writer.flush()?;
    Ok(())
}
