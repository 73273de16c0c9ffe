//! Parsing of saved basketball-reference pages.
//!
//! Both the player stat pages and the season team page keep their field names
//! in per-cell `data-stat` attributes, so rows parse into flat stat maps
//! rather than positional tuples. Name and link cells carry nested markup
//! that is kept verbatim as the stat value and resolved separately into
//! display text and short codes.

use std::sync::OnceLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::bbref::types::{coerce, PlayerKey, StatMap, StatValue, TeamRecord};
use crate::error::{EffError, Result};

/// Pseudo-columns bbref pads some tables with; never real stats.
const IGNORED_STATS: [&str; 3] = ["bpm_dum", "ws_dum", "DUMMY"];

fn selector(css: &str) -> Selector {
    // Selectors are static strings; a parse failure is a programming error.
    Selector::parse(css).expect("static selector")
}

/// Strip markup from an HTML fragment, keeping its text content.
pub fn strip_tags(fragment: &str) -> String {
    let doc = Html::parse_fragment(fragment);
    doc.root_element().text().collect()
}

/// Pull the team short code out of a cell's embedded anchor
/// (`href="/teams/MIA/2020.html"` -> `MIA`). Absence is an error: downstream
/// merging keys on code uniqueness per season.
pub fn team_short_code(cell: &str) -> Result<String> {
    static TEAM_CODE_RE: OnceLock<Regex> = OnceLock::new();
    let re = TEAM_CODE_RE.get_or_init(|| Regex::new("teams/(.*?)/").expect("static regex"));
    re.captures(cell)
        .map(|c| c[1].to_string())
        .ok_or_else(|| EffError::MissingShortCode {
            cell: cell.to_string(),
        })
}

/// Collect a row's `<td>` cells into a stat map, keyed by the normalized
/// `data-stat` attribute, with values coerced to int/float/text.
fn row_stats(row: ElementRef<'_>) -> StatMap {
    let td = selector("td");
    let mut stats = StatMap::new();
    for cell in row.select(&td) {
        let Some(name) = cell.value().attr("data-stat") else {
            continue;
        };
        if name.is_empty() {
            continue;
        }
        let name = name.replace('-', "_");
        if IGNORED_STATS.contains(&name.as_str()) {
            continue;
        }
        stats.insert(name, coerce(&cell.inner_html()));
    }
    stats
}

/// Parse one saved player page into `(identity, stats)` rows in document
/// order. Rows are the `<tr>`s marked as full or partial data rows; the
/// canonical player id rides on the first cell's `data-append-csv` attribute
/// rather than in text content.
pub fn parse_player_page(html: &str, year: u16) -> Result<Vec<(PlayerKey, StatMap)>> {
    let doc = Html::parse_document(html);
    let row_sel = selector("tr.full_table, tr.partial_table");
    let td = selector("td");

    let mut rows = Vec::new();
    for row in doc.select(&row_sel) {
        let mut stats = row_stats(row);

        let player_id = row
            .select(&td)
            .next()
            .and_then(|cell| cell.value().attr("data-append-csv"))
            .ok_or(EffError::MissingPlayerId)?
            .to_string();

        let name = stats
            .get("player")
            .and_then(StatValue::as_text)
            .map(strip_tags)
            .ok_or(EffError::MalformedRow { missing: "player" })?;
        let team = stats
            .get("team_id")
            .and_then(StatValue::as_text)
            .map(strip_tags)
            .ok_or(EffError::MalformedRow { missing: "team_id" })?;

        stats.insert("name".into(), StatValue::Text(name));
        stats.insert("team".into(), StatValue::Text(team.clone()));
        stats.insert("bb_ref_id".into(), StatValue::Text(player_id.clone()));
        stats.insert("year".into(), StatValue::Int(year as i64));

        let key = PlayerKey {
            player_id,
            team,
            season: year.to_string(),
        };
        rows.push((key, stats));
    }
    Ok(rows)
}

/// Parse a team row shared by both season tables: stat map plus resolved
/// display name and short code.
fn team_row(row: ElementRef<'_>, year: u16) -> Result<Option<TeamRecord>> {
    let mut stats = row_stats(row);
    let Some(team_cell) = stats.get("team").and_then(StatValue::as_text) else {
        // League-average and separator rows have no team cell.
        return Ok(None);
    };
    let team_cell = team_cell.to_string();

    let shortname = team_short_code(&team_cell)?;
    let name = strip_tags(&team_cell)
        .trim_end_matches('*')
        .to_string();

    stats.insert("name".into(), StatValue::Text(name));
    stats.insert("shortname".into(), StatValue::Text(shortname.clone()));
    stats.insert("year".into(), StatValue::Int(year as i64));

    Ok(Some(TeamRecord { shortname, stats }))
}

fn container_rows(
    doc: &Html,
    container: &str,
    skip: usize,
    year: u16,
) -> Result<Vec<TeamRecord>> {
    let sel = selector(&format!("{} tr", container));
    let mut teams = Vec::new();
    // Skip header rows, then the 30 league teams follow.
    for row in doc.select(&sel).skip(skip).take(30) {
        if let Some(team) = team_row(row, year)? {
            teams.push(team);
        }
    }
    Ok(teams)
}

/// Parse the saved season page (`teams.html`) into its two stat tables:
/// the team-opponent totals and the advanced ratings.
pub fn parse_team_page(html: &str, year: u16) -> Result<(Vec<TeamRecord>, Vec<TeamRecord>)> {
    let doc = Html::parse_document(html);
    let totals = container_rows(&doc, "#all_totals_team-opponent", 1, year)?;
    let advanced = container_rows(&doc, "#all_advanced_team", 2, year)?;
    Ok((totals, advanced))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAYER_PAGE: &str = r#"
    <html><body><table>
    <tr class="thead"><td data-stat="player">Player</td></tr>
    <tr class="full_table">
      <td data-stat="player" data-append-csv="butleji01" csk="Butler,Jimmy"><a href="/players/b/butleji01.html">Jimmy Butler</a></td>
      <td data-stat="team_id"><a href="/teams/MIA/2020.html">MIA</a></td>
      <td data-stat="g">58</td>
      <td data-stat="fg_pct">.455</td>
      <td data-stat="bpm-dum"></td>
    </tr>
    <tr class="partial_table">
      <td data-stat="player" data-append-csv="iguodan01"><a href="/players/i/iguodan01.html">Andre Iguodala</a></td>
      <td data-stat="team_id"><a href="/teams/MIA/2020.html">MIA</a></td>
      <td data-stat="g">21</td>
    </tr>
    <tr><td data-stat="player">not a data row</td></tr>
    </table></body></html>"#;

    #[test]
    fn player_rows_parse_with_identity() {
        let rows = parse_player_page(PLAYER_PAGE, 2020).unwrap();
        assert_eq!(rows.len(), 2);

        let (key, stats) = &rows[0];
        assert_eq!(key.player_id, "butleji01");
        assert_eq!(key.team, "MIA");
        assert_eq!(key.season, "2020");
        assert_eq!(stats["name"], StatValue::Text("Jimmy Butler".into()));
        assert_eq!(stats["g"], StatValue::Int(58));
        assert_eq!(stats["fg_pct"], StatValue::Float(0.455));
        assert_eq!(stats["year"], StatValue::Int(2020));
        // Pseudo-column dropped.
        assert!(!stats.contains_key("bpm_dum"));
        // Raw markup preserved on the link cell itself.
        assert!(stats["player"].as_text().unwrap().contains("<a href"));
    }

    #[test]
    fn player_row_without_id_is_an_error() {
        let html = r#"<table><tr class="full_table">
            <td data-stat="player">No Id</td>
            <td data-stat="team_id">MIA</td></tr></table>"#;
        assert!(matches!(
            parse_player_page(html, 2020),
            Err(EffError::MissingPlayerId)
        ));
    }

    #[test]
    fn short_code_extraction() {
        let cell = r#"<a href="/teams/CHO/2020.html">Charlotte Hornets</a>"#;
        assert_eq!(team_short_code(cell).unwrap(), "CHO");
        // Second call hits the cached regex.
        assert_eq!(
            team_short_code(r#"<a href="/teams/MIA/2020.html">Miami Heat</a>"#).unwrap(),
            "MIA"
        );

        let err = team_short_code("Charlotte Hornets").unwrap_err();
        assert!(matches!(err, EffError::MissingShortCode { .. }));
    }

    #[test]
    fn strip_tags_recovers_display_text() {
        assert_eq!(
            strip_tags(r#"<a href="/teams/MIA/2020.html">Miami Heat</a>"#),
            "Miami Heat"
        );
        assert_eq!(strip_tags("plain"), "plain");
    }

    #[test]
    fn team_page_parses_both_tables() {
        let html = r#"
        <div id="all_totals_team-opponent"><table>
          <tr><th>header</th></tr>
          <tr><td data-stat="team"><a href="/teams/MIA/2020.html">Miami Heat</a></td>
              <td data-stat="pts">8000</td></tr>
          <tr><td data-stat="team"><a href="/teams/LAL/2020.html">Los Angeles Lakers*</a></td>
              <td data-stat="pts">8200</td></tr>
        </table></div>
        <div id="all_advanced_team"><table>
          <tr><th>over</th></tr>
          <tr><th>header</th></tr>
          <tr><td data-stat="team"><a href="/teams/MIA/2020.html">Miami Heat</a></td>
              <td data-stat="off_rtg">112.3</td></tr>
        </table></div>"#;

        let (totals, advanced) = parse_team_page(html, 2020).unwrap();
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].shortname, "MIA");
        assert_eq!(totals[0].stats["pts"], StatValue::Int(8000));
        // Trailing playoff asterisk stripped from the display name.
        assert_eq!(
            totals[1].stats["name"],
            StatValue::Text("Los Angeles Lakers".into())
        );

        assert_eq!(advanced.len(), 1);
        assert_eq!(advanced[0].stats["off_rtg"], StatValue::Float(112.3));
    }
}
