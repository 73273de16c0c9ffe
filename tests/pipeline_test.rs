//! End-to-end pipeline tests over fixture HTML: parse both season tables,
//! merge, and export, without touching the network.

use std::fmt::Write as _;

use nba_eff::bbref::merge::{merge_player_row, merge_team_pages};
use nba_eff::bbref::parse::{parse_player_page, parse_team_page};
use nba_eff::core::write_string;
use nba_eff::export::{write_team_csv, OUTPUT_FILE};
use nba_eff::raptor::merge_rating_file;
use nba_eff::{PlayerMap, StatValue};

const TEAM_CODES: [&str; 30] = [
    "ATL", "BOS", "BRK", "CHO", "CHI", "CLE", "DAL", "DEN", "DET", "GSW", "HOU", "IND", "LAC",
    "LAL", "MEM", "MIA", "MIL", "MIN", "NOP", "NYK", "OKC", "ORL", "PHI", "PHO", "POR", "SAC",
    "SAS", "TOR", "UTA", "WAS",
];

/// A season page with both team tables populated for all 30 teams.
fn season_page(year: u16) -> String {
    let mut html = String::from(r#"<html><body><div id="all_totals_team-opponent"><table>"#);
    html.push_str("<tr><th>Rk</th><th>Team</th><th>G</th><th>PTS</th></tr>");
    for (i, code) in TEAM_CODES.iter().enumerate() {
        write!(
            html,
            r#"<tr><td data-stat="team"><a href="/teams/{code}/{year}.html">Team {code}*</a></td>
               <td data-stat="g">82</td><td data-stat="pts">{}</td></tr>"#,
            8000 + i
        )
        .unwrap();
    }
    html.push_str("</table></div>");

    html.push_str(r#"<div id="all_advanced_team"><table>"#);
    html.push_str("<tr><th colspan=\"4\">Advanced</th></tr>");
    html.push_str("<tr><th>Rk</th><th>Team</th><th>ORtg</th><th>DRtg</th></tr>");
    for (i, code) in TEAM_CODES.iter().enumerate() {
        write!(
            html,
            r#"<tr><td data-stat="team"><a href="/teams/{code}/{year}.html">Team {code}</a></td>
               <td data-stat="off_rtg">1{}.5</td><td data-stat="def_rtg">109.1</td>
               <td data-stat="pts">{}</td></tr>"#,
            10 + i % 10,
            9000 + i
        )
        .unwrap();
    }
    html.push_str("</table></div></body></html>");
    html
}

#[test]
fn thirty_team_season_exports_thirty_rows() {
    let year = 2020;
    let (totals, advanced) = parse_team_page(&season_page(year), year).unwrap();
    assert_eq!(totals.len(), 30);
    assert_eq!(advanced.len(), 30);

    let teams = merge_team_pages(totals, advanced, year);
    assert_eq!(teams.len(), 30);

    // No duplicate short codes.
    let mut codes: Vec<&str> = teams.iter().map(|t| t.shortname.as_str()).collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), 30);

    // Advanced pts overwrote the totals pts; totals-only g survived.
    let mia = teams.iter().find(|t| t.shortname == "MIA").unwrap();
    assert_eq!(mia.stats["pts"], StatValue::Int(9015));
    assert_eq!(mia.stats["g"], StatValue::Int(82));
    assert_eq!(mia.stats["name"], StatValue::Text("Team MIA".into()));

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join(OUTPUT_FILE);
    write_team_csv(&teams, &out).unwrap();

    let contents = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 31, "header plus one row per team");

    let header: Vec<&str> = lines[0].split(',').collect();
    assert!(header.contains(&"pts"));
    assert!(header.contains(&"off_rtg"));
    assert!(header.contains(&"shortname"));
    assert!(header.contains(&"year"));
}

#[test]
fn player_pages_and_ratings_reconcile_by_identity() {
    let year = 2020;
    let totals_page = r#"<table>
      <tr class="full_table">
        <td data-stat="player" data-append-csv="butleji01">
          <a href="/players/b/butleji01.html">Jimmy Butler</a></td>
        <td data-stat="team_id"><a href="/teams/MIA/2020.html">MIA</a></td>
        <td data-stat="g">58</td><td data-stat="pts">1163</td>
      </tr>
      <tr class="full_table">
        <td data-stat="player" data-append-csv="grahade01">
          <a href="/players/g/grahade01.html">Devonte' Graham</a></td>
        <td data-stat="team_id"><a href="/teams/CHO/2020.html">CHO</a></td>
        <td data-stat="g">63</td><td data-stat="pts">1145</td>
      </tr></table>"#;
    let advanced_page = r#"<table>
      <tr class="full_table">
        <td data-stat="player" data-append-csv="butleji01">
          <a href="/players/b/butleji01.html">Jimmy Butler</a></td>
        <td data-stat="team_id"><a href="/teams/MIA/2020.html">MIA</a></td>
        <td data-stat="g">999</td><td data-stat="per">26.2</td>
      </tr></table>"#;

    let mut players = PlayerMap::new();
    for page in [totals_page, advanced_page] {
        for (key, stats) in parse_player_page(page, year).unwrap() {
            merge_player_row(&mut players, key, stats);
        }
    }
    assert_eq!(players.len(), 2);

    // 538 still calls Charlotte CHA in 2020; the alias must land the row on
    // the CHO identity.
    let raptor = "\
player_name,player_id,season,season_type,team,raptor_total\n\
Jimmy Butler,butleji01,2020,RS,MIA,4.9\n\
Devonte' Graham,grahade01,2020,RS,CHA,-1.2\n";
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("modern_RAPTOR.csv");
    write_string(&path, raptor).unwrap();

    merge_rating_file(&mut players, &path, &[year]).unwrap();

    let butler = players
        .values()
        .find(|p| p["bb_ref_id"] == StatValue::Text("butleji01".into()))
        .unwrap();
    // totals' g survived the advanced page's conflicting value.
    assert_eq!(butler["g"], StatValue::Int(58));
    assert_eq!(butler["per"], StatValue::Float(26.2));
    assert_eq!(butler["raptor_total"], StatValue::Float(4.9));

    let graham = players
        .values()
        .find(|p| p["bb_ref_id"] == StatValue::Text("grahade01".into()))
        .unwrap();
    assert_eq!(graham["raptor_total"], StatValue::Float(-1.2));
}
