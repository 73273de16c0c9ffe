//! The primary pipeline: download phase, per-year parse phase, merge phase,
//! export phase. One linear batch pass per invocation.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use reqwest::Client;

use crate::bbref::merge::{merge_player_row, merge_team_pages};
use crate::bbref::parse::{parse_player_page, parse_team_page};
use crate::bbref::types::{PlayerMap, TeamRecord};
use crate::cli::Season;
use crate::core::{client, fetch_to_file, stale, try_read_to_string, DataDir};
use crate::error::{EffError, Result};
use crate::export::{write_team_csv, OUTPUT_FILE};
use crate::raptor::merge_ratings;
use crate::{MAX_YEAR, MIN_YEAR};

/// Every bbref player page saved per season.
const SEASON_PAGES: [&str; 9] = [
    "totals",
    "per_game",
    "per_minute",
    "per_poss",
    "play-by-play",
    "advanced",
    "shooting",
    "adj_shooting",
    "rookies",
];

/// The pages that feed the player merge, in precedence order: totals is the
/// base and each later page only fills fields the record doesn't have yet.
const MERGE_PAGES: [&str; 5] = ["totals", "advanced", "per_minute", "per_poss", "per_game"];

const BBREF_BASE_URL: &str = "https://www.basketball-reference.com/leagues";

const HISTORICAL_RAPTOR_URL: &str =
    "https://raw.githubusercontent.com/fivethirtyeight/data/master/nba-raptor/historical_RAPTOR_by_team.csv";
const MODERN_RAPTOR_URL: &str =
    "https://raw.githubusercontent.com/fivethirtyeight/data/master/nba-raptor/modern_RAPTOR_by_team.csv";
const LATEST_RAPTOR_URL: &str =
    "https://projects.fivethirtyeight.com/nba-model/2022/latest_RAPTOR_by_team.csv";

/// Arguments for the `scrape` subcommand.
#[derive(Debug)]
pub struct ScrapeParams {
    pub no_download: bool,
    pub force_download: bool,
    pub year_only: Option<Season>,
    pub force_reprocess: bool,
    pub data_dir: PathBuf,
}

/// Handle the scrape command end to end.
pub async fn handle_scrape(params: ScrapeParams) -> Result<()> {
    let years: Vec<u16> = match params.year_only {
        Some(season) => vec![season.as_u16()],
        None => (MIN_YEAR..MAX_YEAR).collect(),
    };
    let data = DataDir::new(&params.data_dir);

    if !params.no_download {
        download_data(&data, &years, params.force_download).await?;
    }
    process_data(&data, &years)
}

/// Download phase: per-season bbref pages plus the three RAPTOR CSVs, each
/// skipped when the cache is fresh enough (unless forced).
async fn download_data(data: &DataDir, years: &[u16], force: bool) -> Result<()> {
    let client = client()?;

    for &year in years {
        fs::create_dir_all(data.season_dir(year))?;
        // Refetch the whole season when forced or when totals.html has gone
        // stale; the other pages were written in the same pass.
        if force || stale(&data.page_path(year, "totals")) {
            download_season(&client, data, year).await?;
        }
    }

    let historical = data.raptor_path("historical_RAPTOR");
    let modern = data.raptor_path("modern_RAPTOR");
    if force || !historical.is_file() || !modern.is_file() {
        info!("downloading raptor");
        fs::create_dir_all(data.raptor_dir())?;
        fetch_to_file(&client, HISTORICAL_RAPTOR_URL, &historical).await?;
        fetch_to_file(&client, MODERN_RAPTOR_URL, &modern).await?;
    }

    let latest = data.raptor_path("latest_RAPTOR");
    if force || stale(&latest) {
        info!("downloading latest raptor");
        fetch_to_file(&client, LATEST_RAPTOR_URL, &latest).await?;
    }

    Ok(())
}

async fn download_season(client: &Client, data: &DataDir, year: u16) -> Result<()> {
    info!("getting {} data in {}", year, data.season_dir(year).display());
    for page in SEASON_PAGES {
        let url = format!("{}/NBA_{}_{}.html", BBREF_BASE_URL, year, page);
        fetch_to_file(client, &url, &data.page_path(year, page)).await?;
    }
    // The season summary page carries both team stat tables.
    let url = format!("{}/NBA_{}.html", BBREF_BASE_URL, year);
    fetch_to_file(client, &url, &data.page_path(year, "teams")).await?;
    Ok(())
}

/// Parse + merge + export. Players are fully merged (box-score pages, then
/// RAPTOR) even though only team rows are exported; the RAPTOR join doubles
/// as a consistency check over the player identities.
fn process_data(data: &DataDir, years: &[u16]) -> Result<()> {
    let mut players = PlayerMap::new();
    for &year in years {
        info!("processing {} player data", year);
        merge_player_pages(data, year, &mut players)?;
    }

    info!("processing raptor");
    merge_ratings(&mut players, data, years)?;

    let mut teams: Vec<TeamRecord> = Vec::new();
    for &year in years {
        info!("processing {} team data", year);
        teams.extend(season_teams(data, year)?);
    }

    write_team_csv(&teams, Path::new(OUTPUT_FILE))?;
    info!("data saved to {}", OUTPUT_FILE);
    Ok(())
}

/// Merge one season's five player pages into the map. A missing page file is
/// an error here, unlike the team page below: player precedence depends on
/// every page being present.
fn merge_player_pages(data: &DataDir, year: u16, players: &mut PlayerMap) -> Result<()> {
    for page in MERGE_PAGES {
        let path = data.page_path(year, page);
        let html = try_read_to_string(&path).ok_or_else(|| EffError::MissingPage {
            path: path.display().to_string(),
        })?;
        for (key, stats) in parse_player_page(&html, year)? {
            merge_player_row(players, key, stats);
        }
    }
    Ok(())
}

/// One season's merged team records. A missing season page is logged and
/// yields an empty season rather than failing the run.
fn season_teams(data: &DataDir, year: u16) -> Result<Vec<TeamRecord>> {
    let path = data.page_path(year, "teams");
    let Some(html) = try_read_to_string(&path) else {
        warn!("team data file not found for {}: {}", year, path.display());
        return Ok(Vec::new());
    };
    let (totals, advanced) = parse_team_page(&html, year)?;
    Ok(merge_team_pages(totals, advanced, year))
}
