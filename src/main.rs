//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use nba_eff::{
    cli::{Commands, NbaEff},
    commands::{
        hollinger::handle_hollinger,
        scrape::{handle_scrape, ScrapeParams},
    },
    Result,
};

/// Run the CLI. Errors propagate so the exit status reflects failure.
#[tokio::main]
async fn main() -> Result<()> {
    let app = NbaEff::parse();

    let log_level = if app.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match app.command {
        Commands::Scrape {
            no_download,
            force_download,
            year_only,
            force_reprocess,
            data_dir,
        } => {
            handle_scrape(ScrapeParams {
                no_download,
                force_download,
                year_only,
                force_reprocess,
                data_dir,
            })
            .await?
        }

        Commands::Hollinger { out } => handle_hollinger(&out).await?,
    }

    Ok(())
}
