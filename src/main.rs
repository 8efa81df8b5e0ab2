mod config;
mod models;
mod pipeline;
mod scraper;
mod server;
mod utils;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::AppConfig;
use crate::models::{Schedule, ScheduleResponse};
use crate::pipeline::Pipeline;
use crate::scraper::parsers::{extract_schedule, ExtractOptions};
use crate::server::AppState;

#[derive(Parser)]
#[command(name = "anime-schedule", about = "Weekly anime schedule extractor and API", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the schedule API over HTTP
    Serve {
        #[arg(long, env = "SCHEDULE_HOST")]
        host: Option<String>,

        #[arg(short, long, env = "SCHEDULE_PORT")]
        port: Option<u16>,
    },

    /// Fetch the live schedule once and print it as JSON
    Fetch {
        #[arg(long)]
        pretty: bool,
    },

    /// Extract a schedule from a saved HTML page
    Parse {
        file: PathBuf,

        #[arg(long)]
        pretty: bool,

        /// Origin for root-relative image paths (default: configured site origin)
        #[arg(long)]
        origin: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "anime_schedule=info,warn",
        1 => "anime_schedule=debug,info",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::new(filter))
        .init();

    let config = AppConfig::load()?;

    match cli.command {
        Command::Serve { host, port } => {
            let host = host.unwrap_or(config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            let pipeline = Pipeline::from_config(&config.scraper)?;
            let state = Arc::new(AppState { pipeline });
            server::serve(state, &format!("{host}:{port}")).await?;
        }

        Command::Fetch { pretty } => {
            let pipeline = Pipeline::from_config(&config.scraper)?;
            let schedule = pipeline.run().await?;
            log_summary(&schedule);
            print_json(schedule, pretty)?;
        }

        Command::Parse { file, pretty, origin } => {
            let html = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {:?}", file))?;
            let origin = origin.unwrap_or(config.scraper.site_origin);

            let schedule = extract_schedule(&html, &ExtractOptions::new(origin));
            log_summary(&schedule);
            print_json(schedule, pretty)?;
        }
    }

    Ok(())
}

fn log_summary(schedule: &Schedule) {
    for group in &schedule.groups {
        info!("  {:<9} : {}", group.label, group.records.len());
    }
    info!("Total: {} entries", schedule.total);
}

fn print_json(schedule: Schedule, pretty: bool) -> Result<()> {
    let response = ScheduleResponse::new(schedule, utils::unix_now());
    let out = if pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{}", out);
    Ok(())
}
