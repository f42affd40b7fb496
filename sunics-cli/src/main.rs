mod commands;
mod logging;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use sunics_core::config::Config;
use sunics_core::i18n::Language;

use crate::commands::generate::GenerateArgs;

#[derive(Parser)]
#[command(name = "sunics")]
#[command(about = "Generate sunrise and sunset calendars for any place", version)]
struct Cli {
    /// Interface language (de or en)
    #[arg(long, global = true)]
    lang: Option<Language>,

    /// Backend serving POST /generate (overrides server_url from the config)
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a place and show its coordinates
    Search {
        query: String,

        /// Select the Nth result (1-based) and show the picked coordinates
        #[arg(long)]
        pick: Option<usize>,
    },
    /// Generate and save a sunrise/sunset calendar
    Generate {
        /// Latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<String>,

        /// Longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: Option<String>,

        /// Look the location up by name and use the first result
        #[arg(long, conflicts_with_all = ["lat", "lon"])]
        place: Option<String>,

        /// First day (YYYY-MM-DD), defaults to today
        #[arg(long)]
        from: Option<String>,

        /// Last day (YYYY-MM-DD), defaults to a year from the first day
        #[arg(long)]
        to: Option<String>,

        /// Event duration in minutes
        #[arg(short, long, default_value = "30")]
        duration: String,

        /// Leave out sunrise events
        #[arg(long)]
        no_sunrise: bool,

        /// Leave out sunset events
        #[arg(long)]
        no_sunset: bool,

        /// Title for sunrise events (default "Sunrise")
        #[arg(long)]
        sunrise_title: Option<String>,

        /// Title for sunset events (default "Sunset")
        #[arg(long)]
        sunset_title: Option<String>,

        /// Directory to save sun-events.ics into
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Explain how the calendar generator works
    Howto,
    /// Check that the generation backend is reachable
    Health,
    /// Show configuration paths, creating a default config if needed
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init()?;

    let config = load_config(cli.lang, cli.server)?;

    match cli.command {
        Commands::Search { query, pick } => commands::search::run(&config, &query, pick).await,
        Commands::Generate {
            lat,
            lon,
            place,
            from,
            to,
            duration,
            no_sunrise,
            no_sunset,
            sunrise_title,
            sunset_title,
            output,
        } => {
            let args = GenerateArgs {
                lat,
                lon,
                place,
                from,
                to,
                duration,
                no_sunrise,
                no_sunset,
                sunrise_title,
                sunset_title,
                output,
            };
            commands::generate::run(&config, args).await
        }
        Commands::Howto => commands::howto::run(&config),
        Commands::Health => commands::health::run(&config).await,
        Commands::Config => commands::config::run(&config),
    }
}

/// Config file values, overridden by command-line flags.
fn load_config(lang: Option<Language>, server: Option<String>) -> Result<Config> {
    let mut config = Config::load()?;

    if let Some(lang) = lang {
        config.language = lang;
    }
    if let Some(server) = server {
        config.server_url = server;
    }

    Ok(config)
}
