use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use coffee_roulette::commands::{
    render_matching, render_schedule, run_match, run_schedule, MatchOptions, OutputFormat,
    ScheduleOptions,
};
use coffee_roulette::config::Settings;
use coffee_roulette::models::OddPolicy;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "coffee-roulette")]
#[command(about = "Pair people up without repeating past pairings", long_about = None)]
struct Cli {
    /// Configuration file (defaults to config/default and config/local)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Sit one participant out instead of failing on an odd roster
    #[arg(long, global = true)]
    pad_odd: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Pair everyone with someone they have not met, and record it
    Match {
        /// The people file, one name per line
        #[arg(long)]
        people: Option<PathBuf>,

        /// The history file
        #[arg(long)]
        history: Option<PathBuf>,

        /// Write the updated history here instead of over --history
        #[arg(long)]
        out: Option<PathBuf>,

        /// Compute the pairing without writing history
        #[arg(long)]
        dry_run: bool,
    },

    /// Print a full round-robin schedule, ignoring history
    Schedule {
        /// The people file, one name per line
        #[arg(long)]
        people: Option<PathBuf>,
    },
}

fn init_logging(settings: &Settings) {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let filter = EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    match log_format.as_str() {
        "json" => subscriber.json().init(),
        "compact" => subscriber.compact().init(),
        "pretty" => subscriber.pretty().init(),
        _ => subscriber.init(),
    }
}

fn print_usage() -> Result<()> {
    Cli::command().print_help()?;
    println!();
    Ok(())
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
    .unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        Settings::default()
    });

    init_logging(&settings);
    info!("coffee roulette!");

    let odd_policy = if cli.pad_odd {
        OddPolicy::Pad
    } else {
        settings.matching.odd_policy
    };

    let Some(command) = cli.command else {
        return print_usage();
    };

    match command {
        Commands::Match {
            people,
            history,
            out,
            dry_run,
        } => {
            let (Some(roster), Some(history)) = (
                people.or(settings.roster.path.clone()),
                history.or(settings.history.path.clone()),
            ) else {
                return print_usage();
            };

            let options = MatchOptions {
                roster,
                history,
                output: out.or(settings.history.output.clone()),
                odd_policy,
                dry_run,
            };

            let report = run_match(&options, chrono::Utc::now()).map_err(|e| {
                error!("Matching failed: {:#}", e);
                e
            })?;
            println!("{}", render_matching(&report, cli.format)?);
        }
        Commands::Schedule { people } => {
            let Some(roster) = people.or(settings.roster.path.clone()) else {
                return print_usage();
            };

            let report = run_schedule(&ScheduleOptions { roster, odd_policy })?;
            println!("{}", render_schedule(&report, cli.format)?);
        }
    }

    Ok(())
}
