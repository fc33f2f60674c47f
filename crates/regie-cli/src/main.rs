//! CLI frontend for the Regie action-list interpreter.

mod commands;
mod scenario;

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "regie",
    about = "Regie: run and inspect scripted cutscenes without a game engine",
    version,
    propagate_version = true
)]
struct Cli {
    /// Show more detail: every action step, and info (-v) or debug (-vv) logs
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario headlessly and print what happened
    Run {
        /// Scenario file (JSON)
        scenario: PathBuf,

        /// Seconds per tick
        #[arg(long, default_value = "0.1")]
        dt: f32,

        /// Seconds of game time to run
        #[arg(short, long, default_value = "10.0")]
        seconds: f32,

        /// Number of ticks to run (overrides --seconds)
        #[arg(short, long)]
        ticks: Option<u64>,

        /// Keep only the most recent N events (0 = unlimited)
        #[arg(long, default_value = "0")]
        max_events: usize,
    },

    /// Check a scenario for broken references and suspicious settings
    Check {
        /// Scenario file (JSON)
        scenario: PathBuf,
    },

    /// Show the lists and conversations of a scenario
    Show {
        /// Scenario file (JSON)
        scenario: PathBuf,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            scenario,
            dt,
            seconds,
            ticks,
            max_events,
        } => commands::run::run(
            &scenario,
            &commands::run::RunOptions {
                dt,
                seconds,
                ticks,
                max_events,
                verbose: cli.verbose > 0,
            },
        ),
        Commands::Check { scenario } => commands::check::run(&scenario),
        Commands::Show { scenario } => commands::show::run(&scenario),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
