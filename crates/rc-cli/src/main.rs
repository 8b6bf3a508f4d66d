//! CLI frontend for the Rollcall roll engine.

mod commands;
mod dialog;
mod summary;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "rollcall",
    about = "Rollcall: roll requests and group checks for tabletop sessions",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log pipeline steps to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print an actor's modifier for a roll
    Modifier {
        /// Actor id
        actor: String,

        /// Roll category (ability, save, skill, tool, ...)
        category: String,

        /// Ability, skill, or tool key
        key: String,

        /// Roster JSON file
        #[arg(short, long)]
        roster: PathBuf,
    },

    /// Run a roll request through the configuration pipeline
    Request {
        /// Roll request JSON file
        file: PathBuf,

        /// Roster JSON file
        #[arg(short, long)]
        roster: PathBuf,

        /// Settings JSON file
        #[arg(short, long)]
        settings: Option<PathBuf>,

        /// Answer the dialog with advantage
        #[arg(long, conflicts_with = "disadvantage")]
        advantage: bool,

        /// Answer the dialog with disadvantage
        #[arg(long)]
        disadvantage: bool,

        /// Situational bonus formula (e.g. 1d4, +2)
        #[arg(long, allow_hyphen_values = true)]
        situational: Option<String>,

        /// DC entered in the dialog
        #[arg(long, allow_hyphen_values = true)]
        dc: Option<i64>,

        /// Ability picked in the dialog
        #[arg(long)]
        ability: Option<String>,

        /// Roll mode picked in the dialog (public, private, blind, self)
        #[arg(long)]
        mode: Option<String>,

        /// Dismiss the dialog
        #[arg(long)]
        cancel: bool,
    },

    /// Evaluate a recorded group roll
    Group {
        /// Group roll JSON file
        file: PathBuf,

        /// Roster JSON file
        #[arg(short, long)]
        roster: PathBuf,

        /// Settings JSON file
        #[arg(short, long)]
        settings: Option<PathBuf>,

        /// Consensus method code (1-4), overriding the settings
        #[arg(short, long)]
        method: Option<i64>,
    },

    /// Roll a group check for every actor in the roster
    Simulate {
        /// Roster JSON file
        #[arg(short, long)]
        roster: PathBuf,

        /// Roll category
        #[arg(short, long)]
        category: String,

        /// Ability, skill, or tool key
        #[arg(short, long)]
        key: Option<String>,

        /// The DC
        #[arg(long)]
        dc: i64,

        /// RNG seed for repeatable rolls
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Consensus method code (1-4)
        #[arg(short, long, default_value = "1")]
        method: i64,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Modifier {
            actor,
            category,
            key,
            roster,
        } => commands::modifier::run(&roster, &actor, &category, &key),
        Commands::Request {
            file,
            roster,
            settings,
            advantage,
            disadvantage,
            situational,
            dc,
            ability,
            mode,
            cancel,
        } => {
            let answers = dialog::DialogAnswers {
                advantage,
                disadvantage,
                situational,
                dc,
                ability,
                mode,
                cancel,
            };
            commands::request::run(&file, &roster, settings.as_deref(), answers)
        }
        Commands::Group {
            file,
            roster,
            settings,
            method,
        } => commands::group::run(&file, &roster, settings.as_deref(), method),
        Commands::Simulate {
            roster,
            category,
            key,
            dc,
            seed,
            method,
        } => commands::simulate::run(&roster, &category, key.as_deref(), dc, seed, method),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
