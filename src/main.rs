mod commands;
mod loader;
mod menu;
mod models;
mod roster;

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::warn;

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Employee roster analysis - summaries, search, and probation tracking")]
struct Cli {
    /// Roster CSV file to use instead of the default location
    #[arg(long)]
    path: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show headcount and tenure summary
    Summary,

    /// List employees
    List {
        /// Show only currently employed staff
        #[arg(long)]
        active_only: bool,

        /// Emit records as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Search by name, team, part, or title
    Search {
        /// Keyword (partial match)
        #[arg(short, long)]
        keyword: String,

        /// Emit records as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List employees whose probation ends soon
    Probation {
        /// Window size in days
        #[arg(short, long, default_value = "30")]
        within: i64,

        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        reference_date: Option<NaiveDate>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let roster = match &cli.path {
        Some(path) => loader::load_roster(path)?,
        None => loader::load_default_roster()?,
    };
    if roster.is_empty() {
        warn!("roster file contained no employee rows");
    }

    match cli.command {
        None => menu::run_interactive_menu(&roster)?,
        Some(Commands::Summary) => commands::cmd_summary(&roster),
        Some(Commands::List { active_only, json }) => {
            commands::cmd_list(&roster, active_only, json)?
        }
        Some(Commands::Search { keyword, json }) => commands::cmd_search(&roster, &keyword, json)?,
        Some(Commands::Probation {
            within,
            reference_date,
        }) => commands::cmd_probation(&roster, within, reference_date),
    }

    Ok(())
}
