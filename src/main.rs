use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use subtrack::cli::{handle_command, load_book, Commands};
use subtrack::config::{paths::SubtrackPaths, settings::Settings};
use subtrack::logging::init_tracing;

#[derive(Parser)]
#[command(
    name = "subtrack",
    author = "Kaylee Beyene",
    version,
    about = "Subscription tracker: monthly spend and billing calendar",
    long_about = "subtrack reads a list of recurring subscriptions and shows what \
                  they cost per month, a 12-month spend projection, and a calendar \
                  of upcoming billing days."
)]
struct Cli {
    /// Subscription list (JSON export or array); the sample list is used without one
    #[arg(long, global = true, env = "SUBTRACK_FILE")]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = SubtrackPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_tracing(&settings.log_filter);

    let Some(command) = cli.command else {
        println!("subtrack - Subscription tracker");
        println!();
        println!("Run 'subtrack --help' for usage information.");
        println!("Run 'subtrack spend' to see this month's total.");
        return Ok(());
    };

    let book = load_book(cli.file.as_deref())?;
    handle_command(&book, &settings, &paths, command)?;

    Ok(())
}
