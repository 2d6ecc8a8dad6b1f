//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with the reports and display layers. Every command
//! reads the subscription list; none of them writes it back.

pub mod export;
pub mod report;
pub mod subscription;

use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::config::{Settings, SubtrackPaths};
use crate::error::{SubtrackError, SubtrackResult};
use crate::export::load_book_json;
use crate::services::SubscriptionBook;

pub use export::{handle_export, ExportFormat};
pub use report::{handle_calendar, handle_forecast, handle_spend};
pub use subscription::{handle_list, handle_show};

/// Top-level subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all subscriptions
    #[command(alias = "ls")]
    List,

    /// Show one subscription's details
    Show {
        /// Subscription name or ID
        subscription: String,
    },

    /// Total spend for a month, broken down by subscription
    Spend {
        /// Any date in the month to total (YYYY-MM-DD, default: today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Spend for the 12 months starting at a date's month
    #[command(alias = "projection")]
    Forecast {
        /// Date whose month starts the window (YYYY-MM-DD, default: today)
        #[arg(short, long)]
        date: Option<String>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show a month grid of billing days
    #[command(alias = "cal")]
    Calendar {
        /// Month to display (YYYY-MM, default: month of --date)
        #[arg(short, long)]
        month: Option<String>,

        /// Selected day (YYYY-MM-DD, default: today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Export the subscription list
    Export {
        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show current configuration and paths
    Config,
}

/// Load the subscription list from `file`, or the sample list without one
pub fn load_book(file: Option<&Path>) -> SubtrackResult<SubscriptionBook> {
    let Some(path) = file else {
        tracing::info!("no subscription file given, using sample subscriptions");
        return Ok(SubscriptionBook::demo());
    };

    let contents = std::fs::read_to_string(path).map_err(|e| {
        SubtrackError::Io(format!("Failed to read {}: {}", path.display(), e))
    })?;
    let book = load_book_json(&contents)?;

    tracing::info!(
        path = %path.display(),
        count = book.len(),
        "loaded subscriptions"
    );
    Ok(book)
}

/// Dispatch a parsed subcommand
pub fn handle_command(
    book: &SubscriptionBook,
    settings: &Settings,
    paths: &SubtrackPaths,
    cmd: Commands,
) -> SubtrackResult<()> {
    match cmd {
        Commands::List => handle_list(book, settings),
        Commands::Show { subscription } => handle_show(book, settings, &subscription),
        Commands::Spend { date } => handle_spend(book, settings, date),
        Commands::Forecast { date, output } => handle_forecast(book, settings, date, output),
        Commands::Calendar { month, date } => handle_calendar(book, settings, month, date),
        Commands::Export { format, output } => handle_export(book, format, output),
        Commands::Config => {
            handle_config(paths, settings);
            Ok(())
        }
    }
}

fn handle_config(paths: &SubtrackPaths, settings: &Settings) {
    println!("subtrack Configuration");
    println!("======================");
    println!("Base directory: {}", paths.base_dir().display());
    println!(
        "Settings file:  {}{}",
        paths.settings_file().display(),
        if paths.is_initialized() { "" } else { " (not created, using defaults)" }
    );
    println!();
    println!("Settings:");
    println!("  Currency symbol: {}", settings.currency_symbol);
    println!("  Date format:     {}", settings.date_format);
    println!("  Calendar markers per day: {}", settings.marker_limit);
    println!("  Log filter:      {}", settings.log_filter);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_book_without_file_is_demo() {
        assert_eq!(load_book(None).unwrap(), SubscriptionBook::demo());
    }

    #[test]
    fn test_load_book_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("subs.json");
        let mut json = Vec::new();
        crate::export::export_book_json(&SubscriptionBook::demo(), &mut json, false).unwrap();
        std::fs::write(&path, json).unwrap();

        let book = load_book(Some(path.as_path())).unwrap();
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn test_load_book_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = load_book(Some(temp_dir.path().join("nope.json").as_path()));
        assert!(matches!(result, Err(SubtrackError::Io(_))));
    }

    #[test]
    fn test_show_unknown_subscription() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SubtrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let result = handle_command(
            &SubscriptionBook::demo(),
            &Settings::default(),
            &paths,
            Commands::Show {
                subscription: "Netflix".into(),
            },
        );
        assert!(result.unwrap_err().is_not_found());
    }
}
