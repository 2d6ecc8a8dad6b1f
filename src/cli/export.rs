//! CLI command for data export

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::ValueEnum;

use crate::error::{SubtrackError, SubtrackResult};
use crate::export::{export_book_json, export_book_yaml, export_subscriptions_csv};
use crate::services::SubscriptionBook;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// JSON export document (can be read back with --file)
    Json,
    /// CSV, one row per subscription
    Csv,
    /// YAML export document, human-readable
    Yaml,
}

/// Export the book to a file, or to stdout when no path is given
pub fn handle_export(
    book: &SubscriptionBook,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> SubtrackResult<()> {
    match output {
        Some(path) => {
            let file = File::create(&path).map_err(|e| {
                SubtrackError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            write_export(book, format, &mut writer)?;
            writer.flush()?;
            println!(
                "Exported {} subscriptions to: {}",
                book.len(),
                path.display()
            );
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            write_export(book, format, &mut writer)?;
            writeln!(writer)?;
        }
    }

    Ok(())
}

fn write_export<W: Write>(
    book: &SubscriptionBook,
    format: ExportFormat,
    writer: &mut W,
) -> SubtrackResult<()> {
    match format {
        ExportFormat::Json => export_book_json(book, writer, true),
        ExportFormat::Csv => export_subscriptions_csv(book, writer),
        ExportFormat::Yaml => export_book_yaml(book, writer),
    }
}
