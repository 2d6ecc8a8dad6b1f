//! YAML Export functionality
//!
//! Exports the subscription book to YAML for a human-readable snapshot.

use std::io::Write;

use crate::error::{SubtrackError, SubtrackResult};
use crate::export::json::BookExport;
use crate::services::SubscriptionBook;

fn export_error(e: impl std::fmt::Display) -> SubtrackError {
    SubtrackError::Export(e.to_string())
}

/// Export the book to YAML, preceded by a comment header
pub fn export_book_yaml<W: Write>(book: &SubscriptionBook, writer: &mut W) -> SubtrackResult<()> {
    let export = BookExport::from_book(book);

    writeln!(writer, "# subtrack subscription export").map_err(export_error)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(export_error)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(export_error)?;
    writeln!(writer).map_err(export_error)?;

    serde_yaml::to_writer(writer, &export).map_err(export_error)?;

    Ok(())
}

/// Read a YAML export back into a book
pub fn import_from_yaml(yaml_str: &str) -> SubtrackResult<SubscriptionBook> {
    let export: BookExport = serde_yaml::from_str(yaml_str)
        .map_err(|e| SubtrackError::Validation(format!("Invalid YAML export: {}", e)))?;

    export.validate().map_err(SubtrackError::Validation)?;

    SubscriptionBook::from_subscriptions(export.subscriptions)
}
