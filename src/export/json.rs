//! JSON Export functionality
//!
//! Exports a subscription book to JSON with schema versioning, and loads a
//! subscription list back from either an export document or a bare JSON
//! array of subscriptions.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{SubtrackError, SubtrackResult};
use crate::models::{CalendarDate, Money, Subscription};
use crate::services::SubscriptionBook;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full subscription book export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub subscriptions: Vec<Subscription>,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub subscription_count: usize,

    /// Sum of all subscription prices
    pub total_price: Money,

    /// Earliest stored next billing date
    pub earliest_billing: Option<CalendarDate>,

    /// Latest stored next billing date
    pub latest_billing: Option<CalendarDate>,
}

impl BookExport {
    /// Create a new export from a subscription book
    pub fn from_book(book: &SubscriptionBook) -> Self {
        let subscriptions = book.as_slice().to_vec();

        let metadata = ExportMetadata {
            subscription_count: subscriptions.len(),
            total_price: subscriptions.iter().map(|s| s.price).sum(),
            earliest_billing: subscriptions.iter().map(|s| s.next_billing_date).min(),
            latest_billing: subscriptions.iter().map(|s| s.next_billing_date).max(),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            subscriptions,
            metadata,
        }
    }

    /// Validate the export structure
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        if self.metadata.subscription_count != self.subscriptions.len() {
            return Err(format!(
                "Metadata lists {} subscriptions but export contains {}",
                self.metadata.subscription_count,
                self.subscriptions.len()
            ));
        }

        Ok(())
    }
}

/// Export the book to JSON
pub fn export_book_json<W: Write>(
    book: &SubscriptionBook,
    writer: &mut W,
    pretty: bool,
) -> SubtrackResult<()> {
    let export = BookExport::from_book(book);

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| SubtrackError::Export(e.to_string()))?;

    Ok(())
}

/// Either shape accepted when loading a subscription file
#[derive(Deserialize)]
#[serde(untagged)]
enum BookFile {
    Export(BookExport),
    List(Vec<Subscription>),
}

/// Load a subscription book from JSON
///
/// Accepts a document written by [`export_book_json`] or a bare array of
/// subscriptions. Every subscription is validated and ids must be unique.
pub fn load_book_json(json_str: &str) -> SubtrackResult<SubscriptionBook> {
    let file: BookFile = serde_json::from_str(json_str)
        .map_err(|e| SubtrackError::Json(format!("Failed to parse subscription file: {}", e)))?;

    let subscriptions = match file {
        BookFile::Export(export) => {
            export.validate().map_err(SubtrackError::Validation)?;
            export.subscriptions
        }
        BookFile::List(list) => list,
    };

    SubscriptionBook::from_subscriptions(subscriptions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_metadata() {
        let export = BookExport::from_book(&SubscriptionBook::demo());

        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.metadata.subscription_count, 2);
        assert_eq!(export.metadata.total_price, Money::from_cents(744));
        assert_eq!(
            export.metadata.earliest_billing,
            Some(CalendarDate::new(2024, 10, 30).unwrap())
        );
        assert!(export.validate().is_ok());
    }

    #[test]
    fn test_json_roundtrip() {
        let book = SubscriptionBook::demo();

        let mut output = Vec::new();
        export_book_json(&book, &mut output, true).unwrap();
        let json = String::from_utf8(output).unwrap();
        assert!(json.contains("\"next_billing_date\": \"2024-10-30\""));

        let loaded = load_book_json(&json).unwrap();
        assert_eq!(loaded.as_slice(), book.as_slice());
    }

    #[test]
    fn test_load_bare_array() {
        let json = r#"[
            {
                "id": "5b7e1c2a-9f3d-4c8e-a1b2-3c4d5e6f7a8b",
                "name": "Netflix",
                "price": 1299,
                "billing_cycle": "monthly",
                "next_billing_date": "2024-11-05",
                "start_date": "2022-05-05"
            }
        ]"#;

        let book = load_book_json(json).unwrap();
        assert_eq!(book.len(), 1);
        let netflix = &book.as_slice()[0];
        assert_eq!(netflix.name, "Netflix");
        assert_eq!(netflix.price, Money::from_cents(1299));
        assert!(netflix.company.is_empty());
    }

    #[test]
    fn test_load_rejects_oversized_price() {
        let json = r#"[
            {
                "id": "5b7e1c2a-9f3d-4c8e-a1b2-3c4d5e6f7a8b",
                "name": "Huge",
                "price": 9223372036854775807,
                "next_billing_date": "2024-10-01",
                "start_date": "2024-01-01"
            }
        ]"#;

        assert!(matches!(
            load_book_json(json),
            Err(SubtrackError::Validation(_))
        ));
    }

    #[test]
    fn test_load_rejects_bad_date() {
        let json = r#"[
            {
                "id": "5b7e1c2a-9f3d-4c8e-a1b2-3c4d5e6f7a8b",
                "name": "Broken",
                "price": 100,
                "next_billing_date": "2024-02-30",
                "start_date": "2024-01-01"
            }
        ]"#;

        assert!(matches!(load_book_json(json), Err(SubtrackError::Json(_))));
    }

    #[test]
    fn test_load_rejects_schema_mismatch() {
        let mut export = BookExport::from_book(&SubscriptionBook::demo());
        export.schema_version = "0.1.0".into();
        let json = serde_json::to_string(&export).unwrap();

        assert!(matches!(
            load_book_json(&json),
            Err(SubtrackError::Validation(_))
        ));
    }
}
