//! Export module for subtrack
//!
//! Provides export of the subscription list in multiple formats:
//! - CSV: subscriptions and the rolling spend projection (spreadsheet-compatible)
//! - JSON: machine-readable export, also accepted as input
//! - YAML: human-readable export

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::{export_spend_csv, export_subscriptions_csv};
pub use json::{export_book_json, load_book_json, BookExport, ExportMetadata, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_book_yaml, import_from_yaml};
