//! CSV Export functionality
//!
//! Exports the subscription list and the rolling spend projection in a
//! spreadsheet-compatible format.

use std::io::Write;

use crate::error::{SubtrackError, SubtrackResult};
use crate::reports::MonthlySpend;
use crate::services::SubscriptionBook;

fn csv_error(e: csv::Error) -> SubtrackError {
    SubtrackError::Export(e.to_string())
}

/// Export every subscription in the book to CSV
///
/// Prices are written in major units with two decimals.
pub fn export_subscriptions_csv<W: Write>(
    book: &SubscriptionBook,
    writer: W,
) -> SubtrackResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record([
            "ID",
            "Name",
            "Company",
            "Price",
            "Billing Cycle",
            "Next Billing Date",
            "Start Date",
            "Logo URL",
        ])
        .map_err(csv_error)?;

    for sub in book {
        csv_writer
            .write_record([
                sub.id.as_uuid().to_string(),
                sub.name.clone(),
                sub.company.clone(),
                sub.price.to_string(),
                sub.billing_cycle.to_string(),
                sub.next_billing_date.to_string(),
                sub.start_date.to_string(),
                sub.logo_url.clone(),
            ])
            .map_err(csv_error)?;
    }

    csv_writer
        .flush()
        .map_err(|e| SubtrackError::Export(e.to_string()))?;

    Ok(())
}

/// Export a rolling spend projection to CSV, one row per month
pub fn export_spend_csv<W: Write>(months: &[MonthlySpend], writer: W) -> SubtrackResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["Month", "Label", "Amount"])
        .map_err(csv_error)?;

    for month in months {
        csv_writer
            .write_record([
                month.month.to_string(),
                month.label.clone(),
                month.amount.to_string(),
            ])
            .map_err(csv_error)?;
    }

    csv_writer
        .flush()
        .map_err(|e| SubtrackError::Export(e.to_string()))?;

    Ok(())
}
