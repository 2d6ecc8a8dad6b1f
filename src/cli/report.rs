//! CLI commands for spend reports and the calendar

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use crate::config::settings::Settings;
use crate::error::{SubtrackError, SubtrackResult};
use crate::export::export_spend_csv;
use crate::models::{CalendarDate, YearMonth};
use crate::reports::{CalendarView, MonthlySpendReport, RollingSpendReport};
use crate::services::SubscriptionBook;

/// Parse a `YYYY-MM-DD` argument, defaulting to today
pub(crate) fn parse_reference_date(date: Option<&str>) -> SubtrackResult<CalendarDate> {
    match date {
        Some(s) => CalendarDate::parse(s).map_err(|e| {
            SubtrackError::InvalidDate(format!("{} ({}). Use YYYY-MM-DD", s, e))
        }),
        None => Ok(CalendarDate::today()),
    }
}

/// Monthly total and per-subscription breakdown
pub fn handle_spend(
    book: &SubscriptionBook,
    settings: &Settings,
    date: Option<String>,
) -> SubtrackResult<()> {
    let reference = parse_reference_date(date.as_deref())?;
    let report = MonthlySpendReport::generate(book.as_slice(), reference);

    print!("{}", report.format_terminal(&settings.currency_symbol));
    Ok(())
}

/// Rolling 12-month spend, to the terminal or a CSV file
pub fn handle_forecast(
    book: &SubscriptionBook,
    settings: &Settings,
    date: Option<String>,
    output: Option<PathBuf>,
) -> SubtrackResult<()> {
    let reference = parse_reference_date(date.as_deref())?;
    let report = RollingSpendReport::generate(book.as_slice(), reference);

    if let Some(path) = output {
        let file = File::create(&path).map_err(|e| {
            SubtrackError::Export(format!("Failed to create file {}: {}", path.display(), e))
        })?;
        export_spend_csv(&report.months, BufWriter::new(file))?;
        println!("Spend forecast exported to: {}", path.display());
    } else {
        print!("{}", report.format_terminal(&settings.currency_symbol));
    }

    Ok(())
}

/// Month grid with charges per day
///
/// Without `--month` the month of `--date` (or of today) is shown. Today is
/// highlighted when no date is given and it falls in the displayed month.
pub fn handle_calendar(
    book: &SubscriptionBook,
    settings: &Settings,
    month: Option<String>,
    date: Option<String>,
) -> SubtrackResult<()> {
    let selected = parse_reference_date(date.as_deref())?;

    let month = match month {
        Some(s) => YearMonth::parse(&s).map_err(|e| {
            SubtrackError::InvalidDate(format!("{} ({}). Use YYYY-MM", s, e))
        })?,
        None => selected.year_month(),
    };

    let view = CalendarView::build(book.as_slice(), month, Some(selected), settings.marker_limit);
    print!("{}", view.format_terminal());
    Ok(())
}
