//! CLI commands for browsing subscriptions

use crate::config::settings::Settings;
use crate::display::{format_subscription_details, format_subscription_list};
use crate::error::{SubtrackError, SubtrackResult};
use crate::services::SubscriptionBook;

/// Print the subscription table
pub fn handle_list(book: &SubscriptionBook, settings: &Settings) -> SubtrackResult<()> {
    println!(
        "{}",
        format_subscription_list(book.as_slice(), &settings.currency_symbol, &settings.date_format)
    );
    Ok(())
}

/// Print one subscription, looked up by id or name
pub fn handle_show(
    book: &SubscriptionBook,
    settings: &Settings,
    identifier: &str,
) -> SubtrackResult<()> {
    let sub = book
        .find(identifier)
        .ok_or_else(|| SubtrackError::subscription_not_found(identifier))?;

    print!(
        "{}",
        format_subscription_details(sub, &settings.currency_symbol, &settings.date_format)
    );
    Ok(())
}
