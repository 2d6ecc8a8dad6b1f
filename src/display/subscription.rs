//! Subscription display formatting
//!
//! Formats subscriptions for terminal output in table and detail views.

use crate::models::{Money, Subscription};

/// Format a list of subscriptions as a table
pub fn format_subscription_list(
    subscriptions: &[Subscription],
    symbol: &str,
    date_format: &str,
) -> String {
    if subscriptions.is_empty() {
        return "No subscriptions found.".to_string();
    }

    let name_width = subscriptions
        .iter()
        .map(|s| s.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let company_width = subscriptions
        .iter()
        .map(|s| s.company.chars().count())
        .max()
        .unwrap_or(7)
        .max(7);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<name_width$}  {:<company_width$}  {:>10}  {:<8}  {}\n",
        "ID",
        "Name",
        "Company",
        "Price",
        "Cycle",
        "Next Payment",
        name_width = name_width,
        company_width = company_width,
    ));

    output.push_str(&format!(
        "{:-<12}  {:-<name_width$}  {:-<company_width$}  {:->10}  {:-<8}  {:-<12}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
        company_width = company_width,
    ));

    for sub in subscriptions {
        output.push_str(&format!(
            "{:<12}  {:<name_width$}  {:<company_width$}  {:>10}  {:<8}  {}\n",
            sub.id.to_string(),
            sub.name,
            sub.company,
            sub.price.format_with_symbol(symbol),
            sub.billing_cycle.to_string(),
            sub.next_billing_date.format(date_format),
            name_width = name_width,
            company_width = company_width,
        ));
    }

    let total: Money = subscriptions.iter().map(|s| s.price).sum();
    output.push_str(&format!(
        "{:<12}  {:<name_width$}  {:<company_width$}  {:>10}\n",
        "TOTAL",
        "",
        "",
        total.format_with_symbol(symbol),
        name_width = name_width,
        company_width = company_width,
    ));

    output
}

/// Format a single subscription's details
pub fn format_subscription_details(sub: &Subscription, symbol: &str, date_format: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Subscription: {}\n", sub.name));
    output.push_str(&format!("  ID:             {}\n", sub.id));
    if !sub.company.is_empty() {
        output.push_str(&format!("  Company:        {}\n", sub.company));
    }
    output.push_str(&format!(
        "  Price:          {} / {}\n",
        sub.price.format_with_symbol(symbol),
        sub.billing_cycle
    ));
    output.push_str(&format!(
        "  Next Billing:   {}\n",
        sub.next_billing_date.format(date_format)
    ));
    output.push_str(&format!(
        "  Started:        {}\n",
        sub.start_date.format(date_format)
    ));
    if !sub.logo_url.is_empty() {
        output.push_str(&format!("  Logo:           {}\n", sub.logo_url));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::SubscriptionBook;

    #[test]
    fn test_empty_list() {
        assert_eq!(
            format_subscription_list(&[], "€", "%Y-%m-%d"),
            "No subscriptions found."
        );
    }

    #[test]
    fn test_list_contains_rows_and_total() {
        let book = SubscriptionBook::demo();
        let output = format_subscription_list(book.as_slice(), "€", "%Y-%m-%d");

        assert!(output.contains("Amazon Prime"));
        assert!(output.contains("GoDaddy Hosting"));
        assert!(output.contains("€3.45"));
        assert!(output.contains("2024-10-30"));
        assert!(output.contains("TOTAL"));
        assert!(output.contains("€7.44"));
    }

    #[test]
    fn test_list_with_invalid_date_format_does_not_panic() {
        let book = SubscriptionBook::demo();
        let output = format_subscription_list(book.as_slice(), "€", "%Q");
        assert!(output.contains("2024-10-30"));
    }

    #[test]
    fn test_details() {
        let book = SubscriptionBook::demo();
        let output = format_subscription_details(&book.as_slice()[0], "$", "%d/%m/%Y");

        assert!(output.contains("Subscription: Amazon Prime"));
        assert!(output.contains("Company:        Amazon"));
        assert!(output.contains("$3.45 / monthly"));
        assert!(output.contains("30/10/2024"));
        assert!(output.contains("01/01/2023"));
    }
}
