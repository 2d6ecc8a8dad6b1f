//! Spend aggregation
//!
//! Sums subscription prices per calendar month.
//!
//! # No recurrence simulation
//!
//! Only the *stored* `next_billing_date` of each subscription is counted. A
//! monthly subscription due on 2024-10-30 contributes to October 2024 and to
//! no other month, and a yearly subscription does not reappear twelve months
//! later in the rolling window. The owner of the list is expected to advance
//! `next_billing_date` after each charge; nothing here rolls it forward.

use serde::Serialize;

use crate::display::report::{format_bar, separator, truncate};
use crate::models::{CalendarDate, Money, Subscription, SubscriptionId, YearMonth};

/// Number of months covered by [`rolling_monthly_spend`]
pub const ROLLING_WINDOW_MONTHS: usize = 12;

/// Total price of every subscription whose next billing date falls in the
/// same calendar month and year as `reference_date`
///
/// The day of month is ignored. An empty list, or one with no matches,
/// yields zero.
pub fn total_spend_for_month(subscriptions: &[Subscription], reference_date: CalendarDate) -> Money {
    subscriptions
        .iter()
        .filter(|sub| sub.bills_in_month_of(&reference_date))
        .map(|sub| sub.price)
        .sum()
}

/// Spend for one month of the rolling window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlySpend {
    /// Human readable month, e.g. "Mar 2024"
    pub label: String,
    pub month: YearMonth,
    pub amount: Money,
}

/// Spend for the 12 consecutive months starting at `reference_date`'s month
///
/// Always returns exactly [`ROLLING_WINDOW_MONTHS`] entries, in calendar
/// order. Each subscription lands in at most one bucket: the month of its
/// stored next billing date.
pub fn rolling_monthly_spend(
    subscriptions: &[Subscription],
    reference_date: CalendarDate,
) -> Vec<MonthlySpend> {
    let start = reference_date.first_of_month();

    (0..ROLLING_WINDOW_MONTHS as i32)
        .map(|offset| {
            let bucket = start.add_months(offset);
            MonthlySpend {
                label: bucket.year_month().label(),
                month: bucket.year_month(),
                amount: total_spend_for_month(subscriptions, bucket),
            }
        })
        .collect()
}

/// One subscription's share of a month's spend (a pie chart slice)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendSlice {
    pub id: SubscriptionId,
    pub name: String,
    pub amount: Money,
    /// Share of the month total, in percent
    pub percentage: f64,
}

/// Spend breakdown for a single month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySpendReport {
    pub month: YearMonth,
    /// Slices in subscription list order
    pub slices: Vec<SpendSlice>,
    pub total: Money,
}

impl MonthlySpendReport {
    /// Break down the spend of `reference_date`'s month by subscription
    pub fn generate(subscriptions: &[Subscription], reference_date: CalendarDate) -> Self {
        let total = total_spend_for_month(subscriptions, reference_date);

        let slices = subscriptions
            .iter()
            .filter(|sub| sub.bills_in_month_of(&reference_date))
            .map(|sub| SpendSlice {
                id: sub.id,
                name: sub.name.clone(),
                amount: sub.price,
                percentage: sub.price.percentage_of(total),
            })
            .collect();

        Self {
            month: reference_date.year_month(),
            slices,
            total,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str("Monthly Spending\n");
        output.push_str(&separator(60));
        output.push('\n');
        output.push_str(&format!(
            "Total for {}: {}\n\n",
            self.month.long_label(),
            self.total.format_with_symbol(symbol)
        ));

        if self.slices.is_empty() {
            output.push_str("No subscriptions bill this month.\n");
            return output;
        }

        for slice in &self.slices {
            output.push_str(&format!(
                "{:<24} {:>10} {:>6.1}% {}\n",
                truncate(&slice.name, 24),
                slice.amount.format_with_symbol(symbol),
                slice.percentage,
                format_bar(slice.percentage, 100.0, 15)
            ));
        }

        output
    }
}

/// The 12-month rolling spend projection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RollingSpendReport {
    pub months: Vec<MonthlySpend>,
}

impl RollingSpendReport {
    pub fn generate(subscriptions: &[Subscription], reference_date: CalendarDate) -> Self {
        Self {
            months: rolling_monthly_spend(subscriptions, reference_date),
        }
    }

    /// Sum over the whole window
    pub fn total(&self) -> Money {
        self.months.iter().map(|m| m.amount).sum()
    }

    /// Format the projection for terminal display, one bar per month
    pub fn format_terminal(&self, symbol: &str) -> String {
        let max = self
            .months
            .iter()
            .map(|m| m.amount)
            .max()
            .unwrap_or_default();

        let mut output = String::new();
        output.push_str("12-Month Spend Projection\n");
        output.push_str(&separator(60));
        output.push('\n');

        for month in &self.months {
            output.push_str(&format!(
                "{:<9} {:>10}  {}\n",
                month.label,
                month.amount.format_with_symbol(symbol),
                format_bar(month.amount.as_f64(), max.as_f64(), 30)
            ));
        }

        output.push_str(&separator(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<9} {:>10}\n",
            "Total",
            self.total().format_with_symbol(symbol)
        ));

        output
    }
}
