//! Reports module for subtrack
//!
//! The read-only projections over a subscription list: monthly spend totals,
//! the rolling 12-month spend window, and the per-day calendar binding.

pub mod calendar;
pub mod spend;

pub use calendar::{
    first_weekday_offset, group_by_day, CalendarView, DayCell, DayGrouping, DEFAULT_MARKER_LIMIT,
};
pub use spend::{
    rolling_monthly_spend, total_spend_for_month, MonthlySpend, MonthlySpendReport,
    RollingSpendReport, SpendSlice, ROLLING_WINDOW_MONTHS,
};
