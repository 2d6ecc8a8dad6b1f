//! Core data models for subtrack
//!
//! This module contains the value types the projections work over:
//! subscriptions, money amounts, calendar dates and ids.

pub mod date;
pub mod ids;
pub mod input;
pub mod money;
pub mod subscription;

pub use date::{days_in_month, is_leap_year, CalendarDate, DateParseError, YearMonth};
pub use ids::SubscriptionId;
pub use input::SubscriptionInput;
pub use money::{Money, MoneyParseError};
pub use subscription::{BillingCycle, Subscription, SubscriptionValidationError, MAX_PRICE_CENTS};
