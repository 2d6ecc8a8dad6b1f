//! subtrack - Subscription tracking core
//!
//! This library computes derived views over a list of recurring
//! subscriptions: the total billed in a calendar month, a rolling 12-month
//! spend projection, and the binding of subscriptions to the days of a
//! displayed month.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Core data models (subscriptions, money, calendar dates)
//! - `services`: The immutable subscription book and its add/edit/delete flows
//! - `reports`: Spend aggregation and calendar binding
//! - `display`: Terminal formatting
//! - `export`: JSON, CSV and YAML export
//! - `config`: Path resolution and user settings
//! - `cli`: Command handlers for the `subtrack` binary
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust
//! use subtrack::models::CalendarDate;
//! use subtrack::reports::total_spend_for_month;
//! use subtrack::services::SubscriptionBook;
//!
//! let book = SubscriptionBook::demo();
//! let october = CalendarDate::new(2024, 10, 15).unwrap();
//! assert_eq!(total_spend_for_month(book.as_slice(), october).to_string(), "7.44");
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;

pub use error::{SubtrackError, SubtrackResult};
