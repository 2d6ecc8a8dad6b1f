//! Display formatting for terminal output
//!
//! Provides utilities for formatting subscriptions and reports for the
//! terminal.

pub mod report;
pub mod subscription;

pub use subscription::{format_subscription_details, format_subscription_list};
