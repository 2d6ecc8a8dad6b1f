//! Subscription model
//!
//! A subscription is an immutable value: edits replace it wholesale under the
//! same id rather than patching fields in place.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::date::CalendarDate;
use super::ids::SubscriptionId;
use super::money::Money;

/// Recurrence period of a subscription charge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    #[default]
    Monthly,
    Yearly,
}

impl BillingCycle {
    /// Parse a billing cycle from user input (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "monthly" | "month" | "m" => Some(Self::Monthly),
            "yearly" | "year" | "annual" | "annually" | "y" => Some(Self::Yearly),
            _ => None,
        }
    }
}

impl fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly => write!(f, "monthly"),
            Self::Yearly => write!(f, "yearly"),
        }
    }
}

/// Largest accepted price in cents
///
/// A million subscriptions at this price still sum within `i64`.
pub const MAX_PRICE_CENTS: i64 = i64::MAX / 1_000_000;

/// A recurring subscription
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// Unique identifier
    pub id: SubscriptionId,

    /// Display name (e.g. "Amazon Prime")
    pub name: String,

    /// Company providing the service
    #[serde(default)]
    pub company: String,

    /// Logo image URL
    #[serde(default)]
    pub logo_url: String,

    /// Price per billing cycle, in cents
    pub price: Money,

    #[serde(default)]
    pub billing_cycle: BillingCycle,

    /// Date of the next charge
    pub next_billing_date: CalendarDate,

    /// When the subscription started. Not used by any aggregation.
    pub start_date: CalendarDate,
}

impl Subscription {
    /// Create a new subscription with a fresh id
    ///
    /// The start date defaults to the next billing date; use
    /// [`Subscription::with_start_date`] to override it.
    pub fn new(
        name: impl Into<String>,
        price: Money,
        billing_cycle: BillingCycle,
        next_billing_date: CalendarDate,
    ) -> Self {
        Self {
            id: SubscriptionId::new(),
            name: name.into(),
            company: String::new(),
            logo_url: String::new(),
            price,
            billing_cycle,
            next_billing_date,
            start_date: next_billing_date,
        }
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = company.into();
        self
    }

    pub fn with_logo_url(mut self, logo_url: impl Into<String>) -> Self {
        self.logo_url = logo_url.into();
        self
    }

    pub fn with_start_date(mut self, start_date: CalendarDate) -> Self {
        self.start_date = start_date;
        self
    }

    /// Whether the next charge falls in the same calendar month as `date`
    pub fn bills_in_month_of(&self, date: &CalendarDate) -> bool {
        self.next_billing_date.same_month(date)
    }

    /// Whether the next charge falls exactly on `date`
    pub fn bills_on(&self, date: &CalendarDate) -> bool {
        self.next_billing_date == *date
    }

    /// Validate the subscription
    pub fn validate(&self) -> Result<(), SubscriptionValidationError> {
        if self.name.trim().is_empty() {
            return Err(SubscriptionValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(SubscriptionValidationError::NameTooLong(self.name.len()));
        }

        if self.price.is_negative() {
            return Err(SubscriptionValidationError::NegativePrice(self.price));
        }

        if self.price.cents() > MAX_PRICE_CENTS {
            return Err(SubscriptionValidationError::PriceTooLarge(self.price));
        }

        Ok(())
    }
}

impl fmt::Display for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for subscriptions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionValidationError {
    EmptyName,
    NameTooLong(usize),
    NegativePrice(Money),
    PriceTooLarge(Money),
}

impl fmt::Display for SubscriptionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Subscription name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Subscription name too long ({} chars, max 100)", len)
            }
            Self::NegativePrice(price) => {
                write!(f, "Subscription price cannot be negative: {}", price)
            }
            Self::PriceTooLarge(price) => write!(
                f,
                "Subscription price too large: {} (max {})",
                price,
                Money::from_cents(MAX_PRICE_CENTS)
            ),
        }
    }
}

impl std::error::Error for SubscriptionValidationError {}
