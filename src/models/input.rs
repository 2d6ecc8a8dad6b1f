//! Raw form input for the add and edit flows
//!
//! The view layer collects plain strings; `SubscriptionInput::parse` turns
//! them into a validated [`Subscription`] before anything reaches the book.

use serde::{Deserialize, Serialize};

use super::date::CalendarDate;
use super::money::Money;
use super::subscription::{BillingCycle, Subscription};
use crate::error::{SubtrackError, SubtrackResult};

/// Unparsed subscription fields as entered by the user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubscriptionInput {
    pub name: String,
    pub company: String,
    pub logo_url: String,
    pub price: String,
    pub billing_cycle: String,
    pub next_billing_date: String,
    /// Optional; new subscriptions default to `today`, edits keep theirs
    #[serde(default)]
    pub start_date: Option<String>,
}

impl SubscriptionInput {
    /// Prefill the form from an existing subscription
    pub fn from_subscription(sub: &Subscription) -> Self {
        Self {
            name: sub.name.clone(),
            company: sub.company.clone(),
            logo_url: sub.logo_url.clone(),
            price: sub.price.to_string(),
            billing_cycle: sub.billing_cycle.to_string(),
            next_billing_date: sub.next_billing_date.to_string(),
            start_date: Some(sub.start_date.to_string()),
        }
    }

    /// Build a subscription from this input
    ///
    /// With `existing = None` this is the add flow: a fresh id is assigned and
    /// the start date defaults to `today`. With `existing = Some(sub)` this is
    /// the edit flow: the id is kept and every other field is overwritten,
    /// except that a blank start date keeps the original one.
    pub fn parse(
        &self,
        existing: Option<&Subscription>,
        today: CalendarDate,
    ) -> SubtrackResult<Subscription> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(SubtrackError::Validation(
                "Subscription name cannot be empty".into(),
            ));
        }

        let price = Money::parse(&self.price)
            .map_err(|e| SubtrackError::Validation(format!("Invalid price: {}", e)))?;
        if price.is_negative() {
            return Err(SubtrackError::Validation(format!(
                "Price cannot be negative: {}",
                price
            )));
        }

        let billing_cycle = if self.billing_cycle.trim().is_empty() {
            BillingCycle::default()
        } else {
            BillingCycle::parse(&self.billing_cycle).ok_or_else(|| {
                SubtrackError::Validation(format!(
                    "Invalid billing cycle '{}'. Use monthly or yearly",
                    self.billing_cycle.trim()
                ))
            })?
        };

        let next_billing_date = CalendarDate::parse(&self.next_billing_date)
            .map_err(|e| SubtrackError::InvalidDate(e.to_string()))?;

        let start_date = match self.start_date.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => {
                CalendarDate::parse(s).map_err(|e| SubtrackError::InvalidDate(e.to_string()))?
            }
            _ => existing.map(|sub| sub.start_date).unwrap_or(today),
        };

        let mut sub = Subscription::new(name, price, billing_cycle, next_billing_date)
            .with_company(self.company.trim())
            .with_logo_url(self.logo_url.trim())
            .with_start_date(start_date);

        if let Some(existing) = existing {
            sub.id = existing.id;
        }

        sub.validate()
            .map_err(|e| SubtrackError::Validation(e.to_string()))?;

        Ok(sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> CalendarDate {
        CalendarDate::new(2024, 10, 15).unwrap()
    }

    fn prime_input() -> SubscriptionInput {
        SubscriptionInput {
            name: " Amazon Prime ".into(),
            company: "Amazon".into(),
            logo_url: "https://logo.clearbit.com/amazon.com".into(),
            price: "3.45".into(),
            billing_cycle: "monthly".into(),
            next_billing_date: "2024-10-30".into(),
            start_date: None,
        }
    }

    #[test]
    fn test_parse_new_subscription() {
        let sub = prime_input().parse(None, today()).unwrap();
        assert_eq!(sub.name, "Amazon Prime");
        assert_eq!(sub.price, Money::from_cents(345));
        assert_eq!(sub.billing_cycle, BillingCycle::Monthly);
        assert_eq!(sub.next_billing_date, CalendarDate::new(2024, 10, 30).unwrap());
        assert_eq!(sub.start_date, today());
    }

    #[test]
    fn test_parse_edit_keeps_id_and_start_date() {
        let original = prime_input()
            .parse(None, CalendarDate::new(2023, 1, 1).unwrap())
            .unwrap();

        let mut input = SubscriptionInput::from_subscription(&original);
        input.price = "4.99".into();
        input.start_date = None;

        let edited = input.parse(Some(&original), today()).unwrap();
        assert_eq!(edited.id, original.id);
        assert_eq!(edited.start_date, original.start_date);
        assert_eq!(edited.price, Money::from_cents(499));
    }

    #[test]
    fn test_parse_rejects_bad_price() {
        let mut input = prime_input();
        input.price = "abc".into();
        assert!(input.parse(None, today()).unwrap_err().is_validation());

        for price in ["-1.00", "--5.00", "-$-3.45", "99999999999999999", "100000000000.00"] {
            input.price = price.into();
            assert!(
                input.parse(None, today()).unwrap_err().is_validation(),
                "price {:?} should be rejected",
                price
            );
        }
    }

    #[test]
    fn test_parse_rejects_bad_cycle_and_date() {
        let mut input = prime_input();
        input.billing_cycle = "weekly".into();
        assert!(input.parse(None, today()).unwrap_err().is_validation());

        let mut input = prime_input();
        input.next_billing_date = "2024-02-30".into();
        assert!(matches!(
            input.parse(None, today()),
            Err(SubtrackError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_parse_rejects_empty_name() {
        let mut input = prime_input();
        input.name = "   ".into();
        assert!(input.parse(None, today()).unwrap_err().is_validation());
    }

    #[test]
    fn test_blank_cycle_defaults_to_monthly() {
        let mut input = prime_input();
        input.billing_cycle = String::new();
        let sub = input.parse(None, today()).unwrap();
        assert_eq!(sub.billing_cycle, BillingCycle::Monthly);
    }
}
