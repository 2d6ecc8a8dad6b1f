//! The subscription book
//!
//! `SubscriptionBook` is the single owned copy of the subscription list. It
//! is never patched in place: `add`, `edit` and `delete` each return a new
//! book with the version bumped, and every derived view (spend totals,
//! calendar groupings) is recomputed from the current book.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::changes::describe_changes;
use crate::error::{SubtrackError, SubtrackResult};
use crate::models::{BillingCycle, CalendarDate, Money, Subscription, SubscriptionId};

/// An ordered, versioned list of subscriptions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionBook {
    version: u64,
    subscriptions: Vec<Subscription>,
}

impl SubscriptionBook {
    /// An empty book at version 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a book from an existing list, validating every entry and
    /// rejecting duplicate ids
    pub fn from_subscriptions(subscriptions: Vec<Subscription>) -> SubtrackResult<Self> {
        let mut seen = HashSet::new();
        for sub in &subscriptions {
            sub.validate()
                .map_err(|e| SubtrackError::Validation(format!("{}: {}", sub.id, e)))?;
            if !seen.insert(sub.id) {
                return Err(SubtrackError::duplicate_subscription(sub.id.to_string()));
            }
        }

        Ok(Self {
            version: 0,
            subscriptions,
        })
    }

    /// The two sample subscriptions the dashboard starts with
    pub fn demo() -> Self {
        let due = CalendarDate::new(2024, 10, 30).expect("2024-10-30 is a valid date");
        let started = CalendarDate::new(2023, 1, 1).expect("2023-01-01 is a valid date");

        let prime = Subscription {
            id: SubscriptionId::from_uuid(uuid::Uuid::from_u128(
                0x3a5f_09c2_7d41_4e8b_a1c6_52d9_e0b7_4f13,
            )),
            ..Subscription::new("Amazon Prime", Money::from_cents(345), BillingCycle::Monthly, due)
                .with_company("Amazon")
                .with_logo_url("https://logo.clearbit.com/amazon.com")
                .with_start_date(started)
        };

        let hosting = Subscription {
            id: SubscriptionId::from_uuid(uuid::Uuid::from_u128(
                0x8c27_e4b9_1f06_4a5d_b3e8_9d40_26c1_7a95,
            )),
            ..Subscription::new("GoDaddy Hosting", Money::from_cents(399), BillingCycle::Monthly, due)
                .with_company("GoDaddy")
                .with_logo_url("https://logo.clearbit.com/godaddy.com")
                .with_start_date(started)
        };

        Self {
            version: 0,
            subscriptions: vec![prime, hosting],
        }
    }

    /// Incremented by every successful mutation
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn as_slice(&self) -> &[Subscription] {
        &self.subscriptions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Subscription> {
        self.subscriptions.iter()
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    pub fn get(&self, id: SubscriptionId) -> Option<&Subscription> {
        self.subscriptions.iter().find(|sub| sub.id == id)
    }

    /// Find a subscription by name (case-insensitive) or id
    ///
    /// Ids may be given in full or in their short `sub-xxxxxxxx` form.
    pub fn find(&self, identifier: &str) -> Option<&Subscription> {
        let identifier = identifier.trim();
        let by_name = self
            .subscriptions
            .iter()
            .find(|sub| sub.name.trim().eq_ignore_ascii_case(identifier));
        if by_name.is_some() {
            return by_name;
        }

        if let Ok(id) = identifier.parse::<SubscriptionId>() {
            return self.get(id);
        }

        self.subscriptions
            .iter()
            .find(|sub| sub.id.matches_short(identifier))
    }

    /// Add flow: append a new subscription
    pub fn add(&self, subscription: Subscription) -> SubtrackResult<Self> {
        subscription
            .validate()
            .map_err(|e| SubtrackError::Validation(e.to_string()))?;

        if self.get(subscription.id).is_some() {
            return Err(SubtrackError::duplicate_subscription(
                subscription.id.to_string(),
            ));
        }

        let mut subscriptions = self.subscriptions.clone();
        subscriptions.push(subscription);
        let book = self.next(subscriptions);

        if let Some(added) = book.subscriptions.last() {
            tracing::debug!(
                id = %added.id,
                name = %added.name,
                version = book.version,
                "added subscription"
            );
        }

        Ok(book)
    }

    /// Edit flow: replace the subscription with the same id wholesale,
    /// keeping its position in the list
    pub fn edit(&self, subscription: Subscription) -> SubtrackResult<Self> {
        subscription
            .validate()
            .map_err(|e| SubtrackError::Validation(e.to_string()))?;

        let position = self
            .subscriptions
            .iter()
            .position(|sub| sub.id == subscription.id)
            .ok_or_else(|| SubtrackError::subscription_not_found(subscription.id.to_string()))?;

        let changes = describe_changes(&self.subscriptions[position], &subscription);

        let mut subscriptions = self.subscriptions.clone();
        subscriptions[position] = subscription;
        let book = self.next(subscriptions);

        tracing::debug!(
            id = %book.subscriptions[position].id,
            name = %book.subscriptions[position].name,
            version = book.version,
            changes = changes.as_deref().unwrap_or("none"),
            "replaced subscription"
        );

        Ok(book)
    }

    /// Delete flow: drop the subscription with this id
    pub fn delete(&self, id: SubscriptionId) -> SubtrackResult<Self> {
        let removed = self
            .get(id)
            .ok_or_else(|| SubtrackError::subscription_not_found(id.to_string()))?;

        tracing::debug!(
            id = %removed.id,
            name = %removed.name,
            version = self.version + 1,
            "deleted subscription"
        );

        let subscriptions = self
            .subscriptions
            .iter()
            .filter(|sub| sub.id != id)
            .cloned()
            .collect();

        Ok(self.next(subscriptions))
    }

    fn next(&self, subscriptions: Vec<Subscription>) -> Self {
        Self {
            version: self.version + 1,
            subscriptions,
        }
    }
}

impl<'a> IntoIterator for &'a SubscriptionBook {
    type Item = &'a Subscription;
    type IntoIter = std::slice::Iter<'a, Subscription>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::new(y, m, d).unwrap()
    }

    fn spotify() -> Subscription {
        Subscription::new(
            "Spotify",
            Money::from_cents(999),
            BillingCycle::Monthly,
            date(2024, 11, 3),
        )
    }

    #[test]
    fn test_demo_book() {
        let book = SubscriptionBook::demo();
        assert_eq!(book.len(), 2);
        assert_eq!(book.version(), 0);
        assert_eq!(book.as_slice()[0].name, "Amazon Prime");
        assert_eq!(book.as_slice()[1].price, Money::from_cents(399));
    }

    #[test]
    fn test_add_returns_new_book() {
        let book = SubscriptionBook::demo();
        let added = book.add(spotify()).unwrap();

        assert_eq!(book.len(), 2);
        assert_eq!(added.len(), 3);
        assert_eq!(added.version(), 1);
        assert_eq!(added.as_slice()[2].name, "Spotify");
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let sub = spotify();
        let book = SubscriptionBook::new().add(sub.clone()).unwrap();
        let err = book.add(sub).unwrap_err();
        assert!(matches!(err, SubtrackError::Duplicate { .. }));
    }

    #[test]
    fn test_add_rejects_invalid() {
        let mut sub = spotify();
        sub.price = Money::from_cents(-100);
        assert!(SubscriptionBook::new().add(sub).unwrap_err().is_validation());
    }

    #[test]
    fn test_edit_replaces_in_place() {
        let book = SubscriptionBook::demo();
        let mut prime = book.as_slice()[0].clone();
        prime.price = Money::from_cents(899);
        prime.next_billing_date = date(2024, 11, 30);

        let edited = book.edit(prime.clone()).unwrap();
        assert_eq!(edited.version(), 1);
        assert_eq!(edited.as_slice()[0], prime);
        assert_eq!(edited.as_slice()[1], book.as_slice()[1]);
        assert_eq!(book.as_slice()[0].price, Money::from_cents(345));
    }

    #[test]
    fn test_edit_unknown_id() {
        let err = SubscriptionBook::demo().edit(spotify()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete() {
        let book = SubscriptionBook::demo();
        let id = book.as_slice()[0].id;
        let deleted = book.delete(id).unwrap();

        assert_eq!(deleted.len(), 1);
        assert!(deleted.get(id).is_none());
        assert_eq!(deleted.version(), 1);
        assert!(deleted.delete(id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_find_by_name_and_id() {
        let book = SubscriptionBook::demo();
        let prime = &book.as_slice()[0];

        assert_eq!(book.find("amazon prime").map(|s| s.id), Some(prime.id));
        assert_eq!(book.find(&prime.id.to_string()).map(|s| s.id), Some(prime.id));
        assert_eq!(
            book.find(&prime.id.as_uuid().to_string()).map(|s| s.id),
            Some(prime.id)
        );
        assert!(book.find("Netflix").is_none());
    }

    #[test]
    fn test_from_subscriptions_rejects_duplicates() {
        let sub = spotify();
        let err = SubscriptionBook::from_subscriptions(vec![sub.clone(), sub]).unwrap_err();
        assert!(matches!(err, SubtrackError::Duplicate { .. }));
    }

    #[test]
    fn test_serialization() {
        let book = SubscriptionBook::demo().add(spotify()).unwrap();
        let json = serde_json::to_string(&book).unwrap();
        let back: SubscriptionBook = serde_json::from_str(&json).unwrap();
        assert_eq!(back, book);
    }
}
