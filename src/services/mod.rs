//! Service layer for subtrack
//!
//! Holds the owned subscription state and the add/edit/delete flows that
//! produce new versions of it.

pub mod book;
pub mod changes;

pub use book::SubscriptionBook;
pub use changes::describe_changes;
