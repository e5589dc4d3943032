use async_trait::async_trait;
use std::collections::BTreeSet;

use crate::error::Result;

/// Key-value store contract the match service runs against
///
/// Every method is a single atomic store operation. Procedures run through
/// [`SwipeStore::run_atomic_procedure`] never interleave with each other on
/// the same keys.
#[async_trait]
pub trait SwipeStore: Send + Sync {
    /// Check that the store answers
    async fn ping(&self) -> Result<()>;

    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Add `member` to the set at `key`; adding an existing member is a no-op
    async fn add_to_set(&self, key: &str, member: &str) -> Result<()>;

    /// Members of the set at `key`, empty when the key does not exist
    async fn members_of(&self, key: &str) -> Result<BTreeSet<String>>;

    /// Invoke a registered procedure atomically against `keys`
    async fn run_atomic_procedure(&self, name: &str, keys: &[String], args: &[String])
        -> Result<i64>;

    /// Register the swipe-and-match procedure with the store
    async fn register_procedures(&self) -> Result<()>;

    /// Drop all stored data. Registered procedures survive a reset.
    async fn reset(&self) -> Result<()>;
}
