//! Snapshot publishing for stores shared across threads.
//!
//! # Responsibility
//! - Hand out cheap `Arc` snapshots of the current store to readers.
//! - Replace the published store atomically on reload.
//!
//! # Invariants
//! - A reload builds the complete new store before taking the write lock.
//! - A failed reload leaves the previous snapshot published.
//! - Readers holding an older snapshot keep a consistent view until dropped.

use crate::model::rating::RawRecord;
use crate::store::rating_store::{RatingStore, StoreResult};
use log::{info, warn};
use std::sync::{Arc, PoisonError, RwLock};

/// Thread-safe holder of the currently published `RatingStore`.
#[derive(Debug)]
pub struct SharedRatingStore {
    current: RwLock<Arc<RatingStore>>,
}

impl SharedRatingStore {
    /// Publishes `store` as the initial snapshot.
    pub fn new(store: RatingStore) -> Self {
        Self {
            current: RwLock::new(Arc::new(store)),
        }
    }

    /// Returns the currently published store.
    pub fn snapshot(&self) -> Arc<RatingStore> {
        // The lock only guards a pointer swap, so a poisoned lock still holds
        // a complete store.
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Replaces the published store with an already-built one.
    pub fn publish(&self, store: RatingStore) {
        let next = Arc::new(store);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = next;
    }

    /// Loads `records` into a fresh store and publishes it on success.
    ///
    /// # Errors
    /// - Returns the load error unchanged; the previous snapshot stays active.
    pub fn reload<I>(&self, records: I) -> StoreResult<()>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        match RatingStore::load(records) {
            Ok(store) => {
                let users = store.user_count();
                self.publish(store);
                info!("event=store_reloaded module=store status=ok users={users}");
                Ok(())
            }
            Err(err) => {
                warn!(
                    "event=store_reloaded module=store status=error index={}",
                    err.index
                );
                Err(err)
            }
        }
    }
}

impl From<RatingStore> for SharedRatingStore {
    fn from(value: RatingStore) -> Self {
        Self::new(value)
    }
}
