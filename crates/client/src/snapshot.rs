//! Last-good copies of list reads, used when the backend is unreachable.
//!
//! Only two screens keep snapshots: the seller's delivery list and the
//! customer list. A snapshot is keyed by screen, user and date, so
//! yesterday's list never stands in for today's.

use std::future::Future;

use chrono::NaiveDate;
use dairy_ledger_core::UserId;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::ClientError;
use crate::store::{KeyValueStore, StoreError};

/// Screens that keep an offline snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapshotScreen {
    Deliveries,
    Customers,
}

impl SnapshotScreen {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deliveries => "deliveries",
            Self::Customers => "customers",
        }
    }
}

/// Where a list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Fetched from the backend just now.
    Live,
    /// Read from the local snapshot after the fetch failed.
    Cached,
}

/// Records plus whether they are live.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    pub records: Vec<T>,
    pub freshness: Freshness,
}

/// Snapshot reads and writes over a [`KeyValueStore`].
pub struct SnapshotCache<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> SnapshotCache<'a> {
    #[must_use]
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// Store key for one screen, user and date.
    #[must_use]
    pub fn key(screen: SnapshotScreen, user_id: UserId, date: NaiveDate) -> String {
        format!("snapshot:{}:{user_id}:{date}", screen.as_str())
    }

    /// Overwrite the snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn save<T: Serialize>(
        &self,
        screen: SnapshotScreen,
        user_id: UserId,
        date: NaiveDate,
        records: &[T],
    ) -> Result<(), StoreError> {
        let key = Self::key(screen, user_id, date);
        self.store.set(&key, &serde_json::to_string(records)?)?;
        debug!(key = %key, count = records.len(), "Snapshot saved");
        Ok(())
    }

    /// Read the snapshot, if one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or the snapshot does not
    /// decode as a list of `T`.
    pub fn load<T: DeserializeOwned>(
        &self,
        screen: SnapshotScreen,
        user_id: UserId,
        date: NaiveDate,
    ) -> Result<Option<Vec<T>>, StoreError> {
        match self.store.get(&Self::key(screen, user_id, date))? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Await `fetch`; on success refresh the snapshot, on a transport
    /// failure fall back to it.
    ///
    /// Backend rejections are never masked by a snapshot.
    ///
    /// # Errors
    ///
    /// Returns the fetch error when it is not a transport failure or no
    /// usable snapshot exists.
    pub async fn fetch_or_cached<T, F>(
        &self,
        screen: SnapshotScreen,
        user_id: UserId,
        date: NaiveDate,
        fetch: F,
    ) -> Result<Fetched<T>, ClientError>
    where
        T: Serialize + DeserializeOwned,
        F: Future<Output = Result<Vec<T>, ClientError>>,
    {
        match fetch.await {
            Ok(records) => {
                if let Err(e) = self.save(screen, user_id, date, &records) {
                    warn!(error = %e, "Failed to save snapshot");
                }
                Ok(Fetched {
                    records,
                    freshness: Freshness::Live,
                })
            }
            Err(err) if err.is_offline() => match self.load(screen, user_id, date) {
                Ok(Some(records)) => {
                    warn!(error = %err, screen = screen.as_str(), "Backend unreachable, using snapshot");
                    Ok(Fetched {
                        records,
                        freshness: Freshness::Cached,
                    })
                }
                Ok(None) => Err(err),
                Err(e) => {
                    warn!(error = %e, "Snapshot unreadable");
                    Err(err)
                }
            },
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::TransportKind;
    use crate::store::MemoryStore;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn offline() -> ClientError {
        ClientError::Transport {
            kind: TransportKind::Connect,
            detail: "connection refused".to_string(),
        }
    }

    #[test]
    fn test_key_format() {
        assert_eq!(
            SnapshotCache::key(SnapshotScreen::Deliveries, UserId::new(4), today()),
            "snapshot:deliveries:4:2024-06-01"
        );
    }

    #[tokio::test]
    async fn test_live_fetch_refreshes_snapshot() {
        let store = MemoryStore::new();
        let cache = SnapshotCache::new(&store);
        let fetched = cache
            .fetch_or_cached(SnapshotScreen::Customers, UserId::new(1), today(), async {
                Ok(vec![1_i64, 2, 3])
            })
            .await
            .unwrap();
        assert_eq!(fetched.freshness, Freshness::Live);
        let saved: Vec<i64> = cache
            .load(SnapshotScreen::Customers, UserId::new(1), today())
            .unwrap()
            .unwrap();
        assert_eq!(saved, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_offline_falls_back_to_snapshot() {
        let store = MemoryStore::new();
        let cache = SnapshotCache::new(&store);
        cache
            .save(SnapshotScreen::Deliveries, UserId::new(4), today(), &[7_i64])
            .unwrap();

        let fetched = cache
            .fetch_or_cached::<i64, _>(SnapshotScreen::Deliveries, UserId::new(4), today(), async {
                Err(offline())
            })
            .await
            .unwrap();
        assert_eq!(fetched.freshness, Freshness::Cached);
        assert_eq!(fetched.records, vec![7]);
    }

    #[tokio::test]
    async fn test_api_error_is_not_masked() {
        let store = MemoryStore::new();
        let cache = SnapshotCache::new(&store);
        cache
            .save(SnapshotScreen::Deliveries, UserId::new(4), today(), &[7_i64])
            .unwrap();

        let err = cache
            .fetch_or_cached::<i64, _>(SnapshotScreen::Deliveries, UserId::new(4), today(), async {
                Err(ClientError::Api("Seller not found".to_string()))
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Seller not found");
    }

    #[tokio::test]
    async fn test_offline_without_snapshot() {
        let store = MemoryStore::new();
        let cache = SnapshotCache::new(&store);
        let err = cache
            .fetch_or_cached::<i64, _>(SnapshotScreen::Customers, UserId::new(1), today(), async {
                Err(offline())
            })
            .await
            .unwrap_err();
        assert!(err.is_offline());
    }
}
