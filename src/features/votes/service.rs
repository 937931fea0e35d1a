use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::core::error::AppError;
use crate::features::congress::CongressDataSource;
use crate::features::votes::dto::{VoteLookup, VoteRecord};
use crate::features::votes::helpers::{flatten_votes, normalise_bill_id};
use crate::features::votes::store::VoteCacheStore;

type BillId = (String, String);

pub struct VoteService {
    data_source: Arc<dyn CongressDataSource>,
    store: VoteCacheStore,
    cache_enabled: bool,
    cache_ttl: Option<Duration>,
    bill_locks: Mutex<HashMap<BillId, Arc<AsyncMutex<()>>>>,
}

impl VoteService {
    pub fn new(
        config: &AppConfig,
        data_source: Arc<dyn CongressDataSource>,
        store: VoteCacheStore,
    ) -> Self {
        Self {
            data_source,
            store,
            cache_enabled: config.cache_enabled,
            cache_ttl: config.votes_cache_ttl.map(Duration::from_secs),
            bill_locks: Mutex::new(HashMap::new()),
        }
    }

    pub async fn get_votes(
        &self,
        session: &str,
        bill_number: &str,
    ) -> Result<Vec<VoteRecord>, AppError> {
        Ok(self.lookup(session, bill_number).await?.records)
    }

    pub async fn lookup(&self, session: &str, bill_number: &str) -> Result<VoteLookup, AppError> {
        let bill_id = normalise_bill_id(session, bill_number)?;

        let lease = self.lease(bill_id);
        let _guard = lease.lock.lock().await;
        self.lookup_locked(&lease.bill_id.0, &lease.bill_id.1).await
    }

    pub async fn evict(&self, session: &str, bill_number: &str) -> Result<bool, AppError> {
        let (session, bill_number) = normalise_bill_id(session, bill_number)?;
        let removed = self.store.remove(&session, &bill_number).await?;
        info!(%session, %bill_number, removed, "evicted cached votes");
        Ok(removed)
    }

    pub async fn clear_cache(&self) -> Result<usize, AppError> {
        let removed = self.store.clear().await?;
        info!(removed, "cleared vote cache");
        Ok(removed)
    }

    async fn lookup_locked(&self, session: &str, bill_number: &str) -> Result<VoteLookup, AppError> {
        if self.cache_enabled {
            if let Some(records) = self.read_cached(session, bill_number).await {
                info!(session, bill_number, count = records.len(), "vote cache hit");
                return Ok(VoteLookup {
                    records,
                    cached: true,
                });
            }
        }

        debug!(session, bill_number, "vote cache miss, fetching upstream");
        let payload = self.data_source.fetch_bill_votes(session, bill_number).await?;
        let records = flatten_votes(session, bill_number, payload);

        if records.is_empty() {
            info!(session, bill_number, "no vote data available");
        } else if self.cache_enabled {
            self.write_cached(session, bill_number, &records).await;
        }

        Ok(VoteLookup {
            records,
            cached: false,
        })
    }

    async fn read_cached(&self, session: &str, bill_number: &str) -> Option<Vec<VoteRecord>> {
        let entry = match self.store.get(session, bill_number).await {
            Ok(Some(entry)) => entry,
            Ok(None) => return None,
            Err(err) => {
                warn!(session, bill_number, error = %err, "vote cache read failed");
                return None;
            }
        };

        if let Some(ttl) = self.cache_ttl {
            if entry.is_expired(ttl) {
                debug!(session, bill_number, stored_at = %entry.stored_at, "cached votes expired");
                return None;
            }
        }

        match serde_json::from_str::<Vec<VoteRecord>>(&entry.data) {
            Ok(records) => Some(records),
            Err(err) => {
                warn!(session, bill_number, error = %err, "discarding undecodable cached votes");
                if let Err(err) = self.store.remove(session, bill_number).await {
                    warn!(session, bill_number, error = %err, "failed to evict cached votes");
                }
                None
            }
        }
    }

    async fn write_cached(&self, session: &str, bill_number: &str, records: &[VoteRecord]) {
        let data = match serde_json::to_string(records) {
            Ok(data) => data,
            Err(err) => {
                warn!(session, bill_number, error = %err, "failed to serialise votes for cache");
                return;
            }
        };

        match self.store.put(session, bill_number, data).await {
            Ok(()) => debug!(session, bill_number, count = records.len(), "cached votes"),
            Err(err) => warn!(session, bill_number, error = %err, "vote cache write failed"),
        }
    }

    fn lease(&self, bill_id: BillId) -> BillLockLease<'_> {
        let mut locks = self
            .bill_locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let lock = locks
            .entry(bill_id.clone())
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone();

        BillLockLease {
            locks: &self.bill_locks,
            bill_id,
            lock,
        }
    }
}

// Prunes the per-bill lock on drop, including when the lookup is cancelled.
struct BillLockLease<'a> {
    locks: &'a Mutex<HashMap<BillId, Arc<AsyncMutex<()>>>>,
    bill_id: BillId,
    lock: Arc<AsyncMutex<()>>,
}

impl Drop for BillLockLease<'_> {
    fn drop(&mut self) {
        let mut locks = self
            .locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        // Only the map and this lease still hold it: nobody is waiting.
        if Arc::strong_count(&self.lock) == 2 {
            locks.remove(&self.bill_id);
        }
    }
}
