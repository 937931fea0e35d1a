use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sled::{Db, Tree};
use tokio::task;

use crate::core::error::AppError;

pub const VOTES_TREE: &str = "votes_cache";

const KEY_SEPARATOR: u8 = 0x1f;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedVotes {
    pub stored_at: DateTime<Utc>,
    pub data: String,
}

impl CachedVotes {
    pub fn is_expired(&self, ttl: Duration) -> bool {
        let age = Utc::now()
            .signed_duration_since(self.stored_at)
            .to_std()
            .unwrap_or(Duration::ZERO);

        age > ttl
    }
}

#[derive(Clone)]
pub struct VoteCacheStore {
    tree: Tree,
}

impl VoteCacheStore {
    pub fn open(db: &Db) -> Result<Self, AppError> {
        let tree = db
            .open_tree(VOTES_TREE)
            .map_err(|err| AppError::cache(format!("failed to open vote cache: {err}")))?;

        Ok(Self { tree })
    }

    pub async fn get(&self, session: &str, bill_number: &str) -> Result<Option<CachedVotes>, AppError> {
        let tree = self.tree.clone();
        let key = cache_key(session, bill_number);

        task::spawn_blocking(move || -> Result<Option<CachedVotes>, AppError> {
            let maybe_bytes = tree
                .get(&key)
                .map_err(|err| AppError::cache(format!("cache lookup failed: {err}")))?;

            match maybe_bytes {
                Some(bytes) => serde_json::from_slice::<CachedVotes>(&bytes)
                    .map(Some)
                    .map_err(|err| AppError::cache(format!("failed to decode cache entry: {err}"))),
                None => Ok(None),
            }
        })
        .await
        .map_err(|err| AppError::internal(format!("cache task join error: {err}")))?
    }

    pub async fn put(&self, session: &str, bill_number: &str, data: String) -> Result<(), AppError> {
        let entry = CachedVotes {
            stored_at: Utc::now(),
            data,
        };
        let bytes = serde_json::to_vec(&entry)
            .map_err(|err| AppError::cache(format!("failed to encode cache entry: {err}")))?;

        let tree = self.tree.clone();
        let key = cache_key(session, bill_number);
        task::spawn_blocking(move || -> Result<(), AppError> {
            tree.insert(key, bytes)
                .map_err(|err| AppError::cache(format!("failed to write cache entry: {err}")))?;
            Ok(())
        })
        .await
        .map_err(|err| AppError::internal(format!("cache task join error: {err}")))??;

        self.flush().await
    }

    pub async fn remove(&self, session: &str, bill_number: &str) -> Result<bool, AppError> {
        let tree = self.tree.clone();
        let key = cache_key(session, bill_number);

        let removed = task::spawn_blocking(move || -> Result<bool, AppError> {
            tree.remove(key)
                .map(|previous| previous.is_some())
                .map_err(|err| AppError::cache(format!("failed to remove cache entry: {err}")))
        })
        .await
        .map_err(|err| AppError::internal(format!("cache task join error: {err}")))??;

        self.flush().await?;
        Ok(removed)
    }

    pub async fn clear(&self) -> Result<usize, AppError> {
        let tree = self.tree.clone();

        let removed = task::spawn_blocking(move || -> Result<usize, AppError> {
            let count = tree.len();
            tree.clear()
                .map_err(|err| AppError::cache(format!("failed to clear cache: {err}")))?;
            Ok(count)
        })
        .await
        .map_err(|err| AppError::internal(format!("cache task join error: {err}")))??;

        self.flush().await?;
        Ok(removed)
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    async fn flush(&self) -> Result<(), AppError> {
        self.tree
            .flush_async()
            .await
            .map_err(|err| AppError::cache(format!("failed to flush cache: {err}")))?;
        Ok(())
    }
}

fn cache_key(session: &str, bill_number: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(session.len() + bill_number.len() + 1);
    key.extend_from_slice(session.as_bytes());
    key.push(KEY_SEPARATOR);
    key.extend_from_slice(bill_number.as_bytes());
    key
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn open_store() -> (TempDir, Db, VoteCacheStore) {
        let temp_dir = TempDir::new().unwrap();
        let db = sled::open(temp_dir.path()).unwrap();
        let store = VoteCacheStore::open(&db).unwrap();
        (temp_dir, db, store)
    }

    #[tokio::test]
    async fn get_returns_none_for_unknown_key() {
        let (_dir, _db, store) = open_store();
        assert!(store.get("118", "1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn put_then_get_returns_same_blob() {
        let (_dir, _db, store) = open_store();

        store.put("118", "1", "[1,2,3]".to_string()).await.unwrap();
        let cached = store.get("118", "1").await.unwrap().unwrap();

        assert_eq!(cached.data, "[1,2,3]");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn put_upserts_existing_key() {
        let (_dir, _db, store) = open_store();

        store.put("118", "1", "first".to_string()).await.unwrap();
        store.put("118", "1", "second".to_string()).await.unwrap();

        assert_eq!(store.get("118", "1").await.unwrap().unwrap().data, "second");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn keys_do_not_collide_across_boundaries() {
        let (_dir, _db, store) = open_store();

        store.put("11", "81", "a".to_string()).await.unwrap();
        store.put("118", "1", "b".to_string()).await.unwrap();

        assert_eq!(store.get("11", "81").await.unwrap().unwrap().data, "a");
        assert_eq!(store.get("118", "1").await.unwrap().unwrap().data, "b");
    }

    #[tokio::test]
    async fn remove_and_clear() {
        let (_dir, _db, store) = open_store();

        store.put("118", "1", "a".to_string()).await.unwrap();
        store.put("118", "2", "b".to_string()).await.unwrap();
        store.put("117", "3", "c".to_string()).await.unwrap();

        assert!(store.remove("118", "1").await.unwrap());
        assert!(!store.remove("118", "1").await.unwrap());
        assert_eq!(store.clear().await.unwrap(), 2);
        assert!(store.is_empty());
    }

    #[test]
    fn expiry_respects_ttl() {
        let fresh = CachedVotes {
            stored_at: Utc::now(),
            data: String::new(),
        };
        let stale = CachedVotes {
            stored_at: Utc::now() - chrono::Duration::seconds(120),
            data: String::new(),
        };

        assert!(!fresh.is_expired(Duration::from_secs(60)));
        assert!(stale.is_expired(Duration::from_secs(60)));
    }
}
