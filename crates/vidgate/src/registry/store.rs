//! Keyed record storage.
//!
//! The surface is deliberately narrow so the in-memory map can be swapped
//! for a real backend without touching the registration flow.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tokio::sync::RwLock;

use vidpass_common::VidNumber;

/// A single registration record, held only in process memory
#[derive(Debug, Clone)]
pub struct RegistrationRecord {
    /// Identifier issued at creation
    pub vid: VidNumber,

    /// ID document photo captured at step 1 (opaque payload)
    pub id_image: String,

    /// Face photo, attached when step 2 succeeds
    pub face_image: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// True once the face photo passed verification
    pub verified: bool,
}

impl RegistrationRecord {
    pub fn new(vid: VidNumber, id_image: String, created_at: DateTime<Utc>) -> Self {
        Self {
            vid,
            id_image,
            face_image: None,
            created_at,
            verified: false,
        }
    }

    /// Age check against a TTL cutoff
    pub fn is_older_than(&self, cutoff: DateTime<Utc>) -> bool {
        self.created_at < cutoff
    }
}

/// Keyed registration storage
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a new record; returns false if the identifier is already taken
    async fn insert(&self, record: RegistrationRecord) -> bool;

    /// Fetch a record by identifier
    async fn get(&self, vid: &VidNumber) -> Option<RegistrationRecord>;

    /// Replace an existing record; returns false if the identifier is unknown
    async fn update(&self, record: RegistrationRecord) -> bool;

    /// Remove a record, returning it if it existed
    async fn remove(&self, vid: &VidNumber) -> Option<RegistrationRecord>;

    /// Remove every record created before the cutoff; returns how many went
    async fn remove_created_before(&self, cutoff: DateTime<Utc>) -> usize;

    /// Number of stored records
    async fn count(&self) -> usize;
}

/// Process-memory store. Cleared on restart, like the demo it mirrors.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<VidNumber, RegistrationRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert(&self, record: RegistrationRecord) -> bool {
        match self.records.write().await.entry(record.vid.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(record);
                true
            }
        }
    }

    async fn get(&self, vid: &VidNumber) -> Option<RegistrationRecord> {
        self.records.read().await.get(vid).cloned()
    }

    async fn update(&self, record: RegistrationRecord) -> bool {
        match self.records.write().await.get_mut(&record.vid) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }

    async fn remove(&self, vid: &VidNumber) -> Option<RegistrationRecord> {
        self.records.write().await.remove(vid)
    }

    async fn remove_created_before(&self, cutoff: DateTime<Utc>) -> usize {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| !record.is_older_than(cutoff));
        before - records.len()
    }

    async fn count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(vid: &str, age_secs: i64) -> RegistrationRecord {
        RegistrationRecord::new(
            VidNumber::from(vid.to_string()),
            "image-bytes".to_string(),
            Utc::now() - chrono::Duration::seconds(age_secs),
        )
    }

    #[tokio::test]
    async fn insert_refuses_duplicate_keys() {
        let store = MemoryStore::new();
        assert!(store.insert(record("VID111111", 0)).await);
        assert!(!store.insert(record("VID111111", 0)).await);
        assert_eq!(store.count().await, 1);
    }

    #[tokio::test]
    async fn update_requires_an_existing_record() {
        let store = MemoryStore::new();
        let mut rec = record("VID222222", 0);

        assert!(!store.update(rec.clone()).await);

        assert!(store.insert(rec.clone()).await);
        rec.verified = true;
        assert!(store.update(rec).await);

        let stored = store.get(&VidNumber::from("VID222222".to_string())).await;
        assert!(stored.is_some_and(|r| r.verified));
    }

    #[tokio::test]
    async fn remove_created_before_removes_all_and_only_expired() {
        let store = MemoryStore::new();
        store.insert(record("VID300000", 7200)).await;
        store.insert(record("VID300001", 7200)).await;
        store.insert(record("VID300002", 10)).await;

        let cutoff = Utc::now() - chrono::Duration::seconds(3600);
        assert_eq!(store.remove_created_before(cutoff).await, 2);
        assert_eq!(store.count().await, 1);

        let survivor = store.get(&VidNumber::from("VID300002".to_string())).await;
        assert!(survivor.is_some());
    }
}
