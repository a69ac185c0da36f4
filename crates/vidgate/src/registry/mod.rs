//! Registration records: VID issuance, expiry policy, and the single
//! allowed post-creation mutation.

mod store;
mod sweep;

pub use store::{MemoryStore, RecordStore, RegistrationRecord};
pub use sweep::sweep_worker;

use chrono::{DateTime, Utc};
use rand::Rng;
use std::sync::Arc;

use vidpass_common::constants::messages;
use vidpass_common::{RegistrationError, RegistrationStatus, VidNumber};

/// Registration registry: identifier issuance and TTL policy over a
/// swappable record store.
///
/// Expiry is enforced twice: lazily here on access, and wholesale by the
/// periodic sweep, so a delayed sweep never serves stale records.
pub struct Registry {
    store: Arc<dyn RecordStore>,

    /// Record time-to-live in seconds
    ttl_secs: i64,
}

impl Registry {
    pub fn new(store: Arc<dyn RecordStore>, ttl_secs: u64) -> Self {
        Self {
            store,
            ttl_secs: ttl_secs as i64,
        }
    }

    /// Cutoff timestamp: anything created before it is expired
    fn expiry_cutoff(&self) -> DateTime<Utc> {
        Utc::now() - chrono::Duration::seconds(self.ttl_secs)
    }

    /// Issue a fresh VID and store a new unverified record.
    ///
    /// The identifier space is six decimal digits; on the unlikely
    /// collision the draw is repeated rather than overwriting an
    /// in-flight registration.
    pub async fn create(&self, id_image: String) -> VidNumber {
        loop {
            let vid = generate_vid();
            let record = RegistrationRecord::new(vid.clone(), id_image.clone(), Utc::now());

            if self.store.insert(record).await {
                tracing::debug!(vid = %vid, "Registration record created");
                return vid;
            }

            tracing::warn!(vid = %vid, "VID collision, regenerating");
        }
    }

    /// Gate the face-submission step: the record must exist and be within
    /// its TTL. An expired record is removed here (the lazy half of the
    /// expiry policy).
    pub async fn begin_face_submission(&self, vid: &VidNumber) -> Result<(), RegistrationError> {
        let record = self
            .store
            .get(vid)
            .await
            .ok_or_else(|| RegistrationError::NotFound(messages::UNKNOWN_VID.to_string()))?;

        if record.is_older_than(self.expiry_cutoff()) {
            self.store.remove(vid).await;
            tracing::info!(vid = %vid, "Expired registration removed on access");
            return Err(RegistrationError::Expired(
                messages::SESSION_EXPIRED.to_string(),
            ));
        }

        Ok(())
    }

    /// Attach the face photo and flip the record to verified: the single
    /// mutation a record sees after creation.
    ///
    /// The record may have been swept while the verifier ran; that
    /// surfaces as NotFound rather than resurrecting it.
    pub async fn mark_verified(
        &self,
        vid: &VidNumber,
        face_image: String,
    ) -> Result<(), RegistrationError> {
        let mut record = self
            .store
            .get(vid)
            .await
            .ok_or_else(|| RegistrationError::NotFound(messages::UNKNOWN_VID.to_string()))?;

        record.verified = true;
        record.face_image = Some(face_image);

        if !self.store.update(record).await {
            return Err(RegistrationError::NotFound(messages::UNKNOWN_VID.to_string()));
        }

        tracing::info!(vid = %vid, "Registration verified");
        Ok(())
    }

    /// Read-only status lookup. Expired-but-unswept records read as
    /// absent; nothing is removed on this path.
    pub async fn status(&self, vid: &VidNumber) -> Option<RegistrationStatus> {
        let record = self.store.get(vid).await?;

        if record.is_older_than(self.expiry_cutoff()) {
            return None;
        }

        Some(RegistrationStatus {
            vid_number: record.vid,
            timestamp: record.created_at,
            face_verified: record.verified,
        })
    }

    /// Remove every expired record. Verified records are not exempt.
    /// Returns how many were removed.
    pub async fn sweep(&self) -> usize {
        self.store.remove_created_before(self.expiry_cutoff()).await
    }

    /// Number of stored records (includes expired-but-unswept)
    pub async fn active_count(&self) -> usize {
        self.store.count().await
    }
}

/// Draw a VID from the fixed format: "VID" + 6 decimal digits
fn generate_vid() -> VidNumber {
    let serial = rand::rng().random_range(100_000..1_000_000);
    VidNumber::from(format!("{}{}", VidNumber::PREFIX, serial))
}
