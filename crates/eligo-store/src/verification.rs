//! In-memory implementation of `VerificationStore`.

use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use tracing::debug;

use eligo_contracts::{
    error::{EligoError, EligoResult},
    verification::{Verification, VerificationId},
};
use eligo_core::traits::{VerificationStore, VerificationUpdate};

/// An in-memory, mutex-guarded verification store.
///
/// # Thread safety
///
/// Every operation acquires the internal `Mutex`; patches are applied while
/// it is held, which gives single-record atomic updates.
pub struct MemoryVerificationStore {
    records: Mutex<Vec<Verification>>,
}

impl MemoryVerificationStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.records
            .lock()
            .expect("verification store lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn guard(&self) -> EligoResult<MutexGuard<'_, Vec<Verification>>> {
        self.records.lock().map_err(|e| EligoError::Store {
            reason: format!("verification store lock poisoned: {}", e),
        })
    }
}

impl Default for MemoryVerificationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VerificationStore for MemoryVerificationStore {
    fn insert(&self, record: Verification) -> EligoResult<VerificationId> {
        let mut records = self.guard()?;
        if records.iter().any(|r| r.id == record.id) {
            return Err(EligoError::Store {
                reason: format!("duplicate verification id {}", record.id),
            });
        }
        let id = record.id;
        records.push(record);
        Ok(id)
    }

    fn update(&self, id: VerificationId, patch: VerificationUpdate) -> EligoResult<Verification> {
        let mut records = self.guard()?;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| EligoError::NotFound {
                resource: "verification".to_string(),
                id: id.to_string(),
            })?;
        patch.apply(record);
        Ok(record.clone())
    }

    fn get(&self, id: VerificationId) -> EligoResult<Verification> {
        self.guard()?
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| EligoError::NotFound {
                resource: "verification".to_string(),
                id: id.to_string(),
            })
    }

    fn list(&self) -> EligoResult<Vec<Verification>> {
        let mut records = self.guard()?.clone();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    fn purge_created_before(&self, cutoff: DateTime<Utc>) -> EligoResult<usize> {
        let mut records = self.guard()?;
        let before = records.len();
        records.retain(|r| r.created_at >= cutoff);
        let removed = before - records.len();
        if removed > 0 {
            debug!(removed, %cutoff, "purged verifications past retention");
        }
        Ok(removed)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
