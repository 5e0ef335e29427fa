//! In-memory implementation of `PriorAuthStore`.

use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use tracing::debug;

use eligo_contracts::{
    error::{EligoError, EligoResult},
    priorauth::{PriorAuthId, PriorAuthRequest},
};
use eligo_core::traits::{PriorAuthStore, PriorAuthUpdate};

/// An in-memory, mutex-guarded prior-auth request store.
///
/// Same atomicity contract as [`crate::MemoryVerificationStore`]: patches
/// are applied while the lock is held.
pub struct MemoryPriorAuthStore {
    requests: Mutex<Vec<PriorAuthRequest>>,
}

impl MemoryPriorAuthStore {
    pub fn new() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.requests
            .lock()
            .expect("prior-auth store lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn guard(&self) -> EligoResult<MutexGuard<'_, Vec<PriorAuthRequest>>> {
        self.requests.lock().map_err(|e| EligoError::Store {
            reason: format!("prior-auth store lock poisoned: {}", e),
        })
    }
}

impl Default for MemoryPriorAuthStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PriorAuthStore for MemoryPriorAuthStore {
    fn insert(&self, request: PriorAuthRequest) -> EligoResult<PriorAuthId> {
        let mut requests = self.guard()?;
        if requests.iter().any(|r| r.id == request.id) {
            return Err(EligoError::Store {
                reason: format!("duplicate prior-auth id {}", request.id),
            });
        }
        let id = request.id;
        requests.push(request);
        Ok(id)
    }

    fn update(&self, id: PriorAuthId, patch: PriorAuthUpdate) -> EligoResult<PriorAuthRequest> {
        let mut requests = self.guard()?;
        let request = requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| EligoError::NotFound {
                resource: "prior-auth request".to_string(),
                id: id.to_string(),
            })?;
        patch.apply(request);
        Ok(request.clone())
    }

    fn get(&self, id: PriorAuthId) -> EligoResult<PriorAuthRequest> {
        self.guard()?
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| EligoError::NotFound {
                resource: "prior-auth request".to_string(),
                id: id.to_string(),
            })
    }

    fn list(&self) -> EligoResult<Vec<PriorAuthRequest>> {
        let mut requests = self.guard()?.clone();
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(requests)
    }

    fn purge_created_before(&self, cutoff: DateTime<Utc>) -> EligoResult<usize> {
        let mut requests = self.guard()?;
        let before = requests.len();
        requests.retain(|r| r.created_at >= cutoff);
        let removed = before - requests.len();
        if removed > 0 {
            debug!(removed, %cutoff, "purged prior-auth requests past retention");
        }
        Ok(removed)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
