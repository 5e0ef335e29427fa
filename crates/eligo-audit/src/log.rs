//! The audit log facade every service records through.
//!
//! `AuditLog` sits between business code and the [`AuditStore`] transport.
//! Callers are fire-and-forget: a failed append is retried exactly once, and
//! a second failure is reported on the log's own error channel (a
//! `tracing::error!` plus the inspectable dead-letter list) instead of being
//! propagated. Business operations never fail because an audit write did,
//! and business content is never rejected.

use std::sync::{Arc, Mutex};

use tracing::{error, warn};

use eligo_contracts::audit::AuditEntry;
use eligo_core::traits::AuditRecorder;

use crate::store::{AuditQuery, AuditStore};

/// Fire-and-forget front door to the audit trail.
pub struct AuditLog {
    store: Arc<dyn AuditStore>,
    /// Entries the store refused twice. Kept for operator inspection.
    dead_letters: Mutex<Vec<AuditEntry>>,
}

impl AuditLog {
    pub fn new(store: Arc<dyn AuditStore>) -> Self {
        Self {
            store,
            dead_letters: Mutex::new(Vec::new()),
        }
    }

    /// Entries matching `filter`, newest first.
    ///
    /// A store failure is logged and surfaces as an empty result; readers of
    /// the trail get best-effort data, never an error.
    pub fn query(&self, filter: &AuditQuery) -> Vec<AuditEntry> {
        match self.store.query(filter) {
            Ok(entries) => entries,
            Err(e) => {
                error!(error = %e, "audit query failed");
                Vec::new()
            }
        }
    }

    /// Entries that could not be persisted after the retry.
    pub fn dead_letters(&self) -> Vec<AuditEntry> {
        self.dead_letters
            .lock()
            .expect("dead-letter lock poisoned")
            .clone()
    }
}

impl AuditRecorder for AuditLog {
    /// Append `entry` to the trail.
    ///
    /// On a store failure the append is retried once with the same entry.
    /// A second failure dead-letters the entry and emits an error event;
    /// nothing is ever returned to the caller.
    fn record(&self, entry: AuditEntry) {
        let first = match self.store.append(entry.clone()) {
            Ok(()) => return,
            Err(e) => e,
        };

        warn!(error = %first, "audit append failed, retrying once");

        if let Err(second) = self.store.append(entry.clone()) {
            error!(
                error = %second,
                actor = %entry.actor,
                action = %entry.action,
                resource_type = %entry.resource_type,
                resource_id = %entry.resource_id,
                "audit append failed twice, entry dead-lettered"
            );
            self.dead_letters
                .lock()
                .expect("dead-letter lock poisoned")
                .push(entry);
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
