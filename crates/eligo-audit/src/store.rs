//! Audit persistence: the `AuditStore` transport trait, query filters, and
//! the in-memory hash-chained reference implementation.
//!
//! `MemoryAuditStore` keeps all links in a `Vec` protected by a `Mutex`,
//! making it safe to share across threads while services append entries.
//! Use `verify_integrity()` at any time to confirm the chain has not been
//! tampered with in memory.

use std::sync::Mutex;

use chrono::{DateTime, Utc};

use eligo_contracts::{
    audit::{AuditAction, AuditEntry, ResourceType},
    error::{EligoError, EligoResult},
};

use crate::chain::{hash_entry, verify_chain, ChainedEntry};

// ── Transport trait ──────────────────────────────────────────────────────────

/// Where audit entries physically go.
///
/// This is the transport boundary: a database table, a WORM bucket, or the
/// in-memory chain below. Implementations must preserve append order and
/// never rewrite stored entries.
pub trait AuditStore: Send + Sync {
    /// Append one entry to the trail.
    fn append(&self, entry: AuditEntry) -> EligoResult<()>;

    /// Entries matching `filter`, ordered newest first.
    fn query(&self, filter: &AuditQuery) -> EligoResult<Vec<AuditEntry>>;
}

// ── Query filter ─────────────────────────────────────────────────────────────

/// A conjunction of optional filters over the audit trail.
///
/// `None` fields match everything, so the default query returns every
/// retained entry. `from` and `to` are inclusive bounds on the entry
/// timestamp.
#[derive(Debug, Clone, Default)]
pub struct AuditQuery {
    /// Match entries recorded by this actor id.
    pub actor: Option<String>,
    /// Match entries touching this resource kind.
    pub resource_type: Option<ResourceType>,
    /// Match entries with this action.
    pub action: Option<AuditAction>,
    /// Match entries at or after this instant.
    pub from: Option<DateTime<Utc>>,
    /// Match entries at or before this instant.
    pub to: Option<DateTime<Utc>>,
}

impl AuditQuery {
    /// Whether `entry` satisfies every set filter.
    pub fn matches(&self, entry: &AuditEntry) -> bool {
        if let Some(actor) = &self.actor {
            if &entry.actor != actor {
                return false;
            }
        }
        if let Some(resource_type) = self.resource_type {
            if entry.resource_type != resource_type {
                return false;
            }
        }
        if let Some(action) = self.action {
            if entry.action != action {
                return false;
            }
        }
        if let Some(from) = self.from {
            if entry.timestamp < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if entry.timestamp > to {
                return false;
            }
        }
        true
    }
}

// ── Internal mutable state ───────────────────────────────────────────────────

/// The mutable interior of a `MemoryAuditStore`.
pub(crate) struct ChainState {
    /// All links written so far, in append order.
    pub(crate) links: Vec<ChainedEntry>,

    /// The next sequence number to assign (starts at 0).
    pub(crate) sequence: u64,

    /// The `this_hash` of the last written link, or `GENESIS_HASH` before
    /// any link has been written.
    pub(crate) last_hash: String,
}

// ── In-memory store ──────────────────────────────────────────────────────────

/// An in-memory, append-only audit store backed by a SHA-256 hash chain.
///
/// # Thread safety
///
/// `append()` and `query()` both acquire a `Mutex` internally, so the store
/// can be shared behind an `Arc` without additional synchronization.
pub struct MemoryAuditStore {
    pub(crate) state: Mutex<ChainState>,
}

impl MemoryAuditStore {
    /// Create an empty store.
    ///
    /// The internal `last_hash` is initialized to
    /// [`ChainedEntry::GENESIS_HASH`] so the first link's `prev_hash` is
    /// automatically correct.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ChainState {
                links: Vec::new(),
                sequence: 0,
                last_hash: ChainedEntry::GENESIS_HASH.to_string(),
            }),
        }
    }

    /// Number of entries in the trail.
    pub fn len(&self) -> usize {
        self.state.lock().expect("audit chain lock poisoned").links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Verify that the in-memory chain has not been tampered with.
    ///
    /// Delegates to [`verify_chain`], which checks both prev-hash linkage
    /// and hash correctness for every link.
    pub fn verify_integrity(&self) -> bool {
        let state = self.state.lock().expect("audit chain lock poisoned");
        verify_chain(&state.links)
    }

    /// A copy of every chain link, in append order.
    pub fn chained_entries(&self) -> Vec<ChainedEntry> {
        self.state
            .lock()
            .expect("audit chain lock poisoned")
            .links
            .clone()
    }
}

impl Default for MemoryAuditStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditStore for MemoryAuditStore {
    /// Append one entry to the hash chain.
    ///
    /// Computes `this_hash` from (sequence, prev_hash, entry), wraps the
    /// entry in a [`ChainedEntry`], appends it, then advances the sequence
    /// counter and `last_hash`.
    ///
    /// Returns `Err(AuditWriteFailed)` only if the internal mutex is
    /// poisoned, which cannot happen under normal operation.
    fn append(&self, entry: AuditEntry) -> EligoResult<()> {
        let mut state = self.state.lock().map_err(|e| EligoError::AuditWriteFailed {
            reason: format!("audit chain lock poisoned: {}", e),
        })?;

        let prev_hash = state.last_hash.clone();
        let sequence = state.sequence;

        let this_hash = hash_entry(sequence, &entry, &prev_hash);

        let link = ChainedEntry {
            sequence,
            entry,
            prev_hash,
            this_hash: this_hash.clone(),
        };

        state.links.push(link);
        state.sequence += 1;
        state.last_hash = this_hash;

        Ok(())
    }

    fn query(&self, filter: &AuditQuery) -> EligoResult<Vec<AuditEntry>> {
        let state = self.state.lock().map_err(|e| EligoError::Store {
            reason: format!("audit chain lock poisoned: {}", e),
        })?;

        let mut entries: Vec<AuditEntry> = state
            .links
            .iter()
            .filter(|link| filter.matches(&link.entry))
            .map(|link| link.entry.clone())
            .collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        Ok(entries)
    }
}
