//! # eligo-audit
//!
//! Hash-chained audit trail, PHI display masking, and retention enforcement
//! for the Eligo verification pipeline.
//!
//! ## Overview
//!
//! Every access to protected data produces an `AuditEntry`. The in-memory
//! store wraps each entry in a `ChainedEntry` that links to its predecessor
//! via SHA-256, so tampering with any stored entry, even a single byte,
//! breaks the chain and is detected by `verify_chain`. The `AuditLog`
//! facade in front of the store keeps callers fire-and-forget: one retry,
//! then dead-letter, never an error back to business code.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use eligo_audit::{AuditLog, AuditQuery, MemoryAuditStore};
//! use eligo_core::traits::AuditRecorder;
//!
//! let store = Arc::new(MemoryAuditStore::new());
//! let log = AuditLog::new(store.clone());
//!
//! log.record(entry);
//!
//! assert!(store.verify_integrity());
//! let recent = log.query(&AuditQuery::default());
//! ```

pub mod chain;
pub mod log;
pub mod mask;
pub mod retention;
pub mod store;

pub use chain::{hash_entry, verify_chain, ChainedEntry};
pub use log::AuditLog;
pub use mask::{mask_for_display, MaskKind};
pub use retention::{
    compliance_report, standard_policies, ComplianceReport, RetentionClass, RetentionPolicy,
    RetentionSweeper, SweepReport,
};
pub use store::{AuditQuery, AuditStore, MemoryAuditStore};

// ── Tests ────────────────────────────────────────────────────────────────────
