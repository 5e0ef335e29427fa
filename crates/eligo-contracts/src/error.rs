//! Error types for the Eligo verification pipeline.
//!
//! All fallible operations across the workspace return `EligoResult<T>`.
//! Variants carry enough context to produce actionable audit entries and
//! user-facing messages without re-deriving state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single field-level validation failure.
///
/// Validation reports every violated field at once, so callers can surface
/// all problems in one round trip instead of fixing them one at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// The field that failed (e.g. "policy_number").
    pub field: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(FieldViolation::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// The unified error type for the Eligo workspace.
#[derive(Debug, Error)]
pub enum EligoError {
    /// Input failed validation. Lists every violated field, not just the first.
    #[error("validation failed: {}", join_violations(.violations))]
    Validation { violations: Vec<FieldViolation> },

    /// The classifier backend rate-limited the request and retries are exhausted.
    #[error("classifier rate limit exceeded: {reason}")]
    RateLimitExceeded { reason: String },

    /// The classifier backend is unreachable or persistently failing.
    #[error("classifier service unavailable: {reason}")]
    ServiceUnavailable { reason: String },

    /// The classifier replied, but the reply could not be parsed into a judgement.
    #[error("malformed classifier response: {reason}")]
    MalformedResponse { reason: String },

    /// A prior-authorization submission could not reach the payer.
    ///
    /// The request stays in its pre-submit state; resubmission is at the
    /// caller's discretion, never automatic.
    #[error("prior authorization submission failed: {reason}")]
    SubmissionFailed { reason: String },

    /// The caller's role does not permit the attempted action.
    #[error("access denied: role '{role}' may not perform '{action}'")]
    AccessDenied { role: String, action: String },

    /// The audit store rejected a write even after the retry.
    ///
    /// Surfaced on the audit log's own error channel; business operations
    /// never fail on this.
    #[error("audit write failed: {reason}")]
    AuditWriteFailed { reason: String },

    /// A record store operation failed.
    #[error("store error: {reason}")]
    Store { reason: String },

    /// The referenced record does not exist.
    #[error("{resource} not found: {id}")]
    NotFound { resource: String, id: String },

    /// The operation is not legal in the record's current lifecycle state.
    #[error("invalid state: {reason}")]
    InvalidState { reason: String },

    /// A configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    Config { reason: String },
}

/// Convenience alias used throughout the Eligo crates.
pub type EligoResult<T> = Result<T, EligoError>;
