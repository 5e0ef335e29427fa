//! Core trait definitions for the Eligo pipeline.
//!
//! These traits are the replaceable seams of the system:
//!
//! - `Classifier`        — the AI judgement call (untrusted output)
//! - `VerificationStore` — verification persistence
//! - `PriorAuthStore`    — prior-authorization persistence
//! - `AuditRecorder`     — fire-and-forget audit sink
//! - `Notifier`          — best-effort resolution announcements
//! - `AccessPolicy`      — role/action allow decisions
//! - `PayerChannel`      — prior-auth submission transport
//!
//! The lifecycle service and the prior-auth workflow wire these together.
//! Every trait ships with an in-memory or scripted reference implementation
//! elsewhere in the workspace, so tests never need a live dependency.

use chrono::{DateTime, Utc};

use eligo_contracts::{
    actor::Role,
    audit::{AuditAction, AuditEntry},
    error::EligoResult,
    judgement::EligibilityJudgement,
    patient::PatientRecord,
    priorauth::{PayerResponse, PriorAuthId, PriorAuthRequest, PriorAuthStatus},
    verification::{AiInsights, Coverage, Verification, VerificationId, VerificationStatus},
};

/// The AI eligibility judgement call.
///
/// Implementations are **untrusted**: the lifecycle treats any error as a
/// routine outcome and resolves the verification to `error` status instead
/// of propagating. The judgement handed back here has already passed the
/// gateway's schema validation.
pub trait Classifier: Send + Sync {
    /// Judge the patient's eligibility.
    ///
    /// Must not mutate anything: the lifecycle owns all persistence.
    fn classify(&self, patient: &PatientRecord) -> EligoResult<EligibilityJudgement>;
}

/// A typed partial update for one verification record.
///
/// Stores apply the whole patch under a single lock, so a reader can never
/// observe a new status beside an old coverage snapshot. `None` fields are
/// left untouched.
#[derive(Debug, Clone, Default)]
pub struct VerificationUpdate {
    /// Replace the lifecycle status.
    pub status: Option<VerificationStatus>,
    /// Replace the coverage snapshot.
    pub coverage: Option<Coverage>,
    /// Attach classifier insights.
    pub insights: Option<AiInsights>,
    /// Replace the follow-up list.
    pub next_steps: Option<Vec<String>>,
    /// Append to the follow-up list (after any replacement).
    pub append_next_steps: Vec<String>,
    /// Record the back-link to a prior-auth request.
    pub prior_auth_ref: Option<PriorAuthId>,
}

impl VerificationUpdate {
    /// Apply this patch to `record` in place.
    pub fn apply(&self, record: &mut Verification) {
        if let Some(status) = self.status {
            record.status = status;
        }
        if let Some(coverage) = &self.coverage {
            record.coverage = coverage.clone();
        }
        if let Some(insights) = &self.insights {
            record.insights = Some(insights.clone());
        }
        if let Some(next_steps) = &self.next_steps {
            record.next_steps = next_steps.clone();
        }
        record
            .next_steps
            .extend(self.append_next_steps.iter().cloned());
        if let Some(prior_auth_ref) = self.prior_auth_ref {
            record.prior_auth_ref = Some(prior_auth_ref);
        }
    }
}

/// Verification persistence.
///
/// `update` is atomic per record: the store must apply the whole patch under
/// one lock. There are no cross-record transactions anywhere in the system.
pub trait VerificationStore: Send + Sync {
    /// Persist a new record and return its id.
    fn insert(&self, record: Verification) -> EligoResult<VerificationId>;

    /// Apply `patch` to the record and return the updated copy.
    fn update(&self, id: VerificationId, patch: VerificationUpdate) -> EligoResult<Verification>;

    /// Fetch one record.
    fn get(&self, id: VerificationId) -> EligoResult<Verification>;

    /// All records, newest first.
    fn list(&self) -> EligoResult<Vec<Verification>>;

    /// Delete records created before `cutoff`; returns how many were removed.
    ///
    /// Reserved for the retention sweep. Nothing else deletes verifications.
    fn purge_created_before(&self, cutoff: DateTime<Utc>) -> EligoResult<usize>;
}

/// A typed partial update for one prior-auth request.
#[derive(Debug, Clone, Default)]
pub struct PriorAuthUpdate {
    /// Replace the lifecycle status.
    pub status: Option<PriorAuthStatus>,
    /// Record the payer-issued authorization number.
    pub auth_number: Option<String>,
    /// Stamp the submission time.
    pub submitted_at: Option<DateTime<Utc>>,
    /// Attach or replace the payer's message.
    pub notes: Option<String>,
}

impl PriorAuthUpdate {
    /// Apply this patch to `request` in place.
    pub fn apply(&self, request: &mut PriorAuthRequest) {
        if let Some(status) = self.status {
            request.status = status;
        }
        if let Some(auth_number) = &self.auth_number {
            request.auth_number = Some(auth_number.clone());
        }
        if let Some(submitted_at) = self.submitted_at {
            request.submitted_at = Some(submitted_at);
        }
        if let Some(notes) = &self.notes {
            request.notes = Some(notes.clone());
        }
    }
}

/// Prior-authorization persistence. Same atomicity contract as
/// [`VerificationStore`].
pub trait PriorAuthStore: Send + Sync {
    /// Persist a new request and return its id.
    fn insert(&self, request: PriorAuthRequest) -> EligoResult<PriorAuthId>;

    /// Apply `patch` to the request and return the updated copy.
    fn update(&self, id: PriorAuthId, patch: PriorAuthUpdate) -> EligoResult<PriorAuthRequest>;

    /// Fetch one request.
    fn get(&self, id: PriorAuthId) -> EligoResult<PriorAuthRequest>;

    /// All requests, newest first.
    fn list(&self) -> EligoResult<Vec<PriorAuthRequest>>;

    /// Delete requests created before `cutoff`; returns how many were removed.
    fn purge_created_before(&self, cutoff: DateTime<Utc>) -> EligoResult<usize>;
}

/// The audit sink every operation reports into.
///
/// Callers are fire-and-forget: implementations absorb their own failures
/// (the audit log retries once, then dead-letters). Business operations
/// never fail because an audit write did.
pub trait AuditRecorder: Send + Sync {
    /// Record one entry.
    fn record(&self, entry: AuditEntry);
}

/// Best-effort announcement of a resolved verification.
///
/// Implementations must not propagate delivery failures; one broken channel
/// is never the lifecycle's problem.
pub trait Notifier: Send + Sync {
    /// Called exactly once per resolved submission, after the terminal
    /// status is persisted and audited.
    fn verification_resolved(&self, verification: &Verification);
}

/// Role/action allow decisions.
///
/// Pure and deterministic: no I/O, no logging, no auditing. The services
/// performing the action audit denied attempts themselves.
pub trait AccessPolicy: Send + Sync {
    /// Whether `role` may perform `action`. Deny-by-default.
    fn is_allowed(&self, role: Role, action: AuditAction) -> bool;
}

/// Transport to the payer for prior-auth submissions.
///
/// A transport error means the request never reached the payer; the
/// workflow leaves the request in its pre-submit state.
pub trait PayerChannel: Send + Sync {
    /// Submit the request and return the payer's determination.
    fn submit(&self, request: &PriorAuthRequest) -> EligoResult<PayerResponse>;
}

// ── Tests ────────────────────────────────────────────────────────────────────
