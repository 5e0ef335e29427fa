//! Prior authorization requests.
//!
//! Opened when a verification resolves to `requires_auth`. The request
//! advances `pending → submitted → {approved | denied | more_info_needed}`;
//! only the payer's answer (or a staff-recorded denial) makes it terminal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::verification::VerificationId;

/// Unique identifier for a prior authorization request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriorAuthId(pub uuid::Uuid);

impl PriorAuthId {
    /// Create a new, unique prior-auth ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for PriorAuthId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PriorAuthId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// How quickly the payer must answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    /// Standard turnaround.
    Routine,
    /// Expedited review requested.
    Urgent,
    /// Immediate clinical need.
    Stat,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Routine => "routine",
            Self::Urgent => "urgent",
            Self::Stat => "stat",
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a prior authorization request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorAuthStatus {
    /// Created, not yet sent to the payer.
    Pending,
    /// Sent; awaiting the payer's determination.
    Submitted,
    /// Payer approved. Terminal.
    Approved,
    /// Payer issued a final denial. Terminal.
    Denied,
    /// Payer wants more information before deciding. Resubmittable.
    MoreInfoNeeded,
}

impl PriorAuthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Submitted => "submitted",
            Self::Approved => "approved",
            Self::Denied => "denied",
            Self::MoreInfoNeeded => "more_info_needed",
        }
    }

    /// Whether the payer has given a final answer.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Denied)
    }
}

impl std::fmt::Display for PriorAuthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One prior authorization request tied to a verification.
///
/// `verification_id` is a weak reference: lookups only, never a lifetime
/// dependency. Deleting the verification leaves the request intact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorAuthRequest {
    /// Unique record identifier.
    pub id: PriorAuthId,
    /// The verification that required this authorization.
    pub verification_id: VerificationId,
    /// Procedure or service needing authorization.
    pub service_requested: String,
    /// Requested turnaround.
    pub urgency: Urgency,
    /// Clinical justification for the service. Never empty.
    pub clinical_justification: String,
    /// Staff member who opened the request.
    pub requested_by: String,
    /// Current lifecycle status.
    pub status: PriorAuthStatus,
    /// Payer-issued authorization number, present once approved.
    pub auth_number: Option<String>,
    /// Wall-clock creation time (UTC).
    pub created_at: DateTime<Utc>,
    /// When the request was last sent to the payer, if ever.
    pub submitted_at: Option<DateTime<Utc>>,
    /// Payer message attached on non-approval outcomes.
    pub notes: Option<String>,
}

impl PriorAuthRequest {
    /// A fresh `pending` request, not yet submitted to the payer.
    pub fn new(
        verification_id: VerificationId,
        service_requested: impl Into<String>,
        urgency: Urgency,
        clinical_justification: impl Into<String>,
        requested_by: impl Into<String>,
    ) -> Self {
        Self {
            id: PriorAuthId::new(),
            verification_id,
            service_requested: service_requested.into(),
            urgency,
            clinical_justification: clinical_justification.into(),
            requested_by: requested_by.into(),
            status: PriorAuthStatus::Pending,
            auth_number: None,
            created_at: Utc::now(),
            submitted_at: None,
            notes: None,
        }
    }
}

/// The payer's answer to a submission, as received on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayerResponse {
    /// Whether the payer approved the request.
    pub approved: bool,
    /// Authorization number, when the payer issued one.
    pub auth_number: Option<String>,
    /// Payer's message: approval note, or what is missing.
    pub message: String,
}
