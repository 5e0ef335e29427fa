//! Verification records and their lifecycle status.
//!
//! A verification is created `pending`, resolved exactly once to a terminal
//! status by the classifier, and thereafter revised only by the prior-auth
//! workflow. Records are deleted only by the retention sweep.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{patient::PatientRecord, priorauth::PriorAuthId};

/// Unique identifier for a verification record.
///
/// Appears in audit entries, notifications, and deep links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VerificationId(pub uuid::Uuid);

impl VerificationId {
    /// Create a new, unique verification ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for VerificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for VerificationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Lifecycle status of a verification.
///
/// `Pending` exists only between record creation and classification; every
/// other status is terminal unless the prior-auth workflow revises it
/// (`RequiresAuth` becomes `Eligible` on payer approval).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    /// Created, classification not yet finished.
    Pending,
    /// Coverage is active and the service needs no further authorization.
    Eligible,
    /// Coverage is inactive or the service is not covered.
    Ineligible,
    /// Coverage is active but the payer requires prior authorization.
    RequiresAuth,
    /// Classification could not complete; manual verification is required.
    Error,
}

impl VerificationStatus {
    /// The wire/storage spelling (snake_case), also used in log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Eligible => "eligible",
            Self::Ineligible => "ineligible",
            Self::RequiresAuth => "requires_auth",
            Self::Error => "error",
        }
    }

    /// Whether classification has finished for this record.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coverage facts extracted from the classifier's judgement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coverage {
    /// Whether the policy is active on the date of service.
    pub active: bool,
    /// Whether the practice is in the plan's network.
    pub in_network: bool,
    /// First day the policy is effective, when known.
    pub effective_date: Option<NaiveDate>,
    /// Last day the policy is effective, when known.
    pub termination_date: Option<NaiveDate>,
    /// Patient copay in dollars, when known. Never negative.
    pub copay: Option<f64>,
    /// Remaining deductible in dollars, when known. Never negative.
    pub deductible: Option<f64>,
    /// Whether the payer requires prior authorization for the service.
    ///
    /// When true, the verification status is `requires_auth` until the
    /// prior-auth workflow obtains approval.
    pub prior_auth_required: bool,
}

impl Coverage {
    /// The all-inactive snapshot used while pending and on classifier failure.
    pub fn inactive() -> Self {
        Self {
            active: false,
            in_network: false,
            effective_date: None,
            termination_date: None,
            copay: None,
            deductible: None,
            prior_auth_required: false,
        }
    }
}

/// The classifier's explanation of its judgement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiInsights {
    /// Narrative reasoning behind the status.
    pub reasoning: String,
    /// Suggested follow-up actions.
    pub recommendations: Vec<String>,
    /// Questions the front desk should resolve with the patient or payer.
    pub clarifying_questions: Vec<String>,
}

/// One eligibility verification: the patient checked, the outcome, and the
/// follow-up trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verification {
    /// Unique record identifier.
    pub id: VerificationId,
    /// Wall-clock creation time (UTC).
    pub created_at: DateTime<Utc>,
    /// The patient and insurance facts this verification was run against.
    pub patient: PatientRecord,
    /// Current lifecycle status.
    pub status: VerificationStatus,
    /// Coverage snapshot. `Coverage::inactive()` until classification succeeds.
    pub coverage: Coverage,
    /// Ordered follow-up actions for the front desk.
    pub next_steps: Vec<String>,
    /// Classifier reasoning, absent until classification produces one.
    pub insights: Option<AiInsights>,
    /// Back-link to the prior-auth request opened for this verification, if any.
    pub prior_auth_ref: Option<PriorAuthId>,
}

impl Verification {
    /// A fresh `pending` record for `patient`, awaiting classification.
    pub fn pending(patient: PatientRecord) -> Self {
        Self {
            id: VerificationId::new(),
            created_at: Utc::now(),
            patient,
            status: VerificationStatus::Pending,
            coverage: Coverage::inactive(),
            next_steps: Vec::new(),
            insights: None,
            prior_auth_ref: None,
        }
    }
}
