//! The classifier's judgement: what the AI gateway hands to the lifecycle.
//!
//! Wire keys are camelCase, matching the response-format contract embedded
//! in the prompt. `clarifyingQuestions` also accepts the legacy
//! `additionalQuestions` spelling.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::verification::{Coverage, VerificationStatus};

/// Coverage facts as the classifier reports them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JudgementCoverage {
    /// Whether the policy is active on the date of service.
    pub active: bool,
    /// Whether the practice is in the plan's network.
    pub in_network: bool,
    #[serde(default)]
    pub effective_date: Option<NaiveDate>,
    #[serde(default)]
    pub termination_date: Option<NaiveDate>,
    /// Copay in dollars. The judgement schema rejects negative values.
    #[serde(default)]
    pub copay: Option<f64>,
    /// Remaining deductible in dollars. Never negative.
    #[serde(default)]
    pub deductible: Option<f64>,
    /// Whether the payer requires prior authorization.
    pub prior_auth_required: bool,
}

impl From<JudgementCoverage> for Coverage {
    fn from(judged: JudgementCoverage) -> Self {
        Self {
            active: judged.active,
            in_network: judged.in_network,
            effective_date: judged.effective_date,
            termination_date: judged.termination_date,
            copay: judged.copay,
            deductible: judged.deductible,
            prior_auth_required: judged.prior_auth_required,
        }
    }
}

/// A parsed, schema-validated eligibility judgement.
///
/// `status` is never `Pending` here: the judgement schema only admits the
/// four resolved statuses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityJudgement {
    /// The judged status.
    pub status: VerificationStatus,
    /// Coverage facts backing the status.
    pub coverage: JudgementCoverage,
    /// Narrative reasoning behind the status.
    pub reasoning: String,
    /// Suggested follow-up actions, possibly empty.
    #[serde(default)]
    pub recommendations: Vec<String>,
    /// Questions to resolve with the patient or payer.
    #[serde(default, alias = "additionalQuestions")]
    pub clarifying_questions: Vec<String>,
}
