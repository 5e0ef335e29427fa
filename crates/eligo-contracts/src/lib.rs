//! # eligo-contracts
//!
//! Shared domain types and the error taxonomy for the Eligo verification
//! system.
//!
//! Every crate in the workspace imports from here. No business logic lives
//! in this crate — only data definitions and error types.

pub mod actor;
pub mod audit;
pub mod error;
pub mod judgement;
pub mod patient;
pub mod priorauth;
pub mod verification;

#[cfg(test)]
mod tests {
    use super::*;
    use actor::{Actor, Role};
    use audit::{AuditAction, AuditEntry, ResourceType};
    use chrono::NaiveDate;
    use error::{EligoError, FieldViolation};
    use judgement::{EligibilityJudgement, JudgementCoverage};
    use patient::PatientRecord;
    use priorauth::{PriorAuthRequest, PriorAuthStatus, Urgency};
    use verification::{Coverage, Verification, VerificationId, VerificationStatus};

    fn sample_patient() -> PatientRecord {
        PatientRecord {
            first_name: "Maria".to_string(),
            last_name: "Santos".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1985, 3, 14).unwrap(),
            insurance_company: "Blue Shield".to_string(),
            policy_number: "AB12345678".to_string(),
            member_id: "M-99001".to_string(),
            group_number: Some("GRP-42".to_string()),
            subscriber_name: None,
        }
    }

    // ── VerificationStatus ───────────────────────────────────────────────────

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&VerificationStatus::RequiresAuth).unwrap();
        assert_eq!(json, "\"requires_auth\"");
    }

    #[test]
    fn status_round_trips() {
        for status in [
            VerificationStatus::Pending,
            VerificationStatus::Eligible,
            VerificationStatus::Ineligible,
            VerificationStatus::RequiresAuth,
            VerificationStatus::Error,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            let decoded: VerificationStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(status, decoded);
        }
    }

    #[test]
    fn only_pending_is_non_terminal() {
        assert!(!VerificationStatus::Pending.is_terminal());
        assert!(VerificationStatus::Eligible.is_terminal());
        assert!(VerificationStatus::Ineligible.is_terminal());
        assert!(VerificationStatus::RequiresAuth.is_terminal());
        assert!(VerificationStatus::Error.is_terminal());
    }

    // ── Verification construction ────────────────────────────────────────────

    #[test]
    fn pending_verification_starts_empty() {
        let v = Verification::pending(sample_patient());
        assert_eq!(v.status, VerificationStatus::Pending);
        assert_eq!(v.coverage, Coverage::inactive());
        assert!(v.next_steps.is_empty());
        assert!(v.insights.is_none());
        assert!(v.prior_auth_ref.is_none());
    }

    #[test]
    fn inactive_coverage_is_all_false() {
        let cov = Coverage::inactive();
        assert!(!cov.active);
        assert!(!cov.in_network);
        assert!(!cov.prior_auth_required);
        assert!(cov.copay.is_none());
        assert!(cov.deductible.is_none());
    }

    #[test]
    fn verification_ids_are_unique() {
        let ids: std::collections::HashSet<String> = (0..100)
            .map(|_| VerificationId::new().to_string())
            .collect();
        assert_eq!(ids.len(), 100);
    }

    // ── Prior authorization ──────────────────────────────────────────────────

    #[test]
    fn new_prior_auth_request_starts_pending() {
        let req = PriorAuthRequest::new(
            VerificationId::new(),
            "MRI lumbar spine",
            Urgency::Routine,
            "Chronic low back pain, 8 weeks conservative therapy failed",
            "dr.lee",
        );
        assert_eq!(req.status, PriorAuthStatus::Pending);
        assert!(req.auth_number.is_none());
        assert!(req.submitted_at.is_none());
        assert!(req.notes.is_none());
    }

    #[test]
    fn only_payer_answers_are_terminal() {
        assert!(!PriorAuthStatus::Pending.is_terminal());
        assert!(!PriorAuthStatus::Submitted.is_terminal());
        assert!(!PriorAuthStatus::MoreInfoNeeded.is_terminal());
        assert!(PriorAuthStatus::Approved.is_terminal());
        assert!(PriorAuthStatus::Denied.is_terminal());
    }

    #[test]
    fn urgency_round_trips() {
        for urgency in [Urgency::Routine, Urgency::Urgent, Urgency::Stat] {
            let json = serde_json::to_string(&urgency).unwrap();
            let decoded: Urgency = serde_json::from_str(&json).unwrap();
            assert_eq!(urgency, decoded);
        }
    }

    // ── Audit entries ────────────────────────────────────────────────────────

    #[test]
    fn success_entry_has_no_error_message() {
        let actor = Actor::system("reception.desk", Role::Staff);
        let entry = AuditEntry::success(
            &actor,
            AuditAction::Create,
            ResourceType::Verification,
            "v-1",
        );
        assert!(entry.success);
        assert!(entry.error_message.is_none());
        assert_eq!(entry.actor, "reception.desk");
    }

    #[test]
    fn failure_entry_carries_the_error() {
        let actor = Actor::system("viewer", Role::User);
        let entry = AuditEntry::failure(
            &actor,
            AuditAction::Export,
            ResourceType::Verification,
            "v-1",
            "role 'user' may not perform 'export'",
        );
        assert!(!entry.success);
        assert_eq!(
            entry.error_message.as_deref(),
            Some("role 'user' may not perform 'export'")
        );
    }

    // ── Judgement wire format ────────────────────────────────────────────────

    #[test]
    fn judgement_uses_camel_case_keys() {
        let judgement = EligibilityJudgement {
            status: VerificationStatus::Eligible,
            coverage: JudgementCoverage {
                active: true,
                in_network: true,
                effective_date: NaiveDate::from_ymd_opt(2024, 1, 1),
                termination_date: None,
                copay: Some(25.0),
                deductible: Some(1500.0),
                prior_auth_required: false,
            },
            reasoning: "Active policy, in network".to_string(),
            recommendations: vec![],
            clarifying_questions: vec![],
        };
        let json = serde_json::to_value(&judgement).unwrap();
        assert!(json.get("clarifyingQuestions").is_some());
        assert!(json["coverage"].get("priorAuthRequired").is_some());
        assert!(json["coverage"].get("inNetwork").is_some());
    }

    #[test]
    fn judgement_coverage_converts_losslessly() {
        let judged = JudgementCoverage {
            active: true,
            in_network: false,
            effective_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            termination_date: NaiveDate::from_ymd_opt(2024, 12, 31),
            copay: Some(40.0),
            deductible: None,
            prior_auth_required: true,
        };
        let coverage = Coverage::from(judged.clone());
        assert_eq!(coverage.active, judged.active);
        assert_eq!(coverage.in_network, judged.in_network);
        assert_eq!(coverage.copay, judged.copay);
        assert_eq!(coverage.prior_auth_required, judged.prior_auth_required);
    }

    // ── Error display ────────────────────────────────────────────────────────

    #[test]
    fn validation_error_lists_every_field() {
        let err = EligoError::Validation {
            violations: vec![
                FieldViolation::new("policy_number", "must be 3-20 alphanumeric characters"),
                FieldViolation::new("date_of_birth", "must be in the past"),
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("policy_number"));
        assert!(msg.contains("date_of_birth"));
    }

    #[test]
    fn access_denied_display_names_role_and_action() {
        let err = EligoError::AccessDenied {
            role: "user".to_string(),
            action: "export".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'user'"));
        assert!(msg.contains("'export'"));
    }

    #[test]
    fn not_found_display_names_resource_and_id() {
        let err = EligoError::NotFound {
            resource: "verification".to_string(),
            id: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "verification not found: abc");
    }

    #[test]
    fn rate_limit_display() {
        let err = EligoError::RateLimitExceeded {
            reason: "429 after 3 attempts".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("rate limit"));
        assert!(msg.contains("3 attempts"));
    }
}
