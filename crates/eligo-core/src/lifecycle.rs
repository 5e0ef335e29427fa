//! The verification lifecycle: the policy-bound submission pipeline.
//!
//! `submit()` drives one verification end to end:
//!
//!   Access → Validate → Persist pending → Classify → Resolve → Audit → Notify
//!
//! Two invariants are absolute:
//!
//! - a validation failure leaves no trace: nothing persisted, nothing audited
//! - every submission that reaches persistence resolves to a terminal status
//!   and produces exactly one `create` audit entry, classifier success or
//!   failure alike; a classifier failure becomes an `error`-status record,
//!   never an error to the caller

use std::sync::Arc;

use tracing::{debug, info, warn};

use eligo_contracts::{
    actor::Actor,
    audit::{AuditAction, AuditEntry, ResourceType},
    error::{EligoError, EligoResult},
    judgement::EligibilityJudgement,
    patient::PatientRecord,
    verification::{AiInsights, Coverage, Verification, VerificationId, VerificationStatus},
};

use crate::traits::{
    AccessPolicy, AuditRecorder, Classifier, Notifier, VerificationStore, VerificationUpdate,
};
use crate::validate::validate_patient;

/// Follow-up checklist attached when the classifier cannot be reached.
const FALLBACK_RECOMMENDATIONS: [&str; 3] = [
    "Contact insurance provider directly",
    "Verify patient information manually",
    "Retry verification later",
];

const FALLBACK_CLARIFICATION: &str = "Please confirm all insurance details are correct";

/// Column order of the verification history export.
const EXPORT_HEADER: &str = "Verification ID,Timestamp,Patient Name,Insurance Company,\
Policy Number,Status,Active Coverage,In Network,Copay,Deductible";

/// Per-status defaults used when a judgement carries no recommendations.
fn default_next_steps(status: VerificationStatus) -> Vec<String> {
    let steps: &[&str] = match status {
        VerificationStatus::Eligible => &[
            "Auto-confirm appointment",
            "Send confirmation to patient",
            "Update EHR record",
        ],
        VerificationStatus::Ineligible => &[
            "Contact patient about coverage",
            "Discuss payment options",
            "Reschedule if needed",
        ],
        VerificationStatus::RequiresAuth => &[
            "Initiate prior authorization",
            "Contact insurance provider",
            "Hold appointment pending approval",
        ],
        VerificationStatus::Error => &[
            "Manual verification required",
            "Contact clearinghouse support",
            "Retry verification",
        ],
        VerificationStatus::Pending => &[],
    };
    steps.iter().map(|s| s.to_string()).collect()
}

/// The service owning the verification lifecycle.
///
/// Construct one per deployment and share it; every collaborator sits behind
/// a trait object, so tests and the demo wire in scripted implementations.
pub struct VerificationService {
    store: Arc<dyn VerificationStore>,
    classifier: Box<dyn Classifier>,
    audit: Arc<dyn AuditRecorder>,
    notifier: Box<dyn Notifier>,
    access: Arc<dyn AccessPolicy>,
}

impl VerificationService {
    pub fn new(
        store: Arc<dyn VerificationStore>,
        classifier: Box<dyn Classifier>,
        audit: Arc<dyn AuditRecorder>,
        notifier: Box<dyn Notifier>,
        access: Arc<dyn AccessPolicy>,
    ) -> Self {
        Self {
            store,
            classifier,
            audit,
            notifier,
            access,
        }
    }

    /// Run one verification end to end.
    ///
    /// # Pipeline
    ///
    /// 1. Access check `create` — a denial is audited (`success=false`) and
    ///    returned as `EligoError::AccessDenied`
    /// 2. Validate the patient record — a failure returns
    ///    `EligoError::Validation` listing every violated field, with nothing
    ///    persisted and nothing audited
    /// 3. Persist a `pending` record
    /// 4. Classify — **only reachable after steps 1 & 2 pass**
    /// 5. Resolve: on a judgement, map it to status/coverage/insights and
    ///    patch the record atomically; on a classifier failure, patch to
    ///    `error` status with the manual-review checklist (the failure is
    ///    absorbed, never propagated)
    /// 6. Audit exactly one `create` entry (`success=true`)
    /// 7. Hand the resolved record to the notifier (best-effort)
    ///
    /// # Errors
    ///
    /// `AccessDenied`, `Validation`, and store failures. Classifier failures
    /// are NOT errors — they resolve the verification to `error` status.
    pub fn submit(&self, actor: &Actor, patient: PatientRecord) -> EligoResult<Verification> {
        // ── Step 1: Access check ─────────────────────────────────────────────
        self.check_access(actor, AuditAction::Create, "new")?;

        // ── Step 2: Validation ───────────────────────────────────────────────
        //
        // Nothing is persisted or audited past this point unless the record
        // is clean.
        validate_patient(&patient)?;

        // ── Step 3: Persist pending ──────────────────────────────────────────
        let record = Verification::pending(patient);
        let id = self.store.insert(record.clone())?;
        debug!(verification_id = %id, "pending verification persisted");

        // ── Steps 4 & 5: Classify and resolve ────────────────────────────────
        //
        // This is the only call site for the classifier in the runtime.
        let resolved = match self.classifier.classify(&record.patient) {
            Ok(judgement) => self.resolve_with_judgement(id, judgement)?,
            Err(cause) => self.resolve_with_fallback(id, &cause)?,
        };

        // ── Step 6: Audit the resolved submission ────────────────────────────
        self.audit.record(AuditEntry::success(
            actor,
            AuditAction::Create,
            ResourceType::Verification,
            resolved.id.to_string(),
        ));

        info!(
            verification_id = %resolved.id,
            status = %resolved.status,
            "verification resolved"
        );

        // ── Step 7: Notify (best-effort) ─────────────────────────────────────
        self.notifier.verification_resolved(&resolved);

        Ok(resolved)
    }

    /// Fetch one verification. Access-checked and audited.
    pub fn verification(&self, actor: &Actor, id: VerificationId) -> EligoResult<Verification> {
        self.check_access(actor, AuditAction::View, &id.to_string())?;
        let found = self.store.get(id)?;
        self.audit.record(AuditEntry::success(
            actor,
            AuditAction::View,
            ResourceType::Verification,
            id.to_string(),
        ));
        Ok(found)
    }

    /// All verifications, newest first. Access-checked and audited.
    pub fn list_verifications(&self, actor: &Actor) -> EligoResult<Vec<Verification>> {
        self.check_access(actor, AuditAction::View, "all")?;
        let records = self.store.list()?;
        self.audit.record(AuditEntry::success(
            actor,
            AuditAction::View,
            ResourceType::Verification,
            "all",
        ));
        Ok(records)
    }

    /// Export the verification history as CSV, newest first.
    ///
    /// The export carries raw policy numbers; that is exactly what the
    /// `export` permission gates, and the export itself is audited.
    pub fn export_csv(&self, actor: &Actor) -> EligoResult<String> {
        self.check_access(actor, AuditAction::Export, "all")?;

        let records = self.store.list()?;
        let mut csv = String::from(EXPORT_HEADER);
        csv.push('\n');
        for record in &records {
            let row = [
                record.id.to_string(),
                record.created_at.to_rfc3339(),
                record.patient.full_name(),
                record.patient.insurance_company.clone(),
                record.patient.policy_number.clone(),
                record.status.as_str().to_string(),
                yes_no(record.coverage.active),
                yes_no(record.coverage.in_network),
                amount_or_na(record.coverage.copay),
                amount_or_na(record.coverage.deductible),
            ];
            let fields: Vec<String> = row.iter().map(|f| csv_field(f)).collect();
            csv.push_str(&fields.join(","));
            csv.push('\n');
        }

        self.audit.record(AuditEntry::success(
            actor,
            AuditAction::Export,
            ResourceType::Verification,
            "all",
        ));

        info!(rows = records.len(), "verification history exported");
        Ok(csv)
    }

    /// Map a judgement onto the stored record in one atomic patch.
    fn resolve_with_judgement(
        &self,
        id: VerificationId,
        judgement: EligibilityJudgement,
    ) -> EligoResult<Verification> {
        let EligibilityJudgement {
            status,
            coverage,
            reasoning,
            recommendations,
            clarifying_questions,
        } = judgement;

        // Authorization outranks the claimed status: an "eligible" judgement
        // with prior auth required still needs the authorization first.
        let status = if coverage.prior_auth_required && status == VerificationStatus::Eligible {
            debug!(verification_id = %id, "eligible judgement needs prior auth, normalizing");
            VerificationStatus::RequiresAuth
        } else {
            status
        };

        let next_steps = if recommendations.is_empty() {
            default_next_steps(status)
        } else {
            recommendations.clone()
        };

        let patch = VerificationUpdate {
            status: Some(status),
            coverage: Some(Coverage::from(coverage)),
            insights: Some(AiInsights {
                reasoning,
                recommendations,
                clarifying_questions,
            }),
            next_steps: Some(next_steps),
            ..Default::default()
        };
        self.store.update(id, patch)
    }

    /// Absorb a classifier failure into an `error`-status record.
    fn resolve_with_fallback(
        &self,
        id: VerificationId,
        cause: &EligoError,
    ) -> EligoResult<Verification> {
        warn!(
            verification_id = %id,
            error = %cause,
            "classifier unavailable, resolving to error status"
        );

        let recommendations: Vec<String> = FALLBACK_RECOMMENDATIONS
            .iter()
            .map(|s| s.to_string())
            .collect();
        let patch = VerificationUpdate {
            status: Some(VerificationStatus::Error),
            coverage: Some(Coverage::inactive()),
            insights: Some(AiInsights {
                reasoning: format!(
                    "AI verification temporarily unavailable: {}. Manual verification recommended.",
                    cause
                ),
                recommendations: recommendations.clone(),
                clarifying_questions: vec![FALLBACK_CLARIFICATION.to_string()],
            }),
            next_steps: Some(recommendations),
            ..Default::default()
        };
        self.store.update(id, patch)
    }

    /// Check `actor` against the access policy; audit and error on denial.
    fn check_access(&self, actor: &Actor, action: AuditAction, resource_id: &str) -> EligoResult<()> {
        if self.access.is_allowed(actor.role, action) {
            return Ok(());
        }

        warn!(
            actor = %actor.id,
            role = %actor.role,
            action = %action,
            "access denied"
        );

        let err = EligoError::AccessDenied {
            role: actor.role.to_string(),
            action: action.to_string(),
        };
        self.audit.record(AuditEntry::failure(
            actor,
            action,
            ResourceType::Verification,
            resource_id,
            err.to_string(),
        ));
        Err(err)
    }
}

fn yes_no(value: bool) -> String {
    if value { "Yes" } else { "No" }.to_string()
}

fn amount_or_na(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{:.2}", v))
}

/// Quote a field that contains a delimiter, quote, or newline.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use chrono::NaiveDate;

    use eligo_contracts::{
        actor::{Actor, Role},
        audit::{AuditAction, AuditEntry},
        error::{EligoError, EligoResult},
        judgement::{EligibilityJudgement, JudgementCoverage},
        patient::PatientRecord,
        verification::{Verification, VerificationId, VerificationStatus},
    };

    use crate::traits::{
        AccessPolicy, AuditRecorder, Classifier, Notifier, VerificationStore, VerificationUpdate,
    };

    use super::VerificationService;

    // ── Mock helpers ─────────────────────────────────────────────────────────

    fn valid_patient() -> PatientRecord {
        PatientRecord {
            first_name: "Maria".to_string(),
            last_name: "Santos".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1985, 3, 14).unwrap(),
            insurance_company: "Blue Shield".to_string(),
            policy_number: "AB12345678".to_string(),
            member_id: "M-99001".to_string(),
            group_number: None,
            subscriber_name: None,
        }
    }

    fn invalid_patient() -> PatientRecord {
        PatientRecord {
            policy_number: "!".to_string(),
            ..valid_patient()
        }
    }

    fn eligible_judgement() -> EligibilityJudgement {
        EligibilityJudgement {
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
            reasoning: "Active policy, provider in network".to_string(),
            recommendations: vec![],
            clarifying_questions: vec![],
        }
    }

    /// An in-memory store that also counts updates.
    struct MockStore {
        records: Arc<Mutex<Vec<Verification>>>,
    }

    impl MockStore {
        fn new() -> Self {
            Self {
                records: Arc::new(Mutex::new(vec![])),
            }
        }
    }

    impl VerificationStore for MockStore {
        fn insert(&self, record: Verification) -> EligoResult<VerificationId> {
            let id = record.id;
            self.records.lock().unwrap().push(record);
            Ok(id)
        }

        fn update(
            &self,
            id: VerificationId,
            patch: VerificationUpdate,
        ) -> EligoResult<Verification> {
            let mut records = self.records.lock().unwrap();
            let record = records
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or_else(|| EligoError::NotFound {
                    resource: "verification".to_string(),
                    id: id.to_string(),
                })?;
            patch.apply(record);
            Ok(record.clone())
        }

        fn get(&self, id: VerificationId) -> EligoResult<Verification> {
            self.records
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.id == id)
                .cloned()
                .ok_or_else(|| EligoError::NotFound {
                    resource: "verification".to_string(),
                    id: id.to_string(),
                })
        }

        fn list(&self) -> EligoResult<Vec<Verification>> {
            let mut records = self.records.lock().unwrap().clone();
            records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(records)
        }

        fn purge_created_before(
            &self,
            cutoff: chrono::DateTime<chrono::Utc>,
        ) -> EligoResult<usize> {
            let mut records = self.records.lock().unwrap();
            let before = records.len();
            records.retain(|r| r.created_at >= cutoff);
            Ok(before - records.len())
        }
    }

    /// A classifier that replays a scripted queue and counts calls.
    struct MockClassifier {
        script: Mutex<Vec<EligoResult<EligibilityJudgement>>>,
        calls: Arc<Mutex<u32>>,
    }

    impl MockClassifier {
        fn scripted(results: Vec<EligoResult<EligibilityJudgement>>) -> Self {
            Self {
                script: Mutex::new(results),
                calls: Arc::new(Mutex::new(0)),
            }
        }
    }

    impl Classifier for MockClassifier {
        fn classify(&self, _patient: &PatientRecord) -> EligoResult<EligibilityJudgement> {
            *self.calls.lock().unwrap() += 1;
            self.script
                .lock()
                .unwrap()
                .pop()
                .expect("classifier called beyond its script")
        }
    }

    /// An audit recorder that keeps every entry for inspection.
    struct MockAudit {
        entries: Arc<Mutex<Vec<AuditEntry>>>,
    }

    impl MockAudit {
        fn new() -> Self {
            Self {
                entries: Arc::new(Mutex::new(vec![])),
            }
        }
    }

    impl AuditRecorder for MockAudit {
        fn record(&self, entry: AuditEntry) {
            self.entries.lock().unwrap().push(entry);
        }
    }

    /// A notifier that records each resolved verification it was handed.
    struct MockNotifier {
        resolved: Arc<Mutex<Vec<Verification>>>,
    }

    impl MockNotifier {
        fn new() -> Self {
            Self {
                resolved: Arc::new(Mutex::new(vec![])),
            }
        }
    }

    impl Notifier for MockNotifier {
        fn verification_resolved(&self, verification: &Verification) {
            self.resolved.lock().unwrap().push(verification.clone());
        }
    }

    struct AllowAll;

    impl AccessPolicy for AllowAll {
        fn is_allowed(&self, _role: Role, _action: AuditAction) -> bool {
            true
        }
    }

    struct DenyAll;

    impl AccessPolicy for DenyAll {
        fn is_allowed(&self, _role: Role, _action: AuditAction) -> bool {
            false
        }
    }

    struct Harness {
        service: VerificationService,
        records: Arc<Mutex<Vec<Verification>>>,
        classifier_calls: Arc<Mutex<u32>>,
        audit_entries: Arc<Mutex<Vec<AuditEntry>>>,
        notified: Arc<Mutex<Vec<Verification>>>,
    }

    fn harness(
        script: Vec<EligoResult<EligibilityJudgement>>,
        access: Arc<dyn AccessPolicy>,
    ) -> Harness {
        let store = MockStore::new();
        let records = store.records.clone();
        let classifier = MockClassifier::scripted(script);
        let classifier_calls = classifier.calls.clone();
        let audit = MockAudit::new();
        let audit_entries = audit.entries.clone();
        let notifier = MockNotifier::new();
        let notified = notifier.resolved.clone();

        let service = VerificationService::new(
            Arc::new(store),
            Box::new(classifier),
            Arc::new(audit),
            Box::new(notifier),
            access,
        );

        Harness {
            service,
            records,
            classifier_calls,
            audit_entries,
            notified,
        }
    }

    fn staff() -> Actor {
        Actor::system("reception.desk", Role::Staff)
    }

    // ── Test cases ────────────────────────────────────────────────────────────

    /// Happy path: a clean judgement resolves the record, audits once, and
    /// notifies once.
    #[test]
    fn test_submit_resolves_eligible() {
        let h = harness(vec![Ok(eligible_judgement())], Arc::new(AllowAll));

        let resolved = h.service.submit(&staff(), valid_patient()).unwrap();

        assert_eq!(resolved.status, VerificationStatus::Eligible);
        assert!(resolved.coverage.active);
        assert_eq!(resolved.coverage.copay, Some(25.0));
        // Empty judgement recommendations fall back to the status defaults.
        assert_eq!(
            resolved.next_steps,
            vec![
                "Auto-confirm appointment",
                "Send confirmation to patient",
                "Update EHR record",
            ]
        );

        // Exactly one audit entry, for the create, successful.
        let entries = h.audit_entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, AuditAction::Create);
        assert!(entries[0].success);

        // The notifier saw the resolved record exactly once.
        let notified = h.notified.lock().unwrap();
        assert_eq!(notified.len(), 1);
        assert_eq!(notified[0].status, VerificationStatus::Eligible);
    }

    /// submit() never hands back a pending record.
    #[test]
    fn test_submit_always_returns_terminal_status() {
        let h = harness(vec![Ok(eligible_judgement())], Arc::new(AllowAll));
        let resolved = h.service.submit(&staff(), valid_patient()).unwrap();
        assert!(resolved.status.is_terminal());

        // The stored copy is terminal too.
        let records = h.records.lock().unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].status.is_terminal());
    }

    /// An eligible judgement with prior auth required is normalized to
    /// requires_auth: authorization comes before eligibility.
    #[test]
    fn test_eligible_with_prior_auth_is_normalized() {
        let mut judgement = eligible_judgement();
        judgement.coverage.prior_auth_required = true;

        let h = harness(vec![Ok(judgement)], Arc::new(AllowAll));
        let resolved = h.service.submit(&staff(), valid_patient()).unwrap();

        assert_eq!(resolved.status, VerificationStatus::RequiresAuth);
        assert!(resolved.coverage.prior_auth_required);
    }

    /// Judgement recommendations, when present, become the next steps.
    #[test]
    fn test_judgement_recommendations_become_next_steps() {
        let mut judgement = eligible_judgement();
        judgement.recommendations = vec!["Collect $25 copay at check-in".to_string()];

        let h = harness(vec![Ok(judgement)], Arc::new(AllowAll));
        let resolved = h.service.submit(&staff(), valid_patient()).unwrap();

        assert_eq!(resolved.next_steps, vec!["Collect $25 copay at check-in"]);
        let insights = resolved.insights.unwrap();
        assert_eq!(insights.recommendations, vec!["Collect $25 copay at check-in"]);
    }

    /// Core atomicity test: a validation failure leaves no trace anywhere,
    /// and the classifier is never called.
    #[test]
    fn test_validation_failure_leaves_no_trace() {
        let h = harness(vec![], Arc::new(AllowAll));

        let result = h.service.submit(&staff(), invalid_patient());

        match result {
            Err(EligoError::Validation { violations }) => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].field, "policy_number");
            }
            other => panic!("expected Validation, got {:?}", other),
        }

        assert!(h.records.lock().unwrap().is_empty(), "nothing persisted");
        assert!(h.audit_entries.lock().unwrap().is_empty(), "nothing audited");
        assert!(h.notified.lock().unwrap().is_empty(), "nothing notified");
        assert_eq!(*h.classifier_calls.lock().unwrap(), 0, "classifier untouched");
    }

    /// A classifier failure is absorbed: the caller still gets Ok, the record
    /// resolves to error status with the manual-review checklist, and the
    /// audit/notification side effects fire exactly as on success.
    #[test]
    fn test_classifier_failure_resolves_to_error_status() {
        let h = harness(
            vec![Err(EligoError::RateLimitExceeded {
                reason: "429 after 3 attempts".to_string(),
            })],
            Arc::new(AllowAll),
        );

        let resolved = h.service.submit(&staff(), valid_patient()).unwrap();

        assert_eq!(resolved.status, VerificationStatus::Error);
        assert!(!resolved.coverage.active);
        let insights = resolved.insights.expect("fallback insights attached");
        assert!(insights.reasoning.contains("rate limit"));
        assert!(insights.reasoning.contains("Manual verification recommended"));
        assert_eq!(
            resolved.next_steps,
            vec![
                "Contact insurance provider directly",
                "Verify patient information manually",
                "Retry verification later",
            ]
        );

        // Same side-effect accounting as the happy path.
        assert_eq!(h.audit_entries.lock().unwrap().len(), 1);
        assert!(h.audit_entries.lock().unwrap()[0].success);
        assert_eq!(h.notified.lock().unwrap().len(), 1);
    }

    /// Core security test: an access denial must prevent validation,
    /// persistence, and classification, and must itself be audited.
    #[test]
    fn test_access_denial_blocks_and_audits() {
        let h = harness(vec![], Arc::new(DenyAll));

        let result = h.service.submit(&staff(), valid_patient());

        match result {
            Err(EligoError::AccessDenied { role, action }) => {
                assert_eq!(role, "staff");
                assert_eq!(action, "create");
            }
            other => panic!("expected AccessDenied, got {:?}", other),
        }

        assert!(h.records.lock().unwrap().is_empty());
        assert_eq!(*h.classifier_calls.lock().unwrap(), 0);

        // The denial itself is on the audit record.
        let entries = h.audit_entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert!(!entries[0].success);
        assert!(entries[0]
            .error_message
            .as_deref()
            .unwrap()
            .contains("access denied"));
    }

    /// Reads are access-checked and audited.
    #[test]
    fn test_view_is_audited() {
        let h = harness(vec![Ok(eligible_judgement())], Arc::new(AllowAll));
        let resolved = h.service.submit(&staff(), valid_patient()).unwrap();

        let fetched = h.service.verification(&staff(), resolved.id).unwrap();
        assert_eq!(fetched.id, resolved.id);

        let entries = h.audit_entries.lock().unwrap();
        // One create for the submission, one view for the read.
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].action, AuditAction::View);
        assert!(entries[1].success);
    }

    /// Fetching a missing record is a NotFound, not a panic.
    #[test]
    fn test_missing_verification_is_not_found() {
        let h = harness(vec![], Arc::new(AllowAll));
        let result = h.service.verification(&staff(), VerificationId::new());
        assert!(matches!(result, Err(EligoError::NotFound { .. })));
    }

    /// The CSV export carries one row per record under the documented header.
    #[test]
    fn test_export_csv_lists_every_record() {
        let h = harness(vec![Ok(eligible_judgement())], Arc::new(AllowAll));
        h.service.submit(&staff(), valid_patient()).unwrap();

        let csv = h.service.export_csv(&staff()).unwrap();

        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Verification ID,Timestamp,Patient Name,Insurance Company,\
             Policy Number,Status,Active Coverage,In Network,Copay,Deductible"
        );
        let row = lines.next().unwrap();
        assert!(row.contains("Maria Santos"), "row: {row}");
        assert!(row.contains("AB12345678"));
        assert!(row.contains("eligible"));
        assert!(row.contains("25.00"));
        assert!(lines.next().is_none());

        // One create for the submission, one export, both successful.
        let entries = h.audit_entries.lock().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].action, AuditAction::Export);
        assert!(entries[1].success);
    }

    /// A denied export hands nothing back and is audited with success=false.
    #[test]
    fn test_denied_export_is_audited() {
        let h = harness(vec![], Arc::new(DenyAll));

        let result = h.service.export_csv(&staff());

        assert!(matches!(result, Err(EligoError::AccessDenied { .. })));
        let entries = h.audit_entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, AuditAction::Export);
        assert!(!entries[0].success);
    }
}
