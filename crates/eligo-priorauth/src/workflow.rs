//! The prior authorization workflow.
//!
//! A request is opened against a verification that resolved to
//! `requires_auth`, submitted to the payer, and settled by the payer's
//! determination (or a staff-recorded denial arriving out of band):
//!
//!   pending → submitted-to-payer → {approved | more_info_needed}
//!   pending | more_info_needed → denied   (recorded by staff)
//!
//! Approval is the only transition that touches the linked verification's
//! status: `requires_auth → eligible`, applied as one atomic patch. A
//! payer transport failure leaves the request exactly where it was; the
//! caller decides whether to resubmit.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use eligo_contracts::{
    actor::Actor,
    audit::{AuditAction, AuditEntry, ResourceType},
    error::{EligoError, EligoResult, FieldViolation},
    priorauth::{PriorAuthId, PriorAuthRequest, PriorAuthStatus, Urgency},
    verification::{VerificationId, VerificationStatus},
};

use eligo_core::traits::{
    AccessPolicy, AuditRecorder, PayerChannel, PriorAuthStore, PriorAuthUpdate, VerificationStore,
    VerificationUpdate,
};

/// The staff-entered fields for a new prior-auth request.
#[derive(Debug, Clone)]
pub struct PriorAuthForm {
    /// Procedure or service needing authorization.
    pub service_requested: String,
    /// Requested turnaround.
    pub urgency: Urgency,
    /// Medical necessity narrative. Must not be blank.
    pub clinical_justification: String,
    /// The requesting provider.
    pub requested_by: String,
}

/// Payer-style authorization number for responses that omitted one.
fn generate_auth_number() -> String {
    format!("AUTH-{}", Utc::now().timestamp_millis())
}

/// The service owning the prior authorization workflow.
///
/// Construct one per deployment and share it; every collaborator sits
/// behind a trait object, same wiring as the verification lifecycle.
pub struct PriorAuthWorkflow {
    requests: Arc<dyn PriorAuthStore>,
    verifications: Arc<dyn VerificationStore>,
    payer: Box<dyn PayerChannel>,
    audit: Arc<dyn AuditRecorder>,
    access: Arc<dyn AccessPolicy>,
}

impl PriorAuthWorkflow {
    pub fn new(
        requests: Arc<dyn PriorAuthStore>,
        verifications: Arc<dyn VerificationStore>,
        payer: Box<dyn PayerChannel>,
        audit: Arc<dyn AuditRecorder>,
        access: Arc<dyn AccessPolicy>,
    ) -> Self {
        Self {
            requests,
            verifications,
            payer,
            audit,
            access,
        }
    }

    /// Open a new prior-auth request against `verification_id`.
    ///
    /// # Pipeline
    ///
    /// 1. Access check `create` — a denial is audited (`success=false`)
    /// 2. The verification must exist and be in `requires_auth`; anything
    ///    else is `EligoError::InvalidState`
    /// 3. The clinical justification must be non-blank after trimming
    /// 4. Persist the `pending` request, record the weak back-link on the
    ///    verification, audit one `create` entry
    ///
    /// # Errors
    ///
    /// `AccessDenied`, `NotFound`, `InvalidState`, `Validation`, and store
    /// failures.
    pub fn initiate(
        &self,
        actor: &Actor,
        verification_id: VerificationId,
        form: PriorAuthForm,
    ) -> EligoResult<PriorAuthRequest> {
        self.check_access(actor, AuditAction::Create, "new")?;

        let verification = self.verifications.get(verification_id)?;
        if verification.status != VerificationStatus::RequiresAuth {
            return Err(EligoError::InvalidState {
                reason: format!(
                    "verification {} is '{}', prior authorization applies only to 'requires_auth'",
                    verification_id, verification.status
                ),
            });
        }

        let justification = form.clinical_justification.trim();
        if justification.is_empty() {
            return Err(EligoError::Validation {
                violations: vec![FieldViolation::new(
                    "clinical_justification",
                    "must not be empty",
                )],
            });
        }

        let request = PriorAuthRequest::new(
            verification_id,
            form.service_requested,
            form.urgency,
            justification,
            form.requested_by,
        );
        let id = self.requests.insert(request.clone())?;

        // Weak back-link so the front desk sees the open request beside the
        // verification. The request never depends on it.
        self.verifications.update(
            verification_id,
            VerificationUpdate {
                prior_auth_ref: Some(id),
                ..Default::default()
            },
        )?;

        self.audit.record(AuditEntry::success(
            actor,
            AuditAction::Create,
            ResourceType::PriorAuth,
            id.to_string(),
        ));

        info!(
            prior_auth_id = %id,
            verification_id = %verification_id,
            urgency = %request.urgency,
            "prior authorization initiated"
        );

        Ok(request)
    }

    /// Send the request to the payer and apply its determination.
    ///
    /// Allowed from `pending` or `more_info_needed` (resubmission after
    /// staff adds documentation); any other state is `InvalidState`.
    ///
    /// A transport failure leaves the request untouched and surfaces as
    /// `SubmissionFailed` after one `update` audit entry with
    /// `success=false`; resubmission is at the caller's discretion.
    ///
    /// On transport success, `submitted_at` is stamped and:
    ///
    /// - approved → request `approved` with the payer's auth number
    ///   (generated when the payer omitted one); the linked verification
    ///   transitions `requires_auth → eligible`
    /// - not approved → request `more_info_needed` with the payer's
    ///   message in `notes`; the message is also appended to the
    ///   verification's next steps
    ///
    /// The audit entry records **transport** success only: a more-info
    /// outcome is still `success=true`.
    pub fn submit(&self, actor: &Actor, request_id: PriorAuthId) -> EligoResult<PriorAuthRequest> {
        self.check_access(actor, AuditAction::Update, &request_id.to_string())?;

        let request = self.requests.get(request_id)?;
        if !matches!(
            request.status,
            PriorAuthStatus::Pending | PriorAuthStatus::MoreInfoNeeded
        ) {
            return Err(EligoError::InvalidState {
                reason: format!(
                    "prior-auth request {} is '{}', only 'pending' or 'more_info_needed' can be submitted",
                    request_id, request.status
                ),
            });
        }

        // Transport first. A failure here means the payer never saw the
        // request, so its status stays exactly where it was.
        let response = match self.payer.submit(&request) {
            Ok(response) => response,
            Err(cause) => {
                warn!(
                    prior_auth_id = %request_id,
                    error = %cause,
                    "payer submission failed"
                );
                self.audit.record(AuditEntry::failure(
                    actor,
                    AuditAction::Update,
                    ResourceType::PriorAuth,
                    request_id.to_string(),
                    cause.to_string(),
                ));
                return Err(cause);
            }
        };

        let now = Utc::now();

        let updated = if response.approved {
            let auth_number = response.auth_number.unwrap_or_else(generate_auth_number);
            let approved = self.requests.update(
                request_id,
                PriorAuthUpdate {
                    status: Some(PriorAuthStatus::Approved),
                    auth_number: Some(auth_number.clone()),
                    submitted_at: Some(now),
                    ..Default::default()
                },
            )?;

            // The authorization unblocks the appointment.
            self.verifications.update(
                request.verification_id,
                VerificationUpdate {
                    status: Some(VerificationStatus::Eligible),
                    ..Default::default()
                },
            )?;

            info!(
                prior_auth_id = %request_id,
                auth_number = %auth_number,
                "prior authorization approved"
            );
            approved
        } else {
            let updated = self.requests.update(
                request_id,
                PriorAuthUpdate {
                    status: Some(PriorAuthStatus::MoreInfoNeeded),
                    submitted_at: Some(now),
                    notes: Some(response.message.clone()),
                    ..Default::default()
                },
            )?;

            // Surface the payer's ask on the verification worklist.
            self.verifications.update(
                request.verification_id,
                VerificationUpdate {
                    append_next_steps: vec![response.message.clone()],
                    ..Default::default()
                },
            )?;

            info!(
                prior_auth_id = %request_id,
                "payer requested more information"
            );
            updated
        };

        // Transport reached the payer, so this is success=true even when
        // the business outcome was not an approval.
        self.audit.record(AuditEntry::success(
            actor,
            AuditAction::Update,
            ResourceType::PriorAuth,
            request_id.to_string(),
        ));

        Ok(updated)
    }

    /// Record a final payer denial that arrived out of band.
    ///
    /// The request becomes `denied` (terminal) with `reason` in its notes.
    /// The linked verification stays `requires_auth`: the appointment
    /// remains blocked until staff decide what to do next.
    pub fn record_denial(
        &self,
        actor: &Actor,
        request_id: PriorAuthId,
        reason: impl Into<String>,
    ) -> EligoResult<PriorAuthRequest> {
        self.check_access(actor, AuditAction::Update, &request_id.to_string())?;

        let request = self.requests.get(request_id)?;
        if request.status.is_terminal() {
            return Err(EligoError::InvalidState {
                reason: format!(
                    "prior-auth request {} is already '{}', a denial can only be recorded on an open request",
                    request_id, request.status
                ),
            });
        }

        let reason = reason.into();
        let updated = self.requests.update(
            request_id,
            PriorAuthUpdate {
                status: Some(PriorAuthStatus::Denied),
                notes: Some(reason.clone()),
                ..Default::default()
            },
        )?;

        info!(
            prior_auth_id = %request_id,
            reason = %reason,
            "prior authorization denied"
        );

        self.audit.record(AuditEntry::success(
            actor,
            AuditAction::Update,
            ResourceType::PriorAuth,
            request_id.to_string(),
        ));

        Ok(updated)
    }

    /// Fetch one request. Access-checked and audited.
    pub fn request(&self, actor: &Actor, id: PriorAuthId) -> EligoResult<PriorAuthRequest> {
        self.check_access(actor, AuditAction::View, &id.to_string())?;
        let found = self.requests.get(id)?;
        self.audit.record(AuditEntry::success(
            actor,
            AuditAction::View,
            ResourceType::PriorAuth,
            id.to_string(),
        ));
        Ok(found)
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
            ResourceType::PriorAuth,
            resource_id,
            err.to_string(),
        ));
        Err(err)
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
        patient::PatientRecord,
        priorauth::{PayerResponse, PriorAuthId, PriorAuthStatus, Urgency},
        verification::{Verification, VerificationId, VerificationStatus},
    };
    use eligo_core::traits::{
        AccessPolicy, AuditRecorder, PayerChannel, PriorAuthStore, VerificationStore,
    };
    use eligo_store::{MemoryPriorAuthStore, MemoryVerificationStore};

    use crate::payer::{ScriptedPayer, MORE_INFO_MESSAGE};

    use super::{PriorAuthForm, PriorAuthWorkflow};

    // ── Mock helpers ─────────────────────────────────────────────────────────

    fn make_patient() -> PatientRecord {
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

    fn mri_form() -> PriorAuthForm {
        PriorAuthForm {
            service_requested: "MRI lumbar spine".to_string(),
            urgency: Urgency::Urgent,
            clinical_justification: "Six weeks of radicular pain unresponsive to conservative therapy"
                .to_string(),
            requested_by: "dr.okafor".to_string(),
        }
    }

    fn staff() -> Actor {
        Actor::system("reception.desk", Role::Staff)
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

    /// Keeps a handle on the scripted payer after it moves into the workflow.
    struct SharedPayer(Arc<ScriptedPayer>);

    impl PayerChannel for SharedPayer {
        fn submit(
            &self,
            request: &eligo_contracts::priorauth::PriorAuthRequest,
        ) -> EligoResult<PayerResponse> {
            self.0.submit(request)
        }
    }

    struct Harness {
        workflow: PriorAuthWorkflow,
        verifications: Arc<MemoryVerificationStore>,
        requests: Arc<MemoryPriorAuthStore>,
        payer: Arc<ScriptedPayer>,
        audit_entries: Arc<Mutex<Vec<AuditEntry>>>,
    }

    fn harness(script: Vec<EligoResult<PayerResponse>>, access: Arc<dyn AccessPolicy>) -> Harness {
        let verifications = Arc::new(MemoryVerificationStore::new());
        let requests = Arc::new(MemoryPriorAuthStore::new());
        let payer = Arc::new(ScriptedPayer::new(script));
        let audit = MockAudit::new();
        let audit_entries = audit.entries.clone();

        let workflow = PriorAuthWorkflow::new(
            requests.clone(),
            verifications.clone(),
            Box::new(SharedPayer(payer.clone())),
            Arc::new(audit),
            access,
        );

        Harness {
            workflow,
            verifications,
            requests,
            payer,
            audit_entries,
        }
    }

    /// Seed a verification already resolved to `requires_auth`.
    fn seed_requires_auth(store: &MemoryVerificationStore) -> VerificationId {
        let mut record = Verification::pending(make_patient());
        record.status = VerificationStatus::RequiresAuth;
        let id = record.id;
        store.insert(record).unwrap();
        id
    }

    fn approval_response(auth_number: Option<&str>) -> PayerResponse {
        PayerResponse {
            approved: true,
            auth_number: auth_number.map(str::to_string),
            message: "Prior authorization approved.".to_string(),
        }
    }

    fn more_info_response() -> PayerResponse {
        PayerResponse {
            approved: false,
            auth_number: None,
            message: MORE_INFO_MESSAGE.to_string(),
        }
    }

    // ── initiate ─────────────────────────────────────────────────────────────

    /// Happy path: the request persists as pending, the verification gains
    /// the back-link, and exactly one create entry is audited.
    #[test]
    fn test_initiate_creates_pending_and_backlinks() {
        let h = harness(vec![], Arc::new(AllowAll));
        let verification_id = seed_requires_auth(&h.verifications);

        let request = h
            .workflow
            .initiate(&staff(), verification_id, mri_form())
            .unwrap();

        assert_eq!(request.status, PriorAuthStatus::Pending);
        assert_eq!(request.verification_id, verification_id);
        assert!(request.submitted_at.is_none());
        assert_eq!(h.requests.len(), 1);

        let verification = h.verifications.get(verification_id).unwrap();
        assert_eq!(verification.prior_auth_ref, Some(request.id));
        // The back-link never changes the verification's status.
        assert_eq!(verification.status, VerificationStatus::RequiresAuth);

        let entries = h.audit_entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, AuditAction::Create);
        assert!(entries[0].success);
    }

    /// A verification in any status other than requires_auth cannot open a
    /// prior-auth request.
    #[test]
    fn test_initiate_requires_the_requires_auth_status() {
        let h = harness(vec![], Arc::new(AllowAll));
        let mut record = Verification::pending(make_patient());
        record.status = VerificationStatus::Eligible;
        let id = record.id;
        h.verifications.insert(record).unwrap();

        let result = h.workflow.initiate(&staff(), id, mri_form());

        match result {
            Err(EligoError::InvalidState { reason }) => {
                assert!(reason.contains("eligible"), "unexpected reason: {reason}");
            }
            other => panic!("expected InvalidState, got {:?}", other),
        }
        assert_eq!(h.requests.len(), 0);
        assert!(h.audit_entries.lock().unwrap().is_empty());
    }

    /// A blank justification (after trimming) is a validation failure.
    #[test]
    fn test_initiate_rejects_blank_justification() {
        let h = harness(vec![], Arc::new(AllowAll));
        let verification_id = seed_requires_auth(&h.verifications);

        let form = PriorAuthForm {
            clinical_justification: "   ".to_string(),
            ..mri_form()
        };
        let result = h.workflow.initiate(&staff(), verification_id, form);

        match result {
            Err(EligoError::Validation { violations }) => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].field, "clinical_justification");
            }
            other => panic!("expected Validation, got {:?}", other),
        }
        assert_eq!(h.requests.len(), 0);
    }

    /// The justification is stored trimmed.
    #[test]
    fn test_initiate_trims_the_justification() {
        let h = harness(vec![], Arc::new(AllowAll));
        let verification_id = seed_requires_auth(&h.verifications);

        let form = PriorAuthForm {
            clinical_justification: "  medically necessary  ".to_string(),
            ..mri_form()
        };
        let request = h.workflow.initiate(&staff(), verification_id, form).unwrap();

        assert_eq!(request.clinical_justification, "medically necessary");
    }

    /// Initiating against a verification that does not exist is NotFound.
    #[test]
    fn test_initiate_missing_verification_is_not_found() {
        let h = harness(vec![], Arc::new(AllowAll));
        let result = h
            .workflow
            .initiate(&staff(), VerificationId::new(), mri_form());
        assert!(matches!(result, Err(EligoError::NotFound { .. })));
    }

    /// An access denial blocks everything and is itself audited.
    #[test]
    fn test_initiate_access_denial_blocks_and_audits() {
        let h = harness(vec![], Arc::new(DenyAll));
        let verification_id = seed_requires_auth(&h.verifications);

        let result = h.workflow.initiate(&staff(), verification_id, mri_form());

        assert!(matches!(result, Err(EligoError::AccessDenied { .. })));
        assert_eq!(h.requests.len(), 0);

        let entries = h.audit_entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert!(!entries[0].success);
    }

    // ── submit ───────────────────────────────────────────────────────────────

    /// Approval: the request gets the payer's auth number and terminal
    /// status, and the linked verification flips to eligible.
    #[test]
    fn test_submit_approval_unblocks_the_verification() {
        let h = harness(
            vec![Ok(approval_response(Some("AUTH-2024-7712")))],
            Arc::new(AllowAll),
        );
        let verification_id = seed_requires_auth(&h.verifications);
        let request = h
            .workflow
            .initiate(&staff(), verification_id, mri_form())
            .unwrap();

        let submitted = h.workflow.submit(&staff(), request.id).unwrap();

        assert_eq!(submitted.status, PriorAuthStatus::Approved);
        assert!(submitted.status.is_terminal());
        assert_eq!(submitted.auth_number.as_deref(), Some("AUTH-2024-7712"));
        assert!(submitted.submitted_at.is_some());

        let verification = h.verifications.get(verification_id).unwrap();
        assert_eq!(verification.status, VerificationStatus::Eligible);

        // One create for initiate, one update for submit, both successful.
        let entries = h.audit_entries.lock().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].action, AuditAction::Update);
        assert!(entries[1].success);
    }

    /// When the payer approves without an auth number, one is generated.
    #[test]
    fn test_submit_generates_auth_number_when_payer_omits_one() {
        let h = harness(vec![Ok(approval_response(None))], Arc::new(AllowAll));
        let verification_id = seed_requires_auth(&h.verifications);
        let request = h
            .workflow
            .initiate(&staff(), verification_id, mri_form())
            .unwrap();

        let submitted = h.workflow.submit(&staff(), request.id).unwrap();

        let auth_number = submitted.auth_number.expect("auth number generated");
        assert!(auth_number.starts_with("AUTH-"), "got: {auth_number}");
    }

    /// More-info: the request becomes resubmittable, the payer's message
    /// lands in notes and on the verification's next steps, and the audit
    /// entry is still success=true (transport succeeded).
    #[test]
    fn test_submit_more_info_keeps_the_verification_blocked() {
        let h = harness(vec![Ok(more_info_response())], Arc::new(AllowAll));
        let verification_id = seed_requires_auth(&h.verifications);
        let request = h
            .workflow
            .initiate(&staff(), verification_id, mri_form())
            .unwrap();

        let submitted = h.workflow.submit(&staff(), request.id).unwrap();

        assert_eq!(submitted.status, PriorAuthStatus::MoreInfoNeeded);
        assert!(!submitted.status.is_terminal());
        assert_eq!(submitted.notes.as_deref(), Some(MORE_INFO_MESSAGE));
        assert!(submitted.submitted_at.is_some());

        let verification = h.verifications.get(verification_id).unwrap();
        assert_eq!(verification.status, VerificationStatus::RequiresAuth);
        assert!(verification
            .next_steps
            .iter()
            .any(|s| s == MORE_INFO_MESSAGE));

        let entries = h.audit_entries.lock().unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[1].success, "non-approval is still transport success");
    }

    /// A more-info request can be resubmitted and then approved.
    #[test]
    fn test_submit_allows_resubmission_after_more_info() {
        let h = harness(
            vec![
                Ok(more_info_response()),
                Ok(approval_response(Some("AUTH-2"))),
            ],
            Arc::new(AllowAll),
        );
        let verification_id = seed_requires_auth(&h.verifications);
        let request = h
            .workflow
            .initiate(&staff(), verification_id, mri_form())
            .unwrap();

        h.workflow.submit(&staff(), request.id).unwrap();
        let second = h.workflow.submit(&staff(), request.id).unwrap();

        assert_eq!(second.status, PriorAuthStatus::Approved);
        assert_eq!(h.payer.calls(), 2);
    }

    /// A transport failure leaves the request untouched, audits a failed
    /// update, and surfaces to the caller. No automatic retry.
    #[test]
    fn test_submit_transport_failure_keeps_request_pending() {
        let h = harness(
            vec![Err(EligoError::SubmissionFailed {
                reason: "clearinghouse unreachable".to_string(),
            })],
            Arc::new(AllowAll),
        );
        let verification_id = seed_requires_auth(&h.verifications);
        let request = h
            .workflow
            .initiate(&staff(), verification_id, mri_form())
            .unwrap();

        let result = h.workflow.submit(&staff(), request.id);

        match result {
            Err(EligoError::SubmissionFailed { reason }) => {
                assert!(reason.contains("clearinghouse unreachable"));
            }
            other => panic!("expected SubmissionFailed, got {:?}", other),
        }

        let stored = h.requests.get(request.id).unwrap();
        assert_eq!(stored.status, PriorAuthStatus::Pending);
        assert!(stored.submitted_at.is_none());
        assert_eq!(h.payer.calls(), 1, "no automatic retry");

        let verification = h.verifications.get(verification_id).unwrap();
        assert_eq!(verification.status, VerificationStatus::RequiresAuth);

        let entries = h.audit_entries.lock().unwrap();
        assert_eq!(entries.len(), 2);
        assert!(!entries[1].success);
        assert!(entries[1]
            .error_message
            .as_deref()
            .unwrap()
            .contains("clearinghouse unreachable"));
    }

    /// A settled request cannot be submitted again.
    #[test]
    fn test_submit_approved_request_is_invalid_state() {
        let h = harness(
            vec![Ok(approval_response(Some("AUTH-1")))],
            Arc::new(AllowAll),
        );
        let verification_id = seed_requires_auth(&h.verifications);
        let request = h
            .workflow
            .initiate(&staff(), verification_id, mri_form())
            .unwrap();
        h.workflow.submit(&staff(), request.id).unwrap();

        let result = h.workflow.submit(&staff(), request.id);

        assert!(matches!(result, Err(EligoError::InvalidState { .. })));
        assert_eq!(h.payer.calls(), 1, "the payer is not contacted again");
    }

    #[test]
    fn test_submit_missing_request_is_not_found() {
        let h = harness(vec![], Arc::new(AllowAll));
        let result = h.workflow.submit(&staff(), PriorAuthId::new());
        assert!(matches!(result, Err(EligoError::NotFound { .. })));
    }

    // ── record_denial ────────────────────────────────────────────────────────

    /// A staff-recorded denial is terminal and leaves the verification in
    /// requires_auth: the appointment stays blocked.
    #[test]
    fn test_record_denial_is_terminal_and_keeps_the_block() {
        let h = harness(vec![], Arc::new(AllowAll));
        let verification_id = seed_requires_auth(&h.verifications);
        let request = h
            .workflow
            .initiate(&staff(), verification_id, mri_form())
            .unwrap();

        let denied = h
            .workflow
            .record_denial(&staff(), request.id, "Service not covered under plan")
            .unwrap();

        assert_eq!(denied.status, PriorAuthStatus::Denied);
        assert!(denied.status.is_terminal());
        assert_eq!(denied.notes.as_deref(), Some("Service not covered under plan"));

        let verification = h.verifications.get(verification_id).unwrap();
        assert_eq!(verification.status, VerificationStatus::RequiresAuth);

        let entries = h.audit_entries.lock().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].action, AuditAction::Update);
        assert!(entries[1].success);
    }

    /// Denial on an already-settled request is rejected.
    #[test]
    fn test_record_denial_on_terminal_request_is_invalid_state() {
        let h = harness(vec![], Arc::new(AllowAll));
        let verification_id = seed_requires_auth(&h.verifications);
        let request = h
            .workflow
            .initiate(&staff(), verification_id, mri_form())
            .unwrap();
        h.workflow
            .record_denial(&staff(), request.id, "not covered")
            .unwrap();

        let result = h.workflow.record_denial(&staff(), request.id, "again");

        assert!(matches!(result, Err(EligoError::InvalidState { .. })));
    }

    // ── request ──────────────────────────────────────────────────────────────

    /// Reads are access-checked and audited.
    #[test]
    fn test_request_read_is_audited() {
        let h = harness(vec![], Arc::new(AllowAll));
        let verification_id = seed_requires_auth(&h.verifications);
        let created = h
            .workflow
            .initiate(&staff(), verification_id, mri_form())
            .unwrap();

        let fetched = h.workflow.request(&staff(), created.id).unwrap();
        assert_eq!(fetched.id, created.id);

        let entries = h.audit_entries.lock().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].action, AuditAction::View);
        assert!(entries[1].success);
    }
}
