//! Scenario 5: Retention Sweep and Compliance
//!
//! The stores hold records well past the seven-year clinical retention
//! floor. A compliance report flags them, the sweep purges them, and a
//! second report comes back clean:
//!
//!   report ──▶ violations flagged
//!   sweep  ──▶ aged verifications and prior-auth requests purged,
//!              each purge audited under the `system` actor
//!   report ──▶ no violations
//!
//! Shown here:
//! - the audit trail is never auto-deleted, only flagged for review
//! - denied and successful exports both count in the compliance window

use chrono::{Duration, Utc};

use eligo_audit::{
    compliance_report, retention::RETENTION_DAYS, standard_policies, ComplianceReport,
    RetentionSweeper,
};
use eligo_classify::backend::ScriptedBackend;
use eligo_contracts::{
    actor::{Actor, Role},
    error::EligoResult,
    priorauth::{PriorAuthRequest, Urgency},
    verification::{Verification, VerificationId},
};
use eligo_core::traits::{PriorAuthStore, VerificationStore};

use crate::patients;

use super::clinic;

fn aged_verification(days_old: i64) -> Verification {
    let mut record = Verification::pending(patients::lena_kowalski());
    record.created_at = Utc::now() - Duration::days(days_old);
    record
}

fn aged_prior_auth(days_old: i64) -> PriorAuthRequest {
    let mut request = PriorAuthRequest::new(
        VerificationId::new(),
        "MRI lumbar spine",
        Urgency::Routine,
        "persistent radicular pain",
        "dr.okafor",
    );
    request.created_at = Utc::now() - Duration::days(days_old);
    request
}

fn print_report(label: &str, report: &ComplianceReport) {
    println!("  {}", label);
    println!("    Accesses:              {}", report.total_accesses);
    println!("    Unauthorized attempts: {}", report.unauthorized_attempts);
    println!("    Data exports:          {}", report.data_exports);
    if report.retention_violations.is_empty() {
        println!("    Retention violations:  none");
    } else {
        for violation in &report.retention_violations {
            println!("    Retention violation:   {}", violation);
        }
    }
}

/// Run Scenario 5: Retention Sweep and Compliance.
pub fn run_scenario() -> EligoResult<()> {
    println!("=== Scenario 5: Retention Sweep and Compliance ===");
    println!();

    let backend = ScriptedBackend::replying(patients::eligible_reply());
    let clinic = clinic(Box::new(backend))?;
    let front_desk = Actor::system("front-desk", Role::Staff);
    let portal = Actor::system("patient-portal", Role::User);

    // One fresh record through the real pipeline, three aged ones planted
    // directly in the stores.
    clinic.service.submit(&front_desk, patients::maria_santos())?;
    clinic.verifications.insert(aged_verification(3000))?;
    clinic.verifications.insert(aged_verification(3200))?;
    clinic.prior_auths.insert(aged_prior_auth(3000))?;

    // Window activity for the report: one denied export, one real one.
    if clinic.service.export_csv(&portal).is_err() {
        println!("  Window events:  1 denied export (portal), 1 staff export");
    }
    clinic.service.export_csv(&front_desk)?;

    println!("  Seeded:         1 fresh verification, 2 aged verifications,");
    println!("                  1 aged prior-auth request");
    println!("  Retention:      {} days; the audit trail is manual-review only", RETENTION_DAYS);
    println!();

    let now = Utc::now();
    let from = now - Duration::days(30);
    let policies = standard_policies();

    let before = compliance_report(
        &clinic.audit_log,
        clinic.verifications.as_ref(),
        clinic.prior_auths.as_ref(),
        &policies,
        from,
        now,
    );
    print_report("Compliance, before the sweep:", &before);
    println!();

    let sweeper = RetentionSweeper::new(
        clinic.verifications.clone(),
        clinic.prior_auths.clone(),
        clinic.audit_log.clone(),
    );
    let report = sweeper.sweep(now);

    println!("  Sweep outcomes:");
    for outcome in &report.outcomes {
        match &outcome.error {
            None => println!("    {:20} removed={}", outcome.class.to_string(), outcome.removed),
            Some(e) => println!("    {:20} FAILED: {}", outcome.class.to_string(), e),
        }
    }
    println!("  Total removed:  {}", report.total_removed());
    println!(
        "  Survivors:      {} verification(s), {} prior-auth request(s)",
        clinic.verifications.len(),
        clinic.prior_auths.len(),
    );
    println!();

    let after = compliance_report(
        &clinic.audit_log,
        clinic.verifications.as_ref(),
        clinic.prior_auths.as_ref(),
        &policies,
        from,
        Utc::now(),
    );
    print_report("Compliance, after the sweep:", &after);
    println!();

    println!(
        "  Audit chain:    {} ({} entries)",
        if clinic.audit_store.verify_integrity() { "VERIFIED" } else { "FAILED" },
        clinic.audit_store.len(),
    );
    println!();
    println!("  Scenario 5 complete.");
    println!();

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
