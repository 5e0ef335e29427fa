//! Scenario 4: Access Control and Export
//!
//! Two callers hit the same deployment: front-desk staff and a read-only
//! patient-portal account. The role matrix decides per action, and every
//! denial lands on the audit chain with `success=false`:
//!
//!   staff  ──▶ create, view, export      (allowed)
//!   user   ──▶ view                      (allowed)
//!   user   ──▶ export                    (denied, audited)
//!
//! Shown here:
//! - the denial as the caller sees it, and as the audit trail records it
//! - the CSV export that raw policy numbers are gated behind

use eligo_audit::AuditQuery;
use eligo_classify::backend::ScriptedBackend;
use eligo_contracts::{
    actor::{Actor, Role},
    error::EligoResult,
};

use crate::patients;

use super::clinic;

/// Run Scenario 4: Access Control and Export.
pub fn run_scenario() -> EligoResult<()> {
    println!("=== Scenario 4: Access Control and Export ===");
    println!();

    let backend = ScriptedBackend::replying(patients::eligible_reply());
    let clinic = clinic(Box::new(backend))?;
    let front_desk = Actor::system("front-desk", Role::Staff);
    let portal = Actor::system("patient-portal", Role::User);

    clinic.service.submit(&front_desk, patients::maria_santos())?;
    println!("  Seeded:         1 verification (created by {})", front_desk.id);
    println!("  Matrix:         staff → view, create, update, export");
    println!("                  user  → view");
    println!();

    // ── The portal account tries to export ───────────────────────────────────

    println!("  {} [{}] requests the history export:", portal.id, portal.role);
    match clinic.service.export_csv(&portal) {
        Err(e) => println!("  Denied:         {}", e),
        Ok(_) => println!("  UNEXPECTED:     export allowed"),
    }

    let records = clinic.service.list_verifications(&portal)?;
    println!("  View, though:   allowed ({} record(s))", records.len());
    println!();

    // ── The same two attempts, as the trail recorded them ────────────────────

    let trail = clinic.audit_log.query(&AuditQuery {
        actor: Some(portal.id.clone()),
        ..Default::default()
    });
    println!("  Trail for {}:", portal.id);
    for entry in &trail {
        println!(
            "    {:7} success={} {}",
            entry.action.to_string(),
            entry.success,
            entry.error_message.as_deref().unwrap_or(""),
        );
    }
    println!();

    // ── Staff run the export the portal was denied ───────────────────────────

    let csv = clinic.service.export_csv(&front_desk)?;
    let mut lines = csv.lines();
    println!("  Staff export:   {} data row(s)", csv.lines().count().saturating_sub(1));
    if let Some(header) = lines.next() {
        println!("    {}", header);
    }
    for row in lines {
        println!("    {}", row);
    }
    println!();

    println!(
        "  Audit chain:    {} ({} entries)",
        if clinic.audit_store.verify_integrity() { "VERIFIED" } else { "FAILED" },
        clinic.audit_store.len(),
    );
    println!();
    println!("  Scenario 4 complete.");
    println!();

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
