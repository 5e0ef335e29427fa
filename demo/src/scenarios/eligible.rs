//! Scenario 1: Eligible Walk-In
//!
//! The front desk submits a clean patient record and the scripted backend
//! answers with an eligible judgement, wrapped in a Markdown code fence
//! the way live models tend to reply. The record runs the whole pipeline
//! in one pass:
//!
//!   Access → Validate → Persist pending → Classify → Resolve → Audit → Notify
//!
//! Shown here:
//! - the resolved record carries coverage facts, reasoning and next steps
//! - the patient gets a confirmation email; the staff feed stays quiet
//! - the audit chain holds exactly one `create` entry and verifies

use eligo_classify::backend::ScriptedBackend;
use eligo_contracts::{
    actor::{Actor, Role},
    error::EligoResult,
};

use crate::patients;

use super::{clinic, dollars};

/// Run Scenario 1: Eligible Walk-In.
pub fn run_scenario() -> EligoResult<()> {
    println!("=== Scenario 1: Eligible Walk-In ===");
    println!();

    let backend = ScriptedBackend::replying(patients::eligible_reply());
    let clinic = clinic(Box::new(backend))?;
    let front_desk = Actor::system("front-desk", Role::Staff);

    let patient = patients::maria_santos();
    println!("  Patient:        {} ({})", patient.full_name(), patient.insurance_company);
    println!("  Submitted by:   {} [{}]", front_desk.id, front_desk.role);
    println!(
        "  Channels:       email {} | webhook {}",
        if clinic.config.notifications.email_enabled { "on" } else { "off" },
        if clinic.config.notifications.webhook_enabled { "on" } else { "off" },
    );
    println!();

    let resolved = clinic.service.submit(&front_desk, patient)?;

    println!("  Status:         {}", resolved.status);
    println!(
        "  Coverage:       active={} in_network={}",
        resolved.coverage.active, resolved.coverage.in_network
    );
    println!(
        "  Copay:          {} | Deductible: {}",
        dollars(resolved.coverage.copay),
        dollars(resolved.coverage.deductible),
    );
    if let Some(insights) = &resolved.insights {
        println!("  Reasoning:      {}", insights.reasoning);
    }
    println!("  Next steps:");
    for step in &resolved.next_steps {
        println!("    - {}", step);
    }
    println!();

    // The confirmation goes to the patient; nothing lands on the staff feed.
    let sent = clinic.mailbox.sent();
    println!("  Emails sent:    {}", sent.len());
    for mail in &sent {
        println!("    To:           {}", mail.recipients.join(", "));
        println!("    Subject:      {}", mail.subject);
        println!("    Body:         {}", mail.body);
    }
    println!("  Webhook posts:  {}", clinic.webhook.posts().len());
    println!();

    println!(
        "  Audit chain:    {} ({} entries)",
        if clinic.audit_store.verify_integrity() { "VERIFIED" } else { "FAILED" },
        clinic.audit_store.len(),
    );
    println!();
    println!("  Scenario 1 complete.");
    println!();

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
