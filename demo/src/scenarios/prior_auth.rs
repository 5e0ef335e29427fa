//! Scenario 2: Prior Authorization Workflow
//!
//! The classifier judges Devon Price's cardiac MRI `requires_auth`, which
//! blocks the appointment and alerts the staff channels. The front desk
//! opens a prior-auth request and works it to approval:
//!
//!   requires_auth ──▶ initiate (pending)
//!                     submit  ──▶ payer wants more documentation
//!                     submit  ──▶ approved ──▶ verification becomes eligible
//!
//! Shown here:
//! - the staff alert email and the webhook post (policy number masked)
//! - the payer's more-info ask landing on the verification's next steps
//! - approval carrying the auth number and unblocking the appointment

use eligo_classify::backend::ScriptedBackend;
use eligo_contracts::{
    actor::{Actor, Role},
    error::EligoResult,
    priorauth::{PayerResponse, Urgency},
};
use eligo_priorauth::{PriorAuthForm, PriorAuthWorkflow, ScriptedPayer, MORE_INFO_MESSAGE};

use crate::patients;

use super::clinic;

/// The payer script: one more-info ask, then an approval.
fn payer() -> ScriptedPayer {
    ScriptedPayer::new([
        Ok(PayerResponse {
            approved: false,
            auth_number: None,
            message: MORE_INFO_MESSAGE.to_string(),
        }),
        Ok(PayerResponse {
            approved: true,
            auth_number: Some("AUTH-2026-4417".to_string()),
            message: "Prior authorization approved.".to_string(),
        }),
    ])
}

/// Run Scenario 2: Prior Authorization Workflow.
pub fn run_scenario() -> EligoResult<()> {
    println!("=== Scenario 2: Prior Authorization Workflow ===");
    println!();

    let backend = ScriptedBackend::replying(patients::requires_auth_reply());
    let clinic = clinic(Box::new(backend))?;
    let front_desk = Actor::system("front-desk", Role::Staff);

    let patient = patients::devon_price();
    println!("  Patient:        {} ({})", patient.full_name(), patient.insurance_company);
    println!("  Service:        Cardiac MRI (CPT 70553)");
    println!();

    // ── The verification resolves blocked ────────────────────────────────────

    let resolved = clinic.service.submit(&front_desk, patient)?;
    println!("  Status:         {}", resolved.status);
    if let Some(insights) = &resolved.insights {
        println!("  Reasoning:      {}", insights.reasoning);
    }
    println!();

    let sent = clinic.mailbox.sent();
    println!("  Staff alerts:   {} email(s)", sent.len());
    for mail in &sent {
        println!("    To:           {}", mail.recipients.join(", "));
        println!("    Subject:      {}", mail.subject);
        println!("    Summary:      {}", mail.summary);
    }
    if let Some((url, payload)) = clinic.webhook.posts().first() {
        println!("  Webhook post:   {}", url);
        let pretty =
            serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string());
        for line in pretty.lines() {
            println!("    {}", line);
        }
    }
    println!();

    // ── Working the authorization ────────────────────────────────────────────

    let workflow = PriorAuthWorkflow::new(
        clinic.prior_auths.clone(),
        clinic.verifications.clone(),
        Box::new(payer()),
        clinic.audit_log.clone(),
        clinic.access.clone(),
    );

    let request = workflow.initiate(
        &front_desk,
        resolved.id,
        PriorAuthForm {
            service_requested: "Cardiac MRI (CPT 70553)".to_string(),
            urgency: Urgency::Urgent,
            clinical_justification: "Abnormal stress test; rule out ischemic cardiomyopathy."
                .to_string(),
            requested_by: "dr.okafor".to_string(),
        },
    )?;
    println!("  Request opened: {} [{}]", request.id, request.status);
    println!("  Urgency:        {}", request.urgency);
    println!();

    let after_first = workflow.submit(&front_desk, request.id)?;
    println!("  First submit:   {}", after_first.status);
    if let Some(notes) = &after_first.notes {
        println!("  Payer notes:    {}", notes);
    }
    let blocked = clinic.service.verification(&front_desk, resolved.id)?;
    if let Some(ask) = blocked.next_steps.last() {
        println!("  Worklist adds:  {}", ask);
    }
    println!();

    let approved = workflow.submit(&front_desk, request.id)?;
    println!("  Second submit:  {}", approved.status);
    if let Some(auth_number) = &approved.auth_number {
        println!("  Auth number:    {}", auth_number);
    }

    let unblocked = clinic.service.verification(&front_desk, resolved.id)?;
    println!("  Verification:   {} (appointment unblocked)", unblocked.status);
    println!();

    println!(
        "  Audit chain:    {} ({} entries)",
        if clinic.audit_store.verify_integrity() { "VERIFIED" } else { "FAILED" },
        clinic.audit_store.len(),
    );
    println!();
    println!("  Scenario 2 complete.");
    println!();

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
