//! Scenario 3: Classifier Outage
//!
//! The generative backend is down: two timeouts, then an HTTP 429 on the
//! final attempt. The gateway exhausts its retry budget and the lifecycle
//! absorbs the failure instead of surfacing it:
//!
//!   submit() ──▶ attempt 1 timeout ──▶ attempt 2 timeout ──▶ attempt 3 429
//!            ──▶ record resolves to `error` with the manual-review checklist
//!
//! Shown here:
//! - the caller still gets `Ok`; the outage never becomes their problem
//! - the retry budget is spent exactly as configured
//! - the error-status record alerts staff like any other resolution

use std::sync::Arc;
use std::time::Duration;

use eligo_classify::backend::{GenerativeBackend, ScriptedBackend, TransportFailure};
use eligo_contracts::{
    actor::{Actor, Role},
    error::EligoResult,
};

use crate::patients;

use super::clinic;

/// Keeps a call-count handle on the scripted backend after the gateway
/// takes ownership of the boxed transport.
struct SharedBackend(Arc<ScriptedBackend>);

impl GenerativeBackend for SharedBackend {
    fn generate(&self, prompt: &str, timeout: Duration) -> Result<String, TransportFailure> {
        self.0.generate(prompt, timeout)
    }
}

/// Run Scenario 3: Classifier Outage.
pub fn run_scenario() -> EligoResult<()> {
    println!("=== Scenario 3: Classifier Outage ===");
    println!();

    let backend = Arc::new(ScriptedBackend::new([
        Err(TransportFailure::Timeout),
        Err(TransportFailure::Timeout),
        Err(TransportFailure::RateLimited),
    ]));
    let clinic = clinic(Box::new(SharedBackend(backend.clone())))?;
    let front_desk = Actor::system("front-desk", Role::Staff);

    let patient = patients::lena_kowalski();
    println!("  Patient:        {} ({})", patient.full_name(), patient.insurance_company);
    println!(
        "  Retry budget:   {} attempts, {} ms backoff doubling per failure",
        clinic.config.classifier.max_attempts, clinic.config.classifier.base_delay_ms,
    );
    println!("  Backend script: timeout, timeout, HTTP 429");
    println!();

    let resolved = clinic.service.submit(&front_desk, patient)?;

    println!("  Caller saw:     Ok (the outage is absorbed, never propagated)");
    println!("  Status:         {}", resolved.status);
    println!("  Attempts used:  {}", backend.calls());
    if let Some(insights) = &resolved.insights {
        println!("  Reasoning:      {}", insights.reasoning);
        for question in &insights.clarifying_questions {
            println!("  Clarify:        {}", question);
        }
    }
    println!("  Next steps:");
    for step in &resolved.next_steps {
        println!("    - {}", step);
    }
    println!();

    // An error-status resolution alerts staff like any other outcome.
    let sent = clinic.mailbox.sent();
    println!("  Staff alerts:   {} email(s)", sent.len());
    for mail in &sent {
        println!("    Subject:      {}", mail.subject);
    }
    println!("  Webhook posts:  {}", clinic.webhook.posts().len());
    println!();

    println!(
        "  Audit chain:    {} ({} entries)",
        if clinic.audit_store.verify_integrity() { "VERIFIED" } else { "FAILED" },
        clinic.audit_store.len(),
    );
    println!();
    println!("  Scenario 3 complete.");
    println!();

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
