//! The classifier gateway: prompt → backend (with retries) → judgement.
//!
//! The gateway is the production `Classifier`. It owns the retry loop for
//! transient transport failures and hands every reply to the parser. Parse
//! failures are never retried: a reply that arrived is a spent attempt.

use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use eligo_contracts::{
    error::{EligoError, EligoResult},
    judgement::EligibilityJudgement,
    patient::PatientRecord,
};
use eligo_core::{config::ClassifierConfig, retry::RetryPolicy, traits::Classifier};

use crate::backend::{GenerativeBackend, TransportFailure};
use crate::parse::parse_judgement;
use crate::prompt::build_prompt;

/// Vendor-agnostic classifier over a `GenerativeBackend`.
pub struct ClassifierGateway {
    backend: Box<dyn GenerativeBackend>,
    retry: RetryPolicy,
    timeout: Duration,
}

impl ClassifierGateway {
    pub fn new(backend: Box<dyn GenerativeBackend>, retry: RetryPolicy, timeout: Duration) -> Self {
        Self {
            backend,
            retry,
            timeout,
        }
    }

    pub fn from_config(backend: Box<dyn GenerativeBackend>, config: &ClassifierConfig) -> Self {
        Self::new(backend, config.retry_policy(), config.request_timeout())
    }

    /// Call the backend, retrying transient failures on the shared schedule.
    ///
    /// A 429 on the final attempt maps to `RateLimitExceeded`; every other
    /// terminal or exhausted failure maps to `ServiceUnavailable`.
    fn call_with_retry(&self, prompt: &str) -> EligoResult<String> {
        let mut attempt = 1u32;
        loop {
            debug!(
                attempt,
                max_attempts = self.retry.max_attempts,
                "generative backend attempt"
            );

            let failure = match self.backend.generate(prompt, self.timeout) {
                Ok(reply) => return Ok(reply),
                Err(failure) => failure,
            };

            // A non-429 4xx means the request itself is wrong; retrying
            // cannot help.
            if !failure.is_transient() {
                warn!(error = %failure, "terminal backend failure");
                return Err(EligoError::ServiceUnavailable {
                    reason: failure.to_string(),
                });
            }

            if self.retry.is_final(attempt) {
                warn!(attempt, error = %failure, "retry budget exhausted");
                return Err(match failure {
                    TransportFailure::RateLimited => EligoError::RateLimitExceeded {
                        reason: format!("still rate limited after {} attempts", attempt),
                    },
                    other => EligoError::ServiceUnavailable {
                        reason: format!("{} after {} attempts", other, attempt),
                    },
                });
            }

            let delay = self.retry.delay_for(attempt);
            warn!(
                attempt,
                delay_ms = delay.as_millis() as u64,
                error = %failure,
                "transient backend failure, backing off"
            );
            thread::sleep(delay);
            attempt += 1;
        }
    }
}

impl Classifier for ClassifierGateway {
    /// Judge the patient's eligibility.
    ///
    /// # Errors
    ///
    /// `RateLimitExceeded`, `ServiceUnavailable`, or `MalformedResponse` —
    /// all of which the lifecycle absorbs into an `error`-status record.
    fn classify(&self, patient: &PatientRecord) -> EligoResult<EligibilityJudgement> {
        let prompt = build_prompt(patient);
        let reply = self.call_with_retry(&prompt)?;
        parse_judgement(&reply)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
