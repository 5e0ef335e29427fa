//! The webhook channel.
//!
//! Posts a flat JSON alert to a configured endpoint, with a deep link back
//! into the verification screen. Policy numbers are display-masked before
//! they leave the process; the payload never carries raw identifiers.
//! Webhooks carry staff alerts only.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use eligo_audit::{mask_for_display, MaskKind};

use crate::channel::{DeliveryError, NotificationChannel};
use crate::message::{status_label, Notice, NotificationKind};

/// The flat alert document posted to the endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookPayload {
    /// Headline: "Insurance Verification Alert - HIGH".
    pub text: String,
    pub patient: String,
    /// Status label, e.g. "REQUIRES AUTH".
    pub status: String,
    pub insurance: String,
    /// Display-masked policy number.
    pub policy: String,
    pub action_required: String,
    /// Deep link into the verification screen.
    pub link: String,
}

/// The HTTP-posting seam.
pub trait WebhookPoster: Send + Sync {
    fn post(&self, url: &str, payload: serde_json::Value) -> Result<(), DeliveryError>;
}

/// Collects posted payloads for inspection instead of sending them.
#[derive(Default)]
pub struct MemoryWebhookSink {
    posts: Mutex<Vec<(String, serde_json::Value)>>,
}

impl MemoryWebhookSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `(url, payload)` posted so far, oldest first.
    pub fn posts(&self) -> Vec<(String, serde_json::Value)> {
        self.posts.lock().expect("webhook sink lock poisoned").clone()
    }
}

impl WebhookPoster for MemoryWebhookSink {
    fn post(&self, url: &str, payload: serde_json::Value) -> Result<(), DeliveryError> {
        self.posts
            .lock()
            .map_err(|_| DeliveryError::new("webhook sink lock poisoned"))?
            .push((url.to_string(), payload));
        Ok(())
    }
}

/// The webhook channel: builds the payload and hands it to the poster.
pub struct WebhookChannel {
    poster: Arc<dyn WebhookPoster>,
    url: String,
    deep_link_base: String,
}

impl WebhookChannel {
    pub fn new(
        poster: Arc<dyn WebhookPoster>,
        url: impl Into<String>,
        deep_link_base: impl Into<String>,
    ) -> Self {
        Self {
            poster,
            url: url.into(),
            deep_link_base: deep_link_base.into(),
        }
    }

    fn payload(&self, notice: &Notice) -> WebhookPayload {
        let patient = &notice.verification.patient;
        WebhookPayload {
            text: format!(
                "Insurance Verification Alert - {}",
                notice.level.as_str().to_uppercase()
            ),
            patient: patient.full_name(),
            status: status_label(notice.verification.status),
            insurance: patient.insurance_company.clone(),
            policy: mask_for_display(&patient.policy_number, MaskKind::Policy),
            action_required: notice.body.clone(),
            link: format!(
                "{}/?verification={}",
                self.deep_link_base.trim_end_matches('/'),
                notice.verification.id
            ),
        }
    }
}

impl NotificationChannel for WebhookChannel {
    fn name(&self) -> &'static str {
        "webhook"
    }

    fn handles(&self, kind: NotificationKind) -> bool {
        // Confirmations are patient-facing mail; the webhook is a staff feed.
        matches!(kind, NotificationKind::StaffAlert)
    }

    fn deliver(&self, notice: &Notice) -> Result<(), DeliveryError> {
        let payload = serde_json::to_value(self.payload(notice))
            .map_err(|e| DeliveryError::new(format!("failed to encode webhook payload: {}", e)))?;
        self.poster.post(&self.url, payload)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
