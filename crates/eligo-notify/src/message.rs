//! Notice composition.
//!
//! One resolved verification becomes exactly one [`Notice`]: a patient
//! confirmation when the outcome is `eligible`, a staff alert otherwise.
//! Channels render the notice for their transport; the words themselves are
//! decided here so every channel tells the same story.

use eligo_contracts::verification::{Verification, VerificationStatus};

/// Who a notice is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Front-office alert: something needs staff attention.
    StaffAlert,
    /// Appointment confirmation addressed to the patient.
    PatientConfirmation,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StaffAlert => "staff_alert",
            Self::PatientConfirmation => "patient_confirmation",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How urgently staff should act on a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AlertLevel {
    Low,
    Medium,
    High,
}

impl AlertLevel {
    /// Failed and ineligible outcomes need same-day follow-up; a pending
    /// authorization can wait for the next worklist pass.
    pub fn for_status(status: VerificationStatus) -> Self {
        match status {
            VerificationStatus::Error | VerificationStatus::Ineligible => Self::High,
            VerificationStatus::RequiresAuth => Self::Medium,
            _ => Self::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One composed outbound notification, ready for any channel.
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NotificationKind,
    pub level: AlertLevel,
    /// The resolved verification the notice announces.
    pub verification: Verification,
    /// The message body, composed per status.
    pub body: String,
}

impl Notice {
    /// Compose the notice for a resolved verification.
    ///
    /// `eligible` yields a patient confirmation; every other status yields
    /// a staff alert at [`AlertLevel::for_status`]. A record that somehow
    /// arrives still `pending` becomes a low-level manual-review alert
    /// rather than nothing.
    pub fn for_resolution(verification: &Verification) -> Self {
        match verification.status {
            VerificationStatus::Eligible => Self {
                kind: NotificationKind::PatientConfirmation,
                level: AlertLevel::Low,
                body: patient_body(verification),
                verification: verification.clone(),
            },
            status => Self {
                kind: NotificationKind::StaffAlert,
                level: AlertLevel::for_status(status),
                body: staff_body(verification),
                verification: verification.clone(),
            },
        }
    }
}

/// Status as it appears in subjects and payload fields: "REQUIRES AUTH".
pub fn status_label(status: VerificationStatus) -> String {
    status.as_str().replace('_', " ").to_uppercase()
}

/// The email subject line for a notice.
pub fn email_subject(notice: &Notice) -> String {
    match notice.kind {
        NotificationKind::PatientConfirmation => format!(
            "Appointment Confirmation - {}",
            notice.verification.patient.full_name()
        ),
        NotificationKind::StaffAlert => format!(
            "Insurance Verification Alert - {}",
            status_label(notice.verification.status)
        ),
    }
}

/// One-line preview for inbox list views and log lines.
pub fn summary_line(verification: &Verification) -> String {
    format!(
        "{}: {} ({})",
        status_label(verification.status),
        verification.patient.full_name(),
        verification.patient.insurance_company
    )
}

fn staff_body(verification: &Verification) -> String {
    let patient = verification.patient.full_name();
    match verification.status {
        VerificationStatus::Ineligible => format!(
            "Patient {} has ineligible insurance coverage. Contact patient \
             about payment options and coverage verification.",
            patient
        ),
        VerificationStatus::RequiresAuth => format!(
            "Prior authorization required for {}. Please initiate \
             authorization process with {}.",
            patient, verification.patient.insurance_company
        ),
        VerificationStatus::Error => format!(
            "Verification failed for {}. Manual verification required. \
             Check patient information and retry.",
            patient
        ),
        _ => format!("Manual review needed for {}.", patient),
    }
}

fn patient_body(verification: &Verification) -> String {
    format!(
        "Good news {}! Your insurance verification is complete and your \
         appointment is confirmed. We'll see you soon!",
        verification.patient.first_name
    )
}

// ── Tests ────────────────────────────────────────────────────────────────────
