//! The email channel.
//!
//! Staff alerts go to the configured front-office inboxes; patient
//! confirmations are addressed by patient name and left to the mail system
//! to resolve (verification records carry no contact fields). The actual
//! transport sits behind [`EmailSender`]; [`MemoryMailbox`] is the
//! in-memory reference implementation used by tests and the demo.

use std::sync::{Arc, Mutex};

use crate::channel::{DeliveryError, NotificationChannel};
use crate::message::{email_subject, summary_line, Notice, NotificationKind};

/// One outbound email, fully composed.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailMessage {
    /// Staff inboxes, or the patient's name for confirmations.
    pub recipients: Vec<String>,
    pub subject: String,
    pub body: String,
    /// One-line preview for inbox list views.
    pub summary: String,
}

/// The mail transport seam.
pub trait EmailSender: Send + Sync {
    fn send(&self, message: EmailMessage) -> Result<(), DeliveryError>;
}

/// Collects sent mail for inspection instead of delivering it.
#[derive(Default)]
pub struct MemoryMailbox {
    sent: Mutex<Vec<EmailMessage>>,
}

impl MemoryMailbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything sent so far, oldest first.
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().expect("mailbox lock poisoned").clone()
    }
}

impl EmailSender for MemoryMailbox {
    fn send(&self, message: EmailMessage) -> Result<(), DeliveryError> {
        self.sent
            .lock()
            .map_err(|_| DeliveryError::new("mailbox lock poisoned"))?
            .push(message);
        Ok(())
    }
}

/// The email channel: composes an [`EmailMessage`] and hands it to the
/// sender.
pub struct EmailChannel {
    sender: Arc<dyn EmailSender>,
    /// Staff inboxes for alerts. Confirmations ignore this list.
    recipients: Vec<String>,
}

impl EmailChannel {
    pub fn new(sender: Arc<dyn EmailSender>, recipients: Vec<String>) -> Self {
        Self { sender, recipients }
    }
}

impl NotificationChannel for EmailChannel {
    fn name(&self) -> &'static str {
        "email"
    }

    fn handles(&self, kind: NotificationKind) -> bool {
        match kind {
            // An alert with nobody to read it is not a delivery.
            NotificationKind::StaffAlert => !self.recipients.is_empty(),
            NotificationKind::PatientConfirmation => true,
        }
    }

    fn deliver(&self, notice: &Notice) -> Result<(), DeliveryError> {
        let recipients = match notice.kind {
            NotificationKind::StaffAlert => self.recipients.clone(),
            NotificationKind::PatientConfirmation => {
                vec![notice.verification.patient.full_name()]
            }
        };

        self.sender.send(EmailMessage {
            recipients,
            subject: email_subject(notice),
            body: notice.body.clone(),
            summary: summary_line(&notice.verification),
        })
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;
    use eligo_contracts::{
        patient::PatientRecord,
        verification::{Verification, VerificationStatus},
    };

    use crate::message::{Notice, NotificationKind};

    use super::{EmailChannel, MemoryMailbox, NotificationChannel};

    fn resolved(status: VerificationStatus) -> Verification {
        let mut record = Verification::pending(PatientRecord {
            first_name: "Maria".to_string(),
            last_name: "Santos".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1985, 3, 14).unwrap(),
            insurance_company: "Blue Shield".to_string(),
            policy_number: "AB12345678".to_string(),
            member_id: "M-99001".to_string(),
            group_number: None,
            subscriber_name: None,
        });
        record.status = status;
        record
    }

    #[test]
    fn test_staff_alert_goes_to_configured_inboxes() {
        let mailbox = Arc::new(MemoryMailbox::new());
        let channel = EmailChannel::new(
            mailbox.clone(),
            vec!["frontdesk@clinic.example".to_string(), "billing@clinic.example".to_string()],
        );

        let notice = Notice::for_resolution(&resolved(VerificationStatus::Ineligible));
        channel.deliver(&notice).unwrap();

        let sent = mailbox.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0].recipients,
            vec!["frontdesk@clinic.example", "billing@clinic.example"]
        );
        assert_eq!(sent[0].subject, "Insurance Verification Alert - INELIGIBLE");
        assert_eq!(sent[0].summary, "INELIGIBLE: Maria Santos (Blue Shield)");
    }

    #[test]
    fn test_confirmation_is_addressed_by_patient_name() {
        let mailbox = Arc::new(MemoryMailbox::new());
        let channel = EmailChannel::new(mailbox.clone(), vec!["frontdesk@clinic.example".to_string()]);

        let notice = Notice::for_resolution(&resolved(VerificationStatus::Eligible));
        channel.deliver(&notice).unwrap();

        let sent = mailbox.sent();
        assert_eq!(sent[0].recipients, vec!["Maria Santos"]);
        assert_eq!(sent[0].subject, "Appointment Confirmation - Maria Santos");
    }

    #[test]
    fn test_no_staff_recipients_declines_alerts_but_not_confirmations() {
        let channel = EmailChannel::new(Arc::new(MemoryMailbox::new()), vec![]);

        assert!(!channel.handles(NotificationKind::StaffAlert));
        assert!(channel.handles(NotificationKind::PatientConfirmation));
    }
}
