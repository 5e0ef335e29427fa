//! Eligo front-office demo scenarios.
//!
//! Each scenario is a self-contained module that wires real Eligo
//! components (verification lifecycle, classifier gateway, role matrix,
//! hash-chained audit trail, notification dispatcher) around a scripted
//! backend and canned patient data, and walks one front-office situation
//! end to end.

pub mod access;
pub mod eligible;
pub mod outage;
pub mod prior_auth;
pub mod retention;

use std::sync::Arc;

use eligo_access::RoleMatrix;
use eligo_audit::{AuditLog, MemoryAuditStore};
use eligo_classify::backend::GenerativeBackend;
use eligo_classify::ClassifierGateway;
use eligo_contracts::error::EligoResult;
use eligo_core::{config::AppConfig, lifecycle::VerificationService};
use eligo_notify::{MemoryMailbox, MemoryWebhookSink, NotificationDispatcher};
use eligo_store::{MemoryPriorAuthStore, MemoryVerificationStore};

/// Deployment settings shared by every scenario.
const DEMO_CONFIG: &str = include_str!("../../config/eligo.toml");

pub(crate) fn demo_config() -> EligoResult<AppConfig> {
    AppConfig::from_toml_str(DEMO_CONFIG)
}

/// One fully wired deployment over in-memory stores.
///
/// The concrete store, mailbox and webhook handles are kept alongside the
/// service so scenarios can show what actually landed where.
pub(crate) struct Clinic {
    pub config: AppConfig,
    pub verifications: Arc<MemoryVerificationStore>,
    pub prior_auths: Arc<MemoryPriorAuthStore>,
    pub audit_store: Arc<MemoryAuditStore>,
    pub audit_log: Arc<AuditLog>,
    pub access: Arc<RoleMatrix>,
    pub mailbox: Arc<MemoryMailbox>,
    pub webhook: Arc<MemoryWebhookSink>,
    pub service: VerificationService,
}

/// Wire a clinic around `backend`, the only piece scenarios script.
pub(crate) fn clinic(backend: Box<dyn GenerativeBackend>) -> EligoResult<Clinic> {
    let config = demo_config()?;

    let verifications = Arc::new(MemoryVerificationStore::new());
    let prior_auths = Arc::new(MemoryPriorAuthStore::new());
    let audit_store = Arc::new(MemoryAuditStore::new());
    let audit_log = Arc::new(AuditLog::new(audit_store.clone()));
    let access = Arc::new(RoleMatrix::standard());
    let mailbox = Arc::new(MemoryMailbox::new());
    let webhook = Arc::new(MemoryWebhookSink::new());

    let dispatcher = NotificationDispatcher::from_config(
        &config.notifications,
        mailbox.clone(),
        webhook.clone(),
    );
    let classifier = ClassifierGateway::from_config(backend, &config.classifier);

    let service = VerificationService::new(
        verifications.clone(),
        Box::new(classifier),
        audit_log.clone(),
        Box::new(dispatcher),
        access.clone(),
    );

    Ok(Clinic {
        config,
        verifications,
        prior_auths,
        audit_store,
        audit_log,
        access,
        mailbox,
        webhook,
        service,
    })
}

/// Render an optional dollar amount for scenario output.
pub(crate) fn dollars(amount: Option<f64>) -> String {
    amount.map_or_else(|| "n/a".to_string(), |v| format!("${:.2}", v))
}
