//! Audit entries.
//!
//! Every access to protected data produces exactly one `AuditEntry`, whether
//! it succeeded or not. Entries are append-only and leave the store only via
//! the (manually gated) retention process.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::actor::{Actor, ClientMetadata};

/// What the actor did (or attempted).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    View,
    Create,
    Update,
    Delete,
    Export,
    Print,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Export => "export",
            Self::Print => "print",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of record that was touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Verification,
    PriorAuth,
    PatientData,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verification => "verification",
            Self::PriorAuth => "prior_auth",
            Self::PatientData => "patient_data",
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable record of one access to protected data.
///
/// `success` records whether the operation itself went through (access
/// granted, transport reached) — never the business outcome it carried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Unique entry identifier.
    pub id: uuid::Uuid,
    /// Who acted (actor id, not role).
    pub actor: String,
    /// What they did.
    pub action: AuditAction,
    /// What kind of record they touched.
    pub resource_type: ResourceType,
    /// Which record (or a well-known label for bulk operations).
    pub resource_id: String,
    /// Whether the operation went through.
    pub success: bool,
    /// Why it did not, when `success` is false.
    pub error_message: Option<String>,
    /// Wall-clock time of the access (UTC).
    pub timestamp: DateTime<Utc>,
    /// Where the actor connected from.
    pub client: ClientMetadata,
}

impl AuditEntry {
    /// An entry for an operation that went through.
    pub fn success(
        actor: &Actor,
        action: AuditAction,
        resource_type: ResourceType,
        resource_id: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            actor: actor.id.clone(),
            action,
            resource_type,
            resource_id: resource_id.into(),
            success: true,
            error_message: None,
            timestamp: Utc::now(),
            client: actor.client.clone(),
        }
    }

    /// An entry for an operation that was refused or failed.
    pub fn failure(
        actor: &Actor,
        action: AuditAction,
        resource_type: ResourceType,
        resource_id: impl Into<String>,
        error_message: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            actor: actor.id.clone(),
            action,
            resource_type,
            resource_id: resource_id.into(),
            success: false,
            error_message: Some(error_message.into()),
            timestamp: Utc::now(),
            client: actor.client.clone(),
        }
    }
}
