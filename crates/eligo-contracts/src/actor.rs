//! Caller identity.
//!
//! Every operation takes an `Actor`: it feeds both the access check and the
//! audit entry, so the two can never disagree about who did what.

use serde::{Deserialize, Serialize};

/// The role a caller holds. Access is an explicit allow-list per role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full access, including delete.
    Admin,
    /// Front-desk staff: view, create, update, export.
    Staff,
    /// Supervisory: view, export, print.
    Manager,
    /// Read-only.
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Staff => "staff",
            Self::Manager => "manager",
            Self::User => "user",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the caller is connecting from, recorded on every audit entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientMetadata {
    /// Source IP, when known.
    pub ip_address: Option<String>,
    /// User agent string, when known.
    pub user_agent: Option<String>,
}

/// The identity performing an operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Stable identifier (username or service name).
    pub id: String,
    /// The role access decisions are made against.
    pub role: Role,
    /// Connection metadata carried into audit entries.
    pub client: ClientMetadata,
}

impl Actor {
    /// An actor with no client metadata, as used by internal jobs.
    pub fn system(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
            client: ClientMetadata::default(),
        }
    }
}
