//! The role/action allow matrix.
//!
//! `RoleMatrix` holds an explicit allow-list of actions per role and
//! implements the `AccessPolicy` trait from eligo-core. Anything not listed
//! is denied: there are no wildcard grants and no implicit inheritance
//! between roles.
//!
//! The matrix ships with a standard configuration and can also be loaded
//! from TOML:
//!
//! ```toml
//! [roles]
//! admin   = ["view", "create", "update", "delete", "export", "print"]
//! staff   = ["view", "create", "update", "export"]
//! manager = ["view", "export", "print"]
//! user    = ["view"]
//! ```

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use eligo_contracts::{
    actor::Role,
    audit::AuditAction,
    error::{EligoError, EligoResult},
};
use eligo_core::traits::AccessPolicy;

/// The structure deserialized from a TOML matrix file.
///
/// Role names and action names are checked during deserialization, so a
/// typo in either is a config error rather than a silent deny.
#[derive(Debug, Clone, Deserialize)]
struct MatrixConfig {
    #[serde(default)]
    roles: HashMap<Role, Vec<AuditAction>>,
}

/// An `AccessPolicy` backed by per-role allow-lists.
///
/// Construct via [`RoleMatrix::standard`] for the built-in configuration,
/// or [`RoleMatrix::from_toml_str`] / [`RoleMatrix::from_file`] to load a
/// deployment-specific matrix.
#[derive(Debug, Clone)]
pub struct RoleMatrix {
    allowed: HashMap<Role, HashSet<AuditAction>>,
}

impl RoleMatrix {
    /// The standard matrix.
    ///
    /// | role    | allowed                                     |
    /// |---------|---------------------------------------------|
    /// | admin   | view, create, update, delete, export, print |
    /// | staff   | view, create, update, export                |
    /// | manager | view, export, print                         |
    /// | user    | view                                        |
    pub fn standard() -> Self {
        let mut allowed = HashMap::new();
        allowed.insert(
            Role::Admin,
            HashSet::from([
                AuditAction::View,
                AuditAction::Create,
                AuditAction::Update,
                AuditAction::Delete,
                AuditAction::Export,
                AuditAction::Print,
            ]),
        );
        allowed.insert(
            Role::Staff,
            HashSet::from([
                AuditAction::View,
                AuditAction::Create,
                AuditAction::Update,
                AuditAction::Export,
            ]),
        );
        allowed.insert(
            Role::Manager,
            HashSet::from([AuditAction::View, AuditAction::Export, AuditAction::Print]),
        );
        allowed.insert(Role::User, HashSet::from([AuditAction::View]));
        Self { allowed }
    }

    /// Parse `s` as TOML and build a `RoleMatrix`.
    ///
    /// Returns `EligoError::Config` if the TOML is malformed or names an
    /// unknown role or action.
    pub fn from_toml_str(s: &str) -> EligoResult<Self> {
        let config: MatrixConfig = toml::from_str(s).map_err(|e| EligoError::Config {
            reason: format!("failed to parse access matrix TOML: {}", e),
        })?;

        debug!(roles = config.roles.len(), "access matrix loaded");

        Ok(Self {
            allowed: config
                .roles
                .into_iter()
                .map(|(role, actions)| (role, actions.into_iter().collect()))
                .collect(),
        })
    }

    /// Read the file at `path` and parse it as a TOML matrix.
    ///
    /// Returns `EligoError::Config` if the file cannot be read or its
    /// contents do not parse.
    pub fn from_file(path: &Path) -> EligoResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| EligoError::Config {
            reason: format!("failed to read access matrix file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }
}

impl Default for RoleMatrix {
    fn default() -> Self {
        Self::standard()
    }
}

impl AccessPolicy for RoleMatrix {
    /// Whether `role` may perform `action`.
    ///
    /// A role absent from the matrix holds nothing; an action absent from a
    /// role's list is denied. The check itself is pure, so callers audit
    /// denials where the attempt happens.
    fn is_allowed(&self, role: Role, action: AuditAction) -> bool {
        self.allowed
            .get(&role)
            .map_or(false, |actions| actions.contains(&action))
    }
}
