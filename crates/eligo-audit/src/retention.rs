//! Retention policies, the sweep that enforces them, and compliance
//! reporting.
//!
//! Clinical records are kept for seven years (2555 days). Verifications and
//! prior-auth requests are purged automatically once they age out. Audit
//! entries carry the same retention window but are flagged for manual
//! review instead: the sweep never auto-deletes from the trail.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use eligo_contracts::{
    actor::{Actor, Role},
    audit::{AuditAction, AuditEntry, ResourceType},
};
use eligo_core::traits::{AuditRecorder, PriorAuthStore, VerificationStore};

use crate::{log::AuditLog, store::AuditQuery};

/// Seven years, the clinical-records retention floor.
pub const RETENTION_DAYS: i64 = 2555;

// ── Policies ─────────────────────────────────────────────────────────────────

/// The resource classes retention applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetentionClass {
    Verifications,
    PriorAuthRequests,
    AuditEntries,
}

impl RetentionClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verifications => "verifications",
            Self::PriorAuthRequests => "prior_auth_requests",
            Self::AuditEntries => "audit_entries",
        }
    }
}

impl fmt::Display for RetentionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How long one resource class is kept and what happens when it ages out.
#[derive(Debug, Clone, Copy)]
pub struct RetentionPolicy {
    pub class: RetentionClass,
    pub retention_days: i64,
    /// `true`: the sweep purges aged records. `false`: aged records are
    /// surfaced for manual review and never deleted automatically.
    pub auto_delete: bool,
}

impl RetentionPolicy {
    /// The instant before which records covered by this policy have aged
    /// out, relative to `now`.
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::days(self.retention_days)
    }
}

/// The standard policy set: seven years everywhere, audit entries manual.
pub fn standard_policies() -> Vec<RetentionPolicy> {
    vec![
        RetentionPolicy {
            class: RetentionClass::Verifications,
            retention_days: RETENTION_DAYS,
            auto_delete: true,
        },
        RetentionPolicy {
            class: RetentionClass::PriorAuthRequests,
            retention_days: RETENTION_DAYS,
            auto_delete: true,
        },
        RetentionPolicy {
            class: RetentionClass::AuditEntries,
            retention_days: RETENTION_DAYS,
            auto_delete: false,
        },
    ]
}

// ── Sweep ────────────────────────────────────────────────────────────────────

/// Outcome of one resource class within a sweep.
#[derive(Debug, Clone)]
pub struct SweepOutcome {
    pub class: RetentionClass,
    /// Records removed. Zero when the purge failed.
    pub removed: usize,
    /// The purge error, when there was one.
    pub error: Option<String>,
}

/// What one full sweep did, in policy order.
#[derive(Debug, Clone, Default)]
pub struct SweepReport {
    pub outcomes: Vec<SweepOutcome>,
}

impl SweepReport {
    pub fn total_removed(&self) -> usize {
        self.outcomes.iter().map(|o| o.removed).sum()
    }
}

/// Drives `purge_created_before` on the stores for every auto-delete
/// policy and records each outcome in the audit trail.
pub struct RetentionSweeper {
    verifications: Arc<dyn VerificationStore>,
    prior_auths: Arc<dyn PriorAuthStore>,
    audit: Arc<AuditLog>,
    policies: Vec<RetentionPolicy>,
}

impl RetentionSweeper {
    pub fn new(
        verifications: Arc<dyn VerificationStore>,
        prior_auths: Arc<dyn PriorAuthStore>,
        audit: Arc<AuditLog>,
    ) -> Self {
        Self {
            verifications,
            prior_auths,
            audit,
            policies: standard_policies(),
        }
    }

    /// Run one sweep as of `now`.
    ///
    /// Every auto-delete policy gets a `delete` audit entry attributed to
    /// the `system` actor under the well-known resource id
    /// `retention_sweep`; a failed purge is recorded with `success=false`
    /// and the sweep moves on to the next class.
    pub fn sweep(&self, now: DateTime<Utc>) -> SweepReport {
        let system = Actor::system("system", Role::Admin);
        let mut report = SweepReport::default();

        for policy in &self.policies {
            if !policy.auto_delete {
                debug!(
                    resource = policy.class.as_str(),
                    "retention is manual-review for this class, skipping purge"
                );
                continue;
            }

            let cutoff = policy.cutoff(now);
            let (purged, resource_type) = match policy.class {
                RetentionClass::Verifications => (
                    self.verifications.purge_created_before(cutoff),
                    ResourceType::Verification,
                ),
                RetentionClass::PriorAuthRequests => (
                    self.prior_auths.purge_created_before(cutoff),
                    ResourceType::PriorAuth,
                ),
                // The trail is review-only; nothing in code purges it.
                RetentionClass::AuditEntries => continue,
            };

            match purged {
                Ok(removed) => {
                    if removed > 0 {
                        info!(
                            resource = policy.class.as_str(),
                            removed,
                            cutoff = %cutoff,
                            "retention sweep purged aged records"
                        );
                    }
                    self.audit.record(AuditEntry::success(
                        &system,
                        AuditAction::Delete,
                        resource_type,
                        "retention_sweep",
                    ));
                    report.outcomes.push(SweepOutcome {
                        class: policy.class,
                        removed,
                        error: None,
                    });
                }
                Err(e) => {
                    warn!(
                        resource = policy.class.as_str(),
                        error = %e,
                        "retention purge failed"
                    );
                    self.audit.record(AuditEntry::failure(
                        &system,
                        AuditAction::Delete,
                        resource_type,
                        "retention_sweep",
                        e.to_string(),
                    ));
                    report.outcomes.push(SweepOutcome {
                        class: policy.class,
                        removed: 0,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        report
    }
}

// ── Compliance report ────────────────────────────────────────────────────────

/// One resource class holding records past its retention window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetentionViolation {
    pub class: RetentionClass,
    pub count: usize,
}

impl fmt::Display for RetentionViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} records exceed retention period",
            self.class, self.count
        )
    }
}

/// Access activity and retention posture over a reporting window.
#[derive(Debug, Clone)]
pub struct ComplianceReport {
    /// Audit entries inside the window, successful or not.
    pub total_accesses: usize,
    /// Entries with `success=false` (denied or failed operations).
    pub unauthorized_attempts: usize,
    /// Entries whose action was `export` or `print`, regardless of outcome.
    pub data_exports: usize,
    /// Classes holding records older than their retention window,
    /// including audit entries awaiting manual review.
    pub retention_violations: Vec<RetentionViolation>,
}

/// Build a compliance report for the window `[from, to]`.
///
/// Retention violations are counted as of the window's end, so a report
/// over a fixed window is reproducible. Stores that cannot be read are
/// logged and contribute a zero count rather than failing the report.
pub fn compliance_report(
    log: &AuditLog,
    verifications: &dyn VerificationStore,
    prior_auths: &dyn PriorAuthStore,
    policies: &[RetentionPolicy],
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> ComplianceReport {
    let window = AuditQuery {
        from: Some(from),
        to: Some(to),
        ..Default::default()
    };
    let accesses = log.query(&window);

    let total_accesses = accesses.len();
    let unauthorized_attempts = accesses.iter().filter(|e| !e.success).count();
    let data_exports = accesses
        .iter()
        .filter(|e| matches!(e.action, AuditAction::Export | AuditAction::Print))
        .count();

    let mut retention_violations = Vec::new();
    for policy in policies {
        let cutoff = policy.cutoff(to);
        let count = match policy.class {
            RetentionClass::Verifications => match verifications.list() {
                Ok(records) => records.iter().filter(|r| r.created_at < cutoff).count(),
                Err(e) => {
                    warn!(error = %e, "verification store unavailable for retention check");
                    0
                }
            },
            RetentionClass::PriorAuthRequests => match prior_auths.list() {
                Ok(requests) => requests.iter().filter(|r| r.created_at < cutoff).count(),
                Err(e) => {
                    warn!(error = %e, "prior-auth store unavailable for retention check");
                    0
                }
            },
            RetentionClass::AuditEntries => log
                .query(&AuditQuery::default())
                .iter()
                .filter(|e| e.timestamp < cutoff)
                .count(),
        };
        if count > 0 {
            retention_violations.push(RetentionViolation {
                class: policy.class,
                count,
            });
        }
    }

    ComplianceReport {
        total_accesses,
        unauthorized_attempts,
        data_exports,
        retention_violations,
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
