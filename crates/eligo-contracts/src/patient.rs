//! Patient demographic and insurance identity.
//!
//! A `PatientRecord` captures what the front desk types in. It is owned by
//! value: once attached to a verification it is never shared or mutated,
//! so a stored verification always reflects exactly what was checked.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The patient and insurance facts a verification is performed against.
///
/// Only `group_number` and `subscriber_name` are optional; everything else
/// must pass validation before a verification is created (see
/// `eligo_core::validate`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Patient legal first name.
    pub first_name: String,
    /// Patient legal last name.
    pub last_name: String,
    /// Date of birth. Must lie in the past and within 120 years.
    pub date_of_birth: NaiveDate,
    /// Insurance carrier name as printed on the card.
    pub insurance_company: String,
    /// Policy number: 3-20 alphanumeric characters.
    pub policy_number: String,
    /// Member identifier from the insurance card.
    pub member_id: String,
    /// Group number, when the plan is employer-sponsored.
    pub group_number: Option<String>,
    /// Subscriber name, when the patient is a dependent.
    pub subscriber_name: Option<String>,
}

impl PatientRecord {
    /// "First Last", used in prompts, notifications, and log lines.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
