//! Patient input validation.
//!
//! Violations are collected, not short-circuited: the front desk sees every
//! problem in one pass. A record that fails validation is never persisted
//! and never audited.

use chrono::{Months, NaiveDate, Utc};

use eligo_contracts::{
    error::{EligoError, EligoResult, FieldViolation},
    patient::PatientRecord,
};

const POLICY_NUMBER_MIN: usize = 3;
const POLICY_NUMBER_MAX: usize = 20;
const MAX_AGE_YEARS: u32 = 120;

/// Validate a patient record before anything is persisted.
///
/// Returns `EligoError::Validation` carrying one `FieldViolation` per
/// violated field.
pub fn validate_patient(patient: &PatientRecord) -> EligoResult<()> {
    let mut violations = Vec::new();

    if patient.first_name.trim().is_empty() {
        violations.push(FieldViolation::new("first_name", "must not be empty"));
    }
    if patient.last_name.trim().is_empty() {
        violations.push(FieldViolation::new("last_name", "must not be empty"));
    }
    if patient.insurance_company.trim().is_empty() {
        violations.push(FieldViolation::new("insurance_company", "must not be empty"));
    }
    if !is_valid_policy_number(&patient.policy_number) {
        violations.push(FieldViolation::new(
            "policy_number",
            "must be 3-20 alphanumeric characters",
        ));
    }
    if patient.member_id.trim().is_empty() {
        violations.push(FieldViolation::new("member_id", "must not be empty"));
    }
    violations.extend(date_of_birth_violation(patient.date_of_birth));

    if violations.is_empty() {
        Ok(())
    } else {
        Err(EligoError::Validation { violations })
    }
}

fn is_valid_policy_number(value: &str) -> bool {
    (POLICY_NUMBER_MIN..=POLICY_NUMBER_MAX).contains(&value.len())
        && value.chars().all(|c| c.is_ascii_alphanumeric())
}

fn date_of_birth_violation(dob: NaiveDate) -> Option<FieldViolation> {
    let today = Utc::now().date_naive();
    if dob >= today {
        return Some(FieldViolation::new("date_of_birth", "must be in the past"));
    }
    if dob < today - Months::new(12 * MAX_AGE_YEARS) {
        return Some(FieldViolation::new(
            "date_of_birth",
            "must be within 120 years",
        ));
    }
    None
}
