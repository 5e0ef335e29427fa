//! Canned front-desk data for the demo scenarios.
//!
//! All patients here are fictional and all classifier replies are
//! hardcoded, in the exact JSON shape a live generative backend returns.
//! No external systems are contacted.

use chrono::NaiveDate;

use eligo_contracts::patient::PatientRecord;

fn dob(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("hardcoded date is valid")
}

// ── Patients ─────────────────────────────────────────────────────────────────

/// Scenario 1: clean record, active Blue Shield policy.
pub fn maria_santos() -> PatientRecord {
    PatientRecord {
        first_name: "Maria".to_string(),
        last_name: "Santos".to_string(),
        date_of_birth: dob(1985, 3, 14),
        insurance_company: "Blue Shield".to_string(),
        policy_number: "AB12345678".to_string(),
        member_id: "M-99001".to_string(),
        group_number: None,
        subscriber_name: None,
    }
}

/// Scenario 2: active Aetna policy, but the plan gates cardiac imaging
/// behind prior authorization.
pub fn devon_price() -> PatientRecord {
    PatientRecord {
        first_name: "Devon".to_string(),
        last_name: "Price".to_string(),
        date_of_birth: dob(1978, 11, 2),
        insurance_company: "Aetna".to_string(),
        policy_number: "XQ77880011".to_string(),
        member_id: "M-55214".to_string(),
        group_number: Some("GRP-4410".to_string()),
        subscriber_name: Some("Devon Price".to_string()),
    }
}

/// Scenario 3: a perfectly good record that never reaches the classifier.
pub fn lena_kowalski() -> PatientRecord {
    PatientRecord {
        first_name: "Lena".to_string(),
        last_name: "Kowalski".to_string(),
        date_of_birth: dob(1992, 7, 29),
        insurance_company: "United Health".to_string(),
        policy_number: "UH55443322".to_string(),
        member_id: "M-77210".to_string(),
        group_number: None,
        subscriber_name: None,
    }
}

// ── Classifier replies ───────────────────────────────────────────────────────

/// An eligible judgement for Maria Santos.
///
/// Wrapped in a Markdown code fence, as live models routinely do despite
/// the prompt's instructions; the parser strips it.
pub fn eligible_reply() -> String {
    r#"```json
{
  "status": "eligible",
  "coverage": {
    "active": true,
    "inNetwork": true,
    "effectiveDate": "2024-01-01",
    "terminationDate": null,
    "copay": 25,
    "deductible": 1500,
    "priorAuthRequired": false
  },
  "reasoning": "Policy AB12345678 is active with Blue Shield, the practice is in network, and routine office visits are covered.",
  "recommendations": [
    "Collect $25 copay at check-in",
    "Confirm appointment time with the patient"
  ],
  "clarifyingQuestions": []
}
```"#
        .to_string()
}

/// A requires_auth judgement for Devon Price's cardiac MRI.
pub fn requires_auth_reply() -> String {
    r#"{
  "status": "requires_auth",
  "coverage": {
    "active": true,
    "inNetwork": true,
    "effectiveDate": "2023-06-01",
    "terminationDate": null,
    "copay": 40,
    "deductible": 2500,
    "priorAuthRequired": true
  },
  "reasoning": "Coverage is active and in network, but Aetna requires prior authorization for advanced cardiac imaging.",
  "recommendations": [
    "Initiate prior authorization before scheduling",
    "Confirm CPT code 70553 with cardiology"
  ],
  "clarifyingQuestions": [
    "Which facility will perform the imaging?"
  ]
}"#
    .to_string()
}
