//! Prompt construction for the eligibility judgement.

use eligo_contracts::patient::PatientRecord;

/// The response-format contract pinned at the end of every prompt.
///
/// The parser's schema is the mirror image of this shape; changing one
/// means changing the other.
const RESPONSE_CONTRACT: &str = r#"Respond ONLY with valid JSON in this exact format:
{
  "status": "eligible|ineligible|requires_auth|error",
  "coverage": {
    "active": boolean,
    "effectiveDate": "YYYY-MM-DD or null",
    "terminationDate": "YYYY-MM-DD or null",
    "copay": number_or_null,
    "deductible": number_or_null,
    "inNetwork": boolean,
    "priorAuthRequired": boolean
  },
  "reasoning": "Brief explanation of verification decision",
  "recommendations": ["action1", "action2"],
  "clarifyingQuestions": ["question1_if_needed"]
}"#;

/// Build the judgement prompt for `patient`.
///
/// Every provided field is embedded. The optional group and subscriber
/// lines appear only when the record carries them, but are never dropped
/// when set.
pub fn build_prompt(patient: &PatientRecord) -> String {
    let mut prompt = format!(
        "You are an expert insurance verification specialist. Analyze this patient \
         insurance information and provide a realistic verification assessment.\n\
         \n\
         Patient: {}\n\
         DOB: {}\n\
         Insurance: {}\n\
         Policy: {}\n\
         Member ID: {}\n",
        patient.full_name(),
        patient.date_of_birth,
        patient.insurance_company,
        patient.policy_number,
        patient.member_id,
    );

    if let Some(group) = &patient.group_number {
        prompt.push_str(&format!("Group: {}\n", group));
    }
    if let Some(subscriber) = &patient.subscriber_name {
        prompt.push_str(&format!("Subscriber: {}\n", subscriber));
    }

    prompt.push_str(
        "\nProvide a verification assessment with these considerations:\n\
         - Information completeness and validity\n\
         - Common insurance verification scenarios\n\
         - Realistic coverage details based on the insurance company\n\
         - Potential issues or requirements\n\
         \n",
    );
    prompt.push_str(RESPONSE_CONTRACT);
    prompt
}
