//! Judgement parsing: fence stripping, schema validation, typed decoding.
//!
//! Parsing runs in three phases:
//!
//! 1. **Cleanup** — Markdown code fences are stripped (` ```json … ``` ` or
//!    bare ` ``` … ``` `); models wrap replies despite being told not to.
//! 2. **Structural** — the JSON document is validated against the fixed
//!    judgement schema with the `jsonschema` crate. All violations are
//!    collected before returning so operators see the full failure set in
//!    one pass.
//! 3. **Typed** — the validated document is deserialized into
//!    `EligibilityJudgement`.
//!
//! Every failure mode is `EligoError::MalformedResponse`; the lifecycle
//! absorbs it into an `error`-status verification.

use std::sync::OnceLock;

use serde_json::{json, Value};
use tracing::{debug, warn};

use eligo_contracts::{
    error::{EligoError, EligoResult},
    judgement::EligibilityJudgement,
};

/// The structural contract for a judgement document.
///
/// Mirror image of the response format pinned in the prompt: required
/// status/coverage/reasoning, the four admissible statuses (`pending` is
/// not one of them), boolean coverage flags, and non-negative money fields.
fn judgement_schema() -> &'static Value {
    static SCHEMA: OnceLock<Value> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        json!({
            "type": "object",
            "required": ["status", "coverage", "reasoning"],
            "properties": {
                "status": {
                    "type": "string",
                    "enum": ["eligible", "ineligible", "requires_auth", "error"]
                },
                "coverage": {
                    "type": "object",
                    "required": ["active", "inNetwork", "priorAuthRequired"],
                    "properties": {
                        "active": { "type": "boolean" },
                        "inNetwork": { "type": "boolean" },
                        "priorAuthRequired": { "type": "boolean" },
                        "effectiveDate": { "type": ["string", "null"] },
                        "terminationDate": { "type": ["string", "null"] },
                        "copay": { "type": ["number", "null"], "minimum": 0 },
                        "deductible": { "type": ["number", "null"], "minimum": 0 }
                    }
                },
                "reasoning": { "type": "string" },
                "recommendations": {
                    "type": "array",
                    "items": { "type": "string" }
                },
                "clarifyingQuestions": {
                    "type": "array",
                    "items": { "type": "string" }
                },
                "additionalQuestions": {
                    "type": "array",
                    "items": { "type": "string" }
                }
            }
        })
    })
}

/// Strip a surrounding Markdown code fence, if any.
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let opened = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let closed = opened.strip_suffix("```").unwrap_or(opened);
    closed.trim()
}

/// Parse a raw model reply into a validated judgement.
pub fn parse_judgement(raw: &str) -> EligoResult<EligibilityJudgement> {
    let cleaned = strip_code_fences(raw);

    let document: Value = serde_json::from_str(cleaned).map_err(|e| {
        warn!(error = %e, "judgement reply is not valid JSON");
        EligoError::MalformedResponse {
            reason: format!("reply is not valid JSON: {}", e),
        }
    })?;

    validate_structure(&document)?;

    let judgement: EligibilityJudgement =
        serde_json::from_value(document).map_err(|e| EligoError::MalformedResponse {
            reason: format!("judgement shape mismatch: {}", e),
        })?;

    debug!(status = %judgement.status, "judgement parsed");
    Ok(judgement)
}

fn validate_structure(document: &Value) -> EligoResult<()> {
    let validator =
        jsonschema::validator_for(judgement_schema()).map_err(|e| EligoError::MalformedResponse {
            reason: format!("invalid judgement schema document: {}", e),
        })?;

    let violations: Vec<String> = validator
        .iter_errors(document)
        .map(|error| format!("schema violation at {}: {}", error.instance_path, error))
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        let reason = violations.join("; ");
        warn!(%reason, "judgement failed structural validation");
        Err(EligoError::MalformedResponse { reason })
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
