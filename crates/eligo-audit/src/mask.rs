//! Display masking for protected health information.
//!
//! Masking is deterministic and presentation-only: stored values are never
//! altered, only the rendered copy. Each kind keeps just enough of the
//! original to be recognizable at the front desk. Inputs too short to
//! preserve the stated affixes without revealing the whole value collapse
//! to the bare mask token.

/// The fully-opaque mask.
pub const MASK_TOKEN: &str = "***";

/// Which masking rule to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskKind {
    /// `***-**-6789`
    Ssn,
    /// `PO***56`
    Policy,
    /// `ME***01`
    MemberId,
    /// `(***) ***-4567`
    Phone,
    /// `jo***@example.com`
    Email,
}

/// Mask `value` for display according to `kind`.
///
/// The empty string passes through unchanged; there is nothing to protect
/// and nothing to reveal.
pub fn mask_for_display(value: &str, kind: MaskKind) -> String {
    if value.is_empty() {
        return String::new();
    }

    let chars: Vec<char> = value.chars().collect();

    match kind {
        MaskKind::Ssn => match last_n(&chars, 4) {
            Some(last4) => format!("***-**-{}", last4),
            None => MASK_TOKEN.to_string(),
        },
        MaskKind::Policy | MaskKind::MemberId => {
            // First 2 + last 2 of a 4-char value is the whole value.
            if chars.len() < 5 {
                return MASK_TOKEN.to_string();
            }
            let head: String = chars[..2].iter().collect();
            let tail: String = chars[chars.len() - 2..].iter().collect();
            format!("{}***{}", head, tail)
        }
        MaskKind::Phone => match last_n(&chars, 4) {
            Some(last4) => format!("(***) ***-{}", last4),
            None => MASK_TOKEN.to_string(),
        },
        MaskKind::Email => match value.split_once('@') {
            Some((local, domain)) if local.chars().count() >= 3 && !domain.is_empty() => {
                let head: String = local.chars().take(2).collect();
                format!("{}***@{}", head, domain)
            }
            _ => MASK_TOKEN.to_string(),
        },
    }
}

/// The last `n` chars, or `None` when the value has no hidden remainder.
fn last_n(chars: &[char], n: usize) -> Option<String> {
    if chars.len() <= n {
        return None;
    }
    Some(chars[chars.len() - n..].iter().collect())
}

// ── Tests ────────────────────────────────────────────────────────────────────
