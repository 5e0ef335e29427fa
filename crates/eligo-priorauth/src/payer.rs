//! The transport seam to the payer.
//!
//! The workflow talks to insurers only through the `PayerChannel` trait
//! from eligo-core. `ScriptedPayer` is the deterministic reference
//! implementation for tests and the demo; a real clearinghouse client
//! would live behind the same trait.

use std::collections::VecDeque;
use std::sync::Mutex;

use eligo_contracts::{
    error::{EligoError, EligoResult},
    priorauth::{PayerResponse, PriorAuthRequest},
};
use eligo_core::traits::PayerChannel;

/// The payer's stock reply when a request lacks supporting documentation.
pub const MORE_INFO_MESSAGE: &str = "Prior authorization requires additional clinical \
documentation. Please provide more details about the medical necessity.";

/// A payer that replays a scripted queue of determinations.
///
/// An exhausted script reports a submission failure, which keeps accidental
/// over-calls visible instead of silently approving.
pub struct ScriptedPayer {
    script: Mutex<VecDeque<EligoResult<PayerResponse>>>,
    calls: Mutex<u32>,
}

impl ScriptedPayer {
    pub fn new(script: impl IntoIterator<Item = EligoResult<PayerResponse>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            calls: Mutex::new(0),
        }
    }

    /// A payer that approves exactly once, issuing `auth_number`.
    pub fn approving(auth_number: impl Into<String>) -> Self {
        let auth_number = auth_number.into();
        Self::new([Ok(PayerResponse {
            approved: true,
            auth_number: Some(auth_number.clone()),
            message: format!(
                "Prior authorization approved. Authorization number: {}",
                auth_number
            ),
        })])
    }

    /// A payer that asks for more documentation exactly once.
    pub fn requesting_more_info() -> Self {
        Self::new([Ok(PayerResponse {
            approved: false,
            auth_number: None,
            message: MORE_INFO_MESSAGE.to_string(),
        })])
    }

    /// How many times `submit` has been called.
    pub fn calls(&self) -> u32 {
        *self.calls.lock().expect("scripted payer lock poisoned")
    }
}

impl PayerChannel for ScriptedPayer {
    fn submit(&self, _request: &PriorAuthRequest) -> EligoResult<PayerResponse> {
        *self.calls.lock().expect("scripted payer lock poisoned") += 1;
        self.script
            .lock()
            .expect("scripted payer lock poisoned")
            .pop_front()
            .unwrap_or_else(|| {
                Err(EligoError::SubmissionFailed {
                    reason: "scripted payer exhausted".to_string(),
                })
            })
    }
}
