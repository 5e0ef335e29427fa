//! The transport seam to the generative AI vendor.
//!
//! `GenerativeBackend` is the only place a concrete vendor may live. The
//! gateway never sees HTTP; it sees raw reply text or a `TransportFailure`
//! carrying the status semantics the retry loop interprets.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use thiserror::Error;

/// A transport-level failure from the generative backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportFailure {
    /// HTTP 429 from the vendor.
    #[error("rate limited (HTTP 429)")]
    RateLimited,

    /// A non-429 HTTP error status.
    #[error("upstream error (HTTP {status})")]
    Upstream { status: u16 },

    /// The request exceeded its timeout.
    #[error("request timed out")]
    Timeout,

    /// The connection could not be established or was dropped.
    #[error("connection failed: {0}")]
    Connection(String),
}

impl TransportFailure {
    /// Whether the retry loop should try again after this failure.
    ///
    /// Rate limits, timeouts, dropped connections and 5xx statuses are
    /// transient. Any other 4xx means the request itself is wrong and a
    /// retry cannot help.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RateLimited | Self::Timeout | Self::Connection(_) => true,
            Self::Upstream { status } => *status >= 500,
        }
    }
}

/// The raw text-generation call.
///
/// `generate` returns the vendor's reply text, expected to contain one
/// judgement JSON object (possibly inside a Markdown code fence).
pub trait GenerativeBackend: Send + Sync {
    fn generate(&self, prompt: &str, timeout: Duration) -> Result<String, TransportFailure>;
}

/// A backend that replays a scripted queue of results.
///
/// The reference implementation for tests and the demo: deterministic, no
/// network. An exhausted script reports a connection failure, which keeps
/// accidental over-calls visible instead of silently succeeding.
pub struct ScriptedBackend {
    script: Mutex<VecDeque<Result<String, TransportFailure>>>,
    calls: Mutex<u32>,
}

impl ScriptedBackend {
    pub fn new(script: impl IntoIterator<Item = Result<String, TransportFailure>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            calls: Mutex::new(0),
        }
    }

    /// A backend that answers exactly once with `body`.
    pub fn replying(body: impl Into<String>) -> Self {
        Self::new([Ok(body.into())])
    }

    /// How many times `generate` has been called.
    pub fn calls(&self) -> u32 {
        *self.calls.lock().expect("scripted backend lock poisoned")
    }
}

impl GenerativeBackend for ScriptedBackend {
    fn generate(&self, _prompt: &str, _timeout: Duration) -> Result<String, TransportFailure> {
        *self.calls.lock().expect("scripted backend lock poisoned") += 1;
        self.script
            .lock()
            .expect("scripted backend lock poisoned")
            .pop_front()
            .unwrap_or_else(|| {
                Err(TransportFailure::Connection(
                    "scripted backend exhausted".to_string(),
                ))
            })
    }
}
