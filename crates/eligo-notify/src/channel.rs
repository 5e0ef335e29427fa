//! The channel seam.
//!
//! A [`NotificationChannel`] turns a composed [`Notice`] into one delivery
//! attempt on its transport. Delivery failures stay inside the dispatcher:
//! they are collected and logged, never propagated to the lifecycle, so the
//! error type here is deliberately local to this crate.

use thiserror::Error;

use crate::message::{Notice, NotificationKind};

/// Why a channel could not deliver a notice.
#[derive(Debug, Clone, Error)]
#[error("{reason}")]
pub struct DeliveryError {
    pub reason: String,
}

impl DeliveryError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// One delivery transport.
///
/// Implementations must be cheap to call concurrently: the dispatcher fans
/// a notice out to every handling channel on its own thread.
pub trait NotificationChannel: Send + Sync {
    /// Stable channel name for logs and dispatch summaries.
    fn name(&self) -> &'static str;

    /// Whether this channel carries notices of `kind`.
    ///
    /// Patient confirmations ride email only; a channel may also decline a
    /// kind it cannot address (no staff recipients configured).
    fn handles(&self, kind: NotificationKind) -> bool;

    /// Deliver the notice. Called only when [`handles`](Self::handles)
    /// returned true for its kind.
    fn deliver(&self, notice: &Notice) -> Result<(), DeliveryError>;
}
