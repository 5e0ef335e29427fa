//! # eligo-notify
//!
//! Best-effort notification dispatch for resolved verifications. An
//! `eligible` outcome becomes a patient confirmation on the email channel;
//! every other outcome becomes a staff alert fanned out to all enabled
//! channels. Delivery is fire-and-forget: failures are logged and
//! summarized, never surfaced to the verification lifecycle.
//!
//! Transports sit behind the [`EmailSender`] and [`WebhookPoster`] seams;
//! [`MemoryMailbox`] and [`MemoryWebhookSink`] are the in-memory reference
//! implementations.
//!
//! ```rust,ignore
//! let mailbox = Arc::new(MemoryMailbox::new());
//! let sink = Arc::new(MemoryWebhookSink::new());
//! let dispatcher = NotificationDispatcher::from_config(&config, mailbox, sink);
//!
//! dispatcher.verification_resolved(&verification);
//! ```

pub mod channel;
pub mod dispatch;
pub mod email;
pub mod message;
pub mod webhook;

pub use channel::{DeliveryError, NotificationChannel};
pub use dispatch::{ChannelFailure, DispatchSummary, NotificationDispatcher};
pub use email::{EmailChannel, EmailMessage, EmailSender, MemoryMailbox};
pub use message::{AlertLevel, Notice, NotificationKind};
pub use webhook::{MemoryWebhookSink, WebhookChannel, WebhookPayload, WebhookPoster};
