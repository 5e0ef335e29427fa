//! Notification fan-out.
//!
//! The dispatcher owns the configured channels and delivers each notice to
//! every channel that handles its kind, one thread per channel, so a slow
//! or broken transport cannot hold up the others. Failures are logged and
//! collected into a [`DispatchSummary`]; nothing ever propagates back to
//! the verification lifecycle.

use std::sync::Arc;
use std::thread;

use tracing::{debug, info, warn};

use eligo_contracts::verification::Verification;
use eligo_core::config::NotificationConfig;
use eligo_core::traits::Notifier;

use crate::channel::{DeliveryError, NotificationChannel};
use crate::email::{EmailChannel, EmailSender};
use crate::message::Notice;
use crate::webhook::{WebhookChannel, WebhookPoster};

/// One channel's failure, flattened for the summary.
#[derive(Debug, Clone)]
pub struct ChannelFailure {
    pub channel: &'static str,
    pub reason: String,
}

/// What happened to one dispatched notice.
#[derive(Debug, Clone, Default)]
pub struct DispatchSummary {
    /// Channels that handled the notice's kind.
    pub attempted: usize,
    pub failures: Vec<ChannelFailure>,
}

impl DispatchSummary {
    pub fn delivered(&self) -> usize {
        self.attempted - self.failures.len()
    }

    pub fn clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Fans resolved verifications out to the configured channels.
pub struct NotificationDispatcher {
    channels: Vec<Box<dyn NotificationChannel>>,
}

impl NotificationDispatcher {
    pub fn new(channels: Vec<Box<dyn NotificationChannel>>) -> Self {
        Self { channels }
    }

    /// Build the channel set `config` describes.
    ///
    /// The transports are injected so callers keep their inspection
    /// handles; a webhook channel enabled without a URL is skipped with a
    /// warning rather than treated as fatal.
    pub fn from_config(
        config: &NotificationConfig,
        sender: Arc<dyn EmailSender>,
        poster: Arc<dyn WebhookPoster>,
    ) -> Self {
        let mut channels: Vec<Box<dyn NotificationChannel>> = Vec::new();

        if config.email_enabled {
            channels.push(Box::new(EmailChannel::new(
                sender,
                config.email_recipients.clone(),
            )));
        }

        if config.webhook_enabled {
            match &config.webhook_url {
                Some(url) => channels.push(Box::new(WebhookChannel::new(
                    poster,
                    url.clone(),
                    config.deep_link_base.clone(),
                ))),
                None => warn!("webhook channel enabled without a webhook_url, skipping"),
            }
        }

        Self::new(channels)
    }

    /// Compose the notice for `verification` and deliver it everywhere it
    /// belongs. Never fails; the summary says what got through.
    pub fn dispatch(&self, verification: &Verification) -> DispatchSummary {
        let notice = Notice::for_resolution(verification);

        let selected: Vec<&dyn NotificationChannel> = self
            .channels
            .iter()
            .map(|channel| channel.as_ref())
            .filter(|channel| channel.handles(notice.kind))
            .collect();

        let mut summary = DispatchSummary {
            attempted: selected.len(),
            failures: Vec::new(),
        };

        if selected.is_empty() {
            debug!(kind = %notice.kind, "no channel handles this notice");
            return summary;
        }

        // One thread per channel; all are joined before dispatch returns.
        thread::scope(|scope| {
            let notice = &notice;
            let handles: Vec<_> = selected
                .iter()
                .map(|channel| (channel.name(), scope.spawn(move || channel.deliver(notice))))
                .collect();

            for (name, handle) in handles {
                let outcome = match handle.join() {
                    Ok(result) => result,
                    Err(_) => Err(DeliveryError::new("channel panicked")),
                };
                if let Err(e) = outcome {
                    warn!(channel = name, error = %e, "notification delivery failed");
                    summary.failures.push(ChannelFailure {
                        channel: name,
                        reason: e.to_string(),
                    });
                }
            }
        });

        info!(
            kind = %notice.kind,
            level = %notice.level,
            attempted = summary.attempted,
            failed = summary.failures.len(),
            "notification dispatch finished"
        );

        summary
    }
}

impl Notifier for NotificationDispatcher {
    fn verification_resolved(&self, verification: &Verification) {
        self.dispatch(verification);
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
