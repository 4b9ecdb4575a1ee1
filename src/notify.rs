//! Outbound email/SMS seam.
//!
//! Delivery is best-effort: callers hand messages to a detached task and
//! never observe the outcome beyond a log line.

use std::sync::Arc;

use async_trait::async_trait;

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()>;

    async fn send_sms(&self, to: &str, body: &str) -> anyhow::Result<()>;
}

/// Writes every message to the log instead of delivering it.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()> {
        tracing::info!(channel = "email", to = %to, subject = %subject, body = %body, "notification");
        Ok(())
    }

    async fn send_sms(&self, to: &str, body: &str) -> anyhow::Result<()> {
        tracing::info!(channel = "sms", to = %to, body = %body, "notification");
        Ok(())
    }
}

/// Installed when notifications are switched off.
#[derive(Debug, Clone, Default)]
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn send_email(&self, _to: &str, _subject: &str, _body: &str) -> anyhow::Result<()> {
        Ok(())
    }

    async fn send_sms(&self, _to: &str, _body: &str) -> anyhow::Result<()> {
        Ok(())
    }
}

pub fn from_config(enabled: bool) -> Arc<dyn Notifier> {
    if enabled {
        Arc::new(LogNotifier)
    } else {
        Arc::new(NoopNotifier)
    }
}

/// A message waiting to be sent.
#[derive(Debug, Clone)]
pub enum Outgoing {
    Email {
        to: String,
        subject: String,
        body: String,
    },
    Sms {
        to: String,
        body: String,
    },
}

/// Send each message in order, logging and skipping failures.
pub async fn deliver(notifier: &dyn Notifier, messages: Vec<Outgoing>) {
    for message in messages {
        let result = match &message {
            Outgoing::Email { to, subject, body } => notifier.send_email(to, subject, body).await,
            Outgoing::Sms { to, body } => notifier.send_sms(to, body).await,
        };
        if let Err(err) = result {
            tracing::warn!(error = %err, ?message, "notification failed");
        }
    }
}
