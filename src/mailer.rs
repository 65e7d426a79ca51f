// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Background email dispatch.
//!
//! Registration must not wait on (or fail with) the mail provider, so
//! senders only enqueue an [`EmailMessage`] on an unbounded channel and a
//! single worker task drains it. Delivery goes through a Mailgun-compatible
//! HTTP API when `MAILGUN_DOMAIN`/`MAILGUN_API_KEY` are configured;
//! otherwise the worker logs the message and drops it. Delivery failures
//! are logged, never propagated back to the request that queued the mail.

use std::env;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::config::{MAILGUN_API_KEY_ENV, MAILGUN_DOMAIN_ENV};

/// Mail provider configuration, read once at startup.
#[derive(Clone, Default)]
pub struct MailerConfig {
    pub domain: Option<String>,
    pub api_key: Option<String>,
}

impl MailerConfig {
    pub fn from_env() -> Self {
        Self {
            domain: env::var(MAILGUN_DOMAIN_ENV).ok(),
            api_key: env::var(MAILGUN_API_KEY_ENV).ok(),
        }
    }

    fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.domain, &self.api_key) {
            (Some(domain), Some(key)) => Some((domain, key)),
            _ => None,
        }
    }
}

/// A queued outbound email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Cloneable handle for queueing outbound email.
#[derive(Clone)]
pub struct Mailer {
    tx: mpsc::UnboundedSender<EmailMessage>,
}

impl Mailer {
    /// Spawn the delivery worker and return a handle to it.
    pub fn spawn(config: MailerConfig) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<EmailMessage>();

        tokio::spawn(async move {
            let client = reqwest::Client::new();
            while let Some(message) = rx.recv().await {
                match deliver(&client, &config, &message).await {
                    Ok(()) => debug!(to = message.to, "email processed"),
                    Err(e) => error!(to = message.to, error = %e, "email delivery failed"),
                }
            }
        });

        Self { tx }
    }

    /// A handle whose messages surface on the returned receiver instead of
    /// being delivered. For tests.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<EmailMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// A handle that silently drops every message.
    pub fn null() -> Self {
        let (tx, _rx) = mpsc::unbounded_channel();
        Self { tx }
    }

    /// Queue a message. Never blocks and never fails the caller.
    pub fn send(&self, message: EmailMessage) {
        if self.tx.send(message).is_err() {
            warn!("mailer worker is gone, dropping email");
        }
    }

    /// Queue the post-registration confirmation email.
    pub fn send_registration_email(&self, email: &str, confirmation_url: &Url) {
        self.send(EmailMessage {
            to: email.to_string(),
            subject: "Please confirm your email".to_string(),
            body: format!(
                "Hi {email}! You've successfully signed up for our service.\n\
                 Please confirm your email by clicking on this link: {confirmation_url}"
            ),
        });
    }
}

async fn deliver(
    client: &reqwest::Client,
    config: &MailerConfig,
    message: &EmailMessage,
) -> Result<(), reqwest::Error> {
    let Some((domain, api_key)) = config.credentials() else {
        info!(
            to = message.to,
            subject = message.subject,
            "email delivery is not configured, dropping message"
        );
        return Ok(());
    };

    let response = client
        .post(format!("https://api.mailgun.net/v3/{domain}/messages"))
        .basic_auth("api", Some(api_key))
        .form(&[
            ("from", format!("Relational Social <mailgun@{domain}>")),
            ("to", message.to.clone()),
            ("subject", message.subject.clone()),
            ("text", message.body.clone()),
        ])
        .send()
        .await?;

    response.error_for_status()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn registration_email_carries_confirmation_url() {
        let (mailer, mut rx) = Mailer::channel();
        let url = Url::parse("http://localhost:8080/confirm/some-token").unwrap();

        mailer.send_registration_email("test@example.com", &url);

        let message = rx.recv().await.unwrap();
        assert_eq!(message.to, "test@example.com");
        assert_eq!(message.subject, "Please confirm your email");
        assert!(message.body.contains("http://localhost:8080/confirm/some-token"));
    }

    #[tokio::test]
    async fn unconfigured_delivery_drops_without_error() {
        let client = reqwest::Client::new();
        let message = EmailMessage {
            to: "test@example.com".to_string(),
            subject: "subject".to_string(),
            body: "body".to_string(),
        };

        deliver(&client, &MailerConfig::default(), &message)
            .await
            .unwrap();
    }

    #[test]
    fn null_mailer_swallows_messages() {
        let mailer = Mailer::null();
        mailer.send(EmailMessage {
            to: "test@example.com".to_string(),
            subject: "subject".to_string(),
            body: "body".to_string(),
        });
    }
}
