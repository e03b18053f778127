use crate::domain::model::Notification;
use crate::domain::ports::Notifier;
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

/// Logs every message instead of delivering it.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, notification: &Notification) -> Result<()> {
        tracing::info!(
            "[dry-run] To: {} | Subject: {}",
            notification.recipient,
            notification.subject
        );
        tracing::debug!("[dry-run] Body:\n{}", notification.body);
        Ok(())
    }
}

#[derive(Serialize)]
struct WebhookPayload<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    body: &'a str,
}

/// Posts each message as JSON to a mail relay endpoint.
pub struct WebhookNotifier {
    client: Client,
    endpoint: String,
    sender: String,
    api_token: Option<String>,
}

impl WebhookNotifier {
    pub fn new(endpoint: String, sender: String, api_token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            sender,
            api_token,
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn send(&self, notification: &Notification) -> Result<()> {
        let payload = WebhookPayload {
            from: &self.sender,
            to: &notification.recipient,
            subject: &notification.subject,
            body: &notification.body,
        };

        let mut request = self.client.post(&self.endpoint).json(&payload);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        tracing::debug!("POST {} for {}", self.endpoint, notification.recipient);
        let response = request.send().await.map_err(|e| EtlError::NotificationError {
            recipient: notification.recipient.clone(),
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(EtlError::NotificationError {
                recipient: notification.recipient.clone(),
                message: format!("relay answered {}: {}", status, detail.trim()),
            });
        }

        Ok(())
    }
}

/// Webhook transport when an endpoint is configured, log-only otherwise.
pub fn build_notifier(
    webhook_url: Option<&str>,
    sender: &str,
    api_token: Option<&str>,
) -> Box<dyn Notifier> {
    match webhook_url {
        Some(url) => Box::new(WebhookNotifier::new(
            url.to_string(),
            sender.to_string(),
            api_token.map(str::to_string),
        )),
        None => {
            tracing::info!("No webhook configured, notifications will only be logged");
            Box::new(LogNotifier)
        }
    }
}
