//! Outbound alerting for structural scraping failures.

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, error};

use crate::infrastructure::config::SlackSettings;

/// Receives a free-text alert when a portal page no longer matches the shape a
/// handler expects.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one alert. Delivery problems stay inside the implementation and
    /// are never surfaced to the caller.
    async fn notify(&self, message: &str);
}

/// Posts alerts to a Slack-compatible incoming webhook.
pub struct SlackNotifier {
    client: reqwest::Client,
    settings: SlackSettings,
}

impl SlackNotifier {
    pub fn new(settings: SlackSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            settings,
        }
    }
}

#[async_trait]
impl Notifier for SlackNotifier {
    async fn notify(&self, message: &str) {
        debug!("Sending alert: {}", message);

        let payload = json!({ "text": message });
        let delivery = self
            .client
            .post(&self.settings.webhook_url)
            .json(&payload)
            .send()
            .await;

        if let Err(err) = delivery {
            error!("Alert delivery failed: {}", err);
        }
    }
}
