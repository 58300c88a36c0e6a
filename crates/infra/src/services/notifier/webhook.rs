use super::{INotifier, NotifyError};
use reminder_scheduler_domain::{Notification, Permission};
use reqwest::Client;
use std::time::Duration;
use tracing::error;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub const WEBHOOK_KEY_HEADER: &str = "reminder-webhook-key";

/// Posts every notification as json to a push relay which delivers it to
/// the user's devices
pub struct WebhookNotifier {
    client: Client,
    url: String,
    key: String,
}

impl WebhookNotifier {
    pub fn new(url: String, key: String) -> Self {
        Self {
            client: Client::new(),
            url,
            key,
        }
    }
}

#[async_trait::async_trait]
impl INotifier for WebhookNotifier {
    // The relay was set up by the operator, which counts as consent
    async fn permission(&self) -> Permission {
        Permission::Granted
    }

    async fn request_permission(&self) -> Permission {
        Permission::Granted
    }

    async fn show(&self, notification: &Notification) -> Result<(), NotifyError> {
        let res = self
            .client
            .post(&self.url)
            .timeout(REQUEST_TIMEOUT)
            .header(WEBHOOK_KEY_HEADER, &self.key)
            .json(notification)
            .send()
            .await
            .map_err(|e| {
                error!(
                    "[Network Error] Notification webhook POST error. Error message: {:?}",
                    e
                );
                NotifyError::Delivery(e.to_string())
            })?;

        if !res.status().is_success() {
            return Err(NotifyError::Delivery(format!(
                "Webhook responded with status: {}",
                res.status()
            )));
        }
        Ok(())
    }
}
