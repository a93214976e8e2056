use crate::config::MessagingSettings;
use async_trait::async_trait;
use std::time::Duration;

/// Fire-and-forget secondary messaging channel.
///
/// `attempt` never fails: delivery errors are swallowed and logged, so a
/// broken webhook can never block or abort donor notification.
#[async_trait]
pub trait MessagingTransport: Send + Sync {
    async fn attempt(&self, to: &str, body: &str);
}

/// Sends one JSON POST per message to a configured webhook (e.g. a
/// WhatsApp-gateway endpoint).
pub struct WebhookMessenger {
    client: reqwest::Client,
    webhook_url: String,
    api_token: Option<String>,
}

impl WebhookMessenger {
    /// Build a messenger from settings. Returns `None` when the channel is
    /// disabled or no webhook URL is configured.
    pub fn from_settings(settings: &MessagingSettings) -> Option<Self> {
        if !settings.enabled {
            return None;
        }
        let webhook_url = settings.webhook_url.clone()?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .ok()?;
        Some(Self {
            client,
            webhook_url,
            api_token: settings.api_token.clone(),
        })
    }
}

#[async_trait]
impl MessagingTransport for WebhookMessenger {
    async fn attempt(&self, to: &str, body: &str) {
        let payload = serde_json::json!({ "to": to, "body": body });

        let mut request = self.client.post(&self.webhook_url).json(&payload);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        match request.send().await {
            Ok(response) => {
                tracing::debug!(to, status = %response.status(), "Webhook message attempted");
            }
            Err(e) => {
                tracing::debug!(to, error = %e, "Webhook message failed, continuing");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_channel_builds_nothing() {
        let settings = MessagingSettings::default();
        assert!(!settings.enabled);
        assert!(WebhookMessenger::from_settings(&settings).is_none());
    }

    #[test]
    fn test_enabled_without_url_builds_nothing() {
        let settings = MessagingSettings {
            enabled: true,
            ..MessagingSettings::default()
        };
        assert!(WebhookMessenger::from_settings(&settings).is_none());
    }

    #[test]
    fn test_enabled_with_url_builds_messenger() {
        let settings = MessagingSettings {
            enabled: true,
            webhook_url: Some("https://example.invalid/notify".to_string()),
            api_token: None,
        };
        assert!(WebhookMessenger::from_settings(&settings).is_some());
    }
}
