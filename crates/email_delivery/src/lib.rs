use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::{
    domain::ContactMessage,
    error::DeliveryError,
    protocol::{EmailSendRequest, TemplateParams},
};
use tracing::{debug, info};
use url::Url;

pub const EMAILJS_SEND_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

pub const DEFAULT_TIMEOUT_MS: u64 = 20_000;

/// Delivers a validated contact message; one call is one send attempt.
///
/// Futures are not `Send` because the browser build drives them on the
/// single-threaded event loop.
#[async_trait(?Send)]
pub trait EmailDelivery {
    async fn send(&self, message: &ContactMessage) -> Result<(), DeliveryError>;
}

pub struct MissingEmailDelivery;

#[async_trait(?Send)]
impl EmailDelivery for MissingEmailDelivery {
    async fn send(&self, _message: &ContactMessage) -> Result<(), DeliveryError> {
        Err(DeliveryError::Unavailable(
            "no email delivery backend configured".into(),
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailJsConfig {
    pub endpoint: String,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    /// Longest a send may take before it counts as failed.
    pub timeout_ms: u64,
}

impl Default for EmailJsConfig {
    fn default() -> Self {
        Self {
            endpoint: EMAILJS_SEND_ENDPOINT.into(),
            service_id: "service_k4v1anj".into(),
            template_id: "template_svvwesg".into(),
            public_key: "U4A5iNLD1ClfGuNU9".into(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl EmailJsConfig {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_ms)
    }

    pub fn request_for(&self, message: &ContactMessage) -> EmailSendRequest {
        EmailSendRequest {
            service_id: self.service_id.clone(),
            template_id: self.template_id.clone(),
            user_id: self.public_key.clone(),
            template_params: TemplateParams::from(message),
        }
    }
}

pub struct EmailJsClient {
    http: Client,
    endpoint: Url,
    config: EmailJsConfig,
}

impl EmailJsClient {
    pub fn new(config: EmailJsConfig) -> Result<Self, DeliveryError> {
        let endpoint = Url::parse(config.endpoint.trim()).map_err(|err| {
            DeliveryError::Configuration(format!("endpoint '{}': {err}", config.endpoint))
        })?;
        for (label, value) in [
            ("service_id", &config.service_id),
            ("template_id", &config.template_id),
            ("public_key", &config.public_key),
        ] {
            if value.trim().is_empty() {
                return Err(DeliveryError::Configuration(format!("{label} is empty")));
            }
        }

        Ok(Self {
            http: build_http_client(&config)?,
            endpoint,
            config,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_http_client(config: &EmailJsConfig) -> Result<Client, DeliveryError> {
    Client::builder()
        .timeout(config.timeout())
        .build()
        .map_err(|err| DeliveryError::Configuration(format!("http client: {err}")))
}

// The browser has no client-wide timeout; the page controller enforces the
// same deadline instead.
#[cfg(target_arch = "wasm32")]
fn build_http_client(_config: &EmailJsConfig) -> Result<Client, DeliveryError> {
    Ok(Client::new())
}

#[async_trait(?Send)]
impl EmailDelivery for EmailJsClient {
    async fn send(&self, message: &ContactMessage) -> Result<(), DeliveryError> {
        let request = self.config.request_for(message);
        debug!(
            endpoint = %self.endpoint,
            service_id = %request.service_id,
            template_id = %request.template_id,
            "sending contact message"
        );

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(|err| DeliveryError::Transport(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            info!(status = status.as_u16(), "contact message accepted by provider");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(DeliveryError::Rejected {
            status: status.as_u16(),
            body: body.trim().to_string(),
        })
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
