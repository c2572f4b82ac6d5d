use super::errors::ConnectorError;
use crate::configuration::PromptlySettings;
use actix_web::web;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::Instrument;

#[async_trait]
pub trait PromptlyConnector: Send + Sync {
    /// Send one user message and return the assistant's reply text.
    async fn chat(&self, message: &str) -> Result<String, ConnectorError>;
}

/// HTTP client for the Promptly chat service
pub struct PromptlyClient {
    base_url: String,
    http_client: reqwest::Client,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    response: Option<String>,
}

impl PromptlyClient {
    pub fn new(settings: &PromptlySettings) -> Result<Self, ConnectorError> {
        let timeout = Duration::from_secs(settings.timeout_secs.max(1));
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ConnectorError::Internal(format!("HTTP client error: {}", err)))?;

        Ok(Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }
}

#[async_trait]
impl PromptlyConnector for PromptlyClient {
    async fn chat(&self, message: &str) -> Result<String, ConnectorError> {
        let span = tracing::info_span!("promptly_chat");

        let url = format!("{}/chat", self.base_url);
        let payload = serde_json::json!({ "message": message });

        let resp = self
            .http_client
            .post(&url)
            .json(&payload)
            .send()
            .instrument(span)
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|err| {
                tracing::error!("promptly chat error: {:?}", err);
                ConnectorError::from(err)
            })?;

        let reply = resp.json::<ChatReply>().await.map_err(|err| {
            ConnectorError::InvalidResponse(format!("Failed to parse chat response: {}", err))
        })?;

        match reply.response {
            Some(text) if !text.is_empty() => Ok(text),
            _ => Err(ConnectorError::InvalidResponse(
                "Chat response was empty".to_string(),
            )),
        }
    }
}

/// Initialize the Promptly connector from app settings
pub fn init(
    settings: &PromptlySettings,
) -> Result<web::Data<Arc<dyn PromptlyConnector>>, ConnectorError> {
    let client = PromptlyClient::new(settings)?;
    tracing::info!("Promptly connector initialized ({})", settings.base_url);

    let connector: Arc<dyn PromptlyConnector> = Arc::new(client);
    Ok(web::Data::new(connector))
}
