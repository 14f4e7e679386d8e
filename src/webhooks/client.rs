use crate::network::client::{NetworkClient, NetworkError};
use crate::network::transport::OutboundRequest;
use crate::webhooks::consts::{JSON_CONTENT_TYPE, PLAIN_OK_BODY};
use crate::webhooks::requests::WebhookPayload;
use crate::webhooks::responses::WebhookAck;
use http::header::{HeaderValue, CONTENT_TYPE};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum WebhookError {
    #[error(transparent)]
    Network(#[from] NetworkError),
    #[error("unknown response. response: {0}")]
    UnknownResponse(String),
    #[error("failed to serialize webhook payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub struct SlackWebhook {
    network: NetworkClient,
    incoming_webhook_url: Url,
}

impl SlackWebhook {
    pub fn new(network: &NetworkClient, incoming_webhook_url: Url) -> Self {
        Self {
            network: network.for_service("incoming_webhook"),
            incoming_webhook_url,
        }
    }

    pub async fn send_text(&self, text: &str, thread_ts: Option<&str>) -> Result<(), WebhookError> {
        let thread_ts = thread_ts.filter(|ts| !ts.is_empty());
        self.invoke(&WebhookPayload { text, thread_ts }).await
    }

    /// Succeeds only when the provider explicitly acknowledged the message.
    pub async fn invoke(&self, payload: &WebhookPayload<'_>) -> Result<(), WebhookError> {
        let body = serde_json::to_vec(payload)?;
        let request = OutboundRequest::post(self.incoming_webhook_url.clone(), body)
            .header(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        let response = self.network.call(request).await.into_result()?;
        if response.as_ref() == PLAIN_OK_BODY.as_bytes() {
            return Ok(());
        }
        match serde_json::from_slice::<WebhookAck>(&response) {
            Ok(ack) if ack.is_ok() => Ok(()),
            _ => Err(WebhookError::UnknownResponse(
                String::from_utf8_lossy(&response).into_owned(),
            )),
        }
    }
}
