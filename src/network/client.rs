use crate::network::consts::{SUCCESS_STATUS, TRANSPORT_FAILURE_STATUS};
use crate::network::transport::{HttpTransport, OutboundRequest};
use axum::body::Bytes;
use std::sync::Arc;
use thiserror::Error;

/// Three-way classification of an outbound call.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkOutcome {
    Success(Bytes),
    TransportFailure { status: u16, message: String },
    ApplicationFailure { status: u16, body: String },
}

impl NetworkOutcome {
    pub fn into_result(self) -> Result<Bytes, NetworkError> {
        match self {
            NetworkOutcome::Success(body) => Ok(body),
            NetworkOutcome::TransportFailure { status, message } => {
                Err(NetworkError::Transport { status, message })
            }
            NetworkOutcome::ApplicationFailure { status, body } => {
                Err(NetworkError::Application { status, body })
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetworkError {
    #[error("transport failure (status {status}): {message}")]
    Transport { status: u16, message: String },
    #[error("application failure (status {status}): {body}")]
    Application { status: u16, body: String },
}

impl NetworkError {
    pub fn status(&self) -> u16 {
        match self {
            NetworkError::Transport { status, .. } | NetworkError::Application { status, .. } => {
                *status
            }
        }
    }
}

#[derive(Clone)]
pub struct NetworkClient {
    transport: Arc<dyn HttpTransport>,
    service: &'static str,
}

impl NetworkClient {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            service: "outbound",
        }
    }

    /// Same transport, but failures are logged under another service name.
    pub fn for_service(&self, service: &'static str) -> Self {
        Self {
            transport: self.transport.clone(),
            service,
        }
    }

    pub async fn call(&self, request: OutboundRequest) -> NetworkOutcome {
        let endpoint = request.redacted_url();
        let response = match self.transport.fetch(request).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(
                    service = self.service,
                    endpoint = %endpoint,
                    error = %err,
                    "Transport failure (DNS error, etc.).",
                );
                return NetworkOutcome::TransportFailure {
                    status: TRANSPORT_FAILURE_STATUS,
                    message: err.0,
                };
            }
        };
        if response.status == SUCCESS_STATUS {
            return NetworkOutcome::Success(response.body);
        }
        let body = String::from_utf8_lossy(&response.body).into_owned();
        tracing::warn!(
            service = self.service,
            endpoint = %endpoint,
            status = response.status,
            content = %body,
            "Unexpected response status.",
        );
        NetworkOutcome::ApplicationFailure {
            status: response.status,
            body,
        }
    }
}
