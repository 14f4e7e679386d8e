use crate::cli::Args;
use crate::network::client::NetworkClient;
use crate::network::transport::ReqwestTransport;
use std::sync::Arc;
use std::time::Duration;

pub mod client;
pub mod consts;
pub mod transport;

pub fn init(args: &Args) -> NetworkClient {
    let transport = ReqwestTransport::new(Duration::from_secs(args.http_timeout_secs))
        .expect("Failed to build the HTTP client.");
    tracing::info!(
        timeout_secs = args.http_timeout_secs,
        "Initialized outbound HTTP client."
    );
    NetworkClient::new(Arc::new(transport))
}
