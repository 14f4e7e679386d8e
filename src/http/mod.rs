pub mod middleware;
pub mod router;
#[cfg(test)]
pub mod tests;

use crate::cli::Args;
use axum::http::StatusCode;
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;

pub fn init(args: &Args) -> TimeoutLayer {
    tracing::info!(ack_timeout_ms = args.ack_timeout_ms, "Initialized HTTP configuration.");
    TimeoutLayer::with_status_code(
        StatusCode::REQUEST_TIMEOUT,
        Duration::from_millis(args.ack_timeout_ms),
    )
}
