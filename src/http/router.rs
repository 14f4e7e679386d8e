use crate::app_context::AppContext;
use crate::cli::Args;
use crate::{commands, health, http};
use axum::{
    routing::{get, post},
    Router,
};

pub fn new(args: &Args, app_context: AppContext) -> Router {
    let ack_timeout = http::init(args);

    let health_routes = Router::new().route("/check", get(health::handlers::healthcheck));
    let slack_routes = Router::new()
        .route("/commands", post(commands::handlers::slash_command))
        .layer(ack_timeout);

    Router::new()
        .nest("/health", health_routes)
        .nest("/slack", slack_routes)
        .with_state(app_context)
        .layer(axum::middleware::from_fn(http::middleware::tracing))
}
