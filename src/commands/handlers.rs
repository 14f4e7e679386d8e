use crate::app_context::AppContext;
use crate::commands::extractors::InboundCommand;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

#[axum::debug_handler(state = AppContext)]
pub async fn slash_command(
    State(app_context): State<AppContext>,
    inbound: InboundCommand,
) -> Response {
    match inbound {
        InboundCommand::Duplicate { retry_num } => {
            tracing::info!(retry_num = %retry_num, "Ignored a retried slash command.");
            StatusCode::OK.into_response()
        }
        InboundCommand::Command(command) => {
            Json(app_context.dispatcher.dispatch(command)).into_response()
        }
    }
}
