use crate::app_context::AppContext;
use crate::health::responses::HealthCheckResponse;
use axum::extract::State;
use axum::response::Json;

#[axum::debug_handler]
pub async fn healthcheck(State(app_context): State<AppContext>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        error: false,
        pending_jobs: app_context.broker.pending(),
    })
}
