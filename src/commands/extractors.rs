use crate::app_context::{AppContext, VerificationSettings};
use crate::commands::consts::{
    COMMAND_NAME, MAX_BODY_BYTES, RETRY_NUM_HEADER, SIGNATURE_HEADER, TIMESTAMP_HEADER,
};
use crate::commands::requests::SlashCommand;
use crate::commands::responses::{VerificationError, VerificationFailureReason};
use crate::commands::signature;
use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::extract::{FromRequest, Request};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Json;
use axum::Form;
use std::time::{SystemTime, UNIX_EPOCH};

/// A slash command that passed verification, or a platform retry of one
/// that was already acknowledged.
pub enum InboundCommand {
    Command(SlashCommand),
    Duplicate { retry_num: String },
}

type Rejection = (StatusCode, Json<VerificationError>);

#[async_trait]
impl FromRequest<AppContext> for InboundCommand {
    type Rejection = Rejection;

    async fn from_request(req: Request, state: &AppContext) -> Result<Self, Self::Rejection> {
        if let Some(retry_num) = header_str(req.headers(), RETRY_NUM_HEADER) {
            return Ok(InboundCommand::Duplicate {
                retry_num: retry_num.to_string(),
            });
        }

        let (parts, body) = req.into_parts();
        let body = to_bytes(body, MAX_BODY_BYTES)
            .await
            .map_err(|_| reject(StatusCode::BAD_REQUEST, VerificationFailureReason::MalformedBody))?;

        if let Some(secret) = &state.verification.signing_secret {
            verify_signature(secret, &parts.headers, &body)?;
        }

        let Form(command) =
            Form::<SlashCommand>::from_request(Request::from_parts(parts, Body::from(body)), state)
                .await
                .map_err(|_| {
                    reject(StatusCode::BAD_REQUEST, VerificationFailureReason::MalformedBody)
                })?;

        verify_command(&state.verification, &command)?;
        Ok(InboundCommand::Command(command))
    }
}

fn verify_signature(secret: &str, headers: &HeaderMap, body: &[u8]) -> Result<(), Rejection> {
    let (Some(timestamp), Some(sent_signature)) = (
        header_str(headers, TIMESTAMP_HEADER),
        header_str(headers, SIGNATURE_HEADER),
    ) else {
        return Err(reject(
            StatusCode::UNAUTHORIZED,
            VerificationFailureReason::MissingSignature,
        ));
    };
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    signature::verify(secret, timestamp, body, sent_signature, now).map_err(|reason| {
        tracing::warn!(reason = ?reason, "Rejected a slash command with a bad signature.");
        reject(StatusCode::UNAUTHORIZED, reason)
    })
}

fn verify_command(
    settings: &VerificationSettings,
    command: &SlashCommand,
) -> Result<(), Rejection> {
    if command.token != settings.token {
        tracing::warn!(user_id = %command.user_id, "Rejected a slash command with a bad token.");
        return Err(reject(
            StatusCode::UNAUTHORIZED,
            VerificationFailureReason::InvalidToken,
        ));
    }
    if command.command != COMMAND_NAME {
        tracing::warn!(command = %command.command, "Rejected an unknown slash command.");
        return Err(reject(
            StatusCode::BAD_REQUEST,
            VerificationFailureReason::UnknownCommand,
        ));
    }
    Ok(())
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

fn reject(status: StatusCode, reason: VerificationFailureReason) -> Rejection {
    (
        status,
        Json(VerificationError {
            error: true,
            reason,
        }),
    )
}
