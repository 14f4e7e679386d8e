use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    /// Visible only to the user who ran the command.
    Ephemeral,
    InChannel,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlashCommandResponse {
    pub response_type: ResponseType,
    pub text: String,
}

impl SlashCommandResponse {
    pub fn ephemeral(text: impl Into<String>) -> Self {
        Self {
            response_type: ResponseType::Ephemeral,
            text: text.into(),
        }
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationError {
    pub error: bool,
    pub reason: VerificationFailureReason,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VerificationFailureReason {
    MalformedBody,
    InvalidToken,
    MissingSignature,
    StaleRequest,
    InvalidSignature,
    UnknownCommand,
}
