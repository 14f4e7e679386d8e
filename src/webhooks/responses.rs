use serde::Deserialize;
use serde_json::Value;

/// The JSON acknowledgement some Slack endpoints send instead of a bare `ok`.
#[derive(Debug, Deserialize)]
pub struct WebhookAck {
    #[serde(default)]
    pub ok: Option<Value>,
}

impl WebhookAck {
    /// `ok` counts as acknowledged unless it is missing, `null`, `false`,
    /// zero or an empty string.
    pub fn is_ok(&self) -> bool {
        match &self.ok {
            None | Some(Value::Null) => false,
            Some(Value::Bool(ok)) => *ok,
            Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0),
            Some(Value::String(text)) => !text.is_empty(),
            Some(Value::Array(_)) | Some(Value::Object(_)) => true,
        }
    }
}
