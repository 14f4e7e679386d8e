use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct WebhookPayload<'a> {
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_ts: Option<&'a str>,
}
