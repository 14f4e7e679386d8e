pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";
pub const PLAIN_OK_BODY: &str = "ok";
