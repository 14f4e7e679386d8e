pub const COMMAND_NAME: &str = "/lgtm";
pub const HELP_KEYWORD: &str = "help";

pub const USAGE_MESSAGE: &str = "*Usage*\n* /lgtm [url|word]\n* /lgtm help";
pub const WAIT_MESSAGE: &str = "Please wait";
pub const BUSY_MESSAGE: &str = "Too many requests right now, please try again later";

pub const MAX_BODY_BYTES: usize = 64 * 1024;

pub const RETRY_NUM_HEADER: &str = "x-slack-retry-num";
pub const TIMESTAMP_HEADER: &str = "x-slack-request-timestamp";
pub const SIGNATURE_HEADER: &str = "x-slack-signature";
pub const SIGNATURE_VERSION: &str = "v0";
/// Older signed requests are treated as replays.
pub const MAX_REQUEST_AGE_SECS: u64 = 60 * 5;

pub const UPLOAD_NAME_PREFIX: &str = "lgtm-";
pub const UPLOAD_NAME_SUFFIX: &str = ".png";
pub const ORIGIN_DESCRIPTION_PREFIX: &str = "origin: ";
