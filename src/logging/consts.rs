use std::time::Duration;

pub const DEFAULT_FILTER_DIRECTIVE: &str = "lgtm_server=info";

pub const DEFAULT_BATCH_SIZE: usize = 100;
pub const QUICKWIT_CHANNEL_CAPACITY: usize = 1024;
/// Partial batches are shipped at least this often.
pub const FLUSH_INTERVAL: Duration = Duration::from_secs(10);
pub const TIMESTAMP_FIELD: &str = "timestamp";

pub const MARKER_FIELD: &str = "task";
pub const HTTP_REQUEST_MARKER: &str = "http_request";
pub const HTTP_REQUESTS_INDEX: &str = "http_requests";
pub const JOB_FAILURE_MARKER: &str = "job_failure";
pub const JOB_FAILURES_INDEX: &str = "job_failures";
