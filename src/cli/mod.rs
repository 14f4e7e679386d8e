use crate::search::consts::DEFAULT_SEARCH_ENDPOINT;
use crate::uploads::consts::DEFAULT_BUCKET_NAME;
use clap::Parser;
use std::net::SocketAddr;
use url::Url;

/// Every option can also be set through the environment variable named
/// after it.
#[derive(Debug, Parser)]
pub struct Args {
    #[arg(long, env)]
    #[arg(default_value = "0.0.0.0:3030")]
    pub listen_address: SocketAddr,
    /// Events tagged with a `task` marker are shipped here when set.
    #[arg(long, env)]
    pub quickwit_url: Option<Url>,
    #[arg(long, env)]
    pub verification_token: String,
    #[arg(long, env = "SLACK_SIGNING_SECRET")]
    pub signing_secret: Option<String>,
    #[arg(long, env)]
    #[arg(default_value = "")]
    pub google_api_key: String,
    #[arg(long, env)]
    #[arg(default_value = "")]
    pub custom_search_engine_id: String,
    #[arg(long, env)]
    #[arg(default_value = DEFAULT_SEARCH_ENDPOINT)]
    pub search_endpoint: Url,
    #[arg(long, env)]
    #[arg(default_value = DEFAULT_BUCKET_NAME)]
    pub s3_bucket: String,
    /// Base of the public download URLs. Defaults to the bucket endpoint.
    #[arg(long, env)]
    pub s3_public_base_url: Option<Url>,
    #[arg(long, env)]
    #[arg(default_value_t = 30)]
    pub http_timeout_secs: u64,
    /// Upper bound on the synchronous slash-command response.
    #[arg(long, env)]
    #[arg(default_value_t = 2500)]
    pub ack_timeout_ms: u64,
    #[arg(long, env)]
    #[arg(default_value_t = 64)]
    pub job_queue_capacity: usize,
}
