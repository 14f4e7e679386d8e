use crate::cli::Args;
use crate::logging::consts::{
    DEFAULT_BATCH_SIZE, DEFAULT_FILTER_DIRECTIVE, HTTP_REQUESTS_INDEX, HTTP_REQUEST_MARKER,
    JOB_FAILURES_INDEX, JOB_FAILURE_MARKER, MARKER_FIELD,
};
use crate::logging::quickwit::QuickwitLayerBuilder;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub mod consts;
pub mod quickwit;

pub fn init(args: &Args) {
    let quickwit_layer = args.quickwit_url.clone().map(|quickwit_url| {
        QuickwitLayerBuilder::new(quickwit_url)
            .marker_field(MARKER_FIELD)
            .route(HTTP_REQUEST_MARKER, HTTP_REQUESTS_INDEX)
            .route(JOB_FAILURE_MARKER, JOB_FAILURES_INDEX)
            .with_batch_size(DEFAULT_BATCH_SIZE)
            .build()
    });
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER_DIRECTIVE));
    tracing_subscriber::registry()
        .with(quickwit_layer)
        .with(env_filter)
        .with(fmt::layer())
        .init();
    match &args.quickwit_url {
        Some(url) => tracing::info!(quickwit_url = %url, "Initialized logging."),
        None => tracing::info!("Initialized logging without Quickwit shipping."),
    }
}
