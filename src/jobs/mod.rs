use crate::cli::Args;
use crate::jobs::broker::{JobBroker, JobConsumer};

pub mod broker;
pub mod models;
pub mod worker;

pub fn init(args: &Args) -> (JobBroker, JobConsumer) {
    tracing::info!(capacity = args.job_queue_capacity, "Initialized the job queue.");
    broker::channel(args.job_queue_capacity)
}
