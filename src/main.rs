use crate::cli::Args;
use crate::commands::pipeline::LgtmPipeline;
use crate::jobs::worker::JobWorker;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

mod app_context;
mod cli;
mod commands;
mod health;
mod http;
mod jobs;
mod lgtm;
mod logging;
mod network;
mod search;
mod uploads;
mod webhooks;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    logging::init(&args);

    let network = network::init(&args);
    let search = search::init(&args, &network);
    let uploader = uploads::init(&args);
    let (broker, consumer) = jobs::init(&args);
    let pipeline = LgtmPipeline::new(search, &network, uploader, StdRng::from_entropy());
    JobWorker::new(consumer, broker.downgrade(), pipeline).spawn();

    let app_context = app_context::init(&args, broker);
    let router = http::router::new(&args, app_context);
    let listener = tokio::net::TcpListener::bind(args.listen_address)
        .await
        .expect("Failed to bind the listen address.");
    tracing::info!(listen_address = %args.listen_address, "Serving slash commands.");
    axum::serve(listener, router)
        .await
        .expect("Failed to start the server.");
}
