use crate::cli::Args;
use crate::network::client::NetworkClient;
use crate::search::client::CustomImageSearchClient;

pub mod client;
pub mod consts;
pub mod models;
pub mod responses;
#[cfg(test)]
pub mod tests;

pub fn init(args: &Args, network: &NetworkClient) -> CustomImageSearchClient {
    if args.google_api_key.is_empty() || args.custom_search_engine_id.is_empty() {
        tracing::warn!("Custom Search credentials are empty. Keyword lookups will fail.");
    }
    CustomImageSearchClient::new(
        network.clone(),
        args.search_endpoint.clone(),
        args.google_api_key.clone(),
        args.custom_search_engine_id.clone(),
    )
}
