use crate::network::client::{NetworkClient, NetworkError};
use crate::network::transport::OutboundRequest;
use crate::search::consts::{LANGUAGE_RESTRICTION, PAGE_SIZE, SAFE_SEARCH};
use crate::search::models::ImageItem;
use crate::search::responses::CustomSearchResponse;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Network(#[from] NetworkError),
    #[error("malformed Custom Search response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

#[derive(Clone)]
pub struct CustomImageSearchClient {
    network: NetworkClient,
    endpoint: Url,
    api_key: String,
    search_engine_id: String,
}

impl CustomImageSearchClient {
    pub fn new(
        network: NetworkClient,
        endpoint: Url,
        api_key: String,
        search_engine_id: String,
    ) -> Self {
        Self {
            network: network.for_service("custom_search"),
            endpoint,
            api_key,
            search_engine_id,
        }
    }

    /// `page` is 1-based; each page holds `PAGE_SIZE` results.
    pub async fn search(&self, keyword: &str, page: u32) -> Result<Vec<ImageItem>, SearchError> {
        let start = PAGE_SIZE * (page.max(1) - 1) + 1;
        let request = OutboundRequest::get(self.endpoint_for(keyword, start));
        let body = self.network.call(request).await.into_result()?;
        let response: CustomSearchResponse = serde_json::from_slice(&body)?;
        let items = response
            .items
            .into_iter()
            .map(ImageItem::from)
            .collect::<Vec<_>>();
        tracing::debug!(keyword, page, hits = items.len(), "Image search finished.");
        Ok(items)
    }

    fn endpoint_for(&self, keyword: &str, start: u32) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("key", &self.api_key)
            .append_pair("cx", &self.search_engine_id)
            .append_pair("searchType", "image")
            .append_pair("q", keyword)
            .append_pair("safe", SAFE_SEARCH)
            .append_pair("lr", LANGUAGE_RESTRICTION)
            .append_pair("num", &PAGE_SIZE.to_string())
            .append_pair("start", &start.to_string());
        url
    }
}
