use crate::network::client::NetworkError;
use crate::network::tests::{scripted_client, ScriptedTransport};
use crate::search::client::{CustomImageSearchClient, SearchError};
use crate::search::models::ImageItem;
use std::collections::HashMap;
use std::sync::Arc;
use url::Url;

pub const ENDPOINT: &str = "https://search.test/customsearch/v1";

pub const TWO_HITS: &str = r#"{
    "kind": "customsearch#search",
    "items": [
        {
            "link": "https://img.test/cat.png",
            "mime": "image/png",
            "image": {"width": 640, "height": 480, "byteSize": 1024}
        },
        {
            "link": "https://img.test/dog.jpg",
            "mime": "image/jpeg",
            "image": {"width": 300, "height": 200}
        }
    ]
}"#;

fn search_client() -> (CustomImageSearchClient, Arc<ScriptedTransport>) {
    let (network, transport) = scripted_client();
    let client = CustomImageSearchClient::new(
        network,
        Url::parse(ENDPOINT).unwrap(),
        String::from("apiKey"),
        String::from("engineId"),
    );
    (client, transport)
}

#[tokio::test]
async fn test_search_maps_items() {
    let (client, transport) = search_client();
    transport.respond(ENDPOINT, 200, TWO_HITS);

    let items = client.search("cat", 1).await.unwrap();

    assert_eq!(
        items,
        vec![
            ImageItem {
                link: String::from("https://img.test/cat.png"),
                mime: String::from("image/png"),
                width: 640,
                height: 480,
            },
            ImageItem {
                link: String::from("https://img.test/dog.jpg"),
                mime: String::from("image/jpeg"),
                width: 300,
                height: 200,
            },
        ]
    );
}

#[tokio::test]
async fn test_search_query_string() {
    let (client, transport) = search_client();
    transport.respond(ENDPOINT, 200, TWO_HITS);

    client.search("かわいい 猫", 3).await.unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    let query = requests[0]
        .url
        .query_pairs()
        .into_owned()
        .collect::<HashMap<_, _>>();
    assert_eq!(query["key"], "apiKey");
    assert_eq!(query["cx"], "engineId");
    assert_eq!(query["searchType"], "image");
    assert_eq!(query["q"], "かわいい 猫");
    assert_eq!(query["safe"], "active");
    assert_eq!(query["lr"], "lang_ja");
    assert_eq!(query["num"], "10");
    assert_eq!(query["start"], "21");
}

#[tokio::test]
async fn test_search_page_zero_is_first_page() {
    let (client, transport) = search_client();
    transport.respond(ENDPOINT, 200, TWO_HITS);

    client.search("cat", 0).await.unwrap();

    let start = transport.requests()[0]
        .url
        .query_pairs()
        .find(|(name, _)| name == "start")
        .map(|(_, value)| value.into_owned());
    assert_eq!(start.as_deref(), Some("1"));
}

#[tokio::test]
async fn test_search_without_items_is_empty() {
    let (client, transport) = search_client();
    transport.respond(ENDPOINT, 200, r#"{"kind": "customsearch#search"}"#);

    let items = client.search("nothing matches this", 1).await.unwrap();

    assert!(items.is_empty());
}

#[tokio::test]
async fn test_search_malformed_body() {
    let (client, transport) = search_client();
    transport.respond(ENDPOINT, 200, r#"{"items": [{"link": 42}]}"#);

    let result = client.search("cat", 1).await;

    assert!(matches!(result, Err(SearchError::MalformedResponse(_))));
}

#[tokio::test]
async fn test_search_propagates_application_failure() {
    let (client, transport) = search_client();
    transport.respond(ENDPOINT, 429, "rate limited");

    let result = client.search("cat", 1).await;

    match result {
        Err(SearchError::Network(NetworkError::Application { status, body })) => {
            assert_eq!(status, 429);
            assert_eq!(body, "rate limited");
        }
        other => panic!("unexpected search result: {other:?}"),
    }
}

#[tokio::test]
async fn test_search_propagates_transport_failure() {
    let (client, transport) = search_client();
    transport.fail(ENDPOINT, "connection refused");

    let result = client.search("cat", 1).await;

    assert!(matches!(
        result,
        Err(SearchError::Network(NetworkError::Transport { status: 500, .. }))
    ));
}
