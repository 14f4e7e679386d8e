use crate::commands::consts::{
    ORIGIN_DESCRIPTION_PREFIX, UPLOAD_NAME_PREFIX, UPLOAD_NAME_SUFFIX,
};
use crate::commands::requests::SlashCommand;
use crate::lgtm::img::{self, ComposeError};
use crate::network::client::{NetworkClient, NetworkError};
use crate::network::transport::OutboundRequest;
use crate::search::client::{CustomImageSearchClient, SearchError};
use crate::search::models::ImageItem;
use crate::uploads::consts::PNG_CONTENT_TYPE;
use crate::uploads::storage::Blob;
use crate::uploads::upload::IdempotentUploader;
use crate::webhooks::client::{SlackWebhook, WebhookError};
use axum::body::Bytes;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;
use tokio::task::JoinError;
use url::Url;

static IMAGE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("Failed to compile the URL pattern."));

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    Resolving,
    Fetching,
    Composing,
    Uploading,
    Notifying,
    Done,
    Failed,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Resolving => "resolving",
            PipelineStage::Fetching => "fetching",
            PipelineStage::Composing => "composing",
            PipelineStage::Uploading => "uploading",
            PipelineStage::Notifying => "notifying",
            PipelineStage::Done => "done",
            PipelineStage::Failed => "failed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum PipelineErrorKind {
    #[error("image search failed: {0}")]
    Search(#[from] SearchError),
    #[error("image search returned no results for {keyword:?}")]
    NoSearchResults { keyword: String },
    #[error("invalid image URL {url:?}: {source}")]
    InvalidImageUrl { url: String, source: url::ParseError },
    #[error("failed to fetch the source image (status {status}): {0}", status = .0.status())]
    Fetch(#[from] NetworkError),
    #[error("failed to compose the LGTM image: {0}")]
    Compose(#[from] ComposeError),
    #[error("image composition task did not finish: {0}")]
    ComposeTask(#[from] JoinError),
    #[error("invalid response_url {url:?}: {source}")]
    InvalidResponseUrl { url: String, source: url::ParseError },
    #[error("failed to notify the user: {0}")]
    Webhook(#[from] WebhookError),
}

#[derive(Debug, Error)]
#[error("LGTM job failed while {stage}: {kind}")]
pub struct PipelineError {
    pub stage: PipelineStage,
    #[source]
    pub kind: PipelineErrorKind,
}

/// Deferred phase of `/lgtm`, run once per queued command. Each step runs
/// only after the previous one finished; no step is retried.
pub struct LgtmPipeline {
    search: CustomImageSearchClient,
    network: NetworkClient,
    uploader: IdempotentUploader,
    rng: StdRng,
}

impl LgtmPipeline {
    pub fn new(
        search: CustomImageSearchClient,
        network: &NetworkClient,
        uploader: IdempotentUploader,
        rng: StdRng,
    ) -> Self {
        Self {
            search,
            network: network.clone(),
            uploader,
            rng,
        }
    }

    /// Returns the URL of the uploaded LGTM image once the user has been
    /// notified.
    pub async fn execute(&mut self, command: &SlashCommand) -> Result<String, PipelineError> {
        let mut stage = PipelineStage::Resolving;
        match self.run(command, &mut stage).await {
            Ok(uploaded_url) => {
                advance(&mut stage, PipelineStage::Done);
                Ok(uploaded_url)
            }
            Err(kind) => {
                let failed_at = stage;
                advance(&mut stage, PipelineStage::Failed);
                Err(PipelineError {
                    stage: failed_at,
                    kind,
                })
            }
        }
    }

    async fn run(
        &mut self,
        command: &SlashCommand,
        stage: &mut PipelineStage,
    ) -> Result<String, PipelineErrorKind> {
        let source_url = self.resolve(&command.text).await?;

        advance(stage, PipelineStage::Fetching);
        let source = Url::parse(&source_url).map_err(|source| {
            PipelineErrorKind::InvalidImageUrl {
                url: source_url.clone(),
                source,
            }
        })?;
        let original = self
            .network
            .for_service("image_fetch")
            .call(OutboundRequest::get(source))
            .await
            .into_result()?;

        advance(stage, PipelineStage::Composing);
        let composed = tokio::task::spawn_blocking(move || img::compose(&original)).await??;

        advance(stage, PipelineStage::Uploading);
        let blob = Blob {
            name: upload_name(&source_url),
            content_type: PNG_CONTENT_TYPE,
            bytes: Bytes::from(composed),
        };
        let uploaded_url = self
            .uploader
            .upload(&blob, &origin_description(&source_url))
            .await;

        advance(stage, PipelineStage::Notifying);
        let response_url = Url::parse(&command.response_url).map_err(|source| {
            PipelineErrorKind::InvalidResponseUrl {
                url: command.response_url.clone(),
                source,
            }
        })?;
        SlackWebhook::new(&self.network, response_url)
            .send_text(&lgtm_markdown(&uploaded_url), None)
            .await?;

        tracing::info!(source = %source_url, uploaded = %uploaded_url, "Posted an LGTM image.");
        Ok(uploaded_url)
    }

    async fn resolve(&mut self, text: &str) -> Result<String, PipelineErrorKind> {
        if let Some(url) = extract_url(text) {
            return Ok(url.to_string());
        }
        let items = self.search.search(text, 1).await?;
        pick_image(&items, &mut self.rng)
            .map(|item| item.link.clone())
            .ok_or_else(|| PipelineErrorKind::NoSearchResults {
                keyword: text.to_string(),
            })
    }
}

fn advance(stage: &mut PipelineStage, next: PipelineStage) {
    tracing::debug!(from = %stage, to = %next, "LGTM job advanced.");
    *stage = next;
}

pub fn extract_url(text: &str) -> Option<&str> {
    IMAGE_URL.find(text).map(|found| found.as_str())
}

/// Uniform pick; `None` for an empty result set.
pub fn pick_image<'a>(items: &'a [ImageItem], rng: &mut StdRng) -> Option<&'a ImageItem> {
    items.choose(rng)
}

pub fn upload_name(source_url: &str) -> String {
    format!("{UPLOAD_NAME_PREFIX}{source_url}{UPLOAD_NAME_SUFFIX}")
}

pub fn origin_description(source_url: &str) -> String {
    format!("{ORIGIN_DESCRIPTION_PREFIX}{source_url}")
}

pub fn lgtm_markdown(image_url: &str) -> String {
    format!("![LGTM]({image_url})")
}
