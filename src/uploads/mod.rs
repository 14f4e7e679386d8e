use crate::cli::Args;
use crate::uploads::env::{
    AWS_ACCESS_KEY_ID, AWS_ENDPOINT_URL, AWS_REGION, AWS_SECRET_ACCESS_KEY, S3_FORCE_PATH_STYLE,
};
use crate::uploads::s3::S3FileStorage;
use crate::uploads::upload::IdempotentUploader;
use crate::warn_if_env_var_is_missing;
use std::sync::Arc;

pub mod consts;
pub mod env;
pub mod s3;
pub mod storage;
pub mod upload;

pub fn init(args: &Args) -> IdempotentUploader {
    warn_if_env_var_is_missing!(AWS_ACCESS_KEY_ID, "Uploads will fall back to placeholders.");
    warn_if_env_var_is_missing!(AWS_SECRET_ACCESS_KEY, "Uploads will fall back to placeholders.");
    warn_if_env_var_is_missing!(AWS_REGION, "S3 storage can't be configured.");
    warn_if_env_var_is_missing!(AWS_ENDPOINT_URL, "Will use global AWS S3.");
    warn_if_env_var_is_missing!(S3_FORCE_PATH_STYLE, "Will use global AWS S3.");
    let storage = S3FileStorage::from_env(&args.s3_bucket, args.s3_public_base_url.as_ref())
        .unwrap_or_else(|err| panic!("Failed to configure S3 storage: {err}"));
    tracing::info!(bucket = %args.s3_bucket, "Initialized S3 storage.");
    IdempotentUploader::new(Arc::new(storage))
}
