use crate::uploads::env::{AWS_ENDPOINT_URL, AWS_REGION, S3_FORCE_PATH_STYLE};
use crate::uploads::storage::{Blob, FileStorage, StorageError, StoredFile};
use async_trait::async_trait;
use aws_config::environment::EnvironmentVariableCredentialsProvider;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use aws_sdk_s3::{Client, Config};
use sha2::{Digest, Sha256};
use std::env;
use url::{form_urlencoded, Url};

const ACLS_DISABLED_ERROR_CODE: &str = "AccessControlListNotSupported";

/// S3-backed storage. Object keys are derived from file names by hashing, so
/// arbitrary URLs embedded in a name never hit S3 key limits; the raw name
/// and the description travel as object metadata.
#[derive(Debug, Clone)]
pub struct S3FileStorage {
    client: Client,
    bucket: String,
    public_base_url: String,
}

impl S3FileStorage {
    pub fn from_env(bucket: &str, public_base_url: Option<&Url>) -> Result<Self, StorageError> {
        let region = env::var(AWS_REGION).map_err(|_| {
            StorageError::Configuration(format!("the `{AWS_REGION}` variable is not set"))
        })?;
        let endpoint_url = env::var(AWS_ENDPOINT_URL).ok();
        let force_path_style = env::var(S3_FORCE_PATH_STYLE).is_ok_and(|value| value == "true");

        let mut config_builder = Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(region.clone()))
            .credentials_provider(EnvironmentVariableCredentialsProvider::new());
        if let Some(endpoint_url) = &endpoint_url {
            // Custom endpoint for local development against LocalStack / MinIO.
            config_builder = config_builder.endpoint_url(endpoint_url);
        }
        if force_path_style {
            config_builder = config_builder.force_path_style(true);
        }
        let client = Client::from_conf(config_builder.build());

        let public_base_url = match (public_base_url, &endpoint_url) {
            (Some(base), _) => base.as_str().trim_end_matches('/').to_string(),
            (None, Some(endpoint)) => format!("{}/{bucket}", endpoint.trim_end_matches('/')),
            (None, None) => format!("https://{bucket}.s3.{region}.amazonaws.com"),
        };

        Ok(Self {
            client,
            bucket: bucket.to_string(),
            public_base_url,
        })
    }

    fn stored_file(&self, name: &str, key: &S3ObjectKey) -> StoredFile {
        StoredFile {
            name: name.to_string(),
            download_url: format!("{}/{}", self.public_base_url, key.as_ref()),
        }
    }
}

#[async_trait]
impl FileStorage for S3FileStorage {
    async fn find_by_name(&self, name: &str) -> Result<Option<StoredFile>, StorageError> {
        let key = S3ObjectKey::for_name(name);
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key.as_ref())
            .send()
            .await
        {
            Ok(_) => Ok(Some(self.stored_file(name, &key))),
            Err(err) if err.as_service_error().is_some_and(|err| err.is_not_found()) => Ok(None),
            Err(err) => Err(StorageError::Backend {
                operation: "head_object",
                message: DisplayErrorContext(&err).to_string(),
            }),
        }
    }

    async fn create(&self, blob: &Blob, description: &str) -> Result<StoredFile, StorageError> {
        let key = S3ObjectKey::for_name(&blob.name);
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key.as_ref())
            .body(ByteStream::from(blob.bytes.clone()))
            .content_type(blob.content_type)
            .content_length(blob.bytes.len() as i64)
            .metadata("name", metadata_value(&blob.name))
            .metadata("description", metadata_value(description))
            .send()
            .await
            .map_err(|err| StorageError::Backend {
                operation: "put_object",
                message: DisplayErrorContext(&err).to_string(),
            })?;
        Ok(self.stored_file(&blob.name, &key))
    }

    async fn share_with_anyone(&self, file: &StoredFile) -> Result<(), StorageError> {
        let key = S3ObjectKey::for_name(&file.name);
        match self
            .client
            .put_object_acl()
            .bucket(&self.bucket)
            .key(key.as_ref())
            .acl(ObjectCannedAcl::PublicRead)
            .send()
            .await
        {
            Ok(_) => Ok(()),
            Err(err) if acls_disabled(err.code()) => {
                tracing::debug!(
                    bucket = %self.bucket,
                    "Object ACLs are disabled, relying on the bucket policy for public reads."
                );
                Ok(())
            }
            Err(err) => Err(StorageError::Backend {
                operation: "put_object_acl",
                message: DisplayErrorContext(&err).to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3ObjectKey(String);

impl S3ObjectKey {
    const PREFIX: &'static str = "lgtm";

    pub fn for_name(name: &str) -> Self {
        Self(format!(
            "{}/{:x}.png",
            Self::PREFIX,
            Sha256::digest(name.as_bytes())
        ))
    }
}

impl AsRef<str> for S3ObjectKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Buckets with "bucket owner enforced" object ownership reject every ACL
/// request with this code; public access then comes from the bucket policy.
fn acls_disabled(error_code: Option<&str>) -> bool {
    error_code == Some(ACLS_DISABLED_ERROR_CODE)
}

// S3 metadata must be plain ASCII.
fn metadata_value(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
