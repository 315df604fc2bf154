use super::{MediaBackend, UploadOptions};
use crate::config::RemoteMediaConfig;
use crate::types::{RemoteMedia, ResourceType};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

const API_BASE: &str = "https://api.cloudinary.com/v1_1";

// The provider transport has no default deadline worth relying on, so cap
// the whole call. Uploads carry video payloads, hence the generous bound.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Cloudinary media backend (production).
///
/// Uses the signed REST API directly: a SHA-256 signature over the sorted
/// request parameters plus the API secret, sent alongside the multipart body.
pub struct CloudinaryBackend {
    config: RemoteMediaConfig,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl CloudinaryBackend {
    pub fn new(config: RemoteMediaConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().timeout(REQUEST_TIMEOUT);
        if let Some(proxy) = &config.proxy {
            builder = builder
                .proxy(reqwest::Proxy::all(proxy).context("invalid REMOTE_MEDIA_PROXY value")?);
            tracing::info!("storage.cloudinary: routing through outbound proxy");
        }
        let http = builder
            .build()
            .context("failed to build media backend http client")?;
        Ok(Self { config, http })
    }

    fn endpoint(&self, resource_type: ResourceType, action: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            API_BASE,
            self.config.account,
            resource_type.as_api(),
            action
        )
    }

    /// The payload the signature covers: alphabetically sorted `key=value`
    /// pairs joined with `&`. `file`, `api_key` and the signature itself are
    /// excluded by construction.
    fn string_to_sign(params: &BTreeMap<&str, String>) -> String {
        params
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&")
    }

    fn sign(params: &BTreeMap<&str, String>, secret: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(Self::string_to_sign(params).as_bytes());
        hasher.update(secret.as_bytes());
        hex::encode(hasher.finalize())
    }

    fn timestamp() -> String {
        chrono::Utc::now().timestamp().to_string()
    }

    async fn send_form(&self, url: &str, form: Form) -> Result<reqwest::Response> {
        let response = self.http.post(url).multipart(form).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiError>(&body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| format!("http status {status}"));
        Err(anyhow!("provider rejected request: {message}"))
    }
}

#[async_trait]
impl MediaBackend for CloudinaryBackend {
    async fn upload(
        &self,
        path: &Path,
        resource_type: ResourceType,
        folder: &str,
        options: UploadOptions,
    ) -> Result<RemoteMedia> {
        let timestamp = Self::timestamp();
        let mut params = BTreeMap::new();
        params.insert("folder", folder.to_string());
        params.insert("timestamp", timestamp.clone());
        params.insert("unique_filename", options.unique_filename.to_string());
        params.insert("use_filename", options.use_filename.to_string());
        let signature = Self::sign(&params, &self.config.secret);

        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read scratch file {}", path.display()))?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload")
            .to_string();

        let form = Form::new()
            .part("file", Part::bytes(data).file_name(file_name))
            .text("api_key", self.config.key.clone())
            .text("timestamp", timestamp)
            .text("folder", folder.to_string())
            .text("use_filename", options.use_filename.to_string())
            .text("unique_filename", options.unique_filename.to_string())
            .text("signature", signature);

        let response = self
            .send_form(&self.endpoint(resource_type, "upload"), form)
            .await?;
        let payload: UploadResponse = response
            .json()
            .await
            .context("unexpected upload response payload")?;
        debug!("storage.cloudinary.upload: public_id={}", payload.public_id);
        Ok(RemoteMedia {
            secure_url: payload.secure_url,
            resource_id: payload.public_id,
        })
    }

    async fn destroy(&self, resource_id: &str, resource_type: ResourceType) -> Result<()> {
        let timestamp = Self::timestamp();
        let mut params = BTreeMap::new();
        params.insert("public_id", resource_id.to_string());
        params.insert("timestamp", timestamp.clone());
        let signature = Self::sign(&params, &self.config.secret);

        let form = Form::new()
            .text("public_id", resource_id.to_string())
            .text("api_key", self.config.key.clone())
            .text("timestamp", timestamp)
            .text("signature", signature);

        self.send_form(&self.endpoint(resource_type, "destroy"), form)
            .await?;
        debug!("storage.cloudinary.destroy: public_id={}", resource_id);
        Ok(())
    }
}
