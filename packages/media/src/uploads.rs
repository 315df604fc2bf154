use crate::config::RemoteMediaConfig;
use crate::error::UploadError;
use crate::storage::cloudinary::CloudinaryBackend;
use crate::storage::{MediaBackend, UploadOptions};
use crate::types::{RemoteMedia, ResourceType, UploadedFile};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Upload gateway: the one place that knows whether a remote media backend
/// exists.
///
/// The backend is an injected capability; `None` means no remote credentials
/// were present, and every upload reports [`UploadError::NotConfigured`] so
/// the caller falls back to local storage. No failure crosses this boundary
/// as a panic or raw provider error.
pub struct MediaGateway {
    backend: Option<Arc<dyn MediaBackend>>,
}

impl MediaGateway {
    pub fn new(backend: Option<Arc<dyn MediaBackend>>) -> Self {
        Self { backend }
    }

    /// Wire the gateway from `REMOTE_MEDIA_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let backend = match RemoteMediaConfig::from_env() {
            Some(config) => {
                info!("media gateway: remote backend configured");
                Some(Arc::new(CloudinaryBackend::new(config)?) as Arc<dyn MediaBackend>)
            }
            None => {
                debug!("media gateway: no remote credentials, uploads stay local");
                None
            }
        };
        Ok(Self { backend })
    }

    pub fn is_remote_configured(&self) -> bool {
        self.backend.is_some()
    }

    /// Push an upload to the remote backend.
    ///
    /// The bytes are spooled to a uniquely named scratch file first so the
    /// backend reads by path; the scratch copy is removed on every exit
    /// path, success or failure.
    pub async fn upload_media(
        &self,
        file: Option<&UploadedFile>,
        resource_type: ResourceType,
        folder: &str,
    ) -> Result<RemoteMedia, UploadError> {
        let file = match file {
            Some(file) if !file.filename.trim().is_empty() => file,
            _ => return Err(UploadError::NoFileSelected),
        };
        let backend = self.backend.as_ref().ok_or(UploadError::NotConfigured)?;

        let extension = file_extension(&file.filename)
            .unwrap_or_else(|| resource_type.default_extension().to_string());
        let scratch = tempfile::Builder::new()
            .prefix("media-upload-")
            .suffix(&format!(".{extension}"))
            .tempfile()
            .map_err(|e| UploadError::Backend(format!("scratch file: {e}")))?;
        tokio::fs::write(scratch.path(), &file.bytes)
            .await
            .map_err(|e| UploadError::Backend(format!("scratch file: {e}")))?;

        debug!(
            "uploads.upload_media: type={} folder={} bytes={}",
            resource_type.as_api(),
            folder,
            file.bytes.len()
        );

        // `scratch` outlives the call and deletes the file on drop, on the
        // success and failure paths alike.
        let result = backend
            .upload(scratch.path(), resource_type, folder, UploadOptions::default())
            .await;
        match result {
            Ok(media) => Ok(media),
            Err(e) => {
                warn!("uploads.upload_media failed: {e:#}");
                Err(UploadError::Backend(e.to_string()))
            }
        }
    }

    /// Best-effort remote deletion. `false` for a missing id or unconfigured
    /// backend (no network call), `false` on provider failure. Callers
    /// delete their own record either way.
    pub async fn delete_media(
        &self,
        resource_id: Option<&str>,
        resource_type: ResourceType,
    ) -> bool {
        let resource_id = match resource_id.map(str::trim) {
            Some(id) if !id.is_empty() => id,
            _ => return false,
        };
        let backend = match &self.backend {
            Some(backend) => backend,
            None => return false,
        };
        match backend.destroy(resource_id, resource_type).await {
            Ok(()) => {
                debug!("uploads.delete_media: removed {resource_id}");
                true
            }
            Err(e) => {
                warn!("uploads.delete_media failed for {resource_id}: {e:#}");
                false
            }
        }
    }
}

/// Collision-free filename for the caller's local-fallback save:
/// timestamp plus a short unique suffix, keeping the (sanitized) extension.
pub fn unique_local_filename(original: &str, resource_type: ResourceType) -> String {
    let stamp = chrono::Utc::now().format("%Y%m%d%H%M%S");
    let nonce = uuid::Uuid::new_v4().simple().to_string();
    let extension = file_extension(original)
        .unwrap_or_else(|| resource_type.default_extension().to_string());
    format!("{stamp}_{}.{extension}", &nonce[..8])
}

fn file_extension(filename: &str) -> Option<String> {
    let (_, extension) = filename.rsplit_once('.')?;
    let extension = extension.trim().to_lowercase();
    if extension.is_empty() || !extension.chars().all(|c| c.is_ascii_alphanumeric()) {
        None
    } else {
        Some(extension)
    }
}
