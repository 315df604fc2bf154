use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

use crate::types::{RemoteMedia, ResourceType};

pub mod cloudinary;

/// Upload flags forwarded to the remote provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadOptions {
    /// Derive a human-readable name from the uploaded filename.
    pub use_filename: bool,
    /// Let the provider suffix the name so two uploads with the same base
    /// name never collide.
    pub unique_filename: bool,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            use_filename: true,
            unique_filename: true,
        }
    }
}

/// Trait for remote media backend implementations
#[async_trait]
pub trait MediaBackend: Send + Sync {
    /// Upload the file at `path` into `folder`, returning the durable
    /// locator pair. The file is read by path so transport details stay
    /// decoupled from the in-memory request body.
    async fn upload(
        &self,
        path: &Path,
        resource_type: ResourceType,
        folder: &str,
        options: UploadOptions,
    ) -> Result<RemoteMedia>;

    /// Remove a previously uploaded resource.
    async fn destroy(&self, resource_id: &str, resource_type: ResourceType) -> Result<()>;
}
