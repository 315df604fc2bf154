//! Test helpers: a scripted in-memory media backend so gateway tests run
//! without a network, provider credentials, or env mutation.

#![cfg(test)]

use crate::storage::{MediaBackend, UploadOptions};
use crate::types::{RemoteMedia, ResourceType};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// What the fake backend observed for one upload call.
#[derive(Debug, Clone)]
pub struct SeenUpload {
    pub path: PathBuf,
    /// Whether the scratch file existed on disk at call time.
    pub existed: bool,
    pub contents: Vec<u8>,
    pub resource_type: ResourceType,
    pub folder: String,
    pub options: UploadOptions,
}

pub struct FakeBackend {
    /// When set, both calls fail with this message instead of succeeding.
    pub fail_with: Option<String>,
    pub secure_url: String,
    pub resource_id: String,
    pub uploads: Mutex<Vec<SeenUpload>>,
    pub destroyed: Mutex<Vec<(String, ResourceType)>>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            fail_with: None,
            secure_url: "https://res.example.com/demo/video/upload/v1/viewly/videos/abc123.mp4"
                .to_string(),
            resource_id: "viewly/videos/abc123".to_string(),
            uploads: Mutex::new(Vec::new()),
            destroyed: Mutex::new(Vec::new()),
        }
    }
}

impl FakeBackend {
    pub fn succeeding() -> Self {
        Self::default()
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }
}

#[async_trait]
impl MediaBackend for FakeBackend {
    async fn upload(
        &self,
        path: &Path,
        resource_type: ResourceType,
        folder: &str,
        options: UploadOptions,
    ) -> Result<RemoteMedia> {
        let existed = path.exists();
        let contents = std::fs::read(path).unwrap_or_default();
        self.uploads.lock().unwrap().push(SeenUpload {
            path: path.to_path_buf(),
            existed,
            contents,
            resource_type,
            folder: folder.to_string(),
            options,
        });
        if let Some(message) = &self.fail_with {
            return Err(anyhow!("{message}"));
        }
        Ok(RemoteMedia {
            secure_url: self.secure_url.clone(),
            resource_id: self.resource_id.clone(),
        })
    }

    async fn destroy(&self, resource_id: &str, resource_type: ResourceType) -> Result<()> {
        self.destroyed
            .lock()
            .unwrap()
            .push((resource_id.to_string(), resource_type));
        if let Some(message) = &self.fail_with {
            return Err(anyhow!("{message}"));
        }
        Ok(())
    }
}
