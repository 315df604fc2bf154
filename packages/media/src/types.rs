use serde::{Deserialize, Serialize};

/// Resource kind on the provider's axis; selects the API path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Video,
    Image,
}

impl ResourceType {
    pub fn as_api(&self) -> &'static str {
        match self {
            ResourceType::Video => "video",
            ResourceType::Image => "image",
        }
    }

    /// Fallback extension when an uploaded filename carries none.
    pub fn default_extension(&self) -> &'static str {
        match self {
            ResourceType::Video => "mp4",
            ResourceType::Image => "jpg",
        }
    }
}

/// Media kind on the application's axis. Determines the provider resource
/// type, the remote folder namespace, and the local URL segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Video,
    Thumbnail,
    Profile,
}

impl MediaKind {
    pub fn resource_type(&self) -> ResourceType {
        match self {
            MediaKind::Video => ResourceType::Video,
            MediaKind::Thumbnail | MediaKind::Profile => ResourceType::Image,
        }
    }

    /// Remote destination folder, namespaced per media kind so videos,
    /// thumbnails and profile images never share a bucket path.
    pub fn remote_folder(&self) -> &'static str {
        match self {
            MediaKind::Video => "viewly/videos",
            MediaKind::Thumbnail => "viewly/thumbnails",
            MediaKind::Profile => "viewly/profiles",
        }
    }

    /// Path segment under the local media-serving prefix.
    pub fn segment(&self) -> &'static str {
        match self {
            MediaKind::Video => "videos",
            MediaKind::Thumbnail => "thumbnails",
            MediaKind::Profile => "profiles",
        }
    }
}

/// Durable locator pair returned by a successful remote upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteMedia {
    /// Complete, absolute URL; served to clients verbatim.
    pub secure_url: String,
    /// Opaque provider-assigned id, required to delete the resource later.
    pub resource_id: String,
}

/// A user-submitted file as the web layer hands it over: the original
/// filename plus the already-buffered request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }
}

/// Storage location of one media asset, as persisted on a video or user
/// record. A well-formed record has exactly one of `local_path` /
/// `remote_url` set, but readers must tolerate any combination
/// (legacy and partially-migrated rows exist).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRecord {
    /// Filename or relative path when stored on local disk.
    pub local_path: Option<String>,
    /// Absolute URL when stored remotely; takes precedence at read time.
    pub remote_url: Option<String>,
    /// Provider resource id matching `remote_url`; meaningless without it.
    pub remote_id: Option<String>,
}

impl MediaRecord {
    pub fn local(path: impl Into<String>) -> Self {
        Self {
            local_path: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn remote(url: impl Into<String>, resource_id: impl Into<String>) -> Self {
        Self {
            remote_url: Some(url.into()),
            remote_id: Some(resource_id.into()),
            ..Self::default()
        }
    }

    /// Record a remote upload, clearing any stale local path so the record
    /// stays well-formed.
    pub fn set_remote(&mut self, media: RemoteMedia) {
        self.remote_url = Some(media.secure_url);
        self.remote_id = Some(media.resource_id);
        self.local_path = None;
    }

    /// Record a local save, clearing any stale remote locator.
    pub fn set_local(&mut self, path: impl Into<String>) {
        self.local_path = Some(path.into());
        self.remote_url = None;
        self.remote_id = None;
    }

    pub fn has_media(&self) -> bool {
        let set = |field: &Option<String>| {
            field.as_deref().map(str::trim).is_some_and(|s| !s.is_empty())
        };
        set(&self.remote_url) || set(&self.local_path)
    }
}
