use crate::types::{MediaKind, MediaRecord};
use std::path::Path;

/// Default URL prefix the local static-file server is mounted under.
pub const DEFAULT_SERVE_PREFIX: &str = "/media";

/// Read-time projection of a [`MediaRecord`] to the one URL a client should
/// be shown. Pure: no I/O, never fails; "no media" is `None`, not an error.
#[derive(Debug, Clone)]
pub struct MediaUrlResolver {
    serve_prefix: String,
}

impl Default for MediaUrlResolver {
    fn default() -> Self {
        Self::new(DEFAULT_SERVE_PREFIX)
    }
}

impl MediaUrlResolver {
    pub fn new(serve_prefix: impl Into<String>) -> Self {
        let raw = serve_prefix.into();
        let trimmed = raw.trim().trim_matches('/');
        Self {
            serve_prefix: format!("/{trimmed}"),
        }
    }

    /// Strict precedence, no merging: a remote URL is returned verbatim,
    /// otherwise a local path is synthesized from the filename's basename,
    /// otherwise `None`.
    pub fn resolve(
        &self,
        record: &MediaRecord,
        kind: MediaKind,
        base_url: &str,
    ) -> Option<String> {
        if let Some(url) = present(&record.remote_url) {
            return Some(url.to_string());
        }
        let local = present(&record.local_path)?;
        let name = Path::new(local).file_name()?.to_str()?;
        Some(format!(
            "{}{}/{}/{}",
            base_url.trim_end_matches('/'),
            self.serve_prefix,
            kind.segment(),
            name
        ))
    }
}

/// Resolve with the default `/media` serve prefix.
pub fn resolve_media_url(
    record: &MediaRecord,
    kind: MediaKind,
    base_url: &str,
) -> Option<String> {
    MediaUrlResolver::default().resolve(record, kind, base_url)
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://localhost:8080";

    #[test]
    fn remote_url_wins_over_local_path() {
        let record = MediaRecord {
            remote_url: Some("https://cdn.example/videos/v1.mp4".to_string()),
            local_path: Some("v1.mp4".to_string()),
            remote_id: Some("viewly/videos/v1".to_string()),
        };
        assert_eq!(
            resolve_media_url(&record, MediaKind::Video, BASE).as_deref(),
            Some("https://cdn.example/videos/v1.mp4")
        );
    }

    #[test]
    fn local_thumbnail_synthesizes_media_path() {
        let record = MediaRecord::local("thumb1.png");
        let url = resolve_media_url(&record, MediaKind::Thumbnail, BASE).unwrap();
        assert_eq!(url, "http://localhost:8080/media/thumbnails/thumb1.png");
        assert!(url.ends_with("/thumbnails/thumb1.png"));
    }

    #[test]
    fn local_video_and_profile_use_their_segments() {
        let video = MediaRecord::local("clip.mp4");
        assert_eq!(
            resolve_media_url(&video, MediaKind::Video, BASE).as_deref(),
            Some("http://localhost:8080/media/videos/clip.mp4")
        );
        let profile = MediaRecord::local("20240101_profile.jpg");
        assert_eq!(
            resolve_media_url(&profile, MediaKind::Profile, BASE).as_deref(),
            Some("http://localhost:8080/media/profiles/20240101_profile.jpg")
        );
    }

    #[test]
    fn empty_record_resolves_to_none() {
        assert_eq!(
            resolve_media_url(&MediaRecord::default(), MediaKind::Video, BASE),
            None
        );
    }

    #[test]
    fn blank_fields_count_as_absent() {
        let record = MediaRecord {
            remote_url: Some("   ".to_string()),
            local_path: Some("".to_string()),
            remote_id: None,
        };
        assert_eq!(resolve_media_url(&record, MediaKind::Video, BASE), None);
    }

    #[test]
    fn nested_local_path_reduces_to_basename() {
        let record = MediaRecord::local("uploads/videos/v2.mp4");
        assert_eq!(
            resolve_media_url(&record, MediaKind::Video, BASE).as_deref(),
            Some("http://localhost:8080/media/videos/v2.mp4")
        );
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let record = MediaRecord::local("thumb1.png");
        assert_eq!(
            resolve_media_url(&record, MediaKind::Thumbnail, "http://localhost:8080/").as_deref(),
            Some("http://localhost:8080/media/thumbnails/thumb1.png")
        );
    }

    #[test]
    fn custom_serve_prefix_is_normalized() {
        let resolver = MediaUrlResolver::new("static/");
        let record = MediaRecord::local("thumb1.png");
        assert_eq!(
            resolver
                .resolve(&record, MediaKind::Thumbnail, BASE)
                .as_deref(),
            Some("http://localhost:8080/static/thumbnails/thumb1.png")
        );
    }
}
