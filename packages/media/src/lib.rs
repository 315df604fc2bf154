//! Media upload gateway and locator resolution for the Viewly video service.
//!
//! Uploads go to the remote media backend when the `REMOTE_MEDIA_*`
//! credentials are set and stay on local disk otherwise; readers resolve
//! either shape of record through [`resolver::MediaUrlResolver`] without
//! knowing which storage path was taken.

pub mod config;
pub mod error;
pub mod resolver;
pub mod storage;
pub mod types;
pub mod uploads;


#[cfg(test)]
mod test_support;

pub use config::{is_remote_backend_configured, RemoteMediaConfig};
pub use error::UploadError;
pub use resolver::{resolve_media_url, MediaUrlResolver};
pub use types::{MediaKind, MediaRecord, RemoteMedia, ResourceType, UploadedFile};
pub use uploads::{unique_local_filename, MediaGateway};
