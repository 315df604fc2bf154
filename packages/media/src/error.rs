use thiserror::Error;

/// Failure modes of the upload gateway.
///
/// Every failure here is a value the caller inspects; the gateway never
/// panics and never lets a provider error escape as anything else. Whether a
/// given variant is fatal is entirely the caller's decision.
#[derive(Debug, Error)]
pub enum UploadError {
    /// No file in the request, or a file without a name.
    #[error("no file selected")]
    NoFileSelected,
    /// Remote credentials are absent. Routine in local development; callers
    /// interpret this as "fall back to local storage".
    #[error("remote media backend is not configured")]
    NotConfigured,
    /// The provider call failed, either in transport or provider-side.
    #[error("remote upload failed: {0}")]
    Backend(String),
}
