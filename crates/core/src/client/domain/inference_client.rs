use thiserror::Error;

use crate::shared::detection::Detection;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("failed to build HTTP client: {0}")]
    Init(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("backend returned {status} for {url}")]
    Status { url: String, status: u16 },
    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Domain interface for the external inference service.
///
/// Both calls are synchronous request/response; callers run them on worker
/// threads, hence `Send + Sync`.
pub trait InferenceClient: Send + Sync {
    /// POST a still image and return its detections.
    fn predict_image(&self, bytes: Vec<u8>, filename: &str) -> Result<Vec<Detection>, ClientError>;

    /// POST one JPEG-encoded live frame and return its detections.
    fn predict_frame(&self, jpeg: Vec<u8>) -> Result<Vec<Detection>, ClientError>;
}
