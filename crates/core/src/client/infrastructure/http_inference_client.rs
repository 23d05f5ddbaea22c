use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;

use crate::client::domain::inference_client::{ClientError, InferenceClient};
use crate::shared::constants::{FRAME_FIELD, IMAGE_FIELD, PREDICT_FRAME_PATH, PREDICT_IMAGE_PATH};
use crate::shared::detection::{parse_detections, Detection};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking multipart client for the two detection endpoints.
pub struct HttpInferenceClient {
    http: Client,
    base_url: String,
}

impl HttpInferenceClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ClientError::Init)?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    fn post_multipart(
        &self,
        path: &str,
        field: &'static str,
        bytes: Vec<u8>,
        filename: String,
        mime: &str,
    ) -> Result<Vec<Detection>, ClientError> {
        let url = self.endpoint_url(path);
        let part = Part::bytes(bytes)
            .file_name(filename)
            .mime_str(mime)
            .map_err(|e| ClientError::Transport {
                url: url.clone(),
                source: e,
            })?;
        let form = Form::new().part(field, part);

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .map_err(|e| ClientError::Transport {
                url: url.clone(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(|e| ClientError::Body {
            url: url.clone(),
            source: e,
        })?;
        Ok(parse_detections(&body))
    }
}

impl InferenceClient for HttpInferenceClient {
    fn predict_image(&self, bytes: Vec<u8>, filename: &str) -> Result<Vec<Detection>, ClientError> {
        self.post_multipart(
            PREDICT_IMAGE_PATH,
            IMAGE_FIELD,
            bytes,
            filename.to_string(),
            mime_for(filename),
        )
    }

    fn predict_frame(&self, jpeg: Vec<u8>) -> Result<Vec<Detection>, ClientError> {
        self.post_multipart(
            PREDICT_FRAME_PATH,
            FRAME_FIELD,
            jpeg,
            "frame.jpg".to_string(),
            "image/jpeg",
        )
    }
}

fn mime_for(filename: &str) -> &'static str {
    match filename.rsplit('.').next().map(str::to_ascii_lowercase) {
        Some(ext) if ext == "png" => "image/png",
        Some(ext) if ext == "bmp" => "image/bmp",
        Some(ext) if ext == "webp" => "image/webp",
        Some(ext) if ext == "tiff" || ext == "tif" => "image/tiff",
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_joins_without_double_slash() {
        let client = HttpInferenceClient::new("http://localhost:5000/").unwrap();
        assert_eq!(
            client.endpoint_url(PREDICT_FRAME_PATH),
            "http://localhost:5000/predict-frame"
        );
        let client = HttpInferenceClient::new("http://localhost:5000").unwrap();
        assert_eq!(
            client.endpoint_url(PREDICT_IMAGE_PATH),
            "http://localhost:5000/predict-image"
        );
    }

    #[test]
    fn test_mime_for_known_extensions() {
        assert_eq!(mime_for("photo.PNG"), "image/png");
        assert_eq!(mime_for("photo.jpeg"), "image/jpeg");
        assert_eq!(mime_for("scan.tif"), "image/tiff");
        assert_eq!(mime_for("noextension"), "image/jpeg");
    }
}
