use std::fs;
use std::path::PathBuf;
use std::thread;

use crossbeam_channel::{Receiver, Sender};

use astrasafe_core::client::domain::inference_client::InferenceClient;
use astrasafe_core::client::infrastructure::http_inference_client::HttpInferenceClient;
use astrasafe_core::shared::detection::Detection;

/// Messages sent from the upload worker thread to the UI.
#[derive(Debug)]
pub enum UploadEvent {
    /// Decoded preview pixels, published before the network round trip so
    /// the image shows while the backend is still working.
    Preview {
        width: u32,
        height: u32,
        rgba: Vec<u8>,
    },
    Detections(Vec<Detection>),
    Error(String),
}

/// Spawn a background worker that previews and predicts one image file.
pub fn spawn(path: PathBuf, backend_url: String) -> Receiver<UploadEvent> {
    let (tx, rx) = crossbeam_channel::unbounded::<UploadEvent>();

    thread::spawn(move || {
        if let Err(e) = run_upload(&tx, &path, &backend_url) {
            log::warn!("upload prediction failed for {}: {e}", path.display());
            let _ = tx.send(UploadEvent::Error(e.to_string()));
        }
    });

    rx
}

fn run_upload(
    tx: &Sender<UploadEvent>,
    path: &PathBuf,
    backend_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = fs::read(path)?;

    // Decoding doubles as validation; a file with an image extension but
    // garbage content stops here instead of reaching the backend.
    let decoded = image::load_from_memory(&bytes)?.into_rgba8();
    let (width, height) = decoded.dimensions();
    let _ = tx.send(UploadEvent::Preview {
        width,
        height,
        rgba: decoded.into_raw(),
    });

    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "upload.jpg".to_string());
    let client = HttpInferenceClient::new(backend_url)?;
    let detections = client.predict_image(bytes, &filename)?;

    let _ = tx.send(UploadEvent::Detections(detections));
    Ok(())
}
