pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";

/// Live feed sampling period.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

pub const PREDICT_IMAGE_PATH: &str = "/predict-image";
pub const PREDICT_FRAME_PATH: &str = "/predict-frame";

/// Multipart field names the backend expects.
pub const IMAGE_FIELD: &str = "image";
pub const FRAME_FIELD: &str = "frame";

/// JPEG quality for live frames posted to the backend.
pub const FRAME_JPEG_QUALITY: u8 = 80;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];

/// True when `path` carries one of the accepted image extensions,
/// case-insensitively. Paths without an extension are not images.
pub fn is_image_path(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_accepts_image_extensions_case_insensitively() {
        assert!(is_image_path(Path::new("photo.jpg")));
        assert!(is_image_path(Path::new("photo.JPEG")));
        assert!(is_image_path(Path::new("/tmp/scan.Tif")));
        assert!(is_image_path(Path::new("drop.WEBP")));
    }

    #[test]
    fn test_rejects_non_image_extensions() {
        assert!(!is_image_path(Path::new("notes.txt")));
        assert!(!is_image_path(Path::new("clip.mp4")));
        assert!(!is_image_path(Path::new("archive.tar.gz")));
    }

    #[test]
    fn test_rejects_paths_without_extension() {
        assert!(!is_image_path(Path::new("README")));
        assert!(!is_image_path(Path::new("/tmp/upload")));
        assert!(!is_image_path(Path::new("")));
    }
}
