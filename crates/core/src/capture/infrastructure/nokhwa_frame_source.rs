use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};
use nokhwa::Camera;

use crate::capture::domain::frame_source::{CaptureError, FrameSource};
use crate::shared::frame::Frame;

/// Camera-backed frame source using the platform's native capture backend.
pub struct NokhwaFrameSource {
    camera: Camera,
}

// SAFETY: `Camera` is only non-`Send` because it boxes a trait object
// without a `Send` bound; the V4L2 backend is a plain fd-backed handle and
// the source is moved to a single poller thread, never shared.
unsafe impl Send for NokhwaFrameSource {}

impl NokhwaFrameSource {
    /// Open camera `index` and start streaming.
    ///
    /// Fails when the device is absent or access is denied; callers keep
    /// the live session idle in that case.
    pub fn open(index: u32) -> Result<Self, CaptureError> {
        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);
        let mut camera = Camera::new(CameraIndex::Index(index), requested)
            .map_err(|e| CaptureError::Open(e.to_string()))?;
        camera
            .open_stream()
            .map_err(|e| CaptureError::Open(e.to_string()))?;
        log::info!(
            "opened camera {index}: {} ({})",
            camera.info().human_name(),
            camera.camera_format()
        );
        Ok(Self { camera })
    }
}

impl FrameSource for NokhwaFrameSource {
    fn capture(&mut self) -> Result<Frame, CaptureError> {
        let buffer = self
            .camera
            .frame()
            .map_err(|e| CaptureError::Capture(e.to_string()))?;
        let decoded = buffer
            .decode_image::<RgbFormat>()
            .map_err(|e| CaptureError::Capture(e.to_string()))?;
        let (width, height) = decoded.dimensions();
        Ok(Frame::new(decoded.into_raw(), width, height))
    }

    fn name(&self) -> String {
        self.camera.info().human_name()
    }
}

impl Drop for NokhwaFrameSource {
    fn drop(&mut self) {
        // Release the device so the next session can reacquire it.
        if let Err(e) = self.camera.stop_stream() {
            log::warn!("failed to stop camera stream: {e}");
        }
    }
}
