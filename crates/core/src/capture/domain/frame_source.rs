use thiserror::Error;

use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum CaptureError {
    /// Device absent or access denied. Surfaced to the user; the live
    /// session stays idle.
    #[error("camera unavailable: {0}")]
    Open(String),
    #[error("frame capture failed: {0}")]
    Capture(String),
}

/// Domain interface for a live frame source.
///
/// Implementations may hold device handles, hence `&mut self`. Dropping a
/// source must release the underlying device.
pub trait FrameSource: Send {
    fn capture(&mut self) -> Result<Frame, CaptureError>;

    /// Human-readable device name for logs and the UI.
    fn name(&self) -> String;
}
