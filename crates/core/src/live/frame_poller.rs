use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Sender;

use crate::capture::domain::frame_source::FrameSource;
use crate::client::domain::inference_client::InferenceClient;
use crate::shared::constants::FRAME_JPEG_QUALITY;
use crate::shared::detection::Detection;
use crate::shared::frame::Frame;

/// Events published by the live capture-and-detect loop.
#[derive(Debug)]
pub enum LiveEvent {
    /// Latest decoded camera frame, for the feed display.
    Frame(Frame),
    /// Detections for the most recently posted frame. Empty means the
    /// backend saw nothing; the UI renders an explicit empty state.
    Detections(Vec<Detection>),
    /// Non-fatal cycle failure. The loop keeps going; previously rendered
    /// results stay on screen.
    CycleError(String),
}

/// Granularity at which the inter-cycle sleep re-checks cancellation.
const CANCEL_POLL: Duration = Duration::from_millis(25);

/// Runs capture-and-detect cycles at a fixed period until cancelled.
///
/// One cycle: capture, skip if the source has no decoded picture yet,
/// publish the frame, JPEG-encode, POST, publish the detections. Cycles
/// are serialized: the next period starts only after the response, so
/// overlay updates can never arrive out of order. Failures are logged and
/// the next scheduled cycle proceeds; no backoff, no retry.
///
/// Cancellation is checked before every sleep slice and again before each
/// publish, so nothing reaches a torn-down display. Owning `source` means
/// the camera is released when this returns.
pub fn run(
    mut source: Box<dyn FrameSource>,
    client: Box<dyn InferenceClient>,
    period: Duration,
    cancelled: Arc<AtomicBool>,
    tx: Sender<LiveEvent>,
) {
    log::info!("live feed started on {} (period {period:?})", source.name());
    while !cancelled.load(Ordering::Relaxed) {
        if !sleep_unless_cancelled(period, &cancelled) {
            break;
        }
        if !cycle(source.as_mut(), client.as_ref(), &cancelled, &tx) {
            break;
        }
    }
    log::info!("live feed stopped");
}

/// One capture-and-detect cycle. Returns false when the receiver is gone
/// and the loop should wind down.
fn cycle(
    source: &mut dyn FrameSource,
    client: &dyn InferenceClient,
    cancelled: &AtomicBool,
    tx: &Sender<LiveEvent>,
) -> bool {
    let frame = match source.capture() {
        Ok(frame) => frame,
        Err(e) => {
            log::warn!("frame capture failed: {e}");
            return tx.send(LiveEvent::CycleError(e.to_string())).is_ok();
        }
    };

    // The stream may not have produced a decoded picture yet.
    if frame.is_empty() {
        return true;
    }

    let jpeg = match frame.encode_jpeg(FRAME_JPEG_QUALITY) {
        Ok(jpeg) => jpeg,
        Err(e) => {
            log::warn!("frame encode failed: {e}");
            return true;
        }
    };

    if cancelled.load(Ordering::Relaxed) {
        return false;
    }
    if tx.send(LiveEvent::Frame(frame)).is_err() {
        return false;
    }

    match client.predict_frame(jpeg) {
        Ok(detections) => {
            // A response landing after stop() must not reach the display.
            if cancelled.load(Ordering::Relaxed) {
                return false;
            }
            tx.send(LiveEvent::Detections(detections)).is_ok()
        }
        Err(e) => {
            log::warn!("live frame prediction failed: {e}");
            if cancelled.load(Ordering::Relaxed) {
                return false;
            }
            tx.send(LiveEvent::CycleError(e.to_string())).is_ok()
        }
    }
}

/// Sleep for `period` in short slices. Returns false if cancelled.
fn sleep_unless_cancelled(period: Duration, cancelled: &AtomicBool) -> bool {
    let mut remaining = period;
    while remaining > Duration::ZERO {
        if cancelled.load(Ordering::Relaxed) {
            return false;
        }
        let slice = remaining.min(CANCEL_POLL);
        std::thread::sleep(slice);
        remaining -= slice;
    }
    !cancelled.load(Ordering::Relaxed)
}
