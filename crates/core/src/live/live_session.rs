use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::Sender;

use super::frame_poller::{self, LiveEvent};
use crate::capture::domain::frame_source::FrameSource;
use crate::client::domain::inference_client::InferenceClient;

/// The one live polling session.
///
/// At most one poller runs at a time: `start` always tears down the
/// previous session before spawning, so two concurrent timers cannot
/// double-post frames. Transitions are toggle-shaped, driven by a single
/// owner; there are no independent start/stop flags to desynchronize.
pub struct LiveSession {
    cancelled: Option<Arc<AtomicBool>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl LiveSession {
    pub fn new() -> Self {
        Self {
            cancelled: None,
            handle: None,
        }
    }

    /// Begin periodic capture-and-detect against `source`.
    ///
    /// Any previous session is cancelled first (clear-before-start).
    /// Events arrive on `tx`; the caller keeps the matching receiver and
    /// drops it on stop, which also unblocks the old poller.
    pub fn start(
        &mut self,
        source: Box<dyn FrameSource>,
        client: Box<dyn InferenceClient>,
        period: Duration,
        tx: Sender<LiveEvent>,
    ) {
        self.stop();

        let cancelled = Arc::new(AtomicBool::new(false));
        let poller_cancelled = cancelled.clone();
        let handle = thread::spawn(move || {
            frame_poller::run(source, client, period, poller_cancelled, tx);
        });

        self.cancelled = Some(cancelled);
        self.handle = Some(handle);
    }

    /// Cancel the recurring cycle. Idempotent: a no-op when already idle.
    ///
    /// The cancellation flag is set before this returns, so no cycle of
    /// the old poller can publish after a subsequent `start`. The thread
    /// winds down on its own; an in-flight HTTP response it may still be
    /// waiting on is discarded, and dropping the source inside the poller
    /// releases the camera.
    pub fn stop(&mut self) {
        if let Some(cancelled) = self.cancelled.take() {
            cancelled.store(true, Ordering::Relaxed);
        }
        // Detached on purpose: joining here could block the UI on a slow
        // in-flight request. The cancelled flag already fences all output.
        self.handle.take();
    }

    pub fn is_active(&self) -> bool {
        self.cancelled
            .as_ref()
            .is_some_and(|c| !c.load(Ordering::Relaxed))
    }
}

impl Default for LiveSession {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LiveSession {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::domain::frame_source::{CaptureError, FrameSource};
    use crate::client::domain::inference_client::{ClientError, InferenceClient};
    use crate::shared::detection::Detection;
    use crate::shared::frame::Frame;
    use std::sync::atomic::AtomicUsize;

    /// Source that hands out the same small frame forever and flags its
    /// own drop, standing in for camera release.
    struct StaticSource {
        frame: Frame,
        dropped: Arc<AtomicBool>,
    }

    impl StaticSource {
        fn new(frame: Frame) -> (Self, Arc<AtomicBool>) {
            let dropped = Arc::new(AtomicBool::new(false));
            (
                Self {
                    frame,
                    dropped: dropped.clone(),
                },
                dropped,
            )
        }
    }

    impl FrameSource for StaticSource {
        fn capture(&mut self) -> Result<Frame, CaptureError> {
            Ok(self.frame.clone())
        }

        fn name(&self) -> String {
            "static test source".to_string()
        }
    }

    impl Drop for StaticSource {
        fn drop(&mut self) {
            self.dropped.store(true, Ordering::Relaxed);
        }
    }

    struct StubClient {
        detections: Vec<Detection>,
        calls: Arc<AtomicUsize>,
        delay: Duration,
    }

    impl StubClient {
        fn new(detections: Vec<Detection>) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    detections,
                    calls: calls.clone(),
                    delay: Duration::ZERO,
                },
                calls,
            )
        }
    }

    impl InferenceClient for StubClient {
        fn predict_image(
            &self,
            _bytes: Vec<u8>,
            _filename: &str,
        ) -> Result<Vec<Detection>, ClientError> {
            unimplemented!("live sessions never post still images")
        }

        fn predict_frame(&self, _jpeg: Vec<u8>) -> Result<Vec<Detection>, ClientError> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            if !self.delay.is_zero() {
                thread::sleep(self.delay);
            }
            Ok(self.detections.clone())
        }
    }

    fn oxygen_tank() -> Detection {
        Detection {
            class: "OxygenTank".to_string(),
            confidence: 0.841,
            bbox: [0.1, 0.1, 0.3, 0.4],
        }
    }

    fn small_frame() -> Frame {
        Frame::new(vec![128u8; 2 * 2 * 3], 2, 2)
    }

    const PERIOD: Duration = Duration::from_millis(10);
    const WAIT: Duration = Duration::from_secs(2);

    fn recv_detections(rx: &crossbeam_channel::Receiver<LiveEvent>) -> Vec<Detection> {
        let deadline = std::time::Instant::now() + WAIT;
        while std::time::Instant::now() < deadline {
            match rx.recv_timeout(WAIT) {
                Ok(LiveEvent::Detections(d)) => return d,
                Ok(_) => continue,
                Err(e) => panic!("no detections published: {e}"),
            }
        }
        panic!("no detections published before deadline");
    }

    #[test]
    fn test_publishes_backend_detections_each_cycle() {
        let (source, _) = StaticSource::new(small_frame());
        let (client, _) = StubClient::new(vec![oxygen_tank()]);
        let (tx, rx) = crossbeam_channel::unbounded();

        let mut session = LiveSession::new();
        session.start(Box::new(source), Box::new(client), PERIOD, tx);
        assert!(session.is_active());

        let detections = recv_detections(&rx);
        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].class, "OxygenTank");
        assert_eq!(detections[0].bbox, [0.1, 0.1, 0.3, 0.4]);

        session.stop();
        assert!(!session.is_active());
    }

    #[test]
    fn test_empty_backend_response_is_published_as_empty() {
        let (source, _) = StaticSource::new(small_frame());
        let (client, _) = StubClient::new(Vec::new());
        let (tx, rx) = crossbeam_channel::unbounded();

        let mut session = LiveSession::new();
        session.start(Box::new(source), Box::new(client), PERIOD, tx);

        assert!(recv_detections(&rx).is_empty());
        session.stop();
    }

    #[test]
    fn test_zero_dimension_frames_are_skipped() {
        let (source, _) = StaticSource::new(Frame::new(Vec::new(), 0, 0));
        let (client, calls) = StubClient::new(vec![oxygen_tank()]);
        let (tx, rx) = crossbeam_channel::unbounded();

        let mut session = LiveSession::new();
        session.start(Box::new(source), Box::new(client), PERIOD, tx);
        thread::sleep(PERIOD * 8);
        session.stop();

        assert_eq!(calls.load(Ordering::Relaxed), 0);
        assert!(rx.try_iter().next().is_none());
    }

    #[test]
    fn test_stop_returns_to_idle_and_releases_source() {
        let (source, dropped) = StaticSource::new(small_frame());
        let (client, _) = StubClient::new(Vec::new());
        let (tx, rx) = crossbeam_channel::unbounded();

        let mut session = LiveSession::new();
        session.start(Box::new(source), Box::new(client), PERIOD, tx);
        let _ = recv_detections(&rx);

        session.stop();
        assert!(!session.is_active());

        // The poller exits within one cancel slice and drops the source.
        let deadline = std::time::Instant::now() + WAIT;
        while !dropped.load(Ordering::Relaxed) {
            assert!(std::time::Instant::now() < deadline, "source never dropped");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_stop_while_idle_is_a_noop() {
        let mut session = LiveSession::new();
        assert!(!session.is_active());
        session.stop();
        session.stop();
        assert!(!session.is_active());
    }

    #[test]
    fn test_restart_cancels_previous_poller_first() {
        let (first_source, first_dropped) = StaticSource::new(small_frame());
        let (second_source, _) = StaticSource::new(small_frame());
        let (client_a, _) = StubClient::new(Vec::new());
        let (client_b, _) = StubClient::new(Vec::new());

        let (tx_a, _rx_a) = crossbeam_channel::unbounded();
        let (tx_b, rx_b) = crossbeam_channel::unbounded();

        let mut session = LiveSession::new();
        session.start(Box::new(first_source), Box::new(client_a), PERIOD, tx_a);
        session.start(Box::new(second_source), Box::new(client_b), PERIOD, tx_b);
        assert!(session.is_active());

        // Clear-before-start: the first poller must wind down and release
        // its source even though stop() was never called explicitly.
        let deadline = std::time::Instant::now() + WAIT;
        while !first_dropped.load(Ordering::Relaxed) {
            assert!(
                std::time::Instant::now() < deadline,
                "first poller still running after restart"
            );
            thread::sleep(Duration::from_millis(5));
        }

        let _ = recv_detections(&rx_b);
        session.stop();
    }

    #[test]
    fn test_late_response_after_stop_is_dropped() {
        let (source, _) = StaticSource::new(small_frame());
        let (client, calls) = StubClient::new(vec![oxygen_tank()]);
        let client = StubClient {
            delay: Duration::from_millis(150),
            ..client
        };
        let (tx, rx) = crossbeam_channel::unbounded();

        let mut session = LiveSession::new();
        session.start(Box::new(source), Box::new(client), PERIOD, tx);

        // Wait until a request is in flight, then stop mid-request.
        let deadline = std::time::Instant::now() + WAIT;
        while calls.load(Ordering::Relaxed) == 0 {
            assert!(std::time::Instant::now() < deadline, "no request started");
            thread::sleep(Duration::from_millis(5));
        }
        session.stop();

        // Drain anything already queued, then confirm the stray response
        // never surfaces as a detections event.
        thread::sleep(Duration::from_millis(300));
        assert!(!rx
            .try_iter()
            .any(|event| matches!(event, LiveEvent::Detections(_))));
    }
}
