pub mod frame_poller;
pub mod live_session;
