pub mod falcon_tab;
pub mod live_tab;
pub mod upload_tab;
