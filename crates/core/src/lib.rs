pub mod capture;
pub mod client;
pub mod live;
pub mod overlay;
pub mod shared;
