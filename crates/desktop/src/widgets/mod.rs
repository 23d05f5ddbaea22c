pub mod detection_list;
pub mod modal;
pub mod overlay;
pub mod safety_sidebar;
pub mod scene;
pub mod stats_panel;
