pub mod camera_view;
pub mod capture_panel;
pub mod header;
pub mod results;
pub mod utils;
