pub mod footer;
pub mod header;
pub mod logs;
pub mod popup;
pub mod views;
