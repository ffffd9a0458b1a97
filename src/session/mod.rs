pub mod claims;
pub mod headless_mode;
pub mod manager;
pub mod messages;
pub mod setup;
pub mod tui_mode;

pub use claims::Identity;
pub use manager::SessionManager;
pub use setup::{SessionData, setup_session};
pub use tui_mode::run_tui_mode;
