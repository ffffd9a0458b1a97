// Module declarations
mod app;
mod login;
pub mod splash;
pub mod workspace;
// Re-exports for external use
pub use app::{App, UIConfig, run};
