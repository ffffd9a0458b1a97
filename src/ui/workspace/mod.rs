//! Signed-in screen: tabs, the mounted view and the activity feed.

pub mod components;
pub mod editor;
pub mod renderer;
pub mod state;
pub mod utils;

pub use editor::{Editor, FormKind};
pub use renderer::render_workspace;
pub use state::{InputMode, WorkspaceState};
