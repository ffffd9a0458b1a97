//! TUI mode execution

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_starting},
};
use crate::ui::{self, UIConfig};
use crate::views::ViewKind;
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{error::Error, io};

/// Runs the application in TUI mode
///
/// Sets up the terminal, runs the UI loop until the user quits and restores
/// the terminal afterwards, also when the loop failed.
///
/// # Arguments
/// * `session` - Session data from setup
/// * `initial_view` - Tab shown once signed in
/// * `with_background` - Whether to enable background colors
pub async fn run_tui_mode(
    session: SessionData,
    initial_view: ViewKind,
    with_background: bool,
) -> Result<(), Box<dyn Error>> {
    print_session_starting(
        &session.config.api_url,
        session.manager.identity().map(|identity| identity.email.as_str()),
    );

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;

    // Initialize the terminal with Crossterm backend
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let ui_config = UIConfig::new(with_background, initial_view, session.config.api_url.clone());
    let app = ui::App::new(session.manager, session.api, ui_config);

    let result = ui::run(&mut terminal, app).await;

    // Clean up the terminal after running the application
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    result?;

    print_session_exit_success();
    Ok(())
}
