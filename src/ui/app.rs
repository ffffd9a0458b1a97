//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::api::FinanceApi;
use crate::consts::ui_consts::{INPUT_POLL_MS, SPLASH_DURATION_MS};
use crate::error_classifier::ErrorClassifier;
use crate::events::{Event as ActivityEvent, EventType};
use crate::logging::LogLevel;
use crate::panels::{Categories, Confirmation, Panel};
use crate::session::SessionManager;
use crate::ui::login::{LoginState, render_login};
use crate::ui::splash::render_splash;
use crate::ui::workspace::{Editor, FormKind, InputMode, WorkspaceState, render_workspace};
use crate::views::{MountedView, ViewController, ViewKind, ViewMessage, ViewUpdate};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use log::{info, warn};
use ratatui::{Frame, Terminal, backend::Backend};
use std::sync::Arc;
use std::time::{Duration, Instant};
use strum::IntoEnumIterator;
use tokio::sync::mpsc;

/// UI configuration data grouped by concern
#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
    /// Tab shown after signing in.
    pub initial_view: ViewKind,
    /// Backend base URL, shown in the header.
    pub api_url: String,
}

impl UIConfig {
    pub fn new(with_background_color: bool, initial_view: ViewKind, api_url: String) -> Self {
        Self {
            with_background_color,
            initial_view,
            api_url,
        }
    }
}

/// The different screens in the application.
#[derive(Debug)]
pub enum Screen {
    /// Splash screen shown at the start of the application.
    Splash,
    /// Credential prompt shown while nobody is signed in.
    Login(LoginState),
    /// Tabs and the mounted view.
    Workspace,
}

/// Application state
pub struct App {
    /// Login state and the credential store behind it.
    session: SessionManager,

    /// Active tab and the panel mounted for it.
    controller: ViewController,

    /// Results of requests spawned by the controller.
    view_receiver: mpsc::UnboundedReceiver<ViewMessage>,

    /// The current screen being displayed in the application.
    current_screen: Screen,

    workspace: WorkspaceState,

    classifier: ErrorClassifier,

    api_url: String,
}

impl App {
    /// Creates a new instance of the application.
    pub fn new(session: SessionManager, api: Arc<dyn FinanceApi>, ui_config: UIConfig) -> Self {
        let (controller, view_receiver) = ViewController::new(api, ui_config.initial_view);
        Self {
            session,
            controller,
            view_receiver,
            current_screen: Screen::Splash,
            workspace: WorkspaceState::new(ui_config.with_background_color),
            classifier: ErrorClassifier::new(),
            api_url: ui_config.api_url,
        }
    }

    /// Leaves the splash screen for the workspace, or the login prompt when
    /// no session was restored.
    fn leave_splash(&mut self) {
        match self.session.identity().cloned() {
            Some(identity) => {
                self.workspace.add_event(ActivityEvent::session(
                    format!("Signed in as {}", identity.email),
                    EventType::Success,
                ));
                self.controller.set_identity(Some(identity));
                self.current_screen = Screen::Workspace;
            }
            None => self.current_screen = Screen::Login(LoginState::default()),
        }
    }

    /// Signs in with `credential`. On failure the login prompt shows why.
    pub fn login(&mut self, credential: &str) {
        match self.session.login(credential) {
            Ok(identity) => {
                self.workspace.reset();
                self.workspace.add_event(ActivityEvent::session(
                    format!("Signed in as {}", identity.email),
                    EventType::Success,
                ));
                self.controller.set_identity(Some(identity));
                self.current_screen = Screen::Workspace;
            }
            Err(e) => {
                warn!("Login failed: {}", e);
                self.current_screen = Screen::Login(LoginState {
                    input: String::new(),
                    error: Some(e.to_string()),
                });
            }
        }
    }

    /// Signs out and returns to the login prompt.
    pub fn logout(&mut self) {
        let error = self.session.logout().err().map(|e| e.to_string());
        self.controller.set_identity(None);
        self.workspace.reset();
        self.workspace.add_event(ActivityEvent::session(
            "Signed out".to_string(),
            EventType::Success,
        ));
        self.current_screen = Screen::Login(LoginState {
            input: String::new(),
            error,
        });
    }

    /// Applies every background result that has arrived.
    fn drain_view_messages(&mut self) {
        while let Ok(message) = self.view_receiver.try_recv() {
            let update = self.controller.apply(message);
            self.handle_update(update);
        }
    }

    fn handle_update(&mut self, update: ViewUpdate) {
        match update {
            ViewUpdate::Loaded(name) => {
                if let Some(view) = self.controller.mounted_mut() {
                    self.workspace.clamp_selection(view);
                }
                self.workspace.add_event(ActivityEvent::sync_with_level(
                    format!("Refreshed {}", name),
                    EventType::Refresh,
                    LogLevel::Debug,
                ));
            }
            ViewUpdate::Written(description) => {
                self.workspace.add_event(ActivityEvent::write_with_level(
                    description,
                    EventType::Success,
                    LogLevel::Info,
                ));
                self.controller.reload();
            }
            ViewUpdate::Failed { context, error } => {
                let level = self.classifier.classify_api_error(&error);
                self.workspace.add_event(ActivityEvent::sync_with_level(
                    format!("{} failed: {}", context, error.to_pretty()),
                    EventType::Error,
                    level,
                ));
            }
            ViewUpdate::Stale | ViewUpdate::Ignored => {}
        }
    }

    fn select_view(&mut self, kind: ViewKind) {
        if kind != self.controller.active() {
            self.workspace.reset();
            self.controller.select(kind);
        }
    }

    fn step_view(&mut self, forward: bool) {
        let kinds: Vec<ViewKind> = ViewKind::iter().collect();
        let current = kinds
            .iter()
            .position(|kind| *kind == self.controller.active())
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % kinds.len()
        } else {
            (current + kinds.len() - 1) % kinds.len()
        };
        self.select_view(kinds[next]);
    }

    /// Handles a key on the workspace. Returns `true` to quit.
    fn handle_workspace_key(&mut self, key: KeyEvent) -> bool {
        match self.workspace.mode.clone() {
            InputMode::Browse => return self.handle_browse_key(key),
            InputMode::Editing(editor) => self.handle_editing_key(editor, key),
            InputMode::ConfirmDelete { id, name } => self.handle_confirm_key(id, &name, key),
        }
        false
    }

    fn handle_browse_key(&mut self, key: KeyEvent) -> bool {
        let selected = self.workspace.selected;
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return true,
            KeyCode::Char('L') => self.logout(),
            KeyCode::Char(c @ '1'..='7') => {
                let index = c as usize - '1' as usize;
                if let Some(kind) = ViewKind::iter().nth(index) {
                    self.select_view(kind);
                }
            }
            KeyCode::Tab | KeyCode::Right => self.step_view(true),
            KeyCode::BackTab | KeyCode::Left => self.step_view(false),
            KeyCode::Char('r') => {
                if self.controller.reload() {
                    self.workspace.add_event(ActivityEvent::sync_with_level(
                        format!("Reloading {}", self.controller.active()),
                        EventType::Waiting,
                        LogLevel::Debug,
                    ));
                }
            }
            KeyCode::Up | KeyCode::Char('k') => self.workspace.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(view) = self.controller.mounted_mut() {
                    self.workspace.select_next(view);
                }
            }
            KeyCode::Char('a') => {
                let kind = match self.controller.active() {
                    ViewKind::Transactions => Some(FormKind::Transaction),
                    ViewKind::Goals => Some(FormKind::Goal),
                    ViewKind::Categories => Some(FormKind::Category),
                    _ => None,
                };
                if let Some(kind) = kind {
                    self.workspace.mode = InputMode::Editing(Editor::new(kind));
                }
            }
            KeyCode::Char('e') => {
                if let Some(MountedView::Budget(panel)) = self.controller.mounted_mut() {
                    if let Some(name) = panel.data().get(selected).map(|b| b.name.clone()) {
                        panel.edit(&name);
                        self.workspace.mode = InputMode::Editing(Editor::new(FormKind::Limit));
                    }
                }
            }
            KeyCode::Char('m') => {
                if let Some(MountedView::Goals(panel)) = self.controller.mounted_mut() {
                    if let Some(goal) = panel.data().get(selected) {
                        self.workspace.mode = InputMode::Editing(Editor::new(FormKind::Deposit {
                            goal_id: goal.id,
                            goal_name: goal.name.clone(),
                        }));
                    }
                }
            }
            KeyCode::Char('d') => {
                if let Some(MountedView::Categories(panel)) = self.controller.mounted_mut() {
                    if let Some(category) = panel.data().get(selected).cloned() {
                        match Panel::<Categories>::deletable_id(&category) {
                            Ok(id) => {
                                self.workspace.mode = InputMode::ConfirmDelete {
                                    id,
                                    name: category.name,
                                }
                            }
                            Err(e) => panel.set_error(e.to_string()),
                        }
                    }
                }
            }
            _ => {}
        }
        false
    }

    fn handle_editing_key(&mut self, mut editor: Editor, key: KeyEvent) {
        let Some(view) = self.controller.mounted_mut() else {
            self.workspace.mode = InputMode::Browse;
            return;
        };
        match key.code {
            KeyCode::Esc => {
                self.workspace.mode = InputMode::Browse;
                return;
            }
            KeyCode::Enter => {
                match editor.submit(view) {
                    Ok(mutation) => {
                        self.workspace.add_event(ActivityEvent::write_with_level(
                            format!("{}...", mutation),
                            EventType::Waiting,
                            LogLevel::Debug,
                        ));
                        self.controller.submit(mutation);
                        self.workspace.mode = InputMode::Browse;
                    }
                    // The popup stays open and shows the problem.
                    Err(e) => view.set_error(e.to_string()),
                }
                return;
            }
            KeyCode::Tab | KeyCode::Down => editor.next_field(),
            KeyCode::BackTab | KeyCode::Up => editor.previous_field(),
            KeyCode::Left => editor.cycle(view, false),
            KeyCode::Right => editor.cycle(view, true),
            KeyCode::Backspace => editor.backspace(view),
            KeyCode::Char(c) => editor.insert(view, c),
            _ => {}
        }
        self.workspace.mode = InputMode::Editing(editor);
    }

    fn handle_confirm_key(&mut self, id: i64, name: &str, key: KeyEvent) {
        let confirmation = match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Confirmation::Confirmed,
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Confirmation::Declined,
            _ => return,
        };
        self.workspace.mode = InputMode::Browse;

        let mutation = match self.controller.mounted_mut() {
            Some(MountedView::Categories(panel)) => panel.prepare_delete(id, confirmation),
            _ => None,
        };
        match mutation {
            Some(mutation) => {
                self.controller.submit(mutation);
            }
            None => self.workspace.add_event(ActivityEvent::write_with_level(
                format!("Kept category {}", name),
                EventType::Refresh,
                LogLevel::Info,
            )),
        }
    }

    fn handle_paste(&mut self, text: &str) {
        match &mut self.current_screen {
            Screen::Login(state) => state.push_str(text),
            Screen::Workspace => {
                if let InputMode::Editing(editor) = &mut self.workspace.mode {
                    if let Some(view) = self.controller.mounted_mut() {
                        for c in text.chars().filter(|c| !c.is_control()) {
                            editor.insert(view, c);
                        }
                    }
                }
            }
            Screen::Splash => {}
        }
    }
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    let splash_start = Instant::now();
    let splash_duration = Duration::from_millis(SPLASH_DURATION_MS);

    // UI event loop
    loop {
        app.drain_view_messages();
        terminal.draw(|f| render(f, &app))?;

        // Handle splash-to-login transition
        if let Screen::Splash = app.current_screen {
            if splash_start.elapsed() >= splash_duration {
                app.leave_splash();
                continue;
            }
        }

        // Poll for key events
        if !event::poll(Duration::from_millis(INPUT_POLL_MS))? {
            continue;
        }
        let key = match event::read()? {
            Event::Key(key) => key,
            Event::Paste(text) => {
                app.handle_paste(&text);
                continue;
            }
            _ => continue,
        };
        // Skip events that are not KeyEventKind::Press
        if key.kind == KeyEventKind::Release {
            continue;
        }

        match &mut app.current_screen {
            Screen::Splash => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                    return Ok(());
                }
                // Any other key skips the splash screen
                app.leave_splash();
            }
            Screen::Login(state) => match key.code {
                KeyCode::Esc => return Ok(()),
                KeyCode::Enter => {
                    let credential = state.take();
                    if !credential.is_empty() {
                        app.login(&credential);
                    }
                }
                KeyCode::Backspace => {
                    state.input.pop();
                }
                KeyCode::Char(c) => state.push_str(&c.to_string()),
                _ => {}
            },
            Screen::Workspace => {
                if app.handle_workspace_key(key) {
                    info!("Quitting");
                    return Ok(());
                }
            }
        }
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, app: &App) {
    match &app.current_screen {
        Screen::Splash => render_splash(f),
        Screen::Login(state) => render_login(f, state),
        Screen::Workspace => render_workspace(f, &app.controller, &app.workspace, &app.api_url),
    }
}
