//! Workspace main renderer

use super::components::{footer, header, logs, popup, views};
use super::state::{InputMode, WorkspaceState};
use crate::consts::ui_consts::BACKGROUND_RGB;
use crate::views::{Screen, ViewController};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Style};
use ratatui::widgets::Block;

pub fn render_workspace(
    f: &mut Frame,
    controller: &ViewController,
    state: &WorkspaceState,
    api_url: &str,
) {
    if state.with_background_color {
        let (r, g, b) = BACKGROUND_RGB;
        f.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(r, g, b))),
            f.area(),
        );
    }

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(f.area());

    header::render_header(f, main_chunks[0], controller, api_url);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
        .split(main_chunks[1]);

    let Screen::Mounted(view) = controller.screen() else {
        return;
    };
    views::render_view(f, content_chunks[0], view, state.selected);
    logs::render_logs_panel(f, content_chunks[1], state);
    footer::render_footer(f, main_chunks[2], &state.mode, controller.active());

    match &state.mode {
        InputMode::Browse => {}
        InputMode::Editing(editor) => popup::render_editor(f, content_chunks[0], editor, view),
        InputMode::ConfirmDelete { name, .. } => {
            popup::render_confirm_delete(f, content_chunks[0], name)
        }
    }
}
