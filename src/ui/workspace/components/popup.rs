//! Workspace popups
//!
//! The form editor and the delete confirmation, drawn over the view

use super::super::editor::Editor;
use crate::views::MountedView;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph};

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

fn popup_block(title: String, color: Color) -> Block<'static> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .padding(Padding::uniform(1))
}

pub fn render_editor(f: &mut Frame, area: Rect, editor: &Editor, view: &MountedView) {
    let mut lines: Vec<Line> = editor
        .fields(view)
        .into_iter()
        .enumerate()
        .map(|(i, field)| {
            let focused = i == editor.focus;
            let label_style = if focused {
                Style::default()
                    .fg(Color::LightGreen)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            let value = match (field.choice, focused) {
                (true, _) => format!("‹ {} ›", field.value),
                (false, true) => format!("{}_", field.value),
                (false, false) => field.value,
            };
            Line::from(vec![
                Span::styled(format!("{:<10}", field.label), label_style),
                Span::raw(value),
            ])
        })
        .collect();

    if let Some(error) = view.last_error() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::LightRed),
        )));
    }

    let height = lines.len() as u16 + 4;
    let rect = centered(area, 60.min(area.width), height.min(area.height));
    f.render_widget(Clear, rect);
    f.render_widget(
        Paragraph::new(lines).block(popup_block(editor.kind.title(), Color::LightGreen)),
        rect,
    );
}

pub fn render_confirm_delete(f: &mut Frame, area: Rect, name: &str) {
    let rect = centered(area, 50.min(area.width), 7.min(area.height));
    f.render_widget(Clear, rect);
    f.render_widget(
        Paragraph::new(vec![
            Line::from(format!("Delete category \"{}\"?", name)),
            Line::from(Span::styled(
                "[Y] Delete   [N] Keep",
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ])
        .block(popup_block("Confirm".to_string(), Color::LightRed)),
        rect,
    );
}
