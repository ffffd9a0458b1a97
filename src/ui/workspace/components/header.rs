//! Workspace header component
//!
//! Renders the title line and the tab bar

use crate::views::{ViewController, ViewKind};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Tabs};
use strum::IntoEnumIterator;

pub fn render_header(f: &mut Frame, area: Rect, controller: &ViewController, api_url: &str) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let who = controller
        .identity()
        .map(|identity| format!("{} <{}>", identity.name, identity.email))
        .unwrap_or_else(|| "not signed in".to_string());
    let title = Paragraph::new(format!(
        "FINTRACK v{}  |  {}  |  {}",
        env!("CARGO_PKG_VERSION"),
        who,
        api_url
    ))
    .alignment(Alignment::Center)
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_type(BorderType::Thick),
    );
    f.render_widget(title, header_chunks[0]);

    let titles: Vec<Line> = ViewKind::iter()
        .enumerate()
        .map(|(i, kind)| {
            Line::from(vec![
                Span::styled(format!("{} ", i + 1), Style::default().fg(Color::DarkGray)),
                Span::raw(kind.title()),
            ])
        })
        .collect();
    let selected = ViewKind::iter()
        .position(|kind| kind == controller.active())
        .unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider("|");
    f.render_widget(tabs, header_chunks[1]);
}
