//! Workspace footer component
//!
//! Renders the keys available in the current mode

use super::super::state::InputMode;
use crate::views::ViewKind;
use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

fn hints(mode: &InputMode, view: ViewKind) -> String {
    match mode {
        InputMode::Editing(_) => {
            "[Enter] Save | [Tab] Next field | [←/→] Change choice | [Esc] Close".to_string()
        }
        InputMode::ConfirmDelete { .. } => "[Y] Delete | [N] Keep".to_string(),
        InputMode::Browse => {
            let actions = match view {
                ViewKind::Transactions => " | [A] Add",
                ViewKind::Goals => " | [A] New goal | [M] Add money",
                ViewKind::Budget => " | [E] Edit limit",
                ViewKind::Categories => " | [A] Add | [D] Delete",
                _ => "",
            };
            format!(
                "[1-7/Tab] Views | [R] Reload{} | [L] Logout | [Q] Quit",
                actions
            )
        }
    }
}

pub fn render_footer(f: &mut Frame, area: ratatui::layout::Rect, mode: &InputMode, view: ViewKind) {
    let footer = Paragraph::new(hints(mode, view))
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_type(BorderType::Thick),
        );
    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browse_hints_follow_the_view() {
        assert!(hints(&InputMode::Browse, ViewKind::Categories).contains("[D] Delete"));
        assert!(!hints(&InputMode::Browse, ViewKind::Dashboard).contains("[A]"));
    }
}
