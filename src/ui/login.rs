//! Login screen module
//!
//! A terminal cannot host the provider's sign-in button, so the user pastes
//! the ID token it issued.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

/// Credential being typed or pasted, and why the last one was refused.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoginState {
    pub input: String,
    pub error: Option<String>,
}

impl LoginState {
    pub fn push_str(&mut self, text: &str) {
        // Tokens never contain whitespace; pasted line breaks are dropped.
        self.input
            .extend(text.chars().filter(|c| !c.is_whitespace()));
    }

    /// Takes the entered credential, leaving the field empty.
    pub fn take(&mut self) -> String {
        self.error = None;
        std::mem::take(&mut self.input)
    }
}

/// Renders the login screen with the credential prompt.
pub fn render_login(f: &mut Frame, state: &LoginState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Fill(1), Constraint::Length(12), Constraint::Fill(1)])
        .margin(2)
        .split(f.area());

    // Long tokens are elided in the middle so both ends stay visible.
    let count = state.input.chars().count();
    let shown = if count > 48 {
        let head: String = state.input.chars().take(24).collect();
        let tail: String = state.input.chars().skip(count - 20).collect();
        format!("{}…{}", head, tail)
    } else {
        state.input.clone()
    };

    let mut lines = vec![
        Line::from("Sign in with the ID token issued by your identity provider."),
        Line::from("Paste it below and press Enter."),
        Line::from(""),
        Line::from(vec![
            Span::styled("Token: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}_", shown),
                Style::default()
                    .fg(Color::LightGreen)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];
    if let Some(error) = &state.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::LightRed),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Enter] Sign in | [Esc] Exit",
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default()
        .title("LOGIN")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        chunks[1],
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pasted_whitespace_is_dropped() {
        let mut state = LoginState::default();
        state.push_str("abc.\ndef .ghi\n");
        assert_eq!(state.input, "abc.def.ghi");
    }

    #[test]
    fn take_clears_input_and_error() {
        let mut state = LoginState {
            input: "a.b.c".to_string(),
            error: Some("bad".to_string()),
        };
        assert_eq!(state.take(), "a.b.c");
        assert_eq!(state, LoginState::default());
    }
}
