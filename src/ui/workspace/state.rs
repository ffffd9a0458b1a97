//! Workspace state
//!
//! Everything the signed-in screen shows besides the panels themselves:
//! the activity feed, the highlighted row and the input mode.

use super::editor::Editor;
use crate::consts::ui_consts::MAX_ACTIVITY_LOGS;
use crate::events::Event;
use crate::views::MountedView;
use std::collections::VecDeque;

/// How key presses are interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    /// Moving between tabs and rows.
    Browse,
    /// Typing into a form.
    Editing(Editor),
    /// Waiting for y/n before deleting a category.
    ConfirmDelete { id: i64, name: String },
}

#[derive(Debug)]
pub struct WorkspaceState {
    /// Recent activity, oldest first.
    pub activity_logs: VecDeque<Event>,
    /// Highlighted row of the mounted list.
    pub selected: usize,
    pub mode: InputMode,
    /// Whether to paint the background
    pub with_background_color: bool,
}

impl WorkspaceState {
    pub fn new(with_background_color: bool) -> Self {
        Self {
            activity_logs: VecDeque::with_capacity(MAX_ACTIVITY_LOGS),
            selected: 0,
            mode: InputMode::Browse,
            with_background_color,
        }
    }

    pub fn add_event(&mut self, event: Event) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Back to browsing the first row, as after a fresh mount.
    pub fn reset(&mut self) {
        self.selected = 0;
        self.mode = InputMode::Browse;
    }

    pub fn select_next(&mut self, view: &MountedView) {
        let rows = row_count(view);
        if rows > 0 {
            self.selected = (self.selected + 1).min(rows - 1);
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Keeps the highlight inside the list after it was reloaded.
    pub fn clamp_selection(&mut self, view: &MountedView) {
        self.selected = self.selected.min(row_count(view).saturating_sub(1));
    }
}

/// Number of selectable rows in `view`.
pub fn row_count(view: &MountedView) -> usize {
    match view {
        MountedView::Budget(panel) => panel.data().len(),
        MountedView::Goals(panel) => panel.data().len(),
        MountedView::Transactions(panel) => panel.data().len(),
        MountedView::Categories(panel) => panel.data().len(),
        MountedView::Dashboard(_) | MountedView::Analytics(_) | MountedView::Recurring => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventType;

    #[test]
    fn activity_log_is_bounded() {
        let mut state = WorkspaceState::new(false);
        for i in 0..MAX_ACTIVITY_LOGS + 5 {
            state.add_event(Event::session(format!("event {}", i), EventType::Refresh));
        }
        assert_eq!(state.activity_logs.len(), MAX_ACTIVITY_LOGS);
        assert_eq!(state.activity_logs[0].msg, "event 5");
    }

    #[test]
    fn selection_stays_in_range() {
        let mut state = WorkspaceState::new(false);
        let view = MountedView::Recurring;
        state.select_next(&view);
        assert_eq!(state.selected, 0);
        state.select_previous();
        assert_eq!(state.selected, 0);
    }
}
