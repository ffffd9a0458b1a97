//! Form editing for the mounted view.
//!
//! Most form values live in the panel itself so that a failed write leaves
//! them exactly as typed. The editor only tracks which form is open and
//! which field has focus.

use crate::panels::{Mutation, ValidationError};
use crate::views::MountedView;

/// Which form is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormKind {
    Transaction,
    Goal,
    Deposit { goal_id: i64, goal_name: String },
    Limit,
    Category,
}

impl FormKind {
    pub fn title(&self) -> String {
        match self {
            FormKind::Transaction => "New transaction".to_string(),
            FormKind::Goal => "New goal".to_string(),
            FormKind::Deposit { goal_name, .. } => format!("Add money to {}", goal_name),
            FormKind::Limit => "Set monthly limit".to_string(),
            FormKind::Category => "New category".to_string(),
        }
    }

    fn labels(&self) -> &'static [&'static str] {
        match self {
            FormKind::Transaction => &["Type", "Amount", "Category", "Note"],
            FormKind::Goal => &["Name", "Target"],
            FormKind::Deposit { .. } => &["Amount"],
            FormKind::Limit => &["Limit"],
            FormKind::Category => &["Name", "Color"],
        }
    }
}

/// A field as displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub label: &'static str,
    pub value: String,
    /// Cycled with the arrow keys instead of typed.
    pub choice: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor {
    pub kind: FormKind,
    pub focus: usize,
    /// Input not backed by a panel form (the deposit amount).
    scratch: String,
}

impl Editor {
    pub fn new(kind: FormKind) -> Self {
        Self {
            kind,
            focus: 0,
            scratch: String::new(),
        }
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % self.kind.labels().len();
    }

    pub fn previous_field(&mut self) {
        let count = self.kind.labels().len();
        self.focus = (self.focus + count - 1) % count;
    }

    pub fn fields(&self, view: &MountedView) -> Vec<FieldView> {
        let values: Vec<String> = match (&self.kind, view) {
            (FormKind::Transaction, MountedView::Transactions(panel)) => vec![
                panel.form.kind.to_string(),
                panel.form.amount.clone(),
                panel.form.category.clone(),
                panel.form.note.clone(),
            ],
            (FormKind::Goal, MountedView::Goals(panel)) => {
                vec![panel.form.name.clone(), panel.form.target.clone()]
            }
            (FormKind::Deposit { .. }, _) => vec![self.scratch.clone()],
            (FormKind::Limit, MountedView::Budget(panel)) => vec![panel.form.limit.clone()],
            (FormKind::Category, MountedView::Categories(panel)) => {
                vec![panel.form.name.clone(), panel.form.color.clone()]
            }
            _ => Vec::new(),
        };
        self.kind
            .labels()
            .iter()
            .zip(values)
            .enumerate()
            .map(|(index, (label, value))| FieldView {
                label: *label,
                value,
                choice: self.is_choice(index),
            })
            .collect()
    }

    fn is_choice(&self, index: usize) -> bool {
        matches!(
            (&self.kind, index),
            (FormKind::Transaction, 0) | (FormKind::Category, 1)
        )
    }

    /// The text behind the focused field, if it is typed into.
    fn focused_text<'a>(&'a mut self, view: &'a mut MountedView) -> Option<&'a mut String> {
        match (&self.kind, view, self.focus) {
            (FormKind::Transaction, MountedView::Transactions(panel), 1) => {
                Some(&mut panel.form.amount)
            }
            (FormKind::Transaction, MountedView::Transactions(panel), 2) => {
                Some(&mut panel.form.category)
            }
            (FormKind::Transaction, MountedView::Transactions(panel), 3) => {
                Some(&mut panel.form.note)
            }
            (FormKind::Goal, MountedView::Goals(panel), 0) => Some(&mut panel.form.name),
            (FormKind::Goal, MountedView::Goals(panel), 1) => Some(&mut panel.form.target),
            (FormKind::Deposit { .. }, _, 0) => Some(&mut self.scratch),
            (FormKind::Limit, MountedView::Budget(panel), 0) => Some(&mut panel.form.limit),
            (FormKind::Category, MountedView::Categories(panel), 0) => Some(&mut panel.form.name),
            _ => None,
        }
    }

    pub fn insert(&mut self, view: &mut MountedView, c: char) {
        if let Some(text) = self.focused_text(view) {
            text.push(c);
        }
    }

    pub fn backspace(&mut self, view: &mut MountedView) {
        if let Some(text) = self.focused_text(view) {
            text.pop();
        }
    }

    /// Moves a choice field to its next (or previous) option.
    pub fn cycle(&mut self, view: &mut MountedView, forward: bool) {
        match (&self.kind, view, self.focus) {
            (FormKind::Transaction, MountedView::Transactions(panel), 0) => {
                panel.form.toggle_kind()
            }
            (FormKind::Category, MountedView::Categories(panel), 1) => {
                panel.form.cycle_color(forward)
            }
            _ => {}
        }
    }

    /// Validates the open form into a write for the mounted panel.
    pub fn submit(&self, view: &MountedView) -> Result<Mutation, ValidationError> {
        match (&self.kind, view) {
            (FormKind::Transaction, MountedView::Transactions(panel)) => panel.prepare_create(),
            (FormKind::Goal, MountedView::Goals(panel)) => panel.prepare_create(),
            (FormKind::Deposit { goal_id, .. }, MountedView::Goals(panel)) => {
                panel.prepare_deposit(*goal_id, &self.scratch)
            }
            (FormKind::Limit, MountedView::Budget(panel)) => panel.prepare_edit(),
            (FormKind::Category, MountedView::Categories(panel)) => panel.prepare_create(),
            _ => Err(ValidationError::Required("Form")),
        }
    }
}
