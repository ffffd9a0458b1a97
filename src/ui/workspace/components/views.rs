//! Workspace view components
//!
//! One renderer per mountable view

use super::super::utils::{format_money, parse_hex_color};
use crate::api::types::{Transaction, TransactionKind};
use crate::panels::{Analytics, Budgets, Categories, Dashboard, Goals, Panel, Transactions};
use crate::views::MountedView;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, Cell, Gauge, Padding, Paragraph, Row, Table, Wrap,
};

pub fn render_view(f: &mut Frame, area: Rect, view: &MountedView, selected: usize) {
    let block = Block::default()
        .title(view.kind().title().to_uppercase())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    f.render_widget(block, area);

    // Errors are shown inline above whatever the panel still holds.
    let inner = match view.last_error() {
        Some(message) => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Fill(1)])
                .split(inner);
            f.render_widget(
                Paragraph::new(message.to_string()).style(Style::default().fg(Color::LightRed)),
                chunks[0],
            );
            chunks[1]
        }
        None => inner,
    };

    if !view.is_loaded() {
        f.render_widget(
            Paragraph::new("Loading...").style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }

    match view {
        MountedView::Dashboard(panel) => render_dashboard(f, inner, panel),
        MountedView::Budget(panel) => render_budgets(f, inner, panel, selected),
        MountedView::Goals(panel) => render_goals(f, inner, panel, selected),
        MountedView::Transactions(panel) => render_transactions(f, inner, panel, selected),
        MountedView::Analytics(panel) => render_analytics(f, inner, panel),
        MountedView::Categories(panel) => render_categories(f, inner, panel, selected),
        MountedView::Recurring => render_recurring(f, inner),
    }
}

fn empty(f: &mut Frame, area: Rect, hint: &str) {
    f.render_widget(
        Paragraph::new(hint.to_string()).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn row_style(is_selected: bool) -> Style {
    if is_selected {
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

fn kind_color(kind: TransactionKind) -> Color {
    match kind {
        TransactionKind::Income => Color::LightGreen,
        TransactionKind::Expense => Color::LightRed,
        TransactionKind::Other => Color::Gray,
    }
}

fn transaction_row(tx: &Transaction) -> Row<'static> {
    Row::new(vec![
        Cell::from(tx.date.clone().unwrap_or_else(|| "-".to_string())),
        Cell::from(tx.kind.to_string()).style(Style::default().fg(kind_color(tx.kind))),
        Cell::from(format_money(tx.amount)),
        Cell::from(tx.category.clone()),
        Cell::from(tx.note.clone().unwrap_or_default()),
    ])
}

const TRANSACTION_WIDTHS: [Constraint; 5] = [
    Constraint::Length(12),
    Constraint::Length(8),
    Constraint::Length(14),
    Constraint::Length(16),
    Constraint::Fill(1),
];

fn transaction_header() -> Row<'static> {
    Row::new(vec!["DATE", "TYPE", "AMOUNT", "CATEGORY", "NOTE"])
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
}

fn render_dashboard(f: &mut Frame, area: Rect, panel: &Panel<Dashboard>) {
    let summary = panel.data();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Fill(1)])
        .split(area);

    let balance_color = if summary.balance() < 0.0 {
        Color::LightRed
    } else {
        Color::LightGreen
    };
    let totals = vec![
        Line::from(vec![
            Span::raw("Income    "),
            Span::styled(format_money(summary.income()), Style::default().fg(Color::LightGreen)),
        ]),
        Line::from(vec![
            Span::raw("Expenses  "),
            Span::styled(format_money(summary.expense()), Style::default().fg(Color::LightRed)),
        ]),
        Line::from(vec![
            Span::raw("Balance   "),
            Span::styled(
                format_money(summary.balance()),
                Style::default()
                    .fg(balance_color)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];
    f.render_widget(Paragraph::new(totals), chunks[0]);

    if summary.recent.is_empty() {
        empty(f, chunks[1], "No recent transactions");
        return;
    }
    let table = Table::new(
        summary.recent.iter().map(transaction_row),
        TRANSACTION_WIDTHS,
    )
    .header(transaction_header())
    .block(Block::default().title("Recent").borders(Borders::TOP));
    f.render_widget(table, chunks[1]);
}

fn render_budgets(f: &mut Frame, area: Rect, panel: &Panel<Budgets>, selected: usize) {
    if panel.data().is_empty() {
        empty(f, area, "No budget categories");
        return;
    }
    let summary = Line::from(format!(
        "Spent {} of {}",
        format_money(panel.total_spent()),
        format_money(panel.total_limit())
    ));
    let mut constraints = vec![Constraint::Length(2)];
    constraints.extend(panel.data().iter().map(|_| Constraint::Length(2)));
    constraints.push(Constraint::Fill(1));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);
    f.render_widget(Paragraph::new(summary), rows[0]);

    for (i, budget) in panel.data().iter().enumerate() {
        let label = match budget.overage() {
            Some(over) => format!(
                "{}  {} / {}  over by {}",
                budget.name,
                format_money(budget.spent),
                format_money(budget.budget_limit),
                format_money(over)
            ),
            None if budget.budget_limit > 0.0 => format!(
                "{}  {} / {}  ({:.0}%)",
                budget.name,
                format_money(budget.spent),
                format_money(budget.budget_limit),
                budget.percentage()
            ),
            None => format!("{}  {}  (no limit)", budget.name, format_money(budget.spent)),
        };
        let color = if budget.is_over_budget() {
            Color::LightRed
        } else {
            parse_hex_color(&budget.color)
        };
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(color))
            .style(row_style(i == selected))
            .percent(budget.bar_percent().round() as u16)
            .label(label);
        f.render_widget(gauge, rows[i + 1]);
    }
}

fn render_goals(f: &mut Frame, area: Rect, panel: &Panel<Goals>, selected: usize) {
    if panel.data().is_empty() {
        empty(f, area, "No goals yet. Press A to create one.");
        return;
    }
    let mut constraints: Vec<Constraint> =
        panel.data().iter().map(|_| Constraint::Length(2)).collect();
    constraints.push(Constraint::Fill(1));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, goal) in panel.data().iter().enumerate() {
        let label = format!(
            "{}  {} / {}  ({:.0}%)",
            goal.name,
            format_money(goal.current_amount),
            format_money(goal.target_amount),
            goal.progress()
        );
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::LightBlue))
            .style(row_style(i == selected))
            .percent(goal.progress().round() as u16)
            .label(label);
        f.render_widget(gauge, rows[i]);
    }
}

fn render_transactions(f: &mut Frame, area: Rect, panel: &Panel<Transactions>, selected: usize) {
    if panel.data().is_empty() {
        empty(f, area, "No transactions yet. Press A to add one.");
        return;
    }
    let rows = panel
        .data()
        .iter()
        .enumerate()
        .map(|(i, tx)| transaction_row(tx).style(row_style(i == selected)));
    let table = Table::new(rows, TRANSACTION_WIDTHS).header(transaction_header());
    f.render_widget(table, area);
}

fn render_analytics(f: &mut Frame, area: Rect, panel: &Panel<Analytics>) {
    let spends = panel.spending_by_category();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Fill(1)])
        .split(area);
    f.render_widget(
        Paragraph::new(format!(
            "Income {}  |  Expenses {}",
            format_money(panel.income()),
            format_money(panel.expense())
        )),
        chunks[0],
    );
    if spends.is_empty() {
        empty(f, chunks[1], "No expenses recorded");
        return;
    }

    let mut constraints: Vec<Constraint> = spends.iter().map(|_| Constraint::Length(1)).collect();
    constraints.push(Constraint::Fill(1));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(chunks[1]);
    for (i, spend) in spends.iter().enumerate() {
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Magenta))
            .percent(spend.share.round().clamp(0.0, 100.0) as u16)
            .label(format!(
                "{}  {}  ({:.1}%)",
                spend.category,
                format_money(spend.total),
                spend.share
            ));
        f.render_widget(gauge, rows[i]);
    }
}

fn render_categories(f: &mut Frame, area: Rect, panel: &Panel<Categories>, selected: usize) {
    if panel.data().is_empty() {
        empty(f, area, "No categories yet. Press A to add one.");
        return;
    }
    let rows = panel.data().iter().enumerate().map(|(i, category)| {
        Row::new(vec![
            Cell::from("■").style(Style::default().fg(parse_hex_color(&category.color))),
            Cell::from(category.name.clone()),
            Cell::from(
                category
                    .id
                    .map(|id| format!("#{}", id))
                    .unwrap_or_default(),
            ),
        ])
        .style(row_style(i == selected))
    });
    let table = Table::new(
        rows,
        [
            Constraint::Length(2),
            Constraint::Fill(1),
            Constraint::Length(8),
        ],
    );
    f.render_widget(table, area);
}

fn render_recurring(f: &mut Frame, area: Rect) {
    f.render_widget(
        Paragraph::new(
            "Recurring payments are not available yet: the server does not offer them.",
        )
        .style(Style::default().fg(Color::DarkGray))
        .wrap(Wrap { trim: true }),
        area,
    );
}
