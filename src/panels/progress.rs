//! Derived display values for budgets and goals.

use crate::api::types::{BudgetCategory, Goal};

/// Share of the limit already spent, in percent. Unbounded above; 0 without a limit.
pub fn budget_percentage(spent: f64, limit: f64) -> f64 {
    if limit > 0.0 {
        finite_or_zero(spent / limit * 100.0)
    } else {
        0.0
    }
}

/// [`budget_percentage`] clamped to what a progress bar can show.
pub fn budget_bar_percent(spent: f64, limit: f64) -> f64 {
    budget_percentage(spent, limit).clamp(0.0, 100.0)
}

pub fn is_over_budget(spent: f64, limit: f64) -> bool {
    spent > limit && limit > 0.0
}

/// How far spending exceeds the limit, if it does.
pub fn overage(spent: f64, limit: f64) -> Option<f64> {
    is_over_budget(spent, limit).then(|| spent - limit)
}

/// Goal completion in percent, clamped to [0, 100]. 0 when the target is not positive.
pub fn goal_progress(current: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return 0.0;
    }
    finite_or_zero(current / target * 100.0).clamp(0.0, 100.0)
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

impl BudgetCategory {
    pub fn percentage(&self) -> f64 {
        budget_percentage(self.spent, self.budget_limit)
    }

    pub fn bar_percent(&self) -> f64 {
        budget_bar_percent(self.spent, self.budget_limit)
    }

    pub fn is_over_budget(&self) -> bool {
        is_over_budget(self.spent, self.budget_limit)
    }

    pub fn overage(&self) -> Option<f64> {
        overage(self.spent, self.budget_limit)
    }
}

impl Goal {
    pub fn progress(&self) -> f64 {
        goal_progress(self.current_amount, self.target_amount)
    }

    pub fn remaining(&self) -> f64 {
        (self.target_amount - self.current_amount).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn budget(limit: f64, spent: f64) -> BudgetCategory {
        BudgetCategory {
            id: None,
            name: "Food".to_string(),
            color: "#EF4444".to_string(),
            budget_limit: limit,
            spent,
        }
    }

    #[test]
    fn budget_within_limit() {
        let b = budget(1000.0, 250.0);
        assert_eq!(b.percentage(), 25.0);
        assert_eq!(b.bar_percent(), 25.0);
        assert!(!b.is_over_budget());
        assert_eq!(b.overage(), None);
    }

    #[test]
    /// Overspending keeps the bar full and reports the excess separately.
    fn budget_over_limit_is_clamped_for_display() {
        let b = budget(1000.0, 1500.0);
        assert_eq!(b.percentage(), 150.0);
        assert_eq!(b.bar_percent(), 100.0);
        assert!(b.is_over_budget());
        assert_eq!(b.overage(), Some(500.0));
    }

    #[test]
    /// A zero limit never divides and never flags overspending.
    fn budget_without_limit() {
        let b = budget(0.0, 500.0);
        assert_eq!(b.percentage(), 0.0);
        assert_eq!(b.bar_percent(), 0.0);
        assert!(!b.is_over_budget());
    }

    #[test]
    fn bar_percent_stays_in_range() {
        for (limit, spent) in [(1.0, 1e12), (100.0, -50.0), (-10.0, 5.0), (f64::MIN_POSITIVE, 1.0)] {
            let pct = budget_bar_percent(spent, limit);
            assert!((0.0..=100.0).contains(&pct), "{limit}/{spent} gave {pct}");
        }
    }

    #[test]
    fn goal_progress_matches_ratio() {
        let goal = Goal {
            id: 1,
            name: "Laptop".to_string(),
            target_amount: 50000.0,
            current_amount: 10000.0,
        };
        assert_eq!(goal.progress(), 20.0);
        assert_eq!(goal.remaining(), 40000.0);
    }

    #[test]
    fn goal_progress_is_clamped() {
        assert_eq!(goal_progress(60000.0, 50000.0), 100.0);
        assert_eq!(goal_progress(-10.0, 50000.0), 0.0);
        assert_eq!(goal_progress(10.0, 0.0), 0.0);
    }
}
