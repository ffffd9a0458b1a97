//! Read-only overviews: the dashboard summary and spending analytics.

use super::{Panel, Resource};
use crate::api::FinanceApi;
use crate::api::error::ApiError;
use crate::api::types::{DashboardSummary, Transaction, TransactionKind};
use futures::future::BoxFuture;
use std::collections::HashMap;

pub struct Dashboard;

impl Resource for Dashboard {
    type Data = DashboardSummary;
    type Form = ();

    const NAME: &'static str = "dashboard";

    fn fetch<'a>(
        api: &'a dyn FinanceApi,
        email: &'a str,
    ) -> BoxFuture<'a, Result<Self::Data, ApiError>> {
        api.dashboard(email)
    }
}

pub struct Analytics;

impl Resource for Analytics {
    type Data = Vec<Transaction>;
    type Form = ();

    const NAME: &'static str = "analytics";

    fn fetch<'a>(
        api: &'a dyn FinanceApi,
        email: &'a str,
    ) -> BoxFuture<'a, Result<Self::Data, ApiError>> {
        api.list_transactions(email)
    }
}

/// Total expense of one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySpend {
    pub category: String,
    pub total: f64,
    /// Share of all expenses, 0 to 100.
    pub share: f64,
}

/// Sums expenses per category, largest first. Ties are ordered by name.
pub fn spending_by_category(transactions: &[Transaction]) -> Vec<CategorySpend> {
    let mut totals: HashMap<&str, f64> = HashMap::new();
    for tx in transactions
        .iter()
        .filter(|tx| tx.kind == TransactionKind::Expense)
    {
        let category = match tx.category.trim() {
            "" => "Uncategorized",
            name => name,
        };
        *totals.entry(category).or_default() += tx.amount;
    }

    let grand_total: f64 = totals.values().sum();
    let mut spends: Vec<CategorySpend> = totals
        .into_iter()
        .map(|(category, total)| CategorySpend {
            category: category.to_string(),
            total,
            share: if grand_total > 0.0 {
                total / grand_total * 100.0
            } else {
                0.0
            },
        })
        .collect();
    spends.sort_by(|a, b| {
        b.total
            .total_cmp(&a.total)
            .then_with(|| a.category.cmp(&b.category))
    });
    spends
}

impl Panel<Analytics> {
    pub fn spending_by_category(&self) -> Vec<CategorySpend> {
        spending_by_category(self.data())
    }

    pub fn income(&self) -> f64 {
        self.total_of(TransactionKind::Income)
    }

    pub fn expense(&self) -> f64 {
        self.total_of(TransactionKind::Expense)
    }

    fn total_of(&self, kind: TransactionKind) -> f64 {
        self.data()
            .iter()
            .filter(|tx| tx.kind == kind)
            .map(|tx| tx.amount)
            .sum()
    }
}
