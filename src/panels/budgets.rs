//! Monthly category budgets.

use super::validation::{parse_non_negative, require_text};
use super::{Mutation, MutationOutcome, Panel, PanelError, Resource, ValidationError};
use crate::api::FinanceApi;
use crate::api::error::ApiError;
use crate::api::types::{BudgetCategory, BudgetUpdate};
use futures::future::BoxFuture;

pub struct Budgets;

/// The limit being edited, if any.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LimitEditor {
    pub category: Option<String>,
    pub limit: String,
}

impl Resource for Budgets {
    type Data = Vec<BudgetCategory>;
    type Form = LimitEditor;

    const NAME: &'static str = "budgets";

    fn fetch<'a>(
        api: &'a dyn FinanceApi,
        email: &'a str,
    ) -> BoxFuture<'a, Result<Self::Data, ApiError>> {
        api.list_budgets(email)
    }
}

impl Panel<Budgets> {
    /// Opens the editor on `category`, prefilled with its current limit.
    pub fn edit(&mut self, category: &str) {
        let current = self
            .data()
            .iter()
            .find(|b| b.name == category)
            .map(|b| format!("{}", b.budget_limit))
            .unwrap_or_default();
        self.form = LimitEditor {
            category: Some(category.to_string()),
            limit: current,
        };
    }

    pub fn prepare_limit(&self, category: &str, limit: &str) -> Result<Mutation, ValidationError> {
        let category_name = require_text("Category", category)?;
        let limit = parse_non_negative("Limit", limit)?;
        Ok(Mutation::SetBudgetLimit(BudgetUpdate {
            user_email: self.identity().email.clone(),
            category_name,
            limit,
        }))
    }

    /// Sets the monthly limit of `category`.
    pub async fn update_limit(
        &mut self,
        category: &str,
        limit: &str,
    ) -> Result<MutationOutcome, PanelError> {
        let mutation = self
            .prepare_limit(category, limit)
            .map_err(|e| self.reject(e))?;
        self.mutate(mutation).await
    }

    /// Validates whatever the editor currently holds.
    pub fn prepare_edit(&self) -> Result<Mutation, ValidationError> {
        let category = self
            .form
            .category
            .as_deref()
            .ok_or(ValidationError::Required("Category"))?;
        self.prepare_limit(category, &self.form.limit)
    }

    /// Total spent across all categories this month.
    pub fn total_spent(&self) -> f64 {
        self.data().iter().map(|b| b.spent).sum()
    }

    pub fn total_limit(&self) -> f64 {
        self.data().iter().map(|b| b.budget_limit.max(0.0)).sum()
    }
}
