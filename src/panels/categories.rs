//! Spending categories.
//!
//! The backend has no dedicated category listing; categories are read from
//! the budgets collection, which seeds the default set on first access.

use super::validation::require_text;
use super::{
    Confirmation, Mutation, MutationOutcome, Panel, PanelError, Resource, ValidationError,
};
use crate::api::FinanceApi;
use crate::api::error::ApiError;
use crate::api::types::{BudgetCategory, NewCategory, TransactionKind};
use futures::future::BoxFuture;
use log::info;

/// Colors offered when creating a category.
pub const PALETTE: [&str; 7] = [
    "#3B82F6", "#EF4444", "#10B981", "#F59E0B", "#8B5CF6", "#EC4899", "#6366F1",
];

pub struct Categories;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryForm {
    pub name: String,
    pub color: String,
}

impl Default for CategoryForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            color: PALETTE[0].to_string(),
        }
    }
}

impl CategoryForm {
    /// Moves to the next (or previous) palette color.
    pub fn cycle_color(&mut self, forward: bool) {
        let index = PALETTE.iter().position(|c| *c == self.color).unwrap_or(0);
        let next = if forward {
            (index + 1) % PALETTE.len()
        } else {
            (index + PALETTE.len() - 1) % PALETTE.len()
        };
        self.color = PALETTE[next].to_string();
    }
}

impl Resource for Categories {
    type Data = Vec<BudgetCategory>;
    type Form = CategoryForm;

    const NAME: &'static str = "categories";

    fn fetch<'a>(
        api: &'a dyn FinanceApi,
        email: &'a str,
    ) -> BoxFuture<'a, Result<Self::Data, ApiError>> {
        api.list_budgets(email)
    }
}

impl Panel<Categories> {
    pub fn prepare_create(&self) -> Result<Mutation, ValidationError> {
        let name = require_text("Category name", &self.form.name)?;
        let color = require_text("Color", &self.form.color)?;
        Ok(Mutation::CreateCategory(NewCategory {
            user_email: self.identity().email.clone(),
            name,
            color,
            kind: TransactionKind::Expense,
        }))
    }

    pub async fn create(&mut self) -> Result<MutationOutcome, PanelError> {
        let mutation = self.prepare_create().map_err(|e| self.reject(e))?;
        self.mutate(mutation).await
    }

    /// Id of the category to delete, if the server reported one.
    pub fn deletable_id(category: &BudgetCategory) -> Result<i64, ValidationError> {
        category
            .id
            .ok_or_else(|| ValidationError::MissingId(category.name.clone()))
    }

    /// The delete to send for `id`, or `None` when the user declined.
    pub fn prepare_delete(&self, id: i64, confirmation: Confirmation) -> Option<Mutation> {
        match confirmation {
            Confirmation::Confirmed => Some(Mutation::DeleteCategory(id)),
            Confirmation::Declined => {
                info!("Deletion of category #{} cancelled", id);
                None
            }
        }
    }

    /// Deletes category `id`. Nothing is sent unless the user confirmed.
    pub async fn delete(
        &mut self,
        id: i64,
        confirmation: Confirmation,
    ) -> Result<MutationOutcome, PanelError> {
        match self.prepare_delete(id, confirmation) {
            Some(mutation) => self.mutate(mutation).await,
            None => Ok(MutationOutcome::Cancelled),
        }
    }
}
