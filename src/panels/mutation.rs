//! Validated writes, ready to be sent to the backend.

use crate::api::FinanceApi;
use crate::api::error::ApiError;
use crate::api::types::{BudgetUpdate, GoalDeposit, NewCategory, NewGoal, NewTransaction};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    AddTransaction(NewTransaction),
    SetBudgetLimit(BudgetUpdate),
    CreateCategory(NewCategory),
    DeleteCategory(i64),
    CreateGoal(NewGoal),
    AddToGoal(GoalDeposit),
}

impl Mutation {
    pub async fn send(&self, api: &dyn FinanceApi) -> Result<(), ApiError> {
        match self {
            Mutation::AddTransaction(tx) => api.add_transaction(tx).await,
            Mutation::SetBudgetLimit(update) => api.set_budget_limit(update).await,
            Mutation::CreateCategory(category) => api.create_category(category).await,
            Mutation::DeleteCategory(id) => api.delete_category(*id).await,
            Mutation::CreateGoal(goal) => api.create_goal(goal).await,
            Mutation::AddToGoal(deposit) => api.add_to_goal(deposit).await,
        }
    }

    /// Whether a successful send empties the panel's input form.
    pub fn clears_form(&self) -> bool {
        !matches!(self, Mutation::DeleteCategory(_) | Mutation::AddToGoal(_))
    }
}

impl Display for Mutation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Mutation::AddTransaction(tx) => {
                write!(f, "Adding {} of {:.2} to {}", tx.kind, tx.amount, tx.category)
            }
            Mutation::SetBudgetLimit(update) => write!(
                f,
                "Setting {} limit to {:.2}",
                update.category_name, update.limit
            ),
            Mutation::CreateCategory(category) => {
                write!(f, "Creating category {}", category.name)
            }
            Mutation::DeleteCategory(id) => write!(f, "Deleting category #{}", id),
            Mutation::CreateGoal(goal) => write!(f, "Creating goal {}", goal.name),
            Mutation::AddToGoal(deposit) => write!(
                f,
                "Adding {:.2} to goal #{}",
                deposit.amount_added, deposit.goal_id
            ),
        }
    }
}
