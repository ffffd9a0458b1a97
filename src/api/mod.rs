use crate::api::error::ApiError;
use crate::api::types::{
    BudgetCategory, BudgetUpdate, DashboardSummary, Goal, GoalDeposit, NewCategory, NewGoal,
    NewTransaction, Transaction,
};

pub(crate) mod client;
pub use client::ApiClient;
pub mod error;
pub mod types;

#[cfg(test)]
use mockall::automock;

/// The finance backend's REST surface, as consumed by this client.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait FinanceApi: Send + Sync {
    /// `GET /transactions/{email}`
    async fn list_transactions(&self, email: &str) -> Result<Vec<Transaction>, ApiError>;

    /// `POST /add-transaction`
    async fn add_transaction(&self, transaction: &NewTransaction) -> Result<(), ApiError>;

    /// `GET /budgets/{email}`
    async fn list_budgets(&self, email: &str) -> Result<Vec<BudgetCategory>, ApiError>;

    /// `POST /budgets`
    async fn set_budget_limit(&self, update: &BudgetUpdate) -> Result<(), ApiError>;

    /// `POST /categories`
    async fn create_category(&self, category: &NewCategory) -> Result<(), ApiError>;

    /// `DELETE /categories/{id}`
    async fn delete_category(&self, id: i64) -> Result<(), ApiError>;

    /// `GET /goals/{email}`
    async fn list_goals(&self, email: &str) -> Result<Vec<Goal>, ApiError>;

    /// `POST /goals`
    async fn create_goal(&self, goal: &NewGoal) -> Result<(), ApiError>;

    /// `PUT /goals/add-money`
    async fn add_to_goal(&self, deposit: &GoalDeposit) -> Result<(), ApiError>;

    /// `GET /dashboard/{email}`
    async fn dashboard(&self, email: &str) -> Result<DashboardSummary, ApiError>;
}
