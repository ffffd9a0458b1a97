//! Savings goals.

use super::validation::{parse_positive, require_text};
use super::{Mutation, MutationOutcome, Panel, PanelError, Resource, ValidationError};
use crate::api::FinanceApi;
use crate::api::error::ApiError;
use crate::api::types::{Goal, GoalDeposit, NewGoal};
use futures::future::BoxFuture;

pub struct Goals;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GoalForm {
    pub name: String,
    pub target: String,
}

impl Resource for Goals {
    type Data = Vec<Goal>;
    type Form = GoalForm;

    const NAME: &'static str = "goals";

    fn fetch<'a>(
        api: &'a dyn FinanceApi,
        email: &'a str,
    ) -> BoxFuture<'a, Result<Self::Data, ApiError>> {
        api.list_goals(email)
    }
}

impl Panel<Goals> {
    /// Validates the new-goal form.
    pub fn prepare_create(&self) -> Result<Mutation, ValidationError> {
        let name = require_text("Goal name", &self.form.name)?;
        let target_amount = parse_positive("Target amount", &self.form.target)?;
        Ok(Mutation::CreateGoal(NewGoal {
            user_email: self.identity().email.clone(),
            name,
            target_amount,
        }))
    }

    /// Creates a goal from the form. Invalid input sends nothing and keeps the form.
    pub async fn create(&mut self) -> Result<MutationOutcome, PanelError> {
        let mutation = self.prepare_create().map_err(|e| self.reject(e))?;
        self.mutate(mutation).await
    }

    pub fn prepare_deposit(&self, goal_id: i64, amount: &str) -> Result<Mutation, ValidationError> {
        let amount_added = parse_positive("Amount", amount)?;
        Ok(Mutation::AddToGoal(GoalDeposit {
            goal_id,
            amount_added,
        }))
    }

    /// Adds `amount` to the goal's saved total.
    pub async fn add_money(
        &mut self,
        goal_id: i64,
        amount: &str,
    ) -> Result<MutationOutcome, PanelError> {
        let mutation = self
            .prepare_deposit(goal_id, amount)
            .map_err(|e| self.reject(e))?;
        self.mutate(mutation).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockFinanceApi;
    use crate::panels::test_support::identity;
    use std::sync::Arc;

    fn laptop(current: f64) -> Goal {
        Goal {
            id: 1,
            name: "Laptop".to_string(),
            target_amount: 50000.0,
            current_amount: current,
        }
    }

    #[tokio::test]
    async fn loaded_goal_reports_progress() {
        let mut api = MockFinanceApi::new();
        api.expect_list_goals()
            .withf(|email| email == "a@x.com")
            .returning(|_| Ok(vec![laptop(10000.0)]));

        let mut panel: Panel<Goals> = Panel::new(identity(), Arc::new(api));
        panel.load().await.unwrap();

        assert_eq!(panel.data()[0].progress(), 20.0);
    }

    #[tokio::test]
    /// An empty goal name is rejected before any request and the form stays as typed.
    async fn empty_name_sends_nothing() {
        let mut api = MockFinanceApi::new();
        api.expect_create_goal().never();
        api.expect_list_goals().never();

        let mut panel: Panel<Goals> = Panel::new(identity(), Arc::new(api));
        panel.form.target = "50000".to_string();

        let result = panel.create().await;

        assert!(matches!(
            result,
            Err(PanelError::Validation(ValidationError::Required("Goal name")))
        ));
        assert_eq!(panel.form.target, "50000");
        assert!(panel.last_error().is_some());
    }

    #[tokio::test]
    async fn non_numeric_target_sends_nothing() {
        let mut api = MockFinanceApi::new();
        api.expect_create_goal().never();

        let mut panel: Panel<Goals> = Panel::new(identity(), Arc::new(api));
        panel.form.name = "Laptop".to_string();
        panel.form.target = "fifty".to_string();

        assert!(matches!(
            panel.create().await,
            Err(PanelError::Validation(ValidationError::NotANumber { .. }))
        ));
    }

    #[tokio::test]
    /// A successful create clears the form and reloads from the server.
    async fn create_clears_form_and_resynchronizes() {
        let mut api = MockFinanceApi::new();
        api.expect_create_goal()
            .withf(|goal| {
                goal.name == "Laptop" && goal.target_amount == 50000.0 && goal.user_email == "a@x.com"
            })
            .times(1)
            .returning(|_| Ok(()));
        api.expect_list_goals()
            .times(1)
            .returning(|_| Ok(vec![laptop(0.0)]));

        let mut panel: Panel<Goals> = Panel::new(identity(), Arc::new(api));
        panel.form = GoalForm {
            name: " Laptop ".to_string(),
            target: "50000".to_string(),
        };

        let outcome = panel.create().await.unwrap();

        assert_eq!(outcome, MutationOutcome::Applied);
        assert_eq!(panel.form, GoalForm::default());
        assert_eq!(panel.data(), &vec![laptop(0.0)]);
    }

    #[tokio::test]
    /// A failed write keeps the form and does not reload.
    async fn failed_create_skips_reload() {
        let mut api = MockFinanceApi::new();
        api.expect_create_goal().returning(|_| {
            Err(ApiError::Http {
                status: 500,
                message: "boom".to_string(),
            })
        });
        api.expect_list_goals().never();

        let mut panel: Panel<Goals> = Panel::new(identity(), Arc::new(api));
        panel.form = GoalForm {
            name: "Laptop".to_string(),
            target: "50000".to_string(),
        };

        assert!(matches!(panel.create().await, Err(PanelError::Api(_))));
        assert_eq!(panel.form.name, "Laptop");
        assert!(panel.last_error().unwrap().contains("Creating goal Laptop failed"));
    }

    #[tokio::test]
    /// An accepted write whose reload fails is still reported as applied.
    async fn failed_reload_after_create_is_not_a_write_failure() {
        let mut api = MockFinanceApi::new();
        api.expect_create_goal().times(1).returning(|_| Ok(()));
        api.expect_list_goals().times(1).returning(|_| {
            Err(ApiError::Http {
                status: 503,
                message: "waking up".to_string(),
            })
        });

        let mut panel: Panel<Goals> = Panel::new(identity(), Arc::new(api));
        panel.form = GoalForm {
            name: "Laptop".to_string(),
            target: "50000".to_string(),
        };

        let outcome = panel.create().await.unwrap();

        assert_eq!(outcome, MutationOutcome::Unrefreshed);
        // The server has the goal, so the form is not kept for a retry.
        assert_eq!(panel.form, GoalForm::default());
        assert!(panel.last_error().unwrap().contains("Failed to load goals"));
    }

    #[tokio::test]
    async fn add_money_is_keyed_by_goal_id() {
        let mut api = MockFinanceApi::new();
        api.expect_add_to_goal()
            .withf(|deposit| deposit.goal_id == 1 && deposit.amount_added == 2500.0)
            .times(1)
            .returning(|_| Ok(()));
        api.expect_list_goals()
            .times(1)
            .returning(|_| Ok(vec![laptop(12500.0)]));

        let mut panel: Panel<Goals> = Panel::new(identity(), Arc::new(api));
        panel.form.name = "half typed".to_string();
        panel.add_money(1, "2500").await.unwrap();

        assert_eq!(panel.data()[0].current_amount, 12500.0);
        // Depositing does not touch the new-goal form.
        assert_eq!(panel.form.name, "half typed");
    }

    #[tokio::test]
    async fn add_money_rejects_blank_amount() {
        let mut api = MockFinanceApi::new();
        api.expect_add_to_goal().never();

        let mut panel: Panel<Goals> = Panel::new(identity(), Arc::new(api));
        assert!(panel.add_money(1, " ").await.is_err());
    }
}
