//! Income and expense records.

use super::validation::{parse_positive, require_text};
use super::{Mutation, MutationOutcome, Panel, PanelError, Resource, ValidationError};
use crate::api::FinanceApi;
use crate::api::error::ApiError;
use crate::api::types::{NewTransaction, Transaction, TransactionKind};
use futures::future::BoxFuture;

pub struct Transactions;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionForm {
    pub amount: String,
    pub category: String,
    pub kind: TransactionKind,
    pub note: String,
}

impl Default for TransactionForm {
    fn default() -> Self {
        Self {
            amount: String::new(),
            category: "Food".to_string(),
            kind: TransactionKind::Expense,
            note: String::new(),
        }
    }
}

impl TransactionForm {
    pub fn toggle_kind(&mut self) {
        self.kind = match self.kind {
            TransactionKind::Expense => TransactionKind::Income,
            _ => TransactionKind::Expense,
        };
    }
}

impl Resource for Transactions {
    type Data = Vec<Transaction>;
    type Form = TransactionForm;

    const NAME: &'static str = "transactions";

    fn fetch<'a>(
        api: &'a dyn FinanceApi,
        email: &'a str,
    ) -> BoxFuture<'a, Result<Self::Data, ApiError>> {
        api.list_transactions(email)
    }
}

impl Panel<Transactions> {
    pub fn prepare_create(&self) -> Result<Mutation, ValidationError> {
        let amount = parse_positive("Amount", &self.form.amount)?;
        let category = require_text("Category", &self.form.category)?;
        if self.form.kind == TransactionKind::Other {
            return Err(ValidationError::OutOfRange {
                field: "Type",
                rule: "income or expense",
            });
        }
        let note = self.form.note.trim();
        Ok(Mutation::AddTransaction(NewTransaction {
            amount,
            category,
            kind: self.form.kind,
            user_email: self.identity().email.clone(),
            date: Some(chrono::Local::now().format("%Y-%m-%d").to_string()),
            payment_mode: None,
            note: (!note.is_empty()).then(|| note.to_string()),
        }))
    }

    pub async fn create(&mut self) -> Result<MutationOutcome, PanelError> {
        let mutation = self.prepare_create().map_err(|e| self.reject(e))?;
        self.mutate(mutation).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockFinanceApi;
    use crate::panels::test_support::identity;
    use std::sync::Arc;

    fn lunch() -> Transaction {
        Transaction {
            id: Some(1),
            amount: 300.0,
            kind: TransactionKind::Expense,
            category: "Food".to_string(),
            date: Some("2026-10-01".to_string()),
            payment_mode: None,
            note: None,
        }
    }

    #[tokio::test]
    async fn create_posts_typed_amount_and_reloads() {
        let mut api = MockFinanceApi::new();
        api.expect_add_transaction()
            .withf(|tx| {
                tx.amount == 300.0
                    && tx.category == "Food"
                    && tx.kind == TransactionKind::Expense
                    && tx.user_email == "a@x.com"
                    && tx.note.is_none()
            })
            .times(1)
            .returning(|_| Ok(()));
        api.expect_list_transactions()
            .times(1)
            .returning(|_| Ok(vec![lunch()]));

        let mut panel: Panel<Transactions> = Panel::new(identity(), Arc::new(api));
        panel.form.amount = "300".to_string();

        panel.create().await.unwrap();

        assert_eq!(panel.form.amount, "");
        assert_eq!(panel.data(), &vec![lunch()]);
    }

    #[tokio::test]
    /// An empty amount never reaches the wire as a malformed number.
    async fn empty_amount_is_rejected() {
        let mut api = MockFinanceApi::new();
        api.expect_add_transaction().never();

        let mut panel: Panel<Transactions> = Panel::new(identity(), Arc::new(api));
        assert!(matches!(
            panel.create().await,
            Err(PanelError::Validation(ValidationError::Required("Amount")))
        ));
    }

    #[test]
    fn toggle_kind_alternates() {
        let mut form = TransactionForm::default();
        form.toggle_kind();
        assert_eq!(form.kind, TransactionKind::Income);
        form.toggle_kind();
        assert_eq!(form.kind, TransactionKind::Expense);
    }
}
