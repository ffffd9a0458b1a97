//! Request and response bodies of the finance backend.

use serde::{Deserialize, Deserializer, Serialize};

/// Direction of money movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TransactionKind {
    Income,
    #[default]
    Expense,
    /// Anything else the server reports. Never sent.
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Transaction {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(deserialize_with = "amount")]
    pub amount: f64,
    #[serde(rename = "type", default)]
    pub kind: TransactionKind,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub payment_mode: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTransaction {
    pub amount: f64,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub user_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A spending category together with its monthly limit and what was spent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BudgetCategory {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub color: String,
    /// A category without a limit reports `null`, read as 0.
    #[serde(default, deserialize_with = "amount")]
    pub budget_limit: f64,
    #[serde(default, deserialize_with = "amount")]
    pub spent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetUpdate {
    pub user_email: String,
    pub category_name: String,
    pub limit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCategory {
    pub user_email: String,
    pub name: String,
    pub color: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub name: String,
    #[serde(deserialize_with = "amount")]
    pub target_amount: f64,
    #[serde(default, deserialize_with = "amount")]
    pub current_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewGoal {
    pub user_email: String,
    pub name: String,
    pub target_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalDeposit {
    pub goal_id: i64,
    pub amount_added: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KindTotal {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(deserialize_with = "amount")]
    pub total: f64,
}

/// Overview served by `GET /dashboard/{email}`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct DashboardSummary {
    #[serde(default)]
    pub totals: Vec<KindTotal>,
    #[serde(default)]
    pub recent: Vec<Transaction>,
}

impl DashboardSummary {
    fn total_of(&self, kind: TransactionKind) -> f64 {
        self.totals
            .iter()
            .filter(|t| t.kind == kind)
            .map(|t| t.total)
            .sum()
    }

    pub fn income(&self) -> f64 {
        self.total_of(TransactionKind::Income)
    }

    pub fn expense(&self) -> f64 {
        self.total_of(TransactionKind::Expense)
    }

    pub fn balance(&self) -> f64 {
        self.income() - self.expense()
    }
}

/// Reads a monetary value that MySQL decimals may render as a number, a
/// numeric string or `null`.
fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(0.0),
        Some(serde_json::Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| D::Error::custom(format!("amount out of range: {}", n))),
        Some(serde_json::Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| D::Error::custom(format!("invalid amount: {:?}", s))),
        Some(other) => Err(D::Error::custom(format!("invalid amount: {}", other))),
    }
}
