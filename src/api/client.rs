//! FinTrack API Client
//!
//! A JSON-over-HTTP client for the finance backend.

use crate::api::FinanceApi;
use crate::api::error::ApiError;
use crate::api::types::{
    BudgetCategory, BudgetUpdate, DashboardSummary, Goal, GoalDeposit, NewCategory, NewGoal,
    NewTransaction, Transaction,
};
use log::debug;
use reqwest::{Client, ClientBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

// User-Agent string with CLI version
const USER_AGENT: &str = concat!("fintrack/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for the backend at `base_url`.
    ///
    /// # Errors
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = ClientBuilder::new()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// Endpoint of a per-user collection, with the email percent-encoded.
    fn user_endpoint(collection: &str, email: &str) -> String {
        format!("{}/{}", collection, urlencoding::encode(email))
    }

    async fn handle_response_status(response: Response) -> Result<Response, ApiError> {
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        Ok(response)
    }

    async fn get_request<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let url = self.build_url(endpoint);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;

        let response = Self::handle_response_status(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: reqwest::Method,
        endpoint: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let url = self.build_url(endpoint);
        debug!("{} {}", method, url);
        let response = self.client.request(method, &url).json(body).send().await?;

        Self::handle_response_status(response).await?;
        Ok(())
    }

    async fn delete_request(&self, endpoint: &str) -> Result<(), ApiError> {
        let url = self.build_url(endpoint);
        debug!("DELETE {}", url);
        let response = self.client.delete(&url).send().await?;

        Self::handle_response_status(response).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl FinanceApi for ApiClient {
    async fn list_transactions(&self, email: &str) -> Result<Vec<Transaction>, ApiError> {
        self.get_request(&Self::user_endpoint("transactions", email))
            .await
    }

    async fn add_transaction(&self, transaction: &NewTransaction) -> Result<(), ApiError> {
        self.send_json(reqwest::Method::POST, "add-transaction", transaction)
            .await
    }

    async fn list_budgets(&self, email: &str) -> Result<Vec<BudgetCategory>, ApiError> {
        self.get_request(&Self::user_endpoint("budgets", email)).await
    }

    async fn set_budget_limit(&self, update: &BudgetUpdate) -> Result<(), ApiError> {
        self.send_json(reqwest::Method::POST, "budgets", update)
            .await
    }

    async fn create_category(&self, category: &NewCategory) -> Result<(), ApiError> {
        self.send_json(reqwest::Method::POST, "categories", category)
            .await
    }

    async fn delete_category(&self, id: i64) -> Result<(), ApiError> {
        self.delete_request(&format!("categories/{}", id)).await
    }

    async fn list_goals(&self, email: &str) -> Result<Vec<Goal>, ApiError> {
        self.get_request(&Self::user_endpoint("goals", email)).await
    }

    async fn create_goal(&self, goal: &NewGoal) -> Result<(), ApiError> {
        self.send_json(reqwest::Method::POST, "goals", goal).await
    }

    async fn add_to_goal(&self, deposit: &GoalDeposit) -> Result<(), ApiError> {
        self.send_json(reqwest::Method::PUT, "goals/add-money", deposit)
            .await
    }

    async fn dashboard(&self, email: &str) -> Result<DashboardSummary, ApiError> {
        self.get_request(&Self::user_endpoint("dashboard", email))
            .await
    }
}
