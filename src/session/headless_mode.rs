//! Headless mode execution
//!
//! One-shot commands against a single resource. Each command binds a panel
//! to the signed-in identity, runs one operation and prints the result.

use super::SessionData;
use crate::api::types::TransactionKind;
use crate::panels::categories::CategoryForm;
use crate::panels::goals::GoalForm;
use crate::panels::transactions::TransactionForm;
use crate::panels::{
    Analytics, Budgets, Categories, Confirmation, Dashboard, Goals, MutationOutcome, Panel,
    PanelError, Resource, Transactions,
};
use std::error::Error;
use std::io::{self, BufRead, Write};

fn bind<R: Resource>(session: &SessionData) -> Result<Panel<R>, Box<dyn Error>> {
    let identity = session.require_identity()?;
    Ok(Panel::new(identity, session.api.clone()))
}

/// Prints a failed panel operation and hands the error on.
fn report(action: &str, error: PanelError) -> Box<dyn Error> {
    let details = match &error {
        PanelError::Api(e) => e.to_pretty(),
        PanelError::Validation(e) => e.to_string(),
    };
    print_cmd_error!(action, details.as_str());
    error.into()
}

async fn load<R: Resource>(session: &SessionData) -> Result<Panel<R>, Box<dyn Error>> {
    let mut panel = bind::<R>(session)?;
    panel
        .load()
        .await
        .map_err(|e| report(&format!("Failed to load {}", R::NAME), e))?;
    Ok(panel)
}

/// Reports a write the server accepted but the panel could not reload.
/// Returns `true` when the panel holds the fresh list.
fn refreshed(outcome: MutationOutcome, title: &str, name: &str) -> bool {
    if outcome != MutationOutcome::Unrefreshed {
        return true;
    }
    print_cmd_success!(title, "The server accepted the change");
    print_cmd_warn!(
        "Refresh failed",
        "Run `fintrack {} list` to see the current {}",
        name,
        name
    );
    false
}

fn print_empty(name: &str) {
    print_cmd_info!("Nothing here yet", "No {} found", name);
}

pub async fn list_transactions(session: &SessionData) -> Result<(), Box<dyn Error>> {
    let panel = load::<Transactions>(session).await?;
    if panel.data().is_empty() {
        print_empty(Transactions::NAME);
        return Ok(());
    }
    println!(
        "{:<12} {:<8} {:>12}  {:<16} NOTE",
        "DATE", "TYPE", "AMOUNT", "CATEGORY"
    );
    for tx in panel.data() {
        println!(
            "{:<12} {:<8} {:>12.2}  {:<16} {}",
            tx.date.as_deref().unwrap_or("-"),
            tx.kind,
            tx.amount,
            tx.category,
            tx.note.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

pub async fn add_transaction(
    session: &SessionData,
    amount: String,
    category: String,
    kind: TransactionKind,
    note: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let mut panel = bind::<Transactions>(session)?;
    panel.form = TransactionForm {
        amount,
        category,
        kind,
        note: note.unwrap_or_default(),
    };
    let outcome = panel
        .create()
        .await
        .map_err(|e| report("Failed to add transaction", e))?;
    if refreshed(outcome, "Transaction added", Transactions::NAME) {
        print_cmd_success!("Transaction added", "{} now listed", panel.data().len());
    }
    Ok(())
}

pub async fn list_budgets(session: &SessionData) -> Result<(), Box<dyn Error>> {
    let panel = load::<Budgets>(session).await?;
    if panel.data().is_empty() {
        print_empty(Budgets::NAME);
        return Ok(());
    }
    println!(
        "{:<16} {:>12} {:>12} {:>7}",
        "CATEGORY", "SPENT", "LIMIT", "USED"
    );
    for budget in panel.data() {
        let status = budget
            .overage()
            .map(|over| format!("  over by {:.2}", over))
            .unwrap_or_default();
        println!(
            "{:<16} {:>12.2} {:>12.2} {:>6.0}%{}",
            budget.name,
            budget.spent,
            budget.budget_limit,
            budget.percentage(),
            status
        );
    }
    println!(
        "{:<16} {:>12.2} {:>12.2}",
        "TOTAL",
        panel.total_spent(),
        panel.total_limit()
    );
    Ok(())
}

pub async fn set_budget(
    session: &SessionData,
    category: &str,
    limit: &str,
) -> Result<(), Box<dyn Error>> {
    let mut panel = bind::<Budgets>(session)?;
    let outcome = panel
        .update_limit(category, limit)
        .await
        .map_err(|e| report("Failed to update budget", e))?;
    if refreshed(outcome, "Budget updated", Budgets::NAME) {
        print_cmd_success!("Budget updated", "{} limit set to {}", category, limit.trim());
    }
    Ok(())
}

pub async fn list_categories(session: &SessionData) -> Result<(), Box<dyn Error>> {
    let panel = load::<Categories>(session).await?;
    if panel.data().is_empty() {
        print_empty(Categories::NAME);
        return Ok(());
    }
    println!("{:>6}  {:<20} COLOR", "ID", "NAME");
    for category in panel.data() {
        let id = category
            .id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{:>6}  {:<20} {}", id, category.name, category.color);
    }
    Ok(())
}

pub async fn add_category(
    session: &SessionData,
    name: String,
    color: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let mut panel = bind::<Categories>(session)?;
    let mut form = CategoryForm {
        name,
        ..CategoryForm::default()
    };
    if let Some(color) = color {
        form.color = color;
    }
    panel.form = form;
    let outcome = panel
        .create()
        .await
        .map_err(|e| report("Failed to create category", e))?;
    if refreshed(outcome, "Category created", Categories::NAME) {
        print_cmd_success!("Category created", "{} categories", panel.data().len());
    }
    Ok(())
}

pub async fn delete_category(
    session: &SessionData,
    id: i64,
    assume_yes: bool,
) -> Result<(), Box<dyn Error>> {
    let mut panel = bind::<Categories>(session)?;
    let confirmation = if assume_yes {
        Confirmation::Confirmed
    } else {
        confirm(&format!("Delete category #{}? This cannot be undone.", id))?
    };
    let outcome = panel
        .delete(id, confirmation)
        .await
        .map_err(|e| report("Failed to delete category", e))?;
    match outcome {
        MutationOutcome::Applied => print_cmd_success!("Category deleted", "#{}", id),
        MutationOutcome::Unrefreshed => {
            refreshed(outcome, "Category deleted", Categories::NAME);
        }
        MutationOutcome::Cancelled => print_cmd_info!("Cancelled", "Category #{} kept", id),
    }
    Ok(())
}

pub async fn list_goals(session: &SessionData) -> Result<(), Box<dyn Error>> {
    let panel = load::<Goals>(session).await?;
    if panel.data().is_empty() {
        print_empty(Goals::NAME);
        return Ok(());
    }
    println!(
        "{:>6}  {:<20} {:>12} {:>12} {:>6}",
        "ID", "NAME", "SAVED", "TARGET", "DONE"
    );
    for goal in panel.data() {
        println!(
            "{:>6}  {:<20} {:>12.2} {:>12.2} {:>5.0}%",
            goal.id,
            goal.name,
            goal.current_amount,
            goal.target_amount,
            goal.progress()
        );
    }
    Ok(())
}

pub async fn add_goal(
    session: &SessionData,
    name: String,
    target: String,
) -> Result<(), Box<dyn Error>> {
    let mut panel = bind::<Goals>(session)?;
    panel.form = GoalForm { name, target };
    let outcome = panel
        .create()
        .await
        .map_err(|e| report("Failed to create goal", e))?;
    if refreshed(outcome, "Goal created", Goals::NAME) {
        print_cmd_success!("Goal created", "{} goals", panel.data().len());
    }
    Ok(())
}

pub async fn deposit(
    session: &SessionData,
    goal_id: i64,
    amount: &str,
) -> Result<(), Box<dyn Error>> {
    let mut panel = bind::<Goals>(session)?;
    let outcome = panel
        .add_money(goal_id, amount)
        .await
        .map_err(|e| report("Failed to add money", e))?;
    if !refreshed(outcome, "Money added", Goals::NAME) {
        return Ok(());
    }
    match panel.data().iter().find(|g| g.id == goal_id) {
        Some(goal) => print_cmd_success!(
            "Money added",
            "{} is at {:.0}% ({:.2} to go)",
            goal.name,
            goal.progress(),
            goal.remaining()
        ),
        None => print_cmd_success!(
            "Money added",
            "{} added to goal #{}, which is not in your list",
            amount.trim(),
            goal_id
        ),
    }
    Ok(())
}

pub async fn show_dashboard(session: &SessionData) -> Result<(), Box<dyn Error>> {
    let panel = load::<Dashboard>(session).await?;
    let summary = panel.data();
    println!("Signed in as {}", panel.identity().email);
    println!("Income   {:>12.2}", summary.income());
    println!("Expenses {:>12.2}", summary.expense());
    println!("Balance  {:>12.2}", summary.balance());
    if !summary.recent.is_empty() {
        println!();
        println!("Recent transactions:");
        for tx in &summary.recent {
            println!(
                "  {:<12} {:<8} {:>12.2}  {}",
                tx.date.as_deref().unwrap_or("-"),
                tx.kind,
                tx.amount,
                tx.category
            );
        }
    }
    Ok(())
}

pub async fn show_analytics(session: &SessionData) -> Result<(), Box<dyn Error>> {
    let panel = load::<Analytics>(session).await?;
    let spends = panel.spending_by_category();
    if spends.is_empty() {
        print_cmd_info!("Nothing here yet", "No expenses recorded");
        return Ok(());
    }
    println!("{:<16} {:>12} {:>6}", "CATEGORY", "SPENT", "SHARE");
    for spend in spends {
        println!(
            "{:<16} {:>12.2} {:>5.1}%",
            spend.category, spend.total, spend.share
        );
    }
    Ok(())
}

/// Asks a yes/no question on stdin. Anything but yes declines.
fn confirm(question: &str) -> io::Result<Confirmation> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(parse_confirmation(&answer))
}

fn parse_confirmation(answer: &str) -> Confirmation {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => Confirmation::Confirmed,
        _ => Confirmation::Declined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockFinanceApi;
    use crate::api::error::ApiError;
    use crate::config::AppConfig;
    use crate::credentials::FileCredentialStore;
    use crate::environment::Environment;
    use crate::session::SessionManager;
    use crate::session::claims::token_with_payload;
    use serde_json::json;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn signed_in(dir: &TempDir, api: MockFinanceApi) -> SessionData {
        let config = AppConfig::new(dir.path(), Environment::Local);
        let mut manager =
            SessionManager::new(Box::new(FileCredentialStore::new(&config.credential_path)));
        manager
            .login(&token_with_payload(&json!({"name": "Ada", "email": "a@x.com"})))
            .unwrap();
        SessionData {
            config,
            manager,
            api: Arc::new(api),
        }
    }

    fn unavailable() -> ApiError {
        ApiError::Http {
            status: 503,
            message: "waking up".to_string(),
        }
    }

    #[test]
    fn only_unrefreshed_writes_need_a_warning() {
        assert!(refreshed(MutationOutcome::Applied, "Goal created", "goals"));
        assert!(refreshed(MutationOutcome::Cancelled, "Category deleted", "categories"));
        assert!(!refreshed(MutationOutcome::Unrefreshed, "Goal created", "goals"));
    }

    #[tokio::test]
    /// The server kept the goal, so the command must not fail and invite a retry.
    async fn accepted_goal_with_failed_refresh_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let mut api = MockFinanceApi::new();
        api.expect_create_goal().times(1).returning(|_| Ok(()));
        api.expect_list_goals()
            .times(1)
            .returning(|_| Err(unavailable()));
        let session = signed_in(&dir, api);

        let result = add_goal(&session, "Laptop".to_string(), "50000".to_string()).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn rejected_goal_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut api = MockFinanceApi::new();
        api.expect_create_goal()
            .times(1)
            .returning(|_| Err(unavailable()));
        api.expect_list_goals().never();
        let session = signed_in(&dir, api);

        let result = add_goal(&session, "Laptop".to_string(), "50000".to_string()).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn deposit_to_unlisted_goal_still_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let mut api = MockFinanceApi::new();
        api.expect_add_to_goal()
            .withf(|deposit| deposit.goal_id == 42)
            .times(1)
            .returning(|_| Ok(()));
        api.expect_list_goals().times(1).returning(|_| Ok(vec![]));
        let session = signed_in(&dir, api);

        assert!(deposit(&session, 42, "100").await.is_ok());
    }

    #[test]
    fn only_yes_confirms() {
        assert_eq!(parse_confirmation("y\n"), Confirmation::Confirmed);
        assert_eq!(parse_confirmation(" YES "), Confirmation::Confirmed);
        assert_eq!(parse_confirmation(""), Confirmation::Declined);
        assert_eq!(parse_confirmation("n"), Confirmation::Declined);
        assert_eq!(parse_confirmation("yep"), Confirmation::Declined);
    }
}
