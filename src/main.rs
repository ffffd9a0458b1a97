mod api;
#[macro_use]
mod cli_messages;
mod config;
mod consts;
mod credentials;
mod environment;
mod error_classifier;
mod events;
mod logging;
mod panels;
mod session;
mod ui;
mod views;

use crate::api::types::TransactionKind;
use crate::config::AppConfig;
use crate::logging::LogLevel;
use crate::session::{SessionData, headless_mode, run_tui_mode, setup_session};
use crate::views::ViewKind;
use clap::{Parser, Subcommand, ValueEnum};
use std::error::Error;
use std::io::{BufRead, Write};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Base URL of the finance backend
    #[arg(long, global = true, env = "FINTRACK_API_URL", value_name = "URL")]
    api_url: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the interactive workspace
    Start {
        /// View shown after sign-in
        #[arg(long, value_enum, default_value_t = ViewKind::Dashboard)]
        view: ViewKind,

        /// Paint the workspace on a solid background
        #[arg(long = "with-background", action = clap::ArgAction::SetTrue)]
        with_background: bool,
    },
    /// Sign in with an ID token from the identity provider
    Login {
        /// The ID token. Read from stdin when omitted.
        #[arg(long, value_name = "TOKEN")]
        credential: Option<String>,
    },
    /// Sign out and remove the stored credential
    Logout,
    /// Show the signed-in identity
    Whoami,
    /// Show the balance and recent activity
    Dashboard,
    /// Show spending by category
    Analytics,
    /// List or record transactions
    Transactions {
        #[command(subcommand)]
        action: TransactionAction,
    },
    /// List budget categories or change a limit
    Budgets {
        #[command(subcommand)]
        action: BudgetAction,
    },
    /// Manage budget categories
    Categories {
        #[command(subcommand)]
        action: CategoryAction,
    },
    /// Manage savings goals
    Goals {
        #[command(subcommand)]
        action: GoalAction,
    },
}

#[derive(Subcommand, Debug)]
enum TransactionAction {
    /// List all transactions
    List,
    /// Record a transaction dated today
    Add {
        amount: String,
        category: String,
        #[arg(long = "type", value_enum, default_value_t = KindArg::Expense)]
        kind: KindArg,
        #[arg(long)]
        note: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum BudgetAction {
    /// List budget categories with their spending
    List,
    /// Set the monthly limit of a category
    Set { category: String, limit: String },
}

#[derive(Subcommand, Debug)]
enum CategoryAction {
    /// List categories
    List,
    /// Create an expense category
    Add {
        name: String,
        /// Hex color such as #3B82F6
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete a category by id
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
enum GoalAction {
    /// List savings goals
    List,
    /// Create a goal
    Add { name: String, target: String },
    /// Add money to a goal
    Deposit { goal_id: i64, amount: String },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum KindArg {
    Income,
    Expense,
}

impl From<KindArg> for TransactionKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Income => TransactionKind::Income,
            KindArg::Expense => TransactionKind::Expense,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let config = AppConfig::resolve(args.api_url)?;

    // The TUI owns the terminal, so its log goes to a file.
    match &args.command {
        Command::Start { .. } => logging::initialize(config.log_level, Some(&config.log_file))?,
        _ => {
            let level = match std::env::var_os("RUST_LOG") {
                Some(_) => config.log_level,
                None => LogLevel::Warn,
            };
            logging::initialize(level, None)?
        }
    }

    let mut session = setup_session(config)?;
    match args.command {
        Command::Start {
            view,
            with_background,
        } => run_tui_mode(session, view, with_background).await,
        Command::Login { credential } => login(&mut session, credential),
        Command::Logout => {
            print_cmd_info!(
                "Logging out",
                "Removing {}",
                session.config.credential_path.display()
            );
            session.manager.logout()?;
            print_cmd_success!("Signed out", "The stored credential was removed.");
            Ok(())
        }
        Command::Whoami => {
            match session.manager.identity() {
                Some(identity) => {
                    println!("{} <{}>", identity.name, identity.email);
                    if !identity.picture.is_empty() {
                        println!("{}", identity.picture);
                    }
                }
                None => print_cmd_warn!("Not signed in", "Run `fintrack login` to sign in."),
            }
            Ok(())
        }
        Command::Dashboard => headless_mode::show_dashboard(&session).await,
        Command::Analytics => headless_mode::show_analytics(&session).await,
        Command::Transactions { action } => match action {
            TransactionAction::List => headless_mode::list_transactions(&session).await,
            TransactionAction::Add {
                amount,
                category,
                kind,
                note,
            } => {
                headless_mode::add_transaction(&session, amount, category, kind.into(), note)
                    .await
            }
        },
        Command::Budgets { action } => match action {
            BudgetAction::List => headless_mode::list_budgets(&session).await,
            BudgetAction::Set { category, limit } => {
                headless_mode::set_budget(&session, &category, &limit).await
            }
        },
        Command::Categories { action } => match action {
            CategoryAction::List => headless_mode::list_categories(&session).await,
            CategoryAction::Add { name, color } => {
                headless_mode::add_category(&session, name, color).await
            }
            CategoryAction::Delete { id, yes } => {
                headless_mode::delete_category(&session, id, yes).await
            }
        },
        Command::Goals { action } => match action {
            GoalAction::List => headless_mode::list_goals(&session).await,
            GoalAction::Add { name, target } => headless_mode::add_goal(&session, name, target).await,
            GoalAction::Deposit { goal_id, amount } => {
                headless_mode::deposit(&session, goal_id, &amount).await
            }
        },
    }
}

fn login(session: &mut SessionData, credential: Option<String>) -> Result<(), Box<dyn Error>> {
    let credential = match credential {
        Some(credential) => credential,
        None => {
            print!("Paste the ID token from your identity provider: ");
            std::io::stdout().flush()?;
            let mut line = String::new();
            std::io::stdin().lock().read_line(&mut line)?;
            line
        }
    };

    match session.manager.login(&credential) {
        Ok(identity) => {
            print_cmd_success!(
                "Signed in",
                "Welcome, {} <{}>",
                identity.name,
                identity.email
            );
            Ok(())
        }
        Err(e) => {
            print_cmd_error!("Login failed", &e.to_string());
            Err(e.into())
        }
    }
}
