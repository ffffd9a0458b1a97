//! Tab selection and the single mounted view.
//!
//! The controller holds which tab is active and mounts exactly one panel for
//! it, bound to the signed-in identity. Without an identity nothing is
//! mounted and the login prompt is shown instead. Unmounted panels are
//! dropped together with their data; every mount loads afresh.

mod dispatch;

pub use dispatch::{ViewMessage, ViewUpdate};

use crate::api::FinanceApi;
use crate::panels::{
    Analytics, Budgets, Categories, Dashboard, Goals, Mutation, Panel, Transactions,
};
use crate::session::Identity;
use log::debug;
use std::sync::Arc;
use tokio::sync::mpsc;

/// The fixed set of tabs.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    strum::Display,
    strum::EnumIter,
    clap::ValueEnum,
)]
#[strum(serialize_all = "lowercase")]
pub enum ViewKind {
    #[default]
    Dashboard,
    Budget,
    Goals,
    Transactions,
    Analytics,
    Categories,
    Recurring,
}

impl ViewKind {
    pub fn title(&self) -> &'static str {
        match self {
            ViewKind::Dashboard => "Dashboard",
            ViewKind::Budget => "Budget",
            ViewKind::Goals => "Goals",
            ViewKind::Transactions => "Transactions",
            ViewKind::Analytics => "Analytics",
            ViewKind::Categories => "Categories",
            ViewKind::Recurring => "Recurring",
        }
    }
}

/// The panel currently on screen.
#[derive(Debug)]
pub enum MountedView {
    Dashboard(Panel<Dashboard>),
    Budget(Panel<Budgets>),
    Goals(Panel<Goals>),
    Transactions(Panel<Transactions>),
    Analytics(Panel<Analytics>),
    Categories(Panel<Categories>),
    /// The backend has no recurring payments endpoint; nothing is fetched.
    Recurring,
}

impl MountedView {
    fn mount(kind: ViewKind, identity: Identity, api: Arc<dyn FinanceApi>) -> Self {
        match kind {
            ViewKind::Dashboard => MountedView::Dashboard(Panel::new(identity, api)),
            ViewKind::Budget => MountedView::Budget(Panel::new(identity, api)),
            ViewKind::Goals => MountedView::Goals(Panel::new(identity, api)),
            ViewKind::Transactions => MountedView::Transactions(Panel::new(identity, api)),
            ViewKind::Analytics => MountedView::Analytics(Panel::new(identity, api)),
            ViewKind::Categories => MountedView::Categories(Panel::new(identity, api)),
            ViewKind::Recurring => MountedView::Recurring,
        }
    }

    pub fn kind(&self) -> ViewKind {
        match self {
            MountedView::Dashboard(_) => ViewKind::Dashboard,
            MountedView::Budget(_) => ViewKind::Budget,
            MountedView::Goals(_) => ViewKind::Goals,
            MountedView::Transactions(_) => ViewKind::Transactions,
            MountedView::Analytics(_) => ViewKind::Analytics,
            MountedView::Categories(_) => ViewKind::Categories,
            MountedView::Recurring => ViewKind::Recurring,
        }
    }

    /// Error recorded by the mounted panel, if any.
    pub fn last_error(&self) -> Option<&str> {
        match self {
            MountedView::Dashboard(panel) => panel.last_error(),
            MountedView::Budget(panel) => panel.last_error(),
            MountedView::Goals(panel) => panel.last_error(),
            MountedView::Transactions(panel) => panel.last_error(),
            MountedView::Analytics(panel) => panel.last_error(),
            MountedView::Categories(panel) => panel.last_error(),
            MountedView::Recurring => None,
        }
    }

    pub fn set_error(&mut self, message: String) {
        match self {
            MountedView::Dashboard(panel) => panel.set_error(message),
            MountedView::Budget(panel) => panel.set_error(message),
            MountedView::Goals(panel) => panel.set_error(message),
            MountedView::Transactions(panel) => panel.set_error(message),
            MountedView::Analytics(panel) => panel.set_error(message),
            MountedView::Categories(panel) => panel.set_error(message),
            MountedView::Recurring => {}
        }
    }

    pub fn is_loaded(&self) -> bool {
        match self {
            MountedView::Dashboard(panel) => panel.is_loaded(),
            MountedView::Budget(panel) => panel.is_loaded(),
            MountedView::Goals(panel) => panel.is_loaded(),
            MountedView::Transactions(panel) => panel.is_loaded(),
            MountedView::Analytics(panel) => panel.is_loaded(),
            MountedView::Categories(panel) => panel.is_loaded(),
            MountedView::Recurring => true,
        }
    }

    fn spawn_load(&mut self, epoch: u64, sender: &mpsc::UnboundedSender<ViewMessage>) -> bool {
        match self {
            MountedView::Dashboard(panel) => dispatch::spawn_load(panel, epoch, sender),
            MountedView::Budget(panel) => dispatch::spawn_load(panel, epoch, sender),
            MountedView::Goals(panel) => dispatch::spawn_load(panel, epoch, sender),
            MountedView::Transactions(panel) => dispatch::spawn_load(panel, epoch, sender),
            MountedView::Analytics(panel) => dispatch::spawn_load(panel, epoch, sender),
            MountedView::Categories(panel) => dispatch::spawn_load(panel, epoch, sender),
            MountedView::Recurring => return false,
        }
        true
    }

    fn spawn_mutation(
        &mut self,
        mutation: Mutation,
        epoch: u64,
        sender: &mpsc::UnboundedSender<ViewMessage>,
    ) -> bool {
        match self {
            MountedView::Dashboard(panel) => {
                dispatch::spawn_mutation(panel, mutation, epoch, sender)
            }
            MountedView::Budget(panel) => dispatch::spawn_mutation(panel, mutation, epoch, sender),
            MountedView::Goals(panel) => dispatch::spawn_mutation(panel, mutation, epoch, sender),
            MountedView::Transactions(panel) => {
                dispatch::spawn_mutation(panel, mutation, epoch, sender)
            }
            MountedView::Analytics(panel) => {
                dispatch::spawn_mutation(panel, mutation, epoch, sender)
            }
            MountedView::Categories(panel) => {
                dispatch::spawn_mutation(panel, mutation, epoch, sender)
            }
            MountedView::Recurring => return false,
        }
        true
    }
}

/// What the controller wants on screen.
#[derive(Debug)]
pub enum Screen<'a> {
    LoginPrompt,
    Mounted(&'a MountedView),
}

pub struct ViewController {
    api: Arc<dyn FinanceApi>,
    identity: Option<Identity>,
    active: ViewKind,
    mounted: Option<MountedView>,
    /// Bumped on every mount and unmount.
    epoch: u64,
    sender: mpsc::UnboundedSender<ViewMessage>,
}

impl ViewController {
    /// Creates a controller with nothing mounted, and the receiving end of
    /// the channel its background requests report on.
    pub fn new(
        api: Arc<dyn FinanceApi>,
        active: ViewKind,
    ) -> (Self, mpsc::UnboundedReceiver<ViewMessage>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let controller = Self {
            api,
            identity: None,
            active,
            mounted: None,
            epoch: 0,
            sender,
        };
        (controller, receiver)
    }

    pub fn active(&self) -> ViewKind {
        self.active
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn screen(&self) -> Screen<'_> {
        match &self.mounted {
            Some(view) => Screen::Mounted(view),
            None => Screen::LoginPrompt,
        }
    }

    pub fn mounted_mut(&mut self) -> Option<&mut MountedView> {
        self.mounted.as_mut()
    }

    /// Switches to `kind`, remounting it with the current identity.
    pub fn select(&mut self, kind: ViewKind) {
        self.active = kind;
        self.remount();
    }

    /// Replaces the identity. Signing out unmounts the view.
    pub fn set_identity(&mut self, identity: Option<Identity>) {
        if self.identity == identity {
            return;
        }
        self.identity = identity;
        self.remount();
    }

    /// Fetches the mounted view's data again.
    pub fn reload(&mut self) -> bool {
        match self.mounted.as_mut() {
            Some(view) => view.spawn_load(self.epoch, &self.sender),
            None => false,
        }
    }

    /// Sends `mutation` on behalf of the mounted view.
    pub fn submit(&mut self, mutation: Mutation) -> bool {
        match self.mounted.as_mut() {
            Some(view) => view.spawn_mutation(mutation, self.epoch, &self.sender),
            None => false,
        }
    }

    /// Applies a background result, unless it belongs to an earlier mount.
    pub fn apply(&mut self, message: ViewMessage) -> ViewUpdate {
        match self.mounted.as_mut() {
            Some(view) if message.epoch == self.epoch => (message.apply)(view),
            _ => {
                debug!(
                    "Ignoring response for unmounted view (mount #{}, current #{})",
                    message.epoch, self.epoch
                );
                ViewUpdate::Ignored
            }
        }
    }

    fn remount(&mut self) {
        self.epoch += 1;
        self.mounted = self.identity.clone().map(|identity| {
            debug!("Mounting {} for {} (mount #{})", self.active, identity.email, self.epoch);
            MountedView::mount(self.active, identity, Arc::clone(&self.api))
        });
        self.reload();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockFinanceApi;
    use crate::api::types::{BudgetCategory, Goal};
    use crate::panels::test_support::identity;
    use strum::IntoEnumIterator;

    fn laptop() -> Goal {
        Goal {
            id: 1,
            name: "Laptop".to_string(),
            target_amount: 50000.0,
            current_amount: 10000.0,
        }
    }

    #[tokio::test]
    async fn nothing_mounts_without_identity() {
        let mut api = MockFinanceApi::new();
        api.expect_list_goals().never();

        let (mut controller, _receiver) = ViewController::new(Arc::new(api), ViewKind::Dashboard);
        controller.select(ViewKind::Goals);

        assert!(matches!(controller.screen(), Screen::LoginPrompt));
        assert!(!controller.reload());
        assert_eq!(controller.active(), ViewKind::Goals);
    }

    #[tokio::test]
    async fn mount_loads_data_for_identity() {
        let mut api = MockFinanceApi::new();
        api.expect_list_goals()
            .withf(|email| email == "a@x.com")
            .times(1)
            .returning(|_| Ok(vec![laptop()]));

        let (mut controller, mut receiver) = ViewController::new(Arc::new(api), ViewKind::Goals);
        controller.set_identity(Some(identity()));

        let message = receiver.recv().await.unwrap();
        assert!(matches!(controller.apply(message), ViewUpdate::Loaded("goals")));
        match controller.screen() {
            Screen::Mounted(MountedView::Goals(panel)) => assert_eq!(panel.data(), &vec![laptop()]),
            other => panic!("unexpected screen {:?}", other),
        }
    }

    #[tokio::test]
    /// Switching views mounts the new one for the same identity.
    async fn switching_remounts_with_same_identity() {
        let mut api = MockFinanceApi::new();
        api.expect_list_goals().returning(|_| Ok(vec![]));
        api.expect_list_budgets().returning(|_| Ok(vec![]));

        let (mut controller, _receiver) = ViewController::new(Arc::new(api), ViewKind::Goals);
        controller.set_identity(Some(identity()));
        controller.select(ViewKind::Budget);

        match controller.screen() {
            Screen::Mounted(MountedView::Budget(panel)) => {
                assert_eq!(panel.identity().email, "a@x.com")
            }
            other => panic!("unexpected screen {:?}", other),
        }
    }

    #[tokio::test]
    /// A response that arrives after its view was unmounted changes nothing.
    async fn late_responses_are_ignored() {
        let mut api = MockFinanceApi::new();
        api.expect_list_goals().returning(|_| Ok(vec![laptop()]));
        api.expect_list_budgets().returning(|_| {
            Ok(vec![BudgetCategory {
                id: Some(1),
                name: "Food".to_string(),
                color: "#EF4444".to_string(),
                budget_limit: 5000.0,
                spent: 100.0,
            }])
        });

        let (mut controller, mut receiver) = ViewController::new(Arc::new(api), ViewKind::Goals);
        controller.set_identity(Some(identity()));
        controller.select(ViewKind::Budget);

        let mut updates = Vec::new();
        for _ in 0..2 {
            let message = receiver.recv().await.unwrap();
            updates.push(controller.apply(message));
        }

        assert_eq!(
            updates
                .iter()
                .filter(|u| matches!(u, ViewUpdate::Ignored))
                .count(),
            1
        );
        assert!(updates.iter().any(|u| matches!(u, ViewUpdate::Loaded("budgets"))));
    }

    #[tokio::test]
    async fn signing_out_unmounts() {
        let mut api = MockFinanceApi::new();
        api.expect_dashboard().returning(|_| Ok(Default::default()));

        let (mut controller, mut receiver) =
            ViewController::new(Arc::new(api), ViewKind::Dashboard);
        controller.set_identity(Some(identity()));
        controller.set_identity(None);

        assert!(matches!(controller.screen(), Screen::LoginPrompt));
        let message = receiver.recv().await.unwrap();
        assert!(matches!(controller.apply(message), ViewUpdate::Ignored));
    }

    #[tokio::test]
    async fn recurring_mounts_without_fetching() {
        let api = MockFinanceApi::new();
        let (mut controller, _receiver) = ViewController::new(Arc::new(api), ViewKind::Recurring);
        controller.set_identity(Some(identity()));

        assert!(matches!(
            controller.screen(),
            Screen::Mounted(MountedView::Recurring)
        ));
        assert!(!controller.reload());
    }

    #[tokio::test]
    async fn write_then_reload_goes_through_channel() {
        let mut api = MockFinanceApi::new();
        api.expect_list_goals().returning(|_| Ok(vec![laptop()]));
        api.expect_add_to_goal().times(1).returning(|_| Ok(()));

        let (mut controller, mut receiver) = ViewController::new(Arc::new(api), ViewKind::Goals);
        controller.set_identity(Some(identity()));
        let message = receiver.recv().await.unwrap();
        controller.apply(message);

        let mutation = match controller.mounted_mut() {
            Some(MountedView::Goals(panel)) => panel.prepare_deposit(1, "500").unwrap(),
            _ => panic!("goals not mounted"),
        };
        assert!(controller.submit(mutation));

        let message = receiver.recv().await.unwrap();
        assert!(matches!(controller.apply(message), ViewUpdate::Written(_)));
    }

    #[test]
    fn tabs_are_in_fixed_order() {
        let names: Vec<String> = ViewKind::iter().map(|k| k.to_string()).collect();
        assert_eq!(
            names,
            [
                "dashboard",
                "budget",
                "goals",
                "transactions",
                "analytics",
                "categories",
                "recurring"
            ]
        );
    }
}
