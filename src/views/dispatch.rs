//! Running panel requests on background tasks.
//!
//! A request is spawned with the mount epoch it was issued under. Its result
//! comes back as a [`ViewMessage`] holding a closure that knows how to apply
//! it to the right panel; the controller only runs the closure if the epoch
//! still matches.

use super::MountedView;
use crate::api::error::ApiError;
use crate::panels::{
    Analytics, Budgets, Categories, Dashboard, Goals, LoadOutcome, Mutation, Panel, Resource,
    Transactions,
};
use tokio::sync::mpsc;

/// A resource that can be the mounted view.
pub trait Mountable: Resource + Sized {
    /// The panel of this resource, if it is the one mounted.
    fn slot(view: &mut MountedView) -> Option<&mut Panel<Self>>;
}

macro_rules! mountable {
    ($resource:ty => $variant:ident) => {
        impl Mountable for $resource {
            fn slot(view: &mut MountedView) -> Option<&mut Panel<Self>> {
                match view {
                    MountedView::$variant(panel) => Some(panel),
                    _ => None,
                }
            }
        }
    };
}

mountable!(Dashboard => Dashboard);
mountable!(Budgets => Budget);
mountable!(Goals => Goals);
mountable!(Transactions => Transactions);
mountable!(Analytics => Analytics);
mountable!(Categories => Categories);

type Apply = Box<dyn FnOnce(&mut MountedView) -> ViewUpdate + Send>;

/// Result of a background request, addressed to one mount.
pub struct ViewMessage {
    pub(super) epoch: u64,
    pub(super) apply: Apply,
}

impl std::fmt::Debug for ViewMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewMessage")
            .field("epoch", &self.epoch)
            .finish_non_exhaustive()
    }
}

/// What applying a [`ViewMessage`] did.
#[derive(Debug)]
pub enum ViewUpdate {
    /// Fresh data replaced the panel's list.
    Loaded(&'static str),
    /// A newer load was issued by the same mount.
    Stale,
    /// A write succeeded; the view should be reloaded.
    Written(String),
    /// The request failed. The panel has recorded the message.
    Failed { context: String, error: ApiError },
    /// The view it was meant for is no longer mounted.
    Ignored,
}

pub(super) fn spawn_load<R: Mountable>(
    panel: &mut Panel<R>,
    epoch: u64,
    sender: &mpsc::UnboundedSender<ViewMessage>,
) {
    let pending = panel.begin_load();
    let sender = sender.clone();
    tokio::spawn(async move {
        let ticket = pending.ticket;
        let result = pending.request.await;
        let apply: Apply = Box::new(move |view| match R::slot(view) {
            Some(panel) => match panel.apply_load(ticket, result) {
                Ok(LoadOutcome::Applied) => ViewUpdate::Loaded(R::NAME),
                Ok(LoadOutcome::Stale) => ViewUpdate::Stale,
                Err(error) => ViewUpdate::Failed {
                    context: format!("Loading {}", R::NAME),
                    error,
                },
            },
            None => ViewUpdate::Ignored,
        });
        // The receiver is gone once the UI has exited.
        let _ = sender.send(ViewMessage { epoch, apply });
    });
}

pub(super) fn spawn_mutation<R: Mountable>(
    panel: &mut Panel<R>,
    mutation: Mutation,
    epoch: u64,
    sender: &mpsc::UnboundedSender<ViewMessage>,
) {
    let clears_form = mutation.clears_form();
    let description = mutation.to_string();
    let request = panel.begin_mutation(mutation);
    let sender = sender.clone();
    tokio::spawn(async move {
        let result = request.await;
        let apply: Apply = Box::new(move |view| match R::slot(view) {
            Some(panel) => match panel.finish_mutation(clears_form, &description, result) {
                Ok(()) => ViewUpdate::Written(description),
                Err(error) => ViewUpdate::Failed {
                    context: description,
                    error,
                },
            },
            None => ViewUpdate::Ignored,
        });
        let _ = sender.send(ViewMessage { epoch, apply });
    });
}
