//! Resource panels.
//!
//! A panel is bound to one backend collection and one identity. It keeps the
//! last list the server returned and nothing else: every successful write is
//! followed by a fresh load instead of patching the local copy.
//!
//! Loads are split into [`Panel::begin_load`] and [`Panel::apply_load`] so a
//! caller can run the request elsewhere (the TUI spawns it) and hand the
//! result back later. Each load carries a [`RequestTicket`]; only the ticket
//! of the most recent load is accepted.

use crate::api::FinanceApi;
use crate::api::error::ApiError;
use crate::session::Identity;
use futures::future::BoxFuture;
use log::{debug, warn};
use std::fmt::Debug;
use std::sync::Arc;
use thiserror::Error;

pub mod budgets;
pub mod categories;
pub mod goals;
pub mod mutation;
pub mod overview;
pub mod progress;
pub mod transactions;
pub mod validation;

pub use budgets::Budgets;
pub use categories::Categories;
pub use goals::Goals;
pub use mutation::Mutation;
pub use overview::{Analytics, Dashboard};
pub use transactions::Transactions;
pub use validation::ValidationError;

#[derive(Debug, Error)]
pub enum PanelError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// A backend collection a panel can be bound to.
pub trait Resource: Send + Sync + 'static {
    /// What one successful load yields.
    type Data: Clone + Debug + Default + Send + 'static;
    /// Input form state owned by the panel.
    type Form: Debug + Default + Send;

    /// Human readable name used in logs and messages.
    const NAME: &'static str;

    fn fetch<'a>(
        api: &'a dyn FinanceApi,
        email: &'a str,
    ) -> BoxFuture<'a, Result<Self::Data, ApiError>>;
}

/// Identifies one issued load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The response replaced the panel's data.
    Applied,
    /// A newer load was issued since; the response was discarded.
    Stale,
}

/// User's answer to a destructive action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The write succeeded and the panel was reloaded.
    Applied,
    /// The write succeeded but the reload after it failed. The panel still
    /// holds the list from before the write and records the load error.
    Unrefreshed,
    /// Nothing was sent.
    Cancelled,
}

/// A load that has been issued but not yet run.
pub struct PendingLoad<D> {
    pub ticket: RequestTicket,
    pub request: BoxFuture<'static, Result<D, ApiError>>,
}

pub struct Panel<R: Resource> {
    identity: Identity,
    api: Arc<dyn FinanceApi>,
    data: R::Data,
    /// Input being edited for this panel's create/update actions.
    pub form: R::Form,
    generation: u64,
    loaded: bool,
    last_error: Option<String>,
}

impl<R: Resource> Panel<R> {
    /// Binds a panel to `identity`. No request is made until the first load.
    pub fn new(identity: Identity, api: Arc<dyn FinanceApi>) -> Self {
        Self {
            identity,
            api,
            data: R::Data::default(),
            form: R::Form::default(),
            generation: 0,
            loaded: false,
            last_error: None,
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn data(&self) -> &R::Data {
        &self.data
    }

    /// Whether any load has succeeded yet.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Message of the most recent failed operation, cleared by the next success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    pub fn reset_form(&mut self) {
        self.form = R::Form::default();
    }

    /// Issues a load. Any earlier ticket becomes stale.
    pub fn begin_load(&mut self) -> PendingLoad<R::Data> {
        self.generation += 1;
        let api = Arc::clone(&self.api);
        let email = self.identity.email.clone();
        debug!("Loading {} for {} (#{})", R::NAME, email, self.generation);
        PendingLoad {
            ticket: RequestTicket(self.generation),
            request: Box::pin(async move { R::fetch(api.as_ref(), &email).await }),
        }
    }

    /// Applies the result of a load issued with `ticket`.
    ///
    /// A failed load leaves the current data untouched. Results of stale
    /// tickets are discarded whether they succeeded or not.
    pub fn apply_load(
        &mut self,
        ticket: RequestTicket,
        result: Result<R::Data, ApiError>,
    ) -> Result<LoadOutcome, ApiError> {
        if ticket.0 != self.generation {
            debug!(
                "Discarding stale {} response (#{} < #{})",
                R::NAME,
                ticket.0,
                self.generation
            );
            return Ok(LoadOutcome::Stale);
        }
        match result {
            Ok(data) => {
                self.data = data;
                self.loaded = true;
                self.last_error = None;
                Ok(LoadOutcome::Applied)
            }
            Err(e) => {
                warn!("Failed to load {}: {}", R::NAME, e);
                self.last_error = Some(format!("Failed to load {}: {}", R::NAME, e.to_pretty()));
                Err(e)
            }
        }
    }

    /// Fetches the collection and replaces the panel's data with it.
    pub async fn load(&mut self) -> Result<LoadOutcome, PanelError> {
        let pending = self.begin_load();
        let result = pending.request.await;
        Ok(self.apply_load(pending.ticket, result)?)
    }

    /// Prepares `mutation` for sending on another task.
    pub fn begin_mutation(&self, mutation: Mutation) -> BoxFuture<'static, Result<(), ApiError>> {
        let api = Arc::clone(&self.api);
        Box::pin(async move { mutation.send(api.as_ref()).await })
    }

    /// Records the result of a write.
    ///
    /// Returns `true` when the panel should now be reloaded. A failed write
    /// keeps the form and does not reload, so the failure is not hidden behind
    /// an unchanged "fresh" list.
    pub fn finish_mutation(
        &mut self,
        clears_form: bool,
        description: &str,
        result: Result<(), ApiError>,
    ) -> Result<(), ApiError> {
        match result {
            Ok(()) => {
                debug!("{} succeeded", description);
                if clears_form {
                    self.reset_form();
                }
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                warn!("{} failed: {}", description, e);
                self.last_error = Some(format!("{} failed: {}", description, e.to_pretty()));
                Err(e)
            }
        }
    }

    /// Sends `mutation` and, if it succeeds, reloads the panel.
    ///
    /// Only a failed write is an error. Once the server has accepted the
    /// write, a failing reload yields [`MutationOutcome::Unrefreshed`] so
    /// callers never report an applied change as failed.
    pub async fn mutate(&mut self, mutation: Mutation) -> Result<MutationOutcome, PanelError> {
        let clears_form = mutation.clears_form();
        let description = mutation.to_string();
        let result = mutation.send(self.api.as_ref()).await;
        self.finish_mutation(clears_form, &description, result)?;
        match self.load().await {
            Ok(_) => Ok(MutationOutcome::Applied),
            Err(e) => {
                warn!("{} succeeded but reloading {} failed: {}", description, R::NAME, e);
                Ok(MutationOutcome::Unrefreshed)
            }
        }
    }

    /// Records a validation failure and hands it back.
    fn reject(&mut self, error: ValidationError) -> PanelError {
        self.last_error = Some(error.to_string());
        PanelError::Validation(error)
    }
}

impl<R: Resource> Debug for Panel<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Panel")
            .field("resource", &R::NAME)
            .field("email", &self.identity.email)
            .field("generation", &self.generation)
            .field("loaded", &self.loaded)
            .field("data", &self.data)
            .field("form", &self.form)
            .field("last_error", &self.last_error)
            .finish()
    }
}
