use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use super::{Alert, Confirm, Generation, Load, Mount, Mutation, Phase, Submit, Target, authorize};
use crate::api::{ApiClient, Resource};
use crate::auth::Session;
use crate::utils::filter::{Searchable, filter};
use crate::validate::{Validate, ValidationErrors};

#[derive(Debug, Clone)]
pub struct ListState<R> {
    pub phase: Phase,
    /// Last successfully fetched collection; never patched locally.
    pub items: Vec<R>,
    pub search: String,
    pub errors: ValidationErrors,
    pub alert: Option<Alert>,
}

impl<R> Default for ListState<R> {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            items: Vec::new(),
            search: String::new(),
            errors: ValidationErrors::new(),
            alert: None,
        }
    }
}

/// Controller for a single-collection screen (employees, roles, areas, ...).
pub struct ListScreen<R: Resource> {
    api: ApiClient,
    state: Mutex<ListState<R>>,
    generation: Generation,
}

impl<R: Resource + Searchable> ListScreen<R> {
    /// Reads the session and performs the initial load; nothing is fetched without a token.
    pub async fn mount(session: &Session, api: &ApiClient) -> Mount<Self> {
        let Some(api) = authorize(session, api) else {
            info!(resource = R::NAME, "No session, redirecting to login");
            return Mount::RedirectToLogin;
        };

        let screen = Self {
            api,
            state: Mutex::new(ListState::default()),
            generation: Generation::default(),
        };
        screen.load().await;
        Mount::Ready(screen)
    }

    fn lock(&self) -> MutexGuard<'_, ListState<R>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> ListState<R> {
        self.lock().clone()
    }

    /// Items matching the current search text.
    pub fn visible(&self) -> Vec<R> {
        let state = self.lock();
        filter(&state.items, &state.search)
    }

    pub fn set_search(&self, text: impl Into<String>) {
        self.lock().search = text.into();
    }

    pub fn find(&self, id: u64) -> Option<R> {
        self.lock().items.iter().find(|item| item.id() == id).cloned()
    }

    pub fn dismiss_alert(&self) -> Option<Alert> {
        self.lock().alert.take()
    }

    /// Replaces the collection with a fresh read. A response that arrives after a
    /// newer load has started is discarded.
    pub async fn load(&self) -> Load {
        let ticket = self.generation.begin();
        self.lock().phase = Phase::Loading;

        let result = self.api.list::<R>().await;

        let mut state = self.lock();
        if !self.generation.is_current(ticket) {
            debug!(resource = R::NAME, ticket, "Discarding superseded response");
            return Load::Superseded;
        }

        state.phase = Phase::Ready;
        match result {
            Ok(items) => {
                state.items = items;
                Load::Loaded
            }
            Err(err) => {
                warn!(resource = R::NAME, error = %err, "Load failed");
                state.alert = Some(Alert::from_error("Error al cargar", &err));
                Load::Failed(err)
            }
        }
    }

    /// Validates, sends the create or update, then reloads the whole list.
    pub async fn submit(&self, target: Target, draft: &R::Draft, today: NaiveDate) -> Submit {
        if let Err(errors) = draft.validate(today) {
            debug!(resource = R::NAME, %errors, "Form rejected");
            self.lock().errors = errors.clone();
            return Submit::Invalid(errors);
        }
        self.lock().errors = ValidationErrors::new();

        let result = match target {
            Target::Create => self.api.create::<R>(draft).await,
            Target::Update(id) => self.api.update::<R>(id, draft).await,
        };

        if let Err(err) = result {
            warn!(resource = R::NAME, ?target, error = %err, "Save failed");
            self.lock().alert = Some(Alert::from_error("Error al guardar", &err));
            return Submit::Failed(err);
        }

        self.load().await;
        Submit::Saved
    }

    /// Asks for confirmation, deletes, then reloads. Declining sends nothing.
    pub async fn delete(&self, id: u64, confirm: &dyn Confirm) -> Mutation {
        let prompt = format!("¿Eliminar {}?", R::LABEL);
        if !confirm.confirm(&prompt) {
            debug!(resource = R::NAME, id, "Delete cancelled");
            return Mutation::Cancelled;
        }

        if let Err(err) = self.api.delete::<R>(id).await {
            warn!(resource = R::NAME, id, error = %err, "Delete failed");
            self.lock().alert = Some(Alert::from_error("Error al eliminar", &err));
            return Mutation::Failed(err);
        }

        self.load().await;
        Mutation::Done
    }
}
