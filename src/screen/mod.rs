//! Screen controllers: the fetch, filter, mutate, refetch cycle shared by every module.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::warn;

use crate::api::ApiClient;
use crate::auth::Session;
use crate::error::ApiError;
use crate::validate::ValidationErrors;

pub mod applications;
pub mod list;

pub use applications::{ApplicationRow, ApplicationsScreen, ApplicationsState, Scope};
pub use list::{ListScreen, ListState};

/// Result of mounting a screen that needs a signed-in user.
#[derive(Debug)]
pub enum Mount<S> {
    Ready(S),
    /// No stored token: the caller should navigate to login. Nothing was fetched.
    RedirectToLogin,
}

impl<S> Mount<S> {
    pub fn ready(self) -> Option<S> {
        match self {
            Self::Ready(screen) => Some(screen),
            Self::RedirectToLogin => None,
        }
    }
}

/// Reads the token once and hands back an authorized client.
pub(crate) fn authorize(session: &Session, api: &ApiClient) -> Option<ApiClient> {
    match session.token() {
        Ok(Some(token)) => Some(api.with_token(token)),
        Ok(None) => None,
        Err(e) => {
            warn!(error = %e, "Could not read stored session");
            None
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Ready,
}

/// Blocking informational message shown after a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn from_error(title: impl Into<String>, err: &ApiError) -> Self {
        Self::new(title, err.user_message())
    }
}

/// Blocking yes/no prompt.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Load {
    Loaded,
    /// A newer load started while this one was in flight; its response was dropped.
    Superseded,
    Failed(ApiError),
}

/// Where a submitted form goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Create,
    Update(u64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submit {
    Saved,
    /// Rejected before any request was made.
    Invalid(ValidationErrors),
    Failed(ApiError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Done,
    /// The user declined the confirmation prompt.
    Cancelled,
    Failed(ApiError),
}

/// Monotonic counter identifying the latest load of a screen.
#[derive(Debug, Default)]
pub(crate) struct Generation(AtomicU64);

impl Generation {
    pub(crate) fn begin(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub(crate) fn is_current(&self, ticket: u64) -> bool {
        self.0.load(Ordering::SeqCst) == ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_generation_is_current() {
        let generation = Generation::default();
        let first = generation.begin();
        let second = generation.begin();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
    }

    #[test]
    fn closures_confirm() {
        let yes = |_: &str| true;
        let no = |prompt: &str| prompt.is_empty();
        assert!(yes.confirm("¿Eliminar?"));
        assert!(!no.confirm("¿Eliminar?"));
    }
}
