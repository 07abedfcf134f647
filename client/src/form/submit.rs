//! Async submission driver shared by the form component and its tests.
//!
//! ARCHITECTURE
//! ============
//! `submit` only touches form state through `FormStore`, so the same code
//! runs against a Leptos `RwSignal` in the browser and any other store
//! in tests. A store that has been disposed (component torn down mid-flight)
//! makes `with_form` return `None`; the late result is then dropped.

#[cfg(test)]
#[path = "submit_test.rs"]
mod submit_test;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use leptos::prelude::*;

use super::fields::FormRecord;
use super::result::AuthActionResult;
use super::schema::Schema;
use super::state::{Completion, FormState, SubmitStart};

/// Shared access to one form's state.
pub trait FormStore<T> {
    /// Run `f` against the state, or return `None` if the store is gone.
    fn with_form<R>(&self, f: impl FnOnce(&mut FormState<T>) -> R) -> Option<R>;
}

impl<T: FormRecord> FormStore<T> for RwSignal<FormState<T>> {
    fn with_form<R>(&self, f: impl FnOnce(&mut FormState<T>) -> R) -> Option<R> {
        self.try_update(f)
    }
}

/// Client-side router hook.
pub trait Navigate {
    fn navigate(&self, path: &str);
}

impl<F: Fn(&str)> Navigate for F {
    fn navigate(&self, path: &str) {
        self(path);
    }
}

/// Boxed future returned by a `SubmitAction`.
pub type ActionFuture = Pin<Box<dyn Future<Output = Result<AuthActionResult, String>>>>;

/// Async credential submission, e.g. a POST to the auth service.
pub struct SubmitAction<T>(Arc<dyn Fn(T) -> ActionFuture + Send + Sync>);

impl<T: 'static> SubmitAction<T> {
    pub fn new<F, Fut>(action: F) -> Self
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<AuthActionResult, String>> + 'static,
    {
        Self(Arc::new(move |values| -> ActionFuture { Box::pin(action(values)) }))
    }

    /// Start the action for `values`.
    pub fn call(&self, values: T) -> ActionFuture {
        (self.0)(values)
    }
}

impl<T> Clone for SubmitAction<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

/// How a call to `submit` ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; the action was not invoked.
    Invalid,
    /// Another submission was pending; the action was not invoked.
    Busy,
    /// The action succeeded and navigation was triggered.
    Succeeded,
    /// The action reported or raised an error; it is shown on the form.
    Failed,
    /// The form went away before the action finished.
    Abandoned,
}

/// Validate, run the action once, and apply its result.
pub async fn submit<T, S, N>(store: &S, schema: &Schema<T>, action: &SubmitAction<T>, navigator: &N) -> SubmitOutcome
where
    T: FormRecord,
    S: FormStore<T>,
    N: Navigate + ?Sized,
{
    let values = match store.with_form(|state| state.begin_submit(schema)) {
        None => return SubmitOutcome::Abandoned,
        Some(SubmitStart::Busy) => return SubmitOutcome::Busy,
        Some(SubmitStart::Invalid) => return SubmitOutcome::Invalid,
        Some(SubmitStart::Ready(values)) => values,
    };

    let outcome = action.call(values).await;

    match store.with_form(|state| state.finish_submit(outcome)) {
        None => {
            log::debug!("auth form dropped before submission finished");
            SubmitOutcome::Abandoned
        }
        Some(Completion::Navigate(path)) => {
            navigator.navigate(path);
            SubmitOutcome::Succeeded
        }
        Some(Completion::Failed) => SubmitOutcome::Failed,
    }
}
