//! Promise-bound toasts.
//!
//! A promise toast starts as a `loading` entry and is moved to `success` or
//! `error` once the wrapped operation settles:
//!
//! ```ignore
//! store.promise(
//!     fetch_user(42),
//!     PromiseToast::new()
//!         .loading("Loading user...")
//!         .success(Resolver::map(|user: &User| format!("Loaded {}", user.name)))
//!         .error("Could not load user"),
//! );
//! ```
//!
//! The spawned task runs on the current `LocalSet`. Hosts with their own
//! executor can drive a [`PromiseTask`] by hand instead.

use std::fmt;
use std::future::Future;

use crate::error::ToastError;
use crate::id::ToastId;
use crate::store::{ToastStore, WeakToastStore};
use crate::toast::{ToastKind, ToastParams};

/// Title shown when a resolver fails.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

// ============================================================
// RESOLVERS
// ============================================================

/// Display fields produced by a resolver.
#[derive(Debug, Clone, Default)]
pub struct PromiseResult {
    /// Becomes the toast title
    pub message: String,
    /// Additional field overrides
    pub params: ToastParams,
}

impl PromiseResult {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            params: ToastParams::default(),
        }
    }

    pub fn with_params(mut self, params: ToastParams) -> Self {
        self.params = params;
        self
    }

    fn into_params(self) -> ToastParams {
        self.params.title(self.message)
    }
}

impl From<&str> for PromiseResult {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for PromiseResult {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

/// Maps a promise outcome to display fields.
pub enum Resolver<V> {
    /// Fixed message
    Text(String),
    /// Fixed message plus field overrides
    Extended(PromiseResult),
    /// Function of the outcome
    Map(Box<dyn FnOnce(&V) -> PromiseResult>),
    /// Fallible function of the outcome
    TryMap(Box<dyn FnOnce(&V) -> anyhow::Result<PromiseResult>>),
}

impl<V> Resolver<V> {
    pub fn text(message: impl Into<String>) -> Self {
        Resolver::Text(message.into())
    }

    /// Builds the result from the outcome.
    ///
    /// `f` must not panic: the promise task would unwind with the toast left
    /// in `Loading` and `finally` not run. A resolver that can fail belongs in
    /// [`Resolver::try_map`], whose error is shown as the generic error toast.
    pub fn map<R>(f: impl FnOnce(&V) -> R + 'static) -> Self
    where
        R: Into<PromiseResult>,
    {
        Resolver::Map(Box::new(move |value| f(value).into()))
    }

    pub fn try_map<R>(f: impl FnOnce(&V) -> anyhow::Result<R> + 'static) -> Self
    where
        R: Into<PromiseResult>,
    {
        Resolver::TryMap(Box::new(move |value| f(value).map(Into::into)))
    }

    fn resolve(self, value: &V) -> anyhow::Result<PromiseResult> {
        match self {
            Resolver::Text(message) => Ok(PromiseResult::new(message)),
            Resolver::Extended(result) => Ok(result),
            Resolver::Map(f) => Ok(f(value)),
            Resolver::TryMap(f) => f(value),
        }
    }
}

impl<V> From<&str> for Resolver<V> {
    fn from(message: &str) -> Self {
        Resolver::Text(message.to_string())
    }
}

impl<V> From<String> for Resolver<V> {
    fn from(message: String) -> Self {
        Resolver::Text(message)
    }
}

impl<V> From<PromiseResult> for Resolver<V> {
    fn from(result: PromiseResult) -> Self {
        Resolver::Extended(result)
    }
}

impl<V> fmt::Debug for Resolver<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolver::Text(message) => f.debug_tuple("Text").field(message).finish(),
            Resolver::Extended(result) => f.debug_tuple("Extended").field(result).finish(),
            Resolver::Map(_) => f.write_str("Map(..)"),
            Resolver::TryMap(_) => f.write_str("TryMap(..)"),
        }
    }
}

// ============================================================
// PROMISE TOAST OPTIONS
// ============================================================

type Finalizer = Box<dyn FnOnce() -> anyhow::Result<()>>;
type RejectCheck<T, E> = Box<dyn FnOnce(&T) -> Option<E>>;

/// Messages and callbacks of a promise toast.
///
/// A missing `success` or `error` resolver dismisses the loading toast when
/// the promise settles on that path.
pub struct PromiseToast<T, E> {
    loading: Option<String>,
    success: Option<Resolver<T>>,
    error: Option<Resolver<E>>,
    description: Option<Resolver<T>>,
    finally: Option<Finalizer>,
    reject_when: Option<RejectCheck<T, E>>,
    params: ToastParams,
}

impl<T, E> Default for PromiseToast<T, E> {
    fn default() -> Self {
        Self {
            loading: None,
            success: None,
            error: None,
            description: None,
            finally: None,
            reject_when: None,
            params: ToastParams::default(),
        }
    }
}

impl<T, E> PromiseToast<T, E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Title of the loading toast.
    pub fn loading(mut self, title: impl Into<String>) -> Self {
        self.loading = Some(title.into());
        self
    }

    pub fn success(mut self, resolver: impl Into<Resolver<T>>) -> Self {
        self.success = Some(resolver.into());
        self
    }

    pub fn error(mut self, resolver: impl Into<Resolver<E>>) -> Self {
        self.error = Some(resolver.into());
        self
    }

    /// Description resolved from the fulfilled value. Only the message is used.
    pub fn description(mut self, resolver: impl Into<Resolver<T>>) -> Self {
        self.description = Some(resolver.into());
        self
    }

    /// Runs after settlement on both paths. Failures are reported, never
    /// propagated.
    pub fn finally(mut self, f: impl FnOnce() -> anyhow::Result<()> + 'static) -> Self {
        self.finally = Some(Box::new(f));
        self
    }

    /// Treats a fulfilled value as a rejection when `check` returns an error.
    pub fn reject_when(mut self, check: impl FnOnce(&T) -> Option<E> + 'static) -> Self {
        self.reject_when = Some(Box::new(check));
        self
    }

    /// Extra fields for the loading toast (id, style, action...).
    pub fn params(mut self, params: ToastParams) -> Self {
        self.params = params;
        self
    }

    pub fn id(mut self, id: impl Into<ToastId>) -> Self {
        self.params = self.params.id(id);
        self
    }
}

impl<T, E> fmt::Debug for PromiseToast<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PromiseToast")
            .field("loading", &self.loading)
            .field("success", &self.success)
            .field("error", &self.error)
            .field("description", &self.description)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

// ============================================================
// PROMISE TASK
// ============================================================

/// Settlement state of a promise toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromiseState {
    Pending,
    Fulfilled,
    Rejected,
}

/// The continuation bound to one promise toast.
///
/// Created with the loading toast already pushed. [`settle`](Self::settle)
/// commits the final transition exactly once; it is inert towards the store
/// when the toast was dismissed (or dismissed and re-created) meanwhile, but
/// `finally` always runs.
pub struct PromiseTask<T, E> {
    id: ToastId,
    generation: u64,
    store: WeakToastStore,
    state: PromiseState,
    handlers: Option<PromiseToast<T, E>>,
}

impl<T, E> PromiseTask<T, E> {
    /// Pushes the loading toast and returns the pending task.
    pub fn begin(store: &ToastStore, mut toast: PromiseToast<T, E>) -> Self {
        let mut params = std::mem::take(&mut toast.params);
        if let Some(title) = toast.loading.take() {
            params = params.title(title);
        }
        let id = store.push(ToastKind::Loading, params);
        let generation = store.generation_of(&id).unwrap_or_default();
        tracing::debug!(id = %id, "promise toast pending");

        Self {
            id,
            generation,
            store: store.downgrade(),
            state: PromiseState::Pending,
            handlers: Some(toast),
        }
    }

    pub fn id(&self) -> &ToastId {
        &self.id
    }

    pub fn state(&self) -> PromiseState {
        self.state
    }

    /// Commits the outcome. Calls after the first are ignored.
    pub fn settle(&mut self, outcome: Result<T, E>) -> PromiseState {
        let Some(handlers) = self.handlers.take() else {
            tracing::warn!(id = %self.id, "promise toast settled twice");
            return self.state;
        };
        let PromiseToast {
            success,
            error,
            description,
            finally,
            reject_when,
            ..
        } = handlers;

        let outcome = match outcome {
            Ok(value) => match reject_when.and_then(|check| check(&value)) {
                Some(reason) => Err(reason),
                None => Ok(value),
            },
            Err(reason) => Err(reason),
        };

        let (kind, resolution) = match &outcome {
            Ok(value) => {
                self.state = PromiseState::Fulfilled;
                let resolution = success.map(|success| -> anyhow::Result<ToastParams> {
                    let resolved = success.resolve(value)?;
                    let mut params = resolved.into_params();
                    if let Some(description) = description {
                        params = params.description(description.resolve(value)?.message);
                    }
                    Ok(params)
                });
                (ToastKind::Success, resolution)
            }
            Err(reason) => {
                self.state = PromiseState::Rejected;
                let resolution = error
                    .map(|error| error.resolve(reason).map(PromiseResult::into_params));
                (ToastKind::Error, resolution)
            }
        };

        let store = self.store.upgrade();
        match store.as_ref() {
            Some(store) => self.commit(store, kind, resolution),
            None => tracing::debug!(id = %self.id, "promise settled after store was dropped"),
        }

        if let Some(finally) = finally {
            if let Err(source) = finally() {
                let error = ToastError::Finally {
                    id: self.id.clone(),
                    source,
                };
                match store.as_ref() {
                    Some(store) => store.report(error),
                    None => tracing::error!(%error, "toast engine failure"),
                }
            }
        }

        self.state
    }

    fn commit(
        &self,
        store: &ToastStore,
        kind: ToastKind,
        resolution: Option<anyhow::Result<ToastParams>>,
    ) {
        match resolution {
            Some(Ok(params)) => {
                if store.settle(&self.id, self.generation, kind, params) {
                    tracing::debug!(id = %self.id, kind = %kind, "promise toast settled");
                }
            }
            Some(Err(source)) => {
                store.settle(
                    &self.id,
                    self.generation,
                    ToastKind::Error,
                    ToastParams::new().title(GENERIC_ERROR_MESSAGE),
                );
                store.report(ToastError::Resolver {
                    id: self.id.clone(),
                    source,
                });
            }
            None => {
                if store.is_current(&self.id, self.generation) {
                    store.dismiss(&self.id);
                }
            }
        }
    }
}

impl<T, E> fmt::Debug for PromiseTask<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PromiseTask")
            .field("id", &self.id)
            .field("generation", &self.generation)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

// ============================================================
// STORE ENTRY POINTS
// ============================================================

impl ToastStore {
    /// Binds a toast to a future.
    ///
    /// Pushes the loading toast immediately and settles it from a task spawned
    /// with [`tokio::task::spawn_local`], so this must be called inside a
    /// `LocalSet`. The future itself is never cancelled by dismissing the toast.
    pub fn promise<F, T, E>(&self, future: F, toast: PromiseToast<T, E>) -> ToastId
    where
        F: Future<Output = Result<T, E>> + 'static,
        T: 'static,
        E: 'static,
    {
        let task = PromiseTask::begin(self, toast);
        spawn_settlement(task, future)
    }

    /// Like [`promise`](Self::promise), but creates the future by calling
    /// `thunk` after the loading toast is pushed.
    pub fn promise_with<F, Fut, T, E>(&self, thunk: F, toast: PromiseToast<T, E>) -> ToastId
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>> + 'static,
        T: 'static,
        E: 'static,
    {
        let task = PromiseTask::begin(self, toast);
        spawn_settlement(task, thunk())
    }
}

fn spawn_settlement<F, T, E>(mut task: PromiseTask<T, E>, future: F) -> ToastId
where
    F: Future<Output = Result<T, E>> + 'static,
    T: 'static,
    E: 'static,
{
    let id = task.id().clone();
    tokio::task::spawn_local(async move {
        let outcome = future.await;
        task.settle(outcome);
    });
    id
}
