//! Error types for the toast engine.
//!
//! None of these are ever returned to a producer call site. Producer calls are
//! fire-and-forget; failures inside the engine are logged and forwarded to the
//! store's host error handler (see [`ToastStore::set_error_handler`]).
//!
//! [`ToastStore::set_error_handler`]: crate::ToastStore::set_error_handler

use thiserror::Error;

use crate::id::ToastId;
use crate::lifecycle::{EntryState, Transition};

/// Failure raised while driving a toast.
#[derive(Error, Debug)]
pub enum ToastError {
    /// A user-supplied success/error/description resolver failed.
    #[error("resolver for toast {id} failed: {source}")]
    Resolver {
        /// The toast whose resolver failed
        id: ToastId,
        /// The resolver's error
        #[source]
        source: anyhow::Error,
    },

    /// The `finally` callback of a promise toast failed.
    #[error("finally callback for toast {id} failed: {source}")]
    Finally {
        /// The toast whose finalizer failed
        id: ToastId,
        /// The finalizer's error
        #[source]
        source: anyhow::Error,
    },

    /// Toaster configuration could not be parsed.
    #[error("invalid toaster configuration: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type alias using [`ToastError`].
pub type Result<T> = std::result::Result<T, ToastError>;

/// Rejected lifecycle transition.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleError {
    /// The transition is not defined from the current state.
    #[error("cannot apply {transition} to a toast in state {from}")]
    InvalidTransition {
        /// State the entry was in
        from: EntryState,
        /// Transition that was attempted
        transition: Transition,
    },
}
