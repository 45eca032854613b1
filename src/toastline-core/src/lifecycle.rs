//! Per-entry lifecycle state machine.
//!
//! ```text
//!            create(kind)
//!                 │
//!                 ▼
//!        ┌── Display(kind) ◀──┐
//!        │        │  update   │
//!        │        └───────────┘
//!        │ dismiss
//!        ▼
//!   Dismissing ──remove──▶ Removed
//! ```
//!
//! The store reports `Dismissing` as soon as a dismiss is requested; the
//! container completes the move to `Removed` once the node is detached.

use std::fmt;

use crate::error::LifecycleError;
use crate::toast::ToastKind;

/// Where an entry is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryState {
    /// Visible with the given kind
    Display(ToastKind),
    /// Dismiss requested, waiting for the container to detach it
    Dismissing,
    /// Gone for good
    Removed,
}

/// A requested lifecycle change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Rewrite the type of an active entry
    Update(ToastKind),
    /// Start removal
    Dismiss,
    /// Finish removal
    Remove,
}

impl EntryState {
    /// Returns true while the entry is displayed (not dismissing or removed).
    pub fn is_active(self) -> bool {
        matches!(self, EntryState::Display(_))
    }

    /// The display kind, if active.
    pub fn kind(self) -> Option<ToastKind> {
        match self {
            EntryState::Display(kind) => Some(kind),
            _ => None,
        }
    }

    /// Applies a transition, returning the next state.
    pub fn apply(self, transition: Transition) -> Result<EntryState, LifecycleError> {
        match (self, transition) {
            (EntryState::Display(_), Transition::Update(kind)) => Ok(EntryState::Display(kind)),
            (EntryState::Display(_), Transition::Dismiss) => Ok(EntryState::Dismissing),
            (EntryState::Dismissing, Transition::Remove) => Ok(EntryState::Removed),
            (from, transition) => Err(LifecycleError::InvalidTransition { from, transition }),
        }
    }
}

impl fmt::Display for EntryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryState::Display(kind) => write!(f, "{kind}"),
            EntryState::Dismissing => f.write_str("dismissing"),
            EntryState::Removed => f.write_str("removed"),
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::Update(kind) => write!(f, "update({kind})"),
            Transition::Dismiss => f.write_str("dismiss"),
            Transition::Remove => f.write_str("remove"),
        }
    }
}
