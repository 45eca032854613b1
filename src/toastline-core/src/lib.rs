//! # Toastline Core
//!
//! Toast notification engine for terminal applications.
//!
//! Producers push transient notifications into a [`ToastStore`]; a
//! [`Toaster`] mirrors them into visual nodes through a [`ToastHost`],
//! applying the stacking policy, auto-dismiss timers and loading spinners.
//!
//! ## Core Components
//!
//! - **Store**: canonical set of entries plus synchronous publish/subscribe.
//! - **Lifecycle**: per-entry state machine (display, dismissing, removed).
//! - **Promise binding**: loading toast settled by a future.
//! - **Toaster**: stacking, eviction, timers and spinner animation.
//! - **Style**: cascading style and duration resolution.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  push/update/dismiss  ┌──────────────┐
//! │  Producers   │ ────────────────────▶ │  ToastStore  │
//! └──────────────┘                       └──────┬───────┘
//!                                               │ ToastEvent (sync)
//!                                        ┌──────▼───────┐   timers, spinners
//!                                        │   Toaster    │ ◀──── LocalSet
//!                                        └──────┬───────┘
//!                                               │ mount/patch/unmount
//!                                        ┌──────▼───────┐
//!                                        │  ToastHost   │
//!                                        └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::rc::Rc;
//! use toastline_core::{MemoryHost, PromiseToast, ToastStore, Toaster, ToasterOptions};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let local = tokio::task::LocalSet::new();
//!     local
//!         .run_until(async {
//!             let store = ToastStore::new();
//!             let host = MemoryHost::shared();
//!             let _toaster = Toaster::new(&store, ToasterOptions::default(), Rc::clone(&host));
//!
//!             store.success("Session saved");
//!             store.promise(
//!                 async { Ok::<_, String>(42) },
//!                 PromiseToast::new().loading("Computing...").success("Done"),
//!             );
//!         })
//!         .await;
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod host;
pub mod icons;
pub mod id;
pub mod lifecycle;
pub mod position;
pub mod promise;
pub mod spinner;
pub mod store;
pub mod style;
pub mod theme;
pub mod toast;
pub mod toaster;

// Re-export commonly used types for convenience
pub use config::{
    IconsOption, StackingMode, ToastOptions, ToasterOffset, ToasterOptions, TypeToastOptions,
};
pub use error::{LifecycleError, Result, ToastError};
pub use host::{ContainerLayout, HostOp, MemoryHost, ToastHost, ToastNode};
pub use icons::{IconOverrides, LoadingIcon, SpinnerConfig, ToastIcons};
pub use id::ToastId;
pub use lifecycle::{EntryState, Transition};
pub use position::{Align, Anchor, Position};
pub use promise::{
    GENERIC_ERROR_MESSAGE, PromiseResult, PromiseState, PromiseTask, PromiseToast, Resolver,
};
pub use spinner::SpinnerState;
pub use store::{DismissSignal, Subscription, ToastEvent, ToastStore, WeakToastStore};
pub use style::{
    Border, BorderChars, BorderSide, BorderStyle, DEFAULT_DURATION_MS, ResolvedPadding,
    TOAST_WIDTH, ToastStyle, compute_toast_duration, compute_toast_style, merge_styles, resolve_padding,
};
pub use theme::ToasterTheme;
pub use toast::{Action, Toast, ToastCallback, ToastKind, ToastParams};
pub use toaster::Toaster;

/// Toastline Core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
