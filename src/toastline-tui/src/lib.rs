//! # Toastline TUI
//!
//! Ratatui rendering host for `toastline-core`.
//!
//! - [`ToastLayer`] implements [`ToastHost`](toastline_core::ToastHost) and
//!   keeps the mounted nodes in visual order.
//! - [`ToastLayerWidget`] lays the nodes out against the container anchor
//!   and draws borders, icons, titles, descriptions and actions.
//! - [`ToastLayer::hit_test`] maps mouse positions back to toast ids.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::rc::Rc;
//! use toastline_core::{ToastStore, Toaster, ToasterOptions};
//! use toastline_tui::ToastLayer;
//!
//! let store = ToastStore::new();
//! let layer = ToastLayer::shared();
//! let toaster = Toaster::new(&store, ToasterOptions::default(), Rc::clone(&layer));
//!
//! terminal.draw(|frame| {
//!     frame.render_widget(layer.borrow().widget(), frame.area());
//! })?;
//! ```

pub mod layer;
pub mod text;
pub mod widget;

pub use layer::ToastLayer;
pub use widget::{
    BorderGlyphs, Placement, Sides, ToastLayerWidget, layout_toasts, measure, parse_color,
};
