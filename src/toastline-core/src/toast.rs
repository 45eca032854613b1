//! Toast entries and the producer-facing options bag.

use std::fmt;
use std::rc::Rc;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::id::ToastId;
use crate::style::ToastStyle;

// ============================================================
// TOAST KIND
// ============================================================

/// The type of a toast notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    /// Plain message without an icon
    #[default]
    Default,
    /// Success notification - positive outcome
    Success,
    /// Error notification - failure or problem
    Error,
    /// Warning notification - potential issue
    Warning,
    /// Info notification - informational message
    Info,
    /// In-flight operation, usually bound to a promise
    Loading,
}

impl ToastKind {
    /// Every kind, in declaration order.
    pub const ALL: [ToastKind; 6] = [
        ToastKind::Default,
        ToastKind::Success,
        ToastKind::Error,
        ToastKind::Warning,
        ToastKind::Info,
        ToastKind::Loading,
    ];

    /// Returns the lowercase name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastKind::Default => "default",
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Warning => "warning",
            ToastKind::Info => "info",
            ToastKind::Loading => "loading",
        }
    }
}

impl fmt::Display for ToastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================
// CALLBACKS
// ============================================================

/// Callback receiving the toast it belongs to.
pub type ToastCallback = Rc<dyn Fn(&Toast)>;

/// Action button attached to a toast.
#[derive(Clone)]
pub struct Action {
    /// Button label
    pub label: String,
    on_click: Rc<dyn Fn()>,
}

impl Action {
    /// Creates an action with a label and a click handler.
    pub fn new(label: impl Into<String>, on_click: impl Fn() + 'static) -> Self {
        Self {
            label: label.into(),
            on_click: Rc::new(on_click),
        }
    }

    /// Runs the click handler.
    pub fn invoke(&self) {
        (self.on_click)();
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action").field("label", &self.label).finish()
    }
}

// ============================================================
// TOAST
// ============================================================

/// A single toast entry as held by the store.
#[derive(Clone)]
pub struct Toast {
    /// Unique identifier among active toasts
    pub id: ToastId,
    /// Current type
    pub kind: ToastKind,
    /// Main line
    pub title: Option<String>,
    /// Secondary, muted line
    pub description: Option<String>,
    /// Per-entry duration in ms (`Some(0)` never auto-dismisses, `None` cascades)
    pub duration: Option<u64>,
    /// Whether the user may close it
    pub dismissible: bool,
    /// Icon override
    pub icon: Option<String>,
    /// Close button override
    pub close_button: Option<bool>,
    /// Inline style override (highest cascade priority)
    pub style: Option<ToastStyle>,
    /// Optional action button
    pub action: Option<Action>,
    /// Called when the toast is dismissed (explicitly, by the user or by eviction)
    pub on_dismiss: Option<ToastCallback>,
    /// Called when the auto-dismiss timer removes the toast
    pub on_auto_close: Option<ToastCallback>,
    /// When the entry was created
    pub created_at: Instant,
    /// When the entry was last pushed or updated
    pub updated_at: Instant,
}

impl Toast {
    /// Creates an entry of the given kind with every field taken from `params`.
    pub fn new(id: ToastId, kind: ToastKind, params: ToastParams) -> Self {
        let now = Instant::now();
        let mut toast = Self {
            id,
            kind,
            title: None,
            description: None,
            duration: None,
            dismissible: true,
            icon: None,
            close_button: None,
            style: None,
            action: None,
            on_dismiss: None,
            on_auto_close: None,
            created_at: now,
            updated_at: now,
        };
        toast.apply(params);
        toast
    }

    /// Overwrites every field that is set in `params`; unset fields are kept.
    pub fn apply(&mut self, params: ToastParams) {
        let ToastParams {
            id: _,
            kind,
            title,
            description,
            duration,
            dismissible,
            icon,
            close_button,
            style,
            action,
            on_dismiss,
            on_auto_close,
        } = params;

        if let Some(kind) = kind {
            self.kind = kind;
        }
        if title.is_some() {
            self.title = title;
        }
        if description.is_some() {
            self.description = description;
        }
        if duration.is_some() {
            self.duration = duration;
        }
        if let Some(dismissible) = dismissible {
            self.dismissible = dismissible;
        }
        if icon.is_some() {
            self.icon = icon;
        }
        if close_button.is_some() {
            self.close_button = close_button;
        }
        if style.is_some() {
            self.style = style;
        }
        if action.is_some() {
            self.action = action;
        }
        if on_dismiss.is_some() {
            self.on_dismiss = on_dismiss;
        }
        if on_auto_close.is_some() {
            self.on_auto_close = on_auto_close;
        }
        self.updated_at = Instant::now();
    }
}

impl fmt::Debug for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toast")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("title", &self.title)
            .field("description", &self.description)
            .field("duration", &self.duration)
            .field("dismissible", &self.dismissible)
            .field("action", &self.action)
            .finish_non_exhaustive()
    }
}

// ============================================================
// TOAST PARAMS
// ============================================================

/// Options for creating or updating a toast. Every field is optional.
///
/// ```ignore
/// store.success_with(
///     "Uploaded",
///     ToastParams::new().id("upload").description("3 files").duration(2000),
/// );
/// ```
#[derive(Clone, Default)]
pub struct ToastParams {
    pub id: Option<ToastId>,
    pub kind: Option<ToastKind>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration: Option<u64>,
    pub dismissible: Option<bool>,
    pub icon: Option<String>,
    pub close_button: Option<bool>,
    pub style: Option<ToastStyle>,
    pub action: Option<Action>,
    pub on_dismiss: Option<ToastCallback>,
    pub on_auto_close: Option<ToastCallback>,
}

impl ToastParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<ToastId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn kind(mut self, kind: ToastKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the display duration in milliseconds.
    pub fn duration(mut self, ms: u64) -> Self {
        self.duration = Some(ms);
        self
    }

    /// Never auto-dismiss.
    pub fn persistent(mut self) -> Self {
        self.duration = Some(0);
        self
    }

    pub fn dismissible(mut self, dismissible: bool) -> Self {
        self.dismissible = Some(dismissible);
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn close_button(mut self, show: bool) -> Self {
        self.close_button = Some(show);
        self
    }

    pub fn style(mut self, style: ToastStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn action(mut self, label: impl Into<String>, on_click: impl Fn() + 'static) -> Self {
        self.action = Some(Action::new(label, on_click));
        self
    }

    pub fn on_dismiss(mut self, callback: impl Fn(&Toast) + 'static) -> Self {
        self.on_dismiss = Some(Rc::new(callback));
        self
    }

    pub fn on_auto_close(mut self, callback: impl Fn(&Toast) + 'static) -> Self {
        self.on_auto_close = Some(Rc::new(callback));
        self
    }
}

impl fmt::Debug for ToastParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastParams")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("title", &self.title)
            .field("description", &self.description)
            .field("duration", &self.duration)
            .finish_non_exhaustive()
    }
}
