//! Toaster configuration.
//!
//! All options are plain serde structs so a host application can keep them in
//! its own config file:
//!
//! ```toml
//! position = "top-right"
//! stackingMode = "stack"
//! visibleToasts = 5
//!
//! [toastOptions]
//! duration = 5000
//!
//! [toastOptions.style]
//! backgroundColor = "#1a1a1a"
//!
//! [toastOptions.success]
//! duration = 3000
//! style = { borderColor = "#22c55e" }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::icons::{IconOverrides, ToastIcons};
use crate::position::Position;
use crate::style::{ToastStyle, TOAST_WIDTH};
use crate::toast::ToastKind;

/// How multiple toasts share the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StackingMode {
    /// A new toast replaces whatever is shown
    #[default]
    Single,
    /// Up to `visible_toasts` toasts, oldest evicted first
    Stack,
}

/// Distance of the container from the screen edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToasterOffset {
    pub top: Option<u16>,
    pub right: Option<u16>,
    pub bottom: Option<u16>,
    pub left: Option<u16>,
}

/// Style and duration overrides for one toast kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeToastOptions {
    pub style: Option<ToastStyle>,
    pub duration: Option<u64>,
}

/// Toaster-level defaults for every toast, with per-kind overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastOptions {
    /// Base style applied to all toasts
    pub style: Option<ToastStyle>,
    /// Default duration for all toasts (ms)
    pub duration: Option<u64>,
    pub default: Option<TypeToastOptions>,
    pub success: Option<TypeToastOptions>,
    pub error: Option<TypeToastOptions>,
    pub warning: Option<TypeToastOptions>,
    pub info: Option<TypeToastOptions>,
    pub loading: Option<TypeToastOptions>,
}

impl ToastOptions {
    /// Per-kind overrides, if configured.
    pub fn for_kind(&self, kind: ToastKind) -> Option<&TypeToastOptions> {
        match kind {
            ToastKind::Default => self.default.as_ref(),
            ToastKind::Success => self.success.as_ref(),
            ToastKind::Error => self.error.as_ref(),
            ToastKind::Warning => self.warning.as_ref(),
            ToastKind::Info => self.info.as_ref(),
            ToastKind::Loading => self.loading.as_ref(),
        }
    }

    /// Mutable per-kind overrides, created on demand.
    pub fn for_kind_mut(&mut self, kind: ToastKind) -> &mut TypeToastOptions {
        let slot = match kind {
            ToastKind::Default => &mut self.default,
            ToastKind::Success => &mut self.success,
            ToastKind::Error => &mut self.error,
            ToastKind::Warning => &mut self.warning,
            ToastKind::Info => &mut self.info,
            ToastKind::Loading => &mut self.loading,
        };
        slot.get_or_insert_with(TypeToastOptions::default)
    }
}

/// Icon configuration: `false` disables icons, `true` keeps the defaults, a
/// table overrides individual glyphs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IconsOption {
    Enabled(bool),
    Custom(IconOverrides),
}

impl Default for IconsOption {
    fn default() -> Self {
        IconsOption::Enabled(true)
    }
}

impl IconsOption {
    /// The icon set to use, or `None` when icons are disabled.
    pub fn resolve(&self) -> Option<ToastIcons> {
        match self {
            IconsOption::Enabled(false) => None,
            IconsOption::Enabled(true) => Some(ToastIcons::default()),
            IconsOption::Custom(overrides) => Some(ToastIcons::default().with_overrides(overrides)),
        }
    }
}

/// Options of a toaster (the container).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToasterOptions {
    /// Anchor position
    pub position: Position,
    /// Gap between toasts in rows
    pub gap: u16,
    /// Maximum mounted toasts in stack mode
    pub visible_toasts: usize,
    /// Show a close button on dismissible toasts
    pub close_button: bool,
    pub offset: ToasterOffset,
    pub icons: IconsOption,
    pub stacking_mode: StackingMode,
    /// Maximum toast width in columns
    pub max_width: u16,
    pub toast_options: ToastOptions,
}

impl Default for ToasterOptions {
    fn default() -> Self {
        Self {
            position: Position::default(),
            gap: 1,
            visible_toasts: 3,
            close_button: false,
            offset: ToasterOffset::default(),
            icons: IconsOption::default(),
            stacking_mode: StackingMode::default(),
            max_width: TOAST_WIDTH,
            toast_options: ToastOptions::default(),
        }
    }
}

impl ToasterOptions {
    /// Parses options from a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn with_stacking(mut self, mode: StackingMode) -> Self {
        self.stacking_mode = mode;
        self
    }

    pub fn with_visible_toasts(mut self, count: usize) -> Self {
        self.visible_toasts = count;
        self
    }

    pub fn with_close_button(mut self, show: bool) -> Self {
        self.close_button = show;
        self
    }

    pub fn with_icons(mut self, icons: IconsOption) -> Self {
        self.icons = icons;
        self
    }

    pub fn with_toast_options(mut self, toast_options: ToastOptions) -> Self {
        self.toast_options = toast_options;
        self
    }
}
