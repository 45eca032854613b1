//! Toast styling: the style record, the five-layer cascade, padding
//! resolution and duration resolution.
//!
//! Style layers, lowest priority first:
//!
//! 1. built-in base style
//! 2. built-in style for the toast's kind
//! 3. `toast_options.style` from the toaster
//! 4. `toast_options.<kind>.style` from the toaster
//! 5. the entry's inline style
//!
//! Merging is field by field: a later layer only replaces the fields it sets.

use serde::{Deserialize, Serialize};

use crate::config::ToastOptions;
use crate::toast::ToastKind;

/// Default auto-dismiss delay in milliseconds.
pub const DEFAULT_DURATION_MS: u64 = 4000;

/// Default toast width in terminal columns.
pub const TOAST_WIDTH: u16 = 60;

// ============================================================
// BORDER TYPES
// ============================================================

/// Which sides carry a border.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Border {
    /// `true` for all sides, `false` for none
    Enabled(bool),
    /// Only the listed sides
    Sides(Vec<BorderSide>),
}

/// A single border side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderSide {
    Top,
    Right,
    Bottom,
    Left,
}

/// Line style used to draw borders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    #[default]
    Single,
    Double,
    Rounded,
    Heavy,
}

/// Explicit border glyphs; overrides [`BorderStyle`] when set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorderChars {
    pub top_left: String,
    pub top_right: String,
    pub bottom_left: String,
    pub bottom_right: String,
    pub horizontal: String,
    pub vertical: String,
}

// ============================================================
// TOAST STYLE
// ============================================================

/// Terminal styling for a toast. Unset fields inherit from lower layers.
///
/// Colors are kept as strings (`"#22c55e"`, `"red"`) and interpreted by the
/// rendering host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToastStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<Border>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_style: Option<BorderStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_border_chars: Option<BorderChars>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_height: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_width: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_x: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_y: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_top: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_right: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_bottom: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_left: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muted_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_color: Option<String>,
}

/// Copies every `Some` field of `$over` into `$base`.
macro_rules! overlay_fields {
    ($base:ident, $over:ident, $($field:ident),+ $(,)?) => {
        $(
            if $over.$field.is_some() {
                $base.$field = $over.$field.clone();
            }
        )+
    };
}

impl ToastStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlays `other` on top of `self`, field by field.
    pub fn overlay(&mut self, other: &ToastStyle) {
        overlay_fields!(
            self,
            other,
            border,
            border_color,
            border_style,
            custom_border_chars,
            min_height,
            max_width,
            min_width,
            padding,
            padding_x,
            padding_y,
            padding_top,
            padding_right,
            padding_bottom,
            padding_left,
            background_color,
            foreground_color,
            muted_color,
            icon_color,
        );
    }

    /// Returns true if any border side is drawn.
    pub fn has_border(&self) -> bool {
        match &self.border {
            None | Some(Border::Enabled(false)) => false,
            Some(Border::Enabled(true)) => true,
            Some(Border::Sides(sides)) => !sides.is_empty(),
        }
    }

    pub fn border(mut self, enabled: bool) -> Self {
        self.border = Some(Border::Enabled(enabled));
        self
    }

    pub fn border_sides(mut self, sides: impl IntoIterator<Item = BorderSide>) -> Self {
        self.border = Some(Border::Sides(sides.into_iter().collect()));
        self
    }

    pub fn border_color(mut self, color: impl Into<String>) -> Self {
        self.border_color = Some(color.into());
        self
    }

    pub fn border_style(mut self, style: BorderStyle) -> Self {
        self.border_style = Some(style);
        self
    }

    pub fn padding(mut self, padding: u16) -> Self {
        self.padding = Some(padding);
        self
    }

    pub fn padding_x(mut self, padding: u16) -> Self {
        self.padding_x = Some(padding);
        self
    }

    pub fn padding_y(mut self, padding: u16) -> Self {
        self.padding_y = Some(padding);
        self
    }

    pub fn padding_left(mut self, padding: u16) -> Self {
        self.padding_left = Some(padding);
        self
    }

    pub fn padding_right(mut self, padding: u16) -> Self {
        self.padding_right = Some(padding);
        self
    }

    pub fn padding_top(mut self, padding: u16) -> Self {
        self.padding_top = Some(padding);
        self
    }

    pub fn padding_bottom(mut self, padding: u16) -> Self {
        self.padding_bottom = Some(padding);
        self
    }

    pub fn min_height(mut self, rows: u16) -> Self {
        self.min_height = Some(rows);
        self
    }

    pub fn min_width(mut self, cols: u16) -> Self {
        self.min_width = Some(cols);
        self
    }

    pub fn max_width(mut self, cols: u16) -> Self {
        self.max_width = Some(cols);
        self
    }

    pub fn background(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn foreground(mut self, color: impl Into<String>) -> Self {
        self.foreground_color = Some(color.into());
        self
    }

    pub fn muted(mut self, color: impl Into<String>) -> Self {
        self.muted_color = Some(color.into());
        self
    }

    pub fn icon_color(mut self, color: impl Into<String>) -> Self {
        self.icon_color = Some(color.into());
        self
    }
}

// ============================================================
// BUILT-IN DEFAULTS
// ============================================================

/// Built-in base style shared by every kind.
pub fn builtin_base_style() -> ToastStyle {
    ToastStyle::new()
        .border(true)
        .border_style(BorderStyle::Single)
        .border_color("#525252")
        .background("#171717")
        .foreground("#fafafa")
        .muted("#a3a3a3")
        .min_height(3)
}

/// Built-in style for one kind (accent border color).
pub fn builtin_kind_style(kind: ToastKind) -> ToastStyle {
    let accent = match kind {
        ToastKind::Default => "#525252",
        ToastKind::Success => "#22c55e",
        ToastKind::Error => "#ef4444",
        ToastKind::Warning => "#eab308",
        ToastKind::Info => "#3b82f6",
        ToastKind::Loading => "#a3a3a3",
    };
    ToastStyle::new().border_color(accent)
}

/// Built-in duration for one kind. Loading toasts never auto-dismiss.
pub fn builtin_duration(kind: ToastKind) -> u64 {
    match kind {
        ToastKind::Loading => 0,
        _ => DEFAULT_DURATION_MS,
    }
}

// ============================================================
// CASCADE
// ============================================================

/// Merges style layers in order; later layers win field by field.
pub fn merge_styles<'a>(layers: impl IntoIterator<Item = Option<&'a ToastStyle>>) -> ToastStyle {
    let mut merged = ToastStyle::default();
    for layer in layers.into_iter().flatten() {
        merged.overlay(layer);
    }
    merged
}

/// Computes the final style of a toast from all five layers.
///
/// A merged `border` of `false` clears any inherited border color and style.
pub fn compute_toast_style(
    kind: ToastKind,
    options: Option<&ToastOptions>,
    inline: Option<&ToastStyle>,
) -> ToastStyle {
    let base = builtin_base_style();
    let kind_style = builtin_kind_style(kind);
    let user_base = options.and_then(|o| o.style.as_ref());
    let user_kind = options
        .and_then(|o| o.for_kind(kind))
        .and_then(|t| t.style.as_ref());

    let mut style = merge_styles([Some(&base), Some(&kind_style), user_base, user_kind, inline]);

    if style.border == Some(Border::Enabled(false)) {
        style.border_color = None;
        style.border_style = None;
    }
    style
}

/// Computes the display duration of a toast in milliseconds (`0` = never).
///
/// Priority: entry → toaster per-kind → toaster global → built-in. The
/// toaster's global duration is not applied to loading toasts, which stay
/// until settled unless a per-entry or per-kind duration says otherwise.
pub fn compute_toast_duration(
    kind: ToastKind,
    options: Option<&ToastOptions>,
    entry: Option<u64>,
) -> u64 {
    if let Some(ms) = entry {
        return ms;
    }
    if let Some(ms) = options
        .and_then(|o| o.for_kind(kind))
        .and_then(|t| t.duration)
    {
        return ms;
    }
    if kind != ToastKind::Loading {
        if let Some(ms) = options.and_then(|o| o.duration) {
            return ms;
        }
    }
    builtin_duration(kind)
}

// ============================================================
// PADDING
// ============================================================

/// Concrete padding for all four sides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ResolvedPadding {
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
    pub left: u16,
}

/// Resolves padding shorthands: side > axis > uniform > 0.
pub fn resolve_padding(style: &ToastStyle) -> ResolvedPadding {
    let uniform = style.padding.unwrap_or(0);
    let x = style.padding_x.unwrap_or(uniform);
    let y = style.padding_y.unwrap_or(uniform);

    ResolvedPadding {
        top: style.padding_top.unwrap_or(y),
        right: style.padding_right.unwrap_or(x),
        bottom: style.padding_bottom.unwrap_or(y),
        left: style.padding_left.unwrap_or(x),
    }
}
