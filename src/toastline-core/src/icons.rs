//! Icon sets for toast kinds, including the animated loading spinner.

use serde::{Deserialize, Serialize};

use crate::toast::ToastKind;

/// Fallback glyph when a spinner has no frames.
const SPINNER_FALLBACK: &str = "\u{25CC}";

/// Animated icon: frames cycled at a fixed interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinnerConfig {
    /// Frames to cycle through
    pub frames: Vec<String>,
    /// Interval between frames in milliseconds
    pub interval: u64,
}

impl SpinnerConfig {
    pub fn new<I, S>(frames: I, interval: u64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            frames: frames.into_iter().map(Into::into).collect(),
            interval,
        }
    }

    /// Circular spinner used by default: ◜ ◠ ◝ ◞ ◡ ◟
    pub fn circle() -> Self {
        Self::new(["◜", "◠", "◝", "◞", "◡", "◟"], 100)
    }

    /// Braille dot pattern: ⠋ ⠙ ⠹ ⠸ ⠼ ⠴ ⠦ ⠧ ⠇ ⠏
    pub fn dots() -> Self {
        Self::new(["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"], 80)
    }

    /// Simple line pattern: - \ | /
    pub fn line() -> Self {
        Self::new(["-", "\\", "|", "/"], 100)
    }

    /// First frame, or a dotted circle if there are none.
    pub fn first_frame(&self) -> &str {
        self.frames.first().map_or(SPINNER_FALLBACK, String::as_str)
    }
}

/// Loading icon: either static text or an animated spinner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LoadingIcon {
    Static(String),
    Spinner(SpinnerConfig),
}

impl LoadingIcon {
    /// The glyph to show before any animation tick.
    pub fn initial(&self) -> &str {
        match self {
            LoadingIcon::Static(icon) => icon.as_str(),
            LoadingIcon::Spinner(spinner) => spinner.first_frame(),
        }
    }

    /// The spinner config if this icon is animated.
    pub fn spinner(&self) -> Option<&SpinnerConfig> {
        match self {
            LoadingIcon::Spinner(spinner) if !spinner.frames.is_empty() => Some(spinner),
            _ => None,
        }
    }
}

/// A complete icon set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToastIcons {
    pub success: String,
    pub error: String,
    pub warning: String,
    pub info: String,
    pub loading: LoadingIcon,
    pub close: String,
}

/// Partial icon set; unset icons keep the base set's glyph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconOverrides {
    pub success: Option<String>,
    pub error: Option<String>,
    pub warning: Option<String>,
    pub info: Option<String>,
    pub loading: Option<LoadingIcon>,
    pub close: Option<String>,
}

impl ToastIcons {
    /// Unicode icons that work in most modern terminals.
    pub fn unicode() -> Self {
        Self {
            success: "\u{2713}".into(),
            error: "\u{2717}".into(),
            warning: "!".into(),
            info: "\u{2139}".into(),
            loading: LoadingIcon::Spinner(SpinnerConfig::circle()),
            close: "\u{00D7}".into(),
        }
    }

    /// ASCII-only icons for limited terminals.
    pub fn ascii() -> Self {
        Self {
            success: "[/]".into(),
            error: "[x]".into(),
            warning: "[!]".into(),
            info: "[i]".into(),
            loading: LoadingIcon::Static("...".into()),
            close: "x".into(),
        }
    }

    /// Single-character icons, paired with the minimal theme.
    pub fn minimal() -> Self {
        Self {
            success: "*".into(),
            error: "!".into(),
            warning: "!".into(),
            info: "i".into(),
            loading: LoadingIcon::Static("~".into()),
            close: "x".into(),
        }
    }

    /// Emoji icons. Rendering varies across terminals.
    pub fn emoji() -> Self {
        Self {
            success: "\u{2705}".into(),
            error: "\u{274C}".into(),
            warning: "\u{26A0}\u{FE0F}".into(),
            info: "\u{2139}\u{FE0F}".into(),
            loading: LoadingIcon::Static("\u{23F3}".into()),
            close: "\u{2716}\u{FE0F}".into(),
        }
    }

    /// Returns a copy with the overrides applied.
    pub fn with_overrides(mut self, overrides: &IconOverrides) -> Self {
        if let Some(icon) = &overrides.success {
            self.success = icon.clone();
        }
        if let Some(icon) = &overrides.error {
            self.error = icon.clone();
        }
        if let Some(icon) = &overrides.warning {
            self.warning = icon.clone();
        }
        if let Some(icon) = &overrides.info {
            self.info = icon.clone();
        }
        if let Some(icon) = &overrides.loading {
            self.loading = icon.clone();
        }
        if let Some(icon) = &overrides.close {
            self.close = icon.clone();
        }
        self
    }

    /// Icon for a kind; `None` for [`ToastKind::Default`].
    pub fn icon_for(&self, kind: ToastKind) -> Option<&str> {
        match kind {
            ToastKind::Default => None,
            ToastKind::Success => Some(self.success.as_str()),
            ToastKind::Error => Some(self.error.as_str()),
            ToastKind::Warning => Some(self.warning.as_str()),
            ToastKind::Info => Some(self.info.as_str()),
            ToastKind::Loading => Some(self.loading.initial()),
        }
    }
}

impl Default for ToastIcons {
    fn default() -> Self {
        Self::unicode()
    }
}
