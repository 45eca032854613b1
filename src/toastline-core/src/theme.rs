//! Optional theme presets for the toaster.
//!
//! A theme is a ready-made [`ToasterOptions`]; customize it with the usual
//! builder methods:
//!
//! ```ignore
//! let options = theme::minimal().options.with_position(Position::TopCenter);
//! ```

use crate::config::{IconsOption, StackingMode, ToastOptions, ToasterOptions, TypeToastOptions};
use crate::icons::IconOverrides;
use crate::icons::ToastIcons;
use crate::position::Position;
use crate::style::{BorderStyle, ToastStyle};
use crate::toast::ToastKind;

/// A named toaster configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToasterTheme {
    pub name: &'static str,
    pub description: &'static str,
    pub options: ToasterOptions,
}

fn kind_style(options: &mut ToastOptions, kind: ToastKind, style: ToastStyle) {
    *options.for_kind_mut(kind) = TypeToastOptions {
        style: Some(style),
        duration: None,
    };
}

fn icons_option(icons: ToastIcons) -> IconsOption {
    IconsOption::Custom(IconOverrides {
        success: Some(icons.success),
        error: Some(icons.error),
        warning: Some(icons.warning),
        info: Some(icons.info),
        loading: Some(icons.loading),
        close: Some(icons.close),
    })
}

/// Clean and unobtrusive, no borders.
pub fn minimal() -> ToasterTheme {
    let mut toast_options = ToastOptions {
        style: Some(
            ToastStyle::new()
                .border(false)
                .background("#262626")
                .foreground("#e5e5e5")
                .muted("#737373")
                .padding_x(2)
                .padding_y(1),
        ),
        ..ToastOptions::default()
    };
    kind_style(&mut toast_options, ToastKind::Success, ToastStyle::new().foreground("#4ade80"));
    kind_style(&mut toast_options, ToastKind::Error, ToastStyle::new().foreground("#f87171"));
    kind_style(&mut toast_options, ToastKind::Warning, ToastStyle::new().foreground("#fbbf24"));
    kind_style(&mut toast_options, ToastKind::Info, ToastStyle::new().foreground("#60a5fa"));

    ToasterTheme {
        name: "Minimal",
        description: "Clean and unobtrusive, no borders",
        options: ToasterOptions::default()
            .with_position(Position::BottomRight)
            .with_stacking(StackingMode::Single)
            .with_icons(icons_option(ToastIcons::minimal()))
            .with_toast_options(toast_options),
    }
}

/// Grayscale only, no colors.
pub fn monochrome() -> ToasterTheme {
    let mut toast_options = ToastOptions {
        style: Some(
            ToastStyle::new()
                .border(true)
                .border_style(BorderStyle::Single)
                .border_color("#525252")
                .background("#171717")
                .foreground("#fafafa")
                .muted("#a3a3a3")
                .padding_x(1)
                .padding_y(0)
                .min_height(3),
        ),
        ..ToastOptions::default()
    };
    for (kind, border) in [
        (ToastKind::Default, "#525252"),
        (ToastKind::Success, "#a3a3a3"),
        (ToastKind::Error, "#fafafa"),
        (ToastKind::Warning, "#d4d4d4"),
        (ToastKind::Info, "#737373"),
        (ToastKind::Loading, "#525252"),
    ] {
        kind_style(&mut toast_options, kind, ToastStyle::new().border_color(border));
    }

    ToasterTheme {
        name: "Monochrome",
        description: "Grayscale only, no colors",
        options: ToasterOptions::default()
            .with_position(Position::BottomRight)
            .with_stacking(StackingMode::Single)
            .with_icons(IconsOption::Enabled(true))
            .with_toast_options(toast_options),
    }
}

/// All built-in themes.
pub fn themes() -> Vec<ToasterTheme> {
    vec![minimal(), monochrome()]
}

/// Looks up a theme by case-insensitive name.
pub fn by_name(name: &str) -> Option<ToasterTheme> {
    themes()
        .into_iter()
        .find(|theme| theme.name.eq_ignore_ascii_case(name))
}
