//! Toaster anchor positions.

use serde::{Deserialize, Serialize};

use crate::config::ToasterOffset;

/// Default distance from the top edge, in rows.
pub const DEFAULT_OFFSET_TOP: u16 = 1;
/// Default distance from the right edge, in columns.
pub const DEFAULT_OFFSET_RIGHT: u16 = 2;
/// Default distance from the bottom edge, in rows.
pub const DEFAULT_OFFSET_BOTTOM: u16 = 1;
/// Default distance from the left edge, in columns.
pub const DEFAULT_OFFSET_LEFT: u16 = 2;

/// Where the toaster is anchored on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    TopLeft,
    TopCenter,
    TopRight,
    BottomLeft,
    BottomCenter,
    #[default]
    BottomRight,
}

/// Horizontal alignment of toasts inside the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Align {
    Start,
    Center,
    End,
}

/// Edge distances and alignment derived from a position and offsets.
///
/// Exactly one of `top`/`bottom` is set. For centered positions neither
/// `left` nor `right` is set and the container spans the full width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub top: Option<u16>,
    pub bottom: Option<u16>,
    pub left: Option<u16>,
    pub right: Option<u16>,
    pub align: Align,
    pub full_width: bool,
}

impl Position {
    pub fn is_top(self) -> bool {
        matches!(
            self,
            Position::TopLeft | Position::TopCenter | Position::TopRight
        )
    }

    pub fn is_centered(self) -> bool {
        matches!(self, Position::TopCenter | Position::BottomCenter)
    }

    /// Resolves the container anchor for this position.
    pub fn anchor(self, offset: &ToasterOffset) -> Anchor {
        let (top, bottom) = if self.is_top() {
            (Some(offset.top.unwrap_or(DEFAULT_OFFSET_TOP)), None)
        } else {
            (None, Some(offset.bottom.unwrap_or(DEFAULT_OFFSET_BOTTOM)))
        };

        let (left, right, align) = match self {
            Position::TopLeft | Position::BottomLeft => (
                Some(offset.left.unwrap_or(DEFAULT_OFFSET_LEFT)),
                None,
                Align::Start,
            ),
            Position::TopCenter | Position::BottomCenter => (None, None, Align::Center),
            Position::TopRight | Position::BottomRight => (
                None,
                Some(offset.right.unwrap_or(DEFAULT_OFFSET_RIGHT)),
                Align::End,
            ),
        };

        Anchor {
            top,
            bottom,
            left,
            right,
            align,
            full_width: self.is_centered(),
        }
    }
}
