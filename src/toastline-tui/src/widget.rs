//! Toast layout and drawing.
//!
//! [`layout_toasts`] turns the nodes of a [`ToastLayer`](crate::ToastLayer)
//! into screen rectangles; [`ToastLayerWidget`] paints them cell by cell.

use std::str::FromStr;

use ratatui::prelude::*;
use ratatui::widgets::Widget;
use toastline_core::{Align, Border, BorderSide, BorderStyle, ContainerLayout, ToastNode, ToastStyle};

use crate::text::{display_width, truncate, wrap};

// ============================================================
// COLORS
// ============================================================

/// Parses a style color (`"#22c55e"`, `"red"`, `"10"`).
pub fn parse_color(value: &str) -> Option<Color> {
    Color::from_str(value.trim()).ok()
}

fn color_of(value: Option<&String>) -> Option<Color> {
    let value = value?;
    let color = parse_color(value);
    if color.is_none() {
        tracing::trace!(color = %value, "unparseable toast color");
    }
    color
}

/// Terminal colors of one toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Palette {
    background: Option<Color>,
    foreground: Option<Color>,
    muted: Option<Color>,
    border: Option<Color>,
    icon: Option<Color>,
}

impl Palette {
    fn from_style(style: &ToastStyle) -> Self {
        let foreground = color_of(style.foreground_color.as_ref());
        let border = color_of(style.border_color.as_ref());
        Self {
            background: color_of(style.background_color.as_ref()),
            foreground,
            muted: color_of(style.muted_color.as_ref()).or(foreground),
            border,
            icon: color_of(style.icon_color.as_ref()).or(border),
        }
    }

    fn base(&self) -> Style {
        let mut style = Style::default();
        if let Some(bg) = self.background {
            style = style.bg(bg);
        }
        style
    }

    fn with_fg(&self, fg: Option<Color>) -> Style {
        match fg {
            Some(fg) => self.base().fg(fg),
            None => self.base(),
        }
    }
}

// ============================================================
// BORDERS
// ============================================================

/// Border glyphs of one toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorderGlyphs {
    pub top_left: String,
    pub top_right: String,
    pub bottom_left: String,
    pub bottom_right: String,
    pub horizontal: String,
    pub vertical: String,
}

impl BorderGlyphs {
    fn from_set(set: [&str; 6]) -> Self {
        let [top_left, top_right, bottom_left, bottom_right, horizontal, vertical] = set;
        Self {
            top_left: top_left.into(),
            top_right: top_right.into(),
            bottom_left: bottom_left.into(),
            bottom_right: bottom_right.into(),
            horizontal: horizontal.into(),
            vertical: vertical.into(),
        }
    }

    /// Glyphs for a style; explicit border chars win over the line style.
    pub fn for_style(style: &ToastStyle) -> Self {
        if let Some(chars) = &style.custom_border_chars {
            return Self {
                top_left: chars.top_left.clone(),
                top_right: chars.top_right.clone(),
                bottom_left: chars.bottom_left.clone(),
                bottom_right: chars.bottom_right.clone(),
                horizontal: chars.horizontal.clone(),
                vertical: chars.vertical.clone(),
            };
        }
        match style.border_style.unwrap_or_default() {
            BorderStyle::Single => Self::from_set(["┌", "┐", "└", "┘", "─", "│"]),
            BorderStyle::Double => Self::from_set(["╔", "╗", "╚", "╝", "═", "║"]),
            BorderStyle::Rounded => Self::from_set(["╭", "╮", "╰", "╯", "─", "│"]),
            BorderStyle::Heavy => Self::from_set(["┏", "┓", "┗", "┛", "━", "┃"]),
        }
    }
}

/// Which border sides are drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sides {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl Sides {
    pub fn for_style(style: &ToastStyle) -> Self {
        match &style.border {
            None | Some(Border::Enabled(false)) => Self::default(),
            Some(Border::Enabled(true)) => Self {
                top: true,
                right: true,
                bottom: true,
                left: true,
            },
            Some(Border::Sides(sides)) => Self {
                top: sides.contains(&BorderSide::Top),
                right: sides.contains(&BorderSide::Right),
                bottom: sides.contains(&BorderSide::Bottom),
                left: sides.contains(&BorderSide::Left),
            },
        }
    }

    fn horizontal(&self) -> u16 {
        u16::from(self.left) + u16::from(self.right)
    }

    fn vertical(&self) -> u16 {
        u16::from(self.top) + u16::from(self.bottom)
    }
}

// ============================================================
// MEASURE
// ============================================================

fn header_width(node: &ToastNode) -> usize {
    let icon = node
        .icon
        .as_deref()
        .map(|icon| display_width(icon) + 1)
        .unwrap_or(0);
    let title = node.title.as_deref().map(display_width).unwrap_or(0);
    let close = node
        .close_icon
        .as_deref()
        .map(|close| display_width(close) + 1)
        .unwrap_or(0);
    icon + title + close
}

fn action_text(node: &ToastNode) -> Option<String> {
    node.action_label
        .as_deref()
        .map(|label| format!("[ {label} ]"))
}

/// Columns and rows used by borders and padding.
fn chrome(node: &ToastNode) -> (u16, u16) {
    let sides = Sides::for_style(&node.style);
    let pad = node.padding;
    (
        sides.horizontal() + pad.left + pad.right,
        sides.vertical() + pad.top + pad.bottom,
    )
}

/// Size of a toast given the widest it may get.
///
/// Width follows the content, clamped to `min_width` and `max_width`. Height
/// covers the header, the wrapped description and the action row, and is at
/// least `min_height`.
pub fn measure(node: &ToastNode, max_width: u16) -> (u16, u16) {
    let (chrome_x, chrome_y) = chrome(node);
    let cap = node
        .style
        .max_width
        .map_or(max_width, |w| w.min(max_width))
        .max(chrome_x + 1);

    let description = node.description.as_deref().unwrap_or("");
    let natural = [
        header_width(node),
        description.lines().map(display_width).max().unwrap_or(0),
        action_text(node).as_deref().map(display_width).unwrap_or(0),
    ]
    .into_iter()
    .max()
    .unwrap_or(0);

    let natural = u16::try_from(natural)
        .unwrap_or(u16::MAX)
        .saturating_add(chrome_x);
    let width = natural
        .max(node.style.min_width.unwrap_or(0))
        .clamp(chrome_x + 1, cap);

    let inner = usize::from(width - chrome_x);
    let body = 1 + wrap(description, inner).len() + usize::from(node.action_label.is_some());
    let height = u16::try_from(body)
        .unwrap_or(u16::MAX)
        .saturating_add(chrome_y)
        .max(node.style.min_height.unwrap_or(0));

    (width, height)
}

// ============================================================
// LAYOUT
// ============================================================

/// A toast and the rectangle it occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement<'a> {
    pub area: Rect,
    pub node: &'a ToastNode,
}

/// Places nodes inside `area`.
///
/// `nodes[0]` sits against the anchor edge; the rest stack away from it,
/// `gap` rows apart. Toasts that no longer fit are left out.
pub fn layout_toasts<'a>(
    layout: &ContainerLayout,
    nodes: &'a [ToastNode],
    area: Rect,
) -> Vec<Placement<'a>> {
    let anchor = layout.anchor;
    let left_edge = area.x.saturating_add(anchor.left.unwrap_or(0));
    let right_edge = area.right().saturating_sub(anchor.right.unwrap_or(0));
    let container_width = right_edge.saturating_sub(left_edge);
    let cap = if anchor.full_width {
        container_width
    } else {
        container_width.min(layout.max_width)
    };

    let mut placements = Vec::with_capacity(nodes.len());
    if cap == 0 {
        return placements;
    }

    // Top anchors track the next free row; bottom anchors the row after the
    // last free one.
    let mut cursor = match (anchor.top, anchor.bottom) {
        (Some(top), _) => area.y.saturating_add(top),
        (None, bottom) => area.bottom().saturating_sub(bottom.unwrap_or(0)),
    };
    let from_top = anchor.top.is_some();

    for node in nodes {
        let (width, height) = measure(node, cap);
        let x = match anchor.align {
            Align::Start => left_edge,
            Align::End => right_edge.saturating_sub(width),
            Align::Center => left_edge + container_width.saturating_sub(width) / 2,
        };

        let y = if from_top {
            if cursor.saturating_add(height) > area.bottom() {
                break;
            }
            let y = cursor;
            cursor = cursor.saturating_add(height).saturating_add(layout.gap);
            y
        } else {
            if cursor < area.y.saturating_add(height) {
                break;
            }
            let y = cursor - height;
            cursor = y.saturating_sub(layout.gap);
            y
        };

        placements.push(Placement {
            area: Rect::new(x, y, width, height),
            node,
        });
    }
    placements
}

// ============================================================
// WIDGET
// ============================================================

/// Draws every node of a layer at its laid-out position.
pub struct ToastLayerWidget<'a> {
    layout: ContainerLayout,
    nodes: &'a [ToastNode],
}

impl<'a> ToastLayerWidget<'a> {
    pub fn new(layout: ContainerLayout, nodes: &'a [ToastNode]) -> Self {
        Self { layout, nodes }
    }

    /// Renders a single toast inside `rect`.
    fn render_toast(&self, node: &ToastNode, rect: Rect, buf: &mut Buffer) {
        let palette = Palette::from_style(&node.style);
        let sides = Sides::for_style(&node.style);
        let glyphs = BorderGlyphs::for_style(&node.style);
        let border_style = palette.with_fg(palette.border);

        // Fill background
        let base = palette.base();
        for y in rect.top()..rect.bottom() {
            for x in rect.left()..rect.right() {
                if let Some(cell) = buf.cell_mut(Position::new(x, y)) {
                    cell.set_style(base);
                    cell.set_char(' ');
                }
            }
        }

        draw_border(buf, rect, sides, &glyphs, border_style);

        let pad = node.padding;
        let inner = Rect {
            x: rect.x + u16::from(sides.left) + pad.left,
            y: rect.y + u16::from(sides.top) + pad.top,
            width: rect.width.saturating_sub(sides.horizontal() + pad.left + pad.right),
            height: rect
                .height
                .saturating_sub(sides.vertical() + pad.top + pad.bottom),
        };
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        // Header: icon, title and the close glyph against the right edge
        let mut x = inner.x;
        let mut room = usize::from(inner.width);
        if let Some(close) = node.close_icon.as_deref() {
            let width = display_width(close);
            if width < room {
                let close_x = inner.right() - width as u16;
                buf.set_string(close_x, inner.y, close, palette.with_fg(palette.muted));
                room -= width + 1;
            }
        }
        if let Some(icon) = node.icon.as_deref() {
            let width = display_width(icon);
            if width < room {
                buf.set_string(x, inner.y, icon, palette.with_fg(palette.icon));
                x += width as u16 + 1;
                room -= width + 1;
            }
        }
        if let Some(title) = node.title.as_deref() {
            let title = truncate(title, room);
            let style = palette.with_fg(palette.foreground).add_modifier(Modifier::BOLD);
            buf.set_string(x, inner.y, &title, style);
        }

        // Body
        let mut y = inner.y + 1;
        let description = node.description.as_deref().unwrap_or("");
        for line in wrap(description, usize::from(inner.width)) {
            if y >= inner.bottom() {
                return;
            }
            buf.set_string(inner.x, y, &line, palette.with_fg(palette.muted));
            y += 1;
        }

        if let Some(action) = action_text(node)
            && y < inner.bottom()
        {
            let action = truncate(&action, usize::from(inner.width));
            let style = palette.with_fg(palette.foreground).add_modifier(Modifier::BOLD);
            buf.set_string(inner.x, y, &action, style);
        }
    }
}

fn draw_border(buf: &mut Buffer, rect: Rect, sides: Sides, glyphs: &BorderGlyphs, style: Style) {
    if rect.width == 0 || rect.height == 0 {
        return;
    }
    let (left, right) = (rect.left(), rect.right() - 1);
    let (top, bottom) = (rect.top(), rect.bottom() - 1);

    if sides.top {
        for x in left..=right {
            buf.set_string(x, top, &glyphs.horizontal, style);
        }
    }
    if sides.bottom {
        for x in left..=right {
            buf.set_string(x, bottom, &glyphs.horizontal, style);
        }
    }
    if sides.left {
        for y in top..=bottom {
            buf.set_string(left, y, &glyphs.vertical, style);
        }
    }
    if sides.right {
        for y in top..=bottom {
            buf.set_string(right, y, &glyphs.vertical, style);
        }
    }

    // Corners only where two sides meet
    let corners = [
        (sides.top && sides.left, left, top, &glyphs.top_left),
        (sides.top && sides.right, right, top, &glyphs.top_right),
        (sides.bottom && sides.left, left, bottom, &glyphs.bottom_left),
        (sides.bottom && sides.right, right, bottom, &glyphs.bottom_right),
    ];
    for (drawn, x, y, glyph) in corners {
        if drawn {
            buf.set_string(x, y, glyph, style);
        }
    }
}

impl Widget for ToastLayerWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.nodes.is_empty() {
            return;
        }
        let area = area.intersection(buf.area);
        for placement in layout_toasts(&self.layout, self.nodes, area) {
            if placement.area.intersection(area) != placement.area {
                continue;
            }
            self.render_toast(placement.node, placement.area, buf);
        }
    }
}

// ============================================================
// TESTS
// ============================================================
