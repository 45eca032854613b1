//! A [`ToastHost`] that keeps nodes for ratatui rendering.

use std::cell::RefCell;
use std::rc::Rc;

use ratatui::layout::{Position, Rect};
use toastline_core::{ContainerLayout, ToastHost, ToastId, ToastNode};

use crate::widget::{Placement, ToastLayerWidget, layout_toasts};

/// Toast nodes in visual order plus the container layout.
///
/// Hand it to a [`Toaster`](toastline_core::Toaster) wrapped in
/// `Rc<RefCell<_>>` and draw it every frame with [`ToastLayer::widget`].
#[derive(Debug, Default)]
pub struct ToastLayer {
    layout: Option<ContainerLayout>,
    nodes: Vec<ToastNode>,
    dirty: bool,
}

impl ToastLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn nodes(&self) -> &[ToastNode] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The attached container layout, or the default one.
    pub fn layout(&self) -> ContainerLayout {
        self.layout.unwrap_or_default()
    }

    /// Returns whether nodes changed since the last call, and resets it.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn widget(&self) -> ToastLayerWidget<'_> {
        ToastLayerWidget::new(self.layout(), &self.nodes)
    }

    pub fn placements(&self, area: Rect) -> Vec<Placement<'_>> {
        layout_toasts(&self.layout(), &self.nodes, area)
    }

    /// The toast under a terminal cell, if any.
    pub fn hit_test(&self, area: Rect, column: u16, row: u16) -> Option<ToastId> {
        let cell = Position::new(column, row);
        self.placements(area)
            .into_iter()
            .find(|placement| placement.area.contains(cell))
            .map(|placement| placement.node.id.clone())
    }
}

impl ToastHost for ToastLayer {
    fn attach(&mut self, layout: &ContainerLayout) {
        self.layout = Some(*layout);
        self.dirty = true;
    }

    fn mount(&mut self, index: usize, node: &ToastNode) {
        let index = index.min(self.nodes.len());
        self.nodes.insert(index, node.clone());
    }

    fn patch(&mut self, node: &ToastNode) {
        match self.nodes.iter_mut().find(|n| n.id == node.id) {
            Some(slot) => *slot = node.clone(),
            None => tracing::debug!(id = %node.id, "patch for unknown node"),
        }
    }

    fn unmount(&mut self, id: &ToastId) {
        self.nodes.retain(|node| &node.id != id);
    }

    fn request_render(&mut self) {
        self.dirty = true;
    }
}
