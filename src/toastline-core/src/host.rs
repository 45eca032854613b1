//! The rendering boundary.
//!
//! A [`Toaster`](crate::Toaster) never draws anything itself. It resolves each
//! toast into a [`ToastNode`] and asks a [`ToastHost`] to mount, patch or
//! unmount it. Hosts report nodes they destroyed on their own through
//! [`Toaster::node_destroyed`](crate::Toaster::node_destroyed).

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::ToasterOptions;
use crate::id::ToastId;
use crate::position::{Anchor, Position};
use crate::style::{ResolvedPadding, ToastStyle};
use crate::toast::ToastKind;

/// Fully resolved view of one mounted toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastNode {
    pub id: ToastId,
    pub kind: ToastKind,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Icon glyph, or the current spinner frame for animated loading toasts
    pub icon: Option<String>,
    /// Close glyph when a close button is shown
    pub close_icon: Option<String>,
    pub action_label: Option<String>,
    /// Cascaded style
    pub style: ToastStyle,
    pub padding: ResolvedPadding,
    /// Effective duration in ms, `0` for never
    pub duration_ms: u64,
}

/// Container geometry, handed to the host when a toaster attaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerLayout {
    pub position: Position,
    pub anchor: Anchor,
    /// Rows between toasts
    pub gap: u16,
    pub max_width: u16,
}

impl ContainerLayout {
    pub fn from_options(options: &ToasterOptions) -> Self {
        Self {
            position: options.position,
            anchor: options.position.anchor(&options.offset),
            gap: options.gap,
            max_width: options.max_width,
        }
    }
}

impl Default for ContainerLayout {
    fn default() -> Self {
        Self::from_options(&ToasterOptions::default())
    }
}

/// Receives visual node operations from a toaster.
///
/// `index` in [`mount`](Self::mount) is the visual position, `0` being the
/// toast closest to the anchor edge.
pub trait ToastHost {
    fn attach(&mut self, _layout: &ContainerLayout) {}

    fn mount(&mut self, index: usize, node: &ToastNode);

    fn patch(&mut self, node: &ToastNode);

    fn unmount(&mut self, id: &ToastId);

    /// Called once after every batch of node operations.
    fn request_render(&mut self) {}
}

impl<H: ToastHost + ?Sized> ToastHost for Box<H> {
    fn attach(&mut self, layout: &ContainerLayout) {
        (**self).attach(layout);
    }

    fn mount(&mut self, index: usize, node: &ToastNode) {
        (**self).mount(index, node);
    }

    fn patch(&mut self, node: &ToastNode) {
        (**self).patch(node);
    }

    fn unmount(&mut self, id: &ToastId) {
        (**self).unmount(id);
    }

    fn request_render(&mut self) {
        (**self).request_render();
    }
}

/// Shared hosts let the application keep reading nodes while a toaster
/// drives them.
impl<H: ToastHost + ?Sized> ToastHost for Rc<RefCell<H>> {
    fn attach(&mut self, layout: &ContainerLayout) {
        self.borrow_mut().attach(layout);
    }

    fn mount(&mut self, index: usize, node: &ToastNode) {
        self.borrow_mut().mount(index, node);
    }

    fn patch(&mut self, node: &ToastNode) {
        self.borrow_mut().patch(node);
    }

    fn unmount(&mut self, id: &ToastId) {
        self.borrow_mut().unmount(id);
    }

    fn request_render(&mut self) {
        self.borrow_mut().request_render();
    }
}

/// A node operation recorded by [`MemoryHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostOp {
    Mount { id: ToastId, index: usize },
    Patch(ToastId),
    Unmount(ToastId),
}

/// Host keeping nodes in memory, in visual order.
///
/// Useful headless and in tests.
#[derive(Debug, Default)]
pub struct MemoryHost {
    layout: Option<ContainerLayout>,
    nodes: Vec<ToastNode>,
    ops: Vec<HostOp>,
    renders: usize,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a new host for sharing with a toaster.
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn layout(&self) -> Option<&ContainerLayout> {
        self.layout.as_ref()
    }

    pub fn nodes(&self) -> &[ToastNode] {
        &self.nodes
    }

    /// Ids in visual order.
    pub fn ids(&self) -> Vec<ToastId> {
        self.nodes.iter().map(|node| node.id.clone()).collect()
    }

    pub fn node(&self, id: &ToastId) -> Option<&ToastNode> {
        self.nodes.iter().find(|node| &node.id == id)
    }

    pub fn ops(&self) -> &[HostOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<HostOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn render_requests(&self) -> usize {
        self.renders
    }
}

impl ToastHost for MemoryHost {
    fn attach(&mut self, layout: &ContainerLayout) {
        self.layout = Some(*layout);
    }

    fn mount(&mut self, index: usize, node: &ToastNode) {
        let index = index.min(self.nodes.len());
        self.nodes.insert(index, node.clone());
        self.ops.push(HostOp::Mount {
            id: node.id.clone(),
            index,
        });
    }

    fn patch(&mut self, node: &ToastNode) {
        if let Some(slot) = self.nodes.iter_mut().find(|n| n.id == node.id) {
            *slot = node.clone();
        }
        self.ops.push(HostOp::Patch(node.id.clone()));
    }

    fn unmount(&mut self, id: &ToastId) {
        self.nodes.retain(|node| &node.id != id);
        self.ops.push(HostOp::Unmount(id.clone()));
    }

    fn request_render(&mut self) {
        self.renders += 1;
    }
}
