//! The toast container.
//!
//! A [`Toaster`] subscribes to a [`ToastStore`] and mirrors its entries onto a
//! [`ToastHost`]. It owns the stacking policy, the auto-dismiss timers and the
//! loading spinners.
//!
//! ## Usage
//!
//! ```ignore
//! let local = tokio::task::LocalSet::new();
//! local.run_until(async {
//!     let store = ToastStore::new();
//!     let host = MemoryHost::shared();
//!     let toaster = Toaster::new(
//!         &store,
//!         ToasterOptions::default().with_stacking(StackingMode::Stack),
//!         Rc::clone(&host),
//!     );
//!
//!     store.success("Session saved");
//! }).await;
//! ```
//!
//! Timers and spinners are spawned with [`tokio::task::spawn_local`], so a
//! toaster that shows toasts with a finite duration or an animated loading
//! icon must live inside a `LocalSet`.

use std::cell::RefCell;
use std::future::Future;
use std::rc::{Rc, Weak};
use std::time::Duration;

use indexmap::IndexMap;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::config::{StackingMode, ToasterOptions};
use crate::host::{ContainerLayout, ToastHost, ToastNode};
use crate::icons::ToastIcons;
use crate::id::ToastId;
use crate::spinner::SpinnerState;
use crate::store::{Subscription, ToastEvent, ToastStore, WeakToastStore};
use crate::style::{compute_toast_duration, compute_toast_style, resolve_padding};
use crate::toast::{Toast, ToastCallback, ToastKind};

/// Close glyph used when icons are disabled.
const FALLBACK_CLOSE_ICON: &str = "x";

// ============================================================
// TASK GUARD
// ============================================================

/// Aborts a local task when dropped.
struct TaskGuard(Option<JoinHandle<()>>);

impl TaskGuard {
    fn spawn(future: impl Future<Output = ()> + 'static) -> Self {
        Self(Some(tokio::task::spawn_local(future)))
    }

    /// Lets the task run to completion.
    fn detach(mut self) {
        self.0.take();
    }
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        if let Some(handle) = self.0.take() {
            handle.abort();
        }
    }
}

// ============================================================
// MOUNTED NODES
// ============================================================

struct Spinner {
    state: SpinnerState,
    _task: TaskGuard,
}

struct Mounted {
    toast: Toast,
    node: ToastNode,
    duration_ms: u64,
    timer: Option<TaskGuard>,
    spinner: Option<Spinner>,
    /// Set when the auto-dismiss timer fired
    expired: bool,
}

/// Work done after the container state is released.
enum Effect {
    Callback(ToastCallback, Toast),
    Dismiss(ToastId),
    CompleteRemoval(ToastId),
}

struct ToasterState {
    options: ToasterOptions,
    icons: Option<ToastIcons>,
    host: Box<dyn ToastHost>,
    /// Mount order, oldest first
    mounted: IndexMap<ToastId, Mounted>,
    store: WeakToastStore,
    this: Weak<RefCell<ToasterState>>,
}

impl ToasterState {
    fn on_event(&mut self, event: &ToastEvent) -> Vec<Effect> {
        match event {
            ToastEvent::Push(toast) if self.mounted.contains_key(&toast.id) => {
                self.patch(toast.clone());
                Vec::new()
            }
            ToastEvent::Push(toast) => self.mount(toast.clone()),
            ToastEvent::Dismiss(signal) => self.on_dismissed(&signal.id),
        }
    }

    // --------------------------------------------------------
    // Mounting
    // --------------------------------------------------------

    fn mount(&mut self, toast: Toast) -> Vec<Effect> {
        let mut effects = Vec::new();

        let evict = match self.options.stacking_mode {
            StackingMode::Single => self.mounted.len(),
            StackingMode::Stack => {
                let limit = self.options.visible_toasts.max(1);
                (self.mounted.len() + 1).saturating_sub(limit)
            }
        };
        for _ in 0..evict {
            let Some((id, mounted)) = self.mounted.shift_remove_index(0) else {
                break;
            };
            tracing::debug!(id = %id, "evicting toast");
            self.host.unmount(&id);
            effects.push(Effect::Dismiss(id));
            if let Some(callback) = mounted.toast.on_dismiss.clone() {
                effects.push(Effect::Callback(callback, mounted.toast));
            }
        }

        let duration_ms = self.duration_of(&toast);
        let spinner = self.start_spinner(&toast);
        let node = self.build_node(&toast, spinner.as_ref().map(|s| &s.state), duration_ms);
        let index = if self.options.position.is_top() {
            self.mounted.len()
        } else {
            0
        };

        self.host.mount(index, &node);
        tracing::debug!(id = %toast.id, index, duration_ms, "toast mounted");

        let timer = self.schedule_expiry(&toast.id, duration_ms);
        self.mounted.insert(
            toast.id.clone(),
            Mounted {
                toast,
                node,
                duration_ms,
                timer,
                spinner,
                expired: false,
            },
        );
        self.host.request_render();
        effects
    }

    fn patch(&mut self, toast: Toast) {
        let duration_ms = self.duration_of(&toast);
        let wants_spinner = self.spinner_state_for(&toast).is_some();

        let needs_spinner = match self.mounted.get_mut(&toast.id) {
            Some(mounted) => {
                if !wants_spinner {
                    mounted.spinner = None;
                }
                wants_spinner && mounted.spinner.is_none()
            }
            None => return,
        };
        let new_spinner = if needs_spinner {
            self.start_spinner(&toast)
        } else {
            None
        };
        let reschedule = self
            .mounted
            .get(&toast.id)
            .is_some_and(|mounted| mounted.duration_ms != duration_ms);
        let new_timer = if reschedule {
            self.schedule_expiry(&toast.id, duration_ms)
        } else {
            None
        };

        let Some(mounted) = self.mounted.get_mut(&toast.id) else {
            return;
        };
        if new_spinner.is_some() {
            mounted.spinner = new_spinner;
        }
        if reschedule {
            tracing::debug!(id = %toast.id, duration_ms, "rescheduling auto-dismiss");
            mounted.timer = new_timer;
            mounted.duration_ms = duration_ms;
        }
        mounted.toast = toast;

        let spinner = mounted.spinner.as_ref().map(|s| &s.state);
        mounted.node = build_node(
            &self.options,
            self.icons.as_ref(),
            &mounted.toast,
            spinner,
            duration_ms,
        );
        self.host.patch(&mounted.node);
        self.host.request_render();
    }

    // --------------------------------------------------------
    // Removal
    // --------------------------------------------------------

    fn on_dismissed(&mut self, id: &ToastId) -> Vec<Effect> {
        let mut effects = vec![Effect::CompleteRemoval(id.clone())];
        if let Some(mounted) = self.detach(id) {
            let callback = if mounted.expired {
                mounted.toast.on_auto_close.clone()
            } else {
                mounted.toast.on_dismiss.clone()
            };
            if let Some(callback) = callback {
                effects.push(Effect::Callback(callback, mounted.toast));
            }
            self.host.request_render();
        }
        effects
    }

    /// Unmounts a node and stops its tasks.
    fn detach(&mut self, id: &ToastId) -> Option<Mounted> {
        let mounted = self.mounted.shift_remove(id)?;
        self.host.unmount(id);
        tracing::debug!(id = %id, "toast unmounted");
        Some(mounted)
    }

    // --------------------------------------------------------
    // Timers
    // --------------------------------------------------------

    fn schedule_expiry(&self, id: &ToastId, duration_ms: u64) -> Option<TaskGuard> {
        if duration_ms == 0 {
            return None;
        }
        let toaster = self.this.clone();
        let id = id.clone();
        Some(TaskGuard::spawn(async move {
            tokio::time::sleep(Duration::from_millis(duration_ms)).await;
            if let Some(state) = toaster.upgrade() {
                expire(&state, &id);
            }
        }))
    }

    fn spinner_state_for(&self, toast: &Toast) -> Option<SpinnerState> {
        if toast.kind != ToastKind::Loading || toast.icon.is_some() {
            return None;
        }
        self.icons
            .as_ref()
            .and_then(|icons| SpinnerState::for_icon(&icons.loading))
    }

    fn start_spinner(&self, toast: &Toast) -> Option<Spinner> {
        let state = self.spinner_state_for(toast)?;
        let period = state.interval();
        let toaster = self.this.clone();
        let id = toast.id.clone();

        let task = TaskGuard::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let Some(state) = toaster.upgrade() else {
                    break;
                };
                let Ok(mut state) = state.try_borrow_mut() else {
                    continue;
                };
                if !state.advance_spinner(&id) {
                    break;
                }
            }
        });

        Some(Spinner { state, _task: task })
    }

    fn advance_spinner(&mut self, id: &ToastId) -> bool {
        let Some(mounted) = self.mounted.get_mut(id) else {
            return false;
        };
        let Some(spinner) = mounted.spinner.as_mut() else {
            return false;
        };
        let frame = spinner.state.advance().to_string();
        mounted.node.icon = Some(frame);
        self.host.patch(&mounted.node);
        self.host.request_render();
        true
    }

    // --------------------------------------------------------
    // Resolution
    // --------------------------------------------------------

    fn duration_of(&self, toast: &Toast) -> u64 {
        compute_toast_duration(toast.kind, Some(&self.options.toast_options), toast.duration)
    }

    fn build_node(
        &self,
        toast: &Toast,
        spinner: Option<&SpinnerState>,
        duration_ms: u64,
    ) -> ToastNode {
        build_node(&self.options, self.icons.as_ref(), toast, spinner, duration_ms)
    }

    fn visual_ids(&self) -> Vec<ToastId> {
        let ids = self.mounted.keys().cloned();
        if self.options.position.is_top() {
            ids.collect()
        } else {
            ids.rev().collect()
        }
    }
}

fn build_node(
    options: &ToasterOptions,
    icons: Option<&ToastIcons>,
    toast: &Toast,
    spinner: Option<&SpinnerState>,
    duration_ms: u64,
) -> ToastNode {
    let mut style =
        compute_toast_style(toast.kind, Some(&options.toast_options), toast.style.as_ref());
    style.max_width = Some(
        style
            .max_width
            .map_or(options.max_width, |width| width.min(options.max_width)),
    );
    let padding = resolve_padding(&style);

    let icon = match (&toast.icon, spinner) {
        (Some(icon), _) => Some(icon.clone()),
        (None, Some(spinner)) => Some(spinner.frame().to_string()),
        (None, None) => icons
            .and_then(|icons| icons.icon_for(toast.kind))
            .map(str::to_string),
    };

    let show_close = toast.dismissible && toast.close_button.unwrap_or(options.close_button);
    let close_icon = show_close.then(|| {
        icons
            .map(|icons| icons.close.clone())
            .unwrap_or_else(|| FALLBACK_CLOSE_ICON.to_string())
    });

    ToastNode {
        id: toast.id.clone(),
        kind: toast.kind,
        title: toast.title.clone(),
        description: toast.description.clone(),
        icon,
        close_icon,
        action_label: toast.action.as_ref().map(|action| action.label.clone()),
        style,
        padding,
        duration_ms,
    }
}

// ============================================================
// DISPATCH
// ============================================================

fn handle_event(state: &Rc<RefCell<ToasterState>>, event: &ToastEvent) {
    let (effects, store) = {
        let Ok(mut state) = state.try_borrow_mut() else {
            tracing::warn!(id = %event.id(), "toaster busy, dropping event");
            return;
        };
        (state.on_event(event), state.store.clone())
    };
    apply_effects(&store, effects);
}

fn apply_effects(store: &WeakToastStore, effects: Vec<Effect>) {
    if effects.is_empty() {
        return;
    }
    let store = store.upgrade();
    for effect in effects {
        match effect {
            Effect::Callback(callback, toast) => callback(&toast),
            Effect::Dismiss(id) => {
                if let Some(store) = &store {
                    store.dismiss(&id);
                }
            }
            Effect::CompleteRemoval(id) => {
                if let Some(store) = &store {
                    store.complete_removal(&id);
                }
            }
        }
    }
}

/// Timer expiry: same path as an explicit dismiss.
fn expire(state: &Rc<RefCell<ToasterState>>, id: &ToastId) {
    let store = {
        let Ok(mut state) = state.try_borrow_mut() else {
            tracing::warn!(id = %id, "toaster busy, skipping expiry");
            return;
        };
        let Some(mounted) = state.mounted.get_mut(id) else {
            return;
        };
        mounted.expired = true;
        if let Some(timer) = mounted.timer.take() {
            timer.detach();
        }
        tracing::debug!(id = %id, "toast expired");
        state.store.upgrade()
    };

    dismiss_or_detach(state, store.as_ref(), id);
}

/// Dismisses through the store, or detaches locally when the store no longer
/// tracks the toast.
fn dismiss_or_detach(
    state: &Rc<RefCell<ToasterState>>,
    store: Option<&ToastStore>,
    id: &ToastId,
) {
    if let Some(store) = store.filter(|store| store.is_active(id)) {
        store.dismiss(id);
        return;
    }
    let effects = match state.try_borrow_mut() {
        Ok(mut state) => state.on_dismissed(id),
        Err(_) => return,
    };
    let store = store.map(ToastStore::downgrade).unwrap_or_default();
    apply_effects(&store, effects);
}

// ============================================================
// TOASTER
// ============================================================

/// Mirrors a store onto a host.
///
/// Dropping the toaster unsubscribes and unmounts every node.
pub struct Toaster {
    state: Rc<RefCell<ToasterState>>,
    store: WeakToastStore,
    subscription: Option<Subscription>,
}

impl Toaster {
    /// Attaches a new container to `store`.
    ///
    /// Entries already active in the store are mounted right away, oldest
    /// first, under the configured stacking policy.
    pub fn new(
        store: &ToastStore,
        options: ToasterOptions,
        host: impl ToastHost + 'static,
    ) -> Self {
        let icons = options.icons.resolve();
        let mut host: Box<dyn ToastHost> = Box::new(host);
        host.attach(&ContainerLayout::from_options(&options));

        let state = Rc::new_cyclic(|this| {
            RefCell::new(ToasterState {
                options,
                icons,
                host,
                mounted: IndexMap::new(),
                store: store.downgrade(),
                this: this.clone(),
            })
        });

        let listener = Rc::downgrade(&state);
        let subscription = store.subscribe(move |event| {
            if let Some(state) = listener.upgrade() {
                handle_event(&state, event);
            }
        });

        for toast in store.toasts() {
            handle_event(&state, &ToastEvent::Push(toast));
        }

        tracing::debug!("toaster attached");
        Self {
            state,
            store: store.downgrade(),
            subscription: Some(subscription),
        }
    }

    /// Close button: dismisses the toast unless it is not dismissible.
    pub fn close(&self, id: &ToastId) -> bool {
        let dismissible = self
            .state
            .borrow()
            .mounted
            .get(id)
            .is_some_and(|mounted| mounted.toast.dismissible);
        if dismissible {
            self.dismiss_mounted(id);
        }
        dismissible
    }

    /// Runs the toast's action, then dismisses it.
    pub fn trigger_action(&self, id: &ToastId) -> bool {
        let action = self
            .state
            .borrow()
            .mounted
            .get(id)
            .and_then(|mounted| mounted.toast.action.clone());
        let Some(action) = action else {
            return false;
        };
        action.invoke();
        self.dismiss_mounted(id);
        true
    }

    /// The host destroyed a node on its own.
    pub fn node_destroyed(&self, id: &ToastId) {
        let effects = {
            let mut state = self.state.borrow_mut();
            let Some(mounted) = state.mounted.shift_remove(id) else {
                return;
            };
            tracing::debug!(id = %id, "node destroyed by host");
            let mut effects = vec![Effect::Dismiss(id.clone())];
            if let Some(callback) = mounted.toast.on_dismiss.clone() {
                effects.push(Effect::Callback(callback, mounted.toast));
            }
            state.host.request_render();
            effects
        };
        apply_effects(&self.store, effects);
    }

    /// Dismisses every mounted toast.
    pub fn dismiss_all(&self) {
        let ids: Vec<ToastId> = self.state.borrow().mounted.keys().cloned().collect();
        for id in ids {
            self.dismiss_mounted(&id);
        }
    }

    pub fn toast_count(&self) -> usize {
        self.state.borrow().mounted.len()
    }

    pub fn is_mounted(&self, id: &ToastId) -> bool {
        self.state.borrow().mounted.contains_key(id)
    }

    /// Mounted ids in visual order, closest to the anchor edge first.
    pub fn mounted_ids(&self) -> Vec<ToastId> {
        self.state.borrow().visual_ids()
    }

    /// The resolved node of a mounted toast.
    pub fn node(&self, id: &ToastId) -> Option<ToastNode> {
        self.state.borrow().mounted.get(id).map(|mounted| mounted.node.clone())
    }

    /// Current spinner frame index of a mounted loading toast.
    pub fn spinner_frame(&self, id: &ToastId) -> Option<usize> {
        self.state
            .borrow()
            .mounted
            .get(id)
            .and_then(|mounted| mounted.spinner.as_ref())
            .map(|spinner| spinner.state.current_index())
    }

    pub fn options(&self) -> ToasterOptions {
        self.state.borrow().options.clone()
    }

    /// Unsubscribes, stops every task and unmounts every node.
    pub fn destroy(&mut self) {
        let Some(subscription) = self.subscription.take() else {
            return;
        };
        subscription.unsubscribe();

        let Ok(mut state) = self.state.try_borrow_mut() else {
            tracing::warn!("toaster destroyed while busy");
            return;
        };
        let ids: Vec<ToastId> = state.mounted.keys().cloned().collect();
        for id in ids {
            state.detach(&id);
        }
        state.host.request_render();
        tracing::debug!("toaster destroyed");
    }

    fn dismiss_mounted(&self, id: &ToastId) {
        let store = self.store.upgrade();
        dismiss_or_detach(&self.state, store.as_ref(), id);
    }
}

impl Drop for Toaster {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl std::fmt::Debug for Toaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Toaster")
            .field("mounted", &self.mounted_ids())
            .finish_non_exhaustive()
    }
}
