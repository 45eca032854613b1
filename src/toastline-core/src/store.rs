//! The toast store.
//!
//! Owns the canonical set of entries and delivers every change to its
//! subscribers synchronously, in registration order, before the producer call
//! returns. The store is an explicit context object: create one with
//! [`ToastStore::new`], hand clones to producers and to the toaster.
//!
//! ```ignore
//! let store = ToastStore::new();
//! let _toaster = Toaster::new(&store, ToasterOptions::default(), host);
//!
//! let id = store.loading("Uploading...");
//! store.update(&id, ToastParams::new().kind(ToastKind::Success).title("Uploaded"));
//! ```
//!
//! Listeners may call back into the store; the subscriber list is snapshotted
//! before each delivery, so nested events are delivered depth-first.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use indexmap::IndexMap;

use crate::error::ToastError;
use crate::id::ToastId;
use crate::lifecycle::{EntryState, Transition};
use crate::toast::{Toast, ToastKind, ToastParams};

// ============================================================
// EVENTS
// ============================================================

/// Removal intent for one toast. Not a toast itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DismissSignal {
    pub id: ToastId,
    pub dismiss: bool,
}

impl DismissSignal {
    pub fn new(id: ToastId) -> Self {
        Self { id, dismiss: true }
    }
}

/// What subscribers receive.
#[derive(Debug, Clone)]
pub enum ToastEvent {
    /// A toast was created or updated in place
    Push(Toast),
    /// A toast entered the dismissing phase
    Dismiss(DismissSignal),
}

impl ToastEvent {
    /// The id the event refers to.
    pub fn id(&self) -> &ToastId {
        match self {
            ToastEvent::Push(toast) => &toast.id,
            ToastEvent::Dismiss(signal) => &signal.id,
        }
    }
}

// ============================================================
// STORE STATE
// ============================================================

struct Record {
    toast: Toast,
    state: EntryState,
    /// Bumped every time a record is created for an id, never on update
    generation: u64,
}

#[derive(Default)]
struct Entries {
    records: IndexMap<ToastId, Record>,
    next_id: u64,
    next_generation: u64,
}

impl Entries {
    fn fresh_id(&mut self) -> ToastId {
        loop {
            self.next_id += 1;
            let id = ToastId::Num(self.next_id);
            if !self.records.contains_key(&id) {
                return id;
            }
        }
    }

    fn bump_generation(&mut self) -> u64 {
        self.next_generation += 1;
        self.next_generation
    }

    fn active(&self, id: &ToastId) -> Option<&Record> {
        self.records.get(id).filter(|record| record.state.is_active())
    }
}

type Listener = Rc<dyn Fn(&ToastEvent)>;
type ErrorHandler = Rc<dyn Fn(&ToastError)>;

#[derive(Default)]
struct Listeners {
    next_key: u64,
    entries: Vec<(u64, Listener)>,
}

#[derive(Default)]
struct StoreInner {
    entries: RefCell<Entries>,
    listeners: RefCell<Listeners>,
    error_handler: RefCell<Option<ErrorHandler>>,
}

// ============================================================
// TOAST STORE
// ============================================================

/// Handle to a toast store. Cloning is cheap and yields the same store.
#[derive(Clone, Default)]
pub struct ToastStore {
    inner: Rc<StoreInner>,
}

/// Non-owning handle, used by long-lived tasks and subscribers.
#[derive(Clone, Default)]
pub struct WeakToastStore {
    inner: Weak<StoreInner>,
}

impl WeakToastStore {
    pub fn upgrade(&self) -> Option<ToastStore> {
        self.inner.upgrade().map(|inner| ToastStore { inner })
    }
}

macro_rules! kind_shortcuts {
    ($($name:ident, $with:ident => $kind:ident;)+) => {
        $(
            #[doc = concat!("Pushes a `", stringify!($name), "` toast with a title.")]
            pub fn $name(&self, title: impl Into<String>) -> ToastId {
                self.push(ToastKind::$kind, ToastParams::new().title(title))
            }

            #[doc = concat!("Pushes a `", stringify!($name), "` toast with a title and options.")]
            pub fn $with(&self, title: impl Into<String>, params: ToastParams) -> ToastId {
                self.push(ToastKind::$kind, params.title(title))
            }
        )+
    };
}

impl ToastStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn downgrade(&self) -> WeakToastStore {
        WeakToastStore {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Returns true if both handles point at the same store.
    pub fn ptr_eq(&self, other: &ToastStore) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    // --------------------------------------------------------
    // Producers
    // --------------------------------------------------------

    /// Creates a toast, or updates the active toast with the same id in place.
    ///
    /// A fresh numeric id is generated when `params.id` is unset. Every field
    /// set in `params` overwrites the existing entry; unset fields are kept.
    pub fn push(&self, kind: ToastKind, params: ToastParams) -> ToastId {
        let (id, toast) = {
            let mut entries = self.inner.entries.borrow_mut();
            let id = match params.id.clone() {
                Some(id) => id,
                None => entries.fresh_id(),
            };

            let toast = match entries.records.get_mut(&id) {
                Some(record) if record.state.is_active() => {
                    record.state = EntryState::Display(kind);
                    record.toast.apply(params.kind(kind));
                    tracing::debug!(id = %id, kind = %kind, "toast updated in place");
                    record.toast.clone()
                }
                _ => {
                    let generation = entries.bump_generation();
                    let toast = Toast::new(id.clone(), kind, params.kind(kind));
                    // A lingering dismissing record is replaced, not revived.
                    entries.records.shift_remove(&id);
                    entries.records.insert(
                        id.clone(),
                        Record {
                            toast: toast.clone(),
                            state: EntryState::Display(kind),
                            generation,
                        },
                    );
                    tracing::debug!(id = %id, kind = %kind, "toast created");
                    toast
                }
            };
            (id, toast)
        };

        self.notify(&ToastEvent::Push(toast));
        id
    }

    kind_shortcuts! {
        message, message_with => Default;
        success, success_with => Success;
        error, error_with => Error;
        warning, warning_with => Warning;
        info, info_with => Info;
        loading, loading_with => Loading;
    }

    /// Rewrites kind and fields of an active toast.
    ///
    /// Returns false (and does nothing) for unknown, dismissing or removed ids.
    pub fn update(&self, id: &ToastId, params: ToastParams) -> bool {
        let toast = {
            let mut entries = self.inner.entries.borrow_mut();
            let Some(record) = entries.records.get_mut(id) else {
                tracing::debug!(id = %id, "ignoring update for unknown toast");
                return false;
            };
            let kind = params.kind.unwrap_or(record.toast.kind);
            match record.state.apply(Transition::Update(kind)) {
                Ok(next) => record.state = next,
                Err(err) => {
                    tracing::debug!(id = %id, %err, "ignoring update");
                    return false;
                }
            }
            record.toast.apply(params);
            record.toast.clone()
        };

        self.notify(&ToastEvent::Push(toast));
        true
    }

    /// Starts removal of an active toast and notifies subscribers.
    ///
    /// Unknown or already dismissed ids are ignored.
    pub fn dismiss(&self, id: &ToastId) {
        let dismissed = {
            let mut entries = self.inner.entries.borrow_mut();
            match entries.records.get_mut(id) {
                Some(record) => match record.state.apply(Transition::Dismiss) {
                    Ok(next) => {
                        record.state = next;
                        true
                    }
                    Err(err) => {
                        tracing::debug!(id = %id, %err, "ignoring dismiss");
                        false
                    }
                },
                None => {
                    tracing::debug!(id = %id, "ignoring dismiss for unknown toast");
                    false
                }
            }
        };
        if !dismissed {
            return;
        }

        self.notify(&ToastEvent::Dismiss(DismissSignal::new(id.clone())));

        // Nobody is mounting toasts, so nobody will finish the removal.
        if self.subscriber_count() == 0 {
            self.complete_removal(id);
        }
    }

    /// Dismisses every active toast, oldest first.
    pub fn dismiss_all(&self) {
        let ids: Vec<ToastId> = self
            .inner
            .entries
            .borrow()
            .records
            .iter()
            .filter(|(_, record)| record.state.is_active())
            .map(|(id, _)| id.clone())
            .collect();
        for id in ids {
            self.dismiss(&id);
        }
    }

    /// Finishes the removal of a dismissing toast. Idempotent.
    pub fn complete_removal(&self, id: &ToastId) -> bool {
        let mut entries = self.inner.entries.borrow_mut();
        let removable = entries
            .records
            .get(id)
            .is_some_and(|record| record.state.apply(Transition::Remove).is_ok());
        if removable {
            entries.records.shift_remove(id);
            tracing::debug!(id = %id, "toast removed");
        }
        removable
    }

    // --------------------------------------------------------
    // Promise settlement
    // --------------------------------------------------------

    /// Generation of the record currently stored under `id`.
    pub(crate) fn generation_of(&self, id: &ToastId) -> Option<u64> {
        self.inner
            .entries
            .borrow()
            .records
            .get(id)
            .map(|record| record.generation)
    }

    /// True if `id` is active and still the record created at `generation`.
    pub(crate) fn is_current(&self, id: &ToastId, generation: u64) -> bool {
        self.inner
            .entries
            .borrow()
            .active(id)
            .is_some_and(|record| record.generation == generation)
    }

    /// Moves a promise toast to its final kind, unless it was dismissed or
    /// replaced since the promise started. The per-entry duration is reset to
    /// whatever `params` carries so the final kind's cascaded duration applies.
    pub(crate) fn settle(
        &self,
        id: &ToastId,
        generation: u64,
        kind: ToastKind,
        params: ToastParams,
    ) -> bool {
        let toast = {
            let mut entries = self.inner.entries.borrow_mut();
            let Some(record) = entries.records.get_mut(id) else {
                tracing::debug!(id = %id, "promise settled after toast was removed");
                return false;
            };
            if record.generation != generation || !record.state.is_active() {
                tracing::debug!(id = %id, "promise settled after toast was dismissed");
                return false;
            }
            let duration = params.duration;
            record.state = EntryState::Display(kind);
            record.toast.apply(params.kind(kind));
            record.toast.duration = duration;
            record.toast.clone()
        };

        self.notify(&ToastEvent::Push(toast));
        true
    }

    // --------------------------------------------------------
    // Queries
    // --------------------------------------------------------

    /// Snapshot of every active toast, oldest first.
    pub fn toasts(&self) -> Vec<Toast> {
        self.inner
            .entries
            .borrow()
            .records
            .values()
            .filter(|record| record.state.is_active())
            .map(|record| record.toast.clone())
            .collect()
    }

    /// The active toast with this id.
    pub fn get(&self, id: &ToastId) -> Option<Toast> {
        self.inner
            .entries
            .borrow()
            .active(id)
            .map(|record| record.toast.clone())
    }

    /// Lifecycle state of the id; `None` once removed or if never seen.
    pub fn state(&self, id: &ToastId) -> Option<EntryState> {
        self.inner
            .entries
            .borrow()
            .records
            .get(id)
            .map(|record| record.state)
    }

    pub fn is_active(&self, id: &ToastId) -> bool {
        self.inner.entries.borrow().active(id).is_some()
    }

    /// Number of active toasts.
    pub fn active_count(&self) -> usize {
        self.inner
            .entries
            .borrow()
            .records
            .values()
            .filter(|record| record.state.is_active())
            .count()
    }

    // --------------------------------------------------------
    // Subscribers
    // --------------------------------------------------------

    /// Registers a listener for every push and dismiss.
    ///
    /// The listener stays registered until the returned [`Subscription`] is
    /// dropped or unsubscribed.
    pub fn subscribe(&self, listener: impl Fn(&ToastEvent) + 'static) -> Subscription {
        let mut listeners = self.inner.listeners.borrow_mut();
        listeners.next_key += 1;
        let key = listeners.next_key;
        listeners.entries.push((key, Rc::new(listener)));

        Subscription {
            store: Rc::downgrade(&self.inner),
            key,
            active: Cell::new(true),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.listeners.borrow().entries.len()
    }

    fn notify(&self, event: &ToastEvent) {
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .entries
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in listeners {
            listener(event);
        }
    }

    // --------------------------------------------------------
    // Host error channel
    // --------------------------------------------------------

    /// Installs the host error handler. Engine failures are always logged;
    /// the handler additionally receives each one.
    pub fn set_error_handler(&self, handler: impl Fn(&ToastError) + 'static) {
        *self.inner.error_handler.borrow_mut() = Some(Rc::new(handler));
    }

    pub(crate) fn report(&self, error: ToastError) {
        tracing::error!(%error, "toast engine failure");
        let handler = self.inner.error_handler.borrow().clone();
        if let Some(handler) = handler {
            handler(&error);
        }
    }

    // --------------------------------------------------------
    // Teardown
    // --------------------------------------------------------

    /// Drops every subscriber, record and the error handler.
    pub fn shutdown(&self) {
        self.inner.listeners.borrow_mut().entries.clear();
        self.inner.entries.borrow_mut().records.clear();
        self.inner.error_handler.borrow_mut().take();
    }
}

// ============================================================
// SUBSCRIPTION
// ============================================================

/// Registration guard returned by [`ToastStore::subscribe`].
///
/// Dropping it unsubscribes. [`unsubscribe`](Self::unsubscribe) may be called
/// any number of times.
pub struct Subscription {
    store: Weak<StoreInner>,
    key: u64,
    active: Cell<bool>,
}

impl Subscription {
    pub fn unsubscribe(&self) {
        if !self.active.replace(false) {
            return;
        }
        if let Some(inner) = self.store.upgrade() {
            inner
                .listeners
                .borrow_mut()
                .entries
                .retain(|(key, _)| *key != self.key);
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record_events(store: &ToastStore) -> (Subscription, Rc<RefCell<Vec<String>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let sub = store.subscribe(move |event| {
            let line = match event {
                ToastEvent::Push(toast) => format!("push {} {}", toast.id, toast.kind),
                ToastEvent::Dismiss(signal) => format!("dismiss {}", signal.id),
            };
            sink.borrow_mut().push(line);
        });
        (sub, log)
    }

    #[test]
    fn test_push_generates_unique_ids() {
        let store = ToastStore::new();
        let a = store.success("A");
        let b = store.info("B");
        assert_ne!(a, b);
        assert_eq!(store.active_count(), 2);
    }

    #[test]
    fn test_generated_ids_skip_taken_ones() {
        let store = ToastStore::new();
        store.message_with("mine", ToastParams::new().id(1));
        let generated = store.message("next");
        assert_eq!(generated, ToastId::Num(2));
    }

    #[test]
    fn test_push_same_id_updates_in_place() {
        let store = ToastStore::new();
        let (_sub, log) = record_events(&store);

        store.loading_with("Saving", ToastParams::new().id("save").description("draft"));
        store.success_with("Saved", ToastParams::new().id("save"));

        let toasts = store.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, ToastKind::Success);
        assert_eq!(toasts[0].title.as_deref(), Some("Saved"));
        assert_eq!(toasts[0].description.as_deref(), Some("draft"));
        assert_eq!(*log.borrow(), ["push save loading", "push save success"]);
    }

    #[test]
    fn test_producer_kind_wins_over_params_kind() {
        let store = ToastStore::new();
        let id = store.success_with("Done", ToastParams::new().kind(ToastKind::Error));

        let toast = store.get(&id).unwrap();
        assert_eq!(toast.kind, ToastKind::Success);
        assert_eq!(store.state(&id), Some(EntryState::Display(toast.kind)));
    }

    #[test]
    fn test_update_ignores_unknown_and_dismissed() {
        let store = ToastStore::new();
        let (_sub, log) = record_events(&store);

        assert!(!store.update(&ToastId::from(99), ToastParams::new().title("x")));

        let id = store.info("Hello");
        store.dismiss(&id);
        assert!(!store.update(&id, ToastParams::new().title("again")));
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn test_dismiss_unknown_is_silent() {
        let store = ToastStore::new();
        let (_sub, log) = record_events(&store);
        store.dismiss(&ToastId::from("nope"));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_two_phase_removal_with_subscriber() {
        let store = ToastStore::new();
        let (_sub, _log) = record_events(&store);
        let id = store.warning("Careful");

        store.dismiss(&id);
        assert_eq!(store.state(&id), Some(EntryState::Dismissing));
        assert!(!store.is_active(&id));

        // A second dismiss while dismissing does nothing
        store.dismiss(&id);

        assert!(store.complete_removal(&id));
        assert_eq!(store.state(&id), None);
        assert!(!store.complete_removal(&id));
    }

    #[test]
    fn test_headless_dismiss_completes_removal() {
        let store = ToastStore::new();
        let id = store.info("Hi");
        store.dismiss(&id);
        assert_eq!(store.state(&id), None);
    }

    #[test]
    fn test_push_replaces_dismissing_record() {
        let store = ToastStore::new();
        let (_sub, _log) = record_events(&store);
        let id = store.info_with("Old", ToastParams::new().id("x"));
        store.dismiss(&id);
        let generation = store.generation_of(&id).unwrap();

        store.error_with("New", ToastParams::new().id("x"));
        assert!(store.is_active(&id));
        assert_ne!(store.generation_of(&id), Some(generation));
        assert_eq!(store.get(&id).unwrap().title.as_deref(), Some("New"));
    }

    #[test]
    fn test_subscribers_called_in_registration_order() {
        let store = ToastStore::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        let first = Rc::clone(&order);
        let second = Rc::clone(&order);
        let _a = store.subscribe(move |_| first.borrow_mut().push("a"));
        let _b = store.subscribe(move |_| second.borrow_mut().push("b"));

        store.info("ping");
        assert_eq!(*order.borrow(), ["a", "b"]);
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let store = ToastStore::new();
        let (sub, log) = record_events(&store);
        sub.unsubscribe();
        sub.unsubscribe();
        assert!(!sub.is_active());
        assert_eq!(store.subscriber_count(), 0);

        store.info("unheard");
        assert!(log.borrow().is_empty());
        drop(sub);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let store = ToastStore::new();
        {
            let _sub = store.subscribe(|_| {});
            assert_eq!(store.subscriber_count(), 1);
        }
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn test_listener_may_push_reentrantly() {
        let store = ToastStore::new();
        let producer = store.downgrade();
        let _echo = store.subscribe(move |event| {
            if let ToastEvent::Push(toast) = event {
                if toast.kind == ToastKind::Error {
                    if let Some(store) = producer.upgrade() {
                        store.info("Error reported");
                    }
                }
            }
        });

        store.error("Disk full");
        let titles: Vec<_> = store.toasts().into_iter().filter_map(|t| t.title).collect();
        assert_eq!(titles, ["Disk full", "Error reported"]);
    }

    #[test]
    fn test_active_set_is_pushed_minus_dismissed() {
        let store = ToastStore::new();
        let (_sub, _log) = record_events(&store);
        let ids: Vec<ToastId> = (0..6).map(|i| store.info(format!("t{i}"))).collect();

        for id in [&ids[4], &ids[1], &ids[2]] {
            store.dismiss(id);
            store.complete_removal(id);
        }

        let active: Vec<ToastId> = store.toasts().into_iter().map(|t| t.id).collect();
        assert_eq!(active, vec![ids[0].clone(), ids[3].clone(), ids[5].clone()]);
    }

    #[test]
    fn test_dismiss_all() {
        let store = ToastStore::new();
        let (_sub, log) = record_events(&store);
        store.info("a");
        store.info("b");
        store.dismiss_all();
        assert_eq!(store.active_count(), 0);
        assert_eq!(log.borrow().iter().filter(|l| l.starts_with("dismiss")).count(), 2);
    }

    #[test]
    fn test_error_handler_receives_reports() {
        let store = ToastStore::new();
        let seen = Rc::new(Cell::new(0));
        let counter = Rc::clone(&seen);
        store.set_error_handler(move |_| counter.set(counter.get() + 1));

        store.report(ToastError::Finally {
            id: ToastId::from(1),
            source: anyhow::anyhow!("boom"),
        });
        assert_eq!(seen.get(), 1);
    }

    #[test]
    fn test_shutdown_clears_everything() {
        let store = ToastStore::new();
        let sub = store.subscribe(|_| {});
        store.info("x");
        store.shutdown();
        assert_eq!(store.active_count(), 0);
        assert_eq!(store.subscriber_count(), 0);
        sub.unsubscribe();
    }
}
