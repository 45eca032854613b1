//! Integration tests for the toast container.
//!
//! Every test runs on a paused current-thread runtime inside a `LocalSet`, so
//! timers and spinner ticks fire deterministically as virtual time advances.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use tokio::task::LocalSet;
use tokio::time::sleep;
use toastline_core::{
    HostOp, IconsOption, MemoryHost, Position, StackingMode, ToastId, ToastKind, ToastParams,
    ToastStore, Toaster, ToasterOptions,
};

fn ids(names: &[&str]) -> Vec<ToastId> {
    names.iter().map(|name| ToastId::from(*name)).collect()
}

fn counter() -> (Rc<Cell<u32>>, impl Fn(&toastline_core::Toast) + 'static) {
    let count = Rc::new(Cell::new(0));
    let handle = Rc::clone(&count);
    (count, move |_: &toastline_core::Toast| handle.set(handle.get() + 1))
}

fn stack(visible: usize) -> ToasterOptions {
    ToasterOptions::default()
        .with_stacking(StackingMode::Stack)
        .with_visible_toasts(visible)
}

// ============================================================================
// STACKING AND EVICTION
// ============================================================================

mod stacking {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_single_mode_keeps_latest() {
        LocalSet::new()
            .run_until(async {
                let store = ToastStore::new();
                let host = MemoryHost::shared();
                let toaster = Toaster::new(&store, ToasterOptions::default(), Rc::clone(&host));

                for name in ["a", "b", "c"] {
                    store.info_with(name, ToastParams::new().id(name));
                }

                assert_eq!(toaster.toast_count(), 1);
                assert_eq!(toaster.mounted_ids(), ids(&["c"]));
                assert_eq!(host.borrow().ids(), ids(&["c"]));
                // Evicted toasts are dismissed in the store too
                let active: Vec<ToastId> = store.toasts().into_iter().map(|t| t.id).collect();
                assert_eq!(active, ids(&["c"]));
            })
            .await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_stack_evicts_oldest_first() {
        LocalSet::new()
            .run_until(async {
                let store = ToastStore::new();
                let host = MemoryHost::shared();
                let toaster = Toaster::new(&store, stack(3), Rc::clone(&host));

                for name in ["a", "b", "c", "d"] {
                    store.info_with(name, ToastParams::new().id(name));
                }

                assert_eq!(toaster.toast_count(), 3);
                assert!(!toaster.is_mounted(&ToastId::from("a")));
                // Bottom anchor: newest closest to the edge
                assert_eq!(toaster.mounted_ids(), ids(&["d", "c", "b"]));
                assert_eq!(host.borrow().ids(), ids(&["d", "c", "b"]));
                assert!(!store.is_active(&ToastId::from("a")));
            })
            .await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_top_anchor_appends() {
        LocalSet::new()
            .run_until(async {
                let store = ToastStore::new();
                let host = MemoryHost::shared();
                let toaster = Toaster::new(
                    &store,
                    stack(3).with_position(Position::TopRight),
                    Rc::clone(&host),
                );

                for name in ["a", "b", "c", "d"] {
                    store.info_with(name, ToastParams::new().id(name));
                }

                assert_eq!(toaster.mounted_ids(), ids(&["b", "c", "d"]));
                assert_eq!(host.borrow().ids(), ids(&["b", "c", "d"]));
            })
            .await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_eviction_fires_on_dismiss() {
        LocalSet::new()
            .run_until(async {
                let store = ToastStore::new();
                let toaster = Toaster::new(&store, stack(1), MemoryHost::new());
                let (dismissed, on_dismiss) = counter();

                store.info_with("first", ToastParams::new().on_dismiss(on_dismiss));
                store.info("second");

                assert_eq!(dismissed.get(), 1);
                assert_eq!(toaster.toast_count(), 1);
            })
            .await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_zero_visible_toasts_behaves_as_one() {
        LocalSet::new()
            .run_until(async {
                let store = ToastStore::new();
                let toaster = Toaster::new(&store, stack(0), MemoryHost::new());
                store.info("a");
                store.info("b");
                assert_eq!(toaster.toast_count(), 1);
            })
            .await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_active_set_matches_pushes_minus_dismissals() {
        LocalSet::new()
            .run_until(async {
                let store = ToastStore::new();
                let toaster = Toaster::new(&store, stack(10), MemoryHost::new());

                let names = ["a", "b", "c", "d", "e"];
                for name in names {
                    store.message_with(name, ToastParams::new().id(name).persistent());
                }
                for name in ["d", "a"] {
                    store.dismiss(&ToastId::from(name));
                }
                store.dismiss(&ToastId::from("unknown"));

                let active: Vec<ToastId> = store.toasts().into_iter().map(|t| t.id).collect();
                assert_eq!(active, ids(&["b", "c", "e"]));
                assert_eq!(toaster.toast_count(), 3);
            })
            .await;
    }
}

// ============================================================================
// IN-PLACE UPDATES
// ============================================================================

mod updates {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_same_id_patches_without_remount() {
        LocalSet::new()
            .run_until(async {
                let store = ToastStore::new();
                let host = MemoryHost::shared();
                let toaster = Toaster::new(&store, stack(3), Rc::clone(&host));

                store.info("other");
                store.loading_with("Uploading", ToastParams::new().id("upload"));
                let before = toaster.mounted_ids();
                host.borrow_mut().take_ops();

                store.success_with("Uploaded", ToastParams::new().id("upload"));

                assert_eq!(toaster.toast_count(), 2);
                assert_eq!(toaster.mounted_ids(), before);
                assert_eq!(
                    host.borrow().ops(),
                    &[HostOp::Patch(ToastId::from("upload"))]
                );
                let node = toaster.node(&ToastId::from("upload")).unwrap();
                assert_eq!(node.kind, ToastKind::Success);
                assert_eq!(node.title.as_deref(), Some("Uploaded"));
            })
            .await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_update_applies_cascaded_style() {
        LocalSet::new()
            .run_until(async {
                let store = ToastStore::new();
                let toaster = Toaster::new(&store, ToasterOptions::default(), MemoryHost::new());

                let id = store.info("Heads up");
                store.update(&id, ToastParams::new().kind(ToastKind::Error));

                let node = toaster.node(&id).unwrap();
                assert_eq!(node.style.border_color.as_deref(), Some("#ef4444"));
                assert_eq!(node.style.max_width, Some(60));
            })
            .await;
    }
}

// ============================================================================
// AUTO-DISMISS
// ============================================================================

mod timers {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_expires_after_duration() {
        LocalSet::new()
            .run_until(async {
                let store = ToastStore::new();
                let toaster = Toaster::new(&store, ToasterOptions::default(), MemoryHost::new());
                let (auto_closed, on_auto_close) = counter();
                let (dismissed, on_dismiss) = counter();

                let id = store.success_with(
                    "Saved",
                    ToastParams::new()
                        .on_auto_close(on_auto_close)
                        .on_dismiss(on_dismiss),
                );

                sleep(Duration::from_millis(3999)).await;
                assert!(toaster.is_mounted(&id));

                sleep(Duration::from_millis(2)).await;
                assert!(!toaster.is_mounted(&id));
                assert_eq!(store.state(&id), None);
                assert_eq!(auto_closed.get(), 1);
                assert_eq!(dismissed.get(), 0);
            })
            .await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_manual_dismiss_cancels_timer() {
        LocalSet::new()
            .run_until(async {
                let store = ToastStore::new();
                let host = MemoryHost::shared();
                let toaster = Toaster::new(&store, ToasterOptions::default(), Rc::clone(&host));
                let (auto_closed, on_auto_close) = counter();
                let (dismissed, on_dismiss) = counter();

                let id = store.info_with(
                    "Short",
                    ToastParams::new()
                        .duration(1000)
                        .on_auto_close(on_auto_close)
                        .on_dismiss(on_dismiss),
                );

                sleep(Duration::from_millis(500)).await;
                store.dismiss(&id);
                store.dismiss(&id);
                assert!(!toaster.is_mounted(&id));

                sleep(Duration::from_millis(1000)).await;
                assert_eq!(dismissed.get(), 1);
                assert_eq!(auto_closed.get(), 0);
                let unmounts = host
                    .borrow()
                    .ops()
                    .iter()
                    .filter(|op| matches!(op, HostOp::Unmount(_)))
                    .count();
                assert_eq!(unmounts, 1);
            })
            .await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_loading_never_expires() {
        LocalSet::new()
            .run_until(async {
                let store = ToastStore::new();
                let mut options = ToasterOptions::default();
                options.toast_options.duration = Some(1000);
                let toaster = Toaster::new(&store, options, MemoryHost::new());

                let id = store.loading("Working");

                sleep(Duration::from_secs(60)).await;
                assert!(toaster.is_mounted(&id));
                assert_eq!(toaster.node(&id).unwrap().duration_ms, 0);
            })
            .await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_duration_change_reschedules() {
        LocalSet::new()
            .run_until(async {
                let store = ToastStore::new();
                let toaster = Toaster::new(&store, ToasterOptions::default(), MemoryHost::new());

                let id = store.loading_with("Syncing", ToastParams::new().id("sync"));
                sleep(Duration::from_millis(1000)).await;
                store.update(&id, ToastParams::new().kind(ToastKind::Success).title("Synced"));

                sleep(Duration::from_millis(3500)).await;
                assert!(toaster.is_mounted(&id));

                sleep(Duration::from_millis(501)).await;
                assert!(!toaster.is_mounted(&id));
            })
            .await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_per_kind_duration_override() {
        LocalSet::new()
            .run_until(async {
                let store = ToastStore::new();
                let options = ToasterOptions::from_toml_str(
                    r#"
                    [toastOptions]
                    duration = 4000

                    [toastOptions.success]
                    duration = 2000
                    "#,
                )
                .unwrap();
                let toaster = Toaster::new(&store, options, MemoryHost::new());

                let id = store.success("Fast");
                assert_eq!(toaster.node(&id).unwrap().duration_ms, 2000);
                sleep(Duration::from_millis(2001)).await;
                assert!(!toaster.is_mounted(&id));
            })
            .await;
    }
}

// ============================================================================
// SPINNER
// ============================================================================

mod spinner {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_spinner_advances_and_stops() {
        LocalSet::new()
            .run_until(async {
                let store = ToastStore::new();
                let toaster = Toaster::new(&store, ToasterOptions::default(), MemoryHost::new());

                let id = store.loading("Loading");
                assert_eq!(toaster.spinner_frame(&id), Some(0));
                assert_eq!(toaster.node(&id).unwrap().icon.as_deref(), Some("◜"));

                sleep(Duration::from_millis(250)).await;
                assert_eq!(toaster.spinner_frame(&id), Some(2));
                assert_eq!(toaster.node(&id).unwrap().icon.as_deref(), Some("◝"));

                store.update(&id, ToastParams::new().kind(ToastKind::Success));
                assert_eq!(toaster.spinner_frame(&id), None);
                assert_eq!(toaster.node(&id).unwrap().icon.as_deref(), Some("✓"));

                sleep(Duration::from_millis(300)).await;
                assert_eq!(toaster.node(&id).unwrap().icon.as_deref(), Some("✓"));
            })
            .await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_static_loading_icon_has_no_spinner() {
        LocalSet::new()
            .run_until(async {
                let store = ToastStore::new();
                let options = ToasterOptions::from_toml_str("[icons]\nloading = \"...\"").unwrap();
                let toaster = Toaster::new(&store, options, MemoryHost::new());

                let id = store.loading("Loading");
                assert_eq!(toaster.spinner_frame(&id), None);
                assert_eq!(toaster.node(&id).unwrap().icon.as_deref(), Some("..."));
            })
            .await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_disabled_icons() {
        LocalSet::new()
            .run_until(async {
                let store = ToastStore::new();
                let toaster = Toaster::new(
                    &store,
                    ToasterOptions::default().with_icons(IconsOption::Enabled(false)),
                    MemoryHost::new(),
                );

                let id = store.loading("Loading");
                assert_eq!(toaster.spinner_frame(&id), None);
                assert_eq!(toaster.node(&id).unwrap().icon, None);
            })
            .await;
    }
}

// ============================================================================
// USER INTERACTION AND TEARDOWN
// ============================================================================

mod interaction {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_close_respects_dismissible() {
        LocalSet::new()
            .run_until(async {
                let store = ToastStore::new();
                let toaster = Toaster::new(
                    &store,
                    stack(3).with_close_button(true),
                    MemoryHost::new(),
                );

                let pinned = store.warning_with("Pinned", ToastParams::new().dismissible(false));
                let normal = store.info("Closable");

                assert_eq!(toaster.node(&pinned).unwrap().close_icon, None);
                assert_eq!(toaster.node(&normal).unwrap().close_icon.as_deref(), Some("×"));

                assert!(!toaster.close(&pinned));
                assert!(toaster.is_mounted(&pinned));

                assert!(toaster.close(&normal));
                assert!(!toaster.is_mounted(&normal));
                assert!(!store.is_active(&normal));
            })
            .await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_trigger_action_runs_then_dismisses() {
        LocalSet::new()
            .run_until(async {
                let store = ToastStore::new();
                let toaster = Toaster::new(&store, ToasterOptions::default(), MemoryHost::new());
                let clicks = Rc::new(Cell::new(0));
                let handle = Rc::clone(&clicks);

                let id = store.message_with(
                    "File deleted",
                    ToastParams::new().action("Undo", move || handle.set(handle.get() + 1)),
                );
                assert_eq!(toaster.node(&id).unwrap().action_label.as_deref(), Some("Undo"));

                assert!(toaster.trigger_action(&id));
                assert_eq!(clicks.get(), 1);
                assert!(!toaster.is_mounted(&id));
                assert!(!toaster.trigger_action(&id));
            })
            .await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_node_destroyed_by_host() {
        LocalSet::new()
            .run_until(async {
                let store = ToastStore::new();
                let toaster = Toaster::new(&store, ToasterOptions::default(), MemoryHost::new());
                let (dismissed, on_dismiss) = counter();

                let id = store.info_with("Bye", ToastParams::new().on_dismiss(on_dismiss));
                toaster.node_destroyed(&id);

                assert!(!toaster.is_mounted(&id));
                assert_eq!(store.state(&id), None);
                assert_eq!(dismissed.get(), 1);
            })
            .await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_callback_may_push_reentrantly() {
        LocalSet::new()
            .run_until(async {
                let store = ToastStore::new();
                let toaster = Toaster::new(&store, stack(3), MemoryHost::new());
                let producer = store.clone();

                let id = store.error_with(
                    "Failed",
                    ToastParams::new().on_dismiss(move |toast| {
                        producer.info(format!("{} was dismissed", toast.id));
                    }),
                );
                store.dismiss(&id);

                assert_eq!(toaster.toast_count(), 1);
                let titles: Vec<String> =
                    store.toasts().into_iter().filter_map(|t| t.title).collect();
                assert_eq!(titles, vec![format!("{id} was dismissed")]);
            })
            .await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_dismiss_unknown_touches_nothing() {
        LocalSet::new()
            .run_until(async {
                let store = ToastStore::new();
                let host = MemoryHost::shared();
                let _toaster = Toaster::new(&store, ToasterOptions::default(), Rc::clone(&host));
                store.info("Stay");
                host.borrow_mut().take_ops();

                store.dismiss(&ToastId::from("ghost"));
                assert!(host.borrow().ops().is_empty());
            })
            .await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_two_toasters_share_a_store() {
        LocalSet::new()
            .run_until(async {
                let store = ToastStore::new();
                let first = Toaster::new(&store, stack(3), MemoryHost::new());
                let second = Toaster::new(&store, stack(3), MemoryHost::new());
                let (dismissed, on_dismiss) = counter();

                let id = store.info_with("Shared", ToastParams::new().on_dismiss(on_dismiss));
                store.info_with("Shared again", ToastParams::new().id(id.clone()));
                assert_eq!((first.toast_count(), second.toast_count()), (1, 1));

                store.dismiss(&id);
                assert_eq!((first.toast_count(), second.toast_count()), (0, 0));
                assert_eq!(store.state(&id), None);
                // One callback per container
                assert_eq!(dismissed.get(), 2);
            })
            .await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_late_toaster_mounts_existing_toasts() {
        LocalSet::new()
            .run_until(async {
                let store = ToastStore::new();
                store.info_with("early", ToastParams::new().id("a").persistent());
                store.info_with("early", ToastParams::new().id("b").persistent());

                let toaster = Toaster::new(&store, stack(3), MemoryHost::new());
                assert_eq!(toaster.mounted_ids(), ids(&["b", "a"]));
            })
            .await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_drop_unmounts_and_stops_timers() {
        LocalSet::new()
            .run_until(async {
                let store = ToastStore::new();
                let host = MemoryHost::shared();
                let (auto_closed, on_auto_close) = counter();
                {
                    let _toaster = Toaster::new(&store, stack(3), Rc::clone(&host));
                    store.info_with("a", ToastParams::new().on_auto_close(on_auto_close));
                    store.loading("b");
                    assert_eq!(host.borrow().nodes().len(), 2);
                }

                assert!(host.borrow().nodes().is_empty());
                assert_eq!(store.subscriber_count(), 0);
                sleep(Duration::from_secs(10)).await;
                assert_eq!(auto_closed.get(), 0);
            })
            .await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_layout_is_attached() {
        LocalSet::new()
            .run_until(async {
                let store = ToastStore::new();
                let host = MemoryHost::shared();
                let _toaster = Toaster::new(
                    &store,
                    ToasterOptions::default().with_position(Position::TopCenter),
                    Rc::clone(&host),
                );

                let layout = *host.borrow().layout().unwrap();
                assert_eq!(layout.position, Position::TopCenter);
                assert_eq!(layout.anchor.top, Some(1));
                assert!(layout.anchor.full_width);
                assert_eq!(layout.gap, 1);
            })
            .await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_dismiss_all_through_toaster() {
        LocalSet::new()
            .run_until(async {
                let store = ToastStore::new();
                let toaster = Toaster::new(&store, stack(5), MemoryHost::new());
                let order = Rc::new(RefCell::new(Vec::new()));
                for name in ["a", "b", "c"] {
                    let log = Rc::clone(&order);
                    store.info_with(
                        name,
                        ToastParams::new()
                            .id(name)
                            .on_dismiss(move |toast| log.borrow_mut().push(toast.id.clone())),
                    );
                }

                toaster.dismiss_all();
                assert_eq!(toaster.toast_count(), 0);
                assert_eq!(store.active_count(), 0);
                assert_eq!(*order.borrow(), ids(&["a", "b", "c"]));
            })
            .await;
    }
}
