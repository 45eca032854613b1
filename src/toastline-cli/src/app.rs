//! Demo application state: key bindings that produce toasts, mouse handling
//! and frame rendering.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};
use toastline_core::{
    PromiseToast, Resolver, ToastId, ToastParams, ToastStore, Toaster, ToasterOptions,
};
use toastline_tui::ToastLayer;

/// Key bindings shown in the help panel.
pub const HELP: &[(&str, &str)] = &[
    ("s", "success"),
    ("e", "error"),
    ("w", "warning"),
    ("i", "info"),
    ("m", "message with description"),
    ("l", "loading (persistent)"),
    ("p", "promise that resolves"),
    ("f", "promise that rejects"),
    ("a", "toast with an Undo action"),
    ("u", "update the last toast"),
    ("d", "dismiss the last toast"),
    ("c", "dismiss all"),
    ("q", "quit"),
];

/// Whether the event loop keeps running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

pub struct DemoApp {
    store: ToastStore,
    toaster: Toaster,
    layer: Rc<RefCell<ToastLayer>>,
    /// Last drawn frame area, for mouse hit testing
    area: Rect,
    last: Option<ToastId>,
    jobs: u32,
}

impl DemoApp {
    pub fn new(options: ToasterOptions) -> Self {
        let store = ToastStore::new();
        store.set_error_handler(|err| tracing::warn!(error = %err, "toast error"));
        let layer = ToastLayer::shared();
        let toaster = Toaster::new(&store, options, Rc::clone(&layer));
        Self {
            store,
            toaster,
            layer,
            area: Rect::default(),
            last: None,
            jobs: 0,
        }
    }

    pub fn store(&self) -> &ToastStore {
        &self.store
    }

    pub fn toaster(&self) -> &Toaster {
        &self.toaster
    }

    pub fn layer(&self) -> &Rc<RefCell<ToastLayer>> {
        &self.layer
    }

    /// Handles a key press. Must run inside a `LocalSet`.
    pub fn handle_key(&mut self, code: KeyCode) -> Control {
        let id = match code {
            KeyCode::Char('q') | KeyCode::Esc => return Control::Quit,
            KeyCode::Char('s') => self.store.success("Changes saved"),
            KeyCode::Char('e') => self.store.error_with(
                "Build failed",
                ToastParams::new().description("3 errors in src/main.rs"),
            ),
            KeyCode::Char('w') => self.store.warning("Disk usage above 90%"),
            KeyCode::Char('i') => self.store.info("New version available"),
            KeyCode::Char('m') => self.store.message_with(
                "Event has been created",
                ToastParams::new().description("Sunday, December 03, 2023 at 9:00 AM"),
            ),
            KeyCode::Char('l') => self.store.loading("Waiting for network..."),
            KeyCode::Char('p') => self.start_job(true),
            KeyCode::Char('f') => self.start_job(false),
            KeyCode::Char('a') => self.push_undoable(),
            KeyCode::Char('u') => {
                if let Some(id) = &self.last {
                    self.store
                        .update(id, ToastParams::new().title("Updated in place"));
                }
                return Control::Continue;
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.last.take() {
                    self.store.dismiss(&id);
                }
                return Control::Continue;
            }
            KeyCode::Char('c') => {
                self.toaster.dismiss_all();
                return Control::Continue;
            }
            _ => return Control::Continue,
        };
        self.last = Some(id);
        Control::Continue
    }

    /// A left click on a toast runs its action, or closes it.
    pub fn handle_mouse(&mut self, event: MouseEvent) {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let hit = self
            .layer
            .borrow()
            .hit_test(self.area, event.column, event.row);
        let Some(id) = hit else {
            return;
        };
        if !self.toaster.trigger_action(&id) {
            self.toaster.close(&id);
        }
    }

    fn start_job(&mut self, succeed: bool) -> ToastId {
        self.jobs += 1;
        let job = self.jobs;
        let work = async move {
            tokio::time::sleep(Duration::from_millis(1500)).await;
            if succeed {
                Ok(job * 128)
            } else {
                Err(format!("job {job} timed out"))
            }
        };
        self.store.promise(
            work,
            PromiseToast::new()
                .loading(format!("Running job {job}..."))
                .success(Resolver::map(|bytes: &u32| format!("Uploaded {bytes} KiB")))
                .error(Resolver::map(|reason: &String| {
                    format!("Upload failed: {reason}")
                })),
        )
    }

    fn push_undoable(&mut self) -> ToastId {
        let store = self.store.downgrade();
        self.store.message_with(
            "File moved to trash",
            ToastParams::new().action("Undo", move || {
                if let Some(store) = store.upgrade() {
                    store.success("File restored");
                }
            }),
        )
    }

    pub fn render(&mut self, frame: &mut Frame) {
        self.area = frame.area();

        let mut lines = vec![
            Line::styled(
                "toastline demo",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Line::raw(""),
        ];
        lines.extend(
            HELP.iter()
                .map(|(key, action)| Line::raw(format!("  {key}  {action}"))),
        );
        lines.push(Line::raw(""));
        lines.push(Line::raw(format!(
            "  {} toast(s) on screen, click one to close it",
            self.toaster.toast_count()
        )));

        frame.render_widget(Paragraph::new(lines).block(Block::bordered()), self.area);
        frame.render_widget(self.layer.borrow().widget(), self.area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use tokio::task::LocalSet;
    use toastline_core::{StackingMode, ToastKind};

    fn stacked() -> ToasterOptions {
        ToasterOptions::default()
            .with_stacking(StackingMode::Stack)
            .with_visible_toasts(5)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_keys_push_toasts() {
        LocalSet::new()
            .run_until(async {
                let mut app = DemoApp::new(stacked());
                assert_eq!(app.handle_key(KeyCode::Char('s')), Control::Continue);
                assert_eq!(app.handle_key(KeyCode::Char('e')), Control::Continue);
                assert_eq!(app.toaster().toast_count(), 2);

                app.handle_key(KeyCode::Char('u'));
                let last = app.last.clone().unwrap();
                let node = app.toaster().node(&last).unwrap();
                assert_eq!(node.title.as_deref(), Some("Updated in place"));
                assert_eq!(node.kind, ToastKind::Error);

                app.handle_key(KeyCode::Char('d'));
                assert_eq!(app.toaster().toast_count(), 1);
                app.handle_key(KeyCode::Char('c'));
                assert_eq!(app.toaster().toast_count(), 0);

                assert_eq!(app.handle_key(KeyCode::Esc), Control::Quit);
            })
            .await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_promise_job_settles() {
        LocalSet::new()
            .run_until(async {
                let mut app = DemoApp::new(stacked());
                app.handle_key(KeyCode::Char('p'));
                let id = app.last.clone().unwrap();
                assert_eq!(app.toaster().node(&id).unwrap().kind, ToastKind::Loading);

                tokio::time::sleep(Duration::from_millis(1600)).await;
                let node = app.toaster().node(&id).unwrap();
                assert_eq!(node.kind, ToastKind::Success);
                assert_eq!(node.title.as_deref(), Some("Uploaded 128 KiB"));
            })
            .await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_click_runs_action() {
        LocalSet::new()
            .run_until(async {
                let mut app = DemoApp::new(stacked());
                let backend = TestBackend::new(60, 20);
                let mut terminal = Terminal::new(backend).unwrap();

                app.handle_key(KeyCode::Char('a'));
                terminal.draw(|frame| app.render(frame)).unwrap();

                let placement = app.layer().borrow().placements(app.area)[0].area;
                app.handle_mouse(click(placement.x + 1, placement.y + 1));

                let titles: Vec<_> = app
                    .store()
                    .toasts()
                    .into_iter()
                    .filter_map(|toast| toast.title)
                    .collect();
                assert_eq!(titles, vec!["File restored".to_string()]);
            })
            .await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_click_outside_is_ignored() {
        LocalSet::new()
            .run_until(async {
                let mut app = DemoApp::new(stacked());
                let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
                app.handle_key(KeyCode::Char('i'));
                terminal.draw(|frame| app.render(frame)).unwrap();

                app.handle_mouse(click(0, 0));
                assert_eq!(app.toaster().toast_count(), 1);
            })
            .await;
    }
}
