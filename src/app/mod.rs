use anyhow::Result;
use ratatui::{backend::Backend as TerminalBackend, Terminal};
use std::sync::mpsc::{Receiver, Sender};
use std::time::Duration;

use crate::archive::Archive;
use crate::backend::Backend;
use crate::config::Config;
use crate::event::{Event, EventHandler};
use crate::logger;
use crate::mirror::{self, EditEvent};
use crate::panels::{DetachedPanel, EditorPanel, FileListPanel};
use crate::state::AppState;

mod key_handler;
mod modal_handler;

/// Main application
pub struct App {
    state: AppState,
    archive: Archive,
    backend: Box<dyn Backend>,
    file_list: FileListPanel,
    editor: EditorPanel,
    /// Full-screen secondary surface (replaces the layout while open)
    detached: Option<DetachedPanel>,
    event_handler: EventHandler,
    /// Sender handed to detached views
    mirror_tx: Sender<EditEvent>,
    /// Edit events mirrored back from the detached view
    mirror_rx: Receiver<EditEvent>,
}

impl App {
    /// Create a new application over the given backend
    pub fn new(config: Config, backend: Box<dyn Backend>, read_only: bool) -> Result<Self> {
        // Initialize logger before anything that logs
        let log_file_path = config.get_log_file_path();
        let min_log_level = logger::LogLevel::from_str(&config.min_log_level)
            .unwrap_or(logger::LogLevel::Info);
        logger::init(
            log_file_path,
            crate::constants::MAX_LOG_ENTRIES,
            min_log_level,
        );
        logger::info("Application started");

        let pairs = backend.load()?;
        logger::info(format!("Loaded {} file(s) from backend", pairs.len()));

        let read_only = read_only || config.read_only;
        let mut archive = Archive::new(pairs);
        archive.set_editing_disabled(read_only);

        let state = AppState::with_config(config);
        logger::info(format!("Using theme '{}'", state.theme.name));

        let mut editor = EditorPanel::new(read_only);
        editor.load_entry(archive.current_entry());

        let mut file_list = FileListPanel::new();
        file_list.sync(&archive);

        let (mirror_tx, mirror_rx) = mirror::channel();

        Ok(Self {
            state,
            archive,
            backend,
            file_list,
            editor,
            detached: None,
            event_handler: EventHandler::new(Duration::from_millis(
                crate::constants::EVENT_HANDLER_INTERVAL_MS,
            )),
            mirror_tx,
            mirror_rx,
        })
    }

    /// Run the main application loop
    pub fn run<B: TerminalBackend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let size = terminal.size()?;
        self.state.update_terminal_size(size.width, size.height);

        while !self.state.should_quit {
            match self.event_handler.next()? {
                Event::Key(key) => {
                    self.handle_key_event(key)?;
                }
                Event::Resize(width, height) => {
                    self.state.update_terminal_size(width, height);
                }
                Event::Tick => {
                    self.drain_mirror_events();
                    self.state.on_tick();
                }
            }

            terminal.draw(|frame| {
                crate::ui::render(
                    frame,
                    &mut self.state,
                    &self.archive,
                    &mut self.file_list,
                    &mut self.editor,
                    self.detached.as_mut(),
                );
            })?;
        }

        logger::info("Application exited");
        Ok(())
    }

    /// Apply edit events mirrored back from the detached view
    fn drain_mirror_events(&mut self) {
        let events: Vec<EditEvent> = self.mirror_rx.try_iter().collect();
        for event in events {
            self.archive.edit_at(event.index, &event.content);
        }
    }

    /// Switch the visible buffer to `index`
    fn select_entry(&mut self, index: usize) {
        if self.archive.select(index) {
            self.editor.load_entry(self.archive.current_entry());
            self.file_list.set_cursor(index);
        }
    }

    /// Revert one entry to its pristine copy
    fn reset_entry(&mut self, index: usize) {
        if self.archive.editing_disabled() {
            self.state.set_error("Archive is read-only".to_string());
            return;
        }
        let was_current = index == self.archive.current_index();
        if self.archive.reset_entry(index) {
            if was_current {
                self.editor.load_entry(self.archive.current_entry());
            }
            if let Some(entry) = self.archive.entry(index) {
                self.state.set_info(format!("Reverted {}", entry.path));
                logger::info(format!("Reverted {}", entry.path));
            }
        }
    }

    /// Discard every edit and re-initialize from pristine copies
    fn reset_all(&mut self) {
        self.archive.reset_all();
        self.editor.load_entry(self.archive.current_entry());
        self.file_list.sync(&self.archive);
        self.file_list.set_cursor(0);
        self.state.set_info("All changes discarded".to_string());
        logger::info("Archive reset to pristine state");
    }

    /// Persist the working set through the backend.
    ///
    /// On failure the in-memory edits stay untouched and the error is
    /// reported in a modal.
    fn commit(&mut self) {
        if self.archive.editing_disabled() {
            self.state.set_error("Archive is read-only".to_string());
            return;
        }

        let payload = self.archive.payload();
        match self.backend.store(&payload) {
            Ok(()) => {
                self.archive.mark_committed();
                self.state
                    .set_info(format!("Committed {} file(s)", payload.len()));
                logger::info(format!("Committed {} file(s)", payload.len()));
            }
            Err(e) => {
                logger::error(format!("Commit failed: {:#}", e));
                self.state.active_modal =
                    Some(crate::state::ActiveModal::Info(Box::new(
                        crate::ui::modal::InfoModal::new(
                            "Commit failed",
                            format!("{:#}\n\nYour edits are preserved.", e),
                        ),
                    )));
            }
        }
    }

    /// Export one entry's content to a local file
    fn download(&mut self, index: usize, target: &str) {
        let Some(entry) = self.archive.entry(index) else {
            return;
        };
        match std::fs::write(target, &entry.content) {
            Ok(()) => {
                self.state
                    .set_info(format!("Wrote {} to {}", entry.path, target));
                logger::info(format!("Downloaded {} to {}", entry.path, target));
            }
            Err(e) => {
                self.state.set_error(format!("Write failed: {}", e));
                logger::error(format!("Download of {} failed: {}", entry.path, e));
            }
        }
    }

    /// Open the detached full-screen surface over the current entry
    fn open_detached(&mut self) {
        let index = self.archive.current_index();
        self.detached = Some(DetachedPanel::open(
            index,
            self.archive.current_entry(),
            self.archive.editing_disabled(),
            self.mirror_tx.clone(),
        ));
        logger::debug(format!("Detached view opened for entry {}", index));
    }

    /// Close the detached surface and refresh the primary editor
    fn close_detached(&mut self) {
        // Apply whatever the detached view still has in flight
        self.drain_mirror_events();
        self.detached = None;
        self.editor.load_entry(self.archive.current_entry());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ActiveModal;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    struct StubBackend {
        fail_store: bool,
    }

    impl Backend for StubBackend {
        fn load(&self) -> Result<Vec<(String, String)>> {
            Ok(vec![
                ("a.conf".to_string(), "alpha".to_string()),
                ("b.conf".to_string(), "beta".to_string()),
            ])
        }

        fn store(&self, _entries: &[(String, String)]) -> Result<()> {
            if self.fail_store {
                anyhow::bail!("backend unavailable")
            }
            Ok(())
        }
    }

    fn test_config() -> Config {
        Config {
            log_file_path: Some(
                std::env::temp_dir()
                    .join("confedit-app-test.log")
                    .to_string_lossy()
                    .into_owned(),
            ),
            ..Config::default()
        }
    }

    fn test_app(fail_store: bool) -> App {
        App::new(
            test_config(),
            Box::new(StubBackend { fail_store }),
            false,
        )
        .unwrap()
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_commit_failure_preserves_edits() {
        let mut app = test_app(true);
        app.archive.edit("ALPHA");

        app.commit();

        // Edits survive the failed commit and the error is reported
        let entry = app.archive.entry(0).unwrap();
        assert_eq!(entry.content, "ALPHA");
        assert!(entry.dirty);
        assert!(matches!(
            app.state.active_modal,
            Some(ActiveModal::Info(_))
        ));
    }

    #[test]
    fn test_commit_success_clears_dirty() {
        let mut app = test_app(false);
        app.archive.edit("ALPHA");

        app.commit();

        assert!(!app.archive.any_dirty());
        assert_eq!(app.archive.pristine_entry(0).unwrap().content, "ALPHA");
        assert!(app.state.active_modal.is_none());
    }

    #[test]
    fn test_select_entry_syncs_editor() {
        let mut app = test_app(false);
        app.select_entry(1);

        assert_eq!(app.archive.current_index(), 1);
        assert_eq!(app.editor.text(), "beta");
    }

    #[test]
    fn test_reset_current_entry_refreshes_editor() {
        let mut app = test_app(false);
        app.archive.edit("ALPHA");
        app.editor.load_entry(app.archive.current_entry());

        app.reset_entry(0);

        assert_eq!(app.editor.text(), "alpha");
        assert!(!app.archive.any_dirty());
    }

    #[test]
    fn test_quit_with_unsaved_changes_asks_first() {
        let mut app = test_app(false);
        app.archive.edit("ALPHA");

        app.handle_key_event(key(KeyCode::Char('q'), KeyModifiers::CONTROL))
            .unwrap();
        assert!(app.state.has_modal());
        assert!(!app.state.should_quit);

        app.handle_key_event(key(KeyCode::Char('y'), KeyModifiers::NONE))
            .unwrap();
        assert!(app.state.should_quit);
    }

    #[test]
    fn test_quit_without_changes_is_immediate() {
        let mut app = test_app(false);
        app.handle_key_event(key(KeyCode::Char('q'), KeyModifiers::CONTROL))
            .unwrap();
        assert!(app.state.should_quit);
    }

    #[test]
    fn test_detached_edits_flow_back_into_primary() {
        let mut app = test_app(false);
        app.open_detached();

        app.handle_key_event(key(KeyCode::End, KeyModifiers::NONE))
            .unwrap();
        app.handle_key_event(key(KeyCode::Char('!'), KeyModifiers::NONE))
            .unwrap();
        assert_eq!(app.archive.entry(0).unwrap().content, "alpha!");

        app.handle_key_event(key(KeyCode::Esc, KeyModifiers::NONE))
            .unwrap();
        assert!(app.detached.is_none());
        assert_eq!(app.editor.text(), "alpha!");
    }

    #[test]
    fn test_editing_keys_update_archive() {
        let mut app = test_app(false);
        app.state.focus = crate::state::Focus::Editor;

        app.handle_key_event(key(KeyCode::End, KeyModifiers::NONE))
            .unwrap();
        app.handle_key_event(key(KeyCode::Char('X'), KeyModifiers::SHIFT))
            .unwrap();

        let entry = app.archive.entry(0).unwrap();
        assert_eq!(entry.content, "alphaX");
        assert!(entry.dirty);
    }
}
