use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::App;
use crate::panels::Panel;
use crate::state::{ActiveModal, Focus, PendingAction};
use crate::ui::modal::{ConfirmModal, InputModal};

impl App {
    /// Dispatch a key event: modal first, then the detached view,
    /// then global shortcuts, then the focused panel
    pub(super) fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        if self.state.has_modal() {
            return self.handle_modal_key(key);
        }

        if self.detached.is_some() {
            if key.code == KeyCode::Esc {
                self.close_detached();
            } else if let Some(detached) = self.detached.as_mut() {
                detached.handle_key(key)?;
                self.drain_mirror_events();
            }
            return Ok(());
        }

        // Global shortcuts
        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::CONTROL) => {
                self.request_quit();
                return Ok(());
            }
            (KeyCode::Char('s'), KeyModifiers::CONTROL) => {
                self.commit();
                return Ok(());
            }
            (KeyCode::Char('r'), KeyModifiers::CONTROL) => {
                self.request_reset_all();
                return Ok(());
            }
            (KeyCode::Char('d'), KeyModifiers::CONTROL) => {
                self.request_download();
                return Ok(());
            }
            (KeyCode::Char('f'), KeyModifiers::CONTROL) => {
                self.open_detached();
                return Ok(());
            }
            (KeyCode::Tab, KeyModifiers::NONE) => {
                self.state.toggle_focus();
                return Ok(());
            }
            _ => {}
        }

        // Route to the focused panel
        match self.state.focus {
            Focus::FileList => {
                self.file_list.handle_key(key)?;
                if let Some(index) = self.file_list.take_select_request() {
                    self.select_entry(index);
                }
                if let Some(index) = self.file_list.take_reset_request() {
                    self.reset_entry(index);
                }
            }
            Focus::Editor => {
                self.editor.handle_key(key)?;
                if let Some(content) = self.editor.take_edited() {
                    self.archive.edit(&content);
                }
            }
        }

        Ok(())
    }

    /// Quit, confirming first while any entry has unsaved edits
    fn request_quit(&mut self) {
        if self.archive.any_dirty() {
            self.state.set_pending_action(
                PendingAction::Quit,
                ActiveModal::Confirm(Box::new(ConfirmModal::new(
                    "Quit",
                    format!(
                        "You have unsaved changes in {} file(s).\nQuit anyway?",
                        self.archive.dirty_count()
                    ),
                ))),
            );
        } else {
            self.state.quit();
        }
    }

    /// Reset every entry, confirming while any edit would be lost
    fn request_reset_all(&mut self) {
        if self.archive.editing_disabled() {
            self.state.set_error("Archive is read-only".to_string());
            return;
        }
        if self.archive.any_dirty() {
            self.state.set_pending_action(
                PendingAction::ResetAll,
                ActiveModal::Confirm(Box::new(ConfirmModal::new(
                    "Reset all",
                    "Discard all unsaved changes and restore the loaded contents?",
                ))),
            );
        } else {
            self.reset_all();
        }
    }

    /// Ask for a target path and export the current entry there
    fn request_download(&mut self) {
        let index = self.archive.current_index();
        let entry = self.archive.current_entry();
        let default_name = entry
            .path
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
            .unwrap_or("download.txt")
            .to_string();

        self.state.set_pending_action(
            PendingAction::Download { index },
            ActiveModal::Input(Box::new(InputModal::with_default(
                "Download",
                format!("Write {} to:", entry.path),
                default_name,
            ))),
        );
    }
}
