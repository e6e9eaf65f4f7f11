use anyhow::Result;
use crossterm::event::KeyEvent;

use super::App;
use crate::state::{ActiveModal, PendingAction};
use crate::ui::modal::{Modal, ModalResult};

/// What a closing modal produced
enum ModalOutcome {
    /// Confirm modal answered Yes
    ConfirmYes,
    /// Text input confirmed with a value
    Input(String),
    /// Cancelled, answered No, or an info modal was dismissed
    Dismissed,
}

impl App {
    /// Route a key into the active modal and resolve the pending
    /// action when the modal closes
    pub(super) fn handle_modal_key(&mut self, key: KeyEvent) -> Result<()> {
        let outcome = match self.state.get_active_modal_mut() {
            Some(ActiveModal::Confirm(modal)) => match modal.handle_key(key)? {
                Some(ModalResult::Confirmed(true)) => Some(ModalOutcome::ConfirmYes),
                Some(ModalResult::Confirmed(false)) | Some(ModalResult::Cancelled) => {
                    Some(ModalOutcome::Dismissed)
                }
                None => None,
            },
            Some(ActiveModal::Input(modal)) => match modal.handle_key(key)? {
                Some(ModalResult::Confirmed(text)) => Some(ModalOutcome::Input(text)),
                Some(ModalResult::Cancelled) => Some(ModalOutcome::Dismissed),
                None => None,
            },
            Some(ActiveModal::Info(modal)) => match modal.handle_key(key)? {
                Some(_) => Some(ModalOutcome::Dismissed),
                None => None,
            },
            None => None,
        };

        let Some(outcome) = outcome else {
            return Ok(());
        };

        self.state.close_modal();
        match (self.state.take_pending_action(), outcome) {
            (Some(PendingAction::Quit), ModalOutcome::ConfirmYes) => {
                self.state.quit();
            }
            (Some(PendingAction::ResetAll), ModalOutcome::ConfirmYes) => {
                self.reset_all();
            }
            (Some(PendingAction::Download { index }), ModalOutcome::Input(target)) => {
                self.download(index, &target);
            }
            // Dismissed modals and dangling outcomes drop the action
            _ => {}
        }

        Ok(())
    }
}
