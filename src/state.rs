use crate::config::Config;
use crate::theme::Theme;
use crate::ui::modal::{ConfirmModal, InfoModal, InputModal};

/// Which panel receives keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// File list panel
    FileList,
    /// Editor panel
    Editor,
}

/// Active modal window
#[derive(Debug)]
pub enum ActiveModal {
    /// Confirmation modal
    Confirm(Box<ConfirmModal>),
    /// Text input modal
    Input(Box<InputModal>),
    /// Information modal
    Info(Box<InfoModal>),
}

/// Action pending modal result
#[derive(Debug, Clone)]
pub enum PendingAction {
    /// Quit after confirming unsaved changes are discarded
    Quit,
    /// Discard every edit and re-initialize from pristine copies
    ResetAll,
    /// Export the entry at `index` to the path entered in the modal
    Download { index: usize },
}

/// UI components state
#[derive(Debug, Default)]
pub struct UiState {
    /// Status line message (for displaying errors and notifications)
    pub status_message: Option<(String, bool)>, // (message, is_error)
    /// Remaining ticks before the status message is cleared
    pub status_ticks: u32,
}

/// Terminal state (dimensions)
#[derive(Debug, Clone, Copy)]
pub struct TerminalState {
    /// Terminal width
    pub width: u16,
    /// Terminal height
    pub height: u16,
}

impl Default for TerminalState {
    fn default() -> Self {
        Self {
            width: 80,
            height: 24,
        }
    }
}

/// Global application state
#[derive(Debug)]
pub struct AppState {
    /// Should application quit
    pub should_quit: bool,
    /// Panel receiving keyboard input
    pub focus: Focus,
    /// UI components state
    pub ui: UiState,
    /// Terminal state
    pub terminal: TerminalState,
    /// Active modal window
    pub active_modal: Option<ActiveModal>,
    /// Action pending modal result
    pub pending_action: Option<PendingAction>,
    /// Current theme
    pub theme: &'static Theme,
    /// Application configuration
    pub config: Config,
}

impl AppState {
    /// Create new application state with the given config
    pub fn with_config(config: Config) -> Self {
        let theme = Theme::get_by_name(&config.theme);
        Self {
            should_quit: false,
            focus: Focus::FileList,
            ui: UiState::default(),
            terminal: TerminalState::default(),
            active_modal: None,
            pending_action: None,
            theme,
            config,
        }
    }

    /// Request application quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Switch keyboard focus between the file list and the editor
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::FileList => Focus::Editor,
            Focus::Editor => Focus::FileList,
        };
    }

    /// Update terminal dimensions
    pub fn update_terminal_size(&mut self, width: u16, height: u16) {
        self.terminal.width = width;
        self.terminal.height = height;
    }

    /// Close modal window
    pub fn close_modal(&mut self) {
        self.active_modal = None;
    }

    /// Check if modal window is open
    pub fn has_modal(&self) -> bool {
        self.active_modal.is_some()
    }

    /// Get mutable reference to active modal window
    pub fn get_active_modal_mut(&mut self) -> Option<&mut ActiveModal> {
        self.active_modal.as_mut()
    }

    /// Set pending action and open modal window
    pub fn set_pending_action(&mut self, action: PendingAction, modal: ActiveModal) {
        self.pending_action = Some(action);
        self.active_modal = Some(modal);
    }

    /// Take pending action (take ownership)
    pub fn take_pending_action(&mut self) -> Option<PendingAction> {
        self.pending_action.take()
    }

    /// Set error message
    pub fn set_error(&mut self, message: String) {
        self.ui.status_message = Some((message, true));
        self.ui.status_ticks = crate::constants::STATUS_MESSAGE_TICKS;
    }

    /// Set informational message
    pub fn set_info(&mut self, message: String) {
        self.ui.status_message = Some((message, false));
        self.ui.status_ticks = crate::constants::STATUS_MESSAGE_TICKS;
    }

    /// Age the status message on tick; clears it after the timeout
    pub fn on_tick(&mut self) {
        if self.ui.status_message.is_some() {
            self.ui.status_ticks = self.ui.status_ticks.saturating_sub(1);
            if self.ui.status_ticks == 0 {
                self.ui.status_message = None;
            }
        }
    }
}
