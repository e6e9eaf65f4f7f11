use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders},
    Frame,
};

pub mod modal;
mod status_bar;

pub use status_bar::{StatusBar, StatusBarParams};

use crate::archive::Archive;
use crate::panels::{DetachedPanel, EditorPanel, FileListPanel, Panel};
use crate::state::{ActiveModal, AppState, Focus};
use crate::theme::Theme;
use modal::Modal;

/// Create a bordered block for a panel, accented when focused
pub fn panel_block<'a>(title: &str, is_focused: bool, theme: &Theme) -> Block<'a> {
    let title_style = if is_focused {
        Style::default()
            .fg(theme.accent_primary)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.accent_secondary)
    };

    Block::default()
        .borders(Borders::ALL)
        .border_style(title_style)
        .title(Span::styled(format!(" {} ", title), title_style))
}

/// Render one frame of the application
pub fn render(
    frame: &mut Frame,
    state: &mut AppState,
    archive: &Archive,
    file_list: &mut FileListPanel,
    editor: &mut EditorPanel,
    detached: Option<&mut DetachedPanel>,
) {
    let size = frame.area();

    // Set application background
    let background = Block::default().style(Style::default().bg(state.theme.background));
    frame.render_widget(background, size);

    // Split screen into main area and status bar (1 line)
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Main area
            Constraint::Length(1), // Status bar
        ])
        .split(size);

    if let Some(detached) = detached {
        // Detached view takes the whole main area
        detached.render(main_chunks[0], frame.buffer_mut(), state.theme);
    } else {
        let panel_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(crate::constants::FILE_LIST_WIDTH),
                Constraint::Min(0),
            ])
            .split(main_chunks[0]);

        file_list.render(
            panel_chunks[0],
            frame.buffer_mut(),
            state.focus == Focus::FileList && !state.has_modal(),
            archive,
            state.theme,
        );
        editor.render(
            panel_chunks[1],
            frame.buffer_mut(),
            state.focus == Focus::Editor && !state.has_modal(),
            archive,
            state.theme,
        );
    }

    // Render status bar
    let params = StatusBarParams {
        theme: state.theme,
        status_message: state.ui.status_message.as_ref(),
        terminal_width: state.terminal.width,
        terminal_height: state.terminal.height,
    };
    StatusBar::render(frame.buffer_mut(), main_chunks[1], &params, archive);

    // Render active modal window if it's open
    let theme = state.theme;
    if let Some(active) = state.get_active_modal_mut() {
        let area = frame.area();
        match active {
            ActiveModal::Confirm(m) => m.render(area, frame.buffer_mut(), theme),
            ActiveModal::Input(m) => m.render(area, frame.buffer_mut(), theme),
            ActiveModal::Info(m) => m.render(area, frame.buffer_mut(), theme),
        }
    }
}
