use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
};

use crate::theme::Theme;

pub mod confirm;
pub mod info;
pub mod input;

pub use confirm::ConfirmModal;
pub use info::InfoModal;
pub use input::InputModal;

/// Modal window result
#[derive(Debug, Clone)]
pub enum ModalResult<T> {
    /// User confirmed the action with a result
    Confirmed(T),
    /// User cancelled the action
    Cancelled,
}

/// Trait for all modal windows
pub trait Modal {
    /// Modal window result type
    type Result;

    /// Render the modal window
    fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme);

    /// Handle keyboard event
    /// Returns Some(result) if the modal window should close
    fn handle_key(&mut self, key: KeyEvent) -> Result<Option<ModalResult<Self::Result>>>;
}

/// Create a centered rectangle with fixed size
pub(super) fn centered_rect_with_size(width: u16, height: u16, r: Rect) -> Rect {
    let horizontal_margin = r.width.saturating_sub(width) / 2;
    let vertical_margin = r.height.saturating_sub(height) / 2;

    let vertical_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(vertical_margin),
            Constraint::Length(height),
            Constraint::Length(vertical_margin),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(horizontal_margin),
            Constraint::Length(width),
            Constraint::Length(horizontal_margin),
        ])
        .split(vertical_layout[1])[1]
}
