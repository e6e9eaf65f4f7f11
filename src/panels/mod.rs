use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{buffer::Buffer, layout::Rect};

use crate::archive::Archive;
use crate::theme::Theme;

pub mod detached;
pub mod editor;
pub mod file_list;

pub use detached::DetachedPanel;
pub use editor::EditorPanel;
pub use file_list::FileListPanel;

/// Trait for the primary layout panels
pub trait Panel {
    /// Render the panel
    fn render(
        &mut self,
        area: Rect,
        buf: &mut Buffer,
        is_focused: bool,
        archive: &Archive,
        theme: &Theme,
    );

    /// Handle keyboard event
    fn handle_key(&mut self, key: KeyEvent) -> Result<()>;

    /// Get panel title (can be dynamic)
    fn title(&self) -> String;
}
