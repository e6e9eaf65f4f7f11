use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};
use std::sync::mpsc::Sender;

use super::{EditorPanel, Panel};
use crate::archive::ArchiveEntry;
use crate::logger;
use crate::mirror::EditEvent;
use crate::theme::Theme;
use crate::ui::panel_block;

/// Full-size secondary editing surface over one archive entry.
///
/// Owns no reference to the primary state: every edit is published as
/// an EditEvent and applied to the archive by the application loop.
pub struct DetachedPanel {
    /// Archive entry index this surface edits
    index: usize,
    /// Inner editing surface
    surface: EditorPanel,
    /// Edit event channel into the primary state
    tx: Sender<EditEvent>,
}

impl DetachedPanel {
    /// Open a detached surface over the given entry
    pub fn open(
        index: usize,
        entry: &ArchiveEntry,
        read_only: bool,
        tx: Sender<EditEvent>,
    ) -> Self {
        let mut surface = EditorPanel::new(read_only);
        surface.load_entry(entry);
        Self { index, surface, tx }
    }

    /// Render over the full area
    pub fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let title = format!("{} (detached view, Esc closes)", self.surface.title());
        let block = panel_block(&title, true, theme);
        let inner = block.inner(area);
        block.render(area, buf);

        self.surface.render_content(inner, buf, true, theme);
    }

    /// Handle a key and mirror any resulting edit into the channel
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        self.surface.handle_editor_key(key)?;

        if let Some(content) = self.surface.take_edited() {
            if self
                .tx
                .send(EditEvent {
                    index: self.index,
                    content,
                })
                .is_err()
            {
                logger::error("Detached view channel closed; edit dropped");
            }
        }
        Ok(())
    }
}
