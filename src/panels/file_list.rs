use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use super::Panel;
use crate::archive::Archive;
use crate::theme::Theme;
use crate::ui::panel_block;

/// File list panel: one row per archive entry with a dirty marker,
/// an undo affordance and a selection highlight
pub struct FileListPanel {
    /// Highlighted row (list cursor)
    cursor: usize,
    /// First visible row
    scroll_offset: usize,
    /// Number of entries, synced from the archive
    entry_count: usize,
    /// Row the user asked to open in the editor
    select_request: Option<usize>,
    /// Row the user asked to revert to its pristine copy
    reset_request: Option<usize>,
}

impl FileListPanel {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            scroll_offset: 0,
            entry_count: 0,
            select_request: None,
            reset_request: None,
        }
    }

    /// Sync row count and clamp the cursor after archive changes
    pub fn sync(&mut self, archive: &Archive) {
        self.entry_count = archive.len();
        if self.cursor >= self.entry_count {
            self.cursor = self.entry_count.saturating_sub(1);
        }
    }

    /// Move the list cursor onto the given row
    pub fn set_cursor(&mut self, index: usize) {
        if index < self.entry_count {
            self.cursor = index;
        }
    }

    /// Take the row the user asked to open (if any)
    pub fn take_select_request(&mut self) -> Option<usize> {
        self.select_request.take()
    }

    /// Take the row the user asked to revert (if any)
    pub fn take_reset_request(&mut self) -> Option<usize> {
        self.reset_request.take()
    }

    /// Keep the cursor row inside the visible window
    fn update_scroll(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + height {
            self.scroll_offset = self.cursor + 1 - height;
        }
    }

    /// Truncate a path from the left so the tail stays visible
    fn truncate_path(path: &str, max_width: usize) -> String {
        if path.width() <= max_width {
            return path.to_string();
        }
        let ellipsis = "…";
        let keep = max_width.saturating_sub(1);
        let tail: String = path
            .chars()
            .rev()
            .take(keep)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("{}{}", ellipsis, tail)
    }
}

impl Default for FileListPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for FileListPanel {
    fn render(
        &mut self,
        area: Rect,
        buf: &mut Buffer,
        is_focused: bool,
        archive: &Archive,
        theme: &Theme,
    ) {
        self.sync(archive);

        let block = panel_block(&self.title(), is_focused, theme);
        let inner = block.inner(area);
        block.render(area, buf);

        let height = inner.height as usize;
        let width = inner.width as usize;
        self.update_scroll(height);

        const UNDO_HINT: &str = " undo";

        let mut lines = Vec::new();
        for (i, entry) in archive.entries().enumerate() {
            if i < self.scroll_offset || i >= self.scroll_offset + height {
                continue;
            }

            let is_cursor = i == self.cursor && is_focused;
            let is_current = i == archive.current_index();

            let marker = if entry.dirty { "*" } else { " " };
            let hint_width = if entry.dirty { UNDO_HINT.width() } else { 0 };
            let path_width = width.saturating_sub(2 + hint_width);
            let path = Self::truncate_path(&entry.path, path_width);
            let padding = " ".repeat(path_width.saturating_sub(path.width()));

            let (row_style, path_style) = if is_cursor {
                let bg = Style::default()
                    .bg(theme.selection_bg)
                    .fg(theme.selection_fg)
                    .add_modifier(Modifier::BOLD);
                (bg, bg)
            } else if is_current {
                (
                    Style::default(),
                    Style::default()
                        .fg(theme.accent_primary)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                (Style::default(), Style::default().fg(theme.text_primary))
            };

            let marker_style = if is_cursor {
                row_style
            } else {
                Style::default().fg(theme.dirty_marker)
            };

            let mut spans = vec![
                Span::styled(marker.to_string(), marker_style),
                Span::styled(" ", row_style),
                Span::styled(path, path_style),
                Span::styled(padding, row_style),
            ];
            if entry.dirty {
                spans.push(Span::styled(
                    UNDO_HINT,
                    Style::default().fg(theme.text_secondary),
                ));
            }
            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).render(inner, buf);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Up => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.cursor + 1 < self.entry_count {
                    self.cursor += 1;
                }
            }
            KeyCode::Home => {
                self.cursor = 0;
            }
            KeyCode::End => {
                self.cursor = self.entry_count.saturating_sub(1);
            }
            KeyCode::Enter => {
                self.select_request = Some(self.cursor);
            }
            KeyCode::Char('u') => {
                self.reset_request = Some(self.cursor);
            }
            _ => {}
        }
        Ok(())
    }

    fn title(&self) -> String {
        format!("Files ({})", self.entry_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn panel_with_entries(count: usize) -> FileListPanel {
        let pairs = (0..count)
            .map(|i| (format!("file{}.conf", i), String::new()))
            .collect();
        let archive = Archive::new(pairs);
        let mut panel = FileListPanel::new();
        panel.sync(&archive);
        panel
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut panel = panel_with_entries(3);

        panel.handle_key(key(KeyCode::Up)).unwrap();
        assert_eq!(panel.cursor, 0);

        for _ in 0..10 {
            panel.handle_key(key(KeyCode::Down)).unwrap();
        }
        assert_eq!(panel.cursor, 2);
    }

    #[test]
    fn test_enter_requests_selection() {
        let mut panel = panel_with_entries(3);
        panel.handle_key(key(KeyCode::Down)).unwrap();
        panel.handle_key(key(KeyCode::Enter)).unwrap();

        assert_eq!(panel.take_select_request(), Some(1));
        assert_eq!(panel.take_select_request(), None);
    }

    #[test]
    fn test_u_requests_reset() {
        let mut panel = panel_with_entries(2);
        panel.handle_key(key(KeyCode::Char('u'))).unwrap();

        assert_eq!(panel.take_reset_request(), Some(0));
        assert_eq!(panel.take_reset_request(), None);
    }

    #[test]
    fn test_sync_clamps_cursor() {
        let mut panel = panel_with_entries(5);
        panel.handle_key(key(KeyCode::End)).unwrap();
        assert_eq!(panel.cursor, 4);

        let smaller = Archive::new(vec![("only.conf".to_string(), String::new())]);
        panel.sync(&smaller);
        assert_eq!(panel.cursor, 0);
    }

    #[test]
    fn test_truncate_path_keeps_tail() {
        let truncated = FileListPanel::truncate_path("/etc/app/conf.d/server.conf", 12);
        assert!(truncated.starts_with('…'));
        assert!(truncated.ends_with("server.conf"));
    }
}
