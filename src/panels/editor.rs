use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use super::Panel;
use crate::archive::{Archive, ArchiveEntry};
use crate::clipboard;
use crate::editor::{Cursor, TextBuffer, Viewport};
use crate::logger;
use crate::theme::Theme;
use crate::ui::panel_block;

/// Width reserved for line numbers: "  123 "
const LINE_NUMBER_WIDTH: u16 = 5;

/// Editable text region over the currently selected archive entry
pub struct EditorPanel {
    /// Text buffer with Rope
    buffer: TextBuffer,
    /// Cursor
    cursor: Cursor,
    /// Viewport for virtual scrolling
    viewport: Viewport,
    /// Read-only mode (editing disabled archive)
    read_only: bool,
    /// Path of the loaded entry
    path: String,
    /// Content changed since the last take_edited call
    edited: bool,
}

impl EditorPanel {
    /// Create an empty editor panel
    pub fn new(read_only: bool) -> Self {
        Self {
            buffer: TextBuffer::new(),
            cursor: Cursor::new(),
            viewport: Viewport::default(),
            read_only,
            path: String::new(),
            edited: false,
        }
    }

    /// Load an archive entry, replacing buffer, cursor and scroll state
    pub fn load_entry(&mut self, entry: &ArchiveEntry) {
        self.buffer = TextBuffer::from_str(&entry.content);
        self.cursor = Cursor::new();
        self.viewport = Viewport::new(self.viewport.width, self.viewport.height);
        self.path = entry.path.clone();
        self.edited = false;
    }

    /// Check if editor is read-only
    #[allow(dead_code)]
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Full buffer text when edits occurred since the last call
    pub fn take_edited(&mut self) -> Option<String> {
        if self.edited {
            self.edited = false;
            Some(self.buffer.text())
        } else {
            None
        }
    }

    /// Current buffer text
    #[allow(dead_code)]
    pub fn text(&self) -> String {
        self.buffer.text()
    }

    fn max_line(&self) -> usize {
        self.buffer.line_count().saturating_sub(1)
    }

    fn clamp_cursor_column(&mut self) {
        let max = self.buffer.line_len_graphemes(self.cursor.line);
        self.cursor.clamp_column(max);
    }

    fn move_cursor_up(&mut self) {
        self.cursor.move_up(1);
        self.clamp_cursor_column();
    }

    fn move_cursor_down(&mut self) {
        self.cursor.move_down(1, self.max_line());
        self.clamp_cursor_column();
    }

    fn move_cursor_left(&mut self) {
        if self.cursor.column > 0 {
            self.cursor.column -= 1;
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.column = self.buffer.line_len_graphemes(self.cursor.line);
        }
    }

    fn move_cursor_right(&mut self) {
        let line_len = self.buffer.line_len_graphemes(self.cursor.line);
        if self.cursor.column < line_len {
            self.cursor.column += 1;
        } else if self.cursor.line < self.max_line() {
            self.cursor.line += 1;
            self.cursor.column = 0;
        }
    }

    fn page_up(&mut self) {
        self.cursor.move_up(self.viewport.height.max(1));
        self.clamp_cursor_column();
    }

    fn page_down(&mut self) {
        self.cursor
            .move_down(self.viewport.height.max(1), self.max_line());
        self.clamp_cursor_column();
    }

    fn move_to_line_start(&mut self) {
        self.cursor.column = 0;
    }

    fn move_to_line_end(&mut self) {
        self.cursor.column = self.buffer.line_len_graphemes(self.cursor.line);
    }

    fn move_to_document_start(&mut self) {
        self.cursor = Cursor::new();
    }

    fn move_to_document_end(&mut self) {
        self.cursor.line = self.max_line();
        self.cursor.column = self.buffer.line_len_graphemes(self.cursor.line);
    }

    fn insert_str(&mut self, text: &str) -> Result<()> {
        self.cursor = self.buffer.insert(&self.cursor, text)?;
        self.edited = true;
        Ok(())
    }

    fn backspace(&mut self) -> Result<()> {
        if let Some(cursor) = self.buffer.backspace(&self.cursor)? {
            self.cursor = cursor;
            self.edited = true;
        }
        Ok(())
    }

    fn delete(&mut self) -> Result<()> {
        if self.buffer.delete_char(&self.cursor)? {
            self.edited = true;
        }
        Ok(())
    }

    /// Copy the cursor line to the system clipboard
    fn copy_line(&self) {
        if let Some(line) = self.buffer.line(self.cursor.line) {
            let line = line.trim_end_matches('\n').to_string();
            if let Err(e) = clipboard::copy(line) {
                logger::warn(format!("Clipboard copy failed: {}", e));
            }
        }
    }

    fn paste(&mut self) -> Result<()> {
        if let Some(text) = clipboard::paste() {
            self.insert_str(&text)?;
        }
        Ok(())
    }

    /// Render the text area into `inner` (shared with the detached view)
    pub fn render_content(
        &mut self,
        inner: Rect,
        buf: &mut Buffer,
        is_focused: bool,
        theme: &Theme,
    ) {
        let content_width = inner.width.saturating_sub(LINE_NUMBER_WIDTH) as usize;
        let content_height = inner.height as usize;
        if content_width == 0 || content_height == 0 {
            return;
        }

        self.viewport.resize(content_width, content_height);
        self.viewport
            .ensure_cursor_visible(&self.cursor, self.buffer.line_count());

        let text_style = Style::default().fg(theme.text_primary);
        let line_number_style = Style::default().fg(theme.text_secondary);
        let cursor_line_style = Style::default()
            .bg(theme.cursor_line_bg)
            .fg(theme.text_primary);

        for (row, line_idx) in (self.viewport.top_line..self.buffer.line_count())
            .enumerate()
            .take(content_height)
        {
            let is_cursor_line = line_idx == self.cursor.line;
            let style = if is_cursor_line {
                cursor_line_style
            } else {
                text_style
            };

            // Line number
            let line_num = format!("{:>4} ", line_idx + 1);
            for (i, ch) in line_num.chars().enumerate() {
                let x = inner.x + i as u16;
                let y = inner.y + row as u16;
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_char(ch);
                    cell.set_style(line_number_style);
                }
            }

            // Visible slice of the line
            let line_text = self.buffer.line(line_idx).unwrap_or_default();
            let line_text = line_text.trim_end_matches('\n');
            let visible: String = line_text
                .chars()
                .skip(self.viewport.left_column)
                .take(content_width)
                .collect();

            for (col, ch) in visible.chars().enumerate() {
                let x = inner.x + LINE_NUMBER_WIDTH + col as u16;
                let y = inner.y + row as u16;
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_char(ch);
                    cell.set_style(style);
                }
            }

            // Fill the rest of a cursor line with its background
            if is_cursor_line {
                for col in visible.chars().count()..content_width {
                    let x = inner.x + LINE_NUMBER_WIDTH + col as u16;
                    let y = inner.y + row as u16;
                    if let Some(cell) = buf.cell_mut((x, y)) {
                        cell.set_style(cursor_line_style);
                    }
                }
            }
        }

        // Draw the cursor as an inverted cell when the panel has focus
        if is_focused {
            if let Some((row, col)) = self.viewport.cursor_to_viewport_pos(&self.cursor) {
                let x = inner.x + LINE_NUMBER_WIDTH + col as u16;
                let y = inner.y + row as u16;
                if x < inner.x + inner.width && y < inner.y + inner.height {
                    if let Some(cell) = buf.cell_mut((x, y)) {
                        cell.set_style(
                            Style::default()
                                .bg(theme.text_primary)
                                .fg(theme.background)
                                .add_modifier(Modifier::BOLD),
                        );
                    }
                }
            }
        }
    }

    /// Handle an editor key (shared with the detached view)
    pub fn handle_editor_key(&mut self, key: KeyEvent) -> Result<()> {
        match (key.code, key.modifiers) {
            // Navigation
            (KeyCode::Up, KeyModifiers::NONE) => self.move_cursor_up(),
            (KeyCode::Down, KeyModifiers::NONE) => self.move_cursor_down(),
            (KeyCode::Left, KeyModifiers::NONE) => self.move_cursor_left(),
            (KeyCode::Right, KeyModifiers::NONE) => self.move_cursor_right(),
            (KeyCode::Home, KeyModifiers::NONE) => self.move_to_line_start(),
            (KeyCode::End, KeyModifiers::NONE) => self.move_to_line_end(),
            (KeyCode::PageUp, KeyModifiers::NONE) => self.page_up(),
            (KeyCode::PageDown, KeyModifiers::NONE) => self.page_down(),
            (KeyCode::Home, KeyModifiers::CONTROL) => self.move_to_document_start(),
            (KeyCode::End, KeyModifiers::CONTROL) => self.move_to_document_end(),

            // Clipboard
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => self.copy_line(),
            (KeyCode::Char('v'), KeyModifiers::CONTROL) => {
                if !self.read_only {
                    self.paste()?;
                }
            }

            // Editing (only if not read-only)
            (KeyCode::Char(ch), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                if !self.read_only {
                    self.insert_str(&ch.to_string())?;
                }
            }
            (KeyCode::Enter, KeyModifiers::NONE) => {
                if !self.read_only {
                    self.insert_str("\n")?;
                }
            }
            (KeyCode::Backspace, KeyModifiers::NONE) => {
                if !self.read_only {
                    self.backspace()?;
                }
            }
            (KeyCode::Delete, KeyModifiers::NONE) => {
                if !self.read_only {
                    self.delete()?;
                }
            }

            _ => {}
        }
        Ok(())
    }
}

impl Panel for EditorPanel {
    fn render(
        &mut self,
        area: Rect,
        buf: &mut Buffer,
        is_focused: bool,
        archive: &Archive,
        theme: &Theme,
    ) {
        let dirty = archive.current_entry().dirty;
        let title = if dirty {
            format!("{} *", self.title())
        } else {
            self.title()
        };
        let block = panel_block(&title, is_focused, theme);
        let inner = block.inner(area);
        block.render(area, buf);

        self.render_content(inner, buf, is_focused, theme);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        self.handle_editor_key(key)
    }

    fn title(&self) -> String {
        let mut title = if self.path.is_empty() {
            "Untitled".to_string()
        } else {
            self.path.clone()
        };
        if self.read_only {
            title.push_str(" [read-only]");
        }
        title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn entry(path: &str, content: &str) -> ArchiveEntry {
        let archive = Archive::new(vec![(path.to_string(), content.to_string())]);
        archive.current_entry().clone()
    }

    #[test]
    fn test_typing_reports_edits() {
        let mut panel = EditorPanel::new(false);
        panel.load_entry(&entry("a.conf", ""));

        assert!(panel.take_edited().is_none());
        panel.handle_editor_key(key(KeyCode::Char('h'))).unwrap();
        panel.handle_editor_key(key(KeyCode::Char('i'))).unwrap();

        assert_eq!(panel.take_edited().as_deref(), Some("hi"));
        assert!(panel.take_edited().is_none());
    }

    #[test]
    fn test_read_only_blocks_editing() {
        let mut panel = EditorPanel::new(true);
        panel.load_entry(&entry("a.conf", "locked"));

        panel.handle_editor_key(key(KeyCode::Char('x'))).unwrap();
        panel.handle_editor_key(key(KeyCode::Backspace)).unwrap();
        panel.handle_editor_key(key(KeyCode::Enter)).unwrap();

        assert!(panel.take_edited().is_none());
        assert_eq!(panel.text(), "locked");
    }

    #[test]
    fn test_cursor_clamps_on_vertical_move() {
        let mut panel = EditorPanel::new(false);
        panel.load_entry(&entry("a.conf", "long line here\nab"));

        panel.handle_editor_key(key(KeyCode::End)).unwrap();
        assert_eq!(panel.cursor.column, 14);

        panel.handle_editor_key(key(KeyCode::Down)).unwrap();
        assert_eq!(panel.cursor, Cursor::at(1, 2));
    }

    #[test]
    fn test_left_at_line_start_joins_previous() {
        let mut panel = EditorPanel::new(false);
        panel.load_entry(&entry("a.conf", "ab\ncd"));

        panel.handle_editor_key(key(KeyCode::Down)).unwrap();
        panel.handle_editor_key(key(KeyCode::Home)).unwrap();
        panel.handle_editor_key(key(KeyCode::Left)).unwrap();
        assert_eq!(panel.cursor, Cursor::at(0, 2));
    }

    #[test]
    fn test_load_entry_resets_state() {
        let mut panel = EditorPanel::new(false);
        panel.load_entry(&entry("a.conf", "first"));
        panel.handle_editor_key(key(KeyCode::End)).unwrap();
        panel.handle_editor_key(key(KeyCode::Char('!'))).unwrap();
        assert!(panel.take_edited().is_some());

        panel.load_entry(&entry("b.conf", "second"));
        assert_eq!(panel.text(), "second");
        assert_eq!(panel.cursor, Cursor::at(0, 0));
        assert!(panel.take_edited().is_none());
    }

    #[test]
    fn test_title_shows_read_only() {
        let mut panel = EditorPanel::new(true);
        panel.load_entry(&entry("a.conf", ""));
        assert_eq!(panel.title(), "a.conf [read-only]");
    }
}
