use anyhow::Result;
use ropey::Rope;
use unicode_segmentation::UnicodeSegmentation;

use super::Cursor;

/// Text buffer based on Rope for efficient work with large contents
#[derive(Debug, Clone)]
pub struct TextBuffer {
    /// Rope structure for storing text
    rope: Rope,
}

impl TextBuffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Create buffer from existing text
    pub fn from_str(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Get line count
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get line by index
    pub fn line(&self, index: usize) -> Option<String> {
        if index < self.line_count() {
            Some(self.rope.line(index).to_string())
        } else {
            None
        }
    }

    /// Get line length in graphemes (without newline character)
    pub fn line_len_graphemes(&self, line_idx: usize) -> usize {
        if let Some(line) = self.line(line_idx) {
            line.trim_end_matches('\n').graphemes(true).count()
        } else {
            0
        }
    }

    /// Get all text
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Insert text at cursor position
    pub fn insert(&mut self, cursor: &Cursor, text: &str) -> Result<Cursor> {
        let char_idx = self.cursor_to_char_idx(cursor)?;
        self.rope.insert(char_idx, text);

        let new_cursor = self.advance_cursor(cursor, text);
        Ok(new_cursor)
    }

    /// Delete character at cursor position (delete)
    pub fn delete_char(&mut self, cursor: &Cursor) -> Result<bool> {
        let char_idx = self.cursor_to_char_idx(cursor)?;

        if char_idx >= self.rope.len_chars() {
            return Ok(false);
        }

        self.rope.remove(char_idx..char_idx + 1);
        Ok(true)
    }

    /// Delete character before cursor (backspace)
    /// Returns the new cursor position, or None at document start
    pub fn backspace(&mut self, cursor: &Cursor) -> Result<Option<Cursor>> {
        if cursor.line == 0 && cursor.column == 0 {
            return Ok(None);
        }

        let char_idx = self.cursor_to_char_idx(cursor)?;

        if char_idx == 0 {
            return Ok(None);
        }

        let new_cursor = if cursor.column > 0 {
            Cursor::at(cursor.line, cursor.column - 1)
        } else {
            // Move to previous line
            let prev_line_len = self.line_len_graphemes(cursor.line - 1);
            Cursor::at(cursor.line - 1, prev_line_len)
        };

        self.rope.remove(char_idx - 1..char_idx);
        Ok(Some(new_cursor))
    }

    /// Convert cursor position to character index in Rope
    fn cursor_to_char_idx(&self, cursor: &Cursor) -> Result<usize> {
        if cursor.line >= self.line_count() {
            anyhow::bail!("Line {} out of range", cursor.line);
        }

        let line_start = self.rope.line_to_char(cursor.line);
        let line = self.rope.line(cursor.line);
        let line_str = line.to_string();

        // Byte position of the cursor column counted in graphemes
        let mut grapheme_count = 0;
        let mut byte_pos = 0;

        for grapheme in line_str.graphemes(true) {
            if grapheme_count >= cursor.column {
                break;
            }
            byte_pos += grapheme.len();
            grapheme_count += 1;
        }

        let char_offset = line_str[..byte_pos].chars().count();
        Ok(line_start + char_offset)
    }

    /// Advance cursor after text insertion
    fn advance_cursor(&self, cursor: &Cursor, text: &str) -> Cursor {
        let lines: Vec<&str> = text.lines().collect();

        if lines.is_empty() || (lines.len() == 1 && text.ends_with('\n')) {
            // Only newline
            Cursor::at(cursor.line + 1, 0)
        } else if lines.len() == 1 {
            // Single line without newline
            let graphemes = text.graphemes(true).count();
            Cursor::at(cursor.line, cursor.column + graphemes)
        } else {
            // Multiple lines
            let last_line = lines.last().unwrap();
            let last_line_len = last_line.graphemes(true).count();
            Cursor::at(cursor.line + lines.len() - 1, last_line_len)
        }
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_buffer() {
        let buf = TextBuffer::new();
        assert_eq!(buf.line_count(), 1); // Rope always has at least 1 line
        assert_eq!(buf.text(), "");
    }

    #[test]
    fn test_from_str_preserves_text() {
        let buf = TextBuffer::from_str("key = value\nother = 1\n");
        assert_eq!(buf.text(), "key = value\nother = 1\n");
        assert_eq!(buf.line_count(), 3);
    }

    #[test]
    fn test_insert_single_char() {
        let mut buf = TextBuffer::new();
        let cursor = Cursor::at(0, 0);

        let new_cursor = buf.insert(&cursor, "a").unwrap();
        assert_eq!(new_cursor, Cursor::at(0, 1));
        assert_eq!(buf.text(), "a");
    }

    #[test]
    fn test_insert_newline() {
        let mut buf = TextBuffer::new();
        let cursor = Cursor::at(0, 0);

        let new_cursor = buf.insert(&cursor, "hello\nworld").unwrap();
        assert_eq!(new_cursor, Cursor::at(1, 5));
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line(0).unwrap(), "hello\n");
        assert_eq!(buf.line(1).unwrap(), "world");
    }

    #[test]
    fn test_backspace() {
        let mut buf = TextBuffer::from_str("hello");

        let cursor = Cursor::at(0, 5);
        let new_cursor = buf.backspace(&cursor).unwrap().unwrap();

        assert_eq!(new_cursor, Cursor::at(0, 4));
        assert_eq!(buf.text(), "hell");
    }

    #[test]
    fn test_backspace_joins_lines() {
        let mut buf = TextBuffer::from_str("ab\ncd");

        let cursor = Cursor::at(1, 0);
        let new_cursor = buf.backspace(&cursor).unwrap().unwrap();

        assert_eq!(new_cursor, Cursor::at(0, 2));
        assert_eq!(buf.text(), "abcd");
    }

    #[test]
    fn test_backspace_at_start_is_none() {
        let mut buf = TextBuffer::from_str("hello");
        assert!(buf.backspace(&Cursor::at(0, 0)).unwrap().is_none());
        assert_eq!(buf.text(), "hello");
    }

    #[test]
    fn test_delete_char() {
        let mut buf = TextBuffer::from_str("hello");

        let cursor = Cursor::at(0, 0);
        let deleted = buf.delete_char(&cursor).unwrap();

        assert!(deleted);
        assert_eq!(buf.text(), "ello");
    }

    #[test]
    fn test_delete_at_end_is_noop() {
        let mut buf = TextBuffer::from_str("hi");
        let deleted = buf.delete_char(&Cursor::at(0, 2)).unwrap();
        assert!(!deleted);
        assert_eq!(buf.text(), "hi");
    }

    #[test]
    fn test_unicode_handling() {
        let mut buf = TextBuffer::new();
        buf.insert(&Cursor::at(0, 0), "héllo").unwrap();

        assert_eq!(buf.line_len_graphemes(0), 5);

        let cursor = Cursor::at(0, 3);
        let char_idx = buf.cursor_to_char_idx(&cursor).unwrap();
        assert_eq!(char_idx, 3);
    }
}
