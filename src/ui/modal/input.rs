use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use super::{centered_rect_with_size, Modal, ModalResult};
use crate::theme::Theme;

/// Text input modal window
#[derive(Debug)]
pub struct InputModal {
    title: String,
    prompt: String,
    input: String,
    cursor_pos: usize, // in characters
}

impl InputModal {
    /// Create a new input modal window
    #[allow(dead_code)]
    pub fn new(title: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            prompt: prompt.into(),
            input: String::new(),
            cursor_pos: 0,
        }
    }

    /// Create with default value
    pub fn with_default(
        title: impl Into<String>,
        prompt: impl Into<String>,
        default: impl Into<String>,
    ) -> Self {
        let default = default.into();
        let cursor_pos = default.chars().count();
        Self {
            title: title.into(),
            prompt: prompt.into(),
            input: default,
            cursor_pos,
        }
    }

    /// Calculate dynamic modal width based on content
    fn calculate_modal_width(&self, screen_width: u16) -> u16 {
        let title_width = self.title.len() as u16 + 2;
        let prompt_width = self
            .prompt
            .lines()
            .map(|line| line.len())
            .max()
            .unwrap_or(0) as u16;
        let input_width = self.input.chars().count() as u16 + 20;

        let content_width = title_width.max(prompt_width).max(input_width);

        // Outer border, input border and padding
        let total_width = content_width + 8;

        let max_width = (screen_width as f32 * 0.75) as u16;
        total_width.max(30).min(max_width).min(screen_width)
    }

    fn byte_pos(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }
}

impl Modal for InputModal {
    type Result = String;

    fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let prompt_lines = self.prompt.lines().count().max(1) as u16;
        let modal_height = prompt_lines + 7;
        let modal_width = self.calculate_modal_width(area.width);
        let modal_area = centered_rect_with_size(modal_width, modal_height, area);

        Clear.render(modal_area, buf);

        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default()
                    .fg(theme.background)
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.background))
            .style(Style::default().bg(theme.text_primary));

        let inner = block.inner(modal_area);
        block.render(modal_area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(prompt_lines), // Prompt
                Constraint::Length(3),            // Input field with border
                Constraint::Length(1),            // Empty line
                Constraint::Length(1),            // Hint
            ])
            .split(inner);

        let prompt = Paragraph::new(self.prompt.clone())
            .alignment(Alignment::Left)
            .style(Style::default().fg(theme.background));
        prompt.render(chunks[0], buf);

        // Input field with a visible pseudo-cursor
        let (before, after) = self.input.split_at(self.byte_pos());
        let shown = format!("{}\u{2588}{}", before, after);
        let input_field = Paragraph::new(shown)
            .style(Style::default().fg(theme.background))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.background)),
            );
        input_field.render(chunks[1], buf);

        let hint = Paragraph::new("Enter: confirm    Esc: cancel")
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.accent_secondary));
        hint.render(chunks[3], buf);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<Option<ModalResult<Self::Result>>> {
        match key.code {
            KeyCode::Enter => {
                if self.input.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(ModalResult::Confirmed(self.input.clone())))
                }
            }
            KeyCode::Esc => Ok(Some(ModalResult::Cancelled)),
            KeyCode::Char(ch) => {
                let pos = self.byte_pos();
                self.input.insert(pos, ch);
                self.cursor_pos += 1;
                Ok(None)
            }
            KeyCode::Backspace => {
                if self.cursor_pos > 0 {
                    self.cursor_pos -= 1;
                    let pos = self.byte_pos();
                    self.input.remove(pos);
                }
                Ok(None)
            }
            KeyCode::Delete => {
                if self.cursor_pos < self.input.chars().count() {
                    let pos = self.byte_pos();
                    self.input.remove(pos);
                }
                Ok(None)
            }
            KeyCode::Left => {
                self.cursor_pos = self.cursor_pos.saturating_sub(1);
                Ok(None)
            }
            KeyCode::Right => {
                if self.cursor_pos < self.input.chars().count() {
                    self.cursor_pos += 1;
                }
                Ok(None)
            }
            KeyCode::Home => {
                self.cursor_pos = 0;
                Ok(None)
            }
            KeyCode::End => {
                self.cursor_pos = self.input.chars().count();
                Ok(None)
            }
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_and_confirm() {
        let mut modal = InputModal::new("Download", "Target path:");
        for ch in "out.txt".chars() {
            modal.handle_key(key(KeyCode::Char(ch))).unwrap();
        }
        let result = modal.handle_key(key(KeyCode::Enter)).unwrap();
        match result {
            Some(ModalResult::Confirmed(text)) => assert_eq!(text, "out.txt"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_empty_input_does_not_confirm() {
        let mut modal = InputModal::new("Download", "Target path:");
        let result = modal.handle_key(key(KeyCode::Enter)).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_backspace_edits_default() {
        let mut modal = InputModal::with_default("Download", "Target path:", "a.txt");
        modal.handle_key(key(KeyCode::Backspace)).unwrap();
        modal.handle_key(key(KeyCode::Backspace)).unwrap();
        modal.handle_key(key(KeyCode::Backspace)).unwrap();
        modal.handle_key(key(KeyCode::Backspace)).unwrap();
        let result = modal.handle_key(key(KeyCode::Enter)).unwrap();
        match result {
            Some(ModalResult::Confirmed(text)) => assert_eq!(text, "a"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_cursor_movement_inserts_in_middle() {
        let mut modal = InputModal::with_default("Download", "Target path:", "ac");
        modal.handle_key(key(KeyCode::Left)).unwrap();
        modal.handle_key(key(KeyCode::Char('b'))).unwrap();
        let result = modal.handle_key(key(KeyCode::Enter)).unwrap();
        match result {
            Some(ModalResult::Confirmed(text)) => assert_eq!(text, "abc"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
