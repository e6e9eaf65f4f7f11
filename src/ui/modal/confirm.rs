use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use super::{centered_rect_with_size, Modal, ModalResult};
use crate::theme::Theme;

/// Confirmation modal window (Yes/No)
#[derive(Debug)]
pub struct ConfirmModal {
    title: String,
    message: String,
    selected: bool, // true = Yes, false = No
}

impl ConfirmModal {
    /// Create a new confirmation modal window
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            selected: false, // Default is No for destructive confirmations
        }
    }

    /// Calculate dynamic modal width based on content
    fn calculate_modal_width(&self, screen_width: u16) -> u16 {
        let title_width = self.title.len() as u16 + 2;

        let message_max_line_width = self
            .message
            .lines()
            .map(|line| line.len())
            .max()
            .unwrap_or(0) as u16;

        // "[ Yes ]    [ No ]" = 17 characters
        let buttons_width = 17;

        let content_width = title_width.max(message_max_line_width).max(buttons_width);

        // Border plus inner padding
        let total_width = content_width + 6;

        let max_width = (screen_width as f32 * 0.75) as u16;
        total_width.max(20).min(max_width).min(screen_width)
    }
}

impl Modal for ConfirmModal {
    type Result = bool;

    fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let message_lines = self.message.lines().count().max(1);
        let modal_height = (message_lines + 6) as u16;
        let modal_width = self.calculate_modal_width(area.width);
        let modal_area = centered_rect_with_size(modal_width, modal_height, area);

        Clear.render(modal_area, buf);

        // Inverted colors relative to the main surface
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
                Constraint::Length(1),                    // Empty line at top
                Constraint::Length(message_lines as u16), // Message
                Constraint::Length(1),                    // Empty line
                Constraint::Length(1),                    // Buttons
                Constraint::Length(1),                    // Empty line at bottom
            ])
            .split(inner);

        let message = Paragraph::new(self.message.clone())
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.background));
        message.render(chunks[1], buf);

        let yes_style = if self.selected {
            Style::default()
                .fg(theme.text_primary)
                .bg(theme.accent_primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.accent_primary)
        };

        let no_style = if !self.selected {
            Style::default()
                .fg(theme.text_primary)
                .bg(theme.accent_primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.accent_primary)
        };

        let buttons = Line::from(vec![
            Span::styled("[ Yes ]", yes_style),
            Span::raw("    "),
            Span::styled("[ No ]", no_style),
        ]);

        let buttons_paragraph = Paragraph::new(buttons).alignment(Alignment::Center);
        buttons_paragraph.render(chunks[3], buf);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<Option<ModalResult<Self::Result>>> {
        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                self.selected = !self.selected;
                Ok(None)
            }
            KeyCode::Enter => Ok(Some(ModalResult::Confirmed(self.selected))),
            KeyCode::Esc => Ok(Some(ModalResult::Cancelled)),
            KeyCode::Char('y') | KeyCode::Char('Y') => Ok(Some(ModalResult::Confirmed(true))),
            KeyCode::Char('n') | KeyCode::Char('N') => Ok(Some(ModalResult::Confirmed(false))),
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
    fn test_defaults_to_no() {
        let mut modal = ConfirmModal::new("Quit", "Unsaved changes");
        let result = modal.handle_key(key(KeyCode::Enter)).unwrap();
        assert!(matches!(result, Some(ModalResult::Confirmed(false))));
    }

    #[test]
    fn test_y_confirms() {
        let mut modal = ConfirmModal::new("Quit", "Unsaved changes");
        let result = modal.handle_key(key(KeyCode::Char('y'))).unwrap();
        assert!(matches!(result, Some(ModalResult::Confirmed(true))));
    }

    #[test]
    fn test_esc_cancels() {
        let mut modal = ConfirmModal::new("Quit", "Unsaved changes");
        let result = modal.handle_key(key(KeyCode::Esc)).unwrap();
        assert!(matches!(result, Some(ModalResult::Cancelled)));
    }

    #[test]
    fn test_tab_toggles_selection() {
        let mut modal = ConfirmModal::new("Quit", "Unsaved changes");
        modal.handle_key(key(KeyCode::Tab)).unwrap();
        let result = modal.handle_key(key(KeyCode::Enter)).unwrap();
        assert!(matches!(result, Some(ModalResult::Confirmed(true))));
    }
}
