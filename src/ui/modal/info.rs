use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use super::{centered_rect_with_size, Modal, ModalResult};
use crate::theme::Theme;

/// Information modal window (message + OK)
#[derive(Debug)]
pub struct InfoModal {
    title: String,
    message: String,
}

impl InfoModal {
    /// Create a new information modal window
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    fn calculate_modal_width(&self, screen_width: u16) -> u16 {
        let title_width = self.title.len() as u16 + 2;
        let message_width = self
            .message
            .lines()
            .map(|line| line.len())
            .max()
            .unwrap_or(0) as u16;

        let content_width = title_width.max(message_width).max(8);
        let total_width = content_width + 6;

        let max_width = (screen_width as f32 * 0.75) as u16;
        total_width.max(24).min(max_width).min(screen_width)
    }
}

impl Modal for InfoModal {
    type Result = ();

    fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let modal_width = self.calculate_modal_width(area.width);
        // Long lines wrap inside the paragraph; account for that in height
        let inner_width = modal_width.saturating_sub(6).max(1) as usize;
        let message_lines: usize = self
            .message
            .lines()
            .map(|line| line.len().div_ceil(inner_width).max(1))
            .sum::<usize>()
            .max(1);
        let modal_height = ((message_lines + 6) as u16).min(area.height);
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
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(inner);

        let message = Paragraph::new(self.message.clone())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .style(Style::default().fg(theme.background));
        message.render(chunks[1], buf);

        let ok = Paragraph::new(Span::styled(
            "[ OK ]",
            Style::default()
                .fg(theme.text_primary)
                .bg(theme.accent_primary)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center);
        ok.render(chunks[3], buf);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<Option<ModalResult<Self::Result>>> {
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => {
                Ok(Some(ModalResult::Confirmed(())))
            }
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_any_close_key_dismisses() {
        for code in [KeyCode::Enter, KeyCode::Esc, KeyCode::Char(' ')] {
            let mut modal = InfoModal::new("Commit failed", "backend unavailable");
            let result = modal
                .handle_key(KeyEvent::new(code, KeyModifiers::NONE))
                .unwrap();
            assert!(matches!(result, Some(ModalResult::Confirmed(()))));
        }
    }

    #[test]
    fn test_other_keys_ignored() {
        let mut modal = InfoModal::new("Commit failed", "backend unavailable");
        let result = modal
            .handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE))
            .unwrap();
        assert!(result.is_none());
    }
}
