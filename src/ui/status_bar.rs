use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::archive::Archive;
use crate::theme::Theme;

/// Parameters for status bar rendering
pub struct StatusBarParams<'a> {
    pub theme: &'a Theme,
    /// Transient message and error flag
    pub status_message: Option<&'a (String, bool)>,
    /// Terminal width (key hints are hidden on narrow terminals)
    pub terminal_width: u16,
    /// Terminal height
    pub terminal_height: u16,
}

/// One-line status bar at the bottom of the screen
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar
    pub fn render(buf: &mut Buffer, area: Rect, params: &StatusBarParams, archive: &Archive) {
        let theme = params.theme;

        // A transient message replaces the whole bar while it lasts
        if let Some((message, is_error)) = params.status_message {
            let (bg, fg) = if *is_error {
                (theme.error_bg, theme.error_fg)
            } else {
                (theme.success_bg, theme.success_fg)
            };
            let line = Line::from(Span::styled(
                format!(" {}", message),
                Style::default().fg(fg).add_modifier(Modifier::BOLD),
            ));
            Paragraph::new(line)
                .style(Style::default().bg(bg))
                .render(area, buf);
            return;
        }

        let entry = archive.current_entry();
        let dirty_count = archive.dirty_count();

        let mut left = format!(
            " {} [{}/{}]",
            entry.path,
            archive.current_index() + 1,
            archive.len()
        );
        if dirty_count > 0 {
            left.push_str(&format!("  {} unsaved", dirty_count));
        }
        if archive.editing_disabled() {
            left.push_str("  read-only");
        }

        let right = if params.terminal_width >= 100 {
            format!(
                "Tab focus  ^S commit  ^R reset  ^D download  ^F view  ^Q quit  {}x{} ",
                params.terminal_width, params.terminal_height
            )
        } else {
            String::new()
        };

        let width = area.width as usize;
        let gap = width.saturating_sub(left.width() + right.width());

        let line = Line::from(vec![
            Span::styled(left, Style::default().fg(theme.text_primary)),
            Span::raw(" ".repeat(gap)),
            Span::styled(right, Style::default().fg(theme.text_secondary)),
        ]);

        Paragraph::new(line)
            .style(Style::default().bg(theme.status_bar_bg))
            .render(area, buf);
    }
}
