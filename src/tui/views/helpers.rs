//! Common helper functions for view rendering

use crate::tui::theme::Theme;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Update scroll offset based on selected index and visible area
///
/// Keeps `scroll_buffer` rows visible around the selection.
pub fn update_scroll_offset(
    selected_index: usize,
    visible_height: usize,
    scroll_offset: &mut usize,
    scroll_buffer: usize,
) {
    if selected_index >= *scroll_offset + visible_height.saturating_sub(scroll_buffer) {
        *scroll_offset =
            selected_index.saturating_sub(visible_height.saturating_sub(scroll_buffer + 1));
    }
    if selected_index < *scroll_offset + scroll_buffer {
        *scroll_offset = selected_index.saturating_sub(scroll_buffer);
    }
}

/// Render a loading state message
pub fn render_loading_state(f: &mut Frame, area: Rect, title: &str, message: &str, theme: &Theme) {
    let text = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from("Please wait..."),
    ];
    let paragraph = Paragraph::new(text)
        .block(create_themed_block(title, theme))
        .style(theme.secondary_style());
    f.render_widget(paragraph, area);
}

/// Render an error next to the panel it belongs to; the rest of the page stays usable
pub fn render_error_state(f: &mut Frame, area: Rect, title: &str, message: &str, theme: &Theme) {
    let text = vec![
        Line::styled(message.to_string(), theme.operation_error_style()),
        Line::from(""),
        Line::from("Press r on the list or switch tabs to retry"),
    ];
    let paragraph = Paragraph::new(text)
        .block(create_themed_block(title, theme))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

/// Render an empty state message
pub fn render_empty_state(
    f: &mut Frame,
    area: Rect,
    title: &str,
    message: &str,
    instructions: &str,
    theme: &Theme,
) {
    let text = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(instructions.to_string()),
    ];
    let paragraph = Paragraph::new(text)
        .block(create_themed_block(title, theme))
        .style(theme.secondary_style());
    f.render_widget(paragraph, area);
}

/// Truncate a message to a maximum length
///
/// If the message exceeds max_len, truncates and adds "...".
pub fn truncate_message(message: &str, max_len: usize) -> String {
    if message.chars().count() > max_len {
        let kept: String = message.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        message.to_string()
    }
}

/// Create a block with title and borders using theme
pub fn create_themed_block<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.text_label))
}

/// Rectangle of `percent_x` by `percent_y` centered in `area`
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_message() {
        assert_eq!(truncate_message("short", 10), "short");
        assert_eq!(truncate_message("a-very-long-release-name", 10), "a-very-...");
    }

    #[test]
    fn test_scroll_offset_follows_selection() {
        let mut offset = 0;
        update_scroll_offset(20, 10, &mut offset, 2);
        assert!(offset > 0 && 20 < offset + 10);
        update_scroll_offset(0, 10, &mut offset, 2);
        assert_eq!(offset, 0);
    }
}
