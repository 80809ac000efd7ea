//! Help overlay rendering

use crate::tui::app::Screen;
use crate::tui::keybindings;
use crate::tui::theme::Theme;
use crate::tui::views::helpers::{centered_rect, create_themed_block};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

/// Render the help overlay for the current screen
pub fn render_help(f: &mut Frame, area: Rect, screen: Screen, read_only: bool, theme: &Theme) {
    let commands = match screen {
        Screen::ReleaseList => keybindings::list_commands(),
        Screen::ReleaseDetail => keybindings::detail_commands(read_only),
    };

    let mut lines = vec![Line::from("")];
    lines.extend(commands.iter().map(|cmd| {
        Line::from(vec![
            Span::styled(format!("{:>8}", cmd.key), theme.footer_key_style()),
            Span::raw(format!("  {}", cmd.label)),
        ])
    }));
    lines.push(Line::from(""));
    lines.push(Line::styled("Press any key to close", theme.secondary_style()));

    let popup = centered_rect(50, 60, area);
    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(lines).block(create_themed_block(" Help ", theme)),
        popup,
    );
}
