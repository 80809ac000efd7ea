//! Footer view rendering

use crate::services::Dialog;
use crate::tui::app::{App, Screen};
use crate::tui::keybindings::{self, NavigationCommand};
use crate::tui::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Render the footer based on current application state
pub fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let line = if app.ui_state.filter_mode {
        Line::from(vec![
            Span::styled("/", ratatui::style::Style::default().fg(theme.filter_prompt)),
            Span::raw(app.list.filter().to_string()),
            Span::raw("_"),
        ])
    } else if let Some((msg, is_error)) = &app.ui_state.status_message {
        Line::from(Span::styled(
            msg.clone(),
            if *is_error {
                theme.operation_error_style()
            } else {
                theme.operation_success_style()
            },
        ))
    } else {
        let commands = match app.screen() {
            Screen::ReleaseList => keybindings::list_commands(),
            Screen::ReleaseDetail => match app.detail().map(|v| v.dialog()) {
                Some(Dialog::Reconfigure) => keybindings::reconfigure_commands(),
                _ => keybindings::detail_commands(app.config.read_only),
            },
        };
        navigation_line(&commands, theme)
    };

    let footer = Paragraph::new(line)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(footer, area);
}

fn navigation_line(commands: &[NavigationCommand], theme: &Theme) -> Line<'static> {
    let mut spans = Vec::with_capacity(commands.len() * 3);
    for (i, cmd) in commands.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" | "));
        }
        spans.push(Span::styled(cmd.key, theme.footer_key_style()));
        spans.push(Span::raw(format!(" {}", cmd.label)));
    }
    Line::from(spans)
}
