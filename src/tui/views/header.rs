//! Header view rendering

use crate::tui::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render the header: context, backend and current route
pub fn render_header(
    f: &mut Frame,
    area: Rect,
    context: &str,
    server: &str,
    route: &str,
    read_only: bool,
    theme: &Theme,
) {
    let mut spans = vec![
        Span::styled("Context: ", theme.label_style()),
        Span::styled(context.to_string(), theme.header_context_style()),
        Span::raw("  "),
        Span::styled("Server: ", theme.label_style()),
        Span::styled(
            server.to_string(),
            ratatui::style::Style::default().fg(theme.header_server),
        ),
        Span::raw("  "),
        Span::styled(route.to_string(), theme.secondary_style()),
    ];
    if read_only {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            "[read-only]",
            ratatui::style::Style::default().fg(theme.header_read_only),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(" helmdeck ")
            .borders(Borders::ALL),
    );
    f.render_widget(header, area);
}
