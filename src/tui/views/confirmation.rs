//! Dialog rendering (rollback, uninstall, tests, reconfigure)

use crate::services::{Dialog, Loadable, ReleaseView, UninstallState};
use crate::tui::app::ReconfigureFocus;
use crate::tui::theme::Theme;
use crate::tui::views::helpers::{centered_rect, create_themed_block};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

fn confirm_hint(theme: &Theme) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            Span::raw("Press "),
            Span::styled("y", theme.confirm_key_style()),
            Span::raw(" to confirm"),
        ]),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled("n", theme.cancel_key_style()),
            Span::raw(" or "),
            Span::styled("Esc", theme.cancel_key_style()),
            Span::raw(" to cancel"),
        ]),
    ]
}

/// Render the rollback, uninstall or tests dialog
pub fn render_confirmation(f: &mut Frame, area: Rect, view: &ReleaseView, theme: &Theme) {
    let release = view.release();
    let (title, lines) = match view.dialog() {
        Dialog::Rollback => {
            let mut lines = vec![
                Line::from(""),
                Line::styled("CONFIRMATION REQUIRED", theme.operation_warning_style()),
                Line::from(""),
            ];
            if let Some(target) = view.rollback_target() {
                lines.push(Line::from(format!(
                    "Roll back {} from revision {} to revision {}?",
                    release.name, release.revision, target
                )));
            }
            lines.push(Line::from(""));
            lines.extend(confirm_hint(theme));
            (" Rollback ", lines)
        }
        Dialog::Uninstall => {
            let mut lines = vec![Line::from("")];
            match view.uninstall_state() {
                UninstallState::Loading => {
                    lines.push(Line::styled("Loading resources...", theme.secondary_style()))
                }
                UninstallState::Failed(msg) => {
                    lines.push(Line::styled(msg.to_string(), theme.operation_error_style()))
                }
                UninstallState::Empty => lines.push(Line::styled(
                    "No resources found; nothing to uninstall",
                    theme.secondary_style(),
                )),
                UninstallState::Ready(resources) => {
                    lines.push(Line::styled(
                        format!(
                            "Uninstall {} and delete these resources?",
                            release.key()
                        ),
                        theme.operation_warning_style(),
                    ));
                    lines.push(Line::from(""));
                    lines.extend(resources.iter().map(|r| {
                        Line::from(vec![
                            Span::styled(format!("  {:<24}", r.kind), theme.label_style()),
                            Span::raw(r.name().to_string()),
                        ])
                    }));
                }
            }
            if view.is_uninstalling() {
                lines.push(Line::styled("Uninstalling...", theme.operation_warning_style()));
            }
            if let Some(err) = view.uninstall_error() {
                lines.push(Line::styled(err.to_string(), theme.operation_error_style()));
            }
            lines.push(Line::from(""));
            if view.can_confirm_uninstall() {
                lines.extend(confirm_hint(theme));
            } else {
                lines.push(Line::from("Press Esc to close"));
            }
            (" Uninstall ", lines)
        }
        Dialog::Tests => {
            let mut lines = vec![Line::from("")];
            match view.test_result() {
                Loadable::Idle => {
                    lines.push(Line::from(format!("Run the tests of {}?", release.key())));
                    lines.push(Line::from(""));
                    lines.push(Line::from(vec![
                        Span::raw("Press "),
                        Span::styled("Enter", theme.confirm_key_style()),
                        Span::raw(" to run, "),
                        Span::styled("Esc", theme.cancel_key_style()),
                        Span::raw(" to close"),
                    ]));
                }
                Loadable::Loading => {
                    lines.push(Line::styled("Running tests...", theme.operation_warning_style()))
                }
                Loadable::Failed(msg) => {
                    lines.push(Line::styled(msg.clone(), theme.operation_error_style()))
                }
                Loadable::Ready(result) if result.is_empty() => {
                    lines.push(Line::styled("Tests finished", theme.operation_success_style()))
                }
                Loadable::Ready(result) => {
                    lines.extend(result.as_str().lines().map(|l| Line::from(l.to_string())))
                }
            }
            (" Tests ", lines)
        }
        Dialog::None | Dialog::Reconfigure => return,
    };

    let popup = centered_rect(70, 60, area);
    f.render_widget(Clear, popup);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.operation_warning));
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        popup,
    );
}

/// Render the reconfigure (upgrade) dialog
pub fn render_reconfigure_dialog(
    f: &mut Frame,
    area: Rect,
    view: &ReleaseView,
    focus: ReconfigureFocus,
    version_cursor: usize,
    theme: &Theme,
) {
    let Some(form) = view.reconfigure_form() else {
        return;
    };

    let popup = centered_rect(90, 90, area);
    f.render_widget(Clear, popup);

    let title = format!(" Upgrade {} ({}) ", form.release(), form.chart_name());
    let outer = create_themed_block(&title, theme);
    let inner = outer.inner(popup);
    f.render_widget(outer, popup);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)])
        .split(inner);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(35),
            Constraint::Percentage(35),
        ])
        .split(rows[0]);

    let focused = |part: ReconfigureFocus| {
        if part == focus {
            Style::default().fg(theme.operation_warning)
        } else {
            Style::default().fg(theme.text_label)
        }
    };

    // Version options
    let version_lines: Vec<Line> = match form.versions() {
        Loadable::Idle | Loadable::Loading => {
            vec![Line::styled("Loading versions...", theme.secondary_style())]
        }
        Loadable::Failed(msg) => vec![Line::styled(msg.clone(), theme.operation_error_style())],
        Loadable::Ready(options) if options.is_empty() => {
            vec![Line::styled("No versions found", theme.secondary_style())]
        }
        Loadable::Ready(options) => options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let selected = form.selected_index() == Some(i);
                let marker = if selected { "> " } else { "  " };
                let mut style = Style::default();
                if i == version_cursor {
                    style = theme.table_selected_style();
                }
                if option.version == form.current_version() {
                    Line::styled(format!("{}{} (current)", marker, option), style)
                } else {
                    Line::styled(format!("{}{}", marker, option), style)
                }
            })
            .collect(),
    };
    f.render_widget(
        Paragraph::new(version_lines).block(
            Block::default()
                .title(" Versions ")
                .borders(Borders::ALL)
                .border_style(focused(ReconfigureFocus::Versions)),
        ),
        columns[0],
    );

    // Chart values for the current selection
    let values_title = match form.values_query() {
        Some(query) => format!(" {}@{} values ", query.chart_ref(), query.version),
        None => " Chart values ".to_string(),
    };
    let values_text = match form.chart_values() {
        Loadable::Idle => "Select a version".to_string(),
        Loadable::Loading => "Loading values...".to_string(),
        Loadable::Failed(msg) => msg.clone(),
        Loadable::Ready(text) => text.clone(),
    };
    f.render_widget(
        Paragraph::new(values_text).block(create_themed_block(&values_title, theme)),
        columns[1],
    );

    // User-supplied values
    let mut user_values = form.user_values().to_string();
    if focus == ReconfigureFocus::Values {
        user_values.push('_');
    }
    f.render_widget(
        Paragraph::new(user_values)
            .block(
                Block::default()
                    .title(" User values ")
                    .borders(Borders::ALL)
                    .border_style(focused(ReconfigureFocus::Values)),
            )
            .wrap(Wrap { trim: false }),
        columns[2],
    );

    let status = if form.is_submitting() {
        Line::styled("Submitting...", theme.operation_warning_style())
    } else if let Some(err) = form.error() {
        Line::styled(err.to_string(), theme.operation_error_style())
    } else {
        Line::from(format!(
            "{} -> {} @ {}",
            form.current_version(),
            form.repository().unwrap_or("?"),
            form.version()
        ))
    };
    f.render_widget(Paragraph::new(status).wrap(Wrap { trim: true }), rows[1]);
}
