//! Release page rendering

use crate::config::UiConfig;
use crate::models::{Release, ReleaseTab};
use crate::services::{Loadable, ReleaseView, UpgradeAction};
use crate::tui::theme::Theme;
use crate::tui::views::helpers::{
    create_themed_block, render_empty_state, render_error_state, render_loading_state,
};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Tabs, Wrap},
};

/// Render the release page: summary, revision list and the selected tab
pub fn render_release_detail(
    f: &mut Frame,
    area: Rect,
    view: &ReleaseView,
    scroll: u16,
    ui: &UiConfig,
    theme: &Theme,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[0]);

    render_summary(f, top[0], view, ui, theme);
    render_revisions(f, top[1], view, ui, theme);

    let titles: Vec<Line> = ReleaseTab::all()
        .iter()
        .enumerate()
        .map(|(i, tab)| Line::from(format!("{} {}", i + 1, tab.label())))
        .collect();
    let selected = ReleaseTab::all()
        .iter()
        .position(|t| *t == view.tab())
        .unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(theme.table_selected_style());
    f.render_widget(tabs, rows[1]);

    render_tab_content(f, rows[2], view, scroll, theme);
}

fn format_updated(release: &Release, ui: &UiConfig) -> String {
    let format = if ui.hour12 {
        "%Y-%m-%d %I:%M:%S %p"
    } else {
        "%Y-%m-%d %H:%M:%S"
    };
    release.updated.format(format).to_string()
}

fn field<'a>(label: &'a str, value: String, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:<13}", label), theme.label_style()),
        Span::raw(value),
    ])
}

fn render_summary(f: &mut Frame, area: Rect, view: &ReleaseView, ui: &UiConfig, theme: &Theme) {
    let release = view.release();

    let mut lines = vec![
        field("Namespace:", release.namespace.clone(), theme),
        field(
            "Chart:",
            format!("{} {}", release.chart_name, release.chart_ver),
            theme,
        ),
        field("App version:", release.app_version_display().to_string(), theme),
        Line::from(vec![
            Span::styled(format!("{:<13}", "Status:"), theme.label_style()),
            Span::styled(release.status.to_string(), theme.status_style(release.status)),
            Span::raw(format!("  (revision {})", release.revision)),
        ]),
        field("Updated:", format_updated(release, ui), theme),
        upgrade_line(view, theme),
    ];

    if view.is_rolling_back() {
        lines.push(Line::styled("Rolling back...", theme.operation_warning_style()));
    }
    if let Some(err) = view.rollback_error() {
        lines.push(Line::styled(
            format!("Rollback: {}", err),
            theme.operation_error_style(),
        ));
    }

    let title = format!(" {} ", release.name);
    let paragraph = Paragraph::new(lines)
        .block(create_themed_block(&title, theme))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn upgrade_line<'a>(view: &ReleaseView, theme: &Theme) -> Line<'a> {
    let label = Span::styled(format!("{:<13}", "Upgrade:"), theme.label_style());
    let value = match view.upgrade_action() {
        UpgradeAction::Checking => Span::styled("checking...", theme.secondary_style()),
        UpgradeAction::ReadOnly => Span::styled("disabled (read-only)", theme.secondary_style()),
        UpgradeAction::Offered { latest: Some(latest) }
            if latest.is_newer_than(&view.release().chart_ver) =>
        {
            Span::styled(
                format!("{} available from {} (u)", latest.version, latest.repository),
                theme.upgrade_badge_style(),
            )
        }
        UpgradeAction::Offered { .. } => Span::raw("up to date; reconfigure with u"),
        UpgradeAction::AddRepository { repository, url } => Span::styled(
            match url {
                Some(url) => format!("add repository '{}' ({}) to upgrade", repository, url),
                None => format!("add repository '{}' to upgrade", repository),
            },
            theme.operation_warning_style(),
        ),
    };
    Line::from(vec![label, value])
}

fn render_revisions(f: &mut Frame, area: Rect, view: &ReleaseView, ui: &UiConfig, theme: &Theme) {
    const TITLE: &str = " Revisions ";
    match view.history() {
        Loadable::Idle | Loadable::Loading => {
            render_loading_state(f, area, TITLE, "Loading revisions...", theme)
        }
        Loadable::Failed(msg) => render_error_state(f, area, TITLE, msg, theme),
        Loadable::Ready(history) => {
            let mut history: Vec<&Release> = history.iter().collect();
            history.sort_by_key(|r| std::cmp::Reverse(r.revision));
            let current = view.release().revision;
            let lines: Vec<Line> = history
                .into_iter()
                .map(|r| {
                    let marker = if r.revision == current { "*" } else { " " };
                    Line::from(vec![
                        Span::raw(format!("{}{:>3} ", marker, r.revision)),
                        Span::styled(format!("{:<16}", r.status), theme.status_style(r.status)),
                        Span::raw(format!("{} {}", r.chart_ver, format_updated(r, ui))),
                    ])
                })
                .collect();
            f.render_widget(
                Paragraph::new(lines).block(create_themed_block(TITLE, theme)),
                area,
            );
        }
    }
}

fn render_tab_content(f: &mut Frame, area: Rect, view: &ReleaseView, scroll: u16, theme: &Theme) {
    let title = format!(" {} ", view.tab().label());

    if view.tab() == ReleaseTab::Resources {
        match view.resources() {
            Loadable::Idle | Loadable::Loading => {
                render_loading_state(f, area, &title, "Loading resources...", theme)
            }
            Loadable::Failed(msg) => render_error_state(f, area, &title, msg, theme),
            Loadable::Ready(resources) if resources.is_empty() => render_empty_state(
                f,
                area,
                &title,
                "No resources found",
                "The release may still be installing",
                theme,
            ),
            Loadable::Ready(resources) => {
                let lines: Vec<Line> = resources
                    .iter()
                    .map(|r| {
                        Line::from(vec![
                            Span::styled(format!("{:<24}", r.kind), theme.label_style()),
                            Span::raw(r.name().to_string()),
                        ])
                    })
                    .collect();
                f.render_widget(
                    Paragraph::new(lines)
                        .block(create_themed_block(&title, theme))
                        .scroll((scroll, 0)),
                    area,
                );
            }
        }
        return;
    }

    match view.tab_content() {
        Loadable::Idle | Loadable::Loading => {
            render_loading_state(f, area, &title, "Loading...", theme)
        }
        Loadable::Failed(msg) => render_error_state(f, area, &title, msg, theme),
        Loadable::Ready(text) if text.trim().is_empty() => {
            render_empty_state(f, area, &title, "Nothing to show", "", theme)
        }
        Loadable::Ready(text) => {
            f.render_widget(
                Paragraph::new(text.as_str())
                    .block(create_themed_block(&title, theme))
                    .scroll((scroll, 0)),
                area,
            );
        }
    }
}
