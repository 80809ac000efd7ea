//! Release list rendering

use crate::config::UiConfig;
use crate::services::{Loadable, ReleaseList};
use crate::tui::theme::Theme;
use crate::tui::views::helpers::{
    create_themed_block, render_empty_state, render_error_state, render_loading_state,
    truncate_message,
};
use chrono::Utc;
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Cell, Row, Table},
};

const TITLE: &str = " Releases ";

/// Render the installed releases table
pub fn render_release_list(
    f: &mut Frame,
    area: Rect,
    list: &ReleaseList,
    scroll_offset: usize,
    ui: &UiConfig,
    theme: &Theme,
) {
    match list.releases() {
        Loadable::Idle | Loadable::Loading => {
            render_loading_state(f, area, TITLE, "Loading releases...", theme);
            return;
        }
        Loadable::Failed(msg) => {
            render_error_state(f, area, TITLE, msg, theme);
            return;
        }
        Loadable::Ready(_) => {}
    }

    let visible = list.visible();
    if visible.is_empty() {
        let message = if list.filter().is_empty() {
            "No releases installed".to_string()
        } else {
            format!("No releases match '{}'", list.filter())
        };
        render_empty_state(f, area, TITLE, &message, "Press r to refresh", theme);
        return;
    }

    let now = Utc::now();
    let status_icon = if ui.no_icons { "" } else { "● " };
    let header = Row::new(
        ["NAMESPACE", "NAME", "CHART", "APP VERSION", "REV", "STATUS", "UPDATED"]
            .into_iter()
            .map(Cell::from),
    )
    .style(theme.table_header_style());

    let rows = visible
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .map(|(index, release)| {
            let mut chart = vec![Span::raw(format!("{}-{}", release.chart_name, release.chart_ver))];
            if let Some(latest) = list.upgrade_badge(release) {
                chart.push(Span::styled(
                    format!(" ↑{}", latest),
                    theme.upgrade_badge_style(),
                ));
            }

            let row = Row::new(vec![
                Cell::from(release.namespace.clone()),
                Cell::from(truncate_message(&release.name, 32)),
                Cell::from(Line::from(chart)),
                Cell::from(release.app_version_display().to_string()),
                Cell::from(release.revision.to_string()),
                Cell::from(Span::styled(
                    format!("{}{}", status_icon, release.status),
                    theme.status_style(release.status),
                )),
                Cell::from(release.age(now)),
            ]);
            if index == list.selected_index() {
                row.style(theme.table_selected_style())
            } else {
                row.style(ratatui::style::Style::default().fg(theme.table_normal))
            }
        });

    let widths = [
        Constraint::Length(18),
        Constraint::Min(20),
        Constraint::Length(30),
        Constraint::Length(12),
        Constraint::Length(5),
        Constraint::Length(18),
        Constraint::Length(8),
    ];
    let title = format!(" Releases ({}) ", visible.len());
    let table = Table::new(rows, widths)
        .header(header)
        .block(create_themed_block(&title, theme));
    f.render_widget(table, area);
}
