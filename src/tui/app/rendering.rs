//! Rendering logic for the application

use super::core::App;
use super::state::Screen;
use crate::services::Dialog;
use crate::tui::constants::{FOOTER_HEIGHT, HEADER_HEIGHT, SCROLL_BUFFER};
use crate::tui::views::{self, helpers};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

impl App {
    /// Main render entry point
    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(f.area());

        views::render_header(
            f,
            chunks[0],
            self.context_name(),
            &self.config.server,
            &self.route().to_string(),
            self.config.read_only,
            &self.theme,
        );

        match self.ui_state.screen {
            Screen::ReleaseList => {
                let visible_height = chunks[1].height.saturating_sub(3) as usize;
                helpers::update_scroll_offset(
                    self.list.selected_index(),
                    visible_height,
                    &mut self.ui_state.list_scroll_offset,
                    SCROLL_BUFFER,
                );
                views::render_release_list(
                    f,
                    chunks[1],
                    &self.list,
                    self.ui_state.list_scroll_offset,
                    &self.config.ui,
                    &self.theme,
                );
            }
            Screen::ReleaseDetail => {
                if let Some(view) = &self.detail {
                    views::render_release_detail(
                        f,
                        chunks[1],
                        view,
                        self.ui_state.detail_scroll,
                        &self.config.ui,
                        &self.theme,
                    );
                    match view.dialog() {
                        Dialog::None => {}
                        Dialog::Reconfigure => views::render_reconfigure_dialog(
                            f,
                            chunks[1],
                            view,
                            self.ui_state.reconfigure_focus,
                            self.ui_state.version_cursor,
                            &self.theme,
                        ),
                        _ => views::render_confirmation(f, chunks[1], view, &self.theme),
                    }
                }
            }
        }

        views::render_footer(f, chunks[2], self);

        if self.ui_state.show_help {
            views::render_help(f, chunks[1], self.ui_state.screen, self.config.read_only, &self.theme);
        }
    }
}
