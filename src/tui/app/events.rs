//! Event handling for the application
//!
//! Keys are translated into calls on the headless views; whatever commands
//! those return are queued for the run loop.

use super::core::App;
use super::state::{ReconfigureFocus, Screen};
use crate::models::ReleaseTab;
use crate::services::{Dialog, UpgradeAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

impl App {
    /// Main keyboard event handler
    ///
    /// Returns Some(true) to quit, None for normal continuation
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<bool> {
        if self.ui_state.show_help {
            self.ui_state.show_help = false;
            return None;
        }

        // Esc dismisses status messages first
        if self.ui_state.status_message.is_some()
            && !self.ui_state.filter_mode
            && key.code == KeyCode::Esc
        {
            self.ui_state.status_message = None;
            self.ui_state.status_message_time = None;
            return None;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(true);
        }

        match self.ui_state.screen {
            Screen::ReleaseList => self.handle_list_key(key),
            Screen::ReleaseDetail => {
                self.handle_detail_key(key);
                None
            }
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Option<bool> {
        if self.ui_state.filter_mode {
            self.handle_filter_key(key);
            return None;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Some(true),
            KeyCode::Char('j') | KeyCode::Down => self.list.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.list.select_previous(),
            KeyCode::Enter => self.open_selected(),
            KeyCode::Char('/') => self.ui_state.filter_mode = true,
            KeyCode::Char('r') => {
                let command = self.list.load();
                self.queue([command]);
            }
            KeyCode::Char('?') => self.ui_state.show_help = true,
            _ => {}
        }
        None
    }

    fn handle_filter_key(&mut self, key: KeyEvent) {
        let mut filter = self.list.filter().to_string();
        match key.code {
            KeyCode::Enter => self.ui_state.filter_mode = false,
            KeyCode::Esc => {
                self.ui_state.filter_mode = false;
                filter.clear();
            }
            KeyCode::Backspace => {
                filter.pop();
            }
            KeyCode::Char(c) => filter.push(c),
            _ => {}
        }
        if filter != self.list.filter() {
            self.list.set_filter(filter);
            self.ui_state.list_scroll_offset = 0;
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) {
        let Some(dialog) = self.detail.as_ref().map(|v| v.dialog()) else {
            self.close_detail();
            return;
        };

        match dialog {
            Dialog::None => self.handle_page_key(key),
            Dialog::Rollback => self.handle_rollback_key(key),
            Dialog::Uninstall => self.handle_uninstall_key(key),
            Dialog::Tests => self.handle_tests_key(key),
            Dialog::Reconfigure => self.handle_reconfigure_key(key),
        }
    }

    fn handle_page_key(&mut self, key: KeyEvent) {
        let Some(view) = self.detail.as_mut() else {
            return;
        };

        let mut commands = Vec::new();
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.close_detail();
                return;
            }
            KeyCode::Tab => {
                commands.push(view.select_tab(view.tab().next()));
                self.ui_state.detail_scroll = 0;
            }
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                if let Some(tab) = ReleaseTab::all().get(index) {
                    commands.push(view.select_tab(*tab));
                    self.ui_state.detail_scroll = 0;
                }
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.ui_state.detail_scroll = self.ui_state.detail_scroll.saturating_add(1);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.ui_state.detail_scroll = self.ui_state.detail_scroll.saturating_sub(1);
            }
            KeyCode::Char('c') => commands.extend(view.check_for_new_version()),
            KeyCode::Char('b') => {
                if !view.request_rollback() {
                    self.set_status_message("Rollback is not available", true);
                }
            }
            KeyCode::Char('d') => commands.extend(view.request_uninstall()),
            KeyCode::Char('t') => {
                view.open_tests();
            }
            KeyCode::Char('u') => match view.upgrade_action() {
                UpgradeAction::Offered { .. } => {
                    commands.extend(view.open_reconfigure());
                    self.ui_state.reconfigure_focus = ReconfigureFocus::Versions;
                    self.ui_state.version_cursor = 0;
                }
                UpgradeAction::AddRepository { repository, .. } => {
                    self.set_status_message(
                        format!("Add repository '{}' to upgrade this chart", repository),
                        true,
                    );
                }
                UpgradeAction::Checking => {
                    self.set_status_message("Still checking for new versions", false);
                }
                UpgradeAction::ReadOnly => {}
            },
            KeyCode::Char('?') => self.ui_state.show_help = true,
            _ => {}
        }
        self.queue(commands);
    }

    fn handle_rollback_key(&mut self, key: KeyEvent) {
        let Some(view) = self.detail.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                let command = view.confirm_rollback();
                self.queue(command);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => view.close_dialog(),
            _ => {}
        }
    }

    fn handle_uninstall_key(&mut self, key: KeyEvent) {
        let Some(view) = self.detail.as_mut() else {
            return;
        };
        match key.code {
            // No-op until the resource list is loaded and non-empty
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                let command = view.confirm_uninstall();
                self.queue(command);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => view.close_dialog(),
            _ => {}
        }
    }

    fn handle_tests_key(&mut self, key: KeyEvent) {
        let Some(view) = self.detail.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Enter | KeyCode::Char('r') => {
                let command = view.run_tests();
                self.queue(command);
            }
            KeyCode::Esc | KeyCode::Char('q') => view.close_dialog(),
            _ => {}
        }
    }

    fn handle_reconfigure_key(&mut self, key: KeyEvent) {
        let focus = self.ui_state.reconfigure_focus;
        let Some(view) = self.detail.as_mut() else {
            return;
        };

        if key.code == KeyCode::Esc {
            view.close_dialog();
            return;
        }
        if key.code == KeyCode::Tab {
            self.ui_state.reconfigure_focus = match focus {
                ReconfigureFocus::Versions => ReconfigureFocus::Values,
                ReconfigureFocus::Values => ReconfigureFocus::Versions,
            };
            return;
        }

        let Some(form) = view.reconfigure_form_mut() else {
            return;
        };

        if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
            let command = form.submit();
            self.queue(command);
            return;
        }

        match focus {
            ReconfigureFocus::Versions => {
                let count = form.versions().ready().map_or(0, |v| v.len());
                let cursor = form.selected_index().unwrap_or(self.ui_state.version_cursor);
                let next = match key.code {
                    KeyCode::Char('j') | KeyCode::Down if count > 0 => (cursor + 1).min(count - 1),
                    KeyCode::Char('k') | KeyCode::Up => cursor.saturating_sub(1),
                    _ => return,
                };
                self.ui_state.version_cursor = next;
                let command = form.select_option(next);
                self.queue(command);
            }
            ReconfigureFocus::Values => {
                let mut values = form.user_values().to_string();
                match key.code {
                    KeyCode::Char(c) => values.push(c),
                    KeyCode::Enter => values.push('\n'),
                    KeyCode::Backspace => {
                        values.pop();
                    }
                    _ => return,
                }
                form.set_user_values(values);
            }
        }
    }
}
