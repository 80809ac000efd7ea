//! Theme and styling definitions
//!
//! Centralized place for all color and style definitions.

use crate::models::ReleaseStatus;
use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the TUI
pub struct Theme {
    // Header colors
    pub header_context: Color,
    pub header_server: Color,
    pub header_read_only: Color,

    // Status colors
    pub status_deployed: Color,
    pub status_failed: Color,
    pub status_pending: Color,
    pub status_inactive: Color,

    // Table colors
    pub table_header: Color,
    pub table_selected: Color,
    pub table_selected_bg: Color,
    pub table_normal: Color,

    // Text colors
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_label: Color,
    pub upgrade_badge: Color,

    // Operation colors
    pub operation_success: Color,
    pub operation_error: Color,
    pub operation_warning: Color,
    pub operation_confirm: Color,
    pub operation_cancel: Color,

    // Footer colors
    pub footer_key: Color,
    pub filter_prompt: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            header_context: Color::Yellow,
            header_server: Color::Cyan,
            header_read_only: Color::Red,

            status_deployed: Color::Green,
            status_failed: Color::Red,
            status_pending: Color::Yellow,
            status_inactive: Color::Gray,

            table_header: Color::Cyan,
            table_selected: Color::Blue,
            table_selected_bg: Color::DarkGray,
            table_normal: Color::White,

            text_primary: Color::White,
            text_secondary: Color::Gray,
            text_label: Color::Cyan,
            upgrade_badge: Color::Magenta,

            operation_success: Color::Green,
            operation_error: Color::Red,
            operation_warning: Color::Yellow,
            operation_confirm: Color::Green,
            operation_cancel: Color::Red,

            footer_key: Color::Yellow,
            filter_prompt: Color::Yellow,
        }
    }
}

impl Theme {
    pub fn header_context_style(&self) -> Style {
        Style::default()
            .fg(self.header_context)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_style(&self, status: ReleaseStatus) -> Style {
        let color = match status {
            ReleaseStatus::Deployed => self.status_deployed,
            ReleaseStatus::Failed => self.status_failed,
            s if s.is_pending() => self.status_pending,
            _ => self.status_inactive,
        };
        Style::default().fg(color)
    }

    pub fn table_header_style(&self) -> Style {
        Style::default()
            .fg(self.table_header)
            .add_modifier(Modifier::BOLD)
    }

    pub fn table_selected_style(&self) -> Style {
        Style::default()
            .fg(self.table_selected)
            .bg(self.table_selected_bg)
    }

    pub fn label_style(&self) -> Style {
        Style::default().fg(self.text_label)
    }

    pub fn secondary_style(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    pub fn upgrade_badge_style(&self) -> Style {
        Style::default()
            .fg(self.upgrade_badge)
            .add_modifier(Modifier::BOLD)
    }

    pub fn footer_key_style(&self) -> Style {
        Style::default().fg(self.footer_key)
    }

    pub fn operation_success_style(&self) -> Style {
        Style::default()
            .fg(self.operation_success)
            .add_modifier(Modifier::BOLD)
    }

    pub fn operation_error_style(&self) -> Style {
        Style::default()
            .fg(self.operation_error)
            .add_modifier(Modifier::BOLD)
    }

    pub fn operation_warning_style(&self) -> Style {
        Style::default()
            .fg(self.operation_warning)
            .add_modifier(Modifier::BOLD)
    }

    pub fn confirm_key_style(&self) -> Style {
        Style::default()
            .fg(self.operation_confirm)
            .add_modifier(Modifier::BOLD)
    }

    pub fn cancel_key_style(&self) -> Style {
        Style::default()
            .fg(self.operation_cancel)
            .add_modifier(Modifier::BOLD)
    }
}
