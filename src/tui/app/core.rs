//! Application state and main TUI logic

use super::state::{ReconfigureFocus, Screen, UIState};
use crate::config::Config;
use crate::constants::STATUS_MESSAGE_TIMEOUT_SECS;
use crate::models::{Release, ReleaseTab};
use crate::services::{Command, ReleaseList, ReleaseView, Route, ViewOptions};
use crate::tui::Theme;

/// Main application state
pub struct App {
    pub(crate) config: Config,
    pub(crate) theme: Theme,
    pub(crate) list: ReleaseList,
    pub(crate) detail: Option<ReleaseView>,
    pub(crate) ui_state: UIState,
    /// Commands waiting to be dispatched by the run loop
    pending: Vec<Command>,
    /// Page to open once the release list has loaded
    start_route: Option<Route>,
}

impl App {
    pub fn new(config: Config, theme: Theme) -> Self {
        let mut list = ReleaseList::new();
        list.set_filter(config.default_namespace.clone());
        let pending = vec![list.load()];

        Self {
            config,
            theme,
            list,
            detail: None,
            ui_state: UIState::default(),
            pending,
            start_route: None,
        }
    }

    /// Open `route` instead of the list once releases are known
    pub fn with_start_route(mut self, route: Route) -> Self {
        self.start_route = Some(route).filter(|r| *r != Route::Home);
        self
    }

    /// Context name shown in the header and used in routes
    pub fn context_name(&self) -> &str {
        self.config.kube_context.as_deref().unwrap_or("default")
    }

    pub fn screen(&self) -> Screen {
        self.ui_state.screen
    }

    pub fn list(&self) -> &ReleaseList {
        &self.list
    }

    pub fn detail(&self) -> Option<&ReleaseView> {
        self.detail.as_ref()
    }

    /// Current route, as it would appear in the address bar of a web client
    pub fn route(&self) -> Route {
        match &self.detail {
            Some(view) => {
                let mut route = Route::for_release(view.release(), self.context_name());
                if let Route::Revision { tab, .. } = &mut route {
                    *tab = view.tab();
                }
                route
            }
            None => Route::Home,
        }
    }

    /// Hand the queued commands to the caller
    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.pending)
    }

    pub(crate) fn queue(&mut self, commands: impl IntoIterator<Item = Command>) {
        self.pending.extend(commands);
    }

    pub(crate) fn set_status_message(&mut self, message: impl Into<String>, is_error: bool) {
        self.ui_state.status_message = Some((message.into(), is_error));
        self.ui_state.status_message_time = Some(std::time::Instant::now());
    }

    pub(crate) fn check_status_message_timeout(&mut self) {
        if let Some(set_at) = self.ui_state.status_message_time {
            if set_at.elapsed().as_secs() >= STATUS_MESSAGE_TIMEOUT_SECS {
                self.ui_state.status_message = None;
                self.ui_state.status_message_time = None;
            }
        }
    }

    /// Open the release page for the selected release
    pub(crate) fn open_selected(&mut self) {
        if let Some(release) = self.list.selected().cloned() {
            self.open_release(release, ReleaseTab::default());
        }
    }

    /// Open the release page a route points at
    ///
    /// The current revision is shown even when the route names an older one;
    /// the route's context is not switched to.
    pub(crate) fn open_route(&mut self, route: &Route) {
        let Route::Revision {
            namespace,
            name,
            revision,
            tab,
            ..
        } = route
        else {
            return;
        };
        let found = self
            .list
            .releases()
            .ready()
            .and_then(|releases| {
                releases
                    .iter()
                    .find(|r| &r.namespace == namespace && &r.name == name)
            })
            .cloned();
        let Some(release) = found else {
            self.set_status_message(format!("Release {}/{} not found", namespace, name), true);
            return;
        };
        if release.revision != *revision {
            tracing::info!(
                "Route names revision {} of {}; opening current revision {}",
                revision,
                release.key(),
                release.revision
            );
        }
        self.open_release(release, *tab);
    }

    fn open_release(&mut self, release: Release, tab: ReleaseTab) {
        let options = ViewOptions {
            context: self.config.kube_context.clone(),
            read_only: self.config.read_only,
            tab,
        };
        let (view, commands) = ReleaseView::open(release, options);
        self.queue(commands);
        self.detail = Some(view);
        self.ui_state.screen = Screen::ReleaseDetail;
        self.ui_state.detail_scroll = 0;
    }

    /// Leave the release page
    pub(crate) fn close_detail(&mut self) {
        self.detail = None;
        self.ui_state.screen = Screen::ReleaseList;
        self.ui_state.reconfigure_focus = ReconfigureFocus::default();
        self.ui_state.version_cursor = 0;
    }

    /// Apply settled backend results to every view
    pub fn poll(&mut self) {
        let commands = self.list.poll();
        self.queue(commands);

        if !self.list.is_loading() {
            if let Some(route) = self.start_route.take() {
                self.open_route(&route);
            }
        }

        let Some(view) = self.detail.as_mut() else {
            return;
        };
        let commands = view.poll();
        let navigation = view.take_navigation();
        let deleted = view.is_deleted();
        // The cursor follows the form's default selection once versions load
        if let Some(index) = view.reconfigure_form().and_then(|f| f.selected_index()) {
            self.ui_state.version_cursor = index;
        }
        self.queue(commands);

        if let Some(Route::Home) = navigation {
            let key = self.detail.as_ref().map(|v| v.release().key()).unwrap_or_default();
            self.close_detail();
            let reload = self.list.load();
            self.queue([reload]);
            if deleted {
                self.set_status_message(format!("Uninstalled {}", key), false);
            } else {
                self.set_status_message(format!("Updated {}", key), false);
            }
        }
    }
}
