//! Release detail view
//!
//! Owns everything the release page does against the backend: revision
//! list, latest version check, rollback, uninstall, test runs, reconfigure
//! and the manifests/values/notes tabs.
//!
//! Rules enforced here:
//! - a mutation cannot be triggered twice while it is in flight
//! - rollback and reconfigure always re-fetch the revision list and the
//!   latest version once they settle, whatever the outcome
//! - when the re-fetched history shows a new revision, the open tab is read
//!   again at that revision
//! - uninstall can only be confirmed against a loaded, non-empty resource list
//! - a suggested (unconfigured) repository suppresses the upgrade action

use super::command::Command;
use super::inflight::{InFlight, Loadable};
use super::reconfigure::{ReconfigureForm, ReconfigureOutcome};
use super::route::Route;
use crate::api::latest_revision;
use crate::models::{LatestVersionResult, Release, ReleaseTab, ResourceRef, TestResult};

/// Dialog currently shown on top of the release page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialog {
    #[default]
    None,
    Rollback,
    Uninstall,
    Tests,
    Reconfigure,
}

/// What the upgrade control should offer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpgradeAction {
    /// Latest version lookup in flight
    Checking,
    /// Reconfigure is available; `latest` is shown when known
    Offered { latest: Option<LatestVersionResult> },
    /// The chart only matches an unconfigured repository; informational only
    AddRepository {
        repository: String,
        url: Option<String>,
    },
    /// Mutations are disabled by configuration
    ReadOnly,
}

/// State of the uninstall confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UninstallState<'a> {
    Loading,
    Empty,
    Ready(&'a [ResourceRef]),
    Failed(&'a str),
}

/// Options for opening a release view
#[derive(Debug, Clone, Default)]
pub struct ViewOptions {
    pub context: Option<String>,
    pub read_only: bool,
    pub tab: ReleaseTab,
}

/// Headless state of the release detail page
#[derive(Debug)]
pub struct ReleaseView {
    release: Release,
    context: Option<String>,
    read_only: bool,
    tab: ReleaseTab,
    dialog: Dialog,

    latest: Loadable<Option<LatestVersionResult>>,
    latest_fetch: InFlight<Option<LatestVersionResult>>,
    history: Loadable<Vec<Release>>,
    history_fetch: InFlight<Vec<Release>>,
    /// Adopt the newest revision once the re-fetched history arrives
    adopt_latest_revision: bool,
    resources: Loadable<Vec<ResourceRef>>,
    resources_fetch: InFlight<Vec<ResourceRef>>,
    tab_content: Loadable<String>,
    tab_fetch: InFlight<String>,

    rollback: InFlight<()>,
    rollback_error: Option<String>,
    uninstall: InFlight<()>,
    uninstall_error: Option<String>,
    tests: InFlight<TestResult>,
    test_result: Loadable<TestResult>,
    reconfigure: Option<ReconfigureForm>,

    navigation: Option<Route>,
    deleted: bool,
}

impl ReleaseView {
    /// Open the page and request its initial data
    pub fn open(release: Release, options: ViewOptions) -> (Self, Vec<Command>) {
        let mut view = Self {
            release,
            context: options.context,
            read_only: options.read_only,
            tab: options.tab,
            dialog: Dialog::None,
            latest: Loadable::Idle,
            latest_fetch: InFlight::new(),
            history: Loadable::Idle,
            history_fetch: InFlight::new(),
            adopt_latest_revision: false,
            resources: Loadable::Idle,
            resources_fetch: InFlight::new(),
            tab_content: Loadable::Idle,
            tab_fetch: InFlight::new(),
            rollback: InFlight::new(),
            rollback_error: None,
            uninstall: InFlight::new(),
            uninstall_error: None,
            tests: InFlight::new(),
            test_result: Loadable::Idle,
            reconfigure: None,
            navigation: None,
            deleted: false,
        };

        tracing::debug!(
            "Opening release view for {} at revision {}",
            view.release.key(),
            view.release.revision
        );

        let mut commands = vec![view.fetch_latest(), view.fetch_history()];
        commands.push(view.fetch_tab());
        (view, commands)
    }

    pub fn release(&self) -> &Release {
        &self.release
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn tab(&self) -> ReleaseTab {
        self.tab
    }

    pub fn dialog(&self) -> Dialog {
        self.dialog
    }

    pub fn latest(&self) -> &Loadable<Option<LatestVersionResult>> {
        &self.latest
    }

    pub fn history(&self) -> &Loadable<Vec<Release>> {
        &self.history
    }

    pub fn resources(&self) -> &Loadable<Vec<ResourceRef>> {
        &self.resources
    }

    /// Text of the manifests, values or notes tab
    pub fn tab_content(&self) -> &Loadable<String> {
        &self.tab_content
    }

    pub fn test_result(&self) -> &Loadable<TestResult> {
        &self.test_result
    }

    pub fn rollback_error(&self) -> Option<&str> {
        self.rollback_error.as_deref()
    }

    pub fn uninstall_error(&self) -> Option<&str> {
        self.uninstall_error.as_deref()
    }

    pub fn reconfigure_form(&self) -> Option<&ReconfigureForm> {
        self.reconfigure.as_ref()
    }

    pub fn reconfigure_form_mut(&mut self) -> Option<&mut ReconfigureForm> {
        self.reconfigure.as_mut()
    }

    /// Whether the release was uninstalled from this view
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Pending navigation requested by a completed action
    pub fn take_navigation(&mut self) -> Option<Route> {
        self.navigation.take()
    }

    pub fn is_rolling_back(&self) -> bool {
        self.rollback.is_pending()
    }

    pub fn is_uninstalling(&self) -> bool {
        self.uninstall.is_pending()
    }

    pub fn is_running_tests(&self) -> bool {
        self.tests.is_pending()
    }

    fn mutations_enabled(&self) -> bool {
        !self.read_only && !self.deleted
    }

    fn fetch_latest(&mut self) -> Command {
        self.latest = Loadable::Loading;
        Command::FetchLatestVersion {
            chart_name: self.release.chart_name.clone(),
            ticket: self.latest_fetch.restart(),
        }
    }

    fn fetch_history(&mut self) -> Command {
        self.history = Loadable::Loading;
        Command::FetchHistory {
            namespace: self.release.namespace.clone(),
            release: self.release.name.clone(),
            ticket: self.history_fetch.restart(),
        }
    }

    fn fetch_resources(&mut self) -> Command {
        self.resources = Loadable::Loading;
        Command::FetchResources {
            namespace: self.release.namespace.clone(),
            release: self.release.name.clone(),
            ticket: self.resources_fetch.restart(),
        }
    }

    fn fetch_tab(&mut self) -> Command {
        match self.tab.info_kind() {
            None => {
                self.tab_fetch.cancel();
                self.tab_content = Loadable::Idle;
                self.fetch_resources()
            }
            Some(kind) => {
                self.tab_content = Loadable::Loading;
                Command::FetchReleaseInfo {
                    namespace: self.release.namespace.clone(),
                    release: self.release.name.clone(),
                    kind,
                    revision: self.release.revision,
                    user_defined_only: self.tab.user_defined_only(),
                    ticket: self.tab_fetch.restart(),
                }
            }
        }
    }

    /// Switch tabs; the new tab's content is always re-read
    pub fn select_tab(&mut self, tab: ReleaseTab) -> Command {
        self.tab = tab;
        self.fetch_tab()
    }

    /// Revision a rollback would restore, if rollback is possible at all
    pub fn rollback_target(&self) -> Option<u32> {
        self.release.rollback_target()
    }

    /// Whether the rollback control is shown and enabled
    pub fn can_rollback(&self) -> bool {
        self.mutations_enabled() && self.rollback_target().is_some() && !self.rollback.is_pending()
    }

    /// Open the rollback confirmation
    pub fn request_rollback(&mut self) -> bool {
        if !self.can_rollback() {
            return false;
        }
        self.dialog = Dialog::Rollback;
        true
    }

    /// Confirm the rollback dialog
    ///
    /// The request carries the current revision; the backend restores the
    /// one before it. Returns None when the dialog is not open or a rollback
    /// is already in flight.
    pub fn confirm_rollback(&mut self) -> Option<Command> {
        if self.dialog != Dialog::Rollback || !self.can_rollback() {
            return None;
        }
        let ticket = self.rollback.start()?;
        self.dialog = Dialog::None;
        self.rollback_error = None;

        tracing::debug!(
            "Rolling back {} from revision {} to {}",
            self.release.key(),
            self.release.revision,
            self.release.revision - 1
        );
        Some(Command::Rollback {
            namespace: self.release.namespace.clone(),
            release: self.release.name.clone(),
            revision: self.release.revision,
            ticket,
        })
    }

    /// Open the uninstall confirmation and load the resources it would delete
    pub fn request_uninstall(&mut self) -> Option<Command> {
        if !self.mutations_enabled() || self.uninstall.is_pending() {
            return None;
        }
        self.dialog = Dialog::Uninstall;
        self.uninstall_error = None;
        Some(self.fetch_resources())
    }

    pub fn uninstall_state(&self) -> UninstallState<'_> {
        match &self.resources {
            Loadable::Idle | Loadable::Loading => UninstallState::Loading,
            Loadable::Failed(msg) => UninstallState::Failed(msg),
            Loadable::Ready(resources) if resources.is_empty() => UninstallState::Empty,
            Loadable::Ready(resources) => UninstallState::Ready(resources),
        }
    }

    /// Whether confirming the uninstall dialog would fire a request
    pub fn can_confirm_uninstall(&self) -> bool {
        self.dialog == Dialog::Uninstall
            && self.mutations_enabled()
            && !self.uninstall.is_pending()
            && matches!(self.uninstall_state(), UninstallState::Ready(_))
    }

    /// Confirm the uninstall dialog; a no-op unless resources are listed
    pub fn confirm_uninstall(&mut self) -> Option<Command> {
        if !self.can_confirm_uninstall() {
            return None;
        }
        let ticket = self.uninstall.start()?;
        tracing::debug!("Uninstalling {}", self.release.key());
        Some(Command::Uninstall {
            namespace: self.release.namespace.clone(),
            release: self.release.name.clone(),
            ticket,
        })
    }

    /// Tests can only be run for a release with a namespace and chart
    pub fn can_run_tests(&self) -> bool {
        self.mutations_enabled()
            && !self.release.namespace.is_empty()
            && !self.release.chart_name.is_empty()
    }

    pub fn open_tests(&mut self) -> bool {
        if !self.can_run_tests() {
            return false;
        }
        self.dialog = Dialog::Tests;
        true
    }

    /// Run the release tests once; a no-op while a run is in flight
    pub fn run_tests(&mut self) -> Option<Command> {
        if self.dialog != Dialog::Tests || !self.can_run_tests() {
            return None;
        }
        let ticket = self.tests.start()?;
        self.test_result = Loadable::Loading;
        Some(Command::RunTests {
            namespace: self.release.namespace.clone(),
            release: self.release.name.clone(),
            ticket,
        })
    }

    /// Re-check the latest chart version
    pub fn check_for_new_version(&mut self) -> Option<Command> {
        if self.latest_fetch.is_pending() {
            return None;
        }
        Some(self.fetch_latest())
    }

    pub fn upgrade_action(&self) -> UpgradeAction {
        if !self.mutations_enabled() {
            return UpgradeAction::ReadOnly;
        }
        match &self.latest {
            Loadable::Idle | Loadable::Loading => UpgradeAction::Checking,
            Loadable::Failed(_) | Loadable::Ready(None) => UpgradeAction::Offered { latest: None },
            Loadable::Ready(Some(latest)) if latest.is_suggested_repo => {
                UpgradeAction::AddRepository {
                    repository: latest.repository.clone(),
                    url: latest.suggested_url().map(str::to_string),
                }
            }
            Loadable::Ready(Some(latest)) => UpgradeAction::Offered {
                latest: Some(latest.clone()),
            },
        }
    }

    /// Open the reconfigure dialog if the upgrade action is offered
    pub fn open_reconfigure(&mut self) -> Option<Command> {
        if !matches!(self.upgrade_action(), UpgradeAction::Offered { .. }) {
            return None;
        }
        // A pending or rejected submission is shown again as it was
        if let Some(form) = &self.reconfigure {
            if form.is_submitting() || form.error().is_some() {
                self.dialog = Dialog::Reconfigure;
                return None;
            }
        }
        let (form, command) = ReconfigureForm::new(&self.release);
        self.reconfigure = Some(form);
        self.dialog = Dialog::Reconfigure;
        Some(command)
    }

    /// Close whatever dialog is open
    ///
    /// In-flight mutations keep running and still settle into the view.
    pub fn close_dialog(&mut self) {
        if self.dialog == Dialog::Reconfigure
            && !self.reconfigure.as_ref().is_some_and(|f| f.is_submitting())
        {
            self.reconfigure = None;
        }
        self.dialog = Dialog::None;
    }

    /// Re-sync after a settled revision-changing mutation
    fn resync(&mut self, commands: &mut Vec<Command>) {
        self.adopt_latest_revision = true;
        commands.push(self.fetch_history());
        commands.push(self.fetch_latest());
    }

    /// Apply settled requests and return follow-up commands
    pub fn poll(&mut self) -> Vec<Command> {
        let mut commands = Vec::new();

        if let Some(result) = self.latest_fetch.poll() {
            self.latest.apply(result);
        }

        if let Some(result) = self.history_fetch.poll() {
            self.history.apply(result);
            if std::mem::take(&mut self.adopt_latest_revision) && self.adopt_newest_revision() {
                commands.push(self.fetch_tab());
            }
        }

        if let Some(result) = self.resources_fetch.poll() {
            self.resources.apply(result);
        }

        if let Some(result) = self.tab_fetch.poll() {
            self.tab_content.apply(result);
        }

        if let Some(result) = self.tests.poll() {
            self.test_result.apply(result);
        }

        if let Some(result) = self.rollback.poll() {
            match result {
                Ok(()) => tracing::info!("Rollback of {} settled", self.release.key()),
                Err(e) => self.rollback_error = Some(e.user_message()),
            }
            self.resync(&mut commands);
        }

        if let Some(result) = self.uninstall.poll() {
            match result {
                Ok(()) => {
                    tracing::info!("Release {} uninstalled", self.release.key());
                    self.deleted = true;
                    self.dialog = Dialog::None;
                    self.reconfigure = None;
                    self.navigation = Some(Route::Home);
                }
                Err(e) => self.uninstall_error = Some(e.user_message()),
            }
        }

        if let Some(form) = self.reconfigure.as_mut() {
            let (follow_up, outcome) = form.poll();
            commands.extend(follow_up);
            match outcome {
                Some(ReconfigureOutcome::Succeeded) => {
                    self.reconfigure = None;
                    if self.dialog == Dialog::Reconfigure {
                        self.dialog = Dialog::None;
                    }
                    self.navigation = Some(Route::Home);
                    self.resync(&mut commands);
                }
                Some(ReconfigureOutcome::Failed) => self.resync(&mut commands),
                None => {}
            }
        }

        commands
    }

    /// Replace the local release with the newest revision from history
    ///
    /// Returns true when the revision moved, in which case the open tab
    /// belongs to the old revision and must be read again.
    fn adopt_newest_revision(&mut self) -> bool {
        let Some(newest) = self.history.ready().cloned().and_then(latest_revision) else {
            return false;
        };
        let moved = newest.revision != self.release.revision;
        if moved {
            tracing::debug!(
                "Release {} now at revision {}",
                newest.key(),
                newest.revision
            );
        }
        self.release = newest;
        moved
    }
}
