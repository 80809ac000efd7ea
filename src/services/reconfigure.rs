//! Reconfigure (upgrade) dialog
//!
//! Holds the version selection and user values for a new revision of a
//! release. The chart values reference is derived from the current
//! `(repository, version)` selection: every change to either supersedes the
//! previous fetch, and nothing is fetched until a repository is known.

use super::command::Command;
use super::inflight::{InFlight, Loadable};
use crate::api::{ChartValuesQuery, ReconfigureRequest};
use crate::models::{ChartVersionOption, Release};

/// How a submitted reconfigure settled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconfigureOutcome {
    Succeeded,
    Failed,
}

/// State of the reconfigure dialog for one release
#[derive(Debug)]
pub struct ReconfigureForm {
    namespace: String,
    release: String,
    chart_name: String,
    current_version: String,

    versions: Loadable<Vec<ChartVersionOption>>,
    versions_fetch: InFlight<Vec<ChartVersionOption>>,

    repository: Option<String>,
    version: String,
    user_values: String,

    values: Loadable<String>,
    values_fetch: InFlight<String>,
    values_query: Option<ChartValuesQuery>,

    submit: InFlight<serde_json::Value>,
    error: Option<String>,
}

impl ReconfigureForm {
    /// Open the dialog for `release` and request its version options
    ///
    /// The selected version starts at the release's current chart version.
    pub fn new(release: &Release) -> (Self, Command) {
        let mut form = Self {
            namespace: release.namespace.clone(),
            release: release.name.clone(),
            chart_name: release.chart_name.clone(),
            current_version: release.chart_ver.clone(),
            versions: Loadable::Loading,
            versions_fetch: InFlight::new(),
            repository: None,
            version: release.chart_ver.clone(),
            user_values: String::new(),
            values: Loadable::Idle,
            values_fetch: InFlight::new(),
            values_query: None,
            submit: InFlight::new(),
            error: None,
        };

        let command = Command::FetchVersions {
            chart_name: form.chart_name.clone(),
            ticket: form.versions_fetch.restart(),
        };
        (form, command)
    }

    pub fn chart_name(&self) -> &str {
        &self.chart_name
    }

    pub fn release(&self) -> &str {
        &self.release
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn current_version(&self) -> &str {
        &self.current_version
    }

    pub fn versions(&self) -> &Loadable<Vec<ChartVersionOption>> {
        &self.versions
    }

    pub fn repository(&self) -> Option<&str> {
        self.repository.as_deref()
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn user_values(&self) -> &str {
        &self.user_values
    }

    /// Chart values reference for the current selection
    pub fn chart_values(&self) -> &Loadable<String> {
        &self.values
    }

    /// Query the displayed (or loading) chart values belong to
    pub fn values_query(&self) -> Option<&ChartValuesQuery> {
        self.values_query.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submit.is_pending()
    }

    /// Index of the version option matching the current selection
    pub fn selected_index(&self) -> Option<usize> {
        let repository = self.repository.as_deref()?;
        self.versions.ready()?.iter().position(|option| {
            option.repository == repository && option.version == self.version
        })
    }

    /// Select one of the loaded version options (repository and version)
    pub fn select_option(&mut self, index: usize) -> Option<Command> {
        let option = self.versions.ready()?.get(index)?.clone();
        self.repository = Some(option.repository);
        self.version = option.version;
        self.refresh_values()
    }

    pub fn select_version(&mut self, version: &str) -> Option<Command> {
        self.version = version.to_string();
        self.refresh_values()
    }

    pub fn select_repository(&mut self, repository: &str) -> Option<Command> {
        self.repository = Some(repository.to_string()).filter(|r| !r.is_empty());
        self.refresh_values()
    }

    pub fn set_user_values(&mut self, values: impl Into<String>) {
        self.user_values = values.into();
    }

    /// Fetch chart values for the current selection if it changed
    fn refresh_values(&mut self) -> Option<Command> {
        let Some(repository) = self.repository.clone() else {
            tracing::debug!(
                "Not fetching values for {}: repository unresolved",
                self.chart_name
            );
            return None;
        };

        let query = ChartValuesQuery {
            namespace: self.namespace.clone(),
            chart_name: self.chart_name.clone(),
            repository,
            version: self.version.clone(),
        };

        let unchanged = self.values_query.as_ref() == Some(&query)
            && (self.values_fetch.is_pending() || self.values.ready().is_some());
        if unchanged {
            return None;
        }

        tracing::debug!(
            "Fetching chart values for {}@{}",
            query.chart_ref(),
            query.version
        );
        let ticket = self.values_fetch.restart();
        self.values = Loadable::Loading;
        self.values_query = Some(query.clone());
        Some(Command::FetchChartValues { query, ticket })
    }

    /// Submit the new revision; a no-op while a submission is in flight
    pub fn submit(&mut self) -> Option<Command> {
        if self.submit.is_pending() {
            return None;
        }

        let request = ReconfigureRequest {
            namespace: self.namespace.clone(),
            release: self.release.clone(),
            repository: self.repository.clone().unwrap_or_default(),
            chart_name: self.chart_name.clone(),
            version: self.version.clone(),
            user_values: self.user_values.clone(),
        };
        if let Err(e) = request.validate() {
            self.error = Some(e.reconfigure_message());
            return None;
        }

        self.error = None;
        let ticket = self.submit.start()?;
        Some(Command::Reconfigure { request, ticket })
    }

    /// Apply settled requests
    ///
    /// Returns follow-up commands and, when the submission settled, its
    /// outcome.
    pub fn poll(&mut self) -> (Vec<Command>, Option<ReconfigureOutcome>) {
        let mut commands = Vec::new();

        if let Some(result) = self.versions_fetch.poll() {
            self.versions.apply(result);
            if let Some(first) = self.versions.ready().and_then(|v| v.first()) {
                if self.repository.is_none() {
                    self.repository = Some(first.repository.clone());
                }
            }
            commands.extend(self.refresh_values());
        }

        if let Some(result) = self.values_fetch.poll() {
            self.values.apply(result);
        }

        let outcome = self.submit.poll().map(|result| match result {
            Ok(_) => ReconfigureOutcome::Succeeded,
            Err(e) => {
                self.error = Some(e.reconfigure_message());
                ReconfigureOutcome::Failed
            }
        });

        (commands, outcome)
    }
}
