//! Installed releases with upgrade badges

use super::command::Command;
use super::inflight::{InFlight, Loadable};
use super::route::Route;
use crate::models::{LatestVersionResult, Release};
use std::collections::HashMap;

/// Headless state of the release list page
///
/// Latest versions are looked up once per chart name after the list loads.
/// A failed lookup simply shows no badge.
#[derive(Debug, Default)]
pub struct ReleaseList {
    releases: Loadable<Vec<Release>>,
    fetch: InFlight<Vec<Release>>,
    latest: HashMap<String, Option<LatestVersionResult>>,
    latest_fetches: HashMap<String, InFlight<Option<LatestVersionResult>>>,
    selected: usize,
    filter: String,
}

impl ReleaseList {
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)load the release list
    pub fn load(&mut self) -> Command {
        self.releases = Loadable::Loading;
        Command::ListReleases {
            ticket: self.fetch.restart(),
        }
    }

    pub fn releases(&self) -> &Loadable<Vec<Release>> {
        &self.releases
    }

    pub fn is_loading(&self) -> bool {
        self.fetch.is_pending()
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Restrict the visible releases to names or namespaces containing `filter`
    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
        self.selected = 0;
    }

    /// Releases matching the current filter, sorted by namespace then name
    pub fn visible(&self) -> Vec<&Release> {
        let Some(releases) = self.releases.ready() else {
            return Vec::new();
        };
        let needle = self.filter.to_lowercase();
        let mut visible: Vec<&Release> = releases
            .iter()
            .filter(|r| {
                needle.is_empty()
                    || r.name.to_lowercase().contains(&needle)
                    || r.namespace.to_lowercase().contains(&needle)
            })
            .collect();
        visible.sort_by(|a, b| (&a.namespace, &a.name).cmp(&(&b.namespace, &b.name)));
        visible
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<&Release> {
        self.visible().get(self.selected).copied()
    }

    pub fn select_next(&mut self) {
        let len = self.visible().len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Detail route of the selected release
    pub fn route_for_selected(&self, context: &str) -> Option<Route> {
        self.selected().map(|r| Route::for_release(r, context))
    }

    /// Latest version known for a chart name, if it was found
    pub fn latest_for(&self, chart_name: &str) -> Option<&LatestVersionResult> {
        self.latest.get(chart_name).and_then(Option::as_ref)
    }

    /// Newer version to advertise next to `release`, if any
    pub fn upgrade_badge(&self, release: &Release) -> Option<&str> {
        let latest = self.latest_for(&release.chart_name)?;
        if latest.is_suggested_repo || !latest.is_newer_than(&release.chart_ver) {
            return None;
        }
        Some(latest.version.as_str())
    }

    /// Apply settled requests and return follow-up commands
    pub fn poll(&mut self) -> Vec<Command> {
        let mut commands = Vec::new();

        if let Some(result) = self.fetch.poll() {
            self.releases.apply(result);
            let len = self.visible().len();
            if self.selected >= len {
                self.selected = len.saturating_sub(1);
            }
            commands.extend(self.fetch_latest_versions());
        }

        let mut settled = Vec::new();
        for (chart_name, slot) in self.latest_fetches.iter_mut() {
            if let Some(result) = slot.poll() {
                settled.push((chart_name.clone(), result));
            }
        }
        for (chart_name, result) in settled {
            self.latest_fetches.remove(&chart_name);
            match result {
                Ok(latest) => {
                    self.latest.insert(chart_name, latest);
                }
                Err(e) => {
                    tracing::debug!("No latest version for {}: {}", chart_name, e);
                    self.latest.insert(chart_name, None);
                }
            }
        }

        commands
    }

    fn fetch_latest_versions(&mut self) -> Vec<Command> {
        let Some(releases) = self.releases.ready() else {
            return Vec::new();
        };

        let mut chart_names: Vec<String> = releases
            .iter()
            .map(|r| r.chart_name.clone())
            .filter(|name| !name.is_empty())
            .collect();
        chart_names.sort();
        chart_names.dedup();

        chart_names
            .into_iter()
            .filter(|name| !self.latest.contains_key(name))
            .filter_map(|chart_name| {
                let slot = self.latest_fetches.entry(chart_name.clone()).or_default();
                let ticket = slot.start()?;
                Some(Command::FetchLatestVersion { chart_name, ticket })
            })
            .collect()
    }
}
