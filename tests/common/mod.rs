//! Shared fixtures for integration tests
//!
//! `FakeBackend` is an in-memory release backend. It records every call so
//! tests can assert how many requests a view issued.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use helmdeck::api::{ChartValuesQuery, ClientError, ClientResult, ReconfigureRequest, ReleaseApi};
use helmdeck::models::{
    ChartVersionOption, LatestVersionResult, Release, ReleaseInfoKind, ReleaseStatus, ResourceRef,
    TestResult,
};
use helmdeck::services::Command;
use std::collections::HashMap;
use std::sync::Mutex;

pub fn release(namespace: &str, name: &str, chart_name: &str, chart_ver: &str, revision: u32) -> Release {
    Release {
        name: name.to_string(),
        namespace: namespace.to_string(),
        chart: format!("{}-{}", chart_name, chart_ver),
        chart_name: chart_name.to_string(),
        chart_ver: chart_ver.to_string(),
        app_version: String::new(),
        revision,
        status: ReleaseStatus::Deployed,
        updated: Utc.with_ymd_and_hms(2024, 3, revision.min(28), 10, 0, 0).unwrap(),
        description: String::new(),
        icon: None,
        has_tests: None,
    }
}

/// argo-cd 4.5.0 in `default`, at revision 3
pub fn argo_cd() -> Release {
    let mut r = release("default", "argo-cd", "argo-cd", "4.5.0", 3);
    r.app_version = "v2.3.3".to_string();
    r
}

pub fn history_of(current: &Release) -> Vec<Release> {
    (1..=current.revision)
        .map(|revision| {
            let mut r = current.clone();
            r.revision = revision;
            if revision < current.revision {
                r.status = ReleaseStatus::Superseded;
            }
            r
        })
        .collect()
}

pub fn latest(version: &str, repository: &str, suggested: bool) -> LatestVersionResult {
    LatestVersionResult {
        version: version.to_string(),
        repository: repository.to_string(),
        is_suggested_repo: suggested,
        urls: Vec::new(),
    }
}

/// In-memory backend
#[derive(Default)]
pub struct FakeBackend {
    pub calls: Mutex<Vec<String>>,
    pub releases: Mutex<Vec<Release>>,
    pub history: Mutex<HashMap<String, Vec<Release>>>,
    pub resources: Mutex<Vec<ResourceRef>>,
    pub latest: Mutex<HashMap<String, LatestVersionResult>>,
    pub versions: Mutex<Vec<ChartVersionOption>>,
    /// Chart values keyed by `repo/chart@version`
    pub chart_values: Mutex<HashMap<String, String>>,
    pub test_output: Mutex<String>,
    /// Operations that fail, with the error they fail with
    pub failures: Mutex<HashMap<&'static str, ClientError>>,
    pub reconfigures: Mutex<Vec<ReconfigureRequest>>,
    pub rollbacks: Mutex<Vec<u32>>,
}

impl FakeBackend {
    pub fn with_release(release: &Release) -> Self {
        let backend = Self::default();
        backend
            .history
            .lock()
            .unwrap()
            .insert(release.key(), history_of(release));
        backend.releases.lock().unwrap().push(release.clone());
        backend
    }

    pub fn fail(&self, operation: &'static str, err: ClientError) {
        self.failures.lock().unwrap().insert(operation, err);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of recorded calls to `operation`
    pub fn count(&self, operation: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.as_str() == operation)
            .count()
    }

    fn record(&self, operation: &'static str) -> ClientResult<()> {
        self.calls.lock().unwrap().push(operation.to_string());
        match self.failures.lock().unwrap().get(operation) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    /// Append a new revision to a release's history
    fn bump_revision(&self, namespace: &str, name: &str, chart_ver: Option<&str>) {
        let mut history = self.history.lock().unwrap();
        let Some(revisions) = history.get_mut(&format!("{}/{}", namespace, name)) else {
            return;
        };
        let Some(mut newest) = revisions.iter().max_by_key(|r| r.revision).cloned() else {
            return;
        };
        for r in revisions.iter_mut() {
            r.status = ReleaseStatus::Superseded;
        }
        newest.revision += 1;
        newest.status = ReleaseStatus::Deployed;
        if let Some(version) = chart_ver {
            newest.chart_ver = version.to_string();
            newest.chart = format!("{}-{}", newest.chart_name, version);
        }
        revisions.push(newest);
    }
}

#[async_trait]
impl ReleaseApi for FakeBackend {
    async fn list_releases(&self) -> ClientResult<Vec<Release>> {
        self.record("list_releases")?;
        Ok(self.releases.lock().unwrap().clone())
    }

    async fn get_release(&self, namespace: &str, release: &str) -> ClientResult<Release> {
        self.record("get_release")?;
        self.history
            .lock()
            .unwrap()
            .get(&format!("{}/{}", namespace, release))
            .and_then(|h| h.iter().max_by_key(|r| r.revision).cloned())
            .ok_or_else(|| ClientError::NotFound(format!("{}/{}", namespace, release)))
    }

    async fn get_history(&self, namespace: &str, release: &str) -> ClientResult<Vec<Release>> {
        self.record("get_history")?;
        self.history
            .lock()
            .unwrap()
            .get(&format!("{}/{}", namespace, release))
            .cloned()
            .ok_or_else(|| ClientError::NotFound(format!("{}/{}", namespace, release)))
    }

    async fn get_resources(&self, _namespace: &str, _release: &str) -> ClientResult<Vec<ResourceRef>> {
        self.record("get_resources")?;
        Ok(self.resources.lock().unwrap().clone())
    }

    async fn get_release_info(
        &self,
        _namespace: &str,
        release: &str,
        kind: ReleaseInfoKind,
        revision: u32,
        user_defined_only: bool,
    ) -> ClientResult<String> {
        self.record("get_release_info")?;
        Ok(format!(
            "{} of {} at revision {}{}",
            kind,
            release,
            revision,
            if user_defined_only { " (user defined)" } else { "" }
        ))
    }

    async fn get_latest_version(&self, chart_name: &str) -> ClientResult<Option<LatestVersionResult>> {
        self.record("get_latest_version")?;
        Ok(self.latest.lock().unwrap().get(chart_name).cloned())
    }

    async fn get_versions(&self, _chart_name: &str) -> ClientResult<Vec<ChartVersionOption>> {
        self.record("get_versions")?;
        Ok(self.versions.lock().unwrap().clone())
    }

    async fn get_chart_values(&self, query: &ChartValuesQuery) -> ClientResult<String> {
        self.record("get_chart_values")?;
        let key = format!("{}@{}", query.chart_ref(), query.version);
        Ok(self
            .chart_values
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_default())
    }

    async fn run_tests(&self, _namespace: &str, _release: &str) -> ClientResult<TestResult> {
        self.record("run_tests")?;
        Ok(TestResult(self.test_output.lock().unwrap().clone()))
    }

    async fn rollback(&self, namespace: &str, release: &str, revision: u32) -> ClientResult<()> {
        self.record("rollback")?;
        self.rollbacks.lock().unwrap().push(revision);
        self.bump_revision(namespace, release, None);
        Ok(())
    }

    async fn reconfigure(&self, request: &ReconfigureRequest) -> ClientResult<serde_json::Value> {
        self.record("reconfigure")?;
        self.reconfigures.lock().unwrap().push(request.clone());
        self.bump_revision(&request.namespace, &request.release, Some(&request.version));
        Ok(serde_json::json!({ "name": request.release }))
    }

    async fn uninstall(&self, namespace: &str, release: &str) -> ClientResult<()> {
        self.record("uninstall")?;
        self.history
            .lock()
            .unwrap()
            .remove(&format!("{}/{}", namespace, release));
        self.releases
            .lock()
            .unwrap()
            .retain(|r| !(r.namespace == namespace && r.name == release));
        Ok(())
    }
}

/// Names of the given commands, in order
pub fn names(commands: &[Command]) -> Vec<&'static str> {
    commands.iter().map(Command::name).collect()
}

/// Execute commands against `api` in order
pub async fn execute_all(api: &dyn ReleaseApi, commands: Vec<Command>) {
    for command in commands {
        command.execute(api).await;
    }
}
