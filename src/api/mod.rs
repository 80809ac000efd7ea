//! Release-management backend client
//!
//! `ReleaseApi` is the typed boundary between UI intent and backend calls.
//! Every dashboard operation goes through it; `HttpReleaseClient` is the
//! production implementation.

mod error;
mod http;
mod request;

pub use error::{ClientError, ClientResult};
pub use http::HttpReleaseClient;
pub use request::{
    ChartValuesQuery, ReconfigureRequest, require, require_release, require_rollback_revision,
};

use crate::models::{
    ChartVersionOption, LatestVersionResult, Release, ReleaseInfoKind, ResourceRef, TestResult,
};
use async_trait::async_trait;

/// Operations a dashboard performs against the release backend
///
/// None of the operations retry on their own; retries are always user
/// initiated.
#[async_trait]
pub trait ReleaseApi: Send + Sync {
    /// List installed releases across namespaces
    async fn list_releases(&self) -> ClientResult<Vec<Release>>;

    /// Current state of a release (its highest revision)
    async fn get_release(&self, namespace: &str, release: &str) -> ClientResult<Release>;

    /// All revisions of a release
    async fn get_history(&self, namespace: &str, release: &str) -> ClientResult<Vec<Release>>;

    /// Cluster resources that belong to a release
    async fn get_resources(&self, namespace: &str, release: &str)
    -> ClientResult<Vec<ResourceRef>>;

    /// Manifests, values or notes of a given revision
    async fn get_release_info(
        &self,
        namespace: &str,
        release: &str,
        kind: ReleaseInfoKind,
        revision: u32,
        user_defined_only: bool,
    ) -> ClientResult<String>;

    /// Latest version of a chart; only the first backend match is significant
    async fn get_latest_version(&self, chart_name: &str)
    -> ClientResult<Option<LatestVersionResult>>;

    /// Every repository/version pair a chart name resolves to
    async fn get_versions(&self, chart_name: &str) -> ClientResult<Vec<ChartVersionOption>>;

    /// Rendered default values of a chart version
    async fn get_chart_values(&self, query: &ChartValuesQuery) -> ClientResult<String>;

    /// Run the release's test hooks
    async fn run_tests(&self, namespace: &str, release: &str) -> ClientResult<TestResult>;

    /// Roll a release back from `revision` to the revision before it
    async fn rollback(&self, namespace: &str, release: &str, revision: u32) -> ClientResult<()>;

    /// Install a new revision with another chart version and/or values
    async fn reconfigure(&self, request: &ReconfigureRequest) -> ClientResult<serde_json::Value>;

    /// Delete the release from the cluster
    async fn uninstall(&self, namespace: &str, release: &str) -> ClientResult<()>;
}

/// Pick the newest revision out of a release history
pub fn latest_revision(history: Vec<Release>) -> Option<Release> {
    history.into_iter().max_by_key(|r| r.revision)
}
