//! Backend commands emitted by views
//!
//! Views never talk to the backend directly. They return `Command`s; the
//! caller executes them against a [`ReleaseApi`] and the result flows back
//! through the command's ticket.

use super::inflight::Ticket;
use crate::api::{ChartValuesQuery, ClientResult, ReconfigureRequest, ReleaseApi};
use crate::models::{
    ChartVersionOption, LatestVersionResult, Release, ReleaseInfoKind, ResourceRef, TestResult,
};

/// A single backend call together with its completion ticket
#[derive(Debug)]
pub enum Command {
    ListReleases {
        ticket: Ticket<Vec<Release>>,
    },
    FetchHistory {
        namespace: String,
        release: String,
        ticket: Ticket<Vec<Release>>,
    },
    FetchResources {
        namespace: String,
        release: String,
        ticket: Ticket<Vec<ResourceRef>>,
    },
    FetchReleaseInfo {
        namespace: String,
        release: String,
        kind: ReleaseInfoKind,
        revision: u32,
        user_defined_only: bool,
        ticket: Ticket<String>,
    },
    FetchLatestVersion {
        chart_name: String,
        ticket: Ticket<Option<LatestVersionResult>>,
    },
    FetchVersions {
        chart_name: String,
        ticket: Ticket<Vec<ChartVersionOption>>,
    },
    FetchChartValues {
        query: ChartValuesQuery,
        ticket: Ticket<String>,
    },
    RunTests {
        namespace: String,
        release: String,
        ticket: Ticket<TestResult>,
    },
    Rollback {
        namespace: String,
        release: String,
        revision: u32,
        ticket: Ticket<()>,
    },
    Reconfigure {
        request: ReconfigureRequest,
        ticket: Ticket<serde_json::Value>,
    },
    Uninstall {
        namespace: String,
        release: String,
        ticket: Ticket<()>,
    },
}

impl Command {
    /// Human-readable name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Command::ListReleases { .. } => "List releases",
            Command::FetchHistory { .. } => "Fetch history",
            Command::FetchResources { .. } => "Fetch resources",
            Command::FetchReleaseInfo { .. } => "Fetch release info",
            Command::FetchLatestVersion { .. } => "Fetch latest version",
            Command::FetchVersions { .. } => "Fetch versions",
            Command::FetchChartValues { .. } => "Fetch chart values",
            Command::RunTests { .. } => "Run tests",
            Command::Rollback { .. } => "Rollback",
            Command::Reconfigure { .. } => "Reconfigure",
            Command::Uninstall { .. } => "Uninstall",
        }
    }

    /// Whether the command changes backend state
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Command::RunTests { .. }
                | Command::Rollback { .. }
                | Command::Reconfigure { .. }
                | Command::Uninstall { .. }
        )
    }

    /// Perform the call and deliver its result. Exactly one backend request
    /// is made; failures are never retried here.
    pub async fn execute(self, api: &dyn ReleaseApi) {
        let name = self.name();
        tracing::debug!("Executing command: {}", name);

        match self {
            Command::ListReleases { ticket } => finish(name, ticket, api.list_releases().await),
            Command::FetchHistory {
                namespace,
                release,
                ticket,
            } => finish(name, ticket, api.get_history(&namespace, &release).await),
            Command::FetchResources {
                namespace,
                release,
                ticket,
            } => finish(
                name,
                ticket,
                api.get_resources(&namespace, &release).await,
            ),
            Command::FetchReleaseInfo {
                namespace,
                release,
                kind,
                revision,
                user_defined_only,
                ticket,
            } => finish(
                name,
                ticket,
                api.get_release_info(&namespace, &release, kind, revision, user_defined_only)
                    .await,
            ),
            Command::FetchLatestVersion { chart_name, ticket } => {
                finish(name, ticket, api.get_latest_version(&chart_name).await)
            }
            Command::FetchVersions { chart_name, ticket } => {
                finish(name, ticket, api.get_versions(&chart_name).await)
            }
            Command::FetchChartValues { query, ticket } => {
                // Nobody is waiting for this selection anymore
                if ticket.is_superseded() {
                    tracing::debug!(
                        "Skipping superseded values fetch for {}@{}",
                        query.chart_ref(),
                        query.version
                    );
                    return;
                }
                finish(name, ticket, api.get_chart_values(&query).await)
            }
            Command::RunTests {
                namespace,
                release,
                ticket,
            } => finish(name, ticket, api.run_tests(&namespace, &release).await),
            Command::Rollback {
                namespace,
                release,
                revision,
                ticket,
            } => finish(
                name,
                ticket,
                api.rollback(&namespace, &release, revision).await,
            ),
            Command::Reconfigure { request, ticket } => {
                finish(name, ticket, api.reconfigure(&request).await)
            }
            Command::Uninstall {
                namespace,
                release,
                ticket,
            } => finish(name, ticket, api.uninstall(&namespace, &release).await),
        }
    }
}

fn finish<T>(name: &str, ticket: Ticket<T>, result: ClientResult<T>) {
    if let Err(ref e) = result {
        tracing::warn!("{} failed: {}", name, e);
    }
    if !ticket.complete(result) {
        tracing::debug!("{} result discarded: superseded", name);
    }
}
