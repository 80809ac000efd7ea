//! Release subcommand handlers
//!
//! One backend call per subcommand (two for `upgrade` when the repository
//! has to be resolved). Mutations require `--yes`.
//!
//! Backend failures print the generic retry prompt; only a rejected upgrade
//! shows the backend's own message. The raw error goes to the debug log.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Subcommand;
use std::path::PathBuf;

use crate::api::{ChartValuesQuery, ClientError, ReconfigureRequest, ReleaseApi};
use crate::models::{Release, ReleaseInfoKind, rollback_target};

/// Release subcommands
#[derive(Subcommand, Debug)]
pub enum ReleaseCommand {
    /// List installed releases
    Releases {
        /// Only show releases in this namespace
        #[arg(long, short = 'n')]
        namespace: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show the current revision of a release
    Show { namespace: String, release: String },
    /// List all revisions of a release
    History {
        namespace: String,
        release: String,
        #[arg(long)]
        json: bool,
    },
    /// List cluster resources of a release
    Resources { namespace: String, release: String },
    /// Print manifests, values or notes of a revision
    Info {
        namespace: String,
        release: String,
        /// manifests, values or notes
        kind: ReleaseInfoKind,
        /// Revision to read; defaults to the current one
        #[arg(long, short = 'r')]
        revision: Option<u32>,
        /// Only user-supplied values
        #[arg(long)]
        user_defined: bool,
    },
    /// List repository/version pairs available for a chart
    Versions { chart: String },
    /// Show the latest version of a chart
    Latest { chart: String },
    /// Print the default values of a chart version
    Values {
        /// Repository the chart comes from
        repository: String,
        chart: String,
        version: String,
        /// Namespace the values are rendered for
        #[arg(long, short = 'n', default_value = "default")]
        namespace: String,
    },
    /// Run the test hooks of a release
    Test {
        namespace: String,
        release: String,
        #[arg(long)]
        yes: bool,
    },
    /// Roll a release back to its previous revision
    Rollback {
        namespace: String,
        release: String,
        #[arg(long)]
        yes: bool,
    },
    /// Install a new revision with another chart version or values
    Upgrade {
        namespace: String,
        release: String,
        /// Chart version; defaults to the current one
        #[arg(long)]
        version: Option<String>,
        /// Repository; defaults to the first one offering the chart
        #[arg(long)]
        repository: Option<String>,
        /// File with user-supplied values (YAML)
        #[arg(long, short = 'f')]
        values: Option<PathBuf>,
        #[arg(long)]
        yes: bool,
    },
    /// Delete a release and its resources
    Uninstall {
        namespace: String,
        release: String,
        #[arg(long)]
        yes: bool,
    },
}

impl ReleaseCommand {
    /// Whether the command changes backend state
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            ReleaseCommand::Test { .. }
                | ReleaseCommand::Rollback { .. }
                | ReleaseCommand::Upgrade { .. }
                | ReleaseCommand::Uninstall { .. }
        )
    }
}

fn confirm(yes: bool, action: &str) -> Result<()> {
    if !yes {
        anyhow::bail!("{} requires confirmation; re-run with --yes", action);
    }
    Ok(())
}

fn print_releases(releases: &[Release]) {
    let now = Utc::now();
    println!(
        "{:<20} {:<28} {:>4} {:<16} {:<24} {:<12} {:>5}",
        "NAMESPACE", "NAME", "REV", "STATUS", "CHART", "APP VERSION", "AGE"
    );
    for r in releases {
        println!(
            "{:<20} {:<28} {:>4} {:<16} {:<24} {:<12} {:>5}",
            r.namespace,
            r.name,
            r.revision,
            r.status,
            format!("{}-{}", r.chart_name, r.chart_ver),
            r.app_version_display(),
            r.age(now)
        );
    }
}

/// Log a backend failure and keep only the message shown to the user
fn failed(operation: &'static str) -> impl FnOnce(ClientError) -> anyhow::Error {
    move |e| {
        tracing::warn!("{} failed: {}", operation, e);
        anyhow::anyhow!(e.user_message())
    }
}

fn upgrade_failed(e: ClientError) -> anyhow::Error {
    tracing::warn!("Upgrade failed: {}", e);
    anyhow::anyhow!(e.reconfigure_message())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to serialize output")?
    );
    Ok(())
}

/// Handle a release subcommand against `api`
pub async fn handle_release_command(
    cmd: ReleaseCommand,
    api: &dyn ReleaseApi,
    read_only: bool,
) -> Result<()> {
    if read_only && cmd.is_mutation() {
        anyhow::bail!("Refusing to modify releases: readOnly is enabled");
    }

    match cmd {
        ReleaseCommand::Releases { namespace, json } => {
            let mut releases = api.list_releases().await.map_err(failed("List releases"))?;
            if let Some(ns) = namespace.filter(|ns| !ns.is_empty()) {
                releases.retain(|r| r.namespace == ns);
            }
            releases.sort_by(|a, b| (&a.namespace, &a.name).cmp(&(&b.namespace, &b.name)));
            if json {
                print_json(&releases)?;
            } else {
                print_releases(&releases);
            }
        }
        ReleaseCommand::Show { namespace, release } => {
            let release = api
                .get_release(&namespace, &release)
                .await
                .map_err(failed("Get release"))?;
            print_json(&release)?;
        }
        ReleaseCommand::History {
            namespace,
            release,
            json,
        } => {
            let mut history = api
                .get_history(&namespace, &release)
                .await
                .map_err(failed("Get history"))?;
            history.sort_by_key(|r| std::cmp::Reverse(r.revision));
            if json {
                print_json(&history)?;
            } else {
                print_releases(&history);
            }
        }
        ReleaseCommand::Resources { namespace, release } => {
            let resources = api
                .get_resources(&namespace, &release)
                .await
                .map_err(failed("Get resources"))?;
            if resources.is_empty() {
                println!("No resources found");
            }
            for resource in resources {
                println!("{}/{}", resource.kind, resource.name());
            }
        }
        ReleaseCommand::Info {
            namespace,
            release,
            kind,
            revision,
            user_defined,
        } => {
            let revision = match revision {
                Some(revision) => revision,
                None => {
                    api.get_release(&namespace, &release)
                        .await
                        .map_err(failed("Get release"))?
                        .revision
                }
            };
            let text = api
                .get_release_info(&namespace, &release, kind, revision, user_defined)
                .await
                .map_err(failed("Get release info"))?;
            print!("{}", text);
        }
        ReleaseCommand::Versions { chart } => {
            for option in api.get_versions(&chart).await.map_err(failed("Get versions"))? {
                println!("{}", option);
            }
        }
        ReleaseCommand::Latest { chart } => match api
            .get_latest_version(&chart)
            .await
            .map_err(failed("Get latest version"))?
        {
            Some(latest) if latest.is_suggested_repo => {
                println!(
                    "{} {} (repository '{}' is not configured{})",
                    chart,
                    latest.version,
                    latest.repository,
                    latest
                        .suggested_url()
                        .map(|u| format!("; add it from {}", u))
                        .unwrap_or_default()
                );
            }
            Some(latest) => println!("{} {} ({})", chart, latest.version, latest.repository),
            None => println!("No version information found for {}", chart),
        },
        ReleaseCommand::Values {
            repository,
            chart,
            version,
            namespace,
        } => {
            let query = ChartValuesQuery {
                namespace,
                chart_name: chart,
                repository,
                version,
            };
            let values = api
                .get_chart_values(&query)
                .await
                .map_err(failed("Get chart values"))?;
            print!("{}", values);
        }
        ReleaseCommand::Test {
            namespace,
            release,
            yes,
        } => {
            confirm(yes, "Running tests")?;
            let result = api
                .run_tests(&namespace, &release)
                .await
                .map_err(failed("Run tests"))?;
            if result.is_empty() {
                println!("Tests finished without output");
            } else {
                println!("{}", result.as_str());
            }
        }
        ReleaseCommand::Rollback {
            namespace,
            release,
            yes,
        } => {
            let current = api
                .get_release(&namespace, &release)
                .await
                .map_err(failed("Get release"))?;
            let target = rollback_target(current.revision).with_context(|| {
                format!("{} has no previous revision to roll back to", current.key())
            })?;
            confirm(yes, "Rollback")?;
            api.rollback(&namespace, &release, current.revision)
                .await
                .map_err(failed("Rollback"))?;
            println!(
                "Rolled back {} from revision {} to {}",
                current.key(),
                current.revision,
                target
            );
        }
        ReleaseCommand::Upgrade {
            namespace,
            release,
            version,
            repository,
            values,
            yes,
        } => {
            let current = api
                .get_release(&namespace, &release)
                .await
                .map_err(failed("Get release"))?;
            let repository = match repository {
                Some(repository) => repository,
                None => api
                    .get_versions(&current.chart_name)
                    .await
                    .map_err(failed("Get versions"))?
                    .into_iter()
                    .next()
                    .map(|option| option.repository)
                    .with_context(|| {
                        format!("No repository offers chart {}", current.chart_name)
                    })?,
            };
            let user_values = match values {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read values file: {}", path.display()))?,
                None => String::new(),
            };
            let request = ReconfigureRequest {
                namespace,
                release,
                repository,
                chart_name: current.chart_name.clone(),
                version: version.unwrap_or_else(|| current.chart_ver.clone()),
                user_values,
            };
            confirm(yes, "Upgrade")?;
            api.reconfigure(&request).await.map_err(upgrade_failed)?;
            println!(
                "Upgraded {} to {}@{}",
                current.key(),
                request.chart_ref(),
                request.version
            );
        }
        ReleaseCommand::Uninstall {
            namespace,
            release,
            yes,
        } => {
            let resources = api
                .get_resources(&namespace, &release)
                .await
                .map_err(failed("Get resources"))?;
            if resources.is_empty() {
                anyhow::bail!("{}/{} has no resources to uninstall", namespace, release);
            }
            for resource in &resources {
                println!("  {}/{}", resource.kind, resource.name());
            }
            confirm(yes, "Uninstall")?;
            api.uninstall(&namespace, &release)
                .await
                .map_err(failed("Uninstall"))?;
            println!("Uninstalled {}/{}", namespace, release);
        }
    }

    Ok(())
}
