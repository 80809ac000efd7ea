//! Release model
//!
//! Types describing a deployed Helm release as reported by the backend,
//! plus the small amount of revision arithmetic the dashboard relies on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status of a release revision as reported by Helm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReleaseStatus {
    Deployed,
    Failed,
    PendingInstall,
    PendingUpgrade,
    PendingRollback,
    Superseded,
    Uninstalling,
    Uninstalled,
    #[serde(other)]
    Unknown,
}

impl ReleaseStatus {
    /// Get the wire name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseStatus::Deployed => "deployed",
            ReleaseStatus::Failed => "failed",
            ReleaseStatus::PendingInstall => "pending-install",
            ReleaseStatus::PendingUpgrade => "pending-upgrade",
            ReleaseStatus::PendingRollback => "pending-rollback",
            ReleaseStatus::Superseded => "superseded",
            ReleaseStatus::Uninstalling => "uninstalling",
            ReleaseStatus::Uninstalled => "uninstalled",
            ReleaseStatus::Unknown => "unknown",
        }
    }

    /// Whether a Helm operation is currently running against this revision
    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            ReleaseStatus::PendingInstall
                | ReleaseStatus::PendingUpgrade
                | ReleaseStatus::PendingRollback
                | ReleaseStatus::Uninstalling
        )
    }
}

impl fmt::Display for ReleaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A deployed package instance within a namespace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Release {
    pub name: String,
    pub namespace: String,
    /// Display name of the chart, usually `<chart>-<version>`
    #[serde(default)]
    pub chart: String,
    #[serde(alias = "chartName")]
    pub chart_name: String,
    #[serde(alias = "chartVersion", default)]
    pub chart_ver: String,
    #[serde(alias = "appVersion", default)]
    pub app_version: String,
    pub revision: u32,
    pub status: ReleaseStatus,
    pub updated: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_tests: Option<bool>,
}

impl Release {
    /// Unique key of the release within a cluster context: `namespace/name`
    pub fn key(&self) -> String {
        release_key(&self.namespace, &self.name)
    }

    /// Revision a rollback would restore, if any
    pub fn rollback_target(&self) -> Option<u32> {
        rollback_target(self.revision)
    }

    /// Compact age of the last update relative to `now`
    pub fn age(&self, now: DateTime<Utc>) -> String {
        format_age(self.updated, now)
    }

    /// App version for display, "N/A" when the chart does not declare one
    pub fn app_version_display(&self) -> &str {
        if self.app_version.is_empty() {
            "N/A"
        } else {
            &self.app_version
        }
    }
}

/// Generate a unique key for a release
pub fn release_key(namespace: &str, name: &str) -> String {
    format!("{}/{}", namespace, name)
}

/// Previous revision of `revision`; revision 1 has nothing to roll back to
pub fn rollback_target(revision: u32) -> Option<u32> {
    if revision > 1 { Some(revision - 1) } else { None }
}

/// Format the time elapsed between `then` and `now` as `45s`, `12m`, `3h` or `2d`
pub fn format_age(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - then).num_seconds().max(0);
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m", secs / 60)
    } else if secs < 86_400 {
        format!("{}h", secs / 3600)
    } else {
        format!("{}d", secs / 86_400)
    }
}

/// Textual release information served per revision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReleaseInfoKind {
    Manifests,
    Values,
    Notes,
}

impl ReleaseInfoKind {
    /// Path segment used by the backend
    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseInfoKind::Manifests => "manifests",
            ReleaseInfoKind::Values => "values",
            ReleaseInfoKind::Notes => "notes",
        }
    }
}

impl fmt::Display for ReleaseInfoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReleaseInfoKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manifests" => Ok(ReleaseInfoKind::Manifests),
            "values" => Ok(ReleaseInfoKind::Values),
            "notes" => Ok(ReleaseInfoKind::Notes),
            _ => Err(format!("Unknown release info kind: {}", s)),
        }
    }
}

/// Tabs of the release detail page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReleaseTab {
    #[default]
    Resources,
    Manifests,
    Values,
    Notes,
}

impl ReleaseTab {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseTab::Resources => "resources",
            ReleaseTab::Manifests => "manifests",
            ReleaseTab::Values => "values",
            ReleaseTab::Notes => "notes",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReleaseTab::Resources => "Resources",
            ReleaseTab::Manifests => "Manifests",
            ReleaseTab::Values => "Values",
            ReleaseTab::Notes => "Notes",
        }
    }

    pub fn all() -> &'static [Self] {
        &[
            ReleaseTab::Resources,
            ReleaseTab::Manifests,
            ReleaseTab::Values,
            ReleaseTab::Notes,
        ]
    }

    /// Info kind backing this tab; the resources tab is served separately
    pub fn info_kind(&self) -> Option<ReleaseInfoKind> {
        match self {
            ReleaseTab::Resources => None,
            ReleaseTab::Manifests => Some(ReleaseInfoKind::Manifests),
            ReleaseTab::Values => Some(ReleaseInfoKind::Values),
            ReleaseTab::Notes => Some(ReleaseInfoKind::Notes),
        }
    }

    /// Only user supplied values are shown on the values tab
    pub fn user_defined_only(&self) -> bool {
        matches!(self, ReleaseTab::Values)
    }

    /// Tab to the right, wrapping around
    pub fn next(&self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|t| t == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    /// Parse a tab name, falling back to the first tab for anything unknown
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl fmt::Display for ReleaseTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReleaseTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "resources" => Ok(ReleaseTab::Resources),
            "manifests" => Ok(ReleaseTab::Manifests),
            "values" => Ok(ReleaseTab::Values),
            "notes" => Ok(ReleaseTab::Notes),
            _ => Err(format!("Unknown release tab: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn release_json() -> serde_json::Value {
        serde_json::json!({
            "name": "argo-cd",
            "namespace": "argocd",
            "revision": 3,
            "updated": "2024-05-01T10:00:00Z",
            "status": "deployed",
            "chart": "argo-cd-5.51.6",
            "chart_name": "argo-cd",
            "chart_ver": "5.51.6",
            "app_version": "v2.9.3",
            "icon": "https://example.com/argo.png",
            "description": "Upgrade complete"
        })
    }

    #[test]
    fn test_release_deserialization() {
        let release: Release = serde_json::from_value(release_json()).unwrap();
        assert_eq!(release.name, "argo-cd");
        assert_eq!(release.revision, 3);
        assert_eq!(release.status, ReleaseStatus::Deployed);
        assert_eq!(release.chart_ver, "5.51.6");
        assert_eq!(release.key(), "argocd/argo-cd");
    }

    #[test]
    fn test_release_camel_case_aliases() {
        let release: Release = serde_json::from_value(serde_json::json!({
            "name": "nginx",
            "namespace": "web",
            "revision": 1,
            "updated": "2024-05-01T10:00:00Z",
            "status": "pending-upgrade",
            "chartName": "nginx",
            "chartVersion": "1.1.0"
        }))
        .unwrap();
        assert_eq!(release.chart_name, "nginx");
        assert_eq!(release.chart_ver, "1.1.0");
        assert!(release.status.is_pending());
        assert_eq!(release.app_version_display(), "N/A");
    }

    #[test]
    fn test_unknown_status_is_tolerated() {
        let mut json = release_json();
        json["status"] = serde_json::json!("something-new");
        let release: Release = serde_json::from_value(json).unwrap();
        assert_eq!(release.status, ReleaseStatus::Unknown);
    }

    #[test]
    fn test_rollback_target() {
        assert_eq!(rollback_target(0), None);
        assert_eq!(rollback_target(1), None);
        assert_eq!(rollback_target(2), Some(1));
        assert_eq!(rollback_target(3), Some(2));
    }

    #[test]
    fn test_format_age() {
        let now = Utc.with_ymd_and_hms(2024, 5, 3, 12, 0, 0).unwrap();
        let at = |secs: i64| now - chrono::Duration::seconds(secs);
        assert_eq!(format_age(at(45), now), "45s");
        assert_eq!(format_age(at(12 * 60), now), "12m");
        assert_eq!(format_age(at(3 * 3600 + 5), now), "3h");
        assert_eq!(format_age(at(2 * 86_400), now), "2d");
        // Clock skew never produces negative ages
        assert_eq!(format_age(at(-30), now), "0s");
    }

    #[test]
    fn test_release_tab_parsing() {
        assert_eq!(ReleaseTab::parse_or_default("notes"), ReleaseTab::Notes);
        assert_eq!(ReleaseTab::parse_or_default("bogus"), ReleaseTab::Resources);
        assert_eq!(ReleaseTab::Notes.next(), ReleaseTab::Resources);
        assert_eq!(
            ReleaseTab::Values.info_kind(),
            Some(ReleaseInfoKind::Values)
        );
        assert!(ReleaseTab::Values.user_defined_only());
        assert!(!ReleaseTab::Manifests.user_defined_only());
    }
}
