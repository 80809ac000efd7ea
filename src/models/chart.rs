//! Chart repository models

use serde::{Deserialize, Serialize};
use std::fmt;

/// A candidate chart version sourced from a specific repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartVersionOption {
    pub repository: String,
    pub version: String,
}

impl ChartVersionOption {
    pub fn new(repository: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            version: version.into(),
        }
    }

    /// Chart reference understood by the backend: `<repository>/<chart>`
    pub fn chart_ref(&self, chart_name: &str) -> String {
        chart_ref(&self.repository, chart_name)
    }
}

impl fmt::Display for ChartVersionOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.repository, self.version)
    }
}

/// Build a `<repository>/<chart>` reference
pub fn chart_ref(repository: &str, chart_name: &str) -> String {
    format!("{}/{}", repository, chart_name)
}

/// Latest known version of a chart across repositories
///
/// When `is_suggested_repo` is set the repository is only a heuristic match
/// that is not configured on the backend, so nothing can be installed from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestVersionResult {
    pub version: String,
    pub repository: String,
    #[serde(default)]
    pub is_suggested_repo: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub urls: Vec<String>,
}

impl LatestVersionResult {
    /// URL to add the suggested repository from, if the backend provided one
    pub fn suggested_url(&self) -> Option<&str> {
        self.urls.first().map(String::as_str)
    }

    /// Whether this result names a strictly newer version than `current`
    ///
    /// Versions are compared as semver when both parse (a leading `v` is
    /// ignored); otherwise any difference counts as newer.
    pub fn is_newer_than(&self, current: &str) -> bool {
        match (parse_version(&self.version), parse_version(current)) {
            (Some(latest), Some(current)) => latest > current,
            _ => !self.version.is_empty() && self.version != current,
        }
    }
}

fn parse_version(s: &str) -> Option<semver::Version> {
    semver::Version::parse(s.trim().trim_start_matches('v')).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn latest(version: &str) -> LatestVersionResult {
        LatestVersionResult {
            version: version.to_string(),
            repository: "bitnami".to_string(),
            is_suggested_repo: false,
            urls: Vec::new(),
        }
    }

    #[test]
    fn test_latest_version_deserialization() {
        let json = r#"{"version":"1.2.0","repository":"bitnami","isSuggestedRepo":true,"urls":["https://charts.bitnami.com/bitnami"]}"#;
        let result: LatestVersionResult = serde_json::from_str(json).unwrap();
        assert!(result.is_suggested_repo);
        assert_eq!(
            result.suggested_url(),
            Some("https://charts.bitnami.com/bitnami")
        );
    }

    #[test]
    fn test_suggested_flag_defaults_to_false() {
        let result: LatestVersionResult =
            serde_json::from_str(r#"{"version":"1.2.0","repository":"bitnami"}"#).unwrap();
        assert!(!result.is_suggested_repo);
        assert!(result.urls.is_empty());
    }

    #[test]
    fn test_is_newer_than_semver() {
        assert!(latest("1.10.0").is_newer_than("1.9.3"));
        assert!(latest("v2.0.0").is_newer_than("1.9.3"));
        assert!(!latest("1.2.0").is_newer_than("1.2.0"));
        assert!(!latest("1.1.0").is_newer_than("1.2.0"));
    }

    #[test]
    fn test_is_newer_than_non_semver() {
        assert!(latest("2024.01").is_newer_than("2023.12"));
        assert!(!latest("2024.01").is_newer_than("2024.01"));
        assert!(!latest("").is_newer_than("1.0.0"));
    }

    #[test]
    fn test_option_display() {
        let option = ChartVersionOption::new("bitnami", "1.2.0");
        assert_eq!(option.to_string(), "bitnami @ 1.2.0");
        assert_eq!(option.chart_ref("nginx"), "bitnami/nginx");
    }
}
