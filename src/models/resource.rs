//! Cluster resources owned by a release

use serde::{Deserialize, Serialize};

/// Object metadata subset the dashboard displays
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceMetadata {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// A cluster resource that belongs to a release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRef {
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    pub metadata: ResourceMetadata,
}

impl ResourceRef {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            api_version: None,
            metadata: ResourceMetadata {
                name: name.into(),
                namespace: None,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }
}

/// Output of a release's test hooks; the backend returns it as plain text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TestResult(pub String);

impl TestResult {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}
