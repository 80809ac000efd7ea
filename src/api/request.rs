//! Request parameter types with client-side validation
//!
//! Inputs are checked before any request is issued so that obviously
//! unresolvable calls (unselected repository, revision 1 rollback) never
//! reach the backend.

use super::error::{ClientError, ClientResult};
use crate::models::chart_ref;

/// Reject empty required fields
pub fn require(value: &str, field: &str) -> ClientResult<()> {
    if value.trim().is_empty() {
        return Err(ClientError::ValidationRejected(format!(
            "{} is required",
            field
        )));
    }
    Ok(())
}

/// Validate a `(namespace, release)` pair
pub fn require_release(namespace: &str, release: &str) -> ClientResult<()> {
    require(namespace, "namespace")?;
    require(release, "release name")
}

/// Rollback is only possible from revision 2 onwards
pub fn require_rollback_revision(revision: u32) -> ClientResult<()> {
    if revision <= 1 {
        return Err(ClientError::ValidationRejected(format!(
            "cannot roll back revision {}: no previous revision",
            revision
        )));
    }
    Ok(())
}

/// Parameters of a chart values lookup
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChartValuesQuery {
    pub namespace: String,
    pub chart_name: String,
    pub repository: String,
    pub version: String,
}

impl ChartValuesQuery {
    pub fn validate(&self) -> ClientResult<()> {
        require(&self.chart_name, "chart name")?;
        require(&self.repository, "repository")?;
        require(&self.version, "version")
    }

    pub fn chart_ref(&self) -> String {
        chart_ref(&self.repository, &self.chart_name)
    }
}

/// Upgrade or reconfigure an installed release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconfigureRequest {
    pub namespace: String,
    /// Name of the installed release
    pub release: String,
    pub repository: String,
    pub chart_name: String,
    pub version: String,
    /// Raw user supplied values document, may be empty
    pub user_values: String,
}

impl ReconfigureRequest {
    pub fn validate(&self) -> ClientResult<()> {
        require_release(&self.namespace, &self.release)?;
        require(&self.chart_name, "chart name")?;
        require(&self.repository, "repository")?;
        require(&self.version, "version")
    }

    pub fn chart_ref(&self) -> String {
        chart_ref(&self.repository, &self.chart_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ReconfigureRequest {
        ReconfigureRequest {
            namespace: "web".into(),
            release: "nginx".into(),
            repository: "bitnami".into(),
            chart_name: "nginx".into(),
            version: "1.2.0".into(),
            user_values: String::new(),
        }
    }

    #[test]
    fn test_reconfigure_validation() {
        assert!(request().validate().is_ok());
        assert_eq!(request().chart_ref(), "bitnami/nginx");

        let unresolved = ReconfigureRequest {
            repository: String::new(),
            ..request()
        };
        assert!(matches!(
            unresolved.validate(),
            Err(ClientError::ValidationRejected(msg)) if msg.contains("repository")
        ));
    }

    #[test]
    fn test_rollback_revision_validation() {
        assert!(require_rollback_revision(1).is_err());
        assert!(require_rollback_revision(0).is_err());
        assert!(require_rollback_revision(2).is_ok());
    }

    #[test]
    fn test_values_query_requires_repository() {
        let query = ChartValuesQuery {
            namespace: "web".into(),
            chart_name: "nginx".into(),
            repository: "".into(),
            version: "1.2.0".into(),
        };
        assert!(query.validate().is_err());
    }
}
