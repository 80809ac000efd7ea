//! Navigation targets

use crate::models::{Release, ReleaseTab};
use std::fmt;
use std::str::FromStr;

/// Where the dashboard should be showing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Installed releases; the neutral view after destructive actions
    Home,
    /// Detail page of one release revision
    Revision {
        context: String,
        namespace: String,
        name: String,
        revision: u32,
        tab: ReleaseTab,
    },
}

impl Route {
    /// Detail page of `release` on its default tab
    pub fn for_release(release: &Release, context: &str) -> Self {
        Route::Revision {
            context: context.to_string(),
            namespace: release.namespace.clone(),
            name: release.name.clone(),
            revision: release.revision,
            tab: ReleaseTab::default(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "/"),
            Route::Revision {
                context,
                namespace,
                name,
                revision,
                tab,
            } => write!(
                f,
                "/revision/{}/{}/{}/{}/{}",
                context, namespace, name, revision, tab
            ),
        }
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim_matches('/');
        if trimmed.is_empty() {
            return Ok(Route::Home);
        }

        let parts: Vec<&str> = trimmed.split('/').collect();
        match parts.as_slice() {
            ["revision", context, namespace, name, revision, rest @ ..] if rest.len() <= 1 => {
                let revision: u32 = revision
                    .parse()
                    .map_err(|_| format!("Invalid revision in route: {}", revision))?;
                let tab = rest
                    .first()
                    .map(|t| ReleaseTab::parse_or_default(t))
                    .unwrap_or_default();
                Ok(Route::Revision {
                    context: context.to_string(),
                    namespace: namespace.to_string(),
                    name: name.to_string(),
                    revision,
                    tab,
                })
            }
            _ => Err(format!("Unknown route: {}", s)),
        }
    }
}
