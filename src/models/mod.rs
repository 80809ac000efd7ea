//! helmdeck model layer
//!
//! Types exchanged with the release-management backend.

pub mod chart;
pub mod release;
pub mod resource;

pub use chart::{ChartVersionOption, LatestVersionResult, chart_ref};
pub use release::{
    Release, ReleaseInfoKind, ReleaseStatus, ReleaseTab, format_age, release_key,
    rollback_target,
};
pub use resource::{ResourceMetadata, ResourceRef, TestResult};
