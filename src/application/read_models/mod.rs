//! Read models handed to formatters
//!
//! These mirror the collaborator build-info record: modules keyed by
//! `group:artifact:version`, each with its dependencies and artifacts.

mod build_info;

pub use build_info::{BuildInfoArtifact, BuildInfoDependency, BuildInfoModule, MODULE_TYPE};
