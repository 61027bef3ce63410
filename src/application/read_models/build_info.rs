use crate::build_info::domain::{ArtifactRecord, Checksums, ModuleMetadata, RequestedByMap, Scope};
use crate::build_info::services::VerifiedDependency;
use serde::Serialize;

/// Module type reported for every Gradle module
pub const MODULE_TYPE: &str = "gradle";

/// One module of the build-info record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfoModule {
    /// `group:artifact:version`
    pub id: String,
    #[serde(rename = "type")]
    pub module_type: String,
    pub dependencies: Vec<BuildInfoDependency>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<BuildInfoArtifact>,
}

impl BuildInfoModule {
    pub fn new(
        metadata: &ModuleMetadata,
        dependencies: Vec<BuildInfoDependency>,
        artifacts: Vec<BuildInfoArtifact>,
    ) -> Self {
        Self {
            id: metadata.id(),
            module_type: MODULE_TYPE.to_string(),
            dependencies,
            artifacts,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfoDependency {
    pub id: String,
    #[serde(rename = "type")]
    pub dep_type: String,
    pub scopes: Vec<Scope>,
    pub checksum: Checksums,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub requested_by: Vec<Vec<String>>,
}

impl BuildInfoDependency {
    pub fn from_verified(dependency: VerifiedDependency, requested_by: &RequestedByMap) -> Self {
        let chains = requested_by.chains(&dependency.record.id);
        Self {
            id: dependency.record.id,
            dep_type: dependency.record.dep_type,
            scopes: dependency.record.scopes.into_iter().collect(),
            checksum: dependency.checksum.checksums,
            requested_by: chains,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfoArtifact {
    #[serde(rename = "type")]
    pub artifact_type: String,
    pub name: String,
    pub path: String,
    pub checksum: Checksums,
}

impl From<&ArtifactRecord> for BuildInfoArtifact {
    fn from(artifact: &ArtifactRecord) -> Self {
        Self {
            artifact_type: artifact.artifact_type.clone(),
            name: artifact.name.clone(),
            path: artifact.path.clone(),
            checksum: artifact.checksum.clone(),
        }
    }
}
