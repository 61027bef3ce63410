use crate::shared::checksum::FileDigests;
use serde::Serialize;

/// Digest set of one file. Any subset may be present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Checksums {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub md5: Option<String>,
}

impl Checksums {
    /// Builds a digest set, treating empty strings as absent.
    pub fn new(sha1: Option<String>, sha256: Option<String>, md5: Option<String>) -> Self {
        let present = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        Self {
            sha1: present(sha1),
            sha256: present(sha256),
            md5: present(md5),
        }
    }

    /// True when no digest at all is available.
    pub fn is_empty(&self) -> bool {
        self.sha1.is_none() && self.sha256.is_none() && self.md5.is_none()
    }
}

impl From<FileDigests> for Checksums {
    fn from(digests: FileDigests) -> Self {
        Self::new(
            Some(digests.sha1),
            Some(digests.sha256),
            Some(digests.md5),
        )
    }
}

/// One file produced by the local publish step, as listed in the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactRecord {
    /// Owning module path; empty for the root module
    pub module_name: String,
    pub artifact_type: String,
    pub name: String,
    pub path: String,
    pub checksum: Checksums,
}
