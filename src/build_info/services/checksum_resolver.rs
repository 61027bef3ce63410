use super::module_cache::ModuleCache;
use crate::build_info::domain::{ArtifactRecord, Checksums, DependencyRecord};
use crate::shared::checksum::digest_file;
use std::path::PathBuf;

/// Checksums found for one dependency and the file they belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedChecksum {
    pub checksums: Checksums,
    pub path: PathBuf,
}

/// A dependency that survived checksum resolution.
#[derive(Debug, Clone)]
pub struct VerifiedDependency {
    pub record: DependencyRecord,
    pub checksum: ResolvedChecksum,
}

/// Resolves dependency checksums from the publish manifest first and the
/// Gradle module cache second.
///
/// A manifest hit with no digests at all falls through to the cache. A
/// dependency that ends up without any digest is dropped by
/// [`ChecksumResolver::verify_all`].
pub struct ChecksumResolver<'a> {
    manifest: &'a [ArtifactRecord],
    cache: Option<&'a ModuleCache>,
}

impl<'a> ChecksumResolver<'a> {
    pub fn new(manifest: &'a [ArtifactRecord], cache: Option<&'a ModuleCache>) -> Self {
        Self { manifest, cache }
    }

    pub fn resolve(&self, record: &DependencyRecord) -> Option<ResolvedChecksum> {
        if let Some(found) = self.from_manifest(record) {
            return Some(found);
        }
        self.from_cache(record)
    }

    /// Attaches checksums and drops every dependency without one.
    ///
    /// Returns the kept dependencies, in input order, and the number dropped.
    pub fn verify_all(&self, records: Vec<DependencyRecord>) -> (Vec<VerifiedDependency>, usize) {
        let mut verified = Vec::with_capacity(records.len());
        let mut dropped = 0;
        for record in records {
            match self.resolve(&record) {
                Some(checksum) => verified.push(VerifiedDependency { record, checksum }),
                None => {
                    tracing::debug!("Dropping {}: no checksum available", record.id);
                    dropped += 1;
                }
            }
        }
        (verified, dropped)
    }

    fn from_manifest(&self, record: &DependencyRecord) -> Option<ResolvedChecksum> {
        let candidates = manifest_file_names(record);
        let artifact = self
            .manifest
            .iter()
            .find(|artifact| candidates.iter().any(|name| *name == artifact.name))?;

        if artifact.checksum.is_empty() {
            tracing::debug!(
                "Manifest entry {} for {} has no digests",
                artifact.name,
                record.id
            );
            return None;
        }
        Some(ResolvedChecksum {
            checksums: artifact.checksum.clone(),
            path: PathBuf::from(&artifact.path),
        })
    }

    fn from_cache(&self, record: &DependencyRecord) -> Option<ResolvedChecksum> {
        let path = self.cache?.locate(record)?;
        match digest_file(&path) {
            Ok(digests) => Some(ResolvedChecksum {
                checksums: digests.into(),
                path,
            }),
            Err(e) => {
                tracing::warn!("Could not hash {}: {:#}", path.display(), e);
                None
            }
        }
    }
}

/// `artifact-version[-classifier].type`, then `artifact[-classifier].type`.
fn manifest_file_names(record: &DependencyRecord) -> Vec<String> {
    let suffix = record
        .classifier
        .as_deref()
        .map(|classifier| format!("-{}", classifier))
        .unwrap_or_default();

    let mut names = Vec::with_capacity(2);
    if !record.version.is_empty() {
        names.push(format!(
            "{}-{}{}.{}",
            record.name, record.version, suffix, record.dep_type
        ));
    }
    names.push(format!("{}{}.{}", record.name, suffix, record.dep_type));
    names
}
