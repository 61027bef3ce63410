//! Deployed-artifact manifest produced by a local publish step.
//!
//! The manifest is written by a Gradle init script injected for one run; it
//! lists every archive the build produced with its digests:
//!
//! ```json
//! [{"module_name": ":app", "type": "jar", "name": "app-1.0.jar",
//!   "path": "/work/app/build/libs/app-1.0.jar",
//!   "sha1": "…", "sha256": "…", "md5": "…"}]
//! ```

use crate::build_info::domain::{normalize_module_path, ArtifactRecord, Checksums};
use crate::shared::error::GradleBuildInfoError;
use crate::shared::Result;
use serde::Deserialize;

/// Task registered by [`MANIFEST_INIT_SCRIPT`].
pub const MANIFEST_TASK: &str = "generateBuildInfoManifest";

/// Project property naming the file the manifest is written to.
pub const MANIFEST_PATH_PROPERTY: &str = "buildInfoManifestPath";

/// Init script adding [`MANIFEST_TASK`] to the root project.
pub const MANIFEST_INIT_SCRIPT: &str = r#"import groovy.json.JsonOutput
import java.security.MessageDigest

String buildInfoDigest(File file, String algorithm) {
    def md = MessageDigest.getInstance(algorithm)
    file.eachByte(65536) { bytes, count -> md.update(bytes, 0, count) }
    md.digest().encodeHex().toString()
}

gradle.rootProject { root ->
    root.tasks.register('generateBuildInfoManifest') {
        doLast {
            def entries = []
            root.allprojects.each { p ->
                p.tasks.withType(org.gradle.api.tasks.bundling.AbstractArchiveTask).each { task ->
                    def file = task.archiveFile.get().asFile
                    if (!file.isFile()) {
                        return
                    }
                    entries << [
                        module_name: p.path,
                        type       : task.archiveExtension.getOrElse(''),
                        name       : file.name,
                        path       : file.absolutePath,
                        sha1       : buildInfoDigest(file, 'SHA-1'),
                        sha256     : buildInfoDigest(file, 'SHA-256'),
                        md5        : buildInfoDigest(file, 'MD5'),
                    ]
                }
            }
            new File(root.property('buildInfoManifestPath').toString()).text = JsonOutput.toJson(entries)
        }
    }
}
"#;

#[derive(Debug, Deserialize)]
struct ManifestEntry {
    #[serde(default)]
    module_name: String,
    #[serde(default, rename = "type")]
    artifact_type: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    path: String,
    sha1: Option<String>,
    sha256: Option<String>,
    md5: Option<String>,
}

/// Parses manifest JSON into artifact records with normalized module names.
pub fn parse_manifest(json: &str) -> Result<Vec<ArtifactRecord>> {
    let entries: Vec<ManifestEntry> =
        serde_json::from_str(json).map_err(|e| GradleBuildInfoError::ManifestParseError {
            details: e.to_string(),
        })?;

    Ok(entries
        .into_iter()
        .filter(|entry| !entry.name.is_empty())
        .map(|entry| ArtifactRecord {
            module_name: normalize_module_name(&entry.module_name),
            artifact_type: entry.artifact_type,
            name: entry.name,
            path: entry.path,
            checksum: Checksums::new(entry.sha1, entry.sha256, entry.md5),
        })
        .collect())
}

/// `:app` → `app`, `:` and `::` → `` (root).
pub fn normalize_module_name(module_name: &str) -> String {
    normalize_module_path(module_name)
}
