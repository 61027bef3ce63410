use crate::build_info::domain::DependencyRecord;
use crate::shared::security::PathSandbox;
use crate::shared::Result;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Environment variable overriding the Gradle user home.
pub const GRADLE_USER_HOME_ENV: &str = "GRADLE_USER_HOME";

const FILES_LAYOUT: [&str; 3] = ["caches", "modules-2", "files-2.1"];

/// Locates the Gradle user home: `GRADLE_USER_HOME` when it is a safe
/// absolute path, else `~/.gradle`.
pub fn gradle_user_home() -> Option<PathBuf> {
    resolve_gradle_user_home(
        std::env::var_os(GRADLE_USER_HOME_ENV).map(PathBuf::from),
        dirs::home_dir(),
    )
}

pub fn resolve_gradle_user_home(override_dir: Option<PathBuf>, home: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(dir) = override_dir.filter(|dir| !dir.as_os_str().is_empty()) {
        if is_safe_override(&dir) {
            return Some(dir);
        }
        tracing::warn!(
            "Ignoring {}={}: must be an absolute path without '..'",
            GRADLE_USER_HOME_ENV,
            dir.display()
        );
    }
    home.map(|home| home.join(".gradle"))
}

fn is_safe_override(dir: &Path) -> bool {
    dir.is_absolute() && !dir.components().any(|c| matches!(c, Component::ParentDir))
}

/// Read-only view of Gradle's module cache
/// (`<user home>/caches/modules-2/files-2.1/<group>/<module>/<version>/<hash>/<file>`).
///
/// Group, module and version come from dependency coordinates, so every
/// lookup goes through a sandbox rooted at `files-2.1`.
#[derive(Debug, Clone)]
pub struct ModuleCache {
    sandbox: PathSandbox,
}

impl ModuleCache {
    pub fn new(gradle_user_home: &Path) -> Result<Self> {
        let mut base = gradle_user_home.to_path_buf();
        base.extend(FILES_LAYOUT);
        Ok(Self {
            sandbox: PathSandbox::new(&base)?,
        })
    }

    pub fn base(&self) -> &Path {
        self.sandbox.base()
    }

    /// Finds the cached file of a dependency.
    ///
    /// Hash directories are visited in sorted order; in each one the
    /// classifier-qualified name is tried first, then `module-version.type`,
    /// then `module.type`.
    pub fn locate(&self, record: &DependencyRecord) -> Option<PathBuf> {
        let version_dir = match self.sandbox.join_components(&[
            record.group.as_str(),
            record.name.as_str(),
            record.version.as_str(),
        ]) {
            Ok(dir) => dir,
            Err(e) => {
                tracing::debug!("No cache lookup for {}: {}", record.id, e);
                return None;
            }
        };
        if !version_dir.is_dir() {
            return None;
        }

        let mut hash_dirs: Vec<String> = fs::read_dir(&version_dir)
            .ok()?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        hash_dirs.sort();

        let candidates = cache_file_names(record);
        for hash in &hash_dirs {
            let dir = match self.sandbox.join_file(&version_dir, hash) {
                Ok(dir) if dir.is_dir() => dir,
                Ok(_) => continue,
                Err(e) => {
                    tracing::debug!("Skipping cache entry {}: {}", hash, e);
                    continue;
                }
            };
            for name in &candidates {
                match self.sandbox.join_file(&dir, name) {
                    Ok(path) if path.is_file() => return Some(path),
                    Ok(_) => {}
                    Err(e) => tracing::debug!("Skipping cache file {}: {}", name, e),
                }
            }
        }
        None
    }
}

fn cache_file_names(record: &DependencyRecord) -> Vec<String> {
    let mut names = Vec::with_capacity(3);
    if let Some(classifier) = &record.classifier {
        names.push(format!(
            "{}-{}-{}.{}",
            record.name, record.version, classifier, record.dep_type
        ));
    }
    names.push(format!("{}-{}.{}", record.name, record.version, record.dep_type));
    names.push(format!("{}.{}", record.name, record.dep_type));
    names
}
