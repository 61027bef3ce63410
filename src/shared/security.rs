use crate::shared::error::SandboxError;
use crate::shared::Result;
use std::fs;
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};

/// Maximum file size for security (100 MB)
/// This prevents DoS attacks via excessively large files
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Filesystem sandbox rooted at one base directory.
///
/// Every path handed out by the sandbox resolves to the base itself or a
/// strict descendant of it. Paths are compared on their absolute, lexically
/// cleaned form: the candidate must equal the base or start with the base
/// followed by a separator.
///
/// Module paths, build-script locations and module-cache lookups are all
/// derived from strings found in project files, so they are built through
/// [`PathSandbox::join_components`] or [`PathSandbox::join_file`] and never
/// with a bare `Path::join`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSandbox {
    base: PathBuf,
}

impl PathSandbox {
    /// Creates a sandbox rooted at `base`.
    ///
    /// Existing directories are canonicalized so that later containment checks
    /// compare against the real location; a base that does not exist yet (for
    /// example an empty Gradle cache) is made absolute and cleaned lexically.
    pub fn new(base: &Path) -> Result<Self> {
        if base.as_os_str().is_empty() {
            anyhow::bail!("Sandbox base directory must not be empty");
        }

        let resolved = match fs::canonicalize(base) {
            Ok(canonical) => canonical,
            Err(_) => std::path::absolute(base).map_err(|e| {
                anyhow::anyhow!("Failed to resolve sandbox base {}: {}", base.display(), e)
            })?,
        };

        Ok(Self {
            base: clean_path(&resolved),
        })
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Returns true when `path` is the base directory or a strict descendant of it.
    pub fn contains(&self, path: &Path) -> bool {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base.join(path)
        };
        let candidate = clean_path(&absolute);

        let base_str = self.base.to_string_lossy();
        let candidate_str = candidate.to_string_lossy();
        if candidate_str == base_str {
            return true;
        }

        let prefix = if base_str.ends_with(MAIN_SEPARATOR) {
            base_str.to_string()
        } else {
            format!("{}{}", base_str, MAIN_SEPARATOR)
        };
        candidate_str.starts_with(&prefix)
    }

    /// Joins untrusted path components onto the base.
    ///
    /// Each component is validated on its own, reduced to its base name, and
    /// the final path is re-checked against the base.
    pub fn join_components(&self, components: &[&str]) -> std::result::Result<PathBuf, SandboxError> {
        let mut path = self.base.clone();
        for component in components {
            path.push(validate_component(component)?);
        }
        self.verify(path)
    }

    /// Joins a single untrusted file name onto a directory inside the sandbox.
    pub fn join_file(&self, dir: &Path, name: &str) -> std::result::Result<PathBuf, SandboxError> {
        if !self.contains(dir) {
            return Err(SandboxError::OutsideBase {
                path: dir.to_path_buf(),
                base: self.base.clone(),
            });
        }
        let file_name = validate_component(name)?;
        self.verify(dir.join(file_name))
    }

    fn verify(&self, path: PathBuf) -> std::result::Result<PathBuf, SandboxError> {
        if self.contains(&path) {
            Ok(path)
        } else {
            Err(SandboxError::OutsideBase {
                path,
                base: self.base.clone(),
            })
        }
    }
}

/// Validates one untrusted path component and returns its base name.
fn validate_component(component: &str) -> std::result::Result<String, SandboxError> {
    if component.is_empty() {
        return Err(SandboxError::EmptyComponent);
    }
    if component.contains("..") {
        return Err(SandboxError::TraversalComponent(component.to_string()));
    }

    let bytes = component.as_bytes();
    let is_windows_drive =
        bytes.len() >= 2 && bytes[1] == b':' && bytes[0].is_ascii_alphabetic();
    if component.starts_with('/') || component.starts_with('\\') || is_windows_drive {
        return Err(SandboxError::AbsoluteComponent(component.to_string()));
    }
    if component.contains('/') || component.contains('\\') {
        return Err(SandboxError::SeparatorInComponent(component.to_string()));
    }

    match Path::new(component).file_name().and_then(|n| n.to_str()) {
        Some(name) if name == component => Ok(name.to_string()),
        _ => Err(SandboxError::TraversalComponent(component.to_string())),
    }
}

/// Lexically normalizes a path: drops `.` components and folds `..` into the
/// preceding component. Never touches the filesystem.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component.as_os_str());
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Validates file size is within acceptable limits
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            file_size,
            max_size
        );
    }
    Ok(())
}
