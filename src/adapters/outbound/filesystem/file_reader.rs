use crate::ports::outbound::BuildScriptReader;
use crate::shared::error::GradleBuildInfoError;
use crate::shared::security::{validate_file_size, MAX_FILE_SIZE};
use crate::shared::Result;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// FileSystemReader adapter for reading project files from disk
///
/// Implements the BuildScriptReader port. Settings files, build scripts and
/// the publish manifest all come through here.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystemReader {
    /// Safely read a file with security checks:
    /// - Reject symbolic links
    /// - Validate file is a regular file
    /// - Check file size limits
    fn safe_read_file(&self, path: &Path, metadata: &fs::Metadata) -> Result<String> {
        if metadata.is_symlink() {
            anyhow::bail!(
                "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
                path.display()
            );
        }

        if !metadata.is_file() {
            anyhow::bail!("{} is not a regular file", path.display());
        }

        validate_file_size(metadata.len(), path, MAX_FILE_SIZE)?;

        fs::read_to_string(path).map_err(|e| {
            GradleBuildInfoError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }
}

impl BuildScriptReader for FileSystemReader {
    fn read_text(&self, path: &Path) -> Result<Option<String>> {
        // symlink_metadata so a link is seen as a link, not as its target
        let metadata = match fs::symlink_metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(GradleBuildInfoError::FileReadError {
                    path: path.to_path_buf(),
                    details: e.to_string(),
                }
                .into())
            }
        };

        self.safe_read_file(path, &metadata).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_text_success() {
        let temp_dir = TempDir::new().unwrap();
        let script = temp_dir.path().join("build.gradle");
        fs::write(&script, "group = 'com.acme'").unwrap();

        let reader = FileSystemReader::new();
        let content = reader.read_text(&script).unwrap();

        assert_eq!(content.as_deref(), Some("group = 'com.acme'"));
    }

    #[test]
    fn test_read_text_missing_file_is_none() {
        let temp_dir = TempDir::new().unwrap();

        let reader = FileSystemReader::new();
        let content = reader.read_text(&temp_dir.path().join("build.gradle")).unwrap();

        assert!(content.is_none());
    }

    #[test]
    fn test_read_text_rejects_directory() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("build.gradle");
        fs::create_dir(&dir).unwrap();

        let reader = FileSystemReader::new();
        let err = reader.read_text(&dir).unwrap_err();

        assert!(err.to_string().contains("is not a regular file"));
    }

    #[cfg(unix)]
    #[test]
    fn test_read_text_rejects_symlink() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("real.gradle");
        fs::write(&target, "version = '1.0'").unwrap();
        let link = temp_dir.path().join("build.gradle");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let reader = FileSystemReader::new();
        let err = reader.read_text(&link).unwrap_err();

        assert!(err.to_string().contains("symbolic link"));
    }
}
