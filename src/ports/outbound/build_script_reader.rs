use crate::shared::Result;
use std::path::Path;

/// BuildScriptReader port for reading project text files
///
/// Settings files, build scripts and the publish manifest are all read
/// through this port. Callers build `path` through the path sandbox first;
/// implementations add their own file-level checks (symlinks, size).
pub trait BuildScriptReader: Send + Sync {
    /// Reads a UTF-8 text file
    ///
    /// # Returns
    /// `Ok(None)` when nothing exists at `path`, `Ok(Some(text))` otherwise
    ///
    /// # Errors
    /// Returns an error if the file exists but is refused or unreadable
    fn read_text(&self, path: &Path) -> Result<Option<String>>;
}
