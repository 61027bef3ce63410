use std::path::PathBuf;
use std::time::Duration;

/// Per-command timeout used when the caller sets none (10 minutes)
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(600);

/// CollectRequest - options for one build-info collection
#[derive(Debug, Clone)]
pub struct CollectRequest {
    /// Gradle project root; must exist and be a directory
    pub working_dir: PathBuf,
    /// Gradle executable to use when the project has no wrapper
    pub gradle_executable: Option<PathBuf>,
    /// Upper bound for each Gradle invocation
    pub command_timeout: Duration,
    /// Whether test configurations are resolved as well
    pub include_test_dependencies: bool,
    /// Whether a local publish step ran, enabling the artifact manifest
    pub publish_occurred: bool,
    /// Extra arguments appended to every Gradle invocation
    pub gradle_args: Vec<String>,
    /// Deadline for the whole collection, checked between modules
    pub collection_timeout: Option<Duration>,
}

impl CollectRequest {
    pub fn new(working_dir: PathBuf) -> Self {
        Self {
            working_dir,
            gradle_executable: None,
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
            include_test_dependencies: false,
            publish_occurred: false,
            gradle_args: Vec::new(),
            collection_timeout: None,
        }
    }
}
