use crate::shared::error::CommandError;
use async_trait::async_trait;
use std::path::Path;

/// GradleExecutor port for running the Gradle CLI
///
/// Implementations resolve the executable, apply the per-command timeout and
/// return combined stdout and stderr.
///
/// # Async Support
/// Invocations are async so a timeout or cancellation never blocks the
/// runtime. Implementations must be `Send + Sync`.
#[async_trait]
pub trait GradleExecutor: Send + Sync {
    /// Runs Gradle in `working_dir` with `args`
    ///
    /// # Errors
    /// - [`CommandError::Spawn`] if the process could not be started
    /// - [`CommandError::Timeout`] if it did not finish in time
    /// - [`CommandError::NonZeroExit`] if it exited unsuccessfully
    async fn run(&self, working_dir: &Path, args: &[String]) -> Result<String, CommandError>;
}
