/// Mock implementations for testing
mod mock_gradle_executor;
mod mock_progress_reporter;

pub use mock_gradle_executor::MockGradleExecutor;
pub use mock_progress_reporter::MockProgressReporter;
