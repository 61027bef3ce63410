/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the collector uses to interact
/// with external systems (the Gradle CLI, the file system, the console).
pub mod build_script_reader;
pub mod formatter;
pub mod gradle_executor;
pub mod output_presenter;
pub mod progress_reporter;

pub use build_script_reader::BuildScriptReader;
pub use formatter::BuildInfoFormatter;
pub use gradle_executor::GradleExecutor;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
