/// Process adapters for invoking the Gradle CLI
mod gradle_cli;

pub use gradle_cli::{format_command, resolve_gradle_executable, GradleCliExecutor};
