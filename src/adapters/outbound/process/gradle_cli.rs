use crate::ports::outbound::GradleExecutor;
use crate::shared::error::CommandError;
use crate::shared::security::PathSandbox;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tokio::time::timeout;

const GRADLE_COMMAND: &str = "gradle";

/// GradleCliExecutor adapter running Gradle as a child process
///
/// Every invocation is bounded by the configured timeout; the child is
/// killed when the timeout fires or the call is dropped. Stdout and stderr
/// are captured and returned together.
#[derive(Debug, Clone)]
pub struct GradleCliExecutor {
    executable: PathBuf,
    timeout: Duration,
}

impl GradleCliExecutor {
    pub fn new(executable: PathBuf, timeout: Duration) -> Self {
        Self {
            executable,
            timeout,
        }
    }

    /// Creates an executor for the project rooted at the sandbox base.
    pub fn for_project(sandbox: &PathSandbox, configured: Option<&Path>, timeout: Duration) -> Self {
        Self::new(resolve_gradle_executable(sandbox, configured), timeout)
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }
}

#[async_trait]
impl GradleExecutor for GradleCliExecutor {
    async fn run(&self, working_dir: &Path, args: &[String]) -> Result<String, CommandError> {
        let command_line = format_command(&self.executable, args);
        tracing::debug!(target: "gradle", "Executing command: {}", command_line);

        let mut cmd = Command::new(&self.executable);
        cmd.args(args)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let start = Instant::now();
        let output = match timeout(self.timeout, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(CommandError::Spawn {
                    command: command_line,
                    details: e.to_string(),
                })
            }
            Err(_) => {
                tracing::warn!(
                    target: "gradle",
                    "Command timed out after {} seconds: {}",
                    self.timeout.as_secs(),
                    command_line
                );
                return Err(CommandError::Timeout {
                    command: command_line,
                    timeout: self.timeout,
                });
            }
        };

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        tracing::debug!(
            target: "gradle::perf",
            "{} took {}ms",
            command_line,
            start.elapsed().as_millis()
        );

        if !output.status.success() {
            tracing::debug!(
                target: "gradle",
                "Command failed with exit code: {:?}",
                output.status.code()
            );
            return Err(CommandError::NonZeroExit {
                command: command_line,
                code: output.status.code(),
                output: combined,
            });
        }

        Ok(combined)
    }
}

/// Picks the Gradle executable for a project.
///
/// A `gradlew` wrapper in the project root wins, then the configured
/// override, then `gradle` on `PATH`, then the bare command name.
pub fn resolve_gradle_executable(sandbox: &PathSandbox, configured: Option<&Path>) -> PathBuf {
    let wrapper_candidates = if cfg!(windows) {
        ["gradlew.bat", "gradlew"]
    } else {
        ["gradlew", "gradlew.bat"]
    };
    for name in wrapper_candidates {
        match sandbox.join_file(sandbox.base(), name) {
            Ok(wrapper) if wrapper.is_file() => return wrapper,
            Ok(_) => {}
            Err(e) => tracing::debug!(target: "gradle", "Ignoring wrapper {}: {}", name, e),
        }
    }

    if let Some(configured) = configured {
        return configured.to_path_buf();
    }

    which::which(GRADLE_COMMAND).unwrap_or_else(|_| PathBuf::from(GRADLE_COMMAND))
}

/// Renders a command line for logs and error messages.
pub fn format_command(executable: &Path, args: &[String]) -> String {
    let mut rendered = executable.display().to_string();
    for arg in args {
        rendered.push(' ');
        if arg.is_empty() || arg.contains(char::is_whitespace) {
            rendered.push('"');
            rendered.push_str(&arg.replace('"', "\\\""));
            rendered.push('"');
        } else {
            rendered.push_str(arg);
        }
    }
    rendered
}
