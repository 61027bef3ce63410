use async_trait::async_trait;
use gradle_buildinfo::prelude::*;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock GradleExecutor answering `<task> --configuration <conf>` calls
/// from canned dependency reports.
///
/// Unknown calls fail with a non-zero exit, like a configuration Gradle
/// does not know.
#[derive(Default, Clone)]
pub struct MockGradleExecutor {
    reports: HashMap<(String, String), String>,
    timeouts: Vec<(String, String)>,
    unavailable: bool,
    calls: Arc<Mutex<Vec<Vec<String>>>>,
}

impl MockGradleExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails as if Gradle were not installed.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn with_report(mut self, task: &str, configuration: &str, output: &str) -> Self {
        self.reports.insert(
            (task.to_string(), configuration.to_string()),
            output.to_string(),
        );
        self
    }

    pub fn with_timeout(mut self, task: &str, configuration: &str) -> Self {
        self.timeouts
            .push((task.to_string(), configuration.to_string()));
        self
    }

    pub fn get_calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GradleExecutor for MockGradleExecutor {
    async fn run(
        &self,
        _working_dir: &Path,
        args: &[String],
    ) -> std::result::Result<String, CommandError> {
        self.calls.lock().unwrap().push(args.to_vec());
        let command = format!("gradle {}", args.join(" "));

        if self.unavailable {
            return Err(CommandError::Spawn {
                command,
                details: "No such file or directory (os error 2)".to_string(),
            });
        }

        let key = (
            args.first().cloned().unwrap_or_default(),
            args.get(2).cloned().unwrap_or_default(),
        );
        if self.timeouts.contains(&key) {
            return Err(CommandError::Timeout {
                command,
                timeout: Duration::from_secs(600),
            });
        }
        self.reports
            .get(&key)
            .cloned()
            .ok_or(CommandError::NonZeroExit {
                command,
                code: Some(1),
                output: "Configuration not found".to_string(),
            })
    }
}
