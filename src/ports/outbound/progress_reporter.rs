/// ProgressReporter port for user-facing progress
///
/// Progress goes to the user (stderr); diagnostics go to `tracing`.
/// Reporters must be shareable across the async collection call.
pub trait ProgressReporter: Send + Sync {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports per-module progress
    ///
    /// # Arguments
    /// * `current` - Number of modules finished
    /// * `total` - Number of modules discovered
    /// * `message` - Optional message, typically the module being processed
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports an error or warning message
    fn report_error(&self, message: &str);

    /// Reports completion of a collection call
    fn report_completion(&self, message: &str);
}
