use crate::shared::Result;

/// OutputPresenter port for presenting final output
///
/// This port abstracts where the formatted build-info record goes
/// (stdout, a file).
pub trait OutputPresenter {
    /// Presents the formatted content
    ///
    /// # Errors
    /// Returns an error if writing to the destination fails
    fn present(&self, content: &str) -> Result<()>;
}
