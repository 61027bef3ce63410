use crate::application::read_models::BuildInfoModule;
use crate::shared::Result;

/// BuildInfoFormatter port for serialising collected modules
pub trait BuildInfoFormatter {
    /// Formats the module records produced by one collection call
    ///
    /// # Errors
    /// Returns an error if serialisation fails
    fn format(&self, modules: &[BuildInfoModule]) -> Result<String>;
}
