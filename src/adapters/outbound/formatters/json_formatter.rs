use crate::application::read_models::BuildInfoModule;
use crate::ports::outbound::BuildInfoFormatter;
use crate::shared::Result;

/// JsonBuildInfoFormatter adapter rendering modules as a pretty-printed JSON array
pub struct JsonBuildInfoFormatter;

impl JsonBuildInfoFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonBuildInfoFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildInfoFormatter for JsonBuildInfoFormatter {
    fn format(&self, modules: &[BuildInfoModule]) -> Result<String> {
        serde_json::to_string_pretty(modules).map_err(Into::into)
    }
}
