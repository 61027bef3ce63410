use crate::application::read_models::BuildInfoModule;

/// CollectResponse - modules collected by one call
#[derive(Debug, Clone, Default)]
pub struct CollectResponse {
    /// One record per module, in discovery order (root first)
    pub modules: Vec<BuildInfoModule>,
    /// Dependencies dropped because no checksum could be resolved
    pub dropped_dependencies: usize,
}

impl CollectResponse {
    pub fn new(modules: Vec<BuildInfoModule>, dropped_dependencies: usize) -> Self {
        Self {
            modules,
            dropped_dependencies,
        }
    }

    pub fn dependency_count(&self) -> usize {
        self.modules.iter().map(|m| m.dependencies.len()).sum()
    }
}
