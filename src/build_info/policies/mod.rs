mod configurations;
mod scope_mapping;

pub use configurations::ConfigurationSelector;
pub use scope_mapping::ScopeMapping;
