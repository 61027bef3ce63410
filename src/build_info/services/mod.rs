pub mod checksum_resolver;
pub mod dsl;
pub mod fallback_parser;
pub mod graph_builder;
pub mod manifest;
pub mod metadata;
pub mod module_cache;
pub mod module_discovery;
pub mod tree_parser;

pub use checksum_resolver::{ChecksumResolver, ResolvedChecksum, VerifiedDependency};
pub use fallback_parser::FallbackDependencyParser;
pub use graph_builder::{DependencyAccumulator, ModuleDependencies};
pub use module_cache::{gradle_user_home, ModuleCache};
pub use module_discovery::{DiscoveredProject, ModuleDiscovery, ProjectModule};
pub use tree_parser::{merge_tree, DependencyTreeParser};
