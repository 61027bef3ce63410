pub mod artifact;
pub mod dependency;
pub mod dependency_graph;
pub mod dependency_tree;
pub mod module_metadata;
pub mod scope;

pub use artifact::{ArtifactRecord, Checksums};
pub use dependency::{Coordinate, DependencyRecord, DEFAULT_DEPENDENCY_TYPE};
pub use dependency_graph::{DependencyGraph, RequestedByMap};
pub use dependency_tree::{DependencyTree, DependencyTreeNode};
pub use module_metadata::{normalize_module_path, ModuleMetadata, ModuleTable, UNSPECIFIED};
pub use scope::Scope;
