use super::Coordinate;
use std::collections::HashMap;

/// Placeholder Gradle itself reports for an unset group or version.
pub const UNSPECIFIED: &str = "unspecified";

/// Resolved identity of one project module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMetadata {
    pub group: String,
    pub artifact: String,
    pub version: String,
}

impl ModuleMetadata {
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version: version.into(),
        }
    }

    /// `group:artifact:version`
    pub fn id(&self) -> String {
        format!("{}:{}:{}", self.group, self.artifact, self.version)
    }
}

/// Discovered modules keyed by module path (`""` for the root, `"a:b"` for
/// nested modules), in discovery order with the root first.
///
/// Built once while the collector is constructed and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ModuleTable {
    order: Vec<String>,
    metadata: HashMap<String, ModuleMetadata>,
}

impl ModuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a module; a path that is already present keeps its first entry.
    pub fn insert(&mut self, module_path: impl Into<String>, metadata: ModuleMetadata) {
        let module_path = module_path.into();
        if self.metadata.contains_key(&module_path) {
            return;
        }
        self.order.push(module_path.clone());
        self.metadata.insert(module_path, metadata);
    }

    pub fn get(&self, module_path: &str) -> Option<&ModuleMetadata> {
        self.metadata.get(module_path)
    }

    pub fn root(&self) -> Option<&ModuleMetadata> {
        self.metadata.get("")
    }

    pub fn paths(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Resolves a `project(':path')` reference to a coordinate.
    ///
    /// Unknown modules borrow the group and version of `current`, the module
    /// that declares the reference.
    pub fn project_coordinate(&self, project_path: &str, current: &ModuleMetadata) -> Coordinate {
        let module_path = normalize_module_path(project_path);
        match self.get(&module_path) {
            Some(metadata) => Coordinate::new(
                metadata.group.clone(),
                metadata.artifact.clone(),
                metadata.version.clone(),
            ),
            None => Coordinate::new(
                current.group.clone(),
                module_path.replace(':', "-"),
                current.version.clone(),
            ),
        }
    }
}

/// Strips whitespace and leading colons from a Gradle project path: `:a:b` → `a:b`, `:` → ``.
pub fn normalize_module_path(project_path: &str) -> String {
    project_path.trim().trim_start_matches(':').to_string()
}
