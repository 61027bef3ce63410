use super::Scope;
use std::collections::BTreeSet;

/// Artifact type assumed when a coordinate carries no `@type` suffix.
pub const DEFAULT_DEPENDENCY_TYPE: &str = "jar";

/// Parsed `group:module:version[:classifier][@type]` coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinate {
    pub group: String,
    pub module: String,
    pub version: String,
    pub classifier: Option<String>,
    pub dep_type: String,
}

impl Coordinate {
    pub fn new(
        group: impl Into<String>,
        module: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            module: module.into(),
            version: version.into(),
            classifier: None,
            dep_type: DEFAULT_DEPENDENCY_TYPE.to_string(),
        }
    }

    pub fn with_classifier(mut self, classifier: Option<String>) -> Self {
        self.classifier = classifier.filter(|c| !c.is_empty());
        self
    }

    pub fn with_type(mut self, dep_type: impl Into<String>) -> Self {
        let dep_type = dep_type.into();
        if !dep_type.is_empty() {
            self.dep_type = dep_type;
        }
        self
    }

    /// Canonical `group:module:version[:classifier]` id.
    ///
    /// A coordinate without a version (map notation may omit it) renders as
    /// `group:module`.
    pub fn id(&self) -> String {
        let mut id = format!("{}:{}", self.group, self.module);
        if !self.version.is_empty() {
            id.push(':');
            id.push_str(&self.version);
        }
        if let Some(classifier) = &self.classifier {
            id.push(':');
            id.push_str(classifier);
        }
        id
    }

    /// True when group, module and version are all present.
    pub fn is_complete(&self) -> bool {
        !self.group.is_empty() && !self.module.is_empty() && !self.version.is_empty()
    }
}

/// One resolved dependency of a module, deduplicated by `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyRecord {
    pub id: String,
    pub group: String,
    pub name: String,
    pub version: String,
    pub dep_type: String,
    pub classifier: Option<String>,
    pub scopes: BTreeSet<Scope>,
}

impl DependencyRecord {
    pub fn from_coordinate(coordinate: &Coordinate) -> Self {
        Self {
            id: coordinate.id(),
            group: coordinate.group.clone(),
            name: coordinate.module.clone(),
            version: coordinate.version.clone(),
            dep_type: coordinate.dep_type.clone(),
            classifier: coordinate.classifier.clone(),
            scopes: BTreeSet::new(),
        }
    }

    /// Unions `scopes` into the record. Scopes never shrink.
    pub fn merge_scopes<I>(&mut self, scopes: I)
    where
        I: IntoIterator<Item = Scope>,
    {
        self.scopes.extend(scopes);
    }
}
