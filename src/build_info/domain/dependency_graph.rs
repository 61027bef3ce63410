use std::collections::{BTreeMap, HashMap};

/// Parent → children adjacency for the dependencies of one module.
///
/// Child lists keep first-insertion order and never hold duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    edges: HashMap<String, Vec<String>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_edge(&mut self, parent: &str, child: &str) {
        if parent == child {
            return;
        }
        let children = self.edges.entry(parent.to_string()).or_default();
        if !children.iter().any(|c| c == child) {
            children.push(child.to_string());
        }
    }

    pub fn children(&self, parent: &str) -> &[String] {
        self.edges.get(parent).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Builds the child → requesters map, each list sorted lexicographically.
    pub fn invert(&self) -> RequestedByMap {
        let mut requesters: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (parent, children) in &self.edges {
            for child in children {
                let parents = requesters.entry(child.clone()).or_default();
                if !parents.contains(parent) {
                    parents.push(parent.clone());
                }
            }
        }
        for parents in requesters.values_mut() {
            parents.sort();
        }
        RequestedByMap { requesters }
    }
}

/// Child id → sorted ids of the dependencies that requested it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestedByMap {
    requesters: BTreeMap<String, Vec<String>>,
}

impl RequestedByMap {
    /// Maximum length of one requested-by chain
    pub const MAX_CHAIN_DEPTH: usize = 100;

    /// Maximum number of chains reported for one dependency
    pub const MAX_CHAINS: usize = 100;

    pub fn requesters(&self, child: &str) -> &[String] {
        self.requesters.get(child).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Expands the ancestry of `child` into chains.
    ///
    /// Every chain starts at a direct requester and ends at a dependency that
    /// nothing else requested. Cycles are cut where they close, and both the
    /// chain length and the number of chains are capped.
    pub fn chains(&self, child: &str) -> Vec<Vec<String>> {
        let mut chains = Vec::new();
        let mut path = vec![child.to_string()];
        self.collect_chains(child, &mut path, &mut chains);
        chains
    }

    fn collect_chains(&self, id: &str, path: &mut Vec<String>, chains: &mut Vec<Vec<String>>) {
        for parent in self.requesters(id) {
            if chains.len() >= Self::MAX_CHAINS {
                return;
            }
            if path.contains(parent) {
                continue;
            }

            path.push(parent.clone());
            let depth = path.len() - 1;
            let is_top = self
                .requesters(parent)
                .iter()
                .all(|grandparent| path.contains(grandparent));

            if is_top || depth >= Self::MAX_CHAIN_DEPTH {
                chains.push(path[1..].to_vec());
            } else {
                self.collect_chains(parent, path, chains);
            }
            path.pop();
        }
    }
}
