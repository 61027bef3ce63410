use crate::build_info::domain::{
    Coordinate, DependencyGraph, DependencyRecord, RequestedByMap, Scope,
};
use std::collections::HashMap;

/// Dependencies and graph collected for one module.
#[derive(Debug, Clone, Default)]
pub struct ModuleDependencies {
    /// Records in first-seen order, unique by id
    pub records: Vec<DependencyRecord>,
    pub graph: DependencyGraph,
}

impl ModuleDependencies {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Child → sorted requesters, derived from the final graph.
    pub fn requested_by(&self) -> RequestedByMap {
        self.graph.invert()
    }
}

/// Per-module accumulator shared by both resolution tiers.
///
/// Records are keyed by canonical id; adding an id that already exists only
/// unions the new scopes into it. A fresh accumulator is created for every
/// module and consumed into [`ModuleDependencies`] at the end.
#[derive(Debug, Default)]
pub struct DependencyAccumulator {
    records: Vec<DependencyRecord>,
    index: HashMap<String, usize>,
    graph: DependencyGraph,
}

impl DependencyAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or merges a dependency and returns its canonical id.
    pub fn add<I>(&mut self, coordinate: &Coordinate, scopes: I) -> String
    where
        I: IntoIterator<Item = Scope>,
    {
        let id = coordinate.id();
        let position = match self.index.get(&id) {
            Some(&position) => position,
            None => {
                self.records.push(DependencyRecord::from_coordinate(coordinate));
                self.index.insert(id.clone(), self.records.len() - 1);
                self.records.len() - 1
            }
        };
        self.records[position].merge_scopes(scopes);
        id
    }

    pub fn add_edge(&mut self, parent_id: &str, child_id: &str) {
        self.graph.add_edge(parent_id, child_id);
    }

    pub fn get(&self, id: &str) -> Option<&DependencyRecord> {
        self.index.get(id).map(|&position| &self.records[position])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn finish(self) -> ModuleDependencies {
        ModuleDependencies {
            records: self.records,
            graph: self.graph,
        }
    }
}
