//! Parser for the text tree printed by `gradle dependencies --configuration <name>`.
//!
//! ```text
//! +--- org.slf4j:slf4j-api:2.0.0
//! +--- com.example:lib:1.0 -> 1.1
//! \--- a:b:1.0
//!      +--- c:d:2.0 (*)
//!      \--- x:y:1.0 (c)
//! ```
//!
//! Depth is the number of five-character indent groups in front of the
//! `+--- ` / `\--- ` marker. Constraint (`(c)`), unresolved (`(n)`) and
//! failed entries are omitted together with their subtree.

use super::graph_builder::DependencyAccumulator;
use crate::build_info::domain::{Coordinate, DependencyTree, ModuleMetadata, ModuleTable, Scope};

const BRANCH_MARKERS: [&str; 2] = ["+--- ", "\\--- "];
const INDENT_WIDTH: usize = 5;
const ARROW: &str = " -> ";
const PROJECT_PREFIX: &str = "project ";

/// One tree line that carries a parsable entry.
#[derive(Debug, PartialEq, Eq)]
enum TreeLine {
    Entry { depth: usize, coordinate: Coordinate },
    /// Constraint, unresolved or failed entry; its subtree is skipped.
    Omitted { depth: usize },
    /// Entry without a usable coordinate; children attach further up.
    Unusable { depth: usize },
}

/// Reconstructs Gradle dependency trees, resolving `project :x` entries
/// against the discovered modules.
pub struct DependencyTreeParser<'a> {
    modules: &'a ModuleTable,
    current: &'a ModuleMetadata,
}

impl<'a> DependencyTreeParser<'a> {
    pub fn new(modules: &'a ModuleTable, current: &'a ModuleMetadata) -> Self {
        Self { modules, current }
    }

    pub fn parse(&self, output: &str) -> DependencyTree {
        let mut tree = DependencyTree::new();
        // Most recent node per depth; `None` marks a depth whose last entry was unusable.
        let mut stack: Vec<Option<usize>> = Vec::new();
        let mut skip_below: Option<usize> = None;

        for line in output.lines() {
            let Some(parsed) = self.parse_line(line.trim_end()) else {
                continue;
            };
            let depth = match &parsed {
                TreeLine::Entry { depth, .. }
                | TreeLine::Omitted { depth }
                | TreeLine::Unusable { depth } => *depth,
            };

            if let Some(omitted_depth) = skip_below {
                if depth > omitted_depth {
                    continue;
                }
                skip_below = None;
            }

            match parsed {
                TreeLine::Omitted { depth } => {
                    skip_below = Some(depth);
                }
                TreeLine::Unusable { depth } => {
                    stack.truncate(depth);
                    stack.resize(depth + 1, None);
                }
                TreeLine::Entry { depth, coordinate } => {
                    let index = if depth == 0 {
                        stack.clear();
                        tree.add_root(coordinate)
                    } else {
                        let parent = stack[..depth.min(stack.len())]
                            .iter()
                            .rev()
                            .find_map(|slot| *slot);
                        match parent {
                            Some(parent) => tree.add_child(parent, coordinate),
                            None => {
                                tracing::warn!(
                                    "No parent for dependency tree entry at depth {}: '{}'",
                                    depth,
                                    line.trim()
                                );
                                tree.add_root(coordinate)
                            }
                        }
                    };
                    stack.truncate(depth);
                    stack.resize(depth, None);
                    stack.push(Some(index));
                }
            }
        }

        tree
    }

    fn parse_line(&self, line: &str) -> Option<TreeLine> {
        let (marker_at, marker) = BRANCH_MARKERS
            .iter()
            .filter_map(|marker| line.find(marker).map(|at| (at, *marker)))
            .min_by_key(|(at, _)| *at)?;

        let depth = line[..marker_at].chars().count() / INDENT_WIDTH;
        let mut entry = line[marker_at + marker.len()..].trim();

        let expanded_elsewhere = entry.ends_with("(*)");
        if expanded_elsewhere {
            entry = entry.trim_end_matches("(*)").trim_end();
        }
        if entry.ends_with("(c)") || entry.ends_with("(n)") || entry.ends_with(" FAILED") {
            return Some(TreeLine::Omitted { depth });
        }

        match self.parse_entry(entry) {
            Some(coordinate) => Some(TreeLine::Entry { depth, coordinate }),
            None => {
                tracing::debug!("Skipping dependency tree entry '{}'", entry);
                Some(TreeLine::Unusable { depth })
            }
        }
    }

    /// Parses `group:module[:version[:classifier]][@type][ -> resolved]` or
    /// `project :path`.
    fn parse_entry(&self, entry: &str) -> Option<Coordinate> {
        if let Some(path) = entry.strip_prefix(PROJECT_PREFIX) {
            return Some(self.modules.project_coordinate(path, self.current));
        }

        let (requested, resolved) = match entry.split_once(ARROW) {
            Some((requested, resolved)) => (requested.trim(), Some(resolved.trim())),
            None => (entry, None),
        };

        let (requested, dep_type) = match requested.rsplit_once('@') {
            Some((requested, dep_type)) => (requested, dep_type),
            None => (requested, ""),
        };

        let parts: Vec<&str> = requested.split(':').map(str::trim).collect();
        if parts.len() < 2 {
            return None;
        }

        let mut coordinate = Coordinate::new(
            parts[0],
            parts[1],
            parts.get(2).copied().unwrap_or_default(),
        )
        .with_classifier(parts.get(3).map(|c| c.to_string()))
        .with_type(dep_type);

        match resolved {
            Some(resolved) if resolved.starts_with(PROJECT_PREFIX) => {
                let path = &resolved[PROJECT_PREFIX.len()..];
                coordinate = self.modules.project_coordinate(path, self.current);
            }
            Some(resolved) if resolved.contains(':') => {
                // Module substitution: the right-hand side is a full coordinate
                let substituted: Vec<&str> = resolved.split(':').map(str::trim).collect();
                coordinate.group = substituted[0].to_string();
                coordinate.module = substituted.get(1).copied().unwrap_or_default().to_string();
                coordinate.version = substituted.get(2).copied().unwrap_or_default().to_string();
            }
            Some(resolved) => coordinate.version = resolved.to_string(),
            None if parts.len() == 2 => return None,
            None => {}
        }

        Some(coordinate)
    }
}

/// Adds every complete node of `tree` and every edge between complete nodes
/// to `accumulator`, tagged with `scope`.
pub fn merge_tree(tree: &DependencyTree, scope: Scope, accumulator: &mut DependencyAccumulator) {
    tree.walk(|parent, index| {
        let coordinate = &tree.node(index).coordinate;
        if !coordinate.is_complete() {
            return;
        }
        let child_id = accumulator.add(coordinate, [scope]);
        if let Some(parent) = parent {
            let parent_coordinate = &tree.node(parent).coordinate;
            if parent_coordinate.is_complete() {
                accumulator.add_edge(&parent_coordinate.id(), &child_id);
            }
        }
    });
}
