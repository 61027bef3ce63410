use super::Coordinate;

/// One entry of a parsed dependency tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyTreeNode {
    pub coordinate: Coordinate,
    pub children: Vec<usize>,
}

/// Index-addressed arena holding the dependency tree of one configuration.
///
/// Nodes refer to their children by index, so the tree can be built from a
/// depth-indexed stack of indices without shared ownership. It only lives
/// while one configuration's output is being converted into records.
#[derive(Debug, Clone, Default)]
pub struct DependencyTree {
    nodes: Vec<DependencyTreeNode>,
    roots: Vec<usize>,
}

impl DependencyTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_root(&mut self, coordinate: Coordinate) -> usize {
        let index = self.push(coordinate);
        self.roots.push(index);
        index
    }

    pub fn add_child(&mut self, parent: usize, coordinate: Coordinate) -> usize {
        let index = self.push(coordinate);
        self.nodes[parent].children.push(index);
        index
    }

    fn push(&mut self, coordinate: Coordinate) -> usize {
        self.nodes.push(DependencyTreeNode {
            coordinate,
            children: Vec::new(),
        });
        self.nodes.len() - 1
    }

    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    pub fn node(&self, index: usize) -> &DependencyTreeNode {
        &self.nodes[index]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Depth-first, pre-order walk over every root and its subtree.
    ///
    /// The visitor receives the parent index (`None` for roots) and the node
    /// index, in the order the entries appeared in the source text.
    pub fn walk<F>(&self, mut visit: F)
    where
        F: FnMut(Option<usize>, usize),
    {
        let mut stack: Vec<(Option<usize>, usize)> =
            self.roots.iter().rev().map(|&root| (None, root)).collect();

        while let Some((parent, index)) = stack.pop() {
            visit(parent, index);
            for &child in self.nodes[index].children.iter().rev() {
                stack.push((Some(index), child));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coordinate(name: &str) -> Coordinate {
        Coordinate::new("g", name, "1.0")
    }

    #[test]
    fn test_build_tree() {
        let mut tree = DependencyTree::new();
        let a = tree.add_root(coordinate("a"));
        let b = tree.add_child(a, coordinate("b"));
        tree.add_root(coordinate("c"));

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.roots().len(), 2);
        assert_eq!(tree.node(a).children, vec![b]);
    }

    #[test]
    fn test_walk_is_preorder_in_source_order() {
        let mut tree = DependencyTree::new();
        let a = tree.add_root(coordinate("a"));
        let b = tree.add_child(a, coordinate("b"));
        tree.add_child(b, coordinate("b1"));
        tree.add_child(a, coordinate("c"));
        tree.add_root(coordinate("d"));

        let mut visited = Vec::new();
        tree.walk(|parent, index| {
            let parent_name = parent.map(|p| tree.node(p).coordinate.module.clone());
            visited.push((parent_name, tree.node(index).coordinate.module.clone()));
        });

        let names: Vec<_> = visited.iter().map(|(_, n)| n.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "b1", "c", "d"]);
        assert_eq!(visited[2].0.as_deref(), Some("b"));
        assert_eq!(visited[4].0, None);
    }

    #[test]
    fn test_empty_tree() {
        let tree = DependencyTree::new();
        assert!(tree.is_empty());
        let mut count = 0;
        tree.walk(|_, _| count += 1);
        assert_eq!(count, 0);
    }
}
