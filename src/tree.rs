//!
//! Rooted tree
//!
//! A thin wrapper of `petgraph::DiGraph` whose edges run parent -> child.
//! Children are returned in the order they were added (i.e. newick order).
//!
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

/// Node weight of the tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeNode {
    pub label: Option<String>,
    pub branch_length: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct Tree {
    graph: DiGraph<TreeNode, ()>,
    root: NodeIndex,
}

impl Tree {
    ///
    /// Create a tree with a single (unlabeled) root
    ///
    pub fn new() -> Self {
        let mut graph = DiGraph::new();
        let root = graph.add_node(TreeNode::default());
        Tree { graph, root }
    }
    pub fn root(&self) -> NodeIndex {
        self.root
    }
    pub fn n_nodes(&self) -> usize {
        self.graph.node_count()
    }
    ///
    /// Add a new child below `parent` and return its index.
    ///
    pub fn add_child(&mut self, parent: NodeIndex, node: TreeNode) -> NodeIndex {
        let child = self.graph.add_node(node);
        self.graph.add_edge(parent, child, ());
        child
    }
    pub fn node(&self, node: NodeIndex) -> &TreeNode {
        &self.graph[node]
    }
    pub fn node_mut(&mut self, node: NodeIndex) -> &mut TreeNode {
        &mut self.graph[node]
    }
    pub fn label(&self, node: NodeIndex) -> Option<&str> {
        self.graph[node].label.as_deref()
    }
    pub fn branch_length(&self, node: NodeIndex) -> Option<f64> {
        self.graph[node].branch_length
    }
    ///
    /// children of the node, in insertion order
    ///
    pub fn children(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut edges: Vec<_> = self
            .graph
            .edges_directed(node, Direction::Outgoing)
            .map(|e| (e.id(), e.target()))
            .collect();
        edges.sort();
        edges.into_iter().map(|(_, child)| child).collect()
    }
    pub fn parent(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .neighbors_directed(node, Direction::Incoming)
            .next()
    }
    pub fn is_leaf(&self, node: NodeIndex) -> bool {
        self.graph
            .neighbors_directed(node, Direction::Outgoing)
            .next()
            .is_none()
    }
    pub fn is_root(&self, node: NodeIndex) -> bool {
        node == self.root
    }
    ///
    /// nodes in preorder (parent before children)
    ///
    pub fn preorder(&self) -> Vec<NodeIndex> {
        let mut order = Vec::with_capacity(self.n_nodes());
        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            order.push(node);
            stack.extend(self.children(node).into_iter().rev());
        }
        order
    }
    ///
    /// nodes in postorder (children before parent)
    ///
    pub fn postorder(&self) -> Vec<NodeIndex> {
        self.postorder_from(self.root)
    }
    fn postorder_from(&self, start: NodeIndex) -> Vec<NodeIndex> {
        let mut order = Vec::new();
        let mut stack = vec![(start, false)];
        while let Some((node, expanded)) = stack.pop() {
            if expanded {
                order.push(node);
            } else {
                stack.push((node, true));
                for child in self.children(node).into_iter().rev() {
                    stack.push((child, false));
                }
            }
        }
        order
    }
    /// leaves in newick order
    pub fn leaves(&self) -> Vec<NodeIndex> {
        self.leaves_under(self.root)
    }
    pub fn leaves_under(&self, node: NodeIndex) -> Vec<NodeIndex> {
        self.postorder_from(node)
            .into_iter()
            .filter(|&v| self.is_leaf(v))
            .collect()
    }
    /// nodes with at least one child, in postorder. The root is included.
    pub fn internal_nodes(&self) -> Vec<NodeIndex> {
        self.postorder()
            .into_iter()
            .filter(|&v| !self.is_leaf(v))
            .collect()
    }
    pub fn leaf_names(&self) -> Vec<&str> {
        self.leaf_names_under(self.root)
    }
    ///
    /// labels of the leaves below the node. Unlabeled leaves are skipped.
    ///
    pub fn leaf_names_under(&self, node: NodeIndex) -> Vec<&str> {
        self.leaves_under(node)
            .into_iter()
            .filter_map(|v| self.label(v))
            .collect()
    }
}

impl Default for Tree {
    fn default() -> Self {
        Tree::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str) -> TreeNode {
        TreeNode {
            label: Some(name.to_string()),
            branch_length: None,
        }
    }

    /// ((A,B),C);
    fn mock() -> Tree {
        let mut t = Tree::new();
        let root = t.root();
        let ab = t.add_child(root, TreeNode::default());
        t.add_child(ab, leaf("A"));
        t.add_child(ab, leaf("B"));
        t.add_child(root, leaf("C"));
        t
    }

    #[test]
    fn traversal_orders() {
        let t = mock();
        let pre: Vec<_> = t
            .preorder()
            .into_iter()
            .map(|v| t.label(v).unwrap_or("*"))
            .collect();
        assert_eq!(pre, vec!["*", "*", "A", "B", "C"]);
        let post: Vec<_> = t
            .postorder()
            .into_iter()
            .map(|v| t.label(v).unwrap_or("*"))
            .collect();
        assert_eq!(post, vec!["A", "B", "*", "C", "*"]);
    }

    #[test]
    fn leaves_and_parents() {
        let t = mock();
        assert_eq!(t.leaf_names(), vec!["A", "B", "C"]);
        assert_eq!(t.internal_nodes().len(), 2);
        let ab = t.children(t.root())[0];
        assert_eq!(t.leaf_names_under(ab), vec!["A", "B"]);
        assert_eq!(t.parent(ab), Some(t.root()));
        assert_eq!(t.parent(t.root()), None);
        assert!(!t.is_leaf(ab));
        assert!(t.is_root(t.root()));
        assert_eq!(t.n_nodes(), 5);
    }
}
