//!
//! Recursive walks over the child-of graph
//!
//! * `PathWalker`: depth-first walk from a start vertex towards potential
//!   parents, collecting the visited path.
//! * `ChainBuilder`: replays a recorded path as a chain and emits the nodes.
//!
//! Both walks share `absorb`, which merges a potential parent into the
//! partial node being grown from the tips towards the root.
//!
use crate::bipartition::Bipartition;
use crate::error::Result;
use crate::taxa::{Taxa, TaxonSet};
use crate::utils::spaces;
use fnv::FnvHashMap;
use log::{debug, trace};
use petgraph::graph::{DiGraph, NodeIndex};

///
/// ingroup | outgroup being grown. Sides are disjoint except transiently
/// while merging the outgroups returned from the deeper levels.
///
#[derive(Debug, Clone, Default)]
pub struct Partial {
    pub ingroup: TaxonSet,
    pub outgroup: TaxonSet,
}

impl Partial {
    pub fn empty() -> Self {
        Partial::default()
    }
    ///
    /// turn into a bipartition, aborting if the two sides overlap.
    ///
    fn finish(self, taxa: &Taxa) -> Result<Bipartition> {
        Bipartition::new(self.ingroup, self.outgroup, taxa)
    }
}

///
/// Merge `parent` into the partial child `child`.
///
/// Returns None if the child ingroup touches the parent outgroup, or if
/// the child ingroup already contains the whole parent ingroup (the parent
/// would not resolve anything).
///
/// Otherwise the parent ingroup is added to the child ingroup, and the
/// parent outgroup is added to the child outgroup; if the old child outgroup
/// now overlaps the new ingroup it is replaced by the parent outgroup.
///
pub fn absorb(parent: &Bipartition, child: &Partial) -> Option<Partial> {
    if !child.ingroup.is_disjoint(parent.outgroup()) {
        return None;
    }
    if child.ingroup.intersection_len(parent.ingroup()) == parent.ingroup().len() {
        return None;
    }
    let ingroup = parent.ingroup().union(&child.ingroup);
    let outgroup = if child.outgroup.is_disjoint(&ingroup) {
        parent.outgroup().union(&child.outgroup)
    } else {
        parent.outgroup().clone()
    };
    Some(Partial { ingroup, outgroup })
}

/// successors of `v` in ascending order
fn successors(graph: &DiGraph<usize, ()>, v: usize) -> Vec<usize> {
    let mut s: Vec<usize> = graph
        .neighbors(NodeIndex::new(v))
        .map(|u| graph[u])
        .collect();
    s.sort_unstable();
    s
}

///
/// Depth-first walk from a start vertex.
///
/// The path is shared by the whole walk and never popped, so it is also the
/// visited set: every vertex is entered at most once per start vertex.
///
pub struct PathWalker<'a> {
    biparts: &'a [Bipartition],
    graph: &'a DiGraph<usize, ()>,
    taxa: &'a Taxa,
    path: Vec<usize>,
}

impl<'a> PathWalker<'a> {
    pub fn new(biparts: &'a [Bipartition], graph: &'a DiGraph<usize, ()>, taxa: &'a Taxa) -> Self {
        PathWalker {
            biparts,
            graph,
            taxa,
            path: Vec::new(),
        }
    }
    ///
    /// Walk from `start` and return the visited path, or None if `start`
    /// contributes nothing.
    ///
    pub fn walk(mut self, start: usize) -> Result<Option<Vec<usize>>> {
        let node = self.visit(start, &Partial::empty(), 0)?;
        Ok(node.map(|_| self.path))
    }
    fn visit(&mut self, v: usize, child: &Partial, level: usize) -> Result<Option<Bipartition>> {
        let indent = spaces(level * 2);
        let biparts = self.biparts;
        let parents = successors(self.graph, v);
        let parent = &biparts[v];
        if parents.is_empty() {
            trace!(
                "{}parent {}: {} has no potential parents, stop",
                indent,
                v,
                parent.display(self.taxa)
            );
            return Ok(None);
        }
        debug!(
            "{}potential parent {}: {}  child: {} | {}",
            indent,
            v,
            parent.display(self.taxa),
            self.taxa.format_set(&child.ingroup),
            self.taxa.format_set(&child.outgroup),
        );
        let mut current = match absorb(parent, child) {
            Some(current) => current,
            None => {
                debug!("{}child does not nest into {}, stop", indent, v);
                return Ok(None);
            }
        };
        debug!(
            "{}updated child: {} | {}",
            indent,
            self.taxa.format_set(&current.ingroup),
            self.taxa.format_set(&current.outgroup),
        );

        self.path.push(v);
        trace!("{}path: {:?}, moving to {:?}", indent, self.path, parents);
        for u in parents {
            if self.path.contains(&u) {
                continue;
            }
            if let Some(node) = self.visit(u, &current, level + 1)? {
                current.outgroup = current.outgroup.union(node.outgroup());
            }
        }

        let node = current.finish(self.taxa)?;
        debug!(
            "{}done with {}: node {}",
            indent,
            v,
            node.display(self.taxa)
        );
        Ok(Some(node))
    }
}

///
/// Deduplicated list of generated nodes, in order of creation.
///
#[derive(Debug, Clone, Default)]
pub(crate) struct NodeSet {
    nodes: Vec<Bipartition>,
    index: FnvHashMap<Bipartition, usize>,
}

impl NodeSet {
    pub fn new() -> Self {
        NodeSet::default()
    }
    ///
    /// add the node if no identical one exists. returns its index.
    ///
    pub fn insert(&mut self, node: Bipartition) -> usize {
        if let Some(&i) = self.index.get(&node) {
            return i;
        }
        let i = self.nodes.len();
        self.index.insert(node.clone(), i);
        self.nodes.push(node);
        i
    }
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn into_vec(self) -> Vec<Bipartition> {
        self.nodes
    }
}

///
/// Replays a recorded path `p0 -> p1 -> ...` as a chain, creating a node
/// for every link that nests. Deeper links are created first.
///
pub struct ChainBuilder<'a> {
    biparts: &'a [Bipartition],
    taxa: &'a Taxa,
    nodes: NodeSet,
}

impl<'a> ChainBuilder<'a> {
    pub fn new(biparts: &'a [Bipartition], taxa: &'a Taxa) -> Self {
        ChainBuilder {
            biparts,
            taxa,
            nodes: NodeSet::new(),
        }
    }
    pub fn add_path(&mut self, path: &[usize]) -> Result<()> {
        self.link(path, &Partial::empty())?;
        Ok(())
    }
    fn link(&mut self, path: &[usize], child: &Partial) -> Result<Option<Bipartition>> {
        let (v, rest) = match path.split_first() {
            Some(x) => x,
            None => return Ok(None),
        };
        let mut current = match absorb(&self.biparts[*v], child) {
            Some(current) => current,
            None => return Ok(None),
        };
        if let Some(node) = self.link(rest, &current)? {
            current.outgroup = current.outgroup.union(node.outgroup());
        }
        let node = current.finish(self.taxa)?;
        let before = self.nodes.len();
        let i = self.nodes.insert(node.clone());
        if self.nodes.len() > before {
            trace!("node#{} {}", i, node.display(self.taxa));
        }
        Ok(Some(node))
    }
    pub fn into_nodes(self) -> Vec<Bipartition> {
        self.nodes.into_vec()
    }
}
