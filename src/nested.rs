//!
//! Nested compatibility of bipartitions and generation of supertree nodes
//!
//! 1. collect bipartitions of all input trees
//! 2. add sums of summable pairs (`ab|e + ac|e = abc|e`)
//! 3. build the child-of graph (edge `r -> s`: `s` is a potential parent of `r`)
//! 4. walk the graph from every vertex and record the visited paths
//! 5. replay each path as a chain to create the deduplicated nodes
//! 6. relate the nodes into a hierarchy
//! 7. check every input clade is represented by a node
//!
pub mod check;
pub mod walk;

use crate::bipartition::{bipartitions_from_tree, Bipartition, NestRelation};
use crate::error::{Error, Result};
use crate::taxa::Taxa;
use crate::tree::Tree;
use check::{check_tree, TreeSupport};
use fnv::FnvHashSet;
use itertools::Itertools;
use log::{debug, info};
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use walk::{ChainBuilder, PathWalker};

///
/// Parameters of `nest`
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NestConfig {
    /// use the trivial bipartition (all leaves | empty) of each tree root
    pub include_root: bool,
    /// check the input trees against the generated nodes
    pub check_trees: bool,
}

impl Default for NestConfig {
    fn default() -> Self {
        NestConfig {
            include_root: true,
            check_trees: true,
        }
    }
}

impl NestConfig {
    pub fn include_root(mut self, include_root: bool) -> Self {
        self.include_root = include_root;
        self
    }
    pub fn check_trees(mut self, check_trees: bool) -> Self {
        self.check_trees = check_trees;
        self
    }
}

///
/// Everything computed by `nest`
///
#[derive(Debug, Clone)]
pub struct NestedResult {
    pub taxa: Taxa,
    /// input bipartitions followed by the added sums
    pub bipartitions: Vec<Bipartition>,
    /// number of bipartitions taken from the trees
    pub n_original: usize,
    /// node weight is the index in `bipartitions`
    pub child_of: DiGraph<usize, ()>,
    pub paths: Vec<Vec<usize>>,
    pub nodes: Vec<Bipartition>,
    /// parent -> child edges between `nodes`. node weight is the index in `nodes`
    pub hierarchy: DiGraph<usize, ()>,
    pub supports: Vec<TreeSupport>,
}

impl NestedResult {
    /// bipartitions that were created by summation
    pub fn sums(&self) -> &[Bipartition] {
        &self.bipartitions[self.n_original..]
    }
    ///
    /// `(parent, child)` index pairs of the node hierarchy, sorted
    ///
    pub fn hierarchy_edges(&self) -> Vec<(usize, usize)> {
        self.hierarchy
            .edge_indices()
            .filter_map(|e| self.hierarchy.edge_endpoints(e))
            .map(|(p, c)| (self.hierarchy[p], self.hierarchy[c]))
            .sorted()
            .collect()
    }
    ///
    /// all input clades have a node
    ///
    pub fn all_trees_supported(&self) -> bool {
        self.supports.iter().all(|s| s.is_supported())
    }
    ///
    /// name-resolved summary for serialization
    ///
    pub fn summary(&self) -> NestSummary {
        let show = |b: &Bipartition| SummaryBipartition {
            ingroup: names(&self.taxa, b, true),
            outgroup: names(&self.taxa, b, false),
        };
        NestSummary {
            bipartitions: self.bipartitions.iter().map(show).collect(),
            n_original: self.n_original,
            child_of: self
                .child_of
                .edge_indices()
                .filter_map(|e| self.child_of.edge_endpoints(e))
                .map(|(a, b)| (self.child_of[a], self.child_of[b]))
                .sorted()
                .collect(),
            paths: self.paths.clone(),
            nodes: self.nodes.iter().map(show).collect(),
            hierarchy: self.hierarchy_edges(),
            supports: self.supports.clone(),
        }
    }
}

fn names(taxa: &Taxa, b: &Bipartition, ingroup: bool) -> Vec<String> {
    let set = if ingroup { b.ingroup() } else { b.outgroup() };
    taxa.names(set).into_iter().map(String::from).collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryBipartition {
    pub ingroup: Vec<String>,
    pub outgroup: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NestSummary {
    pub bipartitions: Vec<SummaryBipartition>,
    pub n_original: usize,
    pub child_of: Vec<(usize, usize)>,
    pub paths: Vec<Vec<usize>>,
    pub nodes: Vec<SummaryBipartition>,
    pub hierarchy: Vec<(usize, usize)>,
    pub supports: Vec<TreeSupport>,
}

///
/// Append the sum of every summable pair of `biparts` not seen before.
///
pub fn add_sums(biparts: &mut Vec<Bipartition>, taxa: &Taxa) -> Result<usize> {
    let mut seen: FnvHashSet<Bipartition> = biparts.iter().cloned().collect();
    let mut added = Vec::new();
    for (r, a) in biparts.iter().enumerate() {
        for (s, b) in biparts.iter().enumerate() {
            if r == s || a.nest_relation(b) != NestRelation::Summable {
                continue;
            }
            let sum = a.sum(b, taxa)?;
            if seen.insert(sum.clone()) {
                added.push(sum);
            }
        }
    }
    let n = added.len();
    biparts.extend(added);
    Ok(n)
}

///
/// Edge `r -> s` for every pair with `nest_relation(r, s) == ChildOf`.
/// The `i`-th node of the graph corresponds to `biparts[i]`.
///
pub fn child_of_graph(biparts: &[Bipartition]) -> DiGraph<usize, ()> {
    let mut graph = DiGraph::new();
    for i in 0..biparts.len() {
        graph.add_node(i);
    }
    for (r, a) in biparts.iter().enumerate() {
        for (s, b) in biparts.iter().enumerate() {
            if r != s && a.nest_relation(b) == NestRelation::ChildOf {
                graph.add_edge(NodeIndex::new(r), NodeIndex::new(s), ());
            }
        }
    }
    graph
}

///
/// Walk from every vertex having a potential parent, in ascending order,
/// and collect the distinct visited paths.
///
pub fn collect_paths(
    biparts: &[Bipartition],
    graph: &DiGraph<usize, ()>,
    taxa: &Taxa,
) -> Result<Vec<Vec<usize>>> {
    let mut paths: Vec<Vec<usize>> = Vec::new();
    for start in graph.node_indices() {
        if graph.neighbors(start).next().is_none() {
            continue;
        }
        let v = graph[start];
        debug!("generating nested compatibility for {}: {}", v, biparts[v].display(taxa));
        if let Some(path) = PathWalker::new(biparts, graph, taxa).walk(v)? {
            debug!("path from {}: {:?}", v, path);
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    }
    Ok(paths)
}

///
/// Nodes created by replaying every path as a chain
///
pub fn nodes_from_paths(
    biparts: &[Bipartition],
    paths: &[Vec<usize>],
    taxa: &Taxa,
) -> Result<Vec<Bipartition>> {
    let mut chain = ChainBuilder::new(biparts, taxa);
    for path in paths {
        chain.add_path(path)?;
    }
    Ok(chain.into_nodes())
}

///
/// Edge `i -> j` if node `j` is a child of node `i`: the ingroup of `j`
/// is a proper subset of the ingroup of `i` and avoids the outgroup of `i`.
///
pub fn node_hierarchy(nodes: &[Bipartition]) -> DiGraph<usize, ()> {
    let mut graph = DiGraph::new();
    for i in 0..nodes.len() {
        graph.add_node(i);
    }
    for (i, parent) in nodes.iter().enumerate() {
        for (j, child) in nodes.iter().enumerate() {
            if i != j
                && child.ingroup().is_proper_subset(parent.ingroup())
                && child.ingroup().is_disjoint(parent.outgroup())
            {
                graph.add_edge(NodeIndex::new(i), NodeIndex::new(j), ());
            }
        }
    }
    graph
}

///
/// Run the whole nested compatibility analysis over `trees`.
///
pub fn nest(trees: &[Tree], config: &NestConfig) -> Result<NestedResult> {
    if trees.is_empty() {
        return Err(Error::NoTrees);
    }
    let mut taxa = Taxa::new();
    let mut bipartitions: Vec<Bipartition> = Vec::new();
    for tree in trees {
        bipartitions.extend(bipartitions_from_tree(tree, &mut taxa, config.include_root));
    }
    let n_original = bipartitions.len();
    let n_sums = add_sums(&mut bipartitions, &taxa)?;
    info!(
        "{} taxa, {} bipartitions from {} trees, {} added by summation",
        taxa.len(),
        n_original,
        trees.len(),
        n_sums
    );

    let child_of = child_of_graph(&bipartitions);
    info!("child-of graph: {} edges", child_of.edge_count());

    let paths = collect_paths(&bipartitions, &child_of, &taxa)?;
    info!("{} paths", paths.len());

    let nodes = nodes_from_paths(&bipartitions, &paths, &taxa)?;
    let hierarchy = node_hierarchy(&nodes);
    info!("{} nodes, {} parent-child relations", nodes.len(), hierarchy.edge_count());

    let supports = if config.check_trees {
        trees
            .iter()
            .enumerate()
            .map(|(i, tree)| check_tree(i, tree, &taxa, &nodes))
            .collect::<Result<Vec<_>>>()?
    } else {
        Vec::new()
    };

    Ok(NestedResult {
        taxa,
        bipartitions,
        n_original,
        child_of,
        paths,
        nodes,
        hierarchy,
        supports,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::newick::parse_newick;

    fn parse_all(ss: &[&str]) -> Vec<Tree> {
        ss.iter().map(|s| parse_newick(s).unwrap()).collect()
    }

    fn shown(taxa: &Taxa, bs: &[Bipartition]) -> Vec<String> {
        bs.iter().map(|b| format!("{}", b.display(taxa))).collect()
    }

    #[test]
    fn sums_are_deduplicated() {
        let mut taxa = Taxa::new();
        for name in ["A", "B", "C", "E"].iter() {
            taxa.intern(name);
        }
        let mut bs = vec![
            Bipartition::from_names(&taxa, &["A", "B"], &["E"]).unwrap(),
            Bipartition::from_names(&taxa, &["A", "C"], &["E"]).unwrap(),
            Bipartition::from_names(&taxa, &["A", "B", "C"], &["E"]).unwrap(),
        ];
        // ab|e + ac|e = abc|e already exists, and abc|e is not summable with
        // the others in a new way
        let n = add_sums(&mut bs, &taxa).unwrap();
        assert_eq!(n, 0);

        bs.pop();
        let n = add_sums(&mut bs, &taxa).unwrap();
        assert_eq!(n, 1);
        assert_eq!(shown(&taxa, &bs[2..]), vec!["A B C | E"]);
    }

    #[test]
    fn single_tree_is_recovered() {
        let trees = parse_all(&["(((A,B),C),D);"]);
        let r = nest(&trees, &NestConfig::default()).unwrap();
        assert_eq!(
            shown(&r.taxa, &r.bipartitions),
            vec!["A B | C D", "A B C | D", "A B C D | "]
        );
        assert_eq!(r.n_original, 3);
        assert!(r.sums().is_empty());
        // 0 -> 1, 0 -> 2, 1 -> 2
        assert_eq!(r.child_of.edge_count(), 3);
        // the root has no potential parent, so it never joins a path
        assert_eq!(r.paths, vec![vec![0, 1], vec![1]]);
        assert_eq!(shown(&r.taxa, &r.nodes), vec!["A B C | D", "A B | C D"]);
        assert_eq!(r.hierarchy_edges(), vec![(0, 1)]);
        assert!(r.all_trees_supported());
        assert_eq!(r.supports[0].matched.len(), 2);
    }

    #[test]
    fn hierarchy_needs_proper_subset_in_any_order() {
        let mut taxa = Taxa::new();
        for name in ["A", "B", "C", "D"].iter() {
            taxa.intern(name);
        }
        let nodes = vec![
            Bipartition::from_names(&taxa, &["A", "B"], &["C"]).unwrap(),
            Bipartition::from_names(&taxa, &["A", "B"], &["D"]).unwrap(),
            Bipartition::from_names(&taxa, &["A", "B", "C"], &["D"]).unwrap(),
        ];
        let h = node_hierarchy(&nodes);
        let edges: Vec<(usize, usize)> = h
            .edge_indices()
            .filter_map(|e| h.edge_endpoints(e))
            .map(|(p, c)| (h[p], h[c]))
            .sorted()
            .collect();
        // equal ingroups are not nested either way, and the parent may come
        // after its children
        assert_eq!(edges, vec![(2, 0), (2, 1)]);
    }

    #[test]
    fn empty_input() {
        assert!(matches!(nest(&[], &NestConfig::default()), Err(Error::NoTrees)));
    }
}
