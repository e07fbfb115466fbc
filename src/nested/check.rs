//!
//! Check that every clade of the input trees is represented by a generated node
//!
use crate::bipartition::Bipartition;
use crate::error::Result;
use crate::taxa::Taxa;
use crate::tree::Tree;
use log::{debug, warn};
use serde::Serialize;

/// a tree clade and the generated nodes that display it
#[derive(Debug, Clone, Serialize)]
pub struct CladeMatch {
    /// newick of the clade, without branch lengths
    pub newick: String,
    /// indices of generated nodes
    pub nodes: Vec<usize>,
}

///
/// Result of checking a single input tree against the generated nodes.
///
#[derive(Debug, Clone, Serialize)]
pub struct TreeSupport {
    pub tree: usize,
    pub matched: Vec<CladeMatch>,
    /// newick of clades without any generated node
    pub unmatched: Vec<String>,
}

impl TreeSupport {
    pub fn is_supported(&self) -> bool {
        self.unmatched.is_empty()
    }
}

///
/// For each internal non-root node (ingroup L, outgroup R relative to the
/// tree leaves), list the nodes `j` with `L ⊆ j.ingroup` and `R ⊆ j.outgroup`.
///
pub fn check_tree(
    index: usize,
    tree: &Tree,
    taxa: &Taxa,
    nodes: &[Bipartition],
) -> Result<TreeSupport> {
    let all = taxa.set_of(tree.leaf_names())?;
    let mut matched = Vec::new();
    let mut unmatched = Vec::new();
    for v in tree.internal_nodes() {
        if tree.is_root(v) {
            continue;
        }
        let ingroup = taxa.set_of(tree.leaf_names_under(v))?;
        let outgroup = all.difference(&ingroup);
        let clade = Bipartition::new_unchecked(ingroup, outgroup);
        let newick = tree.subtree_newick(v, false);
        let hits: Vec<usize> = nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| clade.is_displayed_by(node))
            .map(|(j, _)| j)
            .collect();
        if hits.is_empty() {
            warn!("tree#{} no match for tree node: {}", index, newick);
            unmatched.push(newick);
        } else {
            debug!("tree#{} {} -> {:?}", index, newick, hits);
            matched.push(CladeMatch {
                newick,
                nodes: hits,
            });
        }
    }
    Ok(TreeSupport {
        tree: index,
        matched,
        unmatched,
    })
}
