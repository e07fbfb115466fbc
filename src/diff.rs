//!
//! Comparison of two rooted trees by their clades
//!
//! A clade is the sorted list of leaf names below an internal node.
//!
use crate::error::{Error, Result};
use crate::io::newick::{read_tree_from_file, LabelCleaning};
use crate::tree::Tree;
use derive_new::new;
use log::debug;
use serde::Serialize;
use std::collections::BTreeSet;

/// sorted leaf names below an internal node
pub type Clade = Vec<String>;

///
/// Clades of all internal nodes (root included).
///
/// A unifurcation right above a leaf like `(A)` is the leaf itself, so
/// one-leaf clades are never produced. A node with several children must
/// not repeat a clade seen before; single-child nodes repeat the clade of
/// their child and are allowed to.
///
pub fn clades(tree: &Tree) -> Result<BTreeSet<Clade>> {
    let mut set = BTreeSet::new();
    for node in tree.internal_nodes() {
        let mut clade: Clade = tree
            .leaf_names_under(node)
            .into_iter()
            .map(String::from)
            .collect();
        if clade.len() < 2 {
            continue;
        }
        clade.sort();
        let multi = tree.children(node).len() > 1;
        if multi && set.contains(&clade) {
            return Err(Error::DuplicateClade(clade));
        }
        debug!("clade extracted: {}", clade.join(", "));
        set.insert(clade);
    }
    Ok(set)
}

#[derive(Debug, Clone, PartialEq, Serialize, new)]
pub struct TreeDiff {
    /// clades of the reference missing in the result
    pub missing: Vec<Clade>,
    /// clades of the result not in the reference
    pub extra: Vec<Clade>,
}

impl TreeDiff {
    pub fn is_identical(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }
}

///
/// Compare clades of `result` against `reference`.
///
pub fn diff(reference: &Tree, result: &Tree) -> Result<TreeDiff> {
    let r = clades(reference)?;
    let s = clades(result)?;
    Ok(TreeDiff::new(
        r.difference(&s).cloned().collect(),
        s.difference(&r).cloned().collect(),
    ))
}

///
/// Read each file as a single tree (OTT suffixes stripped) and compare.
///
pub fn diff_files<P: AsRef<std::path::Path>>(reference: P, result: P) -> Result<TreeDiff> {
    let reference = read_tree_from_file(reference, LabelCleaning::StripOttSuffix)?;
    let result = read_tree_from_file(result, LabelCleaning::StripOttSuffix)?;
    diff(&reference, &result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::newick::{parse_newick, parse_newick_with};

    fn c(names: &[&str]) -> Clade {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn clade_set() {
        let t = parse_newick("((B,A),(C,D)E);").unwrap();
        let cs = clades(&t).unwrap();
        let expected: BTreeSet<Clade> = vec![c(&["A", "B"]), c(&["C", "D"]), c(&["A", "B", "C", "D"])]
            .into_iter()
            .collect();
        assert_eq!(cs, expected);
    }

    #[test]
    fn identical_up_to_rotation() {
        let a = parse_newick("((A,B),(C,D));").unwrap();
        let b = parse_newick("((D,C),(B,A));").unwrap();
        assert!(diff(&a, &b).unwrap().is_identical());
    }

    #[test]
    fn missing_and_extra() {
        let a = parse_newick("(((A,B),C),D);").unwrap();
        let b = parse_newick("((A,(B,C)),D);").unwrap();
        let d = diff(&a, &b).unwrap();
        assert_eq!(d.missing, vec![c(&["A", "B"])]);
        assert_eq!(d.extra, vec![c(&["B", "C"])]);
        assert!(!d.is_identical());
    }

    #[test]
    fn ott_suffix_is_ignored() {
        let a = parse_newick_with("((A_ott1,B_ott2),C_ott3);", LabelCleaning::StripOttSuffix).unwrap();
        let b = parse_newick("((A,B),C);").unwrap();
        assert!(diff(&a, &b).unwrap().is_identical());
    }

    #[test]
    fn unifurcation_above_leaf_is_the_leaf() {
        let a = parse_newick("((A),B);").unwrap();
        let b = parse_newick("(A,B);").unwrap();
        assert_eq!(clades(&a).unwrap(), vec![c(&["A", "B"])].into_iter().collect());
        assert!(diff(&a, &b).unwrap().is_identical());
        // a single leaf tree has no clade at all
        assert!(clades(&parse_newick("(A);").unwrap()).unwrap().is_empty());
    }

    #[test]
    fn duplicate_clade() {
        // unifurcation repeats the clade and is fine
        let t = parse_newick("(((A,B)),C);").unwrap();
        assert_eq!(clades(&t).unwrap().len(), 2);
        // a multi-child node cannot repeat a clade; an unlabeled empty
        // subtree is not representable in newick, so build it directly
        let mut t = Tree::new();
        let root = t.root();
        let x = t.add_child(root, Default::default());
        for name in ["A", "B"].iter() {
            let mut leaf = crate::tree::TreeNode::default();
            leaf.label = Some(name.to_string());
            t.add_child(x, leaf);
        }
        t.add_child(root, Default::default());
        assert!(matches!(clades(&t), Err(Error::DuplicateClade(_))));
    }
}
