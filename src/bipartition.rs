//!
//! `Bipartition`: a split of taxa into ingroup | outgroup
//!
//! # relations
//!
//! * `nest_relation`: can `b` be placed as a parent of `a`, or can they be summed?
//! * `is_compatible_with`: two biparts can co-exist in a single tree
//! * `is_nested_in`: `a` resolves a part of the ingroup of `b`
//!
use crate::error::{Error, Result};
use crate::taxa::{Taxa, TaxonSet};
use crate::tree::Tree;
use std::fmt;

///
/// ingroup | outgroup
///
/// ```text
/// A B C | D
/// ```
///
/// Ingroup and outgroup never share a taxon.
/// Outgroup can be empty (root of a tree).
///
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bipartition {
    ingroup: TaxonSet,
    outgroup: TaxonSet,
}

///
/// Result of `nest_relation(a, b)`
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NestRelation {
    /// ingroup of `a` contains a taxon of outgroup of `b`
    Incompatible,
    /// `b` is a potential parent of `a`: outgroup of `a` overlaps the ingroup of `b`
    ChildOf,
    /// no overlap of `a`'s outgroup and `b`'s ingroup, so `a + b` is a bipartition.
    Summable,
}

impl Bipartition {
    ///
    /// Create a bipartition, checking the two sides are disjoint.
    /// `taxa` resolves the names reported in the `Overlap` error.
    ///
    pub fn new(ingroup: TaxonSet, outgroup: TaxonSet, taxa: &Taxa) -> Result<Self> {
        if !ingroup.is_disjoint(&outgroup) {
            let names = |set: &TaxonSet| -> Vec<String> {
                taxa.names(set).into_iter().map(String::from).collect()
            };
            return Err(Error::Overlap {
                ingroup: names(&ingroup),
                outgroup: names(&outgroup),
            });
        }
        Ok(Bipartition { ingroup, outgroup })
    }
    ///
    /// Create from names registered in `taxa`.
    ///
    pub fn from_names(taxa: &Taxa, ingroup: &[&str], outgroup: &[&str]) -> Result<Self> {
        let i = taxa.set_of(ingroup.iter().copied())?;
        let o = taxa.set_of(outgroup.iter().copied())?;
        Bipartition::new(i, o, taxa)
    }
    /// caller guarantees the two sides are disjoint
    pub(crate) fn new_unchecked(ingroup: TaxonSet, outgroup: TaxonSet) -> Self {
        debug_assert!(ingroup.is_disjoint(&outgroup));
        Bipartition { ingroup, outgroup }
    }
    pub fn ingroup(&self) -> &TaxonSet {
        &self.ingroup
    }
    pub fn outgroup(&self) -> &TaxonSet {
        &self.outgroup
    }
    ///
    /// merge of two summable bipartitions
    ///
    /// `ab|e + ac|e = abc|e`
    ///
    pub fn sum(&self, other: &Bipartition, taxa: &Taxa) -> Result<Bipartition> {
        Bipartition::new(
            self.ingroup.union(&other.ingroup),
            self.outgroup.union(&other.outgroup),
            taxa,
        )
    }
    ///
    /// Relation of `self` (potential child) to `other` (potential parent).
    ///
    /// ```text
    ///         in     out
    /// self    A B C | D
    /// other   D F   | P Q
    /// ```
    ///
    /// `self.ingroup ^ other.outgroup` is empty and `self.outgroup ^ other.ingroup = {D}`,
    /// so `self` is `ChildOf` `other`.
    ///
    pub fn nest_relation(&self, other: &Bipartition) -> NestRelation {
        if !self.ingroup.is_disjoint(&other.outgroup) {
            NestRelation::Incompatible
        } else if !self.outgroup.is_disjoint(&other.ingroup) {
            NestRelation::ChildOf
        } else {
            NestRelation::Summable
        }
    }
    ///
    /// Two bipartitions can be displayed on a single tree: no taxon is in the
    /// ingroup of one and the outgroup of the other, and their ingroups overlap.
    ///
    pub fn is_compatible_with(&self, other: &Bipartition) -> bool {
        self.ingroup.is_disjoint(&other.outgroup)
            && self.outgroup.is_disjoint(&other.ingroup)
            && !self.ingroup.is_disjoint(&other.ingroup)
    }
    ///
    /// ingroup of `self` is inside the ingroup of `parent` and avoids its outgroup.
    ///
    pub fn is_nested_in(&self, parent: &Bipartition) -> bool {
        self.ingroup.is_subset(&parent.ingroup) && self.ingroup.is_disjoint(&parent.outgroup)
    }
    ///
    /// every taxon of `self` is on the same side in `other`.
    ///
    pub fn is_displayed_by(&self, other: &Bipartition) -> bool {
        self.ingroup.is_subset(&other.ingroup) && self.outgroup.is_subset(&other.outgroup)
    }
    ///
    /// Wrapper for `Display` with the names resolved
    ///
    pub fn display<'a>(&'a self, taxa: &'a Taxa) -> BipartitionDisplay<'a> {
        BipartitionDisplay { bipart: self, taxa }
    }
}

pub struct BipartitionDisplay<'a> {
    bipart: &'a Bipartition,
    taxa: &'a Taxa,
}

impl<'a> fmt::Display for BipartitionDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} | {}",
            self.taxa.format_set(&self.bipart.ingroup),
            self.taxa.format_set(&self.bipart.outgroup)
        )
    }
}

///
/// Bipartitions of all internal nodes of a tree in postorder.
///
/// Leaf labels are interned into `taxa`. If `include_root` is false, the
/// trivial root bipartition (all | empty) is omitted.
///
pub fn bipartitions_from_tree(tree: &Tree, taxa: &mut Taxa, include_root: bool) -> Vec<Bipartition> {
    let all: TaxonSet = tree
        .leaf_names()
        .into_iter()
        .map(|name| taxa.intern(name))
        .collect();
    tree.internal_nodes()
        .into_iter()
        .filter(|&node| include_root || !tree.is_root(node))
        .map(|node| {
            let ingroup: TaxonSet = tree
                .leaf_names_under(node)
                .into_iter()
                .map(|name| taxa.intern(name))
                .collect();
            let outgroup = all.difference(&ingroup);
            Bipartition::new_unchecked(ingroup, outgroup)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::newick::parse_newick;
    use test_case::test_case;

    fn taxa() -> Taxa {
        let mut taxa = Taxa::new();
        for name in ["A", "B", "C", "D", "E", "F", "P", "Q"].iter() {
            taxa.intern(name);
        }
        taxa
    }

    fn bp(taxa: &Taxa, s: &str) -> Bipartition {
        let mut sides = s.split('|');
        let i: Vec<&str> = sides.next().unwrap().split_whitespace().collect();
        let o: Vec<&str> = sides.next().unwrap().split_whitespace().collect();
        Bipartition::from_names(taxa, &i, &o).unwrap()
    }

    #[test_case("A B C | D", "D F | P Q" => NestRelation::ChildOf ; "outgroup within other ingroup")]
    #[test_case("A B | E", "A C | E" => NestRelation::Summable ; "same outgroup")]
    #[test_case("A B | C", "A C | B" => NestRelation::Incompatible ; "ingroup hits outgroup")]
    #[test_case("A B | C", "A B C | D" => NestRelation::ChildOf ; "tree parent")]
    #[test_case("A B C | D", "A B | C" => NestRelation::Incompatible ; "tree child")]
    fn nest_relation(a: &str, b: &str) -> NestRelation {
        let t = taxa();
        bp(&t, a).nest_relation(&bp(&t, b))
    }

    #[test]
    fn sum_and_display() {
        let t = taxa();
        let s = bp(&t, "A B | E").sum(&bp(&t, "A C | E"), &t).unwrap();
        assert_eq!(s, bp(&t, "A B C | E"));
        assert_eq!(format!("{}", s.display(&t)), "A B C | E");
        match bp(&t, "A B | C").sum(&bp(&t, "C | A"), &t) {
            Err(Error::Overlap { ingroup, outgroup }) => {
                assert_eq!(ingroup, vec!["A", "B", "C"]);
                assert_eq!(outgroup, vec!["A", "C"]);
            }
            r => panic!("unexpected {:?}", r),
        }
    }

    #[test]
    fn overlap_is_rejected() {
        let t = taxa();
        match Bipartition::from_names(&t, &["A", "B"], &["B", "C"]) {
            Err(Error::Overlap { ingroup, outgroup }) => {
                assert_eq!(ingroup, vec!["A", "B"]);
                assert_eq!(outgroup, vec!["B", "C"]);
            }
            r => panic!("unexpected {:?}", r),
        }
    }

    #[test]
    fn compatibility_and_nesting() {
        let t = taxa();
        let ab = bp(&t, "A B | C D");
        let abc = bp(&t, "A B C | D");
        let ac = bp(&t, "A C | B D");
        assert!(ab.is_compatible_with(&abc));
        assert!(!ab.is_compatible_with(&ac));
        assert!(ab.is_nested_in(&abc));
        assert!(!abc.is_nested_in(&ab));
        assert!(bp(&t, "A | C").is_displayed_by(&ab));
        assert!(!bp(&t, "A | B").is_displayed_by(&ab));
    }

    #[test]
    fn from_tree() {
        let tree = parse_newick("((A,B),(C,D));").unwrap();
        let mut t = Taxa::new();
        let bs = bipartitions_from_tree(&tree, &mut t, true);
        let shown: Vec<String> = bs.iter().map(|b| format!("{}", b.display(&t))).collect();
        assert_eq!(shown, vec!["A B | C D", "C D | A B", "A B C D | "]);
        let bs = bipartitions_from_tree(&tree, &mut t, false);
        assert_eq!(bs.len(), 2);
    }
}
