//!
//! Taxon name interning and bitset-backed taxon sets
//!
//! * `Taxa`: name <-> `TaxonId` table
//! * `TaxonSet`: set of `TaxonId`s
//!
use fixedbitset::FixedBitSet;
use fnv::FnvHashMap;
use std::hash::{Hash, Hasher};

/// Index of an interned taxon name
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaxonId(pub usize);

impl TaxonId {
    pub fn index(&self) -> usize {
        self.0
    }
}

///
/// Table of taxon names shared by all trees of a run.
///
#[derive(Debug, Clone, Default)]
pub struct Taxa {
    names: Vec<String>,
    ids: FnvHashMap<String, TaxonId>,
}

impl Taxa {
    pub fn new() -> Self {
        Taxa::default()
    }
    ///
    /// get the id of the name, registering it if this is the first occurrence.
    ///
    pub fn intern(&mut self, name: &str) -> TaxonId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = TaxonId(self.names.len());
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        id
    }
    pub fn id(&self, name: &str) -> Option<TaxonId> {
        self.ids.get(name).copied()
    }
    pub fn name(&self, id: TaxonId) -> &str {
        &self.names[id.index()]
    }
    pub fn len(&self) -> usize {
        self.names.len()
    }
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
    ///
    /// build a set from names. Fails on names never interned.
    ///
    pub fn set_of<'a, I: IntoIterator<Item = &'a str>>(
        &self,
        names: I,
    ) -> crate::Result<TaxonSet> {
        let mut set = TaxonSet::with_capacity(self.len());
        for name in names {
            let id = self
                .id(name)
                .ok_or_else(|| crate::Error::UnknownTaxon(name.to_string()))?;
            set.insert(id);
        }
        Ok(set)
    }
    ///
    /// names of the members of the set, sorted lexicographically.
    ///
    pub fn names<'a>(&'a self, set: &TaxonSet) -> Vec<&'a str> {
        let mut names: Vec<&str> = set.iter().map(|id| self.name(id)).collect();
        names.sort_unstable();
        names
    }
    /// space separated sorted names
    pub fn format_set(&self, set: &TaxonSet) -> String {
        self.names(set).join(" ")
    }
}

///
/// Set of taxa as a bitset over `TaxonId`.
///
/// The bitset grows on demand, so sets created before `Taxa` grew can be
/// mixed freely with newer ones. Equality and hashing only look at members.
///
#[derive(Debug, Clone, Default)]
pub struct TaxonSet {
    bits: FixedBitSet,
}

impl TaxonSet {
    pub fn new() -> Self {
        TaxonSet::default()
    }
    pub fn with_capacity(n: usize) -> Self {
        TaxonSet {
            bits: FixedBitSet::with_capacity(n),
        }
    }
    pub fn insert(&mut self, id: TaxonId) {
        if id.index() >= self.bits.len() {
            self.bits.grow(id.index() + 1);
        }
        self.bits.insert(id.index());
    }
    pub fn contains(&self, id: TaxonId) -> bool {
        self.bits.contains(id.index())
    }
    pub fn len(&self) -> usize {
        self.bits.count_ones(..)
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    pub fn iter(&self) -> impl Iterator<Item = TaxonId> + '_ {
        self.bits.ones().map(TaxonId)
    }
    pub fn union(&self, other: &TaxonSet) -> TaxonSet {
        let mut bits = self.bits.clone();
        bits.union_with(&other.bits);
        TaxonSet { bits }
    }
    pub fn intersection(&self, other: &TaxonSet) -> TaxonSet {
        let mut bits = self.bits.clone();
        bits.intersect_with(&other.bits);
        TaxonSet { bits }
    }
    pub fn difference(&self, other: &TaxonSet) -> TaxonSet {
        let mut bits = self.bits.clone();
        bits.difference_with(&other.bits);
        TaxonSet { bits }
    }
    /// size of the intersection, without allocating it
    pub fn intersection_len(&self, other: &TaxonSet) -> usize {
        self.bits.intersection(&other.bits).count()
    }
    pub fn is_disjoint(&self, other: &TaxonSet) -> bool {
        self.bits.is_disjoint(&other.bits)
    }
    pub fn is_subset(&self, other: &TaxonSet) -> bool {
        self.bits.is_subset(&other.bits)
    }
    pub fn is_proper_subset(&self, other: &TaxonSet) -> bool {
        self.is_subset(other) && self.len() < other.len()
    }
}

impl PartialEq for TaxonSet {
    fn eq(&self, other: &Self) -> bool {
        self.is_subset(other) && other.is_subset(self)
    }
}

impl Eq for TaxonSet {}

impl Hash for TaxonSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for id in self.iter() {
            id.hash(state);
        }
    }
}

impl std::iter::FromIterator<TaxonId> for TaxonSet {
    fn from_iter<I: IntoIterator<Item = TaxonId>>(iter: I) -> Self {
        let mut set = TaxonSet::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_is_idempotent() {
        let mut taxa = Taxa::new();
        let a = taxa.intern("A");
        let b = taxa.intern("B");
        assert_eq!(taxa.intern("A"), a);
        assert_ne!(a, b);
        assert_eq!(taxa.len(), 2);
        assert_eq!(taxa.name(b), "B");
        assert_eq!(taxa.id("C"), None);
    }

    #[test]
    fn set_equality_ignores_capacity() {
        let mut small = TaxonSet::with_capacity(2);
        small.insert(TaxonId(1));
        let mut large = TaxonSet::with_capacity(100);
        large.insert(TaxonId(1));
        assert_eq!(small, large);

        use std::collections::HashSet;
        let mut h = HashSet::new();
        h.insert(small);
        assert!(h.contains(&large));
    }

    #[test]
    fn set_algebra() {
        let x: TaxonSet = vec![TaxonId(0), TaxonId(1), TaxonId(2)].into_iter().collect();
        let y: TaxonSet = vec![TaxonId(2), TaxonId(5)].into_iter().collect();
        assert_eq!(x.union(&y).len(), 4);
        assert_eq!(x.intersection(&y), vec![TaxonId(2)].into_iter().collect());
        assert_eq!(x.intersection_len(&y), 1);
        assert_eq!(y.difference(&x), vec![TaxonId(5)].into_iter().collect());
        assert!(!x.is_disjoint(&y));
        assert!(x.intersection(&y).is_subset(&x));
        assert!(x.intersection(&y).is_proper_subset(&y));
        assert!(!x.is_proper_subset(&x));
        assert!(TaxonSet::new().is_empty());
        // subset across capacities
        let z: TaxonSet = vec![TaxonId(0)].into_iter().collect();
        assert!(z.is_subset(&x));
        assert!(!y.is_subset(&x));
    }

    #[test]
    fn names_are_sorted() {
        let mut taxa = Taxa::new();
        for name in ["D", "B", "C", "A"].iter() {
            taxa.intern(name);
        }
        let set = taxa.set_of(vec!["C", "A", "D"]).unwrap();
        assert_eq!(taxa.names(&set), vec!["A", "C", "D"]);
        assert_eq!(taxa.format_set(&set), "A C D");
        assert!(taxa.set_of(vec!["Z"]).is_err());
    }
}
