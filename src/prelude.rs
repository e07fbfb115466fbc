//!
//! globally-available parts
//!
pub use crate::bipartition::{Bipartition, NestRelation};
pub use crate::error::{Error, Result};
pub use crate::io::newick::{parse_newick, read_trees, LabelCleaning};
pub use crate::nested::{nest, NestConfig, NestedResult};
pub use crate::taxa::{Taxa, TaxonId, TaxonSet};
pub use crate::tree::Tree;
pub use petgraph::graph::{DiGraph, NodeIndex};
