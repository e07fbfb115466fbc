//!
//! Nested bipartition compatibility over rooted phylogenetic trees
//!
//! * `io::newick`: read/write trees
//! * `bipartition`: ingroup | outgroup splits and their relations
//! * `nested`: supertree node generation from nested compatible bipartitions
//! * `diff`: clade-wise comparison of two rooted trees
//!
pub mod bipartition;
pub mod cli;
pub mod diff;
pub mod error;
pub mod io;
pub mod nested;
pub mod prelude;
pub mod taxa;
pub mod tree;
pub mod utils;

pub use error::{Error, Result};
