//!
//! Error type of the crate
//!
use std::fmt;

/// Kind of a newick syntax error
#[derive(Debug, Clone, PartialEq)]
pub enum NewickErrorKind {
    /// input ended in the middle of a tree
    UnexpectedEnd,
    /// `)` without `(` or `(` without `)`
    Unbalanced,
    /// a character that cannot appear here
    UnexpectedChar(char),
    /// `:` followed by something that is not a float
    BadBranchLength(String),
    /// the tree is not terminated by `;`
    MissingSemicolon,
    /// leaf without a name
    EmptyLeafLabel,
    /// quoted label without the closing quote
    UnterminatedQuote,
}

impl fmt::Display for NewickErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NewickErrorKind::UnexpectedEnd => write!(f, "unexpected end of input"),
            NewickErrorKind::Unbalanced => write!(f, "unbalanced parentheses"),
            NewickErrorKind::UnexpectedChar(c) => write!(f, "unexpected character `{}`", c),
            NewickErrorKind::BadBranchLength(s) => write!(f, "malformed branch length `{}`", s),
            NewickErrorKind::MissingSemicolon => write!(f, "missing terminating `;`"),
            NewickErrorKind::EmptyLeafLabel => write!(f, "leaf has no label"),
            NewickErrorKind::UnterminatedQuote => write!(f, "unterminated quoted label"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// newick parse failure at byte position `pos`
    #[error("newick error at byte {pos}: {kind}")]
    Newick { pos: usize, kind: NewickErrorKind },

    /// ingroup and outgroup of a bipartition share taxa
    #[error("overlapping ingroup and outgroup: {} | {}", .ingroup.join(" "), .outgroup.join(" "))]
    Overlap {
        ingroup: Vec<String>,
        outgroup: Vec<String>,
    },

    /// a multi-child clade appeared twice in one tree
    #[error("duplicate clade: {}", .0.join(", "))]
    DuplicateClade(Vec<String>),

    #[error("unknown taxon `{0}`")]
    UnknownTaxon(String),

    /// error while reading the `line`-th (1-origin) line of a multi-tree input
    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<Error>,
    },

    #[error("no trees in input")]
    NoTrees,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn newick(pos: usize, kind: NewickErrorKind) -> Self {
        Error::Newick { pos, kind }
    }
}
