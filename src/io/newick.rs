//!
//! Newick reader/writer
//!
//! ```text
//! tree    := subtree ';'
//! subtree := '(' subtree (',' subtree)* ')' [label] [':' length]
//!          | label [':' length]
//! ```
//!
//! Labels are either unquoted (anything up to `(),:;[`, trimmed) or
//! single-quoted with `''` as an escaped quote. `[...]` comments are skipped.
//!
use crate::error::{Error, NewickErrorKind, Result};
use crate::tree::{Tree, TreeNode};
use once_cell::sync::Lazy;
use petgraph::graph::NodeIndex;
use regex::Regex;
use std::io::BufRead;

static OTT_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"_ott\d+$").expect("valid regex"));

/// How leaf labels are cleaned while parsing
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LabelCleaning {
    /// keep labels as written
    Keep,
    /// remove a trailing `_ott<digits>` (OTT id suffix)
    StripOttSuffix,
}

impl Default for LabelCleaning {
    fn default() -> Self {
        LabelCleaning::Keep
    }
}

///
/// Remove `_ott123`-style suffix from a label
///
pub fn strip_ott_suffix(label: &str) -> &str {
    match OTT_SUFFIX.find(label) {
        Some(m) => &label[..m.start()],
        None => label,
    }
}

///
/// Parse a single newick string like `((A,B),C);`
///
pub fn parse_newick(s: &str) -> Result<Tree> {
    parse_newick_with(s, LabelCleaning::Keep)
}

pub fn parse_newick_with(s: &str, cleaning: LabelCleaning) -> Result<Tree> {
    let mut parser = Parser::new(s, cleaning);
    parser.parse()
}

///
/// Parse trees, one per non-empty line.
///
pub fn read_trees<R: BufRead>(reader: R, cleaning: LabelCleaning) -> Result<Vec<Tree>> {
    let mut trees = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let tree = parse_newick_with(&line, cleaning).map_err(|e| Error::AtLine {
            line: i + 1,
            source: Box::new(e),
        })?;
        trees.push(tree);
    }
    Ok(trees)
}

pub fn read_trees_from_file<P: AsRef<std::path::Path>>(
    path: P,
    cleaning: LabelCleaning,
) -> Result<Vec<Tree>> {
    let file = std::fs::File::open(path)?;
    read_trees(std::io::BufReader::new(file), cleaning)
}

///
/// Parse a whole file as a single tree. Line breaks may appear anywhere
/// whitespace is allowed.
///
pub fn read_tree_from_file<P: AsRef<std::path::Path>>(
    path: P,
    cleaning: LabelCleaning,
) -> Result<Tree> {
    let s = std::fs::read_to_string(path)?;
    if s.trim().is_empty() {
        return Err(Error::NoTrees);
    }
    parse_newick_with(&s, cleaning)
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
    cleaning: LabelCleaning,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, cleaning: LabelCleaning) -> Self {
        Parser {
            input,
            pos: 0,
            cleaning,
        }
    }
    fn error(&self, kind: NewickErrorKind) -> Error {
        Error::newick(self.pos, kind)
    }
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }
    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }
    ///
    /// skip whitespaces and `[...]` comments
    ///
    fn skip_blank(&mut self) -> Result<()> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('[') => {
                    while let Some(c) = self.bump() {
                        if c == ']' {
                            break;
                        }
                    }
                    if !self.input[..self.pos].ends_with(']') {
                        return Err(self.error(NewickErrorKind::UnexpectedEnd));
                    }
                }
                _ => return Ok(()),
            }
        }
    }
    fn parse(&mut self) -> Result<Tree> {
        let mut tree = Tree::new();
        let root = tree.root();
        self.skip_blank()?;
        self.parse_subtree(&mut tree, root)?;
        self.skip_blank()?;
        match self.bump() {
            Some(';') => {}
            Some(')') => return Err(self.error(NewickErrorKind::Unbalanced)),
            Some(c) => return Err(self.error(NewickErrorKind::UnexpectedChar(c))),
            None => return Err(self.error(NewickErrorKind::MissingSemicolon)),
        }
        self.skip_blank()?;
        match self.peek() {
            None => Ok(tree),
            Some(c) => Err(self.error(NewickErrorKind::UnexpectedChar(c))),
        }
    }
    ///
    /// fill `node` (already in the tree) with the subtree at the cursor.
    ///
    fn parse_subtree(&mut self, tree: &mut Tree, node: NodeIndex) -> Result<()> {
        let is_clade = self.peek() == Some('(');
        if is_clade {
            self.bump();
            loop {
                self.skip_blank()?;
                let child = tree.add_child(node, TreeNode::default());
                self.parse_subtree(tree, child)?;
                self.skip_blank()?;
                match self.bump() {
                    Some(',') => continue,
                    Some(')') => break,
                    Some(';') => return Err(self.error(NewickErrorKind::Unbalanced)),
                    Some(c) => return Err(self.error(NewickErrorKind::UnexpectedChar(c))),
                    None => return Err(self.error(NewickErrorKind::UnexpectedEnd)),
                }
            }
            self.skip_blank()?;
        }
        let label = self.parse_label()?;
        let label = match label {
            Some(label) if !is_clade && self.cleaning == LabelCleaning::StripOttSuffix => {
                Some(strip_ott_suffix(&label).to_string())
            }
            label => label,
        };
        if !is_clade && label.is_none() {
            return Err(self.error(NewickErrorKind::EmptyLeafLabel));
        }
        self.skip_blank()?;
        let branch_length = self.parse_branch_length()?;
        let weight = tree.node_mut(node);
        weight.label = label;
        weight.branch_length = branch_length;
        Ok(())
    }
    fn parse_label(&mut self) -> Result<Option<String>> {
        match self.peek() {
            Some('\'') => self.parse_quoted_label().map(Some),
            _ => {
                let start = self.pos;
                while let Some(c) = self.peek() {
                    if is_delimiter(c) {
                        break;
                    }
                    self.bump();
                }
                let label = self.input[start..self.pos].trim();
                if label.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(label.to_string()))
                }
            }
        }
    }
    fn parse_quoted_label(&mut self) -> Result<String> {
        // opening quote
        self.bump();
        let mut label = String::new();
        loop {
            match self.bump() {
                Some('\'') => {
                    if self.peek() == Some('\'') {
                        self.bump();
                        label.push('\'');
                    } else {
                        return Ok(label);
                    }
                }
                Some(c) => label.push(c),
                None => return Err(self.error(NewickErrorKind::UnterminatedQuote)),
            }
        }
    }
    fn parse_branch_length(&mut self) -> Result<Option<f64>> {
        if self.peek() != Some(':') {
            return Ok(None);
        }
        self.bump();
        self.skip_blank()?;
        let start = self.pos;
        while let Some(c) = self.peek() {
            if is_delimiter(c) || c.is_whitespace() {
                break;
            }
            self.bump();
        }
        let s = &self.input[start..self.pos];
        s.parse::<f64>()
            .map(Some)
            .map_err(|_| Error::newick(start, NewickErrorKind::BadBranchLength(s.to_string())))
    }
}

fn is_delimiter(c: char) -> bool {
    matches!(c, '(' | ')' | ',' | ':' | ';' | '[')
}

fn needs_quote(label: &str) -> bool {
    label.is_empty()
        || label
            .chars()
            .any(|c| is_delimiter(c) || c == ']' || c == '\'' || c.is_whitespace())
}

fn format_label(label: &str) -> String {
    if needs_quote(label) {
        format!("'{}'", label.replace('\'', "''"))
    } else {
        label.to_string()
    }
}

impl Tree {
    ///
    /// newick representation of the whole tree, terminated by `;`
    ///
    pub fn to_newick(&self, with_branch_lengths: bool) -> String {
        let mut s = self.subtree_newick(self.root(), with_branch_lengths);
        s.push(';');
        s
    }
    ///
    /// newick representation of the subtree below `node` (without `;`)
    ///
    pub fn subtree_newick(&self, node: NodeIndex, with_branch_lengths: bool) -> String {
        let mut s = String::new();
        self.write_subtree(&mut s, node, with_branch_lengths);
        s
    }
    fn write_subtree(&self, s: &mut String, node: NodeIndex, with_branch_lengths: bool) {
        let children = self.children(node);
        if !children.is_empty() {
            s.push('(');
            for (i, &child) in children.iter().enumerate() {
                if i > 0 {
                    s.push(',');
                }
                self.write_subtree(s, child, with_branch_lengths);
            }
            s.push(')');
        }
        if let Some(label) = self.label(node) {
            s.push_str(&format_label(label));
        }
        if with_branch_lengths {
            if let Some(length) = self.branch_length(node) {
                s.push_str(&format!(":{}", length));
            }
        }
    }
}
