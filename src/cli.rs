//!
//! Implementation of the subcommands of `treebipart`
//!
use crate::bipartition::bipartitions_from_tree;
use crate::diff::{diff_files, TreeDiff};
use crate::io::newick::{read_trees_from_file, LabelCleaning};
use crate::io::{cytoscape, json};
use crate::nested::{nest, NestConfig, NestedResult};
use crate::taxa::Taxa;
use crate::utils::timer;
use anyhow::{Context, Result};
use log::{error, info, warn};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

///
/// Write a human readable report of the nested analysis
///
pub fn write_nest_report<W: Write>(mut w: W, r: &NestedResult) -> std::io::Result<()> {
    writeln!(w, "# bipartitions")?;
    for (i, b) in r.bipartitions.iter().enumerate() {
        let tag = if i < r.n_original { "tree" } else { "sum" };
        writeln!(w, "{}\t{}\t{}", i, tag, b.display(&r.taxa))?;
    }
    writeln!(w, "# child-of")?;
    for e in r.child_of.edge_indices() {
        if let Some((a, b)) = r.child_of.edge_endpoints(e) {
            writeln!(w, "{} -> {}", r.child_of[a], r.child_of[b])?;
        }
    }
    writeln!(w, "# paths")?;
    for path in r.paths.iter() {
        writeln!(w, "{:?}", path)?;
    }
    writeln!(w, "# nodes")?;
    for (i, node) in r.nodes.iter().enumerate() {
        writeln!(w, "{}\t{}", i, node.display(&r.taxa))?;
    }
    writeln!(w, "# hierarchy")?;
    for (parent, child) in r.hierarchy_edges() {
        writeln!(w, "child: {} parent: {}", child, parent)?;
    }
    if !r.supports.is_empty() {
        writeln!(w, "# trees")?;
    }
    for s in r.supports.iter() {
        for m in s.matched.iter() {
            writeln!(w, "tree#{}\t{}\t{:?}", s.tree, m.newick, m.nodes)?;
        }
        for newick in s.unmatched.iter() {
            writeln!(w, "tree#{}\tNO MATCH for tree node: {}", s.tree, newick)?;
        }
    }
    Ok(())
}

///
/// `nest` subcommand. Returns whether every input clade got a node.
///
pub fn run_nest(
    trees_file: &Path,
    config: NestConfig,
    json_output: Option<&PathBuf>,
    cytoscape_output: Option<&PathBuf>,
) -> Result<bool> {
    let trees = read_trees_from_file(trees_file, LabelCleaning::Keep)
        .with_context(|| format!("cannot read trees from {}", trees_file.display()))?;
    info!("read {} trees", trees.len());

    let (result, t) = timer(|| nest(&trees, &config));
    let result = result?;
    info!("nest t={}ms", t);

    let stdout = std::io::stdout();
    write_nest_report(stdout.lock(), &result)?;

    if let Some(path) = json_output {
        json::to_json_file(path, &result.summary())
            .with_context(|| format!("cannot write {}", path.display()))?;
    }
    if let Some(path) = cytoscape_output {
        json::to_json_file(path, &cytoscape::to_elements(&result))
            .with_context(|| format!("cannot write {}", path.display()))?;
    }

    let ok = result.all_trees_supported();
    if !ok {
        warn!("some tree nodes have no matching node");
    }
    Ok(ok)
}

#[derive(Debug, Clone, Serialize)]
struct BipartitionRow {
    tree: usize,
    ingroup: Vec<String>,
    outgroup: Vec<String>,
}

///
/// `biparts` subcommand: every bipartition of every tree
///
pub fn run_biparts(trees_file: &Path, include_root: bool, json_output: Option<&PathBuf>) -> Result<()> {
    let trees = read_trees_from_file(trees_file, LabelCleaning::Keep)
        .with_context(|| format!("cannot read trees from {}", trees_file.display()))?;
    let mut taxa = Taxa::new();
    let mut rows = Vec::new();
    for (i, tree) in trees.iter().enumerate() {
        for b in bipartitions_from_tree(tree, &mut taxa, include_root) {
            println!("{}\t{}", i, b.display(&taxa));
            rows.push(BipartitionRow {
                tree: i,
                ingroup: taxa.names(b.ingroup()).into_iter().map(String::from).collect(),
                outgroup: taxa.names(b.outgroup()).into_iter().map(String::from).collect(),
            });
        }
    }
    if let Some(path) = json_output {
        let file = std::fs::File::create(path)
            .with_context(|| format!("cannot create {}", path.display()))?;
        let mut w = std::io::BufWriter::new(file);
        json::write_rows(&mut w, &rows)?;
        w.flush()?;
    }
    Ok(())
}

pub fn write_diff_report<W: Write>(mut w: W, d: &TreeDiff) -> std::io::Result<()> {
    if d.is_identical() {
        return Ok(());
    }
    writeln!(w, "ERROR: Trees differ.")?;
    for m in d.missing.iter() {
        writeln!(w, "Missing clade: {}", m.join(", "))?;
    }
    for m in d.extra.iter() {
        writeln!(w, "Extra clade: {}", m.join(", "))?;
    }
    Ok(())
}

///
/// `diff` subcommand. Returns whether the trees have the same clades.
///
pub fn run_diff(reference: &Path, result: &Path) -> Result<bool> {
    let d = diff_files(reference, result).with_context(|| {
        format!(
            "cannot compare {} and {}",
            reference.display(),
            result.display()
        )
    })?;
    let stdout = std::io::stdout();
    write_diff_report(stdout.lock(), &d)?;
    if d.is_identical() {
        info!("SUCCESS! recovered expected tree.");
    } else {
        error!("FAILURE!");
    }
    Ok(d.is_identical())
}
