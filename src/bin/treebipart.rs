use clap::{Parser, Subcommand};
use treebipart::{cli, nested::NestConfig};

#[derive(Parser, Debug)]
#[clap(author, about, version)]
struct Opts {
    /// Increase log verbosity (-v: debug, -vv: trace). RUST_LOG overrides.
    #[clap(short, long, parse(from_occurrences), global = true)]
    verbose: u64,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate supertree nodes from nested compatible bipartitions
    Nest {
        /// Input trees, one newick per line
        trees: std::path::PathBuf,
        /// Do not use the root bipartition (all | empty) of each tree
        #[clap(long)]
        no_root: bool,
        /// Skip checking the input trees against the generated nodes
        #[clap(long)]
        skip_check: bool,
        /// Output JSON summary filename
        #[clap(long)]
        json: Option<std::path::PathBuf>,
        /// Output cytoscape.js elements of the node hierarchy
        #[clap(long)]
        cytoscape: Option<std::path::PathBuf>,
    },
    /// List bipartitions of every tree
    Biparts {
        /// Input trees, one newick per line
        trees: std::path::PathBuf,
        /// Do not list the root bipartition
        #[clap(long)]
        no_root: bool,
        /// Output JSON rows filename
        #[clap(long)]
        json: Option<std::path::PathBuf>,
    },
    /// Compare clades of a result tree against a reference tree
    Diff {
        reference: std::path::PathBuf,
        result: std::path::PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let opts: Opts = Opts::parse();
    let level = match opts.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    println!("# started_at={}", chrono::Local::now());
    println!("# opts={:?}", opts);

    let ok = match &opts.command {
        Commands::Nest {
            trees,
            no_root,
            skip_check,
            json,
            cytoscape,
        } => {
            let config = NestConfig::default()
                .include_root(!no_root)
                .check_trees(!skip_check);
            cli::run_nest(trees, config, json.as_ref(), cytoscape.as_ref())?
        }
        Commands::Biparts {
            trees,
            no_root,
            json,
        } => {
            cli::run_biparts(trees, !no_root, json.as_ref())?;
            true
        }
        Commands::Diff { reference, result } => cli::run_diff(reference, result)?,
    };
    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
