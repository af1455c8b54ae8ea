use std::error::Error;
use std::fs;

use clap::{Parser, Subcommand};
use log::{info, warn};
use yaml_rust2::{Yaml, YamlEmitter, YamlLoader};

use taxa::analyze::analyze_with_limit;
use taxa::canonical::{canonicalize, canonicalize_with_limit};
use taxa::merge::merge_trees_with_limit;
use taxa::tree::DEFAULT_MAX_DEPTH;

/// Command-line arguments
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Maximum nesting depth accepted before failing
    #[arg(long = "max-depth", global = true, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Enable debug logging
    #[arg(long = "debug", global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Compute node count, depth and branching statistics for one tree
    Analyze {
        /// Taxonomy file
        file: String,
    },
    /// Union-merge two taxonomy trees into one
    Merge {
        /// First taxonomy file; its values win conflicts
        first: String,
        /// Second taxonomy file
        second: String,
        /// Merged tree output path
        #[arg(short = 'o', long = "out", default_value = "./merged.yaml")]
        out: String,
    },
    /// Rewrite a tree in canonical key order
    Fmt {
        /// Taxonomy file
        file: String,
        /// Output path; prints to stdout when omitted
        #[arg(short = 'o', long = "out")]
        out: Option<String>,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    // Parse command-line arguments
    let args = Args::parse();

    // Initialize the logger
    if args.debug {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    match args.command {
        Command::Analyze { file } => {
            info!("Analyzing taxonomy file: {}", file);
            let tree = load_tree(&file)?;
            let stats = analyze_with_limit(&tree, args.max_depth)?;
            info!(
                "{}: {} nodes, depth {}, branching {:.2}",
                stats.root_name, stats.total_nodes, stats.max_depth, stats.avg_branching_factor
            );
            println!("{}", emit(&stats.to_yaml())?);
        }
        Command::Merge { first, second, out } => {
            info!("Merging taxonomy files {} and {}.", first, second);
            let first_tree = load_tree(&first)?;
            let second_tree = load_tree(&second)?;
            let merged = merge_trees_with_limit(&first_tree, &second_tree, args.max_depth)?;
            let out_str = emit(&canonicalize(&merged))?;
            fs::write(&out, out_str)?;
            info!("Merged taxonomy written to {}", out);
        }
        Command::Fmt { file, out } => {
            info!("Canonicalizing taxonomy file: {}", file);
            let tree = load_tree(&file)?;
            let out_str = emit(&canonicalize_with_limit(&tree, args.max_depth)?)?;
            match out {
                Some(path) => {
                    fs::write(&path, out_str)?;
                    info!("Canonical taxonomy written to {}", path);
                }
                None => print!("{}", out_str),
            }
        }
    }

    Ok(())
}

/// Reads and parses the first YAML document in a file.
fn load_tree(path: &str) -> Result<Yaml, Box<dyn Error>> {
    let content = fs::read_to_string(path)?;
    let docs = YamlLoader::load_from_str(&content)?;
    if docs.len() > 1 {
        warn!("Multiple YAML documents in {}; using the first.", path);
    }
    docs.into_iter()
        .next()
        .ok_or_else(|| format!("No YAML documents in {}", path).into())
}

fn emit(doc: &Yaml) -> Result<String, Box<dyn Error>> {
    let mut out_str = String::new();
    {
        let mut emitter = YamlEmitter::new(&mut out_str);
        emitter.dump(doc)?;
    }
    out_str = out_str.trim_start_matches("---\n").to_string();
    out_str.push('\n');
    Ok(out_str)
}
