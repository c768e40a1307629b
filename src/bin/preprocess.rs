use std::{path::PathBuf, time::Instant};

use anyhow::Context;
use clap::Parser;
use hierarchy_paths::{
    ch::{
        augmented_graph::AugmentedGraph,
        preprocessor::{Preprocessor, DEFAULT_CHECK_INTERVAL},
    },
    graphs::graph_file::read_graph_file,
    utility::init_tracing,
    write_augmented_graph, FileType,
};
use tracing::info;

/// Builds the contraction hierarchy of a graph and writes the augmented graph,
/// i.e. the input plus all shortcuts and the rank of every vertex.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input graph in text format
    #[arg(short, long)]
    graph: PathBuf,
    /// Output file for the augmented graph
    #[arg(short, long)]
    output: PathBuf,
    #[arg(short, long, value_enum, default_value_t = FileType::Text)]
    file_type: FileType,
    /// Consecutive lazy updates before all priorities are recomputed
    #[arg(short, long, default_value_t = DEFAULT_CHECK_INTERVAL)]
    check_interval: u32,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing();

    let graph_file = read_graph_file(&args.graph)
        .with_context(|| format!("could not read graph {}", args.graph.display()))?;

    let start = Instant::now();
    let preprocessor = Preprocessor::new(args.check_interval).with_progress(true);
    let augmented_graph = AugmentedGraph::with_preprocessor(&graph_file.graph, &preprocessor)
        .with_context(|| format!("could not preprocess {}", args.graph.display()))?;
    info!(
        shortcuts = augmented_graph.number_of_shortcuts(),
        elapsed = ?start.elapsed(),
        "preprocessing done"
    );

    write_augmented_graph(&args.output, args.file_type, &augmented_graph)
        .with_context(|| format!("could not write {}", args.output.display()))?;

    Ok(())
}
