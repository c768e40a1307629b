use std::{path::PathBuf, time::Duration};

use anyhow::{bail, Context};
use clap::Parser;
use hierarchy_paths::{
    ch::{
        augmented_graph::AugmentedGraph,
        preprocessor::{Preprocessor, DEFAULT_CHECK_INTERVAL},
    },
    graphs::{graph_factory::GraphFactory, graph_file::read_graph_file, Graph},
    search::{
        bidirectional::BidirectionalDijkstra, dijkstra::Dijkstra, PathFinding, QueryResult,
    },
    utility::{get_progressbar, init_tracing},
};
use indicatif::ParallelProgressIterator;
use itertools::Itertools;
use rand::{rngs::StdRng, SeedableRng};
use rayon::prelude::*;
use tracing::{error, info};

/// Preprocesses a graph and checks the contraction hierarchy and the
/// bidirectional search against plain Dijkstra on random vertex pairs.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input graph in text format
    #[arg(short, long)]
    graph: PathBuf,
    /// Number of random source target pairs
    #[arg(short, long, default_value_t = 1_000)]
    pairs: usize,
    #[arg(short, long, default_value_t = 0)]
    seed: u64,
    #[arg(short, long, default_value_t = DEFAULT_CHECK_INTERVAL)]
    check_interval: u32,
}

struct ValidatedPair {
    source: u64,
    target: u64,
    dijkstra: QueryResult,
    bidirectional: QueryResult,
    ch: QueryResult,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing();

    let graph = read_graph_file(&args.graph)
        .with_context(|| format!("could not read graph {}", args.graph.display()))?
        .graph;

    let preprocessor = Preprocessor::new(args.check_interval).with_progress(true);
    info!(
        check_interval = preprocessor.check_interval(),
        "preprocessing {}",
        args.graph.display()
    );
    let augmented_graph = AugmentedGraph::with_preprocessor(&graph, &preprocessor)
        .with_context(|| format!("could not preprocess {}", args.graph.display()))?;

    let vertices = graph.vertices().sorted().collect_vec();
    let mut rng = StdRng::seed_from_u64(args.seed);
    let pairs = GraphFactory::random_pairs(&mut rng, &vertices, args.pairs);

    let dijkstra = Dijkstra::new(&graph);
    let bidirectional = BidirectionalDijkstra::new(&graph);

    let bar = get_progressbar("Validating", pairs.len() as u64, true);
    let results = pairs
        .par_iter()
        .progress_with(bar)
        .map(|&(source, target)| -> anyhow::Result<ValidatedPair> {
            Ok(ValidatedPair {
                source,
                target,
                dijkstra: dijkstra.query(source, target)?,
                bidirectional: bidirectional.query(source, target)?,
                ch: augmented_graph.query(source, target)?,
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut mismatches = 0;
    for pair in &results {
        for (name, result) in [("bidirectional", &pair.bidirectional), ("ch", &pair.ch)] {
            if result.distance != pair.dijkstra.distance {
                error!(
                    source = pair.source,
                    target = pair.target,
                    algorithm = name,
                    expected = pair.dijkstra.distance_or_unreachable(),
                    actual = result.distance_or_unreachable(),
                    "distance mismatch"
                );
                mismatches += 1;
            }
        }
    }

    if mismatches > 0 {
        bail!("{} of {} queries returned a wrong distance", mismatches, 2 * results.len());
    }

    info!(
        pairs = results.len(),
        dijkstra = ?mean_elapsed(&results, |pair| &pair.dijkstra),
        bidirectional = ?mean_elapsed(&results, |pair| &pair.bidirectional),
        ch = ?mean_elapsed(&results, |pair| &pair.ch),
        "all distances agree"
    );

    Ok(())
}

fn mean_elapsed(results: &[ValidatedPair], select: fn(&ValidatedPair) -> &QueryResult) -> Duration {
    let total: Duration = results.iter().map(|pair| select(pair).elapsed).sum();
    total / results.len().max(1) as u32
}
