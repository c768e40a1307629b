use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use hierarchy_paths::{
    read_augmented_graph,
    search::{bidirectional::BidirectionalDijkstra, dijkstra::Dijkstra, PathFinding},
    utility::init_tracing,
    FileType,
};
use serde::Serialize;

#[derive(Debug, ValueEnum, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
enum Algorithm {
    Dijkstra,
    Bidirectional,
    Ch,
}

/// Answers a single shortest path query and prints the distance together
/// with the query time and the number of relaxed edges.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Graph file, augmented with ranks for `--algorithm ch`
    #[arg(short, long)]
    graph: PathBuf,
    #[arg(short, long, value_enum, default_value_t = FileType::Text)]
    file_type: FileType,
    #[arg(short, long, value_enum, default_value_t = Algorithm::Ch)]
    algorithm: Algorithm,
    /// Print a JSON report instead of plain text
    #[arg(long)]
    json: bool,
    source: u64,
    target: u64,
}

#[derive(Serialize)]
struct Report {
    algorithm: Algorithm,
    source: u64,
    target: u64,
    time_ns: u128,
    relaxed_edges: u64,
    distance: i64,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing();

    let augmented_graph = read_augmented_graph(&args.graph, args.file_type)
        .with_context(|| format!("could not read graph {}", args.graph.display()))?;

    let result = match args.algorithm {
        Algorithm::Dijkstra => {
            Dijkstra::new(augmented_graph.graph()).query(args.source, args.target)?
        }
        Algorithm::Bidirectional => {
            BidirectionalDijkstra::new(augmented_graph.graph()).query(args.source, args.target)?
        }
        Algorithm::Ch => {
            if !augmented_graph.is_preprocessed() {
                bail!(
                    "{} carries no ranks, run `preprocess` first",
                    args.graph.display()
                );
            }
            augmented_graph.query(args.source, args.target)?
        }
    };

    if args.json {
        let report = Report {
            algorithm: args.algorithm,
            source: args.source,
            target: args.target,
            time_ns: result.elapsed.as_nanos(),
            relaxed_edges: result.relaxed_edges,
            distance: result.distance_or_unreachable(),
        };
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!(
            "Time: {}, Relaxed edges: {}, Result: {}",
            result.elapsed.as_nanos(),
            result.relaxed_edges,
            result.distance_or_unreachable()
        );
    }

    Ok(())
}
