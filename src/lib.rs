use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use ch::augmented_graph::AugmentedGraph;
use clap::ValueEnum;
use graphs::graph_file::{read_graph_file, write_graph_file, GraphFileError};
use tracing::info;

pub mod ch;
pub mod graphs;
pub mod search;
pub mod utility;

/// On-disk representation of an augmented graph.
#[derive(Debug, ValueEnum, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// Human readable `n m` / vertex / edge lines.
    Text,
    /// bincode encoded `AugmentedGraph`.
    Bincode,
}

/// Reads an augmented graph. A text file without ranks yields an
/// unpreprocessed graph.
pub fn read_augmented_graph(
    path: &Path,
    file_type: FileType,
) -> Result<AugmentedGraph, GraphFileError> {
    let augmented_graph: AugmentedGraph = match file_type {
        FileType::Text => {
            let graph_file = read_graph_file(path)?;
            AugmentedGraph::from_parts(graph_file.graph, graph_file.ranks)
        }
        FileType::Bincode => {
            let reader = BufReader::new(File::open(path)?);
            bincode::deserialize_from(reader)?
        }
    };

    info!(
        path = %path.display(),
        ?file_type,
        preprocessed = augmented_graph.is_preprocessed(),
        "loaded augmented graph"
    );
    Ok(augmented_graph)
}

pub fn write_augmented_graph(
    path: &Path,
    file_type: FileType,
    augmented_graph: &AugmentedGraph,
) -> Result<(), GraphFileError> {
    match file_type {
        FileType::Text => {
            write_graph_file(path, augmented_graph.graph(), augmented_graph.ranks())?
        }
        FileType::Bincode => {
            let writer = BufWriter::new(File::create(path)?);
            bincode::serialize_into(writer, augmented_graph)?;
        }
    }

    info!(path = %path.display(), ?file_type, "wrote augmented graph");
    Ok(())
}
