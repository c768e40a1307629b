use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
    str::FromStr,
};

use itertools::Itertools;
use thiserror::Error;
use tracing::info;

use super::{
    edge::DirectedWeightedEdge, reversible_hash_graph::ReversibleHashGraph, Coordinate, Distance,
    Graph, Rank, VertexId, Weight,
};
use crate::ch::Ranks;

#[derive(Debug, Error)]
pub enum GraphFileError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("bincode error: {0}")]
    Bincode(#[from] bincode::Error),
    #[error("line {line}: expected header `n m`")]
    InvalidHeader { line: usize },
    #[error("file is empty, expected header `n m`")]
    MissingHeader,
    #[error("line {line}: missing field `{field}`")]
    MissingField { line: usize, field: &'static str },
    #[error("line {line}: invalid value `{value}` for field `{field}`")]
    InvalidField {
        line: usize,
        field: &'static str,
        value: String,
    },
    #[error("line {line}: unexpected data `{data}`")]
    TrailingData { line: usize, data: String },
    #[error("file ended after {read} of {declared} {kind} lines")]
    UnexpectedEndOfFile {
        kind: &'static str,
        read: usize,
        declared: usize,
    },
    #[error("line {line}: vertex {vertex} is declared twice")]
    DuplicateVertex { line: usize, vertex: VertexId },
    #[error("line {line}: vertex {vertex} is not declared")]
    UnknownVertex { line: usize, vertex: VertexId },
    #[error("only {ranked} of {vertices} vertices carry a rank")]
    PartialRanks { ranked: usize, vertices: usize },
}

/// Graph and ranks as stored in a text file. `ranks` is empty for files
/// without a rank column.
#[derive(Debug)]
pub struct GraphFile {
    pub graph: ReversibleHashGraph,
    pub ranks: Ranks,
}

/// Yields non blank, non comment lines together with their 1 based number.
struct Records<R> {
    lines: std::io::Lines<R>,
    line_number: usize,
}

impl<R: BufRead> Records<R> {
    fn new(reader: R) -> Self {
        Records {
            lines: reader.lines(),
            line_number: 0,
        }
    }

    fn next_record(&mut self) -> Result<Option<(usize, String)>, GraphFileError> {
        for line in self.lines.by_ref() {
            let line = line?;
            self.line_number += 1;

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            return Ok(Some((self.line_number, line)));
        }
        Ok(None)
    }
}

fn parse_field<T: FromStr>(
    line: usize,
    field: &'static str,
    value: Option<&str>,
) -> Result<T, GraphFileError> {
    let value = value.ok_or(GraphFileError::MissingField { line, field })?;
    value.parse().map_err(|_| GraphFileError::InvalidField {
        line,
        field,
        value: value.to_string(),
    })
}

/// Like `parse_field`, with `-1` standing for "absent".
fn parse_optional_field<T: FromStr>(
    line: usize,
    field: &'static str,
    value: &str,
) -> Result<Option<T>, GraphFileError> {
    if value == "-1" {
        return Ok(None);
    }
    parse_field(line, field, Some(value)).map(Some)
}

fn ensure_consumed<'a>(
    line: usize,
    mut fields: impl Iterator<Item = &'a str>,
) -> Result<(), GraphFileError> {
    match fields.next() {
        Some(data) => Err(GraphFileError::TrailingData {
            line,
            data: data.to_string(),
        }),
        None => Ok(()),
    }
}

/// Reads the text format:
///
/// ```text
/// # comment
/// n m
/// id x y [rank]
/// from to weight [via]
/// ```
///
/// Three column edge lines are undirected original edges, four column lines
/// are directed edges whose last column names the contracted vertex (`-1` for
/// original edges). A rank of `-1` means the vertex has none.
pub fn read_graph<R: BufRead>(reader: R) -> Result<GraphFile, GraphFileError> {
    let mut records = Records::new(reader);

    let (line, header) = records.next_record()?.ok_or(GraphFileError::MissingHeader)?;
    let mut fields = header.split_whitespace();
    let number_of_vertices: usize = parse_field(line, "n", fields.next())
        .map_err(|_| GraphFileError::InvalidHeader { line })?;
    let number_of_edges: usize = parse_field(line, "m", fields.next())
        .map_err(|_| GraphFileError::InvalidHeader { line })?;
    if fields.next().is_some() {
        return Err(GraphFileError::InvalidHeader { line });
    }

    let mut graph = ReversibleHashGraph::new();
    let mut ranks = Ranks::default();

    for read in 0..number_of_vertices {
        let (line, record) = records
            .next_record()?
            .ok_or(GraphFileError::UnexpectedEndOfFile {
                kind: "vertex",
                read,
                declared: number_of_vertices,
            })?;
        let mut fields = record.split_whitespace();

        let vertex: VertexId = parse_field(line, "id", fields.next())?;
        let x: f32 = parse_field(line, "x", fields.next())?;
        let y: f32 = parse_field(line, "y", fields.next())?;
        let rank = match fields.next() {
            Some(value) => parse_optional_field::<Rank>(line, "rank", value)?,
            None => None,
        };
        ensure_consumed(line, fields)?;

        if graph.contains(vertex) {
            return Err(GraphFileError::DuplicateVertex { line, vertex });
        }
        graph.add_vertex(vertex, Coordinate::new(x, y));
        if let Some(rank) = rank {
            ranks.insert(vertex, rank);
        }
    }

    if !ranks.is_empty() && ranks.len() != number_of_vertices {
        return Err(GraphFileError::PartialRanks {
            ranked: ranks.len(),
            vertices: number_of_vertices,
        });
    }

    for read in 0..number_of_edges {
        let (line, record) = records
            .next_record()?
            .ok_or(GraphFileError::UnexpectedEndOfFile {
                kind: "edge",
                read,
                declared: number_of_edges,
            })?;
        let mut fields = record.split_whitespace();

        let from: VertexId = parse_field(line, "from", fields.next())?;
        let to: VertexId = parse_field(line, "to", fields.next())?;
        let weight_field = fields.next();
        let via = fields.next();
        ensure_consumed(line, fields)?;

        for vertex in [from, to] {
            if !graph.contains(vertex) {
                return Err(GraphFileError::UnknownVertex { line, vertex });
            }
        }

        match via {
            None => {
                let weight: Weight = parse_field(line, "weight", weight_field)?;
                graph.add_undirected_edge(from, to, weight);
            }
            Some(via) => {
                let weight: Distance = parse_field(line, "weight", weight_field)?;
                let via = parse_optional_field::<VertexId>(line, "via", via)?;
                if let Some(edge) = DirectedWeightedEdge::with_shortcut_of(from, to, weight, via) {
                    graph.insert_edge(edge);
                }
            }
        }
    }

    if let Some((line, record)) = records.next_record()? {
        return Err(GraphFileError::TrailingData { line, data: record });
    }

    Ok(GraphFile { graph, ranks })
}

/// Writes `graph` in the four column form. Vertices without a rank in
/// `ranks` get `-1`.
pub fn write_graph<W: Write>(
    mut writer: W,
    graph: &ReversibleHashGraph,
    ranks: &Ranks,
) -> Result<(), GraphFileError> {
    let edges = graph.all_edges();
    writeln!(writer, "{} {}", graph.number_of_vertices(), edges.len())?;

    for vertex in graph.vertices().sorted() {
        let coordinate = graph.coordinate(vertex).unwrap_or_default();
        let rank = ranks
            .get(&vertex)
            .map_or_else(|| "-1".to_string(), |rank| rank.to_string());
        writeln!(writer, "{} {} {} {}", vertex, coordinate.x, coordinate.y, rank)?;
    }

    for edge in edges {
        let via = edge
            .shortcut_of()
            .map_or_else(|| "-1".to_string(), |via| via.to_string());
        writeln!(writer, "{} {} {} {}", edge.tail(), edge.head(), edge.weight(), via)?;
    }

    writer.flush()?;
    Ok(())
}

pub fn read_graph_file(path: &Path) -> Result<GraphFile, GraphFileError> {
    let reader = BufReader::new(File::open(path)?);
    let graph_file = read_graph(reader)?;
    info!(
        path = %path.display(),
        vertices = graph_file.graph.number_of_vertices(),
        edges = graph_file.graph.number_of_edges(),
        ranked = !graph_file.ranks.is_empty(),
        "read graph"
    );
    Ok(graph_file)
}

pub fn write_graph_file(
    path: &Path,
    graph: &ReversibleHashGraph,
    ranks: &Ranks,
) -> Result<(), GraphFileError> {
    let writer = BufWriter::new(File::create(path)?);
    write_graph(writer, graph, ranks)
}
