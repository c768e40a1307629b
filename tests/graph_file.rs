use std::io::Write;

use hierarchy_paths::{
    ch::{augmented_graph::AugmentedGraph, preprocessor::DEFAULT_CHECK_INTERVAL, PreprocessError},
    graphs::{
        graph_factory::GraphFactory,
        graph_file::{read_graph_file, GraphFileError},
        Graph,
    },
    read_augmented_graph,
    search::PathFinding,
    write_augmented_graph, FileType,
};
use itertools::Itertools;
use rand::{rngs::StdRng, SeedableRng};

fn preprocessed_random_graph() -> AugmentedGraph {
    let mut rng = StdRng::seed_from_u64(17);
    let graph = GraphFactory::random_connected(&mut rng, 40, 60, 25);
    AugmentedGraph::new(&graph, DEFAULT_CHECK_INTERVAL).unwrap()
}

fn assert_same_answers(expected: &AugmentedGraph, actual: &AugmentedGraph) {
    let vertices = expected.graph().vertices().sorted().collect_vec();
    for (&source, &target) in vertices.iter().tuple_combinations() {
        assert_eq!(
            actual.shortest_path_distance(source, target),
            expected.shortest_path_distance(source, target)
        );
    }
}

#[test]
fn text_round_trip() {
    let augmented_graph = preprocessed_random_graph();
    let file = tempfile::NamedTempFile::new().unwrap();

    write_augmented_graph(file.path(), FileType::Text, &augmented_graph).unwrap();
    let reread = read_augmented_graph(file.path(), FileType::Text).unwrap();

    assert_eq!(reread.ranks(), augmented_graph.ranks());
    assert_eq!(reread.graph().all_edges(), augmented_graph.graph().all_edges());
    assert_eq!(reread.number_of_shortcuts(), augmented_graph.number_of_shortcuts());
    assert_same_answers(&augmented_graph, &reread);
}

#[test]
fn bincode_round_trip() {
    let augmented_graph = preprocessed_random_graph();
    let file = tempfile::NamedTempFile::new().unwrap();

    write_augmented_graph(file.path(), FileType::Bincode, &augmented_graph).unwrap();
    let reread = read_augmented_graph(file.path(), FileType::Bincode).unwrap();

    assert_eq!(reread.ranks(), augmented_graph.ranks());
    assert_same_answers(&augmented_graph, &reread);
}

#[test]
fn unranked_text_file_is_unpreprocessed() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "3 2\n1 0 0\n2 0 0\n3 0 0\n1 2 4\n2 3 5\n").unwrap();

    let augmented_graph = read_augmented_graph(file.path(), FileType::Text).unwrap();
    assert!(!augmented_graph.is_preprocessed());
    assert_eq!(augmented_graph.shortest_path_distance(1, 3), Ok(Some(9)));
}

#[test]
fn missing_file_is_io_error() {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("missing.graph");

    assert!(matches!(
        read_augmented_graph(&path, FileType::Text),
        Err(GraphFileError::Io(_))
    ));
    assert!(matches!(
        read_augmented_graph(&path, FileType::Bincode),
        Err(GraphFileError::Io(_))
    ));
}

#[test]
fn directed_edges_from_file_are_not_preprocessed() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "3 2\n0 0 0\n1 0 0\n2 0 0\n1 0 1 -1\n0 2 1 -1\n").unwrap();

    let graph = read_graph_file(file.path()).unwrap().graph;
    assert!(matches!(
        AugmentedGraph::new(&graph, DEFAULT_CHECK_INTERVAL),
        Err(PreprocessError::AsymmetricEdge { .. })
    ));
}

#[test]
fn written_graph_can_be_preprocessed_again() {
    let augmented_graph = preprocessed_random_graph();
    let file = tempfile::NamedTempFile::new().unwrap();
    write_augmented_graph(file.path(), FileType::Text, &augmented_graph).unwrap();

    let graph = read_graph_file(file.path()).unwrap().graph;
    let again = AugmentedGraph::new(&graph, DEFAULT_CHECK_INTERVAL).unwrap();
    assert_same_answers(&augmented_graph, &again);
}
