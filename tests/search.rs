use hierarchy_paths::{
    ch::{augmented_graph::AugmentedGraph, preprocessor::DEFAULT_CHECK_INTERVAL},
    graphs::{graph_factory::GraphFactory, reversible_hash_graph::ReversibleHashGraph, Graph},
    search::{bidirectional::BidirectionalDijkstra, dijkstra::Dijkstra, PathFinding},
};
use itertools::Itertools;
use rand::{rngs::StdRng, SeedableRng};

fn get_small_graph() -> ReversibleHashGraph {
    // https://jlazarsfeld.github.io/ch.150.project/img/contraction/contract-full-1.png
    ReversibleHashGraph::from_undirected_edges(&[
        (0, 1, 3),
        (0, 2, 5),
        (0, 10, 3),
        (1, 2, 3),
        (1, 3, 5),
        (2, 3, 2),
        (2, 9, 2),
        (3, 4, 7),
        (3, 9, 4),
        (4, 5, 6),
        (4, 9, 3),
        (5, 6, 4),
        (5, 7, 2),
        (6, 7, 3),
        (6, 8, 5),
        (7, 8, 3),
        (7, 9, 2),
        (8, 9, 4),
        (8, 10, 6),
        (9, 10, 3),
    ])
}

fn get_seven_vertex_graph() -> ReversibleHashGraph {
    ReversibleHashGraph::from_undirected_edges(&[
        (0, 1, 3),
        (1, 2, 4),
        (2, 3, 4),
        (3, 4, 2),
        (4, 5, 3),
        (5, 0, 1),
        (4, 6, 1),
        (6, 2, 1),
        (5, 6, 2),
        (1, 6, 1),
    ])
}

fn assert_all_modes_agree(graph: &ReversibleHashGraph, augmented_graph: &AugmentedGraph) {
    let dijkstra = Dijkstra::new(graph);
    let bidirectional = BidirectionalDijkstra::new(graph);

    for (source, target) in graph.vertices().sorted().tuple_combinations() {
        let expected = dijkstra.shortest_path_distance(source, target).unwrap();
        assert_eq!(
            bidirectional.shortest_path_distance(source, target).unwrap(),
            expected,
            "bidirectional {} -> {}",
            source,
            target
        );
        assert_eq!(
            augmented_graph.shortest_path_distance(source, target).unwrap(),
            expected,
            "ch {} -> {}",
            source,
            target
        );
    }
}

#[test]
fn seven_vertex_graph() {
    let graph = get_seven_vertex_graph();
    let augmented_graph = AugmentedGraph::new(&graph, DEFAULT_CHECK_INTERVAL).unwrap();

    assert_eq!(Dijkstra::new(&graph).shortest_path_distance(0, 3), Ok(Some(6)));
    assert_eq!(
        BidirectionalDijkstra::new(&graph).shortest_path_distance(0, 3),
        Ok(Some(6))
    );
    assert_eq!(augmented_graph.shortest_path_distance(0, 3), Ok(Some(6)));
    assert_all_modes_agree(&graph, &augmented_graph);
}

#[test]
fn four_vertex_graph() {
    let graph =
        ReversibleHashGraph::from_undirected_edges(&[(1, 2, 4), (2, 3, 1), (1, 4, 8), (3, 4, 2)]);
    let augmented_graph = AugmentedGraph::new(&graph, DEFAULT_CHECK_INTERVAL).unwrap();

    assert_eq!(augmented_graph.shortest_path_distance(1, 4), Ok(Some(7)));
    assert_all_modes_agree(&graph, &augmented_graph);
}

#[test]
fn small_graph() {
    let graph = get_small_graph();
    let augmented_graph = AugmentedGraph::new(&graph, DEFAULT_CHECK_INTERVAL).unwrap();

    assert_all_modes_agree(&graph, &augmented_graph);
}

#[test]
fn self_distance_is_zero() {
    let graph = get_small_graph();
    let augmented_graph = AugmentedGraph::new(&graph, DEFAULT_CHECK_INTERVAL).unwrap();

    for vertex in graph.vertices() {
        let result = augmented_graph.query(vertex, vertex).unwrap();
        assert_eq!(result.distance, Some(0));
        assert_eq!(result.relaxed_edges, 0);
    }
}

#[test]
fn distances_are_symmetric() {
    let mut rng = StdRng::seed_from_u64(11);
    let graph = GraphFactory::random_connected(&mut rng, 60, 100, 40);
    let augmented_graph = AugmentedGraph::new(&graph, DEFAULT_CHECK_INTERVAL).unwrap();

    for (source, target) in (0..60).tuple_combinations() {
        assert_eq!(
            augmented_graph.shortest_path_distance(source, target),
            augmented_graph.shortest_path_distance(target, source)
        );
    }
}

#[test]
fn unreachable_vertices() {
    let mut graph = get_seven_vertex_graph();
    graph.add_undirected_edge(20, 21, 5);
    let augmented_graph = AugmentedGraph::new(&graph, DEFAULT_CHECK_INTERVAL).unwrap();

    let result = augmented_graph.query(0, 21).unwrap();
    assert_eq!(result.distance, None);
    assert_eq!(result.distance_or_unreachable(), -1);
    assert_eq!(augmented_graph.shortest_path_distance(20, 21), Ok(Some(5)));
    assert_all_modes_agree(&graph, &augmented_graph);
}

#[test]
fn random_graphs_match_dijkstra() {
    for seed in 0..5 {
        let mut rng = StdRng::seed_from_u64(seed);
        let graph = GraphFactory::random_connected(&mut rng, 80, 120, 100);
        let augmented_graph = AugmentedGraph::new(&graph, DEFAULT_CHECK_INTERVAL).unwrap();

        assert_all_modes_agree(&graph, &augmented_graph);
    }
}

#[test]
fn frequent_refreshes_keep_hierarchy_correct() {
    let mut rng = StdRng::seed_from_u64(42);
    let graph = GraphFactory::random_connected(&mut rng, 70, 150, 20);
    let augmented_graph = AugmentedGraph::new(&graph, 0).unwrap();

    assert_all_modes_agree(&graph, &augmented_graph);
}

#[test]
fn preprocessing_keeps_input() {
    let graph = get_small_graph();
    let edges = graph.all_edges();
    let augmented_graph = AugmentedGraph::new(&graph, DEFAULT_CHECK_INTERVAL).unwrap();

    assert_eq!(graph.all_edges(), edges);
    assert_eq!(augmented_graph.ranks().len(), graph.number_of_vertices());
    assert!(augmented_graph.graph().number_of_edges() >= graph.number_of_edges());
}
