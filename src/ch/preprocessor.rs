use std::{collections::BinaryHeap, time::Instant};

use indicatif::{ParallelProgressIterator, ProgressBar};
use itertools::Itertools;
use rayon::prelude::*;
use tracing::{debug, info};

use super::{
    ch_priority_element::ChPriorityElement,
    contraction::{
        apply_contraction, edge_difference, edge_difference_of, neighbors_with_min_weight,
        simulate_contraction,
    },
    PreprocessError, PreprocessResult, PreprocessStats, Ranks,
};
use crate::{
    graphs::{Distance, Graph, Rank, VertexId},
    utility::get_progressbar,
};

/// Consecutive lazy updates tolerated before every key is recomputed.
pub const DEFAULT_CHECK_INTERVAL: u32 = 10_000;

/// Computes a contraction order by edge difference with lazy updates and
/// contracts the graph along it.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    check_interval: u32,
    show_progress: bool,
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new(DEFAULT_CHECK_INTERVAL)
    }
}

impl Preprocessor {
    pub fn new(check_interval: u32) -> Self {
        Preprocessor {
            check_interval,
            show_progress: false,
        }
    }

    /// Draws progress bars on stderr while preprocessing.
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn check_interval(&self) -> u32 {
        self.check_interval
    }

    /// Contracts every vertex of `graph`, consuming it.
    ///
    /// Vertices are taken in order of increasing edge difference, ties broken
    /// by the smaller id. A popped key is recomputed before contracting. If it
    /// changed the vertex is pushed back instead, and after more than
    /// `check_interval` such lazy updates in a row all keys are refreshed.
    ///
    /// Fails if the lightest edge between two vertices differs between the
    /// two directions, as contraction treats every edge as undirected.
    pub fn preprocess<G: Graph>(&self, mut graph: G) -> Result<PreprocessResult, PreprocessError> {
        if let Some((tail, head, weight)) = find_asymmetric_edge(&graph) {
            return Err(PreprocessError::AsymmetricEdge { tail, head, weight });
        }

        let start = Instant::now();
        let number_of_vertices = graph.number_of_vertices();
        info!(
            vertices = number_of_vertices,
            edges = graph.number_of_edges(),
            check_interval = self.check_interval,
            "starting contraction"
        );

        let mut queue = self.priority_queue(&graph, "Initializing queue");

        let mut shortcuts = Vec::new();
        let mut ranks = Ranks::default();
        let mut lazy_updates = 0;
        let mut stats = PreprocessStats::default();

        let bar = get_progressbar("Contracting", number_of_vertices as u64, self.show_progress);
        while let Some(ChPriorityElement { vertex, priority }) = queue.pop() {
            if !graph.contains(vertex) {
                continue;
            }

            let vertex_shortcuts = simulate_contraction(&graph, vertex);
            let current_priority = edge_difference_of(&graph, vertex, &vertex_shortcuts);
            if current_priority != priority {
                queue.push(ChPriorityElement::new(current_priority, vertex));
                lazy_updates += 1;
                stats.lazy_updates += 1;

                if lazy_updates > self.check_interval {
                    debug!(contracted = ranks.len(), "refreshing all priorities");
                    queue = self.priority_queue(&graph, "Refreshing queue");
                    lazy_updates = 0;
                    stats.refreshes += 1;
                }
                continue;
            }

            ranks.insert(vertex, ranks.len() as Rank);
            apply_contraction(&mut graph, vertex, &vertex_shortcuts);
            shortcuts.extend(vertex_shortcuts);
            lazy_updates = 0;
            bar.inc(1);
        }
        bar.finish_and_clear();

        info!(
            shortcuts = shortcuts.len(),
            lazy_updates = stats.lazy_updates,
            refreshes = stats.refreshes,
            elapsed = ?start.elapsed(),
            "contraction finished"
        );

        Ok(PreprocessResult {
            shortcuts,
            ranks,
            stats,
        })
    }

    /// Edge difference of every remaining vertex, computed in parallel.
    fn priority_queue<G: Graph>(&self, graph: &G, job_name: &str) -> BinaryHeap<ChPriorityElement> {
        let vertices = graph.vertices().collect_vec();
        let bar: ProgressBar = get_progressbar(job_name, vertices.len() as u64, self.show_progress);

        let queue = vertices
            .into_par_iter()
            .progress_with(bar.clone())
            .map(|vertex| ChPriorityElement::new(edge_difference(graph, vertex), vertex))
            .collect();
        bar.finish_and_clear();

        queue
    }
}

/// First edge, in vertex order, whose lightest weight has no match in the
/// opposite direction.
fn find_asymmetric_edge<G: Graph>(graph: &G) -> Option<(VertexId, VertexId, Distance)> {
    let vertices = graph.vertices().sorted().collect_vec();

    vertices.par_iter().find_map_first(|&vertex| {
        let outgoing = neighbors_with_min_weight(graph, vertex);
        let incoming = graph
            .in_edges(vertex)
            .map(|edge| (edge.tail(), edge.weight()))
            .sorted()
            .dedup_by(|a, b| a.0 == b.0)
            .collect_vec();
        if outgoing == incoming {
            return None;
        }

        outgoing
            .iter()
            .find(|edge| !incoming.contains(edge))
            .map(|&(head, weight)| (vertex, head, weight))
            .or_else(|| {
                incoming
                    .iter()
                    .find(|edge| !outgoing.contains(edge))
                    .map(|&(tail, weight)| (tail, vertex, weight))
            })
    })
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use rand::{rngs::StdRng, SeedableRng};

    use super::{Preprocessor, DEFAULT_CHECK_INTERVAL};
    use crate::{
        ch::PreprocessError,
        graphs::{
            graph_factory::GraphFactory, reversible_hash_graph::ReversibleHashGraph, Graph, Rank,
        },
    };

    #[test]
    fn ranks_are_a_permutation() {
        let mut rng = StdRng::seed_from_u64(3);
        let graph = GraphFactory::random_connected(&mut rng, 60, 90, 50);

        let result = Preprocessor::default().preprocess(graph.clone()).unwrap();
        let ranks = result.ranks.values().copied().sorted().collect_vec();
        assert_eq!(ranks, (0..60).collect::<Vec<Rank>>());
        assert!(graph.vertices().all(|vertex| result.ranks.contains_key(&vertex)));
    }

    #[test]
    fn shortcut_vertex_is_ranked_below_its_endpoints() {
        let mut rng = StdRng::seed_from_u64(5);
        let graph = GraphFactory::random_connected(&mut rng, 80, 160, 30);

        let result = Preprocessor::new(1).preprocess(graph).unwrap();
        for shortcut in &result.shortcuts {
            let via = result.ranks[&shortcut.via];
            assert!(via < result.ranks[&shortcut.from]);
            assert!(via < result.ranks[&shortcut.to]);
        }
    }

    #[test]
    fn leaves_go_first() {
        // path 1 - 2 - 3: both leaves have edge difference -1, the center 0
        let graph = ReversibleHashGraph::from_undirected_edges(&[(1, 2, 1), (2, 3, 1)]);

        let result = Preprocessor::default().preprocess(graph).unwrap();
        assert_eq!(result.ranks[&1], 0);
        assert!(result.shortcuts.is_empty());
    }

    #[test]
    fn star_center_is_contracted_last() {
        let graph = ReversibleHashGraph::from_undirected_edges(&[
            (0, 1, 1),
            (0, 2, 1),
            (0, 3, 1),
            (0, 4, 1),
        ]);

        let result = Preprocessor::default().preprocess(graph).unwrap();
        assert!(result.ranks[&0] >= 3);
        assert!(result.shortcuts.is_empty());
    }

    #[test]
    fn empty_graph() {
        let result = Preprocessor::default().preprocess(ReversibleHashGraph::new()).unwrap();
        assert!(result.ranks.is_empty());
        assert!(result.shortcuts.is_empty());
    }

    fn star() -> ReversibleHashGraph {
        ReversibleHashGraph::from_undirected_edges(&[(0, 1, 1), (0, 2, 1), (0, 3, 1), (0, 4, 1)])
    }

    #[test]
    fn zero_check_interval_refreshes_on_lazy_update() {
        // the center is popped with its initial key 2 once all leaves are gone
        let result = Preprocessor::new(0).preprocess(star()).unwrap();
        assert_eq!(result.stats.lazy_updates, 1);
        assert!(result.stats.refreshes > 0);
        assert_eq!(result.ranks[&0], 4);
    }

    #[test]
    fn large_check_interval_never_refreshes() {
        let result = Preprocessor::new(u32::MAX).preprocess(star()).unwrap();
        assert_eq!(result.stats.lazy_updates, 1);
        assert_eq!(result.stats.refreshes, 0);
        assert_eq!(result.ranks[&0], 4);
    }

    #[test]
    fn one_way_edges_are_rejected() {
        let mut graph = ReversibleHashGraph::new();
        graph.add_edge(1, 0, 1);
        graph.add_edge(0, 2, 1);

        let error = Preprocessor::default().preprocess(graph).unwrap_err();
        assert_eq!(
            error,
            PreprocessError::AsymmetricEdge {
                tail: 0,
                head: 2,
                weight: 1
            }
        );
    }

    #[test]
    fn differing_reverse_weight_is_rejected() {
        let mut graph = ReversibleHashGraph::from_undirected_edges(&[(0, 1, 4)]);
        graph.add_edge(1, 0, 2);

        let error = Preprocessor::default().preprocess(graph).unwrap_err();
        assert_eq!(
            error,
            PreprocessError::AsymmetricEdge {
                tail: 0,
                head: 1,
                weight: 4
            }
        );
    }

    #[test]
    fn heavier_parallel_edge_in_one_direction_is_accepted() {
        let mut graph = ReversibleHashGraph::from_undirected_edges(&[(0, 1, 2), (1, 2, 3)]);
        graph.add_edge(0, 1, 5);

        let result = Preprocessor::default().preprocess(graph).unwrap();
        assert_eq!(result.ranks.len(), 3);
    }

    #[test]
    fn check_interval_is_kept() {
        assert_eq!(Preprocessor::new(7).check_interval(), 7);
        assert_eq!(Preprocessor::default().check_interval(), DEFAULT_CHECK_INTERVAL);
    }
}
