//! Tests for CSR adjacency and the graph container.

use proptest::prelude::*;

use super::csr::{Adjacency, CsrGraph, Direction};
use super::types::{NodeId, WeightedTarget};
use crate::error::Error;

/// Directed 4-cycle: 0→1, 1→2, 2→3, 3→0.
fn cycle4() -> CsrGraph {
    let out = Adjacency::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
    let inv = Adjacency::from_edges(4, &[(1, 0), (2, 1), (3, 2), (0, 3)]).unwrap();
    CsrGraph::directed(out, inv).unwrap()
}

/// Undirected triangle on {0, 1, 2}, stored symmetrically.
fn triangle() -> CsrGraph {
    let sym = &[(0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1)];
    CsrGraph::undirected(Adjacency::from_edges(3, sym).unwrap()).unwrap()
}

#[test]
fn test_adjacency_from_edges() {
    let adj = Adjacency::from_edges(3, &[(0, 1), (0, 2), (2, 0)]).unwrap();
    assert_eq!(adj.num_nodes(), 3);
    assert_eq!(adj.num_entries(), 3);
    assert_eq!(adj.neighbors(0), &[1, 2]);
    assert_eq!(adj.neighbors(1), &[] as &[NodeId]);
    assert_eq!(adj.neighbors(2), &[0]);
    assert_eq!(adj.offsets(), &[0, 2, 2, 3]);
}

#[test]
fn test_adjacency_preserves_builder_order() {
    let adj = Adjacency::from_edges(4, &[(1, 3), (1, 0), (1, 2)]).unwrap();
    assert_eq!(adj.neighbors(1), &[3, 0, 2]);
}

#[test]
fn test_adjacency_rejects_out_of_range_edge() {
    let result = Adjacency::from_edges(2, &[(0, 5)]);
    assert!(matches!(result, Err(Error::InvalidAdjacency(_))));
}

#[test]
fn test_adjacency_validates_offsets() {
    // Non-monotonic.
    let result = Adjacency::<NodeId>::new(vec![0, 3, 1], vec![1, 1, 1]);
    assert!(matches!(result, Err(Error::InvalidAdjacency(_))));

    // Must start at zero.
    let result = Adjacency::<NodeId>::new(vec![1, 2], vec![0]);
    assert!(matches!(result, Err(Error::InvalidAdjacency(_))));

    // Final offset must match the neighbor count.
    let result = Adjacency::<NodeId>::new(vec![0, 2], vec![0]);
    assert!(matches!(result, Err(Error::InvalidAdjacency(_))));

    // Empty offset array.
    let result = Adjacency::<NodeId>::new(Vec::new(), Vec::new());
    assert!(matches!(result, Err(Error::InvalidAdjacency(_))));
}

#[test]
fn test_adjacency_new_accepts_valid_arrays() {
    let adj = Adjacency::new(vec![0, 1, 3], vec![1, 0, 1]).unwrap();
    assert_eq!(adj.degree(0), 1);
    assert_eq!(adj.degree(1), 2);
    assert_eq!(adj.neighbors(1), &[0, 1]);
}

#[test]
fn test_empty_graph_rejected() {
    let adj = Adjacency::<NodeId>::new(vec![0], Vec::new()).unwrap();
    assert!(matches!(CsrGraph::undirected(adj), Err(Error::EmptyGraph)));
}

#[test]
fn test_undirected_counts_each_edge_once() {
    let graph = triangle();
    assert!(!graph.is_directed());
    assert_eq!(graph.num_nodes(), 3);
    assert_eq!(graph.num_edges(), 3);
    assert_eq!(graph.num_edges_directed(), 6);
}

#[test]
fn test_undirected_rejects_odd_entry_count() {
    let adj = Adjacency::from_edges(2, &[(0, 1)]).unwrap();
    assert!(matches!(
        CsrGraph::undirected(adj),
        Err(Error::InvalidAdjacency(_))
    ));
}

#[test]
fn test_undirected_in_aliases_out() {
    let graph = triangle();
    for v in graph.vertices() {
        assert_eq!(graph.in_degree(v), graph.out_degree(v));
        assert_eq!(graph.in_neighbors(v), graph.out_neighbors(v));
    }
}

#[test]
fn test_directed_counts() {
    let graph = cycle4();
    assert!(graph.is_directed());
    assert_eq!(graph.num_edges(), 4);
    assert_eq!(graph.num_edges_directed(), 4);

    let degree_sum: u64 = graph.vertices().map(|v| graph.out_degree(v)).sum();
    assert_eq!(degree_sum, graph.num_edges_directed());
}

#[test]
fn test_directed_rejects_mismatched_halves() {
    let out = Adjacency::from_edges(4, &[(0, 1)]).unwrap();
    let inv = Adjacency::from_edges(3, &[(1, 0)]).unwrap();
    assert!(matches!(
        CsrGraph::directed(out, inv),
        Err(Error::InvalidAdjacency(_))
    ));

    let out = Adjacency::from_edges(4, &[(0, 1), (0, 2)]).unwrap();
    let inv = Adjacency::from_edges(4, &[(1, 0)]).unwrap();
    assert!(matches!(
        CsrGraph::directed(out, inv),
        Err(Error::InvalidAdjacency(_))
    ));
}

#[test]
fn test_neighborhood_directions() {
    let graph = cycle4();
    assert_eq!(graph.out_neighbors(0), &[1]);
    assert_eq!(graph.in_neighbors(0), &[3]);
    assert_eq!(graph.neighbors(0, Direction::Out), &[1]);
    assert_eq!(graph.neighbors(0, Direction::In), &[3]);
}

#[test]
fn test_neighborhood_is_restartable() {
    let graph = cycle4();
    let first: Vec<NodeId> = graph.out_neighbors(1).to_vec();
    let second: Vec<NodeId> = graph.out_neighbors(1).to_vec();
    assert_eq!(first, second);
}

#[test]
fn test_vertices_range() {
    let graph = cycle4();
    let vertices: Vec<NodeId> = graph.vertices().collect();
    assert_eq!(vertices, vec![0, 1, 2, 3]);
    // Restartable.
    assert_eq!(graph.vertices().count(), 4);
}

#[test]
fn test_offsets_follow_inbound_index() {
    let graph = cycle4();
    // Every vertex of the cycle has exactly one inbound edge.
    assert_eq!(graph.offsets(), &[0, 1, 2, 3, 4]);
    assert_eq!(graph.vertex_offsets(Direction::In), vec![0, 1, 2, 3, 4]);
    assert_eq!(graph.vertex_offsets(Direction::Out), vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_offsets_non_decreasing() {
    let graph = triangle();
    let offsets = graph.offsets();
    for w in offsets.windows(2) {
        assert!(w[0] <= w[1]);
    }
}

#[test]
fn test_flags_scratch() {
    let mut graph = cycle4();
    assert_eq!(graph.flags(), &[0, 0, 0, 0]);
    graph.flags_mut()[2] = 7;
    assert_eq!(graph.flags()[2], 7);
}

#[test]
fn test_transpose_swaps_roles() {
    let graph = cycle4();
    let transposed = graph.transpose();
    for v in graph.vertices() {
        assert_eq!(transposed.out_neighbors(v), graph.in_neighbors(v));
        assert_eq!(transposed.in_neighbors(v), graph.out_neighbors(v));
        assert_eq!(transposed.out_degree(v), graph.in_degree(v));
    }
    assert_eq!(transposed.num_edges(), graph.num_edges());
}

#[test]
fn test_transpose_outlives_original() {
    let transposed = {
        let graph = cycle4();
        graph.transpose()
    };
    // Storage is shared, not borrowed: dropping the original cannot leave
    // the view dangling.
    assert_eq!(transposed.out_neighbors(0), &[3]);
}

#[test]
fn test_clone_outlives_original() {
    let alias = {
        let graph = cycle4();
        graph.clone()
    };
    assert_eq!(alias.out_neighbors(2), &[3]);
    assert_eq!(alias.num_edges(), 4);
}

#[test]
fn test_weighted_graph() {
    let out = Adjacency::from_edges(
        3,
        &[
            (0, WeightedTarget::new(1, 5)),
            (0, WeightedTarget::new(2, 2)),
            (1, WeightedTarget::new(2, 9)),
        ],
    )
    .unwrap();
    let inv = Adjacency::from_edges(
        3,
        &[
            (1, WeightedTarget::new(0, 5)),
            (2, WeightedTarget::new(0, 2)),
            (2, WeightedTarget::new(1, 9)),
        ],
    )
    .unwrap();
    let graph = CsrGraph::directed(out, inv).unwrap();

    assert_eq!(graph.out_degree(0), 2);
    assert_eq!(graph.in_degree(2), 2);
    let weights: Vec<i32> = graph.in_neighbors(2).iter().map(|t| t.weight).collect();
    assert_eq!(weights, vec![2, 9]);
}

proptest! {
    /// Degree sums equal the directed edge count for any generated graph.
    #[test]
    fn prop_degree_sum_matches_edge_count(
        num_nodes in 1usize..32,
        raw in proptest::collection::vec((0u32..32, 0u32..32), 0..128),
    ) {
        let edges: Vec<(NodeId, NodeId)> = raw
            .into_iter()
            .map(|(u, v)| (u % num_nodes as NodeId, v % num_nodes as NodeId))
            .collect();
        let reversed: Vec<(NodeId, NodeId)> = edges.iter().map(|&(u, v)| (v, u)).collect();

        let out = Adjacency::from_edges(num_nodes, &edges).unwrap();
        let inv = Adjacency::from_edges(num_nodes, &reversed).unwrap();
        let graph = CsrGraph::directed(out, inv).unwrap();

        let out_sum: u64 = graph.vertices().map(|v| graph.out_degree(v)).sum();
        let in_sum: u64 = graph.vertices().map(|v| graph.in_degree(v)).sum();
        prop_assert_eq!(out_sum, graph.num_edges_directed());
        prop_assert_eq!(in_sum, graph.num_edges_directed());
    }

    /// Offsets produced by the counting-sort builder never decrease.
    #[test]
    fn prop_offsets_non_decreasing(
        num_nodes in 1usize..32,
        raw in proptest::collection::vec((0u32..32, 0u32..32), 0..128),
    ) {
        let edges: Vec<(NodeId, NodeId)> = raw
            .into_iter()
            .map(|(u, v)| (u % num_nodes as NodeId, v % num_nodes as NodeId))
            .collect();
        let adj = Adjacency::from_edges(num_nodes, &edges).unwrap();
        for w in adj.offsets().windows(2) {
            prop_assert!(w[0] <= w[1]);
        }
    }
}
