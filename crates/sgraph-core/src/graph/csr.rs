//! CSR adjacency storage and the graph container.
//!
//! [`Adjacency`] is one validated CSR half: a cumulative offset array of
//! length `num_nodes + 1` plus a flat neighbor array. [`CsrGraph`] owns one
//! half (undirected) or an out/in pair (directed) behind `Arc`s, so clones
//! and transpose views share storage safely instead of tracking who is
//! allowed to free what. A view can never dangle: the last graph holding an
//! `Arc` releases the arrays.
//!
//! # Example
//!
//! ```rust
//! use sgraph_core::graph::{Adjacency, CsrGraph};
//!
//! // Directed 4-cycle: 0→1, 1→2, 2→3, 3→0.
//! let out = Adjacency::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
//! let inv = Adjacency::from_edges(4, &[(1, 0), (2, 1), (3, 2), (0, 3)]).unwrap();
//! let graph = CsrGraph::directed(out, inv).unwrap();
//!
//! assert_eq!(graph.num_edges(), 4);
//! assert_eq!(graph.out_neighbors(0), &[1]);
//! assert_eq!(graph.in_neighbors(0), &[3]);
//! ```

use std::sync::Arc;

use rayon::prelude::*;

use crate::error::{Error, Result};

use super::registry::SegmentCatalog;
use super::types::{EdgeOffset, EdgeTarget, NodeId};

/// Neighborhood orientation selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Edges leaving a vertex.
    Out,
    /// Edges pointing into a vertex.
    In,
}

/// One validated CSR half: per-vertex cumulative offsets plus a flat
/// neighbor array.
///
/// Invariants, checked at construction: `offsets[0] == 0`, offsets are
/// non-decreasing, and the final offset equals the neighbor count. With
/// offsets validated once, every neighborhood lookup is a pair of slice
/// indexes.
#[derive(Debug, Clone)]
pub struct Adjacency<D: EdgeTarget = NodeId> {
    offsets: Vec<EdgeOffset>,
    neighbors: Vec<D>,
}

impl<D: EdgeTarget> Adjacency<D> {
    /// Takes ownership of prebuilt offset/neighbor arrays.
    ///
    /// `offsets` must have length `num_nodes + 1`. Monotonicity is checked
    /// in parallel across vertex ranges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAdjacency`] if the arrays are inconsistent.
    pub fn new(offsets: Vec<EdgeOffset>, neighbors: Vec<D>) -> Result<Self> {
        if offsets.is_empty() {
            return Err(Error::InvalidAdjacency(
                "offset array must have at least one entry".to_string(),
            ));
        }
        if offsets.len() - 1 > NodeId::MAX as usize {
            return Err(Error::InvalidAdjacency(format!(
                "{} vertices exceed the vertex id range",
                offsets.len() - 1
            )));
        }
        if offsets[0] != 0 {
            return Err(Error::InvalidAdjacency(format!(
                "offset array must start at 0, found {}",
                offsets[0]
            )));
        }
        if !offsets.par_windows(2).all(|w| w[0] <= w[1]) {
            return Err(Error::InvalidAdjacency(
                "offsets must be non-decreasing".to_string(),
            ));
        }
        let span = offsets[offsets.len() - 1];
        if span != neighbors.len() as EdgeOffset {
            return Err(Error::InvalidAdjacency(format!(
                "final offset {} does not match neighbor count {}",
                span,
                neighbors.len()
            )));
        }
        Ok(Self { offsets, neighbors })
    }

    /// Builds a CSR half from an in-memory `(source, destination)` edge
    /// list by counting sort: per-vertex counts, a prefix scan into
    /// offsets, then a cursor fill.
    ///
    /// Neighbor order within a vertex follows the input order. Parsing of
    /// edge-list files is the caller's concern.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAdjacency`] if any endpoint is outside
    /// `[0, num_nodes)`.
    pub fn from_edges(num_nodes: usize, edges: &[(NodeId, D)]) -> Result<Self> {
        if num_nodes > NodeId::MAX as usize {
            return Err(Error::InvalidAdjacency(format!(
                "{num_nodes} vertices exceed the vertex id range"
            )));
        }
        let mut counts: Vec<EdgeOffset> = vec![0; num_nodes + 1];
        for &(src, dst) in edges {
            if src as usize >= num_nodes || dst.target() as usize >= num_nodes {
                return Err(Error::InvalidAdjacency(format!(
                    "edge ({src}, {}) outside vertex range [0, {num_nodes})",
                    dst.target()
                )));
            }
            counts[src as usize + 1] += 1;
        }
        for v in 1..=num_nodes {
            counts[v] += counts[v - 1];
        }
        let offsets = counts;

        // Offsets tally in-memory edges, so they fit usize.
        #[allow(clippy::cast_possible_truncation)]
        let mut cursors: Vec<usize> = offsets[..num_nodes].iter().map(|&o| o as usize).collect();
        let mut neighbors: Vec<Option<D>> = vec![None; edges.len()];
        for &(src, dst) in edges {
            let at = cursors[src as usize];
            neighbors[at] = Some(dst);
            cursors[src as usize] = at + 1;
        }
        let neighbors = neighbors.into_iter().flatten().collect();
        Ok(Self { offsets, neighbors })
    }

    /// Number of vertices covered by this half.
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Total neighbor entries.
    #[must_use]
    pub fn num_entries(&self) -> EdgeOffset {
        self.neighbors.len() as EdgeOffset
    }

    /// Degree of `v`.
    ///
    /// # Panics
    ///
    /// Panics if `v >= num_nodes`.
    #[must_use]
    pub fn degree(&self, v: NodeId) -> EdgeOffset {
        let v = v as usize;
        self.offsets[v + 1] - self.offsets[v]
    }

    /// Neighbors of `v`, in builder order.
    ///
    /// # Panics
    ///
    /// Panics if `v >= num_nodes`.
    #[must_use]
    pub fn neighbors(&self, v: NodeId) -> &[D] {
        let v = v as usize;
        // Offsets were validated monotone and bounded at construction.
        #[allow(clippy::cast_possible_truncation)]
        let (start, end) = (self.offsets[v] as usize, self.offsets[v + 1] as usize);
        &self.neighbors[start..end]
    }

    /// The cumulative offset array, length `num_nodes + 1`.
    #[must_use]
    pub fn offsets(&self) -> &[EdgeOffset] {
        &self.offsets
    }
}

/// Compact graph container in CSR format.
///
/// Constructed by an external builder that hands in finished
/// [`Adjacency`] halves. Undirected graphs store a single half and answer
/// in-queries from it; directed graphs always carry the inverse half, so
/// inbound access on a graph built without inverse storage is not a
/// representable state. `Clone` produces an alias sharing the underlying
/// arrays; [`CsrGraph::transpose`] produces a reverse-role alias.
#[derive(Debug, Clone)]
pub struct CsrGraph<D: EdgeTarget = NodeId> {
    directed: bool,
    num_nodes: usize,
    num_edges: u64,
    out: Arc<Adjacency<D>>,
    inv: Option<Arc<Adjacency<D>>>,
    flags: Vec<i32>,
    catalog: SegmentCatalog<D>,
}

impl<D: EdgeTarget> CsrGraph<D> {
    /// Wraps one adjacency half as an undirected graph.
    ///
    /// In- and out-neighborhoods alias the same storage; each undirected
    /// edge is stored twice (symmetric storage) but counted once by
    /// [`CsrGraph::num_edges`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyGraph`] for zero vertices and
    /// [`Error::InvalidAdjacency`] if the entry count is odd (symmetric
    /// storage always holds an even number of directed entries).
    pub fn undirected(adj: Adjacency<D>) -> Result<Self> {
        let num_nodes = adj.num_nodes();
        if num_nodes == 0 {
            return Err(Error::EmptyGraph);
        }
        let span = adj.num_entries();
        if span % 2 != 0 {
            return Err(Error::InvalidAdjacency(format!(
                "undirected graph holds {span} directed entries, expected an even count"
            )));
        }
        Ok(Self {
            directed: false,
            num_nodes,
            num_edges: span / 2,
            flags: vec![0; num_nodes],
            out: Arc::new(adj),
            inv: None,
            catalog: SegmentCatalog::new(),
        })
    }

    /// Wraps an out/in adjacency pair as a directed graph.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyGraph`] for zero vertices and
    /// [`Error::InvalidAdjacency`] if the halves disagree on vertex or
    /// edge counts.
    pub fn directed(out: Adjacency<D>, inv: Adjacency<D>) -> Result<Self> {
        let num_nodes = out.num_nodes();
        if num_nodes == 0 {
            return Err(Error::EmptyGraph);
        }
        if inv.num_nodes() != num_nodes {
            return Err(Error::InvalidAdjacency(format!(
                "out half covers {num_nodes} vertices but in half covers {}",
                inv.num_nodes()
            )));
        }
        if inv.num_entries() != out.num_entries() {
            return Err(Error::InvalidAdjacency(format!(
                "out half holds {} edges but in half holds {}",
                out.num_entries(),
                inv.num_entries()
            )));
        }
        Ok(Self {
            directed: true,
            num_nodes,
            num_edges: out.num_entries(),
            flags: vec![0; num_nodes],
            out: Arc::new(out),
            inv: Some(Arc::new(inv)),
            catalog: SegmentCatalog::new(),
        })
    }

    /// Reverse-role alias: out-neighborhoods of the transpose are this
    /// graph's in-neighborhoods, sharing storage without copying.
    ///
    /// The transpose starts with fresh flags and an empty segment catalog.
    /// For an undirected graph this is an ordinary alias.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let (out, inv) = match &self.inv {
            Some(inv) => (Arc::clone(inv), Some(Arc::clone(&self.out))),
            None => (Arc::clone(&self.out), None),
        };
        Self {
            directed: self.directed,
            num_nodes: self.num_nodes,
            num_edges: self.num_edges,
            flags: vec![0; self.num_nodes],
            out,
            inv,
            catalog: SegmentCatalog::new(),
        }
    }

    /// Whether inbound and outbound adjacency are distinct.
    #[must_use]
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Number of vertices.
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Number of edges; an undirected edge counts once even though it is
    /// stored twice.
    #[must_use]
    pub fn num_edges(&self) -> u64 {
        self.num_edges
    }

    /// Number of directed edge entries: `num_edges` for a directed graph,
    /// doubled for an undirected one.
    #[must_use]
    pub fn num_edges_directed(&self) -> u64 {
        if self.directed {
            self.num_edges
        } else {
            2 * self.num_edges
        }
    }

    /// Out-degree of `v`, O(1).
    #[must_use]
    pub fn out_degree(&self, v: NodeId) -> EdgeOffset {
        self.out.degree(v)
    }

    /// In-degree of `v`, O(1).
    #[must_use]
    pub fn in_degree(&self, v: NodeId) -> EdgeOffset {
        self.in_adjacency().degree(v)
    }

    /// Outbound neighborhood of `v` in storage order. The slice borrows
    /// the graph, so it cannot outlive the storage it points into.
    #[must_use]
    pub fn out_neighbors(&self, v: NodeId) -> &[D] {
        self.out.neighbors(v)
    }

    /// Inbound neighborhood of `v` in storage order.
    #[must_use]
    pub fn in_neighbors(&self, v: NodeId) -> &[D] {
        self.in_adjacency().neighbors(v)
    }

    /// Neighborhood of `v` in the given direction.
    #[must_use]
    pub fn neighbors(&self, v: NodeId, direction: Direction) -> &[D] {
        match direction {
            Direction::Out => self.out_neighbors(v),
            Direction::In => self.in_neighbors(v),
        }
    }

    /// All vertex ids, `0..num_nodes`. Finite and restartable.
    pub fn vertices(&self) -> std::ops::Range<NodeId> {
        // num_nodes fits NodeId: enforced by Adjacency construction.
        #[allow(clippy::cast_possible_truncation)]
        let n = self.num_nodes as NodeId;
        0..n
    }

    /// Per-vertex cumulative edge counts over the inbound index, for
    /// downstream load balancing. Fixed at construction.
    #[must_use]
    pub fn offsets(&self) -> &[EdgeOffset] {
        self.in_adjacency().offsets()
    }

    /// Recomputes cumulative offsets for either orientation.
    #[must_use]
    pub fn vertex_offsets(&self, direction: Direction) -> Vec<EdgeOffset> {
        match direction {
            Direction::Out => self.out.offsets().to_vec(),
            Direction::In => self.in_adjacency().offsets().to_vec(),
        }
    }

    /// Per-vertex scratch integers for external deduplication bookkeeping.
    #[must_use]
    pub fn flags(&self) -> &[i32] {
        &self.flags
    }

    /// Mutable access to the deduplication scratch.
    pub fn flags_mut(&mut self) -> &mut [i32] {
        &mut self.flags
    }

    /// The segment catalog: every partitioning scheme registered on this
    /// graph, by label.
    #[must_use]
    pub fn catalog(&self) -> &SegmentCatalog<D> {
        &self.catalog
    }

    pub(crate) fn catalog_mut(&mut self) -> &mut SegmentCatalog<D> {
        &mut self.catalog
    }

    fn in_adjacency(&self) -> &Adjacency<D> {
        // Undirected storage is symmetric; in-access is a pure alias.
        self.inv.as_deref().unwrap_or(&self.out)
    }
}
