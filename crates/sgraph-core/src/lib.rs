//! # sgraph-core
//!
//! Compact, parallel-friendly graph storage in compressed sparse row
//! (CSR) form, with a NUMA-oriented repartitioning subsystem and on-disk
//! caching of the resulting segments.
//!
//! The container is built once by an external builder that hands in
//! finished offset/neighbor arrays; downstream traversal engines then
//! read neighborhoods, degrees, and per-scheme segments. The crate does
//! no scheduling of its own; the partition passes and segment files are
//! shaped so a parallel caller can process one segment per worker with no
//! cross-segment synchronization.
//!
//! ## Quick Start
//!
//! ```rust
//! use sgraph_core::{Adjacency, CsrGraph, PartitionMode};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Directed 4-cycle: 0→1, 1→2, 2→3, 3→0.
//!     let out = Adjacency::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)])?;
//!     let inv = Adjacency::from_edges(4, &[(1, 0), (2, 1), (3, 2), (0, 3)])?;
//!     let mut graph = CsrGraph::directed(out, inv)?;
//!
//!     // Slice the inbound edge set into two independently processable
//!     // segments, keyed by source-vertex range.
//!     graph.build_pull_segments("pull2", 2, false, PartitionMode::Compute)?;
//!
//!     let segment = graph.segment("pull2", 0)?;
//!     for (vertex, sources) in segment.entries() {
//!         let _ = (vertex, sources);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Weighted graphs use the same containers with
//! [`WeightedTarget`] as the neighbor element; the weight rides along as
//! metadata and never participates in identity or segment assignment.

#![warn(missing_docs)]

pub mod error;
pub mod graph;

pub use error::{Error, Result};
pub use graph::{
    Adjacency, CsrGraph, Direction, EdgeOffset, EdgeTarget, GraphSegment, NodeId, PartitionMode,
    SegmentCatalog, SegmentRegistry, WeightedTarget,
};
