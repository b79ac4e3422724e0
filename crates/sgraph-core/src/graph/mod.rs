//! CSR graph container and its segmentation subsystem.
//!
//! [`CsrGraph`] stores adjacency in compressed sparse row form and owns a
//! catalog of partitioning schemes built by
//! [`CsrGraph::build_pull_segments`]. Traversal consumers read
//! neighborhoods, degrees, and segments; building the index/neighbor
//! arrays in the first place is an external builder's job.
//!
//! # Example
//!
//! ```rust
//! use sgraph_core::graph::{Adjacency, CsrGraph, PartitionMode};
//!
//! let out = Adjacency::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
//! let inv = Adjacency::from_edges(4, &[(1, 0), (2, 1), (3, 2), (0, 3)]).unwrap();
//! let mut graph = CsrGraph::directed(out, inv).unwrap();
//!
//! graph
//!     .build_pull_segments("workers2", 2, false, PartitionMode::Compute)
//!     .unwrap();
//! assert_eq!(graph.num_segments("workers2").unwrap(), 2);
//!
//! // Segment 0 holds inbound edges whose source lies in [0, 2).
//! let seg = graph.segment("workers2", 0).unwrap();
//! assert_eq!(seg.num_edges(), 2);
//! ```

mod csr;
mod partition;
mod registry;
mod segment;
mod types;

#[cfg(test)]
mod csr_tests;

pub use csr::{Adjacency, CsrGraph, Direction};
pub use partition::PartitionMode;
pub use registry::{SegmentCatalog, SegmentRegistry};
pub use segment::GraphSegment;
pub use types::{EdgeOffset, EdgeTarget, NodeId, WeightedTarget};
