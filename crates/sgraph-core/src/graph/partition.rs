//! Pull-oriented repartitioning of a graph's inbound adjacency.
//!
//! `build_pull_segments` slices the inbound edge set into a fixed number
//! of segments so each can be processed by one worker or NUMA node with no
//! cross-segment synchronization. Every inbound edge `(d ← s)` is assigned
//! to segment `s / segment_range`: keying by the *source* vertex keeps each
//! segment's source range cache-resident while destinations stream, which
//! is what pull-mode traversal wants.
//!
//! The partition is a pure function of the graph and the segment count, so
//! computed segments can be cached on disk and reloaded instead of
//! recomputed.

use std::path::PathBuf;

use tracing::info;

use crate::error::{Error, Result};

use super::csr::CsrGraph;
use super::registry::SegmentRegistry;
use super::segment::{GraphSegment, SegmentBuilder};
use super::types::EdgeTarget;

/// How a partitioning run obtains its segments.
///
/// A single explicit value per call; there is no build-time switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartitionMode {
    /// Compute the segments from the graph's inbound adjacency.
    Compute,
    /// Read previously stored segment files from this directory.
    Load(PathBuf),
    /// Compute, then write each segment's file into this directory.
    Store(PathBuf),
}

impl<D: EdgeTarget> CsrGraph<D> {
    /// Partitions the inbound adjacency into `num_segments` segments and
    /// registers the result in the catalog under `label`, replacing any
    /// prior entry for that label.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSegmentCount`] for zero segments, or the
    /// propagated IO failure for [`PartitionMode::Load`] and
    /// [`PartitionMode::Store`]; on any error nothing is registered
    /// under `label`.
    pub fn build_pull_segments(
        &mut self,
        label: &str,
        num_segments: usize,
        numa_aware: bool,
        mode: PartitionMode,
    ) -> Result<()> {
        if num_segments == 0 {
            return Err(Error::InvalidSegmentCount);
        }
        let registry = match mode {
            PartitionMode::Compute => {
                info!(label, num_segments, "computing pull segments");
                self.compute_pull_registry(num_segments, numa_aware)
            }
            PartitionMode::Load(dir) => {
                info!(label, num_segments, ?dir, "loading pull segments");
                SegmentRegistry::load(&dir, label, num_segments, numa_aware)?
            }
            PartitionMode::Store(dir) => {
                info!(label, num_segments, ?dir, "computing and storing pull segments");
                let registry = self.compute_pull_registry(num_segments, numa_aware);
                registry.store(&dir, label)?;
                registry
            }
        };
        self.catalog_mut().insert(label.to_string(), registry);
        Ok(())
    }

    /// The registry built under `label`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownScheme`] if the label was never registered.
    pub fn segments(&self, label: &str) -> Result<&SegmentRegistry<D>> {
        self.catalog().get(label)
    }

    /// The segment at `index` of the scheme registered under `label`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownScheme`] for an unregistered label or
    /// [`Error::SegmentOutOfRange`] for a bad index.
    pub fn segment(&self, label: &str, index: usize) -> Result<&GraphSegment<D>> {
        self.catalog().get(label)?.segment(index)
    }

    /// Number of segments in the scheme registered under `label`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownScheme`] if the label was never registered.
    pub fn num_segments(&self, label: &str) -> Result<usize> {
        Ok(self.catalog().get(label)?.num_segments())
    }

    /// Two passes over the same `(destination, inbound source)` pairs:
    /// count edges per segment, size each segment's arrays, then fill.
    fn compute_pull_registry(&self, num_segments: usize, numa_aware: bool) -> SegmentRegistry<D> {
        let segment_range = self.num_nodes().div_ceil(num_segments);
        let mut builders: Vec<SegmentBuilder<D>> = (0..num_segments)
            .map(|_| SegmentBuilder::new(self.num_nodes()))
            .collect();

        for d in self.vertices() {
            for s in self.in_neighbors(d) {
                builders[s.target() as usize / segment_range].count(d);
            }
        }
        for builder in &mut builders {
            builder.allocate();
        }
        for d in self.vertices() {
            for s in self.in_neighbors(d) {
                builders[s.target() as usize / segment_range].push(d, *s);
            }
        }

        let segments = builders.into_iter().map(SegmentBuilder::finish).collect();
        SegmentRegistry::from_segments(segments, numa_aware)
    }
}
