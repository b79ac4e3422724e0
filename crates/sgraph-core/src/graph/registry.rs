//! Segment registries and the per-graph scheme catalog.
//!
//! A [`SegmentRegistry`] owns the fixed set of segments produced by one
//! partitioning run. The [`SegmentCatalog`] maps scheme labels to
//! registries, so several independent partitionings (different segment
//! counts, different consumers) coexist over one graph.
//!
//! Segment files are independent of each other, so store and load run one
//! rayon worker per segment with no shared mutable state.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::debug;

use crate::error::{Error, Result};

use super::segment::GraphSegment;
use super::types::{EdgeTarget, NodeId};

/// The fixed-size collection of segments produced by one partitioning run.
///
/// Segment `i` covers source vertices `[i * segment_range, (i + 1) *
/// segment_range)`. The `numa_aware` flag is a placement hint recorded with
/// the registry: segment content is identical either way, and placement
/// follows first-touch by the per-segment worker that fills or loads it.
#[derive(Debug, Clone)]
pub struct SegmentRegistry<D: EdgeTarget = NodeId> {
    segments: Vec<GraphSegment<D>>,
    numa_aware: bool,
}

impl<D: EdgeTarget> SegmentRegistry<D> {
    pub(crate) fn from_segments(segments: Vec<GraphSegment<D>>, numa_aware: bool) -> Self {
        Self {
            segments,
            numa_aware,
        }
    }

    /// Number of segments in this scheme.
    #[must_use]
    pub fn num_segments(&self) -> usize {
        self.segments.len()
    }

    /// Whether NUMA-local placement was requested for this scheme.
    #[must_use]
    pub fn numa_aware(&self) -> bool {
        self.numa_aware
    }

    /// The segment at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SegmentOutOfRange`] if `index >= num_segments`.
    pub fn segment(&self, index: usize) -> Result<&GraphSegment<D>> {
        self.segments.get(index).ok_or(Error::SegmentOutOfRange {
            index,
            count: self.segments.len(),
        })
    }

    /// Iterates the segments in index order.
    pub fn iter(&self) -> impl Iterator<Item = &GraphSegment<D>> {
        self.segments.iter()
    }

    /// Writes every segment's binary record under `dir`, one file per
    /// segment at `dir/<label>.<index>`, one worker per segment.
    ///
    /// # Errors
    ///
    /// Propagates the first file create/write failure.
    pub fn store(&self, dir: &Path, label: &str) -> Result<()> {
        std::fs::create_dir_all(dir)?;
        self.segments
            .par_iter()
            .enumerate()
            .try_for_each(|(index, segment)| {
                let path = segment_path(dir, label, index);
                let mut out = BufWriter::new(File::create(&path)?);
                segment.write_into(&mut out)?;
                debug!(?path, num_edges = segment.num_edges(), "stored segment");
                std::io::Write::flush(&mut out)
            })?;
        Ok(())
    }

    /// Reads `num_segments` segment records from `dir`, one worker per
    /// segment file.
    ///
    /// # Errors
    ///
    /// Propagates the first open/read failure; nothing partial is
    /// returned.
    pub fn load(dir: &Path, label: &str, num_segments: usize, numa_aware: bool) -> Result<Self> {
        let segments = (0..num_segments)
            .into_par_iter()
            .map(|index| {
                let path = segment_path(dir, label, index);
                let mut input = BufReader::new(File::open(&path)?);
                let segment = GraphSegment::read_from(&mut input)?;
                debug!(?path, num_edges = segment.num_edges(), "loaded segment");
                Ok(segment)
            })
            .collect::<std::io::Result<Vec<_>>>()?;
        Ok(Self {
            segments,
            numa_aware,
        })
    }
}

fn segment_path(dir: &Path, label: &str, index: usize) -> PathBuf {
    dir.join(format!("{label}.{index}"))
}

/// Label → registry mapping owned by a graph.
///
/// Registering a label that already exists drops the prior registry
/// first; all registries drop with the owning graph.
#[derive(Debug, Clone)]
pub struct SegmentCatalog<D: EdgeTarget = NodeId> {
    schemes: HashMap<String, SegmentRegistry<D>>,
}

impl<D: EdgeTarget> SegmentCatalog<D> {
    pub(crate) fn new() -> Self {
        Self {
            schemes: HashMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, label: String, registry: SegmentRegistry<D>) {
        self.schemes.insert(label, registry);
    }

    /// The registry registered under `label`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownScheme`] if no partitioning was built under
    /// that label.
    pub fn get(&self, label: &str) -> Result<&SegmentRegistry<D>> {
        self.schemes
            .get(label)
            .ok_or_else(|| Error::UnknownScheme(label.to_string()))
    }

    /// Whether a scheme is registered under `label`.
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.schemes.contains_key(label)
    }

    /// Registered scheme labels, in arbitrary order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.schemes.keys().map(String::as_str)
    }

    /// Number of registered schemes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemes.len()
    }

    /// Whether no scheme is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }
}

impl<D: EdgeTarget> Default for SegmentCatalog<D> {
    fn default() -> Self {
        Self::new()
    }
}
