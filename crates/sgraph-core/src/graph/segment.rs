//! One partition of a graph's inbound edges, sized for independent
//! parallel processing.
//!
//! A segment holds only the destination vertices that received at least
//! one edge from its assigned source range, in ascending order, together
//! with a per-vertex offset array into a packed edge array. Construction
//! is two-phase: a counting pass sizes the arrays exactly once, then a
//! fill pass writes edges through per-vertex cursors.

use std::io::{self, Read, Write};

use super::types::{EdgeOffset, EdgeTarget, NodeId};

/// A per-partition adjacency sub-structure over inbound edges.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphSegment<D: EdgeTarget = NodeId> {
    vertex_ids: Vec<NodeId>,
    offsets: Vec<EdgeOffset>,
    edges: Vec<D>,
}

impl<D: EdgeTarget> GraphSegment<D> {
    /// A segment with no vertices and no edges.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            vertex_ids: Vec::new(),
            offsets: vec![0],
            edges: Vec::new(),
        }
    }

    /// Number of vertices holding at least one edge in this segment.
    #[must_use]
    pub fn num_vertices(&self) -> usize {
        self.vertex_ids.len()
    }

    /// Number of edges packed into this segment.
    #[must_use]
    pub fn num_edges(&self) -> u64 {
        self.edges.len() as u64
    }

    /// Destination vertex ids present in this segment, ascending.
    #[must_use]
    pub fn vertex_ids(&self) -> &[NodeId] {
        &self.vertex_ids
    }

    /// Per-vertex start offsets into the edge array, length
    /// `num_vertices + 1`.
    #[must_use]
    pub fn offsets(&self) -> &[EdgeOffset] {
        &self.offsets
    }

    /// All edge destinations, packed in fill order.
    #[must_use]
    pub fn edges(&self) -> &[D] {
        &self.edges
    }

    /// Edges attached to the vertex at `slot` (an index into
    /// [`GraphSegment::vertex_ids`]).
    ///
    /// # Panics
    ///
    /// Panics if `slot >= num_vertices`.
    #[must_use]
    pub fn neighbors(&self, slot: usize) -> &[D] {
        // Offsets are produced by a prefix scan; bounded by edges.len().
        #[allow(clippy::cast_possible_truncation)]
        let (start, end) = (self.offsets[slot] as usize, self.offsets[slot + 1] as usize);
        &self.edges[start..end]
    }

    /// Iterates `(vertex_id, inbound edges)` pairs in ascending vertex
    /// order.
    pub fn entries(&self) -> impl Iterator<Item = (NodeId, &[D])> {
        self.vertex_ids
            .iter()
            .enumerate()
            .map(|(slot, &v)| (v, self.neighbors(slot)))
    }

    /// Writes this segment's fixed binary record: vertex count, edge
    /// count, vertex ids, edge array, then the offset array, all
    /// fixed-width native-endian with no padding and no header.
    ///
    /// # Errors
    ///
    /// Propagates any write failure.
    pub fn write_into<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(&(self.vertex_ids.len() as u64).to_ne_bytes())?;
        out.write_all(&(self.edges.len() as u64).to_ne_bytes())?;
        for &v in &self.vertex_ids {
            out.write_all(&v.to_ne_bytes())?;
        }
        for edge in &self.edges {
            edge.write_into(out)?;
        }
        for &offset in &self.offsets {
            out.write_all(&offset.to_ne_bytes())?;
        }
        Ok(())
    }

    /// Reads one segment record written by [`GraphSegment::write_into`].
    ///
    /// The element type `D` and the segment count are not self-described
    /// by the format; both ends agree on them out of band.
    ///
    /// # Errors
    ///
    /// Returns a read failure, or [`io::ErrorKind::InvalidData`] if the
    /// offset array does not close over the edge array.
    pub fn read_from<R: Read>(input: &mut R) -> io::Result<Self> {
        let num_vertices = read_u64(input)?;
        let num_edges = read_u64(input)?;
        let num_vertices = usize::try_from(num_vertices)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "vertex count overflow"))?;
        let num_edges = usize::try_from(num_edges)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "edge count overflow"))?;

        let mut vertex_ids = Vec::with_capacity(num_vertices);
        for _ in 0..num_vertices {
            vertex_ids.push(NodeId::read_from(input)?);
        }
        let mut edges = Vec::with_capacity(num_edges);
        for _ in 0..num_edges {
            edges.push(D::read_from(input)?);
        }
        let mut offsets = Vec::with_capacity(num_vertices + 1);
        for _ in 0..=num_vertices {
            offsets.push(read_u64(input)?);
        }

        if offsets[0] != 0 || offsets[num_vertices] != num_edges as EdgeOffset {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "segment offsets do not close over the edge array",
            ));
        }
        Ok(Self {
            vertex_ids,
            offsets,
            edges,
        })
    }
}

fn read_u64<R: Read>(input: &mut R) -> io::Result<u64> {
    let mut buf = [0u8; 8];
    input.read_exact(&mut buf)?;
    Ok(u64::from_ne_bytes(buf))
}

const NO_SLOT: u32 = u32::MAX;

/// Two-phase segment construction.
///
/// The counting pass accumulates a per-destination edge counter.
/// `allocate` compacts destinations with edges into slots, prefix-scans
/// the counts into the offset array, and sizes the edge array. The fill
/// pass then writes each edge at its slot's cursor, so the scan-computed
/// offsets decide placement in every build and fills may arrive in any
/// destination order.
#[derive(Debug)]
pub(crate) struct SegmentBuilder<D: EdgeTarget> {
    counts: Vec<EdgeOffset>,
    slots: Vec<u32>,
    vertex_ids: Vec<NodeId>,
    offsets: Vec<EdgeOffset>,
    cursors: Vec<usize>,
    edges: Vec<Option<D>>,
}

impl<D: EdgeTarget> SegmentBuilder<D> {
    pub(crate) fn new(num_nodes: usize) -> Self {
        Self {
            counts: vec![0; num_nodes],
            slots: Vec::new(),
            vertex_ids: Vec::new(),
            offsets: Vec::new(),
            cursors: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Counting pass: one more edge lands on destination `d`.
    pub(crate) fn count(&mut self, d: NodeId) {
        self.counts[d as usize] += 1;
    }

    /// Sizes the arrays from the accumulated counts and seeds one write
    /// cursor per slot.
    pub(crate) fn allocate(&mut self) {
        let num_nodes = self.counts.len();
        self.slots = vec![NO_SLOT; num_nodes];
        let mut total: EdgeOffset = 0;
        for (v, &count) in self.counts.iter().enumerate() {
            if count == 0 {
                continue;
            }
            // vertex_ids.len() < num_nodes <= u32::MAX by construction
            #[allow(clippy::cast_possible_truncation)]
            {
                self.slots[v] = self.vertex_ids.len() as u32;
                self.vertex_ids.push(v as NodeId);
            }
            self.offsets.push(total);
            total += count;
        }
        self.offsets.push(total);
        // Totals tally in-memory edges, so they fit usize.
        #[allow(clippy::cast_possible_truncation)]
        {
            self.cursors = self
                .offsets[..self.vertex_ids.len()]
                .iter()
                .map(|&o| o as usize)
                .collect();
            self.edges = vec![None; total as usize];
        }
    }

    /// Fill pass: writes the edge `(d ← source)` payload at destination
    /// `d`'s cursor and advances it.
    pub(crate) fn push(&mut self, d: NodeId, edge: D) {
        let slot = self.slots[d as usize];
        debug_assert_ne!(slot, NO_SLOT, "fill pass saw a vertex the counting pass did not");
        let slot = slot as usize;
        let at = self.cursors[slot];
        debug_assert!(
            (at as EdgeOffset) < self.offsets[slot + 1],
            "fill pass placed more edges on a vertex than the counting pass saw"
        );
        self.edges[at] = Some(edge);
        self.cursors[slot] = at + 1;
    }

    pub(crate) fn finish(self) -> GraphSegment<D> {
        let edges: Vec<D> = self.edges.into_iter().flatten().collect();
        debug_assert_eq!(
            edges.len() as EdgeOffset,
            *self.offsets.last().unwrap_or(&0),
            "fill pass did not place every counted edge"
        );
        if self.offsets.is_empty() {
            return GraphSegment::empty();
        }
        GraphSegment {
            vertex_ids: self.vertex_ids,
            offsets: self.offsets,
            edges,
        }
    }
}
