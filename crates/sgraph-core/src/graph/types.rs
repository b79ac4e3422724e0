//! Vertex identifiers and edge-target element types.
//!
//! A CSR neighbor array stores one [`EdgeTarget`] per edge. The element is
//! either a bare vertex id (unweighted graphs) or a [`WeightedTarget`]
//! carrying a weight alongside the vertex id. Which one is in play is fixed
//! at compile time through the type parameter on the containers, so hot
//! loops never branch on the element kind to extract a vertex id.

use std::cmp::Ordering;
use std::io::{self, Read, Write};

/// Dense vertex identifier in `[0, num_nodes)`.
pub type NodeId = u32;

/// 64-bit cumulative edge offset, as stored in segment files.
pub type EdgeOffset = u64;

/// An element of a CSR neighbor array.
///
/// Provides the vertex-id extraction used by degree queries and the
/// partitioner, plus the fixed-width native-endian encoding used by the
/// segment file format. Implemented for [`NodeId`] (unweighted) and
/// [`WeightedTarget`] (weighted).
pub trait EdgeTarget: Copy + PartialEq + std::fmt::Debug + Send + Sync + 'static {
    /// On-disk width of one encoded element, in bytes.
    const ENCODED_LEN: usize;

    /// The vertex this edge points at.
    fn target(&self) -> NodeId;

    /// Writes the fixed-width native-endian encoding of this element.
    fn write_into<W: Write>(&self, out: &mut W) -> io::Result<()>;

    /// Reads one element back from its fixed-width encoding.
    fn read_from<R: Read>(input: &mut R) -> io::Result<Self>;
}

impl EdgeTarget for NodeId {
    const ENCODED_LEN: usize = std::mem::size_of::<NodeId>();

    #[inline]
    fn target(&self) -> NodeId {
        *self
    }

    fn write_into<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(&self.to_ne_bytes())
    }

    fn read_from<R: Read>(input: &mut R) -> io::Result<Self> {
        let mut buf = [0u8; std::mem::size_of::<NodeId>()];
        input.read_exact(&mut buf)?;
        Ok(NodeId::from_ne_bytes(buf))
    }
}

/// A weighted edge destination: vertex id plus an integer weight.
///
/// Equality and ordering compare only the vertex component. The weight is
/// edge metadata, not identity: an external builder removing duplicate or
/// self edges must treat `(v, 3)` and `(v, 7)` as the same destination,
/// exactly as it would for bare vertex ids.
#[derive(Debug, Clone, Copy)]
pub struct WeightedTarget {
    /// Destination vertex.
    pub target: NodeId,
    /// Edge weight.
    pub weight: i32,
}

impl WeightedTarget {
    /// Creates a weighted destination.
    #[must_use]
    pub fn new(target: NodeId, weight: i32) -> Self {
        Self { target, weight }
    }
}

impl From<NodeId> for WeightedTarget {
    /// Promotes a bare vertex id to a unit-weight destination.
    fn from(target: NodeId) -> Self {
        Self { target, weight: 1 }
    }
}

impl PartialEq for WeightedTarget {
    fn eq(&self, other: &Self) -> bool {
        self.target == other.target
    }
}

impl Eq for WeightedTarget {}

impl PartialEq<NodeId> for WeightedTarget {
    fn eq(&self, other: &NodeId) -> bool {
        self.target == *other
    }
}

impl PartialOrd for WeightedTarget {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WeightedTarget {
    fn cmp(&self, other: &Self) -> Ordering {
        self.target.cmp(&other.target)
    }
}

impl EdgeTarget for WeightedTarget {
    const ENCODED_LEN: usize = std::mem::size_of::<NodeId>() + std::mem::size_of::<i32>();

    #[inline]
    fn target(&self) -> NodeId {
        self.target
    }

    fn write_into<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(&self.target.to_ne_bytes())?;
        out.write_all(&self.weight.to_ne_bytes())
    }

    fn read_from<R: Read>(input: &mut R) -> io::Result<Self> {
        let mut buf = [0u8; std::mem::size_of::<NodeId>()];
        input.read_exact(&mut buf)?;
        let target = NodeId::from_ne_bytes(buf);
        let mut buf = [0u8; std::mem::size_of::<i32>()];
        input.read_exact(&mut buf)?;
        let weight = i32::from_ne_bytes(buf);
        Ok(Self { target, weight })
    }
}
