//! Error types for sgraph-core.

use thiserror::Error;

/// Graph container and segmentation error types.
#[derive(Error, Debug)]
pub enum Error {
    /// A graph was constructed with zero vertices.
    #[error("graph must have at least one vertex")]
    EmptyGraph,

    /// The offset/neighbor arrays handed to a constructor are inconsistent.
    #[error("invalid adjacency: {0}")]
    InvalidAdjacency(String),

    /// A partitioning was requested with zero segments.
    #[error("segment count must be at least 1")]
    InvalidSegmentCount,

    /// Lookup of a partitioning scheme that was never registered.
    #[error("no segment scheme registered under label '{0}'")]
    UnknownScheme(String),

    /// Segment index past the end of a registry.
    #[error("segment index {index} out of range ({count} segments)")]
    SegmentOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of segments in the registry.
        count: usize,
    },

    /// IO error while storing or loading segment files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for graph operations.
pub type Result<T> = std::result::Result<T, Error>;
