//! Error types for the GNAT spatial-search kernel

use thiserror::Error;

/// Result type for `gnat-core` operations
pub type Result<T> = std::result::Result<T, GnatError>;

/// Errors that can occur while building or querying the GNAT kernel
#[derive(Error, Debug)]
pub enum GnatError {
    /// A neuron or synapse endpoint referenced an id outside the fixed population
    #[error("neuron id {id} out of bounds (population size: {n_cells})")]
    OutOfBounds {
        /// The offending id
        id: u32,
        /// The fixed population size it should have been below
        n_cells: u32,
    },

    /// A relative weight was non-positive, which would make `neg_log_rel_w` non-finite
    #[error("invalid synapse weight {rel_w}: relative weight must be > 0")]
    DomainError {
        /// The offending weight
        rel_w: f32,
    },

    /// A spike-pair point lies outside the quadtree's root boundary
    #[error("spike-pair point ({t1}, {t2}) lies outside the quadtree root boundary")]
    PointOutOfBounds {
        /// First coordinate (t1)
        t1: i64,
        /// Second coordinate (t2)
        t2: i64,
    },

    /// A raster or pair-generation invariant was violated
    #[error("invalid format: {reason}")]
    InvalidFormat {
        /// Human-readable reason
        reason: String,
    },

    /// I/O error from the edge emitter
    #[error("I/O error: {source}")]
    Io {
        #[from]
        /// Source I/O error
        source: std::io::Error,
    },
}

impl GnatError {
    /// Create an invalid-format error
    pub fn invalid_format(reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            reason: reason.into(),
        }
    }
}
