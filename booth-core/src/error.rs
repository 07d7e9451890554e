//! Error types for booth operations.
//!
//! Editor transitions never return these for user-driven edge cases (unknown
//! ids, cancelled picks, undersized geometry); those degrade to no-ops or
//! clamped values. Errors only cross the explicit boundaries: image decoding,
//! configuration, and JSON.

use thiserror::Error;

/// Result type for booth operations.
pub type BoothResult<T> = Result<T, BoothError>;

/// Errors that can occur at the booth core's boundaries.
#[derive(Debug, Error)]
pub enum BoothError {
    /// The image provider could not decode the selected file.
    #[error("Failed to decode image: {0}")]
    ImageDecode(String),

    /// Decoding succeeded but produced unusable dimensions.
    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidImage {
        /// Decoded width.
        width: f64,
        /// Decoded height.
        height: f64,
    },

    /// Filesystem error while reading an image.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Layout or config serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A layer list breaks collection invariants (duplicate ids, two frames).
    #[error("Invalid layer collection: {0}")]
    InvalidCollection(String),

    /// Configuration values are inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A decode completed for a ticket that is not pending.
    #[error("Unknown import ticket: {0}")]
    UnknownImport(u64),
}
