//! Error types for regionmap.

use regionmap_types::region::AdminLevel;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RegionMapError>;

/// Errors produced by the boundary pipeline.
///
/// Every failure here is deterministic: all inputs are already in memory, so
/// nothing is retried.
#[derive(Debug, Error)]
pub enum RegionMapError {
    /// Input data that cannot be turned into a region set (malformed GeoJSON,
    /// missing properties, empty geometry).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A group member whose geometry cannot participate in a union.
    /// Recovered locally during aggregation; the member is skipped.
    #[error("invalid geometry for member {index} of group '{group}'")]
    InvalidGeometry { group: String, index: usize },

    /// A dataset was requested for an admin level that was never loaded.
    /// A programming-contract violation, surfaced rather than defaulted.
    #[error("no dataset loaded for admin level '{0}'")]
    UnknownLevel(AdminLevel),

    /// GeoJSON emission failure.
    #[error("serialization error: {0}")]
    Serialization(String),
}
