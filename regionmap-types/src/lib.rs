//! # regionmap-types
//!
//! Core data types for the regionmap administrative-boundary pipeline.
//!
//! This crate provides the fundamental types shared by the aggregation and
//! viewport-filtering layers:
//!
//! - **Region types**: `Region`, `RegionProperties`, `RegionGeometry`, `AdminLevel`
//! - **Bounding-box types**: `LatLngBounds`
//!
//! All types are serializable with Serde and built on top of the `geo` crate's
//! geometric primitives.
//!
//! ## Examples
//!
//! ```rust
//! use regionmap_types::bounds::LatLngBounds;
//! use geo::Point;
//!
//! // Viewport roughly covering Seoul
//! let seoul = LatLngBounds::new(37.42, 37.70, 126.76, 127.18);
//! assert!(seoul.contains_point(&Point::new(126.978, 37.5665)));
//! ```

pub mod bounds;
pub mod region;
