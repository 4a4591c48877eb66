//! Administrative-boundary geometry pipeline for map-based location search.
//!
//! Two cooperating halves: an offline aggregator that merges fine-grained
//! region polygons into district and province boundaries by geometric union,
//! and an interactive viewport filter that culls each level's polygons down
//! to the ones whose bounding box intersects the visible map rectangle.
//! A small selection machine tracks hover/click state and derives the render
//! style per region.
//!
//! ```rust
//! use regionmap::{AdminLevel, LatLngBounds, MapView, RegionAtlas, regions_from_geojson};
//!
//! let fine = regions_from_geojson(
//!     r#"{"type":"FeatureCollection","features":[{
//!         "type":"Feature",
//!         "properties":{"code":"1101053","parentCode":"11010","provinceCode":"11",
//!                       "displayName":"Seoul Jongno Sajik",
//!                       "provinceName":"Seoul","districtName":"Jongno"},
//!         "geometry":{"type":"Polygon","coordinates":[[[126.96,37.57],[126.98,37.57],
//!                     [126.98,37.58],[126.96,37.58],[126.96,37.57]]]}
//!     }]}"#,
//!     AdminLevel::Fine,
//! )?;
//!
//! // District and province datasets are aggregated from the fine one.
//! let atlas = RegionAtlas::from_fine(fine)?;
//!
//! let mut view = MapView::new(AdminLevel::Fine);
//! view.set_viewport(LatLngBounds::new(37.5, 37.6, 126.9, 127.0));
//! assert_eq!(view.visible(&atlas)?.len(), 1);
//! # Ok::<(), regionmap::RegionMapError>(())
//! ```

pub mod aggregate;
pub mod atlas;
pub mod error;
pub mod filter;
pub mod geojson;
pub mod selection;
pub mod style;
pub mod view;

pub use aggregate::{OrderedGroups, aggregate, districts_from, provinces_from};
pub use atlas::RegionAtlas;
pub use error::{RegionMapError, Result};
pub use filter::{filter_visible, visible_features};
pub use geojson::{regions_from_geojson, regions_to_geojson};
pub use selection::{SelectionState, StyleState};
pub use style::{PolygonStyle, RegionStyles, district_color, region_color, styles_for};
pub use view::MapView;

pub use regionmap_types::bounds::LatLngBounds;
pub use regionmap_types::region::{AdminLevel, Region, RegionGeometry, RegionProperties};

pub use geo::{MultiPolygon, Polygon};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{RegionMapError, Result};

    pub use crate::{AdminLevel, LatLngBounds, Region, RegionGeometry, RegionProperties};

    pub use crate::{MapView, RegionAtlas, SelectionState, StyleState};

    pub use crate::aggregate::{districts_from, provinces_from};

    pub use crate::filter::{filter_visible, visible_features};

    pub use crate::geojson::{regions_from_geojson, regions_to_geojson};
}
