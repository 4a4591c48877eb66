//! Viewport culling over cached region bounds.
//!
//! Runs on every pan/zoom callback, so the work per region is a single AABB
//! test against the viewport. Bounding boxes were computed when each region
//! was constructed; nothing here rescans geometry or allocates beyond the
//! output list.

use regionmap_types::bounds::LatLngBounds;
use regionmap_types::region::Region;

/// Regions whose bounding box intersects the viewport, in input order.
///
/// With no viewport yet known (`None`), every region is returned unchanged:
/// the map widget has not reported its first bounds, so there is no
/// constraint to apply.
///
/// The bounding-box test over-approximates: a region can be included whose
/// polygon does not actually touch the viewport. A visible region is never
/// dropped.
///
/// # Examples
///
/// ```
/// use geo::polygon;
/// use regionmap::{AdminLevel, LatLngBounds, Region, RegionProperties, filter_visible};
///
/// let geometry = polygon![
///     (x: 126.9, y: 37.5),
///     (x: 127.0, y: 37.5),
///     (x: 127.0, y: 37.6),
///     (x: 126.9, y: 37.6),
///     (x: 126.9, y: 37.5),
/// ];
/// let region = Region::new(
///     AdminLevel::Fine,
///     RegionProperties::new("1101053", "11010", "11"),
///     geometry.into(),
/// )
/// .unwrap();
///
/// let viewport = LatLngBounds::new(37.4, 37.7, 126.8, 127.1);
/// let visible = filter_visible(std::slice::from_ref(&region), Some(&viewport));
/// assert_eq!(visible.len(), 1);
/// ```
pub fn filter_visible<'a>(
    regions: &'a [Region],
    viewport: Option<&LatLngBounds>,
) -> Vec<&'a Region> {
    match viewport {
        None => regions.iter().collect(),
        Some(viewport) => regions
            .iter()
            .filter(|region| region.bounds().intersects(viewport))
            .collect(),
    }
}

/// `filter_visible` over an optional dataset.
///
/// Returns an empty list when no dataset is loaded yet.
pub fn visible_features<'a>(
    dataset: Option<&'a [Region]>,
    viewport: Option<&LatLngBounds>,
) -> Vec<&'a Region> {
    match dataset {
        None => Vec::new(),
        Some(regions) => filter_visible(regions, viewport),
    }
}
