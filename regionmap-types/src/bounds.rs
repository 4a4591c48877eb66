use geo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// An axis-aligned latitude/longitude bounding box.
///
/// Serves two roles: the derived bounding box of a region's geometry, and the
/// viewport rectangle reported by the map widget. Coordinates are decimal
/// degrees; no projection is applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    /// Southern boundary
    pub min_lat: f64,
    /// Northern boundary
    pub max_lat: f64,
    /// Western boundary
    pub min_lng: f64,
    /// Eastern boundary
    pub max_lng: f64,
}

impl LatLngBounds {
    /// Create a new bounding box from minimum and maximum coordinates.
    ///
    /// # Arguments
    ///
    /// * `min_lat` - Minimum latitude (southern boundary)
    /// * `max_lat` - Maximum latitude (northern boundary)
    /// * `min_lng` - Minimum longitude (western boundary)
    /// * `max_lng` - Maximum longitude (eastern boundary)
    ///
    /// # Examples
    ///
    /// ```
    /// use regionmap_types::bounds::LatLngBounds;
    ///
    /// let bounds = LatLngBounds::new(37.42, 37.70, 126.76, 127.18);
    /// ```
    pub fn new(min_lat: f64, max_lat: f64, min_lng: f64, max_lng: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        }
    }

    /// Create a bounding box from a `geo::Rect` (x = longitude, y = latitude).
    pub fn from_rect(rect: &Rect<f64>) -> Self {
        Self {
            min_lat: rect.min().y,
            max_lat: rect.max().y,
            min_lng: rect.min().x,
            max_lng: rect.max().x,
        }
    }

    /// Convert to a `geo::Rect` (x = longitude, y = latitude).
    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            geo::coord! { x: self.min_lng, y: self.min_lat },
            geo::coord! { x: self.max_lng, y: self.max_lat },
        )
    }

    /// Longitude span of the box.
    pub fn width(&self) -> f64 {
        self.max_lng - self.min_lng
    }

    /// Latitude span of the box.
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Center point of the box.
    pub fn center(&self) -> Point<f64> {
        Point::new(
            (self.min_lng + self.max_lng) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        )
    }

    /// Check if a point is contained within this box (boundary inclusive).
    pub fn contains_point(&self, point: &Point<f64>) -> bool {
        point.y() >= self.min_lat
            && point.y() <= self.max_lat
            && point.x() >= self.min_lng
            && point.x() <= self.max_lng
    }

    /// Check if this box entirely contains another box.
    pub fn contains(&self, other: &LatLngBounds) -> bool {
        other.min_lat >= self.min_lat
            && other.max_lat <= self.max_lat
            && other.min_lng >= self.min_lng
            && other.max_lng <= self.max_lng
    }

    /// Check if this box intersects with another.
    ///
    /// The two rectangles intersect unless one is entirely above, below, left
    /// of, or right of the other; boxes that merely touch at an edge or a
    /// corner count as intersecting.
    ///
    /// # Examples
    ///
    /// ```
    /// use regionmap_types::bounds::LatLngBounds;
    ///
    /// let viewport = LatLngBounds::new(10.0, 20.0, 10.0, 20.0);
    /// let overlapping = LatLngBounds::new(19.0, 25.0, 19.0, 25.0);
    /// let disjoint = LatLngBounds::new(5.0, 6.0, 5.0, 6.0);
    ///
    /// assert!(viewport.intersects(&overlapping));
    /// assert!(!viewport.intersects(&disjoint));
    /// ```
    pub fn intersects(&self, other: &LatLngBounds) -> bool {
        !(self.max_lat < other.min_lat
            || self.min_lat > other.max_lat
            || self.max_lng < other.min_lng
            || self.min_lng > other.max_lng)
    }

    /// Smallest box covering both this box and another.
    pub fn merged(&self, other: &LatLngBounds) -> Self {
        Self {
            min_lat: self.min_lat.min(other.min_lat),
            max_lat: self.max_lat.max(other.max_lat),
            min_lng: self.min_lng.min(other.min_lng),
            max_lng: self.max_lng.max(other.max_lng),
        }
    }
}
