use crate::bounds::LatLngBounds;
use geo::{BoundingRect, MultiPolygon, Polygon};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Granularity of an administrative region.
///
/// Ordered from most granular (`Fine`, neighborhood) to least granular
/// (`Province`). Region codes are only comparable within a single level.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum AdminLevel {
    /// Neighborhood-level region, the finest granularity in the source data.
    #[default]
    Fine,
    /// City district, aggregated from its neighborhoods.
    District,
    /// Province or metropolitan city, aggregated from its districts.
    Province,
}

impl AdminLevel {
    /// The next level up, or `None` for `Province`.
    pub fn coarser(self) -> Option<AdminLevel> {
        match self {
            AdminLevel::Fine => Some(AdminLevel::District),
            AdminLevel::District => Some(AdminLevel::Province),
            AdminLevel::Province => None,
        }
    }

    /// The admin level to display for a map zoom level.
    ///
    /// Provinces at zoom 0-9, districts at 10-12, neighborhoods from 13 up.
    ///
    /// # Examples
    ///
    /// ```
    /// use regionmap_types::region::AdminLevel;
    ///
    /// assert_eq!(AdminLevel::for_zoom(8), AdminLevel::Province);
    /// assert_eq!(AdminLevel::for_zoom(11), AdminLevel::District);
    /// assert_eq!(AdminLevel::for_zoom(14), AdminLevel::Fine);
    /// ```
    pub fn for_zoom(zoom: u8) -> AdminLevel {
        if zoom <= 9 {
            AdminLevel::Province
        } else if zoom <= 12 {
            AdminLevel::District
        } else {
            AdminLevel::Fine
        }
    }
}

impl fmt::Display for AdminLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AdminLevel::Fine => "fine",
            AdminLevel::District => "district",
            AdminLevel::Province => "province",
        };
        write!(f, "{}", name)
    }
}

/// Geometry of a region: a single polygon or a multi-polygon.
///
/// Each polygon is an ordered sequence of closed rings (first ring outer,
/// subsequent rings holes) with coordinates in `[longitude, latitude]` order.
/// Never mutated after construction; a new geometry means a new `Region`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RegionGeometry {
    Polygon(Polygon<f64>),
    MultiPolygon(MultiPolygon<f64>),
}

impl RegionGeometry {
    /// Bounding box over every ring point, or `None` for empty geometry.
    pub fn bounds(&self) -> Option<LatLngBounds> {
        let rect = match self {
            RegionGeometry::Polygon(polygon) => polygon.bounding_rect(),
            RegionGeometry::MultiPolygon(multi) => multi.bounding_rect(),
        }?;
        Some(LatLngBounds::from_rect(&rect))
    }

    /// Number of polygons (1 for `Polygon`, member count for `MultiPolygon`).
    pub fn polygon_count(&self) -> usize {
        match self {
            RegionGeometry::Polygon(_) => 1,
            RegionGeometry::MultiPolygon(multi) => multi.0.len(),
        }
    }

    /// Copy into a `MultiPolygon`, the common shape for union folds.
    pub fn to_multi_polygon(&self) -> MultiPolygon<f64> {
        match self {
            RegionGeometry::Polygon(polygon) => MultiPolygon::new(vec![polygon.clone()]),
            RegionGeometry::MultiPolygon(multi) => multi.clone(),
        }
    }
}

impl From<Polygon<f64>> for RegionGeometry {
    fn from(polygon: Polygon<f64>) -> Self {
        RegionGeometry::Polygon(polygon)
    }
}

impl From<MultiPolygon<f64>> for RegionGeometry {
    fn from(multi: MultiPolygon<f64>) -> Self {
        RegionGeometry::MultiPolygon(multi)
    }
}

/// Identifying properties of a region, mirroring the feature properties of
/// the source datasets.
///
/// `district_code` and `province_code` carry the ancestry keys used for
/// aggregation: for a fine region they name its district and province, for a
/// district its own code and its province, for a province its own code twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionProperties {
    /// Unique identifier at this region's level, stable across runs.
    pub code: String,
    /// District-level ancestry key.
    pub district_code: String,
    /// Province-level ancestry key.
    pub province_code: String,
    /// Human-readable name, composed from ancestor names ("Province District").
    pub display_name: String,
    /// Name of the province ancestor.
    pub province_name: String,
    /// Name of the district ancestor; empty for province-level regions.
    pub district_name: String,
}

impl RegionProperties {
    /// Properties with the given keys and empty display names.
    pub fn new(
        code: impl Into<String>,
        district_code: impl Into<String>,
        province_code: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            district_code: district_code.into(),
            province_code: province_code.into(),
            display_name: String::new(),
            province_name: String::new(),
            district_name: String::new(),
        }
    }

    /// Attach display names.
    pub fn with_names(
        mut self,
        display_name: impl Into<String>,
        province_name: impl Into<String>,
        district_name: impl Into<String>,
    ) -> Self {
        self.display_name = display_name.into();
        self.province_name = province_name.into();
        self.district_name = district_name.into();
        self
    }
}

/// An immutable administrative region at one level.
///
/// The bounding box is computed once at construction and cached alongside the
/// geometry, so per-frame viewport tests never rescan ring coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    level: AdminLevel,
    properties: RegionProperties,
    geometry: RegionGeometry,
    bounds: LatLngBounds,
}

impl Region {
    /// Construct a region, deriving its bounding box from the geometry.
    ///
    /// Returns `None` when the geometry contains no coordinates.
    pub fn new(
        level: AdminLevel,
        properties: RegionProperties,
        geometry: RegionGeometry,
    ) -> Option<Self> {
        let bounds = geometry.bounds()?;
        Some(Self {
            level,
            properties,
            geometry,
            bounds,
        })
    }

    pub fn level(&self) -> AdminLevel {
        self.level
    }

    /// Unique identifier at this region's level.
    pub fn code(&self) -> &str {
        &self.properties.code
    }

    /// The aggregation key one level up, or `None` for provinces.
    pub fn parent_code(&self) -> Option<&str> {
        match self.level {
            AdminLevel::Fine => Some(&self.properties.district_code),
            AdminLevel::District => Some(&self.properties.province_code),
            AdminLevel::Province => None,
        }
    }

    pub fn district_code(&self) -> &str {
        &self.properties.district_code
    }

    pub fn province_code(&self) -> &str {
        &self.properties.province_code
    }

    pub fn display_name(&self) -> &str {
        &self.properties.display_name
    }

    pub fn province_name(&self) -> &str {
        &self.properties.province_name
    }

    pub fn district_name(&self) -> &str {
        &self.properties.district_name
    }

    pub fn properties(&self) -> &RegionProperties {
        &self.properties
    }

    pub fn geometry(&self) -> &RegionGeometry {
        &self.geometry
    }

    /// Cached bounding box of the geometry.
    pub fn bounds(&self) -> &LatLngBounds {
        &self.bounds
    }
}
