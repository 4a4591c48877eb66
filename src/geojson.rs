//! GeoJSON interchange for region datasets.
//!
//! Datasets arrive as `FeatureCollection` envelopes with `[longitude,
//! latitude]` ring coordinates; aggregator output can be written back to the
//! same shape. All parsing errors carry the offending feature index.

use crate::error::{RegionMapError, Result};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value};
use regionmap_types::region::{AdminLevel, Region, RegionGeometry, RegionProperties};
use serde_json::{Map, Value as JsonValue};

/// Parses a GeoJSON `FeatureCollection` into regions at the given level.
///
/// Feature properties must carry `code`, plus `parentCode` for fine and
/// district features and `provinceCode` for fine features; `displayName`,
/// `provinceName` and `districtName` are optional. Geometry must be a
/// `Polygon` or `MultiPolygon`.
pub fn regions_from_geojson(input: &str, level: AdminLevel) -> Result<Vec<Region>> {
    let geojson: GeoJson = input
        .parse()
        .map_err(|e| RegionMapError::InvalidInput(format!("failed to parse GeoJSON: {}", e)))?;

    let collection = match geojson {
        GeoJson::FeatureCollection(collection) => collection,
        _ => {
            return Err(RegionMapError::InvalidInput(
                "expected a FeatureCollection envelope".to_string(),
            ));
        }
    };

    let mut regions = Vec::with_capacity(collection.features.len());
    for (index, feature) in collection.features.into_iter().enumerate() {
        regions.push(region_from_feature(feature, level, index)?);
    }
    Ok(regions)
}

/// Serializes regions back to a GeoJSON `FeatureCollection` string.
pub fn regions_to_geojson(regions: &[Region]) -> Result<String> {
    let features: Vec<Feature> = regions.iter().map(feature_from_region).collect();
    let collection = FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    };

    serde_json::to_string(&collection).map_err(|e| {
        RegionMapError::Serialization(format!("failed to serialize feature collection: {}", e))
    })
}

fn region_from_feature(feature: Feature, level: AdminLevel, index: usize) -> Result<Region> {
    let props = feature.properties.ok_or_else(|| {
        RegionMapError::InvalidInput(format!("feature {} has no properties", index))
    })?;
    let properties = properties_for_level(level, &props, index)?;

    let geometry = feature.geometry.ok_or_else(|| {
        RegionMapError::InvalidInput(format!("feature {} has no geometry", index))
    })?;
    let geometry = parse_geometry(geometry, index)?;

    Region::new(level, properties, geometry).ok_or_else(|| {
        RegionMapError::InvalidInput(format!("feature {} has empty geometry", index))
    })
}

fn properties_for_level(
    level: AdminLevel,
    props: &Map<String, JsonValue>,
    index: usize,
) -> Result<RegionProperties> {
    let code = require_string(props, "code", index)?;
    let parent = optional_string(props, "parentCode");

    let (district_code, province_code) = match level {
        AdminLevel::Fine => {
            let district = parent.ok_or_else(|| missing_property("parentCode", index))?;
            let province = optional_string(props, "provinceCode")
                .ok_or_else(|| missing_property("provinceCode", index))?;
            (district, province)
        }
        AdminLevel::District => {
            let province = parent.ok_or_else(|| missing_property("parentCode", index))?;
            (code.clone(), province)
        }
        AdminLevel::Province => (code.clone(), code.clone()),
    };

    Ok(RegionProperties {
        code,
        district_code,
        province_code,
        display_name: optional_string(props, "displayName").unwrap_or_default(),
        province_name: optional_string(props, "provinceName").unwrap_or_default(),
        district_name: optional_string(props, "districtName").unwrap_or_default(),
    })
}

fn require_string(props: &Map<String, JsonValue>, key: &str, index: usize) -> Result<String> {
    optional_string(props, key).ok_or_else(|| missing_property(key, index))
}

fn optional_string(props: &Map<String, JsonValue>, key: &str) -> Option<String> {
    props
        .get(key)
        .and_then(|value| value.as_str())
        .map(|value| value.to_string())
}

fn missing_property(key: &str, index: usize) -> RegionMapError {
    RegionMapError::InvalidInput(format!("feature {} is missing property '{}'", index, key))
}

fn parse_geometry(geometry: Geometry, index: usize) -> Result<RegionGeometry> {
    match geometry.value {
        Value::Polygon(rings) => Ok(RegionGeometry::Polygon(parse_polygon(rings, index)?)),
        Value::MultiPolygon(polygons) => {
            let polygons = polygons
                .into_iter()
                .map(|rings| parse_polygon(rings, index))
                .collect::<Result<Vec<_>>>()?;
            Ok(RegionGeometry::MultiPolygon(geo::MultiPolygon::new(
                polygons,
            )))
        }
        _ => Err(RegionMapError::InvalidInput(format!(
            "feature {} geometry is not a Polygon or MultiPolygon",
            index
        ))),
    }
}

fn parse_polygon(rings: Vec<Vec<Vec<f64>>>, index: usize) -> Result<geo::Polygon<f64>> {
    let mut rings = rings.into_iter();
    let Some(first) = rings.next() else {
        return Err(RegionMapError::InvalidInput(format!(
            "feature {} polygon has no rings",
            index
        )));
    };

    let exterior = parse_ring(first, index)?;
    let interiors = rings
        .map(|ring| parse_ring(ring, index))
        .collect::<Result<Vec<_>>>()?;
    Ok(geo::Polygon::new(exterior, interiors))
}

fn parse_ring(ring: Vec<Vec<f64>>, index: usize) -> Result<geo::LineString<f64>> {
    let coords = ring
        .into_iter()
        .map(|position| {
            if position.len() < 2 {
                return Err(RegionMapError::InvalidInput(format!(
                    "feature {} has a coordinate with fewer than 2 values",
                    index
                )));
            }
            Ok(geo::Coord {
                x: position[0],
                y: position[1],
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(geo::LineString::from(coords))
}

fn feature_from_region(region: &Region) -> Feature {
    let mut props = Map::new();
    props.insert(
        "code".to_string(),
        JsonValue::String(region.code().to_string()),
    );
    if let Some(parent) = region.parent_code() {
        props.insert("parentCode".to_string(), JsonValue::String(parent.to_string()));
    }
    props.insert(
        "provinceCode".to_string(),
        JsonValue::String(region.province_code().to_string()),
    );
    props.insert(
        "displayName".to_string(),
        JsonValue::String(region.display_name().to_string()),
    );
    props.insert(
        "provinceName".to_string(),
        JsonValue::String(region.province_name().to_string()),
    );
    props.insert(
        "districtName".to_string(),
        JsonValue::String(region.district_name().to_string()),
    );

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(geometry_value(region.geometry()))),
        id: None,
        properties: Some(props),
        foreign_members: None,
    }
}

fn geometry_value(geometry: &RegionGeometry) -> Value {
    match geometry {
        RegionGeometry::Polygon(polygon) => Value::Polygon(polygon_rings(polygon)),
        RegionGeometry::MultiPolygon(multi) => {
            Value::MultiPolygon(multi.0.iter().map(polygon_rings).collect())
        }
    }
}

fn polygon_rings(polygon: &geo::Polygon<f64>) -> Vec<Vec<Vec<f64>>> {
    let mut rings = Vec::with_capacity(1 + polygon.interiors().len());
    rings.push(ring_positions(polygon.exterior()));
    for interior in polygon.interiors() {
        rings.push(ring_positions(interior));
    }
    rings
}

fn ring_positions(ring: &geo::LineString<f64>) -> Vec<Vec<f64>> {
    ring.coords().map(|coord| vec![coord.x, coord.y]).collect()
}
