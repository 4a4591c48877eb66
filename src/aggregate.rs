//! Boundary aggregation: grouping fine-grained regions by an ancestry key and
//! merging each group's polygons into one coarser boundary.
//!
//! This is the offline half of the pipeline. It runs once per dataset refresh
//! and its output becomes the viewport filter's input. Aggregation is
//! deterministic for a fixed input ordering: groups keep first-seen key order
//! and the union folds members left to right in input order.

use crate::error::RegionMapError;
use geo::{BooleanOps, CoordsIter, MultiPolygon, Validation};
use regionmap_types::region::{AdminLevel, Region, RegionGeometry, RegionProperties};
use rustc_hash::FxHashMap;

/// Insertion-ordered grouping of regions by key.
///
/// Keys keep first-encountered order and members keep input order within each
/// group, so downstream output never depends on hash iteration order.
pub struct OrderedGroups<'a> {
    groups: Vec<(String, Vec<&'a Region>)>,
    index: FxHashMap<String, usize>,
}

impl<'a> OrderedGroups<'a> {
    pub fn new() -> Self {
        Self {
            groups: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// Append a member, creating the group on first sight of the key.
    pub fn push(&mut self, key: &str, region: &'a Region) {
        match self.index.get(key) {
            Some(&slot) => self.groups[slot].1.push(region),
            None => {
                self.index.insert(key.to_string(), self.groups.len());
                self.groups.push((key.to_string(), vec![region]));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups in first-seen key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[&'a Region])> {
        self.groups
            .iter()
            .map(|(key, members)| (key.as_str(), members.as_slice()))
    }
}

impl Default for OrderedGroups<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregate regions into the next coarser level.
///
/// Groups `regions` by `group_key`, unions each group's geometries, and emits
/// one region per distinct key in first-seen order. A group of one passes its
/// geometry through unchanged. A member whose geometry cannot participate in
/// a union is skipped with a warning and the fold continues; a group whose
/// members all fail is omitted from the output.
///
/// The emitted region's display name is composed from the first member's
/// ancestry names, and its level is one step coarser than the member's.
pub fn aggregate<F>(regions: &[Region], group_key: F) -> Vec<Region>
where
    F: Fn(&Region) -> &str,
{
    let mut groups = OrderedGroups::new();
    for region in regions {
        groups.push(group_key(region), region);
    }

    let mut output = Vec::with_capacity(groups.len());
    for (key, members) in groups.iter() {
        let first = members[0];
        let Some(target) = first.level().coarser() else {
            log::warn!("group '{}' is already at the coarsest level, skipping", key);
            continue;
        };

        let geometry = if members.len() == 1 {
            // Nothing to merge; reuse the sole geometry bit for bit.
            first.geometry().clone()
        } else {
            match union_members(key, members) {
                Some(geometry) => geometry,
                None => {
                    log::warn!("group '{}' has no members left to union, omitting", key);
                    continue;
                }
            }
        };

        match Region::new(target, coarser_properties(target, key, first), geometry) {
            Some(region) => output.push(region),
            None => log::warn!("group '{}' produced an empty union, omitting", key),
        }
    }
    output
}

/// District regions from fine regions, grouped by the district ancestry key.
pub fn districts_from(fine: &[Region]) -> Vec<Region> {
    aggregate(fine, |region| region.district_code())
}

/// Province regions from district regions, grouped by the province ancestry key.
pub fn provinces_from(districts: &[Region]) -> Vec<Region> {
    aggregate(districts, |region| region.province_code())
}

/// Left-to-right pairwise union over the group's geometries.
///
/// Returns `None` when every member failed the validity gate or the union
/// came out empty.
fn union_members(key: &str, members: &[&Region]) -> Option<RegionGeometry> {
    let mut acc: Option<MultiPolygon<f64>> = None;
    for (index, member) in members.iter().enumerate() {
        if let Err(err) = validate_member(key, index, member) {
            log::warn!("skipping region '{}': {}", member.code(), err);
            continue;
        }
        let next = member.geometry().to_multi_polygon();
        acc = Some(match acc {
            Some(current) => current.union(&next),
            None => next,
        });
    }

    let mut polygons = acc?.0;
    if polygons.is_empty() {
        return None;
    }
    Some(if polygons.len() == 1 {
        RegionGeometry::Polygon(polygons.remove(0))
    } else {
        RegionGeometry::MultiPolygon(MultiPolygon::new(polygons))
    })
}

/// Gate a member before it enters the union fold.
///
/// Rejects non-finite coordinates and geometry the clipping primitive cannot
/// resolve (open rings, self-intersections, degenerate rings).
fn validate_member(group: &str, index: usize, member: &Region) -> crate::error::Result<()> {
    let invalid_geometry = || RegionMapError::InvalidGeometry {
        group: group.to_string(),
        index,
    };

    let finite = match member.geometry() {
        RegionGeometry::Polygon(polygon) => coords_finite(polygon.coords_iter()),
        RegionGeometry::MultiPolygon(multi) => coords_finite(multi.coords_iter()),
    };
    if !finite {
        return Err(invalid_geometry());
    }

    let valid = match member.geometry() {
        RegionGeometry::Polygon(polygon) => polygon.is_valid(),
        RegionGeometry::MultiPolygon(multi) => multi.is_valid(),
    };
    if !valid {
        return Err(invalid_geometry());
    }
    Ok(())
}

fn coords_finite(mut coords: impl Iterator<Item = geo::Coord<f64>>) -> bool {
    coords.all(|coord| coord.x.is_finite() && coord.y.is_finite())
}

fn coarser_properties(target: AdminLevel, key: &str, first: &Region) -> RegionProperties {
    match target {
        AdminLevel::District => RegionProperties {
            code: key.to_string(),
            district_code: key.to_string(),
            province_code: first.province_code().to_string(),
            display_name: format!("{} {}", first.province_name(), first.district_name()),
            province_name: first.province_name().to_string(),
            district_name: first.district_name().to_string(),
        },
        _ => RegionProperties {
            code: key.to_string(),
            district_code: key.to_string(),
            province_code: key.to_string(),
            display_name: first.province_name().to_string(),
            province_name: first.province_name().to_string(),
            district_name: String::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Polygon, polygon};

    fn square(min_lng: f64, min_lat: f64, max_lng: f64, max_lat: f64) -> Polygon<f64> {
        polygon![
            (x: min_lng, y: min_lat),
            (x: max_lng, y: min_lat),
            (x: max_lng, y: max_lat),
            (x: min_lng, y: max_lat),
            (x: min_lng, y: min_lat),
        ]
    }

    fn fine(code: &str, district: &str, province: &str, geometry: Polygon<f64>) -> Region {
        Region::new(
            AdminLevel::Fine,
            RegionProperties::new(code, district, province).with_names(
                &format!("Province {} {}", district, code),
                "Province",
                &format!("District {}", district),
            ),
            geometry.into(),
        )
        .unwrap()
    }

    fn nan_fine(code: &str, district: &str, province: &str) -> Region {
        fine(code, district, province, square(f64::NAN, 0.0, 1.0, 1.0))
    }

    #[test]
    fn test_ordered_groups_first_seen_order() {
        let a = fine("a", "D2", "P1", square(0.0, 0.0, 1.0, 1.0));
        let b = fine("b", "D1", "P1", square(1.0, 0.0, 2.0, 1.0));
        let c = fine("c", "D2", "P1", square(2.0, 0.0, 3.0, 1.0));

        let mut groups = OrderedGroups::new();
        for region in [&a, &b, &c] {
            groups.push(region.district_code(), region);
        }

        let keys: Vec<&str> = groups.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["D2", "D1"]);

        let (_, d2_members) = groups.iter().next().unwrap();
        let codes: Vec<&str> = d2_members.iter().map(|r| r.code()).collect();
        assert_eq!(codes, vec!["a", "c"]);
    }

    #[test]
    fn test_one_output_region_per_distinct_key() {
        let regions = vec![
            fine("a", "D1", "P1", square(0.0, 0.0, 1.0, 1.0)),
            fine("b", "D1", "P1", square(1.0, 0.0, 2.0, 1.0)),
            fine("c", "D2", "P1", square(4.0, 0.0, 5.0, 1.0)),
            fine("d", "D2", "P1", square(5.0, 0.0, 6.0, 1.0)),
        ];

        let districts = districts_from(&regions);
        let codes: Vec<&str> = districts.iter().map(|r| r.code()).collect();
        assert_eq!(codes, vec!["D1", "D2"]);
        assert!(districts.iter().all(|r| r.level() == AdminLevel::District));
    }

    #[test]
    fn test_single_member_geometry_unchanged() {
        let geometry = square(126.9, 37.5, 127.0, 37.6);
        let regions = vec![fine("a", "D1", "P1", geometry.clone())];

        let districts = districts_from(&regions);
        assert_eq!(districts.len(), 1);
        assert_eq!(
            districts[0].geometry(),
            &RegionGeometry::Polygon(geometry)
        );
    }

    #[test]
    fn test_union_bounding_box_of_three_members() {
        // Boxes (0,0)-(1,1), (1,0)-(2,1) and (0.5,0.5)-(1.5,1.5) merge into
        // one district whose box is (0,0)-(2,1.5).
        let regions = vec![
            fine("a", "D1", "P1", square(0.0, 0.0, 1.0, 1.0)),
            fine("b", "D1", "P1", square(1.0, 0.0, 2.0, 1.0)),
            fine("c", "D1", "P1", square(0.5, 0.5, 1.5, 1.5)),
        ];

        let districts = districts_from(&regions);
        assert_eq!(districts.len(), 1);

        let bounds = districts[0].bounds();
        assert_eq!(bounds.min_lng, 0.0);
        assert_eq!(bounds.min_lat, 0.0);
        assert_eq!(bounds.max_lng, 2.0);
        assert_eq!(bounds.max_lat, 1.5);
    }

    #[test]
    fn test_union_box_contains_every_member_box() {
        let regions = vec![
            fine("a", "D1", "P1", square(0.0, 0.0, 1.0, 1.0)),
            fine("b", "D1", "P1", square(0.5, 0.5, 2.5, 1.5)),
            fine("c", "D1", "P1", square(2.0, 1.0, 3.0, 3.0)),
        ];

        let districts = districts_from(&regions);
        assert_eq!(districts.len(), 1);
        for member in &regions {
            assert!(districts[0].bounds().contains(member.bounds()));
        }
    }

    #[test]
    fn test_disjoint_members_union_to_multi_polygon() {
        let regions = vec![
            fine("mainland", "D1", "P1", square(0.0, 0.0, 1.0, 1.0)),
            fine("island", "D1", "P1", square(5.0, 5.0, 6.0, 6.0)),
        ];

        let districts = districts_from(&regions);
        assert_eq!(districts.len(), 1);
        assert_eq!(districts[0].geometry().polygon_count(), 2);
    }

    #[test]
    fn test_invalid_member_skipped_group_survives() {
        let regions = vec![
            fine("a", "D1", "P1", square(0.0, 0.0, 1.0, 1.0)),
            nan_fine("broken", "D1", "P1"),
            fine("c", "D1", "P1", square(1.0, 0.0, 2.0, 1.0)),
        ];

        let districts = districts_from(&regions);
        assert_eq!(districts.len(), 1);

        let bounds = districts[0].bounds();
        assert_eq!(bounds.min_lng, 0.0);
        assert_eq!(bounds.max_lng, 2.0);
        assert_eq!(bounds.max_lat, 1.0);
    }

    #[test]
    fn test_group_of_only_invalid_members_omitted() {
        let regions = vec![
            nan_fine("x", "D1", "P1"),
            nan_fine("y", "D1", "P1"),
            fine("a", "D2", "P1", square(0.0, 0.0, 1.0, 1.0)),
        ];

        let districts = districts_from(&regions);
        let codes: Vec<&str> = districts.iter().map(|r| r.code()).collect();
        assert_eq!(codes, vec!["D2"]);
    }

    #[test]
    fn test_district_display_name_composed_from_ancestry() {
        let regions = vec![
            fine("a", "D1", "P1", square(0.0, 0.0, 1.0, 1.0)),
            fine("b", "D1", "P1", square(1.0, 0.0, 2.0, 1.0)),
        ];

        let districts = districts_from(&regions);
        assert_eq!(districts[0].display_name(), "Province District D1");
        assert_eq!(districts[0].parent_code(), Some("P1"));
    }

    #[test]
    fn test_provinces_from_districts() {
        let fine_regions = vec![
            fine("a", "D1", "P1", square(0.0, 0.0, 1.0, 1.0)),
            fine("b", "D2", "P1", square(1.0, 0.0, 2.0, 1.0)),
            fine("c", "D3", "P2", square(8.0, 0.0, 9.0, 1.0)),
        ];

        let districts = districts_from(&fine_regions);
        let provinces = provinces_from(&districts);

        let codes: Vec<&str> = provinces.iter().map(|r| r.code()).collect();
        assert_eq!(codes, vec!["P1", "P2"]);
        assert!(provinces.iter().all(|r| r.level() == AdminLevel::Province));
        assert_eq!(provinces[0].display_name(), "Province");
        assert_eq!(provinces[0].parent_code(), None);
    }

    #[test]
    fn test_aggregation_is_deterministic() {
        let regions: Vec<Region> = (0..20)
            .map(|i| {
                let district = format!("D{}", i % 5);
                fine(
                    &format!("r{}", i),
                    &district,
                    "P1",
                    square(i as f64, 0.0, i as f64 + 1.5, 1.0),
                )
            })
            .collect();

        let first = districts_from(&regions);
        let second = districts_from(&regions);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_input() {
        assert!(districts_from(&[]).is_empty());
    }
}
