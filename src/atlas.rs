//! Per-level region datasets, loaded wholesale and immutable afterwards.

use crate::aggregate::{districts_from, provinces_from};
use crate::error::{RegionMapError, Result};
use regionmap_types::region::{AdminLevel, Region};
use rustc_hash::FxHashMap;

struct LevelDataset {
    regions: Vec<Region>,
    by_code: FxHashMap<String, usize>,
}

impl LevelDataset {
    fn new(regions: Vec<Region>) -> Self {
        let by_code = regions
            .iter()
            .enumerate()
            .map(|(index, region)| (region.code().to_string(), index))
            .collect();
        Self { regions, by_code }
    }
}

/// The three per-level datasets behind the viewport filter.
///
/// Each dataset is loaded as a whole and never mutated; the active one swaps
/// only when the admin level changes. Requesting a level that was never
/// loaded is a caller bug and fails fast with [`RegionMapError::UnknownLevel`]
/// instead of silently rendering a blank map.
#[derive(Default)]
pub struct RegionAtlas {
    datasets: [Option<LevelDataset>; 3],
}

impl RegionAtlas {
    /// An atlas with no datasets loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build all three datasets from fine regions alone, aggregating the
    /// district and province levels.
    pub fn from_fine(fine: Vec<Region>) -> Result<Self> {
        let districts = districts_from(&fine);
        let provinces = provinces_from(&districts);

        let mut atlas = Self::new();
        atlas.load(AdminLevel::Fine, fine)?;
        atlas.load(AdminLevel::District, districts)?;
        atlas.load(AdminLevel::Province, provinces)?;
        Ok(atlas)
    }

    /// Load (or replace) the dataset for one level.
    ///
    /// Every region must already carry that level; a mismatch means the
    /// caller wired datasets to the wrong slot.
    pub fn load(&mut self, level: AdminLevel, regions: Vec<Region>) -> Result<()> {
        if let Some(mismatched) = regions.iter().find(|region| region.level() != level) {
            return Err(RegionMapError::InvalidInput(format!(
                "region '{}' has level '{}', expected '{}'",
                mismatched.code(),
                mismatched.level(),
                level
            )));
        }
        self.datasets[level as usize] = Some(LevelDataset::new(regions));
        Ok(())
    }

    /// Whether a dataset for this level has been loaded.
    pub fn is_loaded(&self, level: AdminLevel) -> bool {
        self.datasets[level as usize].is_some()
    }

    /// The dataset for one level, in load order.
    pub fn dataset(&self, level: AdminLevel) -> Result<&[Region]> {
        self.datasets[level as usize]
            .as_ref()
            .map(|dataset| dataset.regions.as_slice())
            .ok_or(RegionMapError::UnknownLevel(level))
    }

    /// Look up one region by code within a level.
    pub fn find(&self, level: AdminLevel, code: &str) -> Result<Option<&Region>> {
        let dataset = self.datasets[level as usize]
            .as_ref()
            .ok_or(RegionMapError::UnknownLevel(level))?;
        Ok(dataset
            .by_code
            .get(code)
            .map(|&index| &dataset.regions[index]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;
    use regionmap_types::region::RegionProperties;

    fn fine(code: &str, district: &str, province: &str, offset: f64) -> Region {
        Region::new(
            AdminLevel::Fine,
            RegionProperties::new(code, district, province),
            polygon![
                (x: offset, y: 0.0),
                (x: offset + 1.0, y: 0.0),
                (x: offset + 1.0, y: 1.0),
                (x: offset, y: 1.0),
                (x: offset, y: 0.0),
            ]
            .into(),
        )
        .unwrap()
    }

    #[test]
    fn test_unloaded_level_fails_fast() {
        let atlas = RegionAtlas::new();
        assert!(matches!(
            atlas.dataset(AdminLevel::District),
            Err(RegionMapError::UnknownLevel(AdminLevel::District))
        ));
        assert!(matches!(
            atlas.find(AdminLevel::Fine, "x"),
            Err(RegionMapError::UnknownLevel(AdminLevel::Fine))
        ));
    }

    #[test]
    fn test_from_fine_builds_all_levels() {
        let atlas = RegionAtlas::from_fine(vec![
            fine("a", "D1", "P1", 0.0),
            fine("b", "D1", "P1", 1.0),
            fine("c", "D2", "P1", 4.0),
        ])
        .unwrap();

        assert_eq!(atlas.dataset(AdminLevel::Fine).unwrap().len(), 3);
        assert_eq!(atlas.dataset(AdminLevel::District).unwrap().len(), 2);
        assert_eq!(atlas.dataset(AdminLevel::Province).unwrap().len(), 1);
    }

    #[test]
    fn test_find_by_code() {
        let atlas = RegionAtlas::from_fine(vec![fine("a", "D1", "P1", 0.0)]).unwrap();

        let region = atlas.find(AdminLevel::Fine, "a").unwrap();
        assert_eq!(region.map(|r| r.code()), Some("a"));
        assert!(atlas.find(AdminLevel::Fine, "missing").unwrap().is_none());
    }

    #[test]
    fn test_load_rejects_level_mismatch() {
        let mut atlas = RegionAtlas::new();
        let result = atlas.load(AdminLevel::District, vec![fine("a", "D1", "P1", 0.0)]);
        assert!(matches!(result, Err(RegionMapError::InvalidInput(_))));
    }
}
