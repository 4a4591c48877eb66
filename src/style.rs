//! Fill colors and per-state polygon styles.
//!
//! Provinces get a fixed color each; district and fine regions hash their
//! district code into a shared palette, so the same code renders the same
//! color on every run.

use crate::selection::StyleState;
use once_cell::sync::Lazy;
use regionmap_types::region::{AdminLevel, Region};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

const DEFAULT_FILL_OPACITY: f64 = 0.4;
const HOVER_FILL_OPACITY: f64 = 0.6;
const SELECTED_FILL_OPACITY: f64 = 0.8;
const STROKE_COLOR: &str = "#FFFFFF";
const STROKE_WEIGHT: f64 = 2.0;
const STROKE_OPACITY: f64 = 0.8;

/// Fallback fill for codes missing from the tables.
const FALLBACK_FILL: &str = "#3B82F6";

/// Fixed fill color per province code.
static PROVINCE_COLORS: Lazy<FxHashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut colors = FxHashMap::default();
    colors.insert("11", "#FF6B6B"); // Seoul
    colors.insert("26", "#4ECDC4"); // Busan
    colors.insert("27", "#45B7D1"); // Daegu
    colors.insert("28", "#96CEB4"); // Incheon
    colors.insert("29", "#FFEAA7"); // Gwangju
    colors.insert("30", "#DDA0DD"); // Daejeon
    colors.insert("31", "#98D8C8"); // Ulsan
    colors.insert("36", "#F7DC6F"); // Sejong
    colors.insert("41", "#BB8FCE"); // Gyeonggi
    colors.insert("42", "#85C1E9"); // Gangwon
    colors.insert("43", "#F8B500"); // Chungbuk
    colors.insert("44", "#82E0AA"); // Chungnam
    colors.insert("45", "#F1948A"); // Jeonbuk
    colors.insert("46", "#85929E"); // Jeonnam
    colors.insert("47", "#73C6B6"); // Gyeongbuk
    colors.insert("48", "#F5B041"); // Gyeongnam
    colors.insert("50", "#AF7AC5"); // Jeju
    colors
});

/// Hash-indexed palette for district codes.
const DISTRICT_PALETTE: [&str; 25] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7", "#DDA0DD", "#98D8C8", "#F7DC6F",
    "#BB8FCE", "#85C1E9", "#F8B500", "#82E0AA", "#F1948A", "#85929E", "#73C6B6", "#F5B041",
    "#AF7AC5", "#5DADE2", "#58D68D", "#EC7063", "#A569BD", "#48C9B0", "#5499C7", "#52BE80",
    "#F4D03F",
];

/// Visual attributes of one rendered polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonStyle {
    pub fill_color: String,
    pub fill_opacity: f64,
    pub stroke_color: String,
    pub stroke_weight: f64,
    pub stroke_opacity: f64,
}

/// The three styles a region can render with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionStyles {
    pub default: PolygonStyle,
    pub hover: PolygonStyle,
    pub selected: PolygonStyle,
}

impl RegionStyles {
    /// The style matching a derived [`StyleState`].
    pub fn for_state(&self, state: StyleState) -> &PolygonStyle {
        match state {
            StyleState::Default => &self.default,
            StyleState::Hovering => &self.hover,
            StyleState::Selected => &self.selected,
        }
    }
}

/// Always-positive string hash used to index the district palette.
pub fn hash_code(value: &str) -> u32 {
    let mut hash: i32 = 0;
    for byte in value.bytes() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(byte as i32);
    }
    hash.unsigned_abs()
}

/// Palette color for a district code; the same code always maps to the same
/// entry.
pub fn district_color(district_code: &str) -> &'static str {
    let index = hash_code(district_code) as usize % DISTRICT_PALETTE.len();
    DISTRICT_PALETTE[index]
}

/// Fill color for a region: fixed per province, hashed per district.
pub fn region_color(region: &Region) -> &'static str {
    match region.level() {
        AdminLevel::Province => PROVINCE_COLORS
            .get(region.province_code())
            .copied()
            .unwrap_or(FALLBACK_FILL),
        AdminLevel::District | AdminLevel::Fine => district_color(region.district_code()),
    }
}

/// Default, hover and selected styles for one region.
pub fn styles_for(region: &Region) -> RegionStyles {
    let fill_color = region_color(region);
    let base = |fill_opacity: f64| PolygonStyle {
        fill_color: fill_color.to_string(),
        fill_opacity,
        stroke_color: STROKE_COLOR.to_string(),
        stroke_weight: STROKE_WEIGHT,
        stroke_opacity: STROKE_OPACITY,
    };

    RegionStyles {
        default: base(DEFAULT_FILL_OPACITY),
        hover: base(HOVER_FILL_OPACITY),
        selected: base(SELECTED_FILL_OPACITY),
    }
}
