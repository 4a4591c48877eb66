//! View state threaded through interaction callbacks.
//!
//! One value owns the active admin level, the last reported viewport, and the
//! hover/selection machine. The host's map widget pushes bounds and pointer
//! events in; the rendering layer reads the visible subset and per-region
//! style state back out.

use crate::atlas::RegionAtlas;
use crate::error::Result;
use crate::filter::filter_visible;
use crate::selection::{SelectionState, StyleState};
use regionmap_types::bounds::LatLngBounds;
use regionmap_types::region::{AdminLevel, Region};

/// Active level, current viewport and selection for one map session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapView {
    level: AdminLevel,
    viewport: Option<LatLngBounds>,
    selection: SelectionState,
}

impl MapView {
    /// A view at the given level with no viewport and an empty selection.
    pub fn new(level: AdminLevel) -> Self {
        Self {
            level,
            viewport: None,
            selection: SelectionState::new(),
        }
    }

    pub fn level(&self) -> AdminLevel {
        self.level
    }

    pub fn viewport(&self) -> Option<&LatLngBounds> {
        self.viewport.as_ref()
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Record the viewport reported by a bounds-changed event.
    pub fn set_viewport(&mut self, viewport: LatLngBounds) {
        self.viewport = Some(viewport);
    }

    /// Switch the active admin level.
    ///
    /// Codes are not comparable across levels, so an actual change resets
    /// both hover and selection.
    pub fn set_level(&mut self, level: AdminLevel) {
        if self.level != level {
            self.level = level;
            self.selection.clear();
        }
    }

    /// Switch level from a map zoom value (see [`AdminLevel::for_zoom`]).
    pub fn set_zoom(&mut self, zoom: u8) {
        self.set_level(AdminLevel::for_zoom(zoom));
    }

    pub fn pointer_enter(&mut self, code: &str) {
        self.selection.pointer_enter(code);
    }

    pub fn pointer_leave(&mut self, code: &str) {
        self.selection.pointer_leave(code);
    }

    pub fn click(&mut self, code: &str) {
        self.selection.click(code);
    }

    /// The active level's regions currently in view, in dataset order.
    ///
    /// Fails fast when no dataset was loaded for the active level.
    pub fn visible<'a>(&self, atlas: &'a RegionAtlas) -> Result<Vec<&'a Region>> {
        let dataset = atlas.dataset(self.level)?;
        Ok(filter_visible(dataset, self.viewport.as_ref()))
    }

    /// Style state for one region under the current selection.
    pub fn style_for(&self, code: &str) -> StyleState {
        self.selection.style_for(code)
    }
}
