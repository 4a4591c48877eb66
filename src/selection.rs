//! Hover and selection tracking for pointer interaction.
//!
//! The rendering layer resolves raw pointer events to a region code and feeds
//! them here; this module only runs the state machine and derives the style
//! state each region should render with. The state is an explicit value owned
//! by the caller, not a hidden store.

use serde::{Deserialize, Serialize};

/// Render style derived for one region at one instant.
///
/// Exactly one applies per region: `Selected` wins over `Hovering`, which
/// wins over `Default`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleState {
    #[default]
    Default,
    Hovering,
    Selected,
}

/// Current hover and selection, both by region code.
///
/// Hover and selection are orthogonal: they may reference different regions
/// at the same time, or the same one. Codes are only meaningful within one
/// admin level, so the state must be cleared when the level changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    hovered: Option<String>,
    selected: Option<String>,
}

impl SelectionState {
    /// Empty state: nothing hovered, nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Pointer entered the region with this code.
    pub fn pointer_enter(&mut self, code: &str) {
        self.hovered = Some(code.to_string());
    }

    /// Pointer left the region with this code.
    ///
    /// Only clears the hover when the leaving region is the hovered one, so a
    /// stale leave event for a previously hovered region is a no-op.
    pub fn pointer_leave(&mut self, code: &str) {
        if self.hovered.as_deref() == Some(code) {
            self.hovered = None;
        }
    }

    /// Click on the region with this code: toggle selection.
    ///
    /// Clicking the selected region deselects it; clicking any other region
    /// makes it the single selected one.
    ///
    /// # Examples
    ///
    /// ```
    /// use regionmap::SelectionState;
    ///
    /// let mut state = SelectionState::new();
    /// state.click("11010");
    /// assert_eq!(state.selected(), Some("11010"));
    ///
    /// // Clicking the same region again returns to no selection.
    /// state.click("11010");
    /// assert_eq!(state.selected(), None);
    /// ```
    pub fn click(&mut self, code: &str) {
        if self.selected.as_deref() == Some(code) {
            self.selected = None;
        } else {
            self.selected = Some(code.to_string());
        }
    }

    /// Drop both hover and selection (used when the admin level changes).
    pub fn clear(&mut self) {
        self.hovered = None;
        self.selected = None;
    }

    /// Style state for the region with this code.
    pub fn style_for(&self, code: &str) -> StyleState {
        if self.selected.as_deref() == Some(code) {
            StyleState::Selected
        } else if self.hovered.as_deref() == Some(code) {
            StyleState::Hovering
        } else {
            StyleState::Default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        let state = SelectionState::new();
        assert_eq!(state.hovered(), None);
        assert_eq!(state.selected(), None);
        assert_eq!(state.style_for("anything"), StyleState::Default);
    }

    #[test]
    fn test_click_twice_is_identity() {
        let mut state = SelectionState::new();
        state.click("11010");
        state.click("11010");
        assert_eq!(state, SelectionState::new());
    }

    #[test]
    fn test_click_replaces_selection() {
        let mut state = SelectionState::new();
        state.click("11010");
        state.click("11020");
        assert_eq!(state.selected(), Some("11020"));
        assert_eq!(state.style_for("11010"), StyleState::Default);
        assert_eq!(state.style_for("11020"), StyleState::Selected);
    }

    #[test]
    fn test_hover_enter_and_leave() {
        let mut state = SelectionState::new();
        state.pointer_enter("11010");
        assert_eq!(state.hovered(), Some("11010"));
        state.pointer_leave("11010");
        assert_eq!(state.hovered(), None);
    }

    #[test]
    fn test_leave_of_other_region_keeps_hover() {
        let mut state = SelectionState::new();
        state.pointer_enter("11010");
        state.pointer_leave("11020");
        assert_eq!(state.hovered(), Some("11010"));
    }

    #[test]
    fn test_hover_and_selection_are_orthogonal() {
        let mut state = SelectionState::new();
        state.click("11010");
        state.pointer_enter("11020");

        assert_eq!(state.style_for("11010"), StyleState::Selected);
        assert_eq!(state.style_for("11020"), StyleState::Hovering);
        assert_eq!(state.style_for("11030"), StyleState::Default);
    }

    #[test]
    fn test_selected_wins_over_hovering() {
        let mut state = SelectionState::new();
        state.click("11010");
        state.pointer_enter("11010");
        assert_eq!(state.style_for("11010"), StyleState::Selected);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut state = SelectionState::new();
        state.click("11010");
        state.pointer_enter("11020");
        state.clear();
        assert_eq!(state, SelectionState::new());
    }
}
