//! Selection state shared by the rotation controller and item visuals.

use super::item::ItemId;

/// Which item is focused, and whether any item has ever been.
///
/// `ever_focused` is a one-way latch: the first successful selection sets it
/// and nothing clears it for the lifetime of the gallery. While it is set the
/// idle auto-spin stays off, even after the user deselects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: Option<ItemId>,
    ever_focused: bool,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<ItemId> {
        self.selected
    }

    pub fn ever_focused(&self) -> bool {
        self.ever_focused
    }

    pub fn has_selection(&self) -> bool {
        self.selected.is_some()
    }

    pub fn is_selected(&self, id: ItemId) -> bool {
        self.selected == Some(id)
    }

    /// Selects `id`. Returns `true` when the selected item changed.
    pub fn select(&mut self, id: ItemId) -> bool {
        self.ever_focused = true;
        let changed = self.selected != Some(id);
        self.selected = Some(id);
        changed
    }

    /// Clears the selection. Returns `true` if something was selected.
    pub fn clear(&mut self) -> bool {
        self.selected.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latch_survives_clear() {
        let mut selection = SelectionState::new();
        assert!(!selection.ever_focused());

        assert!(selection.select(3));
        assert!(selection.ever_focused());
        assert!(selection.clear());
        assert!(!selection.has_selection());
        assert!(selection.ever_focused());
    }

    #[test]
    fn test_reselect_reports_no_change() {
        let mut selection = SelectionState::new();
        assert!(selection.select(1));
        assert!(!selection.select(1));
        assert!(selection.select(2));
        assert!(selection.is_selected(2));
        assert!(!selection.is_selected(1));
    }

    #[test]
    fn test_clear_when_empty() {
        let mut selection = SelectionState::new();
        assert!(!selection.clear());
    }
}
