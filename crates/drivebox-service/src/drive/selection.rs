//! Multi-select state over the currently displayed item list.

use drivebox_core::types::ItemId;

/// The selection set plus the anchor used for range selection.
///
/// Three interaction modes, matching the usual file-manager gestures:
/// a plain click replaces the selection, a toggle-click (ctrl/cmd)
/// adds or removes one item, and a range-click (shift) unions the
/// contiguous range between the anchor and the clicked item.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    selected: Vec<ItemId>,
    anchor: Option<ItemId>,
}

impl SelectionState {
    /// An empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain click: the selection becomes just this item, which also
    /// becomes the anchor.
    pub fn click(&mut self, id: ItemId) {
        self.selected = vec![id];
        self.anchor = Some(id);
    }

    /// Toggle-click: add the item if absent, remove it otherwise; the
    /// anchor moves to the clicked item either way.
    pub fn toggle_click(&mut self, id: ItemId) {
        if let Some(position) = self.selected.iter().position(|selected| *selected == id) {
            self.selected.remove(position);
        } else {
            self.selected.push(id);
        }
        self.anchor = Some(id);
    }

    /// Range-click: union the contiguous index range between the anchor
    /// and the clicked item (inclusive, in either direction) into the
    /// selection, based on `displayed` — the currently visible, sorted
    /// and filtered id order.
    ///
    /// The anchor deliberately stays where it is, so repeated
    /// range-clicks all extend from the original anchor. Without an
    /// anchor, or when either end is not displayed, this degrades to a
    /// plain click.
    pub fn range_click(&mut self, id: ItemId, displayed: &[ItemId]) {
        let Some(anchor) = self.anchor else {
            self.click(id);
            return;
        };
        let anchor_index = displayed.iter().position(|shown| *shown == anchor);
        let clicked_index = displayed.iter().position(|shown| *shown == id);
        let (Some(anchor_index), Some(clicked_index)) = (anchor_index, clicked_index) else {
            self.click(id);
            return;
        };

        let start = anchor_index.min(clicked_index);
        let end = anchor_index.max(clicked_index);
        for ranged in &displayed[start..=end] {
            if !self.selected.contains(ranged) {
                self.selected.push(*ranged);
            }
        }
    }

    /// Whether an item is selected.
    pub fn contains(&self, id: ItemId) -> bool {
        self.selected.contains(&id)
    }

    /// Selected ids in selection order.
    pub fn ids(&self) -> &[ItemId] {
        &self.selected
    }

    /// Number of selected items.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Drop the selection and the anchor.
    pub fn clear(&mut self) {
        self.selected.clear();
        self.anchor = None;
    }
}
