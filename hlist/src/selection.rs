//! Selection engine.
//!
//! Two layers of state are kept apart here:
//!
//! - the *committed* selection, the list's `selection` vector, which changes one
//!   item at a time and emits [`ListEvent::SelectionChanged`] per change;
//! - the *provisional* selection, which lives only in item states while an
//!   extended-selection gesture (an [`AnchorRange`]) is in progress.
//!
//! [`ListContainer::end_selection`] reconciles the two and records what it
//! changed in the undo buffers so the gesture can be reverted.

use log::{debug, warn};

use crate::container::{AnchorRange, ListContainer};
use crate::events::ListEvent;
use crate::item::{ItemId, ItemState};

/// How many items may be selected and how gestures change the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SelectionMode {
    /// At most one item; clicking the selected item unselects it.
    #[default]
    Single,
    /// Exactly one item once the list has children; it follows focus.
    Browse,
    /// Any number of items, each toggled independently.
    Multiple,
    /// Any number of items, chosen by anchor-and-drag range gestures.
    Extended,
}

impl<T> ListContainer<T> {
    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn selection_mode(&self) -> SelectionMode {
        self.selection_mode
    }

    /// Committed selection, in the order items were selected.
    pub fn selection(&self) -> &[ItemId] {
        &self.selection
    }

    pub fn is_selected(&self, id: ItemId) -> bool {
        self.selection.contains(&id)
    }

    /// The in-progress extended gesture, if any.
    pub fn anchor(&self) -> Option<AnchorRange> {
        self.anchor
    }

    /// State painted across the current gesture's range.
    pub fn anchor_state(&self) -> ItemState {
        self.anchor_state
    }

    pub fn add_mode(&self) -> bool {
        self.add_mode
    }

    /// True if [`undo_selection`](Self::undo_selection) would restore anything.
    pub fn can_undo(&self) -> bool {
        !self.undo_selection.is_empty() || !self.undo_unselection.is_empty()
    }

    // -------------------------------------------------------------------------
    // Mode
    // -------------------------------------------------------------------------

    /// Switch selection mode.
    ///
    /// A gesture in progress is committed first. Switching to Single or Browse
    /// clears the selection.
    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        if self.selection_mode == mode {
            return;
        }
        debug!("[hlist] selection mode {:?} -> {:?}", self.selection_mode, mode);

        self.end_drag_selection();
        if self.anchor.is_some() {
            self.end_selection();
        }

        self.selection_mode = mode;
        if matches!(mode, SelectionMode::Single | SelectionMode::Browse) {
            self.unselect_all();
        }
    }

    // -------------------------------------------------------------------------
    // Single-item requests
    // -------------------------------------------------------------------------

    /// Ask the item to become selected. Only a Normal item reacts.
    pub fn select_child(&mut self, id: ItemId) {
        if let Some(index) = self.checked_index(id) {
            self.select_index(index);
        }
    }

    /// Ask the item to become unselected. Only a Selected item reacts.
    pub fn unselect_child(&mut self, id: ItemId) {
        if let Some(index) = self.checked_index(id) {
            self.unselect_index(index);
        }
    }

    /// [`select_child`](Self::select_child) by position; out of range is a no-op.
    pub fn select_item(&mut self, index: usize) {
        if index < self.children.len() {
            self.select_index(index);
        }
    }

    /// [`unselect_child`](Self::unselect_child) by position; out of range is a no-op.
    pub fn unselect_item(&mut self, index: usize) {
        if index < self.children.len() {
            self.unselect_index(index);
        }
    }

    /// The item asks to be toggled, as a click on a standalone item would.
    ///
    /// In Browse and Extended mode a selected item cannot toggle itself off.
    pub fn toggle_child(&mut self, id: ItemId) {
        let Some(index) = self.checked_index(id) else {
            return;
        };

        let state = match self.children[index].state {
            ItemState::Insensitive => return,
            ItemState::Selected => ItemState::Normal,
            ItemState::Normal => ItemState::Selected,
        };
        self.set_state(index, state);

        if matches!(
            self.selection_mode,
            SelectionMode::Browse | SelectionMode::Extended
        ) && state == ItemState::Normal
        {
            self.set_state(index, ItemState::Selected);
            return;
        }

        match state {
            ItemState::Selected => self.on_item_selected(index),
            _ => self.on_item_deselected(index),
        }
    }

    pub(crate) fn select_index(&mut self, index: usize) {
        if self.children[index].state == ItemState::Normal {
            self.set_state(index, ItemState::Selected);
            self.on_item_selected(index);
        }
    }

    pub(crate) fn unselect_index(&mut self, index: usize) {
        if self.children[index].state == ItemState::Selected {
            self.set_state(index, ItemState::Normal);
            self.on_item_deselected(index);
        }
    }

    /// An item became Selected; bring the committed selection in line.
    fn on_item_selected(&mut self, index: usize) {
        if self.children[index].state != ItemState::Selected {
            return;
        }
        let id = self.children[index].id();

        match self.selection_mode {
            SelectionMode::Single | SelectionMode::Browse => {
                let others: Vec<ItemId> = self
                    .selection
                    .iter()
                    .copied()
                    .filter(|&other| other != id)
                    .collect();
                for other in others {
                    if let Some(other_index) = self.index_of(other) {
                        self.unselect_index(other_index);
                    }
                }
                self.add_to_selection(id);
            }
            // Provisional while a gesture is running; end_selection commits.
            SelectionMode::Extended if self.anchor.is_some() => {}
            SelectionMode::Extended | SelectionMode::Multiple => self.add_to_selection(id),
        }
    }

    /// An item became Normal; drop it from the committed selection.
    fn on_item_deselected(&mut self, index: usize) {
        if self.children[index].state != ItemState::Normal {
            return;
        }
        let id = self.children[index].id();
        if let Some(pos) = self.selection.iter().position(|&s| s == id) {
            self.selection.remove(pos);
            self.outbox.push(ListEvent::SelectionChanged);
        }
    }

    fn add_to_selection(&mut self, id: ItemId) {
        if !self.selection.contains(&id) {
            self.selection.push(id);
            self.outbox.push(ListEvent::SelectionChanged);
        }
    }

    // -------------------------------------------------------------------------
    // Bulk operations
    // -------------------------------------------------------------------------

    /// Select every sensitive child.
    ///
    /// Single mode ignores this; Browse selects the focus child.
    pub fn select_all(&mut self) {
        if self.children.is_empty() {
            return;
        }
        self.end_drag_selection();
        if self.selection_mode == SelectionMode::Extended && self.anchor.is_some() {
            self.end_selection();
        }

        match self.selection_mode {
            SelectionMode::Single => {}
            SelectionMode::Browse => {
                if let Some(focus) = self.focus_child {
                    self.select_child(focus);
                }
            }
            SelectionMode::Extended => {
                self.undo_selection.clear();
                self.undo_unselection.clear();

                if self.children[0].state == ItemState::Normal {
                    self.fake_toggle_row(0);
                }

                self.anchor_state = ItemState::Selected;
                self.anchor = Some(AnchorRange {
                    anchor: 0,
                    drag_pos: 0,
                });
                self.undo_focus_child = self.focus_child;
                self.update_extended_selection(self.children.len() as isize);
                self.end_selection();
            }
            SelectionMode::Multiple => {
                for index in 0..self.children.len() {
                    self.select_index(index);
                }
            }
        }
    }

    /// Unselect everything.
    ///
    /// Browse keeps the focus child selected. Extended also forgets the
    /// current gesture and the undo buffers.
    pub fn unselect_all(&mut self) {
        if self.children.is_empty() {
            return;
        }
        self.end_drag_selection();
        if self.selection_mode == SelectionMode::Extended && self.anchor.is_some() {
            self.end_selection();
        }

        match self.selection_mode {
            SelectionMode::Browse => {
                if let Some(focus) = self.focus_child {
                    self.select_child(focus);
                    self.unselect_all_except(Some(focus));
                    return;
                }
            }
            SelectionMode::Extended => self.reset_extended_selection(),
            _ => {}
        }

        self.unselect_all_except(None);
    }

    fn unselect_all_except(&mut self, keep: Option<ItemId>) {
        for id in self.selection.clone() {
            if Some(id) == keep {
                continue;
            }
            if let Some(index) = self.index_of(id) {
                self.unselect_index(index);
            }
        }
    }

    /// First focus in Extended mode makes the focused item the only selection.
    ///
    /// Unlike [`unselect_all`](Self::unselect_all) this keeps any drag that
    /// produced the focus alive.
    pub(crate) fn replace_selection_on_first_focus(&mut self, focus: ItemId) {
        if self.anchor.is_none() {
            self.reset_extended_selection();
        }
        self.unselect_all_except(None);
        self.select_child(focus);
    }

    // -------------------------------------------------------------------------
    // Extended gestures
    // -------------------------------------------------------------------------

    /// Forget the current gesture and the undo history.
    pub(crate) fn reset_extended_selection(&mut self) {
        if self.selection_mode != SelectionMode::Extended {
            return;
        }
        self.undo_selection.clear();
        self.undo_unselection.clear();
        self.anchor = None;
        self.undo_focus_child = self.focus_child;
    }

    /// Begin an extended gesture at the focus child.
    pub fn start_selection(&mut self) {
        if self.has_grab() {
            return;
        }
        let Some(row) = self.focus_index() else {
            return;
        };
        self.set_anchor(self.add_mode, row, self.focus_child);
    }

    /// Begin an extended gesture at `anchor`.
    ///
    /// In add mode the anchor row is toggled provisionally; otherwise every
    /// other item is provisionally unselected and the anchor row selected.
    /// Ignored outside Extended mode, while a gesture is already running, or
    /// when `anchor` is not a row of the list.
    pub fn set_anchor(&mut self, add_mode: bool, anchor: usize, undo_focus_child: Option<ItemId>) {
        if self.selection_mode != SelectionMode::Extended || self.anchor.is_some() {
            return;
        }
        if anchor >= self.children.len() {
            warn!(
                "[hlist] anchor row {} outside list of {}",
                anchor,
                self.children.len()
            );
            return;
        }
        debug!("[hlist] anchor at {} (add mode {})", anchor, add_mode);

        self.undo_selection.clear();
        self.undo_unselection.clear();

        if add_mode {
            self.fake_toggle_row(anchor);
        } else {
            self.fake_unselect_all(anchor);
            self.anchor_state = ItemState::Selected;
        }

        self.anchor = Some(AnchorRange {
            anchor,
            drag_pos: anchor,
        });
        self.undo_focus_child = undo_focus_child;
    }

    /// Provisionally select only `index`.
    ///
    /// The committed selection moves into `undo_selection` and every other
    /// former member is painted Normal. No selection events are emitted.
    pub(crate) fn fake_unselect_all(&mut self, index: usize) {
        if self.children[index].state == ItemState::Normal {
            self.set_state(index, ItemState::Selected);
        }

        let keep = self.children[index].id();
        self.undo_selection = std::mem::take(&mut self.selection);
        for id in self.undo_selection.clone() {
            if id == keep {
                continue;
            }
            if let Some(other) = self.index_of(id) {
                self.set_state(other, ItemState::Normal);
            }
        }
    }

    /// Provisionally flip `index` and paint the gesture with its new state.
    pub(crate) fn fake_toggle_row(&mut self, index: usize) {
        match self.children[index].state {
            ItemState::Normal => {
                self.set_state(index, ItemState::Selected);
                self.anchor_state = ItemState::Selected;
            }
            ItemState::Selected => {
                self.set_state(index, ItemState::Normal);
                self.anchor_state = ItemState::Normal;
            }
            ItemState::Insensitive => {}
        }
    }

    /// Move the drag end of the current gesture to `row`.
    ///
    /// Rows leaving the range get their committed appearance back; rows
    /// entering it are painted with the anchor state. `row` is clamped to the
    /// list.
    pub fn update_extended_selection(&mut self, row: isize) {
        let count = self.children.len() as isize;
        if self.selection_mode != SelectionMode::Extended || count == 0 {
            return;
        }
        let Some(range) = self.anchor else {
            return;
        };

        let last = count - 1;
        let row = row.clamp(0, last);
        let anchor = (range.anchor as isize).min(last);
        let drag = (range.drag_pos as isize).min(last);

        // s1..=e1 reverts to committed state, s2..=e2 takes the anchor state.
        let (mut s1, mut e1, mut s2, mut e2) = (-1, -1, -1, -1);
        if row > drag && anchor <= drag {
            s2 = drag + 1;
            e2 = row;
        } else if row < drag && anchor >= drag {
            s2 = row;
            e2 = drag - 1;
        } else if row < drag && anchor < drag {
            e1 = drag;
            if row < anchor {
                s1 = anchor + 1;
                s2 = row;
                e2 = anchor - 1;
            } else {
                s1 = row + 1;
            }
        } else if row > drag && anchor > drag {
            s1 = drag;
            if row > anchor {
                e1 = anchor - 1;
                s2 = anchor + 1;
                e2 = row;
            } else {
                e1 = row - 1;
            }
        }

        self.anchor = Some(AnchorRange {
            anchor: anchor as usize,
            drag_pos: row as usize,
        });

        if s1 >= 0 {
            for index in s1 as usize..=e1 as usize {
                if !self.children[index].is_sensitive() {
                    continue;
                }
                let committed = if self.selection.contains(&self.children[index].id()) {
                    ItemState::Selected
                } else {
                    ItemState::Normal
                };
                self.set_state(index, committed);
            }
        }

        if s2 >= 0 {
            let painted = self.anchor_state;
            for index in s2 as usize..=e2 as usize {
                if self.children[index].is_sensitive() {
                    self.set_state(index, painted);
                }
            }
        }
    }

    /// Commit the current gesture.
    ///
    /// Items whose visible state differs from the committed selection are
    /// selected or unselected through the normal item path, and every change
    /// is recorded in the undo buffers. Ignored while input is captured.
    pub fn end_selection(&mut self) {
        if self.has_grab() {
            return;
        }
        let Some(range) = self.anchor.take() else {
            return;
        };
        let (start, end) = range.bounds();
        debug!("[hlist] committing rows {}..={}", start, end);

        if !self.undo_selection.is_empty() {
            // Reinstate the pre-gesture selection so the diff below runs
            // against it, and drop members outside the range.
            std::mem::swap(&mut self.selection, &mut self.undo_selection);
            for id in self.selection.clone() {
                let Some(index) = self.index_of(id) else {
                    continue;
                };
                if index < start || index > end {
                    self.set_state(index, ItemState::Selected);
                    self.unselect_index(index);
                    self.undo_selection.push(id);
                }
            }
        }

        let end = end.min(self.children.len().saturating_sub(1));
        let mut unselected = Vec::new();
        if range.is_top_down() {
            for index in start..=end {
                self.commit_row(index, &mut unselected);
            }
        } else {
            for index in (start..=end).rev() {
                self.commit_row(index, &mut unselected);
            }
        }

        for &id in &unselected {
            self.select_child(id);
        }
        self.undo_unselection.extend(unselected);
    }

    fn commit_row(&mut self, index: usize, unselected: &mut Vec<ItemId>) {
        let Some(item) = self.children.get(index) else {
            return;
        };
        let id = item.id();
        let state = item.state;

        if self.selection.contains(&id) {
            if state == ItemState::Normal {
                self.set_state(index, ItemState::Selected);
                self.unselect_index(index);
                self.undo_selection.push(id);
            }
        } else if state == ItemState::Selected {
            self.set_state(index, ItemState::Normal);
            unselected.push(id);
        }
    }

    // -------------------------------------------------------------------------
    // Toggles and undo
    // -------------------------------------------------------------------------

    /// Flip the item's selection. Browse mode only ever selects.
    pub fn toggle_row(&mut self, id: ItemId) {
        let Some(index) = self.checked_index(id) else {
            return;
        };

        match self.selection_mode {
            SelectionMode::Browse => self.select_index(index),
            _ => {
                if self.children[index].state == ItemState::Selected {
                    self.unselect_index(index);
                } else {
                    self.select_index(index);
                }
            }
        }
    }

    /// Toggle the focus child as a one-row gesture.
    pub fn toggle_focus_row(&mut self) {
        if self.has_grab() {
            return;
        }
        let Some(focus) = self.focus_child else {
            return;
        };

        match self.selection_mode {
            SelectionMode::Single | SelectionMode::Multiple => self.toggle_row(focus),
            SelectionMode::Extended => {
                let Some(row) = self.index_of(focus) else {
                    return;
                };

                self.undo_selection.clear();
                self.undo_unselection.clear();
                self.anchor = Some(AnchorRange {
                    anchor: row,
                    drag_pos: row,
                });
                self.undo_focus_child = Some(focus);

                if self.add_mode {
                    self.fake_toggle_row(row);
                } else {
                    self.fake_unselect_all(row);
                }
                self.end_selection();
            }
            SelectionMode::Browse => {}
        }
    }

    /// Toggle add mode, where gestures add to the selection instead of
    /// replacing it. Extended mode only.
    pub fn toggle_add_mode(&mut self) {
        if self.has_grab() || self.selection_mode != SelectionMode::Extended {
            return;
        }

        self.add_mode = !self.add_mode;
        if !self.add_mode {
            self.anchor_state = ItemState::Selected;
        }
        debug!("[hlist] add mode {}", self.add_mode);

        if let Some(focus) = self.focus_child {
            self.outbox.push(ListEvent::RedrawRequested(focus));
        }
    }

    /// Revert the last committed gesture and restore the focus it started
    /// from. With nothing to undo, everything is unselected.
    pub fn undo_selection(&mut self) {
        if self.selection_mode != SelectionMode::Extended || self.has_grab() {
            return;
        }

        if self.anchor.is_some() {
            self.end_selection();
        }

        if !self.can_undo() {
            self.unselect_all();
            return;
        }

        for id in std::mem::take(&mut self.undo_selection) {
            if let Some(index) = self.index_of(id) {
                self.select_index(index);
            }
        }
        for id in std::mem::take(&mut self.undo_unselection) {
            if let Some(index) = self.index_of(id) {
                self.unselect_index(index);
            }
        }

        if let Some(target) = self.undo_focus_child.take() {
            if self.focus_child.is_some() && self.has_focus {
                self.grab_focus(target);
            } else {
                self.set_focus_child(Some(target));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ListConfig;
    use crate::item::Item;

    fn extended(n: usize) -> (ListContainer<usize>, Vec<ItemId>) {
        let mut list = ListContainer::with_config(ListConfig::new(SelectionMode::Extended));
        let ids = (0..n).map(|i| list.push(Item::new(i))).collect();
        (list, ids)
    }

    fn states(list: &ListContainer<usize>) -> Vec<ItemState> {
        list.children().iter().map(|item| item.state()).collect()
    }

    #[test]
    fn test_fake_unselect_all_moves_selection_to_undo() {
        let (mut list, ids) = extended(4);
        list.select_child(ids[1]);
        list.select_child(ids[3]);
        list.take_events();

        list.fake_unselect_all(0);

        assert!(list.selection.is_empty());
        assert_eq!(list.undo_selection, vec![ids[1], ids[3]]);
        assert_eq!(
            states(&list),
            vec![
                ItemState::Selected,
                ItemState::Normal,
                ItemState::Normal,
                ItemState::Normal
            ]
        );
        assert!(!list.take_events().contains(&ListEvent::SelectionChanged));
    }

    #[test]
    fn test_fake_toggle_row_sets_anchor_state() {
        let (mut list, ids) = extended(2);
        list.select_child(ids[0]);

        list.fake_toggle_row(0);
        assert_eq!(list.anchor_state, ItemState::Normal);
        assert_eq!(list.children[0].state, ItemState::Normal);

        list.fake_toggle_row(1);
        assert_eq!(list.anchor_state, ItemState::Selected);
        assert_eq!(list.children[1].state, ItemState::Selected);
    }

    #[test]
    fn test_update_restores_rows_when_crossing_anchor() {
        let (mut list, _) = extended(6);
        list.set_anchor(false, 3, None);
        list.update_extended_selection(5);
        assert_eq!(list.anchor, Some(AnchorRange { anchor: 3, drag_pos: 5 }));

        list.update_extended_selection(1);

        assert_eq!(list.anchor, Some(AnchorRange { anchor: 3, drag_pos: 1 }));
        assert_eq!(
            states(&list),
            vec![
                ItemState::Normal,
                ItemState::Selected,
                ItemState::Selected,
                ItemState::Selected,
                ItemState::Normal,
                ItemState::Normal
            ]
        );
    }

    #[test]
    fn test_update_clamps_row() {
        let (mut list, _) = extended(3);
        list.set_anchor(false, 1, None);
        list.update_extended_selection(-4);
        assert_eq!(list.anchor.map(|a| a.drag_pos), Some(0));
        list.update_extended_selection(40);
        assert_eq!(list.anchor.map(|a| a.drag_pos), Some(2));
    }

    #[test]
    fn test_update_without_anchor_is_ignored() {
        let (mut list, _) = extended(3);
        list.update_extended_selection(2);
        assert_eq!(list.anchor, None);
        assert!(states(&list).iter().all(|&s| s == ItemState::Normal));
    }
}
