//! The list container: child ownership, focus bookkeeping and adjustments.

use hlist_core::{Adjustment, Axis, Rect};
use log::{debug, warn};

use crate::config::ListConfig;
use crate::error::ListError;
use crate::events::{ListEvent, Outbox};
use crate::gesture::GestureState;
use crate::item::{Item, ItemId, ItemState};
use crate::selection::SelectionMode;

/// The rows spanned by an in-progress extended selection.
///
/// `anchor` is where the gesture started, `drag_pos` where it currently ends.
/// Either may be the larger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorRange {
    pub anchor: usize,
    pub drag_pos: usize,
}

impl AnchorRange {
    /// Inclusive `(first, last)` rows of the range.
    pub fn bounds(&self) -> (usize, usize) {
        (
            self.anchor.min(self.drag_pos),
            self.anchor.max(self.drag_pos),
        )
    }

    /// True if the gesture extends from the anchor towards higher rows.
    pub fn is_top_down(&self) -> bool {
        self.anchor < self.drag_pos
    }
}

/// Direction of keyboard focus traversal into or out of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusDirection {
    Forward,
    Backward,
}

/// A list of child items with gesture-driven selection.
///
/// The container owns its children. Everything else (selection, focus, undo
/// buffers) refers to children by [`ItemId`] and is cleared when the item
/// leaves the list.
#[derive(Debug)]
pub struct ListContainer<T> {
    pub(crate) children: Vec<Item<T>>,
    /// Committed selection, in the order items were selected.
    pub(crate) selection: Vec<ItemId>,
    pub(crate) selection_mode: SelectionMode,
    /// Set while an extended-selection gesture is in progress.
    pub(crate) anchor: Option<AnchorRange>,
    /// State applied across the range of the current gesture.
    pub(crate) anchor_state: ItemState,
    pub(crate) undo_selection: Vec<ItemId>,
    pub(crate) undo_unselection: Vec<ItemId>,
    pub(crate) focus_child: Option<ItemId>,
    /// Whether the focus child holds keyboard focus.
    pub(crate) has_focus: bool,
    pub(crate) last_focus_child: Option<ItemId>,
    pub(crate) undo_focus_child: Option<ItemId>,
    pub(crate) add_mode: bool,
    pub(crate) gesture: GestureState,
    pub(crate) hadjustment: Option<Adjustment>,
    pub(crate) vadjustment: Option<Adjustment>,
    pub(crate) allocation: Rect,
    pub(crate) mapped: bool,
    pub(crate) config: ListConfig,
    pub(crate) outbox: Outbox,
}

impl<T> Default for ListContainer<T> {
    fn default() -> Self {
        Self::with_config(ListConfig::default())
    }
}

impl<T> ListContainer<T> {
    /// Create an empty list in single-selection mode.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ListConfig) -> Self {
        Self {
            children: Vec::new(),
            selection: Vec::new(),
            selection_mode: config.selection_mode,
            anchor: None,
            anchor_state: ItemState::Selected,
            undo_selection: Vec::new(),
            undo_unselection: Vec::new(),
            focus_child: None,
            has_focus: false,
            last_focus_child: None,
            undo_focus_child: None,
            add_mode: false,
            gesture: GestureState::default(),
            hadjustment: None,
            vadjustment: None,
            allocation: Rect::default(),
            mapped: false,
            config,
            outbox: Outbox::default(),
        }
    }

    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Outbox
    // -------------------------------------------------------------------------

    /// Drain pending notifications.
    pub fn take_events(&mut self) -> Vec<ListEvent> {
        self.outbox.take()
    }

    /// Pending notifications, oldest first.
    pub fn pending_events(&self) -> &[ListEvent] {
        self.outbox.peek()
    }

    // -------------------------------------------------------------------------
    // Item access
    // -------------------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Children in visual order.
    pub fn children(&self) -> &[Item<T>] {
        &self.children
    }

    pub fn item(&self, id: ItemId) -> Option<&Item<T>> {
        self.children.iter().find(|item| item.id() == id)
    }

    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut Item<T>> {
        self.children.iter_mut().find(|item| item.id() == id)
    }

    pub fn item_at_index(&self, index: usize) -> Option<&Item<T>> {
        self.children.get(index)
    }

    /// Position of a child, or `None` if it is not in this list.
    pub fn child_position(&self, id: ItemId) -> Option<usize> {
        self.index_of(id)
    }

    pub(crate) fn index_of(&self, id: ItemId) -> Option<usize> {
        self.children.iter().position(|item| item.id() == id)
    }

    pub(crate) fn require_child(&self, id: ItemId) -> Result<usize, ListError> {
        self.index_of(id).ok_or(ListError::NotAChild(id))
    }

    /// Index of a child, logging a precondition failure if it is unknown.
    pub(crate) fn checked_index(&self, id: ItemId) -> Option<usize> {
        match self.require_child(id) {
            Ok(index) => Some(index),
            Err(err) => {
                warn!("[hlist] {}", err);
                None
            }
        }
    }

    pub(crate) fn focus_index(&self) -> Option<usize> {
        self.focus_child.and_then(|id| self.index_of(id))
    }

    /// Change an item's visual state, requesting a redraw if it differs.
    pub(crate) fn set_state(&mut self, index: usize, state: ItemState) {
        let Some(item) = self.children.get_mut(index) else {
            return;
        };
        if item.state != state {
            item.state = state;
            let id = item.id();
            self.outbox.push(ListEvent::ItemStateChanged { item: id, state });
        }
    }

    // -------------------------------------------------------------------------
    // Insertion and removal
    // -------------------------------------------------------------------------

    /// Insert items before `position`.
    ///
    /// A negative position, or one past the end, appends. Any drag is ended and
    /// any extended gesture is committed first.
    pub fn insert_items(&mut self, items: Vec<Item<T>>, position: isize) {
        if items.is_empty() {
            return;
        }

        self.end_drag_selection();
        if self.selection_mode == SelectionMode::Extended && self.anchor.is_some() {
            self.end_selection();
        }

        let count = self.children.len();
        let position = usize::try_from(position)
            .ok()
            .filter(|&p| p <= count)
            .unwrap_or(count);
        debug!(
            "[hlist] inserting {} item(s) at {} of {}",
            items.len(),
            position,
            count
        );
        self.children.splice(position..position, items);

        if self.selection_mode == SelectionMode::Browse && self.selection.is_empty() {
            let first = self.children[0].id();
            self.select_child(first);
        }
        self.outbox.push(ListEvent::ResizeRequested);
    }

    pub fn append_items(&mut self, items: Vec<Item<T>>) {
        self.insert_items(items, -1);
    }

    pub fn prepend_items(&mut self, items: Vec<Item<T>>) {
        self.insert_items(items, 0);
    }

    /// Append a single item, returning its id.
    pub fn push(&mut self, item: Item<T>) -> ItemId {
        let id = item.id();
        self.append_items(vec![item]);
        id
    }

    /// Remove the given children and hand them back.
    ///
    /// Selected items are unselected first. If the focus child goes, focus
    /// moves to its next neighbour, or the previous one at the end of the list.
    /// Ids that are not children are skipped.
    pub fn remove_items(&mut self, ids: &[ItemId]) -> Vec<Item<T>> {
        if ids.is_empty() {
            return Vec::new();
        }

        self.end_drag_selection();
        if self.selection_mode == SelectionMode::Extended {
            if self.anchor.is_some() {
                self.end_selection();
            }
            self.reset_extended_selection();
        }

        for &id in ids {
            if let Some(index) = self.index_of(id)
                && self.children[index].is_selected()
            {
                self.unselect_index(index);
            }
        }

        let had_focus_child = self.focus_child.is_some();
        let grab = had_focus_child && self.has_focus;
        let old_focus = self.focus_child.or(self.last_focus_child);
        let mut new_focus = old_focus;

        let mut removed = Vec::with_capacity(ids.len());
        for &id in ids {
            let Some(index) = self.checked_index(id) else {
                continue;
            };

            if new_focus == Some(id) {
                new_focus = if let Some(next) = self.children.get(index + 1) {
                    Some(next.id())
                } else if index > 0 {
                    Some(self.children[index - 1].id())
                } else {
                    None
                };
            }

            self.forget(id);
            removed.push(self.children.remove(index));
        }

        if let Some(new) = new_focus
            && new_focus != old_focus
        {
            self.refocus_after_removal(new, grab, had_focus_child);

            if self.selection_mode == SelectionMode::Browse && self.selection.is_empty() {
                self.last_focus_child = Some(new);
                self.select_child(new);
            }
        }

        self.outbox.push(ListEvent::ResizeRequested);
        removed
    }

    /// Remove the children in `start..end` and hand them back.
    ///
    /// A negative `end`, or one past the end of the list, clamps to the length.
    /// An empty range is a no-op.
    pub fn clear_items(&mut self, start: isize, end: isize) -> Vec<Item<T>> {
        let count = self.children.len();
        if count == 0 {
            return Vec::new();
        }

        let end = usize::try_from(end)
            .ok()
            .filter(|&e| e <= count)
            .unwrap_or(count);
        let start = usize::try_from(start).unwrap_or(0);
        if start >= end {
            return Vec::new();
        }

        self.end_drag_selection();
        if self.selection_mode == SelectionMode::Extended {
            if self.anchor.is_some() {
                self.end_selection();
            }
            self.reset_extended_selection();
        }

        let had_focus_child = self.focus_child.is_some();
        let mut grab = false;
        let mut new_focus = None;
        if let Some(focus) = self.focus_index()
            && (start..end).contains(&focus)
        {
            new_focus = if start > 0 {
                Some(self.children[start - 1].id())
            } else {
                self.children.get(end).map(Item::id)
            };
            grab = self.has_focus;
        }

        for index in start..end {
            if self.children[index].is_selected() {
                self.unselect_index(index);
            }
            let id = self.children[index].id();
            self.forget(id);
        }
        let removed: Vec<Item<T>> = self.children.drain(start..end).collect();
        debug!("[hlist] cleared {} item(s) from {}", removed.len(), start);

        if let Some(new) = new_focus {
            self.refocus_after_removal(new, grab, had_focus_child);

            if matches!(
                self.selection_mode,
                SelectionMode::Browse | SelectionMode::Extended
            ) && self.selection.is_empty()
            {
                self.last_focus_child = Some(new);
                self.select_child(new);
            }
        }

        self.outbox.push(ListEvent::ResizeRequested);
        removed
    }

    /// Tear the list down: every child is unselected and detached in index
    /// order, then handed back.
    pub fn shutdown(&mut self) -> Vec<Item<T>> {
        self.clear_items(0, -1)
    }

    /// Move focus to `new` after the focus child was removed.
    ///
    /// The removed child counts as focus history, so this is never a first
    /// focus and the committed selection is left alone.
    fn refocus_after_removal(&mut self, new: ItemId, grab: bool, had_focus_child: bool) {
        if self.last_focus_child.is_none() {
            self.last_focus_child = Some(new);
        }
        if grab {
            self.grab_focus(new);
        } else if had_focus_child {
            self.set_focus_child(Some(new));
        }
    }

    /// Drop every reference to an item that is about to leave the list.
    fn forget(&mut self, id: ItemId) {
        if self.undo_focus_child == Some(id) {
            self.undo_focus_child = None;
        }
        if self.last_focus_child == Some(id) {
            self.last_focus_child = None;
        }
        if self.focus_child == Some(id) {
            self.focus_child = None;
            self.has_focus = false;
        }
        self.selection.retain(|&s| s != id);
        self.undo_selection.retain(|&s| s != id);
        self.undo_unselection.retain(|&s| s != id);
    }

    /// Make an item sensitive or insensitive.
    ///
    /// An item losing sensitivity is unselected first.
    pub fn set_item_sensitive(&mut self, id: ItemId, sensitive: bool) {
        let Some(index) = self.checked_index(id) else {
            return;
        };

        if sensitive {
            if self.children[index].state == ItemState::Insensitive {
                self.set_state(index, ItemState::Normal);
            }
            return;
        }

        if self.selection.contains(&id) {
            self.set_state(index, ItemState::Selected);
            self.unselect_index(index);
        }
        self.set_state(index, ItemState::Insensitive);
    }

    // -------------------------------------------------------------------------
    // Focus
    // -------------------------------------------------------------------------

    pub fn focus_child(&self) -> Option<ItemId> {
        self.focus_child
    }

    pub fn last_focus_child(&self) -> Option<ItemId> {
        self.last_focus_child
    }

    /// Focus child recorded when the current gesture started.
    pub fn undo_focus_child(&self) -> Option<ItemId> {
        self.undo_focus_child
    }

    /// Whether the focus child holds keyboard focus.
    pub fn has_focus(&self) -> bool {
        self.has_focus && self.focus_child.is_some()
    }

    pub fn item_has_focus(&self, id: ItemId) -> bool {
        self.has_focus && self.focus_child == Some(id)
    }

    /// Give keyboard focus to a child.
    pub fn grab_focus(&mut self, id: ItemId) {
        let Some(index) = self.checked_index(id) else {
            return;
        };
        if !self.children[index].is_sensitive() {
            warn!("[hlist] {}", ListError::Insensitive(id));
            return;
        }

        self.has_focus = true;
        self.outbox.push(ListEvent::FocusRequested(id));
        self.set_focus_child(Some(id));
    }

    /// Focus-change notification: the host moved the focus child.
    ///
    /// The previous focus child is remembered, the vertical adjustment is
    /// scrolled to show the new one, and Browse mode selects it. In Extended
    /// mode the very first focus (no history, not in add mode) replaces the
    /// selection with the focused item.
    pub fn set_focus_child(&mut self, child: Option<ItemId>) {
        if let Some(id) = child
            && self.checked_index(id).is_none()
        {
            return;
        }

        if child != self.focus_child {
            if let Some(old) = self.focus_child {
                self.last_focus_child = Some(old);
            }
            self.focus_child = child;
        }

        let Some(focus) = self.focus_child else {
            self.has_focus = false;
            return;
        };
        let Some(index) = self.index_of(focus) else {
            return;
        };

        let area = self.children[index].allocation();
        if let Some(adj) = self.vadjustment.as_mut()
            && adj.clamp_page(area.top() as f64, area.bottom() as f64)
        {
            let value = adj.value;
            self.outbox.push(ListEvent::AdjustmentChanged {
                axis: Axis::Vertical,
                value,
            });
        }

        match self.selection_mode {
            SelectionMode::Browse => self.select_child(focus),
            SelectionMode::Extended => {
                if self.last_focus_child.is_none() && !self.add_mode {
                    self.undo_focus_child = self.last_focus_child;
                    self.replace_selection_on_first_focus(focus);
                }
            }
            _ => {}
        }
    }

    /// Keyboard focus traversal into or out of the list.
    ///
    /// Entering restores the last focus child (or the first/last sensitive
    /// child in `direction`) and returns true. Returns false when focus
    /// leaves; leaving commits any extended gesture.
    pub fn focus(&mut self, direction: FocusDirection) -> bool {
        let mut entered = false;

        if self.focus_child.is_none() || !self.has_focus {
            if let Some(last) = self.last_focus_child {
                self.set_focus_child(Some(last));
            }

            let sensitive = |item: &&Item<T>| item.is_sensitive();
            let target = self
                .focus_child
                .filter(|&id| self.item(id).is_some_and(Item::is_sensitive))
                .or_else(|| match direction {
                    FocusDirection::Forward => self.children.iter().find(sensitive).map(Item::id),
                    FocusDirection::Backward => {
                        self.children.iter().rev().find(sensitive).map(Item::id)
                    }
                });

            if let Some(target) = target {
                self.grab_focus(target);
                entered = true;
            }
        }

        if !entered {
            if self.selection_mode == SelectionMode::Extended && self.anchor.is_some() {
                self.end_selection();
            }
            if let Some(focus) = self.focus_child {
                self.last_focus_child = Some(focus);
            }
            self.has_focus = false;
        }

        entered
    }

    /// Keyboard focus left the list; the focus child is kept.
    pub fn focus_out(&mut self) {
        self.has_focus = false;
    }

    // -------------------------------------------------------------------------
    // Mapping
    // -------------------------------------------------------------------------

    pub fn is_mapped(&self) -> bool {
        self.mapped
    }

    pub fn map(&mut self) {
        self.mapped = true;
    }

    /// The list was hidden. A drag in progress is ended unconditionally and an
    /// extended gesture is committed.
    pub fn unmap(&mut self) {
        if !self.mapped {
            return;
        }
        self.mapped = false;

        if self.has_grab() {
            self.end_drag_selection();
            if self.anchor.is_some() && self.selection_mode == SelectionMode::Extended {
                self.end_selection();
            }
        }
    }

    // -------------------------------------------------------------------------
    // Adjustments
    // -------------------------------------------------------------------------

    pub fn set_hadjustment(&mut self, adjustment: Option<Adjustment>) {
        self.hadjustment = adjustment;
    }

    pub fn set_vadjustment(&mut self, adjustment: Option<Adjustment>) {
        self.vadjustment = adjustment;
    }

    pub fn hadjustment(&self) -> Option<&Adjustment> {
        self.hadjustment.as_ref()
    }

    pub fn vadjustment(&self) -> Option<&Adjustment> {
        self.vadjustment.as_ref()
    }

    /// Mutable access for the host to update page sizes and bounds.
    pub fn adjustment_mut(&mut self, axis: Axis) -> Option<&mut Adjustment> {
        match axis {
            Axis::Horizontal => self.hadjustment.as_mut(),
            Axis::Vertical => self.vadjustment.as_mut(),
        }
    }

    /// Move an adjustment, notifying the host if the value changed.
    pub(crate) fn move_adjustment(&mut self, axis: Axis, value: f64) {
        let Some(adj) = self.adjustment_mut(axis) else {
            return;
        };
        if adj.set_value(value) {
            let value = adj.value;
            self.outbox.push(ListEvent::AdjustmentChanged { axis, value });
        }
    }

    /// Current scroll offset of the viewport showing the list.
    pub(crate) fn scroll_offset(&self) -> (f64, f64) {
        (
            self.hadjustment.map_or(0.0, |adj| adj.value),
            self.vadjustment.map_or(0.0, |adj| adj.value),
        )
    }
}
