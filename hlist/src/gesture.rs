//! Pointer gestures: input capture, drag selection and autoscroll.
//!
//! A primary-button press captures pointer input until the matching release.
//! While the drag is active every motion re-resolves the row under the pointer
//! and extends the selection to it. Past the edge of the visible page the list
//! asks the host for a one-shot timer per axis; when it fires the last pointer
//! position is replayed, which re-arms the timer as long as the pointer stays
//! outside.

use hlist_core::{Axis, Modifiers, MouseButton, Point, PressKind};
use log::{debug, trace};

use crate::container::{AnchorRange, ListContainer};
use crate::events::{CaptureToken, ListEvent, TimerToken};
use crate::item::{Item, ItemId};
use crate::selection::SelectionMode;

/// Drag and autoscroll bookkeeping.
#[derive(Debug, Default)]
pub(crate) struct GestureState {
    pub(crate) capture: Option<CaptureToken>,
    pub(crate) dragging: bool,
    pub(crate) htimer: Option<TimerToken>,
    pub(crate) vtimer: Option<TimerToken>,
    /// Last pointer position, relative to the scrolled viewport.
    pub(crate) pointer: Point,
}

impl GestureState {
    fn timer_mut(&mut self, axis: Axis) -> &mut Option<TimerToken> {
        match axis {
            Axis::Horizontal => &mut self.htimer,
            Axis::Vertical => &mut self.vtimer,
        }
    }
}

impl<T> ListContainer<T> {
    /// True while pointer input is captured by a press.
    pub fn has_grab(&self) -> bool {
        self.gesture.capture.is_some()
    }

    /// True while a press-and-drag gesture is extending the selection.
    pub fn is_dragging(&self) -> bool {
        self.gesture.dragging
    }

    /// Pending autoscroll timer on `axis`.
    pub fn pending_timer(&self, axis: Axis) -> Option<TimerToken> {
        match axis {
            Axis::Horizontal => self.gesture.htimer,
            Axis::Vertical => self.gesture.vtimer,
        }
    }

    /// The sensitive child whose allocation contains `point`.
    pub fn child_at(&self, point: Point) -> Option<ItemId> {
        self.hit_index(point).map(|index| self.children[index].id())
    }

    fn hit_index(&self, point: Point) -> Option<usize> {
        self.children.iter().position(|item| item.hit(point))
    }

    // -------------------------------------------------------------------------
    // Pointer input
    // -------------------------------------------------------------------------

    /// A pointer button went down at `position`.
    ///
    /// Returns true if the press landed on a child and was handled.
    pub fn pointer_press(
        &mut self,
        position: Point,
        button: MouseButton,
        modifiers: Modifiers,
        kind: PressKind,
    ) -> bool {
        if button != MouseButton::Left {
            return false;
        }
        let Some(index) = self.hit_index(position) else {
            return false;
        };
        let id = self.children[index].id();
        debug!("[hlist] press on row {} ({:?}, {:?})", index, kind, modifiers);

        if kind.is_initial() {
            let token = self.outbox.capture_token();
            self.gesture.capture = Some(token);
            self.gesture.dragging = true;
            self.outbox.push(ListEvent::InputCaptured(token));
        } else if self.has_grab() {
            self.end_drag_selection();
        }

        if !self.item_has_focus(id) {
            self.grab_focus(id);
        }

        if self.add_mode {
            self.add_mode = false;
            self.outbox.push(ListEvent::RedrawRequested(id));
        }

        match self.selection_mode {
            SelectionMode::Single | SelectionMode::Multiple => {
                if kind.is_initial() {
                    self.undo_focus_child = Some(id);
                } else {
                    self.select_index(index);
                }
            }
            SelectionMode::Browse => {}
            SelectionMode::Extended => self.extended_press(index, modifiers, kind),
        }

        true
    }

    fn extended_press(&mut self, focus_row: usize, modifiers: Modifiers, kind: PressKind) {
        let id = self.children[focus_row].id();
        let last_focus_row = match self.last_focus_child.and_then(|last| self.index_of(last)) {
            Some(row) => row,
            None => {
                self.last_focus_child = Some(id);
                focus_row
            }
        };
        let last_focus = self.last_focus_child;
        let focus_row_signed = focus_row as isize;

        if !kind.is_initial() {
            if self.anchor.is_some() {
                self.update_extended_selection(focus_row_signed);
                self.end_selection();
            }
            self.select_index(focus_row);
            return;
        }

        if modifiers.ctrl && modifiers.shift {
            if self.anchor.is_none() {
                self.undo_selection.clear();
                self.undo_unselection.clear();
                self.anchor = Some(AnchorRange {
                    anchor: last_focus_row,
                    drag_pos: last_focus_row,
                });
                self.undo_focus_child = last_focus;
            }
            self.update_extended_selection(focus_row_signed);
        } else if modifiers.ctrl {
            if self.anchor.is_none() {
                self.set_anchor(true, focus_row, last_focus);
            } else {
                self.update_extended_selection(focus_row_signed);
            }
        } else if modifiers.shift {
            self.set_anchor(false, last_focus_row, last_focus);
            self.update_extended_selection(focus_row_signed);
        } else if self.anchor.is_none() {
            self.set_anchor(false, focus_row, last_focus);
        } else {
            self.update_extended_selection(focus_row_signed);
        }
    }

    /// The pointer moved to `position`.
    ///
    /// Ignored unless a drag is active.
    pub fn pointer_motion(&mut self, position: Point) {
        let (x, y) = self.scroll_offset();
        self.gesture.pointer = position.offset(-(x as i32), -(y as i32));
        self.motion_notify(position);
    }

    /// A pointer button was released at `position`.
    ///
    /// The drag always ends here. Extended mode commits the gesture unless
    /// Shift is held; Single and Multiple toggle the item if the release lands
    /// on the item that was pressed.
    pub fn pointer_release(
        &mut self,
        position: Point,
        button: MouseButton,
        modifiers: Modifiers,
    ) -> bool {
        if button != MouseButton::Left {
            return false;
        }

        let was_dragging = self.gesture.dragging;
        self.end_drag_selection();
        if !was_dragging {
            return false;
        }

        match self.selection_mode {
            SelectionMode::Extended => {
                if !modifiers.shift {
                    self.end_selection();
                }
            }
            SelectionMode::Single | SelectionMode::Multiple => {
                if let Some(target) = self.child_at(position)
                    && self.undo_focus_child == Some(target)
                {
                    self.toggle_row(target);
                }
                self.undo_focus_child = None;
            }
            SelectionMode::Browse => {}
        }

        true
    }

    /// An autoscroll timer fired. Tokens that are no longer pending are
    /// ignored.
    pub fn timer_fired(&mut self, axis: Axis, token: TimerToken) {
        let slot = self.gesture.timer_mut(axis);
        if *slot != Some(token) {
            trace!("[hlist] stale {:?} timer {:?}", axis, token);
            return;
        }
        *slot = None;

        let (x, y) = self.scroll_offset();
        let position = self.gesture.pointer.offset(x as i32, y as i32);
        self.motion_notify(position);
    }

    /// Release the input capture and cancel both autoscroll timers.
    pub fn end_drag_selection(&mut self) {
        self.gesture.dragging = false;

        if let Some(token) = self.gesture.capture.take() {
            self.outbox.push(ListEvent::InputReleased(token));
        }

        for axis in [Axis::Horizontal, Axis::Vertical] {
            if let Some(token) = self.gesture.timer_mut(axis).take() {
                self.outbox.push(ListEvent::TimerCancelled { axis, token });
            }
        }
    }

    /// A drag-and-drop operation started from one of the children.
    pub fn drag_begin(&mut self) {
        if self.gesture.dragging {
            self.end_drag_selection();
        }

        match self.selection_mode {
            SelectionMode::Extended => self.end_selection(),
            SelectionMode::Single | SelectionMode::Multiple => self.undo_focus_child = None,
            SelectionMode::Browse => {}
        }
    }

    // -------------------------------------------------------------------------
    // Motion
    // -------------------------------------------------------------------------

    fn schedule_timer(&mut self, axis: Axis) {
        let token = self.outbox.timer_token();
        *self.gesture.timer_mut(axis) = Some(token);
        let delay = self.config.autoscroll_interval;
        self.outbox
            .push(ListEvent::TimerScheduled { axis, token, delay });
    }

    fn motion_notify(&mut self, position: Point) {
        if !self.gesture.dragging || self.children.is_empty() {
            return;
        }

        if let Some(adj) = self.hadjustment
            && self.allocation.width as f64 > adj.page_size
        {
            let x = position.x as f64;
            if x < adj.value || x >= adj.page_end() {
                if self.gesture.htimer.is_some() {
                    return;
                }
                self.schedule_timer(Axis::Horizontal);

                let at_start = x < adj.value && adj.value <= 0.0;
                let at_end = x >= adj.page_end() && adj.value >= adj.upper - adj.page_size;
                if !(at_start || at_end) {
                    let value = if x < adj.value {
                        adj.value + (x - adj.value) / 2.0 - 1.0
                    } else {
                        adj.value + 1.0 + (x - adj.page_end()) / 2.0
                    };
                    let value = value.clamp(0.0, (adj.upper - adj.page_size).max(0.0));
                    self.move_adjustment(Axis::Horizontal, value);
                }
            }
        }

        // Linear scan by vertical extent only; the first row at or below the
        // pointer wins.
        let y = position.y;
        let count = self.children.len();
        let row = self
            .children
            .iter()
            .position(|item| {
                let area = item.allocation();
                area.top() > y || area.spans_y(y)
            })
            .unwrap_or(count - 1);
        let focus_row = self.focus_index();

        if self.gesture.vtimer.is_some() {
            return;
        }

        let (top, bottom) = match self.vadjustment {
            Some(adj) => (adj.value, adj.page_end()),
            None => (0.0, self.allocation.height as f64),
        };
        let above = (y as f64) < top;
        let below = (y as f64) > bottom;
        let at_first = focus_row == Some(0);
        let at_last = focus_row.is_some_and(|row| row + 1 >= count);
        if (above && !at_first) || (below && !at_last) {
            self.schedule_timer(Axis::Vertical);
        }

        let target = self.children[row].id();
        if focus_row != Some(row) && self.children[row].is_sensitive() {
            self.grab_focus(target);
        }

        match self.selection_mode {
            SelectionMode::Browse => self.select_index(row),
            SelectionMode::Extended => self.update_extended_selection(row as isize),
            _ => {}
        }
    }
}

impl<T> Item<T> {
    /// True if the item accepts pointer presses at `point`.
    pub fn hit(&self, point: Point) -> bool {
        self.is_sensitive() && self.allocation().contains(point)
    }
}
