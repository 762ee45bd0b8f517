//! Discrete scrolling and keyboard range extension.

use hlist_core::{Axis, ScrollType};

use crate::container::ListContainer;
use crate::selection::SelectionMode;

impl<T> ListContainer<T> {
    /// Scroll the horizontal adjustment without touching focus or selection.
    pub fn scroll_horizontal(&mut self, scroll: ScrollType, position: f64) {
        if self.has_grab() {
            return;
        }
        let Some(adj) = self.hadjustment else {
            return;
        };
        let value = adj.scroll_target(scroll, position);
        self.move_adjustment(Axis::Horizontal, value);
    }

    /// Move focus vertically.
    ///
    /// In Extended mode outside add mode the newly focused item replaces the
    /// selection. Ignored while a gesture is in progress.
    pub fn scroll_vertical(&mut self, scroll: ScrollType, position: f64) {
        if self.has_grab() {
            return;
        }

        if self.selection_mode != SelectionMode::Extended {
            self.move_focus_child(scroll, position);
            return;
        }
        if self.anchor.is_some() {
            return;
        }

        let old_focus = self.focus_child;
        self.undo_focus_child = old_focus;
        self.move_focus_child(scroll, position);

        if old_focus != self.focus_child
            && !self.add_mode
            && let Some(focus) = self.focus_child
        {
            self.unselect_all();
            self.select_child(focus);
        }
    }

    /// Move focus and drag the current range along with it.
    ///
    /// With `auto_start` a gesture is anchored at the current focus first;
    /// without it there must already be one.
    pub fn extend_selection(&mut self, scroll: ScrollType, position: f64, auto_start: bool) {
        if self.has_grab() || self.selection_mode != SelectionMode::Extended {
            return;
        }

        if auto_start {
            if let Some(focus) = self.focus_child
                && let Some(row) = self.index_of(focus)
            {
                self.set_anchor(self.add_mode, row, Some(focus));
            }
        } else if self.anchor.is_none() {
            return;
        }

        self.move_focus_child(scroll, position);
        if let Some(row) = self.focus_index() {
            self.update_extended_selection(row as isize);
        }
    }

    /// Move keyboard focus by a step, a page, or to a fraction of the list.
    ///
    /// Paging uses the vertical adjustment to find the row a page away; without
    /// one it goes to the first or last child.
    pub fn move_focus_child(&mut self, scroll: ScrollType, position: f64) {
        let count = self.children.len();
        if count == 0 {
            return;
        }
        let index = self.focus_index().unwrap_or(0);

        let target = match scroll {
            ScrollType::StepBackward => (0..index)
                .rev()
                .find(|&i| self.children[i].is_sensitive()),
            ScrollType::StepForward => {
                (index + 1..count).find(|&i| self.children[i].is_sensitive())
            }
            ScrollType::PageBackward => {
                if index == 0 {
                    return;
                }
                Some(self.page_backward_row(index))
            }
            ScrollType::PageForward => {
                if index + 1 >= count {
                    return;
                }
                Some(self.page_forward_row(index))
            }
            ScrollType::Jump => {
                let offset = self.allocation.height as f64 * position.clamp(0.0, 1.0);
                let (found, last) = self.scan_for_row(0, offset, true);
                Some(found.unwrap_or(last))
            }
        };

        if let Some(row) = target
            && self.children[row].is_sensitive()
        {
            let id = self.children[row].id();
            self.grab_focus(id);
        }
    }

    fn page_backward_row(&self, index: usize) -> usize {
        let Some(adj) = self.vadjustment else {
            return 0;
        };
        let area = self.children[index].allocation();

        let mut offset = adj.value;
        let mut correct = false;
        if area.top() as f64 <= adj.value {
            offset = (area.bottom() as f64 - adj.page_size).max(adj.lower);
            correct = true;
        }

        let (found, last) = self.scan_for_row(index, offset, area.top() as f64 <= offset);
        let row = found.unwrap_or(last);
        if correct
            && found.is_some()
            && row + 1 < self.children.len()
            && (self.children[row].allocation().top() as f64) < offset
        {
            row + 1
        } else {
            row
        }
    }

    fn page_forward_row(&self, index: usize) -> usize {
        let last_row = self.children.len() - 1;
        let Some(adj) = self.vadjustment else {
            return last_row;
        };
        let area = self.children[index].allocation();

        let mut offset = adj.value;
        let mut correct = false;
        if area.bottom() as f64 >= adj.page_end() {
            offset = area.top() as f64;
            correct = true;
        }
        let offset = (offset + adj.page_size).min(adj.upper);

        let (found, last) = self.scan_for_row(index, offset, area.top() as f64 <= offset);
        let row = found.unwrap_or(last);
        if correct
            && found.is_some()
            && row > 0
            && (self.children[row].allocation().bottom() - 1) as f64 > offset
        {
            row - 1
        } else {
            row
        }
    }

    /// Walk from `from` looking for the child whose vertical extent covers
    /// `offset`. Returns the match, if any, and the last row examined.
    fn scan_for_row(&self, from: usize, offset: f64, forward: bool) -> (Option<usize>, usize) {
        let covers = |row: usize| {
            let area = self.children[row].allocation();
            area.top() as f64 <= offset && area.bottom() as f64 > offset
        };

        let mut last = from;
        if forward {
            for row in from..self.children.len() {
                last = row;
                if covers(row) {
                    return (Some(row), row);
                }
            }
        } else {
            for row in (0..=from).rev() {
                last = row;
                if covers(row) {
                    return (Some(row), row);
                }
            }
        }
        (None, last)
    }
}
