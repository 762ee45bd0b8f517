//! Column layout.
//!
//! Children are stacked top to bottom in uniform cells the size of the
//! largest child, wrapping into a new column when the allocated height is
//! used up.

use hlist_core::{Rect, Size};

use crate::container::ListContainer;

impl<T> ListContainer<T> {
    /// Size the list asks for: the widest child by the sum of child heights,
    /// plus the border.
    pub fn size_request(&self) -> Size {
        let border = self.config.border_width;
        let (width, height) = self
            .children
            .iter()
            .map(|item| item.requisition())
            .fold((0, 0), |(w, h), req| (w.max(req.width), h + req.height));

        Size::new((width + border * 2).max(1), (height + border * 2).max(1))
    }

    /// Lay the children out inside `allocation`.
    pub fn size_allocate(&mut self, allocation: Rect) {
        self.allocation = allocation;
        if self.children.is_empty() {
            return;
        }

        let border = self.config.border_width;
        let cell = self.cell_size();
        let rows = self.rows_per_column(cell);

        for (n, item) in self.children.iter_mut().enumerate() {
            let n = n as i32;
            let column = n / rows;
            let row = n % rows;
            item.allocation = Rect::new(
                border + column * cell.width,
                border + row * cell.height,
                cell.width,
                cell.height,
            );
        }
    }

    /// Extent of the laid-out children, for sizing scroll ranges.
    pub fn content_size(&self) -> Size {
        if self.children.is_empty() {
            return Size::new(0, 0);
        }
        let border = self.config.border_width;
        let cell = self.cell_size();
        let rows = self.rows_per_column(cell);
        let count = self.children.len() as i32;
        let columns = (count + rows - 1) / rows;

        Size::new(
            columns * cell.width + border * 2,
            rows.min(count) * cell.height + border * 2,
        )
    }

    fn cell_size(&self) -> Size {
        let (width, height) = self
            .children
            .iter()
            .map(|item| item.requisition())
            .fold((0, 0), |(w, h), req| (w.max(req.width), h.max(req.height)));
        Size::new(width.max(1), height.max(1))
    }

    fn rows_per_column(&self, cell: Size) -> i32 {
        let usable = self.allocation.height - self.config.border_width * 2;
        (usable / cell.height).max(1)
    }
}
