/// Scroll axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Kind of a discrete scroll request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollType {
    StepBackward,
    StepForward,
    PageBackward,
    PageForward,
    /// Jump to a fraction (0.0..=1.0) of the scrollable range.
    Jump,
}

/// A host-provided scroll range.
///
/// The visible window is `value..value + page_size` within `lower..upper`.
/// The list reads and writes `value`; the host reflects it visually.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Adjustment {
    pub value: f64,
    pub lower: f64,
    pub upper: f64,
    pub page_size: f64,
    pub step_increment: f64,
    pub page_increment: f64,
}

impl Adjustment {
    pub fn new(
        value: f64,
        lower: f64,
        upper: f64,
        step_increment: f64,
        page_increment: f64,
        page_size: f64,
    ) -> Self {
        Self {
            value,
            lower,
            upper,
            page_size,
            step_increment,
            page_increment,
        }
    }

    /// Largest value that still shows a full page.
    pub fn max_value(&self) -> f64 {
        (self.upper - self.page_size).max(self.lower)
    }

    /// End of the visible window.
    pub fn page_end(&self) -> f64 {
        self.value + self.page_size
    }

    /// True if `position` lies outside the visible window.
    pub fn is_outside_page(&self, position: f64) -> bool {
        position < self.value || position >= self.page_end()
    }

    /// Set the value, clamped to the valid range.
    /// Returns true if the value changed.
    pub fn set_value(&mut self, value: f64) -> bool {
        let value = value.clamp(self.lower, self.max_value());
        if value != self.value {
            self.value = value;
            true
        } else {
            false
        }
    }

    /// Scroll the minimum amount needed to make `lower..upper` visible.
    /// Returns true if the value changed.
    pub fn clamp_page(&mut self, lower: f64, upper: f64) -> bool {
        let lower = lower.clamp(self.lower, self.upper.max(self.lower));
        let upper = upper.clamp(self.lower, self.upper.max(self.lower));
        let mut changed = false;

        if self.value + self.page_size < upper {
            self.value = upper - self.page_size;
            changed = true;
        }
        if self.value > lower {
            self.value = lower;
            changed = true;
        }
        changed
    }

    /// Value a discrete scroll request would move to.
    /// `position` is only used by [`ScrollType::Jump`].
    pub fn scroll_target(&self, scroll: ScrollType, position: f64) -> f64 {
        let target = match scroll {
            ScrollType::StepBackward => self.value - self.step_increment,
            ScrollType::StepForward => self.value + self.step_increment,
            ScrollType::PageBackward => self.value - self.page_increment,
            ScrollType::PageForward => self.value + self.page_increment,
            ScrollType::Jump => self.lower + (self.upper - self.lower) * position,
        };
        target.clamp(self.lower, self.max_value())
    }
}
