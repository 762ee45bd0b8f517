//! List configuration types.

use std::time::Duration;

use crate::selection::SelectionMode;

/// Interval between autoscroll ticks while a drag is past the viewport edge.
pub const DEFAULT_AUTOSCROLL_INTERVAL: Duration = Duration::from_millis(100);

/// Per-list configuration.
#[derive(Debug, Clone)]
pub struct ListConfig {
    /// Selection mode the list starts in.
    pub selection_mode: SelectionMode,

    /// Delay before an armed autoscroll timer fires.
    pub autoscroll_interval: Duration,

    /// Empty space kept around the children during layout.
    pub border_width: i32,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            selection_mode: SelectionMode::Single,
            autoscroll_interval: DEFAULT_AUTOSCROLL_INTERVAL,
            border_width: 0,
        }
    }
}

impl ListConfig {
    /// Create a new config with the given selection mode.
    pub fn new(selection_mode: SelectionMode) -> Self {
        Self {
            selection_mode,
            ..Default::default()
        }
    }

    /// Set the autoscroll interval.
    pub fn autoscroll_interval(mut self, interval: Duration) -> Self {
        self.autoscroll_interval = interval;
        self
    }

    /// Set the border width.
    pub fn border_width(mut self, width: i32) -> Self {
        self.border_width = width.max(0);
        self
    }
}
