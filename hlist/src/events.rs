//! Notifications the list sends to its host.
//!
//! Every operation appends to an outbox instead of calling back into the host;
//! drain it with [`ListContainer::take_events`](crate::ListContainer::take_events)
//! after handling input.

use std::time::Duration;

use hlist_core::Axis;

use crate::item::{ItemId, ItemState};

/// Identifies one scheduled autoscroll timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(pub(crate) u64);

/// Identifies one period of captured pointer input.
///
/// While a capture is active the host must route every pointer motion and
/// release to the list that issued it, even outside its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CaptureToken(pub(crate) u64);

/// A notification for the host.
#[derive(Debug, Clone, PartialEq)]
pub enum ListEvent {
    /// The committed selection gained or lost one item.
    SelectionChanged,
    /// An item changed visual state and should be redrawn.
    ItemStateChanged { item: ItemId, state: ItemState },
    /// The item wants redrawing without a state change (add-mode affordance).
    RedrawRequested(ItemId),
    /// Keyboard focus should move to the item.
    FocusRequested(ItemId),
    /// Start routing pointer input to this list.
    InputCaptured(CaptureToken),
    /// Stop routing pointer input to this list.
    InputReleased(CaptureToken),
    /// Call `timer_fired(axis, token)` once `delay` has elapsed.
    TimerScheduled {
        axis: Axis,
        token: TimerToken,
        delay: Duration,
    },
    /// The timer will not be needed; firing it anyway is harmless.
    TimerCancelled { axis: Axis, token: TimerToken },
    /// The list moved an adjustment.
    AdjustmentChanged { axis: Axis, value: f64 },
    /// Children were added or removed; layout should run again.
    ResizeRequested,
}

/// Pending notifications.
#[derive(Debug, Default)]
pub(crate) struct Outbox {
    events: Vec<ListEvent>,
    next_token: u64,
}

impl Outbox {
    pub(crate) fn push(&mut self, event: ListEvent) {
        log::trace!("[hlist] emit {:?}", event);
        self.events.push(event);
    }

    pub(crate) fn take(&mut self) -> Vec<ListEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn peek(&self) -> &[ListEvent] {
        &self.events
    }

    fn next(&mut self) -> u64 {
        self.next_token += 1;
        self.next_token
    }

    pub(crate) fn timer_token(&mut self) -> TimerToken {
        TimerToken(self.next())
    }

    pub(crate) fn capture_token(&mut self) -> CaptureToken {
        CaptureToken(self.next())
    }
}
