//! A list container with gesture-driven selection.
//!
//! [`ListContainer`] owns a sequence of [`Item`]s and keeps a committed
//! selection in one of four [`SelectionMode`]s. Pointer and keyboard input go
//! in through plain method calls; everything the host has to react to comes
//! back out as [`ListEvent`]s drained with [`ListContainer::take_events`].
//!
//! ```ignore
//! use hlist::prelude::*;
//!
//! let mut list = ListContainer::with_config(ListConfig::new(SelectionMode::Extended));
//! let first = list.push(Item::new("alpha"));
//! list.select_child(first);
//! for event in list.take_events() {
//!     // redraw, reschedule timers, ...
//! }
//! ```

pub mod command;
pub mod config;
pub mod container;
pub mod error;
pub mod events;
pub mod gesture;
pub mod item;
pub mod keybinds;
pub mod layout;
pub mod scroll;
pub mod selection;

pub use command::ListCommand;
pub use config::{ListConfig, DEFAULT_AUTOSCROLL_INTERVAL};
pub use container::{AnchorRange, FocusDirection, ListContainer};
pub use error::ListError;
pub use events::{CaptureToken, ListEvent, TimerToken};
pub use item::{Item, ItemId, ItemState};
pub use keybinds::{default_keybinds, KeyCombo, KeyPhase, Keybinds};
pub use selection::SelectionMode;

pub mod prelude {
    pub use crate::command::ListCommand;
    pub use crate::config::ListConfig;
    pub use crate::container::{AnchorRange, FocusDirection, ListContainer};
    pub use crate::error::ListError;
    pub use crate::events::{ListEvent, TimerToken};
    pub use crate::item::{Item, ItemId, ItemState};
    pub use crate::keybinds::{default_keybinds, KeyCombo, KeyPhase, Keybinds};
    pub use crate::selection::SelectionMode;

    pub use hlist_core::{
        Adjustment, Axis, Key, Modifiers, MouseButton, Point, PressKind, Rect, ScrollType, Size,
    };
}
