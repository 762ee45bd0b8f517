pub mod adjustment;
pub mod event;
pub mod geometry;

pub use adjustment::{Adjustment, Axis, ScrollType};
pub use event::{Key, Modifiers, MouseButton, PressKind};
pub use geometry::{Point, Rect, Size};
