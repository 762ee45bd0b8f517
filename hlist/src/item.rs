//! Child items owned by a [`ListContainer`](crate::ListContainer).

use std::sync::atomic::{AtomicU64, Ordering};

use hlist_core::{Rect, Size};

/// Unique identifier for a list item.
///
/// Ids are process-unique, so an id taken from one list never aliases an item
/// in another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u64);

impl ItemId {
    fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__item_{}", self.0)
    }
}

/// Visual state of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum ItemState {
    #[default]
    Normal,
    Selected,
    /// Never a select or deselect target.
    Insensitive,
}

/// A child of the list.
///
/// The state is only changed by the owning container; the payload is free for
/// the host to use.
#[derive(Debug, Clone)]
pub struct Item<T> {
    id: ItemId,
    pub(crate) state: ItemState,
    requisition: Size,
    pub(crate) allocation: Rect,
    data: T,
}

impl<T> Item<T> {
    /// Create a sensitive item with a 1x1 size request.
    pub fn new(data: T) -> Self {
        Self {
            id: ItemId::new(),
            state: ItemState::Normal,
            requisition: Size::new(1, 1),
            allocation: Rect::default(),
            data,
        }
    }

    /// Set the size this item asks for during layout.
    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.requisition = Size::new(width, height);
        self
    }

    /// Mark the item insensitive.
    pub fn insensitive(mut self) -> Self {
        self.state = ItemState::Insensitive;
        self
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn state(&self) -> ItemState {
        self.state
    }

    pub fn is_selected(&self) -> bool {
        self.state == ItemState::Selected
    }

    pub fn is_sensitive(&self) -> bool {
        self.state != ItemState::Insensitive
    }

    pub fn requisition(&self) -> Size {
        self.requisition
    }

    pub fn set_requisition(&mut self, size: Size) {
        self.requisition = size;
    }

    /// Area assigned by the last layout pass.
    pub fn allocation(&self) -> Rect {
        self.allocation
    }

    /// Override the allocation, for hosts that lay items out themselves.
    pub fn set_allocation(&mut self, allocation: Rect) {
        self.allocation = allocation;
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }

    pub fn into_data(self) -> T {
        self.data
    }
}
