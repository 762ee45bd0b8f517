//! Precondition failures.
//!
//! Operations log these and return without changing anything.
//! [`ListContainer::handle_command`](crate::ListContainer::handle_command)
//! also hands the error back to the sender.

use thiserror::Error;

use crate::item::ItemId;

/// A violated precondition of a list operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    /// The id does not name a child of this list.
    #[error("item {0} is not a child of this list")]
    NotAChild(ItemId),

    /// The item cannot be selected, focused or targeted.
    #[error("item {0} is insensitive")]
    Insensitive(ItemId),
}
