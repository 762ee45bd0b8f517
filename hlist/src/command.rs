//! Requests a child sends to its list.

use hlist_core::ScrollType;
use log::{trace, warn};

use crate::container::ListContainer;
use crate::error::ListError;
use crate::item::ItemId;

/// An action a child asks its containing list to perform.
///
/// Items never reach into the list directly; key bindings and item
/// behaviour turn into one of these and go through
/// [`ListContainer::handle_command`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ListCommand {
    ToggleFocusRow,
    SelectAll,
    UnselectAll,
    UndoSelection,
    StartSelection,
    EndSelection,
    ExtendSelection {
        scroll: ScrollType,
        position: f64,
        auto_start: bool,
    },
    ScrollHorizontal {
        scroll: ScrollType,
        position: f64,
    },
    ScrollVertical {
        scroll: ScrollType,
        position: f64,
    },
    ToggleAddMode,
    /// Toggle the sending item itself.
    Toggle,
    /// A drag-and-drop operation started on the sending item.
    DragBegin,
}

impl<T> ListContainer<T> {
    /// Run a command sent by `source`.
    ///
    /// Commands from items that are not children of this list are rejected.
    pub fn handle_command(&mut self, source: ItemId, command: ListCommand) -> Result<(), ListError> {
        if let Err(err) = self.require_child(source) {
            warn!("[hlist] rejected {:?}: {}", command, err);
            return Err(err);
        }
        trace!("[hlist] {:?} from {}", command, source);

        match command {
            ListCommand::ToggleFocusRow => self.toggle_focus_row(),
            ListCommand::SelectAll => self.select_all(),
            ListCommand::UnselectAll => self.unselect_all(),
            ListCommand::UndoSelection => self.undo_selection(),
            ListCommand::StartSelection => self.start_selection(),
            ListCommand::EndSelection => self.end_selection(),
            ListCommand::ExtendSelection {
                scroll,
                position,
                auto_start,
            } => self.extend_selection(scroll, position, auto_start),
            ListCommand::ScrollHorizontal { scroll, position } => {
                self.scroll_horizontal(scroll, position)
            }
            ListCommand::ScrollVertical { scroll, position } => {
                self.scroll_vertical(scroll, position)
            }
            ListCommand::ToggleAddMode => self.toggle_add_mode(),
            ListCommand::Toggle => self.toggle_child(source),
            ListCommand::DragBegin => self.drag_begin(),
        }
        Ok(())
    }
}
