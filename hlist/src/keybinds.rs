//! Key bindings for list items.

use std::collections::HashMap;

use hlist_core::{Key, Modifiers, ScrollType};
use log::trace;

use crate::command::ListCommand;
use crate::container::ListContainer;

/// A key combination (key + modifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    /// The key code
    pub key: Key,
    /// Modifier keys
    pub modifiers: Modifiers,
}

impl KeyCombo {
    /// Create a new key combo
    pub const fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Create a key combo without modifiers
    pub const fn key(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    /// Add ctrl modifier
    pub const fn ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }

    /// Add shift modifier
    pub const fn shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }

    /// A lone Shift key matches with or without the Shift modifier.
    fn normalized(mut self) -> Self {
        if self.key == Key::Shift {
            self.modifiers.shift = false;
        }
        self
    }
}

/// Whether a key went down or came back up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyPhase {
    #[default]
    Press,
    Release,
}

/// Key combination to command lookup, per phase.
#[derive(Debug, Clone, Default)]
pub struct Keybinds {
    press: HashMap<KeyCombo, ListCommand>,
    release: HashMap<KeyCombo, ListCommand>,
}

impl Keybinds {
    /// Create empty keybinds
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a key press
    pub fn bind(&mut self, combo: KeyCombo, command: ListCommand) {
        self.press.insert(combo.normalized(), command);
    }

    /// Bind a key release
    pub fn bind_release(&mut self, combo: KeyCombo, command: ListCommand) {
        self.release.insert(combo.normalized(), command);
    }

    /// Look up the command for a key event
    pub fn get(&self, phase: KeyPhase, combo: KeyCombo) -> Option<ListCommand> {
        let map = match phase {
            KeyPhase::Press => &self.press,
            KeyPhase::Release => &self.release,
        };
        map.get(&combo.normalized()).copied()
    }

    pub fn len(&self) -> usize {
        self.press.len() + self.release.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Merge another keybinds collection into this one; its bindings win.
    pub fn merge(&mut self, other: Keybinds) {
        self.press.extend(other.press);
        self.release.extend(other.release);
    }
}

fn vertical(scroll: ScrollType, position: f64) -> ListCommand {
    ListCommand::ScrollVertical { scroll, position }
}

fn horizontal(scroll: ScrollType, position: f64) -> ListCommand {
    ListCommand::ScrollHorizontal { scroll, position }
}

fn extend(scroll: ScrollType, position: f64) -> ListCommand {
    ListCommand::ExtendSelection {
        scroll,
        position,
        auto_start: true,
    }
}

/// The standard list-item bindings.
pub fn default_keybinds() -> Keybinds {
    let mut binds = Keybinds::new();

    binds.bind(KeyCombo::key(Key::Up), vertical(ScrollType::StepBackward, 0.0));
    binds.bind(KeyCombo::key(Key::Down), vertical(ScrollType::StepForward, 0.0));
    binds.bind(KeyCombo::key(Key::PageUp), vertical(ScrollType::PageBackward, 0.0));
    binds.bind(KeyCombo::key(Key::PageDown), vertical(ScrollType::PageForward, 0.0));
    binds.bind(KeyCombo::key(Key::Home).ctrl(), vertical(ScrollType::Jump, 0.0));
    binds.bind(KeyCombo::key(Key::End).ctrl(), vertical(ScrollType::Jump, 1.0));

    binds.bind(KeyCombo::key(Key::Up).shift(), extend(ScrollType::StepBackward, 0.0));
    binds.bind(KeyCombo::key(Key::Down).shift(), extend(ScrollType::StepForward, 0.0));
    binds.bind(KeyCombo::key(Key::PageUp).shift(), extend(ScrollType::PageBackward, 0.0));
    binds.bind(KeyCombo::key(Key::PageDown).shift(), extend(ScrollType::PageForward, 0.0));
    binds.bind(KeyCombo::key(Key::Home).ctrl().shift(), extend(ScrollType::Jump, 0.0));
    binds.bind(KeyCombo::key(Key::End).ctrl().shift(), extend(ScrollType::Jump, 1.0));

    binds.bind(KeyCombo::key(Key::Left), horizontal(ScrollType::StepBackward, 0.0));
    binds.bind(KeyCombo::key(Key::Right), horizontal(ScrollType::StepForward, 0.0));
    binds.bind(KeyCombo::key(Key::Home), horizontal(ScrollType::Jump, 0.0));
    binds.bind(KeyCombo::key(Key::End), horizontal(ScrollType::Jump, 1.0));

    binds.bind(KeyCombo::key(Key::Escape), ListCommand::UndoSelection);
    binds.bind(KeyCombo::key(Key::Space), ListCommand::ToggleFocusRow);
    binds.bind(KeyCombo::key(Key::Space).ctrl(), ListCommand::ToggleAddMode);
    binds.bind(KeyCombo::key(Key::Char('/')).ctrl(), ListCommand::SelectAll);
    binds.bind(KeyCombo::key(Key::Char('\\')).ctrl(), ListCommand::UnselectAll);

    binds.bind(KeyCombo::key(Key::Shift), ListCommand::StartSelection);
    binds.bind_release(KeyCombo::key(Key::Shift), ListCommand::EndSelection);

    binds
}

impl<T> ListContainer<T> {
    /// Route a key event to the focus child's bindings.
    ///
    /// Returns true if a binding matched and the command ran.
    pub fn handle_key(&mut self, keybinds: &Keybinds, phase: KeyPhase, combo: KeyCombo) -> bool {
        let Some(focus) = self.focus_child else {
            return false;
        };
        let Some(command) = keybinds.get(phase, combo) else {
            trace!("[hlist] unbound {:?} {:?}", phase, combo);
            return false;
        };
        self.handle_command(focus, command).is_ok()
    }
}
