//! Input vocabulary shared by the list and its hosts.
//!
//! Only the keys and buttons the list reacts to get their own variants;
//! everything else from the terminal collapses into [`Key::Other`].

use crossterm::event as ct;

/// A key, as seen by key bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Space,
    Enter,
    Escape,
    Delete,
    Insert,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    /// Either shift key on its own (press or release).
    Shift,
    F(u8),
    /// Any key without a binding-relevant meaning.
    Other,
}

/// Held modifier keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self::new(false, false, false);

    pub const fn new(shift: bool, ctrl: bool, alt: bool) -> Self {
        Self { shift, ctrl, alt }
    }

    pub const fn shift() -> Self {
        Self::new(true, false, false)
    }

    pub const fn ctrl() -> Self {
        Self::new(false, true, false)
    }

    pub const fn ctrl_shift() -> Self {
        Self::new(true, true, false)
    }

    pub const fn is_empty(&self) -> bool {
        !(self.shift || self.ctrl || self.alt)
    }
}

/// Pointer button. Only `Left` drives selection gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// How a pointer press was produced.
///
/// Only an `Initial` press starts a drag gesture; repeated presses (double or
/// triple clicks) act on the row immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PressKind {
    #[default]
    Initial,
    Double,
    Triple,
}

impl PressKind {
    pub fn is_initial(self) -> bool {
        self == PressKind::Initial
    }
}

impl From<ct::KeyCode> for Key {
    fn from(code: ct::KeyCode) -> Self {
        use ct::{KeyCode, ModifierKeyCode};

        match code {
            KeyCode::Char(' ') => Key::Space,
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Delete => Key::Delete,
            KeyCode::Insert => Key::Insert,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::F(n) => Key::F(n),
            KeyCode::Modifier(ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift) => {
                Key::Shift
            }
            _ => Key::Other,
        }
    }
}

impl From<ct::KeyModifiers> for Modifiers {
    fn from(mods: ct::KeyModifiers) -> Self {
        use ct::KeyModifiers as M;
        Self::new(
            mods.contains(M::SHIFT),
            mods.contains(M::CONTROL),
            mods.contains(M::ALT),
        )
    }
}

impl From<ct::MouseButton> for MouseButton {
    fn from(button: ct::MouseButton) -> Self {
        match button {
            ct::MouseButton::Left => MouseButton::Left,
            ct::MouseButton::Right => MouseButton::Right,
            ct::MouseButton::Middle => MouseButton::Middle,
        }
    }
}
