//! Keyboard input primitives.
use std::ops::Add;

/// Modifier key state.
#[derive(Default, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Mods {
    /// Shift is held.
    pub shift: bool,
    /// Control is held.
    pub ctrl: bool,
    /// Alt or option is held.
    pub alt: bool,
    /// Meta, command or super is held.
    pub meta: bool,
}

impl Mods {
    /// No modifiers held.
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };
    /// Shift only.
    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };
    /// Control only.
    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };
    /// Alt only.
    pub const ALT: Self = Self {
        alt: true,
        ..Self::NONE
    };
    /// Meta only.
    pub const META: Self = Self {
        meta: true,
        ..Self::NONE
    };

    /// True if no modifier is held.
    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }

    /// True if a modifier that turns a keystroke into a shortcut is held.
    pub fn is_command(&self) -> bool {
        self.ctrl || self.meta
    }
}

impl Add<Self> for Mods {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self {
            shift: self.shift || other.shift,
            ctrl: self.ctrl || other.ctrl,
            alt: self.alt || other.alt,
            meta: self.meta || other.meta,
        }
    }
}

impl Add<KeyCode> for Mods {
    type Output = Key;

    fn add(self, key: KeyCode) -> Self::Output {
        Key { mods: self, key }
    }
}

impl Add<char> for Mods {
    type Output = Key;

    fn add(self, c: char) -> Self::Output {
        self + KeyCode::Char(c)
    }
}

/// Logical key codes.
#[derive(Debug, PartialOrd, PartialEq, Hash, Eq, Clone, Copy)]
pub enum KeyCode {
    /// Backspace key.
    Backspace,
    /// Enter/return key.
    Enter,
    /// Tab key.
    Tab,
    /// Escape key.
    Esc,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page up key.
    PageUp,
    /// Page down key.
    PageDown,
    /// Delete key.
    Delete,
    /// Insert key.
    Insert,
    /// Function key, `F(1)` is F1.
    F(u8),
    /// A printable character.
    Char(char),
}

impl From<char> for KeyCode {
    fn from(c: char) -> Self {
        Self::Char(c)
    }
}

/// A keystroke along with modifiers.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Key {
    /// Modifier state.
    pub mods: Mods,
    /// Key code.
    pub key: KeyCode,
}

impl Key {
    /// The character this keystroke would insert into text, if any. Command
    /// shortcuts insert nothing.
    pub fn text(&self) -> Option<char> {
        match self.key {
            KeyCode::Char(c) if !self.mods.is_command() => Some(c),
            KeyCode::Enter if self.mods.is_empty() => Some('\n'),
            KeyCode::Tab if self.mods.is_empty() => Some('\t'),
            _ => None,
        }
    }
}

impl PartialEq<KeyCode> for Key {
    fn eq(&self, c: &KeyCode) -> bool {
        self.mods.is_empty() && self.key == *c
    }
}

impl PartialEq<char> for Key {
    fn eq(&self, c: &char) -> bool {
        *self == KeyCode::Char(*c)
    }
}

impl From<char> for Key {
    fn from(c: char) -> Self {
        Mods::NONE + c
    }
}

impl From<KeyCode> for Key {
    fn from(key: KeyCode) -> Self {
        Mods::NONE + key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparisons() {
        assert_eq!(Key::from('a'), 'a');
        assert_ne!(Mods::CTRL + 'a', 'a');
        assert_eq!(Key::from(KeyCode::Esc), KeyCode::Esc);
        assert_eq!(Mods::CTRL + Mods::SHIFT, Mods {
            ctrl: true,
            shift: true,
            ..Mods::NONE
        });
    }

    #[test]
    fn text() {
        assert_eq!(Key::from('x').text(), Some('x'));
        assert_eq!((Mods::SHIFT + 'X').text(), Some('X'));
        assert_eq!((Mods::CTRL + 'x').text(), None);
        assert_eq!((Mods::META + 'x').text(), None);
        assert_eq!(Key::from(KeyCode::Enter).text(), Some('\n'));
        assert_eq!(Key::from(KeyCode::Left).text(), None);
    }
}
