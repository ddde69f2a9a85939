//! Raw keyboard input forwarded by hosts.
//!
//! Only what a keyboard-echo application needs: printable characters plus
//! the few editing keys that move a cursor.

/// A key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Key {
    Enter,
    Backspace,
    Tab,
    Escape,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    /// A printable character.
    Char(char),
}
