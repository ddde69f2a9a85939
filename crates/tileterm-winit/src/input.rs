//! Translates winit keyboard events into tileterm [`Key`] values.

use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{Key as WKey, NamedKey};

use tileterm_core::Key;

pub(crate) fn translate_keyboard(event: &KeyEvent) -> Option<Key> {
    // Only key-down (pressed) events; repeats count as presses.
    if event.state != ElementState::Pressed {
        return None;
    }
    translate_key(&event.logical_key)
}

fn translate_key(key: &WKey) -> Option<Key> {
    let key = match key {
        WKey::Named(named) => match named {
            NamedKey::ArrowUp => Key::ArrowUp,
            NamedKey::ArrowDown => Key::ArrowDown,
            NamedKey::ArrowLeft => Key::ArrowLeft,
            NamedKey::ArrowRight => Key::ArrowRight,
            NamedKey::Escape => Key::Escape,
            NamedKey::Enter => Key::Enter,
            NamedKey::Tab => Key::Tab,
            NamedKey::Space => Key::Char(' '),
            NamedKey::Backspace => Key::Backspace,
            _ => return None,
        },
        WKey::Character(s) => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Key::Char(c),
                _ => return None,
            }
        }
        _ => return None,
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_keys() {
        assert_eq!(translate_key(&WKey::Named(NamedKey::Enter)), Some(Key::Enter));
        assert_eq!(translate_key(&WKey::Named(NamedKey::Backspace)), Some(Key::Backspace));
        assert_eq!(translate_key(&WKey::Named(NamedKey::Space)), Some(Key::Char(' ')));
        assert_eq!(translate_key(&WKey::Named(NamedKey::F1)), None);
    }

    #[test]
    fn single_characters_only() {
        assert_eq!(translate_key(&WKey::Character("q".into())), Some(Key::Char('q')));
        assert_eq!(translate_key(&WKey::Character("ab".into())), None);
    }
}
