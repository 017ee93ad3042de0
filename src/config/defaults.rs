use crossterm::event::KeyCode;

use crate::config::key::{Key, KeyBinding};
use crate::config::keybindings::{
    DialogKeybindings, FormKeybindings, GlobalKeybindings, NavigationKeybindings,
    SearchKeybindings,
};

impl Default for GlobalKeybindings {
    fn default() -> Self {
        Self {
            quit: Key::new(KeyCode::Char('q')).into(),
            participate: Key::new(KeyCode::Char('p')).into(),
            winners: Key::new(KeyCode::Char('w')).into(),
            back: Key::new(KeyCode::Esc).into(),
        }
    }
}

impl Default for NavigationKeybindings {
    fn default() -> Self {
        Self {
            up: KeyBinding::multiple(vec![
                Key::new(KeyCode::Char('k')),
                Key::new(KeyCode::Up),
            ]),
            down: KeyBinding::multiple(vec![
                Key::new(KeyCode::Char('j')),
                Key::new(KeyCode::Down),
            ]),
            page_up: Key::new(KeyCode::PageUp).into(),
            page_down: Key::new(KeyCode::PageDown).into(),
            home: KeyBinding::multiple(vec![
                Key::new(KeyCode::Char('g')),
                Key::new(KeyCode::Home),
            ]),
            end: KeyBinding::multiple(vec![
                Key::new(KeyCode::Char('G')),
                Key::new(KeyCode::End),
            ]),
        }
    }
}

impl Default for SearchKeybindings {
    fn default() -> Self {
        Self {
            toggle: Key::new(KeyCode::Char('/')).into(),
            exit: Key::new(KeyCode::Esc).into(),
        }
    }
}

impl Default for FormKeybindings {
    fn default() -> Self {
        Self {
            next_field: KeyBinding::multiple(vec![
                Key::new(KeyCode::Tab),
                Key::new(KeyCode::Down),
            ]),
            prev_field: KeyBinding::multiple(vec![
                Key::new(KeyCode::BackTab),
                Key::new(KeyCode::Up),
            ]),
            toggle: Key::new(KeyCode::Char(' ')).into(),
            submit: Key::with_ctrl(KeyCode::Char('s')).into(),
            clear: Key::with_ctrl(KeyCode::Char('r')).into(),
        }
    }
}

impl Default for DialogKeybindings {
    fn default() -> Self {
        Self {
            cancel: Key::new(KeyCode::Esc).into(),
        }
    }
}
