use crate::config::actions::{DialogAction, FormAction, GlobalAction, NavAction, SearchAction};
use crate::config::key::KeyBinding;
use crate::config::keybindings::KeybindingsConfig;
use crossterm::event::KeyEvent;
use std::sync::Arc;

/// Answers "does this key trigger that action" against the configured bindings.
#[derive(Default)]
pub struct KeyResolver {
    pub keybindings: Arc<KeybindingsConfig>,
}

impl KeyResolver {
    pub const fn new(keybindings: Arc<KeybindingsConfig>) -> Self {
        Self { keybindings }
    }

    fn global(&self, action: GlobalAction) -> &KeyBinding {
        let kb = &self.keybindings.global;
        match action {
            GlobalAction::Quit => &kb.quit,
            GlobalAction::Participate => &kb.participate,
            GlobalAction::Winners => &kb.winners,
            GlobalAction::Back => &kb.back,
        }
    }

    pub fn matches_global(&self, event: &KeyEvent, action: GlobalAction) -> bool {
        self.global(action).matches(event)
    }

    pub fn display_global(&self, action: GlobalAction) -> String {
        self.global(action).display()
    }

    fn nav(&self, action: NavAction) -> &KeyBinding {
        let kb = &self.keybindings.navigation;
        match action {
            NavAction::Up => &kb.up,
            NavAction::Down => &kb.down,
            NavAction::PageUp => &kb.page_up,
            NavAction::PageDown => &kb.page_down,
            NavAction::Home => &kb.home,
            NavAction::End => &kb.end,
        }
    }

    pub fn matches_nav(&self, event: &KeyEvent, action: NavAction) -> bool {
        self.nav(action).matches(event)
    }

    fn search(&self, action: SearchAction) -> &KeyBinding {
        let kb = &self.keybindings.search;
        match action {
            SearchAction::Toggle => &kb.toggle,
            SearchAction::Exit => &kb.exit,
        }
    }

    pub fn matches_search(&self, event: &KeyEvent, action: SearchAction) -> bool {
        self.search(action).matches(event)
    }

    pub fn display_search(&self, action: SearchAction) -> String {
        self.search(action).display()
    }

    fn form(&self, action: FormAction) -> &KeyBinding {
        let kb = &self.keybindings.form;
        match action {
            FormAction::NextField => &kb.next_field,
            FormAction::PrevField => &kb.prev_field,
            FormAction::Toggle => &kb.toggle,
            FormAction::Submit => &kb.submit,
            FormAction::Clear => &kb.clear,
        }
    }

    pub fn matches_form(&self, event: &KeyEvent, action: FormAction) -> bool {
        self.form(action).matches(event)
    }

    pub fn display_form(&self, action: FormAction) -> String {
        self.form(action).display()
    }

    /// Binding handed to key listeners that outlive a single lookup.
    pub fn dialog_binding(&self, action: DialogAction) -> KeyBinding {
        let kb = &self.keybindings.dialog;
        match action {
            DialogAction::Cancel => kb.cancel.clone(),
        }
    }

    pub fn display_dialog(&self, action: DialogAction) -> String {
        self.dialog_binding(action).display()
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;

    #[test]
    fn test_default_bindings() {
        let resolver = KeyResolver::default();
        let tab = KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE);
        let back_tab = KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);
        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);

        assert!(resolver.matches_form(&tab, FormAction::NextField));
        assert!(resolver.matches_form(&back_tab, FormAction::PrevField));
        assert!(resolver.matches_form(&ctrl_s, FormAction::Submit));
        assert!(!resolver.matches_form(&tab, FormAction::Submit));
        assert_eq!(resolver.display_global(GlobalAction::Participate), "p");
        assert_eq!(resolver.display_dialog(DialogAction::Cancel), "Esc");
    }
}
