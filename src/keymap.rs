use crossterm::event::{KeyCode, KeyEvent};

use crate::action::SelectorAction;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum KeymapProfile {
    #[default]
    Default,
    Vim,
    Arrows,
}

#[derive(Clone, Copy, Debug)]
pub struct SelectorKeyBindings {
    profile: KeymapProfile,
}

impl Default for SelectorKeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectorKeyBindings {
    pub const fn new() -> Self {
        Self {
            profile: KeymapProfile::Default,
        }
    }

    pub const fn with_profile(profile: KeymapProfile) -> Self {
        Self { profile }
    }

    pub const fn profile(&self) -> KeymapProfile {
        self.profile
    }

    pub const fn set_profile(&mut self, profile: KeymapProfile) {
        self.profile = profile;
    }

    pub fn resolve<C>(&self, key: KeyEvent) -> Option<SelectorAction<C>> {
        let nav_action = match self.profile {
            KeymapProfile::Default => self.resolve_default_nav(key),
            KeymapProfile::Vim => self.resolve_vim_nav(key),
            KeymapProfile::Arrows => self.resolve_arrow_nav(key),
        };
        if nav_action.is_some() {
            return nav_action;
        }

        self.resolve_common(key)
    }

    pub fn resolve_with<C, F>(&self, key: KeyEvent, custom: F) -> Option<SelectorAction<C>>
    where
        F: Fn(KeyEvent) -> Option<C>,
    {
        if let Some(action) = custom(key) {
            return Some(SelectorAction::Custom(action));
        }

        self.resolve(key)
    }

    const fn resolve_default_nav<C>(&self, key: KeyEvent) -> Option<SelectorAction<C>> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(SelectorAction::SelectPrev),
            KeyCode::Down | KeyCode::Char('j') => Some(SelectorAction::SelectNext),
            KeyCode::Left | KeyCode::Char('h') => Some(SelectorAction::SelectParent),
            KeyCode::Right | KeyCode::Char('l') => Some(SelectorAction::SelectChild),
            _ => None,
        }
    }

    const fn resolve_vim_nav<C>(&self, key: KeyEvent) -> Option<SelectorAction<C>> {
        match key.code {
            KeyCode::Char('k') => Some(SelectorAction::SelectPrev),
            KeyCode::Char('j') => Some(SelectorAction::SelectNext),
            KeyCode::Char('h') => Some(SelectorAction::SelectParent),
            KeyCode::Char('l') => Some(SelectorAction::SelectChild),
            _ => None,
        }
    }

    const fn resolve_arrow_nav<C>(&self, key: KeyEvent) -> Option<SelectorAction<C>> {
        match key.code {
            KeyCode::Up => Some(SelectorAction::SelectPrev),
            KeyCode::Down => Some(SelectorAction::SelectNext),
            KeyCode::Left => Some(SelectorAction::SelectParent),
            KeyCode::Right => Some(SelectorAction::SelectChild),
            _ => None,
        }
    }

    const fn resolve_common<C>(&self, key: KeyEvent) -> Option<SelectorAction<C>> {
        match key.code {
            KeyCode::Char(' ' | 'x') | KeyCode::Enter => Some(SelectorAction::ToggleCheck),
            KeyCode::Char('s' | 'S') => Some(SelectorAction::Save),
            KeyCode::Char('g') => Some(SelectorAction::ToggleGuides),
            KeyCode::Home => Some(SelectorAction::SelectFirst),
            KeyCode::End => Some(SelectorAction::SelectLast),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn default_profile_maps_arrows_and_letters() {
        let bindings = SelectorKeyBindings::new();

        assert_eq!(
            bindings.resolve::<()>(key(KeyCode::Down)),
            Some(SelectorAction::SelectNext)
        );
        assert_eq!(
            bindings.resolve::<()>(key(KeyCode::Char('k'))),
            Some(SelectorAction::SelectPrev)
        );
        assert_eq!(
            bindings.resolve::<()>(key(KeyCode::Char(' '))),
            Some(SelectorAction::ToggleCheck)
        );
        assert_eq!(
            bindings.resolve::<()>(key(KeyCode::Char('s'))),
            Some(SelectorAction::Save)
        );
    }

    #[test]
    fn vim_profile_ignores_arrows_for_navigation() {
        let bindings = SelectorKeyBindings::with_profile(KeymapProfile::Vim);

        assert_eq!(bindings.resolve::<()>(key(KeyCode::Up)), None);
        assert_eq!(
            bindings.resolve::<()>(key(KeyCode::Char('l'))),
            Some(SelectorAction::SelectChild)
        );
    }

    #[test]
    fn custom_mapping_wins() {
        let bindings = SelectorKeyBindings::new();

        let action = bindings.resolve_with(key(KeyCode::Char('s')), |event| {
            (event.code == KeyCode::Char('s')).then_some("export")
        });

        assert_eq!(action, Some(SelectorAction::Custom("export")));
    }
}
