use crate::model::Theme;
use crate::persist::{KvStore, StoreError, THEME_KEY};

/// Session-wide theme state, hydrated from the persisted value.
pub struct ThemeStore<S> {
    theme: Theme,
    store: S,
}

impl<S: KvStore> ThemeStore<S> {
    pub fn load(store: S) -> Result<Self, StoreError> {
        let theme = match store.load(THEME_KEY)? {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                log::warn!("ignoring unrecognized stored theme {raw:?}");
                Theme::Light
            }),
            None => Theme::Light,
        };
        Ok(Self { theme, store })
    }

    pub fn current(&self) -> Theme {
        self.theme
    }

    /// Flip between light and dark, persisting the new value immediately.
    pub fn toggle(&mut self) -> Result<Theme, StoreError> {
        self.theme = self.theme.toggled();
        self.store.save(THEME_KEY, &self.theme.to_string())?;
        Ok(self.theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::MemStore;

    #[test]
    fn defaults_to_light_when_unset() {
        let themes = ThemeStore::load(MemStore::default()).unwrap();
        assert_eq!(themes.current(), Theme::Light);
    }

    #[test]
    fn loads_persisted_value() {
        let themes = ThemeStore::load(MemStore::with(THEME_KEY, "dark")).unwrap();
        assert_eq!(themes.current(), Theme::Dark);
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        let themes = ThemeStore::load(MemStore::with(THEME_KEY, "dark\n")).unwrap();
        assert_eq!(themes.current(), Theme::Dark);
    }

    #[test]
    fn unrecognized_value_falls_back_to_light() {
        let themes = ThemeStore::load(MemStore::with(THEME_KEY, "solarized")).unwrap();
        assert_eq!(themes.current(), Theme::Light);
    }

    #[test]
    fn toggle_flips_and_persists_literal() {
        let mut themes = ThemeStore::load(MemStore::default()).unwrap();
        assert_eq!(themes.toggle().unwrap(), Theme::Dark);
        assert_eq!(themes.store.get(THEME_KEY).map(String::as_str), Some("dark"));
        assert_eq!(themes.toggle().unwrap(), Theme::Light);
        assert_eq!(themes.store.get(THEME_KEY).map(String::as_str), Some("light"));
    }
}
