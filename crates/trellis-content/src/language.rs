//! Language switcher
//!
//! A toggle button disclosing a vertical list of languages. The list is
//! navigated with the arrow keys, `Enter` picks the highlighted entry and
//! `Escape` closes without changing anything.

use serde::{Deserialize, Serialize};

use trellis_disclosure::{Direction, Orientation};

use crate::error::ContentError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// BCP 47 tag, e.g. `en` or `pt-BR`
    pub code: String,
    pub label: String,
    /// Same page in this language
    #[serde(default)]
    pub url: Option<String>,
}

impl Language {
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
            url: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LanguageSwitcher {
    languages: Vec<Language>,
    current: usize,
    open: bool,
    highlighted: Option<usize>,
}

impl LanguageSwitcher {
    /// `current` falls back to the first language when it is not offered
    pub fn new(languages: Vec<Language>, current: &str) -> Result<Self> {
        if languages.is_empty() {
            return Err(ContentError::NoLanguages);
        }

        let current = languages
            .iter()
            .position(|l| l.code.eq_ignore_ascii_case(current))
            .unwrap_or(0);

        Ok(Self {
            languages,
            current,
            open: false,
            highlighted: None,
        })
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    pub fn current(&self) -> &Language {
        &self.languages[self.current]
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn highlighted(&self) -> Option<&Language> {
        self.highlighted.map(|i| &self.languages[i])
    }

    /// Returns the new `aria-expanded` value of the toggle button
    pub fn toggle(&mut self) -> bool {
        if self.open {
            self.close();
        } else {
            self.open = true;
            self.highlighted = Some(self.current);
        }
        self.open
    }

    /// Returns true if the list was open
    pub fn close(&mut self) -> bool {
        self.highlighted = None;
        std::mem::replace(&mut self.open, false)
    }

    /// Switch to `code` and close the list.
    ///
    /// Returns the language when it differs from the current one.
    pub fn select(&mut self, code: &str) -> Option<&Language> {
        let index = self
            .languages
            .iter()
            .position(|l| l.code.eq_ignore_ascii_case(code))?;
        self.close();

        if index == self.current {
            return None;
        }

        tracing::debug!(from = %self.languages[self.current].code, to = %code, "Language switched");
        self.current = index;
        Some(self.current())
    }

    /// Keyboard handling while the switcher has focus.
    ///
    /// Returns the newly chosen language when `Enter` switches.
    pub fn handle_key(&mut self, key: &str) -> Option<&Language> {
        if !self.open {
            return None;
        }

        match key {
            "Escape" | "Esc" => {
                self.close();
                None
            }
            "Enter" => {
                let code = self.highlighted()?.code.clone();
                self.select(&code)
            }
            _ => {
                let direction = Direction::from_key(key, Orientation::Vertical)?;
                let from = self.highlighted.unwrap_or(self.current);
                self.highlighted = Some(direction.target(from, self.languages.len()));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn switcher() -> LanguageSwitcher {
        LanguageSwitcher::new(
            vec![
                Language::new("en", "English"),
                Language::new("fr", "Français"),
                Language::new("ar", "العربية"),
            ],
            "fr",
        )
        .unwrap()
    }

    #[test]
    fn test_initial_language() {
        let s = switcher();
        assert_eq!(s.current().code, "fr");
        assert!(!s.is_open());

        let fallback = LanguageSwitcher::new(vec![Language::new("en", "English")], "de").unwrap();
        assert_eq!(fallback.current().code, "en");

        assert!(matches!(
            LanguageSwitcher::new(Vec::new(), "en"),
            Err(ContentError::NoLanguages)
        ));
    }

    #[test]
    fn test_toggle_highlights_current() {
        let mut s = switcher();
        assert!(s.toggle());
        assert_eq!(s.highlighted().map(|l| l.code.as_str()), Some("fr"));

        assert!(!s.toggle());
        assert_eq!(s.highlighted(), None);
    }

    #[test]
    fn test_keyboard_selection() {
        let mut s = switcher();

        // Closed list ignores keys
        assert!(s.handle_key("ArrowDown").is_none());
        assert_eq!(s.highlighted(), None);

        s.toggle();
        s.handle_key("ArrowDown");
        s.handle_key("ArrowDown");
        // Wrapped from the last entry back to the first
        assert_eq!(s.highlighted().map(|l| l.code.as_str()), Some("en"));
        assert!(s.handle_key("ArrowRight").is_none());

        let chosen = s.handle_key("Enter").map(|l| l.code.clone());
        assert_eq!(chosen.as_deref(), Some("en"));
        assert_eq!(s.current().code, "en");
        assert!(!s.is_open());
    }

    #[test]
    fn test_escape_keeps_language() {
        let mut s = switcher();
        s.toggle();
        s.handle_key("End");
        assert!(s.handle_key("Escape").is_none());
        assert!(!s.is_open());
        assert_eq!(s.current().code, "fr");
    }

    #[test]
    fn test_select() {
        let mut s = switcher();
        s.toggle();

        assert!(s.select("FR").is_none());
        assert!(!s.is_open());
        assert!(s.select("de").is_none());
        assert_eq!(s.select("ar").map(|l| l.label.as_str()), Some("العربية"));
    }
}
