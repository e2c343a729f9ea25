//! Page behavior configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use trellis_content::{Autocomplete, MegaMenu, Reveal, ScrollSpy, Suggestion};

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Visible fraction at which an element is revealed
    pub reveal_threshold: f64,
    /// Delay before a mega-menu panel closes after pointer leave
    pub menu_close_delay_ms: u64,
    /// Minimum query length before suggestions appear
    pub autocomplete_min_chars: usize,
    pub autocomplete_max_results: usize,
    /// Headings collected into the table of contents
    pub toc_selector: String,
    /// Distance below the viewport top where a section becomes active
    pub scroll_spy_offset: f64,
}

impl Config {
    /// Load from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.reveal_threshold) {
            return Err(CoreError::Config(format!(
                "reveal_threshold must be within [0, 1], got {}",
                self.reveal_threshold
            )));
        }
        if self.autocomplete_max_results == 0 {
            return Err(CoreError::Config(
                "autocomplete_max_results must be at least 1".to_string(),
            ));
        }
        if self.toc_selector.trim().is_empty() {
            return Err(CoreError::Config("toc_selector cannot be empty".to_string()));
        }
        Ok(())
    }

    pub fn menu_close_delay(&self) -> Duration {
        Duration::from_millis(self.menu_close_delay_ms)
    }

    pub fn autocomplete(&self, entries: Vec<Suggestion>) -> Autocomplete {
        Autocomplete::new(
            entries,
            self.autocomplete_min_chars,
            self.autocomplete_max_results,
        )
    }

    pub fn mega_menu(&self) -> MegaMenu {
        MegaMenu::new(self.menu_close_delay())
    }

    pub fn reveal<I>(&self, ids: I) -> Reveal
    where
        I: IntoIterator<Item = String>,
    {
        Reveal::new(ids, self.reveal_threshold)
    }

    pub fn scroll_spy(&self, tops: Vec<f64>) -> ScrollSpy {
        ScrollSpy::new(tops, self.scroll_spy_offset)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reveal_threshold: trellis_content::DEFAULT_THRESHOLD,
            menu_close_delay_ms: 250,
            autocomplete_min_chars: 2,
            autocomplete_max_results: 8,
            toc_selector: "h2, h3".to_string(),
            scroll_spy_offset: 80.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{ "menu_close_delay_ms": 400 }"#).unwrap();
        assert_eq!(config.menu_close_delay(), Duration::from_millis(400));
        assert_eq!(config.toc_selector, "h2, h3");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_threshold() {
        let config = Config {
            reveal_threshold: 1.5,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("trellis-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "autocomplete_min_chars": 3 }"#).unwrap();

        let config = Config::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.autocomplete_min_chars, 3);
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_widget_factories_use_settings() {
        let config = Config {
            reveal_threshold: 0.5,
            menu_close_delay_ms: 100,
            autocomplete_min_chars: 3,
            autocomplete_max_results: 1,
            scroll_spy_offset: 10.0,
            ..Config::default()
        };

        let mut search = config.autocomplete(vec![
            Suggestion::new("Visa"),
            Suggestion::new("Visa renewal"),
        ]);
        assert!(search.suggest("vi").is_empty());
        assert_eq!(search.suggest("visa").len(), 1);

        let mut reveal = config.reveal(vec!["hero".to_string()]);
        assert!(!reveal.observe("hero", 0.4));
        assert!(reveal.observe("hero", 0.5));

        let spy = config.scroll_spy(vec![0.0, 100.0]);
        assert_eq!(spy.active_for(89.0), Some(0));
        assert_eq!(spy.active_for(90.0), Some(1));

        let menu = config.mega_menu();
        assert_eq!(menu.open_panel(), None);
    }
}
