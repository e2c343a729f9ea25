//! Header search autocomplete
//!
//! Suggestions are entries whose label contains the query. Prefix matches
//! come first; otherwise the source order is kept.

use serde::{Deserialize, Serialize};

use trellis_disclosure::Direction;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub label: String,
    /// Link target when the suggestion is chosen
    pub url: Option<String>,
}

impl Suggestion {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

pub struct Autocomplete {
    entries: Vec<Suggestion>,
    /// Lowercased labels, parallel to `entries`
    keys: Vec<String>,
    min_chars: usize,
    max_results: usize,
    /// Indices into `entries` for the current query
    results: Vec<usize>,
    highlighted: Option<usize>,
}

impl Autocomplete {
    pub fn new(entries: Vec<Suggestion>, min_chars: usize, max_results: usize) -> Self {
        let keys = entries.iter().map(|e| e.label.to_lowercase()).collect();
        Self {
            entries,
            keys,
            min_chars,
            max_results,
            results: Vec::new(),
            highlighted: None,
        }
    }

    /// Recompute suggestions for `query` and reset the highlight
    pub fn suggest(&mut self, query: &str) -> Vec<&Suggestion> {
        let query = query.trim().to_lowercase();
        self.highlighted = None;
        self.results.clear();

        if query.chars().count() < self.min_chars.max(1) {
            return Vec::new();
        }

        let mut prefix = Vec::new();
        let mut inner = Vec::new();
        for (i, key) in self.keys.iter().enumerate() {
            match key.find(&query) {
                Some(0) => prefix.push(i),
                Some(_) => inner.push(i),
                None => {}
            }
        }

        self.results = prefix
            .into_iter()
            .chain(inner)
            .take(self.max_results)
            .collect();

        tracing::debug!(query = %query, results = self.results.len(), "Autocomplete query");

        self.results().collect()
    }

    pub fn results(&self) -> impl Iterator<Item = &Suggestion> {
        self.results.iter().map(|&i| &self.entries[i])
    }

    /// Move the highlighted suggestion, wrapping at both ends.
    ///
    /// With nothing highlighted, `Next` starts at the top and `Previous` at
    /// the bottom.
    pub fn move_highlight(&mut self, direction: Direction) -> Option<&Suggestion> {
        let len = self.results.len();
        if len == 0 {
            return None;
        }

        let target = match (self.highlighted, direction) {
            (Some(current), d) => d.target(current, len),
            (None, Direction::Next | Direction::First) => 0,
            (None, Direction::Previous | Direction::Last) => len - 1,
        };
        self.highlighted = Some(target);

        self.highlighted()
    }

    pub fn highlighted(&self) -> Option<&Suggestion> {
        self.highlighted
            .and_then(|h| self.results.get(h))
            .map(|&i| &self.entries[i])
    }

    /// Close the dropdown
    pub fn clear(&mut self) {
        self.results.clear();
        self.highlighted = None;
    }
}
