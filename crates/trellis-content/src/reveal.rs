//! Scroll-triggered reveal
//!
//! An element is revealed the first time enough of it enters the viewport.
//! Revealing is one-shot; scrolling it back out never hides it again.

use scraper::{Html, Selector};
use std::collections::{BTreeSet, HashSet};

use crate::error::ContentError;
use crate::Result;

pub const DEFAULT_THRESHOLD: f64 = 0.15;

const REVEAL_SELECTOR: &str = "[data-reveal][id]";

/// Ids of the elements marked `data-reveal`, in document order
pub fn reveal_targets(html: &str) -> Result<Vec<String>> {
    let sel = Selector::parse(REVEAL_SELECTOR)
        .map_err(|e| ContentError::InvalidSelector(format!("{REVEAL_SELECTOR}: {e}")))?;
    let doc = Html::parse_document(html);

    Ok(doc
        .select(&sel)
        .filter_map(|el| el.value().id())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect())
}

/// Fraction of an element's height inside the viewport, in `[0, 1]`
pub fn visible_fraction(top: f64, height: f64, viewport_top: f64, viewport_height: f64) -> f64 {
    if height <= 0.0 {
        return 0.0;
    }

    let start = top.max(viewport_top);
    let end = (top + height).min(viewport_top + viewport_height);
    ((end - start) / height).clamp(0.0, 1.0)
}

#[derive(Debug, Clone)]
pub struct Reveal {
    threshold: f64,
    /// Elements still waiting to be revealed
    pending: BTreeSet<String>,
    revealed: HashSet<String>,
}

impl Reveal {
    pub fn new<I>(ids: I, threshold: f64) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            pending: ids.into_iter().collect(),
            revealed: HashSet::new(),
        }
    }

    /// Report the current visible fraction of `id`.
    ///
    /// Returns true only on the call that reveals it.
    pub fn observe(&mut self, id: &str, fraction: f64) -> bool {
        if fraction.is_nan() || fraction < self.threshold || fraction <= 0.0 {
            return false;
        }
        if !self.pending.remove(id) {
            return false;
        }

        tracing::debug!(id, fraction, "Revealed element");
        self.revealed.insert(id.to_string());
        true
    }

    pub fn is_revealed(&self, id: &str) -> bool {
        self.revealed.contains(id)
    }

    pub fn pending(&self) -> impl Iterator<Item = &str> {
        self.pending.iter().map(String::as_str)
    }

    /// All elements revealed; observation can stop
    pub fn is_done(&self) -> bool {
        self.pending.is_empty()
    }
}
