//! Table of contents and scroll-spy
//!
//! Headings are collected in document order. Each entry needs an anchor:
//! an existing `id` is reused, otherwise one is derived from the text.

use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::ContentError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Anchor id of the heading
    pub id: String,
    pub text: String,
    /// 1 for `h1` through 6 for `h6`
    pub level: u8,
    /// False when the id was generated and must be set on the heading
    pub had_id: bool,
}

/// Build the table of contents from headings matching `selector`
pub fn build_toc(html: &str, selector: &str) -> Result<Vec<TocEntry>> {
    let sel = parse_selector(selector)?;
    let doc = Html::parse_document(html);

    // Generated anchors must not collide with any id already in the page
    let mut used: HashSet<String> = doc
        .select(&parse_selector("[id]")?)
        .filter_map(|el| el.value().id())
        .map(str::to_string)
        .collect();
    let mut entries = Vec::new();

    for el in doc.select(&sel) {
        let text = el.text().collect::<Vec<_>>().join(" ");
        let text = normalize_whitespace(&text);
        if text.is_empty() {
            continue;
        }

        let level = heading_level(el.value().name()).unwrap_or(2);

        let (id, had_id) = match el.value().id().map(str::trim) {
            Some(id) if !id.is_empty() => (id.to_string(), true),
            _ => (unique_slug(&slugify(&text), &used), false),
        };
        used.insert(id.clone());

        entries.push(TocEntry {
            id,
            text,
            level,
            had_id,
        });
    }

    tracing::debug!(entries = entries.len(), "Built table of contents");

    Ok(entries)
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ContentError::InvalidSelector(format!("{selector}: {e}")))
}

/// Lowercase ASCII alphanumerics joined by single hyphens
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        slug.push_str("section");
    }
    slug
}

fn unique_slug(base: &str, used: &HashSet<String>) -> String {
    if !used.contains(base) {
        return base.to_string();
    }

    (2..)
        .map(|n| format!("{}-{}", base, n))
        .find(|candidate| !used.contains(candidate))
        .unwrap_or_else(|| base.to_string())
}

fn heading_level(name: &str) -> Option<u8> {
    match name {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

fn normalize_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Active entry changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpyChange {
    pub previous: Option<usize>,
    pub current: Option<usize>,
}

/// Tracks which section the reader is in.
///
/// The active entry is the last heading whose top offset is at or above
/// `scroll + offset`.
#[derive(Debug, Clone)]
pub struct ScrollSpy {
    /// Document-relative top of each heading, in entry order
    tops: Vec<f64>,
    offset: f64,
    active: Option<usize>,
}

impl ScrollSpy {
    pub fn new(tops: Vec<f64>, offset: f64) -> Self {
        Self {
            tops,
            offset,
            active: None,
        }
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn active_for(&self, scroll: f64) -> Option<usize> {
        let line = scroll + self.offset;
        self.tops.iter().rposition(|&top| top <= line)
    }

    /// Report a change only when the active entry moves
    pub fn update(&mut self, scroll: f64) -> Option<SpyChange> {
        let current = self.active_for(scroll);
        if current == self.active {
            return None;
        }

        let change = SpyChange {
            previous: self.active,
            current,
        };
        self.active = current;
        Some(change)
    }
}
