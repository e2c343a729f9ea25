//! Client-side list filtering
//!
//! Items expose their `data-*` attributes; a filter keeps one selected
//! value per attribute. An item stays visible when it matches every
//! active criterion.

use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ContentError;
use crate::Result;

/// Select value meaning "no restriction"
pub const WILDCARD: &str = "all";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterItem {
    pub id: Option<String>,
    /// `data-*` attributes with the prefix stripped
    pub attributes: BTreeMap<String, String>,
}

impl FilterItem {
    pub fn with(mut self, attribute: &str, value: &str) -> Self {
        self.attributes
            .insert(attribute.to_string(), value.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOutcome {
    /// Visibility of each item, same order as the input
    pub visible: Vec<bool>,
    pub visible_count: usize,
}

impl FilterOutcome {
    pub fn is_empty(&self) -> bool {
        self.visible_count == 0
    }
}

#[derive(Debug, Clone, Default)]
pub struct Filter {
    criteria: BTreeMap<String, String>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `value` for `attribute`; the wildcard or an empty value
    /// clears the criterion.
    pub fn set(&mut self, attribute: &str, value: &str) {
        let value = normalize(value);
        if value.is_empty() || value == WILDCARD {
            self.criteria.remove(attribute);
        } else {
            self.criteria.insert(attribute.to_string(), value);
        }

        tracing::debug!(attribute, criteria = self.criteria.len(), "Filter updated");
    }

    pub fn clear(&mut self, attribute: &str) {
        self.criteria.remove(attribute);
    }

    pub fn reset(&mut self) {
        self.criteria.clear();
    }

    pub fn is_active(&self) -> bool {
        !self.criteria.is_empty()
    }

    pub fn criteria(&self) -> &BTreeMap<String, String> {
        &self.criteria
    }

    pub fn matches(&self, item: &FilterItem) -> bool {
        self.criteria.iter().all(|(attribute, wanted)| {
            item.attributes
                .get(attribute)
                .is_some_and(|value| normalize(value) == *wanted)
        })
    }

    pub fn apply(&self, items: &[FilterItem]) -> FilterOutcome {
        let visible: Vec<bool> = items.iter().map(|item| self.matches(item)).collect();
        let visible_count = visible.iter().filter(|v| **v).count();

        FilterOutcome {
            visible,
            visible_count,
        }
    }
}

/// Collect filterable items matching `selector` from a page snapshot
pub fn items_from_html(html: &str, selector: &str) -> Result<Vec<FilterItem>> {
    let sel = Selector::parse(selector)
        .map_err(|e| ContentError::InvalidSelector(format!("{selector}: {e}")))?;
    let doc = Html::parse_document(html);

    Ok(doc
        .select(&sel)
        .map(|el| FilterItem {
            id: el.value().id().map(str::to_string),
            attributes: el
                .value()
                .attrs()
                .filter_map(|(name, value)| {
                    name.strip_prefix("data-")
                        .map(|key| (key.to_string(), value.to_string()))
                })
                .collect(),
        })
        .collect())
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}
