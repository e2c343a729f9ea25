//! Dismissible alert banners
//!
//! A banner stays dismissed for the rest of the page load only; nothing is
//! remembered across visits.

use scraper::{Html, Selector};
use serde::Serialize;

use crate::error::ContentError;
use crate::Result;

const BANNER_SELECTOR: &str = "[data-banner][id]";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Banner {
    id: String,
    visible: bool,
}

impl Banner {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            visible: true,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Hide the banner. Returns true if it was showing.
    pub fn dismiss(&mut self) -> bool {
        if !self.visible {
            return false;
        }

        tracing::debug!(banner = %self.id, "Banner dismissed");
        self.visible = false;
        true
    }

    /// `Escape` dismisses; other keys are ignored
    pub fn handle_key(&mut self, key: &str) -> bool {
        match key {
            "Escape" | "Esc" => self.dismiss(),
            _ => false,
        }
    }
}

/// Banners marked `data-banner`. One already carrying `hidden` starts
/// dismissed.
pub fn banners_from_html(html: &str) -> Result<Vec<Banner>> {
    let sel = Selector::parse(BANNER_SELECTOR)
        .map_err(|e| ContentError::InvalidSelector(format!("{BANNER_SELECTOR}: {e}")))?;
    let doc = Html::parse_document(html);

    Ok(doc
        .select(&sel)
        .filter_map(|el| {
            let id = el.value().id()?.trim();
            if id.is_empty() {
                return None;
            }
            Some(Banner {
                id: id.to_string(),
                visible: el.value().attr("hidden").is_none(),
            })
        })
        .collect())
}
