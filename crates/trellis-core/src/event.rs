//! Input events delivered to a page
//!
//! Text form, one event per line:
//! - `activate <group> <index>`
//! - `key <group> <index> <KeyName>`
//! - `focus <group> <index>`
//! - `blur <group>`
//! - `layout <top> <top> ...` (heading offsets, in TOC order)
//! - `scroll <position>`
//! - `reveal <element> <fraction>`
//! - `dismiss <banner>`

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CoreError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Event {
    Activate { group: String, index: usize },
    Key { group: String, index: usize, key: String },
    Focus { group: String, index: usize },
    Blur { group: String },
    Layout { tops: Vec<f64> },
    Scroll { position: f64 },
    Reveal { element: String, fraction: f64 },
    Dismiss { banner: String },
}

impl Event {
    /// Disclosure group the event targets, if any
    pub fn group(&self) -> Option<&str> {
        match self {
            Event::Activate { group, .. }
            | Event::Key { group, .. }
            | Event::Focus { group, .. }
            | Event::Blur { group } => Some(group),
            _ => None,
        }
    }

    fn parse_fields(input: &str) -> Option<Self> {
        let mut parts = input.split_whitespace();
        let kind = parts.next()?.to_lowercase();

        let event = match kind.as_str() {
            "activate" | "click" => Event::Activate {
                group: parts.next()?.to_string(),
                index: parts.next()?.parse().ok()?,
            },
            "key" | "keydown" => Event::Key {
                group: parts.next()?.to_string(),
                index: parts.next()?.parse().ok()?,
                key: parts.next()?.to_string(),
            },
            "focus" => Event::Focus {
                group: parts.next()?.to_string(),
                index: parts.next()?.parse().ok()?,
            },
            "blur" => Event::Blur {
                group: parts.next()?.to_string(),
            },
            "layout" => {
                let tops = parts
                    .by_ref()
                    .map(|t| t.parse().ok())
                    .collect::<Option<Vec<f64>>>()?;
                Event::Layout { tops }
            }
            "scroll" => Event::Scroll {
                position: parts.next()?.parse().ok().filter(|p: &f64| p.is_finite())?,
            },
            "reveal" => Event::Reveal {
                element: parts.next()?.to_string(),
                fraction: parts.next()?.parse().ok()?,
            },
            "dismiss" => Event::Dismiss {
                banner: parts.next()?.to_string(),
            },
            _ => return None,
        };

        // Trailing tokens mean a malformed line
        if parts.next().is_some() {
            return None;
        }

        Some(event)
    }
}

impl FromStr for Event {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_fields(s).ok_or_else(|| CoreError::InvalidEvent(s.trim().to_string()))
    }
}
