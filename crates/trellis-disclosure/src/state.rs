//! Trigger state machine
//!
//! Tabs couple selection and tab-stop:
//! ```text
//! (Unselected, NotFocusable) --activate(self)--> (Selected, Focusable)
//! (Selected, Focusable) --activate(sibling)--> (Unselected, NotFocusable)
//! ```
//!
//! Accordions toggle on their own trigger; a single-open accordion closes
//! every sibling, a multi-open one leaves siblings alone.

use serde::{Deserialize, Serialize};

use crate::key::Orientation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerState {
    /// Panel is shown (tab selected / section open)
    Selected,
    /// Panel is hidden
    Unselected,
}

impl TriggerState {
    pub fn from_selected(selected: bool) -> Self {
        if selected {
            TriggerState::Selected
        } else {
            TriggerState::Unselected
        }
    }

    pub fn is_selected(&self) -> bool {
        matches!(self, TriggerState::Selected)
    }

    pub fn toggled(&self) -> Self {
        match self {
            TriggerState::Selected => TriggerState::Unselected,
            TriggerState::Unselected => TriggerState::Selected,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerState::Selected => "selected",
            TriggerState::Unselected => "unselected",
        }
    }
}

impl std::fmt::Display for TriggerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TriggerState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "selected" | "open" | "true" => Ok(TriggerState::Selected),
            "unselected" | "closed" | "false" => Ok(TriggerState::Unselected),
            _ => Err(format!("Unknown trigger state: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Exclusivity {
    /// At most one panel visible at a time
    SingleOpen,
    /// Any subset of panels may be visible
    MultiOpen,
}

/// Behavior family of a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Variant {
    /// Exactly one panel shown; focus follows selection
    Tabs,
    /// Panels toggle independently of focus
    Accordion { exclusivity: Exclusivity },
}

impl Variant {
    pub fn accordion(exclusivity: Exclusivity) -> Self {
        Variant::Accordion { exclusivity }
    }

    pub fn exclusivity(&self) -> Exclusivity {
        match self {
            Variant::Tabs => Exclusivity::SingleOpen,
            Variant::Accordion { exclusivity } => *exclusivity,
        }
    }

    /// Next state of a trigger when `activate` targets it (`is_target`)
    /// or one of its siblings.
    pub fn next_state(&self, current: TriggerState, is_target: bool) -> TriggerState {
        match (self, is_target) {
            (Variant::Tabs, true) => TriggerState::Selected,
            (Variant::Tabs, false) => TriggerState::Unselected,
            (Variant::Accordion { .. }, true) => current.toggled(),
            (
                Variant::Accordion {
                    exclusivity: Exclusivity::SingleOpen,
                },
                false,
            ) => TriggerState::Unselected,
            (
                Variant::Accordion {
                    exclusivity: Exclusivity::MultiOpen,
                },
                false,
            ) => current,
        }
    }

    /// Whether a trigger in `state` is the group's tab-stop
    pub fn focusable(&self, state: TriggerState) -> bool {
        match self {
            Variant::Tabs => state.is_selected(),
            Variant::Accordion { .. } => true,
        }
    }

    /// Keyboard traversal also activates the newly focused trigger
    pub fn focus_follows_selection(&self) -> bool {
        matches!(self, Variant::Tabs)
    }

    pub fn orientation(&self) -> Orientation {
        match self {
            Variant::Tabs => Orientation::Horizontal,
            Variant::Accordion { .. } => Orientation::Vertical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Tabs => "tabs",
            Variant::Accordion {
                exclusivity: Exclusivity::SingleOpen,
            } => "accordion",
            Variant::Accordion {
                exclusivity: Exclusivity::MultiOpen,
            } => "accordion-multiple",
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
