//! Attribute patches
//!
//! Presentation-side reflection of core changes:
//!
//! | Change | Tabs | Accordion |
//! |---|---|---|
//! | trigger | `aria-selected`, `tabindex` | `aria-expanded` |
//! | panel | `hidden` | `hidden` |
//! | focus | move focus | move focus |

use serde::{Deserialize, Serialize};

use trellis_disclosure::{Change, Group, Variant};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Patch {
    Set {
        element_id: String,
        attribute: String,
        value: String,
    },
    Remove {
        element_id: String,
        attribute: String,
    },
    Focus {
        element_id: String,
    },
}

impl Patch {
    pub fn set(element_id: &str, attribute: &str, value: impl Into<String>) -> Self {
        Patch::Set {
            element_id: element_id.to_string(),
            attribute: attribute.to_string(),
            value: value.into(),
        }
    }

    pub fn remove(element_id: &str, attribute: &str) -> Self {
        Patch::Remove {
            element_id: element_id.to_string(),
            attribute: attribute.to_string(),
        }
    }

    pub fn element_id(&self) -> &str {
        match self {
            Patch::Set { element_id, .. }
            | Patch::Remove { element_id, .. }
            | Patch::Focus { element_id } => element_id,
        }
    }
}

/// Translate core changes for a group of `variant` into patches
pub fn patches(variant: Variant, changes: &[Change]) -> Vec<Patch> {
    let mut out = Vec::with_capacity(changes.len() * 2);

    for change in changes {
        match change {
            Change::Trigger {
                trigger_id,
                selected,
                focusable,
                ..
            } => match variant {
                Variant::Tabs => {
                    out.push(Patch::set(trigger_id, "aria-selected", bool_attr(*selected)));
                    out.push(Patch::set(
                        trigger_id,
                        "tabindex",
                        if *focusable { "0" } else { "-1" },
                    ));
                }
                Variant::Accordion { .. } => {
                    out.push(Patch::set(trigger_id, "aria-expanded", bool_attr(*selected)));
                }
            },
            Change::Panel {
                panel_id, visible, ..
            } => {
                if *visible {
                    out.push(Patch::remove(panel_id, "hidden"));
                } else {
                    out.push(Patch::set(panel_id, "hidden", ""));
                }
            }
            Change::Focus { trigger_id, .. } => out.push(Patch::Focus {
                element_id: trigger_id.clone(),
            }),
        }
    }

    out
}

/// Patches that bring the markup in line with a freshly built group.
///
/// The snapshot may be inconsistent (no tab marked, two accordion sections
/// marked open), so every trigger and panel is written once at load.
pub fn initial_patches(group: &Group) -> Vec<Patch> {
    let changes: Vec<Change> = group
        .triggers()
        .iter()
        .flat_map(|t| {
            [
                Change::Trigger {
                    index: t.index,
                    trigger_id: t.trigger_id.clone(),
                    selected: t.is_selected(),
                    focusable: t.focusable,
                },
                Change::Panel {
                    index: t.index,
                    panel_id: t.panel_id.clone(),
                    visible: t.is_panel_visible(),
                },
            ]
        })
        .collect();

    patches(group.variant(), &changes)
}

fn bool_attr(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
