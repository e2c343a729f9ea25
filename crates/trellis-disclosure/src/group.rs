//! Disclosure group
//!
//! Built once from a snapshot of trigger/panel pairs and never resized.
//! Every mutation goes through [`Group::activate`], which applies the
//! variant's transition rule to each trigger and reports what changed.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{DisclosureError, MalformedReason};
use crate::key::{Direction, Orientation};
use crate::state::{Exclusivity, TriggerState, Variant};
use crate::trigger::Trigger;
use crate::Result;

/// One trigger as discovered in the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerConfig {
    pub trigger_id: String,
    /// `None` when the trigger references no existing panel
    pub panel_id: Option<String>,
    #[serde(default)]
    pub initially_selected: bool,
}

impl TriggerConfig {
    pub fn new(trigger_id: impl Into<String>, panel_id: impl Into<String>) -> Self {
        Self {
            trigger_id: trigger_id.into(),
            panel_id: Some(panel_id.into()),
            initially_selected: false,
        }
    }

    pub fn selected(mut self) -> Self {
        self.initially_selected = true;
        self
    }
}

/// Initialization snapshot for one group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupConfig {
    pub id: String,
    pub variant: Variant,
    pub triggers: Vec<TriggerConfig>,
    /// Overrides the variant's arrow-key axis (`aria-orientation`)
    #[serde(default)]
    pub orientation: Option<Orientation>,
}

impl GroupConfig {
    pub fn new(id: impl Into<String>, variant: Variant, triggers: Vec<TriggerConfig>) -> Self {
        Self {
            id: id.into(),
            variant,
            triggers,
            orientation: None,
        }
    }

    pub fn oriented(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }
}

/// Observable effect of an operation, for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Change {
    Trigger {
        index: usize,
        trigger_id: String,
        selected: bool,
        focusable: bool,
    },
    Panel {
        index: usize,
        panel_id: String,
        visible: bool,
    },
    /// Input focus must move to this trigger
    Focus { index: usize, trigger_id: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct Group {
    id: String,
    variant: Variant,
    orientation: Orientation,
    triggers: Vec<Trigger>,
    /// Trigger currently holding input focus
    focused: Option<usize>,
}

impl Group {
    /// Validate a snapshot and build the group in its initial state
    pub fn new(config: GroupConfig) -> Result<Self> {
        let GroupConfig {
            id,
            variant,
            triggers,
            orientation,
        } = config;

        let malformed = |reason| DisclosureError::MalformedGroup {
            group: id.clone(),
            reason,
        };

        if triggers.is_empty() {
            return Err(malformed(MalformedReason::Empty));
        }

        {
            let mut seen = HashSet::new();
            for (index, trigger) in triggers.iter().enumerate() {
                let panel_id = match trigger.panel_id.as_deref() {
                    Some(panel_id) if !panel_id.trim().is_empty() => panel_id,
                    _ => return Err(malformed(MalformedReason::MissingPanel { trigger: index })),
                };
                if !seen.insert(panel_id) {
                    return Err(malformed(MalformedReason::DuplicatePanel {
                        panel_id: panel_id.to_string(),
                    }));
                }
            }
        }

        let first_marked = triggers.iter().position(|t| t.initially_selected);
        let triggers: Vec<Trigger> = triggers
            .into_iter()
            .enumerate()
            .map(|(index, t)| {
                let selected = match variant {
                    // No marker: the first tab is shown
                    Variant::Tabs => index == first_marked.unwrap_or(0),
                    Variant::Accordion {
                        exclusivity: Exclusivity::SingleOpen,
                    } => Some(index) == first_marked,
                    Variant::Accordion {
                        exclusivity: Exclusivity::MultiOpen,
                    } => t.initially_selected,
                };
                Trigger::new(
                    index,
                    t.trigger_id,
                    t.panel_id.unwrap_or_default(),
                    TriggerState::from_selected(selected),
                    variant,
                )
            })
            .collect();

        tracing::debug!(group = %id, %variant, triggers = triggers.len(), "Group initialized");

        Ok(Self {
            id,
            variant,
            orientation: orientation.unwrap_or_else(|| variant.orientation()),
            triggers,
            focused: None,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Axis the arrow keys follow
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    /// Always false for a constructed group; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    pub fn triggers(&self) -> &[Trigger] {
        &self.triggers
    }

    pub fn trigger(&self, index: usize) -> Result<&Trigger> {
        self.triggers.get(index).ok_or(DisclosureError::InvalidIndex {
            index,
            len: self.len(),
        })
    }

    /// Indices of triggers whose panel is shown, ascending
    pub fn selected_indices(&self) -> Vec<usize> {
        self.triggers
            .iter()
            .filter(|t| t.is_selected())
            .map(|t| t.index)
            .collect()
    }

    pub fn is_panel_visible(&self, index: usize) -> Result<bool> {
        Ok(self.trigger(index)?.is_panel_visible())
    }

    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    /// Record that the trigger at `index` received input focus
    pub fn focus(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.focused = Some(index);
        Ok(())
    }

    /// Record that focus left the group
    pub fn blur(&mut self) {
        self.focused = None;
    }

    /// Select / toggle the trigger at `index` according to the variant.
    ///
    /// Returns one trigger change and one panel change for every trigger
    /// whose state moved, in index order.
    pub fn activate(&mut self, index: usize) -> Result<Vec<Change>> {
        self.check_index(index)?;

        let variant = self.variant;
        let mut changes = Vec::new();
        for trigger in &mut self.triggers {
            let next = variant.next_state(trigger.state, trigger.index == index);
            if trigger.transition_to(next, variant) {
                changes.extend(trigger.changes());
            }
        }

        tracing::debug!(
            group = %self.id,
            index,
            changed = changes.len() / 2,
            "Activated trigger"
        );

        Ok(changes)
    }

    /// Handle a key press on the trigger at `current`.
    ///
    /// Keys that do not move focus in this group's orientation are ignored.
    pub fn handle_key(&mut self, current: usize, key: &str) -> Result<Vec<Change>> {
        self.check_index(current)?;

        match Direction::from_key(key, self.orientation) {
            Some(direction) => self.navigate(current, direction),
            None => Ok(Vec::new()),
        }
    }

    /// Move focus from `current` in `direction`.
    ///
    /// Skipped entirely when `current` does not hold focus. Tabs also
    /// activate the newly focused trigger.
    pub fn navigate(&mut self, current: usize, direction: Direction) -> Result<Vec<Change>> {
        self.check_index(current)?;

        if self.focused != Some(current) {
            tracing::debug!(
                group = %self.id,
                current,
                focused = ?self.focused,
                "Ignoring key, trigger does not hold focus"
            );
            return Ok(Vec::new());
        }

        let target = direction.target(current, self.len());
        self.focused = Some(target);

        tracing::debug!(group = %self.id, from = current, to = target, ?direction, "Focus moved");

        let mut changes = vec![Change::Focus {
            index: target,
            trigger_id: self.triggers[target].trigger_id.clone(),
        }];
        if self.variant.focus_follows_selection() {
            changes.extend(self.activate(target)?);
        }

        Ok(changes)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.len() {
            Ok(())
        } else {
            Err(DisclosureError::InvalidIndex {
                index,
                len: self.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(id: &str, variant: Variant, n: usize) -> GroupConfig {
        GroupConfig::new(
            id,
            variant,
            (0..n)
                .map(|i| TriggerConfig::new(format!("t{}", i), format!("p{}", i)))
                .collect(),
        )
    }

    fn tabs(n: usize) -> Group {
        Group::new(config("tabs", Variant::Tabs, n)).unwrap()
    }

    fn accordion(exclusivity: Exclusivity, n: usize) -> Group {
        Group::new(config("acc", Variant::accordion(exclusivity), n)).unwrap()
    }

    #[test]
    fn test_tabs_default_to_first() {
        let group = tabs(3);
        assert_eq!(group.selected_indices(), vec![0]);
        assert!(group.triggers()[0].focusable);
        assert!(!group.triggers()[1].focusable);
        assert_eq!(group.focused(), None);
    }

    #[test]
    fn test_tabs_honor_first_marker() {
        let mut cfg = config("tabs", Variant::Tabs, 3);
        cfg.triggers[1].initially_selected = true;
        cfg.triggers[2].initially_selected = true;

        let group = Group::new(cfg).unwrap();
        assert_eq!(group.selected_indices(), vec![1]);
    }

    #[test]
    fn test_accordion_initial_markers() {
        let mut cfg = config("acc", Variant::accordion(Exclusivity::SingleOpen), 3);
        assert!(Group::new(cfg.clone()).unwrap().selected_indices().is_empty());

        cfg.triggers[0].initially_selected = true;
        cfg.triggers[2].initially_selected = true;
        assert_eq!(Group::new(cfg.clone()).unwrap().selected_indices(), vec![0]);

        cfg.variant = Variant::accordion(Exclusivity::MultiOpen);
        assert_eq!(Group::new(cfg).unwrap().selected_indices(), vec![0, 2]);
    }

    #[test]
    fn test_malformed_groups_rejected() {
        let empty = config("empty", Variant::Tabs, 0);
        assert_eq!(
            Group::new(empty).unwrap_err(),
            DisclosureError::MalformedGroup {
                group: "empty".into(),
                reason: MalformedReason::Empty,
            }
        );

        let mut missing = config("missing", Variant::Tabs, 3);
        missing.triggers[2].panel_id = None;
        assert_eq!(
            Group::new(missing).unwrap_err(),
            DisclosureError::MalformedGroup {
                group: "missing".into(),
                reason: MalformedReason::MissingPanel { trigger: 2 },
            }
        );

        let mut duplicate = config("dup", Variant::Tabs, 2);
        duplicate.triggers[1].panel_id = Some("p0".into());
        assert!(matches!(
            Group::new(duplicate),
            Err(DisclosureError::MalformedGroup {
                reason: MalformedReason::DuplicatePanel { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_tabs_activate() {
        let mut group = tabs(3);
        let changes = group.activate(2).unwrap();

        assert_eq!(group.selected_indices(), vec![2]);
        // Tab 0 and tab 2 changed, each with a trigger and a panel change
        assert_eq!(changes.len(), 4);
        assert!(changes.contains(&Change::Panel {
            index: 0,
            panel_id: "p0".into(),
            visible: false,
        }));
        assert!(changes.contains(&Change::Trigger {
            index: 2,
            trigger_id: "t2".into(),
            selected: true,
            focusable: true,
        }));
    }

    #[test]
    fn test_tabs_reactivate_is_noop() {
        let mut group = tabs(3);
        group.activate(1).unwrap();
        let before = group.triggers().to_vec();

        let changes = group.activate(1).unwrap();
        assert!(changes.is_empty());
        assert_eq!(group.triggers(), before.as_slice());
    }

    #[test]
    fn test_single_open_toggle() {
        let mut group = accordion(Exclusivity::SingleOpen, 4);

        group.activate(1).unwrap();
        assert_eq!(group.selected_indices(), vec![1]);

        group.activate(1).unwrap();
        assert!(group.selected_indices().is_empty());

        group.activate(1).unwrap();
        group.activate(3).unwrap();
        assert_eq!(group.selected_indices(), vec![3]);
    }

    #[test]
    fn test_multi_open_flips_only_target() {
        let mut group = accordion(Exclusivity::MultiOpen, 3);

        group.activate(0).unwrap();
        group.activate(2).unwrap();
        assert_eq!(group.selected_indices(), vec![0, 2]);

        let changes = group.activate(0).unwrap();
        assert_eq!(group.selected_indices(), vec![2]);
        assert_eq!(changes.len(), 2);
    }

    #[test]
    fn test_invalid_index() {
        let mut group = tabs(3);
        assert_eq!(
            group.activate(3).unwrap_err(),
            DisclosureError::InvalidIndex { index: 3, len: 3 }
        );
        assert!(group.handle_key(5, "ArrowRight").is_err());
        assert!(group.focus(3).is_err());

        // The group keeps working afterwards
        assert!(group.activate(1).is_ok());
        assert_eq!(group.selected_indices(), vec![1]);
    }

    #[test]
    fn test_tabs_keyboard_scenario() {
        let mut group = tabs(3);
        group.focus(0).unwrap();

        let changes = group.handle_key(0, "ArrowRight").unwrap();
        assert_eq!(
            changes[0],
            Change::Focus {
                index: 1,
                trigger_id: "t1".into(),
            }
        );
        let t0 = &group.triggers()[0];
        let t1 = &group.triggers()[1];
        assert!(!t0.is_selected() && !t0.focusable && !t0.is_panel_visible());
        assert!(t1.is_selected() && t1.focusable && t1.is_panel_visible());

        group.handle_key(1, "End").unwrap();
        assert_eq!(group.selected_indices(), vec![2]);
        assert!(group.is_panel_visible(2).unwrap());
        assert_eq!(group.focused(), Some(2));
    }

    #[test]
    fn test_key_wraparound() {
        let mut group = tabs(3);
        group.focus(2).unwrap();
        group.navigate(2, Direction::Next).unwrap();
        assert_eq!(group.focused(), Some(0));

        group.navigate(0, Direction::Previous).unwrap();
        assert_eq!(group.focused(), Some(2));
    }

    #[test]
    fn test_accordion_keys_only_move_focus() {
        let mut group = accordion(Exclusivity::SingleOpen, 3);
        group.focus(0).unwrap();

        let changes = group.handle_key(0, "ArrowDown").unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(group.focused(), Some(1));
        assert!(group.selected_indices().is_empty());

        // Horizontal arrows do nothing in a vertical group
        assert!(group.handle_key(1, "ArrowRight").unwrap().is_empty());
        assert_eq!(group.focused(), Some(1));
    }

    #[test]
    fn test_key_without_focus_is_skipped() {
        let mut group = tabs(3);
        assert!(group.handle_key(0, "ArrowRight").unwrap().is_empty());
        assert_eq!(group.selected_indices(), vec![0]);

        group.focus(1).unwrap();
        // Key reported for a trigger that is not focused
        assert!(group.handle_key(0, "ArrowRight").unwrap().is_empty());

        group.blur();
        assert!(group.handle_key(1, "ArrowRight").unwrap().is_empty());
        assert_eq!(group.selected_indices(), vec![0]);
    }

    #[test]
    fn test_unknown_key_ignored() {
        let mut group = tabs(2);
        group.focus(0).unwrap();
        assert!(group.handle_key(0, "Enter").unwrap().is_empty());
        assert_eq!(group.focused(), Some(0));
    }

    #[test]
    fn test_vertical_tabs_follow_up_down() {
        let mut group =
            Group::new(config("side", Variant::Tabs, 3).oriented(Orientation::Vertical)).unwrap();
        assert_eq!(group.orientation(), Orientation::Vertical);
        group.focus(0).unwrap();

        assert!(group.handle_key(0, "ArrowRight").unwrap().is_empty());
        group.handle_key(0, "ArrowDown").unwrap();
        assert_eq!(group.selected_indices(), vec![1]);
        group.handle_key(1, "ArrowUp").unwrap();
        assert_eq!(group.selected_indices(), vec![0]);
    }

    #[test]
    fn test_orientation_defaults_to_variant() {
        assert_eq!(tabs(2).orientation(), Orientation::Horizontal);
        assert_eq!(
            accordion(Exclusivity::MultiOpen, 2).orientation(),
            Orientation::Vertical
        );

        let cfg: GroupConfig = serde_json::from_str(
            r#"{"id":"g","variant":{"kind":"tabs"},"triggers":[],"orientation":"vertical"}"#,
        )
        .unwrap();
        assert_eq!(cfg.orientation, Some(Orientation::Vertical));
    }
}
