//! Trigger data structure
//!
//! A trigger owns the only piece of state in a trigger/panel pair: the
//! panel's visibility is always derived from the trigger's selection.

use serde::{Deserialize, Serialize};

use crate::group::Change;
use crate::state::{TriggerState, Variant};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    /// Position within the group (0..N-1), never changes
    pub index: usize,
    /// Element id of the interactive control
    pub trigger_id: String,
    /// Element id of the controlled panel
    pub panel_id: String,
    /// Current state in the state machine
    pub state: TriggerState,
    /// Whether this trigger is a tab-stop
    pub focusable: bool,
}

impl Trigger {
    pub(crate) fn new(
        index: usize,
        trigger_id: String,
        panel_id: String,
        state: TriggerState,
        variant: Variant,
    ) -> Self {
        Self {
            index,
            trigger_id,
            panel_id,
            state,
            focusable: variant.focusable(state),
        }
    }

    pub fn is_selected(&self) -> bool {
        self.state.is_selected()
    }

    pub fn is_panel_visible(&self) -> bool {
        self.state.is_selected()
    }

    /// Move to `new_state`, returning whether anything observable changed
    pub(crate) fn transition_to(&mut self, new_state: TriggerState, variant: Variant) -> bool {
        let focusable = variant.focusable(new_state);
        if self.state == new_state && self.focusable == focusable {
            return false;
        }

        tracing::debug!(
            trigger_id = %self.trigger_id,
            from = %self.state,
            to = %new_state,
            focusable,
            "Trigger state transition"
        );

        self.state = new_state;
        self.focusable = focusable;
        true
    }

    /// Changes describing this trigger's current state and its panel
    pub(crate) fn changes(&self) -> [Change; 2] {
        [
            Change::Trigger {
                index: self.index,
                trigger_id: self.trigger_id.clone(),
                selected: self.is_selected(),
                focusable: self.focusable,
            },
            Change::Panel {
                index: self.index,
                panel_id: self.panel_id.clone(),
                visible: self.is_panel_visible(),
            },
        ]
    }
}
