//! Disclosure error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DisclosureError {
    #[error("Invalid trigger index: {index} (group has {len} triggers)")]
    InvalidIndex { index: usize, len: usize },

    #[error("Malformed group {group}: {reason}")]
    MalformedGroup {
        group: String,
        reason: MalformedReason,
    },
}

/// Why a group was refused at initialization
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    #[error("group has no triggers")]
    Empty,

    #[error("trigger {trigger} has no matching panel")]
    MissingPanel { trigger: usize },

    #[error("panel {panel_id} is controlled by more than one trigger")]
    DuplicatePanel { panel_id: String },
}
