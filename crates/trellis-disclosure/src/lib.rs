//! Trellis Disclosure Widgets
//!
//! One state machine behind both tabs and accordions: a group of triggers,
//! each controlling exactly one panel, with single-open or multi-open
//! visibility and arrow-key / Home / End focus traversal.
//!
//! ```text
//! Tabs                      Accordion (single-open)
//! (Unselected, -1)          Closed
//!   ↓ activate(self)          ↓ activate(self)
//! (Selected, 0)             Open
//!   ↓ activate(sibling)       ↓ activate(self | sibling)
//! (Unselected, -1)          Closed
//! ```

mod error;
mod group;
mod key;
mod state;
mod trigger;

pub use error::{DisclosureError, MalformedReason};
pub use group::{Change, Group, GroupConfig, TriggerConfig};
pub use key::{Direction, Orientation};
pub use state::{Exclusivity, TriggerState, Variant};
pub use trigger::Trigger;

pub type Result<T> = std::result::Result<T, DisclosureError>;
