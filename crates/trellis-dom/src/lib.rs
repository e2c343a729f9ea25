//! Trellis DOM layer
//!
//! The disclosure core never looks at markup. This crate does the single
//! discovery pass over a page snapshot and turns the core's state changes
//! back into attribute updates:
//! - `[role="tablist"]` → tabs group of its `[role="tab"]` descendants
//! - `[data-accordion]` → accordion group of its `[aria-controls][aria-expanded]` descendants
//!
//! Triggers belong to their nearest enclosing group root only.

mod error;
mod patch;
mod scan;

pub use error::DomError;
pub use patch::{initial_patches, patches, Patch};
pub use scan::{scan, AssignedId, ScanReport, SkippedGroup};

pub type Result<T> = std::result::Result<T, DomError>;
