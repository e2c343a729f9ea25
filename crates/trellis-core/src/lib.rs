//! Trellis Core
//!
//! Coordination layer for one page load: discovers the widgets in a page
//! snapshot, owns their state, and routes input events to them. The
//! presentation layer only applies the returned patches.

mod config;
mod error;
mod event;
mod page;

pub use config::Config;
pub use error::CoreError;
pub use event::Event;
pub use page::{Page, TOC_LINK_PREFIX};

// Re-export widget components
pub use trellis_content::{
    build_toc, Autocomplete, Banner, DelayedTask, Filter, FilterItem, FilterOutcome, Language,
    LanguageSwitcher, MegaMenu, MobileNav, Reveal, ScrollSpy, SpyChange, Suggestion, TocEntry,
};
pub use trellis_disclosure::{
    Change, Direction, DisclosureError, Exclusivity, Group, GroupConfig, Orientation, Trigger,
    TriggerConfig, Variant,
};
pub use trellis_dom::{AssignedId, Patch, ScanReport, SkippedGroup};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
///
/// Logs go to stderr so stdout stays free for patch output.
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
