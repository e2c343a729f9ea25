//! Trellis Content Behaviors
//!
//! Independent page glue next to the disclosure widgets:
//! - dismissible alert banners
//! - language switcher
//! - list filtering by attribute equality
//! - header search autocomplete
//! - generated table of contents with scroll-spy
//! - one-shot scroll reveal
//! - mobile navigation and mega-menu with delayed close

mod autocomplete;
mod banner;
mod error;
mod filter;
mod language;
mod menu;
mod reveal;
mod timer;
mod toc;

pub use autocomplete::{Autocomplete, Suggestion};
pub use banner::{banners_from_html, Banner};
pub use error::ContentError;
pub use filter::{items_from_html, Filter, FilterItem, FilterOutcome, WILDCARD};
pub use language::{Language, LanguageSwitcher};
pub use menu::{MegaMenu, MobileNav};
pub use reveal::{reveal_targets, visible_fraction, Reveal, DEFAULT_THRESHOLD};
pub use timer::DelayedTask;
pub use toc::{build_toc, slugify, ScrollSpy, SpyChange, TocEntry};

pub type Result<T> = std::result::Result<T, ContentError>;
