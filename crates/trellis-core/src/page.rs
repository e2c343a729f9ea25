//! Page state container
//!
//! Owns every widget discovered in one page snapshot. Groups are kept in
//! load order and addressed by id; they share no state with each other.
//! Scroll-spy needs heading offsets, which only the presentation layer
//! knows, so it starts once a layout event arrives.

use std::collections::HashMap;

use trellis_content::{
    banners_from_html, build_toc, reveal_targets, Banner, Reveal, ScrollSpy, SpyChange, TocEntry,
};
use trellis_disclosure::Group;
use trellis_dom::{initial_patches, patches, scan, AssignedId, Patch, SkippedGroup};

use crate::config::Config;
use crate::error::CoreError;
use crate::event::Event;
use crate::Result;

/// Prefix of the TOC link ids, followed by the heading anchor
pub const TOC_LINK_PREFIX: &str = "toc-";

pub struct Page {
    config: Config,
    /// Valid groups in load order
    groups: Vec<Group>,
    /// Group id → position in `groups`
    index: HashMap<String, usize>,
    skipped: Vec<SkippedGroup>,
    assigned_ids: Vec<AssignedId>,
    toc: Vec<TocEntry>,
    spy: Option<ScrollSpy>,
    reveal: Reveal,
    banners: Vec<Banner>,
}

impl Page {
    /// Discover widgets and build the table of contents from `html`
    pub fn load(html: &str, config: Config) -> Result<Self> {
        config.validate()?;

        let report = scan(html)?;
        let toc = build_toc(html, &config.toc_selector)?;
        let reveal = config.reveal(reveal_targets(html)?);
        let banners = banners_from_html(html)?;

        let index = report
            .groups
            .iter()
            .enumerate()
            .map(|(i, group)| (group.id().to_string(), i))
            .collect();

        let page = Self {
            config,
            groups: report.groups,
            index,
            skipped: report.skipped,
            assigned_ids: report.assigned_ids,
            toc,
            spy: None,
            reveal,
            banners,
        };

        tracing::info!(
            groups = page.groups.len(),
            skipped = page.skipped.len(),
            toc_entries = page.toc.len(),
            banners = page.banners.len(),
            "Page loaded"
        );

        Ok(page)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, id: &str) -> Result<&Group> {
        self.index
            .get(id)
            .map(|&i| &self.groups[i])
            .ok_or_else(|| CoreError::UnknownGroup(id.to_string()))
    }

    fn group_mut(&mut self, id: &str) -> Result<&mut Group> {
        match self.index.get(id) {
            Some(&i) => Ok(&mut self.groups[i]),
            None => Err(CoreError::UnknownGroup(id.to_string())),
        }
    }

    pub fn skipped(&self) -> &[SkippedGroup] {
        &self.skipped
    }

    pub fn assigned_ids(&self) -> &[AssignedId] {
        &self.assigned_ids
    }

    pub fn toc(&self) -> &[TocEntry] {
        &self.toc
    }

    /// Index of the TOC entry the reader is in
    pub fn active_section(&self) -> Option<usize> {
        self.spy.as_ref().and_then(ScrollSpy::active)
    }

    pub fn reveal(&self) -> &Reveal {
        &self.reveal
    }

    pub fn banners(&self) -> &[Banner] {
        &self.banners
    }

    /// Patches that normalize the markup to every group's initial state
    pub fn initial_patches(&self) -> Vec<Patch> {
        self.groups.iter().flat_map(initial_patches).collect()
    }

    /// Route one input event to the widget it targets
    pub fn dispatch(&mut self, event: &Event) -> Result<Vec<Patch>> {
        match event {
            Event::Activate { group, index } => {
                self.dispatch_group(group, |g| g.activate(*index))
            }
            Event::Key { group, index, key } => {
                self.dispatch_group(group, |g| g.handle_key(*index, key))
            }
            Event::Focus { group, index } => self.dispatch_group(group, |g| {
                g.focus(*index)?;
                Ok(Vec::new())
            }),
            Event::Blur { group } => self.dispatch_group(group, |g| {
                g.blur();
                Ok(Vec::new())
            }),
            Event::Layout { tops } => self.layout(tops.clone()),
            Event::Scroll { position } => Ok(self.scroll(*position)),
            Event::Reveal { element, fraction } => Ok(self.observe(element, *fraction)),
            Event::Dismiss { banner } => self.dismiss(banner),
        }
    }

    fn dispatch_group<F>(&mut self, id: &str, op: F) -> Result<Vec<Patch>>
    where
        F: FnOnce(&mut Group) -> trellis_disclosure::Result<Vec<trellis_disclosure::Change>>,
    {
        let group = self.group_mut(id)?;
        let changes = op(group)?;

        tracing::debug!(group = %group.id(), changes = changes.len(), "Dispatched event");

        Ok(patches(group.variant(), &changes))
    }

    /// Start (or restart) scroll-spy with one offset per TOC entry
    pub fn layout(&mut self, tops: Vec<f64>) -> Result<Vec<Patch>> {
        if tops.len() != self.toc.len() {
            return Err(CoreError::InvalidEvent(format!(
                "expected {} heading offsets, got {}",
                self.toc.len(),
                tops.len()
            )));
        }

        let mut out = Vec::new();
        if let Some(previous) = self.active_section() {
            out.push(Patch::remove(&self.toc_link(previous), "aria-current"));
        }
        self.spy = Some(self.config.scroll_spy(tops));
        tracing::debug!(headings = self.toc.len(), "Scroll-spy started");

        Ok(out)
    }

    /// Move the TOC highlight to the section at `position`
    pub fn scroll(&mut self, position: f64) -> Vec<Patch> {
        let Some(spy) = self.spy.as_mut() else {
            tracing::debug!(position, "Ignoring scroll before layout");
            return Vec::new();
        };

        match spy.update(position) {
            Some(change) => self.spy_patches(change),
            None => Vec::new(),
        }
    }

    fn spy_patches(&self, change: SpyChange) -> Vec<Patch> {
        let mut out = Vec::with_capacity(2);
        if let Some(previous) = change.previous {
            out.push(Patch::remove(&self.toc_link(previous), "aria-current"));
        }
        if let Some(current) = change.current {
            out.push(Patch::set(&self.toc_link(current), "aria-current", "location"));
        }
        out
    }

    fn toc_link(&self, entry: usize) -> String {
        format!("{}{}", TOC_LINK_PREFIX, self.toc[entry].id)
    }

    /// Report an element's visible fraction; marks it once when revealed
    pub fn observe(&mut self, element: &str, fraction: f64) -> Vec<Patch> {
        if self.reveal.observe(element, fraction) {
            vec![Patch::set(element, "data-revealed", "true")]
        } else {
            Vec::new()
        }
    }

    pub fn dismiss(&mut self, banner: &str) -> Result<Vec<Patch>> {
        let target = self
            .banners
            .iter_mut()
            .find(|b| b.id() == banner)
            .ok_or_else(|| CoreError::UnknownBanner(banner.to_string()))?;

        if target.dismiss() {
            Ok(vec![Patch::set(banner, "hidden", "")])
        } else {
            Ok(Vec::new())
        }
    }
}
