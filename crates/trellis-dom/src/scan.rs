//! Page snapshot scanning
//!
//! One pass over the parsed document: find every tablist and accordion,
//! resolve each trigger's panel reference against the ids that actually
//! exist, and hand the snapshot to the core. Groups the core refuses are
//! reported, never fatal.
//!
//! A group owns only the triggers whose nearest enclosing group root is
//! its own root, so nested accordions never share triggers.

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

use trellis_disclosure::{
    DisclosureError, Exclusivity, Group, GroupConfig, Orientation, TriggerConfig, Variant,
};

use crate::error::DomError;
use crate::Result;

const TABLIST_SELECTOR: &str = "[role='tablist']";
const TAB_SELECTOR: &str = "[role='tab']";
const ACCORDION_SELECTOR: &str = "[data-accordion]";
const ACCORDION_TRIGGER_SELECTOR: &str = "[aria-controls][aria-expanded]";
const ID_SELECTOR: &str = "[id]";

/// Group refused at initialization
#[derive(Debug, Clone, Serialize)]
pub struct SkippedGroup {
    pub id: String,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct ScanReport {
    /// Valid groups in document order, tablists first
    pub groups: Vec<Group>,
    pub skipped: Vec<SkippedGroup>,
    /// Ids synthesized for triggers of accepted groups
    pub assigned_ids: Vec<AssignedId>,
    /// Trigger and panel ids → the accepted group that owns them
    claimed: HashMap<String, String>,
}

/// The presentation layer must set `id` on the `index`-th trigger of `group`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignedId {
    pub group: String,
    pub index: usize,
    pub id: String,
}

/// Triggers found under one root, with the ids made up for them
struct Collected {
    triggers: Vec<TriggerConfig>,
    assigned: Vec<AssignedId>,
}

/// Discover every tabs and accordion group in `html`
pub fn scan(html: &str) -> Result<ScanReport> {
    let doc = Html::parse_document(html);
    let ids = document_ids(&doc)?;

    let mut report = ScanReport::default();

    let tablists = parse_selector(TABLIST_SELECTOR)?;
    let tabs = parse_selector(TAB_SELECTOR)?;
    for (n, list) in doc.select(&tablists).enumerate() {
        let id = group_id(&list, "tabs", n);
        let collected = collect_triggers(&list, &tabs, &id, "aria-selected", &ids);
        let mut config = GroupConfig::new(id, Variant::Tabs, collected.triggers);
        config.orientation = orientation(&list);
        report.push(config, collected.assigned);
    }

    let accordions = parse_selector(ACCORDION_SELECTOR)?;
    let headers = parse_selector(ACCORDION_TRIGGER_SELECTOR)?;
    for (n, root) in doc.select(&accordions).enumerate() {
        let id = group_id(&root, "accordion", n);
        let exclusivity = match root.value().attr("data-accordion").map(str::trim) {
            Some("multiple") | Some("multi") => Exclusivity::MultiOpen,
            _ => Exclusivity::SingleOpen,
        };
        let collected = collect_triggers(&root, &headers, &id, "aria-expanded", &ids);
        let mut config = GroupConfig::new(id, Variant::accordion(exclusivity), collected.triggers);
        config.orientation = orientation(&root);
        report.push(config, collected.assigned);
    }

    tracing::info!(
        groups = report.groups.len(),
        skipped = report.skipped.len(),
        assigned_ids = report.assigned_ids.len(),
        "Scanned page for disclosure widgets"
    );

    Ok(report)
}

impl ScanReport {
    /// Accept or skip one group. Synthesized ids are committed only for
    /// accepted groups.
    fn push(&mut self, config: GroupConfig, assigned: Vec<AssignedId>) {
        if let Some(reason) = self.conflict(&config) {
            self.skip(config.id, reason);
            return;
        }

        match Group::new(config) {
            Ok(group) => {
                for trigger in group.triggers() {
                    for element in [&trigger.trigger_id, &trigger.panel_id] {
                        self.claimed.insert(element.clone(), group.id().to_string());
                    }
                }
                self.assigned_ids.extend(assigned);
                self.groups.push(group);
            }
            Err(DisclosureError::MalformedGroup { group, reason }) => {
                self.skip(group, reason.to_string());
            }
            Err(e) => {
                tracing::warn!(error = %e, "Skipping group");
            }
        }
    }

    /// A group clashing with one already accepted, by id or by element
    fn conflict(&self, config: &GroupConfig) -> Option<String> {
        if self.groups.iter().any(|g| g.id() == config.id) {
            return Some("duplicate group id".to_string());
        }

        config.triggers.iter().find_map(|t| {
            std::iter::once(&t.trigger_id)
                .chain(t.panel_id.as_ref())
                .find_map(|element| {
                    self.claimed
                        .get(element)
                        .map(|owner| format!("element {} already belongs to group {}", element, owner))
                })
        })
    }

    fn skip(&mut self, id: String, reason: String) {
        tracing::warn!(group = %id, %reason, "Skipping group");
        self.skipped.push(SkippedGroup { id, reason });
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| DomError::InvalidSelector(format!("{selector}: {e}")))
}

fn document_ids(doc: &Html) -> Result<HashSet<String>> {
    let sel = parse_selector(ID_SELECTOR)?;
    Ok(doc
        .select(&sel)
        .filter_map(|el| el.value().id())
        .map(str::to_string)
        .collect())
}

fn group_id(el: &ElementRef<'_>, prefix: &str, n: usize) -> String {
    match el.value().id().map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => format!("{}-{}", prefix, n),
    }
}

fn is_group_root(el: &ElementRef<'_>) -> bool {
    let value = el.value();
    value.attr("data-accordion").is_some() || value.attr("role") == Some("tablist")
}

/// True when no other group root sits between `el` and `root`
fn owned_by(el: &ElementRef<'_>, root: &ElementRef<'_>) -> bool {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .find(is_group_root)
        .is_some_and(|nearest| nearest == *root)
}

fn orientation(el: &ElementRef<'_>) -> Option<Orientation> {
    match el.value().attr("aria-orientation").map(str::trim) {
        Some(v) if v.eq_ignore_ascii_case("vertical") => Some(Orientation::Vertical),
        Some(v) if v.eq_ignore_ascii_case("horizontal") => Some(Orientation::Horizontal),
        _ => None,
    }
}

fn collect_triggers(
    root: &ElementRef<'_>,
    selector: &Selector,
    group_id: &str,
    state_attr: &str,
    ids: &HashSet<String>,
) -> Collected {
    let mut assigned = Vec::new();
    let triggers = root
        .select(selector)
        .filter(|el| owned_by(el, root))
        .enumerate()
        .map(|(i, el)| {
            let trigger_id = match el.value().id().map(str::trim) {
                Some(id) if !id.is_empty() => id.to_string(),
                _ => {
                    let id = format!("{}-trigger-{}", group_id, i);
                    assigned.push(AssignedId {
                        group: group_id.to_string(),
                        index: i,
                        id: id.clone(),
                    });
                    id
                }
            };

            TriggerConfig {
                trigger_id,
                panel_id: panel_reference(&el).filter(|panel| ids.contains(panel)),
                initially_selected: el
                    .value()
                    .attr(state_attr)
                    .is_some_and(|v| v.trim().eq_ignore_ascii_case("true")),
            }
        })
        .collect();

    Collected { triggers, assigned }
}

/// `aria-controls`, falling back to an in-page `href="#panel"`
fn panel_reference(el: &ElementRef<'_>) -> Option<String> {
    let value = el.value();
    value
        .attr("aria-controls")
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .or_else(|| value.attr("href").and_then(|h| h.trim().strip_prefix('#')))
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
