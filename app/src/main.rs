//! Trellis event replay
//!
//! `trellis <page.html> [config.json]`
//!
//! Loads the page snapshot, prints the patches that normalize its initial
//! state, then reads one event per stdin line and prints the resulting
//! patches as a JSON line. Malformed or rejected events are logged and
//! skipped.

use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use trellis_core::{Config, CoreError, Event, Page, Patch};

#[derive(Serialize)]
struct Output<'a> {
    event: Option<&'a Event>,
    patches: &'a [Patch],
}

fn main() {
    trellis_core::init_logging();

    if let Err(e) = run() {
        tracing::error!(error = %e, "trellis failed");
        std::process::exit(1);
    }
}

fn run() -> Result<(), CoreError> {
    let mut args = std::env::args_os().skip(1);
    let html_path = args
        .next()
        .map(PathBuf::from)
        .ok_or_else(|| CoreError::Config("usage: trellis <page.html> [config.json]".to_string()))?;
    let config = match args.next() {
        Some(path) => Config::load(&PathBuf::from(path))?,
        None => Config::default(),
    };

    let html = std::fs::read_to_string(&html_path)?;
    let mut page = Page::load(&html, config)?;

    for group in page.groups() {
        tracing::info!(group = %group.id(), variant = %group.variant(), triggers = group.len(), "Group ready");
    }
    for skipped in page.skipped() {
        tracing::warn!(group = %skipped.id, reason = %skipped.reason, "Group excluded");
    }
    for assigned in page.assigned_ids() {
        tracing::info!(group = %assigned.group, index = assigned.index, id = %assigned.id, "Trigger needs id");
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let initial = page.initial_patches();
    emit(&mut out, None, &initial)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let event = match trimmed.parse::<Event>() {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring malformed event");
                continue;
            }
        };

        match page.dispatch(&event) {
            Ok(patches) => emit(&mut out, Some(&event), &patches)?,
            Err(e) => tracing::warn!(error = %e, "Event rejected"),
        }
    }

    Ok(())
}

fn emit(out: &mut impl Write, event: Option<&Event>, patches: &[Patch]) -> Result<(), CoreError> {
    serde_json::to_writer(&mut *out, &Output { event, patches })?;
    writeln!(out)?;
    Ok(())
}
