//! Mobile navigation and mega-menu
//!
//! The mega-menu opens a panel on pointer enter and closes it a short
//! delay after pointer leave, so crossing the gap between a top-level item
//! and its panel does not flicker. Re-entering cancels the pending close.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

use crate::timer::DelayedTask;

/// Hamburger-toggled navigation drawer
#[derive(Debug, Default)]
pub struct MobileNav {
    open: bool,
}

impl MobileNav {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Returns the new `aria-expanded` value of the toggle button
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        tracing::debug!(open = self.open, "Mobile navigation toggled");
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Returns true if the drawer was open
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    /// `Escape` closes the drawer; other keys are ignored.
    ///
    /// Returns true when the key closed it, so focus can return to the toggle.
    pub fn handle_key(&mut self, key: &str) -> bool {
        match key {
            "Escape" | "Esc" => self.close(),
            _ => false,
        }
    }
}

pub struct MegaMenu {
    /// Id of the open panel, shared with the delayed close
    open: Arc<Mutex<Option<String>>>,
    close_delay: Duration,
    pending_close: Option<DelayedTask>,
}

impl MegaMenu {
    pub fn new(close_delay: Duration) -> Self {
        Self {
            open: Arc::new(Mutex::new(None)),
            close_delay,
            pending_close: None,
        }
    }

    pub fn open_panel(&self) -> Option<String> {
        self.open.lock().clone()
    }

    pub fn is_open(&self, panel: &str) -> bool {
        self.open.lock().as_deref() == Some(panel)
    }

    /// Pointer entered a top-level item or its panel.
    ///
    /// Opening one panel closes any other immediately.
    pub fn pointer_enter(&mut self, panel: &str) {
        self.cancel_pending();

        let mut open = self.open.lock();
        if open.as_deref() != Some(panel) {
            tracing::debug!(panel, previous = ?open.as_deref(), "Mega-menu panel opened");
            *open = Some(panel.to_string());
        }
    }

    /// Pointer left; schedule the close. Must be called inside a tokio runtime.
    pub fn pointer_leave(&mut self, panel: &str) {
        self.cancel_pending();

        let open = Arc::clone(&self.open);
        let panel = panel.to_string();
        self.pending_close = Some(DelayedTask::spawn(self.close_delay, move || {
            let mut open = open.lock();
            // Another panel may have opened in the meantime
            if open.as_deref() == Some(panel.as_str()) {
                tracing::debug!(panel = %panel, "Mega-menu panel closed after delay");
                *open = None;
            }
        }));
    }

    /// Close immediately (Escape, click outside)
    pub fn close_all(&mut self) {
        self.cancel_pending();
        *self.open.lock() = None;
    }

    fn cancel_pending(&mut self) {
        if let Some(task) = self.pending_close.take() {
            task.cancel();
        }
    }
}
