//! Dock collaborator interface and the built-in tray.
//!
//! The manager notifies a dock whenever a panel is minimized, restored,
//! or removed. Hosts that render their own minimized-panel tray
//! implement [`DockHost`]; everyone else gets [`TrayDock`], a plain
//! state container the host can read back for rendering.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Maximum characters of a panel title shown on a tray entry
const LABEL_LIMIT: usize = 12;

/// Where the tray is placed on the surface
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DockPosition {
    /// Along the top of the surface
    #[default]
    Top,
    /// Floating in the bottom-right corner
    BottomRight,
    /// No tray at all; minimize notifications are dropped
    Hidden,
}

/// Minimized-panel tray notifications
pub trait DockHost {
    /// A panel was minimized; show an entry for it
    fn add(&mut self, id: &str, title: &str);

    /// A panel was restored or removed; drop its entry if present
    fn remove(&mut self, id: &str);

    /// Drop every entry (manager teardown)
    fn clear(&mut self);
}

/// Shared-handle dock, for hosts (and tests) that keep a view of the
/// dock they handed to the manager.
impl<D: DockHost> DockHost for Rc<RefCell<D>> {
    fn add(&mut self, id: &str, title: &str) {
        self.borrow_mut().add(id, title);
    }

    fn remove(&mut self, id: &str) {
        self.borrow_mut().remove(id);
    }

    fn clear(&mut self) {
        self.borrow_mut().clear();
    }
}

/// One entry in the tray
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockEntry {
    pub id: String,
    /// Truncated title for the tray button
    pub label: String,
    /// Full title for tooltips
    pub title: String,
}

/// Built-in tray state, ordered by minimize time
#[derive(Debug, Clone, Default)]
pub struct TrayDock {
    position: DockPosition,
    entries: Vec<DockEntry>,
}

impl TrayDock {
    pub fn new(position: DockPosition) -> Self {
        Self {
            position,
            entries: Vec::new(),
        }
    }

    pub fn position(&self) -> DockPosition {
        self.position
    }

    pub fn entries(&self) -> &[DockEntry] {
        &self.entries
    }

    /// The tray renders only while it has entries
    pub fn is_visible(&self) -> bool {
        self.position != DockPosition::Hidden && !self.entries.is_empty()
    }

    fn label_for(title: &str) -> String {
        let label: String = title.chars().take(LABEL_LIMIT).collect();
        if label.is_empty() {
            "\u{2022}".to_string()
        } else {
            label
        }
    }
}

impl DockHost for TrayDock {
    fn add(&mut self, id: &str, title: &str) {
        if self.position == DockPosition::Hidden {
            return;
        }
        if self.entries.iter().any(|e| e.id == id) {
            return;
        }
        self.entries.push(DockEntry {
            id: id.to_string(),
            label: Self::label_for(title),
            title: title.to_string(),
        });
    }

    fn remove(&mut self, id: &str) {
        self.entries.retain(|e| e.id != id);
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tray_add_remove() {
        let mut tray = TrayDock::new(DockPosition::Top);
        assert!(!tray.is_visible());

        tray.add("a", "Console");
        tray.add("b", "Inspector");
        assert!(tray.is_visible());
        assert_eq!(tray.entries().len(), 2);

        tray.remove("a");
        assert_eq!(tray.entries().len(), 1);
        assert_eq!(tray.entries()[0].id, "b");

        tray.remove("b");
        assert!(!tray.is_visible());
    }

    #[test]
    fn test_tray_deduplicates_ids() {
        let mut tray = TrayDock::new(DockPosition::Top);
        tray.add("a", "Console");
        tray.add("a", "Console");
        assert_eq!(tray.entries().len(), 1);
    }

    #[test]
    fn test_tray_truncates_labels() {
        let mut tray = TrayDock::new(DockPosition::BottomRight);
        tray.add("a", "A very long panel title");
        assert_eq!(tray.entries()[0].label, "A very long ");
        assert_eq!(tray.entries()[0].title, "A very long panel title");
    }

    #[test]
    fn test_hidden_tray_drops_notifications() {
        let mut tray = TrayDock::new(DockPosition::Hidden);
        tray.add("a", "Console");
        assert!(tray.entries().is_empty());
        assert!(!tray.is_visible());
    }
}
