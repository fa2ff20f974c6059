//! Panel registry and z-order bookkeeping

use std::collections::HashMap;

use crate::geometry::Rect;
use crate::model::panel::Panel;

/// First z value handed out; front-most panel always has the largest
const Z_SEED: u64 = 1000;

/// Owns every live panel, keyed by id.
///
/// The z counter is monotonic over the registry's whole history: values
/// are never reused, so comparing two panels' `z` always orders them by
/// most-recent focus.
#[derive(Debug, Clone)]
pub struct Registry {
    panels: HashMap<String, Panel>,
    z_counter: u64,
    active: Option<String>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            panels: HashMap::new(),
            z_counter: Z_SEED,
            active: None,
        }
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.panels.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Panel> {
        self.panels.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Panel> {
        self.panels.get_mut(id)
    }

    /// Register a panel, replacing any previous holder of the id
    pub fn insert(&mut self, panel: Panel) -> Option<Panel> {
        self.panels.insert(panel.id.clone(), panel)
    }

    /// Deregister a panel. Clears the active marker if it pointed here.
    pub fn remove(&mut self, id: &str) -> Option<Panel> {
        if self.active.as_deref() == Some(id) {
            self.active = None;
        }
        self.panels.remove(id)
    }

    /// Id of the currently active panel, if any
    pub fn active_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Panel> {
        self.panels.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Panel> {
        self.panels.values_mut()
    }

    /// Every registered id, for bulk operations that mutate as they go
    pub fn ids(&self) -> Vec<String> {
        self.panels.keys().cloned().collect()
    }

    /// Raise a panel to the front: bump the shared counter, assign the
    /// new rank, and mark exactly this panel active.
    pub fn bring_to_front(&mut self, id: &str) -> bool {
        if !self.panels.contains_key(id) {
            return false;
        }
        self.z_counter += 1;
        let z = self.z_counter;
        for panel in self.panels.values_mut() {
            panel.active = panel.id == id;
            if panel.id == id {
                panel.z = z;
            }
        }
        self.active = Some(id.to_string());
        true
    }

    /// Rectangles of visible panels other than `id`, the sibling set
    /// fed to the snap engine
    pub fn sibling_rects(&self, id: &str) -> Vec<Rect> {
        let mut rects: Vec<(u64, Rect)> = self
            .panels
            .values()
            .filter(|p| p.id != id && p.is_visible())
            .map(|p| (p.z, p.rect))
            .collect();
        // Stable order regardless of map iteration
        rects.sort_by_key(|(z, _)| *z);
        rects.into_iter().map(|(_, r)| r).collect()
    }

    /// Visible panels from front to back, for hit-testing
    pub fn by_z_desc(&self) -> Vec<&Panel> {
        let mut panels: Vec<&Panel> = self.panels.values().filter(|p| p.is_visible()).collect();
        panels.sort_by(|a, b| b.z.cmp(&a.z));
        panels
    }

    /// Ids of panels holding an active movement session
    pub fn session_ids(&self) -> Vec<String> {
        self.panels
            .values()
            .filter(|p| p.session.is_some())
            .map(|p| p.id.clone())
            .collect()
    }
}
