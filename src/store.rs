//! Panel-state persistence.
//!
//! The manager talks to storage through the [`StateStore`] trait and
//! writes merge-patches keyed by panel id. Storage failure is never an
//! error to the caller: reads degrade to "no saved state" and writes
//! are dropped with a logged warning.
//!
//! Two implementations ship with the crate: an in-memory store and a
//! JSON file store that keeps the whole state map in a single versioned
//! document under the config directory.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Persisted geometry and minimized flag for one panel.
///
/// Every field is optional so the same type doubles as a merge-patch:
/// `Some` fields overwrite, `None` fields leave the stored value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimized: Option<bool>,
}

impl PanelState {
    /// Overlay `patch` onto `self`, field by field
    pub fn merge(&mut self, patch: &PanelState) {
        if patch.left.is_some() {
            self.left = patch.left;
        }
        if patch.top.is_some() {
            self.top = patch.top;
        }
        if patch.width.is_some() {
            self.width = patch.width;
        }
        if patch.height.is_some() {
            self.height = patch.height;
        }
        if patch.minimized.is_some() {
            self.minimized = patch.minimized;
        }
    }
}

/// Key-value persistence consumed by the manager.
///
/// Implementations must not fail outward; degraded behavior is empty
/// reads and dropped writes.
pub trait StateStore {
    /// Saved state for a panel id, if any
    fn get(&self, id: &str) -> Option<PanelState>;

    /// Merge `patch` into the stored state for `id`
    fn set(&mut self, id: &str, patch: PanelState);

    /// Remove the stored state for `id`
    fn delete(&mut self, id: &str);

    /// Remove all stored state
    fn clear(&mut self);
}

/// Shared-handle store, used when a host (or test) needs to keep a view
/// of the same store it handed to the manager.
impl<S: StateStore> StateStore for Rc<RefCell<S>> {
    fn get(&self, id: &str) -> Option<PanelState> {
        self.borrow().get(id)
    }

    fn set(&mut self, id: &str, patch: PanelState) {
        self.borrow_mut().set(id, patch);
    }

    fn delete(&mut self, id: &str) {
        self.borrow_mut().delete(id);
    }

    fn clear(&mut self) {
        self.borrow_mut().clear();
    }
}

/// In-memory store; state lives for the process only
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    states: HashMap<String, PanelState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl StateStore for MemoryStore {
    fn get(&self, id: &str) -> Option<PanelState> {
        self.states.get(id).cloned()
    }

    fn set(&mut self, id: &str, patch: PanelState) {
        self.states.entry(id.to_string()).or_default().merge(&patch);
    }

    fn delete(&mut self, id: &str) {
        self.states.remove(id);
    }

    fn clear(&mut self) {
        self.states.clear();
    }
}

/// On-disk document holding every panel's state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StateDocument {
    /// Schema version for forward compatibility
    #[serde(default)]
    version: u32,
    #[serde(default)]
    panels: HashMap<String, PanelState>,
}

impl StateDocument {
    const CURRENT_VERSION: u32 = 1;
}

/// JSON file store under the floatpane config directory.
///
/// Each operation reads and rewrites the whole document; panel-state
/// maps are tiny and this keeps concurrent hosts from clobbering more
/// than a single save.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: Option<PathBuf>,
}

impl JsonFileStore {
    /// Store backed by `~/.config/floatpane/<storage_key>.json`
    pub fn for_key(storage_key: &str) -> Self {
        let path = crate::paths::state_file(storage_key);
        if path.is_none() {
            tracing::warn!("no config directory available, panel state will not persist");
        }
        Self { path }
    }

    /// Store backed by an explicit file path
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    fn read_document(&self) -> anyhow::Result<StateDocument> {
        let Some(path) = &self.path else {
            return Ok(StateDocument::default());
        };
        if !path.exists() {
            return Ok(StateDocument::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading panel state from {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("parsing panel state in {}", path.display()))
    }

    fn write_document(&self, document: &StateDocument) -> anyhow::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let contents = serde_json::to_string_pretty(document)?;
        std::fs::write(path, contents)
            .with_context(|| format!("writing panel state to {}", path.display()))
    }

    /// Load tolerantly: unreadable or corrupt files degrade to empty
    fn load(&self) -> StateDocument {
        match self.read_document() {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!("failed to load panel state: {:#}", e);
                StateDocument::default()
            }
        }
    }

    fn save(&self, mut document: StateDocument) {
        document.version = StateDocument::CURRENT_VERSION;
        if let Err(e) = self.write_document(&document) {
            tracing::warn!("failed to save panel state: {:#}", e);
        }
    }
}

impl StateStore for JsonFileStore {
    fn get(&self, id: &str) -> Option<PanelState> {
        self.load().panels.get(id).cloned()
    }

    fn set(&mut self, id: &str, patch: PanelState) {
        let mut document = self.load();
        document.panels.entry(id.to_string()).or_default().merge(&patch);
        self.save(document);
    }

    fn delete(&mut self, id: &str) {
        let mut document = self.load();
        if document.panels.remove(id).is_some() {
            self.save(document);
        }
    }

    fn clear(&mut self) {
        let Some(path) = &self.path else { return };
        if path.exists() {
            if let Err(e) = std::fs::remove_file(path) {
                tracing::warn!("failed to clear panel state: {}", e);
            }
        }
    }
}
