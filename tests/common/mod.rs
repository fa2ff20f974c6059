//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use floatpane::config::{ManagerOptions, PanelOptions};
use floatpane::dock::DockHost;
use floatpane::geometry::Point;
use floatpane::input::Modifiers;
use floatpane::manager::PanelManager;
use floatpane::store::MemoryStore;
use floatpane::surface::StaticSurface;

/// Dock collaborator that records every notification
#[derive(Debug, Default)]
pub struct RecordingDock {
    /// Ids in add order, including duplicates
    pub added: Vec<String>,
    /// Ids in remove order, including no-op removes
    pub removed: Vec<String>,
    /// Ids currently shown in the tray
    pub entries: Vec<String>,
    pub cleared: usize,
}

impl DockHost for RecordingDock {
    fn add(&mut self, id: &str, _title: &str) {
        self.added.push(id.to_string());
        if !self.entries.iter().any(|e| e == id) {
            self.entries.push(id.to_string());
        }
    }

    fn remove(&mut self, id: &str) {
        self.removed.push(id.to_string());
        self.entries.retain(|e| e != id);
    }

    fn clear(&mut self) {
        self.cleared += 1;
        self.entries.clear();
    }
}

/// A manager wired to shared test collaborators, so tests can observe
/// the store, surface, and dock after handing them to the manager.
pub struct Fixture {
    pub manager: PanelManager,
    pub store: Rc<RefCell<MemoryStore>>,
    pub surface: Rc<RefCell<StaticSurface>>,
    pub dock: Rc<RefCell<RecordingDock>>,
}

/// Fixture with default options and a 1024x768 surface
pub fn fixture() -> Fixture {
    fixture_with(ManagerOptions::default())
}

pub fn fixture_with(options: ManagerOptions) -> Fixture {
    let store = Rc::new(RefCell::new(MemoryStore::new()));
    let surface = Rc::new(RefCell::new(StaticSurface::new(1024, 768)));
    let dock = Rc::new(RefCell::new(RecordingDock::default()));
    let manager = PanelManager::with_parts(
        options,
        Box::new(surface.clone()),
        Some(Box::new(store.clone())),
        Box::new(dock.clone()),
    );
    Fixture {
        manager,
        store,
        surface,
        dock,
    }
}

/// Rebuild a manager over the same store/surface/dock, as a fresh
/// session against persisted state.
pub fn reopen(fixture: &Fixture, options: ManagerOptions) -> PanelManager {
    PanelManager::with_parts(
        options,
        Box::new(fixture.surface.clone()),
        Some(Box::new(fixture.store.clone())),
        Box::new(fixture.dock.clone()),
    )
}

/// Create a panel with a fixed id and geometry
pub fn panel_at(
    manager: &mut PanelManager,
    id: &str,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
) -> String {
    manager.create(
        id,
        PanelOptions {
            id: Some(id.to_string()),
            position: Some((x, y)),
            size: Some((width, height)),
            ..Default::default()
        },
    )
}

/// Drag a panel so its top-left lands on `(to_left, to_top)` (before
/// clamping/snapping), then release with `modifiers`.
pub fn drag_to(
    manager: &mut PanelManager,
    id: &str,
    to_left: i32,
    to_top: i32,
    modifiers: Modifiers,
) {
    let (left, top) = manager.position(id).expect("panel exists");
    assert!(manager.begin_drag(id, Point::new(0, 0)), "drag must start");
    manager.pointer_move(Point::new(to_left - left, to_top - top));
    manager.pointer_up(modifiers);
}

/// Resize a panel by a pointer delta, then release
pub fn resize_by(manager: &mut PanelManager, id: &str, dx: i32, dy: i32) {
    assert!(
        manager.begin_resize(id, Point::new(0, 0)),
        "resize must start"
    );
    manager.pointer_move(Point::new(dx, dy));
    manager.pointer_up(Modifiers::NONE);
}
