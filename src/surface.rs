//! Visual-surface queries consumed by the bounds resolver.
//!
//! The engine never touches rendering; it only asks the hosting surface
//! for the viewport extent, the vertical scroll offset, and the size of
//! named container regions that panels may be bounded to.

/// Read-only view of the hosting surface
pub trait Surface {
    /// Current viewport extent in pixel-equivalent units
    fn viewport(&self) -> (i32, i32);

    /// Current vertical scroll offset of the surface
    fn scroll_y(&self) -> i32 {
        0
    }

    /// Size of a named container region, if the surface knows it.
    ///
    /// Returning `None` makes the bounds resolver fall back to the
    /// viewport, which is the documented default for an unresolvable
    /// container reference.
    fn container_size(&self, _name: &str) -> Option<(i32, i32)> {
        None
    }
}

/// Shared-handle surface, for hosts (and tests) that keep updating the
/// surface they handed to the manager.
impl<S: Surface> Surface for std::rc::Rc<std::cell::RefCell<S>> {
    fn viewport(&self) -> (i32, i32) {
        self.borrow().viewport()
    }

    fn scroll_y(&self) -> i32 {
        self.borrow().scroll_y()
    }

    fn container_size(&self, name: &str) -> Option<(i32, i32)> {
        self.borrow().container_size(name)
    }
}

/// A surface with explicitly set dimensions.
///
/// Hosts that already track their viewport can push updates into this;
/// it is also the fixture surface for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSurface {
    width: i32,
    height: i32,
    scroll_y: i32,
    containers: std::collections::HashMap<String, (i32, i32)>,
}

impl StaticSurface {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn set_viewport(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
    }

    pub fn set_scroll_y(&mut self, scroll_y: i32) {
        self.scroll_y = scroll_y;
    }

    /// Register (or update) a named container region
    pub fn set_container(&mut self, name: impl Into<String>, width: i32, height: i32) {
        self.containers.insert(name.into(), (width, height));
    }
}

impl Surface for StaticSurface {
    fn viewport(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    fn scroll_y(&self) -> i32 {
        self.scroll_y
    }

    fn container_size(&self, name: &str) -> Option<(i32, i32)> {
        self.containers.get(name).copied()
    }
}
