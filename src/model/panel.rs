//! A single floating panel

use crate::geometry::{Rect, SizeLimits};
use crate::model::session::MovementSession;

/// What a panel allows the user to do.
///
/// Fixed at creation; the interaction machine checks these at session
/// start, and lifecycle operations check them before acting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelCaps {
    pub draggable: bool,
    pub resizable: bool,
    pub closable: bool,
    pub minimizable: bool,
}

impl Default for PanelCaps {
    fn default() -> Self {
        Self {
            draggable: true,
            resizable: true,
            closable: true,
            minimizable: true,
        }
    }
}

/// Panel lifecycle state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Lifecycle {
    #[default]
    Normal,
    /// Hidden into the dock; excluded from snapping and hit-testing
    Minimized,
    /// Logically gone; stays registered only until its teardown
    /// transition completes
    Closed,
}

/// A floating panel instance
#[derive(Debug, Clone)]
pub struct Panel {
    pub id: String,
    pub title: String,
    pub rect: Rect,
    pub caps: PanelCaps,
    pub lifecycle: Lifecycle,
    /// Z-order rank; larger is nearer the front. Assigned by the
    /// registry, never reused.
    pub z: u64,
    /// Exactly one panel in the registry is active at a time
    pub active: bool,
    /// Named container the panel is bounded to, instead of the surface
    pub bounds_container: Option<String>,
    pub limits: SizeLimits,
    /// Opaque content for the rendering collaborator
    pub content: Option<String>,
    /// Active drag or resize session, at most one
    pub session: Option<MovementSession>,
}

impl Panel {
    pub fn is_minimized(&self) -> bool {
        self.lifecycle == Lifecycle::Minimized
    }

    pub fn is_closed(&self) -> bool {
        self.lifecycle == Lifecycle::Closed
    }

    /// Whether the panel participates in snapping and hit-testing
    pub fn is_visible(&self) -> bool {
        self.lifecycle == Lifecycle::Normal
    }

    /// Apply size limits to the current rectangle
    pub fn clamp_size(&mut self) {
        let (w, h) = self.limits.clamp_size(self.rect.width, self.rect.height);
        self.rect.width = w;
        self.rect.height = h;
    }
}
