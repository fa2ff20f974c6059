//! Movement-bounds resolution.
//!
//! Computes the legal range for a panel's top-left corner, given either
//! a declared bounding container or the surface viewport plus an edge
//! margin. Called on every movement frame because the result depends on
//! the panel's current size, which a resize may just have changed.

use crate::geometry::{Bounds, Rect};
use crate::surface::Surface;

/// Resolve movement bounds for a panel of extent `rect` bounded to the
/// container named by `container`, or to the surface viewport when no
/// container is declared (or it cannot be located).
pub fn resolve(
    rect: Rect,
    container: Option<&str>,
    surface: &dyn Surface,
    margin: i32,
) -> Bounds {
    if let Some(name) = container {
        match surface.container_size(name) {
            Some((width, height)) => return container_bounds(rect, width, height, margin),
            None => {
                tracing::debug!(container = name, "bounding container not found, using viewport");
            }
        }
    }
    viewport_bounds(rect, surface, margin)
}

/// Bounds inside a container's own coordinate space
fn container_bounds(rect: Rect, width: i32, height: i32, margin: i32) -> Bounds {
    Bounds {
        min_left: margin,
        min_top: margin,
        max_left: (width - rect.width - margin).max(margin),
        max_top: (height - rect.height - margin).max(margin),
    }
}

/// Bounds against the surface viewport.
///
/// The vertical minimum follows the scroll offset so a panel cannot be
/// dragged above the visible top edge while the surface is scrolled.
fn viewport_bounds(rect: Rect, surface: &dyn Surface, margin: i32) -> Bounds {
    let (view_w, view_h) = surface.viewport();
    let scroll_y = surface.scroll_y();
    Bounds {
        min_left: margin,
        min_top: margin + scroll_y,
        max_left: (view_w - rect.width - margin).max(margin),
        max_top: (scroll_y + view_h - rect.height - margin).max(margin + scroll_y),
    }
}
