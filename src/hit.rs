//! Hit-testing over the panel registry.
//!
//! Classifies a surface point as a panel's drag handle, resize corner,
//! or body, checking panels front-to-back so overlapping panels resolve
//! to the one on top. The metrics (header height, resize-corner size)
//! come from manager configuration since the engine does not render.

use crate::geometry::{Point, Rect};
use crate::model::Registry;

/// Hit-test metrics, mirroring how the host draws panels
#[derive(Debug, Clone, Copy)]
pub struct HitMetrics {
    /// Height of the drag-handle header strip
    pub header_height: i32,
    /// Edge length of the square resize corner, bottom-right
    pub resize_corner: i32,
}

/// What a surface point lands on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    /// The drag-handle header
    Header { id: String },
    /// The resize corner (present only on resizable panels)
    ResizeCorner { id: String },
    /// Anywhere else inside the panel
    Body { id: String },
}

impl HitTarget {
    pub fn panel_id(&self) -> &str {
        match self {
            HitTarget::Header { id } | HitTarget::ResizeCorner { id } | HitTarget::Body { id } => {
                id
            }
        }
    }
}

/// Find the front-most visible panel under `pt` and classify the hit.
///
/// Minimized and closed panels are skipped. The resize corner is only
/// reported for resizable panels, matching the affordance the host
/// renders; capability checks for starting a session still happen at
/// session start.
pub fn hit_test(registry: &Registry, pt: Point, metrics: &HitMetrics) -> Option<HitTarget> {
    for panel in registry.by_z_desc() {
        if !panel.rect.contains(pt) {
            continue;
        }

        if panel.caps.resizable && resize_corner_rect(panel.rect, metrics).contains(pt) {
            return Some(HitTarget::ResizeCorner {
                id: panel.id.clone(),
            });
        }

        if pt.y < panel.rect.top + metrics.header_height {
            return Some(HitTarget::Header {
                id: panel.id.clone(),
            });
        }

        return Some(HitTarget::Body {
            id: panel.id.clone(),
        });
    }
    None
}

fn resize_corner_rect(rect: Rect, metrics: &HitMetrics) -> Rect {
    let size = metrics.resize_corner.min(rect.width).min(rect.height);
    Rect::new(rect.right() - size, rect.bottom() - size, size, size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::SizeLimits;
    use crate::model::{Lifecycle, Panel, PanelCaps, Registry};

    const METRICS: HitMetrics = HitMetrics {
        header_height: 28,
        resize_corner: 16,
    };

    fn panel(id: &str, rect: Rect, z: u64) -> Panel {
        Panel {
            id: id.to_string(),
            title: id.to_string(),
            rect,
            caps: PanelCaps::default(),
            lifecycle: Lifecycle::Normal,
            z,
            active: false,
            bounds_container: None,
            limits: SizeLimits::default(),
            content: None,
            session: None,
        }
    }

    #[test]
    fn test_header_body_and_corner() {
        let mut registry = Registry::new();
        registry.insert(panel("a", Rect::new(100, 100, 200, 150), 1));

        assert_eq!(
            hit_test(&registry, Point::new(150, 110), &METRICS),
            Some(HitTarget::Header {
                id: "a".to_string()
            })
        );
        assert_eq!(
            hit_test(&registry, Point::new(150, 200), &METRICS),
            Some(HitTarget::Body {
                id: "a".to_string()
            })
        );
        assert_eq!(
            hit_test(&registry, Point::new(295, 245), &METRICS),
            Some(HitTarget::ResizeCorner {
                id: "a".to_string()
            })
        );
        assert_eq!(hit_test(&registry, Point::new(10, 10), &METRICS), None);
    }

    #[test]
    fn test_topmost_panel_wins() {
        let mut registry = Registry::new();
        registry.insert(panel("below", Rect::new(100, 100, 200, 150), 1));
        registry.insert(panel("above", Rect::new(150, 120, 200, 150), 2));

        let hit = hit_test(&registry, Point::new(200, 200), &METRICS).unwrap();
        assert_eq!(hit.panel_id(), "above");
    }

    #[test]
    fn test_minimized_panels_are_transparent() {
        let mut registry = Registry::new();
        let mut hidden = panel("hidden", Rect::new(100, 100, 200, 150), 2);
        hidden.lifecycle = Lifecycle::Minimized;
        registry.insert(hidden);
        registry.insert(panel("shown", Rect::new(100, 100, 200, 150), 1));

        let hit = hit_test(&registry, Point::new(150, 200), &METRICS).unwrap();
        assert_eq!(hit.panel_id(), "shown");
    }

    #[test]
    fn test_non_resizable_corner_is_body() {
        let mut registry = Registry::new();
        let mut fixed = panel("fixed", Rect::new(100, 100, 200, 150), 1);
        fixed.caps.resizable = false;
        registry.insert(fixed);

        assert_eq!(
            hit_test(&registry, Point::new(295, 245), &METRICS),
            Some(HitTarget::Body {
                id: "fixed".to_string()
            })
        );
    }
}
