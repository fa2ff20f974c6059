//! Snap-target computation for panel drags.
//!
//! Given the dragged panel's rectangle, the rectangles of its visible
//! siblings, and the current movement bounds, the engine proposes a
//! corrected left/top per axis. Axes are fully independent: a drag can
//! snap horizontally while staying free vertically.
//!
//! Candidates per axis:
//! - bounds edges (lowest precedence),
//! - sibling edge-to-edge alignment (highest precedence),
//! - sibling edge-with-gap alignment (middle precedence).
//!
//! The winner is the candidate closest to the panel's current
//! coordinate, within the configured threshold. Distance ties resolve
//! to the higher-precedence candidate, and remaining ties to the
//! smaller coordinate, so the result never depends on sibling order.

use crate::geometry::{Bounds, Rect};

/// Default distance within which a candidate attracts the panel
pub const DEFAULT_THRESHOLD: i32 = 24;

/// Default gap left between panels for edge-with-gap alignment
pub const DEFAULT_PADDING: i32 = 4;

/// Candidate precedence. Lower wins on distance ties.
mod priority {
    /// Sibling edge-to-edge alignment
    pub const EDGE: u8 = 0;
    /// Sibling edge plus/minus the configured gap
    pub const GAP: u8 = 1;
    /// Movement-bounds edge
    pub const BOUNDS: u8 = 2;
}

/// Proposed correction per axis. `None` means no candidate was within
/// threshold on that axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnapResult {
    pub x: Option<i32>,
    pub y: Option<i32>,
}

impl SnapResult {
    /// True when neither axis produced a correction
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none()
    }
}

/// A single alignment target on one axis
#[derive(Debug, Clone, Copy)]
struct Candidate {
    coord: i32,
    priority: u8,
}

/// Snap engine configuration and candidate evaluation
#[derive(Debug, Clone)]
pub struct SnapEngine {
    threshold: i32,
    padding: i32,
    enabled: bool,
}

impl Default for SnapEngine {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            padding: DEFAULT_PADDING,
            enabled: true,
        }
    }
}

impl SnapEngine {
    pub fn new(threshold: i32, padding: i32, enabled: bool) -> Self {
        Self {
            threshold,
            padding,
            enabled,
        }
    }

    pub fn threshold(&self) -> i32 {
        self.threshold
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Compute the best snap correction for `panel` against `siblings`
    /// inside `bounds`.
    ///
    /// `siblings` must not include the dragged panel itself, nor any
    /// minimized or closed panel; the registry takes care of that.
    pub fn compute(&self, panel: Rect, siblings: &[Rect], bounds: Bounds) -> SnapResult {
        if !self.enabled {
            return SnapResult::default();
        }

        let mut horiz: Vec<Candidate> = Vec::with_capacity(2 + siblings.len() * 4);
        let mut vert: Vec<Candidate> = Vec::with_capacity(2 + siblings.len() * 4);

        // Movement-bounds edges
        horiz.push(Candidate {
            coord: bounds.min_left,
            priority: priority::BOUNDS,
        });
        horiz.push(Candidate {
            coord: bounds.max_left,
            priority: priority::BOUNDS,
        });
        vert.push(Candidate {
            coord: bounds.min_top,
            priority: priority::BOUNDS,
        });
        vert.push(Candidate {
            coord: bounds.max_top,
            priority: priority::BOUNDS,
        });

        for other in siblings {
            // Left edges aligned / right edges aligned
            horiz.push(Candidate {
                coord: other.left,
                priority: priority::EDGE,
            });
            horiz.push(Candidate {
                coord: other.right() - panel.width,
                priority: priority::EDGE,
            });
            // Sitting beside the sibling with a gap
            horiz.push(Candidate {
                coord: other.right() + self.padding,
                priority: priority::GAP,
            });
            horiz.push(Candidate {
                coord: other.left - panel.width - self.padding,
                priority: priority::GAP,
            });

            vert.push(Candidate {
                coord: other.top,
                priority: priority::EDGE,
            });
            vert.push(Candidate {
                coord: other.bottom() - panel.height,
                priority: priority::EDGE,
            });
            vert.push(Candidate {
                coord: other.bottom() + self.padding,
                priority: priority::GAP,
            });
            vert.push(Candidate {
                coord: other.top - panel.height - self.padding,
                priority: priority::GAP,
            });
        }

        SnapResult {
            x: self.select(panel.left, &horiz),
            y: self.select(panel.top, &vert),
        }
    }

    /// Pick the winning candidate for one axis, or `None` when nothing
    /// is within threshold.
    fn select(&self, current: i32, candidates: &[Candidate]) -> Option<i32> {
        let mut best: Option<(i32, u8, i32)> = None; // (distance, priority, coord)

        for c in candidates {
            let distance = (current - c.coord).abs();
            if distance > self.threshold {
                continue;
            }
            let key = (distance, c.priority, c.coord);
            match best {
                Some(b) if key >= b => {}
                _ => best = Some(key),
            }
        }

        best.map(|(_, _, coord)| coord)
    }
}
