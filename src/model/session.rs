//! Movement sessions
//!
//! A session captures everything a drag or resize needs from its
//! pointer-down instant: the kind, the pointer origin, and the panel's
//! rectangle at that moment. Movement applies deltas against these
//! captured values rather than accumulating per-frame steps, so lost
//! or coalesced pointer-move events never skew the result.

use crate::geometry::{Point, Rect};

/// What kind of manipulation a session performs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    Drag,
    Resize,
}

/// Transient per-panel manipulation state.
///
/// Owned exclusively by one panel for its duration; a panel can hold at
/// most one, which is what makes drag and resize mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovementSession {
    pub kind: SessionKind,
    /// Pointer position at pointer-down
    pub origin: Point,
    /// Panel rectangle at pointer-down
    pub start: Rect,
}

impl MovementSession {
    pub fn new(kind: SessionKind, origin: Point, start: Rect) -> Self {
        Self {
            kind,
            origin,
            start,
        }
    }

    /// Pointer delta from the session origin
    pub fn delta(&self, pointer: Point) -> (i32, i32) {
        (pointer.x - self.origin.x, pointer.y - self.origin.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_from_origin() {
        let session = MovementSession::new(
            SessionKind::Drag,
            Point::new(100, 100),
            Rect::new(50, 50, 320, 240),
        );
        assert_eq!(session.delta(Point::new(130, 80)), (30, -20));
        assert_eq!(session.delta(Point::new(100, 100)), (0, 0));
    }
}
