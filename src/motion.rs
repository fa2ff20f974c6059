//! Cosmetic transitions: snap settle and close teardown.
//!
//! Logical state always commits first; transitions only describe the
//! visual tail the host may animate, plus the structural cleanup a
//! close still owes (detaching from the registry). The host drives
//! them by calling the manager's `tick`; a transition that never ticks
//! never compromises committed state.

use std::time::{Duration, Instant};

use crate::geometry::Rect;

/// Duration of the settle animation after a snapped drag commit
pub const SNAP_SETTLE: Duration = Duration::from_millis(150);

/// Delay before a closed panel detaches, leaving room for an exit
/// animation
pub const CLOSE_TEARDOWN: Duration = Duration::from_millis(180);

/// What a transition animates or defers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// Panel geometry already committed to `to`; the host may animate
    /// from `from`
    SnapSettle { from: Rect, to: Rect },
    /// Panel already closed; registry detach happens on completion
    CloseTeardown,
}

/// Pending transitions across all panels
#[derive(Debug, Clone, Default)]
pub struct Transitions {
    items: Vec<(String, TransitionKind, Instant, Duration)>,
}

/// A transition that has run its course
#[derive(Debug, Clone)]
pub struct CompletedTransition {
    pub panel_id: String,
    pub kind: TransitionKind,
}

/// A transition still in flight, with interpolation support for hosts
#[derive(Debug, Clone, Copy)]
pub struct ActiveTransition<'a> {
    pub panel_id: &'a str,
    pub kind: TransitionKind,
    progress: f32,
}

impl ActiveTransition<'_> {
    /// Completion fraction in `[0, 1]`
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Interpolated rectangle for a settle, for hosts that animate
    pub fn settle_rect(&self) -> Option<Rect> {
        let TransitionKind::SnapSettle { from, to } = self.kind else {
            return None;
        };
        let t = self.progress;
        let lerp = |a: i32, b: i32| a + ((b - a) as f32 * t).round() as i32;
        Some(Rect::new(
            lerp(from.left, to.left),
            lerp(from.top, to.top),
            lerp(from.width, to.width),
            lerp(from.height, to.height),
        ))
    }
}

impl Transitions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Queue a transition starting now
    pub fn schedule(&mut self, panel_id: &str, kind: TransitionKind, duration: Duration) {
        self.items
            .push((panel_id.to_string(), kind, Instant::now(), duration));
    }

    /// Drop every pending transition for a panel
    pub fn cancel(&mut self, panel_id: &str) {
        self.items.retain(|(id, _, _, _)| id != panel_id);
    }

    /// Remove and return transitions whose duration has elapsed at `now`
    pub fn expire(&mut self, now: Instant) -> Vec<CompletedTransition> {
        let mut completed = Vec::new();
        self.items.retain(|(id, kind, started, duration)| {
            let elapsed = now.saturating_duration_since(*started);
            if elapsed >= *duration {
                completed.push(CompletedTransition {
                    panel_id: id.clone(),
                    kind: *kind,
                });
                false
            } else {
                true
            }
        });
        completed
    }

    /// Transitions still in flight at `now`, for host-side animation
    pub fn active_at(&self, now: Instant) -> Vec<ActiveTransition<'_>> {
        self.items
            .iter()
            .map(|(id, kind, started, duration)| {
                let elapsed = now.saturating_duration_since(*started).as_secs_f32();
                let total = duration.as_secs_f32().max(f32::EPSILON);
                ActiveTransition {
                    panel_id: id,
                    kind: *kind,
                    progress: (elapsed / total).clamp(0.0, 1.0),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expire_after_duration() {
        let mut transitions = Transitions::new();
        transitions.schedule("a", TransitionKind::CloseTeardown, CLOSE_TEARDOWN);

        assert!(transitions.expire(Instant::now()).is_empty());

        let later = Instant::now() + CLOSE_TEARDOWN + Duration::from_millis(1);
        let completed = transitions.expire(later);
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].panel_id, "a");
        assert!(transitions.is_empty());
    }

    #[test]
    fn test_cancel_drops_pending() {
        let mut transitions = Transitions::new();
        let settle = TransitionKind::SnapSettle {
            from: Rect::new(0, 0, 100, 100),
            to: Rect::new(4, 0, 100, 100),
        };
        transitions.schedule("a", settle, SNAP_SETTLE);
        transitions.cancel("a");

        let later = Instant::now() + SNAP_SETTLE + Duration::from_millis(1);
        assert!(transitions.expire(later).is_empty());
    }

    #[test]
    fn test_settle_rect_interpolates() {
        let mut transitions = Transitions::new();
        let from = Rect::new(0, 0, 100, 100);
        let to = Rect::new(100, 0, 100, 100);
        transitions.schedule("a", TransitionKind::SnapSettle { from, to }, SNAP_SETTLE);

        let active = transitions.active_at(Instant::now());
        assert_eq!(active.len(), 1);
        let rect = active[0].settle_rect().unwrap();
        assert!(rect.left >= from.left && rect.left <= to.left);

        let done = transitions.active_at(Instant::now() + SNAP_SETTLE);
        assert_eq!(done[0].settle_rect().unwrap(), to);
    }
}
