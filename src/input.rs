//! Surface input translation.
//!
//! Bridges winit-flavored pointer and keyboard events into manager
//! calls. The tracker owns the modifier state so the manager never
//! holds hidden global input state; commits receive an explicit
//! snapshot taken at release time.

use winit::event::{ElementState, MouseButton};
use winit::keyboard::{Key, ModifiersState, NamedKey};

use crate::geometry::Point;
use crate::manager::PanelManager;

/// Keyboard step for arrow-key nudges
const NUDGE_STEP: i32 = 8;

/// Keyboard step with shift held
const NUDGE_STEP_FAST: i32 = 20;

/// Snapshot of keyboard modifiers at one instant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Snapshot with only shift held, the snap-suppression case
    pub fn shift_held() -> Self {
        Modifiers {
            shift: true,
            ..Self::NONE
        }
    }
}

impl From<ModifiersState> for Modifiers {
    fn from(state: ModifiersState) -> Self {
        Modifiers {
            shift: state.shift_key(),
            ctrl: state.control_key(),
            alt: state.alt_key(),
            meta: state.super_key(),
        }
    }
}

/// Whether an input event changed panel state (hosts redraw on `true`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Consumed,
    Ignored,
}

impl EventOutcome {
    pub fn consumed(&self) -> bool {
        matches!(self, EventOutcome::Consumed)
    }
}

/// Tracks modifier state across the surface's event stream and routes
/// pointer/key events into a [`PanelManager`].
#[derive(Debug, Clone, Copy, Default)]
pub struct InputTracker {
    modifiers: ModifiersState,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current modifier snapshot
    pub fn modifiers(&self) -> Modifiers {
        Modifiers::from(self.modifiers)
    }

    /// Feed a modifiers-changed event from the surface
    pub fn modifiers_changed(&mut self, state: ModifiersState) {
        self.modifiers = state;
    }

    /// Feed a surface focus loss. Modifier state resets so a shift
    /// held across a focus switch cannot suppress a later snap.
    pub fn focus_lost(&mut self) {
        self.modifiers = ModifiersState::empty();
    }

    /// Feed a mouse button event at a surface position
    pub fn mouse_button(
        &mut self,
        manager: &mut PanelManager,
        button: MouseButton,
        state: ElementState,
        position: (f64, f64),
    ) -> EventOutcome {
        if button != MouseButton::Left {
            return EventOutcome::Ignored;
        }
        match state {
            ElementState::Pressed => {
                let pt = to_point(position);
                if manager.pointer_down(pt).is_some() {
                    EventOutcome::Consumed
                } else {
                    EventOutcome::Ignored
                }
            }
            ElementState::Released => {
                manager.pointer_up(self.modifiers());
                EventOutcome::Consumed
            }
        }
    }

    /// Feed a cursor-moved event
    pub fn cursor_moved(
        &mut self,
        manager: &mut PanelManager,
        position: (f64, f64),
    ) -> EventOutcome {
        manager.pointer_move(to_point(position));
        EventOutcome::Consumed
    }

    /// Feed a key press. Arrows nudge the active panel, Escape
    /// minimizes it; everything else is ignored.
    pub fn key_pressed(&mut self, manager: &mut PanelManager, key: &Key) -> EventOutcome {
        let step = if self.modifiers().shift {
            NUDGE_STEP_FAST
        } else {
            NUDGE_STEP
        };

        let handled = match key {
            Key::Named(NamedKey::ArrowLeft) => manager.nudge_active(-step, 0),
            Key::Named(NamedKey::ArrowRight) => manager.nudge_active(step, 0),
            Key::Named(NamedKey::ArrowUp) => manager.nudge_active(0, -step),
            Key::Named(NamedKey::ArrowDown) => manager.nudge_active(0, step),
            Key::Named(NamedKey::Escape) => {
                manager.minimize_active();
                true
            }
            _ => false,
        };

        if handled {
            EventOutcome::Consumed
        } else {
            EventOutcome::Ignored
        }
    }
}

fn to_point(position: (f64, f64)) -> Point {
    Point::new(position.0.round() as i32, position.1.round() as i32)
}
