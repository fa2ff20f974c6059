//! Panel event subscriptions.
//!
//! Hosts subscribe to per-panel lifecycle events and get called with a
//! snapshot of the panel at emission time. Dispatch is an explicit loop
//! that isolates each subscriber: a panicking handler is caught and
//! logged, and the remaining handlers still run.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::geometry::Rect;

/// Lifecycle events a host can observe on a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelEventKind {
    /// Panel was raised to the front and marked active
    Focus,
    /// Panel was minimized into the dock
    Minimize,
    /// Panel was restored from the dock
    Restore,
    /// Panel was closed
    Close,
}

/// Snapshot handed to event handlers
#[derive(Debug, Clone)]
pub struct PanelEvent {
    pub kind: PanelEventKind,
    pub panel_id: String,
    pub title: String,
    pub rect: Rect,
}

/// Identifies one subscription, for [`EventHub::off`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

type Handler = Box<dyn FnMut(&PanelEvent)>;

struct Subscription {
    id: HandlerId,
    kind: PanelEventKind,
    handler: Handler,
}

/// Per-panel subscription registry
#[derive(Default)]
pub struct EventHub {
    next_id: u64,
    subscriptions: HashMap<String, Vec<Subscription>>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to `kind` events on panel `panel_id`
    pub fn on(
        &mut self,
        panel_id: &str,
        kind: PanelEventKind,
        handler: impl FnMut(&PanelEvent) + 'static,
    ) -> HandlerId {
        self.next_id += 1;
        let id = HandlerId(self.next_id);
        self.subscriptions
            .entry(panel_id.to_string())
            .or_default()
            .push(Subscription {
                id,
                kind,
                handler: Box::new(handler),
            });
        id
    }

    /// Drop one subscription. Unknown ids are a silent no-op.
    pub fn off(&mut self, panel_id: &str, id: HandlerId) {
        if let Some(subs) = self.subscriptions.get_mut(panel_id) {
            subs.retain(|s| s.id != id);
        }
    }

    /// Drop every subscription for a panel (on detach)
    pub fn remove_panel(&mut self, panel_id: &str) {
        self.subscriptions.remove(panel_id);
    }

    /// Notify every matching subscriber, isolating failures
    pub fn emit(&mut self, event: &PanelEvent) {
        let Some(subs) = self.subscriptions.get_mut(&event.panel_id) else {
            return;
        };
        for sub in subs.iter_mut() {
            if sub.kind != event.kind {
                continue;
            }
            let result = catch_unwind(AssertUnwindSafe(|| (sub.handler)(event)));
            if result.is_err() {
                tracing::error!(
                    panel = %event.panel_id,
                    event = ?event.kind,
                    "panel event handler panicked"
                );
            }
        }
    }
}
