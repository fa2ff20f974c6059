//! Panel manager: registry ownership, the drag/resize state machine,
//! and coordination with the snap engine, bounds resolver, dock, and
//! persistence adapter.
//!
//! All mutation funnels through here. Pointer and key events arrive
//! from the hosting surface (usually via the `input` module), move
//! through a panel's movement session, and settle into committed,
//! persisted geometry on release.

use std::time::Instant;

use crate::bounds;
use crate::config::{ManagerOptions, PanelOptions};
use crate::dock::{DockHost, TrayDock};
use crate::events::{EventHub, HandlerId, PanelEvent, PanelEventKind};
use crate::geometry::{Point, Rect};
use crate::hit::{self, HitMetrics, HitTarget};
use crate::input::Modifiers;
use crate::model::{Lifecycle, MovementSession, Panel, PanelCaps, Registry, SessionKind};
use crate::motion::{ActiveTransition, TransitionKind, Transitions, CLOSE_TEARDOWN, SNAP_SETTLE};
use crate::snap::SnapEngine;
use crate::store::{JsonFileStore, PanelState, StateStore};
use crate::surface::{StaticSurface, Surface};
use crate::util;

/// Position a panel lands at when neither saved state nor options say
const DEFAULT_POSITION: (i32, i32) = (50, 50);

/// Extent a panel gets when neither saved state nor options say
const DEFAULT_SIZE: (i32, i32) = (320, 240);

/// Viewport assumed until the host supplies a real surface
const FALLBACK_VIEWPORT: (i32, i32) = (1920, 1080);

/// Owns every panel and runs the interaction state machine
pub struct PanelManager {
    options: ManagerOptions,
    registry: Registry,
    snap: SnapEngine,
    store: Option<Box<dyn StateStore>>,
    dock: Box<dyn DockHost>,
    surface: Box<dyn Surface>,
    events: EventHub,
    transitions: Transitions,
}

impl PanelManager {
    /// Manager with the default collaborators: a JSON file store under
    /// the config directory (when persistence is on), the built-in
    /// tray dock, and a fixed fallback viewport.
    pub fn new(options: ManagerOptions) -> Self {
        let store: Option<Box<dyn StateStore>> = if options.persistence {
            Some(Box::new(JsonFileStore::for_key(&options.storage_key)))
        } else {
            None
        };
        let dock = Box::new(TrayDock::new(options.dock_position));
        let surface = Box::new(StaticSurface::new(FALLBACK_VIEWPORT.0, FALLBACK_VIEWPORT.1));
        Self::with_parts(options, surface, store, dock)
    }

    /// Manager with host-supplied collaborators.
    ///
    /// `store` may be `None` to disable persistence outright; when
    /// `Some`, it is used regardless of the `persistence` option so a
    /// host handing in a store gets what it asked for.
    pub fn with_parts(
        options: ManagerOptions,
        surface: Box<dyn Surface>,
        store: Option<Box<dyn StateStore>>,
        dock: Box<dyn DockHost>,
    ) -> Self {
        let snap = SnapEngine::new(options.snap_threshold, options.snap_padding, options.snapping);
        Self {
            options,
            registry: Registry::new(),
            snap,
            store,
            dock,
            surface,
            events: EventHub::new(),
            transitions: Transitions::new(),
        }
    }

    pub fn options(&self) -> &ManagerOptions {
        &self.options
    }

    // =========================================================================
    // Registry operations
    // =========================================================================

    /// Create and register a panel.
    ///
    /// Geometry comes from saved state when present, else the options,
    /// else the defaults, and is clamped into the panel's size limits.
    /// The new panel is raised to the front, and re-minimized when its
    /// saved state says so.
    pub fn create(&mut self, title: impl Into<String>, options: PanelOptions) -> String {
        let title = title.into();
        let id = options.id.clone().unwrap_or_else(util::generate_id);

        // A recreated id supersedes any pending teardown of the old one
        self.transitions.cancel(&id);
        if self.registry.contains(&id) {
            tracing::warn!(panel = %id, "replacing existing panel with the same id");
            self.remove(&id);
        }

        let saved = match &self.store {
            Some(store) => store.get(&id).unwrap_or_default(),
            None => PanelState::default(),
        };

        let left = saved
            .left
            .or(options.position.map(|p| p.0))
            .unwrap_or(DEFAULT_POSITION.0);
        let top = saved
            .top
            .or(options.position.map(|p| p.1))
            .unwrap_or(DEFAULT_POSITION.1);
        let width = saved
            .width
            .or(options.size.map(|s| s.0))
            .unwrap_or(DEFAULT_SIZE.0);
        let height = saved
            .height
            .or(options.size.map(|s| s.1))
            .unwrap_or(DEFAULT_SIZE.1);

        let limits = options.limits();
        let (width, height) = limits.clamp_size(width, height);

        let panel = Panel {
            id: id.clone(),
            title,
            rect: Rect::new(left, top, width, height),
            caps: PanelCaps {
                draggable: options.draggable,
                resizable: options.resizable,
                closable: options.closable,
                minimizable: options.minimizable,
            },
            lifecycle: Lifecycle::Normal,
            z: 0,
            active: false,
            bounds_container: options.bounds,
            limits,
            content: options.content,
            session: None,
        };

        self.registry.insert(panel);
        self.bring_to_front(&id);
        if saved.minimized.unwrap_or(false) {
            self.minimize(&id);
        }
        tracing::debug!(panel = %id, "panel created");
        id
    }

    pub fn get(&self, id: &str) -> Option<&Panel> {
        self.registry.get(id)
    }

    /// Every registered panel, including minimized and closing ones
    pub fn panels(&self) -> impl Iterator<Item = &Panel> {
        self.registry.iter()
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn active_id(&self) -> Option<&str> {
        self.registry.active_id()
    }

    /// Raise a panel to the front and mark it active
    pub fn bring_to_front(&mut self, id: &str) {
        if self.registry.bring_to_front(id) {
            self.emit(PanelEventKind::Focus, id);
        }
    }

    /// Detach a panel immediately: deregister, drop its dock entry and
    /// subscriptions, cancel pending transitions. Persisted state is
    /// left alone; `close` is the operation that deletes it.
    pub fn remove(&mut self, id: &str) {
        self.transitions.cancel(id);
        if self.registry.remove(id).is_some() {
            tracing::debug!(panel = %id, "panel detached");
        }
        self.dock.remove(id);
        self.events.remove_panel(id);
    }

    pub fn close_all(&mut self) {
        for id in self.registry.ids() {
            self.close(&id);
        }
    }

    pub fn minimize_all(&mut self) {
        for id in self.registry.ids() {
            self.minimize(&id);
        }
    }

    pub fn restore_all(&mut self) {
        for id in self.registry.ids() {
            self.restore(&id);
        }
    }

    /// Drop all persisted panel state
    pub fn clear_storage(&mut self) {
        if let Some(store) = &mut self.store {
            store.clear();
        }
    }

    /// Tear the manager down: close what closes, detach the rest, and
    /// empty the dock. Persisted state of surviving panels is kept.
    pub fn destroy(&mut self) {
        self.close_all();
        for id in self.registry.ids() {
            self.remove(&id);
        }
        self.dock.clear();
    }

    // =========================================================================
    // Panel lifecycle
    // =========================================================================

    /// Minimize a panel into the dock. No-op unless the panel is in its
    /// normal state and minimizable.
    pub fn minimize(&mut self, id: &str) {
        let title = match self.registry.get_mut(id) {
            Some(p) if p.lifecycle == Lifecycle::Normal && p.caps.minimizable => {
                // A minimized panel holds no movement session
                p.session = None;
                p.lifecycle = Lifecycle::Minimized;
                p.title.clone()
            }
            _ => return,
        };
        self.dock.add(id, &title);
        self.persist(id);
        self.emit(PanelEventKind::Minimize, id);
        tracing::debug!(panel = %id, "panel minimized");
    }

    /// Restore a minimized panel and raise it to the front
    pub fn restore(&mut self, id: &str) {
        match self.registry.get_mut(id) {
            Some(p) if p.lifecycle == Lifecycle::Minimized => {
                p.lifecycle = Lifecycle::Normal;
            }
            _ => return,
        }
        self.dock.remove(id);
        self.bring_to_front(id);
        self.persist(id);
        self.emit(PanelEventKind::Restore, id);
        tracing::debug!(panel = %id, "panel restored");
    }

    /// Close a panel. The closed flag, close event, and persisted-entry
    /// deletion are immediate; detaching from the registry waits for
    /// the teardown transition so the host can animate the exit.
    pub fn close(&mut self, id: &str) {
        match self.registry.get_mut(id) {
            Some(p) if !p.is_closed() && p.caps.closable => {
                p.session = None;
                p.lifecycle = Lifecycle::Closed;
            }
            _ => return,
        }
        self.transitions.cancel(id);
        self.emit(PanelEventKind::Close, id);
        if let Some(store) = &mut self.store {
            store.delete(id);
        }
        self.transitions
            .schedule(id, TransitionKind::CloseTeardown, CLOSE_TEARDOWN);
        tracing::debug!(panel = %id, "panel closed");
    }

    // =========================================================================
    // Geometry setters / getters
    // =========================================================================

    /// Move a panel directly and persist. Setter moves are not clamped;
    /// hosts placing panels programmatically get exactly what they ask.
    pub fn set_position(&mut self, id: &str, x: i32, y: i32) {
        match self.registry.get_mut(id) {
            Some(p) if !p.is_closed() => {
                p.rect.left = x;
                p.rect.top = y;
            }
            _ => return,
        }
        self.persist(id);
    }

    /// Resize a panel directly, clamped into its size limits, and
    /// persist.
    pub fn set_size(&mut self, id: &str, width: i32, height: i32) {
        match self.registry.get_mut(id) {
            Some(p) if !p.is_closed() => {
                p.rect.width = width;
                p.rect.height = height;
                p.clamp_size();
            }
            _ => return,
        }
        self.persist(id);
    }

    /// Retitle a panel. Does not touch persisted geometry.
    pub fn set_title(&mut self, id: &str, title: impl Into<String>) {
        if let Some(p) = self.registry.get_mut(id) {
            if !p.is_closed() {
                p.title = title.into();
            }
        }
    }

    /// Replace a panel's content. Does not touch persisted geometry.
    pub fn set_content(&mut self, id: &str, content: impl Into<String>) {
        if let Some(p) = self.registry.get_mut(id) {
            if !p.is_closed() {
                p.content = Some(content.into());
            }
        }
    }

    pub fn position(&self, id: &str) -> Option<(i32, i32)> {
        self.registry.get(id).map(|p| (p.rect.left, p.rect.top))
    }

    pub fn size(&self, id: &str) -> Option<(i32, i32)> {
        self.registry.get(id).map(|p| (p.rect.width, p.rect.height))
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Subscribe to a lifecycle event on one panel
    pub fn on(
        &mut self,
        id: &str,
        kind: PanelEventKind,
        handler: impl FnMut(&PanelEvent) + 'static,
    ) -> HandlerId {
        self.events.on(id, kind, handler)
    }

    /// Drop a subscription made with [`PanelManager::on`]
    pub fn off(&mut self, id: &str, handler: HandlerId) {
        self.events.off(id, handler);
    }

    fn emit(&mut self, kind: PanelEventKind, id: &str) {
        let event = match self.registry.get(id) {
            Some(panel) => PanelEvent {
                kind,
                panel_id: panel.id.clone(),
                title: panel.title.clone(),
                rect: panel.rect,
            },
            None => return,
        };
        self.events.emit(&event);
    }

    // =========================================================================
    // Interaction state machine
    // =========================================================================

    /// Start a drag session from a pointer-down on the panel's drag
    /// handle. Raises the panel. Refused (returning `false`) when the
    /// panel is not draggable, not in its normal state, or already in a
    /// session of either kind.
    pub fn begin_drag(&mut self, id: &str, pointer: Point) -> bool {
        let ok = matches!(
            self.registry.get(id),
            Some(p) if p.caps.draggable && p.is_visible() && p.session.is_none()
        );
        if !ok {
            return false;
        }
        self.bring_to_front(id);
        if let Some(p) = self.registry.get_mut(id) {
            p.session = Some(MovementSession::new(SessionKind::Drag, pointer, p.rect));
        }
        tracing::debug!(panel = %id, "drag session started");
        true
    }

    /// Start a resize session from a pointer-down on the resize handle.
    /// Refused when the panel is not resizable, not in its normal
    /// state, or already in a session of either kind.
    pub fn begin_resize(&mut self, id: &str, pointer: Point) -> bool {
        let ok = matches!(
            self.registry.get(id),
            Some(p) if p.caps.resizable && p.is_visible() && p.session.is_none()
        );
        if !ok {
            return false;
        }
        if let Some(p) = self.registry.get_mut(id) {
            p.session = Some(MovementSession::new(SessionKind::Resize, pointer, p.rect));
        }
        tracing::debug!(panel = %id, "resize session started");
        true
    }

    /// Route a pointer-down through hit-testing: header presses start a
    /// drag, resize-corner presses start a resize, body presses raise.
    pub fn pointer_down(&mut self, pointer: Point) -> Option<HitTarget> {
        let hit = hit::hit_test(&self.registry, pointer, &self.hit_metrics())?;
        match &hit {
            HitTarget::Header { id } => {
                let id = id.clone();
                if !self.begin_drag(&id, pointer) {
                    // Locked panels still come to the front on a press
                    self.bring_to_front(&id);
                }
            }
            HitTarget::ResizeCorner { id } => {
                let id = id.clone();
                self.bring_to_front(&id);
                self.begin_resize(&id, pointer);
            }
            HitTarget::Body { id } => {
                let id = id.clone();
                self.bring_to_front(&id);
            }
        }
        Some(hit)
    }

    /// Apply a pointer-move to every active session. Drags translate
    /// from the session's start rectangle and clamp into freshly
    /// resolved bounds; resizes grow from the start extent and clamp
    /// into size limits only.
    pub fn pointer_move(&mut self, pointer: Point) {
        for id in self.registry.session_ids() {
            let (session, limits) = {
                let Some(panel) = self.registry.get(&id) else {
                    continue;
                };
                let Some(session) = panel.session else {
                    continue;
                };
                (session, panel.limits)
            };
            let (dx, dy) = session.delta(pointer);
            match session.kind {
                SessionKind::Drag => {
                    let Some(bounds) = self.resolve_bounds_for(&id) else {
                        continue;
                    };
                    let (left, top) =
                        bounds.clamp_position(session.start.left + dx, session.start.top + dy);
                    if let Some(panel) = self.registry.get_mut(&id) {
                        panel.rect.left = left;
                        panel.rect.top = top;
                    }
                }
                SessionKind::Resize => {
                    let (width, height) =
                        limits.clamp_size(session.start.width + dx, session.start.height + dy);
                    if let Some(panel) = self.registry.get_mut(&id) {
                        panel.rect.width = width;
                        panel.rect.height = height;
                    }
                }
            }
        }
    }

    /// Commit every active session on pointer-up (or pointer-cancel).
    ///
    /// `modifiers` is the state at release time; a held shift skips the
    /// snap lookup. Drag commits consult the snap engine and, when it
    /// proposes a correction, move the panel there immediately and
    /// schedule the cosmetic settle. Sessions on panels that were
    /// closed or minimized mid-drag are dropped without committing.
    pub fn pointer_up(&mut self, modifiers: Modifiers) {
        for id in self.registry.session_ids() {
            let (session, visible) = {
                let Some(panel) = self.registry.get_mut(&id) else {
                    continue;
                };
                let Some(session) = panel.session.take() else {
                    continue;
                };
                (session, panel.is_visible())
            };

            if !visible {
                tracing::debug!(panel = %id, "session abandoned, panel left normal state");
                continue;
            }

            match session.kind {
                SessionKind::Resize => self.persist(&id),
                SessionKind::Drag => {
                    if modifiers.shift {
                        self.persist(&id);
                        continue;
                    }
                    self.commit_drag_with_snap(&id);
                }
            }
        }
    }

    fn commit_drag_with_snap(&mut self, id: &str) {
        let Some(rect) = self.registry.get(id).map(|p| p.rect) else {
            return;
        };
        let Some(bounds) = self.resolve_bounds_for(id) else {
            return;
        };
        let siblings = self.registry.sibling_rects(id);
        let snap = self.snap.compute(rect, &siblings, bounds);

        if snap.is_empty() {
            self.persist(id);
            return;
        }

        // Sibling-derived targets can fall just outside the legal
        // range; the committed corner still has to respect it
        let (left, top) =
            bounds.clamp_position(snap.x.unwrap_or(rect.left), snap.y.unwrap_or(rect.top));
        let target = Rect { left, top, ..rect };
        if target == rect {
            self.persist(id);
            return;
        }

        if let Some(panel) = self.registry.get_mut(id) {
            panel.rect = target;
        }
        self.transitions.schedule(
            id,
            TransitionKind::SnapSettle {
                from: rect,
                to: target,
            },
            SNAP_SETTLE,
        );
        self.persist(id);
        tracing::debug!(panel = %id, from = ?rect, to = ?target, "drag committed with snap");
    }

    // =========================================================================
    // Keyboard
    // =========================================================================

    /// Move the active panel by a keyboard step, clamped into its
    /// bounds, and persist.
    pub fn nudge_active(&mut self, dx: i32, dy: i32) -> bool {
        let Some(id) = self.registry.active_id().map(String::from) else {
            return false;
        };
        let ok = matches!(
            self.registry.get(&id),
            Some(p) if p.is_visible() && p.caps.draggable
        );
        if !ok {
            return false;
        }
        let Some(bounds) = self.resolve_bounds_for(&id) else {
            return false;
        };
        if let Some(panel) = self.registry.get_mut(&id) {
            let (left, top) = bounds.clamp_position(panel.rect.left + dx, panel.rect.top + dy);
            panel.rect.left = left;
            panel.rect.top = top;
        }
        self.persist(&id);
        true
    }

    /// Minimize the active panel (Escape)
    pub fn minimize_active(&mut self) {
        if let Some(id) = self.registry.active_id().map(String::from) {
            self.minimize(&id);
        }
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Advance cosmetic transitions. Expired close teardowns detach
    /// their panel. Returns whether anything completed, so hosts know
    /// to re-render.
    pub fn tick(&mut self, now: Instant) -> bool {
        let completed = self.transitions.expire(now);
        let any = !completed.is_empty();
        for done in completed {
            if let TransitionKind::CloseTeardown = done.kind {
                let still_closed = self
                    .registry
                    .get(&done.panel_id)
                    .map(|p| p.is_closed())
                    .unwrap_or(false);
                // A recreated panel under the same id is not torn down
                if still_closed {
                    self.remove(&done.panel_id);
                }
            }
        }
        any
    }

    /// Transitions in flight, for hosts that animate settles and exits
    pub fn active_transitions(&self, now: Instant) -> Vec<ActiveTransition<'_>> {
        self.transitions.active_at(now)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Hit-test a surface point without dispatching anything
    pub fn hit_test(&self, pointer: Point) -> Option<HitTarget> {
        hit::hit_test(&self.registry, pointer, &self.hit_metrics())
    }

    fn hit_metrics(&self) -> HitMetrics {
        HitMetrics {
            header_height: self.options.header_height,
            resize_corner: self.options.resize_corner,
        }
    }

    fn resolve_bounds_for(&self, id: &str) -> Option<crate::geometry::Bounds> {
        let panel = self.registry.get(id)?;
        Some(bounds::resolve(
            panel.rect,
            panel.bounds_container.as_deref(),
            self.surface.as_ref(),
            self.options.edge_margin,
        ))
    }

    fn persist(&mut self, id: &str) {
        let Some(store) = &mut self.store else {
            return;
        };
        let Some(panel) = self.registry.get(id) else {
            return;
        };
        store.set(
            id,
            PanelState {
                left: Some(panel.rect.left),
                top: Some(panel.rect.top),
                width: Some(panel.rect.width),
                height: Some(panel.rect.height),
                minimized: Some(panel.is_minimized()),
            },
        );
    }
}
