//! Panel state types
//!
//! Pure state: panels, their movement sessions, and the registry that
//! owns them. Mutation policy lives in the manager; these types only
//! enforce their own local invariants.

pub mod panel;
pub mod registry;
pub mod session;

pub use panel::{Lifecycle, Panel, PanelCaps};
pub use registry::Registry;
pub use session::{MovementSession, SessionKind};
