//! Manager and panel configuration
//!
//! Manager options persist in `~/.config/floatpane/config.yaml` so a
//! host can tune snapping and dock placement without recompiling.

use serde::{Deserialize, Serialize};

use crate::dock::DockPosition;
use crate::geometry::SizeLimits;
use crate::snap::{DEFAULT_PADDING, DEFAULT_THRESHOLD};

/// Manager configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagerOptions {
    /// Named surface region panel markup mounts into, read by the
    /// rendering host; `None` means the surface root. Bounds still come
    /// from the viewport unless a panel declares its own container.
    #[serde(default)]
    pub container: Option<String>,

    /// Whether geometry persists across sessions
    #[serde(default = "default_true")]
    pub persistence: bool,

    /// Key the persisted state map is stored under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Snap attraction distance
    #[serde(default = "default_snap_threshold")]
    pub snap_threshold: i32,

    /// Gap left between panels for edge-with-gap alignment
    #[serde(default = "default_snap_padding")]
    pub snap_padding: i32,

    /// Whether snapping is enabled at all
    #[serde(default = "default_true")]
    pub snapping: bool,

    /// Margin kept between panels and the surface/container edge
    #[serde(default = "default_edge_margin")]
    pub edge_margin: i32,

    /// Placement of the minimized-panel tray
    #[serde(default)]
    pub dock_position: DockPosition,

    /// Named anchor the tray attaches to when positioned at the top;
    /// unresolvable anchors fall back to the surface itself
    #[serde(default)]
    pub dock_anchor: Option<String>,

    /// Height of the drag-handle header, for hit-testing
    #[serde(default = "default_header_height")]
    pub header_height: i32,

    /// Edge length of the square resize corner, for hit-testing
    #[serde(default = "default_resize_corner")]
    pub resize_corner: i32,
}

fn default_true() -> bool {
    true
}

fn default_storage_key() -> String {
    "floatpane".to_string()
}

fn default_snap_threshold() -> i32 {
    DEFAULT_THRESHOLD
}

fn default_snap_padding() -> i32 {
    DEFAULT_PADDING
}

fn default_edge_margin() -> i32 {
    4
}

fn default_header_height() -> i32 {
    28
}

fn default_resize_corner() -> i32 {
    16
}

impl Default for ManagerOptions {
    fn default() -> Self {
        Self {
            container: None,
            persistence: true,
            storage_key: default_storage_key(),
            snap_threshold: default_snap_threshold(),
            snap_padding: default_snap_padding(),
            snapping: true,
            edge_margin: default_edge_margin(),
            dock_position: DockPosition::default(),
            dock_anchor: None,
            header_height: default_header_height(),
            resize_corner: default_resize_corner(),
        }
    }
}

impl ManagerOptions {
    /// Load options from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(options) => {
                    tracing::info!("Loaded config from {}", path.display());
                    options
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save options to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(&path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}

/// Per-panel construction options
#[derive(Debug, Clone)]
pub struct PanelOptions {
    /// Stable id; generated when absent. Saved geometry is keyed by
    /// this, so hosts wanting persistence should provide one.
    pub id: Option<String>,
    pub draggable: bool,
    pub resizable: bool,
    pub closable: bool,
    pub minimizable: bool,
    /// Named container the panel is bounded to, instead of the surface
    pub bounds: Option<String>,
    /// Initial position when no saved state exists
    pub position: Option<(i32, i32)>,
    /// Initial size when no saved state exists
    pub size: Option<(i32, i32)>,
    pub min_width: i32,
    pub min_height: i32,
    pub max_width: i32,
    pub max_height: i32,
    /// Opaque content handed to the rendering collaborator
    pub content: Option<String>,
}

impl Default for PanelOptions {
    fn default() -> Self {
        let limits = SizeLimits::default();
        Self {
            id: None,
            draggable: true,
            resizable: true,
            closable: true,
            minimizable: true,
            bounds: None,
            position: None,
            size: None,
            min_width: limits.min_width,
            min_height: limits.min_height,
            max_width: limits.max_width,
            max_height: limits.max_height,
            content: None,
        }
    }
}

impl PanelOptions {
    pub fn limits(&self) -> SizeLimits {
        SizeLimits {
            min_width: self.min_width,
            min_height: self.min_height,
            max_width: self.max_width,
            max_height: self.max_height,
        }
    }
}
