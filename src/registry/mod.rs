//! Window Registry: the authoritative window lifecycle state
//!
//! The registry owns the full list of managed windows and the monotonic
//! stacking counter, and exposes the lifecycle operations the desktop shell
//! forwards user gestures to: open, close, minimize, maximize, restore,
//! focus, move, resize.
//!
//! Invariants maintained across every operation:
//! - window ids are unique across the registry
//! - at most one window is focused at any time
//! - stacking (z-index) values are issued strictly increasing and never
//!   reused; gaps are expected
//!
//! Operations are synchronous `&mut self` transitions, so no intermediate
//! state is ever observable. An id that does not match any window is a
//! silent no-op, never an error — the registry favors idempotent command
//! handling over validation. Every transition is reported to the injected
//! [`TelemetrySink`](crate::telemetry::TelemetrySink), which is best-effort
//! by contract and can never affect window state.

use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::{RegistryConfig, DEFAULT_BREADCRUMB_CATEGORY};
use crate::telemetry::{Breadcrumb, NullSink, TelemetrySink};

/// Caller-supplied description of a window to open.
///
/// Stacking and focus are assigned by the registry, never by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowDescriptor {
    /// Opaque unique identifier, stable for the window's lifetime
    pub id: String,

    /// Display label; used in telemetry tags, not for identity
    pub title: String,

    /// Position (unconstrained; may be negative or off-screen)
    pub x: f64,
    pub y: f64,

    /// Size (unconstrained)
    pub width: f64,
    pub height: f64,

    /// Initial minimized flag
    #[serde(default)]
    pub minimized: bool,

    /// Initial maximized flag
    #[serde(default)]
    pub maximized: bool,
}

/// One managed window's full state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowRecord {
    /// Unique identifier, the sole lookup key
    pub id: String,

    /// Display label
    pub title: String,

    /// Position
    pub x: f64,
    pub y: f64,

    /// Size
    pub width: f64,
    pub height: f64,

    /// Stacking order; higher renders on top. Assigned only by the registry.
    pub z_index: u64,

    /// Exclusive focus flag; at most one record has this set
    pub focused: bool,

    /// Minimized windows stay in the registry but are not frontmost
    pub minimized: bool,

    /// Independent of minimized
    pub maximized: bool,
}

/// Lifecycle commands accepted by [`WindowRegistry::apply`]
#[derive(Debug, Clone, PartialEq)]
pub enum WindowCommand {
    Open(WindowDescriptor),
    Close { id: String },
    Minimize { id: String },
    Maximize { id: String },
    Restore { id: String },
    Focus { id: String },
    Move { id: String, x: f64, y: f64 },
    Resize { id: String, width: f64, height: f64 },
}

/// The window lifecycle state manager
pub struct WindowRegistry {
    /// Managed windows in insertion order, keyed by id (no duplicates)
    windows: Vec<WindowRecord>,

    /// Monotonically non-decreasing stacking counter; every focus-changing
    /// operation consumes it and produces a strictly greater value
    top_z_index: u64,

    /// Best-effort event/metric destination
    telemetry: Arc<dyn TelemetrySink>,

    /// Breadcrumb category stamped on every lifecycle event
    category: String,
}

impl WindowRegistry {
    /// Create a registry with no telemetry backend
    pub fn new(config: &RegistryConfig) -> Self {
        Self::with_telemetry(config, DEFAULT_BREADCRUMB_CATEGORY, Arc::new(NullSink))
    }

    /// Create a registry that reports transitions to the given sink,
    /// stamping `category` on its breadcrumbs
    pub fn with_telemetry(
        config: &RegistryConfig,
        category: &str,
        telemetry: Arc<dyn TelemetrySink>,
    ) -> Self {
        Self {
            windows: Vec::new(),
            top_z_index: config.base_z_index,
            telemetry,
            category: category.to_string(),
        }
    }

    /// Apply a lifecycle command to the registry.
    ///
    /// This is the single transition entry point the shell uses; every
    /// command maps to exactly one of the operations below.
    pub fn apply(&mut self, command: WindowCommand) {
        match command {
            WindowCommand::Open(descriptor) => self.open(descriptor),
            WindowCommand::Close { id } => self.close(&id),
            WindowCommand::Minimize { id } => self.minimize(&id),
            WindowCommand::Maximize { id } => self.maximize(&id),
            WindowCommand::Restore { id } => self.restore(&id),
            WindowCommand::Focus { id } => self.focus(&id),
            WindowCommand::Move { id, x, y } => self.update_window_position(&id, x, y),
            WindowCommand::Resize { id, width, height } => {
                self.update_window_size(&id, width, height)
            }
        }
    }

    /// Open a window, focusing it and bringing it to the top.
    ///
    /// A duplicate id is defined behavior, not a failure: an existing
    /// minimized window is restored, an existing visible window is
    /// refocused. All three paths consume a fresh stacking value.
    pub fn open(&mut self, descriptor: WindowDescriptor) {
        self.telemetry.breadcrumb(
            Breadcrumb::info(&self.category, format!("Opening window: {}", descriptor.title)).with_data(
                json!({
                    "windowId": descriptor.id,
                    "windowTitle": descriptor.title,
                }),
            ),
        );
        self.telemetry
            .increment("window.opened", 1.0, &[("windowTitle", descriptor.title.as_str())]);

        let new_z = self.top_z_index + 1;
        self.top_z_index = new_z;

        if let Some(index) = self.position(&descriptor.id) {
            if self.windows[index].minimized {
                self.telemetry.breadcrumb(Breadcrumb::info(
                    &self.category,
                    format!("Restoring minimized window: {}", descriptor.title),
                ));
                for (i, window) in self.windows.iter_mut().enumerate() {
                    if i == index {
                        window.minimized = false;
                        window.focused = true;
                        window.z_index = new_z;
                    } else {
                        window.focused = false;
                    }
                }
                debug!("Restored minimized window {} (z={})", descriptor.id, new_z);
            } else {
                self.telemetry.breadcrumb(Breadcrumb::info(
                    &self.category,
                    format!("Focusing existing window: {}", descriptor.title),
                ));
                for (i, window) in self.windows.iter_mut().enumerate() {
                    if i == index {
                        window.focused = true;
                        window.z_index = new_z;
                    } else {
                        window.focused = false;
                    }
                }
                debug!("Refocused existing window {} (z={})", descriptor.id, new_z);
            }
            return;
        }

        self.telemetry
            .gauge("window.count", (self.windows.len() + 1) as f64, &[]);

        for window in &mut self.windows {
            window.focused = false;
        }
        debug!("Opened window {} (z={})", descriptor.id, new_z);
        self.windows.push(WindowRecord {
            id: descriptor.id,
            title: descriptor.title,
            x: descriptor.x,
            y: descriptor.y,
            width: descriptor.width,
            height: descriptor.height,
            z_index: new_z,
            focused: true,
            minimized: descriptor.minimized,
            maximized: descriptor.maximized,
        });
    }

    /// Remove a window from the registry.
    ///
    /// No-op if the id is absent. Closing the focused window leaves no
    /// window focused; focus is not handed to the next-topmost window.
    pub fn close(&mut self, id: &str) {
        if let Some(window) = self.get(id) {
            self.telemetry.breadcrumb(
                Breadcrumb::info(&self.category, format!("Closing window: {}", window.title))
                    .with_data(json!({ "windowId": id })),
            );
            self.telemetry
                .increment("window.closed", 1.0, &[("windowTitle", window.title.as_str())]);
            self.telemetry
                .gauge("window.count", (self.windows.len() - 1) as f64, &[]);
            debug!("Closed window {}", id);
        }
        self.windows.retain(|w| w.id != id);
    }

    /// Minimize a window, dropping its focus. Stacking is untouched.
    pub fn minimize(&mut self, id: &str) {
        if let Some(window) = self.get(id) {
            self.telemetry.breadcrumb(
                Breadcrumb::info(&self.category, format!("Minimizing window: {}", window.title))
                    .with_data(json!({ "windowId": id })),
            );
            self.telemetry.increment("window.minimized", 1.0, &[]);
            debug!("Minimized window {}", id);
        }
        for window in &mut self.windows {
            if window.id == id {
                window.minimized = true;
                window.focused = false;
            }
        }
    }

    /// Toggle a window's maximized flag.
    ///
    /// Acts as both maximize and restore-from-maximize; minimized state and
    /// focus are untouched.
    pub fn maximize(&mut self, id: &str) {
        if let Some(window) = self.get(id) {
            let action = if window.maximized { "restore" } else { "maximize" };
            self.telemetry.breadcrumb(
                Breadcrumb::info(&self.category, format!("{} window: {}", action, window.title))
                    .with_data(json!({ "windowId": id })),
            );
            self.telemetry
                .increment(&format!("window.{}d", action), 1.0, &[]);
            debug!("{} window {}", action, id);
        }
        for window in &mut self.windows {
            if window.id == id {
                window.maximized = !window.maximized;
            }
        }
    }

    /// Restore a minimized window: clear minimized, focus it, bring it to
    /// the top.
    ///
    /// The stacking counter advances and focus is cleared everywhere even
    /// when the id does not match any window.
    pub fn restore(&mut self, id: &str) {
        let new_z = self.top_z_index + 1;
        self.top_z_index = new_z;

        for window in &mut self.windows {
            if window.id == id {
                window.minimized = false;
                window.focused = true;
                window.z_index = new_z;
            } else {
                window.focused = false;
            }
        }
        debug!("Restored window {} (z={})", id, new_z);
    }

    /// Focus a window and bring it to the top, leaving minimized state as-is.
    ///
    /// Same unconditional counter/focus behavior as [`restore`](Self::restore).
    pub fn focus(&mut self, id: &str) {
        let new_z = self.top_z_index + 1;
        self.top_z_index = new_z;

        for window in &mut self.windows {
            if window.id == id {
                window.focused = true;
                window.z_index = new_z;
            } else {
                window.focused = false;
            }
        }
        debug!("Focused window {} (z={})", id, new_z);
    }

    /// Move a window. No stacking or focus side effects; no-op if absent.
    pub fn update_window_position(&mut self, id: &str, x: f64, y: f64) {
        for window in &mut self.windows {
            if window.id == id {
                window.x = x;
                window.y = y;
                debug!("Moved window {} to ({}, {})", id, x, y);
            }
        }
    }

    /// Resize a window. No stacking or focus side effects; no-op if absent.
    pub fn update_window_size(&mut self, id: &str, width: f64, height: f64) {
        for window in &mut self.windows {
            if window.id == id {
                window.width = width;
                window.height = height;
                debug!("Resized window {} to {}x{}", id, width, height);
            }
        }
    }

    // === Query surface ===

    /// All managed windows, in insertion order
    pub fn windows(&self) -> &[WindowRecord] {
        &self.windows
    }

    /// Current value of the stacking counter
    pub fn top_z_index(&self) -> u64 {
        self.top_z_index
    }

    /// Look up a window by id
    pub fn get(&self, id: &str) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == id)
    }

    /// The focused window, if any
    pub fn focused(&self) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.focused)
    }

    /// Number of managed windows
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.windows.iter().position(|w| w.id == id)
    }
}
