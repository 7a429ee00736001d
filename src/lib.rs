//! # Aurora Desktop Shell Library
//!
//! A desktop environment shell built around a centralized window lifecycle
//! state manager: windows are opened, closed, minimized, maximized/restored,
//! and focused through one registry that owns stacking order and focus
//! exclusivity.
//!
//! ## Architecture
//!
//! Aurora is built on a modular architecture:
//! - `registry`: the window lifecycle state manager (the core)
//! - `shell`: presentation-side owner wiring the registry to telemetry
//! - `telemetry`: best-effort breadcrumb/metric sink abstraction
//! - `config`: configuration parsing and management
//!
//! ## Usage
//!
//! ```rust,no_run
//! use aurora::{AuroraConfig, DesktopShell};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AuroraConfig::default();
//!     let shell = DesktopShell::new(config)?;
//!     shell.run().await
//! }
//! ```

pub mod config;
pub mod registry;
pub mod shell;
pub mod telemetry;

// Re-export main types for easy access
pub use config::AuroraConfig;
pub use registry::{WindowCommand, WindowDescriptor, WindowRecord, WindowRegistry};
pub use shell::{DesktopShell, ShellError};
pub use telemetry::{Breadcrumb, BreadcrumbLevel, LogSink, MemorySink, NullSink, TelemetrySink};

// Re-export common error types
pub use anyhow::{Context, Error, Result};

/// Version information for Aurora
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
