//! Desktop shell: the presentation-side owner of the window registry
//!
//! The shell is the single place a [`WindowRegistry`] is constructed and
//! wired to its telemetry sink; presentation code reaches the registry only
//! through the handle the shell gives out. Wiring mistakes (an unknown sink
//! name) fail loudly at construction — they indicate a configuration bug,
//! not a runtime condition.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use log::{debug, info};
use parking_lot::RwLock;
use thiserror::Error;
use tokio::signal;

use crate::config::AuroraConfig;
use crate::registry::{WindowCommand, WindowDescriptor, WindowRegistry};
use crate::telemetry::{Breadcrumb, LogSink, NullSink, TelemetrySink};

/// Shell wiring errors. These are programmer/configuration errors and are
/// raised immediately at construction, never during command handling.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("unknown telemetry sink \"{0}\" (expected \"log\" or \"none\")")]
    UnknownTelemetrySink(String),
}

/// Main shell struct owning the registry and its telemetry wiring
pub struct DesktopShell {
    config: AuroraConfig,
    registry: Arc<RwLock<WindowRegistry>>,
    telemetry: Arc<dyn TelemetrySink>,
    running: bool,
}

impl std::fmt::Debug for DesktopShell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DesktopShell")
            .field("config", &self.config)
            .field("running", &self.running)
            .finish_non_exhaustive()
    }
}

impl DesktopShell {
    /// Create a new shell with the sink selected by the configuration
    pub fn new(config: AuroraConfig) -> Result<Self> {
        let telemetry: Arc<dyn TelemetrySink> = match config.telemetry.sink.as_str() {
            "log" => Arc::new(LogSink),
            "none" => Arc::new(NullSink),
            other => return Err(ShellError::UnknownTelemetrySink(other.to_string()).into()),
        };
        Self::with_telemetry(config, telemetry)
    }

    /// Create a new shell around an explicit telemetry sink
    pub fn with_telemetry(config: AuroraConfig, telemetry: Arc<dyn TelemetrySink>) -> Result<Self> {
        let started = Instant::now();

        config.validate().context("Invalid shell configuration")?;

        debug!("🪟 Initializing window registry...");
        let registry = WindowRegistry::with_telemetry(
            &config.registry,
            &config.telemetry.category,
            telemetry.clone(),
        );

        telemetry.breadcrumb(Breadcrumb::info("navigation", "Desktop shell loaded"));
        telemetry.increment("shell.loaded", 1.0, &[("shell", "desktop")]);
        telemetry.distribution(
            "shell.startup_time",
            started.elapsed().as_secs_f64() * 1000.0,
            &[("shell", "desktop")],
        );

        info!("✅ Desktop shell initialized");

        Ok(Self {
            config,
            registry: Arc::new(RwLock::new(registry)),
            telemetry,
            running: false,
        })
    }

    /// Shared handle to the registry for presentation code
    pub fn registry(&self) -> Arc<RwLock<WindowRegistry>> {
        self.registry.clone()
    }

    /// Current configuration
    pub fn config(&self) -> &AuroraConfig {
        &self.config
    }

    /// Forward a lifecycle command to the registry
    pub fn handle_command(&self, command: WindowCommand) {
        self.registry.write().apply(command);
    }

    /// Open the demo window cascade using the configured default geometry
    pub fn open_demo_windows(&self) {
        let demo = [
            ("terminal", "Terminal"),
            ("files", "File Explorer"),
            ("monitor", "System Monitor"),
        ];

        let window = &self.config.window;
        for (i, (id, title)) in demo.iter().enumerate() {
            let offset = window.cascade_offset * i as f64;
            self.handle_command(WindowCommand::Open(WindowDescriptor {
                id: id.to_string(),
                title: title.to_string(),
                x: window.default_x + offset,
                y: window.default_y + offset,
                width: window.default_width,
                height: window.default_height,
                minimized: false,
                maximized: false,
            }));
        }

        info!("🎭 Opened {} demo windows", demo.len());
    }

    /// Run the shell until a termination signal arrives
    pub async fn run(mut self) -> Result<()> {
        info!("🎬 Starting desktop shell event loop");

        self.running = true;

        let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())?;
        let mut sigint = signal::unix::signal(signal::unix::SignalKind::interrupt())?;

        while self.running {
            tokio::select! {
                _ = sigterm.recv() => {
                    info!("📨 Received SIGTERM, shutting down gracefully");
                    self.shutdown();
                }
                _ = sigint.recv() => {
                    info!("📨 Received SIGINT (Ctrl+C), shutting down gracefully");
                    self.shutdown();
                }
            }
        }

        info!("🛑 Desktop shell event loop finished");
        Ok(())
    }

    /// Gracefully shut down the shell
    fn shutdown(&mut self) {
        info!("🔽 Shutting down desktop shell...");

        self.running = false;

        let open_windows = self.registry.read().len();
        self.telemetry
            .gauge("window.count", open_windows as f64, &[]);
        debug!("🧹 {} windows still open at shutdown", open_windows);

        info!("✅ Desktop shell shutdown complete");
    }
}
