//! # Aurora - Desktop Environment Shell
//!
//! A desktop shell built around a centralized window lifecycle manager.
//!
//! ## Architecture Overview
//!
//! - `registry`: window lifecycle state manager (open/close/minimize/
//!   maximize/restore/focus, stacking order, exclusive focus)
//! - `shell`: presentation-side owner of the registry handle
//! - `telemetry`: best-effort event/metric sink
//! - `config`: configuration parsing and management

use anyhow::Result;
use clap::Parser;
use log::{error, info};

use aurora::{AuroraConfig, DesktopShell};

#[derive(Parser)]
#[command(name = "aurora")]
#[command(about = "A desktop environment shell with centralized window lifecycle management")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "~/.config/aurora/aurora.toml")]
    config: String,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Open a set of demo windows at startup
    #[arg(long)]
    demo: bool,

    /// Disable telemetry regardless of configuration
    #[arg(long)]
    no_telemetry: bool,
}

/// Default log filter: either the CLI flag or the `[general] debug` knob
/// turns debug logging on; `RUST_LOG` still overrides both.
fn default_log_filter(cli_debug: bool, config_debug: bool) -> &'static str {
    if cli_debug || config_debug {
        "debug"
    } else {
        "info"
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The config can raise the default verbosity, so load it before the
    // logger comes up; messages about the load itself are emitted after.
    let config_result = AuroraConfig::load(&cli.config);
    let config_debug = config_result
        .as_ref()
        .map(|c| c.general.debug)
        .unwrap_or(false);

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_log_filter(cli.debug, config_debug)),
    )
    .init();

    info!("🚀 Starting Aurora desktop shell");
    info!(
        "📄 Version: {} (built {}, commit {})",
        env!("CARGO_PKG_VERSION"),
        env!("BUILD_DATE"),
        env!("GIT_COMMIT")
    );

    let mut config = match config_result {
        Ok(config) => {
            info!("✅ Configuration loaded from: {}", cli.config);
            config
        }
        Err(e) => {
            error!("❌ Failed to load configuration: {}", e);
            info!("📝 Using default configuration");
            AuroraConfig::default()
        }
    };

    if cli.no_telemetry {
        config.telemetry.sink = "none".to_string();
        info!("🚫 Telemetry disabled via CLI flag");
    }

    info!("🏗️  Initializing desktop shell...");
    let shell = DesktopShell::new(config)?;

    if cli.demo {
        info!("🎭 Opening demo windows...");
        shell.open_demo_windows();
    }

    info!("✨ Aurora is ready.");
    shell.run().await?;

    info!("👋 Aurora shutting down");
    Ok(())
}
