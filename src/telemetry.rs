//! Best-effort telemetry sink for window lifecycle events
//!
//! The registry reports every state transition to a [`TelemetrySink`]:
//! breadcrumb-style log events plus named numeric metrics. The sink contract
//! is strictly fire-and-forget — implementations must not panic, must not
//! block the caller, and the registry never observes whether delivery
//! succeeded. A sink that loses its backend degrades locally (see
//! [`LogSink`]); it never propagates failure into window state.
//!
//! Three implementations are provided:
//! - [`NullSink`]: the no-op default
//! - [`LogSink`]: forwards everything to the `log` facade
//! - [`MemorySink`]: records everything in memory, for tests

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Severity of a breadcrumb event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreadcrumbLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl BreadcrumbLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            BreadcrumbLevel::Debug => "debug",
            BreadcrumbLevel::Info => "info",
            BreadcrumbLevel::Warning => "warning",
            BreadcrumbLevel::Error => "error",
        }
    }

    fn to_log_level(self) -> log::Level {
        match self {
            BreadcrumbLevel::Debug => log::Level::Debug,
            BreadcrumbLevel::Info => log::Level::Info,
            BreadcrumbLevel::Warning => log::Level::Warn,
            BreadcrumbLevel::Error => log::Level::Error,
        }
    }
}

/// A breadcrumb-style log event: category, message, level, optional payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breadcrumb {
    /// Event category (e.g. "window", "navigation")
    pub category: String,

    /// Human-readable message
    pub message: String,

    /// Severity level
    pub level: BreadcrumbLevel,

    /// Optional structured payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Breadcrumb {
    /// Create an info-level breadcrumb
    pub fn info(category: &str, message: impl Into<String>) -> Self {
        Self {
            category: category.to_string(),
            message: message.into(),
            level: BreadcrumbLevel::Info,
            data: None,
        }
    }

    /// Attach a structured payload
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// Destination for lifecycle breadcrumbs and metrics.
///
/// Implementations are best-effort by contract: they must swallow backend
/// failures themselves (downgrading to a local debug note at most) and must
/// return quickly. Callers never check for success.
pub trait TelemetrySink: Send + Sync {
    /// Record a breadcrumb event
    fn breadcrumb(&self, crumb: Breadcrumb);

    /// Increment a named counter by `value`
    fn increment(&self, name: &str, value: f64, tags: &[(&str, &str)]);

    /// Set a named gauge to `value`
    fn gauge(&self, name: &str, value: f64, tags: &[(&str, &str)]);

    /// Record one sample of a named distribution
    fn distribution(&self, name: &str, value: f64, tags: &[(&str, &str)]);
}

/// No-op sink, the default when no telemetry backend is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl TelemetrySink for NullSink {
    fn breadcrumb(&self, _crumb: Breadcrumb) {}
    fn increment(&self, _name: &str, _value: f64, _tags: &[(&str, &str)]) {}
    fn gauge(&self, _name: &str, _value: f64, _tags: &[(&str, &str)]) {}
    fn distribution(&self, _name: &str, _value: f64, _tags: &[(&str, &str)]) {}
}

/// Sink that forwards breadcrumbs and metrics to the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl LogSink {
    fn format_tags(tags: &[(&str, &str)]) -> String {
        if tags.is_empty() {
            return String::new();
        }
        let pairs: Vec<String> = tags.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        format!(" [{}]", pairs.join(", "))
    }
}

impl TelemetrySink for LogSink {
    fn breadcrumb(&self, crumb: Breadcrumb) {
        match &crumb.data {
            Some(data) => log::log!(
                crumb.level.to_log_level(),
                "[{}] {} {}",
                crumb.category,
                crumb.message,
                data
            ),
            None => log::log!(
                crumb.level.to_log_level(),
                "[{}] {}",
                crumb.category,
                crumb.message
            ),
        }
    }

    fn increment(&self, name: &str, value: f64, tags: &[(&str, &str)]) {
        log::debug!("metric {} +{}{}", name, value, Self::format_tags(tags));
    }

    fn gauge(&self, name: &str, value: f64, tags: &[(&str, &str)]) {
        log::debug!("gauge {} = {}{}", name, value, Self::format_tags(tags));
    }

    fn distribution(&self, name: &str, value: f64, tags: &[(&str, &str)]) {
        log::debug!("distribution {} <- {}{}", name, value, Self::format_tags(tags));
    }
}

/// Recording sink used by tests to verify emission
#[derive(Debug, Default)]
pub struct MemorySink {
    inner: Mutex<MemorySinkState>,
}

#[derive(Debug, Default)]
struct MemorySinkState {
    breadcrumbs: Vec<Breadcrumb>,
    counters: HashMap<String, f64>,
    gauges: HashMap<String, f64>,
    distributions: HashMap<String, Vec<f64>>,
}

impl MemorySink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// All breadcrumbs recorded so far, in emission order
    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        self.inner.lock().breadcrumbs.clone()
    }

    /// Messages of all recorded breadcrumbs, in emission order
    pub fn breadcrumb_messages(&self) -> Vec<String> {
        self.inner
            .lock()
            .breadcrumbs
            .iter()
            .map(|c| c.message.clone())
            .collect()
    }

    /// Accumulated value of a counter (0.0 if never incremented)
    pub fn counter(&self, name: &str) -> f64 {
        self.inner.lock().counters.get(name).copied().unwrap_or(0.0)
    }

    /// Last value set for a gauge
    pub fn gauge_value(&self, name: &str) -> Option<f64> {
        self.inner.lock().gauges.get(name).copied()
    }

    /// All samples recorded for a distribution
    pub fn distribution_samples(&self, name: &str) -> Vec<f64> {
        self.inner
            .lock()
            .distributions
            .get(name)
            .cloned()
            .unwrap_or_default()
    }
}

impl TelemetrySink for MemorySink {
    fn breadcrumb(&self, crumb: Breadcrumb) {
        self.inner.lock().breadcrumbs.push(crumb);
    }

    fn increment(&self, name: &str, value: f64, _tags: &[(&str, &str)]) {
        *self.inner.lock().counters.entry(name.to_string()).or_insert(0.0) += value;
    }

    fn gauge(&self, name: &str, value: f64, _tags: &[(&str, &str)]) {
        self.inner.lock().gauges.insert(name.to_string(), value);
    }

    fn distribution(&self, name: &str, value: f64, _tags: &[(&str, &str)]) {
        self.inner
            .lock()
            .distributions
            .entry(name.to_string())
            .or_default()
            .push(value);
    }
}
