//! Prometheus metrics collection for chowd.
//!
//! Metrics are exposed on an HTTP endpoint (see [`crate::http`]) when
//! `server.metrics_port` is configured.
//!
//! ## Order Metrics
//!
//! - `chowd_command_total{command}` - Commands processed by kind
//! - `chowd_command_duration_seconds{command}` - Command latency histogram
//! - `chowd_command_errors_total{command, error}` - Failed commands by error code
//! - `chowd_orders_placed_total` - Successful checkouts
//! - `chowd_active_sessions` - Sessions currently held in the store

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};
use std::sync::OnceLock;

/// Global Prometheus registry for all metrics.
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::new)
}

// ========================================================================
// Counters (monotonic increasing)
// ========================================================================

/// Total orders moved from a cart into history.
pub static ORDERS_PLACED: OnceLock<IntCounter> = OnceLock::new();

/// Total rate limit hits (flood protection).
pub static RATE_LIMITED: OnceLock<IntCounter> = OnceLock::new();

/// Total WebSocket handshakes refused by the origin allow-list.
pub static ORIGINS_REJECTED: OnceLock<IntCounter> = OnceLock::new();

/// Commands processed by kind (show_catalog, add_item, ...).
pub static COMMAND_COUNTER: OnceLock<IntCounterVec> = OnceLock::new();

/// Command errors by kind and error code.
pub static COMMAND_ERRORS: OnceLock<IntCounterVec> = OnceLock::new();

/// Command processing latency by kind.
pub static COMMAND_LATENCY: OnceLock<HistogramVec> = OnceLock::new();

// ========================================================================
// Gauges (can increase/decrease)
// ========================================================================

/// Sessions currently held in the store.
pub static ACTIVE_SESSIONS: OnceLock<IntGauge> = OnceLock::new();

/// Initialize the Prometheus metrics registry.
///
/// Must be called once at server startup before any metrics are recorded.
/// Recording before `init` is a silent no-op.
pub fn init() {
    let r = registry();

    macro_rules! register {
        ($metric:ident, $init:expr) => {
            let m = $init.expect(concat!(stringify!($metric), " creation failed"));
            if let Err(e) = r.register(Box::new(m.clone())) {
                tracing::warn!(error = %e, concat!("Failed to register metric ", stringify!($metric)));
            }
            let _ = $metric.set(m);
        };
    }

    register!(ORDERS_PLACED, IntCounter::new("chowd_orders_placed_total", "Orders placed"));
    register!(RATE_LIMITED, IntCounter::new("chowd_rate_limited_total", "Rate limit hits"));
    register!(ORIGINS_REJECTED, IntCounter::new("chowd_origins_rejected_total", "WebSocket handshakes refused by origin"));
    register!(ACTIVE_SESSIONS, IntGauge::new("chowd_active_sessions", "Sessions currently held"));

    register!(COMMAND_COUNTER, IntCounterVec::new(Opts::new("chowd_command_total", "Commands processed by kind"), &["command"]));
    register!(COMMAND_ERRORS, IntCounterVec::new(Opts::new("chowd_command_errors_total", "Command errors by kind"), &["command", "error"]));
    register!(COMMAND_LATENCY, HistogramVec::new(
        HistogramOpts::new("chowd_command_duration_seconds", "Command latency by kind")
            .buckets(vec![0.00001, 0.00005, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05]),
        &["command"]));
}

/// Gather all metrics and encode them in Prometheus text format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = registry().gather();
    let mut buffer = vec![];
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode Prometheus metrics");
        return String::new();
    }
    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Prometheus metrics were not valid UTF-8");
            String::new()
        }
    }
}

/// Record a command execution with latency.
#[inline]
pub fn record_command(command: &str, duration_secs: f64) {
    if let Some(c) = COMMAND_COUNTER.get() {
        c.with_label_values(&[command]).inc();
    }
    if let Some(h) = COMMAND_LATENCY.get() {
        h.with_label_values(&[command]).observe(duration_secs);
    }
}

/// Record a command error.
#[inline]
pub fn record_command_error(command: &str, error: &str) {
    if let Some(c) = COMMAND_ERRORS.get() {
        c.with_label_values(&[command, error]).inc();
    }
}

#[inline]
pub fn record_order_placed() {
    if let Some(c) = ORDERS_PLACED.get() {
        c.inc();
    }
}

#[inline]
pub fn record_rate_limited() {
    if let Some(c) = RATE_LIMITED.get() {
        c.inc();
    }
}

#[inline]
pub fn record_origin_rejected() {
    if let Some(c) = ORIGINS_REJECTED.get() {
        c.inc();
    }
}

/// Set the active session gauge.
#[inline]
pub fn set_active_sessions(count: usize) {
    if let Some(g) = ACTIVE_SESSIONS.get() {
        g.set(i64::try_from(count).unwrap_or(i64::MAX));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_lifecycle() {
        init();

        record_command("show_catalog", 0.0001);
        record_command_error("view_cart", "total_overflow");
        record_order_placed();
        set_active_sessions(3);

        let output = gather_metrics();
        assert!(output.contains("chowd_command_total"));
        assert!(output.contains("chowd_command_errors_total"));
        assert!(output.contains("chowd_orders_placed_total"));
        assert!(output.contains("chowd_active_sessions"));
    }
}
