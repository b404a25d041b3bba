//! Telemetry utilities for command timing and span construction.

use std::time::Instant;

/// Guard for timing command execution and recording metrics.
///
/// Records command latency when dropped, so early returns and unwinds are
/// still counted.
pub struct CommandTimer {
    command: &'static str,
    start: Instant,
}

impl CommandTimer {
    /// Start timing a command.
    pub fn new(command: &'static str) -> Self {
        Self {
            command,
            start: Instant::now(),
        }
    }
}

impl Drop for CommandTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        crate::metrics::record_command(self.command, duration);
    }
}

/// Standardized span constructors.
pub mod spans {
    use tracing::{Span, info_span};

    /// Create a span for a client connection.
    pub fn connection(conn: &str, peer: &str, transport: &'static str) -> Span {
        info_span!("connection", conn = %conn, peer = %peer, transport)
    }

    /// Create a span for a command execution.
    pub fn command(name: &'static str, conn: &str) -> Span {
        info_span!("command", name, conn = %conn)
    }
}
