//! Per-connection input limits.

use serde::Deserialize;

/// Input limits applied to every connection.
///
/// These limits keep a single misbehaving client from monopolising a
/// connection task or flooding the session store with work.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Maximum bytes in one command line on the plaintext listener (default: 512).
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,
    /// Sustained commands per second per connection (default: 10).
    #[serde(default = "default_message_rate")]
    pub message_rate: f32,
    /// Burst capacity of the per-connection token bucket (default: 20).
    #[serde(default = "default_message_burst")]
    pub message_burst: f32,
    /// Seconds a WebSocket peer has to complete its upgrade request (default: 10).
    #[serde(default = "default_handshake_timeout")]
    pub handshake_timeout: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_line_length: default_max_line_length(),
            message_rate: default_message_rate(),
            message_burst: default_message_burst(),
            handshake_timeout: default_handshake_timeout(),
        }
    }
}

fn default_max_line_length() -> usize {
    512
}

fn default_message_rate() -> f32 {
    10.0
}

fn default_message_burst() -> f32 {
    20.0
}

fn default_handshake_timeout() -> u64 {
    10
}
