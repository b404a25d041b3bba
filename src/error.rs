//! Unified error handling for chowd.
//!
//! This module provides the error hierarchy for command processing, with
//! client-facing fault mapping and metric labeling.

use crate::state::ConnectionId;
use chowd_proto::Fault;
use thiserror::Error;

// ============================================================================
// Engine Errors (transition computation)
// ============================================================================

/// Errors raised while computing a session transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("price total overflowed")]
    TotalOverflow,
}

/// Result type for order engine transitions.
pub type EngineResult<T> = Result<T, EngineError>;

// ============================================================================
// Dispatch Errors (per-command containment)
// ============================================================================

/// Errors that can occur while dispatching one command.
///
/// None of these close the connection; each is terminal only for the command
/// that raised it.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("session not found for connection {0}")]
    SessionNotFound(ConnectionId),

    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("transition panicked: {0}")]
    Panicked(String),
}

impl DispatchError {
    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::SessionNotFound(_) => "session_not_found",
            Self::Engine(EngineError::TotalOverflow) => "total_overflow",
            Self::Panicked(_) => "panicked",
        }
    }

    /// The fault shown to the client.
    ///
    /// Internal details never reach the client; anything other than a missing
    /// session is reported as a generic failure.
    pub fn fault(&self) -> Fault {
        match self {
            Self::SessionNotFound(_) => Fault::SessionNotFound,
            Self::Engine(_) | Self::Panicked(_) => Fault::Internal,
        }
    }
}
