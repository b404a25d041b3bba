//! Command dispatch: the seam between a connection and the order engine.
//!
//! Each inbound line goes through the same pipeline:
//! 1. Parse the raw line into a [`Command`]
//! 2. Look up the connection's session (never created here)
//! 3. Apply the command with panics contained
//! 4. Commit the next session
//! 5. Record metrics, mapping any failure to a client-facing fault
//!
//! A failure is terminal for that one command only. The session is left as it
//! was and the connection stays open.

use crate::engine::OrderEngine;
use crate::error::DispatchError;
use crate::metrics;
use crate::state::{Catalog, Session, SessionStore};
use crate::telemetry::{CommandTimer, spans};
use chowd_proto::{Command, Reply, Response};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Routes commands from connections to the engine and the session store.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    store: Arc<SessionStore>,
    engine: OrderEngine,
}

impl Dispatcher {
    pub fn new(store: Arc<SessionStore>, engine: OrderEngine) -> Self {
        Self { store, engine }
    }

    /// A dispatcher over an empty store and `catalog`.
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self::new(
            Arc::new(SessionStore::new()),
            OrderEngine::new(Arc::new(catalog)),
        )
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub fn engine(&self) -> &OrderEngine {
        &self.engine
    }

    /// Create the session for a new connection and return its greeting.
    pub fn open(&self, conn: &str) -> Response {
        self.store.get_or_create(conn);
        metrics::set_active_sessions(self.store.len());
        Response::new(Reply::Welcome)
    }

    /// Drop the session of a closed connection.
    pub fn close(&self, conn: &str) -> Option<Session> {
        let removed = self.store.remove(conn);
        metrics::set_active_sessions(self.store.len());
        removed
    }

    /// Handle one raw input line, always producing a response.
    pub fn dispatch(&self, conn: &str, raw: &str) -> Response {
        let command = Command::parse(raw);
        let _timer = CommandTimer::new(command.name());
        let _span = spans::command(command.name(), conn).entered();

        match self.try_dispatch(conn, &command) {
            Ok(response) => response,
            Err(e) => {
                match &e {
                    DispatchError::SessionNotFound(_) => warn!(error = %e, "Dispatch failed"),
                    _ => error!(error = %e, raw, "Dispatch failed"),
                }
                metrics::record_command_error(command.name(), e.error_code());
                Response::fault(e.fault())
            }
        }
    }

    /// Apply an already parsed command to the session of `conn`.
    pub fn try_dispatch(&self, conn: &str, command: &Command) -> Result<Response, DispatchError> {
        let session = self
            .store
            .get(conn)
            .ok_or_else(|| DispatchError::SessionNotFound(conn.to_string()))?;

        let transition = contain(|| self.engine.apply(command, &session))??;

        let mut next = transition.session;
        next.touch();
        if !self.store.commit(next) {
            return Err(DispatchError::SessionNotFound(conn.to_string()));
        }

        if let Reply::OrderPlaced { order } = &transition.response.reply {
            metrics::record_order_placed();
            debug!(items = order.items.len(), "Order placed");
        }

        Ok(transition.response)
    }
}

/// Run `f`, turning a panic into [`DispatchError::Panicked`].
pub(crate) fn contain<T>(f: impl FnOnce() -> T) -> Result<T, DispatchError> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        DispatchError::Panicked(panic_message(payload.as_ref()))
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
