//! # Broker
//!
//! The explicitly constructed composition root: one dispatch table, one
//! API layer, no ambient globals. The connection layer hands it decoded
//! top-level values and a result sink; it hands back a disposition or the
//! failure to report.
//!
//! ## Philosophy
//!
//! - **Non-fatal rejection**: bad input never terminates anything. A
//!   malformed frame or unknown method becomes an `ApiError` the caller
//!   turns into an error-response frame for the remote peer.
//! - **Run to completion**: decode, lookup, and handler call all finish
//!   on the calling thread. Anything that must wait on a remote party
//!   lives behind the [`ResultSink`].

use std::sync::Arc;

use rmpv::Value;
use tracing::debug;
use tracing::warn;

use plexrpc::ApiError;
use plexrpc::Request;
use plexrpc::Result;
use plexrpc::decode_request;

use crate::api::Api;
use crate::api::ResultSink;
use crate::dispatch::DispatchTable;

/// Tracing target for broker routing.
const BROKER_TARGET: &str = "plexrun::broker";

/// How a dispatched request was taken off the caller's hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// A synchronous handler returned; any reply is already in the sink.
    Completed,
    /// An asynchronous handler accepted the request; its effect completes
    /// out of band.
    Accepted,
}

/// Routes validated requests to registered method handlers.
pub struct Broker {
    table: DispatchTable,
    api: Arc<dyn Api>,
}

impl Broker {
    /// Creates a broker over the startup dispatch table.
    pub fn new(api: Arc<dyn Api>) -> Self {
        Self {
            table: DispatchTable::builtin(),
            api,
        }
    }

    /// The broker's dispatch table.
    pub fn table(&self) -> &DispatchTable {
        &self.table
    }

    /// Looks up the request's method and invokes its handler.
    ///
    /// A lookup miss is a validation failure, not a crash: the remote
    /// peer named a method this broker never registered.
    pub fn dispatch(&self, request: &Request, sink: &mut dyn ResultSink) -> Result<Disposition> {
        let entry = self.table.get(&request.method).ok_or_else(|| {
            ApiError::validation(format!("unknown method '{}'", request.method))
        })?;

        debug!(
            target: BROKER_TARGET,
            method = entry.name.as_str(),
            msgid = request.msgid,
            is_async = entry.is_async,
            "dispatching request"
        );

        (entry.handler)(self.api.as_ref(), request, sink)?;

        Ok(if entry.is_async {
            Disposition::Accepted
        } else {
            Disposition::Completed
        })
    }

    /// Decodes one top-level value into a request and dispatches it.
    ///
    /// On failure the caller still owns the error report: pair the
    /// returned `ApiError` with [`plexrpc::frame_msgid`] and
    /// [`plexrpc::encode_error_response`] to answer the peer.
    pub fn handle_frame(&self, frame: Value, sink: &mut dyn ResultSink) -> Result<Disposition> {
        let request = decode_request(frame).inspect_err(|e| {
            warn!(target: BROKER_TARGET, error = %e, "rejected malformed frame");
        })?;
        self.dispatch(&request, sink)
    }
}

impl std::fmt::Debug for Broker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Broker").field("table", &self.table).finish()
    }
}
