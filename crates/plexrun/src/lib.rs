//! # Plexrun
//!
//! The broker half of plex: routes validated requests to registered
//! method handlers and forwards their typed arguments to the API layer.
//!
//! ## Architecture
//!
//! `plexrpc` turns bytes into a [`plexrpc::Request`]; the [`Broker`] looks
//! the method up in its [`DispatchTable`] and invokes the matching handler.
//! Handlers validate the parameter array field by field (first failure
//! wins) and forward to the [`Api`] seam. Everything runs to completion on
//! the calling thread: the table is written only at startup, so lookups
//! need no locking discipline beyond the map's own.

pub mod api;
pub mod broker;
pub mod dispatch;
pub mod handlers;

#[cfg(test)]
mod mock_api;

pub use crate::api::Api;
pub use crate::api::NullSink;
pub use crate::api::PluginMeta;
pub use crate::api::ResultSink;

pub use crate::dispatch::DispatchEntry;
pub use crate::dispatch::DispatchTable;
pub use crate::dispatch::Handler;
pub use crate::dispatch::METHOD_REGISTER;
pub use crate::dispatch::METHOD_RUN;

pub use crate::handlers::handle_register;
pub use crate::handlers::handle_run;

pub use crate::broker::Broker;
pub use crate::broker::Disposition;
