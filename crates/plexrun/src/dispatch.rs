//! # Dispatch Table
//!
//! The registry mapping method names to handler descriptors.
//!
//! Populated exactly twice at startup ([`DispatchTable::builtin`]) and
//! read-only afterwards, so lookups on the hot path never contend. Entry
//! names and descriptors are released exactly once when the table drops.

use std::sync::Arc;

use dashmap::DashMap;

use plexrpc::Request;
use plexrpc::Result;

use crate::api::Api;
use crate::api::ResultSink;
use crate::handlers::handle_register;
use crate::handlers::handle_run;

/// Method name of the plugin-registration handler.
pub const METHOD_REGISTER: &str = "register";
/// Method name of the function-invocation handler.
pub const METHOD_RUN: &str = "run";

/// A method handler: validates the request's params and forwards them
/// across the API seam.
pub type Handler = fn(&dyn Api, &Request, &mut dyn ResultSink) -> Result<()>;

/// One registered method: its name, handler, and scheduling flag.
#[derive(Clone)]
pub struct DispatchEntry {
    pub name: String,
    pub handler: Handler,
    /// When true, the event loop does not wait for the handler's effect
    /// before processing the next event.
    pub is_async: bool,
}

impl std::fmt::Debug for DispatchEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchEntry")
            .field("name", &self.name)
            .field("is_async", &self.is_async)
            .finish()
    }
}

/// Registry of method name to [`DispatchEntry`], keys unique.
#[derive(Debug, Default)]
pub struct DispatchTable {
    entries: DashMap<String, Arc<DispatchEntry>>,
}

impl DispatchTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Creates the startup table: `register` (asynchronous) and `run`
    /// (synchronous).
    pub fn builtin() -> Self {
        let table = Self::new();
        table.put(DispatchEntry {
            name: METHOD_REGISTER.to_string(),
            handler: handle_register,
            is_async: true,
        });
        table.put(DispatchEntry {
            name: METHOD_RUN.to_string(),
            handler: handle_run,
            is_async: false,
        });
        table
    }

    /// Inserts an entry under its own name. Last write wins; overwriting
    /// an existing entry is not an error.
    pub fn put(&self, entry: DispatchEntry) {
        self.entries.insert(entry.name.clone(), Arc::new(entry));
    }

    /// Looks up the entry for a method name.
    pub fn get(&self, method: &str) -> Option<Arc<DispatchEntry>> {
        self.entries.get(method).map(|entry| entry.value().clone())
    }

    /// Number of registered methods.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no method is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
