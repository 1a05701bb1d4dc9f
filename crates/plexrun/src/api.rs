//! # API Seam
//!
//! The boundary between the protocol core and the business logic behind
//! it (plugin registration, invocation of a registered function).
//!
//! ## Philosophy
//!
//! - **Opaque collaborators**: the broker validates shapes and hands
//!   typed arguments across; what registration or invocation actually
//!   does is not its concern.
//! - **Out-of-band results**: `run` returns as soon as dispatch is set
//!   up. The invoked function's result travels back through the
//!   [`ResultSink`], not through the return value.

use plexrpc::MessageObject;
use plexrpc::Result;

/// The five text fields of a register call's meta array, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginMeta<'a> {
    pub apikey: &'a str,
    pub name: &'a str,
    pub description: &'a str,
    pub author: &'a str,
    pub license: &'a str,
}

/// A channel through which the eventual result of an invocation is
/// written back to the original requester.
///
/// Correlation and forwarding are the connection layer's concern; this
/// trait only moves a finished result across the seam. Object-safe
/// (`&mut dyn ResultSink`).
pub trait ResultSink {
    /// Delivers one finished result to the requester.
    fn deliver(&mut self, result: Vec<MessageObject>);
}

/// A sink that discards whatever is delivered to it.
///
/// Used where no delivery path exists, such as dispatching a method whose
/// result never comes back synchronously.
#[derive(Debug, Default)]
pub struct NullSink;

impl ResultSink for NullSink {
    fn deliver(&mut self, _result: Vec<MessageObject>) {}
}

/// The registration/invocation layer the broker forwards into.
///
/// Both operations may fail with an [`plexrpc::ApiError`], which the
/// broker reports back without transformation. Object-safe
/// (`Arc<dyn Api>`).
pub trait Api: Send + Sync {
    /// Registers a plugin described by `meta`, exporting `functions`.
    ///
    /// The functions array is opaque to the broker and forwarded as-is.
    fn register(&self, meta: PluginMeta<'_>, functions: &[MessageObject]) -> Result<()>;

    /// Sets up the invocation of a registered function.
    ///
    /// Success means dispatch setup succeeded, not that the invocation
    /// finished; the result is delivered through `sink` later.
    fn run(
        &self,
        apikey: &str,
        function: &str,
        args: &[MessageObject],
        sink: &mut dyn ResultSink,
    ) -> Result<()>;
}
