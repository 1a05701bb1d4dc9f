//! # Request Handlers
//!
//! Per-method validators that pull typed arguments out of a request's
//! parameter array and forward them across the API seam.
//!
//! ## Invariants
//!
//! - **Fail fast, first violation wins**: checks run in a fixed order
//!   (params count, element 0 shape, element 0's sub-fields in index
//!   order, remaining elements in index order) and the first failure
//!   determines the result. This makes the diagnostic for any malformed
//!   frame deterministic and minimal.
//! - **Nothing reaches the API layer on failure**: a handler forwards
//!   arguments only after every check has passed.

use plexrpc::ApiError;
use plexrpc::Request;
use plexrpc::Result;

use crate::api::Api;
use crate::api::PluginMeta;
use crate::api::ResultSink;

/// Field names of a register call's meta array, in wire order.
const REGISTER_META_FIELDS: [&str; 5] = ["apikey", "name", "description", "author", "license"];

/// Handles a `register` request: `params = [meta, functions]` where
/// `meta = [apikey, name, description, author, license]`, all non-empty
/// text, and `functions` is an opaque array.
///
/// Never writes a synchronous reply; registration is dispatched
/// asynchronously and any failure travels back through the error path.
pub fn handle_register(
    api: &dyn Api,
    request: &Request,
    _sink: &mut dyn ResultSink,
) -> Result<()> {
    if request.params.len() != 2 {
        return Err(ApiError::validation(
            "register: params must contain exactly 2 elements",
        ));
    }

    let meta = request.params[0]
        .as_array()
        .ok_or_else(|| ApiError::validation("register: meta params has wrong type"))?;

    if meta.len() != REGISTER_META_FIELDS.len() {
        return Err(ApiError::validation(
            "register: meta params must contain exactly 5 elements",
        ));
    }

    let mut texts = [""; 5];
    for (slot, (object, field)) in texts
        .iter_mut()
        .zip(meta.iter().zip(REGISTER_META_FIELDS))
    {
        let text = object.as_str().ok_or_else(|| {
            ApiError::validation(format!("register: meta field '{field}' has wrong type"))
        })?;
        if text.is_empty() {
            return Err(ApiError::validation(format!(
                "register: meta field '{field}' must not be empty"
            )));
        }
        *slot = text;
    }
    let [apikey, name, description, author, license] = texts;

    let functions = request.params[1]
        .as_array()
        .ok_or_else(|| ApiError::validation("register: functions has wrong type"))?;

    api.register(
        PluginMeta {
            apikey,
            name,
            description,
            author,
            license,
        },
        functions,
    )
}

/// Handles a `run` request: `params = [meta, function_name, args]` where
/// `meta = [apikey]`, `function_name` is non-empty text, and `args` is an
/// opaque array.
///
/// Returns as soon as the invocation is handed to the API layer; the
/// function's result is delivered through `sink` out of band.
pub fn handle_run(api: &dyn Api, request: &Request, sink: &mut dyn ResultSink) -> Result<()> {
    if request.params.len() != 3 {
        return Err(ApiError::validation(
            "run: params must contain exactly 3 elements",
        ));
    }

    let meta = request.params[0]
        .as_array()
        .ok_or_else(|| ApiError::validation("run: meta params has wrong type"))?;

    if meta.len() != 1 {
        return Err(ApiError::validation(
            "run: meta params must contain exactly 1 element",
        ));
    }

    let apikey = meta[0]
        .as_str()
        .ok_or_else(|| ApiError::validation("run: meta field 'apikey' has wrong type"))?;
    if apikey.is_empty() {
        return Err(ApiError::validation(
            "run: meta field 'apikey' must not be empty",
        ));
    }

    let function = request.params[1]
        .as_str()
        .ok_or_else(|| ApiError::validation("run: function name has wrong type"))?;
    if function.is_empty() {
        return Err(ApiError::validation("run: function name must not be empty"));
    }

    let args = request.params[2]
        .as_array()
        .ok_or_else(|| ApiError::validation("run: args has wrong type"))?;

    api.run(apikey, function, args, sink)
}
