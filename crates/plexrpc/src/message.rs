//! # Frame Codec
//!
//! Encoding and decoding of the 4-element wire frames.
//!
//! Every message is an array of exactly four values:
//!
//! - Request:        `[0, msgid, method, params]`
//! - Response (ok):  `[1, msgid, nil, params]`
//! - Response (err): `[1, msgid, [kind, message], nil]`
//!
//! ## Invariants
//!
//! - **Panic Safety**: every decoding path returns `Result`; the
//!   predicates are total and never panic on adversarial input.
//! - **Tag before field**: the type of every slot is checked before the
//!   value behind it is read, so a malformed frame cannot trigger a
//!   type-confused read.
//! - **Fixed arity**: the initial size check makes every later slot
//!   access O(1) with no further length scans.

use rmpv::Value;

use crate::object::MessageObject;
use crate::types::ApiError;
use crate::types::ApiErrorKind;
use crate::types::Result;

/// Slot-0 tag of a request frame.
pub const MESSAGE_TYPE_REQUEST: u64 = 0;
/// Slot-0 tag of a response frame (success or error).
pub const MESSAGE_TYPE_RESPONSE: u64 = 1;

/// Every frame carries exactly this many slots.
const FRAME_LEN: usize = 4;

/// A validated inbound request.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub msgid: u32,
    pub method: String,
    pub params: Vec<MessageObject>,
}

/// The payload of a response: result params or an error descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(Vec<MessageObject>),
    Error { kind: ApiErrorKind, message: String },
}

/// A validated response, successful or failed.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub msgid: u32,
    pub outcome: Outcome,
}

/// Reads one complete serialized value from a byte buffer.
///
/// The surrounding transport is trusted to deliver one whole value per
/// call; truncated or garbage input is a validation failure.
pub fn read_frame(bytes: &[u8]) -> Result<Value> {
    let mut reader = bytes;
    rmpv::decode::read_value(&mut reader)
        .map_err(|e| ApiError::validation(format!("truncated or malformed frame: {e}")))
}

/// Returns true iff the value has the shape of a request frame. Total.
pub fn is_request(frame: &Value) -> bool {
    frame_has_tag(frame, MESSAGE_TYPE_REQUEST)
}

/// Returns true iff the value has the shape of a response frame. Total.
pub fn is_response(frame: &Value) -> bool {
    frame_has_tag(frame, MESSAGE_TYPE_RESPONSE)
}

/// Returns true iff the value is a response frame carrying an error
/// descriptor in slot 2. Total.
pub fn is_error_response(frame: &Value) -> bool {
    is_response(frame)
        && frame
            .as_array()
            .and_then(|slots| slots.get(2))
            .is_some_and(|slot| !slot.is_nil())
}

/// Peeks at the msgid slot of a frame without decoding it.
///
/// Used to correlate an error response with the frame that caused it when
/// the frame itself fails to decode.
pub fn frame_msgid(frame: &Value) -> Option<u64> {
    frame
        .as_array()
        .and_then(|slots| slots.get(1))
        .and_then(Value::as_u64)
}

/// Decodes a request frame, taking ownership of its method and params.
pub fn decode_request(frame: Value) -> Result<Request> {
    let [tag, msgid, method, params] = frame_slots(frame)?;

    check_tag(&tag, MESSAGE_TYPE_REQUEST)?;
    let msgid = decode_msgid(&msgid)?;

    let Value::String(method) = method else {
        return Err(ApiError::validation("method field has wrong type"));
    };
    let method = method
        .into_str()
        .ok_or_else(|| ApiError::validation("method is not valid utf-8"))?;
    if method.is_empty() {
        return Err(ApiError::validation("method must not be empty"));
    }

    let params = decode_params(params)?;

    Ok(Request {
        msgid,
        method,
        params,
    })
}

/// Decodes a successful response frame: slot 2 must be nil, slot 3 the
/// result params.
pub fn decode_response(frame: Value) -> Result<Response> {
    let [tag, msgid, nil, params] = frame_slots(frame)?;

    check_tag(&tag, MESSAGE_TYPE_RESPONSE)?;
    let msgid = decode_msgid(&msgid)?;

    if !nil.is_nil() {
        return Err(ApiError::validation("nil field has wrong type"));
    }

    let params = decode_params(params)?;

    Ok(Response {
        msgid,
        outcome: Outcome::Success(params),
    })
}

/// Decodes an error response frame: slot 2 must be a `[kind, message]`
/// descriptor, slot 3 nil.
///
/// The trailing nil is checked after the descriptor has been decoded;
/// anything decoded up to that point is dropped if the check fails.
pub fn decode_error_response(frame: Value) -> Result<Response> {
    let [tag, msgid, error, nil] = frame_slots(frame)?;

    check_tag(&tag, MESSAGE_TYPE_RESPONSE)?;
    let msgid = decode_msgid(&msgid)?;

    let Value::Array(descriptor) = error else {
        return Err(ApiError::validation("error field has wrong type"));
    };
    let [kind, message] = <[Value; 2]>::try_from(descriptor)
        .map_err(|_| ApiError::validation("error field must contain exactly two elements"))?;

    let kind = kind
        .as_i64()
        .ok_or_else(|| ApiError::validation("error kind has wrong type"))?;
    let kind = ApiErrorKind::from_code(kind)
        .ok_or_else(|| ApiError::validation("unknown error kind"))?;

    let Value::String(message) = message else {
        return Err(ApiError::validation("error message has wrong type"));
    };
    let message = message
        .into_str()
        .ok_or_else(|| ApiError::validation("error message is not valid utf-8"))?;

    if !nil.is_nil() {
        return Err(ApiError::validation("nil field has wrong type"));
    }

    Ok(Response {
        msgid,
        outcome: Outcome::Error { kind, message },
    })
}

/// Encodes a request frame to bytes.
pub fn encode_request(request: &Request) -> Result<Vec<u8>> {
    let frame = Value::Array(vec![
        Value::from(MESSAGE_TYPE_REQUEST),
        Value::from(request.msgid),
        Value::from(request.method.as_str()),
        params_value(&request.params),
    ]);
    write_frame(&frame)
}

/// Encodes a response frame to bytes, in the success or error shape
/// according to its outcome.
pub fn encode_response(response: &Response) -> Result<Vec<u8>> {
    let frame = match &response.outcome {
        Outcome::Success(params) => Value::Array(vec![
            Value::from(MESSAGE_TYPE_RESPONSE),
            Value::from(response.msgid),
            Value::Nil,
            params_value(params),
        ]),
        Outcome::Error { kind, message } => error_frame(response.msgid, *kind, message),
    };
    write_frame(&frame)
}

/// Encodes an error response frame carrying the given failure.
pub fn encode_error_response(error: &ApiError, msgid: u32) -> Result<Vec<u8>> {
    write_frame(&error_frame(msgid, error.kind, &error.message))
}

// Helpers

fn frame_has_tag(frame: &Value, expected: u64) -> bool {
    match frame.as_array() {
        Some(slots) => {
            slots.len() == FRAME_LEN && slots.first().and_then(Value::as_u64) == Some(expected)
        }
        None => false,
    }
}

fn frame_slots(frame: Value) -> Result<[Value; 4]> {
    let Value::Array(slots) = frame else {
        return Err(ApiError::validation("message is not an array"));
    };
    <[Value; FRAME_LEN]>::try_from(slots)
        .map_err(|_| ApiError::validation("message must contain exactly four elements"))
}

fn check_tag(slot: &Value, expected: u64) -> Result<()> {
    let Value::Integer(tag) = slot else {
        return Err(ApiError::validation("type field has wrong type"));
    };
    if tag.as_u64() != Some(expected) {
        return Err(ApiError::validation(format!("type must be {expected}")));
    }
    Ok(())
}

fn decode_msgid(slot: &Value) -> Result<u32> {
    let msgid = slot
        .as_u64()
        .ok_or_else(|| ApiError::validation("illegal msgid"))?;
    if msgid >= u64::from(u32::MAX) {
        return Err(ApiError::validation("invalid msgid"));
    }
    Ok(msgid as u32)
}

fn decode_params(slot: Value) -> Result<Vec<MessageObject>> {
    let Value::Array(items) = slot else {
        return Err(ApiError::validation("params field has wrong type"));
    };
    items.into_iter().map(MessageObject::from_value).collect()
}

fn params_value(params: &[MessageObject]) -> Value {
    Value::Array(
        params
            .iter()
            .cloned()
            .map(MessageObject::into_value)
            .collect(),
    )
}

fn error_frame(msgid: u32, kind: ApiErrorKind, message: &str) -> Value {
    Value::Array(vec![
        Value::from(MESSAGE_TYPE_RESPONSE),
        Value::from(msgid),
        Value::Array(vec![Value::from(kind.code()), Value::from(message)]),
        Value::Nil,
    ])
}

fn write_frame(frame: &Value) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    rmpv::encode::write_value(&mut bytes, frame)
        .map_err(|e| ApiError::runtime(format!("failed to serialize frame: {e}")))?;
    Ok(bytes)
}
