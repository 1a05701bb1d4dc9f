//! # Plexrpc
//!
//! The protocol core of the plex broker: a strict value model and frame
//! codec for MessagePack-RPC traffic.
//!
//! ## Architecture
//!
//! Untrusted bytes become an `rmpv::Value` tree, which the codec then
//! validates slot by slot into a typed [`Request`] or [`Response`]. Every
//! type tag is checked before the field behind it is read, so a malformed
//! frame can never cause a type-confused or out-of-bounds access.

pub mod message;
pub mod object;
pub mod types;


pub use crate::types::ApiError;
pub use crate::types::ApiErrorKind;
pub use crate::types::Result;

pub use crate::object::MessageObject;

pub use crate::message::Outcome;
pub use crate::message::Request;
pub use crate::message::Response;

pub use crate::message::read_frame;
pub use crate::message::frame_msgid;
pub use crate::message::is_request;
pub use crate::message::is_response;
pub use crate::message::is_error_response;

pub use crate::message::decode_request;
pub use crate::message::decode_response;
pub use crate::message::decode_error_response;

pub use crate::message::encode_request;
pub use crate::message::encode_response;
pub use crate::message::encode_error_response;
