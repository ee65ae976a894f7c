//! JSON Patch (RFC 6902).
//!
//! The operation model ([`Op`]), sequential in-place application
//! ([`apply_ops`]), and the JSON wire codec
//! ([`codec::decode_patch`]/[`codec::encode_patch`]).
//!
//! Application is strictly sequential and stateful: each operation sees the
//! document produced by the previous one, and the first failure halts
//! processing where it stands. Callers wanting all-or-nothing semantics use
//! the `atomic` setting on the engine entry points.

pub mod apply;
pub mod codec;
pub mod types;

pub use apply::{apply_op, apply_ops, OpFailure};
pub use codec::{decode_op, decode_patch, encode_op, encode_patch};
pub use types::{Op, PatchError};
