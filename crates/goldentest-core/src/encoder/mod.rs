//! Serialization strategies for golden files.
//!
//! A [`Golden`](crate::golden::Golden) handle talks to its codec only through
//! the [`Encoder`] trait: marshal a value or a list, unmarshal one or many,
//! and project a value onto the structural view the diff engine walks.
//!
//! - [`JsonEncoder`]: plain `serde_json` encoding of the value's natural shape
//! - [`ProtoJsonEncoder`]: canonical proto3 JSON for schema messages

pub mod json;
pub mod proto_json;

pub use json::JsonEncoder;
pub use proto_json::ProtoJsonEncoder;

use crate::errors::Result;

/// Input shape handed to [`Encoder::marshal`].
pub enum Shape<'a, T> {
    /// A single value, persisted as one document
    One(&'a T),
    /// An ordered batch, persisted as one list document
    Many(&'a [T]),
}

impl<T> Clone for Shape<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Shape<'_, T> {}

/// Two-way codec between `T` and the bytes of a golden file.
pub trait Encoder<T>: Send + Sync {
    /// Short identifier used in log events
    fn name(&self) -> &'static str;

    /// Serialize a value or a batch. `packed` selects compact output.
    fn marshal(&self, value: Shape<'_, T>, packed: bool) -> Result<Vec<u8>>;

    /// Decode a single reference value
    fn unmarshal_one(&self, data: &[u8]) -> Result<T>;

    /// Decode a reference batch
    fn unmarshal_many(&self, data: &[u8]) -> Result<Vec<T>>;

    /// Structural view used for diffing
    fn view(&self, value: &T) -> Result<serde_json::Value>;
}
