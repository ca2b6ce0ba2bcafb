//! Schema-message encoder: canonical proto3 JSON via `prost-reflect`.
//!
//! Input shapes are dispatched on an explicit tagged value
//! ([`prost_reflect::Value`]) rather than by inspecting types at runtime:
//!
//! - `Value::Message` encodes as one proto3 JSON document
//! - `Value::List` of messages encodes as a JSON list of message objects
//! - anything else is rejected with `UnsupportedType`
//!
//! Decoding a batch is tolerant: a JSON array decodes element-wise and a
//! single JSON object decodes as a one-element list.

use crate::encoder::json::to_json_bytes;
use crate::encoder::{Encoder, Shape};
use crate::errors::{CodecError, Result};
use prost_reflect::{DynamicMessage, MessageDescriptor, ReflectMessage, Value};

type CodecResult<T> = std::result::Result<T, CodecError>;

/// Name of the tagged kind, used in shape error messages.
#[allow(unreachable_patterns)]
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Bool(_) => "bool",
        Value::I32(_) => "i32",
        Value::I64(_) => "i64",
        Value::U32(_) => "u32",
        Value::U64(_) => "u64",
        Value::F32(_) => "f32",
        Value::F64(_) => "f64",
        Value::String(_) => "string",
        Value::Bytes(_) => "bytes",
        Value::EnumNumber(_) => "enum",
        Value::Message(_) => "message",
        Value::List(_) => "list",
        Value::Map(_) => "map",
        _ => "value",
    }
}

/// Encodes schema messages with the proto3 JSON mapping.
///
/// Comparison through this encoder is semantic: both sides are projected onto
/// their canonical JSON form, so unset fields and fields holding the default
/// value compare equal.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProtoJsonEncoder;

impl ProtoJsonEncoder {
    /// Marshal a tagged value: one message or a list of messages.
    pub fn marshal_value(&self, value: &Value, packed: bool) -> CodecResult<Vec<u8>> {
        match value {
            Value::Message(message) => to_json_bytes(message, packed),
            Value::List(items) => {
                let objects = items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| match item {
                        Value::Message(message) => self.to_object(message),
                        other => Err(CodecError::InvalidMessage {
                            index,
                            kind: value_kind(other),
                        }),
                    })
                    .collect::<CodecResult<Vec<_>>>()?;
                to_json_bytes(&objects, packed)
            }
            other => Err(CodecError::UnsupportedType {
                kind: value_kind(other),
            }),
        }
    }

    /// Decode into a tagged destination, which must hold a message.
    ///
    /// The message already in the destination supplies the descriptor and is
    /// replaced by the decoded value.
    pub fn unmarshal_value(&self, data: &[u8], dest: &mut Value) -> CodecResult<()> {
        match dest {
            Value::Message(message) => {
                *message = self.decode_message(data, message.descriptor())?;
                Ok(())
            }
            other => Err(CodecError::UnsupportedDestination {
                kind: value_kind(other),
            }),
        }
    }

    /// Decode one proto3 JSON document.
    pub fn decode_message(&self, data: &[u8], desc: MessageDescriptor) -> CodecResult<DynamicMessage> {
        let mut de = serde_json::Deserializer::from_slice(data);
        let message = DynamicMessage::deserialize(desc, &mut de).map_err(CodecError::DecodeJson)?;
        de.end().map_err(CodecError::DecodeJson)?;
        Ok(message)
    }

    /// Decode a list document, accepting a lone object as a one-element list.
    pub fn decode_messages(
        &self,
        data: &[u8],
        desc: MessageDescriptor,
    ) -> CodecResult<Vec<DynamicMessage>> {
        let doc: serde_json::Value = serde_json::from_slice(data).map_err(CodecError::DecodeJson)?;
        match doc {
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(|item| DynamicMessage::deserialize(desc.clone(), item))
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(CodecError::DecodeJson),
            single => Ok(vec![
                DynamicMessage::deserialize(desc, single).map_err(CodecError::DecodeJson)?
            ]),
        }
    }

    fn to_object(&self, message: &DynamicMessage) -> CodecResult<serde_json::Value> {
        serde_json::to_value(message).map_err(CodecError::EncodeJson)
    }
}

impl<T> Encoder<T> for ProtoJsonEncoder
where
    T: ReflectMessage + Default,
{
    fn name(&self) -> &'static str {
        "proto_json"
    }

    fn marshal(&self, value: Shape<'_, T>, packed: bool) -> Result<Vec<u8>> {
        let tagged = match value {
            Shape::One(v) => Value::Message(v.transcode_to_dynamic()),
            Shape::Many(vs) => Value::List(
                vs.iter()
                    .map(|v| Value::Message(v.transcode_to_dynamic()))
                    .collect(),
            ),
        };
        Ok(self.marshal_value(&tagged, packed)?)
    }

    fn unmarshal_one(&self, data: &[u8]) -> Result<T> {
        let message = self.decode_message(data, T::default().descriptor())?;
        Ok(message.transcode_to::<T>().map_err(CodecError::from)?)
    }

    fn unmarshal_many(&self, data: &[u8]) -> Result<Vec<T>> {
        let messages = self.decode_messages(data, T::default().descriptor())?;
        let values = messages
            .iter()
            .map(|m| m.transcode_to::<T>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(CodecError::from)?;
        Ok(values)
    }

    fn view(&self, value: &T) -> Result<serde_json::Value> {
        Ok(self.to_object(&value.transcode_to_dynamic())?)
    }
}
