//! Structured JSON encoder.

use crate::encoder::{Encoder, Shape};
use crate::errors::{CodecError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

/// Serialize to JSON bytes, compact when `packed`, tab-indented otherwise.
pub(crate) fn to_json_bytes<S>(value: &S, packed: bool) -> std::result::Result<Vec<u8>, CodecError>
where
    S: Serialize + ?Sized,
{
    if packed {
        return serde_json::to_vec(value).map_err(CodecError::EncodeJson);
    }
    let mut out = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"\t"));
    value.serialize(&mut ser).map_err(CodecError::EncodeJson)?;
    Ok(out)
}

/// Encodes any serde type in its natural field layout.
///
/// The default encoder of a [`Golden`](crate::golden::Golden) handle.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEncoder;

impl<T> Encoder<T> for JsonEncoder
where
    T: Serialize + DeserializeOwned,
{
    fn name(&self) -> &'static str {
        "json"
    }

    fn marshal(&self, value: Shape<'_, T>, packed: bool) -> Result<Vec<u8>> {
        let bytes = match value {
            Shape::One(v) => to_json_bytes(v, packed)?,
            Shape::Many(vs) => to_json_bytes(vs, packed)?,
        };
        Ok(bytes)
    }

    fn unmarshal_one(&self, data: &[u8]) -> Result<T> {
        Ok(serde_json::from_slice(data).map_err(CodecError::DecodeJson)?)
    }

    fn unmarshal_many(&self, data: &[u8]) -> Result<Vec<T>> {
        Ok(serde_json::from_slice(data).map_err(CodecError::DecodeJson)?)
    }

    fn view(&self, value: &T) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(value).map_err(CodecError::EncodeJson)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GoldenErrorKind;
    use serde::Deserialize;
    use std::collections::BTreeMap;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        values: Vec<i32>,
        env: BTreeMap<String, String>,
    }

    fn sample() -> Sample {
        Sample {
            name: "bla".to_string(),
            values: vec![1, 2, 3],
            env: BTreeMap::from([("ACCOUNT".to_string(), "1234".to_string())]),
        }
    }

    #[test]
    fn test_packed_output_is_single_line() {
        let bytes = Encoder::<Sample>::marshal(&JsonEncoder, Shape::One(&sample()), true).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            r#"{"name":"bla","values":[1,2,3],"env":{"ACCOUNT":"1234"}}"#
        );
    }

    #[test]
    fn test_unpacked_output_is_tab_indented() {
        let bytes = Encoder::<Sample>::marshal(&JsonEncoder, Shape::One(&sample()), false).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("{\n\t\"name\": \"bla\""));
    }

    #[test]
    fn test_batch_is_one_list_document() {
        let values = vec![sample(), sample()];
        let bytes = Encoder::<Sample>::marshal(&JsonEncoder, Shape::Many(&values), true).unwrap();
        let decoded: Vec<Sample> = JsonEncoder.unmarshal_many(&bytes).unwrap();
        assert_eq!(decoded, values);
    }

    #[test]
    fn test_decode_failure_is_classified() {
        let err = Encoder::<Sample>::unmarshal_one(&JsonEncoder, b"{not json").unwrap_err();
        assert_eq!(err.kind(), GoldenErrorKind::Decode);
    }

    #[test]
    fn test_view_uses_serialized_names() {
        let view = Encoder::<Sample>::view(&JsonEncoder, &sample()).unwrap();
        assert_eq!(view["env"]["ACCOUNT"], "1234");
    }
}
