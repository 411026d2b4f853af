use recast_api::converter::{BUILTIN_ANCHOR, Converter};
use recast_api::error::ConvertError;
use recast_api::register_converter;
use recast_api::types::TypeKey;
use recast_api::value::Value;

use super::expect_str;

#[derive(Default)]
pub struct Str2Map;

impl Converter for Str2Map {
    fn source(&self) -> TypeKey {
        TypeKey::STR
    }
    fn target(&self) -> TypeKey {
        TypeKey::MAP
    }
    fn convert(
        &self,
        value: &Value,
        _target: &TypeKey,
        _directives: &[&str],
    ) -> Result<Value, ConvertError> {
        let json: serde_json::Value = serde_json::from_str(expect_str(value)?)?;
        match Value::from_json(json) {
            map @ Value::Map(_) => Ok(map),
            _ => Err(ConvertError::other("JSON document is not an object")),
        }
    }
}

#[derive(Default)]
pub struct Map2Str;

impl Converter for Map2Str {
    fn source(&self) -> TypeKey {
        TypeKey::MAP
    }
    fn target(&self) -> TypeKey {
        TypeKey::STR
    }
    fn convert(
        &self,
        value: &Value,
        _target: &TypeKey,
        _directives: &[&str],
    ) -> Result<Value, ConvertError> {
        match value {
            Value::Map(_) => Ok(Value::Str(value.to_json().to_string())),
            other => Err(ConvertError::other(format!(
                "expected a map value, got '{}'",
                other.type_key()
            ))),
        }
    }
}

register_converter!(BUILTIN_ANCHOR, "Str2Map", Str2Map);
register_converter!(BUILTIN_ANCHOR, "Map2Str", Map2Str);
