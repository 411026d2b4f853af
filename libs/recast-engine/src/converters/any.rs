use recast_api::converter::{BUILTIN_ANCHOR, Converter};
use recast_api::error::ConvertError;
use recast_api::register_converter;
use recast_api::types::TypeKey;
use recast_api::value::Value;

/// Last-resort string rendering via the value's default form.
#[derive(Default)]
pub struct Any2Str;

impl Converter for Any2Str {
    fn source(&self) -> TypeKey {
        TypeKey::ANY
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
        Ok(Value::Str(value.to_string()))
    }
}

/// Generic catch-all. Resolution always reaches it last because every
/// ranking ends in `any`; `can_cast` treats resolving only this converter as
/// "no real support". Handles the structural map/record coercions and passes
/// compatible values through; anything else is an error.
#[derive(Default)]
pub struct Any2Any;

impl Converter for Any2Any {
    fn source(&self) -> TypeKey {
        TypeKey::ANY
    }
    fn target(&self) -> TypeKey {
        TypeKey::ANY
    }
    fn convert(
        &self,
        value: &Value,
        target: &TypeKey,
        _directives: &[&str],
    ) -> Result<Value, ConvertError> {
        if *target == TypeKey::ANY || value.type_key() == *target {
            return Ok(value.clone());
        }
        match value {
            Value::Map(entries) if !target.is_builtin() => Ok(Value::Record {
                class: target.clone(),
                fields: entries.clone(),
            }),
            Value::Record { fields, .. } if !target.is_builtin() => Ok(Value::Record {
                class: target.clone(),
                fields: fields.clone(),
            }),
            Value::Record { fields, .. } if *target == TypeKey::MAP => {
                Ok(Value::Map(fields.clone()))
            }
            _ => Err(ConvertError::other(format!(
                "no structural conversion from '{}' to '{target}'",
                value.type_key()
            ))),
        }
    }
}

register_converter!(BUILTIN_ANCHOR, "Any2Str", Any2Str);
register_converter!(BUILTIN_ANCHOR, "Any2Any", Any2Any);
