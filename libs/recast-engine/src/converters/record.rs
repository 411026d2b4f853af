use recast_api::converter::{BUILTIN_ANCHOR, Converter};
use recast_api::error::ConvertError;
use recast_api::register_converter;
use recast_api::types::TypeKey;
use recast_api::value::Value;

/// Tags a map body with a record class. The class comes from the leading
/// directive, or from the requested target when it is a user-defined key.
#[derive(Default)]
pub struct Map2Record;

impl Converter for Map2Record {
    fn source(&self) -> TypeKey {
        TypeKey::MAP
    }
    fn target(&self) -> TypeKey {
        TypeKey::ANY
    }
    fn convert(
        &self,
        value: &Value,
        target: &TypeKey,
        directives: &[&str],
    ) -> Result<Value, ConvertError> {
        let Value::Map(entries) = value else {
            return Err(ConvertError::other(format!(
                "expected a map value, got '{}'",
                value.type_key()
            )));
        };
        let class = match directives.first() {
            Some(name) => TypeKey::new(*name),
            None if *target == TypeKey::ANY => return Ok(value.clone()),
            None if !target.is_builtin() => target.clone(),
            None => {
                return Err(ConvertError::other(format!(
                    "'{target}' is not a record class"
                )));
            }
        };
        Ok(Value::Record {
            class,
            fields: entries.clone(),
        })
    }
}

#[derive(Default)]
pub struct Record2Map;

impl Converter for Record2Map {
    fn source(&self) -> TypeKey {
        TypeKey::ANY
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
        match value {
            Value::Record { fields, .. } => Ok(Value::Map(fields.clone())),
            other => Err(ConvertError::other(format!(
                "expected a record value, got '{}'",
                other.type_key()
            ))),
        }
    }
}

register_converter!(BUILTIN_ANCHOR, "Map2Record", Map2Record);
register_converter!(BUILTIN_ANCHOR, "Record2Map", Record2Map);
