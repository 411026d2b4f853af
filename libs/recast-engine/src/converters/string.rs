use recast_api::converter::{BUILTIN_ANCHOR, Converter};
use recast_api::error::ConvertError;
use recast_api::register_converter;
use recast_api::types::TypeKey;
use recast_api::value::Value;

use super::expect_str;

#[derive(Default)]
pub struct Str2Bool;

impl Converter for Str2Bool {
    fn source(&self) -> TypeKey {
        TypeKey::STR
    }
    fn target(&self) -> TypeKey {
        TypeKey::BOOL
    }
    fn convert(
        &self,
        value: &Value,
        _target: &TypeKey,
        _directives: &[&str],
    ) -> Result<Value, ConvertError> {
        let s = expect_str(value)?.trim().to_ascii_lowercase();
        match s.as_str() {
            "true" | "yes" | "on" | "1" => Ok(Value::Bool(true)),
            "false" | "no" | "off" | "0" => Ok(Value::Bool(false)),
            _ => Err(ConvertError::other(format!("not a boolean: '{s}'"))),
        }
    }
}

#[derive(Default)]
pub struct Bool2Str;

impl Converter for Bool2Str {
    fn source(&self) -> TypeKey {
        TypeKey::BOOL
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
            Value::Bool(b) => Ok(Value::Str(b.to_string())),
            other => Err(ConvertError::other(format!(
                "expected a boolean value, got '{}'",
                other.type_key()
            ))),
        }
    }
}

#[derive(Default)]
pub struct Str2Char;

impl Converter for Str2Char {
    fn source(&self) -> TypeKey {
        TypeKey::STR
    }
    fn target(&self) -> TypeKey {
        TypeKey::CHAR
    }
    fn convert(
        &self,
        value: &Value,
        _target: &TypeKey,
        _directives: &[&str],
    ) -> Result<Value, ConvertError> {
        let s = expect_str(value)?;
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Value::Char(c)),
            _ => Err(ConvertError::other(format!(
                "expected a single character, got '{s}'"
            ))),
        }
    }
}

#[derive(Default)]
pub struct Char2Str;

impl Converter for Char2Str {
    fn source(&self) -> TypeKey {
        TypeKey::CHAR
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
            Value::Char(c) => Ok(Value::Str(c.to_string())),
            other => Err(ConvertError::other(format!(
                "expected a char value, got '{}'",
                other.type_key()
            ))),
        }
    }
}

register_converter!(BUILTIN_ANCHOR, "Str2Bool", Str2Bool);
register_converter!(BUILTIN_ANCHOR, "Bool2Str", Bool2Str);
register_converter!(BUILTIN_ANCHOR, "Str2Char", Str2Char);
register_converter!(BUILTIN_ANCHOR, "Char2Str", Char2Str);
