//! String parsing and numeric narrowing.
//!
//! Widening between numeric kinds never reaches these: the extractor reports
//! it as directly convertible and dispatch handles it natively. What lands
//! here is decimal/radix parsing from strings and narrowing registered under
//! the `number` grouping, which the ranking resolves for any numeric source.

use recast_api::converter::{BUILTIN_ANCHOR, Converter};
use recast_api::error::ConvertError;
use recast_api::register_converter;
use recast_api::types::TypeKey;
use recast_api::value::Value;

use super::expect_str;

/// Optional leading directive selecting a parse radix.
fn parse_radix(directives: &[&str]) -> Result<Option<u32>, ConvertError> {
    match directives.first() {
        None => Ok(None),
        Some(r) => r
            .parse::<u32>()
            .map(Some)
            .map_err(|_| ConvertError::other(format!("invalid radix '{r}'"))),
    }
}

/// Integral view of any numeric value, truncating floats.
fn numeric_as_i64(value: &Value) -> Result<i64, ConvertError> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))
        .ok_or_else(|| {
            ConvertError::other(format!(
                "expected a numeric value, got '{}'",
                value.type_key()
            ))
        })
}

fn numeric_as_f64(value: &Value) -> Result<f64, ConvertError> {
    value.as_f64().ok_or_else(|| {
        ConvertError::other(format!(
            "expected a numeric value, got '{}'",
            value.type_key()
        ))
    })
}

#[derive(Default)]
pub struct Str2Int;

impl Converter for Str2Int {
    fn source(&self) -> TypeKey {
        TypeKey::STR
    }
    fn target(&self) -> TypeKey {
        TypeKey::INT
    }
    fn convert(
        &self,
        value: &Value,
        _target: &TypeKey,
        directives: &[&str],
    ) -> Result<Value, ConvertError> {
        let s = expect_str(value)?.trim();
        let v = match parse_radix(directives)? {
            Some(radix) => i32::from_str_radix(s, radix)?,
            None => s.parse()?,
        };
        Ok(Value::Int(v))
    }
}

#[derive(Default)]
pub struct Str2Long;

impl Converter for Str2Long {
    fn source(&self) -> TypeKey {
        TypeKey::STR
    }
    fn target(&self) -> TypeKey {
        TypeKey::LONG
    }
    fn convert(
        &self,
        value: &Value,
        _target: &TypeKey,
        directives: &[&str],
    ) -> Result<Value, ConvertError> {
        let s = expect_str(value)?.trim();
        let v = match parse_radix(directives)? {
            Some(radix) => i64::from_str_radix(s, radix)?,
            None => s.parse()?,
        };
        Ok(Value::Long(v))
    }
}

#[derive(Default)]
pub struct Str2Byte;

impl Converter for Str2Byte {
    fn source(&self) -> TypeKey {
        TypeKey::STR
    }
    fn target(&self) -> TypeKey {
        TypeKey::BYTE
    }
    fn convert(
        &self,
        value: &Value,
        _target: &TypeKey,
        _directives: &[&str],
    ) -> Result<Value, ConvertError> {
        Ok(Value::Byte(expect_str(value)?.trim().parse()?))
    }
}

#[derive(Default)]
pub struct Str2Short;

impl Converter for Str2Short {
    fn source(&self) -> TypeKey {
        TypeKey::STR
    }
    fn target(&self) -> TypeKey {
        TypeKey::SHORT
    }
    fn convert(
        &self,
        value: &Value,
        _target: &TypeKey,
        _directives: &[&str],
    ) -> Result<Value, ConvertError> {
        Ok(Value::Short(expect_str(value)?.trim().parse()?))
    }
}

#[derive(Default)]
pub struct Str2Float;

impl Converter for Str2Float {
    fn source(&self) -> TypeKey {
        TypeKey::STR
    }
    fn target(&self) -> TypeKey {
        TypeKey::FLOAT
    }
    fn convert(
        &self,
        value: &Value,
        _target: &TypeKey,
        _directives: &[&str],
    ) -> Result<Value, ConvertError> {
        Ok(Value::Float(expect_str(value)?.trim().parse()?))
    }
}

#[derive(Default)]
pub struct Str2Double;

impl Converter for Str2Double {
    fn source(&self) -> TypeKey {
        TypeKey::STR
    }
    fn target(&self) -> TypeKey {
        TypeKey::DOUBLE
    }
    fn convert(
        &self,
        value: &Value,
        _target: &TypeKey,
        _directives: &[&str],
    ) -> Result<Value, ConvertError> {
        Ok(Value::Double(expect_str(value)?.trim().parse()?))
    }
}

#[derive(Default)]
pub struct Number2Byte;

impl Converter for Number2Byte {
    fn source(&self) -> TypeKey {
        TypeKey::NUMBER
    }
    fn target(&self) -> TypeKey {
        TypeKey::BYTE
    }
    fn convert(
        &self,
        value: &Value,
        _target: &TypeKey,
        _directives: &[&str],
    ) -> Result<Value, ConvertError> {
        Ok(Value::Byte(numeric_as_i64(value)? as i8))
    }
}

#[derive(Default)]
pub struct Number2Short;

impl Converter for Number2Short {
    fn source(&self) -> TypeKey {
        TypeKey::NUMBER
    }
    fn target(&self) -> TypeKey {
        TypeKey::SHORT
    }
    fn convert(
        &self,
        value: &Value,
        _target: &TypeKey,
        _directives: &[&str],
    ) -> Result<Value, ConvertError> {
        Ok(Value::Short(numeric_as_i64(value)? as i16))
    }
}

#[derive(Default)]
pub struct Number2Int;

impl Converter for Number2Int {
    fn source(&self) -> TypeKey {
        TypeKey::NUMBER
    }
    fn target(&self) -> TypeKey {
        TypeKey::INT
    }
    fn convert(
        &self,
        value: &Value,
        _target: &TypeKey,
        _directives: &[&str],
    ) -> Result<Value, ConvertError> {
        Ok(Value::Int(numeric_as_i64(value)? as i32))
    }
}

#[derive(Default)]
pub struct Number2Long;

impl Converter for Number2Long {
    fn source(&self) -> TypeKey {
        TypeKey::NUMBER
    }
    fn target(&self) -> TypeKey {
        TypeKey::LONG
    }
    fn convert(
        &self,
        value: &Value,
        _target: &TypeKey,
        _directives: &[&str],
    ) -> Result<Value, ConvertError> {
        Ok(Value::Long(numeric_as_i64(value)?))
    }
}

#[derive(Default)]
pub struct Number2Float;

impl Converter for Number2Float {
    fn source(&self) -> TypeKey {
        TypeKey::NUMBER
    }
    fn target(&self) -> TypeKey {
        TypeKey::FLOAT
    }
    fn convert(
        &self,
        value: &Value,
        _target: &TypeKey,
        _directives: &[&str],
    ) -> Result<Value, ConvertError> {
        Ok(Value::Float(numeric_as_f64(value)? as f32))
    }
}

#[derive(Default)]
pub struct Number2Double;

impl Converter for Number2Double {
    fn source(&self) -> TypeKey {
        TypeKey::NUMBER
    }
    fn target(&self) -> TypeKey {
        TypeKey::DOUBLE
    }
    fn convert(
        &self,
        value: &Value,
        _target: &TypeKey,
        _directives: &[&str],
    ) -> Result<Value, ConvertError> {
        Ok(Value::Double(numeric_as_f64(value)?))
    }
}

#[derive(Default)]
pub struct Number2Str;

impl Converter for Number2Str {
    fn source(&self) -> TypeKey {
        TypeKey::NUMBER
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
        numeric_as_f64(value)?;
        Ok(Value::Str(value.to_string()))
    }
}

register_converter!(BUILTIN_ANCHOR, "Str2Int", Str2Int);
register_converter!(BUILTIN_ANCHOR, "Str2Long", Str2Long);
register_converter!(BUILTIN_ANCHOR, "Str2Byte", Str2Byte);
register_converter!(BUILTIN_ANCHOR, "Str2Short", Str2Short);
register_converter!(BUILTIN_ANCHOR, "Str2Float", Str2Float);
register_converter!(BUILTIN_ANCHOR, "Str2Double", Str2Double);
register_converter!(BUILTIN_ANCHOR, "Number2Byte", Number2Byte);
register_converter!(BUILTIN_ANCHOR, "Number2Short", Number2Short);
register_converter!(BUILTIN_ANCHOR, "Number2Int", Number2Int);
register_converter!(BUILTIN_ANCHOR, "Number2Long", Number2Long);
register_converter!(BUILTIN_ANCHOR, "Number2Float", Number2Float);
register_converter!(BUILTIN_ANCHOR, "Number2Double", Number2Double);
register_converter!(BUILTIN_ANCHOR, "Number2Str", Number2Str);
