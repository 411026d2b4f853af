use recast_api::converter::{BUILTIN_ANCHOR, Converter};
use recast_api::error::ConvertError;
use recast_api::register_converter;
use recast_api::settings::Settings;
use recast_api::types::TypeKey;
use recast_api::value::Value;

use super::expect_str;
use crate::caster::Caster;

const DEFAULT_SEPARATOR: &str = ",";

/// Element-wise list conversion. The leading directive names the element
/// target type; without one the list passes through unchanged. Element casts
/// go through the shared registry, and their typed failures propagate to the
/// caller untouched.
#[derive(Default)]
pub struct List2List;

impl Converter for List2List {
    fn source(&self) -> TypeKey {
        TypeKey::LIST
    }
    fn target(&self) -> TypeKey {
        TypeKey::LIST
    }
    fn convert(
        &self,
        value: &Value,
        _target: &TypeKey,
        directives: &[&str],
    ) -> Result<Value, ConvertError> {
        let Value::List(items) = value else {
            return Err(ConvertError::other(format!(
                "expected a list value, got '{}'",
                value.type_key()
            )));
        };
        let Some(elem) = directives.first() else {
            return Ok(value.clone());
        };
        let elem_key = TypeKey::new(*elem);
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            out.push(Caster::shared().cast_to(item, &elem_key)?);
        }
        Ok(Value::List(out))
    }
}

pub struct Str2List {
    separator: String,
}

impl Default for Str2List {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl Converter for Str2List {
    fn source(&self) -> TypeKey {
        TypeKey::STR
    }
    fn target(&self) -> TypeKey {
        TypeKey::LIST
    }
    fn convert(
        &self,
        value: &Value,
        _target: &TypeKey,
        directives: &[&str],
    ) -> Result<Value, ConvertError> {
        let s = expect_str(value)?;
        let separator = directives.first().copied().unwrap_or(&self.separator);
        if s.is_empty() {
            return Ok(Value::List(Vec::new()));
        }
        Ok(Value::List(
            s.split(separator)
                .map(|item| Value::Str(item.trim().to_string()))
                .collect(),
        ))
    }
    fn configure(&mut self, settings: &Settings) -> Result<(), ConvertError> {
        if let Some(sep) = settings.get_str("list.separator") {
            self.separator = sep.to_string();
        }
        Ok(())
    }
}

pub struct List2Str {
    separator: String,
}

impl Default for List2Str {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl Converter for List2Str {
    fn source(&self) -> TypeKey {
        TypeKey::LIST
    }
    fn target(&self) -> TypeKey {
        TypeKey::STR
    }
    fn convert(
        &self,
        value: &Value,
        _target: &TypeKey,
        directives: &[&str],
    ) -> Result<Value, ConvertError> {
        let Value::List(items) = value else {
            return Err(ConvertError::other(format!(
                "expected a list value, got '{}'",
                value.type_key()
            )));
        };
        let separator = directives.first().copied().unwrap_or(&self.separator);
        let joined = items
            .iter()
            .map(|item| item.to_string())
            .collect::<Vec<_>>()
            .join(separator);
        Ok(Value::Str(joined))
    }
    fn configure(&mut self, settings: &Settings) -> Result<(), ConvertError> {
        if let Some(sep) = settings.get_str("list.separator") {
            self.separator = sep.to_string();
        }
        Ok(())
    }
}

register_converter!(BUILTIN_ANCHOR, "List2List", List2List);
register_converter!(BUILTIN_ANCHOR, "Str2List", Str2List);
register_converter!(BUILTIN_ANCHOR, "List2Str", List2Str);
