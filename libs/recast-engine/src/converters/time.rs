use recast_api::converter::{BUILTIN_ANCHOR, Converter};
use recast_api::error::ConvertError;
use recast_api::register_converter;
use recast_api::settings::Settings;
use recast_api::types::TypeKey;
use recast_api::value::Value;

use super::expect_str;

const DEFAULT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Settings key overriding the datetime format for both directions.
const FORMAT_KEY: &str = "time.format";

/// Parses wall-clock text into epoch milliseconds (interpreted as UTC).
/// The leading directive overrides the configured format for one call.
pub struct Str2Timestamp {
    format: String,
}

impl Default for Str2Timestamp {
    fn default() -> Self {
        Self {
            format: DEFAULT_FORMAT.to_string(),
        }
    }
}

impl Converter for Str2Timestamp {
    fn source(&self) -> TypeKey {
        TypeKey::STR
    }
    fn target(&self) -> TypeKey {
        TypeKey::TIMESTAMP
    }
    fn convert(
        &self,
        value: &Value,
        _target: &TypeKey,
        directives: &[&str],
    ) -> Result<Value, ConvertError> {
        let s = expect_str(value)?.trim();
        let format = directives.first().copied().unwrap_or(&self.format);
        let dt = chrono::NaiveDateTime::parse_from_str(s, format)
            .map_err(|e| ConvertError::other(e.to_string()))?;
        Ok(Value::Timestamp(dt.and_utc().timestamp_millis()))
    }
    fn configure(&mut self, settings: &Settings) -> Result<(), ConvertError> {
        if let Some(format) = settings.get_str(FORMAT_KEY) {
            self.format = format.to_string();
        }
        Ok(())
    }
}

pub struct Timestamp2Str {
    format: String,
}

impl Default for Timestamp2Str {
    fn default() -> Self {
        Self {
            format: DEFAULT_FORMAT.to_string(),
        }
    }
}

impl Converter for Timestamp2Str {
    fn source(&self) -> TypeKey {
        TypeKey::TIMESTAMP
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
        let Value::Timestamp(ms) = value else {
            return Err(ConvertError::other(format!(
                "expected a timestamp value, got '{}'",
                value.type_key()
            )));
        };
        let format = directives.first().copied().unwrap_or(&self.format);
        let dt = chrono::DateTime::from_timestamp_millis(*ms)
            .ok_or_else(|| ConvertError::other(format!("timestamp out of range: {ms}")))?;
        Ok(Value::Str(dt.naive_utc().format(format).to_string()))
    }
    fn configure(&mut self, settings: &Settings) -> Result<(), ConvertError> {
        if let Some(format) = settings.get_str(FORMAT_KEY) {
            self.format = format.to_string();
        }
        Ok(())
    }
}

register_converter!(BUILTIN_ANCHOR, "Str2Timestamp", Str2Timestamp);
register_converter!(BUILTIN_ANCHOR, "Timestamp2Str", Timestamp2Str);
