//! Bundled converters, all registered under the builtin anchor.

use recast_api::error::ConvertError;
use recast_api::value::Value;

pub mod any;
pub mod collection;
pub mod json;
pub mod numeric;
pub mod record;
pub mod string;
pub mod time;

fn expect_str(value: &Value) -> Result<&str, ConvertError> {
    value.as_str().ok_or_else(|| {
        ConvertError::other(format!(
            "expected a string value, got '{}'",
            value.type_key()
        ))
    })
}
