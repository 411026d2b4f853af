use std::fmt;

use crate::types::TypeKey;

/// Canonical value representation.
///
/// Strategy by kind:
/// - Scalars (integers, floats, `Bool`, `Char`): carried directly.
/// - `Str`: owned text.
/// - `Timestamp`: epoch milliseconds; formatting is a converter concern.
/// - `List`, `Map`: recursive, order-preserving.
/// - `Record`: map-like body tagged with a user-defined class key, so the
///   extractor can rank it through a declared hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Char(char),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Str(String),
    /// Epoch milliseconds.
    Timestamp(i64),
    List(Vec<Value>),
    Map(Vec<(String, Value)>),
    Record {
        class: TypeKey,
        fields: Vec<(String, Value)>,
    },
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The value's own type identifier. `Null` is untyped and reports `any`;
    /// callers deriving a source type treat it as unspecified.
    pub fn type_key(&self) -> TypeKey {
        match self {
            Value::Null => TypeKey::ANY,
            Value::Bool(_) => TypeKey::BOOL,
            Value::Char(_) => TypeKey::CHAR,
            Value::Byte(_) => TypeKey::BYTE,
            Value::Short(_) => TypeKey::SHORT,
            Value::Int(_) => TypeKey::INT,
            Value::Long(_) => TypeKey::LONG,
            Value::Float(_) => TypeKey::FLOAT,
            Value::Double(_) => TypeKey::DOUBLE,
            Value::Str(_) => TypeKey::STR,
            Value::Timestamp(_) => TypeKey::TIMESTAMP,
            Value::List(_) => TypeKey::LIST,
            Value::Map(_) => TypeKey::MAP,
            Value::Record { class, .. } => class.clone(),
        }
    }

    /// Integer view of the integral kinds.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Byte(v) => Some(*v as i64),
            Value::Short(v) => Some(*v as i64),
            Value::Int(v) => Some(*v as i64),
            Value::Long(v) => Some(*v),
            _ => None,
        }
    }

    /// Float view of all numeric kinds.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Byte(v) => Some(*v as f64),
            Value::Short(v) => Some(*v as f64),
            Value::Int(v) => Some(*v as f64),
            Value::Long(v) => Some(*v as f64),
            Value::Float(v) => Some(*v as f64),
            Value::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Build a value from parsed JSON. Numbers become `Long` or `Double`.
    pub fn from_json(json: serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Long(i)
                } else {
                    Value::Double(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Render as JSON. Record class tags are dropped; non-finite floats
    /// become `null` (JSON has no representation for them).
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Char(c) => serde_json::Value::String(c.to_string()),
            Value::Byte(v) => serde_json::Value::from(*v),
            Value::Short(v) => serde_json::Value::from(*v),
            Value::Int(v) => serde_json::Value::from(*v),
            Value::Long(v) => serde_json::Value::from(*v),
            Value::Float(v) => serde_json::Number::from_f64(*v as f64)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Double(v) => serde_json::Number::from_f64(*v)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Str(s) => serde_json::Value::String(s.clone()),
            Value::Timestamp(ms) => serde_json::Value::from(*ms),
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Map(entries) | Value::Record {
                fields: entries, ..
            } => serde_json::Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        Value::from_json(json)
    }
}

/// Default string form — the fallback used when casting to a string fails.
/// Scalars render directly, structures in bracket form.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Char(c) => write!(f, "{c}"),
            Value::Byte(v) => write!(f, "{v}"),
            Value::Short(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Long(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Double(v) => write!(f, "{v}"),
            Value::Str(s) => f.write_str(s),
            Value::Timestamp(ms) => write!(f, "{ms}"),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Map(entries) => write_entries(f, "", entries),
            Value::Record { class, fields } => write_entries(f, class.name(), fields),
        }
    }
}

fn write_entries(
    f: &mut fmt::Formatter<'_>,
    prefix: &str,
    entries: &[(String, Value)],
) -> fmt::Result {
    write!(f, "{prefix}{{")?;
    for (i, (k, v)) in entries.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{k}={v}")?;
    }
    f.write_str("}")
}
