pub mod converter;
pub mod error;
pub mod extractor;
pub mod settings;
pub mod types;
pub mod value;

// Re-exported for the `register_converter!` macro expansion.
pub use inventory;

pub use converter::{BUILTIN_ANCHOR, Converter, ConverterSpec};
pub use error::{CastError, ConvertError};
pub use extractor::TypeExtractor;
pub use settings::{SettingValue, Settings};
pub use types::{PrimKind, TypeKey};
pub use value::Value;
