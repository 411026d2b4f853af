use crate::error::ConvertError;
use crate::settings::Settings;
use crate::types::TypeKey;
use crate::value::Value;

/// Discovery group every bundled converter registers under; the registry's
/// default anchor list contains exactly this group.
pub const BUILTIN_ANCHOR: &str = "builtin";

/// A unit of conversion logic for one declared `(source, target)` type pair.
///
/// Converters are stateless after construction and shared across concurrent
/// callers once the registry publishes them. `target` passed to `convert` is
/// the caller's requested type, which may be more specific than the declared
/// pair (a converter registered for `(map, any)` sees the concrete record
/// class it was resolved for).
pub trait Converter: Send + Sync {
    fn source(&self) -> TypeKey;

    fn target(&self) -> TypeKey;

    /// Convert `value` to `target`. `directives` are free-form string
    /// arguments some converters consume (separators, radix, formats).
    fn convert(
        &self,
        value: &Value,
        target: &TypeKey,
        directives: &[&str],
    ) -> Result<Value, ConvertError>;

    /// Optional configuration hook, invoked exactly once per rebuild with the
    /// registry's current settings, before the converter is published. An
    /// error excludes this converter from the rebuilt registry.
    fn configure(&mut self, settings: &Settings) -> Result<(), ConvertError> {
        let _ = settings;
        Ok(())
    }
}

/// Self-registration descriptor. Converter modules submit one of these per
/// converter at init time; the loader iterates the process-wide table and
/// instantiates every spec whose anchor is currently selected.
pub struct ConverterSpec {
    /// Discovery group this converter belongs to.
    pub anchor: &'static str,
    /// Stable name, used by the bundled fallback list.
    pub name: &'static str,
    /// Default construction; failure excludes only this candidate.
    pub build: fn() -> Result<Box<dyn Converter>, ConvertError>,
}

inventory::collect!(ConverterSpec);

/// Submits a `ConverterSpec` for a `Default`-constructible converter type.
///
/// ```ignore
/// register_converter!("builtin", "Str2Int", Str2Int);
/// ```
#[macro_export]
macro_rules! register_converter {
    ($anchor:expr, $name:expr, $ty:ty) => {
        $crate::inventory::submit! {
            $crate::converter::ConverterSpec {
                anchor: $anchor,
                name: $name,
                build: || {
                    let converter: Box<dyn $crate::converter::Converter> =
                        Box::new(<$ty>::default());
                    Ok(converter)
                },
            }
        }
    };
}
