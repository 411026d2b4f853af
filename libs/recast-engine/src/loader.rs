use std::sync::Arc;

use recast_api::converter::ConverterSpec;
use recast_api::settings::Settings;

use crate::caster::ConverterMap;

/// Bundled fallback list, consulted only when anchor discovery yields
/// nothing. One converter name per line; `#` starts a comment.
const DEFAULT_LIST: &str = include_str!("default_converters.txt");

/// Build the full converter map for the given anchors and settings.
///
/// Candidates come from the process-wide registration table, filtered by
/// anchor. Zero candidates fall back to the bundled default list, resolved
/// by name across the whole table; names that resolve to nothing are
/// skipped silently.
pub(crate) fn build(anchors: &[&'static str], settings: &Settings) -> ConverterMap {
    let mut specs: Vec<&ConverterSpec> = inventory::iter::<ConverterSpec>
        .into_iter()
        .filter(|spec| anchors.contains(&spec.anchor))
        .collect();

    if specs.is_empty() {
        tracing::warn!(
            ?anchors,
            "no converters found under anchors, loading bundled default list"
        );
        specs = DEFAULT_LIST
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|name| {
                inventory::iter::<ConverterSpec>
                    .into_iter()
                    .find(|spec| spec.name == name)
            })
            .collect();
    }

    build_from(&specs, settings)
}

/// Instantiate, configure, and register candidates in discovery order.
///
/// Failures are isolated per candidate: a converter that cannot be built or
/// configured is logged and excluded, and the rebuild continues. The first
/// converter registered for a `(source, target)` pair wins; later duplicates
/// are dropped, never overwritten.
fn build_from(specs: &[&ConverterSpec], settings: &Settings) -> ConverterMap {
    let mut map = ConverterMap::new();
    for spec in specs {
        let mut converter = match (spec.build)() {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(converter = spec.name, error = %e, "failed to create converter");
                continue;
            }
        };
        let key = (converter.source(), converter.target());
        if map.contains_key(&key) {
            tracing::debug!(
                converter = spec.name,
                from = %key.0,
                to = %key.1,
                "duplicate type pair, keeping first registration"
            );
            continue;
        }
        if let Err(e) = converter.configure(settings) {
            tracing::warn!(converter = spec.name, error = %e, "failed to configure converter");
            continue;
        }
        map.insert(key, Arc::from(converter));
    }
    tracing::debug!(converters = map.len(), "registry rebuilt");
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use recast_api::converter::Converter;
    use recast_api::error::ConvertError;
    use recast_api::types::TypeKey;
    use recast_api::value::Value;

    struct Stamp(&'static str);

    impl Converter for Stamp {
        fn source(&self) -> TypeKey {
            TypeKey::new("stamp-src")
        }
        fn target(&self) -> TypeKey {
            TypeKey::new("stamp-dst")
        }
        fn convert(
            &self,
            _value: &Value,
            _target: &TypeKey,
            _directives: &[&str],
        ) -> Result<Value, ConvertError> {
            Ok(Value::Str(self.0.into()))
        }
    }

    fn first() -> Result<Box<dyn Converter>, ConvertError> {
        Ok(Box::new(Stamp("first")))
    }

    fn second() -> Result<Box<dyn Converter>, ConvertError> {
        Ok(Box::new(Stamp("second")))
    }

    fn broken() -> Result<Box<dyn Converter>, ConvertError> {
        Err(ConvertError::other("constructor exploded"))
    }

    struct Fussy;

    impl Converter for Fussy {
        fn source(&self) -> TypeKey {
            TypeKey::new("stamp-src")
        }
        fn target(&self) -> TypeKey {
            TypeKey::new("stamp-dst")
        }
        fn convert(
            &self,
            _value: &Value,
            _target: &TypeKey,
            _directives: &[&str],
        ) -> Result<Value, ConvertError> {
            Ok(Value::Null)
        }
        fn configure(&mut self, _settings: &Settings) -> Result<(), ConvertError> {
            Err(ConvertError::other("missing mandatory setting"))
        }
    }

    fn fussy() -> Result<Box<dyn Converter>, ConvertError> {
        Ok(Box::new(Fussy))
    }

    #[test]
    fn first_registration_wins() {
        let a = ConverterSpec {
            anchor: "t",
            name: "First",
            build: first,
        };
        let b = ConverterSpec {
            anchor: "t",
            name: "Second",
            build: second,
        };
        let map = build_from(&[&a, &b], &Settings::new());
        assert_eq!(map.len(), 1);
        let winner = &map[&(TypeKey::new("stamp-src"), TypeKey::new("stamp-dst"))];
        let out = winner
            .convert(&Value::Null, &TypeKey::new("stamp-dst"), &[])
            .unwrap();
        assert_eq!(out, Value::Str("first".into()));
    }

    #[test]
    fn configure_failure_releases_the_pair() {
        let picky = ConverterSpec {
            anchor: "t",
            name: "Fussy",
            build: fussy,
        };
        let fallback = ConverterSpec {
            anchor: "t",
            name: "Second",
            build: second,
        };
        let map = build_from(&[&picky, &fallback], &Settings::new());
        assert_eq!(map.len(), 1);
        let winner = &map[&(TypeKey::new("stamp-src"), TypeKey::new("stamp-dst"))];
        let out = winner
            .convert(&Value::Null, &TypeKey::new("stamp-dst"), &[])
            .unwrap();
        assert_eq!(out, Value::Str("second".into()));
    }

    #[test]
    fn build_failure_excludes_only_that_candidate() {
        let bad = ConverterSpec {
            anchor: "t",
            name: "Broken",
            build: broken,
        };
        let good = ConverterSpec {
            anchor: "t",
            name: "Second",
            build: second,
        };
        let map = build_from(&[&bad, &good], &Settings::new());
        assert_eq!(map.len(), 1);
        let winner = &map[&(TypeKey::new("stamp-src"), TypeKey::new("stamp-dst"))];
        let out = winner
            .convert(&Value::Null, &TypeKey::new("stamp-dst"), &[])
            .unwrap();
        assert_eq!(out, Value::Str("second".into()));
    }
}
