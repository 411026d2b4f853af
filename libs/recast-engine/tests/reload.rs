//! Registry lifecycle: anchors, settings injection, resolution order,
//! duplicate handling, fallback loading, and reload atomicity.

use std::sync::Arc;

use recast_api::converter::Converter;
use recast_api::error::ConvertError;
use recast_api::register_converter;
use recast_api::settings::{SettingValue, Settings};
use recast_api::types::TypeKey;
use recast_api::value::Value;
use recast_engine::{Caster, DefaultExtractor};

// ---------------------------------------------------------------------------
// Test converters, registered under their own anchors so the builtin group
// stays untouched.
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Shape2Drawing;

impl Converter for Shape2Drawing {
    fn source(&self) -> TypeKey {
        TypeKey::new("shape")
    }
    fn target(&self) -> TypeKey {
        TypeKey::new("drawing")
    }
    fn convert(
        &self,
        _value: &Value,
        _target: &TypeKey,
        _directives: &[&str],
    ) -> Result<Value, ConvertError> {
        Ok(Value::Str("shape->drawing".into()))
    }
}

#[derive(Default)]
struct Square2Drawing;

impl Converter for Square2Drawing {
    fn source(&self) -> TypeKey {
        TypeKey::new("square")
    }
    fn target(&self) -> TypeKey {
        TypeKey::new("drawing")
    }
    fn convert(
        &self,
        _value: &Value,
        _target: &TypeKey,
        _directives: &[&str],
    ) -> Result<Value, ConvertError> {
        Ok(Value::Str("square->drawing".into()))
    }
}

#[derive(Default)]
struct DupA;

impl Converter for DupA {
    fn source(&self) -> TypeKey {
        TypeKey::new("dup-src")
    }
    fn target(&self) -> TypeKey {
        TypeKey::new("dup-dst")
    }
    fn convert(
        &self,
        _value: &Value,
        _target: &TypeKey,
        _directives: &[&str],
    ) -> Result<Value, ConvertError> {
        Ok(Value::Str("A".into()))
    }
}

#[derive(Default)]
struct DupB;

impl Converter for DupB {
    fn source(&self) -> TypeKey {
        TypeKey::new("dup-src")
    }
    fn target(&self) -> TypeKey {
        TypeKey::new("dup-dst")
    }
    fn convert(
        &self,
        _value: &Value,
        _target: &TypeKey,
        _directives: &[&str],
    ) -> Result<Value, ConvertError> {
        Ok(Value::Str("B".into()))
    }
}

register_converter!("sketch-general", "Shape2Drawing", Shape2Drawing);
register_converter!("sketch-specific", "Square2Drawing", Square2Drawing);
register_converter!("dup-demo", "DupA", DupA);
register_converter!("dup-demo", "DupB", DupB);

fn hierarchy_extractor() -> Box<DefaultExtractor> {
    Box::new(
        DefaultExtractor::new()
            .with_supertype(TypeKey::new("square"), TypeKey::new("shape"))
            .with_supertype(TypeKey::new("outline"), TypeKey::new("drawing")),
    )
}

#[test]
fn general_pair_resolves_through_ranking() {
    let caster = Caster::new();
    caster
        .set_anchors(vec!["sketch-general"])
        .set_extractor(hierarchy_extractor());
    // Only (shape, drawing) is registered; ranking reaches it from the
    // more specific query types.
    let converter = caster
        .find(&TypeKey::new("square"), &TypeKey::new("outline"))
        .expect("ranking should reach the general pair");
    assert_eq!(converter.source(), TypeKey::new("shape"));
}

#[test]
fn specific_pair_shadows_general() {
    let caster = Caster::new();
    caster
        .set_anchors(vec!["sketch-general", "sketch-specific"])
        .set_extractor(hierarchy_extractor());
    let converter = caster
        .find(&TypeKey::new("square"), &TypeKey::new("outline"))
        .expect("either pair should resolve");
    assert_eq!(converter.source(), TypeKey::new("square"));
}

#[test]
fn duplicate_pair_keeps_one_winner_stably() {
    let caster = Caster::new();
    caster.set_anchors(vec!["dup-demo"]);
    let src = Value::Record {
        class: TypeKey::new("dup-src"),
        fields: vec![],
    };
    let first = caster.cast_to(&src, &TypeKey::new("dup-dst")).unwrap();
    // Rebuilding discovers the same candidates in the same order; the
    // winner must not change.
    caster.set_anchors(vec!["dup-demo"]);
    let second = caster.cast_to(&src, &TypeKey::new("dup-dst")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn can_cast_excludes_the_catch_all() {
    let caster = Caster::new();
    assert!(caster.can_cast(&TypeKey::STR, &TypeKey::INT));
    assert!(caster.can_cast(&TypeKey::INT, &TypeKey::LONG));
    assert!(caster.can_cast(&TypeKey::MAP, &TypeKey::new("point")));
    // Only the (any, any) catch-all matches this pair.
    assert!(!caster.can_cast(&TypeKey::new("widget"), &TypeKey::new("gadget")));
}

#[test]
fn settings_reconfigure_converters_on_reload() {
    let caster = Caster::new();
    let text = Value::Str("2024-03-05 10:00:00".into());
    let ts = caster.cast_to(&text, &TypeKey::TIMESTAMP).unwrap();
    let expected_ms = chrono::NaiveDate::from_ymd_opt(2024, 3, 5)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap()
        .and_utc()
        .timestamp_millis();
    assert_eq!(ts, Value::Timestamp(expected_ms));
    assert_eq!(
        caster.cast_to(&ts, &TypeKey::STR).unwrap(),
        Value::Str("2024-03-05 10:00:00".into())
    );

    let mut settings = Settings::new();
    settings.set("time.format", SettingValue::Str("%Y/%m/%d %H:%M:%S".into()));
    caster.set_settings(settings);
    assert_eq!(
        caster.cast_to(&ts, &TypeKey::STR).unwrap(),
        Value::Str("2024/03/05 10:00:00".into())
    );
}

#[test]
fn format_directive_overrides_configuration() {
    let caster = Caster::new();
    let ts = Value::Timestamp(
        chrono::NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
            .and_utc()
            .timestamp_millis(),
    );
    let out = caster
        .cast(
            &ts,
            Some(&TypeKey::TIMESTAMP),
            Some(&TypeKey::STR),
            &["%H:%M"],
        )
        .unwrap();
    assert_eq!(out, Value::Str("10:30".into()));
}

#[test]
fn list_separator_is_configurable() {
    let caster = Caster::new();
    let mut settings = Settings::new();
    settings.set("list.separator", SettingValue::Str(";".into()));
    caster.set_settings(settings);
    let out = caster
        .cast_to(&Value::Str("a;b".into()), &TypeKey::LIST)
        .unwrap();
    assert_eq!(
        out,
        Value::List(vec![Value::Str("a".into()), Value::Str("b".into())])
    );
}

#[test]
fn empty_anchor_group_falls_back_to_bundled_list() {
    let caster = Caster::new();
    caster.set_anchors(vec!["no-such-group"]);
    assert_eq!(
        caster.cast_to(&Value::Str("42".into()), &TypeKey::INT).unwrap(),
        Value::Int(42)
    );
}

#[test]
fn empty_anchor_list_restores_the_default() {
    let caster = Caster::new();
    caster.set_anchors(Vec::new());
    assert_eq!(
        caster.cast_to(&Value::Str("42".into()), &TypeKey::INT).unwrap(),
        Value::Int(42)
    );
}

#[test]
fn added_anchors_extend_and_reset_restores() {
    let caster = Caster::new();
    caster
        .set_extractor(hierarchy_extractor())
        .add_anchors(&["sketch-general"]);
    assert!(caster.can_cast(&TypeKey::new("shape"), &TypeKey::new("drawing")));
    // Builtins are still present alongside the added group.
    assert_eq!(
        caster.cast_to(&Value::Str("1".into()), &TypeKey::INT).unwrap(),
        Value::Int(1)
    );
    // After the reset only the catch-all matches the pair again.
    caster.reset_anchors();
    assert!(!caster.can_cast(&TypeKey::new("shape"), &TypeKey::new("drawing")));
}

#[test]
fn concurrent_casts_survive_reloads() {
    let caster = Arc::new(Caster::new());
    let mut handles = Vec::new();
    for _ in 0..4 {
        let caster = Arc::clone(&caster);
        handles.push(std::thread::spawn(move || {
            for _ in 0..2000 {
                let out = caster
                    .cast_to(&Value::Str("42".into()), &TypeKey::INT)
                    .expect("every cast must see a complete registry");
                assert_eq!(out, Value::Int(42));
            }
        }));
    }
    for _ in 0..200 {
        caster.set_anchors(vec!["builtin"]);
        caster.reset_anchors();
    }
    for handle in handles {
        handle.join().unwrap();
    }
}
