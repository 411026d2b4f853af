use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;
use parking_lot::Mutex;

use recast_api::converter::{BUILTIN_ANCHOR, Converter};
use recast_api::error::{CastError, ConvertError};
use recast_api::extractor::TypeExtractor;
use recast_api::settings::Settings;
use recast_api::types::{PrimKind, TypeKey};
use recast_api::value::Value;

use crate::extractor::DefaultExtractor;
use crate::loader;

pub(crate) type ConverterMap = HashMap<(TypeKey, TypeKey), Arc<dyn Converter>>;

static SHARED: LazyLock<Caster> = LazyLock::new(Caster::new);

/// Authoritative rebuild inputs, guarded by the rebuild mutex.
struct ReloadState {
    anchors: Vec<&'static str>,
    settings: Settings,
}

/// The conversion registry.
///
/// Readers resolve against an immutable published map; configuration changes
/// build a replacement map off to the side and publish it with a single
/// atomic store, so a concurrent reader observes either the fully-old or the
/// fully-new registry, never a partially populated one. Rebuilds themselves
/// are serialized by a mutex over the anchors and settings.
pub struct Caster {
    map: ArcSwap<ConverterMap>,
    extractor: ArcSwap<Box<dyn TypeExtractor>>,
    state: Mutex<ReloadState>,
}

impl std::fmt::Debug for Caster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Caster")
            .field("converters", &self.map.load().len())
            .finish()
    }
}

impl Default for Caster {
    fn default() -> Self {
        Self::new()
    }
}

impl Caster {
    /// The process-wide default instance.
    pub fn shared() -> &'static Caster {
        &SHARED
    }

    /// An independent instance with default anchors, empty settings, and the
    /// default extractor. The initial registry is built synchronously.
    pub fn new() -> Self {
        let state = ReloadState {
            anchors: vec![BUILTIN_ANCHOR],
            settings: Settings::new(),
        };
        let map = loader::build(&state.anchors, &state.settings);
        let extractor: Box<dyn TypeExtractor> = Box::new(DefaultExtractor::new());
        Self {
            map: ArcSwap::from_pointee(map),
            extractor: ArcSwap::from_pointee(extractor),
            state: Mutex::new(state),
        }
    }

    // -----------------------------------------------------------------------
    // Configuration mutators — each rebuilds and republishes the registry,
    // except `set_extractor`, which only swaps the strategy.
    // -----------------------------------------------------------------------

    /// Rebind the settings bundle and reload.
    pub fn set_settings(&self, settings: Settings) -> &Self {
        let mut state = self.state.lock();
        state.settings = settings;
        self.rebuild(&state);
        self
    }

    /// Replace the anchor list and reload. An empty list restores the
    /// builtin default.
    pub fn set_anchors(&self, anchors: Vec<&'static str>) -> &Self {
        let mut state = self.state.lock();
        state.anchors = if anchors.is_empty() {
            vec![BUILTIN_ANCHOR]
        } else {
            anchors
        };
        self.rebuild(&state);
        self
    }

    /// Append anchors and reload.
    pub fn add_anchors(&self, anchors: &[&'static str]) -> &Self {
        let mut state = self.state.lock();
        for anchor in anchors {
            if !state.anchors.contains(anchor) {
                state.anchors.push(anchor);
            }
        }
        self.rebuild(&state);
        self
    }

    /// Restore the default anchor list and reload.
    pub fn reset_anchors(&self) -> &Self {
        let mut state = self.state.lock();
        state.anchors = vec![BUILTIN_ANCHOR];
        self.rebuild(&state);
        self
    }

    /// Swap the type-introspection strategy. Does not reload.
    pub fn set_extractor(&self, extractor: Box<dyn TypeExtractor>) -> &Self {
        self.extractor.store(Arc::new(extractor));
        self
    }

    fn rebuild(&self, state: &ReloadState) {
        let map = loader::build(&state.anchors, &state.settings);
        self.map.store(Arc::new(map));
    }

    // -----------------------------------------------------------------------
    // Resolution
    // -----------------------------------------------------------------------

    /// Resolve a converter for `from` → `to`.
    ///
    /// Probes the cross-product of the extractor's candidate rankings,
    /// source outer, target inner, so the most specific registered pair
    /// always shadows more general ones.
    pub fn find(&self, from: &TypeKey, to: &TypeKey) -> Option<Arc<dyn Converter>> {
        let map = self.map.load();
        let extractor = self.extractor.load();
        let targets = extractor.rank(to);
        for f in extractor.rank(from) {
            for t in &targets {
                if let Some(converter) = map.get(&(f.clone(), t.clone())) {
                    return Some(Arc::clone(converter));
                }
            }
        }
        None
    }

    // -----------------------------------------------------------------------
    // Dispatch
    // -----------------------------------------------------------------------

    /// Convert `src` from `from` to `to`.
    ///
    /// Decision sequence, each step exclusive of the next:
    /// 1. null source: canonical zero for primitive targets, null otherwise;
    /// 2. same or unspecified types: unchanged;
    /// 3. target assignable (`any`): unchanged;
    /// 4. natively convertible per the extractor: widened or unchanged;
    /// 5. resolved converter, with typed failures propagated and everything
    ///    else wrapped with full context.
    pub fn cast(
        &self,
        src: &Value,
        from: Option<&TypeKey>,
        to: Option<&TypeKey>,
        directives: &[&str],
    ) -> Result<Value, CastError> {
        if src.is_null() {
            if let Some(kind) = to.and_then(TypeKey::prim_kind) {
                return zero_value(kind).ok_or_else(|| {
                    CastError::Unsupported(to.map(TypeKey::name).unwrap_or_default().to_string())
                });
            }
            return Ok(Value::Null);
        }
        let (Some(from), Some(to)) = (from, to) else {
            return Ok(src.clone());
        };
        if from == to {
            return Ok(src.clone());
        }
        if *to == TypeKey::ANY {
            return Ok(src.clone());
        }
        if self.extractor.load().can_cast_directly(from, to) {
            if let Some(kind) = to.prim_kind() {
                if let Some(widened) = widen(src, kind) {
                    return Ok(widened);
                }
            }
            return Ok(src.clone());
        }
        let Some(converter) = self.find(from, to) else {
            return Err(CastError::ConversionNotFound {
                from: from.name().to_string(),
                to: to.name().to_string(),
                registry_size: self.map.load().len(),
            });
        };
        match converter.convert(src, to, directives) {
            Ok(value) => Ok(value),
            Err(ConvertError::Cast(e)) => Err(e),
            Err(e) => Err(CastError::ConversionFailed {
                from: from.name().to_string(),
                to: to.name().to_string(),
                value: src.to_string(),
                cause: e.to_string(),
            }),
        }
    }

    /// Convert `src` to `to`, deriving the source type from the value.
    pub fn cast_to(&self, src: &Value, to: &TypeKey) -> Result<Value, CastError> {
        if src.is_null() {
            return self.cast(src, None, Some(to), &[]);
        }
        let from = src.type_key();
        self.cast(src, Some(&from), Some(to), &[])
    }

    /// Whether `from` → `to` is supported, either natively or by a registered
    /// converter. The catch-all converter matches every pair by construction,
    /// so resolving only it means "no real support".
    pub fn can_cast(&self, from: &TypeKey, to: &TypeKey) -> bool {
        if self.extractor.load().can_cast_directly(from, to) {
            return true;
        }
        match self.find(from, to) {
            Some(c) => !(c.source() == TypeKey::ANY && c.target() == TypeKey::ANY),
            None => false,
        }
    }

    /// String form of `src` through the registry; degrades to the value's
    /// default rendering on any failure. This is the one operation that
    /// swallows conversion errors by design of its contract.
    pub fn cast_to_string(&self, src: &Value) -> String {
        match self.cast_to(src, &TypeKey::STR) {
            Ok(Value::Str(s)) => s,
            Ok(other) => other.to_string(),
            Err(_) => src.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Primitive default table and numeric widening
// ---------------------------------------------------------------------------

/// Canonical zero value per primitive kind. `Void` has none.
fn zero_value(kind: PrimKind) -> Option<Value> {
    Some(match kind {
        PrimKind::Int => Value::Int(0),
        PrimKind::Long => Value::Long(0),
        PrimKind::Byte => Value::Byte(0),
        PrimKind::Short => Value::Short(0),
        PrimKind::Float => Value::Float(0.0),
        PrimKind::Double => Value::Double(0.0),
        PrimKind::Bool => Value::Bool(false),
        PrimKind::Char => Value::Char(' '),
        PrimKind::Void => return None,
    })
}

/// Rebuild a numeric value at the target kind. Only called once the
/// extractor has approved the conversion as a widening.
fn widen(src: &Value, to: PrimKind) -> Option<Value> {
    match to {
        PrimKind::Byte => src.as_i64().map(|v| Value::Byte(v as i8)),
        PrimKind::Short => src.as_i64().map(|v| Value::Short(v as i16)),
        PrimKind::Int => src.as_i64().map(|v| Value::Int(v as i32)),
        PrimKind::Long => src.as_i64().map(Value::Long),
        PrimKind::Float => src.as_f64().map(|v| Value::Float(v as f32)),
        PrimKind::Double => src.as_f64().map(Value::Double),
        PrimKind::Bool | PrimKind::Char | PrimKind::Void => None,
    }
}
