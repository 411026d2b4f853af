use crate::types::TypeKey;

/// Injected type-introspection strategy.
///
/// The registry itself knows nothing about type hierarchies; everything it
/// needs is behind these two operations. Implementations are replaceable at
/// any time and a swap does not trigger a registry rebuild.
pub trait TypeExtractor: Send + Sync {
    /// Compatible candidate types for `ty`, most specific first. The first
    /// element is conventionally `ty` itself and the last the top type;
    /// resolution probes the source×target cross-product in this order, so
    /// ranking decides which registered pair shadows which.
    fn rank(&self, ty: &TypeKey) -> Vec<TypeKey>;

    /// True when the ambient value model already supports `from` → `to`
    /// without a registered converter (numeric widening, hierarchy upcast).
    fn can_cast_directly(&self, from: &TypeKey, to: &TypeKey) -> bool;
}
