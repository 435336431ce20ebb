use crate::{resolve::TypeRegistry, types::TypeDescription, value::Value};

/// Assignability in the sense of `Type.IsAssignableFrom`: identity, base
/// classes, implemented interfaces and `Nullable<T>` from `T`. There is no
/// numeric widening and no variance.
pub struct TypeComparer<'a> {
    registry: &'a TypeRegistry,
}

impl<'a> TypeComparer<'a> {
    pub fn new(registry: &'a TypeRegistry) -> Self {
        Self { registry }
    }

    pub fn is_assignable_from(&self, target: TypeDescription, source: TypeDescription) -> bool {
        if target == source {
            return true;
        }
        if let Some(cached) = self.registry.hierarchy_cache.get(&(target, source)) {
            return *cached;
        }
        let result = self.compute_assignable(target, source);
        self.registry
            .hierarchy_cache
            .insert((target, source), result);
        result
    }

    fn compute_assignable(&self, target: TypeDescription, source: TypeDescription) -> bool {
        let core = self.registry.core();
        if target == core.object {
            return true;
        }
        if let Some(underlying) = core.nullable_underlying(target) {
            return underlying == source;
        }
        if target.is_interface() {
            return source.interfaces().contains(&target);
        }
        source.ancestors().any(|a| a == target)
    }

    /// Whether `value` can be passed where `target` is declared. `null` fits
    /// reference types and `Nullable<T>`; the missing-argument sentinel fits
    /// nothing.
    pub fn accepts_value(&self, target: TypeDescription, value: &Value) -> bool {
        match value {
            Value::Missing => false,
            Value::Null => {
                !target.is_value_type() || self.registry.core().nullable_underlying(target).is_some()
            }
            _ => match self.registry.runtime_type_of(value) {
                Some(source) => self.is_assignable_from(target, source),
                None => false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::builder::TypeBuilder;

    #[test]
    fn class_hierarchy() {
        let registry = TypeRegistry::new();
        let base = registry.define(TypeBuilder::class("Tests", "Base")).unwrap();
        let derived = registry
            .define(TypeBuilder::class("Tests", "Derived").extends(base))
            .unwrap();
        let sibling = registry.define(TypeBuilder::class("Tests", "Sibling")).unwrap();
        let comparer = TypeComparer::new(&registry);

        assert!(comparer.is_assignable_from(base, derived));
        assert!(!comparer.is_assignable_from(derived, base));
        assert!(!comparer.is_assignable_from(base, sibling));
        assert!(comparer.is_assignable_from(registry.core().object, sibling));
    }

    #[test]
    fn interfaces_and_nullable() {
        let registry = TypeRegistry::new();
        let core = registry.core();
        let comparer = TypeComparer::new(&registry);
        let nullable_bool = registry.instantiate(core.nullable, &[core.boolean]).unwrap();

        assert!(comparer.is_assignable_from(core.icomparable, core.int32));
        assert!(comparer.is_assignable_from(nullable_bool, core.boolean));
        assert!(!comparer.is_assignable_from(nullable_bool, core.int32));
        assert!(!comparer.is_assignable_from(core.boolean, nullable_bool));
    }

    #[test]
    fn no_numeric_widening() {
        let registry = TypeRegistry::new();
        let core = registry.core();
        let comparer = TypeComparer::new(&registry);
        assert!(!comparer.is_assignable_from(core.int64, core.int32));
        assert!(!comparer.accepts_value(core.double, &Value::Int32(1)));
    }

    #[test]
    fn null_and_missing_values() {
        let registry = TypeRegistry::new();
        let core = registry.core();
        let comparer = TypeComparer::new(&registry);
        let nullable_int = registry.instantiate(core.nullable, &[core.int32]).unwrap();

        assert!(comparer.accepts_value(core.string, &Value::Null));
        assert!(comparer.accepts_value(nullable_int, &Value::Null));
        assert!(!comparer.accepts_value(core.int32, &Value::Null));
        assert!(!comparer.accepts_value(core.object, &Value::Missing));
    }
}
