use crate::{
    resolve::TypeRegistry,
    types::{TypeCode, TypeDescription},
};
use dashmap::DashMap;

/// Memoized simple/composite classification. Entries are inserted at most once
/// and never change or leave the cache.
pub struct SimpleTypeCache {
    entries: DashMap<TypeDescription, bool>,
}

impl SimpleTypeCache {
    pub fn new(seed: impl IntoIterator<Item = TypeDescription>) -> Self {
        Self {
            entries: seed.into_iter().map(|t| (t, true)).collect(),
        }
    }

    pub fn get(&self, ty: TypeDescription) -> Option<bool> {
        self.entries.get(&ty).map(|e| *e)
    }

    /// Records `simple` unless another caller got there first, and returns the
    /// classification that ended up in the cache.
    pub fn insert_if_absent(&self, ty: TypeDescription, simple: bool) -> bool {
        *self.entries.entry(ty).or_insert(simple)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TypeRegistry {
    /// Scalar/leaf types: primitives, enums, strings, decimals, dates, time
    /// spans, GUIDs and `Nullable<T>` over any of those.
    pub fn is_simple_type(&self, ty: TypeDescription) -> bool {
        if ty.is_primitive() {
            return true;
        }
        if let Some(simple) = self.simple_types.get(ty) {
            return simple;
        }

        let simple = ty.type_code() != TypeCode::Object
            || self
                .core()
                .nullable_underlying(ty)
                .is_some_and(|inner| self.is_simple_type(inner));
        self.simple_types.insert_if_absent(ty, simple)
    }

    pub fn simple_type_cache(&self) -> &SimpleTypeCache {
        &self.simple_types
    }
}
