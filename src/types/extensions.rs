use crate::{
    error::TypeResolutionError,
    resolve::TypeRegistry,
    types::{members::PropertyDescription, TypeDescription},
};

pub trait TypeExtensions {
    /// The type is a generic type whose definition is `generic`.
    fn is_generic_of_core(&self, generic: TypeDescription) -> bool;

    /// The type, one of its base types, or one of its interfaces is an
    /// instantiation of `generic`.
    fn is_generic_of(&self, generic: TypeDescription) -> bool;

    /// Looks the interface up by simple name only, like `Type.GetInterface(string)`.
    fn implements_interface(&self, interface: TypeDescription) -> bool;

    /// The first interface of `other` that this type implements but its base
    /// type does not.
    fn get_common_interface(&self, other: TypeDescription) -> Option<TypeDescription>;
}

impl TypeExtensions for TypeDescription {
    fn is_generic_of_core(&self, generic: TypeDescription) -> bool {
        self.is_generic_type() && self.generic_type_definition() == Some(generic)
    }

    fn is_generic_of(&self, generic: TypeDescription) -> bool {
        self.is_generic_of_core(generic)
            || self.base_type().is_some_and(|b| b.is_generic_of(generic))
            || self
                .interfaces()
                .iter()
                .any(|i| i.is_generic_of_core(generic))
    }

    fn implements_interface(&self, interface: TypeDescription) -> bool {
        self.interfaces()
            .iter()
            .any(|i| i.name() == interface.name())
    }

    fn get_common_interface(&self, other: TypeDescription) -> Option<TypeDescription> {
        let own = self.interfaces();
        let inherited = self
            .base_type()
            .map(|b| b.interfaces())
            .unwrap_or_default();
        other
            .interfaces()
            .into_iter()
            .find(|i| !inherited.contains(i) && own.contains(i))
    }
}

impl TypeRegistry {
    pub fn is_collection_property(
        &self,
        property: PropertyDescription,
    ) -> Result<bool, TypeResolutionError> {
        let property_type = property.property_type(self)?;
        Ok(property_type.is_generic_of(self.core().icollection))
    }
}
