use crate::{error::TypeResolutionError, resolve::TypeRegistry, types::TypeDescription};
use std::fmt::{Debug, Display, Formatter};

/// A declared type as it appears in a signature: possibly still mentioning the
/// generic parameters of the declaring type (`!0`) or of the method (`!!0`).
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum TypeSignature {
    Type(TypeDescription),
    TypeGeneric(usize),
    MethodGeneric(usize),
    Generic(TypeDescription, Vec<TypeSignature>),
}

impl From<TypeDescription> for TypeSignature {
    fn from(td: TypeDescription) -> Self {
        TypeSignature::Type(td)
    }
}

impl TypeSignature {
    pub fn generic<A>(definition: TypeDescription, arguments: impl IntoIterator<Item = A>) -> Self
    where
        A: Into<TypeSignature>,
    {
        TypeSignature::Generic(definition, arguments.into_iter().map(Into::into).collect())
    }

    /// True when the signature names no generic parameter at all.
    pub fn is_closed(&self) -> bool {
        match self {
            TypeSignature::Type(_) => true,
            TypeSignature::TypeGeneric(_) | TypeSignature::MethodGeneric(_) => false,
            TypeSignature::Generic(_, args) => args.iter().all(TypeSignature::is_closed),
        }
    }

    pub fn mentions_method_generics(&self) -> bool {
        match self {
            TypeSignature::MethodGeneric(_) => true,
            TypeSignature::Type(_) | TypeSignature::TypeGeneric(_) => false,
            TypeSignature::Generic(_, args) => {
                args.iter().any(TypeSignature::mentions_method_generics)
            }
        }
    }

    /// The named type at the head of the signature; for `Generic` that is the
    /// open definition.
    pub fn head(&self) -> Option<TypeDescription> {
        match self {
            TypeSignature::Type(td) | TypeSignature::Generic(td, _) => Some(*td),
            TypeSignature::TypeGeneric(_) | TypeSignature::MethodGeneric(_) => None,
        }
    }
}

impl Display for TypeSignature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeSignature::Type(td) => write!(f, "{}", td),
            TypeSignature::TypeGeneric(i) => write!(f, "!{}", i),
            TypeSignature::MethodGeneric(i) => write!(f, "!!{}", i),
            TypeSignature::Generic(td, args) => {
                write!(f, "{}<", td.type_name())?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ">")
            }
        }
    }
}

#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct GenericLookup {
    pub type_generics: Vec<TypeDescription>,
    pub method_generics: Vec<TypeDescription>,
}

impl GenericLookup {
    pub fn new(type_generics: Vec<TypeDescription>) -> Self {
        Self {
            type_generics,
            method_generics: vec![],
        }
    }

    pub fn with_method_generics(mut self, method_generics: Vec<TypeDescription>) -> Self {
        self.method_generics = method_generics;
        self
    }

    pub fn make_concrete(
        &self,
        registry: &TypeRegistry,
        t: &TypeSignature,
    ) -> Result<TypeDescription, TypeResolutionError> {
        fn lookup(
            generics: &[TypeDescription],
            index: usize,
        ) -> Result<TypeDescription, TypeResolutionError> {
            generics
                .get(index)
                .copied()
                .ok_or(TypeResolutionError::GenericIndexOutOfBounds {
                    index,
                    length: generics.len(),
                })
        }

        match t {
            TypeSignature::Type(td) => Ok(*td),
            TypeSignature::TypeGeneric(i) => lookup(&self.type_generics, *i),
            TypeSignature::MethodGeneric(i) => lookup(&self.method_generics, *i),
            TypeSignature::Generic(definition, args) => {
                let args = args
                    .iter()
                    .map(|a| self.make_concrete(registry, a))
                    .collect::<Result<Vec<_>, _>>()?;
                registry.instantiate(*definition, &args)
            }
        }
    }
}

impl Debug for GenericLookup {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        struct GenericIndexFormatter(char, usize);
        impl Debug for GenericIndexFormatter {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}{}", self.0, self.1)
            }
        }

        f.debug_map()
            .entries(
                self.type_generics
                    .iter()
                    .enumerate()
                    .map(|(i, t)| (GenericIndexFormatter('T', i), t)),
            )
            .entries(
                self.method_generics
                    .iter()
                    .enumerate()
                    .map(|(i, t)| (GenericIndexFormatter('M', i), t)),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_concrete_substitutes_both_generic_kinds() {
        let registry = TypeRegistry::new();
        let core = registry.core();
        let lookup = GenericLookup::new(vec![core.string]).with_method_generics(vec![core.int32]);

        assert_eq!(
            lookup.make_concrete(&registry, &TypeSignature::TypeGeneric(0)),
            Ok(core.string)
        );
        assert_eq!(
            lookup.make_concrete(&registry, &TypeSignature::MethodGeneric(0)),
            Ok(core.int32)
        );

        let list = lookup
            .make_concrete(
                &registry,
                &TypeSignature::generic(core.list, [TypeSignature::MethodGeneric(0)]),
            )
            .unwrap();
        assert_eq!(list.generic_type_definition(), Some(core.list));
        assert_eq!(list.generic_arguments(), &[core.int32]);
    }

    #[test]
    fn make_concrete_reports_out_of_range_generics() {
        let registry = TypeRegistry::new();
        let lookup = GenericLookup::default();
        assert_eq!(
            lookup.make_concrete(&registry, &TypeSignature::MethodGeneric(1)),
            Err(TypeResolutionError::GenericIndexOutOfBounds {
                index: 1,
                length: 0
            })
        );
    }

    #[test]
    fn closedness() {
        let registry = TypeRegistry::new();
        let core = registry.core();
        assert!(TypeSignature::generic(core.list, [core.int32]).is_closed());
        let open = TypeSignature::generic(core.list, [TypeSignature::TypeGeneric(0)]);
        assert!(!open.is_closed());
        assert!(!open.mentions_method_generics());
        assert_eq!(open.to_string(), "System.Collections.Generic.List`1<!0>");
    }
}
