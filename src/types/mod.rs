use crate::types::{
    generics::TypeSignature,
    members::{PropertyDefinition, PropertyDescription},
};
use std::{
    fmt::{Debug, Display, Formatter},
    hash::{Hash, Hasher},
};

pub mod builder;
pub mod comparer;
pub mod extensions;
pub mod generics;
pub mod members;
pub mod simple;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Interface,
    Struct,
    Enum,
    Primitive,
}

/// Mirrors `System.TypeCode`. Everything that is not a core scalar reports `Object`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeCode {
    Object,
    Boolean,
    Char,
    SByte,
    Byte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Single,
    Double,
    Decimal,
    DateTime,
    String,
}

#[derive(Clone, Debug)]
pub struct GenericInstantiation {
    pub definition: TypeDescription,
    pub arguments: Vec<TypeDescription>,
}

pub struct TypeDefinition {
    pub namespace: Option<String>,
    pub name: String,
    pub kind: TypeKind,
    pub type_code: TypeCode,
    pub generic_parameters: Vec<String>,
    pub instantiation: Option<GenericInstantiation>,
    pub extends: Option<TypeSignature>,
    pub implements: Vec<TypeSignature>,
    pub enum_underlying: Option<TypeDescription>,
    pub properties: Vec<PropertyDefinition>,
}

impl TypeDefinition {
    pub fn full_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{}.{}", ns, self.name),
            None => self.name.clone(),
        }
    }
}

#[derive(Clone, Copy)]
pub struct TypeDescription {
    pub definition: &'static TypeDefinition,
}

impl TypeDescription {
    /// Type definitions live for the rest of the process, like loaded metadata.
    pub(crate) fn leak(definition: TypeDefinition) -> Self {
        Self {
            definition: Box::leak(Box::new(definition)),
        }
    }

    pub fn name(&self) -> &'static str {
        &self.definition.name
    }

    pub fn namespace(&self) -> Option<&'static str> {
        self.definition.namespace.as_deref()
    }

    pub fn type_name(&self) -> String {
        self.definition.full_name()
    }

    pub fn kind(&self) -> TypeKind {
        self.definition.kind
    }

    pub fn type_code(&self) -> TypeCode {
        self.definition.type_code
    }

    pub fn is_interface(&self) -> bool {
        self.kind() == TypeKind::Interface
    }

    pub fn is_primitive(&self) -> bool {
        self.kind() == TypeKind::Primitive
    }

    pub fn is_enum(&self) -> bool {
        self.kind() == TypeKind::Enum
    }

    pub fn is_value_type(&self) -> bool {
        matches!(
            self.kind(),
            TypeKind::Struct | TypeKind::Enum | TypeKind::Primitive
        )
    }

    pub fn enum_underlying_type(&self) -> Option<TypeDescription> {
        self.definition.enum_underlying
    }

    pub fn is_generic_type(&self) -> bool {
        self.is_generic_type_definition() || self.definition.instantiation.is_some()
    }

    pub fn is_generic_type_definition(&self) -> bool {
        !self.definition.generic_parameters.is_empty() && self.definition.instantiation.is_none()
    }

    /// The open definition of a closed instantiation, or the type itself when it
    /// already is a generic type definition.
    pub fn generic_type_definition(&self) -> Option<TypeDescription> {
        match &self.definition.instantiation {
            Some(inst) => Some(inst.definition),
            None if self.is_generic_type_definition() => Some(*self),
            None => None,
        }
    }

    pub fn generic_arguments(&self) -> &'static [TypeDescription] {
        match &self.definition.instantiation {
            Some(inst) => &inst.arguments,
            None => &[],
        }
    }

    pub fn generic_arity(&self) -> usize {
        match self.generic_type_definition() {
            Some(def) => def.definition.generic_parameters.len(),
            None => 0,
        }
    }

    pub fn base_type(&self) -> Option<TypeDescription> {
        self.definition.extends.as_ref().and_then(TypeSignature::head)
    }

    pub fn declared_interfaces(&self) -> impl Iterator<Item = TypeDescription> {
        self.definition
            .implements
            .iter()
            .filter_map(TypeSignature::head)
    }

    /// Every interface the type implements, directly, through interface
    /// inheritance, or through its base types. No duplicates.
    pub fn interfaces(&self) -> Vec<TypeDescription> {
        fn collect(iface: TypeDescription, found: &mut Vec<TypeDescription>) {
            if found.contains(&iface) {
                return;
            }
            found.push(iface);
            for parent in iface.declared_interfaces() {
                collect(parent, found);
            }
        }

        let mut found = vec![];
        for ty in self.ancestors() {
            for iface in ty.declared_interfaces() {
                collect(iface, &mut found);
            }
        }
        found
    }

    /// The type itself followed by its base types, ending at the root.
    pub fn ancestors(&self) -> Ancestors {
        Ancestors { next: Some(*self) }
    }

    pub fn properties(&self) -> impl Iterator<Item = PropertyDescription> {
        let parent = *self;
        let declaring = self.generic_type_definition().unwrap_or(parent);
        declaring
            .definition
            .properties
            .iter()
            .map(move |property| PropertyDescription { parent, property })
    }

    pub fn property(&self, name: &str) -> Option<PropertyDescription> {
        self.properties().find(|p| p.property.name == name)
    }
}

pub struct Ancestors {
    next: Option<TypeDescription>,
}

impl Iterator for Ancestors {
    type Item = TypeDescription;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.base_type();
        Some(current)
    }
}

impl Display for TypeDescription {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.type_name())?;
        let args = self.generic_arguments();
        if !args.is_empty() {
            write!(f, "[")?;
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{}", arg)?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

impl Debug for TypeDescription {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl PartialEq for TypeDescription {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.definition, other.definition)
    }
}

impl Eq for TypeDescription {}

impl Hash for TypeDescription {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.definition as *const TypeDefinition).hash(state);
    }
}
