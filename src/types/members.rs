use crate::{
    error::TypeResolutionError,
    invoke::MethodBody,
    resolve::TypeRegistry,
    types::{
        generics::{GenericLookup, TypeSignature},
        TypeDescription,
    },
    value::Value,
};
use bitflags::bitflags;
use std::{
    fmt::{Debug, Display, Formatter},
    hash::{Hash, Hasher},
};

bitflags! {
    /// Member selection for [`TypeRegistry::get_methods`]. Values match
    /// `System.Reflection.BindingFlags`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct BindingFlags: u32 {
        const DECLARED_ONLY = 0x02;
        const INSTANCE = 0x04;
        const STATIC = 0x08;
        const PUBLIC = 0x10;
        const NON_PUBLIC = 0x20;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Accessibility {
    Public,
    Family,
    Assembly,
    Private,
}

#[derive(Clone, Debug)]
pub struct Parameter {
    pub name: String,
    pub parameter_type: TypeSignature,
    /// Metadata only: a default value never makes the argument optional.
    pub default: Option<Value>,
}

pub struct MethodDefinition {
    pub name: String,
    pub generic_parameters: Vec<String>,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<TypeSignature>,
    pub instance: bool,
    pub accessibility: Accessibility,
    pub body: Option<MethodBody>,
}

#[derive(Clone, Copy)]
pub struct MethodDescription {
    pub parent: TypeDescription,
    pub method: &'static MethodDefinition,
}

impl MethodDescription {
    pub fn name(&self) -> &'static str {
        &self.method.name
    }

    pub fn is_generic_method(&self) -> bool {
        !self.method.generic_parameters.is_empty()
    }

    pub fn generic_arity(&self) -> usize {
        self.method.generic_parameters.len()
    }

    pub fn parameters(&self) -> &'static [Parameter] {
        &self.method.parameters
    }

    pub fn is_static(&self) -> bool {
        !self.method.instance
    }

    pub fn is_public(&self) -> bool {
        self.method.accessibility == Accessibility::Public
    }

    pub fn is_async(&self) -> bool {
        matches!(self.method.body, Some(MethodBody::AsyncNativeMethod(_)))
    }

    pub fn body(&self) -> Option<&'static MethodBody> {
        self.method.body.as_ref()
    }

    /// Generic arguments of the declaring type, for substituting `!N` in the
    /// signature.
    pub fn type_generics(&self) -> GenericLookup {
        GenericLookup::new(self.parent.generic_arguments().to_vec())
    }
}

impl Display for MethodDescription {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_static() {
            write!(f, "static ")?;
        }
        match &self.method.return_type {
            Some(t) => write!(f, "{} ", t)?,
            None => write!(f, "void ")?,
        }
        write!(f, "{}::{}", self.parent, self.method.name)?;
        if self.is_generic_method() {
            write!(f, "<{}>", self.method.generic_parameters.join(", "))?;
        }
        write!(f, "(")?;
        for (i, p) in self.method.parameters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", p.parameter_type)?;
        }
        write!(f, ")")
    }
}

impl Debug for MethodDescription {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl PartialEq for MethodDescription {
    fn eq(&self, other: &Self) -> bool {
        self.parent == other.parent && std::ptr::eq(self.method, other.method)
    }
}

impl Eq for MethodDescription {}

impl Hash for MethodDescription {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.parent.hash(state);
        (self.method as *const MethodDefinition).hash(state);
    }
}

#[derive(Clone, Debug)]
pub struct PropertyDefinition {
    pub name: String,
    pub property_type: TypeSignature,
}

#[derive(Clone, Copy)]
pub struct PropertyDescription {
    pub parent: TypeDescription,
    pub property: &'static PropertyDefinition,
}

impl PropertyDescription {
    pub fn name(&self) -> &'static str {
        &self.property.name
    }

    pub fn property_type(&self, registry: &TypeRegistry) -> Result<TypeDescription, TypeResolutionError> {
        GenericLookup::new(self.parent.generic_arguments().to_vec())
            .make_concrete(registry, &self.property.property_type)
    }
}

impl Debug for PropertyDescription {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}::{}",
            self.property.property_type, self.parent, self.property.name
        )
    }
}

impl PartialEq for PropertyDescription {
    fn eq(&self, other: &Self) -> bool {
        self.parent == other.parent && std::ptr::eq(self.property, other.property)
    }
}

impl Eq for PropertyDescription {}
