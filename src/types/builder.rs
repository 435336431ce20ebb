//! Fluent construction of type and method definitions before they are handed
//! to the [`TypeRegistry`](crate::resolve::TypeRegistry).
use crate::{
    invoke::MethodBody,
    types::{
        generics::TypeSignature,
        members::{Accessibility, MethodDefinition, Parameter, PropertyDefinition},
        TypeCode, TypeDefinition, TypeDescription, TypeKind,
    },
    value::Value,
};

pub struct TypeBuilder {
    namespace: Option<String>,
    name: String,
    kind: TypeKind,
    type_code: TypeCode,
    generic_parameters: Vec<String>,
    extends: Option<TypeSignature>,
    implements: Vec<TypeSignature>,
    enum_underlying: Option<TypeDescription>,
    properties: Vec<PropertyDefinition>,
}

impl TypeBuilder {
    pub fn new(kind: TypeKind, namespace: &str, name: impl Into<String>) -> Self {
        Self {
            namespace: (!namespace.is_empty()).then(|| namespace.to_string()),
            name: name.into(),
            kind,
            type_code: TypeCode::Object,
            generic_parameters: vec![],
            extends: None,
            implements: vec![],
            enum_underlying: None,
            properties: vec![],
        }
    }

    pub fn class(namespace: &str, name: impl Into<String>) -> Self {
        Self::new(TypeKind::Class, namespace, name)
    }

    pub fn interface(namespace: &str, name: impl Into<String>) -> Self {
        Self::new(TypeKind::Interface, namespace, name)
    }

    pub fn value_type(namespace: &str, name: impl Into<String>) -> Self {
        Self::new(TypeKind::Struct, namespace, name)
    }

    /// Enums take the type code of their underlying integral type.
    pub fn enumeration(
        namespace: &str,
        name: impl Into<String>,
        underlying: TypeDescription,
    ) -> Self {
        let mut builder = Self::new(TypeKind::Enum, namespace, name);
        builder.type_code = underlying.type_code();
        builder.enum_underlying = Some(underlying);
        builder
    }

    pub(crate) fn primitive(name: &str, type_code: TypeCode) -> Self {
        Self::new(TypeKind::Primitive, "System", name).type_code(type_code)
    }

    pub(crate) fn type_code(mut self, type_code: TypeCode) -> Self {
        self.type_code = type_code;
        self
    }

    pub fn extends(mut self, base: impl Into<TypeSignature>) -> Self {
        self.extends = Some(base.into());
        self
    }

    pub fn implements(mut self, iface: impl Into<TypeSignature>) -> Self {
        self.implements.push(iface.into());
        self
    }

    pub fn generic_parameters<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.generic_parameters = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn property(mut self, name: impl Into<String>, property_type: impl Into<TypeSignature>) -> Self {
        self.properties.push(PropertyDefinition {
            name: name.into(),
            property_type: property_type.into(),
        });
        self
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn full_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{}.{}", ns, self.name),
            None => self.name.clone(),
        }
    }

    pub(crate) fn has_base(&self) -> bool {
        self.extends.is_some()
    }

    pub(crate) fn build(self) -> TypeDefinition {
        TypeDefinition {
            namespace: self.namespace,
            name: self.name,
            kind: self.kind,
            type_code: self.type_code,
            generic_parameters: self.generic_parameters,
            instantiation: None,
            extends: self.extends,
            implements: self.implements,
            enum_underlying: self.enum_underlying,
            properties: self.properties,
        }
    }
}

pub struct MethodBuilder {
    name: String,
    generic_parameters: Vec<String>,
    parameters: Vec<Parameter>,
    return_type: Option<TypeSignature>,
    instance: bool,
    accessibility: Accessibility,
    body: Option<MethodBody>,
}

impl MethodBuilder {
    /// A public instance method with no parameters, no return value and no body.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            generic_parameters: vec![],
            parameters: vec![],
            return_type: None,
            instance: true,
            accessibility: Accessibility::Public,
            body: None,
        }
    }

    pub fn generic_parameters<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.generic_parameters = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn parameter(mut self, name: impl Into<String>, parameter_type: impl Into<TypeSignature>) -> Self {
        self.parameters.push(Parameter {
            name: name.into(),
            parameter_type: parameter_type.into(),
            default: None,
        });
        self
    }

    pub fn optional_parameter(
        mut self,
        name: impl Into<String>,
        parameter_type: impl Into<TypeSignature>,
        default: Value,
    ) -> Self {
        self.parameters.push(Parameter {
            name: name.into(),
            parameter_type: parameter_type.into(),
            default: Some(default),
        });
        self
    }

    pub fn returns(mut self, return_type: impl Into<TypeSignature>) -> Self {
        self.return_type = Some(return_type.into());
        self
    }

    pub fn static_method(mut self) -> Self {
        self.instance = false;
        self
    }

    pub fn accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    pub fn private(self) -> Self {
        self.accessibility(Accessibility::Private)
    }

    pub fn body(mut self, body: impl Into<MethodBody>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub(crate) fn build(self) -> MethodDefinition {
        MethodDefinition {
            name: self.name,
            generic_parameters: self.generic_parameters,
            parameters: self.parameters,
            return_type: self.return_type,
            instance: self.instance,
            accessibility: self.accessibility,
            body: self.body,
        }
    }
}
